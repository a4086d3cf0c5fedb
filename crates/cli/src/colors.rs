// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal colors for help and queue output.
//!
//! Respects environment variables:
//! - `NO_COLOR=1`: Disables colors
//! - `COLOR=1`: Forces colors even without TTY

use std::io::IsTerminal;

use anstyle::{Ansi256Color, AnsiColor, Color, Style};
use clap::builder::styling::Styles;
use outbox_core::ItemState;

/// ANSI 256-color codes.
pub mod codes {
    /// Section headers: pastel cyan/steel blue
    pub const HEADER: u8 = 74;
    /// Commands/literals: light grey
    pub const LITERAL: u8 = 250;
    /// Timestamps, ids and other context: medium grey
    pub const CONTEXT: u8 = 245;
}

/// Check if colors should be enabled based on TTY and environment variables.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn fg256(code: u8) -> Style {
    Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))))
}

fn paint(style: Style, text: &str) -> String {
    if should_colorize() {
        format!("{}{}{}", style.render(), text, style.render_reset())
    } else {
        text.to_string()
    }
}

pub fn header(text: &str) -> String {
    paint(fg256(codes::HEADER), text)
}

pub fn context(text: &str) -> String {
    paint(fg256(codes::CONTEXT), text)
}

/// Style for an item state: outstanding work stands out, synced fades.
pub fn state_style(state: ItemState) -> Style {
    match state {
        ItemState::Pending => Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        ItemState::Syncing => Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        ItemState::Synced => fg256(codes::CONTEXT),
        ItemState::Failed => Style::new()
            .fg_color(Some(Color::Ansi(AnsiColor::Red)))
            .bold(),
    }
}

pub fn state(state: ItemState) -> String {
    paint(state_style(state), state.as_str())
}

/// Clap styles for help output.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    let header = fg256(codes::HEADER);
    Styles::styled()
        .header(header)
        .usage(header)
        .literal(fg256(codes::LITERAL))
        .placeholder(fg256(codes::CONTEXT))
        .valid(fg256(codes::CONTEXT))
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
