//! # Terminal Styling
//!
//! Styling for the text listing printed by the CLI. Whether to emit ANSI
//! styles is decided once from the `--color` flag and the environment:
//!
//! - `always` / `never` win outright.
//! - `auto` turns styling off for `NO_COLOR` (any value), `CLICOLOR=0` and
//!   `TERM=dumb`, on for `CLICOLOR_FORCE` (non-empty, not `0`), and otherwise
//!   asks `console` whether stdout supports colors.

use clap::ValueEnum;
use console::style;
use std::env;

/// Value of the `--color` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Style when the terminal supports it
    #[default]
    Auto,
    /// Always emit styles
    Always,
    /// Never emit styles
    Never,
}

fn env_allows_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return false;
    }
    if env::var("CLICOLOR_FORCE").is_ok_and(|v| !v.is_empty() && v != "0") {
        return true;
    }
    if env::var("TERM").is_ok_and(|v| v == "dumb") {
        return false;
    }
    console::Term::stdout().features().colors_supported()
}

/// Styles applied to listing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputStyle {
    pub color: bool,
}

impl OutputStyle {
    pub fn resolve(choice: ColorChoice) -> Self {
        let color = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => env_allows_color(),
        };
        Self { color }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Section headings.
    pub fn heading(&self, text: &str) -> String {
        style(text).bold().cyan().force_styling(self.color).to_string()
    }

    /// Column titles.
    pub fn header(&self, text: &str) -> String {
        style(text).bold().underlined().force_styling(self.color).to_string()
    }

    /// Secondary text such as idle times.
    pub fn dim(&self, text: &str) -> String {
        style(text).dim().force_styling(self.color).to_string()
    }

    /// Status marker: the symbol when styling, the bracketed word otherwise.
    pub fn marker<'a>(&self, symbol: &'a str, word: &'a str) -> &'a str {
        if self.color {
            symbol
        } else {
            word
        }
    }

    /// The pager entry of the page being shown. Bracketed when unstyled.
    pub fn current_page(&self, text: &str) -> String {
        if self.color {
            style(text).bold().reverse().force_styling(true).to_string()
        } else {
            format!("<{}>", text)
        }
    }
}
