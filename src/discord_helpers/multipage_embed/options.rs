use std::time::Duration;

use serde::{Deserialize, Serialize};
use serenity::all::ButtonStyle;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_PREVIOUS_EMOJI: &str = "\u{25c0}";
pub const DEFAULT_NEXT_EMOJI: &str = "\u{25b6}";

/// Button colors a paginator control can take.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ControlStyle {
    Blurple,
    #[default]
    Grey,
    Green,
    Red,
}

impl From<ControlStyle> for ButtonStyle {
    fn from(style: ControlStyle) -> Self {
        match style {
            ControlStyle::Blurple => ButtonStyle::Primary,
            ControlStyle::Grey => ButtonStyle::Secondary,
            ControlStyle::Green => ButtonStyle::Success,
            ControlStyle::Red => ButtonStyle::Danger,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ButtonAppearance {
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub style: ControlStyle,
}

impl ButtonAppearance {
    pub fn emoji<S: Into<String>>(emoji: S) -> Self {
        Self {
            emoji: Some(emoji.into()),
            label: None,
            style: ControlStyle::Grey,
        }
    }

    pub fn label<S: Into<String>>(label: S) -> Self {
        Self {
            emoji: None,
            label: Some(label.into()),
            style: ControlStyle::Grey,
        }
    }

    pub fn style(mut self, style: ControlStyle) -> Self {
        self.style = style;
        self
    }
}

/// How the previous / counter / next row looks.
///
/// Every session receives its own clone, so tweaking the options for one
/// paginator never leaks into another.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ControlAppearance {
    pub previous: ButtonAppearance,
    pub next: ButtonAppearance,
    pub counter_style: ControlStyle,
}

impl Default for ControlAppearance {
    fn default() -> Self {
        Self {
            previous: ButtonAppearance::emoji(DEFAULT_PREVIOUS_EMOJI),
            next: ButtonAppearance::emoji(DEFAULT_NEXT_EMOJI),
            counter_style: ControlStyle::Grey,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaginatorOptions {
    pub initial_index: usize,
    pub restrict_to_owner: bool,
    /// Inactivity window; every button press starts it over.
    pub timeout: Duration,
    /// Only honoured when answering a slash command.
    pub ephemeral: bool,
    pub controls: ControlAppearance,
}

impl Default for PaginatorOptions {
    fn default() -> Self {
        Self {
            initial_index: 0,
            restrict_to_owner: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            ephemeral: false,
            controls: ControlAppearance::default(),
        }
    }
}

impl PaginatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_index(mut self, index: usize) -> Self {
        self.initial_index = index;
        self
    }

    pub fn restrict_to_owner(mut self, restrict: bool) -> Self {
        self.restrict_to_owner = restrict;
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }

    pub fn previous_button(mut self, button: ButtonAppearance) -> Self {
        self.controls.previous = button;
        self
    }

    pub fn next_button(mut self, button: ButtonAppearance) -> Self {
        self.controls.next = button;
        self
    }

    pub fn counter_style(mut self, style: ControlStyle) -> Self {
        self.controls.counter_style = style;
        self
    }
}
