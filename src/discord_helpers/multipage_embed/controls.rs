use serenity::all::{ButtonStyle, CreateActionRow, CreateButton, ReactionType};

use super::options::{
    ButtonAppearance, ControlAppearance, DEFAULT_NEXT_EMOJI, DEFAULT_PREVIOUS_EMOJI,
};
use super::session::Direction;

const CUSTOM_ID_PREFIX: &str = "paginator";

/// Which paginator button produced a component interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Previous,
    Counter,
    Next,
}

impl NavAction {
    pub fn custom_id(self) -> String {
        let action = match self {
            NavAction::Previous => "prev",
            NavAction::Counter => "counter",
            NavAction::Next => "next",
        };
        format!("{CUSTOM_ID_PREFIX}:{action}")
    }

    /// `None` for any component the paginator did not create.
    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        let (prefix, action) = custom_id.split_once(':')?;
        if prefix != CUSTOM_ID_PREFIX {
            return None;
        }

        match action {
            "prev" => Some(NavAction::Previous),
            "counter" => Some(NavAction::Counter),
            "next" => Some(NavAction::Next),
            _ => None,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            NavAction::Previous => Some(Direction::Previous),
            NavAction::Next => Some(Direction::Next),
            NavAction::Counter => None,
        }
    }
}

pub fn counter_label(index: usize, total: usize) -> String {
    format!("{}/{}", index + 1, total)
}

fn nav_button(action: NavAction, look: &ButtonAppearance, fallback_emoji: &str) -> CreateButton {
    let mut button = CreateButton::new(action.custom_id()).style(ButtonStyle::from(look.style));

    if let Some(label) = &look.label {
        button = button.label(label.clone());
    }

    match (&look.emoji, &look.label) {
        (Some(emoji), _) => button.emoji(ReactionType::Unicode(emoji.clone())),
        // a button with neither renders as an empty box, fall back to the arrow
        (None, None) => button.emoji(ReactionType::Unicode(fallback_emoji.to_string())),
        (None, Some(_)) => button,
    }
}

/// Previous, counter and next buttons in one row, built fresh for every render.
pub fn build_controls(
    look: &ControlAppearance,
    index: usize,
    total: usize,
) -> Vec<CreateActionRow> {
    let previous = nav_button(NavAction::Previous, &look.previous, DEFAULT_PREVIOUS_EMOJI);
    let counter = CreateButton::new(NavAction::Counter.custom_id())
        .label(counter_label(index, total))
        .style(ButtonStyle::from(look.counter_style))
        .disabled(true);
    let next = nav_button(NavAction::Next, &look.next, DEFAULT_NEXT_EMOJI);

    vec![CreateActionRow::Buttons(vec![previous, counter, next])]
}
