use std::time::Duration;

use serenity::all::UserId;

use super::controls::counter_label;
use super::options::{ControlAppearance, PaginatorOptions};
use crate::error::{PaginatorError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// The two moves a paginator supports. Button dispatch goes through this
/// trait instead of binding callbacks onto a view.
pub trait Navigate {
    /// Move forward one page, wrapping from the last page to the first.
    fn advance(&mut self) -> usize;
    /// Move back one page, wrapping from the first page to the last.
    fn retreat(&mut self) -> usize;

    fn step(&mut self, direction: Direction) -> usize {
        match direction {
            Direction::Previous => self.retreat(),
            Direction::Next => self.advance(),
        }
    }
}

/// Live pagination state for one displayed message.
///
/// `current_index` is always a valid index into `pages`; the constructor
/// rejects anything else and the only mutations are the wrapping moves.
#[derive(Debug, Clone)]
pub struct PaginationSession<P> {
    pages: Vec<P>,
    current_index: usize,
    owner: UserId,
    restrict_to_owner: bool,
    controls: ControlAppearance,
    timeout: Duration,
    ephemeral: bool,
}

impl<P> PaginationSession<P> {
    pub fn new(pages: Vec<P>, owner: UserId, options: &PaginatorOptions) -> Result<Self> {
        if pages.is_empty() {
            return Err(PaginatorError::InvalidArgument(
                "a paginator needs at least one page".to_string(),
            ));
        }

        if options.initial_index >= pages.len() {
            return Err(PaginatorError::InvalidArgument(format!(
                "initial page {} is out of range for {} pages",
                options.initial_index,
                pages.len()
            )));
        }

        Ok(Self {
            pages,
            current_index: options.initial_index,
            owner,
            restrict_to_owner: options.restrict_to_owner,
            controls: options.controls.clone(),
            timeout: options.timeout,
            ephemeral: options.ephemeral,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page(&self) -> &P {
        &self.pages[self.current_index]
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn restrict_to_owner(&self) -> bool {
        self.restrict_to_owner
    }

    pub fn controls(&self) -> &ControlAppearance {
        &self.controls
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn ephemeral(&self) -> bool {
        self.ephemeral
    }

    pub fn may_control(&self, actor: UserId) -> bool {
        !self.restrict_to_owner || actor == self.owner
    }

    pub fn counter_label(&self) -> String {
        counter_label(self.current_index, self.pages.len())
    }
}

impl<P> Navigate for PaginationSession<P> {
    fn advance(&mut self) -> usize {
        self.current_index = (self.current_index + 1) % self.pages.len();
        self.current_index
    }

    fn retreat(&mut self) -> usize {
        let total = self.pages.len();
        self.current_index = (self.current_index + total - 1) % total;
        self.current_index
    }
}
