pub mod config;
pub mod discord_helpers;
pub mod error;
pub mod logging;

pub use discord_helpers::multipage_embed::{
    ButtonAppearance, ControlStyle, Navigate, PaginationSession, Paginator, PaginatorOptions,
};
pub use error::{PaginatorError, Result};
