use serenity::all::MessageId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaginatorError {
    /// Empty page list or an initial page outside of it.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Someone other than the owner pressed a button on a restricted paginator.
    #[error("only the user who started this paginator can control it")]
    PermissionDenied,
    #[error("no pagination session for message {0}")]
    MissingSession(MessageId),
    #[error("discord request failed: {0}")]
    Http(#[from] serenity::Error),
}

pub type Result<T> = std::result::Result<T, PaginatorError>;
