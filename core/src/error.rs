//! Error taxonomy for the todo synchronization core.
//!
//! # Design
//! Every gateway failure lands in exactly one of four remote variants:
//! `Validation`, `NotFound`, `Transport`, `Server`. `NotEditing` is the only
//! local usage error and never originates from the network. Nothing in the
//! core swallows an error; the store and edit session hand each one back to
//! the caller unchanged.

use thiserror::Error;

use crate::types::TodoId;

/// Errors surfaced by the gateway, the store and the edit session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    /// Input was rejected, either locally before any request or by the
    /// service (400/422).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced todo does not exist. `id` is `None` when the service
    /// answered 404 for a request that carried no id.
    #[error("todo not found{}", id_suffix(.id))]
    NotFound { id: Option<TodoId> },

    /// No response reached us: connection refused, DNS, I/O or a timeout in
    /// the underlying HTTP client.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered with an error status, or with a success status
    /// and a body that does not follow the protocol.
    #[error("server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    /// `update_draft` or `save` was called while no edit is active.
    #[error("no edit in progress")]
    NotEditing,
}

fn id_suffix(id: &Option<TodoId>) -> String {
    id.as_ref().map(|id| format!(": {id}")).unwrap_or_default()
}

/// Fieldless discriminant of [`TodoError`], convenient for presentation code
/// that only needs to branch on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Transport,
    Server,
    NotEditing,
}

impl TodoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::Validation(_) => ErrorKind::Validation,
            TodoError::NotFound { .. } => ErrorKind::NotFound,
            TodoError::Transport(_) => ErrorKind::Transport,
            TodoError::Server { .. } => ErrorKind::Server,
            TodoError::NotEditing => ErrorKind::NotEditing,
        }
    }

    pub(crate) fn not_found(id: &TodoId) -> Self {
        TodoError::NotFound {
            id: Some(id.clone()),
        }
    }
}
