//! Client-side synchronization core for a remote todo list.
//!
//! # Overview
//! Holds the in-memory todo collection, mutates it only by round-tripping
//! through the remote service, and tracks the single in-progress edit.
//! Presentation code drives `TodoStore` and `EditSession` and renders
//! whatever state they expose.
//!
//! # Design
//! - `TodoCodec` builds requests and parses responses without I/O.
//! - `HttpTransport` executes one round-trip; `ReqwestTransport` is the
//!   production implementation.
//! - `RemoteTodoGateway` is the seam the store depends on; `HttpGateway`
//!   joins codec and transport.
//! - `TodoStore` applies a mutation only after the service confirms it.
//! - `EditSession` is an `Idle | Editing` state machine over one todo.

pub mod codec;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod session;
pub mod store;
pub mod types;

pub use codec::TodoCodec;
pub use config::ClientConfig;
pub use error::{ErrorKind, TodoError};
pub use gateway::{HttpGateway, RemoteTodoGateway};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use session::{DraftChange, EditSession, EditState};
pub use store::TodoStore;
pub use types::{Draft, Todo, TodoId, TodoPatch};
