//! convoca-core - Core library for Convoca
//!
//! This crate contains the shared models, the client-side document cache,
//! the progress/deadline calculators, the permission evaluator and the typed
//! boundary to the REST backend used by every Convoca interface.

pub mod api;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod deadline;
pub mod error;
pub mod export;
pub mod models;
pub mod permissions;
pub mod progress;
pub mod state;
pub mod util;

pub use cache::{DocumentCache, RefreshTicket};
pub use error::{Error, Result};
pub use models::{Collection, CollectionId, Document, DocumentId};
pub use state::AppState;
