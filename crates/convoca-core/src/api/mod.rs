//! Boundary to the REST backend: typed payload decoding, the HTTP client and
//! the HTTP error taxonomy.

mod client;
mod error;
pub mod wire;

pub use client::ApiClient;
pub use error::ApiError;
pub use wire::{decode_access_info, decode_collection, decode_collections, decode_documents};
