//! In-memory storage for the service layer
//!
//! `directory` holds the plain synchronous store; `shared` wraps it in a
//! lock so request handlers on different worker threads see one store.

pub mod directory;
pub mod shared;

pub use directory::{Collection, Directory, NewRecord, Record};
pub use shared::SharedDirectory;
