//! Server-side modules for the liftlog profile server.

pub mod storage;

pub use storage::{ProfileStorage, ProfileStorageError, StoredProfile};
