//! Cloud profile synchronization.
//!
//! The remote side is an opaque per-user profile store with two data
//! endpoints (`POST /sync`, `GET /load`) and an identity endpoint
//! (`GET /me`). The merge policy is deliberately blunt: on sign-in a
//! non-empty cloud profile replaces the local partition wholesale, and an
//! empty one receives the local partition instead. Any failure degrades
//! to a logged no-op; local data stays authoritative.

pub mod bridge;
pub mod client;
pub mod protocol;

pub use bridge::{merge_action, push_local, reconcile, MergeAction, ReconcileOutcome};
pub use client::{SyncClient, SyncError};
pub use protocol::{LoadResponse, MeResponse, SyncRequest, SyncResponse};
