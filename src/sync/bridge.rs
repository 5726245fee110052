//! Sign-in reconciliation between the local partition and the cloud
//! profile.

use crate::store::{RecordStore, RecordStoreError};

use super::client::SyncClient;
use super::protocol::LoadResponse;

/// What a reconciliation pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The cloud profile was non-empty and replaced the local partition.
    ReplacedLocal,
    /// The cloud profile was empty; the local partition was pushed to it.
    PushedLocal,
    /// The server could not be reached or rejected the call; local data
    /// stays authoritative.
    Offline,
}

/// Which side wins for a pulled profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeAction {
    ReplaceLocal,
    PushLocal,
}

/// A non-empty cloud profile replaces the local partition wholesale
/// (last-pull-wins, local-only records are lost). An empty one must not
/// destroy unsynced local data, so the local partition is pushed instead.
pub fn merge_action(remote: &LoadResponse) -> MergeAction {
    if remote.is_empty() {
        MergeAction::PushLocal
    } else {
        MergeAction::ReplaceLocal
    }
}

/// Runs the sign-in reconciliation for `user_id` against `store`'s
/// partition.
///
/// Network failures degrade to a no-op (`Offline`); only a local write
/// failure is surfaced as an error.
pub async fn reconcile(
    client: &SyncClient,
    store: &RecordStore,
    user_id: &str,
) -> Result<ReconcileOutcome, RecordStoreError> {
    let remote = match client.pull(user_id).await {
        Ok(remote) => remote,
        Err(e) => {
            tracing::warn!("Sync pull failed, keeping local data: {}", e);
            return Ok(ReconcileOutcome::Offline);
        }
    };

    match merge_action(&remote) {
        MergeAction::ReplaceLocal => {
            store.store(&remote.exercises, &remote.workouts)?;
            Ok(ReconcileOutcome::ReplacedLocal)
        }
        MergeAction::PushLocal => match push_local(client, store, user_id).await {
            Ok(true) => Ok(ReconcileOutcome::PushedLocal),
            Ok(false) => {
                tracing::warn!("Server rejected sync push");
                Ok(ReconcileOutcome::Offline)
            }
            Err(e) => {
                tracing::warn!("Sync push failed: {}", e);
                Ok(ReconcileOutcome::Offline)
            }
        },
    }
}

/// Pushes a snapshot of the current local partition to the cloud profile.
///
/// The snapshot is taken at call time; edits made while the push is in
/// flight are not included.
pub async fn push_local(
    client: &SyncClient,
    store: &RecordStore,
    user_id: &str,
) -> Result<bool, super::client::SyncError> {
    let (exercises, workouts) = store.load();
    client.push(user_id, &exercises, &workouts).await
}
