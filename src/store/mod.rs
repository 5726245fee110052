mod local;
mod partition;
mod records;

pub use local::{LocalStore, StoreError, EXERCISES_NS, WORKOUTS_NS};
pub use partition::{PartitionId, PartitionIdError};
pub use records::{RecordStore, RecordStoreError};
