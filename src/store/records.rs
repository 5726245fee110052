//! Typed record store over one user data partition.

use uuid::Uuid;

use super::local::{LocalStore, StoreError, EXERCISES_NS, WORKOUTS_NS};
use super::partition::PartitionId;
use crate::models::{Exercise, WorkoutEntry};

/// Errors from record store mutations.
#[derive(Debug)]
pub enum RecordStoreError {
    /// Underlying persistence failure.
    Store(StoreError),
    /// Referenced exercise does not exist in this partition.
    UnknownExercise(Uuid),
    /// Referenced workout entry does not exist in this partition.
    UnknownWorkout(Uuid),
}

impl std::fmt::Display for RecordStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordStoreError::Store(e) => write!(f, "{}", e),
            RecordStoreError::UnknownExercise(id) => write!(f, "No exercise with id {}", id),
            RecordStoreError::UnknownWorkout(id) => write!(f, "No workout entry with id {}", id),
        }
    }
}

impl std::error::Error for RecordStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordStoreError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for RecordStoreError {
    fn from(e: StoreError) -> Self {
        RecordStoreError::Store(e)
    }
}

/// Reads and mutates the exercise and workout lists of one partition.
///
/// Every mutation rewrites the affected list in full and is durable once
/// the call returns.
pub struct RecordStore {
    local: LocalStore,
    partition: PartitionId,
}

impl RecordStore {
    pub fn new(local: LocalStore, partition: PartitionId) -> Self {
        Self { local, partition }
    }

    pub fn partition(&self) -> &PartitionId {
        &self.partition
    }

    pub fn exercises(&self) -> Vec<Exercise> {
        self.local.load_list(EXERCISES_NS, &self.partition)
    }

    pub fn workouts(&self) -> Vec<WorkoutEntry> {
        self.local.load_list(WORKOUTS_NS, &self.partition)
    }

    /// Both lists of the active partition.
    pub fn load(&self) -> (Vec<Exercise>, Vec<WorkoutEntry>) {
        (self.exercises(), self.workouts())
    }

    /// Replaces both lists wholesale. Used when a pulled cloud profile
    /// overwrites the local partition.
    pub fn store(
        &self,
        exercises: &[Exercise],
        workouts: &[WorkoutEntry],
    ) -> Result<(), RecordStoreError> {
        self.local
            .save_list(EXERCISES_NS, &self.partition, exercises)?;
        self.local
            .save_list(WORKOUTS_NS, &self.partition, workouts)?;
        Ok(())
    }

    pub fn add_exercise(&self, exercise: Exercise) -> Result<(), RecordStoreError> {
        let mut exercises = self.exercises();
        exercises.push(exercise);
        self.local
            .save_list(EXERCISES_NS, &self.partition, &exercises)?;
        Ok(())
    }

    /// Resolves an exercise by id or by case-insensitive name.
    pub fn find_exercise(&self, identifier: &str) -> Option<Exercise> {
        let exercises = self.exercises();
        if let Ok(id) = Uuid::parse_str(identifier) {
            if let Some(exercise) = exercises.iter().find(|e| e.id == id) {
                return Some(exercise.clone());
            }
        }
        exercises
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(identifier))
            .cloned()
    }

    /// Deletes an exercise and every workout entry referencing it.
    ///
    /// Entries are purged before the exercise itself, so a failure between
    /// the two writes can never leave an orphaned entry behind. Returns
    /// the number of purged entries.
    pub fn delete_exercise(&self, id: Uuid) -> Result<usize, RecordStoreError> {
        let mut exercises = self.exercises();
        if !exercises.iter().any(|e| e.id == id) {
            return Err(RecordStoreError::UnknownExercise(id));
        }

        let workouts = self.workouts();
        let before = workouts.len();
        let kept: Vec<WorkoutEntry> = workouts
            .into_iter()
            .filter(|w| w.exercise_id != id)
            .collect();
        let purged = before - kept.len();

        self.local.save_list(WORKOUTS_NS, &self.partition, &kept)?;

        exercises.retain(|e| e.id != id);
        self.local
            .save_list(EXERCISES_NS, &self.partition, &exercises)?;

        Ok(purged)
    }

    /// Appends a workout entry. The entry must reference an exercise that
    /// exists in this partition.
    pub fn add_workout(&self, entry: WorkoutEntry) -> Result<(), RecordStoreError> {
        if !self.exercises().iter().any(|e| e.id == entry.exercise_id) {
            return Err(RecordStoreError::UnknownExercise(entry.exercise_id));
        }

        let mut workouts = self.workouts();
        workouts.push(entry);
        self.local
            .save_list(WORKOUTS_NS, &self.partition, &workouts)?;
        Ok(())
    }

    /// Removes one workout entry; other entries are untouched.
    pub fn delete_workout(&self, id: Uuid) -> Result<(), RecordStoreError> {
        let mut workouts = self.workouts();
        let before = workouts.len();
        workouts.retain(|w| w.id != id);
        if workouts.len() == before {
            return Err(RecordStoreError::UnknownWorkout(id));
        }
        self.local
            .save_list(WORKOUTS_NS, &self.partition, &workouts)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    struct TestContext {
        store: RecordStore,
        _temp_dir: TempDir, // Keep alive for duration of test
    }

    fn setup() -> TestContext {
        let temp_dir = TempDir::new().unwrap();
        let local = LocalStore::new(temp_dir.path());
        TestContext {
            store: RecordStore::new(local, PartitionId::Anonymous),
            _temp_dir: temp_dir,
        }
    }

    fn entry_for(exercise: &Exercise, weight: f64) -> WorkoutEntry {
        WorkoutEntry::new(exercise.id, weight, 5, 3, 3, Utc::now())
    }

    #[test]
    fn test_empty_store_defaults() {
        let ctx = setup();
        let (exercises, workouts) = ctx.store.load();
        assert!(exercises.is_empty());
        assert!(workouts.is_empty());
    }

    #[test]
    fn test_add_and_list_exercises() {
        let ctx = setup();

        ctx.store.add_exercise(Exercise::new("Squat")).unwrap();
        ctx.store.add_exercise(Exercise::new("Bench")).unwrap();

        let exercises = ctx.store.exercises();
        assert_eq!(exercises.len(), 2);
        // Insertion order preserved
        assert_eq!(exercises[0].name, "Squat");
        assert_eq!(exercises[1].name, "Bench");
    }

    #[test]
    fn test_add_workout_requires_known_exercise() {
        let ctx = setup();

        let orphan = WorkoutEntry::new(Uuid::new_v4(), 100.0, 5, 3, 3, Utc::now());
        let result = ctx.store.add_workout(orphan);

        assert!(matches!(
            result,
            Err(RecordStoreError::UnknownExercise(_))
        ));
        assert!(ctx.store.workouts().is_empty());
    }

    #[test]
    fn test_delete_exercise_cascades_exactly() {
        let ctx = setup();

        let squat = Exercise::new("Squat");
        let bench = Exercise::new("Bench");
        ctx.store.add_exercise(squat.clone()).unwrap();
        ctx.store.add_exercise(bench.clone()).unwrap();

        ctx.store.add_workout(entry_for(&squat, 100.0)).unwrap();
        ctx.store.add_workout(entry_for(&squat, 105.0)).unwrap();
        ctx.store.add_workout(entry_for(&bench, 60.0)).unwrap();

        let purged = ctx.store.delete_exercise(squat.id).unwrap();
        assert_eq!(purged, 2);

        // Squat and its entries are gone, bench and its entry survive
        let (exercises, workouts) = ctx.store.load();
        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].id, bench.id);
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].exercise_id, bench.id);
    }

    #[test]
    fn test_delete_unknown_exercise() {
        let ctx = setup();
        let result = ctx.store.delete_exercise(Uuid::new_v4());
        assert!(matches!(
            result,
            Err(RecordStoreError::UnknownExercise(_))
        ));
    }

    #[test]
    fn test_delete_workout_removes_only_that_entry() {
        let ctx = setup();

        let squat = Exercise::new("Squat");
        ctx.store.add_exercise(squat.clone()).unwrap();

        let first = entry_for(&squat, 100.0);
        let second = entry_for(&squat, 105.0);
        ctx.store.add_workout(first.clone()).unwrap();
        ctx.store.add_workout(second.clone()).unwrap();

        ctx.store.delete_workout(first.id).unwrap();

        let workouts = ctx.store.workouts();
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].id, second.id);
    }

    #[test]
    fn test_delete_unknown_workout() {
        let ctx = setup();
        let result = ctx.store.delete_workout(Uuid::new_v4());
        assert!(matches!(result, Err(RecordStoreError::UnknownWorkout(_))));
    }

    #[test]
    fn test_find_exercise_by_id_and_name() {
        let ctx = setup();

        let squat = Exercise::new("Back Squat");
        ctx.store.add_exercise(squat.clone()).unwrap();

        let by_id = ctx.store.find_exercise(&squat.id.to_string()).unwrap();
        assert_eq!(by_id.id, squat.id);

        let by_name = ctx.store.find_exercise("back squat").unwrap();
        assert_eq!(by_name.id, squat.id);

        assert!(ctx.store.find_exercise("deadlift").is_none());
    }

    #[test]
    fn test_store_replaces_both_lists() {
        let ctx = setup();

        let old = Exercise::new("Old");
        ctx.store.add_exercise(old.clone()).unwrap();
        ctx.store.add_workout(entry_for(&old, 50.0)).unwrap();

        let replacement = Exercise::new("New");
        let replacement_entry = entry_for(&replacement, 80.0);
        ctx.store
            .store(
                std::slice::from_ref(&replacement),
                std::slice::from_ref(&replacement_entry),
            )
            .unwrap();

        let (exercises, workouts) = ctx.store.load();
        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].id, replacement.id);
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].id, replacement_entry.id);
    }

    #[test]
    fn test_roundtrip_preserves_entry_contents() {
        let ctx = setup();

        let squat = Exercise::new("Squat");
        ctx.store.add_exercise(squat.clone()).unwrap();

        let entry = WorkoutEntry::new(squat.id, 102.5, 8, 4, 2, Utc::now());
        ctx.store.add_workout(entry.clone()).unwrap();

        let loaded = ctx.store.workouts();
        assert_eq!(loaded[0].id, entry.id);
        assert_eq!(loaded[0].weight, 102.5);
        assert_eq!(loaded[0].reps, 8);
        assert_eq!(loaded[0].sets, 4);
        assert_eq!(loaded[0].difficulty, 2);
        assert_eq!(loaded[0].date, entry.date);
    }
}
