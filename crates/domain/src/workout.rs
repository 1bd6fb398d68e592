use std::collections::BTreeSet;

use chrono::NaiveDate;
use derive_more::Deref;
use uuid::Uuid;

use crate::{ExerciseID, RPE, ReadError, Reps, RestTime, SetIndex, TemplateID, Weight};

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    /// All workouts with their nested exercise entries and sets, ascending
    /// by date.
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub date: NaiveDate,
    /// Body weight recorded during the workout. Takes precedence over a
    /// rest-day log on the same date when building the body-weight series.
    pub body_weight: Option<f32>,
    pub template_id: Option<TemplateID>,
    pub notes: Option<String>,
    pub exercises: Vec<WorkoutExercise>,
}

impl Workout {
    #[must_use]
    pub fn exercise_ids(&self) -> BTreeSet<ExerciseID> {
        self.exercises
            .iter()
            .map(|e| e.exercise_id)
            .collect::<BTreeSet<_>>()
    }

    /// Total volume over all sets of all exercise entries.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.exercises.iter().map(WorkoutExercise::volume).sum()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutExercise {
    pub exercise_id: ExerciseID,
    /// Zero-based position within the workout, unique per workout.
    pub order: u32,
    pub sets: Vec<WorkoutSet>,
}

impl WorkoutExercise {
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.sets.iter().map(WorkoutSet::volume).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutSet {
    pub set_index: SetIndex,
    pub reps: Reps,
    pub weight: Weight,
    pub rpe: Option<RPE>,
    pub rest: Option<RestTime>,
}

impl WorkoutSet {
    /// Mechanical load of the set, `reps × weight`.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.reps * self.weight
    }
}
