use std::collections::BTreeMap;

use chrono::NaiveDate;
use derive_more::Deref;
use uuid::Uuid;

use crate::{MuscleGroupID, Name, ReadError, Workout, estimated_one_rep_max};

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    /// All exercises, including hidden ones. Hidden exercises may still be
    /// referenced by historical workouts and must not be excluded from
    /// analytics reads.
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    /// Unique, human-facing identity and the join key for progress queries.
    pub name: Name,
    pub equipment: Option<String>,
    pub muscles: Vec<ExerciseMuscle>,
    pub custom: bool,
    pub hidden: bool,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// A muscle-group tag on an exercise. The primary flag distinguishes prime
/// movers from assisting muscles; volume attribution ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseMuscle {
    pub muscle_group_id: MuscleGroupID,
    pub primary: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSample {
    pub date: NaiveDate,
    pub volume: f32,
    /// Best estimated one-rep max over the matched sets of the workout.
    /// Absent when no estimate could be derived.
    pub e1rm: Option<f32>,
}

/// Per-workout volume and best e1RM for a single exercise.
///
/// Workouts without the exercise are omitted (sparse series); samples
/// follow the ascending-by-date order of the input.
#[must_use]
pub fn exercise_progress(workouts: &[Workout], exercise_id: ExerciseID) -> Vec<ProgressSample> {
    let mut samples = vec![];

    for workout in workouts {
        let mut volume = 0.0;
        let mut e1rm: Option<f32> = None;

        for entry in workout
            .exercises
            .iter()
            .filter(|e| e.exercise_id == exercise_id)
        {
            for set in &entry.sets {
                volume += set.volume();
                let estimate = estimated_one_rep_max(set.weight, set.reps);
                e1rm = Some(e1rm.map_or(estimate, |best| best.max(estimate)));
            }
        }

        if volume > 0.0 || e1rm.is_some() {
            samples.push(ProgressSample {
                date: workout.date,
                volume,
                e1rm,
            });
        }
    }

    samples
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumePoint {
    pub date: NaiveDate,
    pub volume: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseVolumeSeries {
    pub name: Name,
    pub points: Vec<VolumePoint>,
}

/// Volume of every workout exercise entry, grouped per exercise.
///
/// Series are sorted by exercise name; points follow the ascending-by-date
/// order of the input, one per entry. Entries referencing an exercise id
/// unknown to the snapshot are skipped.
#[must_use]
pub fn volume_by_exercise(
    workouts: &[Workout],
    exercises: &BTreeMap<ExerciseID, Exercise>,
) -> Vec<ExerciseVolumeSeries> {
    let mut series: BTreeMap<Name, Vec<VolumePoint>> = BTreeMap::new();

    for workout in workouts {
        for entry in &workout.exercises {
            let Some(exercise) = exercises.get(&entry.exercise_id) else {
                continue;
            };
            series
                .entry(exercise.name.clone())
                .or_default()
                .push(VolumePoint {
                    date: workout.date,
                    volume: entry.volume(),
                });
        }
    }

    series
        .into_iter()
        .map(|(name, points)| ExerciseVolumeSeries { name, points })
        .collect()
}
