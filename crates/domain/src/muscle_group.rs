use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use derive_more::Deref;
use uuid::Uuid;

use crate::{Exercise, ExerciseID, Name, ReadError, Workout, week_start};

#[allow(async_fn_in_trait)]
pub trait MuscleGroupRepository {
    async fn read_muscle_groups(&self) -> Result<Vec<MuscleGroup>, ReadError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuscleGroup {
    pub id: MuscleGroupID,
    pub name: Name,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct MuscleGroupID(Uuid);

impl MuscleGroupID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for MuscleGroupID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for MuscleGroupID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Weekly training volume split across muscle groups.
///
/// Every week row carries a value for every muscle group observed anywhere
/// in the dataset (zero where absent), so the output is rectangular.
#[derive(Debug, Clone, PartialEq)]
pub struct MuscleGroupDistribution {
    /// Alphabetically sorted union of all muscle groups with attributed
    /// volume.
    pub muscle_groups: Vec<Name>,
    /// Ascending by week start.
    pub weeks: Vec<MuscleGroupWeek>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MuscleGroupWeek {
    pub week_start: NaiveDate,
    pub volume: BTreeMap<Name, f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MuscleGroupVolume {
    pub name: Name,
    pub volume: f32,
}

/// Per-week stacked series of muscle-group volume.
///
/// Each set's volume is divided equally among the muscle groups tagged to
/// its exercise; primary and secondary tags count the same. A week appears
/// as soon as any workout falls into it, even if no volume could be
/// attributed.
#[must_use]
pub fn muscle_group_distribution(
    workouts: &[Workout],
    exercises: &BTreeMap<ExerciseID, Exercise>,
    muscle_groups: &BTreeMap<MuscleGroupID, MuscleGroup>,
) -> MuscleGroupDistribution {
    let mut weeks: BTreeMap<NaiveDate, BTreeMap<Name, f32>> = BTreeMap::new();

    for workout in workouts {
        let week = weeks.entry(week_start(workout.date)).or_default();
        for (name, volume) in workout_muscle_volume(workout, exercises, muscle_groups) {
            *week.entry(name).or_insert(0.0) += volume;
        }
    }

    let names = weeks
        .values()
        .flat_map(|week| week.keys().cloned())
        .collect::<BTreeSet<_>>();

    MuscleGroupDistribution {
        weeks: weeks
            .into_iter()
            .map(|(week_start, mut volume)| {
                for name in &names {
                    volume.entry(name.clone()).or_insert(0.0);
                }
                MuscleGroupWeek { week_start, volume }
            })
            .collect(),
        muscle_groups: names.into_iter().collect(),
    }
}

/// All-time muscle-group volume, descending by volume with ties broken by
/// name.
#[must_use]
pub fn muscle_group_ranking(
    workouts: &[Workout],
    exercises: &BTreeMap<ExerciseID, Exercise>,
    muscle_groups: &BTreeMap<MuscleGroupID, MuscleGroup>,
) -> Vec<MuscleGroupVolume> {
    let mut totals: BTreeMap<Name, f32> = BTreeMap::new();

    for workout in workouts {
        for (name, volume) in workout_muscle_volume(workout, exercises, muscle_groups) {
            *totals.entry(name).or_insert(0.0) += volume;
        }
    }

    let mut ranking = totals
        .into_iter()
        .map(|(name, volume)| MuscleGroupVolume { name, volume })
        .collect::<Vec<_>>();
    ranking.sort_by(|a, b| {
        b.volume
            .total_cmp(&a.volume)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranking
}

/// Volume attributed per muscle group for a single workout.
///
/// Untagged exercises and entries with an exercise id unknown to the
/// snapshot contribute nothing.
fn workout_muscle_volume(
    workout: &Workout,
    exercises: &BTreeMap<ExerciseID, Exercise>,
    muscle_groups: &BTreeMap<MuscleGroupID, MuscleGroup>,
) -> BTreeMap<Name, f32> {
    let mut result: BTreeMap<Name, f32> = BTreeMap::new();

    for entry in &workout.exercises {
        let Some(exercise) = exercises.get(&entry.exercise_id) else {
            continue;
        };
        let names = exercise
            .muscles
            .iter()
            .filter_map(|muscle| muscle_groups.get(&muscle.muscle_group_id))
            .map(|muscle_group| &muscle_group.name)
            .collect::<Vec<_>>();
        if names.is_empty() {
            continue;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = names.len() as f32;
        for set in &entry.sets {
            let share = set.volume() / count;
            for name in &names {
                *result.entry((*name).clone()).or_insert(0.0) += share;
            }
        }
    }

    result
}
