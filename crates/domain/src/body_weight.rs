use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{ReadError, Workout};

#[allow(async_fn_in_trait)]
pub trait BodyWeightRepository {
    /// All manually logged rest-day measurements, ascending by date. At
    /// most one log exists per calendar date (upsert-by-date is enforced
    /// by the collaborator owning the data).
    async fn read_body_weight_logs(&self) -> Result<Vec<BodyWeight>, ReadError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyWeight {
    pub date: NaiveDate,
    pub weight: f32,
}

/// Merge rest-day logs and workout-day readings into one series.
///
/// A body weight recorded during a workout always wins over a rest-day log
/// for the same calendar day; logs fill in the days without a workout
/// reading. The result is ascending by date with no duplicate dates and is
/// the same on every invocation over the same inputs.
#[must_use]
pub fn body_weight_series(logs: &[BodyWeight], workouts: &[Workout]) -> Vec<BodyWeight> {
    let mut by_date: BTreeMap<NaiveDate, f32> = BTreeMap::new();

    for log in logs {
        by_date.insert(log.date, log.weight);
    }

    for workout in workouts {
        if let Some(weight) = workout.body_weight {
            by_date.insert(workout.date, weight);
        }
    }

    by_date
        .into_iter()
        .map(|(date, weight)| BodyWeight { date, weight })
        .collect()
}
