use std::{collections::BTreeMap, fmt, ops::Mul};

use chrono::NaiveDate;
use derive_more::{Display, Into};

use crate::{Workout, week_start};

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

impl Mul<Weight> for Reps {
    type Output = f32;

    fn mul(self, rhs: Weight) -> Self::Output {
        #[allow(clippy::cast_precision_loss)]
        {
            self.0 as f32 * rhs.0
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1 kg")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

/// 1-based position of a set within its workout exercise entry.
#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetIndex(u32);

impl SetIndex {
    pub fn new(value: u32) -> Result<Self, SetIndexError> {
        if value == 0 {
            return Err(SetIndexError::Zero);
        }

        Ok(Self(value))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetIndexError {
    #[error("Set index must be 1 or greater")]
    Zero,
}

/// Perceived effort of a set, stored and exported but ignored by every
/// aggregator.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RPE(u8);

impl RPE {
    pub fn new(value: f32) -> Result<Self, RPEError> {
        if !(0.0..=10.0).contains(&value) {
            return Err(RPEError::OutOfRange);
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let v = (value * 10.0) as u8;

        if v % 5 != 0 {
            return Err(RPEError::InvalidResolution);
        }

        Ok(Self(v))
    }
}

impl From<RPE> for f32 {
    fn from(value: RPE) -> Self {
        f32::from(value.0) / 10.0
    }
}

impl fmt::Display for RPE {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", f32::from(*self))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RPEError {
    #[error("RPE must be in the range 0.0 to 10.0")]
    OutOfRange,
    #[error("RPE must be a multiple of 0.5")]
    InvalidResolution,
}

/// Rest duration after a set in seconds, stored and exported but ignored by
/// every aggregator.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct RestTime(u32);

impl RestTime {
    pub fn new(value: u32) -> Result<Self, RestTimeError> {
        if !(0..1000).contains(&value) {
            return Err(RestTimeError::OutOfRange);
        }

        Ok(Self(value))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RestTimeError {
    #[error("Rest time must be in the range 0 to 999 s")]
    OutOfRange,
}

/// Projected maximal single-rep load derived from a set via the Epley
/// approximation.
///
/// A zero-rep set cannot estimate a max, so the weight itself is returned
/// as a documented lower bound. At 30 reps or more the linear approximation
/// becomes meaningless and the estimate is capped at double the load. The
/// function is pure and total; it never fails.
#[must_use]
pub fn estimated_one_rep_max(weight: Weight, reps: Reps) -> f32 {
    let weight = f32::from(weight);
    match u32::from(reps) {
        0 => weight,
        30.. => weight * 2.0,
        #[allow(clippy::cast_precision_loss)]
        reps => weight * (1.0 + reps as f32 / 30.0),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyVolume {
    pub week_start: NaiveDate,
    pub volume: f32,
}

/// Total training volume per Sunday-aligned week, ascending by week start.
///
/// Weeks without workouts are omitted rather than zero-filled.
#[must_use]
pub fn weekly_volume(workouts: &[Workout]) -> Vec<WeeklyVolume> {
    let mut weeks: BTreeMap<NaiveDate, f32> = BTreeMap::new();

    for workout in workouts {
        *weeks.entry(week_start(workout.date)).or_insert(0.0) += workout.volume();
    }

    weeks
        .into_iter()
        .map(|(week_start, volume)| WeeklyVolume { week_start, volume })
        .collect()
}
