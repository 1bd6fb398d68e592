use derive_more::Deref;
use uuid::Uuid;

use crate::{ExerciseID, Name, ReadError};

#[allow(async_fn_in_trait)]
pub trait TemplateRepository {
    async fn read_templates(&self) -> Result<Vec<Template>, ReadError>;
}

/// A reusable workout blueprint. Analytics only needs templates for the
/// export snapshot and for denormalizing template names into export rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: TemplateID,
    pub name: Name,
    pub exercises: Vec<TemplateExercise>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateExercise {
    pub exercise_id: ExerciseID,
    pub order: u32,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TemplateID(Uuid);

impl TemplateID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for TemplateID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for TemplateID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
