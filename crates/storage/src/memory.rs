use vigor_domain::{
    BodyWeight, BodyWeightRepository, Exercise, ExerciseRepository, MuscleGroup,
    MuscleGroupRepository, ReadError, StorageError, Template, TemplateRepository, Workout,
    WorkoutRepository,
};

/// In-memory snapshot store implementing the read-only repository
/// contracts of the domain crate.
///
/// Reads return the seeded records ordered as the contracts require.
/// Disconnecting the store makes every read fail, which is how the
/// fetch-failure paths of the report engine are exercised.
pub struct InMemory {
    connected: bool,
    workouts: Vec<Workout>,
    body_weight_logs: Vec<BodyWeight>,
    exercises: Vec<Exercise>,
    muscle_groups: Vec<MuscleGroup>,
    templates: Vec<Template>,
}

impl InMemory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            connected: true,
            workouts: vec![],
            body_weight_logs: vec![],
            exercises: vec![],
            muscle_groups: vec![],
            templates: vec![],
        }
    }

    #[must_use]
    pub fn with_workouts(mut self, workouts: Vec<Workout>) -> Self {
        self.workouts = workouts;
        self
    }

    #[must_use]
    pub fn with_body_weight_logs(mut self, body_weight_logs: Vec<BodyWeight>) -> Self {
        self.body_weight_logs = body_weight_logs;
        self
    }

    #[must_use]
    pub fn with_exercises(mut self, exercises: Vec<Exercise>) -> Self {
        self.exercises = exercises;
        self
    }

    #[must_use]
    pub fn with_muscle_groups(mut self, muscle_groups: Vec<MuscleGroup>) -> Self {
        self.muscle_groups = muscle_groups;
        self
    }

    #[must_use]
    pub fn with_templates(mut self, templates: Vec<Template>) -> Self {
        self.templates = templates;
        self
    }

    #[must_use]
    pub fn disconnected(mut self) -> Self {
        self.connected = false;
        self
    }

    fn connection(&self) -> Result<(), ReadError> {
        if self.connected {
            Ok(())
        } else {
            Err(StorageError::NoConnection.into())
        }
    }
}

impl Default for InMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutRepository for InMemory {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        self.connection()?;
        let mut workouts = self.workouts.clone();
        workouts.sort_by_key(|workout| workout.date);
        Ok(workouts)
    }
}

impl BodyWeightRepository for InMemory {
    async fn read_body_weight_logs(&self) -> Result<Vec<BodyWeight>, ReadError> {
        self.connection()?;
        let mut logs = self.body_weight_logs.clone();
        logs.sort_by_key(|log| log.date);
        Ok(logs)
    }
}

impl ExerciseRepository for InMemory {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        self.connection()?;
        Ok(self.exercises.clone())
    }
}

impl MuscleGroupRepository for InMemory {
    async fn read_muscle_groups(&self) -> Result<Vec<MuscleGroup>, ReadError> {
        self.connection()?;
        Ok(self.muscle_groups.clone())
    }
}

impl TemplateRepository for InMemory {
    async fn read_templates(&self) -> Result<Vec<Template>, ReadError> {
        self.connection()?;
        Ok(self.templates.clone())
    }
}
