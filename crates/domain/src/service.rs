use std::collections::BTreeMap;

use chrono::Utc;
use log::{debug, error};
use strum::{Display, EnumString};

use crate::{
    BodyWeight, BodyWeightRepository, Exercise, ExerciseID, ExerciseRepository,
    ExerciseVolumeSeries, Export, ExportFormat, MuscleGroup, MuscleGroupDistribution,
    MuscleGroupID, MuscleGroupRepository, MuscleGroupVolume, Name, ProgressSample, ReadError,
    ReportError, RequestError, Template, TemplateID, TemplateRepository, WeeklyVolume, Workout,
    WorkoutRepository, body_weight_series, exercise_progress, muscle_group_distribution,
    muscle_group_ranking, structured_export, tabular_export, volume_by_exercise, weekly_volume,
};

/// Wire selector of a report. Every selector is checked before any
/// repository access.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum ReportType {
    #[strum(serialize = "bodyWeight")]
    BodyWeight,
    #[strum(serialize = "volumeByWeek")]
    VolumeByWeek,
    #[strum(serialize = "volumeByExercise")]
    VolumeByExercise,
    #[strum(serialize = "volumeByMuscleGroup")]
    VolumeByMuscleGroup,
    #[strum(serialize = "muscleGroupSummary")]
    MuscleGroupSummary,
    #[strum(serialize = "exerciseProgress")]
    ExerciseProgress,
}

impl ReportType {
    pub fn from_selector(selector: &str) -> Result<Self, RequestError> {
        selector
            .parse()
            .map_err(|_| RequestError::UnknownReportType(selector.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub report_type: ReportType,
    /// Takes precedence over `exercise_name` when both are present.
    pub exercise_id: Option<ExerciseID>,
    pub exercise_name: Option<Name>,
}

impl ReportQuery {
    #[must_use]
    pub fn of_type(report_type: ReportType) -> Self {
        Self {
            report_type,
            exercise_id: None,
            exercise_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    BodyWeight(Vec<BodyWeight>),
    VolumeByWeek(Vec<WeeklyVolume>),
    VolumeByExercise(Vec<ExerciseVolumeSeries>),
    VolumeByMuscleGroup(MuscleGroupDistribution),
    MuscleGroupSummary(Vec<MuscleGroupVolume>),
    ExerciseProgress(Vec<ProgressSample>),
}

#[allow(async_fn_in_trait)]
pub trait ReportService {
    async fn report(&self, query: ReportQuery) -> Result<Report, ReportError>;
    async fn get_body_weight_series(&self) -> Result<Vec<BodyWeight>, ReadError>;
    async fn get_weekly_volume(&self) -> Result<Vec<WeeklyVolume>, ReadError>;
    async fn get_volume_by_exercise(&self) -> Result<Vec<ExerciseVolumeSeries>, ReadError>;
    async fn get_muscle_group_distribution(&self) -> Result<MuscleGroupDistribution, ReadError>;
    async fn get_muscle_group_ranking(&self) -> Result<Vec<MuscleGroupVolume>, ReadError>;
    async fn get_exercise_progress(
        &self,
        exercise_id: Option<ExerciseID>,
        exercise_name: Option<&Name>,
    ) -> Result<Vec<ProgressSample>, ReportError>;
}

#[allow(async_fn_in_trait)]
pub trait ExportService {
    async fn export(&self, format: ExportFormat) -> Result<Export, ReadError>;
}

/// Report engine over a persistence collaborator `R`.
///
/// Every operation fetches a fresh snapshot, computes the report in one
/// pass and returns it; nothing is cached and nothing is retried. Fetch
/// failures are logged here and surfaced unmodified.
pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: WorkoutRepository> Service<R> {
    async fn workouts(&self) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(),
            ReadError,
            "read",
            "workouts"
        )
    }
}

impl<R: BodyWeightRepository> Service<R> {
    async fn body_weight_logs(&self) -> Result<Vec<BodyWeight>, ReadError> {
        log_on_error!(
            self.repository.read_body_weight_logs(),
            ReadError,
            "read",
            "body weight logs"
        )
    }
}

impl<R: ExerciseRepository> Service<R> {
    async fn exercise_index(&self) -> Result<BTreeMap<ExerciseID, Exercise>, ReadError> {
        Ok(log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "read",
            "exercises"
        )?
        .into_iter()
        .map(|exercise| (exercise.id, exercise))
        .collect())
    }
}

impl<R: MuscleGroupRepository> Service<R> {
    async fn muscle_group_index(&self) -> Result<BTreeMap<MuscleGroupID, MuscleGroup>, ReadError> {
        Ok(log_on_error!(
            self.repository.read_muscle_groups(),
            ReadError,
            "read",
            "muscle groups"
        )?
        .into_iter()
        .map(|muscle_group| (muscle_group.id, muscle_group))
        .collect())
    }
}

impl<R: TemplateRepository> Service<R> {
    async fn template_index(&self) -> Result<BTreeMap<TemplateID, Template>, ReadError> {
        Ok(log_on_error!(
            self.repository.read_templates(),
            ReadError,
            "read",
            "templates"
        )?
        .into_iter()
        .map(|template| (template.id, template))
        .collect())
    }
}

impl<R> ReportService for Service<R>
where
    R: WorkoutRepository + BodyWeightRepository + ExerciseRepository + MuscleGroupRepository,
{
    async fn report(&self, query: ReportQuery) -> Result<Report, ReportError> {
        match query.report_type {
            ReportType::BodyWeight => Ok(Report::BodyWeight(self.get_body_weight_series().await?)),
            ReportType::VolumeByWeek => Ok(Report::VolumeByWeek(self.get_weekly_volume().await?)),
            ReportType::VolumeByExercise => Ok(Report::VolumeByExercise(
                self.get_volume_by_exercise().await?,
            )),
            ReportType::VolumeByMuscleGroup => Ok(Report::VolumeByMuscleGroup(
                self.get_muscle_group_distribution().await?,
            )),
            ReportType::MuscleGroupSummary => Ok(Report::MuscleGroupSummary(
                self.get_muscle_group_ranking().await?,
            )),
            ReportType::ExerciseProgress => Ok(Report::ExerciseProgress(
                self.get_exercise_progress(query.exercise_id, query.exercise_name.as_ref())
                    .await?,
            )),
        }
    }

    async fn get_body_weight_series(&self) -> Result<Vec<BodyWeight>, ReadError> {
        let logs = self.body_weight_logs().await?;
        let workouts = self.workouts().await?;
        Ok(body_weight_series(&logs, &workouts))
    }

    async fn get_weekly_volume(&self) -> Result<Vec<WeeklyVolume>, ReadError> {
        Ok(weekly_volume(&self.workouts().await?))
    }

    async fn get_volume_by_exercise(&self) -> Result<Vec<ExerciseVolumeSeries>, ReadError> {
        let workouts = self.workouts().await?;
        let exercises = self.exercise_index().await?;
        Ok(volume_by_exercise(&workouts, &exercises))
    }

    async fn get_muscle_group_distribution(&self) -> Result<MuscleGroupDistribution, ReadError> {
        let workouts = self.workouts().await?;
        let exercises = self.exercise_index().await?;
        let muscle_groups = self.muscle_group_index().await?;
        Ok(muscle_group_distribution(
            &workouts,
            &exercises,
            &muscle_groups,
        ))
    }

    async fn get_muscle_group_ranking(&self) -> Result<Vec<MuscleGroupVolume>, ReadError> {
        let workouts = self.workouts().await?;
        let exercises = self.exercise_index().await?;
        let muscle_groups = self.muscle_group_index().await?;
        Ok(muscle_group_ranking(&workouts, &exercises, &muscle_groups))
    }

    async fn get_exercise_progress(
        &self,
        exercise_id: Option<ExerciseID>,
        exercise_name: Option<&Name>,
    ) -> Result<Vec<ProgressSample>, ReportError> {
        if exercise_id.is_none() && exercise_name.is_none() {
            return Err(RequestError::MissingExercise.into());
        }

        let exercise_id = if let Some(id) = exercise_id {
            Some(id)
        } else {
            self.exercise_index()
                .await?
                .into_values()
                .find(|exercise| Some(&exercise.name) == exercise_name)
                .map(|exercise| exercise.id)
        };

        let Some(exercise_id) = exercise_id else {
            return Ok(vec![]);
        };

        Ok(exercise_progress(&self.workouts().await?, exercise_id))
    }
}

impl<R> ExportService for Service<R>
where
    R: WorkoutRepository
        + BodyWeightRepository
        + ExerciseRepository
        + MuscleGroupRepository
        + TemplateRepository,
{
    async fn export(&self, format: ExportFormat) -> Result<Export, ReadError> {
        let workouts = self.workouts().await?;
        let templates = self.template_index().await?;
        let exercises = self.exercise_index().await?;
        let exported_at = Utc::now();

        let body = match format {
            ExportFormat::Structured => {
                let muscle_groups = self.muscle_group_index().await?;
                let logs = self.body_weight_logs().await?;
                let document = structured_export(
                    exported_at,
                    &workouts,
                    &templates,
                    &exercises,
                    &muscle_groups,
                    &logs,
                );
                serde_json::to_string_pretty(&document)
                    .map_err(|err| ReadError::Other(err.into()))?
            }
            ExportFormat::Tabular => tabular_export(&workouts, &templates, &exercises),
        };

        Ok(Export {
            file_name: format.file_name(exported_at.date_naive()),
            content_type: format.content_type(),
            body,
        })
    }
}
