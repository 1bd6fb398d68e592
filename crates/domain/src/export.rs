use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::{
    BodyWeight, Exercise, ExerciseID, MuscleGroup, MuscleGroupID, Template, TemplateID, Workout,
    day_key,
};

pub const TABULAR_HEADER: &str =
    "workout_date,body_weight,template_name,exercise_name,set_index,reps,weight";

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum ExportFormat {
    #[strum(serialize = "structured")]
    Structured,
    #[strum(serialize = "tabular")]
    Tabular,
}

impl ExportFormat {
    pub fn from_selector(selector: &str) -> Result<Self, crate::RequestError> {
        selector
            .parse()
            .map_err(|_| crate::RequestError::UnknownExportFormat(selector.to_string()))
    }

    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Structured => "application/json",
            ExportFormat::Tabular => "text/csv; charset=utf-8",
        }
    }

    #[must_use]
    pub fn file_name(self, date: NaiveDate) -> String {
        match self {
            ExportFormat::Structured => format!("vigor-export-{}.json", day_key(date)),
            ExportFormat::Tabular => format!("vigor-workouts-{}.csv", day_key(date)),
        }
    }
}

/// A rendered export: body plus the packaging metadata a caller needs to
/// serve it as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
}

/// Full-fidelity snapshot document: an export timestamp plus the four
/// top-level collections. Dates are calendar-day strings, not timestamps.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub exported_at: String,
    pub workouts: Vec<WorkoutExport>,
    pub templates: Vec<TemplateExport>,
    pub exercises: Vec<ExerciseExport>,
    pub body_weight_logs: Vec<BodyWeightExport>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExport {
    pub id: Uuid,
    pub date: String,
    pub body_weight: Option<f32>,
    pub template_id: Option<Uuid>,
    pub template_name: Option<String>,
    pub notes: Option<String>,
    pub exercises: Vec<WorkoutExerciseExport>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExerciseExport {
    pub exercise_id: Uuid,
    pub exercise_name: Option<String>,
    pub order: u32,
    pub sets: Vec<WorkoutSetExport>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSetExport {
    pub set_index: u32,
    pub reps: u32,
    pub weight: f32,
    pub rpe: Option<f32>,
    pub rest_seconds: Option<u32>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateExport {
    pub id: Uuid,
    pub name: String,
    pub exercises: Vec<TemplateExerciseExport>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateExerciseExport {
    pub order: u32,
    pub exercise_id: Uuid,
    pub exercise_name: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseExport {
    pub id: Uuid,
    pub name: String,
    pub equipment: Option<String>,
    pub is_custom: bool,
    pub hidden: bool,
    pub muscle_groups: Vec<ExerciseMuscleExport>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseMuscleExport {
    pub name: String,
    pub is_primary: bool,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BodyWeightExport {
    pub date: String,
    pub weight: f32,
}

/// Build the structured export document from a snapshot.
///
/// Template and exercise names are denormalized into workout rows; entries
/// referencing ids unknown to the snapshot keep the id and carry no name.
#[must_use]
pub fn structured_export(
    exported_at: DateTime<Utc>,
    workouts: &[Workout],
    templates: &BTreeMap<TemplateID, Template>,
    exercises: &BTreeMap<ExerciseID, Exercise>,
    muscle_groups: &BTreeMap<MuscleGroupID, MuscleGroup>,
    body_weight_logs: &[BodyWeight],
) -> ExportDocument {
    let exercise_name =
        |id: &ExerciseID| exercises.get(id).map(|e| e.name.as_str().to_string());

    ExportDocument {
        exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        workouts: workouts
            .iter()
            .map(|workout| WorkoutExport {
                id: *workout.id,
                date: day_key(workout.date),
                body_weight: workout.body_weight,
                template_id: workout.template_id.map(|id| *id),
                template_name: workout
                    .template_id
                    .and_then(|id| templates.get(&id))
                    .map(|t| t.name.as_str().to_string()),
                notes: workout.notes.clone(),
                exercises: workout
                    .exercises
                    .iter()
                    .map(|entry| WorkoutExerciseExport {
                        exercise_id: *entry.exercise_id,
                        exercise_name: exercise_name(&entry.exercise_id),
                        order: entry.order,
                        sets: entry
                            .sets
                            .iter()
                            .map(|set| WorkoutSetExport {
                                set_index: u32::from(set.set_index),
                                reps: u32::from(set.reps),
                                weight: f32::from(set.weight),
                                rpe: set.rpe.map(f32::from),
                                rest_seconds: set.rest.map(u32::from),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
        templates: templates
            .values()
            .map(|template| TemplateExport {
                id: *template.id,
                name: template.name.as_str().to_string(),
                exercises: template
                    .exercises
                    .iter()
                    .map(|entry| TemplateExerciseExport {
                        order: entry.order,
                        exercise_id: *entry.exercise_id,
                        exercise_name: exercise_name(&entry.exercise_id),
                    })
                    .collect(),
            })
            .collect(),
        exercises: exercises
            .values()
            .map(|exercise| ExerciseExport {
                id: *exercise.id,
                name: exercise.name.as_str().to_string(),
                equipment: exercise.equipment.clone(),
                is_custom: exercise.custom,
                hidden: exercise.hidden,
                muscle_groups: exercise
                    .muscles
                    .iter()
                    .filter_map(|muscle| {
                        muscle_groups.get(&muscle.muscle_group_id).map(|group| {
                            ExerciseMuscleExport {
                                name: group.name.as_str().to_string(),
                                is_primary: muscle.primary,
                            }
                        })
                    })
                    .collect(),
            })
            .collect(),
        body_weight_logs: body_weight_logs
            .iter()
            .map(|log| BodyWeightExport {
                date: day_key(log.date),
                weight: log.weight,
            })
            .collect(),
    }
}

/// Flatten the snapshot into one row per `(workout, exercise, set)` triple.
///
/// A workout without exercise entries still emits exactly one row with
/// empty exercise and set columns, so no workout is dropped from the
/// export. Text fields containing a comma, double quote or newline are
/// quoted with doubled internal quotes.
#[must_use]
pub fn tabular_export(
    workouts: &[Workout],
    templates: &BTreeMap<TemplateID, Template>,
    exercises: &BTreeMap<ExerciseID, Exercise>,
) -> String {
    let mut rows = vec![TABULAR_HEADER.to_string()];

    for workout in workouts {
        let date = day_key(workout.date);
        let body_weight = workout
            .body_weight
            .map(|weight| weight.to_string())
            .unwrap_or_default();
        let template_name = escape(
            workout
                .template_id
                .and_then(|id| templates.get(&id))
                .map_or("", |t| t.name.as_str()),
        );

        if workout.exercises.is_empty() {
            rows.push(format!("{date},{body_weight},{template_name},,,,"));
            continue;
        }

        for entry in &workout.exercises {
            let exercise_name = escape(
                exercises
                    .get(&entry.exercise_id)
                    .map_or("", |e| e.name.as_str()),
            );
            for set in &entry.sets {
                rows.push(format!(
                    "{date},{body_weight},{template_name},{exercise_name},{},{},{}",
                    u32::from(set.set_index),
                    u32::from(set.reps),
                    f32::from(set.weight),
                ));
            }
        }
    }

    rows.join("\n")
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{
        ExerciseMuscle, Name, Reps, SetIndex, TemplateExercise, Weight, WorkoutExercise,
        WorkoutSet,
    };

    use super::*;

    static TEMPLATES: std::sync::LazyLock<BTreeMap<TemplateID, Template>> =
        std::sync::LazyLock::new(|| {
            BTreeMap::from([(
                1.into(),
                Template {
                    id: 1.into(),
                    name: Name::new("Push, Heavy").unwrap(),
                    exercises: vec![TemplateExercise {
                        exercise_id: 1.into(),
                        order: 0,
                    }],
                },
            )])
        });

    static EXERCISES: std::sync::LazyLock<BTreeMap<ExerciseID, Exercise>> =
        std::sync::LazyLock::new(|| {
            BTreeMap::from([(
                1.into(),
                Exercise {
                    id: 1.into(),
                    name: Name::new("Bench Press").unwrap(),
                    equipment: Some(String::from("Barbell")),
                    muscles: vec![
                        ExerciseMuscle {
                            muscle_group_id: 1.into(),
                            primary: true,
                        },
                        ExerciseMuscle {
                            muscle_group_id: 2.into(),
                            primary: false,
                        },
                    ],
                    custom: false,
                    hidden: true,
                },
            )])
        });

    static MUSCLE_GROUPS: std::sync::LazyLock<BTreeMap<MuscleGroupID, MuscleGroup>> =
        std::sync::LazyLock::new(|| {
            BTreeMap::from([
                (
                    1.into(),
                    MuscleGroup {
                        id: 1.into(),
                        name: Name::new("Chest").unwrap(),
                    },
                ),
                (
                    2.into(),
                    MuscleGroup {
                        id: 2.into(),
                        name: Name::new("Triceps").unwrap(),
                    },
                ),
            ])
        });

    #[rstest]
    #[case("Bench Press", "Bench Press")]
    #[case("Push, Pull", "\"Push, Pull\"")]
    #[case("the \"big\" lift", "\"the \"\"big\"\" lift\"")]
    #[case("a\nb", "\"a\nb\"")]
    #[case("", "")]
    fn test_escape(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape(input), expected);
    }

    #[rstest]
    #[case("structured", Ok(ExportFormat::Structured))]
    #[case("tabular", Ok(ExportFormat::Tabular))]
    #[case("csv", Err(crate::RequestError::UnknownExportFormat("csv".to_string())))]
    fn test_export_format_from_selector(
        #[case] selector: &str,
        #[case] expected: Result<ExportFormat, crate::RequestError>,
    ) {
        assert_eq!(ExportFormat::from_selector(selector), expected);
    }

    #[rstest]
    #[case(ExportFormat::Structured, "application/json", "vigor-export-2024-03-04.json")]
    #[case(
        ExportFormat::Tabular,
        "text/csv; charset=utf-8",
        "vigor-workouts-2024-03-04.csv"
    )]
    fn test_export_format_metadata(
        #[case] format: ExportFormat,
        #[case] content_type: &str,
        #[case] file_name: &str,
    ) {
        assert_eq!(format.content_type(), content_type);
        assert_eq!(
            format.file_name(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()),
            file_name
        );
    }

    #[test]
    fn test_tabular_export_row_per_set_and_empty_row_for_empty_workout() {
        let workouts = vec![
            workout_with_sets((2024, 3, 4), Some(82.5), Some(1), 2, 3),
            workout_with_sets((2024, 3, 5), None, None, 0, 0),
        ];

        let rows = tabular_export(&workouts, &TEMPLATES, &EXERCISES)
            .lines()
            .map(String::from)
            .collect::<Vec<_>>();

        assert_eq!(rows[0], TABULAR_HEADER);
        assert_eq!(rows.len(), 1 + 2 * 3 + 1);
        assert_eq!(
            rows[1],
            "2024-03-04,82.5,\"Push, Heavy\",Bench Press,1,10,100"
        );
        assert_eq!(rows[7], "2024-03-05,,,,,,");
    }

    #[test]
    fn test_tabular_export_empty_snapshot_is_header_only() {
        assert_eq!(
            tabular_export(&[], &TEMPLATES, &EXERCISES),
            TABULAR_HEADER
        );
    }

    #[test]
    fn test_structured_export_document() {
        let workouts = vec![workout_with_sets((2024, 3, 4), Some(82.5), Some(1), 1, 1)];
        let logs = vec![BodyWeight {
            date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            weight: 81.9,
        }];
        let exported_at = Utc.with_ymd_and_hms(2024, 3, 4, 18, 30, 0).unwrap();

        let document = structured_export(
            exported_at,
            &workouts,
            &TEMPLATES,
            &EXERCISES,
            &MUSCLE_GROUPS,
            &logs,
        );

        assert_eq!(document.exported_at, "2024-03-04T18:30:00.000Z");
        assert_eq!(document.workouts[0].date, "2024-03-04");
        assert_eq!(
            document.workouts[0].template_name,
            Some(String::from("Push, Heavy"))
        );
        assert_eq!(
            document.workouts[0].exercises[0].exercise_name,
            Some(String::from("Bench Press"))
        );
        assert!(document.exercises[0].hidden);
        assert_eq!(
            document.exercises[0].muscle_groups,
            vec![
                ExerciseMuscleExport {
                    name: String::from("Chest"),
                    is_primary: true,
                },
                ExerciseMuscleExport {
                    name: String::from("Triceps"),
                    is_primary: false,
                },
            ]
        );
        assert_eq!(document.body_weight_logs[0].date, "2024-03-02");

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["exportedAt"], "2024-03-04T18:30:00.000Z");
        assert_eq!(value["workouts"][0]["bodyWeight"], 82.5);
        assert_eq!(value["workouts"][0]["exercises"][0]["sets"][0]["setIndex"], 1);
        assert_eq!(value["exercises"][0]["isCustom"], false);
        assert_eq!(value["bodyWeightLogs"][0]["weight"], 81.9);
    }

    fn workout_with_sets(
        (year, month, day): (i32, u32, u32),
        body_weight: Option<f32>,
        template_id: Option<u128>,
        exercise_count: usize,
        sets_per_exercise: usize,
    ) -> Workout {
        Workout {
            id: 1.into(),
            date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            body_weight,
            template_id: template_id.map(TemplateID::from),
            notes: None,
            exercises: (0..exercise_count)
                .map(|order| WorkoutExercise {
                    exercise_id: 1.into(),
                    order: u32::try_from(order).unwrap(),
                    sets: (0..sets_per_exercise)
                        .map(|i| WorkoutSet {
                            set_index: SetIndex::new(u32::try_from(i).unwrap() + 1).unwrap(),
                            reps: Reps::new(10).unwrap(),
                            weight: Weight::new(100.0).unwrap(),
                            rpe: None,
                            rest: None,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
