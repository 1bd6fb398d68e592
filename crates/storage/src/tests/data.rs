use std::sync::LazyLock;

use chrono::NaiveDate;
use vigor_domain as domain;

pub static MUSCLE_GROUPS: LazyLock<Vec<domain::MuscleGroup>> = LazyLock::new(|| {
    vec![
        muscle_group(1, "Chest"),
        muscle_group(2, "Triceps"),
        muscle_group(3, "Quads"),
    ]
});

pub static EXERCISES: LazyLock<Vec<domain::Exercise>> = LazyLock::new(|| {
    vec![
        domain::Exercise {
            id: 1.into(),
            name: domain::Name::new("Bench Press").unwrap(),
            equipment: Some(String::from("Barbell")),
            muscles: vec![
                domain::ExerciseMuscle {
                    muscle_group_id: 1.into(),
                    primary: true,
                },
                domain::ExerciseMuscle {
                    muscle_group_id: 2.into(),
                    primary: false,
                },
            ],
            custom: false,
            hidden: false,
        },
        // Hidden exercises stay part of historical workouts and reports.
        domain::Exercise {
            id: 2.into(),
            name: domain::Name::new("Squat").unwrap(),
            equipment: Some(String::from("Barbell")),
            muscles: vec![domain::ExerciseMuscle {
                muscle_group_id: 3.into(),
                primary: true,
            }],
            custom: false,
            hidden: true,
        },
        domain::Exercise {
            id: 3.into(),
            name: domain::Name::new("Plank").unwrap(),
            equipment: None,
            muscles: vec![],
            custom: true,
            hidden: false,
        },
    ]
});

pub static TEMPLATES: LazyLock<Vec<domain::Template>> = LazyLock::new(|| {
    vec![domain::Template {
        id: 1.into(),
        name: domain::Name::new("Push, Heavy").unwrap(),
        exercises: vec![domain::TemplateExercise {
            exercise_id: 1.into(),
            order: 0,
        }],
    }]
});

pub static WORKOUTS: LazyLock<Vec<domain::Workout>> = LazyLock::new(|| {
    vec![
        domain::Workout {
            id: 1.into(),
            date: date(2024, 3, 4),
            body_weight: Some(82.5),
            template_id: Some(1.into()),
            notes: Some(String::from("felt strong")),
            exercises: vec![entry(1, 0, &[(10, 100.0), (8, 102.5)])],
        },
        domain::Workout {
            id: 2.into(),
            date: date(2024, 3, 6),
            body_weight: None,
            template_id: None,
            notes: None,
            exercises: vec![entry(2, 0, &[(5, 140.0)]), entry(3, 1, &[(30, 0.0)])],
        },
        domain::Workout {
            id: 3.into(),
            date: date(2024, 3, 10),
            body_weight: Some(82.0),
            template_id: None,
            notes: None,
            exercises: vec![],
        },
        domain::Workout {
            id: 4.into(),
            date: date(2024, 3, 12),
            body_weight: None,
            template_id: None,
            notes: None,
            exercises: vec![entry(1, 0, &[(10, 105.0)])],
        },
    ]
});

pub static BODY_WEIGHT_LOGS: LazyLock<Vec<domain::BodyWeight>> = LazyLock::new(|| {
    vec![
        domain::BodyWeight {
            date: date(2024, 3, 3),
            weight: 81.8,
        },
        // Overridden by the workout reading of the same day.
        domain::BodyWeight {
            date: date(2024, 3, 4),
            weight: 81.5,
        },
        domain::BodyWeight {
            date: date(2024, 3, 5),
            weight: 82.1,
        },
    ]
});

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn muscle_group(id: u128, name: &str) -> domain::MuscleGroup {
    domain::MuscleGroup {
        id: id.into(),
        name: domain::Name::new(name).unwrap(),
    }
}

fn entry(exercise_id: u128, order: u32, sets: &[(u32, f32)]) -> domain::WorkoutExercise {
    domain::WorkoutExercise {
        exercise_id: exercise_id.into(),
        order,
        sets: sets
            .iter()
            .enumerate()
            .map(|(i, (reps, weight))| domain::WorkoutSet {
                set_index: domain::SetIndex::new(u32::try_from(i).unwrap() + 1).unwrap(),
                reps: domain::Reps::new(*reps).unwrap(),
                weight: domain::Weight::new(*weight).unwrap(),
                rpe: None,
                rest: None,
            })
            .collect(),
    }
}
