//! Loading static reference data (categories, equipment, exercises, plans)
//! from a JSON document.
//!
//! Exercises point at categories and equipment by slug, plan slots point at
//! exercises by name, so a seed file never has to know database ids.

use diesel::Connection;
use diesel::sqlite::SqliteConnection;
use log::info;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error as ThisError;

use crate::db::models::{
    NewEquipmentType, NewExercise, NewExerciseCategory, NewWorkoutExercise, NewWorkoutPlan,
};
use crate::db::operations;

#[derive(Debug, ThisError)]
pub enum SeedError {
    #[error("invalid seed document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("exercise {exercise:?} refers to unknown {kind} slug {slug:?}")]
    UnknownSlug {
        exercise: String,
        kind: &'static str,
        slug: String,
    },
    #[error("plan {plan:?} refers to unknown exercise {exercise:?}")]
    UnknownExercise { plan: String, exercise: String },
    #[error(transparent)]
    Query(#[from] diesel::result::Error),
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeedDocument {
    #[serde(default)]
    pub categories: Vec<NewExerciseCategory>,
    #[serde(default)]
    pub equipment: Vec<NewEquipmentType>,
    #[serde(default)]
    pub exercises: Vec<SeedExercise>,
    #[serde(default)]
    pub plans: Vec<SeedPlan>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SeedExercise {
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    pub model_url: Option<String>,
    pub category: Option<String>,
    pub equipment: Option<String>,
    pub target_muscles: String,
    pub difficulty_level: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SeedPlan {
    #[serde(flatten)]
    pub plan: NewWorkoutPlan,
    #[serde(default)]
    pub exercises: Vec<SeedSlot>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SeedSlot {
    pub exercise: String,
    pub sets: Option<i32>,
    pub reps: Option<String>,
    pub duration: Option<i32>,
    pub rest_between: Option<i32>,
    pub order: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub equipment: usize,
    pub exercises: usize,
    pub plans: usize,
    pub slots: usize,
}

impl SeedDocument {
    pub fn from_json(text: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Inserts the whole document in one transaction; any failure leaves the
/// database untouched.
pub fn apply(conn: &mut SqliteConnection, doc: &SeedDocument) -> Result<SeedReport, SeedError> {
    let report = conn.transaction::<_, SeedError, _>(|conn| {
        let mut report = SeedReport::default();

        let mut categories = HashMap::new();
        for category in &doc.categories {
            let row = operations::add_exercise_category(conn, category)?;
            categories.insert(row.slug.clone(), row.id);
            report.categories += 1;
        }

        let mut equipment = HashMap::new();
        for item in &doc.equipment {
            let row = operations::add_equipment_type(conn, item)?;
            equipment.insert(row.slug.clone(), row.id);
            report.equipment += 1;
        }

        let mut exercises = HashMap::new();
        for exercise in &doc.exercises {
            let category_id = resolve_slug(&categories, exercise, "category", &exercise.category)?;
            let equipment_id = resolve_slug(&equipment, exercise, "equipment", &exercise.equipment)?;
            let row = operations::add_exercise(
                conn,
                &NewExercise {
                    name: exercise.name.clone(),
                    description: exercise.description.clone(),
                    instructions: exercise.instructions.clone(),
                    video_url: exercise.video_url.clone(),
                    image_url: exercise.image_url.clone(),
                    model_url: exercise.model_url.clone(),
                    category_id,
                    equipment_id,
                    target_muscles: exercise.target_muscles.clone(),
                    difficulty_level: exercise.difficulty_level.clone(),
                },
            )?;
            exercises.insert(row.name.clone(), row.id);
            report.exercises += 1;
        }

        for seed_plan in &doc.plans {
            let plan = operations::add_workout_plan(conn, &seed_plan.plan)?;
            report.plans += 1;
            for slot in &seed_plan.exercises {
                let exercise_id = *exercises.get(&slot.exercise).ok_or_else(|| {
                    SeedError::UnknownExercise {
                        plan: plan.name.clone(),
                        exercise: slot.exercise.clone(),
                    }
                })?;
                operations::add_workout_exercise(
                    conn,
                    &NewWorkoutExercise {
                        workout_id: plan.id,
                        exercise_id,
                        sets: slot.sets,
                        reps: slot.reps.clone(),
                        duration: slot.duration,
                        rest_between: slot.rest_between,
                        order: slot.order,
                        notes: slot.notes.clone(),
                    },
                )?;
                report.slots += 1;
            }
        }

        Ok(report)
    })?;

    info!(
        "Seeded {} categories, {} equipment types, {} exercises, {} plans ({} slots)",
        report.categories, report.equipment, report.exercises, report.plans, report.slots
    );
    Ok(report)
}

fn resolve_slug(
    ids: &HashMap<String, i32>,
    exercise: &SeedExercise,
    kind: &'static str,
    slug: &Option<String>,
) -> Result<Option<i32>, SeedError> {
    match slug {
        None => Ok(None),
        Some(slug) => ids.get(slug).copied().map(Some).ok_or_else(|| SeedError::UnknownSlug {
            exercise: exercise.name.clone(),
            kind,
            slug: slug.clone(),
        }),
    }
}
