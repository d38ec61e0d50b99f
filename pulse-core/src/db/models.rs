//! Row and insert shapes for every persisted entity.
//!
//! Read shapes select exactly the stored columns. Insert shapes carry what a
//! caller may supply; ids and timestamps are assigned by the database or the
//! storage layer. Everything crosses the wire in camelCase.

use chrono::NaiveDateTime;
use diesel::{AsChangeset, Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::db::schema;

pub const DEFAULT_GOAL: &str = "general_fitness";

// Users
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub goal: Option<String>,
    pub height_cm: Option<i32>,
    pub weight_kg: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Profile fields accepted when a user is created or refreshed from the
/// identity provider. `None` leaves an existing value untouched.
#[derive(Insertable, AsChangeset, Deserialize, Debug, Clone, Default)]
#[diesel(table_name = schema::users)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub goal: Option<String>,
    pub height_cm: Option<i32>,
    pub weight_kg: Option<i32>,
}

impl NewUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

// Sessions
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(User))]
#[diesel(table_name = schema::sessions, primary_key(sid))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Session {
    pub sid: String,
    pub user_id: String,
    pub expires_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = schema::sessions)]
pub struct NewSession<'a> {
    pub sid: &'a str,
    pub user_id: &'a str,
    pub expires_at: NaiveDateTime,
}

// Reference data
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = schema::exercise_categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ExerciseCategory {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Insertable, Deserialize, Debug, Clone)]
#[diesel(table_name = schema::exercise_categories)]
#[serde(rename_all = "camelCase")]
pub struct NewExerciseCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = schema::equipment_types)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct EquipmentType {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Insertable, Deserialize, Debug, Clone)]
#[diesel(table_name = schema::equipment_types)]
#[serde(rename_all = "camelCase")]
pub struct NewEquipmentType {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

// Exercises
#[derive(
    Queryable, Selectable, Identifiable, Associations, Serialize, Deserialize, Debug, Clone, PartialEq,
)]
#[diesel(belongs_to(ExerciseCategory, foreign_key = category_id))]
#[diesel(belongs_to(EquipmentType, foreign_key = equipment_id))]
#[diesel(table_name = schema::exercises)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    pub model_url: Option<String>,
    pub category_id: Option<i32>,
    pub equipment_id: Option<i32>,
    pub target_muscles: String,
    pub difficulty_level: String,
}

#[derive(Insertable, Deserialize, Debug, Clone)]
#[diesel(table_name = schema::exercises)]
#[serde(rename_all = "camelCase")]
pub struct NewExercise {
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    pub model_url: Option<String>,
    pub category_id: Option<i32>,
    pub equipment_id: Option<i32>,
    pub target_muscles: String,
    pub difficulty_level: String,
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} [{}] ({})",
            self.id, self.name, self.difficulty_level, self.target_muscles
        )
    }
}

// Workout plans
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = schema::workout_plans)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub duration: i32,
    pub frequency: i32,
    pub goal: String,
    pub difficulty_level: String,
    pub image_url: Option<String>,
    pub is_specialized: Option<bool>,
}

#[derive(Insertable, Deserialize, Debug, Clone)]
#[diesel(table_name = schema::workout_plans)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkoutPlan {
    pub name: String,
    pub description: String,
    pub duration: i32,
    pub frequency: i32,
    pub goal: String,
    pub difficulty_level: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_specialized: Option<bool>,
}

impl fmt::Display for WorkoutPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let specialized = if self.is_specialized.unwrap_or(false) {
            " *specialized*"
        } else {
            ""
        };
        write!(
            f,
            "#{} {} - {} min, {}x/week, goal: {}, {}{}",
            self.id,
            self.name,
            self.duration,
            self.frequency,
            self.goal,
            self.difficulty_level,
            specialized
        )
    }
}

#[derive(
    Queryable, Selectable, Identifiable, Associations, Serialize, Deserialize, Debug, Clone, PartialEq,
)]
#[diesel(belongs_to(WorkoutPlan, foreign_key = workout_id))]
#[diesel(belongs_to(Exercise))]
#[diesel(table_name = schema::workout_exercises)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub id: i32,
    pub workout_id: i32,
    pub exercise_id: i32,
    pub sets: Option<i32>,
    pub reps: Option<String>,
    pub duration: Option<i32>,
    pub rest_between: Option<i32>,
    pub order: i32,
    pub notes: Option<String>,
}

#[derive(Insertable, Deserialize, Debug, Clone)]
#[diesel(table_name = schema::workout_exercises)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkoutExercise {
    pub workout_id: i32,
    pub exercise_id: i32,
    pub sets: Option<i32>,
    pub reps: Option<String>,
    pub duration: Option<i32>,
    pub rest_between: Option<i32>,
    pub order: i32,
    pub notes: Option<String>,
}

/// A plan slot together with the exercise it points at.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutExerciseDetail {
    #[serde(flatten)]
    pub slot: WorkoutExercise,
    pub exercise: Exercise,
}

impl fmt::Display for WorkoutExerciseDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let volume = match (self.slot.sets, &self.slot.reps, self.slot.duration) {
            (Some(sets), Some(reps), _) => format!("{} x {}", sets, reps),
            (Some(sets), None, Some(secs)) => format!("{} x {}s", sets, secs),
            (None, _, Some(secs)) => format!("{}s", secs),
            (Some(sets), None, None) => format!("{} sets", sets),
            (None, Some(reps), None) => format!("{} reps", reps),
            (None, None, None) => String::new(),
        };
        let rest = self
            .slot
            .rest_between
            .map(|r| format!(", rest {}s", r))
            .unwrap_or_default();

        write!(
            f,
            "{}. {}: {}{}",
            self.slot.order, self.exercise.name, volume, rest
        )
    }
}

/// A plan merged with its ordered exercise list under `exercises`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutPlanDetail {
    #[serde(flatten)]
    pub plan: WorkoutPlan,
    pub exercises: Vec<WorkoutExerciseDetail>,
}

// Logged sessions
#[derive(
    Queryable, Selectable, Identifiable, Associations, Serialize, Deserialize, Debug, Clone, PartialEq,
)]
#[diesel(belongs_to(User))]
#[diesel(belongs_to(WorkoutPlan, foreign_key = workout_id))]
#[diesel(table_name = schema::user_workouts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct UserWorkout {
    pub id: i32,
    pub date: String,
    pub duration: i32,
    pub workout_id: i32,
    pub user_id: String,
    pub calories_burned: Option<i32>,
    pub completed: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = schema::user_workouts)]
pub struct NewUserWorkout {
    pub date: String,
    pub duration: i32,
    pub workout_id: i32,
    pub user_id: String,
    pub calories_burned: Option<i32>,
    pub completed: Option<bool>,
    pub notes: Option<String>,
}

/// Client-supplied body for logging a workout. The owner is never part of it.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserWorkoutPayload {
    pub date: String,
    pub duration: i32,
    pub workout_id: i32,
    pub calories_burned: Option<i32>,
    pub completed: Option<bool>,
    pub notes: Option<String>,
}

impl UserWorkoutPayload {
    /// Attaches the owner. A session that omits `completed` is recorded as completed.
    pub fn into_new(self, user_id: impl Into<String>) -> NewUserWorkout {
        NewUserWorkout {
            date: self.date,
            duration: self.duration,
            workout_id: self.workout_id,
            user_id: user_id.into(),
            calories_burned: self.calories_burned,
            completed: Some(self.completed.unwrap_or(true)),
            notes: self.notes,
        }
    }
}

#[derive(
    Queryable, Selectable, Identifiable, Associations, Serialize, Deserialize, Debug, Clone, PartialEq,
)]
#[diesel(belongs_to(User))]
#[diesel(table_name = schema::nutrition_logs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct NutritionLog {
    pub id: i32,
    pub date: String,
    pub user_id: String,
    pub notes: Option<String>,
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = schema::nutrition_logs)]
pub struct NewNutritionLog {
    pub date: String,
    pub user_id: String,
    pub notes: Option<String>,
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
}

/// Client-supplied body for a nutrition entry.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NutritionLogPayload {
    pub date: String,
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub notes: Option<String>,
}

impl NutritionLogPayload {
    pub fn into_new(self, user_id: impl Into<String>) -> NewNutritionLog {
        NewNutritionLog {
            date: self.date,
            user_id: user_id.into(),
            notes: self.notes,
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}
