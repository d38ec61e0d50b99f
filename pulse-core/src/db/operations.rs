use chrono::{NaiveDateTime, TimeDelta, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::db::models::{
    DEFAULT_GOAL, EquipmentType, Exercise, ExerciseCategory, NewEquipmentType, NewExercise,
    NewExerciseCategory, NewNutritionLog, NewSession, NewUser, NewUserWorkout, NewWorkoutExercise,
    NewWorkoutPlan, NutritionLog, Session, User, UserWorkout, WorkoutExercise,
    WorkoutExerciseDetail, WorkoutPlan, WorkoutPlanDetail,
};
use crate::db::schema::{
    equipment_types, exercise_categories, exercises, nutrition_logs, sessions, user_workouts,
    users, workout_exercises, workout_plans,
};

type QueryResult<T> = Result<T, diesel::result::Error>;

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

// Users
pub fn get_user(conn: &mut SqliteConnection, user_id: &str) -> QueryResult<Option<User>> {
    users::table
        .find(user_id)
        .select(User::as_select())
        .first(conn)
        .optional()
}

/// Creates the user on first sight; afterwards only the supplied profile
/// fields change and `updated_at` moves forward.
pub fn upsert_user(conn: &mut SqliteConnection, new_user: &NewUser) -> QueryResult<User> {
    conn.immediate_transaction(|conn| {
        let stamp = now();
        let exists = get_user(conn, &new_user.id)?.is_some();

        if exists {
            diesel::update(users::table.find(&new_user.id))
                .set((new_user, users::updated_at.eq(stamp)))
                .returning(User::as_returning())
                .get_result(conn)
        } else {
            let mut row = new_user.clone();
            row.goal.get_or_insert_with(|| DEFAULT_GOAL.to_string());
            diesel::insert_into(users::table)
                .values((
                    &row,
                    users::created_at.eq(stamp),
                    users::updated_at.eq(stamp),
                ))
                .returning(User::as_returning())
                .get_result(conn)
        }
    })
}

// Sessions
pub fn create_session(
    conn: &mut SqliteConnection,
    user_id: &str,
    ttl: TimeDelta,
) -> QueryResult<Session> {
    let sid = uuid::Uuid::new_v4().simple().to_string();
    diesel::insert_into(sessions::table)
        .values(&NewSession {
            sid: &sid,
            user_id,
            expires_at: now() + ttl,
        })
        .returning(Session::as_returning())
        .get_result(conn)
}

/// Owner of a live session. Expired sessions are treated as absent.
pub fn get_session_user(conn: &mut SqliteConnection, sid: &str) -> QueryResult<Option<String>> {
    sessions::table
        .filter(sessions::sid.eq(sid))
        .filter(sessions::expires_at.gt(now()))
        .select(sessions::user_id)
        .first::<String>(conn)
        .optional()
}

pub fn delete_session(conn: &mut SqliteConnection, sid: &str) -> QueryResult<usize> {
    diesel::delete(sessions::table.find(sid)).execute(conn)
}

pub fn prune_expired_sessions(conn: &mut SqliteConnection) -> QueryResult<usize> {
    diesel::delete(sessions::table.filter(sessions::expires_at.le(now()))).execute(conn)
}

// Reference data
pub fn get_exercise_categories(conn: &mut SqliteConnection) -> QueryResult<Vec<ExerciseCategory>> {
    exercise_categories::table
        .order(exercise_categories::id.asc())
        .select(ExerciseCategory::as_select())
        .load(conn)
}

pub fn add_exercise_category(
    conn: &mut SqliteConnection,
    category: &NewExerciseCategory,
) -> QueryResult<ExerciseCategory> {
    diesel::insert_into(exercise_categories::table)
        .values(category)
        .returning(ExerciseCategory::as_returning())
        .get_result(conn)
}

pub fn get_equipment_types(conn: &mut SqliteConnection) -> QueryResult<Vec<EquipmentType>> {
    equipment_types::table
        .order(equipment_types::id.asc())
        .select(EquipmentType::as_select())
        .load(conn)
}

pub fn add_equipment_type(
    conn: &mut SqliteConnection,
    equipment: &NewEquipmentType,
) -> QueryResult<EquipmentType> {
    diesel::insert_into(equipment_types::table)
        .values(equipment)
        .returning(EquipmentType::as_returning())
        .get_result(conn)
}

// Exercises
pub fn get_exercises(conn: &mut SqliteConnection) -> QueryResult<Vec<Exercise>> {
    exercises::table
        .order(exercises::id.asc())
        .select(Exercise::as_select())
        .load(conn)
}

pub fn get_exercise_by_id(
    conn: &mut SqliteConnection,
    exercise_id: i32,
) -> QueryResult<Option<Exercise>> {
    exercises::table
        .find(exercise_id)
        .select(Exercise::as_select())
        .first(conn)
        .optional()
}

pub fn get_exercises_by_category(
    conn: &mut SqliteConnection,
    category_id: i32,
) -> QueryResult<Vec<Exercise>> {
    exercises::table
        .filter(exercises::category_id.eq(category_id))
        .order(exercises::id.asc())
        .select(Exercise::as_select())
        .load(conn)
}

pub fn get_exercises_by_equipment(
    conn: &mut SqliteConnection,
    equipment_id: i32,
) -> QueryResult<Vec<Exercise>> {
    exercises::table
        .filter(exercises::equipment_id.eq(equipment_id))
        .order(exercises::id.asc())
        .select(Exercise::as_select())
        .load(conn)
}

pub fn add_exercise(conn: &mut SqliteConnection, exercise: &NewExercise) -> QueryResult<Exercise> {
    diesel::insert_into(exercises::table)
        .values(exercise)
        .returning(Exercise::as_returning())
        .get_result(conn)
}

// Workout plans
pub fn get_workout_plans(conn: &mut SqliteConnection) -> QueryResult<Vec<WorkoutPlan>> {
    workout_plans::table
        .order(workout_plans::id.asc())
        .select(WorkoutPlan::as_select())
        .load(conn)
}

pub fn get_specialized_workouts(conn: &mut SqliteConnection) -> QueryResult<Vec<WorkoutPlan>> {
    workout_plans::table
        .filter(workout_plans::is_specialized.eq(true))
        .order(workout_plans::id.asc())
        .select(WorkoutPlan::as_select())
        .load(conn)
}

pub fn get_workout_plan_by_id(
    conn: &mut SqliteConnection,
    plan_id: i32,
) -> QueryResult<Option<WorkoutPlan>> {
    workout_plans::table
        .find(plan_id)
        .select(WorkoutPlan::as_select())
        .first(conn)
        .optional()
}

pub fn get_workout_plans_by_goal(
    conn: &mut SqliteConnection,
    goal: &str,
) -> QueryResult<Vec<WorkoutPlan>> {
    workout_plans::table
        .filter(workout_plans::goal.eq(goal))
        .order(workout_plans::id.asc())
        .select(WorkoutPlan::as_select())
        .load(conn)
}

pub fn add_workout_plan(
    conn: &mut SqliteConnection,
    plan: &NewWorkoutPlan,
) -> QueryResult<WorkoutPlan> {
    diesel::insert_into(workout_plans::table)
        .values(plan)
        .returning(WorkoutPlan::as_returning())
        .get_result(conn)
}

/// Slots of a plan sorted by `order`, each carrying its exercise. Equal
/// orders (legacy rows) fall back to insertion order.
pub fn get_workout_exercises(
    conn: &mut SqliteConnection,
    plan_id: i32,
) -> QueryResult<Vec<WorkoutExerciseDetail>> {
    let rows = workout_exercises::table
        .inner_join(exercises::table)
        .filter(workout_exercises::workout_id.eq(plan_id))
        .order((workout_exercises::order.asc(), workout_exercises::id.asc()))
        .select((WorkoutExercise::as_select(), Exercise::as_select()))
        .load::<(WorkoutExercise, Exercise)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(slot, exercise)| WorkoutExerciseDetail { slot, exercise })
        .collect())
}

pub fn add_workout_exercise(
    conn: &mut SqliteConnection,
    slot: &NewWorkoutExercise,
) -> QueryResult<WorkoutExercise> {
    diesel::insert_into(workout_exercises::table)
        .values(slot)
        .returning(WorkoutExercise::as_returning())
        .get_result(conn)
}

/// Plan plus its exercises, read in one transaction so both halves come
/// from the same snapshot.
pub fn get_workout_plan_detail(
    conn: &mut SqliteConnection,
    plan_id: i32,
) -> QueryResult<Option<WorkoutPlanDetail>> {
    conn.transaction(|conn| {
        let Some(plan) = get_workout_plan_by_id(conn, plan_id)? else {
            return Ok(None);
        };
        let exercises = get_workout_exercises(conn, plan_id)?;
        Ok(Some(WorkoutPlanDetail { plan, exercises }))
    })
}

// Logged workouts
pub fn get_user_workouts(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> QueryResult<Vec<UserWorkout>> {
    user_workouts::table
        .filter(user_workouts::user_id.eq(user_id))
        .order(user_workouts::id.asc())
        .select(UserWorkout::as_select())
        .load(conn)
}

pub fn add_user_workout(
    conn: &mut SqliteConnection,
    workout: &NewUserWorkout,
) -> QueryResult<UserWorkout> {
    diesel::insert_into(user_workouts::table)
        .values(workout)
        .returning(UserWorkout::as_returning())
        .get_result(conn)
}

// Nutrition
pub fn get_user_nutrition_logs(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> QueryResult<Vec<NutritionLog>> {
    nutrition_logs::table
        .filter(nutrition_logs::user_id.eq(user_id))
        .order(nutrition_logs::id.asc())
        .select(NutritionLog::as_select())
        .load(conn)
}

pub fn add_nutrition_log(
    conn: &mut SqliteConnection,
    log: &NewNutritionLog,
) -> QueryResult<NutritionLog> {
    diesel::insert_into(nutrition_logs::table)
        .values(log)
        .returning(NutritionLog::as_returning())
        .get_result(conn)
}
