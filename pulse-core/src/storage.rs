//! The storage boundary used by the HTTP layer.
//!
//! `Storage` is the only way handlers reach persisted data. `SqliteStorage`
//! runs each call on tokio's blocking pool with a pooled diesel connection.

use async_trait::async_trait;
use chrono::TimeDelta;
use diesel::sqlite::SqliteConnection;
use log::trace;

use crate::db::models::{
    EquipmentType, Exercise, ExerciseCategory, NewEquipmentType, NewExercise, NewExerciseCategory,
    NewNutritionLog, NewUser, NewUserWorkout, NewWorkoutExercise, NewWorkoutPlan, NutritionLog,
    Session, User, UserWorkout, WorkoutExercise, WorkoutExerciseDetail, WorkoutPlan,
    WorkoutPlanDetail,
};
use crate::db::{self, DbPool, operations};
use crate::error::StorageResult;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_user(&self, id: &str) -> StorageResult<Option<User>>;
    async fn upsert_user(&self, user: NewUser) -> StorageResult<User>;

    async fn create_session(&self, user_id: &str, ttl: TimeDelta) -> StorageResult<Session>;
    async fn get_session_user(&self, sid: &str) -> StorageResult<Option<String>>;
    async fn delete_session(&self, sid: &str) -> StorageResult<usize>;
    async fn prune_expired_sessions(&self) -> StorageResult<usize>;

    async fn get_exercise_categories(&self) -> StorageResult<Vec<ExerciseCategory>>;
    async fn add_exercise_category(&self, category: NewExerciseCategory) -> StorageResult<ExerciseCategory>;
    async fn get_equipment_types(&self) -> StorageResult<Vec<EquipmentType>>;
    async fn add_equipment_type(&self, equipment: NewEquipmentType) -> StorageResult<EquipmentType>;

    async fn get_exercises(&self) -> StorageResult<Vec<Exercise>>;
    async fn get_exercise_by_id(&self, id: i32) -> StorageResult<Option<Exercise>>;
    async fn get_exercises_by_category(&self, category_id: i32) -> StorageResult<Vec<Exercise>>;
    async fn get_exercises_by_equipment(&self, equipment_id: i32) -> StorageResult<Vec<Exercise>>;
    async fn add_exercise(&self, exercise: NewExercise) -> StorageResult<Exercise>;

    async fn get_workout_plans(&self) -> StorageResult<Vec<WorkoutPlan>>;
    async fn get_specialized_workouts(&self) -> StorageResult<Vec<WorkoutPlan>>;
    async fn get_workout_plan_by_id(&self, id: i32) -> StorageResult<Option<WorkoutPlan>>;
    async fn get_workout_plans_by_goal(&self, goal: &str) -> StorageResult<Vec<WorkoutPlan>>;
    async fn get_workout_exercises(&self, workout_id: i32) -> StorageResult<Vec<WorkoutExerciseDetail>>;
    async fn get_workout_plan_detail(&self, id: i32) -> StorageResult<Option<WorkoutPlanDetail>>;
    async fn add_workout_plan(&self, plan: NewWorkoutPlan) -> StorageResult<WorkoutPlan>;
    async fn add_workout_exercise(&self, slot: NewWorkoutExercise) -> StorageResult<WorkoutExercise>;

    async fn get_user_workouts(&self, user_id: &str) -> StorageResult<Vec<UserWorkout>>;
    async fn add_user_workout(&self, workout: NewUserWorkout) -> StorageResult<UserWorkout>;

    async fn get_user_nutrition_logs(&self, user_id: &str) -> StorageResult<Vec<NutritionLog>>;
    async fn add_nutrition_log(&self, log: NewNutritionLog) -> StorageResult<NutritionLog>;
}

#[derive(Clone)]
pub struct SqliteStorage {
    pool: DbPool,
}

impl SqliteStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Opens (and migrates) the database at `database_url`.
    pub fn open(database_url: &str, pool_size: u32) -> StorageResult<Self> {
        Ok(Self::new(db::init_database(database_url, pool_size)?))
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Runs `f` with a pooled connection on the blocking pool.
    async fn with_conn<T, F>(&self, op: &'static str, f: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T, diesel::result::Error> + Send + 'static,
    {
        trace!("storage: {}", op);
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> StorageResult<T> {
            let mut conn = pool.get()?;
            Ok(f(&mut *conn)?)
        })
        .await?
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn get_user(&self, id: &str) -> StorageResult<Option<User>> {
        let id = id.to_owned();
        self.with_conn("get_user", move |c| operations::get_user(c, &id))
            .await
    }

    async fn upsert_user(&self, user: NewUser) -> StorageResult<User> {
        self.with_conn("upsert_user", move |c| operations::upsert_user(c, &user))
            .await
    }

    async fn create_session(&self, user_id: &str, ttl: TimeDelta) -> StorageResult<Session> {
        let user_id = user_id.to_owned();
        self.with_conn("create_session", move |c| {
            operations::create_session(c, &user_id, ttl)
        })
        .await
    }

    async fn get_session_user(&self, sid: &str) -> StorageResult<Option<String>> {
        let sid = sid.to_owned();
        self.with_conn("get_session_user", move |c| {
            operations::get_session_user(c, &sid)
        })
        .await
    }

    async fn delete_session(&self, sid: &str) -> StorageResult<usize> {
        let sid = sid.to_owned();
        self.with_conn("delete_session", move |c| operations::delete_session(c, &sid))
            .await
    }

    async fn prune_expired_sessions(&self) -> StorageResult<usize> {
        self.with_conn("prune_expired_sessions", operations::prune_expired_sessions)
            .await
    }

    async fn get_exercise_categories(&self) -> StorageResult<Vec<ExerciseCategory>> {
        self.with_conn("get_exercise_categories", operations::get_exercise_categories)
            .await
    }

    async fn add_exercise_category(&self, category: NewExerciseCategory) -> StorageResult<ExerciseCategory> {
        self.with_conn("add_exercise_category", move |c| {
            operations::add_exercise_category(c, &category)
        })
        .await
    }

    async fn get_equipment_types(&self) -> StorageResult<Vec<EquipmentType>> {
        self.with_conn("get_equipment_types", operations::get_equipment_types)
            .await
    }

    async fn add_equipment_type(&self, equipment: NewEquipmentType) -> StorageResult<EquipmentType> {
        self.with_conn("add_equipment_type", move |c| {
            operations::add_equipment_type(c, &equipment)
        })
        .await
    }

    async fn get_exercises(&self) -> StorageResult<Vec<Exercise>> {
        self.with_conn("get_exercises", operations::get_exercises).await
    }

    async fn get_exercise_by_id(&self, id: i32) -> StorageResult<Option<Exercise>> {
        self.with_conn("get_exercise_by_id", move |c| {
            operations::get_exercise_by_id(c, id)
        })
        .await
    }

    async fn get_exercises_by_category(&self, category_id: i32) -> StorageResult<Vec<Exercise>> {
        self.with_conn("get_exercises_by_category", move |c| {
            operations::get_exercises_by_category(c, category_id)
        })
        .await
    }

    async fn get_exercises_by_equipment(&self, equipment_id: i32) -> StorageResult<Vec<Exercise>> {
        self.with_conn("get_exercises_by_equipment", move |c| {
            operations::get_exercises_by_equipment(c, equipment_id)
        })
        .await
    }

    async fn add_exercise(&self, exercise: NewExercise) -> StorageResult<Exercise> {
        self.with_conn("add_exercise", move |c| operations::add_exercise(c, &exercise))
            .await
    }

    async fn get_workout_plans(&self) -> StorageResult<Vec<WorkoutPlan>> {
        self.with_conn("get_workout_plans", operations::get_workout_plans)
            .await
    }

    async fn get_specialized_workouts(&self) -> StorageResult<Vec<WorkoutPlan>> {
        self.with_conn("get_specialized_workouts", operations::get_specialized_workouts)
            .await
    }

    async fn get_workout_plan_by_id(&self, id: i32) -> StorageResult<Option<WorkoutPlan>> {
        self.with_conn("get_workout_plan_by_id", move |c| {
            operations::get_workout_plan_by_id(c, id)
        })
        .await
    }

    async fn get_workout_plans_by_goal(&self, goal: &str) -> StorageResult<Vec<WorkoutPlan>> {
        let goal = goal.to_owned();
        self.with_conn("get_workout_plans_by_goal", move |c| {
            operations::get_workout_plans_by_goal(c, &goal)
        })
        .await
    }

    async fn get_workout_exercises(&self, workout_id: i32) -> StorageResult<Vec<WorkoutExerciseDetail>> {
        self.with_conn("get_workout_exercises", move |c| {
            operations::get_workout_exercises(c, workout_id)
        })
        .await
    }

    async fn get_workout_plan_detail(&self, id: i32) -> StorageResult<Option<WorkoutPlanDetail>> {
        self.with_conn("get_workout_plan_detail", move |c| {
            operations::get_workout_plan_detail(c, id)
        })
        .await
    }

    async fn add_workout_plan(&self, plan: NewWorkoutPlan) -> StorageResult<WorkoutPlan> {
        self.with_conn("add_workout_plan", move |c| {
            operations::add_workout_plan(c, &plan)
        })
        .await
    }

    async fn add_workout_exercise(&self, slot: NewWorkoutExercise) -> StorageResult<WorkoutExercise> {
        self.with_conn("add_workout_exercise", move |c| {
            operations::add_workout_exercise(c, &slot)
        })
        .await
    }

    async fn get_user_workouts(&self, user_id: &str) -> StorageResult<Vec<UserWorkout>> {
        let user_id = user_id.to_owned();
        self.with_conn("get_user_workouts", move |c| {
            operations::get_user_workouts(c, &user_id)
        })
        .await
    }

    async fn add_user_workout(&self, workout: NewUserWorkout) -> StorageResult<UserWorkout> {
        self.with_conn("add_user_workout", move |c| {
            operations::add_user_workout(c, &workout)
        })
        .await
    }

    async fn get_user_nutrition_logs(&self, user_id: &str) -> StorageResult<Vec<NutritionLog>> {
        let user_id = user_id.to_owned();
        self.with_conn("get_user_nutrition_logs", move |c| {
            operations::get_user_nutrition_logs(c, &user_id)
        })
        .await
    }

    async fn add_nutrition_log(&self, log: NewNutritionLog) -> StorageResult<NutritionLog> {
        self.with_conn("add_nutrition_log", move |c| {
            operations::add_nutrition_log(c, &log)
        })
        .await
    }
}
