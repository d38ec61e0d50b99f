mod common;

use axum::http::StatusCode;
use diesel::connection::SimpleConnection;
use serde_json::{Value, json};

use common::{TestApp, TestRequest};
use pulse::Storage;
use pulse::db::models::{
    NewEquipmentType, NewExercise, NewExerciseCategory, NewWorkoutExercise, NewWorkoutPlan,
};
use pulse_server::Settings;

fn exercise(name: &str, category_id: Option<i32>, equipment_id: Option<i32>) -> NewExercise {
    NewExercise {
        name: name.to_string(),
        description: format!("{} description", name),
        instructions: "Keep a neutral spine".to_string(),
        video_url: None,
        image_url: None,
        model_url: None,
        category_id,
        equipment_id,
        target_muscles: "legs".to_string(),
        difficulty_level: "beginner".to_string(),
    }
}

fn plan(name: &str, goal: &str, specialized: bool) -> NewWorkoutPlan {
    NewWorkoutPlan {
        name: name.to_string(),
        description: "A plan".to_string(),
        duration: 40,
        frequency: 3,
        goal: goal.to_string(),
        difficulty_level: "beginner".to_string(),
        image_url: None,
        is_specialized: Some(specialized),
    }
}

fn slot(workout_id: i32, exercise_id: i32, order: i32) -> NewWorkoutExercise {
    NewWorkoutExercise {
        workout_id,
        exercise_id,
        sets: Some(3),
        reps: Some("8-12".to_string()),
        duration: None,
        rest_between: Some(90),
        order,
        notes: None,
    }
}

#[tokio::test]
async fn empty_store_lists_are_empty_arrays() {
    let app = TestApp::new().await;
    for uri in [
        "/api/exercise-categories",
        "/api/equipment-types",
        "/api/exercises",
        "/api/workout-plans",
        "/api/workout-plans/specialized",
        "/api/workout-plans/goal/strength",
        "/api/exercises/category/1",
        "/api/exercises/equipment/1",
    ] {
        let (status, body) = app.send(TestRequest::get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body, json!([]), "{}", uri);
    }
}

#[tokio::test]
async fn bad_and_missing_ids() {
    let app = TestApp::new().await;

    let cases = [
        ("/api/exercises/abc", StatusCode::BAD_REQUEST, "Invalid exercise ID"),
        ("/api/exercises/12abc", StatusCode::BAD_REQUEST, "Invalid exercise ID"),
        ("/api/exercises/999999", StatusCode::NOT_FOUND, "Exercise not found"),
        ("/api/workout-plans/abc", StatusCode::BAD_REQUEST, "Invalid workout plan ID"),
        ("/api/workout-plans/999999", StatusCode::NOT_FOUND, "Workout plan not found"),
        ("/api/exercises/category/legs", StatusCode::BAD_REQUEST, "Invalid category ID"),
        ("/api/exercises/equipment/bar", StatusCode::BAD_REQUEST, "Invalid equipment ID"),
        ("/api/exercises/+5", StatusCode::BAD_REQUEST, "Invalid exercise ID"),
        ("/api/workout-plans/+1", StatusCode::BAD_REQUEST, "Invalid workout plan ID"),
        ("/api/exercises/2147483648", StatusCode::NOT_FOUND, "Exercise not found"),
        ("/api/workout-plans/99999999999", StatusCode::NOT_FOUND, "Workout plan not found"),
    ];
    for (uri, expected_status, message) in cases {
        let (status, body) = app.send(TestRequest::get(uri)).await;
        assert_eq!(status, expected_status, "{}", uri);
        assert_eq!(body, json!({ "message": message }), "{}", uri);
    }
}

#[tokio::test]
async fn out_of_range_filter_ids_are_empty_lists() {
    let app = TestApp::new().await;
    for uri in [
        "/api/exercises/category/2147483648",
        "/api/exercises/equipment/-99999999999",
    ] {
        let (status, body) = app.send(TestRequest::get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body, json!([]), "{}", uri);
    }
}

#[tokio::test]
async fn catalog_lookups_and_filters() {
    let app = TestApp::new().await;
    let legs = app
        .storage
        .add_exercise_category(NewExerciseCategory {
            name: "Legs".to_string(),
            slug: "legs".to_string(),
            description: None,
            image_url: Some("https://img/legs.png".to_string()),
        })
        .await
        .unwrap();
    let barbell = app
        .storage
        .add_equipment_type(NewEquipmentType {
            name: "Barbell".to_string(),
            slug: "barbell".to_string(),
            description: None,
            image_url: None,
        })
        .await
        .unwrap();
    let squat = app
        .storage
        .add_exercise(exercise("Squat", Some(legs.id), Some(barbell.id)))
        .await
        .unwrap();
    let plank = app
        .storage
        .add_exercise(exercise("Plank", None, None))
        .await
        .unwrap();

    let (status, body) = app.send(TestRequest::get("/api/exercise-categories")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["slug"], "legs");
    assert_eq!(body[0]["imageUrl"], "https://img/legs.png");
    assert_eq!(body[0]["description"], Value::Null);

    let (_, body) = app
        .send(TestRequest::get(&format!("/api/exercises/{}", plank.id)))
        .await;
    assert_eq!(body["name"], "Plank");
    assert_eq!(body["categoryId"], Value::Null);
    assert_eq!(body["equipmentId"], Value::Null);

    let (_, body) = app
        .send(TestRequest::get(&format!("/api/exercises/category/{}", legs.id)))
        .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], squat.id);

    let (_, body) = app
        .send(TestRequest::get(&format!("/api/exercises/equipment/{}", barbell.id)))
        .await;
    assert_eq!(body[0]["targetMuscles"], "legs");

    let (_, body) = app.send(TestRequest::get("/api/exercises")).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn plan_detail_merges_sorted_exercises() {
    let app = TestApp::new().await;
    let storage = &app.storage;
    let general = storage.add_workout_plan(plan("Starter", "weight_loss", false)).await.unwrap();
    let special = storage.add_workout_plan(plan("Rehab", "mobility", true)).await.unwrap();
    let a = storage.add_exercise(exercise("Bridge", None, None)).await.unwrap();
    let b = storage.add_exercise(exercise("Bird dog", None, None)).await.unwrap();
    let c = storage.add_exercise(exercise("Dead bug", None, None)).await.unwrap();
    storage.add_workout_exercise(slot(special.id, a.id, 7)).await.unwrap();
    storage.add_workout_exercise(slot(special.id, b.id, 2)).await.unwrap();
    storage.add_workout_exercise(slot(special.id, c.id, 4)).await.unwrap();

    let (status, body) = app
        .send(TestRequest::get(&format!("/api/workout-plans/{}", special.id)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Rehab");
    assert_eq!(body["isSpecialized"], true);
    let orders: Vec<i64> = body["exercises"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![2, 4, 7]);
    assert_eq!(body["exercises"][0]["exercise"]["name"], "Bird dog");
    assert_eq!(body["exercises"][0]["reps"], "8-12");
    assert_eq!(body["exercises"][0]["restBetween"], 90);

    let (_, body) = app
        .send(TestRequest::get(&format!("/api/workout-plans/{}", general.id)))
        .await;
    assert_eq!(body["exercises"], json!([]));

    let (_, body) = app.send(TestRequest::get("/api/workout-plans/specialized")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], special.id);

    let (_, body) = app.send(TestRequest::get("/api/workout-plans/goal/weight_loss")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Starter");
}

#[tokio::test]
async fn protected_routes_need_a_live_session() {
    let app = TestApp::new().await;
    for req in [
        TestRequest::get("/api/auth/user"),
        TestRequest::get("/api/user/workouts"),
        TestRequest::get("/api/user/nutrition").bearer("not-a-session"),
        TestRequest::post("/api/user/nutrition").json(&json!({})),
    ] {
        let (status, body) = app.send(req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "message": "Unauthorized" }));
    }
}

#[tokio::test]
async fn current_user_and_logout() {
    let app = TestApp::new().await;
    let sid = app.login("42767112").await;

    let (status, body) = app.send(TestRequest::get("/api/auth/user").cookie(&sid)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "42767112");
    assert_eq!(body["email"], "42767112@example.com");
    assert_eq!(body["goal"], "general_fitness");

    let (status, _) = app.send(TestRequest::post("/api/auth/logout").bearer(&sid)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.send(TestRequest::get("/api/auth/user").cookie(&sid)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn current_user_without_a_row_is_null() {
    let app = TestApp::new().await;
    let sid = app.login("ghost").await;
    app.storage
        .pool()
        .get()
        .unwrap()
        .batch_execute("PRAGMA foreign_keys = OFF; DELETE FROM users WHERE id = 'ghost';")
        .unwrap();

    let (status, body) = app.send(TestRequest::get("/api/auth/user").cookie(&sid)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn logging_a_workout() {
    let app = TestApp::new().await;
    let sid = app.login("alice").await;
    let plan = app.storage.add_workout_plan(plan("Push", "strength", false)).await.unwrap();

    let full = json!({
        "date": "2024-03-01",
        "duration": 50,
        "workoutId": plan.id,
        "caloriesBurned": 410,
        "notes": "felt strong",
        "userId": "mallory"
    });
    for field in ["date", "duration", "workoutId"] {
        let mut body = full.clone();
        body.as_object_mut().unwrap().remove(field);
        let (status, response) = app
            .send(TestRequest::post("/api/user/workouts").bearer(&sid).json(&body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "without {}", field);
        assert_eq!(response["message"], "Missing required fields");
        assert_eq!(response["fields"], json!([field]));
    }

    let mut ids = Vec::new();
    for _ in 0..2 {
        let (status, created) = app
            .send(TestRequest::post("/api/user/workouts").bearer(&sid).json(&full))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["userId"], "alice");
        assert_eq!(created["completed"], true);
        assert_eq!(created["caloriesBurned"], 410);
        ids.push(created["id"].as_i64().unwrap());
    }
    assert_ne!(ids[0], ids[1]);

    let (status, listed) = app.send(TestRequest::get("/api/user/workouts").bearer(&sid)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 2);

    let other = app.login("bob").await;
    let (_, listed) = app.send(TestRequest::get("/api/user/workouts").bearer(&other)).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn nutrition_round_trip() {
    let app = TestApp::new().await;
    let sid = app.login("carol").await;

    let (status, created) = app
        .send(TestRequest::post("/api/user/nutrition").cookie(&sid).json(&json!({
            "date": "2024-01-01",
            "calories": 2000,
            "protein": 150,
            "carbs": 200,
            "fat": 70
        })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].is_i64());
    assert_eq!(created["notes"], Value::Null);

    let (status, logs) = app.send(TestRequest::get("/api/user/nutrition").cookie(&sid)).await;
    assert_eq!(status, StatusCode::OK);
    let log = &logs[0];
    assert_eq!(log["date"], "2024-01-01");
    assert_eq!(log["calories"], 2000);
    assert_eq!(log["protein"], 150);
    assert_eq!(log["carbs"], 200);
    assert_eq!(log["fat"], 70);
    assert_eq!(log["userId"], "carol");
}

#[tokio::test]
async fn nutrition_body_problems_are_400s() {
    let app = TestApp::new().await;
    let sid = app.login("dave").await;

    let (status, body) = app
        .send(TestRequest::post("/api/user/nutrition").bearer(&sid).json(&json!({
            "date": "2024-01-01", "calories": 0, "protein": 0, "carbs": null
        })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"], json!(["carbs", "fat"]));

    let (status, body) = app
        .send(TestRequest::post("/api/user/nutrition").bearer(&sid).json(&json!({
            "date": "2024-01-01", "calories": "lots", "protein": 1, "carbs": 1, "fat": 1
        })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request body");

    let (status, body) = app
        .send(TestRequest::post("/api/user/nutrition").bearer(&sid).raw("{not json"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request body");

    // presence only: negative values are stored as given
    let (status, body) = app
        .send(TestRequest::post("/api/user/nutrition").bearer(&sid).json(&json!({
            "date": "2024-01-02", "calories": -100, "protein": 0, "carbs": 0, "fat": 0
        })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["calories"], -100);
}

#[tokio::test]
async fn stub_user_only_in_development() {
    let app = TestApp::new().await;
    let (status, body) = app.send(TestRequest::get("/api/test-auth")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Not found" }));

    let app = TestApp::with_settings(Settings::development()).await;
    let (status, body) = app.send(TestRequest::get("/api/test-auth")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "42767112");
    assert_eq!(body["goal"], "muscle_gain");
}

#[tokio::test]
async fn health_and_unknown_api_paths() {
    let app = TestApp::new().await;
    let (status, body) = app.send(TestRequest::get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = app.send(TestRequest::get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not found");
}
