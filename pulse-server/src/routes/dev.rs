//! Development-only endpoints. Only mounted when the server runs in
//! development mode with dev endpoints switched on.

use axum::Json;
use serde_json::{Value, json};

/// Fixed stub user for frontend work without an identity provider.
pub async fn test_auth() -> Json<Value> {
    Json(json!({
        "id": "42767112",
        "email": "test@example.com",
        "firstName": "Test",
        "lastName": "User",
        "profileImageUrl": "https://placehold.co/400x400/4f46e5/ffffff.png?text=TU",
        "goal": "muscle_gain"
    }))
}
