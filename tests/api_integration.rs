//! API Integration Tests for the superhero service
//!
//! Drives every endpoint through a real listener.

use reqwest::StatusCode;
use serde_json::{Value, json};
use superhero::server::{AppState, create_router};
use superhero::{Hero, Power, StorageBuilder, StorageHandles};
use tokio::net::TcpListener;

// =============================================================================
// Test Helpers
// =============================================================================

/// Start test server on an in-memory database and return base URL.
async fn start_test_server() -> (String, StorageHandles) {
    let handles = StorageBuilder::new("sqlite::memory:")
        .max_connections(1)
        .build()
        .await
        .expect("Failed to build storage");
    let router = create_router(AppState::from_handles(&handles));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().expect("Failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    // Give server time to start
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    (format!("http://{}", addr), handles)
}

async fn insert_hero(handles: &StorageHandles, name: &str, super_name: &str) -> i64 {
    handles
        .hero_store
        .insert(&Hero::new(name, Some(super_name.to_string())).unwrap())
        .await
        .expect("Failed to insert hero")
        .id()
        .unwrap()
}

async fn insert_power(handles: &StorageHandles, name: &str, description: &str) -> i64 {
    handles
        .power_store
        .insert(&Power::new(name, description).unwrap())
        .await
        .expect("Failed to insert power")
        .id()
        .unwrap()
}

// =============================================================================
// Probe Tests
// =============================================================================

#[tokio::test]
async fn test_home_and_health_probes() {
    let (base_url, handles) = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/", base_url))
        .send()
        .await
        .expect("Failed to send home request");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/healthz", base_url))
        .send()
        .await
        .expect("Failed to send healthz request");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse healthz response");
    assert_eq!(body["status"], "ok");

    let resp = client
        .get(format!("{}/readyz", base_url))
        .send()
        .await
        .expect("Failed to send readyz request");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse readyz response");
    assert_eq!(body["db"], "ready");

    handles.shutdown().await.unwrap();
}

// =============================================================================
// Heroes API Tests
// =============================================================================

#[tokio::test]
async fn test_list_heroes() {
    let (base_url, handles) = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/heroes", base_url))
        .send()
        .await
        .expect("Failed to list heroes");
    assert_eq!(resp.status(), StatusCode::OK);
    let heroes: Vec<Value> = resp.json().await.unwrap();
    assert!(heroes.is_empty());

    let id = insert_hero(&handles, "Kamala Khan", "Ms. Marvel").await;
    handles
        .hero_store
        .insert(&Hero::new("Anonymous", None).unwrap())
        .await
        .unwrap();

    let heroes: Value = client
        .get(format!("{}/heroes", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        heroes[0],
        json!({ "id": id, "name": "Kamala Khan", "super_name": "Ms. Marvel" })
    );
    assert_eq!(heroes[1]["super_name"], Value::Null);

    handles.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_get_unknown_hero_is_404() {
    let (base_url, handles) = start_test_server().await;
    let client = reqwest::Client::new();

    for id in [0, 1, 42, 999_999] {
        let resp = client
            .get(format!("{}/heroes/{}", base_url, id))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Hero not found" }));
    }

    handles.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_get_hero_with_unparseable_id_is_404() {
    let (base_url, handles) = start_test_server().await;
    let client = reqwest::Client::new();

    for id in ["99999999999999999999", "abc", "-"] {
        let resp = client
            .get(format!("{}/heroes/{}", base_url, id))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = resp.json().await.expect("404 body should be JSON");
        assert_eq!(body, json!({ "error": "Hero not found" }));
    }

    let resp = client
        .get(format!("{}/powers/99999999999999999999", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Power not found" }));

    handles.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_patch_hero() {
    let (base_url, handles) = start_test_server().await;
    let client = reqwest::Client::new();
    let id = insert_hero(&handles, "Kamala Khan", "Ms. Marvel").await;
    let url = format!("{}/heroes/{}", base_url, id);

    // Empty name is rejected and nothing changes
    let resp = client
        .patch(&url)
        .json(&json!({ "name": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Name cannot be empty" }));

    // Valid name with empty super name is rejected as a whole
    let resp = client
        .patch(&url)
        .json(&json!({ "name": "Carol Danvers", "super_name": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let hero: Value = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(hero["name"], "Kamala Khan");
    assert_eq!(hero["super_name"], "Ms. Marvel");

    // Partial update
    let resp = client
        .patch(&url)
        .json(&json!({ "super_name": "Captain Marvel" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Hero updated successfully" }));

    let hero: Value = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(hero["name"], "Kamala Khan");
    assert_eq!(hero["super_name"], "Captain Marvel");

    // Unknown hero
    let resp = client
        .patch(format!("{}/heroes/{}", base_url, id + 1))
        .json(&json!({ "name": "Nobody" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    handles.shutdown().await.unwrap();
}

// =============================================================================
// Powers API Tests
// =============================================================================

#[tokio::test]
async fn test_list_and_get_powers() {
    let (base_url, handles) = start_test_server().await;
    let client = reqwest::Client::new();
    let id = insert_power(&handles, "flight", "can fly at supersonic speed").await;

    let powers: Value = client
        .get(format!("{}/powers", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        powers,
        json!([{ "id": id, "name": "flight", "description": "can fly at supersonic speed" }])
    );

    let resp = client
        .get(format!("{}/powers/{}", base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let power: Value = resp.json().await.unwrap();
    assert_eq!(power["name"], "flight");

    let resp = client
        .get(format!("{}/powers/{}", base_url, id + 1))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Power not found" }));

    handles.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_patch_power_description() {
    let (base_url, handles) = start_test_server().await;
    let client = reqwest::Client::new();
    let id = insert_power(&handles, "flight", "can fly at supersonic speed").await;
    let url = format!("{}/powers/{}", base_url, id);

    // Too short: rejected, stored description unchanged
    let resp = client
        .patch(&url)
        .json(&json!({ "description": "short" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "errors": ["Description must be at least 20 characters long."] })
    );

    // Empty
    let resp = client
        .patch(&url)
        .json(&json!({ "description": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Missing field
    let resp = client.patch(&url).json(&json!({})).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "errors": ["description field is required"] }));

    let power: Value = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(power["description"], "can fly at supersonic speed");

    // Valid update
    let resp = client
        .patch(&url)
        .json(&json!({ "description": "gives the wielder the ability to fly" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "id": id, "name": "flight", "description": "gives the wielder the ability to fly" })
    );

    // Unknown power
    let resp = client
        .patch(format!("{}/powers/{}", base_url, id + 1))
        .json(&json!({ "description": "gives the wielder the ability to fly" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    handles.shutdown().await.unwrap();
}

// =============================================================================
// Hero Powers API Tests
// =============================================================================

#[tokio::test]
async fn test_create_hero_power_scenario() {
    let (base_url, handles) = start_test_server().await;
    let client = reqwest::Client::new();
    let hero_id = insert_hero(&handles, "Kamala Khan", "Ms. Marvel").await;
    let power_id = insert_power(&handles, "flight", "can fly at supersonic speed").await;

    let resp = client
        .post(format!("{}/hero_powers", base_url))
        .json(&json!({ "strength": "Strong", "hero_id": hero_id, "power_id": power_id }))
        .send()
        .await
        .expect("Failed to create hero power");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "id": hero_id, "name": "Kamala Khan", "super_name": "Ms. Marvel" })
    );

    let hero: Value = client
        .get(format!("{}/heroes/{}", base_url, hero_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        hero["powers"],
        json!([{ "id": power_id, "name": "flight", "description": "can fly at supersonic speed" }])
    );

    handles.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_create_hero_power_invalid_strength() {
    let (base_url, handles) = start_test_server().await;
    let client = reqwest::Client::new();
    let hero_id = insert_hero(&handles, "Kamala Khan", "Ms. Marvel").await;
    let power_id = insert_power(&handles, "flight", "can fly at supersonic speed").await;

    for strength in ["Invincible", "strong", ""] {
        let resp = client
            .post(format!("{}/hero_powers", base_url))
            .json(&json!({ "strength": strength, "hero_id": hero_id, "power_id": power_id }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await.unwrap();
        let errors = body["errors"].as_array().expect("errors array");
        assert!(errors[0].as_str().unwrap().starts_with("Strength"));
    }

    assert!(
        handles
            .hero_power_store
            .list_all()
            .await
            .unwrap()
            .is_empty()
    );

    handles.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_create_hero_power_missing_fields_and_references() {
    let (base_url, handles) = start_test_server().await;
    let client = reqwest::Client::new();
    let hero_id = insert_hero(&handles, "Kamala Khan", "Ms. Marvel").await;

    let resp = client
        .post(format!("{}/hero_powers", base_url))
        .json(&json!({ "strength": "Strong", "hero_id": hero_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "errors": ["strength, power_id, and hero_id fields are required"] })
    );

    let resp = client
        .post(format!("{}/hero_powers", base_url))
        .json(&json!({ "strength": "Strong", "hero_id": hero_id, "power_id": 77 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "errors": ["Power or Hero not found"] }));

    assert!(
        handles
            .hero_power_store
            .list_all()
            .await
            .unwrap()
            .is_empty()
    );

    handles.shutdown().await.unwrap();
}
