use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

use sailing_recs::api::{create_router, AppState};
use sailing_recs::services::{Catalog, RecommendationEngine, ScoringWeights};

fn create_test_server() -> TestServer {
    let state = AppState::new();
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn create_deterministic_server() -> TestServer {
    let engine = RecommendationEngine::new(Catalog::sailing_stickers()).with_weights(ScoringWeights {
        jitter: 0.0,
        ..ScoringWeights::default()
    });
    TestServer::new(create_router(AppState::with_engine(engine))).unwrap()
}

fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_echoed() {
    let server = create_test_server();
    let id = Uuid::new_v4();

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_str(&id.to_string()).unwrap(),
        )
        .await;
    assert_eq!(response.header("x-request-id"), id.to_string().as_str());

    let response = server.get("/health").await;
    let generated = response.header("x-request-id");
    assert!(Uuid::parse_str(generated.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_get_catalog() {
    let server = create_test_server();

    let response = server.get("/api/v1/catalog").await;
    response.assert_status_ok();
    let items: Vec<Value> = response.json();
    assert_eq!(items.len(), 8);
    assert_eq!(items[0]["name"], "Classic Anchor");
    assert_eq!(items[0]["category"], "nautical");

    let response = server.get("/api/v1/catalog/2").await;
    response.assert_status_ok();
    let item: Value = response.json();
    assert_eq!(item["name"], "Compass Rose");

    let response = server.get("/api/v1/catalog/99").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stateless_recommendations() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "preferences": {
                "sailing_style": "vintage",
                "preferred_colors": ["navy", "gold"],
                "price_range": "mid"
            },
            "history": [
                {"type": "product_view", "product": "Classic Anchor", "timestamp": 1700000000000i64},
                {"type": "product_view", "product": "Ship Wheel", "timestamp": 1700000001000i64}
            ]
        }))
        .await;

    response.assert_status_ok();
    let recs: Value = response.json();

    for list in ["for_you", "trending", "complete_look"] {
        assert_eq!(recs[list].as_array().unwrap().len(), 4);
    }
    for item in recs["for_you"].as_array().unwrap() {
        let score = item["match_score"].as_u64().unwrap();
        assert!(score <= 100);
    }
    let complete_look = names(&recs["complete_look"]);
    assert!(!complete_look.contains(&"Classic Anchor".to_string()));
    assert!(!complete_look.contains(&"Ship Wheel".to_string()));
}

#[tokio::test]
async fn test_empty_request_uses_defaults() {
    let server = create_deterministic_server();

    let response = server.post("/api/v1/recommendations").json(&json!({})).await;
    response.assert_status_ok();
    let recs: Value = response.json();

    assert_eq!(recs["for_you"][0]["name"], "Classic Anchor");
    assert_eq!(recs["for_you"][0]["match_score"], 80);
}

#[tokio::test]
async fn test_malformed_preferences_degrade() {
    let server = create_deterministic_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "preferences": {"sailing_style": 42, "price_range": "yacht-club"}
        }))
        .await;
    response.assert_status_ok();
    let recs: Value = response.json();

    // Classic Anchor: style 30 + navy/white 30 + nautical 20 + price 12 in [5,50] 15
    assert_eq!(recs["for_you"][0]["name"], "Classic Anchor");
    assert_eq!(recs["for_you"][0]["match_score"], 95);
}

#[tokio::test]
async fn test_malformed_history_events_are_skipped() {
    let server = create_deterministic_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "preferences": {
                "sailing_style": "modern",
                "preferred_colors": [],
                "price_range": "premium"
            },
            "history": [
                {"type": "product_view", "product": "Sailboat Silhouette", "timestamp": 1700000000000i64},
                {"type": "product_view", "timestamp": 1700000001000i64},
                {"type": "recommendation_click", "product": "Ship Wheel", "matchScore": 87.4, "timestamp": 1700000002000i64}
            ]
        }))
        .await;
    response.assert_status_ok();
    let recs: Value = response.json();

    // The surviving product view still sets the sailing affinity
    assert_eq!(recs["for_you"][0]["name"], "Sailboat Silhouette");
    assert_eq!(recs["for_you"][0]["match_score"], 50);
    assert!(!names(&recs["complete_look"]).contains(&"Sailboat Silhouette".to_string()));
}

#[tokio::test]
async fn test_profile_preferences_flow() {
    let server = create_test_server();
    let profile = Uuid::new_v4();
    let url = format!("/api/v1/profiles/{}/preferences", profile);

    let response = server.get(&url).await;
    response.assert_status_ok();
    let prefs: Value = response.json();
    assert_eq!(prefs["sailing_style"], "classic");
    assert_eq!(prefs["preferred_colors"], json!(["navy", "white"]));
    assert_eq!(prefs["activity_level"], "moderate");

    let response = server
        .put(&url)
        .json(&json!({
            "sailingStyle": "modern",
            "preferredColors": ["blue"],
            "priceRange": "premium"
        }))
        .await;
    response.assert_status_ok();

    let prefs: Value = server.get(&url).await.json();
    assert_eq!(prefs["sailing_style"], "modern");
    assert_eq!(prefs["preferred_colors"], json!(["blue"]));
    assert_eq!(prefs["price_range"], "premium");
}

#[tokio::test]
async fn test_history_append_and_ordering() {
    let server = create_test_server();
    let profile = Uuid::new_v4();
    let url = format!("/api/v1/profiles/{}/history", profile);

    let response = server
        .post(&url)
        .json(&json!({"type": "product_view", "product": "Wave Pattern", "timestamp": 1700000005000i64}))
        .await;
    response.assert_status(StatusCode::CREATED);

    // Missing timestamp is stamped with the current time
    let response = server
        .post(&url)
        .json(&json!({"type": "cart_addition"}))
        .await;
    response.assert_status(StatusCode::CREATED);
    let stamped: Value = response.json();
    assert!(stamped["timestamp"].as_i64().unwrap() > 1700000005000i64);

    // Going back in time is rejected
    let response = server
        .post(&url)
        .json(&json!({"type": "page_view", "page": "/", "timestamp": 1600000000000i64}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("older"));

    let history: Vec<Value> = server.get(&url).await.json();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["type"], "product_view");
    assert_eq!(history[1]["type"], "cart_addition");
}

#[tokio::test]
async fn test_profile_recommendations() {
    let server = create_deterministic_server();
    let profile = Uuid::new_v4();
    let base = format!("/api/v1/profiles/{}", profile);

    server
        .put(&format!("{}/preferences", base))
        .json(&json!({
            "sailing_style": "modern",
            "preferred_colors": [],
            "price_range": "premium"
        }))
        .await
        .assert_status_ok();

    for product in ["Sailboat Silhouette", "Sailboat Silhouette", "Marine Life"] {
        server
            .post(&format!("{}/history", base))
            .json(&json!({"type": "product_view", "product": product}))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = server.get(&format!("{}/recommendations", base)).await;
    response.assert_status_ok();
    let recs: Value = response.json();

    // Modern style 30 + sailing affinity 20
    assert_eq!(recs["for_you"][0]["name"], "Sailboat Silhouette");
    assert_eq!(recs["for_you"][0]["match_score"], 50);

    let complete_look = names(&recs["complete_look"]);
    assert_eq!(complete_look.len(), 4);
    assert!(!complete_look.contains(&"Sailboat Silhouette".to_string()));
    assert!(!complete_look.contains(&"Marine Life".to_string()));
}

#[tokio::test]
async fn test_invalid_profile_id() {
    let server = create_test_server();
    let response = server.get("/api/v1/profiles/not-a-uuid/preferences").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
