mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use common::{RecipeFixture, create_recipe, spawn_env};
use http_body_util::BodyExt;
use recipedex::state::SharedState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const USER_HEADER: &str = "X-User-Id";

async fn spawn_app() -> (Router, Arc<SharedState>) {
    let env = spawn_env().await;
    let api_state = recipedex::api::create_app_state(env.state.clone(), None);
    (recipedex::api::router(api_state).await, env.state)
}

async fn get_as(app: &Router, user: Option<&str>, uri: &str) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_HEADER, user);
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_recipe_routes_require_user() {
    let (app, _) = spawn_app().await;

    let (status, body) = get_as(&app, None, "/api/recipes/search?q=soup").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = get_as(&app, Some("   "), "/api/recipes/suggestions?q=so").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get_as(&app, Some("alice"), "/api/recipes/search?q=soup").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_search_envelope() {
    let (app, state) = spawn_app().await;

    create_recipe(
        &state,
        RecipeFixture::new("alice", "Chocolate Cake")
            .cuisine("French")
            .difficulty("medium")
            .tags(&["dessert"])
            .ingredients(&["cocoa", "flour"]),
    )
    .await;
    create_recipe(&state, RecipeFixture::new("alice", "Chocolate Milk").tags(&["drink"])).await;

    let (status, body) = get_as(
        &app,
        Some("alice"),
        "/api/recipes/search?query=chocolate&tags=dessert&limit=10",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let data = &body["data"];
    assert_eq!(data["total"], 1);
    assert_eq!(data["hasMore"], false);
    assert!(data["searchTime"].is_u64());
    assert_eq!(data["recipes"][0]["title"], "Chocolate Cake");
    assert_eq!(data["recipes"][0]["ingredients"][1]["name"], "flour");
    assert_eq!(data["recipes"][0]["tags"][0]["name"], "dessert");
    assert_eq!(data["filters"]["cuisines"][0], "French");
    assert_eq!(data["filters"]["difficulties"][0], "medium");
}

#[tokio::test]
async fn test_search_rejects_bad_input() {
    let (app, _) = spawn_app().await;

    for uri in [
        "/api/recipes/search?limit=-1",
        "/api/recipes/search?offset=-5",
        "/api/recipes/search?limit=1000",
        "/api/recipes/search?difficulty=impossible",
        "/api/recipes/search?maxPrepTime=-10",
        "/api/recipes/search?servings=0",
        "/api/recipes/search?sortOrder=sideways",
        "/api/recipes/suggestions?q=ab&limit=0",
    ] {
        let (status, body) = get_as(&app, Some("alice"), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false, "{uri}");
        assert!(body["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_suggestions_endpoint() {
    let (app, state) = spawn_app().await;

    create_recipe(&state, RecipeFixture::new("alice", "Chicken Soup").cuisine("Chinese")).await;

    let (status, body) = get_as(&app, Some("alice"), "/api/recipes/suggestions?q=ch").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0], "Chicken Soup");
    assert_eq!(body["data"][1], "Chinese");

    let (status, body) = get_as(&app, Some("alice"), "/api/recipes/suggestions?q=c").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_recipe_detail() {
    let (app, state) = spawn_app().await;

    let id = create_recipe(
        &state,
        RecipeFixture::new("alice", "Tiramisu")
            .private()
            .notes(&["Needs a night in the fridge"]),
    )
    .await;

    let (status, body) = get_as(&app, Some("alice"), &format!("/api/recipes/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Tiramisu");
    assert_eq!(body["data"]["notes"][0]["content"], "Needs a night in the fridge");

    let (status, _) = get_as(&app, Some("bob"), &format!("/api/recipes/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_as(&app, Some("alice"), "/api/recipes/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_system_health() {
    let (app, state) = spawn_app().await;
    create_recipe(&state, RecipeFixture::new("alice", "Flatbread")).await;

    let (status, body) = send(&app, "GET", "/api/system/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], true);
    assert_eq!(body["data"]["indexEntries"], 1);
}

#[tokio::test]
async fn test_index_maintenance_routes() {
    let (app, state) = spawn_app().await;

    let id = create_recipe(&state, RecipeFixture::new("alice", "Focaccia")).await;
    state.store.clear_index().await.unwrap();

    let (status, body) = send(&app, "POST", "/api/system/index/rebuild").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["indexed"], 1);

    let (status, body) = send(&app, "DELETE", &format!("/api/system/index/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["recipeId"], id.value());
    assert!(state.store.index_entry(id).await.unwrap().is_none());

    let (status, _) = send(&app, "POST", &format!("/api/system/index/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(state.store.index_entry(id).await.unwrap().is_some());

    let (status, _) = send(&app, "POST", "/api/system/index/-3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cache_clear_route() {
    let (app, state) = spawn_app().await;

    create_recipe(&state, RecipeFixture::new("alice", "Gumbo").cuisine("Cajun")).await;
    let (_, before) = get_as(&app, Some("alice"), "/api/recipes/search").await;
    assert_eq!(before["data"]["filters"]["cuisines"][0], "Cajun");

    create_recipe(&state, RecipeFixture::new("alice", "Jambalaya").cuisine("Creole")).await;

    let (status, body) = send(&app, "POST", "/api/system/cache/clear").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["cleared"], true);

    let (_, after) = get_as(&app, Some("alice"), "/api/recipes/search").await;
    assert_eq!(after["data"]["filters"]["cuisines"][1], "Creole");
}
