use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::json;

use movie_recommender::{
    api::{create_router, AppState},
    config::Config,
    data::Catalog,
    services::Recommender,
};

const MOVIES: &str = "movieId,title,Plot,genres\n\
    1,Star Voyage,A crew of astronauts explores deep space.,Sci-Fi|Adventure\n\
    2,Orbit,Astronauts stranded in space fight to survive.,Sci-Fi|Drama\n\
    3,Paris Hearts,Two strangers fall in love in Paris.,Romance|Drama\n\
    4,Moon Base,\"A lonely crew on the moon base. It's quiet.\",Sci-Fi\n\
    5,Wedding Season,\"Love, weddings and family in Paris.\",Romance|Comedy\n";

// Newest interaction is 1700000000; the 1600000000 views are far outside an 8 week window
const INTERACTIONS: &str = "userId,movieId,timestamp,rating\n\
    7,1,1699999000,4.0\n\
    8,3,1699999500,5.0\n\
    9,3,1700000000,4.5\n\
    9,5,1700000000,3.0\n\
    8,5,1699999900,4.0\n\
    1,4,1600000000,2.0\n\
    2,4,1600000000,2.0\n\
    3,4,1600000000,2.0\n";

fn create_test_server() -> TestServer {
    let catalog = Catalog::from_readers(MOVIES.as_bytes(), INTERACTIONS.as_bytes()).unwrap();
    let state = AppState::new(Recommender::new(catalog).unwrap(), &Config::default());
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn titles(response: &axum_test::TestResponse) -> Vec<String> {
    let body: serde_json::Value = response.json();
    body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_anonymous_user_gets_popular_titles() {
    let server = create_test_server();
    let response = server.get("/get_new_user_recommendation").await;
    response.assert_status_ok();
    assert_eq!(
        titles(&response),
        vec!["Paris Hearts", "Wedding Season", "Star Voyage"]
    );
}

#[tokio::test]
async fn test_weeks_widens_the_window() {
    let server = create_test_server();
    let response = server
        .get("/get_new_user_recommendation")
        .add_query_param("weeks", 1000)
        .add_query_param("top_n", 1)
        .await;
    response.assert_status_ok();
    assert_eq!(titles(&response), vec!["Moon Base"]);
}

#[tokio::test]
async fn test_known_user_never_sees_watched_titles() {
    let server = create_test_server();
    let response = server
        .get("/get_new_user_recommendation")
        .add_query_param("user_id", 7)
        .add_query_param("top_n", 3)
        .await;
    response.assert_status_ok();
    let titles = titles(&response);
    assert_eq!(titles.len(), 3);
    assert_eq!(titles[0], "Orbit");
    assert!(!titles.contains(&"Star Voyage".to_string()));
}

#[tokio::test]
async fn test_unknown_user_falls_back_to_popularity() {
    let server = create_test_server();
    let response = server
        .get("/get_new_user_recommendation")
        .add_query_param("user_id", 424242)
        .add_query_param("top_n", 2)
        .await;
    response.assert_status_ok();
    assert_eq!(titles(&response), vec!["Paris Hearts", "Wedding Season"]);
}

#[tokio::test]
async fn test_empty_user_id_gets_popular_titles() {
    let server = create_test_server();
    let response = server.get("/get_new_user_recommendation?user_id=").await;
    response.assert_status_ok();
    assert_eq!(
        titles(&response),
        vec!["Paris Hearts", "Wedding Season", "Star Voyage"]
    );
}

#[tokio::test]
async fn test_unparsable_numbers_fall_back_to_defaults() {
    let server = create_test_server();
    let response = server
        .get("/get_new_user_recommendation?top_n=abc&weeks=-1")
        .await;
    response.assert_status_ok();
    // Default window of 8 weeks and default top_n of 10
    assert_eq!(
        titles(&response),
        vec!["Paris Hearts", "Wedding Season", "Star Voyage"]
    );
}

#[tokio::test]
async fn test_repeated_parameter_is_bad_request() {
    let server = create_test_server();
    let response = server
        .get("/get_new_user_recommendation?user_id=7&user_id=8")
        .expect_failure()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = create_test_server();
    let response = server.get("/recommendations").expect_failure().await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let id = "6f1c1e3a-0b6d-4c4e-9a2f-2d3c4b5a6e7f";
    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;
    assert_eq!(response.header("x-request-id"), id);

    let response = server.get("/health").await;
    assert_ne!(response.header("x-request-id"), id);
}
