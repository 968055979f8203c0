//! Movie API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use marquee_core::{Movie, RemoteError};

use crate::metrics::{MOVIE_LOOKUPS_TOTAL, MOVIE_SEARCHES_TOTAL};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub keyword: String,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub keyword: String,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub movies: Vec<Movie>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

/// Map a remote failure to an HTTP status.
///
/// "Not found" comes back as 404 with the API's message preserved, a
/// missing API key as 503, anything else as 502 since the upstream
/// service is at fault.
fn remote_error(error: RemoteError) -> ApiError {
    let status = match &error {
        RemoteError::NotFound(_) => StatusCode::NOT_FOUND,
        RemoteError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_GATEWAY,
    };
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

fn outcome(error: &RemoteError) -> &'static str {
    match error {
        RemoteError::NotFound(_) => "not_found",
        _ => "error",
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/movies/search?keyword=...&page=N
///
/// Search movies by keyword, one page at a time.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    if params.keyword.trim().is_empty() {
        return Err(bad_request("keyword cannot be empty"));
    }
    if params.page == 0 {
        return Err(bad_request("page must be at least 1"));
    }

    let (page_size, max_pages) = state.page_limits();
    if params.page > max_pages {
        return Err(bad_request("page exceeds the page cap"));
    }

    match state.source().search(&params.keyword, params.page).await {
        Ok(result) => {
            MOVIE_SEARCHES_TOTAL.with_label_values(&["success"]).inc();
            Ok(Json(SearchResponse {
                keyword: params.keyword,
                page: params.page,
                total_pages: result.total_pages(page_size, max_pages),
                total_results: result.total_results,
                movies: result.movies,
            }))
        }
        Err(e) => {
            MOVIE_SEARCHES_TOTAL.with_label_values(&[outcome(&e)]).inc();
            Err(remote_error(e))
        }
    }
}

/// GET /api/v1/movies/{id}
///
/// Fetch full details for a single movie, read-through cached.
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    match state.source().get_movie(&id).await {
        Ok(movie) => {
            MOVIE_LOOKUPS_TOTAL.with_label_values(&["success"]).inc();
            Ok(Json(movie))
        }
        Err(e) => {
            MOVIE_LOOKUPS_TOTAL.with_label_values(&[outcome(&e)]).inc();
            Err(remote_error(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, middleware, routing::get, Router};
    use http_body_util::BodyExt;
    use marquee_core::testing::{fixtures, MockMovieSource};
    use marquee_core::{load_config_from_str, MovieSource};
    use tower::ServiceExt;

    fn test_router(source: Arc<MockMovieSource>) -> Router {
        let config = load_config_from_str(
            r#"
[api]
api_key = "abcd1234"
"#,
        )
        .unwrap();
        let state = Arc::new(AppState::new(config, source as Arc<dyn MovieSource>));
        Router::new()
            .route("/movies/search", get(search))
            .route("/movies/{id}", get(get_movie))
            .layer(middleware::from_fn(
                crate::api::middleware::metrics_middleware,
            ))
            .with_state(state)
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_search_returns_page() {
        let source = Arc::new(MockMovieSource::new());
        source
            .set_page("matrix", 1, fixtures::page_of("matrix", 1, 10, 43))
            .await;

        let (status, json) =
            get_json(test_router(source), "/movies/search?keyword=matrix").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["keyword"], "matrix");
        assert_eq!(json["page"], 1);
        assert_eq!(json["total_pages"], 5);
        assert_eq!(json["total_results"], 43);
        assert_eq!(json["movies"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_search_not_found_is_404_with_message() {
        let source = Arc::new(MockMovieSource::new());

        let (status, json) =
            get_json(test_router(source), "/movies/search?keyword=zzzzz").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Movie not found!");
    }

    #[tokio::test]
    async fn test_search_empty_keyword_is_400() {
        let source = Arc::new(MockMovieSource::new());

        let (status, _) =
            get_json(test_router(source), "/movies/search?keyword=%20").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_page_zero_is_400() {
        let source = Arc::new(MockMovieSource::new());

        let (status, _) =
            get_json(test_router(source), "/movies/search?keyword=matrix&page=0").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_past_page_cap_is_400() {
        let source = Arc::new(MockMovieSource::new());

        let (status, _) = get_json(
            test_router(source),
            "/movies/search?keyword=matrix&page=101",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_upstream_error_is_502() {
        let source = Arc::new(MockMovieSource::new());
        source
            .set_page_error("matrix", 1, RemoteError::Api("Invalid API key!".to_string()))
            .await;

        let (status, json) =
            get_json(test_router(source), "/movies/search?keyword=matrix").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(json["error"].as_str().unwrap().contains("Invalid API key!"));
    }

    #[tokio::test]
    async fn test_get_movie_returns_details() {
        let source = Arc::new(MockMovieSource::new());
        source
            .set_movie(fixtures::movie_with_details("tt0133093", "The Matrix"))
            .await;

        let (status, json) = get_json(test_router(source), "/movies/tt0133093").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["id"], "tt0133093");
        assert_eq!(json["title"], "The Matrix");
        assert!(json["details"]["plot"].is_string());
    }

    #[tokio::test]
    async fn test_get_movie_not_found_is_404() {
        let source = Arc::new(MockMovieSource::new());

        let (status, json) = get_json(test_router(source), "/movies/tt9999999").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Movie not found!");
    }
}
