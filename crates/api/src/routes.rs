use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use retriever::{GradientKbRetriever, NodeWithScore, RetrieverError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::metrics::{Metrics, MetricsSnapshot, TimedOperation};

#[derive(Clone)]
pub struct AppState {
    retriever: Arc<GradientKbRetriever>,
    metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(retriever: GradientKbRetriever) -> Self {
        Self {
            retriever: Arc::new(retriever),
            metrics: Metrics::new(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

#[derive(Deserialize)]
struct RetrieveRequest {
    query: String,
}

#[derive(Serialize, Deserialize)]
struct RetrieveResponse {
    request_id: Uuid,
    nodes: Vec<NodeWithScore>,
}

#[derive(Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/retrieve", post(retrieve))
        .route("/metrics", get(get_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn retrieve(
    State(state): State<AppState>,
    Json(req): Json<RetrieveRequest>,
) -> Result<Json<RetrieveResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request_id = Uuid::new_v4();
    let timer = TimedOperation::start();

    let result = state
        .retriever
        .retrieve_async(req.query)
        .instrument(info_span!("retrieve", %request_id))
        .await;

    let nodes_returned = result.as_ref().map_or(0, Vec::len);
    state.metrics.record_query(timer.elapsed(), nodes_returned);
    state.metrics.record_request(result.is_ok());

    match result {
        Ok(nodes) => {
            info!(%request_id, nodes = nodes.len(), "Retrieve completed");
            Ok(Json(RetrieveResponse { request_id, nodes }))
        }
        Err(e) => {
            warn!(%request_id, error = %e, "Retrieve failed");
            Err((
                status_for(&e),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

fn status_for(err: &RetrieverError) -> StatusCode {
    match err {
        RetrieverError::Transport(_) => StatusCode::BAD_GATEWAY,
        RetrieverError::MissingKnowledgeBaseId | RetrieverError::MissingApiToken => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn get_metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use retriever::RetrieverConfig;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn state_for(server: &MockServer) -> AppState {
        let retriever = GradientKbRetriever::new(
            RetrieverConfig::new("kb-test", "test-token").with_base_url(server.uri()),
        )
        .unwrap();
        AppState::new(retriever)
    }

    fn retrieve_request(query: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/retrieve")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "query": query }).to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        let response = router(state_for(&server))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_retrieve_returns_nodes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/kb-test/retrieve"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    { "text_content": "", "chunk_id": "skipped" },
                    { "text_content": "GraphRAG combines graphs and retrieval.", "relevance_score": 0.7 }
                ]
            })))
            .mount(&server)
            .await;

        let state = state_for(&server);
        let app = router(state.clone());
        let response = app.oneshot(retrieve_request("what is graphrag")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let nodes = body["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0]["node"]["id"], json!("gradient_kb_1"));
        assert_eq!(nodes[0]["score"], json!(0.7));

        let snapshot = state.metrics.snapshot();
        assert_eq!(snapshot.successful_requests, 1);
        assert_eq!(snapshot.total_nodes_returned, 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
            .mount(&server)
            .await;

        let state = state_for(&server);
        let response = router(state.clone())
            .oneshot(retrieve_request("anything"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("invalid token"));
        assert_eq!(state.metrics.snapshot().failed_requests, 1);
    }
}
