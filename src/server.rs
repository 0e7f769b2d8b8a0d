use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Path,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Extension, Router,
};
use hyper::Server;
use serde::Deserialize;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::error;
use uuid::Uuid;

use crate::app::convert_use_case::ConvertUseCase;
use crate::app::create_quiz_use_case::CreateQuizUseCase;
use crate::config::AuthConfig;
use crate::error::QuizError;
use crate::storage::QuizStore;

/// Shared handles for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub convert: Arc<ConvertUseCase>,
    pub create_quiz: Arc<CreateQuizUseCase>,
    pub store: Arc<dyn QuizStore>,
    pub auth: AuthConfig,
}

#[derive(Deserialize)]
struct TextInput {
    text: String,
}

#[derive(Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct QuizCreateRequest {
    name: String,
    content: String,
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "quizsmith",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn login(
    Extension(state): Extension<AppState>,
    Json(request): Json<LoginRequest>,
) -> Response {
    if request.username == state.auth.username && request.password == state.auth.password {
        Json(json!({
            "status": "success",
            "token": Uuid::new_v4().to_string()
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "invalid username or password"})),
        )
            .into_response()
    }
}

async fn list_quizzes(Extension(state): Extension<AppState>) -> Response {
    match state.store.list_quizzes().await {
        Ok(summaries) => Json(summaries).into_response(),
        Err(e) => error_response(e),
    }
}

async fn create_quiz(
    Extension(state): Extension<AppState>,
    Json(request): Json<QuizCreateRequest>,
) -> Response {
    match state
        .create_quiz
        .create(&request.name, &request.content)
        .await
    {
        Ok(count) => Json(json!({"status": "success", "count": count})).into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_quiz(Extension(state): Extension<AppState>, Path(name): Path<String>) -> Response {
    match state.store.get_quiz(&name).await {
        Ok(Some(quiz)) => Json(quiz.questions).into_response(),
        Ok(None) => error_response(QuizError::QuizNotFound(name)),
        Err(e) => error_response(e),
    }
}

/// Prometheus scrape endpoint
async fn metrics_text() -> Response {
    match crate::observability::metrics::render() {
        Some(body) => body.into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed",
        )
            .into_response(),
    }
}

/// Conversion without persistence; kept for older clients.
async fn convert_text(
    Extension(state): Extension<AppState>,
    Json(input): Json<TextInput>,
) -> Response {
    match state.convert.convert(&input.text).await {
        Ok(reply) => Json(json!({"status": "success", "data": reply.records})).into_response(),
        Err(e) => error_response(e),
    }
}

/// Maps core error kinds onto transport responses. User-facing messages are
/// composed here from the kind alone; pipeline internals never reach clients.
fn error_response(e: QuizError) -> Response {
    let (status, detail) = match &e {
        QuizError::EmptyReply => (
            StatusCode::BAD_REQUEST,
            "no questions could be parsed from the input".to_string(),
        ),
        QuizError::QuizExists(name) => (
            StatusCode::CONFLICT,
            format!("quiz '{}' already exists", name),
        ),
        QuizError::QuizNotFound(_) => (StatusCode::NOT_FOUND, "quiz not found".to_string()),
        QuizError::InvalidQuizName(name) => (
            StatusCode::BAD_REQUEST,
            format!("invalid quiz name: {}", name),
        ),
        QuizError::Backend { .. } | QuizError::Http(_) => {
            error!("model backend failure: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                "model backend request failed".to_string(),
            )
        }
        _ => {
            error!("internal error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    };
    (status, Json(json!({"detail": detail}))).into_response()
}

/// Create the HTTP server with all routes
pub fn create_server(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        // Serve the local front end if one is present
        .nest_service("/static", ServeDir::new("static"))
        .route("/api/login", post(login))
        .route("/api/quizzes", get(list_quizzes).post(create_quiz))
        .route("/api/quizzes/:name", get(get_quiz))
        .route("/convert", post(convert_text))
        .layer(Extension(state))
        .layer(ServiceBuilder::new().layer(cors))
}

/// Start the HTTP server on the specified port
pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_server(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    println!("🚀 HTTP server running on http://localhost:{port}");
    println!("💚 Health check: http://localhost:{port}/health");

    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
