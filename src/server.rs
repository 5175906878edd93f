use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    routing::post,
    Json, Router,
};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};

use crate::api::{ApiAnalyzeRequest, ApiCleared, ApiKeywordRequest, ApiTierTables};
use channel_insights::analytics::CombinedWeights;
use channel_insights::config::AnalyticsConfig;
use channel_insights::error::Error;
use channel_insights::keywords::KeywordFilter;
use channel_insights::store::{
    FileSuggestionStore, MemorySuggestionStore, NewSuggestion, Suggestion, SuggestionStore,
};
use channel_insights::{analyze_videos, keyword_view, AnalysisReport};

#[derive(Clone)]
struct AppState {
    weights: CombinedWeights,
    suggestions: Arc<dyn SuggestionStore>,
}

type ApiError = (StatusCode, String);

pub async fn serve(config: AnalyticsConfig) -> Result<(), Error> {
    let suggestions: Arc<dyn SuggestionStore> = match config.store.path.clone() {
        Some(path) => Arc::new(FileSuggestionStore::load(path, config.store.max_entries).await?),
        None => Arc::new(MemorySuggestionStore::new(config.store.max_entries)),
    };
    let state = AppState {
        weights: config.combined.clone(),
        suggestions,
    };

    let mut app = router(state);
    if let Some(web_root) = config.server.web_root.as_deref() {
        let index_path = PathBuf::from(web_root).join("index.html");
        let static_service = ServeDir::new(web_root).not_found_service(ServeFile::new(index_path));
        app = app.fallback_service(static_service);
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|err| Error::Config(format!("invalid bind address: {}", err)))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "channel-insights API listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/tiers", get(tiers))
        .route("/api/videos/analyze", post(analyze_handler))
        .route("/api/keywords", post(keywords_handler))
        .route(
            "/api/suggestions",
            get(list_suggestions)
                .post(create_suggestion)
                .delete(clear_suggestions),
        )
        .route("/api/suggestions/:id", get(get_suggestion))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn tiers() -> Json<ApiTierTables> {
    Json(ApiTierTables::current())
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiAnalyzeRequest>,
) -> Result<Json<AnalysisReport>, ApiError> {
    request.analysis.validate().map_err(error_response)?;
    let report = analyze_videos(&request.videos, &request.analysis, &state.weights);
    Ok(Json(report))
}

async fn keywords_handler(Json(request): Json<ApiKeywordRequest>) -> Json<KeywordFilter> {
    Json(keyword_view(
        &request.records,
        &request.fields,
        request.selected_keywords,
    ))
}

async fn list_suggestions(State(state): State<AppState>) -> Json<Vec<Suggestion>> {
    Json(state.suggestions.list().await)
}

async fn get_suggestion(
    State(state): State<AppState>,
    Path(suggestion_id): Path<String>,
) -> Result<Json<Suggestion>, ApiError> {
    state
        .suggestions
        .get(&suggestion_id)
        .await
        .map(Json)
        .ok_or_else(|| error_response(Error::NotFound(format!("suggestion {}", suggestion_id))))
}

async fn create_suggestion(
    State(state): State<AppState>,
    Json(draft): Json<NewSuggestion>,
) -> Result<(StatusCode, Json<Suggestion>), ApiError> {
    let suggestion = state
        .suggestions
        .create(draft)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(suggestion)))
}

async fn clear_suggestions(State(state): State<AppState>) -> Result<Json<ApiCleared>, ApiError> {
    let removed = state.suggestions.clear().await.map_err(error_response)?;
    info!(removed, "cleared suggestions");
    Ok(Json(ApiCleared { removed }))
}

fn error_response(err: Error) -> ApiError {
    let status = match err {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        warn!(error = %err, "suggestion store failure");
    }
    (status, err.to_string())
}
