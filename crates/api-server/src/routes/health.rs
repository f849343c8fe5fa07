//! Health check endpoint

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    version: String,
    database: String,
}

async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, database) = match tm_core::db::ping(state.pool()).await {
        Ok(()) => (StatusCode::OK, "ok", "ok".to_string()),
        Err(e) => {
            tracing::warn!("Database ping failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", e.to_string())
        }
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::state::AppState;

    #[tokio::test]
    async fn health_reports_database() {
        let temp_dir = TempDir::new().unwrap();
        let pool = tm_core::db::connect_path(&temp_dir.path().join("tasks.db"), 1)
            .await
            .unwrap();
        let app = crate::routes::app(AppState::with_pool(pool, false));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["database"], "ok");
    }
}
