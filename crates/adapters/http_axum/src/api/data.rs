//! `GET /api/data`, the latest reading, actuator states and link status.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use greenhouse_domain::state::LatestState;

use crate::state::AppState;

/// Possible responses from the data endpoint.
pub enum GetResponse {
    Ok(Json<LatestState>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/data`
pub async fn get(State(state): State<AppState>) -> GetResponse {
    GetResponse::Ok(Json(state.latest.snapshot()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get as get_route;
    use chrono::TimeZone as _;
    use chrono::Utc;
    use greenhouse_app::state_cell::SharedState;
    use greenhouse_domain::actuator::derive;
    use greenhouse_domain::reading::Reading;
    use tower::ServiceExt;

    fn app(cell: &SharedState) -> Router {
        Router::new()
            .route("/api/data", get_route(get))
            .with_state(AppState::new(cell.reader()))
    }

    async fn fetch(app: Router) -> (StatusCode, Option<String>, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/data")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|value| value.to_str().unwrap().to_string());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, content_type, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn should_return_initial_state_before_first_reading() {
        let cell = SharedState::new();

        let (status, content_type, body) = fetch(app(&cell)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(
            body,
            serde_json::json!({
                "temp": 0,
                "humid": 0,
                "fan": false,
                "pump": false,
                "last_updated": 0.0,
                "status": "Disconnected",
            })
        );
    }

    #[tokio::test]
    async fn should_return_latest_reading_when_online() {
        let mut cell = SharedState::new();
        cell.mark_connected();
        let reading = Reading::new(31, 39);
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        cell.record(reading, derive(reading), at);

        let (status, _, body) = fetch(app(&cell)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["temp"], 31);
        assert_eq!(body["humid"], 39);
        assert_eq!(body["fan"], true);
        assert_eq!(body["pump"], true);
        assert_eq!(body["status"], "Online");
        assert_eq!(body["last_updated"], 1_717_243_200.0);
    }

    #[tokio::test]
    async fn should_answer_ok_while_disconnected() {
        let mut cell = SharedState::new();
        let reading = Reading::new(25, 60);
        cell.record(reading, derive(reading), Utc::now());
        cell.mark_disconnected();

        let (status, _, body) = fetch(app(&cell)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Disconnected");
        assert_eq!(body["temp"], 25);
        assert_eq!(body["humid"], 60);
    }
}
