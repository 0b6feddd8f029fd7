
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use emotion_detection::error::DetectionError;
use emotion_detection::formatter::format_response;
use emotion_detection::service::EmotionDetector;

pub const TEXT_PARAM: &str = "textToAnalyze";

const INDEX_HTML: &str = include_str!("../static/index.html");


#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<dyn EmotionDetector>,
}

impl AppState {
    pub fn new(detector: Arc<dyn EmotionDetector>) -> Self {
        Self { detector }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/emotionDetector", get(emotion_detector))
        .route("/", get(render_index_page))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}


pub struct AppError(DetectionError);

impl From<DetectionError> for AppError {
    fn from(error: DetectionError) -> Self {
        Self(error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Error detecting emotions: {}", self.0);
        build_error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

fn build_error_response(status: StatusCode, message: &str) -> Response {
    let mut text_header = HeaderMap::new();
    text_header.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    (status, text_header, message.to_owned()).into_response()
}


pub async fn emotion_detector(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<String, AppError> {
    // Like a form lookup: first occurrence wins, absent means empty.
    let text_to_analyze = params
        .into_iter()
        .find(|(key, _)| key == TEXT_PARAM)
        .map(|(_, value)| value)
        .unwrap_or_default();
    debug!("text to analyze: {} bytes", text_to_analyze.len());

    let scores = state.detector.detect(&text_to_analyze).await?;
    match scores.dominant_emotion {
        Some(emotion) => info!("dominant emotion: {}", emotion),
        None => info!("invalid text"),
    }

    Ok(format_response(&scores))
}

pub async fn render_index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}


#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use emotion_detection::service::common_structs::EmotionScores;
    use emotion_detection::service::MockEmotionDetector;
    use tower::ServiceExt;

    fn happy_detector(times: usize) -> MockEmotionDetector {
        let mut detector = MockEmotionDetector::new();
        detector
            .expect_detect()
            .times(times)
            .returning(|text| {
                assert_eq!(text, "I am so happy today");
                Ok(EmotionScores::new(0.01, 0.01, 0.02, 0.95, 0.01))
            });
        detector
    }

    async fn get_request(app: Router, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn formats_scores_for_valid_text() {
        let app = build_router(AppState::new(Arc::new(happy_detector(1))));

        let (status, body) = get_request(app, "/emotionDetector?textToAnalyze=I%20am%20so%20happy%20today").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("'anger': 0.01"));
        assert!(body.contains("'disgust': 0.01"));
        assert!(body.contains("'fear': 0.02"));
        assert!(body.contains("'joy': 0.95"));
        assert!(body.contains("'sadness': 0.01"));
        assert!(body.contains("The dominant emotion is **joy**"));
    }

    #[tokio::test]
    async fn responses_are_plain_text() {
        let app = build_router(AppState::new(Arc::new(happy_detector(1))));
        let request = Request::builder()
            .uri("/emotionDetector?textToAnalyze=I+am+so+happy+today")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let content_type = response.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));
    }

    #[tokio::test]
    async fn empty_and_missing_text_give_invalid_message() {
        let mut detector = MockEmotionDetector::new();
        detector
            .expect_detect()
            .times(2)
            .returning(|text| {
                assert_eq!(text, "");
                Ok(EmotionScores::invalid())
            });
        let app = build_router(AppState::new(Arc::new(detector)));

        let (status, body) = get_request(app.clone(), "/emotionDetector?textToAnalyze=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Invalid text! Please try again");

        let (status, body) = get_request(app, "/emotionDetector").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Invalid text! Please try again");
    }

    #[tokio::test]
    async fn first_text_parameter_wins() {
        let app = build_router(AppState::new(Arc::new(happy_detector(1))));

        let (status, body) = get_request(
            app,
            "/emotionDetector?textToAnalyze=I+am+so+happy+today&textToAnalyze=other",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("**joy**"));
    }

    #[tokio::test]
    async fn identical_requests_give_identical_responses() {
        let app = build_router(AppState::new(Arc::new(happy_detector(2))));
        let uri = "/emotionDetector?textToAnalyze=I%20am%20so%20happy%20today";

        let (_, first) = get_request(app.clone(), uri).await;
        let (_, second) = get_request(app, uri).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn classifier_failure_is_server_error() {
        let mut detector = MockEmotionDetector::new();
        detector.expect_detect().returning(|_| {
            Err(DetectionError::UnexpectedStatus { status: 503, body: "unavailable".to_owned() })
        });
        let app = build_router(AppState::new(Arc::new(detector)));

        let (status, body) = get_request(app, "/emotionDetector?textToAnalyze=hello").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal Server Error");
    }

    #[tokio::test]
    async fn index_page_ignores_query_parameters() {
        let mut detector = MockEmotionDetector::new();
        detector.expect_detect().never();
        let app = build_router(AppState::new(Arc::new(detector)));

        let (status, plain) = get_request(app.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(plain.contains("<html"));

        let (status, with_query) = get_request(app, "/?textToAnalyze=hello&foo=bar").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(plain, with_query);
    }
}
