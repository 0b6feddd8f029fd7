
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE}, Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::error::DetectionError;
use super::{common_structs::EmotionScores, EmotionDetector};

const MODEL_ID_HEADER: &str = "grpc-metadata-mm-model-id";


#[derive(Debug, Clone)]
pub struct WatsonService {
    client: Client,
    url: String,
    headers: HeaderMap,
}

#[derive(Debug, Deserialize)]
struct EmotionPredictResponse {
    #[serde(rename = "emotionPredictions")]
    emotion_predictions: Vec<EmotionPrediction>,
}

#[derive(Debug, Deserialize)]
struct EmotionPrediction {
    emotion: PredictedEmotion,
}

#[derive(Debug, Deserialize)]
struct PredictedEmotion {
    anger: f64,
    disgust: f64,
    fear: f64,
    joy: f64,
    sadness: f64,
}


impl WatsonService {
    pub fn new(url: &str, model_id: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(MODEL_ID_HEADER),
            HeaderValue::from_str(model_id).unwrap_or(HeaderValue::from_static("")),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self {
            client: Client::new(),
            url: url.to_owned(),
            headers,
        }
    }

    fn process_emotion_predict_output(&self, body: &str) -> Result<EmotionScores, DetectionError> {
        let response = serde_json::from_str::<EmotionPredictResponse>(body)
            .map_err(|error| DetectionError::InvalidResponse(error.to_string()))?;

        let prediction = response.emotion_predictions
            .into_iter()
            .next()
            .ok_or(DetectionError::InvalidResponse("no emotion predictions".to_owned()))?;

        let emotion = prediction.emotion;
        Ok(EmotionScores::new(emotion.anger, emotion.disgust, emotion.fear, emotion.joy, emotion.sadness))
    }
}


#[async_trait]
impl EmotionDetector for WatsonService {
    async fn detect(&self, text: &str) -> Result<EmotionScores, DetectionError> {
        let body = json!({
            "raw_document": {
                "text": text
            }
        });

        let response = self.client
            .post(&self.url)
            .headers(self.headers.clone())
            .body(serde_json::to_string(&body).context("failed to serialize emotion request")?)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            info!("Emotion classifier rejected text of length {}", text.len());
            return Ok(EmotionScores::invalid());
        }

        let body_string = response.text().await?;
        debug!("response_body: {}", body_string);

        if !status.is_success() {
            return Err(DetectionError::UnexpectedStatus {
                status: status.as_u16(),
                body: body_string,
            });
        }

        self.process_emotion_predict_output(&body_string)
    }

    fn name(&self) -> &'static str {
        "watson"
    }
}
