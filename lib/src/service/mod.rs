pub mod bedrock_service;
pub mod watson_service;
pub mod common_structs;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{AppConfig, Backend};
use crate::error::DetectionError;
use common_structs::EmotionScores;


/// The external emotion classifier: raw text in, five scores out.
///
/// Text the classifier rejects (empty, unparseable) is reported as
/// `EmotionScores::invalid()`, not as an error.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait EmotionDetector: Send + Sync {
    async fn detect(&self, text: &str) -> Result<EmotionScores, DetectionError>;

    fn name(&self) -> &'static str;
}


pub async fn build_detector(config: &AppConfig) -> Arc<dyn EmotionDetector> {
    match &config.backend {
        Backend::Watson { url, model_id } => {
            Arc::new(watson_service::WatsonService::new(url, model_id))
        }
        Backend::Bedrock { chat_model_id } => {
            let sdk_config = aws_config::load_from_env().await;
            let client = aws_sdk_bedrockruntime::Client::new(&sdk_config);
            Arc::new(bedrock_service::BedrockService::new(&client, chat_model_id))
        }
    }
}
