
pub mod tools;
pub mod emotion_scores_tool;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use aws_sdk_bedrockruntime::types::{SpecificToolChoice, ToolChoice};
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{ContentBlock, Message, SystemContentBlock, Tool, ToolConfiguration, ToolInputSchema, ToolSpecification, ConversationRole::User};
use aws_sdk_bedrockruntime::operation::converse::ConverseOutput;
use serde::Deserialize;
use tracing::{debug, info, warn};

use emotion_scores_tool::get_emotion_scores_tool_definition;
use tools::ToValue;
use crate::error::DetectionError;
use super::{common_structs::EmotionScores, EmotionDetector};


#[derive(Debug, Clone)]
pub struct BedrockService {
    client: Client,
    chat_model_id: String,
}

// Shape of the forced tool call input.
#[derive(Debug, Deserialize)]
struct ToolScores {
    anger: f64,
    disgust: f64,
    fear: f64,
    joy: f64,
    sadness: f64,
}

impl BedrockService {
    pub fn new(client: &Client, chat_model_id: &str) -> Self {
        Self {
            client: client.to_owned(),
            chat_model_id: chat_model_id.to_owned(),
        }
    }

    pub async fn get_emotion_scores(&self, text: &str) -> Result<EmotionScores> {
        if text.trim().is_empty() {
            info!("Blank text, skipping model call");
            return Ok(EmotionScores::invalid());
        }

        let tool_definition = get_emotion_scores_tool_definition()?;
        let emotion_scores_tool = Tool::ToolSpec(
            ToolSpecification::builder()
                .name(&tool_definition.name)
                .description(&tool_definition.description)
                .input_schema(ToolInputSchema::Json(tool_definition.schema))
                .build()?
        );

        let tool_config = ToolConfiguration::builder()
            .set_tools(Some(vec![emotion_scores_tool]))
            .tool_choice(ToolChoice::Tool(SpecificToolChoice::builder().name(&tool_definition.name).build()?))
            .build()?;

        let system_prompt = format!("
            You will be acting as an emotion classifier.
            You score the anger, disgust, fear, joy and sadness expressed in a piece of text.
            The target text will be surrounded by <text></text>.
            Each score ranges from 0.0 to 1.0.
            You have to use {} to print out the score for each emotion.
        ", tool_definition.name);

        let message = Message::builder()
            .role(User)
            .content(ContentBlock::Text(format!("<text>{}</text>", text)))
            .build()?;

        let response = self.send(&system_prompt, vec![message], Some(tool_config)).await?;

        debug!("response: {:?}", response);
        self.process_emotion_score_output(response, &tool_definition.name)
    }


    fn process_emotion_score_output(&self, response: ConverseOutput, tool_name: &str) -> Result<EmotionScores> {
        let output = response.output.context("Error getting output")?;
        let message = match output.as_message() {
            Ok(message) => message.to_owned(),
            Err(output) => {
                bail!("Converse output is not message: {:?}", output)
            },
        };

        extract_tool_scores(&message.content, tool_name)
    }


    async fn send(&self, system_prompt: &str, messages: Vec<Message>, tool_config: Option<ToolConfiguration>) -> Result<ConverseOutput> {
        let builder = self.client
            .converse()
            .model_id(&self.chat_model_id)
            .system(SystemContentBlock::Text(system_prompt.to_owned()))
            .set_messages(Some(messages))
            .set_tool_config(tool_config);

        let response = builder
            .send()
            .await?;
        Ok(response)
    }
}


fn extract_tool_scores(contents: &[ContentBlock], tool_name: &str) -> Result<EmotionScores> {
    for content in contents {
        let Ok(tool_use) = content.as_tool_use() else {
            continue;
        };

        if tool_use.name() != tool_name {
            continue;
        }
        let input = tool_use.input().to_value();
        match serde_json::from_value::<ToolScores>(input) {
            Ok(s) => {
                debug!("tool use. name: {}, input: {:?}", tool_name, s);
                return Ok(EmotionScores::new(s.anger, s.disgust, s.fear, s.joy, s.sadness));
            },
            Err(error) => {
                warn!("error getting scores from tool input: {}.", error);
                continue;
            },
        };
    }

    bail!("Error getting emotion scores")
}


#[async_trait]
impl EmotionDetector for BedrockService {
    async fn detect(&self, text: &str) -> Result<EmotionScores, DetectionError> {
        Ok(self.get_emotion_scores(text).await?)
    }

    fn name(&self) -> &'static str {
        "bedrock"
    }
}
