use serde_json::{json, Map, Value};
use anyhow::Result;

use crate::service::common_structs::Emotion;
use super::tools::{ToDocument, ToolDefinition};

pub const EMOTION_SCORES_TOOL_NAME: &str = "print_emotion_scores";


pub fn get_emotion_scores_tool_definition() -> Result<ToolDefinition> {
    let description = "Print emotion score of a given text.";

    let mut properties = Map::new();
    for emotion in Emotion::ALL {
        properties.insert(emotion.as_str().to_owned(), json!({
            "type": "number",
            "description": format!("Score for {}, ranging from 0.0 to 1.0.", emotion),
        }));
    }
    let required: Vec<Value> = Emotion::ALL.iter().map(|e| json!(e.as_str())).collect();

    let json_schema = json!({
        "type": "object",
        "properties": properties,
        "required": required,
    });

    let schema = json_schema.to_document();
    Ok(ToolDefinition::new(EMOTION_SCORES_TOOL_NAME, description, &schema))
}
