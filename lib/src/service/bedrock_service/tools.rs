
use std::collections::HashMap;

use aws_smithy_types::{Document, Number};
use serde_json::{json, Map, Value};


/// Conversion into the document type the Bedrock tool schema expects.
pub trait ToDocument {
    fn to_document(&self) -> Document;
}

/// Conversion of a tool-use input back into plain JSON.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToDocument for Value {
    fn to_document(&self) -> Document {
        match self {
            Value::Null => Document::Null,
            Value::Bool(bool) => Document::Bool(*bool),
            Value::Number(number) => {
                if let Some(u64) = number.as_u64() {
                    Document::Number(Number::PosInt(u64))
                } else if let Some(i64) = number.as_i64() {
                    Document::Number(Number::NegInt(i64))
                } else {
                    Document::Number(Number::Float(number.as_f64().unwrap_or(0.0)))
                }
            },
            Value::String(string) => Document::String(string.to_owned()),
            Value::Array(array) => Document::Array(array.iter().map(|item| item.to_document()).collect()),
            Value::Object(object) => {
                let doc_map: HashMap<String, Document> = object
                    .iter()
                    .map(|(key, value)| (key.to_owned(), value.to_document()))
                    .collect();
                Document::Object(doc_map)
            },
        }
    }
}


impl ToValue for Document {
    fn to_value(&self) -> Value {
        match self {
            Document::Object(map) => {
                let value_map: Map<String, Value> = map
                    .iter()
                    .map(|(key, value)| (key.to_owned(), value.to_value()))
                    .collect();
                Value::Object(value_map)
            },
            Document::Array(array) => Value::Array(array.iter().map(|item| item.to_value()).collect()),
            Document::Number(number) => json!(number.to_f64_lossy()),
            Document::String(str) => json!(str),
            Document::Bool(bool) => json!(bool),
            Document::Null => Value::Null,
        }
    }
}


pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub schema: Document
}

impl ToolDefinition {
    pub fn new(name: &str, description: &str, schema: &Document) -> Self {
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            schema: schema.to_owned()
        }
    }
}
