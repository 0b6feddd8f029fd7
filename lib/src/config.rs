use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::env_keys::{CHAT_MODEL, EMOTION_BACKEND, HOST, PORT, WATSON_MODEL_ID, WATSON_URL};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

pub const DEFAULT_WATSON_URL: &str =
    "https://sn-watson-emotion.labs.skills.network/v1/watson.runtime.nlp.v1/NlpService/EmotionPredict";
pub const DEFAULT_WATSON_MODEL_ID: &str = "emotion_aggregated-workflow_lang_en_stock";


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Watson {
        url: String,
        model_id: String,
    },
    Bedrock {
        chat_model_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub backend: Backend,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host_string = get(HOST).unwrap_or(DEFAULT_HOST.to_owned());
        let host = IpAddr::from_str(host_string.trim())
            .with_context(|| format!("{} is not a valid ip address: {}", HOST, host_string))?;

        let port = match get(PORT) {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .with_context(|| format!("{} is not a valid port: {}", PORT, port))?,
            None => DEFAULT_PORT,
        };

        let backend_name = get(EMOTION_BACKEND).unwrap_or("watson".to_owned());
        let backend = match backend_name.trim().to_lowercase().as_str() {
            "watson" => Backend::Watson {
                url: get(WATSON_URL).unwrap_or(DEFAULT_WATSON_URL.to_owned()),
                model_id: get(WATSON_MODEL_ID).unwrap_or(DEFAULT_WATSON_MODEL_ID.to_owned()),
            },
            "bedrock" => Backend::Bedrock {
                chat_model_id: get(CHAT_MODEL)
                    .with_context(|| format!("{} is required for the bedrock backend", CHAT_MODEL))?,
            },
            other => bail!("Unknown {}: {}. Expected watson or bedrock.", EMOTION_BACKEND, other),
        };

        Ok(Self { host, port, backend })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
