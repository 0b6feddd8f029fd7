pub static HOST: &str = "HOST";
pub static PORT: &str = "PORT";

pub static EMOTION_BACKEND: &str = "EMOTION_BACKEND";

pub static WATSON_URL: &str = "WATSON_URL";
pub static WATSON_MODEL_ID: &str = "WATSON_MODEL_ID";

pub static CHAT_MODEL: &str = "CHAT_MODEL";
