
use std::fmt;

use serde::{Deserialize, Serialize};


#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Joy,
    Sadness,
}

impl Emotion {
    /// Display order, and tie-break priority for the dominant emotion.
    pub const ALL: [Emotion; 5] = [
        Emotion::Anger,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Sadness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


// All fields are None when the classifier rejected the text.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct EmotionScores {
    pub anger: Option<f64>,
    pub disgust: Option<f64>,
    pub fear: Option<f64>,
    pub joy: Option<f64>,
    pub sadness: Option<f64>,
    pub dominant_emotion: Option<Emotion>,
}

impl EmotionScores {
    pub fn new(anger: f64, disgust: f64, fear: f64, joy: f64, sadness: f64) -> Self {
        let mut scores = Self {
            anger: Some(anger),
            disgust: Some(disgust),
            fear: Some(fear),
            joy: Some(joy),
            sadness: Some(sadness),
            dominant_emotion: None,
        };
        scores.dominant_emotion = scores.max_emotion();
        scores
    }

    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn is_invalid(&self) -> bool {
        self.dominant_emotion.is_none()
    }

    pub fn score(&self, emotion: Emotion) -> Option<f64> {
        match emotion {
            Emotion::Anger => self.anger,
            Emotion::Disgust => self.disgust,
            Emotion::Fear => self.fear,
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
        }
    }

    // Strict comparison keeps the earliest emotion in `Emotion::ALL` on ties.
    fn max_emotion(&self) -> Option<Emotion> {
        let mut max: Option<(Emotion, f64)> = None;
        for emotion in Emotion::ALL {
            let Some(score) = self.score(emotion).filter(|s| !s.is_nan()) else {
                continue;
            };
            if max.map_or(true, |(_, current)| score > current) {
                max = Some((emotion, score));
            }
        }
        max.map(|(emotion, _)| emotion)
    }
}
