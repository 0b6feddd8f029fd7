use crate::service::common_structs::{Emotion, EmotionScores};

pub const INVALID_TEXT_MESSAGE: &str = "Invalid text! Please try again";


/// Renders the classifier result for display.
///
/// Scores are printed in the fixed order anger, disgust, fear, joy, sadness,
/// followed by the dominant emotion wrapped in `**`.
pub fn format_response(scores: &EmotionScores) -> String {
    let Some(dominant_emotion) = scores.dominant_emotion else {
        return INVALID_TEXT_MESSAGE.to_owned();
    };

    let listed = Emotion::ALL
        .iter()
        .map(|emotion| format!("'{}': {}", emotion, format_score(scores.score(*emotion))))
        .collect::<Vec<String>>();

    format!(
        "For the given statement, the system response is {} and {}. The dominant emotion is **{}**.",
        listed[..listed.len() - 1].join(", "),
        listed[listed.len() - 1],
        dominant_emotion
    )
}

// Debug keeps the decimal point on whole numbers (1.0, not 1).
fn format_score(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{:?}", score),
        None => "None".to_owned(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_all_scores_and_dominant() {
        let scores = EmotionScores::new(0.01, 0.01, 0.02, 0.95, 0.01);
        let response = format_response(&scores);
        assert_eq!(
            response,
            "For the given statement, the system response is 'anger': 0.01, 'disgust': 0.01, 'fear': 0.02, 'joy': 0.95 and 'sadness': 0.01. The dominant emotion is **joy**."
        );
    }

    #[test]
    fn scores_are_rendered_verbatim() {
        let scores = EmotionScores::new(0.006274985, 0.0025598293, 0.009251528, 0.9680386, 0.049744144);
        let response = format_response(&scores);
        assert!(response.contains("'anger': 0.006274985"));
        assert!(response.contains("'disgust': 0.0025598293"));
        assert!(response.contains("'fear': 0.009251528"));
        assert!(response.contains("'joy': 0.9680386"));
        assert!(response.contains("'sadness': 0.049744144"));
    }

    #[test]
    fn whole_numbers_keep_decimal_point() {
        let scores = EmotionScores::new(1.0, 0.0, 0.0, 0.0, 0.0);
        let response = format_response(&scores);
        assert!(response.contains("'anger': 1.0"));
        assert!(response.contains("'disgust': 0.0"));
        assert!(response.ends_with("The dominant emotion is **anger**."));
    }

    #[test]
    fn invalid_scores_give_retry_message() {
        assert_eq!(format_response(&EmotionScores::invalid()), "Invalid text! Please try again");
    }

    #[test]
    fn partial_nulls_render_as_none() {
        let scores = EmotionScores {
            fear: None,
            ..EmotionScores::new(0.2, 0.1, 0.1, 0.1, 0.1)
        };
        let response = format_response(&scores);
        assert!(response.contains("'fear': None"));
        assert!(response.contains("**anger**"));
    }
}
