//! Emotion labels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::EmotionError;

/// The closed set of emotion buckets, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Emotion {
    /// Anger
    #[serde(rename = "enojo")]
    Enojo,
    /// Disgust
    #[serde(rename = "asco")]
    Asco,
    /// Fear
    #[serde(rename = "miedo")]
    Miedo,
    /// Joy
    #[serde(rename = "alegría", alias = "alegria")]
    Alegria,
    #[serde(rename = "neutral")]
    Neutral,
    /// Sadness
    #[serde(rename = "tristeza")]
    Tristeza,
    /// Surprise
    #[serde(rename = "sorpresa")]
    Sorpresa,
}

impl Emotion {
    /// Canonical enumeration order; also the dominant-label tie-break order
    pub const ALL: [Emotion; 7] = [
        Emotion::Enojo,
        Emotion::Asco,
        Emotion::Miedo,
        Emotion::Alegria,
        Emotion::Neutral,
        Emotion::Tristeza,
        Emotion::Sorpresa,
    ];

    /// Position in [`Emotion::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Enojo => "enojo",
            Emotion::Asco => "asco",
            Emotion::Miedo => "miedo",
            Emotion::Alegria => "alegría",
            Emotion::Neutral => "neutral",
            Emotion::Tristeza => "tristeza",
            Emotion::Sorpresa => "sorpresa",
        }
    }

    /// English name, as emitted by most pretrained classifiers
    pub fn english(&self) -> &'static str {
        match self {
            Emotion::Enojo => "anger",
            Emotion::Asco => "disgust",
            Emotion::Miedo => "fear",
            Emotion::Alegria => "joy",
            Emotion::Neutral => "neutral",
            Emotion::Tristeza => "sadness",
            Emotion::Sorpresa => "surprise",
        }
    }

    /// Resolve a Spanish or English label, case-insensitively
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        if let Some(emotion) = Self::ALL
            .into_iter()
            .find(|e| e.as_str() == label || e.english() == label)
        {
            return Some(emotion);
        }

        // Adjective forms and unaccented spelling
        let emotion = match label.as_str() {
            "angry" => Emotion::Enojo,
            "disgusted" => Emotion::Asco,
            "fearful" | "scared" => Emotion::Miedo,
            "alegria" | "happy" | "happiness" => Emotion::Alegria,
            "sad" => Emotion::Tristeza,
            "surprised" => Emotion::Sorpresa,
            _ => return None,
        };
        Some(emotion)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = EmotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::from_label(s).ok_or_else(|| EmotionError::UnknownLabel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let names: Vec<&str> = Emotion::ALL.iter().map(|e| e.as_str()).collect();
        assert_eq!(
            names,
            vec!["enojo", "asco", "miedo", "alegría", "neutral", "tristeza", "sorpresa"]
        );
        for (i, emotion) in Emotion::ALL.iter().enumerate() {
            assert_eq!(emotion.index(), i);
        }
    }

    #[test]
    fn test_label_resolution() {
        assert_eq!(Emotion::from_label("Anger"), Some(Emotion::Enojo));
        assert_eq!(Emotion::from_label("alegria"), Some(Emotion::Alegria));
        assert_eq!(Emotion::from_label(" happy "), Some(Emotion::Alegria));
        assert_eq!(Emotion::from_label("TRISTEZA"), Some(Emotion::Tristeza));
        assert_eq!(Emotion::from_label("contempt"), None);
        assert!("contempt".parse::<Emotion>().is_err());
    }

    #[test]
    fn test_english_names_resolve() {
        for emotion in Emotion::ALL {
            assert_eq!(Emotion::from_label(emotion.english()), Some(emotion));
            assert_eq!(Emotion::from_label(emotion.as_str()), Some(emotion));
        }
        assert_eq!(Emotion::Miedo.english(), "fear");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Emotion::Alegria).unwrap();
        assert_eq!(json, "\"alegría\"");
        let parsed: Emotion = serde_json::from_str("\"alegria\"").unwrap();
        assert_eq!(parsed, Emotion::Alegria);
    }
}
