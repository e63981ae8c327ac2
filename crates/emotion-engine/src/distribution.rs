//! Emotion distribution over the fixed label set

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::emotion::Emotion;

/// Non-negative weight per emotion, indexed in canonical order
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EmotionDistribution {
    weights: [f64; 7],
}

impl EmotionDistribution {
    /// Create a distribution from weights in [`Emotion::ALL`] order
    pub fn from_weights(weights: [f64; 7]) -> Self {
        Self { weights }
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        self.weights[emotion.index()]
    }

    pub fn set(&mut self, emotion: Emotion, weight: f64) {
        self.weights[emotion.index()] = weight;
    }

    pub fn weights(&self) -> &[f64; 7] {
        &self.weights
    }

    /// Iterate (label, weight) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        Emotion::ALL.iter().map(move |&e| (e, self.weights[e.index()]))
    }

    /// Sum of all weights
    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Divide every weight by the total; unchanged when the total is not positive
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total > 0.0 {
            Self {
                weights: self.weights.map(|w| w / total),
            }
        } else {
            *self
        }
    }

    /// Label with the maximum weight; the first maximum in canonical order wins
    pub fn dominant(&self) -> Emotion {
        let mut best = Emotion::ALL[0];
        let mut best_weight = self.weights[0];
        for &emotion in Emotion::ALL.iter().skip(1) {
            let weight = self.weights[emotion.index()];
            if weight > best_weight {
                best = emotion;
                best_weight = weight;
            }
        }
        best
    }
}

impl Serialize for EmotionDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.weights.len()))?;
        for (emotion, weight) in self.iter() {
            map.serialize_entry(emotion.as_str(), &weight)?;
        }
        map.end()
    }
}
