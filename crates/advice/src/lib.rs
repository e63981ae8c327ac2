//! Emotional Advice
//!
//! A fixed lookup table from the seven emotion labels to advice text,
//! kept apart from estimation so it can be swapped or localized.

use emotion_engine::Emotion;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

/// Advice table errors
#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("Unknown emotion label in advice overrides: {0}")]
    UnknownLabel(String),
    #[error("Empty advice text for {0}")]
    EmptyText(Emotion),
}

/// Per-label overrides and framing, as loaded from configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceConfig {
    /// Replacement advice keyed by emotion label (Spanish or English)
    pub overrides: HashMap<String, String>,
    /// Sentence template; `{emotion}` and `{advice}` are substituted
    pub template: Option<String>,
}

/// Advice text for every emotion
#[derive(Debug, Clone)]
pub struct AdviceTable {
    entries: [String; 7],
    template: String,
}

const DEFAULT_TEMPLATE: &str = "Basado en tus trazos, parece que te sientes {emotion}. {advice}";

impl Default for AdviceTable {
    fn default() -> Self {
        Self::spanish()
    }
}

impl AdviceTable {
    /// Built-in Spanish advice
    pub fn spanish() -> Self {
        let entries = Emotion::ALL.map(|emotion| default_advice(emotion).to_string());
        Self {
            entries,
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Built-in table with configured overrides applied
    pub fn from_config(config: &AdviceConfig) -> Result<Self, AdviceError> {
        let mut table = Self::spanish();

        for (label, text) in &config.overrides {
            let emotion =
                Emotion::from_label(label).ok_or_else(|| AdviceError::UnknownLabel(label.clone()))?;
            table.set(emotion, text.clone())?;
        }

        if let Some(template) = &config.template {
            table.template = template.clone();
        }

        info!("Advice table ready ({} overrides)", config.overrides.len());
        Ok(table)
    }

    /// Replace the advice for one emotion
    pub fn set(&mut self, emotion: Emotion, text: String) -> Result<(), AdviceError> {
        if text.trim().is_empty() {
            return Err(AdviceError::EmptyText(emotion));
        }
        self.entries[emotion.index()] = text;
        Ok(())
    }

    /// Get advice for an emotion
    pub fn get(&self, emotion: Emotion) -> &str {
        &self.entries[emotion.index()]
    }

    /// Full advice sentence for the dominant emotion
    pub fn compose(&self, emotion: Emotion) -> String {
        let sentence = self
            .template
            .replace("{emotion}", emotion.as_str())
            .replace("{advice}", self.get(emotion));
        debug!("Advice for {}: {}", emotion, sentence);
        sentence
    }
}

fn default_advice(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Enojo => {
            "Respira hondo y date un momento antes de reaccionar; mover el cuerpo o \
             escribir lo que sientes puede ayudarte a soltar la tensión."
        }
        Emotion::Asco => {
            "Aléjate un poco de lo que te incomoda y busca un espacio que te resulte \
             agradable y limpio."
        }
        Emotion::Miedo => {
            "Recuerda que estás a salvo; habla con alguien de confianza sobre lo que \
             te preocupa."
        }
        Emotion::Alegria => {
            "¡Qué bien! Comparte esa energía con las personas que quieres y guarda \
             este dibujo como recuerdo."
        }
        Emotion::Neutral => {
            "Tu dibujo transmite calma; aprovecha este equilibrio para probar algo \
             nuevo que te inspire."
        }
        Emotion::Tristeza => {
            "Está bien sentirse triste; busca compañía, cuéntale a alguien cómo te \
             sientes y date tiempo para descansar."
        }
        Emotion::Sorpresa => {
            "Algo te ha llamado la atención; tómate un momento para explorar esa \
             curiosidad con calma."
        }
    }
}
