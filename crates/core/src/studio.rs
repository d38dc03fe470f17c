//! Studio domain types.
//!
//! These are the value objects that flow through the whole workflow:
//! the user fills an [`InputSnapshot`], picks a [`Mode`], the provider
//! produces text that becomes the current [`GenerationResult`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// The tones offered by the input form. Free text is accepted too.
pub const TONES: [&str; 8] = [
    "Divertido",
    "Educacional",
    "Inspirador",
    "Polêmico",
    "Casual",
    "Profissional",
    "Sarcástico",
    "Urgente",
];

/// Title shown while the first request of a session is in flight.
pub const GENERATING_TITLE: &str = "Gerando...";

/// Title shown when a generation fails.
pub const ERROR_TITLE: &str = "Erro";

/// The only text a user ever sees for a failed generation.
pub const ERROR_MESSAGE: &str =
    "Ocorreu um erro ao gerar o conteúdo. Por favor, verifique sua API Key e tente novamente.";

/// A content-generation target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Attention-grabbing openers, numbered list
    #[default]
    Hooks,
    /// Full 30–60s video script
    Scripts,
    /// SEO captions
    Captions,
    /// Hashtag groups
    Hashtags,
    /// Seven-day content plan
    Planner,
}

impl Mode {
    /// Every mode, in tab order.
    pub const ALL: [Mode; 5] = [
        Mode::Hooks,
        Mode::Scripts,
        Mode::Captions,
        Mode::Hashtags,
        Mode::Planner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Hooks => "hooks",
            Mode::Scripts => "scripts",
            Mode::Captions => "captions",
            Mode::Hashtags => "hashtags",
            Mode::Planner => "planner",
        }
    }

    /// Title attached to results (and history entries) of this mode.
    pub fn title(&self) -> &'static str {
        match self {
            Mode::Hooks => "Ideias de Ganchos",
            Mode::Scripts => "Roteiro Completo",
            Mode::Captions => "Legendas & SEO",
            Mode::Hashtags => "Sugestões de Hashtags",
            Mode::Planner => "Planejamento Semanal",
        }
    }

    /// Tab label.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Hooks => "Hooks",
            Mode::Scripts => "Roteiros",
            Mode::Captions => "Legendas",
            Mode::Hashtags => "Hashtags",
            Mode::Planner => "Planejador",
        }
    }

    /// One-line explanation of what the mode produces.
    pub fn description(&self) -> &'static str {
        match self {
            Mode::Hooks => "Gere ganchos que prendam a atenção nos primeiros segundos.",
            Mode::Scripts => "Crie um roteiro passo-a-passo para seu vídeo.",
            Mode::Captions => "Legendas engajadoras otimizadas para SEO.",
            Mode::Hashtags => "Encontre as tags perfeitas para viralizar.",
            Mode::Planner => "Organize sua semana de conteúdo.",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown mode '{s}' (expected one of: hooks, scripts, captions, hashtags, planner)"
                )
            })
    }
}

/// The live form contents. One instance per session, shared by every mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSnapshot {
    /// Theme or niche of the content
    pub topic: String,

    /// Target audience
    pub audience: String,

    /// Voice; normally one of [`TONES`]
    pub tone: String,

    /// Extra context, including anything carried over from other modes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl InputSnapshot {
    pub fn new(topic: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            audience: audience.into(),
            ..Self::default()
        }
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    pub fn with_additional_info(mut self, info: impl Into<String>) -> Self {
        self.additional_info = Some(info.into());
        self
    }

    /// Additional info, if any non-blank text is present.
    pub fn extra_context(&self) -> Option<&str> {
        self.additional_info
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    /// Topic and audience are required before a request may be issued.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.topic.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "topic" });
        }
        if self.audience.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "audience" });
        }
        Ok(())
    }

    /// Append a block of context to `additional_info`, never replacing it.
    pub fn append_context(&mut self, block: &str) {
        self.additional_info
            .get_or_insert_with(String::new)
            .push_str(block);
    }
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            topic: String::new(),
            audience: String::new(),
            tone: TONES[0].to_string(),
            additional_info: None,
        }
    }
}

/// Lifecycle of the result currently on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    #[default]
    Idle,
    Generating,
    Done,
    Error,
}

/// What is currently shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub content: String,
    pub status: ResultStatus,
    pub title: String,
}

impl GenerationResult {
    /// Interim result published while the first request is in flight.
    pub fn placeholder() -> Self {
        Self {
            content: String::new(),
            status: ResultStatus::Generating,
            title: GENERATING_TITLE.into(),
        }
    }

    pub fn done(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            status: ResultStatus::Done,
            title: title.into(),
        }
    }

    /// The fixed user-facing failure result.
    pub fn failed() -> Self {
        Self {
            content: ERROR_MESSAGE.into(),
            status: ResultStatus::Error,
            title: ERROR_TITLE.into(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == ResultStatus::Done
    }
}

/// One numbered entry recognised inside a hooks result.
///
/// Derived on demand from the live result; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedItem {
    /// Zero-based position in the list
    pub position: usize,

    /// The entry text, marker included, trimmed
    pub text: String,
}

impl ParsedItem {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for ParsedItem {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl PartialEq<&str> for ParsedItem {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}
