//! Closed enumerations selecting tone, style and correction mode

use serde::{Deserialize, Serialize};

/// Emotional register applied by the tone stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Warm, friendly wording
    Friendly,
    /// Clear and professional wording
    Professional,
    /// Confident, self-assured wording
    Confident,
    /// Calm and composed wording
    Calm,
    /// Caring and supportive wording
    Caring,
    /// Persuasive and encouraging wording
    Persuasive,
    /// No tone change
    #[default]
    Neutral,
}

impl Tone {
    /// Every tone, in declaration order
    pub const ALL: [Tone; 7] = [
        Tone::Friendly,
        Tone::Professional,
        Tone::Confident,
        Tone::Calm,
        Tone::Caring,
        Tone::Persuasive,
        Tone::Neutral,
    ];

    /// Look up a tone by its exact lowercase key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tone| tone.as_str() == key)
    }

    /// Parse a user-supplied label, falling back to [`Tone::Neutral`]
    pub fn parse(label: &str) -> Self {
        Self::from_key(&label.trim().to_lowercase()).unwrap_or_default()
    }

    /// Lowercase key used in rule files and requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Friendly => "friendly",
            Tone::Professional => "professional",
            Tone::Confident => "confident",
            Tone::Calm => "calm",
            Tone::Caring => "caring",
            Tone::Persuasive => "persuasive",
            Tone::Neutral => "neutral",
        }
    }

    /// Capitalized label used in summaries
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Friendly => "Friendly",
            Tone::Professional => "Professional",
            Tone::Confident => "Confident",
            Tone::Calm => "Calm",
            Tone::Caring => "Caring",
            Tone::Persuasive => "Persuasive",
            Tone::Neutral => "Neutral",
        }
    }
}

/// Register/formality applied after the tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Normal everyday English
    #[default]
    Neutral,
    /// Simple English for a college student
    Student,
    /// Formal business email
    Corporate,
    /// IELTS-style academic English
    Ielts,
    /// Soft and gentle wording (`romantic` or `soft`)
    #[serde(alias = "soft")]
    Romantic,
}

impl Style {
    /// Every style, in declaration order
    pub const ALL: [Style; 5] = [
        Style::Neutral,
        Style::Student,
        Style::Corporate,
        Style::Ielts,
        Style::Romantic,
    ];

    /// Look up a style by key; `soft` is an alias of `romantic`
    pub fn from_key(key: &str) -> Option<Self> {
        if key == "soft" {
            return Some(Style::Romantic);
        }
        Self::ALL.into_iter().find(|style| style.as_str() == key)
    }

    /// Parse a user-supplied label, falling back to [`Style::Neutral`]
    pub fn parse(label: &str) -> Self {
        Self::from_key(&label.trim().to_lowercase()).unwrap_or_default()
    }

    /// Lowercase key used in rule files and requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Neutral => "neutral",
            Style::Student => "student",
            Style::Corporate => "corporate",
            Style::Ielts => "ielts",
            Style::Romantic => "romantic",
        }
    }

    /// Capitalized label used in summaries
    pub fn label(&self) -> &'static str {
        match self {
            Style::Neutral => "Neutral",
            Style::Student => "Student",
            Style::Corporate => "Corporate",
            Style::Ielts => "Ielts",
            Style::Romantic => "Romantic",
        }
    }
}

/// Light register adjustment applied by `/correct`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionMode {
    /// Grammar and spelling only
    #[default]
    Grammar,
    /// Expand slang and contractions
    Professional,
    /// Swap formal address for casual address
    Casual,
}

impl CorrectionMode {
    /// Every mode, in declaration order
    pub const ALL: [CorrectionMode; 3] = [
        CorrectionMode::Grammar,
        CorrectionMode::Professional,
        CorrectionMode::Casual,
    ];

    /// Look up a mode by its exact lowercase key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == key)
    }

    /// Parse a user-supplied label, falling back to [`CorrectionMode::Grammar`]
    pub fn parse(label: &str) -> Self {
        Self::from_key(&label.trim().to_lowercase()).unwrap_or_default()
    }

    /// Lowercase key used in rule files and requests
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrectionMode::Grammar => "grammar",
            CorrectionMode::Professional => "professional",
            CorrectionMode::Casual => "casual",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for CorrectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
