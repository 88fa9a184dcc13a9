//! Request and response bodies
//!
//! Field names follow the JSON contract (`correctedText`, `changesSummary`,
//! ...). Tone, style and mode arrive as free-form strings and are parsed
//! leniently: unknown values fall back to the neutral profile.

use serde::{Deserialize, Serialize};
use typepolish_engine::summary::NO_TEXT;
use typepolish_engine::{CorrectionMode, Report, Style, Tone};

/// Body of `POST /correct`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectRequest {
    /// Text to correct
    pub text: String,
    /// `grammar`, `professional` or `casual`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl CorrectRequest {
    /// Request with the default mode
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: None,
        }
    }

    /// Correction mode, defaulting to grammar
    pub fn mode(&self) -> CorrectionMode {
        self.mode
            .as_deref()
            .map(CorrectionMode::parse)
            .unwrap_or_default()
    }
}

/// Body of `POST /polish-ai`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolishRequest {
    /// Text to polish
    pub text: String,
    /// Tone label, `friendly` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    /// Style label, `neutral` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl PolishRequest {
    /// Request with default tone and style
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: None,
            style: None,
        }
    }

    /// Requested tone; absent or blank means friendly, unknown means neutral
    pub fn tone(&self) -> Tone {
        self.tone
            .as_deref()
            .filter(|tone| !tone.trim().is_empty())
            .map_or(Tone::Friendly, Tone::parse)
    }

    /// Requested style; absent or unknown means neutral
    pub fn style(&self) -> Style {
        self.style.as_deref().map(Style::parse).unwrap_or_default()
    }
}

/// Body of `POST /rewrite-tone`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteToneRequest {
    /// Text to rewrite
    pub text: String,
    /// Tone label
    pub tone: String,
}

impl RewriteToneRequest {
    /// Requested tone; unknown means neutral
    pub fn tone(&self) -> Tone {
        Tone::parse(&self.tone)
    }
}

/// Response body shared by the three rewriting routes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteResponse {
    /// Best-effort corrected text
    pub corrected_text: String,
    /// What was done, including whether degraded mode was used
    pub changes_summary: String,
    /// Tone key, only for `/polish-ai`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_tone: Option<String>,
    /// Style key, only for `/polish-ai`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_style: Option<String>,
}

impl RewriteResponse {
    /// Response for empty or whitespace-only input
    pub fn no_text() -> Self {
        Self {
            corrected_text: String::new(),
            changes_summary: NO_TEXT.to_string(),
            applied_tone: None,
            applied_style: None,
        }
    }

    /// Drop the applied tone and style
    pub fn without_applied(mut self) -> Self {
        self.applied_tone = None;
        self.applied_style = None;
        self
    }
}

impl From<Report> for RewriteResponse {
    fn from(report: Report) -> Self {
        Self {
            corrected_text: report.text,
            changes_summary: report.summary,
            applied_tone: report.applied_tone.map(|t| t.as_str().to_string()),
            applied_style: report.applied_style.map(|s| s.as_str().to_string()),
        }
    }
}

/// Body of `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Liveness message
    pub message: String,
}
