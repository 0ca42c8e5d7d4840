use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============= Research Types =============

/// A candidate source returned by a retriever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
}

impl Source {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// One summarized and scored source, handed to citation formatters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindingRecord {
    pub title: String,
    pub summary: String,
    /// Credibility score in [0, 1].
    pub confidence: f64,
    pub url: String,
}

/// The handoff payload for report renderers. Built once per research run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRecord {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub findings: Vec<String>,
    pub references: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Pipeline stage at which a source or chunk failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Retrieve,
    Extract,
    Summarize,
    Embed,
    Triplets,
    Memory,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Retrieve => "retrieve",
            Stage::Extract => "extract",
            Stage::Summarize => "summarize",
            Stage::Embed => "embed",
            Stage::Triplets => "triplets",
            Stage::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// A recovered failure recorded during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFailure {
    pub sub_query: String,
    /// Empty when the failure happened before any source was known (retrieval).
    pub url: String,
    pub stage: Stage,
    pub message: String,
}

/// Everything one end-to-end research run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchRun {
    pub id: Uuid,
    pub query: String,
    pub sub_queries: Vec<String>,
    pub findings: Vec<FindingRecord>,
    pub synthesis: SynthesisRecord,
    pub failures: Vec<SourceFailure>,
    pub duration_ms: u64,
}

// ============= Knowledge Graph Types =============

/// A (head, relation, tail) fact extracted from text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triplet {
    pub head: String,
    pub relation: String,
    pub tail: String,
}

impl Triplet {
    pub fn new(
        head: impl Into<String>,
        relation: impl Into<String>,
        tail: impl Into<String>,
    ) -> Self {
        Self {
            head: head.into(),
            relation: relation.into(),
            tail: tail.into(),
        }
    }
}

impl<H, R, T> From<(H, R, T)> for Triplet
where
    H: Into<String>,
    R: Into<String>,
    T: Into<String>,
{
    fn from((head, relation, tail): (H, R, T)) -> Self {
        Self::new(head, relation, tail)
    }
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Memory store error: {0}")]
    Store(#[from] delve_vector::Error),

    #[error("{capability} failed: {message}")]
    ExternalCall {
        capability: &'static str,
        message: String,
    },

    #[error("{capability} timed out after {seconds}s")]
    Timeout {
        capability: &'static str,
        seconds: u64,
    },

    #[error("Malformed triplet: {0}")]
    MalformedTriplet(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn external(capability: &'static str, message: impl std::fmt::Display) -> Self {
        AppError::ExternalCall {
            capability,
            message: message.to_string(),
        }
    }

    /// Whether the error came from an external collaborator (recoverable per source).
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            AppError::ExternalCall { .. } | AppError::Timeout { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
