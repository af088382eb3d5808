use serde::{Deserialize, Serialize};

/// One detected intention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intention {
    /// Label; humanized once the analysis is built
    pub intention: String,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
}

/// Result of analyzing one post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub intentions: Vec<Intention>,
    pub reason: String,
    #[serde(rename = "isAIGenerated")]
    pub is_ai_generated: bool,
    /// Provider that produced the analysis, as configured
    #[serde(default)]
    pub provider: String,
}

/// Inbound analysis request
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Reply to an [`AnalyzeRequest`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalyzeReply {
    Results { results: Analysis },
    Error { error: String },
}
