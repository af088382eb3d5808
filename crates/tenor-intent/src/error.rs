use thiserror::Error;
use tenor_llm::GatewayError;

/// Errors raised while analyzing a post
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The chat call failed
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The model reply is not a valid analysis
    #[error("invalid analysis in model reply: {0}")]
    InvalidAnalysis(#[source] serde_json::Error),
}
