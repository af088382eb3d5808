use serde_json::json;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// Default instructions sent ahead of every post
pub const SYSTEM_PROMPT: &str = "You are an AI assistant that analyzes LinkedIn posts to identify user intentions, \
returning results according to the provided schema. Output an array of intentions (e.g., professionalUpdates, \
networking, etc.) with confidence scores (0 to 1), also indicate if the post is AI-generated, and a reason for the \
analysis";

/// Intention labels the model may choose from
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum IntentTag {
    ProfessionalUpdates,
    Networking,
    IndustryInsights,
    SelfPromotion,
    JobSearching,
    ThoughtLeadership,
    CompanyPromotion,
    SeekingAdvice,
    EventPromotion,
    PersonalBranding,
    Engagement,
    Mentorship,
    Recruitment,
    EducationalContent,
    CommunityBuilding,
}

/// Structured-output schema for an analysis
pub fn intent_schema() -> serde_json::Value {
    let tags: Vec<String> = IntentTag::iter().map(|tag| tag.as_ref().to_owned()).collect();

    json!({
        "type": "object",
        "properties": {
            "intentions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "intention": {"type": "string", "enum": tags},
                        "confidence": {"type": "number", "minimum": 0, "maximum": 1}
                    },
                    "required": ["intention", "confidence"]
                },
                "minItems": 1
            },
            "isAIGenerated": {"type": "boolean"},
            "reason": {"type": "string"}
        },
        "required": ["intentions", "isAIGenerated", "reason"]
    })
}
