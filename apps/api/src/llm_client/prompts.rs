// Shared prompt fragments. Each feature that calls the LLM keeps its own
// prompts.rs alongside it and builds on these.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Persona prefix for career-guidance prompts.
pub const CAREER_COUNSELOR_SYSTEM: &str = "You are a helpful, encouraging career counselor \
    for students and early-career professionals. You MUST respond with valid JSON only.";
