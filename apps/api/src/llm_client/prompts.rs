// Cross-cutting prompt fragments shared by every gateway call.
// Feature-specific prompts live next to the feature (see resume::prompts).

/// Appended to every system prompt that expects structured output.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY a valid JSON object. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
