//! Instructions sent to the text model and parsing of its reply into concept prompts.

use brain::{ChatConfig, ChatMessage, ChatRequest};
use models::BrandData;
use once_cell::sync::Lazy;
use regex::Regex;

/// Upper bound on concepts recovered by the numbered-list fallback.
pub const MAX_FALLBACK_PROMPTS: usize = 4;

pub const CONCEPT_TEMPERATURE: f32 = 0.8;
pub const CONCEPT_MAX_TOKENS: u32 = 1500;

static NUMBERED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.\s+").expect("numbered list marker regex"));

pub const SYSTEM_PROMPT: &str = "You are a professional logo designer and brand strategist. Generate 3-4 distinct, creative logo concept prompts based on the provided brand information. Each prompt should be detailed enough for an AI image generator to create a logo.

Guidelines for logo prompts:
- Be specific about visual style, layout, and composition
- Include typography recommendations when relevant
- Suggest appropriate symbols, icons, or abstract elements
- Consider the brand's tone and target audience
- Make each concept unique and distinct from the others
- Focus on creating prompts suitable for logo generation (clean, simple, scalable designs)
- Keep prompts concise but descriptive (2-3 sentences each)

Format your response as a JSON array of strings, where each string is a complete logo concept prompt.";

/// Brand summary for the user turn. Optional fields appear only when filled in.
pub fn user_prompt(brand: &BrandData) -> String {
    let mut lines = vec![
        format!("Brand Name: {}", brand.name),
        format!("Description: {}", brand.description),
    ];
    if !brand.industry.is_empty() {
        lines.push(format!("Industry: {}", brand.industry));
    }
    if !brand.target_audience.is_empty() {
        lines.push(format!("Target Audience: {}", brand.target_audience));
    }
    if brand.tone.is_set() {
        lines.push(format!("Brand Tone: {}", brand.tone));
    }
    if !brand.colors.is_empty() {
        lines.push(format!("Preferred Colors: {}", brand.colors.join(", ")));
    }
    lines.push(String::new());
    lines.push("Generate logo concept prompts for this brand.".to_string());
    lines.join("\n")
}

pub fn concept_request(brand: &BrandData, model: &str) -> ChatRequest {
    ChatRequest {
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(user_prompt(brand)),
        ],
        config: ChatConfig {
            model: model.to_string(),
            temperature: CONCEPT_TEMPERATURE,
            max_tokens: CONCEPT_MAX_TOKENS,
        },
    }
}

/// Reads the model reply as a JSON array of strings, falling back to splitting
/// a numbered list when the model ignored the requested format.
pub fn parse_prompts(reply: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(reply) {
        Ok(prompts) => prompts,
        Err(e) => {
            tracing::warn!("Failed to parse concept reply as JSON ({}), using fallback parsing", e);
            split_numbered_list(reply)
        }
    }
}

fn split_numbered_list(reply: &str) -> Vec<String> {
    NUMBERED_MARKER
        .split(reply)
        .map(str::trim)
        .filter(|prompt| !prompt.is_empty())
        .take(MAX_FALLBACK_PROMPTS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use brain::MessageRole;
    use models::Tone;

    use super::*;

    fn acme() -> BrandData {
        BrandData {
            name: "Acme".into(),
            description: "Rockets".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_user_prompt_minimal() {
        assert_eq!(
            user_prompt(&acme()),
            "Brand Name: Acme\nDescription: Rockets\n\nGenerate logo concept prompts for this brand."
        );
    }

    #[test]
    fn test_user_prompt_includes_optional_fields() {
        let brand = BrandData {
            industry: "Aerospace".into(),
            target_audience: "Engineers".into(),
            tone: Tone::Bold,
            colors: vec!["#3B82F6".into(), "#EF4444".into()],
            ..acme()
        };
        let prompt = user_prompt(&brand);

        assert!(prompt.contains("\nIndustry: Aerospace\n"));
        assert!(prompt.contains("\nTarget Audience: Engineers\n"));
        assert!(prompt.contains("\nBrand Tone: bold\n"));
        assert!(prompt.contains("\nPreferred Colors: #3B82F6, #EF4444\n"));
    }

    #[test]
    fn test_concept_request_settings() {
        let request = concept_request(&acme(), "gpt-4");
        assert_eq!(request.config.model, "gpt-4");
        assert_eq!(request.config.temperature, 0.8);
        assert_eq!(request.config.max_tokens, 1500);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert!(request.messages[0].content.contains("JSON array of strings"));
    }

    #[test]
    fn test_parse_json_array() {
        let prompts = parse_prompts(r#"["A bold rocket.", "A classic wordmark."]"#);
        assert_eq!(prompts, vec!["A bold rocket.", "A classic wordmark."]);
    }

    #[test]
    fn test_fallback_numbered_list() {
        let prompts = parse_prompts("1. A rocket mark. 2. A star badge. 3. A wordmark.");
        assert_eq!(prompts, vec!["A rocket mark.", "A star badge.", "A wordmark."]);
    }

    #[test]
    fn test_fallback_caps_at_four_and_drops_preamble_blanks() {
        let reply = "Here you go:\n1. One\n2. Two\n3. Three\n4. Four\n5. Five";
        let prompts = parse_prompts(reply);
        assert_eq!(prompts, vec!["Here you go:", "One", "Two", "Three"]);

        let prompts = parse_prompts("\n1. One\n\n2. Two\n");
        assert_eq!(prompts, vec!["One", "Two"]);
    }

    #[test]
    fn test_array_with_non_strings_uses_fallback() {
        let prompts = parse_prompts(r#"["1. A", 2]"#);
        assert_eq!(prompts, vec![r#"[""#, r#"A", 2]"#]);
    }
}
