use anyhow::Result;
use async_trait::async_trait;

/// Inline binary payload attached to a multimodal request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64 payload, without the data-URI prefix
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPart {
    Text(String),
    Image(InlineImage),
}

/// Provider-neutral generation request: ordered parts plus output hints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationRequest {
    pub parts: Vec<RequestPart>,
    /// Ask the provider for `application/json` output where supported
    pub json_output: bool,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            parts: vec![RequestPart::Text(prompt.into())],
            json_output: false,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(RequestPart::Text(text.into()));
        self
    }

    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.parts.push(RequestPart::Image(image));
        self
    }

    pub fn json(mut self) -> Self {
        self.json_output = true;
        self
    }

    pub fn has_image(&self) -> bool {
        self.parts
            .iter()
            .any(|p| matches!(p, RequestPart::Image(_)))
    }

    /// All text parts joined by blank lines, for providers without multipart input.
    pub fn joined_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                RequestPart::Text(t) => Some(t.as_str()),
                RequestPart::Image(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &GenerationRequest) -> Result<String>;

    fn model(&self) -> &str;

    /// Whether the client can carry image parts.
    fn supports_images(&self) -> bool {
        true
    }
}

/// Canned provider for `--dry-run`. Responses are chosen from the prompt text.
pub struct MockLlmClient {
    model: String,
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            model: "mock".to_string(),
        }
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: &GenerationRequest) -> Result<String> {
        let prompt = request.joined_text();

        if prompt.contains("You are a system architect") {
            // Magic fill
            Ok(r#"```json
{
  "projectName": "PetPal",
  "projectSummary": "Booking platform connecting pet owners with local sitters",
  "entities": [
    {"id": "user", "name": "User", "children": [
      {"id": "profile", "name": "Profile", "children": []},
      {"id": "pet", "name": "Pet", "children": []}
    ]},
    {"id": "booking", "name": "Booking", "children": []}
  ],
  "relationships": ["User has many Pets", "Booking belongs to User"],
  "flows": ["Login -> Dashboard", "Search Sitters -> Book -> Pay"]
}
```"#
            .to_string())
        } else if prompt.contains("expert design system engineer") {
            // Style extraction
            Ok(r##"{
  "colors": {
    "primary": "#6d28d9",
    "primarySoft": "#ede9fe",
    "background": "#0b0b0f",
    "surface": "#16161d",
    "border": "#27272a",
    "text": "#fafafa",
    "mutedText": "#a1a1aa"
  },
  "typography": {
    "fontFamilyBase": "Inter, sans-serif",
    "fontFamilyHeading": "Space Grotesk, sans-serif",
    "scale": {
      "h1": {"size": "40px", "weight": 700, "lineHeight": 1.1},
      "body": {"size": "16px", "weight": 400, "lineHeight": 1.5}
    }
  },
  "spacingScale": [4, 8, 12, 16, 24, 32],
  "radius": {"button": "9999px", "card": "16px"},
  "components": [
    {"name": "Button", "variants": ["primary", "ghost"], "description": "Pill with bold label", "usage": "Primary CTAs"},
    {"name": "Card", "description": "Dark surface with subtle border"}
  ],
  "principles": ["dark monochrome base with a violet accent"]
}"##
            .to_string())
        } else if prompt.contains("expert UI engineer") {
            // Component synthesis
            Ok(r#"{"code": "<button type=\"button\" class=\"rounded-full bg-violet-700 px-4 py-2 font-bold text-white hover:bg-violet-600 focus:outline-none focus:ring-2 active:scale-95\" aria-label=\"Primary action\">Continue</button>"}"#
                .to_string())
        } else if prompt.contains("expert curriculum designer") {
            // Course generation
            Ok(r#"{
  "title": "Rust Ownership Fundamentals",
  "short_summary": "Learn how ownership and borrowing keep Rust memory safe",
  "difficulty": "basic",
  "estimated_total_minutes": 45,
  "modules": [
    {
      "title": "Ownership",
      "summary": "Moves, copies and drops",
      "lessons": [
        {
          "title": "Moves",
          "objective": "Explain what happens when a value is moved",
          "key_points": ["Each value has one owner", "Assignment moves non-Copy values"],
          "estimated_minutes": 15,
          "practice_task": "Write a function that takes ownership of a String",
          "quiz_question": "What happens to the source binding after a move?"
        }
      ]
    }
  ]
}"#
            .to_string())
        } else {
            Ok(r#"{"status": "mock"}"#.to_string())
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}
