use serde::{Deserialize, Serialize};

/// The producer of a piece of content in a request or response.
///
/// The Generative Language API names the assistant side "model".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRole {
    /// Content authored by the end user.
    User,

    /// Content produced by the model.
    Model,
}

/// A single typed part of a content block.
///
/// The API defines parts as a union of several payload kinds; this client
/// only exchanges text, so every other kind deserializes to a part with no
/// text and is skipped by accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Text payload of this part, if it is a text part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// An ordered collection of parts attributed to one producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Who produced this content. Optional on the wire; the API tolerates
    /// its absence for system instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ContentRole>,

    /// The parts making up this content block.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Creates user content from a single text string.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some(ContentRole::User),
            parts: vec![Part::text(text)],
        }
    }

    /// Creates model content from a single text string.
    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: Some(ContentRole::Model),
            parts: vec![Part::text(text)],
        }
    }

    /// Creates role-less content, as used for system instructions.
    pub fn system_text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }

    /// Returns the first non-empty text part, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .find(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_content_serialization() {
        let content = Content::user_text("hello");
        let json = serde_json::to_string(&content).unwrap();
        assert_eq!(json, r#"{"role":"user","parts":[{"text":"hello"}]}"#);
    }

    #[test]
    fn system_content_omits_role() {
        let content = Content::system_text("be nice");
        let json = serde_json::to_string(&content).unwrap();
        assert_eq!(json, r#"{"parts":[{"text":"be nice"}]}"#);
    }

    #[test]
    fn first_text_skips_empty_and_textless_parts() {
        let content = Content {
            role: Some(ContentRole::Model),
            parts: vec![
                Part { text: None },
                Part::text(""),
                Part::text("finally"),
            ],
        };
        assert_eq!(content.first_text(), Some("finally"));
    }

    #[test]
    fn first_text_empty_content() {
        let content = Content {
            role: Some(ContentRole::Model),
            parts: Vec::new(),
        };
        assert_eq!(content.first_text(), None);
    }
}
