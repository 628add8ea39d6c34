use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Represents a Generative Language API model identifier.
///
/// This can be a predefined model version or a custom string value
/// for models that may be added in the future. Serializes as the model's
/// wire name (e.g. `"gemini-2.5-flash"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// Known model versions
    Known(KnownModel),

    /// Custom model identifier (for future models or preview models)
    Custom(String),
}

/// Known Generative Language API model versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownModel {
    /// Gemini 2.5 Flash
    Gemini25Flash,

    /// Gemini 2.5 Pro
    Gemini25Pro,

    /// Gemini 2.5 Flash-Lite
    Gemini25FlashLite,

    /// Gemini 2.0 Flash
    Gemini20Flash,

    /// Gemini 2.0 Flash-Lite
    Gemini20FlashLite,

    /// Gemini 1.5 Flash
    Gemini15Flash,

    /// Gemini 1.5 Pro
    Gemini15Pro,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Known(known_model) => write!(f, "{}", known_model),
            Model::Custom(custom) => write!(f, "{}", custom),
        }
    }
}

impl fmt::Display for KnownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnownModel::Gemini25Flash => write!(f, "gemini-2.5-flash"),
            KnownModel::Gemini25Pro => write!(f, "gemini-2.5-pro"),
            KnownModel::Gemini25FlashLite => write!(f, "gemini-2.5-flash-lite"),
            KnownModel::Gemini20Flash => write!(f, "gemini-2.0-flash"),
            KnownModel::Gemini20FlashLite => write!(f, "gemini-2.0-flash-lite"),
            KnownModel::Gemini15Flash => write!(f, "gemini-1.5-flash"),
            KnownModel::Gemini15Pro => write!(f, "gemini-1.5-pro"),
        }
    }
}

impl FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let known = match s {
            "gemini-2.5-flash" => KnownModel::Gemini25Flash,
            "gemini-2.5-pro" => KnownModel::Gemini25Pro,
            "gemini-2.5-flash-lite" => KnownModel::Gemini25FlashLite,
            "gemini-2.0-flash" => KnownModel::Gemini20Flash,
            "gemini-2.0-flash-lite" => KnownModel::Gemini20FlashLite,
            "gemini-1.5-flash" => KnownModel::Gemini15Flash,
            "gemini-1.5-pro" => KnownModel::Gemini15Pro,
            _ => return Err(format!("unknown model: {s}")),
        };
        Ok(Model::Known(known))
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(name.parse().unwrap_or(Model::Custom(name)))
    }
}

impl From<KnownModel> for Model {
    fn from(model: KnownModel) -> Self {
        Model::Known(model)
    }
}

impl From<String> for Model {
    fn from(model: String) -> Self {
        Model::Custom(model)
    }
}

impl From<&str> for Model {
    fn from(model: &str) -> Self {
        Model::Custom(model.to_string())
    }
}
