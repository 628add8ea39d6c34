//! Wire types for the Generative Language API.

mod content;
mod generate;
mod model;

pub use content::{Content, ContentRole, Part};
pub use generate::{Candidate, GenerateContentRequest, GenerateContentResponse, GenerationConfig};
pub use model::{KnownModel, Model};
