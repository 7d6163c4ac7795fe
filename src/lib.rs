pub mod config;
pub mod error;
pub mod image;
pub mod llm;
pub mod prompt;
pub mod web;

pub use error::{ChemistError, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::{load_dotenv, ApiKey, AppConfig};
    pub use crate::error::{ChemistError, Result};
    pub use crate::image::{input_image_setup, UploadedFile};
    pub use crate::llm::gateways::{GeminiConfig, GeminiGateway};
    pub use crate::llm::{AnalysisBroker, ContentPart, ImagePart, LlmGateway};
    pub use crate::web::{create_app, AppState};
}
