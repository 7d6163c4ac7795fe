pub mod gemini;

#[cfg(test)]
pub(crate) mod mock;

pub use gemini::{GeminiConfig, GeminiGateway};
