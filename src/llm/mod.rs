pub mod broker;
pub mod gateway;
pub mod gateways;
pub mod models;

pub use broker::AnalysisBroker;
pub use gateway::LlmGateway;
pub use models::{ContentPart, ImagePart};
