pub mod commands;
pub mod config;
pub mod llm;
pub mod logging;
pub mod narration;
pub mod postprocessing;
pub mod preprocessing;
pub mod render;
pub mod server;
pub mod speech;

pub use commands::{GuideOutcome, GuideService};
pub use config::Config;
pub use server::{router, serve, AppState, ServerError};
