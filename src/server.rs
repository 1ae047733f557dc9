//! Single-page HTTP surface.
//!
//! * `GET /` renders the empty form.
//! * `POST /generate` runs one "Generate Guide" action and renders the result.
//! * `GET /health` reports liveness.

use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::commands::GuideService;
use crate::config::{Config, ConfigError, CredentialWarning};
use crate::llm::LLMError;
use crate::preprocessing::Selections;
use crate::render::{render_page, Banner, PageModel};
use crate::speech::SpeechError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Text generation client error: {0}")]
    Llm(#[from] LLMError),
    #[error("Speech client error: {0}")]
    Speech(#[from] SpeechError),
    #[error("Invalid bind address {addr}: {source}")]
    InvalidBindAddr {
        addr: String,
        source: std::net::AddrParseError,
    },
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone)]
pub struct AppState {
    pub service: GuideService,
    pub credential_warning: Option<CredentialWarning>,
}

impl AppState {
    pub fn new(service: GuideService, credential_warning: Option<CredentialWarning>) -> Self {
        Self {
            service,
            credential_warning,
        }
    }

    fn page(&self, selections: Selections) -> PageModel {
        let page = PageModel::new(selections);
        match &self.credential_warning {
            Some(warning) => page.with_banner(Banner::error(warning.to_string())),
            None => page,
        }
    }

    /// Runs the action and builds the page for its result. Rejected
    /// selections become a warning banner above the form.
    pub async fn generate_page(&self, selections: Selections) -> PageModel {
        let page = self.page(selections.clone());
        match self.service.generate_guide(&selections).await {
            Ok(outcome) => page.with_guide(outcome),
            Err(e) => {
                warn!(error = %e, "Guide request rejected");
                page.with_banner(Banner::warning(e.to_string()))
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.page(Selections::default())))
}

async fn generate(
    State(state): State<AppState>,
    Form(selections): Form<Selections>,
) -> Html<String> {
    Html(render_page(&state.generate_page(selections).await))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Binds and serves until the process is stopped.
pub async fn serve(config: &Config, bind: Option<&str>) -> Result<(), ServerError> {
    let addr_text = bind.unwrap_or(config.bind_addr.as_str());
    let addr: SocketAddr = addr_text
        .parse()
        .map_err(|source| ServerError::InvalidBindAddr {
            addr: addr_text.to_string(),
            source,
        })?;

    let state = AppState::new(GuideService::from_config(config)?, config.credential_warning());
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "AI Local Guide listening");
    axum::serve(listener, app).await?;
    Ok(())
}
