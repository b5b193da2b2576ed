//! HTTP API server.

use crate::api::{self, API_PREFIX};
use crate::cli::Output;
use crate::config::Settings;
use crate::service::TranscriptService;
use anyhow::Result;
use std::sync::Arc;

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> Result<()> {
    let service = Arc::new(TranscriptService::from_settings(&settings)?);
    let addr = format!("{}:{}", host, port);

    Output::header(&settings.general.app_name);
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", &format!("GET  {}", API_PREFIX));
    Output::kv("Upload", &format!("POST {}/upload", API_PREFIX));
    Output::kv("Ask", &format!("POST {}/ask-question", API_PREFIX));
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    api::serve(service, &settings.general.allowed_hosts, &addr).await?;

    Ok(())
}
