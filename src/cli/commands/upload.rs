//! Upload command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::service::TranscriptService;
use anyhow::Result;

/// Fetch and index a single video, reporting the API outcome.
pub async fn run_upload(video: &str, settings: Settings) -> Result<()> {
    let service = TranscriptService::from_settings(&settings)?;

    let spinner = Output::spinner(&format!("Uploading transcript for {}...", video));
    let response = service.upload_transcript(video).await;
    spinner.finish_and_clear();

    Output::status_line(response.status, response.success, &response.message);

    if response.success {
        Output::kv("Chunks stored", &service.document_count().await?.to_string());
        Ok(())
    } else {
        anyhow::bail!("upload of {} failed", video)
    }
}
