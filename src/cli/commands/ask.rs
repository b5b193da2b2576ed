//! Ask command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::service::TranscriptService;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(question: &str, settings: Settings) -> Result<()> {
    let service = TranscriptService::from_settings(&settings)?;

    let spinner = Output::spinner("Searching transcripts...");
    let response = service.ask_question(question).await;
    spinner.finish_and_clear();

    if response.success {
        println!("\n{}\n", response.data);
        Ok(())
    } else {
        Output::status_line(response.status, response.success, &response.message);
        Output::info("Run with -v for details.");
        anyhow::bail!("failed to generate an answer")
    }
}
