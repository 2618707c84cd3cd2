mod cli;
mod core;
mod error;
mod session;
mod tui;

use crate::cli::{Cli, Commands};
use crate::core::{AnswerService, TranscriptService, extract_video_id, video::VideoId};
use crate::error::{Error, Result};
use crate::tui::{App, EventHandler, init as tui_init, restore as tui_restore, ui};
use clap::Parser;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Ask {
            url,
            question,
            model,
            json,
        }) => {
            run_cli_ask(url, question, model, json).await?;
        }
        Some(Commands::Summarize { url, model, json }) => {
            run_cli_summarize(url, model, json).await?;
        }
        Some(Commands::Tui) | None => {
            run_tui().await?;
        }
    }

    Ok(())
}

/// Parse the URL and fetch the transcript, printing progress unless the
/// caller wants machine-readable output.
async fn load_transcript(url: &str, quiet: bool) -> Result<(VideoId, String)> {
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::EmptyUrl);
    }
    let video_id = extract_video_id(url).ok_or(Error::InvalidUrl)?;

    if !quiet {
        println!("Video: {video_id}");
        println!("Preview: {}", video_id.thumbnail_url());
        println!("Fetching transcript...");
    }

    let transcript_service = TranscriptService::new()?;
    let transcript = transcript_service.fetch(&video_id).await?;

    if !quiet {
        println!(
            "Transcript loaded ({} words)",
            transcript.split_whitespace().count()
        );
    }

    Ok((video_id, transcript))
}

async fn run_cli_ask(
    url: String,
    question: String,
    model: Option<String>,
    json: bool,
) -> Result<()> {
    let (video_id, transcript) = load_transcript(&url, json).await?;

    let answer_service = AnswerService::with_model(model);
    if !json {
        println!("Asking {}...", answer_service.model());
    }

    let answer = answer_service.ask(&transcript, &question).await?;

    if json {
        let payload = serde_json::json!({
            "video_id": video_id,
            "question": question,
            "answer": answer,
        });
        let rendered = serde_json::to_string_pretty(&payload)
            .map_err(|e| Error::custom(format!("Failed to encode output: {e}")))?;
        println!("{rendered}");
    } else {
        println!();
        println!("{answer}");
    }

    Ok(())
}

async fn run_cli_summarize(url: String, model: Option<String>, json: bool) -> Result<()> {
    let (video_id, transcript) = load_transcript(&url, json).await?;

    let answer_service = AnswerService::with_model(model);
    if !json {
        println!("Summarizing with {}...", answer_service.model());
    }

    let summary = answer_service.summarize(&transcript).await?;

    if json {
        let payload = serde_json::json!({
            "video_id": video_id,
            "summary": summary,
        });
        let rendered = serde_json::to_string_pretty(&payload)
            .map_err(|e| Error::custom(format!("Failed to encode output: {e}")))?;
        println!("{rendered}");
    } else {
        println!();
        println!("{summary}");
    }

    Ok(())
}

async fn run_tui() -> Result<()> {
    let mut terminal = tui_init()?;

    let mut app = App::new()?;
    let event_handler = EventHandler::new();

    // Background tasks (transcript fetches, model calls) report back here.
    let (tx, rx) = mpsc::unbounded_channel();
    app.worker_tx = Some(tx);
    app.worker_rx = Some(rx);

    loop {
        terminal.draw(|f| {
            ui::draw(f, &mut app);
        })?;

        let event = event_handler.next_event()?;
        app.handle_event(event)?;

        if app.should_quit {
            break;
        }
    }

    tui_restore()?;
    Ok(())
}
