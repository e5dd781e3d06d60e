//! CLI smoke entry point.
//!
//! # Responsibility
//! - Load a notes directory through `garden_core` and print the index.
//! - Exit non-zero with the load error when any note is invalid.
//!
//! Usage: `garden_cli [CONTENT_DIR]` (falls back to `GARDEN_CONTENT_DIR`;
//! `GARDEN_LOG_LEVEL` and `GARDEN_LOG_DIR` apply either way).

use garden_core::{
    init_logging_from_config, status_legend, GardenConfig, MarkdownDirSource, NoteService,
};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = GardenConfig::from_env_with_content_dir(std::env::args().nth(1))
        .map_err(|err| err.to_string())?;
    init_logging_from_config(&config)?;
    info!("event=cli_start module=cli status=ok version={}", garden_core::core_version());

    let service = NoteService::new(MarkdownDirSource::new(&config.content_dir));
    let index = service.index().map_err(|err| err.to_string())?;

    println!("Legend: {}", status_legend());
    println!();
    for note in &index.notes {
        let tags = note
            .metadata
            .tags
            .iter()
            .map(|tag| tag.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{} {} [{}] {} ({})",
            note.glyph(),
            note.metadata.title,
            note.slug,
            note.effective_date().format("%Y-%m-%d"),
            tags
        );
    }
    println!();
    println!(
        "Topics: {}",
        index
            .tags
            .iter()
            .map(|tag| format!("{} ({})", tag.name, tag.slug))
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}
