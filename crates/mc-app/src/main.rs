use std::io::Write;

use anyhow::Result;
use clap::Parser;

pub mod app;
pub mod cli;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Config : mode validé avant toute police, puis overrides CLI
    let config = cli.resolve_config()?;
    log::info!(
        "Mode {} : {}x{} cellules",
        config.mode,
        config.width,
        config.height
    );

    // 4. Palette (une seule fois)
    let palette = pipeline::build_palette(&config)?;

    // 5. Source
    let source = pipeline::open_source(cli.image.as_deref(), &config)?;
    let mut app_instance = app::App::new(source, pipeline::FramePipeline::new(palette, config));

    // Une frame sur stdout, sans terminal plein écran
    if cli.once {
        let Some(lines) = app_instance.render_once()? else {
            eprintln!("failed to grab frame");
            return Ok(());
        };
        let mut out = std::io::stdout().lock();
        for line in &lines {
            writeln!(out, "{line}")?;
        }
        return Ok(());
    }

    // 6. Initialiser le terminal ratatui
    let terminal = ratatui::init();

    // 7. Boucle principale
    let result = app_instance.run(terminal);

    // 8. Restaurer le terminal (TOUJOURS, même en cas d'erreur)
    ratatui::restore();

    if result? == app::ExitReason::CaptureFailed {
        log::warn!("Source épuisée, arrêt");
        eprintln!("failed to grab frame");
    }
    Ok(())
}
