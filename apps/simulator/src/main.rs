use std::{io, path::PathBuf, time::Duration};

use anyhow::Result;
use clap::{Parser, Subcommand};
use page_runtime::{spawn_carousel, PageSession};
use shared::domain::default_slides;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod replay;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "folio-sim", about = "Drive the portfolio page engines outside a browser")]
struct Cli {
    /// TOML settings file; defaults to ./folio.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scripted page session on a virtual clock and print JSON lines.
    Replay { script: PathBuf },
    /// Run the carousel in real time and log every slide change.
    Autoplay {
        #[arg(long, default_value_t = 20_000)]
        duration_ms: u64,
        /// Simulate the pointer resting on the slider from this offset.
        #[arg(long)]
        hover_at_ms: Option<u64>,
        #[arg(long, default_value_t = 3_000)]
        hover_for_ms: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Command::Replay { script } => {
            let script = replay::load_script(&script)?;
            let mut session = PageSession::with_defaults(&settings.tracker, &settings.carousel)?;
            let stdout = io::stdout();
            let written = replay::replay(&mut session, &script, &mut stdout.lock())?;
            info!(
                events = script.events.len(),
                updates = written,
                elapsed_ms = session.elapsed().as_millis() as u64,
                "replay finished"
            );
        }
        Command::Autoplay {
            duration_ms,
            hover_at_ms,
            hover_for_ms,
        } => {
            let slides = default_slides();
            let titles: Vec<String> = slides
                .iter()
                .map(|slide| slide.payload.title.clone())
                .collect();
            let (carousel, task) = spawn_carousel(slides, &settings.carousel)?;
            let mut changes = carousel.subscribe();
            carousel.start().await;

            let started = Instant::now();
            let deadline = started + Duration::from_millis(duration_ms);

            let hover = {
                let carousel = carousel.clone();
                tokio::spawn(async move {
                    let Some(at) = hover_at_ms else {
                        return;
                    };
                    sleep(Duration::from_millis(at)).await;
                    carousel.pause().await;
                    info!("pointer entered slider");
                    sleep(Duration::from_millis(hover_for_ms)).await;
                    carousel.resume().await;
                    info!("pointer left slider");
                })
            };

            loop {
                tokio::select! {
                    _ = sleep_until(deadline) => break,
                    changed = changes.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let state = *changes.borrow_and_update();
                        info!(
                            at_ms = started.elapsed().as_millis() as u64,
                            index = state.current_index,
                            title = titles.get(state.current_index).map(String::as_str).unwrap_or_default(),
                            direction = ?state.direction,
                            paused = state.is_paused,
                            "carousel state"
                        );
                    }
                }
            }

            hover.abort();
            carousel.dispose().await;
            task.await?;
        }
    }

    Ok(())
}
