use std::future;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::seq::IndexedRandom;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{self, Instant};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use breed_slideshow::catalog::{Catalog, DogCeoClient};
use breed_slideshow::command::Command;
use breed_slideshow::config::Cli;
use breed_slideshow::constants::*;
use breed_slideshow::player::Player;
use breed_slideshow::render::WindowPrinter;
use breed_slideshow::scheduler::SlideshowScheduler;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // --- Logging to stderr, stdout belongs to the slideshow ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let timing = cli.timing()?;
    let client = DogCeoClient::new(cli.api_base()?)?;
    let mut player = Player::new(client, SlideshowScheduler::new(timing));

    // --- Load Catalog ---
    let catalog = player
        .load_catalog()
        .await
        .with_context(|| format!("failed to load the breed catalog from {}", cli.api_base))?;
    if catalog.is_empty() {
        error!("catalog is empty, nothing to show");
    }

    if cli.list {
        print_catalog(player.catalog())?;
        return Ok(());
    }

    // --- Initial Selection ---
    let initial = match (&cli.category, cli.random) {
        (Some(category), _) => Some(category.to_lowercase()),
        (None, true) => player.catalog().categories().choose(&mut rand::rng()).cloned(),
        (None, false) => None,
    };
    match initial {
        Some(category) => select(&mut player, &category).await,
        None => println!(
            "{PLACEHOLDER_CATEGORY}: type one of {} categories (`list` shows them)",
            player.catalog().categories().len()
        ),
    }

    // --- Main Loop ---
    let mut printer = WindowPrinter::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;
    let mut render = time::interval(Duration::from_millis(RENDER_POLL_MS));

    let deadline = cli.duration().map(|d| Instant::now() + d);
    let timeout = async move {
        match deadline {
            Some(deadline) => time::sleep_until(deadline).await,
            None => future::pending().await,
        }
    };
    tokio::pin!(timeout);
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);

    loop {
        tokio::select! {
            _ = render.tick() => {
                printer.update(&mut io::stdout().lock(), player.scheduler().current_window())?;
            }
            line = lines.next_line(), if input_open => {
                match line.context("failed to read stdin")? {
                    Some(line) => {
                        if !handle(&mut player, Command::parse(&line)).await? {
                            break;
                        }
                    }
                    None => {
                        debug!("stdin closed, no more commands");
                        input_open = false;
                    }
                }
            }
            _ = &mut timeout => {
                info!("duration elapsed");
                break;
            }
            _ = &mut interrupted => {
                info!("interrupted");
                break;
            }
        }
    }

    player.stop();
    Ok(())
}

// Returns false once the user asked to quit
async fn handle(player: &mut Player<DogCeoClient>, command: Command) -> Result<bool> {
    match command {
        Command::Select(category) => select(player, &category).await,
        Command::Stop => {
            if let Some(category) = player.selected() {
                info!(category, "stopping slideshow");
            }
            player.stop();
        }
        Command::List => print_catalog(player.catalog())?,
        Command::Quit => return Ok(false),
        Command::Ignore => {}
    }
    Ok(true)
}

// A failed selection keeps whatever was playing
async fn select(player: &mut Player<DogCeoClient>, category: &str) {
    match player.select(category).await {
        Ok(count) => println!("Now showing {category} ({count} pictures)"),
        Err(e) => println!("Cannot show {category}: {e}"),
    }
}

fn print_catalog(catalog: &Catalog) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for (breed, subs) in catalog.breeds() {
        if subs.is_empty() {
            writeln!(out, "{breed}")?;
        } else {
            writeln!(out, "{breed}: {}", subs.join(", "))?;
        }
    }
    out.flush()
}
