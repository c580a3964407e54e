//! Headless autoplay demo (default binary).
//!
//! Starts an async game session, runs the gravity ticker, lets the
//! autoplayer place pieces until the game ends or the piece budget runs out,
//! then verifies and exports the move ledger.
//!
//! Usage: `proof-tetris [pieces]` (default 20). Configuration comes from the
//! `PROOF_TETRIS_*` environment variables; logging from `RUST_LOG`.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{bail, Context, Result};
use tokio::time::{sleep, Duration};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use proof_tetris::adapter::{spawn_gravity_ticker, start_session, SessionConfig, SessionHandle};
use proof_tetris::autoplay::{best_placement, plan_moves};
use proof_tetris::types::MoveType;

const DEFAULT_PIECES: u32 = 20;

/// Attempts per plan before the autoplayer gives up and re-plans
const MAX_RETRIES: u32 = 5;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let pieces = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u32>()
            .with_context(|| format!("invalid piece count: {arg}"))?,
        None => DEFAULT_PIECES,
    };

    let config = SessionConfig::from_env();
    info!(?config, pieces, "starting headless session");

    let (session, task) = start_session(&config);
    let ticker = spawn_gravity_ticker(session.clone(), config.tick_period());

    let placed = play(&session, pieces, &config).await?;
    ticker.abort();

    let snapshot = session.snapshot().await?;
    info!(
        placed,
        score = snapshot.score,
        level = snapshot.level,
        lines = snapshot.lines,
        game_over = snapshot.game_over,
        "play finished"
    );

    let verification = session.verify_all().await?;
    let audit = session.audit().await?;
    info!(%verification, %audit, "ledger checked");

    let json = session.export_json().await?;
    drop(session);
    let engine = task.await.context("session task failed")?;

    match &config.export_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            engine.ledger().export_to_writer(BufWriter::new(file))?;
            info!(path = %path.display(), records = engine.ledger().len(), "ledger exported");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    if !verification.valid || !audit.valid {
        bail!("ledger failed its own checks: {verification}, {audit}");
    }
    Ok(())
}

/// Place up to `pieces` pieces; returns how many were hard-dropped.
///
/// Player moves report zero elapsed time: the gravity ticker is the only
/// source of session time, so the autoplayer waits one move delay plus one
/// tick between moves to clear the rate limit.
async fn play(session: &SessionHandle, pieces: u32, config: &SessionConfig) -> Result<u32> {
    let pause = Duration::from_millis(config.move_delay_ms.saturating_add(config.tick_ms) as u64);
    let mut placed = 0;
    let mut retries = 0;

    while placed < pieces {
        let snapshot = session.snapshot().await?;
        let Some(placement) = best_placement(&snapshot) else {
            break;
        };

        let mut completed = true;
        for move_type in plan_moves(&snapshot, placement) {
            sleep(pause).await;
            let outcome = session.attempt_move(move_type, 0).await?;
            if !outcome.accepted {
                completed = false;
                break;
            }
            if move_type == MoveType::HardDrop {
                placed += 1;
            }
        }

        if completed {
            retries = 0;
        } else {
            // Gravity moved or locked the piece under us; plan again.
            retries += 1;
            if retries > MAX_RETRIES {
                warn!(placed, "autoplayer kept getting rejected, stopping");
                break;
            }
        }
    }

    Ok(placed)
}
