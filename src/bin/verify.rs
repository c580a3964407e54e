//! Offline ledger auditor.
//!
//! Usage: `proof-tetris-verify <ledger.json>`
//!
//! Loads an exported ledger, re-hashes every record, checks the chain and
//! audits the scoring. Exits non-zero if any check fails.

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use proof_tetris::ledger::Ledger;

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: proof-tetris-verify <ledger.json>");
        return Ok(ExitCode::from(2));
    };

    let file = File::open(&path).with_context(|| format!("failed to open {path}"))?;
    let ledger = Ledger::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {path}"))?;

    let verification = ledger.verify_all();
    let audit = ledger.audit();

    let checksummed = ledger
        .records()
        .iter()
        .filter(|r| !r.hash_alg.is_cryptographic())
        .count();
    let best_move = ledger.records().iter().max_by_key(|r| r.score_delta());

    println!("records:      {}", ledger.len());
    if let Some(last) = ledger.last() {
        println!("final score:  {}", last.game_state_after.score);
        println!("final lines:  {}", last.game_state_after.lines);
    }
    if let Some(best) = best_move {
        println!(
            "best move:    #{} {} (+{})",
            best.move_index,
            best.move_type,
            best.score_delta()
        );
    }
    if checksummed > 0 {
        println!("checksummed:  {checksummed} record(s) hashed without sha256");
    }
    println!("hash chain:   {verification}");
    println!("rules audit:  {audit}");

    if verification.valid && audit.valid {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
