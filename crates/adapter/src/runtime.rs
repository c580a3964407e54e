//! Session runtime.
//!
//! One tokio task owns the [`GameEngine`]. Every caller (player input,
//! gravity ticker, verifier, exporter) goes through a cloneable
//! [`SessionHandle`] that sends a command over an `mpsc` channel and waits
//! for the `oneshot` reply, so ledger appends happen strictly in the order
//! commands were submitted.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::core::{GameEngine, MoveOutcome, SystemClock};
use crate::ledger::{Ledger, LedgerError, MoveRecord, Verification};
use crate::types::{GameSnapshot, MoveType};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("game session has shut down")]
    Closed,
    #[error("ledger export failed: {0}")]
    Export(#[from] LedgerError),
}

/// Command delivered to the session task.
#[derive(Debug)]
pub enum SessionCommand {
    Move {
        move_type: MoveType,
        elapsed_ms: u32,
        reply: oneshot::Sender<MoveOutcome>,
    },
    Restart {
        reply: oneshot::Sender<()>,
    },
    Snapshot {
        reply: oneshot::Sender<GameSnapshot>,
    },
    VerifyAll {
        reply: oneshot::Sender<Verification>,
    },
    Audit {
        reply: oneshot::Sender<Verification>,
    },
    Records {
        reply: oneshot::Sender<Vec<MoveRecord>>,
    },
    ExportJson {
        reply: oneshot::Sender<Result<String, LedgerError>>,
    },
}

/// Cloneable handle to a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionCommand>,
}

/// Move `engine` into its own task.
///
/// The task runs until every [`SessionHandle`] is dropped and then hands the
/// engine back through the join handle.
pub fn spawn_session(
    engine: GameEngine,
    max_pending_commands: usize,
) -> (SessionHandle, JoinHandle<GameEngine>) {
    let (tx, rx) = mpsc::channel(max_pending_commands.max(1));
    let task = tokio::spawn(run_session(engine, rx));
    (SessionHandle { tx }, task)
}

/// Build an engine from `config` (wall-clock timestamps, fresh ledger) and spawn it
pub fn start_session(config: &SessionConfig) -> (SessionHandle, JoinHandle<GameEngine>) {
    let engine = GameEngine::new(config.engine_config(), Ledger::new(), SystemClock);
    spawn_session(engine, config.max_pending_commands)
}

async fn run_session(
    mut engine: GameEngine,
    mut rx: mpsc::Receiver<SessionCommand>,
) -> GameEngine {
    info!("session task started");

    while let Some(command) = rx.recv().await {
        // A dropped reply receiver only means the caller stopped waiting.
        match command {
            SessionCommand::Move {
                move_type,
                elapsed_ms,
                reply,
            } => {
                let outcome = engine.attempt_move(move_type, elapsed_ms);
                let _ = reply.send(outcome);
            }
            SessionCommand::Restart { reply } => {
                engine.restart();
                let _ = reply.send(());
            }
            SessionCommand::Snapshot { reply } => {
                let _ = reply.send(engine.snapshot());
            }
            SessionCommand::VerifyAll { reply } => {
                let _ = reply.send(engine.ledger().verify_all());
            }
            SessionCommand::Audit { reply } => {
                let _ = reply.send(engine.ledger().audit());
            }
            SessionCommand::Records { reply } => {
                let _ = reply.send(engine.ledger().records().to_vec());
            }
            SessionCommand::ExportJson { reply } => {
                let _ = reply.send(engine.ledger().export_json());
            }
        }
    }

    debug!(records = engine.ledger().len(), "all session handles dropped");
    engine
}

impl SessionHandle {
    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> Result<T, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(command(reply))
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    pub async fn attempt_move(
        &self,
        move_type: MoveType,
        elapsed_ms: u32,
    ) -> Result<MoveOutcome, SessionError> {
        self.request(|reply| SessionCommand::Move {
            move_type,
            elapsed_ms,
            reply,
        })
        .await
    }

    pub async fn restart(&self) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::Restart { reply }).await
    }

    pub async fn snapshot(&self) -> Result<GameSnapshot, SessionError> {
        self.request(|reply| SessionCommand::Snapshot { reply }).await
    }

    pub async fn verify_all(&self) -> Result<Verification, SessionError> {
        self.request(|reply| SessionCommand::VerifyAll { reply }).await
    }

    pub async fn audit(&self) -> Result<Verification, SessionError> {
        self.request(|reply| SessionCommand::Audit { reply }).await
    }

    pub async fn records(&self) -> Result<Vec<MoveRecord>, SessionError> {
        self.request(|reply| SessionCommand::Records { reply }).await
    }

    pub async fn export_json(&self) -> Result<String, SessionError> {
        let json = self
            .request(|reply| SessionCommand::ExportJson { reply })
            .await??;
        Ok(json)
    }

    /// Whether the session task has stopped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
