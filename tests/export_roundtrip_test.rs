//! Export to disk, reload, verify.

use std::fs::File;
use std::io::{BufReader, BufWriter};

use proof_tetris::core::{EngineConfig, GameEngine, ManualClock};
use proof_tetris::ledger::{HashAlgorithm, Ledger, UnavailableDigest};
use proof_tetris::types::MoveType;

fn play_some(engine: &mut GameEngine) {
    for mv in [
        MoveType::MoveLeft,
        MoveType::Rotate,
        MoveType::SoftDrop,
        MoveType::HardDrop,
        MoveType::MoveRight,
        MoveType::HardDrop,
    ] {
        engine.attempt_move(mv, 100);
    }
    engine.attempt_move(MoveType::AutoDrop, 16);
}

#[test]
fn test_file_round_trip() {
    let mut engine = GameEngine::new(EngineConfig::seeded(5), Ledger::new(), ManualClock::new(9));
    play_some(&mut engine);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    engine
        .ledger()
        .export_to_writer(BufWriter::new(File::create(&path).unwrap()))
        .unwrap();

    let reloaded = Ledger::from_reader(BufReader::new(File::open(&path).unwrap())).unwrap();
    assert_eq!(reloaded.records(), engine.ledger().records());
    assert!(reloaded.verify_all().valid);
    assert!(reloaded.audit().valid);
}

#[test]
fn test_export_uses_documented_keys() {
    let mut engine = GameEngine::new(EngineConfig::seeded(6), Ledger::new(), ManualClock::new(9));
    play_some(&mut engine);

    let json = engine.ledger().export_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let records = value.as_array().unwrap();

    let first = &records[0];
    assert_eq!(first["move_type"], "move_left");
    assert_eq!(first["move_index"], 0);
    assert_eq!(first["hash_alg"], "sha256");
    assert!(first.get("previous_move_hash").is_none());
    assert!(first["game_state_before"]["board"].is_array());
    let kind = first["game_state_before"]["current_piece"]["kind"]
        .as_str()
        .unwrap();
    assert_eq!(kind.len(), 1);

    let second = &records[1];
    assert_eq!(second["previous_move_hash"], first["hash"]);
}

#[test]
fn test_checksum_fallback_round_trips() {
    let mut engine = GameEngine::new(
        EngineConfig::seeded(7),
        Ledger::with_digest(UnavailableDigest),
        ManualClock::new(9),
    );
    play_some(&mut engine);
    assert!(engine
        .ledger()
        .records()
        .iter()
        .all(|r| r.hash_alg == HashAlgorithm::Fnv1a64));

    let json = engine.ledger().export_json().unwrap();
    let reloaded = Ledger::from_json(&json).unwrap();
    assert!(reloaded.verify_all().valid);
}
