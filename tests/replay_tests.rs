//! Replay tests - record with the auto-player, then verify against a fresh engine

use match3_sim::core::{GoalConfig, LevelConfig, Match3Game, RemoteTuning};
use match3_sim::replay::{
    autoplay, derive_seed, run_replay, Action, ExpectedResult, Recorder, ReplayAction,
    ReplayError, ReplayExpected, ReplayRecord,
};
use match3_sim::types::{Coord, GameState, TileColor};

const FIVE: [TileColor; 5] = [
    TileColor::Red,
    TileColor::Blue,
    TileColor::Green,
    TileColor::Yellow,
    TileColor::Purple,
];

fn level() -> LevelConfig {
    LevelConfig::new("replay_01", 9, 9, &FIVE, 6)
        .with_goal(GoalConfig::score(1_000_000))
        .with_reward(15)
}

/// Play `level` to the end with the auto-player and return a complete record.
fn record_attempt(level: &LevelConfig, seed: u64) -> ReplayRecord {
    let tuning = RemoteTuning::default();
    let mut game = Match3Game::from_remote(&tuning);
    game.initialize(level, seed).unwrap();

    let mut recorder = Recorder::new();
    recorder.start(level.id.clone(), seed, 0);
    autoplay(&mut game, &mut recorder, 100);

    let end = game.end_result();
    let mut record = recorder.stop().unwrap();
    record.expected = Some(ReplayExpected {
        result: ExpectedResult::from(end.map(|e| e.result)),
        moves_used: end.map(|e| e.moves_used),
        boss_hp_remaining: end.and_then(|e| e.boss_hp_remaining),
        coins_gained: end.map(|e| e.coins_gained),
        note: None,
    });
    record
}

#[test]
fn test_recorded_attempt_replays() {
    let level = level();
    let record = record_attempt(&level, 99);
    assert_eq!(record.actions.len(), 6);
    assert_eq!(record.expected.as_ref().unwrap().result, ExpectedResult::Lose);

    let outcome = run_replay(&level, &RemoteTuning::default(), &record).unwrap();
    assert_eq!(outcome.state, GameState::Lost);
    assert_eq!(outcome.actions_applied, 6);
    assert_eq!(outcome.remaining_moves, 0);
    assert_eq!(outcome.end_result.unwrap().moves_used, 6);
}

#[test]
fn test_replay_is_reproducible() {
    let level = level();
    let record = record_attempt(&level, 12345);

    let first = run_replay(&level, &RemoteTuning::default(), &record).unwrap();
    let second = run_replay(&level, &RemoteTuning::default(), &record).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_tampered_expectation_fails() {
    let level = level();
    let mut record = record_attempt(&level, 99);

    record.expected.as_mut().unwrap().moves_used = Some(3);
    assert!(matches!(
        run_replay(&level, &RemoteTuning::default(), &record),
        Err(ReplayError::MovesMismatch {
            expected: 3,
            actual: 6
        })
    ));

    record.expected.as_mut().unwrap().result = ExpectedResult::Win;
    assert!(matches!(
        run_replay(&level, &RemoteTuning::default(), &record),
        Err(ReplayError::ResultMismatch { .. })
    ));
}

#[test]
fn test_different_seed_diverges() {
    let level = level();
    let mut record = record_attempt(&level, 99);
    record.seed = 100;

    // The first recorded swap makes no match on the other board.
    assert!(matches!(
        run_replay(&level, &RemoteTuning::default(), &record),
        Err(ReplayError::SwapRejected { t: 0, .. })
    ));
}

#[test]
fn test_rejected_action_is_reported_with_its_index() {
    let level = level();
    let mut record = ReplayRecord::new("replay_01", 5, 0);
    record.actions.push(ReplayAction {
        t: 0,
        action: Action::Swap {
            a: Coord::new(0, 0),
            b: Coord::new(2, 0),
        },
    });

    assert!(matches!(
        run_replay(&level, &RemoteTuning::default(), &record),
        Err(ReplayError::SwapRejected { t: 0, .. })
    ));
}

#[test]
fn test_replay_for_other_level_is_refused() {
    let record = ReplayRecord::new("some_other_level", 1, 0);
    assert!(matches!(
        run_replay(&level(), &RemoteTuning::default(), &record),
        Err(ReplayError::LevelMismatch { .. })
    ));
}

#[test]
fn test_incomplete_expectation_for_unfinished_attempt() {
    let level = level();
    let tuning = RemoteTuning::default();
    let mut game = Match3Game::from_remote(&tuning);
    game.initialize(&level, 7).unwrap();

    let mut recorder = Recorder::new();
    recorder.start("replay_01", 7, 2);
    let report = autoplay(&mut game, &mut recorder, 3);
    assert_eq!(report.actions, 3);

    let mut record = recorder.stop().unwrap();
    record.expected = Some(ReplayExpected {
        result: ExpectedResult::Incomplete,
        moves_used: None,
        boss_hp_remaining: None,
        coins_gained: None,
        note: Some("partial".to_string()),
    });

    let outcome = run_replay(&level, &tuning, &record).unwrap();
    assert_eq!(outcome.state, GameState::Running);
    assert!(outcome.end_result.is_none());
    assert_eq!(outcome.remaining_moves, 3);
}

#[test]
fn test_save_and_load_roundtrip() {
    let level = level();
    let record = record_attempt(&level, 99);

    let path = std::env::temp_dir().join(format!("match3_replay_{}.json", std::process::id()));
    record.save(&path).unwrap();
    let loaded = ReplayRecord::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, record);
    assert!(run_replay(&level, &RemoteTuning::default(), &loaded).is_ok());
}

#[test]
fn test_hammer_action_json() {
    let json = r#"{ "levelId": "replay_01", "seed": 42,
                    "actions": [ { "t": 0, "type": "hammer", "cell": [4, 4] } ] }"#;
    let record = ReplayRecord::from_json(json).unwrap();
    assert_eq!(record.version, 1);
    assert_eq!(
        record.actions[0].action,
        Action::Hammer {
            cell: Coord::new(4, 4)
        }
    );

    let outcome = run_replay(&level(), &RemoteTuning::default(), &record).unwrap();
    assert_eq!(outcome.state, GameState::Running);
    assert_eq!(outcome.remaining_moves, 6);
}

#[test]
fn test_derived_seeds_differ_per_attempt() {
    let a = derive_seed(1234, "replay_01", 0);
    let b = derive_seed(1234, "replay_01", 1);
    assert_ne!(a, b);
    assert_eq!(a, derive_seed(1234, "replay_01", 0));
}
