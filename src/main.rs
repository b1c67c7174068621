//! Match-3 command-line runner (default binary).
//!
//! - `validate`: strict pre-flight check of a level file
//! - `replay`: verify a recorded replay against a level
//! - `autoplay`: let the greedy bot play a level and optionally save the replay

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{error, info};

use match3_sim::core::{
    validate_level, validate_remote_tuning, LevelConfig, Match3Game, RemoteTuning,
};
use match3_sim::replay::{
    autoplay, derive_seed, run_replay, ExpectedResult, Recorder, ReplayExpected, ReplayRecord,
};

#[derive(Parser)]
#[command(name = "match3", version, about = "Deterministic match-3 simulation tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Strictly validate a level definition
    Validate {
        level: PathBuf,
        /// Require `id` to equal the file name (without extension)
        #[arg(long)]
        check_id: bool,
    },
    /// Re-run a replay and compare it with its expectations
    Replay {
        #[arg(long)]
        level: PathBuf,
        #[arg(long)]
        replay: PathBuf,
        #[command(flatten)]
        tuning: TuningArgs,
    },
    /// Play a level with the greedy bot
    Autoplay {
        #[arg(long)]
        level: PathBuf,
        /// Engine seed (ignored when --session-seed is given)
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Derive the seed from a session seed, the level id and --attempt
        #[arg(long)]
        session_seed: Option<u64>,
        #[arg(long, default_value_t = 0)]
        attempt: u32,
        #[arg(long, default_value_t = 200)]
        max_actions: usize,
        /// Write the recorded replay (with expectations) here
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the final board
        #[arg(long)]
        show_board: bool,
        #[command(flatten)]
        tuning: TuningArgs,
    },
}

#[derive(Args)]
struct TuningArgs {
    /// Remote tuning JSON (spawn weight defaults and boss numbers)
    #[arg(long)]
    tuning: Option<PathBuf>,
    #[arg(long, env = "MATCH3_DAMAGE_PER_TILE")]
    damage_per_tile: Option<u32>,
    #[arg(long, env = "MATCH3_ROCKET_BONUS")]
    rocket_bonus: Option<u32>,
    #[arg(long, env = "MATCH3_BOMB_BONUS")]
    bomb_bonus: Option<u32>,
}

impl TuningArgs {
    /// File (or defaults), then individual overrides.
    fn resolve(&self) -> Result<RemoteTuning> {
        let mut tuning = match &self.tuning {
            Some(path) => {
                let tuning: RemoteTuning = read_json(path)?;
                validate_remote_tuning(&tuning)
                    .with_context(|| format!("invalid tuning {}", path.display()))?;
                tuning
            }
            None => RemoteTuning::default(),
        };
        if let Some(v) = self.damage_per_tile {
            tuning.boss.damage_per_tile = v;
        }
        if let Some(v) = self.rocket_bonus {
            tuning.boss.rocket_damage_bonus = v;
        }
        if let Some(v) = self.bomb_bonus {
            tuning.boss.bomb_damage_bonus = v;
        }
        Ok(tuning)
    }
}

fn main() -> Result<ExitCode> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let cli = Cli::parse();
    match cli.command {
        Command::Validate { level, check_id } => validate(&level, check_id),
        Command::Replay {
            level,
            replay,
            tuning,
        } => replay_cmd(&level, &replay, &tuning),
        Command::Autoplay {
            level,
            seed,
            session_seed,
            attempt,
            max_actions,
            out,
            show_board,
            tuning,
        } => {
            let level_cfg: LevelConfig = read_json(&level)?;
            let seed = match session_seed {
                Some(session) => derive_seed(session, &level_cfg.id, attempt),
                None => seed,
            };
            autoplay_cmd(
                &level_cfg,
                seed,
                attempt,
                max_actions,
                out.as_deref(),
                show_board,
                &tuning,
            )
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn validate(path: &Path, check_id: bool) -> Result<ExitCode> {
    let level: LevelConfig = read_json(path)?;
    let expected_id = if check_id {
        path.file_stem().and_then(|s| s.to_str())
    } else {
        None
    };

    match validate_level(&level, expected_id) {
        Ok(()) => {
            info!("{}: ok ({})", path.display(), level.id);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!("{}: {err}", path.display());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn replay_cmd(level_path: &Path, replay_path: &Path, tuning: &TuningArgs) -> Result<ExitCode> {
    let level: LevelConfig = read_json(level_path)?;
    let record = ReplayRecord::load(replay_path)
        .with_context(|| format!("loading replay {}", replay_path.display()))?;
    let tuning = tuning.resolve()?;

    match run_replay(&level, &tuning, &record) {
        Ok(outcome) => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!("replay {} failed: {err}", replay_path.display());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn autoplay_cmd(
    level: &LevelConfig,
    seed: u64,
    attempt: u32,
    max_actions: usize,
    out: Option<&Path>,
    show_board: bool,
    tuning: &TuningArgs,
) -> Result<ExitCode> {
    let tuning = tuning.resolve()?;
    let mut game = Match3Game::from_remote(&tuning);
    game.initialize(level, seed)
        .with_context(|| format!("initializing level {}", level.id))?;

    let mut recorder = Recorder::new();
    recorder.start(level.id.clone(), seed, attempt);
    let report = autoplay(&mut game, &mut recorder, max_actions);

    info!(
        "level {} seed {}: {} action(s), state {:?}{}",
        level.id,
        seed,
        report.actions,
        game.state(),
        if report.stuck { " (no accepted swap left)" } else { "" }
    );
    if show_board {
        print!("{}", game.grid());
    }

    let end = game.end_result();
    println!("{}", serde_json::to_string_pretty(&end)?);

    if let Some(path) = out {
        let Some(mut record) = recorder.stop() else {
            return Ok(ExitCode::FAILURE);
        };
        record.expected = Some(ReplayExpected {
            result: ExpectedResult::from(end.map(|e| e.result)),
            moves_used: end.map(|e| e.moves_used),
            boss_hp_remaining: end.and_then(|e| e.boss_hp_remaining),
            coins_gained: end.map(|e| e.coins_gained),
            note: Some("recorded by match3 autoplay".to_string()),
        });
        record
            .save(path)
            .with_context(|| format!("writing replay {}", path.display()))?;
        info!("replay written to {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}
