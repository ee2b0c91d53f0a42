//! Self-play game generation.
//!
//! Plays full games by submitting a uniformly random intent from
//! `Game::legal_intents` for whichever side is on move, retrying with
//! another intent when one is refused. Records the intents played, the
//! refusals seen, and how each game ended. Used to soak-test the rules
//! engine and to gather statistics on game length.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, warn};

use crate::board::{Coord, Side, DEFAULT_SIZE};
use crate::error::{ConfigError, MoveError};
use crate::game::{Game, GameConfig};
use crate::protocol::layout::encode_layout;
use crate::resolve::GameStatus;

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Board size for every game.
    pub size: usize,
    /// Maximum accepted intents before a game is abandoned.
    pub max_plies: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            size: DEFAULT_SIZE,
            max_plies: 2000,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// Errors that stop a self-play run before any game is played.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("self-play worker thread panicked")]
    WorkerPanicked,
}

/// How a game finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// A side met the win condition.
    Win,
    /// The side on move had no intent the engine would accept.
    Stalled,
    /// The ply cap was reached.
    PlyLimit,
}

/// Refused intents by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Refusals {
    pub phase: usize,
    pub double_goal: usize,
    pub repetition: usize,
    pub other: usize,
}

impl Refusals {
    fn record(&mut self, error: MoveError) {
        match error {
            MoveError::PhaseViolation => self.phase += 1,
            MoveError::DoubleGoalViolation => self.double_goal += 1,
            MoveError::RepetitionViolation => self.repetition += 1,
            MoveError::InvalidMove | MoveError::GameOver => self.other += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.phase + self.double_goal + self.repetition + self.other
    }
}

/// A complete self-play game record.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    pub size: usize,
    pub winner: Option<Side>,
    pub termination: Termination,
    /// Accepted intents, in order.
    pub intents: Vec<(Coord, Coord)>,
    /// Number of completed turns.
    pub turns: usize,
    pub refusals: Refusals,
    /// Final position in layout notation.
    pub final_layout: String,
}

impl GameRecord {
    pub fn plies(&self) -> usize {
        self.intents.len()
    }
}

/// Plays a single game from `start` and returns its record.
pub fn play_game(start: &Game, max_plies: usize, game_id: usize, rng: &mut impl Rng) -> GameRecord {
    let mut game = start.clone();
    let mut intents = Vec::new();
    let mut refusals = Refusals::default();
    let mut turns = 0;

    let termination = loop {
        if game.status().is_over() {
            break Termination::Win;
        }
        if intents.len() >= max_plies {
            break Termination::PlyLimit;
        }

        let mut candidates = game.legal_intents();
        let mut accepted = false;
        while !candidates.is_empty() {
            let (from, to) = candidates.swap_remove(rng.gen_range(0..candidates.len()));
            match game.process_intent(from, to) {
                Ok(outcome) => {
                    intents.push((from, to));
                    if outcome.turn_ended {
                        turns += 1;
                    }
                    accepted = true;
                    break;
                }
                Err(e) => refusals.record(e),
            }
        }
        if !accepted {
            break Termination::Stalled;
        }
    };

    let winner = match game.status() {
        GameStatus::Won(side) => Some(side),
        GameStatus::InProgress => None,
    };

    GameRecord {
        game_id,
        size: game.size(),
        winner,
        termination,
        intents,
        turns,
        refusals,
        final_layout: encode_layout(game.board(), game.to_move()),
    }
}

fn seeded_rng(seed: u64, offset: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(offset as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn log_game(game: &GameRecord, done: usize, total: usize, started: Instant) {
    let outcome = match game.winner {
        Some(side) => format!("{:?} wins", side),
        None => format!("{:?}", game.termination),
    };
    info!(
        "Game {}/{}: {} after {} plies ({:.1}s)",
        done,
        total,
        outcome,
        game.plies(),
        started.elapsed().as_secs_f64()
    );
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| games.push(game))?;
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Runs self-play generation, calling `on_game` with each completed game
/// record as it finishes.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    let start = Game::new(GameConfig::with_size(config.size))?;
    if config.threads > 1 {
        run_self_play_parallel(config, start, on_game)
    } else {
        run_self_play_sequential(config, &start, on_game);
        Ok(())
    }
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, start: &Game, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    let mut rng = seeded_rng(config.seed, 0);
    for i in 0..config.num_games {
        let started = Instant::now();
        let game = play_game(start, config.max_plies, i, &mut rng);
        if !config.quiet {
            log_game(&game, i + 1, config.num_games, started);
        }
        on_game(game);
    }
}

/// Parallel self-play: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker
/// threads.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, start: Game, mut on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let (tx, rx) = mpsc::channel::<GameRecord>();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        let completed = AtomicUsize::new(0);
        pool.install(|| {
            (0..config_clone.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let mut rng = seeded_rng(config_clone.seed, i);
                    let started = Instant::now();
                    let game = play_game(&start, config_clone.max_plies, i, &mut rng);
                    if !config_clone.quiet {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        log_game(&game, n, config_clone.num_games, started);
                    }
                    if tx.send(game).is_err() {
                        warn!("self-play receiver dropped; discarding game {}", i);
                    }
                });
        });
    });

    for game in rx {
        on_game(game);
    }

    handle.join().map_err(|_| SelfPlayError::WorkerPanicked)
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        write_game_json(game, out)?;
    }
    out.flush()
}

/// Writes a single game record as one line of JSON.
pub fn write_game_json<W: Write>(game: &GameRecord, out: &mut W) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, game)?;
    writeln!(out)
}

/// Aggregate results over a set of games.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub games: usize,
    pub red_wins: usize,
    pub blue_wins: usize,
    pub stalled: usize,
    pub ply_limit: usize,
    pub refusals: usize,
    pub average_plies: f64,
}

/// Tallies outcomes over `games`.
pub fn summarize(games: &[GameRecord]) -> Summary {
    let mut summary = Summary {
        games: games.len(),
        ..Summary::default()
    };
    let mut plies = 0;
    for game in games {
        match game.winner {
            Some(Side::Red) => summary.red_wins += 1,
            Some(Side::Blue) => summary.blue_wins += 1,
            None if game.termination == Termination::Stalled => summary.stalled += 1,
            None => summary.ply_limit += 1,
        }
        summary.refusals += game.refusals.total();
        plies += game.plies();
    }
    if !games.is_empty() {
        summary.average_plies = plies as f64 / games.len() as f64;
    }
    summary
}

/// Logs a summary of self-play results.
pub fn print_summary(games: &[GameRecord]) {
    let s = summarize(games);
    info!("=== Self-Play Summary ===");
    info!("Games: {}", s.games);
    info!("Red wins: {}  Blue wins: {}", s.red_wins, s.blue_wins);
    info!("Stalled: {}  Ply limit: {}", s.stalled, s.ply_limit);
    info!("Refused intents: {}", s.refusals);
    info!("Average plies: {:.1}", s.average_plies);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::layout::parse_layout;

    fn quick_config(threads: usize) -> SelfPlayConfig {
        SelfPlayConfig {
            num_games: 3,
            size: 7,
            max_plies: 120,
            threads,
            seed: 42,
            quiet: true,
        }
    }

    #[test]
    fn play_single_game_completes() {
        let start = Game::new(GameConfig::with_size(7)).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let game = play_game(&start, 200, 0, &mut rng);
        assert!(game.plies() <= 200);
        assert!(game.plies() > 0);
        match game.termination {
            Termination::Win => assert!(game.winner.is_some()),
            _ => assert!(game.winner.is_none()),
        }
        assert!(parse_layout(&game.final_layout).is_ok());
    }

    #[test]
    fn same_seed_replays_identically() {
        let start = Game::new(GameConfig::with_size(7)).unwrap();
        let a = play_game(&start, 80, 0, &mut SmallRng::seed_from_u64(9));
        let b = play_game(&start, 80, 0, &mut SmallRng::seed_from_u64(9));
        assert_eq!(a.intents, b.intents);
        assert_eq!(a.final_layout, b.final_layout);
    }

    #[test]
    fn recorded_intents_replay_on_a_fresh_game() {
        let start = Game::new(GameConfig::with_size(7)).unwrap();
        let record = play_game(&start, 100, 0, &mut SmallRng::seed_from_u64(5));
        let mut game = start.clone();
        for &(from, to) in &record.intents {
            assert!(game.process_intent(from, to).is_ok());
        }
        assert_eq!(encode_layout(game.board(), game.to_move()), record.final_layout);
    }

    #[test]
    fn sequential_run_produces_correct_count() {
        let games = run_self_play(&quick_config(1)).unwrap();
        assert_eq!(games.len(), 3);
        assert_eq!(summarize(&games).games, 3);
    }

    #[test]
    fn parallel_run_produces_correct_count() {
        let games = run_self_play(&quick_config(2)).unwrap();
        assert_eq!(games.len(), 3);
        let ids: Vec<usize> = games.iter().map(|g| g.game_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn invalid_size_is_reported() {
        let config = SelfPlayConfig {
            size: 2,
            ..quick_config(1)
        };
        assert!(matches!(
            run_self_play(&config),
            Err(SelfPlayError::Config(ConfigError::InvalidSize(2)))
        ));
    }

    #[test]
    fn jsonl_output_is_valid() {
        let games = run_self_play(&quick_config(1)).unwrap();
        let mut out = Vec::new();
        write_jsonl(&games, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("game_id").is_some());
            assert!(value.get("termination").is_some());
            assert!(value.get("intents").unwrap().is_array());
        }
    }

    #[test]
    fn summary_tallies_outcomes() {
        let record = |winner, termination| GameRecord {
            game_id: 0,
            size: 7,
            winner,
            termination,
            intents: vec![(Coord::new(1, 1), Coord::new(2, 1)); 4],
            turns: 2,
            refusals: Refusals {
                repetition: 1,
                ..Refusals::default()
            },
            final_layout: String::new(),
        };
        let games = vec![
            record(Some(Side::Red), Termination::Win),
            record(Some(Side::Blue), Termination::Win),
            record(None, Termination::Stalled),
            record(None, Termination::PlyLimit),
        ];
        let s = summarize(&games);
        assert_eq!((s.red_wins, s.blue_wins, s.stalled, s.ply_limit), (1, 1, 1, 1));
        assert_eq!(s.refusals, 4);
        assert_eq!(s.average_plies, 4.0);
    }
}
