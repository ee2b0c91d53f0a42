//! In-memory store of live games.
//!
//! Maps game ids to sessions and player identities to seats. This is the
//! surface a transport layer (sockets, HTTP, a terminal) builds on: it
//! decides who may act in which game and returns the snapshot to send out,
//! while all game rules stay inside `Game`. Games live only as long as the
//! store does.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::board::{Coord, Side};
use crate::error::{ConfigError, MoveError};
use crate::game::{BoardUpdate, Game, GameConfig, FIRST_SIDE};

/// Length of generated game ids.
pub const GAME_ID_LEN: usize = 6;

const GAME_ID_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Errors returned by session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("game not found")]
    GameNotFound,

    #[error("no player id")]
    MissingPlayerId,

    #[error("spectators cannot play")]
    Spectator,

    #[error("not your turn")]
    NotYourTurn,

    #[error("game is over")]
    GameOver,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Move(#[from] MoveError),
}

/// How an identity takes part in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    Player(Side),
    Spectator,
}

/// What a joining identity is told.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Joined {
    pub game_id: String,
    pub seat: Seat,
    pub size: usize,
    /// True if this join filled the second seat and play can begin.
    pub started: bool,
    pub update: BoardUpdate,
}

/// One game and the identities seated at it.
#[derive(Debug, Clone)]
pub struct Session {
    pub game: Game,
    players: HashMap<String, Side>,
}

impl Session {
    fn new(game: Game) -> Self {
        Session {
            game,
            players: HashMap::new(),
        }
    }

    /// Seat held by `player_id`; unknown identities are spectators.
    pub fn seat_of(&self, player_id: &str) -> Seat {
        self.players
            .get(player_id)
            .map_or(Seat::Spectator, |&side| Seat::Player(side))
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}

/// All live games, keyed by id.
pub struct GameStore {
    sessions: HashMap<String, Session>,
    rng: SmallRng,
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStore {
    pub fn new() -> Self {
        GameStore {
            sessions: HashMap::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates a store whose game ids are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        GameStore {
            sessions: HashMap::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id: String = (0..GAME_ID_LEN)
                .map(|_| GAME_ID_CHARS[self.rng.gen_range(0..GAME_ID_CHARS.len())] as char)
                .collect();
            if !self.sessions.contains_key(&id) {
                return id;
            }
        }
    }

    /// Creates a game of `size` (default 13) and seats `player_id` as the
    /// first mover.
    pub fn create_game(&mut self, size: Option<usize>, player_id: &str) -> Result<Joined, SessionError> {
        if player_id.is_empty() {
            return Err(SessionError::MissingPlayerId);
        }
        let config = size.map_or_else(GameConfig::default, GameConfig::with_size);
        let game = Game::new(config)?;
        let game_id = self.fresh_id();

        let mut session = Session::new(game);
        session.players.insert(player_id.to_string(), FIRST_SIDE);
        let joined = Joined {
            game_id: game_id.clone(),
            seat: Seat::Player(FIRST_SIDE),
            size: session.game.size(),
            started: false,
            update: session.game.snapshot(),
        };
        self.sessions.insert(game_id.clone(), session);
        info!(%game_id, player_id, "game created");
        Ok(joined)
    }

    /// Joins `player_id` to a game. A known identity gets its seat back; a
    /// new one takes the free seat if any, else watches.
    pub fn join_game(&mut self, game_id: &str, player_id: &str) -> Result<Joined, SessionError> {
        let session = self
            .sessions
            .get_mut(game_id)
            .ok_or(SessionError::GameNotFound)?;

        let mut started = false;
        let seat = match session.seat_of(player_id) {
            Seat::Player(side) => Seat::Player(side),
            Seat::Spectator if !player_id.is_empty() && session.player_count() < 2 => {
                let side = FIRST_SIDE.opponent();
                session.players.insert(player_id.to_string(), side);
                started = true;
                Seat::Player(side)
            }
            Seat::Spectator => Seat::Spectator,
        };
        info!(game_id, player_id, ?seat, "player joined");

        Ok(Joined {
            game_id: game_id.to_string(),
            seat,
            size: session.game.size(),
            started,
            update: session.game.snapshot(),
        })
    }

    /// Submits an intent on behalf of `player_id` and returns the state to
    /// broadcast.
    pub fn submit_move(
        &mut self,
        game_id: &str,
        player_id: &str,
        from: Coord,
        to: Coord,
    ) -> Result<BoardUpdate, SessionError> {
        let session = self
            .sessions
            .get_mut(game_id)
            .ok_or(SessionError::GameNotFound)?;

        let side = match session.seat_of(player_id) {
            Seat::Player(side) => side,
            Seat::Spectator => return Err(SessionError::Spectator),
        };
        if session.game.status().is_over() {
            return Err(SessionError::GameOver);
        }
        if session.game.to_move() != side {
            return Err(SessionError::NotYourTurn);
        }

        session.game.process_intent(from, to)?;
        Ok(session.game.snapshot())
    }

    /// Current state of a game, as sent to a reconnecting identity.
    pub fn snapshot(&self, game_id: &str) -> Result<BoardUpdate, SessionError> {
        self.sessions
            .get(game_id)
            .map(|s| s.game.snapshot())
            .ok_or(SessionError::GameNotFound)
    }

    pub fn get(&self, game_id: &str) -> Option<&Session> {
        self.sessions.get(game_id)
    }

    /// Drops a game. Returns it if it existed.
    pub fn remove(&mut self, game_id: &str) -> Option<Session> {
        self.sessions.remove(game_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
