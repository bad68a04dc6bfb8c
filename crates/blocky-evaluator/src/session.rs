//! Headless game sessions.
//!
//! A [`GameSession`] owns the authoritative board and the players. Each turn it
//! signals the current player, asks for a move, commits it to the board and
//! records a [`TurnRecord`]. A round ends when every player has moved once.

use blocky_engine::{Block, GameSeed, generate_board};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{
    SessionError,
    moves::{Move, MoveKind},
    player::{Player, create_players},
};

/// Parameters of a game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    pub max_depth: u8,
    pub board_size: u32,
    pub num_human: usize,
    pub num_random: usize,
    pub smart_difficulties: Vec<usize>,
    pub max_rounds: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            board_size: 750,
            num_human: 0,
            num_random: 1,
            smart_difficulties: vec![2],
            max_rounds: 5,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn num_players(&self) -> usize {
        self.num_human + self.num_random + self.smart_difficulties.len()
    }
}

/// Outcome of one turn.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TurnRecord {
    pub round: usize,
    pub player: usize,
    pub kind: MoveKind,
    pub performed: bool,
    /// The player's goal score after the move.
    pub score: usize,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    board: Block,
    players: Vec<Player>,
    rng: Pcg32,
    max_rounds: usize,
    round: usize,
    current: usize,
    history: Vec<TurnRecord>,
}

impl GameSession {
    /// Generates the board and the players for `config`.
    ///
    /// The board, the goals and the seeds of the automated players are all drawn
    /// from `seed`, so equal seeds give equal games.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Board`] if the board size does not fit the depth,
    /// and [`SessionError::Goals`] if there are more players than colours.
    pub fn new(config: &SessionConfig, seed: GameSeed) -> Result<Self, SessionError> {
        let mut rng = seed.rng();
        let board = generate_board(config.max_depth, config.board_size, &mut rng)?;
        let players = create_players(
            config.num_human,
            config.num_random,
            &config.smart_difficulties,
            &mut rng,
        )?;
        tracing::debug!(%seed, players = players.len(), "session created");
        Ok(Self {
            board,
            players,
            rng,
            max_rounds: config.max_rounds,
            round: 0,
            current: 0,
            history: vec![],
        })
    }

    #[must_use]
    pub fn board(&self) -> &Block {
        &self.board
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    /// Index of the round being played, starting at 0.
    #[must_use]
    pub fn round(&self) -> usize {
        self.round
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.players.is_empty() || self.round >= self.max_rounds
    }

    /// Plays the current player's turn.
    ///
    /// Returns `None` once the session is over. A player that has no move to
    /// offer passes.
    pub fn play_turn(&mut self) -> Option<&TurnRecord> {
        if self.is_over() {
            return None;
        }
        let player = &mut self.players[self.current];
        player.signal_proceed();
        let mv = player.generate_move(&self.board).unwrap_or_else(Move::pass);
        let performed = mv.apply(&mut self.board, &mut self.rng);
        let score = player.goal().score(&self.board);
        tracing::info!(
            round = self.round,
            player = player.id(),
            %mv,
            performed,
            score,
            "turn played"
        );
        self.history.push(TurnRecord {
            round: self.round,
            player: player.id(),
            kind: mv.kind(),
            performed,
            score,
        });

        self.current += 1;
        if self.current == self.players.len() {
            self.current = 0;
            self.round += 1;
        }
        self.history.last()
    }

    /// Plays every remaining turn and returns the full history.
    pub fn run(&mut self) -> &[TurnRecord] {
        while self.play_turn().is_some() {}
        &self.history
    }

    /// Current goal score of every player, by id.
    #[must_use]
    pub fn scores(&self) -> Vec<usize> {
        self.players
            .iter()
            .map(|player| player.goal().score(&self.board))
            .collect()
    }
}
