//! Players and the strategies that choose their moves.
//!
//! Every [`Player`] owns a [`Goal`] and a [`Strategy`]. The coordinator asks a
//! player for a move with [`Player::generate_move`]; a player that has nothing
//! to play yet returns `None` and is asked again later.
//!
//! - **Human** - Builds a move from [`HumanInput`] events: a selected level, a
//!   cursor position and a pending action.
//! - **Random** - Once signalled, plays a uniformly chosen valid move.
//! - **Smart** - Once signalled, plays the first improving move after ignoring
//!   `difficulty` shuffled candidates.
//!
//! Automated players carry their own [`Pcg32`] seeded from the game's generator,
//! so a game is reproducible from its [`GameSeed`].

use std::fmt;

use blocky_engine::{Block, GameSeed, Position};
use rand::Rng;
use rand_pcg::Pcg32;

use crate::{
    GoalGenerationError,
    goal::{Goal, generate_goals},
    move_search,
    moves::{Move, MoveKind},
};

/// Abstract input event for a human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanInput {
    /// Sets the pending action.
    Action(MoveKind),
    /// Selects the next larger block (one level closer to the root).
    LevelUp,
    /// Selects the next smaller block (one level deeper).
    LevelDown,
    /// Moves the cursor.
    Cursor(Position),
}

#[derive(Debug, Clone, Default)]
pub struct HumanState {
    level: u8,
    cursor: Option<Position>,
    desired: Option<MoveKind>,
}

impl HumanState {
    fn process_input(&mut self, input: HumanInput) {
        match input {
            HumanInput::Action(kind) => self.desired = Some(kind),
            HumanInput::LevelUp => {
                self.level = self.level.saturating_sub(1);
                self.desired = None;
            }
            HumanInput::LevelDown => {
                self.level = self.level.saturating_add(1);
                self.desired = None;
            }
            HumanInput::Cursor(position) => self.cursor = Some(position),
        }
    }

    fn generate_move(&mut self, board: &Block) -> Option<Move> {
        let target = board.locate(self.cursor?, self.level)?;
        let kind = self.desired.take()?;
        Some(Move::new(kind, target))
    }
}

#[derive(Debug, Clone)]
pub struct RandomState {
    proceed: bool,
    rng: Pcg32,
}

#[derive(Debug, Clone)]
pub struct SmartState {
    proceed: bool,
    difficulty: usize,
    rng: Pcg32,
}

/// How a player chooses moves, with the state of that strategy.
#[derive(Debug, Clone, derive_more::IsVariant)]
pub enum Strategy {
    Human(HumanState),
    Random(RandomState),
    Smart(SmartState),
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human(_) => write!(f, "human"),
            Self::Random(_) => write!(f, "random"),
            Self::Smart(state) => write!(f, "smart (difficulty {})", state.difficulty),
        }
    }
}

/// A participant in the game.
#[derive(Debug, Clone)]
pub struct Player {
    id: usize,
    goal: Goal,
    strategy: Strategy,
}

impl Player {
    #[must_use]
    pub fn human(id: usize, goal: Goal) -> Self {
        Self {
            id,
            goal,
            strategy: Strategy::Human(HumanState::default()),
        }
    }

    #[must_use]
    pub fn random(id: usize, goal: Goal, seed: GameSeed) -> Self {
        Self {
            id,
            goal,
            strategy: Strategy::Random(RandomState {
                proceed: false,
                rng: seed.rng(),
            }),
        }
    }

    #[must_use]
    pub fn smart(id: usize, goal: Goal, difficulty: usize, seed: GameSeed) -> Self {
        Self {
            id,
            goal,
            strategy: Strategy::Smart(SmartState {
                proceed: false,
                difficulty,
                rng: seed.rng(),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    #[must_use]
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Allows an automated player to produce its next move.
    ///
    /// Has no effect on human players.
    pub fn signal_proceed(&mut self) {
        match &mut self.strategy {
            Strategy::Human(_) => {}
            Strategy::Random(state) => state.proceed = true,
            Strategy::Smart(state) => state.proceed = true,
        }
    }

    /// Feeds an input event to a human player.
    ///
    /// Ignored by automated players.
    pub fn process_input(&mut self, input: HumanInput) {
        if let Strategy::Human(state) = &mut self.strategy {
            state.process_input(input);
        }
    }

    /// The level a human player currently selects blocks at.
    #[must_use]
    pub fn selected_level(&self) -> Option<u8> {
        match &self.strategy {
            Strategy::Human(state) => Some(state.level),
            Strategy::Random(_) | Strategy::Smart(_) => None,
        }
    }

    /// The block a human player would currently target on `board`.
    #[must_use]
    pub fn selected_block<'a>(&self, board: &'a Block) -> Option<&'a Block> {
        let Strategy::Human(state) = &self.strategy else {
            return None;
        };
        let path = board.locate(state.cursor?, state.level)?;
        board.block_at(&path)
    }

    /// Asks this player for its move on `board`.
    ///
    /// Returns `None` if the player is not ready: a human without a pending
    /// action or a block under the cursor, or an automated player that has not
    /// been signalled. `board` is never modified.
    pub fn generate_move(&mut self, board: &Block) -> Option<Move> {
        let mv = match &mut self.strategy {
            Strategy::Human(state) => state.generate_move(board)?,
            Strategy::Random(state) => {
                if !state.proceed {
                    return None;
                }
                let candidates = move_search::valid_candidates(board, &self.goal, &mut state.rng);
                state.proceed = false;
                move_search::select_random(&candidates, &mut state.rng)
            }
            Strategy::Smart(state) => {
                if !state.proceed {
                    return None;
                }
                let current_score = self.goal.score(board);
                let candidates = move_search::valid_candidates(board, &self.goal, &mut state.rng);
                state.proceed = false;
                move_search::select_smart(candidates, state.difficulty, current_score, &mut state.rng)
            }
        };
        tracing::debug!(player = self.id, %mv, "move chosen");
        Some(mv)
    }
}

/// Creates the players of a game.
///
/// Goals are generated for all players at once. Humans come first, then random
/// players, then smart players in the order of `smart_difficulties`; ids run
/// from 0. Each automated player is seeded from `rng`.
///
/// # Errors
///
/// Returns [`GoalGenerationError`] if there are more players than colours.
///
/// # Example
///
/// ```
/// use blocky_engine::GameSeed;
/// use blocky_evaluator::player::create_players;
///
/// let mut rng = GameSeed::from_u128(8).rng();
/// let players = create_players(1, 1, &[2], &mut rng)?;
///
/// assert!(players[0].strategy().is_human());
/// assert!(players[1].strategy().is_random());
/// assert!(players[2].strategy().is_smart());
/// assert!(create_players(2, 2, &[0], &mut rng).is_err());
/// # Ok::<(), blocky_evaluator::GoalGenerationError>(())
/// ```
pub fn create_players<R>(
    num_human: usize,
    num_random: usize,
    smart_difficulties: &[usize],
    rng: &mut R,
) -> Result<Vec<Player>, GoalGenerationError>
where
    R: Rng + ?Sized,
{
    let count = num_human + num_random + smart_difficulties.len();
    let goals = generate_goals(count, rng)?;
    let mut goals = goals.into_iter().enumerate();

    let mut players = Vec::with_capacity(count);
    players.extend(goals.by_ref().take(num_human).map(|(id, goal)| Player::human(id, goal)));
    players.extend(
        goals
            .by_ref()
            .take(num_random)
            .map(|(id, goal)| Player::random(id, goal, rng.random())),
    );
    players.extend(
        goals
            .zip(smart_difficulties)
            .map(|((id, goal), difficulty)| Player::smart(id, goal, *difficulty, rng.random())),
    );
    Ok(players)
}

#[cfg(test)]
mod tests {
    use blocky_engine::{BlockPath, Colour, Quadrant, generate_board};

    use super::*;

    const R: Colour = Colour::REAL_RED;
    const G: Colour = Colour::OLD_OLIVE;

    fn depth_two_board() -> Block {
        let mut board = Block::new(Position::ORIGIN, 16, Colour::WHITE, 0, 2);
        board.subdivide([R, R, G, G]);
        board
    }

    #[test]
    fn test_human_needs_cursor_and_action() {
        let board = depth_two_board();
        let mut player = Player::human(0, Goal::blob(R));
        assert_eq!(player.generate_move(&board), None);

        player.process_input(HumanInput::Action(MoveKind::SwapVertical));
        assert_eq!(player.generate_move(&board), None);

        player.process_input(HumanInput::Cursor(Position::new(3, 3)));
        let mv = player.generate_move(&board).unwrap();
        assert_eq!(mv.kind(), MoveKind::SwapVertical);
        assert!(mv.target().is_root());

        // the pending action is consumed
        assert_eq!(player.generate_move(&board), None);
    }

    #[test]
    fn test_human_level_selection() {
        let board = depth_two_board();
        let mut player = Player::human(0, Goal::blob(R));
        player.process_input(HumanInput::Cursor(Position::new(12, 2)));

        player.process_input(HumanInput::LevelUp);
        assert_eq!(player.selected_level(), Some(0));

        player.process_input(HumanInput::LevelDown);
        player.process_input(HumanInput::Action(MoveKind::Paint(G)));
        let mv = player.generate_move(&board).unwrap();
        let expected: BlockPath = [Quadrant::UpperRight].into_iter().collect();
        assert_eq!(mv.target(), &expected);

        // deeper than the tree: the leaf under the cursor is selected
        player.process_input(HumanInput::LevelDown);
        let selected = player.selected_block(&board).unwrap();
        assert_eq!(selected.position(), Position::new(8, 0));
        assert_eq!(selected.level(), 1);
    }

    #[test]
    fn test_level_change_clears_action() {
        let board = depth_two_board();
        let mut player = Player::human(0, Goal::blob(R));
        player.process_input(HumanInput::Cursor(Position::new(1, 1)));
        player.process_input(HumanInput::Action(MoveKind::Smash));
        player.process_input(HumanInput::LevelDown);
        assert_eq!(player.generate_move(&board), None);
    }

    #[test]
    fn test_human_cursor_outside_board() {
        let board = depth_two_board();
        let mut player = Player::human(0, Goal::blob(R));
        player.process_input(HumanInput::Cursor(Position::new(16, 0)));
        player.process_input(HumanInput::Action(MoveKind::Smash));
        assert_eq!(player.generate_move(&board), None);
        assert!(player.selected_block(&board).is_none());
    }

    #[test]
    fn test_automated_players_wait_for_signal() {
        let board = depth_two_board();
        let mut players = [
            Player::random(0, Goal::blob(R), GameSeed::from_u128(1)),
            Player::smart(1, Goal::blob(G), 0, GameSeed::from_u128(2)),
        ];
        for player in &mut players {
            assert_eq!(player.generate_move(&board), None);
            player.signal_proceed();
            assert!(player.generate_move(&board).is_some());
            assert_eq!(player.generate_move(&board), None);
        }
    }

    #[test]
    fn test_smart_player_never_worsens_score() {
        for seed in 0..30 {
            let mut rng = GameSeed::from_u128(seed).rng();
            let mut board = generate_board(3, 256, &mut rng).unwrap();
            let goal = Goal::perimeter(R);
            let mut player = Player::smart(0, goal, 0, rng.random());

            let before = goal.score(&board);
            player.signal_proceed();
            let mv = player.generate_move(&board).unwrap();
            assert!(mv.apply(&mut board, &mut rng));
            if !mv.kind().is_smash() && !mv.kind().is_pass() {
                assert!(goal.score(&board) > before);
            }
        }
    }

    #[test]
    fn test_signal_ignored_by_humans() {
        let board = depth_two_board();
        let mut player = Player::human(0, Goal::blob(R));
        player.signal_proceed();
        assert_eq!(player.generate_move(&board), None);
    }

    #[test]
    fn test_create_players_order_and_goals() {
        let mut rng = GameSeed::from_u128(11).rng();
        let players = create_players(1, 1, &[3, 1], &mut rng).unwrap();
        assert_eq!(players.len(), 4);
        for (id, player) in players.iter().enumerate() {
            assert_eq!(player.id(), id);
        }
        assert!(players[0].strategy().is_human());
        assert!(players[1].strategy().is_random());
        let difficulties: Vec<_> = players[2..]
            .iter()
            .map(|player| match player.strategy() {
                Strategy::Smart(state) => state.difficulty,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(difficulties, [3, 1]);

        let kind = players[0].goal().kind();
        assert!(players.iter().all(|player| player.goal().kind() == kind));
    }

    #[test]
    fn test_strategy_display() {
        let goal = Goal::blob(R);
        let seed = GameSeed::from_u128(0);
        assert_eq!(Player::human(0, goal).strategy().to_string(), "human");
        assert_eq!(Player::random(0, goal, seed).strategy().to_string(), "random");
        assert_eq!(
            Player::smart(0, goal, 3, seed).strategy().to_string(),
            "smart (difficulty 3)"
        );
    }

    #[test]
    fn test_create_players_too_many() {
        let mut rng = GameSeed::from_u128(11).rng();
        assert_eq!(
            create_players(3, 1, &[0], &mut rng).unwrap_err(),
            GoalGenerationError::NotEnoughColours {
                requested: 5,
                available: 4
            }
        );
    }
}
