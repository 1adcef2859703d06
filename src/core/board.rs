use chess::{Action, ChessMove, Game, Piece, Square};
use std::str::FromStr;

use super::Seat;

/// Handle to the rules engine.
///
/// Everything chess-specific lives behind this wrapper: legality,
/// turn tracking, terminal-state detection, and FEN serialization all
/// belong to the `chess` crate. The session only ever asks three things
/// of it: whose turn it is, apply-this-if-legal, and serialize.
#[derive(Debug)]
pub struct Board {
    game: Game,
}

impl Board {
    /// A fresh board in the standard starting position.
    pub fn new() -> Self {
        Self { game: Game::new() }
    }

    /// The seat whose turn it currently is.
    pub fn side_to_move(&self) -> Seat {
        Seat::from_color(self.game.side_to_move())
    }

    /// Validate and apply a move given in algebraic square notation.
    ///
    /// Returns `true` and advances the game if the engine accepts the
    /// move; returns `false` and leaves the game untouched otherwise.
    /// Square strings that do not parse count as illegal, the same as
    /// any other move the engine refuses.
    ///
    /// Pawns reaching the back rank always promote to a queen: the move
    /// is first tried as written, then retried as a queen promotion,
    /// which is the only form the engine accepts for a promotion push.
    pub fn apply_if_legal(&mut self, from: &str, to: &str) -> bool {
        let (Ok(from), Ok(to)) = (Square::from_str(from), Square::from_str(to)) else {
            return false;
        };

        self.game.make_move(ChessMove::new(from, to, None))
            || self.game.make_move(ChessMove::new(from, to, Some(Piece::Queen)))
    }

    /// Full board state as a FEN string, sufficient to reconstruct the
    /// position without replaying history.
    pub fn fen(&self) -> String {
        self.game.current_position().to_string()
    }

    /// Number of moves applied so far.
    pub fn moves_played(&self) -> usize {
        self.game
            .actions()
            .iter()
            .filter(|action| matches!(action, Action::MakeMove(_)))
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
