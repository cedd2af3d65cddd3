//! A playable position: the board, both players and whose turn it is.
//!
//! `Position` knows the rules but not the lifecycle. It validates and
//! executes move intents, keeps each player's roster and log in step with
//! the board, and reports the rules verdict after every move; clocks and
//! the waiting/playing/over status live in [`crate::game_state::game::Game`].

use std::collections::BTreeSet;

use tracing::debug;

use crate::chess_errors::{GameError, InvariantViolation, MoveRejection};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::{judge_turn, TurnVerdict};
use crate::game_state::player::Player;
use crate::move_generation::legal_move_apply::MoveExecutor;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::{MoveContext, MoveGenerator};
use crate::moves::move_descriptions::{CommittedMove, MoveIntent, PotentialMove, SpecialMove};

const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    players: [Player; 2],
    side_to_move: Color,
    ply: u32,
}

/// Generation context for `side_to_move`, whose en-passant source is the
/// opponent's latest move.
fn turn_context(players: &[Player; 2], side_to_move: Color) -> MoveContext<'_> {
    MoveContext::for_turn(
        side_to_move,
        players[side_to_move.opposite().index()].last_move(),
    )
}

impl Position {
    /// Set up a position from an already validated board.
    ///
    /// Refuses boards where the side that is not to move stands in check,
    /// since that position could never arise from legal play.
    pub fn new(board: Board, side_to_move: Color) -> Result<Self, GameError> {
        let waiting = side_to_move.opposite();
        if is_in_check(&board, waiting) {
            return Err(GameError::OpponentInCheck(waiting));
        }

        Ok(Self {
            players: [
                Player::new(Color::Light, &board),
                Player::new(Color::Dark, &board),
            ],
            board,
            side_to_move,
            ply: 0,
        })
    }

    /// Load the placement field of `fen`. Only the placement is used; the side
    /// to move comes from `side_to_move`.
    pub fn from_fen(fen: &str, side_to_move: Color) -> Result<Self, GameError> {
        Self::new(Board::from_placement(fen)?, side_to_move)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Half-moves played since the position was set up.
    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    #[inline]
    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    /// The most recent committed move of either side.
    pub fn last_move(&self) -> Option<&CommittedMove> {
        self.players[self.side_to_move.opposite().index()].last_move()
    }

    /// Both players' logs merged in the order the moves were played.
    pub fn merged_moves(&self) -> Vec<&CommittedMove> {
        let mut merged: Vec<&CommittedMove> = self
            .players
            .iter()
            .flat_map(|player| player.move_log().iter())
            .collect();
        merged.sort_by_key(|record| record.ply);
        merged
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        is_in_check(&self.board, color)
    }

    /// Legal destinations for the piece on `square`. Empty for an empty
    /// square or for a piece whose side is not to move.
    pub fn legal_moves(&mut self, square: Square) -> Vec<PotentialMove> {
        let Some(piece) = self.board.get(square).copied() else {
            return Vec::new();
        };
        if piece.color != self.side_to_move {
            return Vec::new();
        }

        let ctx = turn_context(&self.players, self.side_to_move);
        LegalMoveGenerator
            .generate_moves(&mut self.board, &piece, &ctx)
            .unwrap_or_default()
    }

    /// Every legal move for the side to move, paired with the moving piece.
    pub fn all_legal_moves(&mut self) -> Vec<(Piece, Vec<PotentialMove>)> {
        let ctx = turn_context(&self.players, self.side_to_move);
        LegalMoveGenerator
            .generate_for_side(&mut self.board, self.side_to_move, &ctx)
            .unwrap_or_default()
    }

    /// Every legal intent for the side to move, with one intent per
    /// promotion piece for promoting moves.
    pub fn legal_intents(&mut self) -> Vec<MoveIntent> {
        let mut intents = Vec::with_capacity(48);
        for (piece, moves) in self.all_legal_moves() {
            for mv in moves {
                let intent = MoveIntent::new(piece.square, mv.to);
                if mv.special_move == Some(SpecialMove::Promotion) {
                    intents.extend(PROMOTION_CHOICES.iter().map(|&kind| intent.with_promotion(kind)));
                } else {
                    intents.push(intent);
                }
            }
        }
        intents
    }

    /// Rules verdict for the side to move as things stand.
    pub fn verdict(&mut self) -> TurnVerdict {
        let ctx = turn_context(&self.players, self.side_to_move);
        judge_turn(&mut self.board, self.side_to_move, &ctx)
    }

    /// Validate and execute a move, returning the committed record.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promote_to: Option<PieceKind>,
    ) -> Result<CommittedMove, MoveRejection> {
        self.apply(&MoveIntent {
            from,
            to,
            promote_to,
        })
        .map(|(record, _)| record)
    }

    /// Validate and execute `intent`, returning the committed record together
    /// with the rules verdict for the side now to move. Rejected intents leave
    /// the position untouched.
    pub fn apply(&mut self, intent: &MoveIntent) -> Result<(CommittedMove, TurnVerdict), MoveRejection> {
        let piece = *self
            .board
            .get(intent.from)
            .ok_or(MoveRejection::EmptySquare(intent.from))?;
        if piece.color != self.side_to_move {
            return Err(MoveRejection::NotYourTurn {
                expected: self.side_to_move,
                found: piece.color,
            });
        }
        if intent.from == intent.to {
            return Err(MoveRejection::SameSquare(intent.from));
        }
        let promote_to = intent.promote_to.unwrap_or(PieceKind::Queen);
        if !promote_to.is_promotion_target() {
            return Err(MoveRejection::InvalidPromotion(promote_to));
        }

        let chosen = self
            .legal_moves(intent.from)
            .into_iter()
            .find(|mv| mv.to == intent.to)
            .ok_or(MoveRejection::IllegalMove {
                kind: piece.kind,
                from: intent.from,
                to: intent.to,
            })?;

        let mut record = MoveExecutor.execute(
            &mut self.board,
            &mut self.players,
            intent.from,
            &chosen,
            promote_to,
            self.ply,
        )?;

        let mover = self.side_to_move;
        self.side_to_move = mover.opposite();
        self.ply += 1;

        let ctx = MoveContext::for_turn(self.side_to_move, Some(&record));
        let verdict = judge_turn(&mut self.board, self.side_to_move, &ctx);
        record.checkmate = matches!(verdict, TurnVerdict::Checkmate { .. });

        debug!(
            ply = record.ply,
            mover = %mover,
            from = %record.from,
            to = %record.to,
            capture = record.is_capture(),
            check = record.check,
            "move committed"
        );

        self.players[mover.index()].log_move(record.clone());
        Ok((record, verdict))
    }

    /// Check board invariants and that each roster matches the pieces on the
    /// board.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.board.validate()?;

        for player in &self.players {
            let on_board: BTreeSet<PieceId> = self
                .board
                .all_pieces(Some(player.color()))
                .iter()
                .map(|piece| piece.id)
                .collect();
            if *player.roster() != on_board {
                return Err(InvariantViolation::RosterMismatch {
                    color: player.color(),
                });
            }
        }
        Ok(())
    }

    /// Total value of the pieces `color` has captured minus those captured
    /// from it.
    pub fn material_advantage(&self, color: Color) -> i32 {
        let own = self.player(color).captured_value() as i32;
        let theirs = self.player(color.opposite()).captured_value() as i32;
        own - theirs
    }
}
