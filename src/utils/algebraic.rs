//! Coordinate notation: squares as `e4`, move intents as `e2e4` / `e7e8n`.

use crate::game_state::chess_types::{PieceKind, Square};
use crate::moves::move_descriptions::MoveIntent;

/// Parse a square such as `"e4"`.
pub fn algebraic_to_square(square: &str) -> Result<Square, String> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid algebraic square: {square}"));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    Ok(Square {
        row: rank - b'1',
        col: file - b'a',
    })
}

#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}

/// Parse a coordinate move such as `"e2e4"`, with an optional trailing
/// promotion letter (`"a7a8n"`).
pub fn parse_move_intent(text: &str) -> Result<MoveIntent, String> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(format!("Invalid coordinate move: {text}"));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let mut intent = MoveIntent::new(from, to);

    if let Some(letter) = text[4..].chars().next() {
        let kind = PieceKind::from_fen_char(letter)
            .filter(|kind| kind.is_promotion_target())
            .ok_or_else(|| format!("Invalid promotion piece: {letter}"))?;
        intent = intent.with_promotion(kind);
    }

    Ok(intent)
}

/// Coordinate form of an intent; the inverse of [`parse_move_intent`].
pub fn move_intent_to_string(intent: &MoveIntent) -> String {
    let mut out = format!("{}{}", intent.from, intent.to);
    if let Some(kind) = intent.promote_to {
        out.push(kind.fen_char());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, move_intent_to_string, parse_move_intent, square_to_algebraic};
    use crate::game_state::chess_types::{PieceKind, Square};

    #[test]
    fn squares_convert_both_ways() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), Square { row: 0, col: 0 });
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), Square { row: 7, col: 7 });
        assert_eq!(square_to_algebraic(Square { row: 3, col: 4 }), "e4");
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("a").is_err());
    }

    #[test]
    fn coordinate_moves_parse_with_optional_promotion() {
        let intent = parse_move_intent("e2e4").expect("e2e4 should parse");
        assert_eq!(intent.from, Square { row: 1, col: 4 });
        assert_eq!(intent.to, Square { row: 3, col: 4 });
        assert_eq!(intent.promote_to, None);

        let intent = parse_move_intent("a7a8n").expect("a7a8n should parse");
        assert_eq!(intent.promote_to, Some(PieceKind::Knight));
        assert_eq!(move_intent_to_string(&intent), "a7a8n");

        assert!(parse_move_intent("a7a8k").is_err());
        assert!(parse_move_intent("e2").is_err());
    }
}
