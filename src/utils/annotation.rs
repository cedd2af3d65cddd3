//! Short move annotation.
//!
//! Castles read `O-O` / `O-O-O`. Everything else is the piece letter (none
//! for pawns), `x` for a capture and the destination square. A trailing `#`
//! marks checkmate and `+` a plain check, castles included.

use crate::moves::move_descriptions::{CommittedMove, SpecialMove};

pub fn annotate(record: &CommittedMove) -> String {
    let mut out = match record.special_move {
        Some(SpecialMove::CastleShort) => "O-O".to_owned(),
        Some(SpecialMove::CastleLong) => "O-O-O".to_owned(),
        _ => {
            let capture = if record.is_capture() { "x" } else { "" };
            format!("{}{}{}", record.piece.kind.annotation_letter(), capture, record.to)
        }
    };

    if record.checkmate {
        out.push('#');
    } else if record.check {
        out.push('+');
    }
    out
}
