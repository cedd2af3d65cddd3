//! Seeded random playouts checking rules invariants on every ply.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use duel_chess::config::GameConfig;
use duel_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use duel_chess::game_state::chess_types::Color;
use duel_chess::game_state::game_state::GameStatus;
use duel_chess::game_state::position::Position;
use duel_chess::move_generation::legal_move_checks::{is_in_check, is_in_check_after_move};
use duel_chess::utils::self_play_harness::play_random_game;

const MAX_PLIES: usize = 160;

fn playout(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut position = Position::from_fen(STARTING_POSITION_FEN, Color::Light).expect("start position should load");

    for _ in 0..MAX_PLIES {
        let before = *position.board();
        for (piece, moves) in position.all_legal_moves() {
            for mv in moves {
                let mut probe = before;
                let _ = is_in_check_after_move(&mut probe, &piece, mv.to);
                assert_eq!(probe, before, "seed {seed}: simulation must restore the board");
            }
        }
        assert_eq!(*position.board(), before, "seed {seed}: generation must not mutate the board");

        let intents = position.legal_intents();
        let Some(intent) = intents.choose(&mut rng).copied() else {
            break;
        };

        let mover = position.side_to_move();
        let offered = position.legal_moves(intent.from);
        assert!(
            offered.iter().any(|mv| mv.to == intent.to),
            "seed {seed}: chosen intent must be a legal destination"
        );

        let (record, verdict) = position
            .apply(&intent)
            .expect("a generated intent should apply");
        assert!(
            !is_in_check(position.board(), mover),
            "seed {seed}: {} left its own king in check with {:?}",
            mover,
            record
        );
        assert_eq!(record.check, is_in_check(position.board(), mover.opposite()));
        position
            .validate()
            .unwrap_or_else(|err| panic!("seed {seed}: invariant broken after {record:?}: {err}"));

        if verdict.outcome().is_some() {
            break;
        }
    }
}

#[test]
fn random_playouts_keep_kings_safe_and_boards_consistent() {
    for seed in [1u64, 2, 3, 42, 1234, 9001] {
        playout(seed);
    }
}

#[test]
fn self_play_reports_match_the_game_state() {
    let config = GameConfig::default();
    let (report, game) = play_random_game(&config, 77, 300, std::time::Duration::from_millis(50))
        .expect("default config should play");

    assert_eq!(report.state, game.state());
    assert_eq!(report.plies, game.merged_moves().len());
    if report.plies < 300 {
        assert_eq!(report.state.status, GameStatus::Over);
    }
    game.position()
        .validate()
        .expect("the final position should be consistent");
}
