//! Apply/revert must restore the board bit for bit.

use movegen::{Board, Position};
use proptest::prelude::*;

const STARTS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 0 1",
];

#[test]
fn every_root_move_reverts_exactly() {
    for fen in STARTS {
        let mut position = Position::from_fen(fen).unwrap();
        let before = position.board().clone();
        for &mv in &position.legal_moves().unwrap() {
            position.apply_move(mv).unwrap();
            assert_ne!(position.board(), &before, "{mv} changed nothing");
            assert_eq!(position.revert_move(), Some(mv));
            assert_eq!(position.board(), &before, "{mv} from {fen}");
        }
    }
}

#[test]
fn generated_moves_never_leave_the_king_in_check() {
    for fen in STARTS {
        let mut position = Position::from_fen(fen).unwrap();
        let us = position.board().side_to_move();
        for &mv in &position.legal_moves().unwrap() {
            position.apply_move(mv).unwrap();
            let board = position.board();
            let king = board.king_square(us).unwrap();
            assert!(
                movegen::check::checkers(board, king, us.opposite()).is_empty(),
                "{mv} leaves the king in check in {fen}"
            );
            position.revert_move();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_walk_unwinds_to_the_start(
        start in 0usize..STARTS.len(),
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 1..40),
    ) {
        let mut position = Position::from_fen(STARTS[start]).unwrap();
        let mut snapshots: Vec<Board> = Vec::new();

        for pick in &picks {
            let moves = position.legal_moves().unwrap();
            if moves.is_empty() {
                break;
            }
            snapshots.push(position.board().clone());
            let mv = moves[pick.index(moves.len())];
            position.apply_move(mv).unwrap();
        }

        prop_assert_eq!(position.history_len(), snapshots.len());
        while let Some(expected) = snapshots.pop() {
            prop_assert!(position.revert_move().is_some());
            prop_assert_eq!(position.board(), &expected);
        }
        prop_assert!(!position.can_undo());
        prop_assert_eq!(position.revert_move(), None);
    }
}
