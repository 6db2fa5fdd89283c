//! FEN codec tests.

use crate::board::{Board, FenError, Piece, Square};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[test]
fn startpos_round_trips() {
    let board = Board::from_fen(START_FEN);
    assert_eq!(board.to_fen(), START_FEN);
    assert_eq!(board.to_fen(), Board::new().to_fen());
}

#[test]
fn kiwipete_round_trips() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    assert_eq!(Board::from_fen(fen).to_fen(), fen);
}

#[test]
fn en_passant_field_round_trips() {
    let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
    let board = Board::from_fen(fen);
    assert_eq!(board.en_passant_target(), Some(Square::new(5, 5)));
    assert_eq!(board.to_fen(), fen);
}

#[test]
fn parses_pieces_onto_expected_squares() {
    let board = Board::from_fen(START_FEN);
    assert_eq!(
        board.piece_at(Square::new(0, 4)),
        Some((crate::board::Color::White, Piece::King))
    );
    assert_eq!(
        board.piece_at(Square::new(7, 3)),
        Some((crate::board::Color::Black, Piece::Queen))
    );
    assert_eq!(board.piece_at(Square::new(4, 4)), None);
}

#[test]
fn wrong_field_count_is_rejected() {
    assert_eq!(
        Board::try_from_fen("8/8/8/8/8/8/8/8 w - -"),
        Err(FenError::WrongFieldCount { found: 4 })
    );
    assert!(Board::try_from_fen("").is_err());
}

#[test]
fn bad_rank_widths_are_rejected() {
    // nine pawns on one rank
    assert!(matches!(
        Board::try_from_fen("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        Err(FenError::BadRankWidth { .. })
    ));
    // a rank that only covers seven files
    assert!(matches!(
        Board::try_from_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        Err(FenError::BadRankWidth { .. })
    ));
    // seven ranks
    assert!(matches!(
        Board::try_from_fen("8/8/8/8/8/8/8 w - - 0 1"),
        Err(FenError::WrongRankCount { found: 7 })
    ));
}

#[test]
fn bad_fields_are_rejected() {
    assert!(matches!(
        Board::try_from_fen("8/8/8/8/8/8/8/K1k5 x - - 0 1"),
        Err(FenError::InvalidSideToMove { .. })
    ));
    assert!(matches!(
        Board::try_from_fen("8/8/8/8/8/8/8/K1k5 w KX - 0 1"),
        Err(FenError::InvalidCastling { .. })
    ));
    assert!(matches!(
        Board::try_from_fen("8/8/8/8/8/8/8/K1k5 w - e9 0 1"),
        Err(FenError::InvalidEnPassant { .. })
    ));
    // en passant must sit on rank 3 or 6
    assert!(matches!(
        Board::try_from_fen("8/8/8/8/8/8/8/K1k5 w - e4 0 1"),
        Err(FenError::InvalidEnPassant { .. })
    ));
    assert!(matches!(
        Board::try_from_fen("8/8/8/8/8/8/8/K1k5 w - - x 1"),
        Err(FenError::InvalidCounter { .. })
    ));
    assert!(matches!(
        Board::try_from_fen("8/8/8/8/8/8/8/K1k5 w - - 0 0"),
        Err(FenError::InvalidCounter { .. })
    ));
}

#[test]
fn hash_depends_only_on_semantic_fields() {
    // the same position reached by different move orders hashes equally
    let mut a = Board::new();
    for mv in ["e2e4", "e7e5", "g1f3"] {
        a.make_move_uci(mv).unwrap();
    }
    let mut b = Board::new();
    for mv in ["g1f3", "e7e5", "e2e4"] {
        b.make_move_uci(mv).unwrap();
    }
    // not equal: the e2e4 double push just happened in b, so an ep file is hashed
    assert_ne!(a.hash(), b.hash());

    // equal once both have no en-passant square and identical placement
    let c = Board::from_fen(&a.to_fen());
    assert_eq!(a.hash(), c.hash());
}

#[test]
fn move_parsing_is_case_insensitive() {
    let mut board = Board::new();
    let mv = board.parse_move("E2E4").unwrap();
    assert_eq!(mv.to_string(), "e2e4");
}

#[test]
fn move_parsing_rejects_garbage() {
    let mut board = Board::new();
    assert!(board.parse_move("e2").is_err());
    assert!(board.parse_move("z2e4").is_err());
    assert!(board.parse_move("e2e4qq").is_err());
    assert!(board.parse_move("e2e5").is_err()); // not a legal pawn move
    assert!(board.parse_move("e7e8k").is_err()); // king promotion
}

#[test]
fn promotion_move_parses_exactly() {
    let mut board = Board::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
    let mv = board.parse_move("a7a8n").unwrap();
    assert_eq!(mv.promotion_piece(), Some(Piece::Knight));
    // a bare a7a8 without a promotion letter matches no legal move
    assert!(board.parse_move("a7a8").is_err());
}
