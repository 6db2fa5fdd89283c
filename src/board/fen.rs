//! FEN parsing and serialization, plus UCI move-string translation.

use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::{
    file_of_char, rank_of_char, rights_to_fen, Board, Color, Move, Piece, Square,
    CASTLE_BLACK_KING, CASTLE_BLACK_QUEEN, CASTLE_WHITE_KING, CASTLE_WHITE_QUEEN,
};

impl Board {
    /// Parse the standard six-field FEN record.
    ///
    /// Rejects records with a wrong field count, rank runs that do not cover
    /// eight files, and out-of-range counters.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(FenError::WrongFieldCount { found: parts.len() });
        }

        let mut board = Board::empty();

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        for (row, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - row;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(run) = c.to_digit(10) {
                    file += run as usize;
                } else {
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { ch: c })?;
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if file >= 8 {
                        return Err(FenError::BadRankWidth {
                            rank: rank + 1,
                            files: file + 1,
                        });
                    }
                    board.set_piece(Square::new(rank, file), color, piece);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::BadRankWidth {
                    rank: rank + 1,
                    files: file,
                });
            }
        }

        board.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                board.castling_rights |= match c {
                    'K' => CASTLE_WHITE_KING,
                    'Q' => CASTLE_WHITE_QUEEN,
                    'k' => CASTLE_BLACK_KING,
                    'q' => CASTLE_BLACK_QUEEN,
                    _ => return Err(FenError::InvalidCastling { ch: c }),
                };
            }
        }

        board.ep_target = match parts[3] {
            "-" => None,
            ep => {
                let sq: Square = ep.parse().map_err(|_| FenError::InvalidEnPassant {
                    found: ep.to_string(),
                })?;
                if sq.rank() != 2 && sq.rank() != 5 {
                    return Err(FenError::InvalidEnPassant {
                        found: ep.to_string(),
                    });
                }
                Some(sq)
            }
        };

        board.halfmove_clock = parts[4].parse().map_err(|_| FenError::InvalidCounter {
            found: parts[4].to_string(),
        })?;
        board.fullmove_counter = parts[5].parse().map_err(|_| FenError::InvalidCounter {
            found: parts[5].to_string(),
        })?;
        if board.fullmove_counter == 0 {
            return Err(FenError::InvalidCounter {
                found: parts[5].to_string(),
            });
        }

        board.hash = board.compute_hash();
        Ok(board)
    }

    /// Like [`Board::try_from_fen`] but panics on invalid input.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid; intended for literals in tests.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        match Self::try_from_fen(fen) {
            Ok(board) => board,
            Err(e) => panic!("invalid FEN '{fen}': {e}"),
        }
    }

    /// Serialize the position back to FEN.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(Square::new(rank, file)) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .ep_target
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{placement} {active} {} {ep} {} {}",
            rights_to_fen(self.castling_rights),
            self.halfmove_clock,
            self.fullmove_counter
        )
    }

    /// Translate a UCI move string (`e2e4`, `a7a8q`) into the matching legal
    /// move. Letter parts are case-insensitive.
    pub fn parse_move(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        let chars: Vec<char> = uci.chars().collect();
        if chars.len() < 4 || chars.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: chars.len() });
        }

        let file_ok = |c: char| ('a'..='h').contains(&c.to_ascii_lowercase());
        let rank_ok = |c: char| ('1'..='8').contains(&c);
        if !file_ok(chars[0]) || !rank_ok(chars[1]) || !file_ok(chars[2]) || !rank_ok(chars[3]) {
            return Err(MoveParseError::InvalidSquare {
                notation: uci.to_string(),
            });
        }

        let from = Square::new(rank_of_char(chars[1]), file_of_char(chars[0]));
        let to = Square::new(rank_of_char(chars[3]), file_of_char(chars[2]));

        let promotion = if chars.len() == 5 {
            let piece = Piece::from_char(chars[4]).ok_or(MoveParseError::InvalidPromotion {
                ch: chars[4],
            })?;
            if matches!(piece, Piece::Pawn | Piece::King) {
                return Err(MoveParseError::InvalidPromotion { ch: chars[4] });
            }
            Some(piece)
        } else {
            None
        };

        let moves = self.generate_moves();
        for &mv in &moves {
            if mv.from() == from && mv.to() == to && mv.promotion_piece() == promotion {
                // Pseudo-legal match; confirm it does not expose the king.
                if self.make_move(mv) {
                    self.unmake_move();
                    return Ok(mv);
                }
            }
        }

        Err(MoveParseError::IllegalMove {
            notation: uci.to_string(),
        })
    }

    /// Parse and immediately make a UCI move.
    pub fn make_move_uci(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(uci)?;
        self.make_move(mv);
        Ok(mv)
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}
