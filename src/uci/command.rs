//! Tokenizing UCI input lines into typed commands.

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    /// `position startpos|fen <6 fields>` with an optional move list.
    Position {
        fen: Option<String>,
        moves: Vec<String>,
    },
    Go(GoParams),
    Stop,
    SetOption {
        name: String,
        value: Option<String>,
    },
    /// `perft <depth>` - not part of UCI proper but widely supported.
    Perft(usize),
    /// `print` / `d` - dump the board for debugging.
    Print,
    Quit,
    Unknown(String),
}

/// The `go` parameters, all optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub searchmoves: Vec<String>,
    pub depth: Option<u32>,
    pub nodes: Option<u64>,
    pub mate: Option<u32>,
    pub movetime: Option<u64>,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movestogo: Option<u64>,
    pub ponder: bool,
    pub infinite: bool,
}

/// Parse one whitespace-tokenized line. Returns `None` for blank lines.
#[must_use]
pub fn parse_uci_command(line: &str) -> Option<UciCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let (&first, rest) = parts.split_first()?;

    let cmd = match first {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => parse_position(rest)?,
        "go" => UciCommand::Go(parse_go(rest)),
        "stop" => UciCommand::Stop,
        "setoption" => parse_setoption(rest)?,
        "perft" => {
            let depth = rest.first().and_then(|v| v.parse().ok()).unwrap_or(1);
            UciCommand::Perft(depth)
        }
        "print" | "d" => UciCommand::Print,
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown(line.trim().to_string()),
    };
    Some(cmd)
}

fn parse_position(rest: &[&str]) -> Option<UciCommand> {
    let mut i = 0;
    let fen = match rest.first()? {
        &"startpos" => {
            i += 1;
            None
        }
        &"fen" => {
            // FEN is exactly six tokens
            if rest.len() < i + 7 {
                return None;
            }
            let fen = rest[i + 1..i + 7].join(" ");
            i += 7;
            Some(fen)
        }
        _ => return None,
    };

    let mut moves = Vec::new();
    if rest.get(i) == Some(&"moves") {
        moves.extend(rest[i + 1..].iter().map(|s| s.to_string()));
    }

    Some(UciCommand::Position { fen, moves })
}

/// Quick shape check for a move token (`e2e4`, `a7a8q`).
fn looks_like_move(token: &str) -> bool {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() < 4 || chars.len() > 5 {
        return false;
    }
    ('a'..='h').contains(&chars[0].to_ascii_lowercase())
        && ('1'..='8').contains(&chars[1])
        && ('a'..='h').contains(&chars[2].to_ascii_lowercase())
        && ('1'..='8').contains(&chars[3])
}

fn parse_go(rest: &[&str]) -> GoParams {
    let mut params = GoParams::default();
    let mut i = 0;

    let next_u64 = |rest: &[&str], i: usize| rest.get(i + 1).and_then(|v| v.parse::<u64>().ok());
    let next_u32 = |rest: &[&str], i: usize| rest.get(i + 1).and_then(|v| v.parse::<u32>().ok());

    while i < rest.len() {
        let consumed = match rest[i] {
            "searchmoves" => {
                let mut n = 1;
                while let Some(token) = rest.get(i + n) {
                    if !looks_like_move(token) {
                        break;
                    }
                    params.searchmoves.push(token.to_string());
                    n += 1;
                }
                n
            }
            "depth" => {
                params.depth = next_u32(rest, i);
                2
            }
            "nodes" => {
                params.nodes = next_u64(rest, i);
                2
            }
            "mate" => {
                params.mate = next_u32(rest, i);
                2
            }
            "movetime" => {
                params.movetime = next_u64(rest, i);
                2
            }
            "wtime" => {
                params.wtime = next_u64(rest, i);
                2
            }
            "btime" => {
                params.btime = next_u64(rest, i);
                2
            }
            "winc" => {
                params.winc = next_u64(rest, i);
                2
            }
            "binc" => {
                params.binc = next_u64(rest, i);
                2
            }
            "movestogo" => {
                params.movestogo = next_u64(rest, i);
                2
            }
            "ponder" => {
                params.ponder = true;
                1
            }
            "infinite" => {
                params.infinite = true;
                1
            }
            _ => 1,
        };
        i += consumed;
    }
    params
}

fn parse_setoption(rest: &[&str]) -> Option<UciCommand> {
    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut section = "";

    for part in rest {
        match *part {
            "name" => section = "name",
            "value" => section = "value",
            token => match section {
                "name" => name_parts.push(token),
                "value" => value_parts.push(token),
                _ => {}
            },
        }
    }

    if name_parts.is_empty() {
        return None;
    }
    Some(UciCommand::SetOption {
        name: name_parts.join(" "),
        value: if value_parts.is_empty() {
            None
        } else {
            Some(value_parts.join(" "))
        },
    })
}
