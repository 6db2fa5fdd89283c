//! Engine configuration set through `setoption`.

use crate::search::DEFAULT_TT_MB;

/// Effect of a successfully applied option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OptionAction {
    /// The transposition table must be reallocated to this many megabytes.
    ResizeHash(usize),
    /// Thread count noted; advisory in the single-threaded core.
    None,
}

/// The recognized options are a closed set: `Hash` and `Threads`.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Transposition table size in megabytes.
    pub hash_mb: usize,
    /// Advisory search thread count.
    pub threads: usize,
}

impl EngineOptions {
    #[must_use]
    pub fn new() -> Self {
        EngineOptions {
            hash_mb: DEFAULT_TT_MB,
            threads: 1,
        }
    }

    /// Print the `uci` handshake option declarations.
    pub(crate) fn print_declarations(&self) {
        println!("option name Hash type spin default {} min 1 max 65536", self.hash_mb);
        println!("option name Threads type spin default {} min 1 max 256", self.threads);
    }

    /// Apply a `setoption` pair. Unknown names and unparsable values are
    /// rejected with an error string.
    pub(crate) fn apply(
        &mut self,
        name: &str,
        value: Option<&str>,
    ) -> Result<OptionAction, String> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hash" => {
                let mb = value
                    .and_then(|v| v.parse::<usize>().ok())
                    .filter(|&mb| (1..=65536).contains(&mb))
                    .ok_or_else(|| format!("invalid Hash value '{}'", value.unwrap_or("")))?;
                self.hash_mb = mb;
                Ok(OptionAction::ResizeHash(mb))
            }
            "threads" => {
                let threads = value
                    .and_then(|v| v.parse::<usize>().ok())
                    .filter(|&n| (1..=256).contains(&n))
                    .ok_or_else(|| format!("invalid Threads value '{}'", value.unwrap_or("")))?;
                self.threads = threads;
                Ok(OptionAction::None)
            }
            other => Err(format!("unknown option '{other}'")),
        }
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions::new()
    }
}
