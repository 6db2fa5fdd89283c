//! Wall-clock budget allocation for a single move.

use std::time::Duration;

use log::trace;

/// Milliseconds held back so the engine never flags on its own budget.
const SAFETY_RESERVE_MS: u64 = 50;

/// Smallest budget ever handed out; stopping earlier wastes the iteration.
const MINIMUM_BUDGET_MS: u64 = 100;

/// Assumed moves left when the GUI does not say.
const DEFAULT_MOVES_TO_GO: u64 = 40;

/// Compute the time budget for the move, from the side to move's clock.
///
/// `movetime` is taken literally. Otherwise the budget is
/// `remaining / movestogo + 0.75 * increment`, less a 50 ms reserve,
/// floored at 100 ms. With no clock and no increment the search is
/// unbounded and `None` is returned.
#[must_use]
pub fn allocate(
    movetime: Option<u64>,
    remaining: Option<u64>,
    increment: Option<u64>,
    movestogo: Option<u64>,
) -> Option<Duration> {
    if let Some(ms) = movetime {
        return Some(Duration::from_millis(ms));
    }

    let remaining = remaining.unwrap_or(0);
    let increment = increment.unwrap_or(0);
    if remaining == 0 && increment == 0 {
        trace!("no time control, searching unbounded");
        return None;
    }

    let movestogo = movestogo.filter(|&m| m > 0).unwrap_or(DEFAULT_MOVES_TO_GO);
    let mut budget = remaining / movestogo + increment * 3 / 4;

    if budget > SAFETY_RESERVE_MS {
        budget -= SAFETY_RESERVE_MS;
    }
    budget = budget.max(MINIMUM_BUDGET_MS);

    trace!("time budget: {budget} ms (remaining {remaining}, increment {increment}, movestogo {movestogo})");
    Some(Duration::from_millis(budget))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movetime_is_literal() {
        assert_eq!(
            allocate(Some(1500), Some(60_000), None, None),
            Some(Duration::from_millis(1500))
        );
    }

    #[test]
    fn no_clock_means_unbounded() {
        assert_eq!(allocate(None, None, None, None), None);
        assert_eq!(allocate(None, Some(0), Some(0), None), None);
    }

    #[test]
    fn divides_remaining_by_movestogo() {
        // 60s / 40 = 1500ms, minus the 50ms reserve
        assert_eq!(
            allocate(None, Some(60_000), None, None),
            Some(Duration::from_millis(1450))
        );
        // explicit movestogo
        assert_eq!(
            allocate(None, Some(60_000), None, Some(20)),
            Some(Duration::from_millis(2950))
        );
    }

    #[test]
    fn increment_contributes_three_quarters() {
        // 40s/40 + 0.75*2000 = 1000 + 1500 = 2500, minus reserve
        assert_eq!(
            allocate(None, Some(40_000), Some(2000), None),
            Some(Duration::from_millis(2450))
        );
    }

    #[test]
    fn budget_is_floored() {
        // 400ms / 40 = 10ms -> floored to the minimum
        assert_eq!(
            allocate(None, Some(400), None, None),
            Some(Duration::from_millis(100))
        );
    }
}
