//! X01 checkout suggestions
//!
//! Double-out finishes come from a table of conventional routes. Anything the
//! table cannot answer (single-out, or a route longer than the darts left in
//! the visit) falls back to an exhaustive 1/2/3-dart search.

use serde::{Deserialize, Serialize};

use crate::config::OutRule;
use crate::dart::{all_scoring_darts, describe, Dart};

/// Highest score that can be finished in three darts
pub const MAX_CHECKOUT: u32 = 170;

/// Scores from 2 to 170 with no three-dart double-out finish
pub const BOGEY_NUMBERS: [u32; 7] = [159, 162, 163, 165, 166, 168, 169];

/// A finishing route
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    pub darts: Vec<Dart>,
    pub description: String,
}

impl Checkout {
    fn from_darts(darts: Vec<Dart>) -> Self {
        let description = describe(&darts);
        Self { darts, description }
    }
}

/// Conventional double-out routes, indexed by score
static COMMON_CHECKOUTS: [Option<&str>; 171] = [
    None, None, Some("D1"), Some("1 D1"), Some("D2"), Some("1 D2"), Some("D3"), Some("3 D2"),
    Some("D4"), Some("1 D4"), Some("D5"), Some("3 D4"), Some("D6"), Some("5 D4"), Some("D7"),
    Some("7 D4"), Some("D8"), Some("1 D8"), Some("D9"), Some("3 D8"), Some("D10"), Some("5 D8"),
    Some("D11"), Some("7 D8"), Some("D12"), Some("9 D8"), Some("D13"), Some("11 D8"), Some("D14"),
    Some("13 D8"), Some("D15"), Some("15 D8"), Some("D16"), Some("1 D16"), Some("D17"),
    Some("3 D16"), Some("D18"), Some("5 D16"), Some("D19"), Some("7 D16"), Some("D20"),
    // 41-60
    Some("9 D16"), Some("10 D16"), Some("3 D20"), Some("12 D16"), Some("13 D16"), Some("6 D20"),
    Some("15 D16"), Some("16 D16"), Some("9 D20"), Some("Bull"), Some("11 D20"), Some("12 D20"),
    Some("13 D20"), Some("14 D20"), Some("15 D20"), Some("16 D20"), Some("17 D20"),
    Some("18 D20"), Some("19 D20"), Some("20 D20"),
    // 61-100
    Some("T15 D8"), Some("T10 D16"), Some("T13 D12"), Some("T16 D8"), Some("T19 D4"),
    Some("T10 D18"), Some("T17 D8"), Some("T20 D4"), Some("T19 D6"), Some("T18 D8"),
    Some("T13 D16"), Some("T16 D12"), Some("T19 D8"), Some("T14 D16"), Some("T17 D12"),
    Some("T20 D8"), Some("T19 D10"), Some("T18 D12"), Some("T13 D20"), Some("T20 D10"),
    Some("T19 D12"), Some("Bull D16"), Some("T17 D16"), Some("T20 D12"), Some("T15 D20"),
    Some("T18 D16"), Some("T17 D18"), Some("T16 D20"), Some("T19 D16"), Some("T20 D15"),
    Some("T17 D20"), Some("T20 D16"), Some("T19 D18"), Some("T18 D20"), Some("T19 D19"),
    Some("T20 D18"), Some("T19 D20"), Some("T20 D19"), Some("T19 10 D16"), Some("T20 D20"),
    // 101-130
    Some("T17 Bull"), Some("T20 10 D16"), Some("T19 10 D18"), Some("T18 Bull"),
    Some("T20 13 D16"), Some("T20 10 D18"), Some("T19 Bull"), Some("T20 16 D16"),
    Some("T20 9 D20"), Some("T20 Bull"), Some("T20 11 D20"), Some("T20 12 D20"),
    Some("T20 13 D20"), Some("T20 14 D20"), Some("T20 15 D20"), Some("T20 16 D20"),
    Some("T20 17 D20"), Some("T20 18 D20"), Some("T19 T12 D13"), Some("T20 20 D20"),
    Some("T20 T11 D14"), Some("T18 T20 D4"), Some("T19 T16 D9"), Some("T20 T16 D8"),
    Some("25 T20 D20"), Some("T19 T19 D6"), Some("T20 T17 D8"), Some("T18 T14 D16"),
    Some("T19 T16 D12"), Some("T20 T18 D8"),
    // 131-170
    Some("T20 T13 D16"), Some("T20 T16 D12"), Some("T20 T19 D8"), Some("T20 T14 D16"),
    Some("T20 T17 D12"), Some("T20 T20 D8"), Some("T20 T19 D10"), Some("T20 T18 D12"),
    Some("T20 T13 D20"), Some("T20 T20 D10"), Some("T20 T19 D12"), Some("T20 T14 D20"),
    Some("T20 T17 D16"), Some("T20 T20 D12"), Some("T20 T15 D20"), Some("T20 T18 D16"),
    Some("T20 T17 D18"), Some("T20 T16 D20"), Some("T20 T19 D16"), Some("T20 T18 D18"),
    Some("T20 T17 D20"), Some("T20 T20 D16"), Some("T20 T19 D18"), Some("T20 T18 D20"),
    Some("T20 T19 D19"), Some("T20 T20 D18"), Some("T20 T19 D20"), Some("T20 T20 D19"),
    None, Some("T20 T20 D20"), Some("T20 T17 Bull"), None, None, Some("T20 T18 Bull"), None,
    None, Some("T20 T19 Bull"), None, None, Some("T20 T20 Bull"),
];

/// Table route for a double-out score, parsed into darts
pub fn table_checkout(score: u32) -> Option<Checkout> {
    let route = (*COMMON_CHECKOUTS.get(score as usize)?)?;
    let darts = route
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<Vec<Dart>, _>>()
        .ok()?;
    Some(Checkout {
        darts,
        description: route.to_string(),
    })
}

/// Best suggestion for the player at the oche: the conventional route when it
/// fits in the darts left, otherwise whatever the search finds.
pub fn suggest_checkout(score: u32, darts_remaining: usize, out_rule: OutRule) -> Option<Checkout> {
    if score > MAX_CHECKOUT || darts_remaining == 0 {
        return None;
    }
    if out_rule == OutRule::Double {
        if let Some(checkout) = table_checkout(score) {
            if checkout.darts.len() <= darts_remaining {
                return Some(checkout);
            }
        }
    }
    calculate_checkout(score, darts_remaining, out_rule)
}

/// Search for the shortest finish of `score` within `darts_remaining` darts
pub fn calculate_checkout(score: u32, darts_remaining: usize, out_rule: OutRule) -> Option<Checkout> {
    if score > MAX_CHECKOUT || score < 1 || darts_remaining == 0 {
        return None;
    }
    if score == 1 {
        return match out_rule {
            OutRule::Single => Some(Checkout::from_darts(vec![Dart::single(1)])),
            OutRule::Double => None,
        };
    }

    let finishers = finishing_darts(out_rule);
    let leaders = leading_darts();

    for count in 1..=darts_remaining.min(3) {
        let found = match count {
            1 => one_dart(score, &finishers),
            2 => two_darts(score, out_rule, &leaders, &finishers),
            _ => three_darts(score, out_rule, &leaders, &finishers),
        };
        if let Some(darts) = found {
            return Some(Checkout::from_darts(darts));
        }
    }
    None
}

// ============================================================================
// SEARCH HELPERS
// ============================================================================

/// Darts allowed to finish under the out rule
fn finishing_darts(out_rule: OutRule) -> Vec<Dart> {
    let all = all_scoring_darts();
    match out_rule {
        OutRule::Single => all,
        OutRule::Double => all.into_iter().filter(Dart::is_double).collect(),
    }
}

/// Setup darts, highest value first
fn leading_darts() -> Vec<Dart> {
    let mut darts = all_scoring_darts();
    darts.sort_by(|a, b| b.value().cmp(&a.value()));
    darts
}

fn finish_with(remaining: u32, finishers: &[Dart]) -> Option<Dart> {
    finishers.iter().copied().find(|d| d.value() == remaining)
}

/// Remainder after a setup dart, or None if the route is dead
fn after_setup(score: u32, dart: Dart, out_rule: OutRule) -> Option<u32> {
    let remaining = score.checked_sub(dart.value())?;
    if remaining == 0 || (out_rule == OutRule::Double && remaining == 1) {
        return None;
    }
    Some(remaining)
}

fn one_dart(score: u32, finishers: &[Dart]) -> Option<Vec<Dart>> {
    finish_with(score, finishers).map(|d| vec![d])
}

fn two_darts(score: u32, out_rule: OutRule, leaders: &[Dart], finishers: &[Dart]) -> Option<Vec<Dart>> {
    leaders.iter().find_map(|&first| {
        let remaining = after_setup(score, first, out_rule)?;
        finish_with(remaining, finishers).map(|last| vec![first, last])
    })
}

fn three_darts(score: u32, out_rule: OutRule, leaders: &[Dart], finishers: &[Dart]) -> Option<Vec<Dart>> {
    leaders.iter().find_map(|&first| {
        let after_first = after_setup(score, first, out_rule)?;
        leaders.iter().find_map(|&second| {
            let remaining = after_setup(after_first, second, out_rule)?;
            finish_with(remaining, finishers).map(|last| vec![first, second, last])
        })
    })
}
