//! # Derived-Facts Reader
//!
//! Pure read-only projections over current match state. These hold no state
//! of their own and are recomputed from the bracket on every call; every
//! engine transition leaves the bracket fully consistent, so they may be read
//! at any time between writes.

use crate::{Bracket, Finals, Match};

/// Returns the winners-side finalist: the declared winner of the
/// highest-round, slot-1 winners match, or `None` while undecided.
pub fn hot_seat(bracket: &Bracket) -> Option<&str> {
    side_final(&bracket.winners)?.winner()
}

/// Returns the losers-side finalist, or `None` while undecided.
///
/// Always `None` for a single elimination bracket.
pub fn losers_finalist(bracket: &Bracket) -> Option<&str> {
    side_final(&bracket.losers)?.winner()
}

/// Returns the third-place finisher: the declared loser of the losers-side
/// final, usable once that match is locked.
pub fn third_place(bracket: &Bracket) -> Option<&str> {
    side_final(&bracket.losers)?.loser()
}

/// Returns the finishing places known so far: champion, runner-up, third.
///
/// Undecided places are `None`, matching the blank entries the Calcutta
/// collaborator expects.
pub fn placements(bracket: &Bracket, finals: &Finals) -> Vec<Option<String>> {
    vec![
        finals.champion.clone(),
        finals.runner_up.clone(),
        third_place(bracket).map(str::to_owned),
    ]
}

/// Returns the highest-round, slot-1 match of a side.
pub(crate) fn side_final(matches: &[Match]) -> Option<&Match> {
    let round = matches.iter().map(|m| m.round).max()?;
    matches.iter().find(|m| m.round == round && m.id.slot == 1)
}
