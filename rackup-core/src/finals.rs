//! Grand final state.
//!
//! Once both sides of a double elimination bracket are resolved to a single
//! remaining contender each, the [`Finals`] value decides the champion. The
//! stage moves monotonically `Pending` -> (`AwaitingReset` ->) `Done`; only a
//! whole-bracket reset returns it to `Pending`.

use serde::{Deserialize, Serialize};

/// How the grand final is contested.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalsMode {
    /// A single contest decides the champion.
    #[default]
    SingleDecisive,
    /// The losers-side finalist must beat the winners-side finalist twice:
    /// winning game one forces a second, decisive contest.
    ResetIfNeeded,
}

/// The lifecycle stage of the grand final.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalsStage {
    #[default]
    Pending,
    /// Game one went to the losers-side finalist; the bracket reset game is
    /// still to be played.
    AwaitingReset,
    Done,
}

/// The grand final record of a tournament.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finals {
    pub mode: FinalsMode,
    pub stage: FinalsStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runner_up: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_game_winner: Option<String>,
}

impl Finals {
    /// Creates a new pending `Finals` with the given mode.
    pub fn new(mode: FinalsMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Records one grand-final game between `winner` and `other`.
    ///
    /// `winner_from_hot_seat` marks whether the game winner is the
    /// winners-side finalist, who only ever needs a single win. The caller has
    /// already verified that both names are the known finalists and that the
    /// stage is not [`FinalsStage::Done`].
    pub(crate) fn record_game(&mut self, winner: &str, other: &str, winner_from_hot_seat: bool) {
        match (self.mode, self.stage) {
            (FinalsMode::SingleDecisive, _) => self.decide(winner, other),
            (FinalsMode::ResetIfNeeded, FinalsStage::Pending) => {
                if winner_from_hot_seat {
                    // The hot seat never lost a match; one win settles it.
                    self.decide(winner, other);
                } else {
                    log::debug!("Grand final game one to {}, bracket reset", winner);
                    self.first_game_winner = Some(winner.to_owned());
                    self.stage = FinalsStage::AwaitingReset;
                }
            }
            (FinalsMode::ResetIfNeeded, FinalsStage::AwaitingReset) => self.decide(winner, other),
            (_, FinalsStage::Done) => {}
        }
    }

    fn decide(&mut self, champion: &str, runner_up: &str) {
        log::debug!("Champion decided: {}", champion);

        self.champion = Some(champion.to_owned());
        self.runner_up = Some(runner_up.to_owned());
        self.stage = FinalsStage::Done;
    }
}

#[cfg(test)]
mod tests {
    use super::{Finals, FinalsMode, FinalsStage};

    #[test]
    fn test_single_decisive() {
        let mut finals = Finals::new(FinalsMode::SingleDecisive);
        finals.record_game("Alice", "Bob", false);

        assert_eq!(finals.stage, FinalsStage::Done);
        assert_eq!(finals.champion.as_deref(), Some("Alice"));
        assert_eq!(finals.runner_up.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_reset_not_needed_when_hot_seat_wins() {
        let mut finals = Finals::new(FinalsMode::ResetIfNeeded);
        finals.record_game("Alice", "Bob", true);

        assert_eq!(finals.stage, FinalsStage::Done);
        assert_eq!(finals.champion.as_deref(), Some("Alice"));
        assert_eq!(finals.first_game_winner, None);
    }

    #[test]
    fn test_bracket_reset_sequence() {
        let mut finals = Finals::new(FinalsMode::ResetIfNeeded);

        // The losers-side finalist takes game one: no champion yet.
        finals.record_game("Bob", "Alice", false);
        assert_eq!(finals.stage, FinalsStage::AwaitingReset);
        assert_eq!(finals.champion, None);
        assert_eq!(finals.first_game_winner.as_deref(), Some("Bob"));

        // The reset game decides unconditionally.
        finals.record_game("Bob", "Alice", false);
        assert_eq!(finals.stage, FinalsStage::Done);
        assert_eq!(finals.champion.as_deref(), Some("Bob"));
        assert_eq!(finals.runner_up.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_reset_game_can_go_either_way() {
        let mut finals = Finals::new(FinalsMode::ResetIfNeeded);

        finals.record_game("Bob", "Alice", false);
        finals.record_game("Alice", "Bob", true);

        assert_eq!(finals.stage, FinalsStage::Done);
        assert_eq!(finals.champion.as_deref(), Some("Alice"));
    }
}
