//! # Advancement State Machine
//!
//! [`TournamentEngine`] owns the current bracket, the grand-final record and
//! an undo stack of prior snapshots. It is the only place bracket matches are
//! mutated outside of undo and reset.
//!
//! Every operation is synchronous and either succeeds or is a silent no-op:
//! an unknown match id, an already-locked match or a winning slot without a
//! concrete entrant are ignored rather than raised, since a well-behaved
//! caller only issues requests from rendered state.

use crate::finals::FinalsStage;
use crate::ident::{MatchId, Side, SlotIndex};
use crate::snapshot::Snapshot;
use crate::{standings, Bracket, Finals, FinalsMode, Format, Slot};

/// The advancement state machine for one tournament bracket.
#[derive(Clone, Debug)]
pub struct TournamentEngine {
    bracket: Bracket,
    finals: Finals,
    /// State that [`reset`] restores: the post-build skeleton with the
    /// auto-bye pass folded in.
    ///
    /// [`reset`]: Self::reset
    baseline: Snapshot,
    undo_stack: Vec<Snapshot>,
    auto_resolved: bool,
}

impl TournamentEngine {
    /// Creates an engine for a freshly drawn `bracket`.
    ///
    /// Runs the one-shot auto-bye pass over winners round 1, so byes never
    /// require a manual result. The pass runs at most once per bracket
    /// lifetime.
    pub fn new(bracket: Bracket, mode: FinalsMode) -> Self {
        let finals = Finals::new(mode);
        let baseline = Snapshot {
            winners: bracket.winners.clone(),
            losers: bracket.losers.clone(),
            finals: finals.clone(),
        };

        let mut engine = Self {
            bracket,
            finals,
            baseline,
            undo_stack: Vec::new(),
            auto_resolved: false,
        };

        engine.auto_resolve_byes();
        engine.baseline = engine.snapshot();
        engine
    }

    /// Resumes an engine from a persisted `snapshot` of the same draw.
    ///
    /// `bracket` must be the skeleton built from the unchanged entrant order.
    /// The auto-bye pass is never re-applied to restored state.
    pub fn resume(bracket: Bracket, snapshot: Snapshot) -> Self {
        log::debug!(
            "Resuming bracket from snapshot with {} winners and {} losers matches",
            snapshot.winners.len(),
            snapshot.losers.len()
        );

        let mut engine = Self::new(bracket, snapshot.finals.mode);
        engine.restore(snapshot);
        engine
    }

    /// Returns a reference to the current bracket.
    #[inline]
    pub fn bracket(&self) -> &Bracket {
        &self.bracket
    }

    /// Returns a reference to the grand-final record.
    #[inline]
    pub fn finals(&self) -> &Finals {
        &self.finals
    }

    /// Returns the complete current state as an immutable value.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            winners: self.bracket.winners.clone(),
            losers: self.bracket.losers.clone(),
            finals: self.finals.clone(),
        }
    }

    /// Records `winning_slot` as the result of the match at `id`, locking the
    /// match and propagating the winner into its downstream slot.
    ///
    /// For a winners-side match in a double elimination bracket the loser is
    /// additionally dropped into the losers-side slot whose placeholder
    /// references this match.
    ///
    /// A no-op if the id is unknown, the match is locked, or the winning slot
    /// holds no concrete entrant.
    pub fn record_result(&mut self, id: MatchId, winning_slot: SlotIndex) {
        self.record_inner(id, winning_slot, false);
    }

    fn record_inner(&mut self, id: MatchId, winning_slot: SlotIndex, silent: bool) {
        let Some(m) = self.bracket.get(id) else {
            log::debug!("Ignoring result for unknown match {}", id);
            return;
        };

        if m.is_locked() {
            log::debug!("Ignoring result for locked match {}", id);
            return;
        }

        let Some(winner) = m.slot(winning_slot).entrant().map(str::to_owned) else {
            log::debug!("Slot {:?} of {} holds no entrant", winning_slot, id);
            return;
        };
        let loser = m.slot(winning_slot.other()).entrant().map(str::to_owned);

        if !silent {
            self.undo_stack.push(self.snapshot());
        }

        if let Some(m) = self.bracket.get_mut(id) {
            m.decided_slot = Some(winning_slot);
        }

        let (next_id, dest_slot) = id.destination();
        if let Some(next) = self.bracket.get_mut(next_id) {
            log::debug!("Winner of {} advances to {} slot {:?}", id, next_id, dest_slot);
            *next.slot_mut(dest_slot) = Slot::Entrant(winner);
        }

        if id.side == Side::Winners && self.bracket.format == Format::Double {
            if let Some(loser) = loser {
                self.route_loser(id, loser);
            }
        }
    }

    /// Writes the loser of `source` into the one losers-side slot whose
    /// placeholder references it. The placeholder relation is resolved by a
    /// linear scan at mutation time; the losers tree never holds live
    /// pointers into the winners tree.
    fn route_loser(&mut self, source: MatchId, name: String) {
        let target = Slot::LoserOf(source);

        let position = self
            .bracket
            .losers
            .iter()
            .position(|m| m.slot_a == target || m.slot_b == target);

        match position {
            Some(index) => {
                let m = &mut self.bracket.losers[index];
                log::debug!("Dropping loser of {} into {}", source, m.id);

                if m.slot_a == target {
                    m.slot_a = Slot::Entrant(name);
                } else {
                    m.slot_b = Slot::Entrant(name);
                }
            }
            None => log::debug!("No losers-side slot references {}", source),
        }
    }

    /// Pre-resolves winners round-1 matches where exactly one slot is a bye.
    ///
    /// These resolutions are silent: they push no undo entries and fold into
    /// the baseline instead. A single pass suffices because byes only exist
    /// in round 1 and never advance.
    fn auto_resolve_byes(&mut self) {
        if self.auto_resolved {
            return;
        }
        self.auto_resolved = true;

        let pending: Vec<(MatchId, SlotIndex)> = self
            .bracket
            .winners
            .iter()
            .filter(|m| m.round == 1 && !m.is_locked())
            .filter_map(|m| match (&m.slot_a, &m.slot_b) {
                (Slot::Entrant(_), Slot::Bye) => Some((m.id, SlotIndex::A)),
                (Slot::Bye, Slot::Entrant(_)) => Some((m.id, SlotIndex::B)),
                _ => None,
            })
            .collect();

        for (id, slot) in pending {
            log::debug!("Auto-resolving bye match {}", id);
            self.record_inner(id, slot, true);
        }
    }

    /// Records one grand-final game won by the entrant named `winner`.
    ///
    /// A no-op unless both finalists are known, `winner` is one of them and
    /// the finals are not already done. Sequencing follows the configured
    /// [`FinalsMode`]: under `ResetIfNeeded` the losers-side finalist must
    /// win twice, while the hot seat needs only one win.
    pub fn record_grand_final(&mut self, winner: &str) {
        if self.finals.stage == FinalsStage::Done {
            log::debug!("Ignoring grand final result: finals already done");
            return;
        }

        let Some((hot_seat, challenger)) = self.finalists() else {
            log::debug!("Ignoring grand final result: finalists not yet known");
            return;
        };

        let (other, from_hot_seat) = if winner == hot_seat {
            (challenger, true)
        } else if winner == challenger {
            (hot_seat, false)
        } else {
            log::debug!("Ignoring grand final result: {} is not a finalist", winner);
            return;
        };

        // In single elimination the winners final is itself the decisive
        // contest; either winner settles it, there is no reset game.
        let decisive = from_hot_seat || self.bracket.format == Format::Single;

        self.undo_stack.push(self.snapshot());
        self.finals.record_game(winner, &other, decisive);
    }

    /// Returns `(hot seat, challenger)` once both finalists are known.
    ///
    /// For double elimination these are the two bracket finalists. For single
    /// elimination the winners final itself is the decisive contest, so its
    /// two participants stand in; there is no reset and the hot-seat rule
    /// never forces a second game.
    fn finalists(&self) -> Option<(String, String)> {
        match self.bracket.format {
            Format::Double => {
                let hot_seat = standings::hot_seat(&self.bracket)?;
                let challenger = standings::losers_finalist(&self.bracket)?;
                Some((hot_seat.to_owned(), challenger.to_owned()))
            }
            Format::Single => {
                let m = standings::side_final(&self.bracket.winners)?;
                Some((m.slot_a.entrant()?.to_owned(), m.slot_b.entrant()?.to_owned()))
            }
        }
    }

    /// Returns the winners-side finalist, if decided.
    #[inline]
    pub fn hot_seat(&self) -> Option<&str> {
        standings::hot_seat(&self.bracket)
    }

    /// Returns the losers-side finalist, if decided.
    #[inline]
    pub fn losers_finalist(&self) -> Option<&str> {
        standings::losers_finalist(&self.bracket)
    }

    /// Returns the known finishing places: champion, runner-up, third.
    #[inline]
    pub fn placements(&self) -> Vec<Option<String>> {
        standings::placements(&self.bracket, &self.finals)
    }

    /// Reverts the most recent manual mutation, restoring the snapshot taken
    /// immediately before it. A no-op if nothing has been recorded.
    pub fn undo(&mut self) {
        match self.undo_stack.pop() {
            Some(snapshot) => self.restore(snapshot),
            None => log::debug!("Undo stack is empty"),
        }
    }

    /// Discards the undo stack and restores the post-build state.
    ///
    /// The draw itself is not re-run; the entrant order is unchanged and the
    /// finals return to pending.
    pub fn reset(&mut self) {
        log::debug!("Resetting bracket to the post-build state");

        self.undo_stack.clear();
        self.restore(self.baseline.clone());
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.bracket.winners = snapshot.winners;
        self.bracket.losers = snapshot.losers;
        self.finals = snapshot.finals;
    }
}
