//! Single-elimination bracket state machine.
//!
//! Pure domain logic with no IO and no async. A [`Bracket`] is created once
//! per tournament sitting from exactly 16 validated entrants, mutated one
//! matchup at a time through [`Bracket::record_winner`], and read out as a
//! total ranking once the final is decided. Invalid states are rejected at
//! construction and at every transition; deserialization re-validates.

use std::collections::HashSet;
use std::fmt;

use rand::{Rng, RngExt as _};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use playoff_types::{Principle, PrincipleId};

/// A tournament always runs over exactly this many principles.
pub const ENTRANT_COUNT: usize = 16;

// ── Stages ───────────────────────────────────────────────────

/// The four rounds of a 16-entrant bracket, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    RoundOf16,
    Quarterfinals,
    Semifinals,
    Finals,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::RoundOf16,
        Stage::Quarterfinals,
        Stage::Semifinals,
        Stage::Finals,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Stage::RoundOf16 => "Round of 16",
            Stage::Quarterfinals => "Quarterfinals",
            Stage::Semifinals => "Semifinals",
            Stage::Finals => "Finals",
        }
    }

    /// Matchups played at this stage. Strictly halves per round.
    #[must_use]
    pub const fn matchup_count(self) -> usize {
        match self {
            Stage::RoundOf16 => 8,
            Stage::Quarterfinals => 4,
            Stage::Semifinals => 2,
            Stage::Finals => 1,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Errors ───────────────────────────────────────────────────

/// Rejected tournament seed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("a tournament requires exactly 16 principles (got {0})")]
    WrongCount(usize),
    #[error("duplicate principle id {0} in seed input")]
    DuplicateId(PrincipleId),
}

/// Rejected winner recording. These are caller-sequencing bugs, never
/// transient conditions; the bracket is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchupError {
    #[error("round {round} has no matchup {matchup}")]
    NoSuchMatchup { round: usize, matchup: usize },
    #[error("matchup {id} is not yet populated")]
    SlotsUnfilled { id: String },
    #[error("matchup {id} is already decided")]
    AlreadyComplete { id: String },
    #[error("{winner} is not a participant in matchup {id}")]
    WinnerNotInMatchup { id: String, winner: PrincipleId },
}

/// Ranking requested before the final was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the tournament is not finished")]
pub struct IncompleteTournamentError;

/// Structural validation failure on a deserialized bracket.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketValidationError {
    #[error("a bracket has exactly 4 rounds (got {0})")]
    WrongRoundCount(usize),
    #[error("round {index} must be the {expected} stage")]
    StageOutOfOrder { index: usize, expected: Stage },
    #[error("{stage} holds {expected} matchups (got {actual})")]
    WrongMatchupCount {
        stage: Stage,
        expected: usize,
        actual: usize,
    },
    #[error("opening matchup {id} has an unseeded slot")]
    UnseededOpeningSlot { id: String },
    #[error("principle {id} is seeded more than once")]
    DuplicateEntrant { id: PrincipleId },
}

// ── Matchup ──────────────────────────────────────────────────

/// A single pairwise contest.
///
/// Slots are `None` until the feeding round completes. The completion flag
/// is not stored: a matchup is complete exactly when `winner` is set, so the
/// "complete implies winner is one of the slots" invariant cannot drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matchup {
    id: String,
    slot_a: Option<Principle>,
    slot_b: Option<Principle>,
    winner: Option<Principle>,
}

impl Matchup {
    fn seeded(id: String, slot_a: Option<Principle>, slot_b: Option<Principle>) -> Self {
        Self {
            id,
            slot_a,
            slot_b,
            winner: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn slot_a(&self) -> Option<&Principle> {
        self.slot_a.as_ref()
    }

    #[must_use]
    pub fn slot_b(&self) -> Option<&Principle> {
        self.slot_b.as_ref()
    }

    #[must_use]
    pub fn winner(&self) -> Option<&Principle> {
        self.winner.as_ref()
    }

    /// The slot the winner did not take. `None` until decided.
    #[must_use]
    pub fn loser(&self) -> Option<&Principle> {
        let winner = self.winner.as_ref()?;
        match (self.slot_a.as_ref(), self.slot_b.as_ref()) {
            (Some(a), Some(b)) if a.id() == winner.id() => Some(b),
            (Some(a), Some(_)) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.winner.is_some()
    }

    /// Populated on both sides and not yet decided.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.slot_a.is_some() && self.slot_b.is_some() && self.winner.is_none()
    }
}

impl<'de> Deserialize<'de> for Matchup {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct MatchupWire {
            id: String,
            slot_a: Option<Principle>,
            slot_b: Option<Principle>,
            winner: Option<Principle>,
        }

        let wire = MatchupWire::deserialize(deserializer)?;
        if let Some(winner) = &wire.winner {
            let in_slots = [&wire.slot_a, &wire.slot_b]
                .into_iter()
                .flatten()
                .any(|slot| slot.id() == winner.id());
            if !in_slots {
                return Err(D::Error::custom(format!(
                    "winner {} is not a participant in matchup {}",
                    winner.id(),
                    wire.id
                )));
            }
        }
        Ok(Self {
            id: wire.id,
            slot_a: wire.slot_a,
            slot_b: wire.slot_b,
            winner: wire.winner,
        })
    }
}

// ── Round ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    stage: Stage,
    matchups: Vec<Matchup>,
}

impl Round {
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn matchups(&self) -> &[Matchup] {
        &self.matchups
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matchups.iter().all(Matchup::is_complete)
    }
}

// ── Open-matchup query ───────────────────────────────────────

/// The single currently playable matchup, located by scanning rounds in
/// order, then matchups within a round in order.
#[derive(Debug, Clone, Copy)]
pub struct OpenMatchup<'a> {
    round_index: usize,
    matchup_index: usize,
    stage: Stage,
    matchup: &'a Matchup,
}

impl<'a> OpenMatchup<'a> {
    #[must_use]
    pub const fn round_index(self) -> usize {
        self.round_index
    }

    #[must_use]
    pub const fn matchup_index(self) -> usize {
        self.matchup_index
    }

    #[must_use]
    pub const fn stage(self) -> Stage {
        self.stage
    }

    #[must_use]
    pub const fn matchup(self) -> &'a Matchup {
        self.matchup
    }
}

/// Decided versus total matchup counts across the whole bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    decided: usize,
    total: usize,
}

impl Progress {
    #[must_use]
    pub const fn decided(self) -> usize {
        self.decided
    }

    #[must_use]
    pub const fn total(self) -> usize {
        self.total
    }
}

// ── Bracket ──────────────────────────────────────────────────

/// A 16-entrant single-elimination bracket.
///
/// Only the rounds are stored; the current matchup and overall completion
/// are always computed so progress can never diverge from the recorded
/// results. Construction goes through [`Bracket::seeded`] (random seeding)
/// or [`Bracket::from_seeding`] (caller-supplied order, used for replays and
/// tests); both validate cardinality and id distinctness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bracket {
    rounds: Vec<Round>,
}

impl<'de> Deserialize<'de> for Bracket {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct BracketWire {
            rounds: Vec<Round>,
        }
        let wire = BracketWire::deserialize(deserializer)?;
        let bracket = Self {
            rounds: wire.rounds,
        };
        bracket.validate().map_err(D::Error::custom)?;
        Ok(bracket)
    }
}

impl Bracket {
    /// Build a bracket from 16 entrants with unbiased random seeding.
    ///
    /// Fisher-Yates: for each index from the last down to 1, swap with a
    /// uniformly chosen index at or below it. Seeding is randomized once;
    /// later rounds pair winners deterministically.
    pub fn seeded<R: Rng + ?Sized>(
        entrants: Vec<Principle>,
        rng: &mut R,
    ) -> Result<Self, SeedError> {
        let mut entrants = validate_entrants(entrants)?;
        for i in (1..entrants.len()).rev() {
            let j = rng.random_range(0..=i);
            entrants.swap(i, j);
        }
        Ok(Self::paired(entrants))
    }

    /// Build a bracket pairing entrants in the order given, without
    /// shuffling. Separates pairing logic from randomness.
    pub fn from_seeding(entrants: Vec<Principle>) -> Result<Self, SeedError> {
        Ok(Self::paired(validate_entrants(entrants)?))
    }

    fn paired(order: Vec<Principle>) -> Self {
        let mut entrants = order.into_iter();
        let mut rounds = Vec::with_capacity(Stage::ALL.len());

        let opening = (0..Stage::RoundOf16.matchup_count())
            .map(|index| Matchup::seeded(matchup_id(0, index), entrants.next(), entrants.next()))
            .collect();
        rounds.push(Round {
            stage: Stage::RoundOf16,
            matchups: opening,
        });

        for (round_index, stage) in Stage::ALL.into_iter().enumerate().skip(1) {
            let matchups = (0..stage.matchup_count())
                .map(|index| Matchup::seeded(matchup_id(round_index, index), None, None))
                .collect();
            rounds.push(Round { stage, matchups });
        }

        Self { rounds }
    }

    fn validate(&self) -> Result<(), BracketValidationError> {
        if self.rounds.len() != Stage::ALL.len() {
            return Err(BracketValidationError::WrongRoundCount(self.rounds.len()));
        }
        for (index, (round, expected)) in self.rounds.iter().zip(Stage::ALL).enumerate() {
            if round.stage != expected {
                return Err(BracketValidationError::StageOutOfOrder { index, expected });
            }
            if round.matchups.len() != expected.matchup_count() {
                return Err(BracketValidationError::WrongMatchupCount {
                    stage: expected,
                    expected: expected.matchup_count(),
                    actual: round.matchups.len(),
                });
            }
        }

        let mut seen = HashSet::new();
        for matchup in &self.rounds[0].matchups {
            for slot in [&matchup.slot_a, &matchup.slot_b] {
                let Some(principle) = slot else {
                    return Err(BracketValidationError::UnseededOpeningSlot {
                        id: matchup.id.clone(),
                    });
                };
                if !seen.insert(principle.id().clone()) {
                    return Err(BracketValidationError::DuplicateEntrant {
                        id: principle.id().clone(),
                    });
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// The first incomplete matchup whose both slots are populated.
    ///
    /// `None` once the tournament is finished. By construction there is
    /// always exactly one playable matchup until then, since a round's slots
    /// fill only when the full prior round completes.
    #[must_use]
    pub fn open_matchup(&self) -> Option<OpenMatchup<'_>> {
        for (round_index, round) in self.rounds.iter().enumerate() {
            for (matchup_index, matchup) in round.matchups.iter().enumerate() {
                if matchup.is_open() {
                    return Some(OpenMatchup {
                        round_index,
                        matchup_index,
                        stage: round.stage,
                        matchup,
                    });
                }
            }
        }
        None
    }

    /// Whether the final matchup has been decided. Monotonic: once true it
    /// stays true, because a decided matchup cannot be re-recorded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rounds
            .last()
            .and_then(|round| round.matchups.first())
            .is_some_and(Matchup::is_complete)
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        let total = self.rounds.iter().map(|r| r.matchups.len()).sum();
        let decided = self
            .rounds
            .iter()
            .flat_map(|r| &r.matchups)
            .filter(|m| m.is_complete())
            .count();
        Progress { decided, total }
    }

    /// Record the winner of one matchup. The only mutating operation.
    ///
    /// Fails, leaving the bracket untouched, when the matchup does not
    /// exist, has an unfilled slot, is already decided, or the given winner
    /// is neither slot. Re-recording a decided matchup is an error by
    /// design, not a no-op.
    ///
    /// When the round completes, winners are paired consecutively in matchup
    /// order into the next round (matchup 0 and 1 feed matchup 0, and so
    /// on), mirroring the seeding order exactly.
    pub fn record_winner(
        &mut self,
        round_index: usize,
        matchup_index: usize,
        winner: &PrincipleId,
    ) -> Result<(), MatchupError> {
        let matchup = self
            .rounds
            .get_mut(round_index)
            .and_then(|round| round.matchups.get_mut(matchup_index))
            .ok_or(MatchupError::NoSuchMatchup {
                round: round_index,
                matchup: matchup_index,
            })?;

        let (Some(a), Some(b)) = (&matchup.slot_a, &matchup.slot_b) else {
            return Err(MatchupError::SlotsUnfilled {
                id: matchup.id.clone(),
            });
        };
        if matchup.winner.is_some() {
            return Err(MatchupError::AlreadyComplete {
                id: matchup.id.clone(),
            });
        }
        let chosen = if a.id() == winner {
            a.clone()
        } else if b.id() == winner {
            b.clone()
        } else {
            return Err(MatchupError::WinnerNotInMatchup {
                id: matchup.id.clone(),
                winner: winner.clone(),
            });
        };
        tracing::debug!(matchup = %matchup.id, winner = %winner, "matchup decided");
        matchup.winner = Some(chosen);

        if self.rounds[round_index].is_complete() && round_index + 1 < self.rounds.len() {
            let winners: Vec<Principle> = self.rounds[round_index]
                .matchups
                .iter()
                .filter_map(|m| m.winner.clone())
                .collect();
            let next = &mut self.rounds[round_index + 1];
            for (matchup, pair) in next.matchups.iter_mut().zip(winners.chunks_exact(2)) {
                matchup.slot_a = Some(pair[0].clone());
                matchup.slot_b = Some(pair[1].clone());
            }
            tracing::debug!(stage = next.stage.label(), "round complete, winners advanced");
        }
        Ok(())
    }

    /// Reconstruct the total order of all 16 entrants from a finished
    /// bracket.
    ///
    /// Rank 1 is the champion, rank 2 the final's loser, then each earlier
    /// round contributes its losers in matchup order. Entrants eliminated in
    /// the same round are therefore ordered by matchup index alone; this is
    /// a deliberate modeling simplification, not a skill rating.
    pub fn final_ranking(&self) -> Result<Vec<Principle>, IncompleteTournamentError> {
        if !self.is_complete() {
            return Err(IncompleteTournamentError);
        }
        let champion = self
            .rounds
            .last()
            .and_then(|round| round.matchups.first())
            .and_then(|matchup| matchup.winner.clone())
            .ok_or(IncompleteTournamentError)?;

        let mut ranking = Vec::with_capacity(ENTRANT_COUNT);
        ranking.push(champion);
        for round in self.rounds.iter().rev() {
            for matchup in &round.matchups {
                let loser = matchup.loser().cloned().ok_or(IncompleteTournamentError)?;
                ranking.push(loser);
            }
        }
        Ok(ranking)
    }
}

fn validate_entrants(entrants: Vec<Principle>) -> Result<Vec<Principle>, SeedError> {
    if entrants.len() != ENTRANT_COUNT {
        return Err(SeedError::WrongCount(entrants.len()));
    }
    let mut seen = HashSet::new();
    for principle in &entrants {
        if !seen.insert(principle.id().clone()) {
            return Err(SeedError::DuplicateId(principle.id().clone()));
        }
    }
    Ok(entrants)
}

fn matchup_id(round_index: usize, matchup_index: usize) -> String {
    format!("r{}-m{}", round_index + 1, matchup_index + 1)
}

// ── Tests ────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use playoff_types::Category;

    /// Deterministic LCG so shuffle-dependent tests are reproducible without
    /// pulling in an external RNG fixture. Implemented through the infallible
    /// `TryRng` route, which blanket-provides `Rng`.
    struct TestRng(u64);

    impl TestRng {
        fn step(&mut self) -> u64 {
            self.0 = self
                .0
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            self.0
        }
    }

    impl rand::rand_core::TryRng for TestRng {
        type Error = core::convert::Infallible;

        fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
            Ok((self.step() >> 32) as u32)
        }

        fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
            Ok(self.step())
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Self::Error> {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.step().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
            Ok(())
        }
    }

    fn principle(letter: char) -> Principle {
        let id = PrincipleId::new(format!("p-{}", letter.to_ascii_lowercase()))
            .expect("test fixture ids are non-empty");
        let category = Category::ALL[(letter as usize - 'A' as usize) % Category::ALL.len()];
        Principle::new(id, category, format!("Principle {letter}"), "fixture")
            .expect("test fixture titles are non-empty")
    }

    fn entrants() -> Vec<Principle> {
        ('A'..='P').map(principle).collect()
    }

    fn pid(letter: char) -> PrincipleId {
        principle(letter).id().clone()
    }

    fn slot_ids(matchup: &Matchup) -> (Option<String>, Option<String>) {
        (
            matchup.slot_a().map(|p| p.id().to_string()),
            matchup.slot_b().map(|p| p.id().to_string()),
        )
    }

    fn win(bracket: &mut Bracket, round: usize, matchup: usize, letter: char) {
        bracket
            .record_winner(round, matchup, &pid(letter))
            .expect("test winner must be a participant");
    }

    /// Plays a fixed A..P scenario through every round, deciding the final
    /// for A.
    fn play_full_scenario() -> Bracket {
        let mut bracket = Bracket::from_seeding(entrants()).unwrap();
        for (index, letter) in ['A', 'C', 'E', 'G', 'J', 'K', 'M', 'O'].into_iter().enumerate() {
            win(&mut bracket, 0, index, letter);
        }
        for (index, letter) in ['A', 'E', 'J', 'M'].into_iter().enumerate() {
            win(&mut bracket, 1, index, letter);
        }
        win(&mut bracket, 2, 0, 'A');
        win(&mut bracket, 2, 1, 'M');
        win(&mut bracket, 3, 0, 'A');
        bracket
    }

    #[test]
    fn seeded_builds_four_rounds_with_halving_sizes() {
        let bracket = Bracket::seeded(entrants(), &mut TestRng(7)).unwrap();
        let sizes: Vec<usize> = bracket.rounds().iter().map(|r| r.matchups().len()).collect();
        assert_eq!(sizes, vec![8, 4, 2, 1]);

        for matchup in bracket.rounds()[0].matchups() {
            assert!(matchup.slot_a().is_some());
            assert!(matchup.slot_b().is_some());
            assert!(matchup.winner().is_none());
        }
        for round in &bracket.rounds()[1..] {
            for matchup in round.matchups() {
                assert!(matchup.slot_a().is_none());
                assert!(matchup.slot_b().is_none());
            }
        }
    }

    #[test]
    fn seeded_preserves_the_entrant_set() {
        let bracket = Bracket::seeded(entrants(), &mut TestRng(42)).unwrap();
        let mut seeded: Vec<String> = bracket.rounds()[0]
            .matchups()
            .iter()
            .flat_map(|m| [m.slot_a(), m.slot_b()])
            .flatten()
            .map(|p| p.id().to_string())
            .collect();
        seeded.sort();
        let mut expected: Vec<String> = entrants().iter().map(|p| p.id().to_string()).collect();
        expected.sort();
        assert_eq!(seeded, expected);
    }

    #[test]
    fn seeding_rejects_wrong_cardinality() {
        let fifteen: Vec<Principle> = entrants().into_iter().take(15).collect();
        assert_eq!(
            Bracket::from_seeding(fifteen).unwrap_err(),
            SeedError::WrongCount(15)
        );
        assert!(matches!(
            Bracket::seeded(Vec::new(), &mut TestRng(1)).unwrap_err(),
            SeedError::WrongCount(0)
        ));
    }

    #[test]
    fn seeding_rejects_duplicate_ids() {
        let mut duplicated = entrants();
        duplicated[15] = principle('A');
        let err = Bracket::from_seeding(duplicated).unwrap_err();
        assert_eq!(err, SeedError::DuplicateId(pid('A')));
    }

    #[test]
    fn matchup_ids_are_stable() {
        let bracket = Bracket::from_seeding(entrants()).unwrap();
        assert_eq!(bracket.rounds()[0].matchups()[0].id(), "r1-m1");
        assert_eq!(bracket.rounds()[0].matchups()[7].id(), "r1-m8");
        assert_eq!(bracket.rounds()[3].matchups()[0].id(), "r4-m1");
    }

    #[test]
    fn open_matchup_scans_in_round_then_matchup_order() {
        let mut bracket = Bracket::from_seeding(entrants()).unwrap();
        let open = bracket.open_matchup().expect("round 1 is playable");
        assert_eq!(open.round_index(), 0);
        assert_eq!(open.matchup_index(), 0);
        assert_eq!(open.stage(), Stage::RoundOf16);

        win(&mut bracket, 0, 0, 'A');
        let open = bracket.open_matchup().expect("next matchup is playable");
        assert_eq!(open.matchup_index(), 1);
    }

    #[test]
    fn round_completion_fills_next_round_pairwise() {
        let mut bracket = Bracket::from_seeding(entrants()).unwrap();
        for (index, letter) in ['A', 'C', 'E', 'G', 'J', 'K', 'M', 'O'].into_iter().enumerate() {
            // Next round stays unpopulated until the whole round is decided.
            assert!(bracket.rounds()[1].matchups()[0].slot_a().is_none());
            win(&mut bracket, 0, index, letter);
        }

        let expected = [("p-a", "p-c"), ("p-e", "p-g"), ("p-j", "p-k"), ("p-m", "p-o")];
        for (matchup, (a, b)) in bracket.rounds()[1].matchups().iter().zip(expected) {
            assert_eq!(
                slot_ids(matchup),
                (Some(a.to_string()), Some(b.to_string()))
            );
        }
    }

    #[test]
    fn record_winner_rejects_non_participant_and_leaves_state_untouched() {
        let mut bracket = Bracket::from_seeding(entrants()).unwrap();
        let before = bracket.clone();
        let err = bracket.record_winner(0, 0, &pid('Z')).unwrap_err();
        assert_eq!(
            err,
            MatchupError::WinnerNotInMatchup {
                id: "r1-m1".to_string(),
                winner: pid('Z'),
            }
        );
        assert_eq!(bracket, before);
    }

    #[test]
    fn record_winner_rejects_unfilled_and_missing_matchups() {
        let mut bracket = Bracket::from_seeding(entrants()).unwrap();
        assert_eq!(
            bracket.record_winner(1, 0, &pid('A')).unwrap_err(),
            MatchupError::SlotsUnfilled {
                id: "r2-m1".to_string()
            }
        );
        assert_eq!(
            bracket.record_winner(0, 8, &pid('A')).unwrap_err(),
            MatchupError::NoSuchMatchup { round: 0, matchup: 8 }
        );
        assert_eq!(
            bracket.record_winner(4, 0, &pid('A')).unwrap_err(),
            MatchupError::NoSuchMatchup { round: 4, matchup: 0 }
        );
    }

    #[test]
    fn re_recording_a_decided_matchup_fails_and_preserves_the_outcome() {
        let mut bracket = play_full_scenario();
        let ranking_before = bracket.final_ranking().unwrap();
        let err = bracket.record_winner(3, 0, &pid('M')).unwrap_err();
        assert_eq!(
            err,
            MatchupError::AlreadyComplete {
                id: "r4-m1".to_string()
            }
        );
        assert_eq!(bracket.final_ranking().unwrap(), ranking_before);
    }

    #[test]
    fn completion_flips_exactly_at_the_final_decision() {
        let mut bracket = Bracket::from_seeding(entrants()).unwrap();
        for (index, letter) in ['A', 'C', 'E', 'G', 'J', 'K', 'M', 'O'].into_iter().enumerate() {
            win(&mut bracket, 0, index, letter);
            assert!(!bracket.is_complete());
        }
        for (index, letter) in ['A', 'E', 'J', 'M'].into_iter().enumerate() {
            win(&mut bracket, 1, index, letter);
        }
        win(&mut bracket, 2, 0, 'A');
        win(&mut bracket, 2, 1, 'M');
        assert!(!bracket.is_complete());
        assert!(bracket.final_ranking().is_err());

        win(&mut bracket, 3, 0, 'A');
        assert!(bracket.is_complete());
        assert!(bracket.open_matchup().is_none());
    }

    #[test]
    fn scenario_ranking_matches_elimination_order() {
        let bracket = play_full_scenario();
        let ranking = bracket.final_ranking().unwrap();
        let ids: Vec<&str> = ranking.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(
            ids,
            vec![
                // Champion, then per-round losers in matchup order, finals
                // backwards to the opening round.
                "p-a", "p-m", "p-e", "p-j", "p-c", "p-g", "p-k", "p-o", "p-b", "p-d", "p-f",
                "p-h", "p-i", "p-l", "p-n", "p-p",
            ]
        );
    }

    #[test]
    fn ranking_is_a_permutation_of_the_entrants() {
        let ranking = play_full_scenario().final_ranking().unwrap();
        assert_eq!(ranking.len(), ENTRANT_COUNT);
        let distinct: HashSet<&str> = ranking.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(distinct.len(), ENTRANT_COUNT);
    }

    #[test]
    fn progress_counts_decided_matchups() {
        let mut bracket = Bracket::from_seeding(entrants()).unwrap();
        assert_eq!(bracket.progress().decided(), 0);
        assert_eq!(bracket.progress().total(), 15);
        win(&mut bracket, 0, 0, 'A');
        win(&mut bracket, 0, 1, 'C');
        assert_eq!(bracket.progress().decided(), 2);

        let finished = play_full_scenario();
        assert_eq!(finished.progress().decided(), 15);
    }

    #[test]
    fn bracket_serde_round_trips() {
        let bracket = play_full_scenario();
        let json = serde_json::to_string(&bracket).unwrap();
        let restored: Bracket = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, bracket);
    }

    #[test]
    fn deserialize_rejects_winner_outside_the_matchup() {
        let mut bracket = Bracket::from_seeding(entrants()).unwrap();
        win(&mut bracket, 0, 0, 'A');
        let mut value = serde_json::to_value(&bracket).unwrap();
        // Swap the recorded winner for a principle from another matchup.
        value["rounds"][0]["matchups"][0]["winner"] =
            serde_json::to_value(principle('P')).unwrap();
        let restored: Result<Bracket, _> = serde_json::from_value(value);
        assert!(restored.is_err());
    }

    #[test]
    fn deserialize_rejects_malformed_layouts() {
        let bracket = Bracket::from_seeding(entrants()).unwrap();
        let mut value = serde_json::to_value(&bracket).unwrap();
        value["rounds"]
            .as_array_mut()
            .expect("rounds serialize as an array")
            .pop();
        let restored: Result<Bracket, _> = serde_json::from_value(value);
        assert!(restored.is_err());
    }
}
