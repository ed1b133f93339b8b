//! Core tournament logic for Playoff.
//!
//! This crate holds the single-elimination bracket state machine and the
//! analyzers that run over a finished tournament: the decision-making
//! profile, the organizational alignment comparison, and the assembled
//! results report. Everything here is synchronous and does no IO.

pub mod alignment;
pub mod bracket;
pub mod profile;
pub mod report;

pub use alignment::Alignment;
pub use bracket::{
    Bracket, BracketValidationError, IncompleteTournamentError, Matchup, MatchupError,
    OpenMatchup, Progress, Round, SeedError, Stage, ENTRANT_COUNT,
};
pub use profile::{DecisionStyle, Profile};
pub use report::{Report, ReportMetadata};
