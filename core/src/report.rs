//! Full results assembly and plain-text rendering.
//!
//! A [`Report`] snapshots everything the session produced: the 16-place
//! hierarchy, the derived profile, the optional organizational alignment,
//! and completion metadata. It serializes to JSON for export and renders to
//! a text block for the terminal.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use playoff_types::Principle;

use crate::alignment::{self, Alignment};
use crate::bracket::{Bracket, IncompleteTournamentError};
use crate::profile::{self, Profile};

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    completed_at: DateTime<Utc>,
    duration: Option<Duration>,
    version: &'static str,
}

impl ReportMetadata {
    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    #[must_use]
    pub fn version(&self) -> &'static str {
        self.version
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    hierarchy: Vec<Principle>,
    profile: Profile,
    alignment: Option<Alignment>,
    metadata: ReportMetadata,
}

impl Report {
    /// Assemble a report from a finished bracket.
    ///
    /// Runs both analyzers over the reconstructed ranking. Fails only when
    /// the tournament is not finished.
    pub fn new(
        bracket: &Bracket,
        reference_labels: &[String],
        context: Option<&str>,
        duration: Option<Duration>,
    ) -> Result<Self, IncompleteTournamentError> {
        let hierarchy = bracket.final_ranking()?;
        let profile = profile::analyze(&hierarchy);
        let alignment = alignment::analyze(&hierarchy, reference_labels, context);
        Ok(Self {
            hierarchy,
            profile,
            alignment,
            metadata: ReportMetadata {
                completed_at: Utc::now(),
                duration,
                version: env!("CARGO_PKG_VERSION"),
            },
        })
    }

    #[must_use]
    pub fn hierarchy(&self) -> &[Principle] {
        &self.hierarchy
    }

    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    #[must_use]
    pub fn alignment(&self) -> Option<&Alignment> {
        self.alignment.as_ref()
    }

    #[must_use]
    pub fn metadata(&self) -> &ReportMetadata {
        &self.metadata
    }

    /// Render the report as a UTF-8 text block.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("Playoff Results\n");
        out.push_str(&format!(
            "Completed: {} | Duration: {}\n",
            self.metadata.completed_at.format("%Y-%m-%d %H:%M UTC"),
            self.metadata.duration.map_or_else(
                || "n/a".to_string(),
                |d| format!("{}:{:02}", d.as_secs() / 60, d.as_secs() % 60)
            ),
        ));

        out.push_str("\nExecutive Summary\n");
        if let Some(style) = self.profile.style() {
            out.push_str(&format!("  Decision-Making Style: {}\n", style.label()));
        }
        if let Some(primary) = self.profile.primary_category() {
            out.push_str(&format!("  Primary Drive: {primary}\n"));
        }
        if let Some(champion) = self.hierarchy.first() {
            out.push_str(&format!("  Champion Principle: {}\n", champion.title()));
        }
        if let Some(alignment) = &self.alignment {
            out.push_str(&format!(
                "  Organizational Alignment: {}% match\n",
                alignment.alignment_score()
            ));
        }

        out.push_str("\nPrinciple Hierarchy\n");
        for (index, principle) in self.hierarchy.iter().enumerate() {
            out.push_str(&format!(
                "  {:>4}  {} - {}\n",
                ordinal(index + 1),
                principle.title(),
                principle.description()
            ));
        }

        render_list(&mut out, "Strengths", self.profile.strengths());
        render_list(&mut out, "Tensions", self.profile.tensions());
        render_list(&mut out, "Recommendations", self.profile.recommendations());

        if let Some(alignment) = &self.alignment {
            out.push_str(&format!(
                "\nOrganizational Alignment ({}% match)\n",
                alignment.alignment_score()
            ));
            for entry in alignment.matches() {
                out.push_str(&format!("  + {entry}\n"));
            }
            for entry in alignment.conflicts() {
                out.push_str(&format!("  ! {entry}\n"));
            }
            render_list(&mut out, "Strategies", alignment.strategies());
            render_list(&mut out, "Discussion Points", alignment.discussion_points());
        }

        out
    }
}

fn render_list(out: &mut String, heading: &str, entries: &[String]) {
    if entries.is_empty() {
        return;
    }
    out.push_str(&format!("\n{heading}\n"));
    for entry in entries {
        out.push_str(&format!("  - {entry}\n"));
    }
}

/// 1 -> "1st", 2 -> "2nd", 3 -> "3rd", everything else -> "Nth".
/// Ranks only go to 16, so the 11..13 special cases never arise.
fn ordinal(rank: usize) -> String {
    let suffix = match rank {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{rank}{suffix}")
}

// ── Tests ────────────────────────────────────────────────────
