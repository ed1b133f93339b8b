//! Organizational alignment heuristics.
//!
//! Compares the top eight ranked principles against an externally supplied
//! list of reference labels. Matching is loose on purpose: case-insensitive
//! substring containment in either direction, widened by a small synonym
//! table so "Family comes first" can match a "People first" value statement.

use serde::Serialize;

use playoff_types::Principle;

/// How many top-ranked principles are compared against the reference list.
const TOP_COUNT: usize = 8;

/// Non-matching principles ranked at or above this position are reported as
/// potential friction points.
const CONFLICT_RANK_LIMIT: usize = 3;

/// Title-substring to concept-word expansions used by the match test.
const SYNONYMS: [(&str, &[&str]); 6] = [
    ("continuous improvement", &["growth", "development", "learning"]),
    ("excellence", &["quality", "standards", "best"]),
    ("independent thinking", &["innovation", "creativity", "autonomy"]),
    ("family", &["relationships", "people", "connections"]),
    ("security", &["stability", "safety", "reliability"]),
    ("service", &["mission", "purpose", "impact", "contribution"]),
];

/// Alignment between a personal ranking and organizational reference values.
/// Derived read-only data, recomputed in full on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alignment {
    matches: Vec<String>,
    conflicts: Vec<String>,
    strategies: Vec<String>,
    alignment_score: u8,
    discussion_points: Vec<String>,
}

impl Alignment {
    #[must_use]
    pub fn matches(&self) -> &[String] {
        &self.matches
    }

    #[must_use]
    pub fn conflicts(&self) -> &[String] {
        &self.conflicts
    }

    #[must_use]
    pub fn strategies(&self) -> &[String] {
        &self.strategies
    }

    /// Percentage of the compared principles that matched, 0..=100.
    #[must_use]
    pub fn alignment_score(&self) -> u8 {
        self.alignment_score
    }

    #[must_use]
    pub fn discussion_points(&self) -> &[String] {
        &self.discussion_points
    }
}

/// Analyze the top eight of a ranking against organizational reference
/// labels. Returns `None` when the reference list is empty: alignment is an
/// optional analysis, not an error condition.
///
/// The context string is accepted for interface compatibility but does not
/// influence scoring; it is reserved for future use.
#[must_use]
pub fn analyze(
    ranking: &[Principle],
    reference_labels: &[String],
    _context: Option<&str>,
) -> Option<Alignment> {
    if reference_labels.is_empty() {
        return None;
    }
    let top = &ranking[..ranking.len().min(TOP_COUNT)];

    let mut matches = Vec::new();
    let mut conflicts = Vec::new();
    for (position, principle) in top.iter().enumerate() {
        if matches_any(principle, reference_labels) {
            matches.push(format!(
                "{} aligns with organizational values",
                principle.title()
            ));
        } else if position < CONFLICT_RANK_LIMIT {
            conflicts.push(format!(
                "{} may not be emphasized organizationally",
                principle.title()
            ));
        }
    }

    let alignment_score = if top.is_empty() {
        0
    } else {
        let ratio = matches.len() as f64 / top.len().min(TOP_COUNT) as f64;
        (ratio * 100.0).round() as u8
    };

    Some(Alignment {
        strategies: strategies_for(matches.len(), conflicts.len()),
        discussion_points: discussion_points_for(ranking),
        matches,
        conflicts,
        alignment_score,
    })
}

fn matches_any(principle: &Principle, reference_labels: &[String]) -> bool {
    let title = principle.title().to_lowercase();
    reference_labels.iter().any(|label| {
        let label = label.to_lowercase();
        title.contains(&label)
            || label.contains(&title)
            || concepts_for(&title).iter().any(|concept| label.contains(concept))
    })
}

/// Concept words for the first synonym key contained in the title.
fn concepts_for(lowercase_title: &str) -> &'static [&'static str] {
    SYNONYMS
        .iter()
        .find(|(key, _)| lowercase_title.contains(key))
        .map_or(&[], |(_, concepts)| concepts)
}

fn strategies_for(match_count: usize, conflict_count: usize) -> Vec<String> {
    let mut strategies: Vec<String> = if match_count > conflict_count {
        vec![
            "Leverage your natural alignment to contribute authentically".to_string(),
            "Share examples of how your values drive your best work".to_string(),
        ]
    } else {
        vec![
            "Identify ways to honor your values within organizational context".to_string(),
            "Seek projects or roles that better align with your priorities".to_string(),
        ]
    };

    if conflict_count > 0 {
        strategies.push("Discuss value differences openly to find common ground".to_string());
        strategies.push("Consider how your unique perspective can benefit the team".to_string());
    }

    strategies
}

fn discussion_points_for(ranking: &[Principle]) -> Vec<String> {
    let top_three: Vec<&str> = ranking
        .iter()
        .take(CONFLICT_RANK_LIMIT)
        .map(Principle::title)
        .collect();

    vec![
        format!(
            "How do your top 3 values ({}) show up in your work?",
            top_three.join(", ")
        ),
        "Where do you see the strongest alignment between personal and organizational values?"
            .to_string(),
        "What organizational values would you like to better understand?".to_string(),
        "How can the team leverage different value orientations for better outcomes?".to_string(),
    ]
}

// ── Tests ────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use playoff_types::{Category, PrincipleId};

    fn principle(id: &str, title: &str) -> Principle {
        Principle::new(
            PrincipleId::new(id).expect("test fixture ids are non-empty"),
            Category::Autonomy,
            title,
            "fixture",
        )
        .expect("test fixture titles are non-empty")
    }

    fn ranking(titles: &[&str]) -> Vec<Principle> {
        titles
            .iter()
            .enumerate()
            .map(|(i, title)| principle(&format!("p-{i}"), title))
            .collect()
    }

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn empty_reference_list_skips_the_analysis() {
        let ranked = ranking(&["Personal freedom"]);
        assert_eq!(analyze(&ranked, &[], None), None);
    }

    #[test]
    fn substring_containment_matches_in_both_directions() {
        let ranked = ranking(&[
            "Excellence in execution",
            "Trust",
            "Personal freedom",
            "Physical capability",
            "Prepared for uncertainty",
            "Energy and vitality",
            "Measure what matters",
            "Duty before self",
        ]);
        let refs = labels(&["excellence", "Loyalty and trust in all things"]);
        let alignment = analyze(&ranked, &refs, None).expect("reference list is non-empty");

        // "Excellence in execution" contains the label "excellence";
        // the label contains the whole title "Trust".
        assert_eq!(
            alignment.matches(),
            &[
                "Excellence in execution aligns with organizational values".to_string(),
                "Trust aligns with organizational values".to_string(),
            ]
        );
    }

    #[test]
    fn synonym_concepts_widen_the_match() {
        let ranked = ranking(&["Family comes first"]);
        let refs = labels(&["People first"]);
        let alignment = analyze(&ranked, &refs, None).expect("reference list is non-empty");
        assert_eq!(alignment.matches().len(), 1);
        assert_eq!(alignment.alignment_score(), 100);
    }

    #[test]
    fn conflicts_only_cover_the_top_three() {
        let ranked = ranking(&[
            "Personal freedom",
            "Self-determination",
            "Control your own destiny",
            "Be there when it matters",
            "Strong community ties",
            "Energy and vitality",
            "Physical capability",
            "Measure what matters",
        ]);
        let refs = labels(&["customer obsession"]);
        let alignment = analyze(&ranked, &refs, None).expect("reference list is non-empty");

        assert!(alignment.matches().is_empty());
        assert_eq!(
            alignment.conflicts(),
            &[
                "Personal freedom may not be emphasized organizationally".to_string(),
                "Self-determination may not be emphasized organizationally".to_string(),
                "Control your own destiny may not be emphasized organizationally".to_string(),
            ]
        );
        assert_eq!(alignment.alignment_score(), 0);
    }

    #[test]
    fn score_rounds_to_the_nearest_percent() {
        // 3 matches of 8 considered: 37.5% rounds to 38.
        let ranked = ranking(&[
            "Excellence in execution",
            "Continuous improvement",
            "Family comes first",
            "Control your own destiny",
            "Be there when it matters",
            "Energy and vitality",
            "Physical capability",
            "Measure what matters",
        ]);
        let refs = labels(&["quality", "learning", "people"]);
        let alignment = analyze(&ranked, &refs, None).expect("reference list is non-empty");
        assert_eq!(alignment.matches().len(), 3);
        assert_eq!(alignment.alignment_score(), 38);
    }

    #[test]
    fn strategies_follow_the_match_conflict_balance() {
        let mostly_matched = analyze(
            &ranking(&["Excellence in execution", "Quality obsession"]),
            &labels(&["excellence", "quality"]),
            None,
        )
        .expect("reference list is non-empty");
        assert_eq!(
            mostly_matched.strategies(),
            &[
                "Leverage your natural alignment to contribute authentically".to_string(),
                "Share examples of how your values drive your best work".to_string(),
            ]
        );

        let conflicted = analyze(
            &ranking(&["Personal freedom", "Self-determination"]),
            &labels(&["customer obsession"]),
            None,
        )
        .expect("reference list is non-empty");
        assert_eq!(
            conflicted.strategies(),
            &[
                "Identify ways to honor your values within organizational context".to_string(),
                "Seek projects or roles that better align with your priorities".to_string(),
                "Discuss value differences openly to find common ground".to_string(),
                "Consider how your unique perspective can benefit the team".to_string(),
            ]
        );
    }

    #[test]
    fn discussion_points_interpolate_the_top_three_titles() {
        let ranked = ranking(&[
            "Personal freedom",
            "Self-determination",
            "Control your own destiny",
            "Energy and vitality",
        ]);
        let alignment =
            analyze(&ranked, &labels(&["anything"]), None).expect("reference list is non-empty");
        assert_eq!(
            alignment.discussion_points()[0],
            "How do your top 3 values (Personal freedom, Self-determination, \
             Control your own destiny) show up in your work?"
        );
        assert_eq!(alignment.discussion_points().len(), 4);
    }

    #[test]
    fn context_string_does_not_affect_scoring() {
        let ranked = ranking(&["Excellence in execution"]);
        let refs = labels(&["excellence"]);
        let plain = analyze(&ranked, &refs, None);
        let with_context = analyze(&ranked, &refs, Some("engineering org, series B"));
        assert_eq!(plain, with_context);
    }
}
