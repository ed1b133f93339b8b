//! Personal profile heuristics over a finished ranking.
//!
//! Everything here is table-driven pattern matching over the top five ranked
//! principles. The analyzer never fails: an empty ranking produces an empty
//! profile. Ties between categories are broken by [`Category::ALL`] order so
//! results are deterministic.

use serde::Serialize;

use playoff_types::{Category, Principle};

/// How many top-ranked principles feed the profile heuristics.
const TOP_COUNT: usize = 5;

/// Cap applied to strengths and to recommendations.
const SECTION_CAP: usize = 4;

// ── Decision style ───────────────────────────────────────────

/// Decision-making style labels derived from the top-five category spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecisionStyle {
    PerformanceDriven,
    IndependenceFocused,
    StabilityOriented,
    MissionDriven,
    RelationshipCentered,
    VitalityFocused,
    /// Several categories tie for the top frequency.
    MultiDimensional,
    /// No category dominates (top frequency below three of five).
    Balanced,
}

impl DecisionStyle {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            DecisionStyle::PerformanceDriven => "Performance-Driven",
            DecisionStyle::IndependenceFocused => "Independence-Focused",
            DecisionStyle::StabilityOriented => "Stability-Oriented",
            DecisionStyle::MissionDriven => "Mission-Driven",
            DecisionStyle::RelationshipCentered => "Relationship-Centered",
            DecisionStyle::VitalityFocused => "Vitality-Focused",
            DecisionStyle::MultiDimensional => "Multi-Dimensional",
            DecisionStyle::Balanced => "Balanced Approach",
        }
    }

    const fn for_category(category: Category) -> Self {
        match category {
            Category::Achievement => DecisionStyle::PerformanceDriven,
            Category::Autonomy => DecisionStyle::IndependenceFocused,
            Category::Security => DecisionStyle::StabilityOriented,
            Category::Service => DecisionStyle::MissionDriven,
            Category::Relationships => DecisionStyle::RelationshipCentered,
            Category::Health => DecisionStyle::VitalityFocused,
        }
    }
}

// ── Profile ──────────────────────────────────────────────────

/// Heuristic profile of the participant. Fully recomputed from a ranking on
/// every call; no independent lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    primary_category: Option<Category>,
    style: Option<DecisionStyle>,
    strengths: Vec<String>,
    tensions: Vec<String>,
    recommendations: Vec<String>,
}

impl Profile {
    fn empty() -> Self {
        Self {
            primary_category: None,
            style: None,
            strengths: Vec::new(),
            tensions: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    #[must_use]
    pub fn primary_category(&self) -> Option<Category> {
        self.primary_category
    }

    #[must_use]
    pub fn style(&self) -> Option<DecisionStyle> {
        self.style
    }

    #[must_use]
    pub fn strengths(&self) -> &[String] {
        &self.strengths
    }

    #[must_use]
    pub fn tensions(&self) -> &[String] {
        &self.tensions
    }

    #[must_use]
    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }
}

/// Analyze the top five of a ranking.
#[must_use]
pub fn analyze(ranking: &[Principle]) -> Profile {
    if ranking.is_empty() {
        return Profile::empty();
    }
    let top_five = &ranking[..ranking.len().min(TOP_COUNT)];

    // Frequency per category, indexed in tie-break order.
    let mut counts = [0usize; Category::ALL.len()];
    for principle in top_five {
        counts[principle.category().ordinal()] += 1;
    }
    let max_count = counts.iter().copied().max().unwrap_or_default();
    let dominant: Vec<Category> = Category::ALL
        .into_iter()
        .filter(|category| counts[category.ordinal()] == max_count && max_count > 0)
        .collect();

    // First category reaching the maximum, scanned in fixed order.
    let primary = dominant.first().copied();

    let style = if dominant.len() == 1 && max_count >= 3 {
        DecisionStyle::for_category(dominant[0])
    } else if dominant.len() > 1 {
        DecisionStyle::MultiDimensional
    } else {
        DecisionStyle::Balanced
    };

    let tensions = identify_tensions(top_five);
    Profile {
        primary_category: primary,
        style: Some(style),
        strengths: identify_strengths(top_five, primary),
        recommendations: recommendations_for(primary, &tensions),
        tensions,
    }
}

/// Case-sensitive title match. The lowercase needles intentionally miss
/// title-cased catalog entries such as "Independent thinking"; the bonus
/// only fires when the phrase appears mid-title.
fn title_present(top_five: &[Principle], needle: &str) -> bool {
    top_five.iter().any(|p| p.title().contains(needle))
}

fn category_present(top_five: &[Principle], category: Category) -> bool {
    top_five.iter().any(|p| p.category() == category)
}

fn identify_strengths(top_five: &[Principle], primary: Option<Category>) -> Vec<String> {
    let mut strengths: Vec<String> = Vec::new();

    if let Some(primary) = primary {
        let pair: [&str; 2] = match primary {
            Category::Achievement => [
                "Strong drive for excellence and continuous improvement",
                "Natural ability to push beyond comfort zones",
            ],
            Category::Autonomy => [
                "Independent thinking and self-direction",
                "Resistance to external pressure and groupthink",
            ],
            Category::Security => [
                "Strategic planning and risk management",
                "Building sustainable foundations for growth",
            ],
            Category::Service => [
                "Purpose-driven decision making",
                "Natural inclination to consider broader impact",
            ],
            Category::Relationships => [
                "Strong interpersonal connections and loyalty",
                "Ability to build and maintain trust",
            ],
            Category::Health => [
                "Focus on sustainable performance and wellbeing",
                "Understanding of mind-body connection",
            ],
        };
        strengths.extend(pair.into_iter().map(String::from));
    }

    // Bonus strengths keyed on specific principle titles in the top five.
    if title_present(top_five, "deliberate practice") {
        strengths.push("Commitment to skill mastery over quick wins".to_string());
    }
    if title_present(top_five, "independent thinking") {
        strengths.push("Intellectual courage and original perspective".to_string());
    }

    strengths.truncate(SECTION_CAP);
    strengths
}

fn identify_tensions(top_five: &[Principle]) -> Vec<String> {
    let mut tensions = Vec::new();

    if category_present(top_five, Category::Achievement)
        && category_present(top_five, Category::Relationships)
    {
        tensions.push("Balancing drive for excellence with relationship commitments".to_string());
    }
    if category_present(top_five, Category::Autonomy)
        && category_present(top_five, Category::Service)
    {
        tensions.push("Reconciling independence with serving others or larger causes".to_string());
    }
    if category_present(top_five, Category::Security)
        && category_present(top_five, Category::Achievement)
    {
        tensions.push("Managing risk tolerance while pursuing ambitious goals".to_string());
    }
    if category_present(top_five, Category::Health)
        && category_present(top_five, Category::Achievement)
        && title_present(top_five, "at all costs")
    {
        tensions
            .push("Potential conflict between appearance and sustainable performance".to_string());
    }

    tensions
}

fn recommendations_for(primary: Option<Category>, tensions: &[String]) -> Vec<String> {
    let mut recommendations: Vec<String> = Vec::new();

    if let Some(primary) = primary {
        let pair: [&str; 2] = match primary {
            Category::Achievement => [
                "Consider how to maintain high standards while avoiding burnout",
                "Explore ways to celebrate progress, not just final outcomes",
            ],
            Category::Autonomy => [
                "Look for environments that value independent thinking",
                "Practice articulating your perspective to influence others",
            ],
            Category::Security => [
                "Balance planning with openness to new opportunities",
                "Consider how security enables rather than limits growth",
            ],
            Category::Service => [
                "Ensure your service aligns with your other core values",
                "Set boundaries to avoid overcommitment to others",
            ],
            Category::Relationships => [
                "Communicate your values clearly to strengthen connections",
                "Consider how relationships can support your other goals",
            ],
            Category::Health => [
                "Integrate vitality practices into your daily routine",
                "Examine whether appearance or performance truly serves you",
            ],
        };
        recommendations.extend(pair.into_iter().map(String::from));
    }

    for tension in tensions {
        if tension.contains("excellence with relationship") {
            recommendations
                .push("Schedule dedicated time for both achievement and relationships".to_string());
        }
        if tension.contains("independence with serving") {
            recommendations.push(
                "Seek leadership roles where you can serve while maintaining autonomy".to_string(),
            );
        }
    }

    recommendations.truncate(SECTION_CAP);
    recommendations
}

// ── Tests ────────────────────────────────────────────────────
