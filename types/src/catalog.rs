//! The predefined principle catalog: 30 principles, 5 per category.
//!
//! Participants pick their 16 tournament entrants from this slate (plus any
//! custom principles they author). Ids are stable and must not be renumbered;
//! saved reports reference them.

use std::sync::LazyLock;

use crate::{Category, Principle, PrincipleId};

type Entry = (&'static str, Category, &'static str, &'static str);

const ENTRIES: [Entry; 30] = [
    // Achievement/Mastery
    (
        "achievement-1",
        Category::Achievement,
        "Continuous improvement",
        "Always getting better at what matters most",
    ),
    (
        "achievement-2",
        Category::Achievement,
        "Excellence in execution",
        "Doing things properly, not just done",
    ),
    (
        "achievement-3",
        Category::Achievement,
        "Mastery through deliberate practice",
        "Deep skill development over quick wins",
    ),
    (
        "achievement-4",
        Category::Achievement,
        "Push beyond comfort zones",
        "Growth happens at the edge of ability",
    ),
    (
        "achievement-5",
        Category::Achievement,
        "Measure what matters",
        "Track progress on meaningful metrics",
    ),
    // Autonomy
    (
        "autonomy-1",
        Category::Autonomy,
        "Personal freedom",
        "Making your own choices without external control",
    ),
    (
        "autonomy-2",
        Category::Autonomy,
        "Self-determination",
        "Being the author of your own life",
    ),
    (
        "autonomy-3",
        Category::Autonomy,
        "Independent thinking",
        "Form your own views rather than follow the crowd",
    ),
    (
        "autonomy-4",
        Category::Autonomy,
        "Control your own destiny",
        "Take responsibility for outcomes",
    ),
    (
        "autonomy-5",
        Category::Autonomy,
        "Freedom from others' expectations",
        "Live by your standards, not theirs",
    ),
    // Security
    (
        "security-1",
        Category::Security,
        "Stability and predictability",
        "Reliable foundations for everything else",
    ),
    (
        "security-2",
        Category::Security,
        "Financial security",
        "Money worries don't drive decisions",
    ),
    (
        "security-3",
        Category::Security,
        "Physical safety",
        "Protecting yourself and your capabilities",
    ),
    (
        "security-4",
        Category::Security,
        "Prepared for uncertainty",
        "Ready for what life throws at you",
    ),
    (
        "security-5",
        Category::Security,
        "Long-term sustainability",
        "Decisions that work over decades",
    ),
    // Service/Contribution
    (
        "service-1",
        Category::Service,
        "Serve something greater",
        "Contributing to causes beyond personal gain",
    ),
    (
        "service-2",
        Category::Service,
        "Make a meaningful impact",
        "Work that matters to others, not just yourself",
    ),
    (
        "service-3",
        Category::Service,
        "Protect those who can't protect themselves",
        "Use your capabilities for others' benefit",
    ),
    (
        "service-4",
        Category::Service,
        "Leave things better than you found them",
        "Improve systems/situations for those who follow",
    ),
    (
        "service-5",
        Category::Service,
        "Duty before self",
        "Put obligations to others ahead of personal comfort",
    ),
    // Relationships/Connection
    (
        "relationships-1",
        Category::Relationships,
        "Family comes first",
        "Closest relationships take priority over other pursuits",
    ),
    (
        "relationships-2",
        Category::Relationships,
        "Build deep, lasting bonds",
        "Quality connections over quantity of contacts",
    ),
    (
        "relationships-3",
        Category::Relationships,
        "Be there when it matters",
        "Show up for people during critical moments",
    ),
    (
        "relationships-4",
        Category::Relationships,
        "Loyalty and trust",
        "Honor commitments to those who count on you",
    ),
    (
        "relationships-5",
        Category::Relationships,
        "Strong community ties",
        "Invest in the groups and places you belong to",
    ),
    // Health/Vitality
    (
        "health-1",
        Category::Health,
        "Physical capability",
        "Body that performs when you need it",
    ),
    (
        "health-2",
        Category::Health,
        "Looking good at all costs",
        "Appearance matters more than performance, health, or other concerns",
    ),
    (
        "health-3",
        Category::Health,
        "Peak physical performance",
        "Optimize what your body can do",
    ),
    (
        "health-4",
        Category::Health,
        "Long-term health and longevity",
        "Decisions that serve you for decades",
    ),
    (
        "health-5",
        Category::Health,
        "Energy and vitality",
        "Feel strong and capable daily",
    ),
];

static PREDEFINED: LazyLock<Vec<Principle>> = LazyLock::new(|| {
    ENTRIES
        .into_iter()
        .map(|(id, category, title, description)| {
            let id = PrincipleId::new(id).expect("catalog ids are statically non-empty");
            Principle::new(id, category, title, description)
                .expect("catalog titles are statically non-empty")
        })
        .collect()
});

/// The full predefined slate, in catalog order.
#[must_use]
pub fn predefined() -> &'static [Principle] {
    &PREDEFINED
}

/// Look up a predefined principle by id.
#[must_use]
pub fn find_predefined(id: &str) -> Option<&'static Principle> {
    PREDEFINED.iter().find(|p| p.id().as_str() == id)
}

/// Predefined principles belonging to one category, in catalog order.
pub fn predefined_in(category: Category) -> impl Iterator<Item = &'static Principle> {
    PREDEFINED.iter().filter(move |p| p.category() == category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_thirty_entries_five_per_category() {
        assert_eq!(predefined().len(), 30);
        for category in Category::ALL {
            assert_eq!(predefined_in(category).count(), 5);
        }
    }

    #[test]
    fn catalog_ids_are_unique() {
        let ids: HashSet<&str> = predefined().iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids.len(), predefined().len());
    }

    #[test]
    fn find_predefined_resolves_known_ids() {
        let principle = find_predefined("autonomy-3").expect("autonomy-3 is in the catalog");
        assert_eq!(principle.title(), "Independent thinking");
        assert_eq!(principle.category(), Category::Autonomy);
        assert!(!principle.is_custom());
        assert!(find_predefined("autonomy-99").is_none());
    }
}
