//! Core domain types for Playoff.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the
//! application.

mod catalog;
pub use catalog::{find_predefined, predefined, predefined_in};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Categories
// ============================================================================

/// The fixed set of principle categories.
///
/// Declaration order is semantically meaningful: it is the deterministic
/// tie-break order used by the profile analyzer when several categories reach
/// the same frequency. Do not reorder variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Achievement/Mastery")]
    Achievement,
    #[serde(rename = "Autonomy")]
    Autonomy,
    #[serde(rename = "Security")]
    Security,
    #[serde(rename = "Service/Contribution")]
    Service,
    #[serde(rename = "Relationships/Connection")]
    Relationships,
    #[serde(rename = "Health/Vitality")]
    Health,
}

impl Category {
    /// All categories, in tie-break order.
    pub const ALL: [Category; 6] = [
        Category::Achievement,
        Category::Autonomy,
        Category::Security,
        Category::Service,
        Category::Relationships,
        Category::Health,
    ];

    /// Human-readable label, as shown in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::Achievement => "Achievement/Mastery",
            Category::Autonomy => "Autonomy",
            Category::Security => "Security",
            Category::Service => "Service/Contribution",
            Category::Relationships => "Relationships/Connection",
            Category::Health => "Health/Vitality",
        }
    }

    /// Parse a category from its label.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Category::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(s.trim()))
    }

    /// Position of this category in the tie-break order.
    #[must_use]
    pub fn ordinal(self) -> usize {
        Category::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Principle Identity
// ============================================================================

/// A stable, non-empty principle identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrincipleId(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("principle id must not be empty")]
pub struct PrincipleIdError;

impl PrincipleId {
    pub fn new(value: impl Into<String>) -> Result<Self, PrincipleIdError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(PrincipleIdError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PrincipleId {
    type Error = PrincipleIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PrincipleId {
    type Error = PrincipleIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PrincipleId> for String {
    fn from(value: PrincipleId) -> Self {
        value.0
    }
}

impl AsRef<str> for PrincipleId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PrincipleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Principle
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("principle title must not be empty")]
pub struct EmptyTitleError;

#[derive(Deserialize)]
struct RawPrinciple {
    id: PrincipleId,
    category: Category,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    is_custom: bool,
}

/// An immutable candidate principle.
///
/// Equality and hashing go by identifier only; two principles with the same
/// id are the same principle regardless of wording. Never mutated after
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawPrinciple")]
pub struct Principle {
    id: PrincipleId,
    category: Category,
    title: String,
    description: String,
    is_custom: bool,
}

impl Principle {
    /// Create a predefined (non-custom) principle.
    pub fn new(
        id: PrincipleId,
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, EmptyTitleError> {
        Self::build(id, category, title.into(), description.into(), false)
    }

    /// Create a participant-authored principle.
    pub fn custom(
        id: PrincipleId,
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, EmptyTitleError> {
        Self::build(id, category, title.into(), description.into(), true)
    }

    fn build(
        id: PrincipleId,
        category: Category,
        title: String,
        description: String,
        is_custom: bool,
    ) -> Result<Self, EmptyTitleError> {
        if title.trim().is_empty() {
            return Err(EmptyTitleError);
        }
        Ok(Self {
            id,
            category,
            title,
            description,
            is_custom,
        })
    }

    #[must_use]
    pub fn id(&self) -> &PrincipleId {
        &self.id
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.is_custom
    }
}

impl TryFrom<RawPrinciple> for Principle {
    type Error = EmptyTitleError;

    fn try_from(raw: RawPrinciple) -> Result<Self, Self::Error> {
        Self::build(
            raw.id,
            raw.category,
            raw.title,
            raw.description,
            raw.is_custom,
        )
    }
}

impl PartialEq for Principle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Principle {}

impl std::hash::Hash for Principle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================
