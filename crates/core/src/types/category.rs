//! Product categories.

use serde::{Deserialize, Serialize};

/// Menu category a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Juices,
    Smoothies,
    Parfaits,
    Shawarma,
    Salads,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Juices,
        Self::Smoothies,
        Self::Parfaits,
        Self::Shawarma,
        Self::Salads,
    ];

    /// URL slug, identical to the serialized form.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Juices => "juices",
            Self::Smoothies => "smoothies",
            Self::Parfaits => "parfaits",
            Self::Shawarma => "shawarma",
            Self::Salads => "salads",
        }
    }

    /// Heading shown on the category listing page.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Juices => "Juices",
            Self::Smoothies => "Smoothies",
            Self::Parfaits => "Parfaits",
            Self::Shawarma => "Shawarma",
            Self::Salads => "Salads",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "juices" => Ok(Self::Juices),
            "smoothies" => Ok(Self::Smoothies),
            "parfaits" => Ok(Self::Parfaits),
            "shawarma" => Ok(Self::Shawarma),
            "salads" => Ok(Self::Salads),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

/// A category selector as it appears in listing routes.
///
/// The slug `all` selects the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse a route slug. Unknown slugs yield `None`.
    #[must_use]
    pub fn parse(slug: &str) -> Option<Self> {
        if slug == "all" {
            return Some(Self::All);
        }
        slug.parse().ok().map(Self::Only)
    }

    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == category,
        }
    }
}
