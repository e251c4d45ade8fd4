//! Category registry
//!
//! The fact board uses a fixed set of eight topical tags. Each carries a
//! display color; nothing mutates the set at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the fixed topical tags a fact can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Science,
    Finance,
    Society,
    Entertainment,
    Health,
    History,
    News,
}

impl Category {
    /// Every category, in sidebar order
    pub const ALL: [Category; 8] = [
        Category::Technology,
        Category::Science,
        Category::Finance,
        Category::Society,
        Category::Entertainment,
        Category::Health,
        Category::History,
        Category::News,
    ];

    /// Lower-case name as stored in the fact table
    pub fn name(&self) -> &'static str {
        match self {
            Category::Technology => "technology",
            Category::Science => "science",
            Category::Finance => "finance",
            Category::Society => "society",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::History => "history",
            Category::News => "news",
        }
    }

    /// Display color as `#rrggbb`
    pub fn color_hex(&self) -> &'static str {
        match self {
            Category::Technology => "#3b82f6",
            Category::Science => "#16a34a",
            Category::Finance => "#ef4444",
            Category::Society => "#eab308",
            Category::Entertainment => "#db2777",
            Category::Health => "#14b8a6",
            Category::History => "#f97316",
            Category::News => "#8b5cf6",
        }
    }

    /// Display color as an RGB triple
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = &self.color_hex()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }

    /// Upper-case label used by the submission form's selector
    pub fn label(&self) -> String {
        self.name().to_uppercase()
    }

    /// Look up a category by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the category filter emits: every fact, or one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySelection {
    #[default]
    All,
    Category(Category),
}

impl CategorySelection {
    /// Sentinel string used for "no filter"
    pub const ALL_SENTINEL: &'static str = "all";

    pub fn as_str(&self) -> &'static str {
        match self {
            CategorySelection::All => Self::ALL_SENTINEL,
            CategorySelection::Category(c) => c.name(),
        }
    }

    /// Parse `"all"` or a category name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case(Self::ALL_SENTINEL) {
            Some(CategorySelection::All)
        } else {
            Category::from_name(s).map(CategorySelection::Category)
        }
    }

    /// The category to filter on, if any
    pub fn category(&self) -> Option<Category> {
        match self {
            CategorySelection::All => None,
            CategorySelection::Category(c) => Some(*c),
        }
    }
}

impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
