//! Fact records as stored in the remote table
//!
//! JSON field names follow the table's column names (`votesInteresting`,
//! `votesMindblowing`, `votesFalse`), so rows deserialize directly.

pub mod category;
pub mod validation;

pub use category::{Category, CategorySelection};
pub use validation::{is_valid_http_url, validate_new_fact, ValidationError};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a fact's text, in characters
pub const MAX_TEXT_CHARS: usize = 200;

/// Server-assigned row identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactId(pub i64);

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fact row as returned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fact {
    pub id: FactId,
    pub text: String,
    pub source: String,
    /// Lower-case category name. Kept as a string: rows written by other
    /// clients are not guaranteed to use a known category.
    pub category: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub votes_interesting: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub votes_mindblowing: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub votes_false: u32,
}

/// Vote columns are nullable; a missing or null counter reads as zero
fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

impl Fact {
    /// False votes meet or exceed the other two counters combined
    pub fn is_disputed(&self) -> bool {
        self.votes_false as u64 >= self.votes_interesting as u64 + self.votes_mindblowing as u64
    }

    /// The registry entry for this fact's category, if it is a known one
    pub fn category(&self) -> Option<Category> {
        Category::from_name(&self.category)
    }

    /// Current value of one vote counter
    pub fn votes(&self, kind: VoteKind) -> u32 {
        match kind {
            VoteKind::Interesting => self.votes_interesting,
            VoteKind::Mindblowing => self.votes_mindblowing,
            VoteKind::False => self.votes_false,
        }
    }

    /// Patch that increments `kind` by one from the value held locally
    pub fn vote_patch(&self, kind: VoteKind) -> VotePatch {
        VotePatch {
            kind,
            value: self.votes(kind).saturating_add(1),
        }
    }
}

/// Record sent on insert; the store assigns the id and zeroes the counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewFact {
    pub text: String,
    pub source: String,
    pub category: Category,
}

/// The three vote counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteKind {
    Interesting,
    Mindblowing,
    False,
}

impl VoteKind {
    pub const ALL: [VoteKind; 3] = [VoteKind::Interesting, VoteKind::Mindblowing, VoteKind::False];

    /// Column name in the fact table
    pub fn column(&self) -> &'static str {
        match self {
            VoteKind::Interesting => "votesInteresting",
            VoteKind::Mindblowing => "votesMindblowing",
            VoteKind::False => "votesFalse",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            VoteKind::Interesting => "👍",
            VoteKind::Mindblowing => "🤯",
            VoteKind::False => "⛔",
        }
    }
}

impl FromStr for VoteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "interesting" | "i" | "votesinteresting" => Ok(VoteKind::Interesting),
            "mindblowing" | "m" | "votesmindblowing" => Ok(VoteKind::Mindblowing),
            "false" | "f" | "votesfalse" => Ok(VoteKind::False),
            other => Err(format!(
                "unknown vote '{}' (expected interesting, mindblowing or false)",
                other
            )),
        }
    }
}

/// Single-column update: set `kind`'s counter to `value`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VotePatch {
    pub kind: VoteKind,
    pub value: u32,
}

impl VotePatch {
    /// JSON body `{"<column>": value}`
    pub fn to_json(&self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        body.insert(self.kind.column().to_string(), self.value.into());
        serde_json::Value::Object(body)
    }

    /// Apply the patch to a local copy of the record
    pub fn apply_to(&self, fact: &mut Fact) {
        match self.kind {
            VoteKind::Interesting => fact.votes_interesting = self.value,
            VoteKind::Mindblowing => fact.votes_mindblowing = self.value,
            VoteKind::False => fact.votes_false = self.value,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_fact(id: i64, text: &str, category: &str) -> Fact {
    Fact {
        id: FactId(id),
        text: text.to_string(),
        source: "https://example.com".to_string(),
        category: category.to_string(),
        votes_interesting: 0,
        votes_mindblowing: 0,
        votes_false: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn disputed_when_false_votes_reach_the_rest() {
        let mut fact = sample_fact(1, "x", "science");
        fact.votes_interesting = 1;
        fact.votes_mindblowing = 1;
        fact.votes_false = 2;
        assert!(fact.is_disputed());

        fact.votes_false = 1;
        assert!(!fact.is_disputed());
    }

    #[test]
    fn fresh_fact_counts_as_disputed() {
        // 0 >= 0 + 0
        assert!(sample_fact(1, "x", "news").is_disputed());
    }

    #[test]
    fn deserializes_table_row() {
        let row = json!({
            "id": 42,
            "created_at": "2023-03-01T10:00:00+00:00",
            "text": "Octopuses have three hearts.",
            "source": "https://example.com/octopus",
            "category": "science",
            "votesInteresting": 5,
            "votesMindblowing": 2,
            "votesFalse": 0
        });
        let fact: Fact = serde_json::from_value(row).unwrap();
        assert_eq!(fact.id, FactId(42));
        assert_eq!(fact.votes_interesting, 5);
        assert_eq!(fact.category(), Some(Category::Science));
    }

    #[test]
    fn null_or_missing_counters_read_as_zero() {
        let row = json!({
            "id": 3,
            "text": "Sloths can hold their breath for 40 minutes.",
            "source": "https://example.com/sloth",
            "category": "science",
            "votesInteresting": null,
            "votesMindblowing": 1
        });
        let fact: Fact = serde_json::from_value(row).unwrap();
        assert_eq!(fact.votes_interesting, 0);
        assert_eq!(fact.votes_mindblowing, 1);
        assert_eq!(fact.votes_false, 0);
        assert_eq!(fact.vote_patch(VoteKind::Interesting).value, 1);
    }

    #[test]
    fn new_fact_serializes_lowercase_category() {
        let new = NewFact {
            text: "t".to_string(),
            source: "https://a.b".to_string(),
            category: Category::History,
        };
        assert_eq!(
            serde_json::to_value(&new).unwrap(),
            json!({"text": "t", "source": "https://a.b", "category": "history"})
        );
    }

    #[test]
    fn vote_patch_increments_current_value() {
        let mut fact = sample_fact(7, "x", "health");
        fact.votes_interesting = 3;
        let patch = fact.vote_patch(VoteKind::Interesting);
        assert_eq!(patch.value, 4);
        assert_eq!(patch.to_json(), json!({"votesInteresting": 4}));

        patch.apply_to(&mut fact);
        assert_eq!(fact.votes_interesting, 4);
        assert_eq!(fact.votes_mindblowing, 0);
    }

    #[test]
    fn vote_kind_parses_cli_names() {
        assert_eq!("interesting".parse::<VoteKind>(), Ok(VoteKind::Interesting));
        assert_eq!("M".parse::<VoteKind>(), Ok(VoteKind::Mindblowing));
        assert_eq!("false".parse::<VoteKind>(), Ok(VoteKind::False));
        assert!("meh".parse::<VoteKind>().is_err());
    }
}
