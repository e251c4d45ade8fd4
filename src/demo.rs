// Demo mode: a seeded in-memory board to try the client without a hosted table
//
// Calls are slowed down a little so the loading spinner and the dimmed
// counters of an in-flight vote are visible.
//
// Run with: TIL_DEMO=1 cargo run --release  (or `til --demo`)

use crate::facts::{Fact, FactId};
use crate::store::MemoryFactStore;
use std::time::Duration;

/// Delay applied to every demo store call
const DEMO_LATENCY: Duration = Duration::from_millis(350);

/// (text, source, category, interesting, mindblowing, false)
const SEED: &[(&str, &str, &str, u32, u32, u32)] = &[
    (
        "React is being developed by Meta (formerly facebook)",
        "https://opensource.fb.com/",
        "technology",
        24,
        9,
        4,
    ),
    (
        "Millennial dads spend 3 times as much time with their kids than their fathers spent with them.",
        "https://www.mother.ly/parenting/millennial-dads-spend-more-time-with-their-kids",
        "society",
        11,
        2,
        0,
    ),
    (
        "Lisbon is the capital of Portugal",
        "https://en.wikipedia.org/wiki/Lisbon",
        "society",
        8,
        3,
        1,
    ),
    (
        "Octopuses have three hearts and blue blood.",
        "https://www.nationalgeographic.com/animals/invertebrates/facts/octopus",
        "science",
        31,
        27,
        2,
    ),
    (
        "The Eiffel Tower can be 15 cm taller during the summer.",
        "https://www.toureiffel.paris/en/news/history-and-culture",
        "science",
        14,
        12,
        3,
    ),
    (
        "The Great Wall of China is visible from the Moon with the naked eye.",
        "https://www.scientificamerican.com/article/is-chinas-great-wall-visible-from-space/",
        "history",
        6,
        4,
        19,
    ),
    (
        "Honey never spoils when stored sealed.",
        "https://www.smithsonianmag.com/science-nature/the-science-behind-honeys-eternal-shelf-life-1218690/",
        "health",
        9,
        5,
        0,
    ),
    (
        "Bitcoin's supply is capped at 21 million coins.",
        "https://bitcoin.org/en/faq",
        "finance",
        7,
        1,
        1,
    ),
    (
        "The first film ever to win Best Picture was a silent movie.",
        "https://www.oscars.org/oscars/ceremonies/1929",
        "entertainment",
        5,
        2,
        0,
    ),
    (
        "The Olympic Games were revived in 1896 in Athens.",
        "https://olympics.com/en/olympic-games/athens-1896",
        "news",
        3,
        0,
        0,
    ),
];

/// Rows the demo store starts with
pub fn seed_facts() -> Vec<Fact> {
    SEED.iter()
        .zip(1..)
        .map(
            |(&(text, source, category, interesting, mindblowing, false_votes), id)| Fact {
                id: FactId(id),
                text: text.to_string(),
                source: source.to_string(),
                category: category.to_string(),
                votes_interesting: interesting,
                votes_mindblowing: mindblowing,
                votes_false: false_votes,
            },
        )
        .collect()
}

/// In-memory store seeded with the demo rows
pub fn demo_store() -> MemoryFactStore {
    MemoryFactStore::with_facts(seed_facts()).with_latency(DEMO_LATENCY)
}
