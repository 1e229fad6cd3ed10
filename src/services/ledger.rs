use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Counts successful matches per participant
pub trait MatchCountLedger: Send + Sync {
    fn increment(&self, participant_id: &str) -> u32;

    fn match_count(&self, participant_id: &str) -> u32;
}

/// Match-count ledger kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    counts: DashMap<String, u32>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchCountLedger for InMemoryLedger {
    fn increment(&self, participant_id: &str) -> u32 {
        let mut count = self.counts.entry(participant_id.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    fn match_count(&self, participant_id: &str) -> u32 {
        self.counts.get(participant_id).map(|c| *c).unwrap_or(0)
    }
}

/// Gamified tier derived from a participant's match count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodLevel {
    pub level: u8,
    pub name: String,
    #[serde(rename = "minCount")]
    pub min_count: u32,
}

// (level, name, minimum match count), highest first
const FOOD_LEVELS: [(u8, &str, u32); 5] = [
    (5, "Grand Gourmand", 31),
    (4, "Foodie Master", 16),
    (3, "Gourmet", 6),
    (2, "Little Eater", 2),
    (1, "Sprout", 0),
];

pub fn food_level(match_count: u32) -> FoodLevel {
    let (level, name, min_count) = FOOD_LEVELS
        .iter()
        .copied()
        .find(|(_, _, min)| match_count >= *min)
        .unwrap_or(FOOD_LEVELS[FOOD_LEVELS.len() - 1]);

    FoodLevel {
        level,
        name: name.to_string(),
        min_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_counts_per_participant() {
        let ledger = InMemoryLedger::new();
        assert_eq!(ledger.increment("u1"), 1);
        assert_eq!(ledger.increment("u1"), 2);
        assert_eq!(ledger.increment("u2"), 1);

        assert_eq!(ledger.match_count("u1"), 2);
        assert_eq!(ledger.match_count("nobody"), 0);
    }

    #[test]
    fn test_food_level_thresholds() {
        assert_eq!(food_level(0).level, 1);
        assert_eq!(food_level(1).level, 1);
        assert_eq!(food_level(2).level, 2);
        assert_eq!(food_level(5).level, 2);
        assert_eq!(food_level(6).level, 3);
        assert_eq!(food_level(16).level, 4);
        assert_eq!(food_level(30).level, 4);
        assert_eq!(food_level(31).name, "Grand Gourmand");
    }
}
