//! LunchMate - lunch matching service
//!
//! Pairs up colleagues who want to eat together. Requests with the same time
//! slot, price range and menu are grouped when their soft preferences
//! (gender, age, level) are mutually satisfied; those preferences relax one
//! by one the longer a participant waits.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{MatchEngine, MatchOutcome, Matcher, WaitingQueue, GroupRegistry};
pub use models::{Group, MatchConditions, MatchRequest, MatchingRules, Participant, Preferences, Restaurant};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        assert_eq!(matcher.rules().max_group_size, 4);
        assert!(WaitingQueue::new().is_empty());
    }
}
