use crate::models::{MatchRequest, Preferences};

/// Maximum age gap for two participants to count as a similar age
pub const SIMILAR_AGE_THRESHOLD: u8 = 5;

/// Overlapping rank bands; two levels are similar if any band holds both
pub const LEVEL_GROUPS: [[&str; 3]; 5] = [
    ["intern", "staff", "assistant"],
    ["staff", "assistant", "manager"],
    ["assistant", "manager", "deputy"],
    ["manager", "deputy", "general"],
    ["deputy", "general", "director"],
];

/// A soft preference condition, in relaxation priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceCondition {
    Gender,
    Age,
    Level,
}

impl PreferenceCondition {
    /// Phrase used in relaxation notices once this condition is dropped
    pub fn relaxed_label(self) -> &'static str {
        match self {
            PreferenceCondition::Gender => "other genders",
            PreferenceCondition::Age => "other age groups",
            PreferenceCondition::Level => "other levels",
        }
    }
}

/// Requested conditions in fixed priority order gender -> age -> level.
///
/// The first entries are the first to be relaxed away.
pub fn preference_set(preferences: &Preferences) -> Vec<PreferenceCondition> {
    let mut conditions = Vec::with_capacity(3);
    if preferences.same_gender {
        conditions.push(PreferenceCondition::Gender);
    }
    if preferences.similar_age {
        conditions.push(PreferenceCondition::Age);
    }
    if preferences.same_level {
        conditions.push(PreferenceCondition::Level);
    }
    conditions
}

#[inline]
pub fn is_similar_age(a: u8, b: u8) -> bool {
    a.abs_diff(b) <= SIMILAR_AGE_THRESHOLD
}

/// Levels absent from every band are only similar to themselves
pub fn is_similar_level(a: &str, b: &str) -> bool {
    a == b
        || LEVEL_GROUPS
            .iter()
            .any(|group| group.contains(&a) && group.contains(&b))
}

fn condition_holds(condition: PreferenceCondition, checker: &MatchRequest, target: &MatchRequest) -> bool {
    match condition {
        PreferenceCondition::Gender => match (checker.gender.as_deref(), target.gender.as_deref()) {
            (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => a == b,
            _ => true,
        },
        PreferenceCondition::Age => match (checker.age, target.age) {
            (Some(a), Some(b)) => is_similar_age(a, b),
            _ => true,
        },
        PreferenceCondition::Level => match (checker.level.as_deref(), target.level.as_deref()) {
            (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => is_similar_level(a, b),
            _ => true,
        },
    }
}

/// Does `checker` accept `target` with `checker_relaxation` conditions dropped?
pub fn wants(checker: &MatchRequest, target: &MatchRequest, checker_relaxation: u8) -> bool {
    preference_set(&checker.preferences)
        .into_iter()
        .skip(checker_relaxation as usize)
        .all(|condition| condition_holds(condition, checker, target))
}

/// Both sides accept each other, each at its own relaxation level
pub fn mutually_compatible(a: &MatchRequest, b: &MatchRequest, relax_a: u8, relax_b: u8) -> bool {
    wants(a, b, relax_a) && wants(b, a, relax_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchConditions, Participant};
    use chrono::Utc;

    fn request(gender: &str, age: u8, level: &str, preferences: Preferences) -> MatchRequest {
        MatchRequest::new(
            Participant {
                participant_id: None,
                name: "Test".to_string(),
                department: "QA".to_string(),
                gender: Some(gender.to_string()),
                age: Some(age),
                level: Some(level.to_string()),
            },
            MatchConditions::new("12:00", "mid", "korean"),
            preferences,
            Utc::now(),
        )
    }

    fn all_prefs() -> Preferences {
        Preferences { same_gender: true, similar_age: true, same_level: true }
    }

    #[test]
    fn test_preference_set_order() {
        let prefs = Preferences { same_gender: false, similar_age: true, same_level: true };
        assert_eq!(preference_set(&prefs), vec![PreferenceCondition::Age, PreferenceCondition::Level]);
        assert!(preference_set(&Preferences::default()).is_empty());
    }

    #[test]
    fn test_no_preferences_wants_anyone() {
        let a = request("male", 25, "intern", Preferences::default());
        let b = request("female", 60, "director", all_prefs());
        assert!(wants(&a, &b, 0));
    }

    #[test]
    fn test_relaxation_drops_conditions_in_order() {
        let a = request("male", 25, "staff", all_prefs());
        // Different gender, age within 5, similar level
        let b = request("female", 29, "manager", Preferences::default());

        assert!(!wants(&a, &b, 0));
        assert!(wants(&a, &b, 1));
    }

    #[test]
    fn test_relaxation_beyond_set_size() {
        let a = request("male", 25, "intern", all_prefs());
        let b = request("female", 60, "director", Preferences::default());

        assert!(!wants(&a, &b, 2));
        assert!(wants(&a, &b, 3));
        assert!(wants(&a, &b, 200));
    }

    #[test]
    fn test_missing_attribute_is_not_enforced() {
        let a = request("male", 25, "staff", all_prefs());
        let mut b = request("female", 50, "director", Preferences::default());
        b.gender = None;
        b.age = None;
        b.level = None;

        assert!(wants(&a, &b, 0));
    }

    #[test]
    fn test_level_similarity_any_band() {
        assert!(is_similar_level("staff", "manager"));
        assert!(is_similar_level("intern", "assistant"));
        assert!(!is_similar_level("intern", "manager"));
        assert!(is_similar_level("ceo", "ceo"));
        assert!(!is_similar_level("ceo", "director"));
    }

    #[test]
    fn test_mutual_uses_each_sides_relaxation() {
        let strict = request("male", 30, "staff", Preferences { same_gender: true, ..Preferences::default() });
        let relaxed = request("female", 30, "staff", Preferences { same_gender: true, ..Preferences::default() });

        // The long waiter has relaxed gender, the newcomer has not
        assert!(wants(&relaxed, &strict, 1));
        assert!(!mutually_compatible(&strict, &relaxed, 0, 1));
        assert!(mutually_compatible(&strict, &relaxed, 1, 1));
    }
}
