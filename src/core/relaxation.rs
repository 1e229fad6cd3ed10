use crate::core::compatibility::preference_set;
use crate::models::Preferences;

/// Highest relaxation level; one step per preference condition
pub const MAX_RELAXATION_LEVEL: u8 = 3;

pub const TIMEOUT_MESSAGE: &str = "Matching timed out.";

/// Relaxation level reached after waiting `elapsed_secs`.
///
/// `level = min(elapsed / interval, 3)`. A zero interval never relaxes.
pub fn relaxation_level(elapsed_secs: u64, interval_secs: u64) -> u8 {
    let steps = elapsed_secs.checked_div(interval_secs).unwrap_or(0);
    steps.min(MAX_RELAXATION_LEVEL as u64) as u8
}

/// Notice naming the conditions dropped so far.
///
/// None at level 0 and once every requested condition has been dropped.
pub fn relaxation_message(level: u8, preferences: &Preferences) -> Option<String> {
    let conditions = preference_set(preferences);
    let level = level as usize;
    if level == 0 || level >= conditions.len() {
        return None;
    }

    let dropped: Vec<&str> = conditions[..level]
        .iter()
        .map(|condition| condition.relaxed_label())
        .collect();

    Some(format!(
        "No match found yet. Now matching with {}.",
        dropped.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_steps_and_caps() {
        assert_eq!(relaxation_level(0, 60), 0);
        assert_eq!(relaxation_level(59, 60), 0);
        assert_eq!(relaxation_level(60, 60), 1);
        assert_eq!(relaxation_level(65, 60), 1);
        assert_eq!(relaxation_level(179, 60), 2);
        assert_eq!(relaxation_level(180, 60), 3);
        assert_eq!(relaxation_level(10_000, 60), 3);
    }

    #[test]
    fn test_level_is_monotonic() {
        let mut previous = 0;
        for elapsed in 0..400 {
            let level = relaxation_level(elapsed, 60);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn test_zero_interval() {
        assert_eq!(relaxation_level(0, 0), 0);
        assert_eq!(relaxation_level(600, 0), 0);
    }

    #[test]
    fn test_message_names_dropped_conditions() {
        let prefs = Preferences { same_gender: true, similar_age: true, same_level: true };

        assert_eq!(relaxation_message(0, &prefs), None);
        assert_eq!(
            relaxation_message(1, &prefs).as_deref(),
            Some("No match found yet. Now matching with other genders.")
        );
        assert_eq!(
            relaxation_message(2, &prefs).as_deref(),
            Some("No match found yet. Now matching with other genders, other age groups.")
        );
        assert_eq!(relaxation_message(3, &prefs), None);
    }

    #[test]
    fn test_message_skips_unrequested_conditions() {
        let prefs = Preferences { same_gender: false, similar_age: true, same_level: true };
        assert_eq!(
            relaxation_message(1, &prefs).as_deref(),
            Some("No match found yet. Now matching with other age groups.")
        );
        assert_eq!(relaxation_message(1, &Preferences::default()), None);
    }
}
