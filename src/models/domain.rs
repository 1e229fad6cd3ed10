use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hard constraints of a match request. Never relaxed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchConditions {
    #[serde(rename = "timeSlot")]
    pub time_slot: String,
    #[serde(rename = "priceRange")]
    pub price_range: String,
    pub menu: String,
}

impl MatchConditions {
    pub fn new(
        time_slot: impl Into<String>,
        price_range: impl Into<String>,
        menu: impl Into<String>,
    ) -> Self {
        Self {
            time_slot: time_slot.into(),
            price_range: price_range.into(),
            menu: menu.into(),
        }
    }
}

/// Soft preferences a participant asks for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(rename = "sameGender", default)]
    pub same_gender: bool,
    #[serde(rename = "similarAge", default)]
    pub similar_age: bool,
    #[serde(rename = "sameLevel", default)]
    pub same_level: bool,
}

/// Identity and display attributes handed over by the identity provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Participant {
    pub participant_id: Option<String>,
    pub name: String,
    pub department: String,
    pub gender: Option<String>,
    pub age: Option<u8>,
    pub level: Option<String>,
}

/// One participant's pending desire to be matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub id: String,
    #[serde(rename = "userId")]
    pub participant_id: String,
    pub name: String,
    pub department: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(flatten)]
    pub conditions: MatchConditions,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(rename = "joinedAt")]
    pub joined_at: DateTime<Utc>,
    #[serde(rename = "relaxationLevel", default)]
    pub relaxation_level: u8,
}

impl MatchRequest {
    /// Build a fresh request for `participant`; a participant without an id
    /// gets a generated one.
    pub fn new(
        participant: Participant,
        conditions: MatchConditions,
        preferences: Preferences,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            participant_id: participant
                .participant_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            name: participant.name,
            department: participant.department,
            gender: participant.gender.filter(|g| !g.is_empty()),
            age: participant.age,
            level: participant.level.filter(|l| !l.is_empty()),
            conditions,
            preferences,
            joined_at,
            relaxation_level: 0,
        }
    }

    /// Seconds this request has been waiting at `now`, clamped at zero
    pub fn waited_secs(&self, now: DateTime<Utc>) -> u64 {
        (now - self.joined_at).num_seconds().max(0) as u64
    }
}

/// A recommended restaurant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub cuisine: String,
    pub price: String,
    /// Walking distance in minutes
    pub distance: u32,
    pub rating: f64,
}

/// Immutable record of a successful match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub members: Vec<MatchRequest>,
    #[serde(flatten)]
    pub conditions: MatchConditions,
    pub restaurant: Restaurant,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "relaxationApplied")]
    pub relaxation_applied: bool,
}

impl Group {
    pub fn contains_request(&self, request_id: &str) -> bool {
        self.members.iter().any(|m| m.id == request_id)
    }

    pub fn contains_participant(&self, participant_id: &str) -> bool {
        self.members.iter().any(|m| m.participant_id == participant_id)
    }
}

/// Reference to a lunch room the participant currently belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRef {
    #[serde(rename = "roomId")]
    pub room_id: String,
}

/// Reference to a formed group the participant currently belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    #[serde(rename = "groupId")]
    pub group_id: String,
}

/// Timing and sizing rules of the matching engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingRules {
    pub relaxation_interval_secs: u64,
    pub timeout_secs: u64,
    pub max_group_size: usize,
}

impl Default for MatchingRules {
    fn default() -> Self {
        Self {
            relaxation_interval_secs: 60,
            timeout_secs: 300,
            max_group_size: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn participant(id: Option<&str>) -> Participant {
        Participant {
            participant_id: id.map(str::to_string),
            name: "Kim".to_string(),
            department: "AI".to_string(),
            gender: Some(String::new()),
            age: Some(28),
            level: Some("staff".to_string()),
        }
    }

    #[test]
    fn test_new_request_generates_missing_participant_id() {
        let now = Utc::now();
        let conditions = MatchConditions::new("12:00", "mid", "korean");

        let anonymous = MatchRequest::new(participant(None), conditions.clone(), Preferences::default(), now);
        let known = MatchRequest::new(participant(Some("u1")), conditions, Preferences::default(), now);

        assert!(!anonymous.participant_id.is_empty());
        assert_ne!(anonymous.id, known.id);
        assert_eq!(known.participant_id, "u1");
        // Empty gender is treated as absent
        assert_eq!(known.gender, None);
    }

    #[test]
    fn test_waited_secs_clamps_future_join() {
        let now = Utc::now();
        let request = MatchRequest::new(
            participant(Some("u1")),
            MatchConditions::new("12:00", "mid", "korean"),
            Preferences::default(),
            now + Duration::seconds(30),
        );

        assert_eq!(request.waited_secs(now), 0);
        assert_eq!(request.waited_secs(now + Duration::seconds(95)), 65);
    }

    #[test]
    fn test_request_wire_names() {
        let request = MatchRequest::new(
            participant(Some("u1")),
            MatchConditions::new("12:00", "mid", "korean"),
            Preferences { same_gender: true, ..Preferences::default() },
            Utc::now(),
        );

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["timeSlot"], "12:00");
        assert_eq!(json["priceRange"], "mid");
        assert_eq!(json["menu"], "korean");
        assert_eq!(json["preferences"]["sameGender"], true);
        assert_eq!(json["relaxationLevel"], 0);
    }
}
