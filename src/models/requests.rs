use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{MatchConditions, Participant, Preferences};

/// Request to join the matching queue
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JoinMatchRequest {
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_department")]
    pub department: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[validate(range(max = 120))]
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub level: Option<String>,
    #[validate(length(min = 1))]
    #[serde(alias = "time_slot", rename = "timeSlot")]
    pub time_slot: String,
    #[validate(length(min = 1))]
    #[serde(alias = "price_range", rename = "priceRange")]
    pub price_range: String,
    #[validate(length(min = 1))]
    pub menu: String,
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

fn default_name() -> String {
    "Anonymous".to_string()
}

fn default_department() -> String {
    "Unassigned".to_string()
}

impl JoinMatchRequest {
    /// Split the wire request into the engine's domain inputs
    pub fn into_parts(self) -> (Participant, MatchConditions, Preferences) {
        let participant = Participant {
            participant_id: self.user_id,
            name: self.name,
            department: self.department,
            gender: self.gender,
            age: self.age,
            level: self.level,
        };
        let conditions = MatchConditions {
            time_slot: self.time_slot,
            price_range: self.price_range,
            menu: self.menu,
        };
        (participant, conditions, self.preferences.unwrap_or_default())
    }
}

/// Query parameters of a status poll
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchStatusQuery {
    #[validate(length(min = 1))]
    #[serde(rename = "matchRequestId")]
    pub match_request_id: String,
    #[serde(rename = "elapsedSeconds", default)]
    pub elapsed_seconds: u64,
}

/// Request to leave the matching queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelMatchRequest {
    #[serde(rename = "matchRequestId")]
    pub match_request_id: String,
}

/// Optional filters of the restaurant endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantQuery {
    #[serde(default)]
    pub menu: Option<String>,
    #[serde(rename = "priceRange", default)]
    pub price_range: Option<String>,
}
