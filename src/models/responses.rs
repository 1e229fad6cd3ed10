use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::core::{ActiveMembership, ActiveStatus, EngineStats, MatchOutcome};
use crate::models::domain::{Group, GroupRef, Restaurant, RoomRef};
use crate::services::FoodLevel;

/// Caller-facing payload of join and status endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum MatchStatusResponse {
    Matched {
        match_request_id: String,
        group_id: String,
        group: Group,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        relaxation_level: Option<u8>,
    },
    Waiting {
        match_request_id: String,
        user_id: String,
        waiting_count: usize,
        relaxation_level: u8,
        relaxation_message: Option<String>,
        elapsed_seconds: u64,
    },
    Timeout {
        match_request_id: String,
        relaxation_level: u8,
        relaxation_message: String,
    },
    NotFound {
        match_request_id: String,
    },
    AlreadyActive {
        user_id: String,
        active_type: String,
        active_id: String,
    },
}

impl From<MatchOutcome> for MatchStatusResponse {
    fn from(outcome: MatchOutcome) -> Self {
        match outcome {
            MatchOutcome::Matched { match_request_id, group, relaxation_level } => MatchStatusResponse::Matched {
                match_request_id,
                group_id: group.id.clone(),
                group,
                relaxation_level,
            },
            MatchOutcome::Waiting {
                match_request_id,
                participant_id,
                waiting_count,
                relaxation_level,
                relaxation_message,
                elapsed_seconds,
            } => MatchStatusResponse::Waiting {
                match_request_id,
                user_id: participant_id,
                waiting_count,
                relaxation_level,
                relaxation_message,
                elapsed_seconds,
            },
            MatchOutcome::Timeout { match_request_id, relaxation_level, relaxation_message } => {
                MatchStatusResponse::Timeout { match_request_id, relaxation_level, relaxation_message }
            }
            MatchOutcome::NotFound { match_request_id } => MatchStatusResponse::NotFound { match_request_id },
            MatchOutcome::AlreadyActive { participant_id, active } => {
                let (active_type, active_id) = match active {
                    ActiveMembership::Room(room) => ("room", room.room_id),
                    ActiveMembership::Group(group) => ("group", group.group_id),
                };
                MatchStatusResponse::AlreadyActive {
                    user_id: participant_id,
                    active_type: active_type.to_string(),
                    active_id,
                }
            }
        }
    }
}

/// Response for the active-status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveStatusResponse {
    pub user_id: String,
    pub active: bool,
    pub match_request_id: Option<String>,
    pub room: Option<RoomRef>,
    pub group: Option<GroupRef>,
}

impl From<ActiveStatus> for ActiveStatusResponse {
    fn from(status: ActiveStatus) -> Self {
        Self {
            active: status.is_active(),
            user_id: status.participant_id,
            match_request_id: status.waiting_request_id,
            room: status.room,
            group: status.group,
        }
    }
}

/// Group detail with alternative restaurants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDetailResponse {
    #[serde(flatten)]
    pub group: Group,
    #[serde(rename = "recommendedRestaurants")]
    pub recommended_restaurants: Vec<Restaurant>,
}

/// Today's statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_participants: usize,
    pub waiting_users: usize,
    pub total_groups: usize,
    pub menu_stats: HashMap<String, usize>,
    pub time_stats: HashMap<String, usize>,
}

impl From<EngineStats> for StatsResponse {
    fn from(stats: EngineStats) -> Self {
        Self {
            total_participants: stats.total_participants,
            waiting_users: stats.waiting_users,
            total_groups: stats.total_groups,
            menu_stats: stats.menu_stats,
            time_stats: stats.time_stats,
        }
    }
}

/// A participant's match count and food level
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLevelResponse {
    pub user_id: String,
    pub match_count: u32,
    pub food_level: FoodLevel,
}

/// Cancel response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelResponse {
    pub success: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
