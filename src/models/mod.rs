// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Group, GroupRef, MatchConditions, MatchRequest, MatchingRules, Participant, Preferences, Restaurant, RoomRef};
pub use requests::{CancelMatchRequest, JoinMatchRequest, MatchStatusQuery, RestaurantQuery};
pub use responses::{
    ActiveStatusResponse, CancelResponse, ErrorResponse, GroupDetailResponse, HealthResponse, MatchStatusResponse,
    StatsResponse, UserLevelResponse,
};
