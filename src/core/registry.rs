use chrono::{DateTime, Utc};
use crate::models::{Group, MatchConditions, MatchRequest, Restaurant};

/// Append-only record of formed groups
#[derive(Debug, Default, Clone)]
pub struct GroupRegistry {
    groups: Vec<Group>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign an id and timestamp, store, and return the new group
    pub fn record_group(
        &mut self,
        members: Vec<MatchRequest>,
        conditions: MatchConditions,
        restaurant: Restaurant,
        relaxation_applied: bool,
        created_at: DateTime<Utc>,
    ) -> &Group {
        self.groups.push(Group {
            id: uuid::Uuid::new_v4().to_string(),
            members,
            conditions,
            restaurant,
            created_at,
            relaxation_applied,
        });
        &self.groups[self.groups.len() - 1]
    }

    pub fn find_group_containing_request_id(&self, request_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.contains_request(request_id))
    }

    /// Most recent group the participant belongs to
    pub fn find_group_containing_participant(&self, participant_id: &str) -> Option<&Group> {
        self.groups.iter().rev().find(|g| g.contains_participant(participant_id))
    }

    /// Group the participant joined on the same UTC day as `now`. Lunch
    /// groups do not carry over to the next day.
    pub fn find_same_day_group(&self, participant_id: &str, now: DateTime<Utc>) -> Option<&Group> {
        self.find_group_containing_participant(participant_id)
            .filter(|g| g.created_at.date_naive() == now.date_naive())
    }

    pub fn find_by_id(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    pub fn all(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
