use dashmap::DashMap;
use crate::models::{GroupRef, RoomRef};

/// Answers whether a participant is already busy elsewhere.
///
/// Consulted on join to block double participation. Groups the engine forms
/// itself are tracked by the engine; this covers rooms and groups managed
/// outside it. Lookups run under the engine lock and must not block.
pub trait MembershipOracle: Send + Sync {
    fn has_open_room(&self, participant_id: &str) -> Option<RoomRef>;

    fn has_active_group(&self, participant_id: &str) -> Option<GroupRef>;
}

/// Membership oracle kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryMembership {
    rooms: DashMap<String, RoomRef>,
    groups: DashMap<String, GroupRef>,
}

impl InMemoryMembership {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_room(&self, participant_id: &str, room: RoomRef) {
        self.rooms.insert(participant_id.to_string(), room);
    }

    pub fn leave_room(&self, participant_id: &str) -> Option<RoomRef> {
        self.rooms.remove(participant_id).map(|(_, room)| room)
    }

    pub fn join_group(&self, participant_id: &str, group: GroupRef) {
        self.groups.insert(participant_id.to_string(), group);
    }

    pub fn leave_group(&self, participant_id: &str) -> Option<GroupRef> {
        self.groups.remove(participant_id).map(|(_, group)| group)
    }
}

impl MembershipOracle for InMemoryMembership {
    fn has_open_room(&self, participant_id: &str) -> Option<RoomRef> {
        self.rooms.get(participant_id).map(|entry| entry.value().clone())
    }

    fn has_active_group(&self, participant_id: &str) -> Option<GroupRef> {
        self.groups.get(participant_id).map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_lifecycle() {
        let membership = InMemoryMembership::new();
        assert!(membership.has_open_room("u1").is_none());

        membership.open_room("u1", RoomRef { room_id: "room-1".to_string() });
        assert_eq!(membership.has_open_room("u1").map(|r| r.room_id), Some("room-1".to_string()));

        assert!(membership.leave_room("u1").is_some());
        assert!(membership.has_open_room("u1").is_none());
    }

    #[test]
    fn test_group_lifecycle() {
        let membership = InMemoryMembership::new();
        membership.join_group("u1", GroupRef { group_id: "g1".to_string() });

        assert_eq!(membership.has_active_group("u1").map(|g| g.group_id), Some("g1".to_string()));
        assert!(membership.has_active_group("u2").is_none());

        membership.leave_group("u1");
        assert!(membership.has_active_group("u1").is_none());
    }
}
