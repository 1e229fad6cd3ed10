use crate::models::{MatchConditions, MatchRequest};

/// Pending match requests in arrival order.
///
/// Removal of an absent id is a no-op; removals report how many entries
/// actually left the queue.
#[derive(Debug, Default, Clone)]
pub struct WaitingQueue {
    requests: Vec<MatchRequest>,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, request: MatchRequest) {
        self.requests.push(request);
    }

    pub fn remove_by_id(&mut self, id: &str) -> usize {
        self.remove_where(|r| r.id == id)
    }

    pub fn remove_by_participant_id(&mut self, participant_id: &str) -> usize {
        self.remove_where(|r| r.participant_id == participant_id)
    }

    pub fn remove_many(&mut self, ids: &[String]) -> usize {
        self.remove_where(|r| ids.contains(&r.id))
    }

    fn remove_where<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&MatchRequest) -> bool,
    {
        let before = self.requests.len();
        self.requests.retain(|r| !predicate(r));
        before - self.requests.len()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&MatchRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    pub fn find_by_participant_id(&self, participant_id: &str) -> Option<&MatchRequest> {
        self.requests.iter().find(|r| r.participant_id == participant_id)
    }

    /// Store a freshly derived relaxation level; false if the id is absent
    pub fn set_relaxation_level(&mut self, id: &str, level: u8) -> bool {
        match self.requests.iter_mut().find(|r| r.id == id) {
            Some(request) => {
                request.relaxation_level = level;
                true
            }
            None => false,
        }
    }

    /// Every queued request sharing the hard constraints
    pub fn by_conditions<'a>(
        &'a self,
        conditions: &MatchConditions,
    ) -> impl Iterator<Item = &'a MatchRequest> + 'a {
        let conditions = conditions.clone();
        self.requests.iter().filter(move |r| r.conditions == conditions)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchRequest> {
        self.requests.iter()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Participant, Preferences};
    use chrono::Utc;

    fn request(participant_id: &str, menu: &str) -> MatchRequest {
        MatchRequest::new(
            Participant {
                participant_id: Some(participant_id.to_string()),
                ..Participant::default()
            },
            MatchConditions::new("12:00", "mid", menu),
            Preferences::default(),
            Utc::now(),
        )
    }

    #[test]
    fn test_add_and_find() {
        let mut queue = WaitingQueue::new();
        let r = request("u1", "korean");
        let id = r.id.clone();
        queue.add(r);

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.find_by_id(&id).map(|r| r.participant_id.as_str()), Some("u1"));
        assert!(queue.find_by_participant_id("u1").is_some());
        assert!(queue.find_by_participant_id("u2").is_none());
    }

    #[test]
    fn test_removals_are_idempotent() {
        let mut queue = WaitingQueue::new();
        let r = request("u1", "korean");
        let id = r.id.clone();
        queue.add(r);

        assert_eq!(queue.remove_by_id(&id), 1);
        assert_eq!(queue.remove_by_id(&id), 0);
        assert_eq!(queue.remove_by_participant_id("u1"), 0);
        assert_eq!(queue.remove_many(&[id]), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_remove_many_keeps_others() {
        let mut queue = WaitingQueue::new();
        let requests: Vec<_> = (0..4).map(|i| request(&format!("u{}", i), "korean")).collect();
        let ids: Vec<String> = requests.iter().map(|r| r.id.clone()).collect();
        requests.into_iter().for_each(|r| queue.add(r));

        let removed = queue.remove_many(&[ids[0].clone(), ids[2].clone(), "missing".to_string()]);

        assert_eq!(removed, 2);
        let left: Vec<&str> = queue.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(left, vec![ids[1].as_str(), ids[3].as_str()]);
    }

    #[test]
    fn test_by_conditions() {
        let mut queue = WaitingQueue::new();
        queue.add(request("u1", "korean"));
        queue.add(request("u2", "japanese"));
        queue.add(request("u3", "korean"));

        let korean = MatchConditions::new("12:00", "mid", "korean");
        assert_eq!(queue.by_conditions(&korean).count(), 2);

        let late = MatchConditions::new("13:00", "mid", "korean");
        assert_eq!(queue.by_conditions(&late).count(), 0);
    }

    #[test]
    fn test_by_conditions_outlives_the_filter_value() {
        let mut queue = WaitingQueue::new();
        queue.add(request("u1", "korean"));
        queue.add(request("u2", "korean"));

        // Results borrow the queue only
        let found: Vec<&MatchRequest> = {
            let wanted = MatchConditions::new("12:00", "mid", "korean");
            queue.by_conditions(&wanted).collect()
        };

        let ids: Vec<&str> = found.iter().map(|r| r.participant_id.as_str()).collect();
        assert_eq!(ids, ["u1", "u2"]);
    }

    #[test]
    fn test_set_relaxation_level() {
        let mut queue = WaitingQueue::new();
        let r = request("u1", "korean");
        let id = r.id.clone();
        queue.add(r);

        assert!(queue.set_relaxation_level(&id, 2));
        assert_eq!(queue.find_by_id(&id).map(|r| r.relaxation_level), Some(2));
        assert!(!queue.set_relaxation_level("missing", 1));
    }
}
