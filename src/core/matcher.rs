use chrono::{DateTime, Utc};
use thiserror::Error;
use crate::core::{
    compatibility::mutually_compatible,
    queue::WaitingQueue,
    registry::GroupRegistry,
    relaxation::relaxation_level,
};
use crate::models::{Group, MatchRequest, MatchingRules};
use crate::services::RestaurantRecommender;

/// Broken internal invariants. Unreachable unless the algorithm is wrong.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Group formation over the waiting queue
///
/// # Pipeline Stages
/// 1. Hard constraint filter (time slot, price range, menu)
/// 2. Mutual compatibility, each side at its own relaxation level
/// 3. Queue-order selection, requester first, capped at the group size
/// 4. Atomic removal from the queue and group recording
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    rules: MatchingRules,
}

impl Matcher {
    pub fn new(rules: MatchingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &MatchingRules {
        &self.rules
    }

    /// Relaxation level of a queued request from its own waiting time
    pub fn candidate_relaxation(&self, candidate: &MatchRequest, now: DateTime<Utc>) -> u8 {
        relaxation_level(candidate.waited_secs(now), self.rules.relaxation_interval_secs)
    }

    /// Compatible candidates in queue order, capped so that the requester
    /// plus candidates fit in one group
    pub fn find_candidates<'q>(
        &self,
        requester: &MatchRequest,
        requester_relaxation: u8,
        queue: &'q WaitingQueue,
        now: DateTime<Utc>,
    ) -> Vec<&'q MatchRequest> {
        let capacity = self.rules.max_group_size.saturating_sub(1);

        queue
            .by_conditions(&requester.conditions)
            .filter(|candidate| candidate.id != requester.id)
            .filter(|candidate| {
                let candidate_relaxation = self.candidate_relaxation(candidate, now);
                mutually_compatible(requester, candidate, requester_relaxation, candidate_relaxation)
            })
            .take(capacity)
            .collect()
    }

    /// Try to form a group around `requester`.
    ///
    /// On success every chosen member, the requester included when queued,
    /// has left the queue and the group is recorded. On failure nothing
    /// changes.
    pub fn attempt_match(
        &self,
        requester: &MatchRequest,
        requester_relaxation: u8,
        queue: &mut WaitingQueue,
        registry: &mut GroupRegistry,
        recommender: &dyn RestaurantRecommender,
        now: DateTime<Utc>,
    ) -> Result<Option<Group>, MatchError> {
        let candidates = self.find_candidates(requester, requester_relaxation, queue, now);
        if candidates.is_empty() {
            return Ok(None);
        }

        let mut members = Vec::with_capacity(candidates.len() + 1);
        members.push(MatchRequest {
            relaxation_level: requester_relaxation,
            ..requester.clone()
        });
        members.extend(candidates.into_iter().map(|candidate| MatchRequest {
            relaxation_level: self.candidate_relaxation(candidate, now),
            ..candidate.clone()
        }));

        if members.len() > self.rules.max_group_size {
            return Err(MatchError::InvariantViolation(format!(
                "group of {} exceeds max size {}",
                members.len(),
                self.rules.max_group_size
            )));
        }

        let member_ids: Vec<String> = members.iter().map(|m| m.id.clone()).collect();
        let queued = member_ids
            .iter()
            .filter(|id| queue.find_by_id(id).is_some())
            .count();
        let removed = queue.remove_many(&member_ids);
        if removed != queued {
            return Err(MatchError::InvariantViolation(format!(
                "removed {} queue entries for {} queued members",
                removed, queued
            )));
        }

        let conditions = requester.conditions.clone();
        let restaurant = recommender.recommend(&conditions.menu, &conditions.price_range);
        let group = registry
            .record_group(members, conditions, restaurant, requester_relaxation > 0, now)
            .clone();

        tracing::info!(
            "Formed group {} with {} members for {}/{}/{} (relaxation {})",
            group.id,
            group.members.len(),
            group.conditions.time_slot,
            group.conditions.price_range,
            group.conditions.menu,
            requester_relaxation
        );

        Ok(Some(group))
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(MatchingRules::default())
    }
}
