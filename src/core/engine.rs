use std::collections::HashMap;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::Mutex;
use crate::core::{
    matcher::{MatchError, Matcher},
    queue::WaitingQueue,
    registry::GroupRegistry,
    relaxation::{relaxation_level, relaxation_message, TIMEOUT_MESSAGE},
};
use crate::models::{
    Group, GroupRef, MatchConditions, MatchRequest, MatchingRules, Participant, Preferences, RoomRef,
};
use crate::services::{MatchCountLedger, MembershipOracle, RestaurantRecommender};

/// Errors that can occur inside the engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Matching failed: {0}")]
    Match(#[from] MatchError),
}

/// Why a join was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveMembership {
    Room(RoomRef),
    Group(GroupRef),
}

/// Result of a join or a status poll
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Matched {
        match_request_id: String,
        group: Group,
        /// Level used by the poll that formed the group; absent when the
        /// group already existed
        relaxation_level: Option<u8>,
    },
    Waiting {
        match_request_id: String,
        participant_id: String,
        /// Other requests queued in the same bucket; the requester itself is
        /// never counted, on join or on poll
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
        participant_id: String,
        active: ActiveMembership,
    },
}

/// Everything a participant is currently involved in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveStatus {
    pub participant_id: String,
    pub waiting_request_id: Option<String>,
    pub room: Option<RoomRef>,
    pub group: Option<GroupRef>,
}

impl ActiveStatus {
    pub fn is_active(&self) -> bool {
        self.waiting_request_id.is_some() || self.room.is_some() || self.group.is_some()
    }
}

/// Snapshot of queue and group counters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineStats {
    pub total_participants: usize,
    pub waiting_users: usize,
    pub total_groups: usize,
    pub menu_stats: HashMap<String, usize>,
    pub time_stats: HashMap<String, usize>,
}

/// Queue and registry mutate together under one lock
#[derive(Debug, Default)]
struct EngineState {
    queue: WaitingQueue,
    registry: GroupRegistry,
}

impl EngineState {
    fn waiting_others(&self, conditions: &MatchConditions, request_id: &str) -> usize {
        self.queue
            .by_conditions(conditions)
            .filter(|r| r.id != request_id)
            .count()
    }
}

/// Owns the waiting queue and group registry and drives joins, polls and
/// cancellations against them.
pub struct MatchEngine {
    state: Mutex<EngineState>,
    matcher: Matcher,
    recommender: Arc<dyn RestaurantRecommender>,
    membership: Arc<dyn MembershipOracle>,
    ledger: Arc<dyn MatchCountLedger>,
}

impl MatchEngine {
    pub fn new(
        rules: MatchingRules,
        recommender: Arc<dyn RestaurantRecommender>,
        membership: Arc<dyn MembershipOracle>,
        ledger: Arc<dyn MatchCountLedger>,
    ) -> Self {
        Self {
            state: Mutex::new(EngineState::default()),
            matcher: Matcher::new(rules),
            recommender,
            membership,
            ledger,
        }
    }

    pub fn rules(&self) -> &MatchingRules {
        self.matcher.rules()
    }

    /// Join the queue, matching immediately at relaxation level 0 if possible
    pub async fn join_match(
        &self,
        participant: Participant,
        conditions: MatchConditions,
        preferences: Preferences,
        now: DateTime<Utc>,
    ) -> Result<MatchOutcome, EngineError> {
        // Generated ids belong to nobody and cannot be active anywhere
        let has_identity = participant.participant_id.as_deref().is_some_and(|id| !id.is_empty());
        let request = MatchRequest::new(participant, conditions, preferences, now);

        let outcome = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;

            // Checked under the lock so a group formed by a concurrent join or
            // poll is already visible here
            if has_identity {
                if let Some(active) = self.active_membership(state, &request.participant_id, now) {
                    tracing::warn!("Join rejected for {}: already active ({:?})", request.participant_id, active);
                    return Ok(MatchOutcome::AlreadyActive {
                        participant_id: request.participant_id.clone(),
                        active,
                    });
                }
            }

            let replaced = state.queue.remove_by_participant_id(&request.participant_id);
            if replaced > 0 {
                tracing::debug!("Replaced {} earlier request(s) of {}", replaced, request.participant_id);
            }

            let matched = self.matcher.attempt_match(
                &request,
                0,
                &mut state.queue,
                &mut state.registry,
                self.recommender.as_ref(),
                now,
            )?;

            match matched {
                Some(group) => MatchOutcome::Matched {
                    match_request_id: request.id.clone(),
                    group,
                    relaxation_level: Some(0),
                },
                None => {
                    let waiting_count = state.waiting_others(&request.conditions, &request.id);
                    let outcome = MatchOutcome::Waiting {
                        match_request_id: request.id.clone(),
                        participant_id: request.participant_id.clone(),
                        waiting_count,
                        relaxation_level: 0,
                        relaxation_message: None,
                        elapsed_seconds: 0,
                    };
                    state.queue.add(request.clone());
                    outcome
                }
            }
        };

        match &outcome {
            MatchOutcome::Matched { group, .. } => self.record_match_counts(group),
            _ => tracing::info!(
                "Queued request {} for {} ({}/{}/{})",
                request.id,
                request.participant_id,
                request.conditions.time_slot,
                request.conditions.price_range,
                request.conditions.menu
            ),
        }

        Ok(outcome)
    }

    /// Poll a request after `elapsed_seconds` of waiting, re-attempting the
    /// match at the relaxation level that wait has reached
    pub async fn match_status(
        &self,
        match_request_id: &str,
        elapsed_seconds: u64,
        now: DateTime<Utc>,
    ) -> Result<MatchOutcome, EngineError> {
        let outcome = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;

            if let Some(group) = state.registry.find_group_containing_request_id(match_request_id) {
                return Ok(MatchOutcome::Matched {
                    match_request_id: match_request_id.to_string(),
                    group: group.clone(),
                    relaxation_level: None,
                });
            }

            let level = relaxation_level(elapsed_seconds, self.rules().relaxation_interval_secs);
            if !state.queue.set_relaxation_level(match_request_id, level) {
                tracing::debug!("Status poll for unknown request {}", match_request_id);
                return Ok(MatchOutcome::NotFound {
                    match_request_id: match_request_id.to_string(),
                });
            }
            let requester = match state.queue.find_by_id(match_request_id) {
                Some(request) => request.clone(),
                None => {
                    return Ok(MatchOutcome::NotFound {
                        match_request_id: match_request_id.to_string(),
                    })
                }
            };

            let matched = self.matcher.attempt_match(
                &requester,
                level,
                &mut state.queue,
                &mut state.registry,
                self.recommender.as_ref(),
                now,
            )?;

            match matched {
                Some(group) => MatchOutcome::Matched {
                    match_request_id: requester.id.clone(),
                    group,
                    relaxation_level: Some(level),
                },
                None if elapsed_seconds >= self.rules().timeout_secs => MatchOutcome::Timeout {
                    match_request_id: requester.id.clone(),
                    relaxation_level: level,
                    relaxation_message: TIMEOUT_MESSAGE.to_string(),
                },
                None => MatchOutcome::Waiting {
                    match_request_id: requester.id.clone(),
                    participant_id: requester.participant_id.clone(),
                    waiting_count: state.waiting_others(&requester.conditions, &requester.id),
                    relaxation_level: level,
                    relaxation_message: relaxation_message(level, &requester.preferences),
                    elapsed_seconds,
                },
            }
        };

        match &outcome {
            MatchOutcome::Matched { group, .. } => self.record_match_counts(group),
            MatchOutcome::Timeout { .. } => {
                tracing::info!("Request {} timed out after {}s", match_request_id, elapsed_seconds)
            }
            _ => tracing::debug!("Request {} still waiting after {}s", match_request_id, elapsed_seconds),
        }

        Ok(outcome)
    }

    /// Leave the queue. Unknown ids are a no-op; returns whether anything
    /// was removed.
    pub async fn cancel_match(&self, match_request_id: &str) -> bool {
        let removed = self.state.lock().await.queue.remove_by_id(match_request_id);
        if removed > 0 {
            tracing::info!("Cancelled request {}", match_request_id);
        } else {
            tracing::debug!("Cancel for absent request {}", match_request_id);
        }
        removed > 0
    }

    pub async fn active_status(&self, participant_id: &str, now: DateTime<Utc>) -> ActiveStatus {
        let state = self.state.lock().await;

        ActiveStatus {
            participant_id: participant_id.to_string(),
            waiting_request_id: state
                .queue
                .find_by_participant_id(participant_id)
                .map(|r| r.id.clone()),
            room: self.membership.has_open_room(participant_id),
            group: self.active_group(&state, participant_id, now),
        }
    }

    pub async fn groups(&self) -> Vec<Group> {
        self.state.lock().await.registry.all().to_vec()
    }

    pub async fn group(&self, group_id: &str) -> Option<Group> {
        self.state.lock().await.registry.find_by_id(group_id).cloned()
    }

    pub async fn stats(&self) -> EngineStats {
        let state = self.state.lock().await;
        let mut stats = EngineStats {
            waiting_users: state.queue.len(),
            total_groups: state.registry.len(),
            ..EngineStats::default()
        };

        let grouped = state.registry.all().iter().flat_map(|g| g.members.iter());
        for request in state.queue.iter().chain(grouped) {
            stats.total_participants += 1;
            *stats.menu_stats.entry(request.conditions.menu.clone()).or_insert(0) += 1;
            *stats.time_stats.entry(request.conditions.time_slot.clone()).or_insert(0) += 1;
        }

        stats
    }

    /// Open room first, then an externally managed group, then a group this
    /// engine formed earlier the same day
    fn active_membership(
        &self,
        state: &EngineState,
        participant_id: &str,
        now: DateTime<Utc>,
    ) -> Option<ActiveMembership> {
        self.membership
            .has_open_room(participant_id)
            .map(ActiveMembership::Room)
            .or_else(|| self.active_group(state, participant_id, now).map(ActiveMembership::Group))
    }

    fn active_group(&self, state: &EngineState, participant_id: &str, now: DateTime<Utc>) -> Option<GroupRef> {
        self.membership.has_active_group(participant_id).or_else(|| {
            state
                .registry
                .find_same_day_group(participant_id, now)
                .map(|g| GroupRef { group_id: g.id.clone() })
        })
    }

    fn record_match_counts(&self, group: &Group) {
        for member in &group.members {
            let count = self.ledger.increment(&member.participant_id);
            tracing::debug!("{} now has {} matches", member.participant_id, count);
        }
    }
}
