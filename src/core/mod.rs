// Core algorithm exports
pub mod compatibility;
pub mod engine;
pub mod matcher;
pub mod queue;
pub mod registry;
pub mod relaxation;

pub use compatibility::{is_similar_age, is_similar_level, mutually_compatible, preference_set, wants, PreferenceCondition};
pub use engine::{ActiveMembership, ActiveStatus, EngineError, EngineStats, MatchEngine, MatchOutcome};
pub use matcher::{MatchError, Matcher};
pub use queue::WaitingQueue;
pub use registry::GroupRegistry;
pub use relaxation::{relaxation_level, relaxation_message, MAX_RELAXATION_LEVEL};
