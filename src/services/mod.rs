// Service exports
pub mod ledger;
pub mod membership;
pub mod restaurants;

pub use ledger::{food_level, FoodLevel, InMemoryLedger, MatchCountLedger};
pub use membership::{InMemoryMembership, MembershipOracle};
pub use restaurants::{CatalogError, RestaurantCatalog, RestaurantRecommender};
