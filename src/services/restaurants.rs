use rand::seq::SliceRandom;
use thiserror::Error;
use crate::models::Restaurant;

/// Errors raised while building a restaurant catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Restaurant catalog is empty")]
    Empty,
}

/// Recommends restaurants for a formed group.
///
/// Implementations must not block on I/O; the engine calls them while it
/// holds the queue lock.
pub trait RestaurantRecommender: Send + Sync {
    /// One restaurant for (cuisine, price tier), falling back to the cuisine
    /// alone and then to the whole catalog
    fn recommend(&self, cuisine: &str, price: &str) -> Restaurant;

    /// Up to `count` distinct restaurants under the same fallback rules
    fn recommend_many(&self, cuisine: &str, price: &str, count: usize) -> Vec<Restaurant>;
}

/// In-memory restaurant catalog with random selection among equal candidates
#[derive(Debug, Clone)]
pub struct RestaurantCatalog {
    restaurants: Vec<Restaurant>,
}

impl RestaurantCatalog {
    pub fn new(restaurants: Vec<Restaurant>) -> Result<Self, CatalogError> {
        if restaurants.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { restaurants })
    }

    /// Catalog of the restaurants around the office
    pub fn builtin() -> Self {
        let entry = |id: &str, name: &str, cuisine: &str, price: &str, distance: u32, rating: f64| Restaurant {
            id: id.to_string(),
            name: name.to_string(),
            cuisine: cuisine.to_string(),
            price: price.to_string(),
            distance,
            rating,
        };

        Self {
            restaurants: vec![
                entry("r1", "Gimbap Heaven", "korean", "low", 3, 4.2),
                entry("r2", "Hansot Lunchbox", "korean", "low", 4, 4.0),
                entry("r3", "Baekban House", "korean", "mid", 5, 4.5),
                entry("r4", "Sushiro", "japanese", "mid", 6, 4.3),
                entry("r5", "Izakaya Hana", "japanese", "high", 8, 4.6),
                entry("r6", "Jjamppong King", "chinese", "mid", 4, 4.1),
                entry("r7", "Dimsum House", "chinese", "high", 10, 4.7),
                entry("r8", "Saladay", "salad", "mid", 3, 4.4),
                entry("r9", "Subway", "salad", "low", 2, 4.0),
                entry("r10", "Tteokbokki Heaven", "snack", "low", 3, 4.2),
                entry("r11", "Pizza Hut", "western", "mid", 7, 4.0),
                entry("r12", "Pasta & Co", "western", "high", 9, 4.5),
            ],
        }
    }

    /// Exact filter; `None` matches everything
    pub fn list(&self, menu: Option<&str>, price: Option<&str>) -> Vec<Restaurant> {
        self.restaurants
            .iter()
            .filter(|r| menu.map_or(true, |m| r.cuisine == m))
            .filter(|r| price.map_or(true, |p| r.price == p))
            .cloned()
            .collect()
    }

    /// Random pick among the exact filter, or among the whole catalog when
    /// nothing matches
    pub fn random(&self, menu: Option<&str>, price: Option<&str>) -> Restaurant {
        let filtered = self.list(menu, price);
        let pool = if filtered.is_empty() { &self.restaurants } else { &filtered };
        pool.choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| self.restaurants[0].clone())
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    fn candidates(&self, cuisine: &str, price: &str) -> Vec<&Restaurant> {
        let same_cuisine: Vec<&Restaurant> = self.restaurants.iter().filter(|r| r.cuisine == cuisine).collect();
        let exact: Vec<&Restaurant> = same_cuisine.iter().copied().filter(|r| r.price == price).collect();

        if !exact.is_empty() {
            exact
        } else if !same_cuisine.is_empty() {
            same_cuisine
        } else {
            self.restaurants.iter().collect()
        }
    }
}

impl Default for RestaurantCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RestaurantRecommender for RestaurantCatalog {
    fn recommend(&self, cuisine: &str, price: &str) -> Restaurant {
        let candidates = self.candidates(cuisine, price);
        let chosen = candidates
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(&self.restaurants[0]);

        tracing::debug!("Recommended {} for {}/{}", chosen.id, cuisine, price);
        chosen.clone()
    }

    fn recommend_many(&self, cuisine: &str, price: &str, count: usize) -> Vec<Restaurant> {
        let mut candidates = self.candidates(cuisine, price);
        candidates.shuffle(&mut rand::thread_rng());
        candidates.into_iter().take(count).cloned().collect()
    }
}
