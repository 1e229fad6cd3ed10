use actix_web::{web, HttpResponse, Responder};
use crate::models::{ErrorResponse, GroupDetailResponse, RestaurantQuery, StatsResponse};
use crate::routes::AppState;
use crate::services::RestaurantRecommender;

/// Alternatives listed on a group's detail page
const RECOMMENDED_RESTAURANTS: usize = 3;

/// Configure group, statistics and restaurant routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/groups", web::get().to(list_groups))
        .route("/groups/{group_id}", web::get().to(get_group))
        .route("/stats", web::get().to(stats))
        .route("/restaurants", web::get().to(list_restaurants))
        .route("/restaurants/random", web::get().to(random_restaurant));
}

async fn list_groups(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.engine.groups().await)
}

/// GET /api/v1/groups/{groupId}
///
/// The group plus up to three alternative restaurants for its menu and
/// price range.
async fn get_group(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let group_id = path.into_inner();

    match state.engine.group(&group_id).await {
        Some(group) => {
            let recommended_restaurants = state.catalog.recommend_many(
                &group.conditions.menu,
                &group.conditions.price_range,
                RECOMMENDED_RESTAURANTS,
            );
            HttpResponse::Ok().json(GroupDetailResponse { group, recommended_restaurants })
        }
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "Group not found".to_string(),
            message: format!("No group with id {}", group_id),
            status_code: 404,
        }),
    }
}

async fn stats(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(StatsResponse::from(state.engine.stats().await))
}

/// GET /api/v1/restaurants?menu={menu}&priceRange={price}
async fn list_restaurants(state: web::Data<AppState>, query: web::Query<RestaurantQuery>) -> impl Responder {
    HttpResponse::Ok().json(state.catalog.list(query.menu.as_deref(), query.price_range.as_deref()))
}

/// GET /api/v1/restaurants/random?menu={menu}&priceRange={price}
async fn random_restaurant(state: web::Data<AppState>, query: web::Query<RestaurantQuery>) -> impl Responder {
    HttpResponse::Ok().json(state.catalog.random(query.menu.as_deref(), query.price_range.as_deref()))
}
