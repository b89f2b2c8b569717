pub mod health;
pub mod metrics;
pub mod swagger;
pub mod tips;
pub mod users;

use crate::utils::AppError;
use actix_web::{web, HttpResponse, ResponseError};
use serde::Serialize;

/// Registers every public route. Shared by `main` and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    .route("/", web::get().to(health::root))
    .route("/health", web::get().to(health::health_check))
    .route("/metrics", web::get().to(metrics::get_metrics))
    // Users
    .route("/users", web::get().to(users::get_users))
    .route("/users/{id}", web::get().to(users::get_user))
    .route("/activeUsers", web::get().to(users::get_active_users))
    // Tips
    .route("/trendingTips", web::get().to(tips::get_trending_tips))
    .route("/tips", web::post().to(tips::create_tip))
    .route("/tips", web::get().to(tips::get_tips))
    .route("/browseTips", web::get().to(tips::browse_tips))
    .route("/browseTips/{id}", web::get().to(tips::get_tip))
    .route("/myTips", web::post().to(tips::my_tips))
    .route("/tips/{id}", web::delete().to(tips::delete_tip))
    .route("/tips/{id}", web::put().to(tips::update_tip))
    .route("/tips/{level}", web::get().to(tips::get_tips_by_level))
    .route("/tips/{id}/like", web::patch().to(tips::like_tip))
    .route("/myMostLikedTip", web::post().to(tips::my_most_liked_tip))
    .route("/sortedTips", web::get().to(tips::get_sorted_tips));
}

/// Turns a service result into a response, logging failures with `context`.
pub(crate) fn respond<T: Serialize>(result: Result<T, AppError>, context: &str) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => {
            log::error!("❌ {}: {}", context, e);
            e.error_response()
        }
    }
}
