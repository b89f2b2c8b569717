use actix_web::{web, HttpResponse};
use crate::{api::respond, database::MongoDB, services::user_service};

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Every user document"),
        (status = 500, description = "Database error")
    )
)]
pub async fn get_users(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("👤 GET /users - Listing all users");
    respond(user_service::list_users(&db).await, "Failed to list users")
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId")),
    responses(
        (status = 200, description = "The user document, or null when absent"),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn get_user(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("👤 GET /users/{} - Fetching user", id);
    respond(user_service::get_user(&db, &id).await, "Failed to fetch user")
}

#[utoipa::path(
    get,
    path = "/activeUsers",
    tag = "Users",
    responses(
        (status = 200, description = "Up to 6 users with status Active")
    )
)]
pub async fn get_active_users(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("👤 GET /activeUsers - Listing active users");
    respond(user_service::list_active_users(&db).await, "Failed to list active users")
}
