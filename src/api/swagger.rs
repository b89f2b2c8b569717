use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Garden Nest API",
        version = "1.0.0",
        description = "Backend for sharing gardening tips.\n\n**Collections:**\n- `activeUsers`: gardener profiles\n- `shareTips`: tips with visibility, level and likes\n\nDocuments are schemaless and returned as stored; `likesCount` is derived from `likedBy` on the ranking endpoints."
    ),
    paths(
        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Users
        crate::api::users::get_users,
        crate::api::users::get_user,
        crate::api::users::get_active_users,

        // Tips
        crate::api::tips::get_trending_tips,
        crate::api::tips::create_tip,
        crate::api::tips::get_tips,
        crate::api::tips::browse_tips,
        crate::api::tips::get_tip,
        crate::api::tips::my_tips,
        crate::api::tips::delete_tip,
        crate::api::tips::update_tip,
        crate::api::tips::get_tips_by_level,
        crate::api::tips::like_tip,
        crate::api::tips::my_most_liked_tip,
        crate::api::tips::get_sorted_tips,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::EmailRequest,
            crate::models::AuthorRequest,
            crate::models::InsertSummary,
            crate::models::UpdateSummary,
            crate::models::DeleteSummary,
        )
    ),
    tags(
        (name = "Health", description = "Liveness, database reachability and request counters."),
        (name = "Users", description = "Gardener profiles, including the Active showcase."),
        (name = "Tips", description = "Sharing, browsing, liking and ranking gardening tips."),
    )
)]
pub struct ApiDoc;
