use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::Value;
use crate::{
    api::respond,
    database::MongoDB,
    models::{
        AuthorRequest, DeleteSummary, EmailRequest, InsertSummary, SortOrder, UpdateSummary,
        SORT_ORDER_HEADER,
    },
    services::tip_service,
};

#[utoipa::path(
    get,
    path = "/trendingTips",
    tag = "Tips",
    responses(
        (status = 200, description = "Up to 6 public tips, most liked first, each with a computed likesCount")
    )
)]
pub async fn get_trending_tips(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("🌱 GET /trendingTips - Ranking public tips by likes");
    respond(tip_service::trending_tips(&db).await, "Failed to rank trending tips")
}

#[utoipa::path(
    post,
    path = "/tips",
    tag = "Tips",
    request_body(content = Object, description = "Arbitrary tip document"),
    responses(
        (status = 200, description = "Insert acknowledgement", body = InsertSummary),
        (status = 400, description = "Body is not a JSON object")
    )
)]
pub async fn create_tip(db: web::Data<MongoDB>, body: web::Json<Value>) -> HttpResponse {
    log::info!("🌱 POST /tips - Sharing new tip");
    respond(tip_service::create_tip(&db, &body).await, "Failed to insert tip")
}

#[utoipa::path(
    get,
    path = "/tips",
    tag = "Tips",
    responses((status = 200, description = "Every tip document"))
)]
pub async fn get_tips(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("🌱 GET /tips - Listing all tips");
    respond(tip_service::list_tips(&db).await, "Failed to list tips")
}

#[utoipa::path(
    get,
    path = "/browseTips",
    tag = "Tips",
    responses((status = 200, description = "Every tip with status Public"))
)]
pub async fn browse_tips(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("🌱 GET /browseTips - Listing public tips");
    respond(tip_service::list_public_tips(&db).await, "Failed to list public tips")
}

#[utoipa::path(
    get,
    path = "/browseTips/{id}",
    tag = "Tips",
    params(("id" = String, Path, description = "Tip ObjectId")),
    responses(
        (status = 200, description = "The tip document, or null when absent"),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn get_tip(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🌱 GET /browseTips/{} - Fetching tip", id);
    respond(tip_service::get_tip(&db, &id).await, "Failed to fetch tip")
}

#[utoipa::path(
    post,
    path = "/myTips",
    tag = "Tips",
    request_body = AuthorRequest,
    responses((status = 200, description = "Tips authored by the given email"))
)]
pub async fn my_tips(db: web::Data<MongoDB>, body: web::Json<AuthorRequest>) -> HttpResponse {
    log::info!("🌱 POST /myTips - Listing tips of {:?}", body.email);
    respond(
        tip_service::list_tips_by_author(&db, body.email.as_deref()).await,
        "Failed to list author tips",
    )
}

#[utoipa::path(
    delete,
    path = "/tips/{id}",
    tag = "Tips",
    params(("id" = String, Path, description = "Tip ObjectId")),
    responses(
        (status = 200, description = "Delete acknowledgement; deletedCount is 0 when nothing matched", body = DeleteSummary),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn delete_tip(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🗑️ DELETE /tips/{} - Removing tip", id);
    respond(tip_service::delete_tip(&db, &id).await, "Failed to delete tip")
}

#[utoipa::path(
    put,
    path = "/tips/{id}",
    tag = "Tips",
    params(("id" = String, Path, description = "Tip ObjectId")),
    request_body(content = Object, description = "Fields to overwrite"),
    responses(
        (status = 200, description = "Update acknowledgement", body = UpdateSummary),
        (status = 400, description = "Malformed id or body")
    )
)]
pub async fn update_tip(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let id = path.into_inner();
    log::info!("✏️ PUT /tips/{} - Updating tip", id);
    respond(tip_service::update_tip(&db, &id, &body).await, "Failed to update tip")
}

#[utoipa::path(
    get,
    path = "/tips/{level}",
    tag = "Tips",
    params(("level" = String, Path, description = "Difficulty level, e.g. Beginner")),
    responses((status = 200, description = "Public tips of that level"))
)]
pub async fn get_tips_by_level(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let level = path.into_inner();
    log::info!("🌱 GET /tips/{} - Listing public tips by level", level);
    respond(
        tip_service::list_public_tips_by_level(&db, &level).await,
        "Failed to list tips by level",
    )
}

#[utoipa::path(
    patch,
    path = "/tips/{id}/like",
    tag = "Tips",
    params(("id" = String, Path, description = "Tip ObjectId")),
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Update acknowledgement; modifiedCount is 0 on a repeated like", body = UpdateSummary),
        (status = 400, description = "Malformed id or body")
    )
)]
pub async fn like_tip(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<EmailRequest>,
) -> HttpResponse {
    let id = path.into_inner();
    log::info!("❤️ PATCH /tips/{}/like - Liked by {}", id, body.email);
    respond(tip_service::like_tip(&db, &id, &body.email).await, "Failed to like tip")
}

#[utoipa::path(
    post,
    path = "/myMostLikedTip",
    tag = "Tips",
    request_body = AuthorRequest,
    responses((status = 200, description = "The author's most liked tip, or null"))
)]
pub async fn my_most_liked_tip(
    db: web::Data<MongoDB>,
    body: web::Json<AuthorRequest>,
) -> HttpResponse {
    log::info!("🏆 POST /myMostLikedTip - Most liked tip of {:?}", body.email);
    respond(
        tip_service::most_liked_tip(&db, body.email.as_deref()).await,
        "Failed to find most liked tip",
    )
}

#[utoipa::path(
    get,
    path = "/sortedTips",
    tag = "Tips",
    params(("sort-order" = Option<String>, Header, description = "`old` for oldest first; anything else is newest first")),
    responses((status = 200, description = "Public tips ordered by createdAt"))
)]
pub async fn get_sorted_tips(req: HttpRequest, db: web::Data<MongoDB>) -> HttpResponse {
    let header = req
        .headers()
        .get(SORT_ORDER_HEADER)
        .and_then(|value| value.to_str().ok());
    let order = SortOrder::from_header(header);
    log::info!("🌱 GET /sortedTips - Ordering public tips ({:?})", order);
    respond(tip_service::sorted_tips(&db, order).await, "Failed to sort tips")
}

#[cfg(test)]
mod tests {
    use crate::{api, database::MongoDB};
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::{json, Value};

    async fn lazy_db() -> MongoDB {
        MongoDB::connect_lazy("mongodb://127.0.0.1:27017", "gardenNestTest")
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn test_rejects_malformed_ids() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(lazy_db().await))
                .configure(api::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/browseTips/123").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::delete().uri("/tips/123").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::patch()
            .uri("/tips/123/like")
            .set_json(json!({ "email": "ivy@garden.io" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_rejects_bad_bodies() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(lazy_db().await))
                .configure(api::configure),
        )
        .await;

        // a tip must be an object
        let req = test::TestRequest::post()
            .uri("/tips")
            .set_json(json!(["not", "a", "tip"]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // liking needs an email
        let req = test::TestRequest::patch()
            .uri("/tips/65f0a1b2c3d4e5f601234567/like")
            .set_json(json!({ "mail": "typo@garden.io" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    mod live {
        use super::*;
        use mongodb::bson::{doc, DateTime};

        async fn seeded_db(name: &str) -> MongoDB {
            let uri = std::env::var("MONGODB_TEST_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
            let db = MongoDB::new(&uri, name).await.unwrap();
            db.tips().drop().await.unwrap();
            db
        }

        #[actix_web::test]
        #[ignore] // Requires MongoDB (MONGODB_TEST_URI)
        async fn test_insert_then_list_round_trips_fields() {
            let db = seeded_db("gardenNestTipsInsert").await;
            let app = test::init_service(
                App::new()
                    .app_data(web::Data::new(db.clone()))
                    .configure(api::configure),
            )
            .await;

            let tip = json!({
                "title": "Compost coffee grounds",
                "email": "moss@garden.io",
                "status": "Public",
                "level": "Beginner",
                "likedBy": [],
                "createdAt": "2024-04-01T08:00:00Z"
            });
            let req = test::TestRequest::post().uri("/tips").set_json(&tip).to_request();
            let ack: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(ack["acknowledged"], true);
            let id = ack["insertedId"].as_str().unwrap().to_string();

            let req = test::TestRequest::get().uri("/tips").to_request();
            let tips: Vec<Value> = test::call_and_read_body_json(&app, req).await;
            let stored = tips.iter().find(|t| t["_id"] == id).unwrap();
            for (key, value) in tip.as_object().unwrap() {
                assert_eq!(&stored[key], value, "field {}", key);
            }

            db.database().drop().await.unwrap();
        }

        #[actix_web::test]
        #[ignore] // Requires MongoDB (MONGODB_TEST_URI)
        async fn test_liking_twice_keeps_one_entry() {
            let db = seeded_db("gardenNestTipsLike").await;
            let inserted = db
                .tips()
                .insert_one(doc! { "title": "Mulch", "status": "Public", "likedBy": [] })
                .await
                .unwrap();
            let id = inserted.inserted_id.as_object_id().unwrap().to_hex();

            let app = test::init_service(
                App::new()
                    .app_data(web::Data::new(db.clone()))
                    .configure(api::configure),
            )
            .await;

            for expected_modified in [1, 0] {
                let req = test::TestRequest::patch()
                    .uri(&format!("/tips/{}/like", id))
                    .set_json(json!({ "email": "fern@garden.io" }))
                    .to_request();
                let ack: Value = test::call_and_read_body_json(&app, req).await;
                assert_eq!(ack["matchedCount"], 1);
                assert_eq!(ack["modifiedCount"], expected_modified);
            }

            let req = test::TestRequest::get()
                .uri(&format!("/browseTips/{}", id))
                .to_request();
            let tip: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(tip["likedBy"], json!(["fern@garden.io"]));

            db.database().drop().await.unwrap();
        }

        #[actix_web::test]
        #[ignore] // Requires MongoDB (MONGODB_TEST_URI)
        async fn test_public_listings_and_rankings() {
            let db = seeded_db("gardenNestTipsBrowse").await;
            db.tips()
                .insert_many(vec![
                    doc! { "email": "a@garden.io", "status": "Public", "level": "Beginner",
                           "likedBy": ["x", "y"], "createdAt": DateTime::from_millis(3_000) },
                    doc! { "email": "a@garden.io", "status": "Public", "level": "Expert",
                           "likedBy": ["x", "y", "z"], "createdAt": DateTime::from_millis(1_000) },
                    doc! { "email": "b@garden.io", "status": "Private", "level": "Beginner",
                           "likedBy": ["x", "y", "z", "w"], "createdAt": DateTime::from_millis(2_000) },
                    doc! { "email": "b@garden.io", "status": "Public", "level": "Beginner",
                           "createdAt": DateTime::from_millis(4_000) },
                ])
                .await
                .unwrap();

            let app = test::init_service(
                App::new()
                    .app_data(web::Data::new(db.clone()))
                    .configure(api::configure),
            )
            .await;

            let req = test::TestRequest::get().uri("/browseTips").to_request();
            let public: Vec<Value> = test::call_and_read_body_json(&app, req).await;
            assert_eq!(public.len(), 3);
            assert!(public.iter().all(|t| t["status"] == "Public"));

            let req = test::TestRequest::get().uri("/tips/Beginner").to_request();
            let beginner: Vec<Value> = test::call_and_read_body_json(&app, req).await;
            assert_eq!(beginner.len(), 2);

            let req = test::TestRequest::get().uri("/trendingTips").to_request();
            let trending: Vec<Value> = test::call_and_read_body_json(&app, req).await;
            let counts: Vec<i64> = trending
                .iter()
                .map(|t| t["likesCount"].as_i64().unwrap())
                .collect();
            assert_eq!(counts, vec![3, 2, 0]);

            let req = test::TestRequest::post()
                .uri("/myMostLikedTip")
                .set_json(json!({ "email": "a@garden.io" }))
                .to_request();
            let best: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(best["level"], "Expert");

            let req = test::TestRequest::post()
                .uri("/myMostLikedTip")
                .set_json(json!({ "email": "nobody@garden.io" }))
                .to_request();
            let none: Value = test::call_and_read_body_json(&app, req).await;
            assert!(none.is_null());

            let req = test::TestRequest::post()
                .uri("/myTips")
                .set_json(json!({ "email": "b@garden.io" }))
                .to_request();
            let mine: Vec<Value> = test::call_and_read_body_json(&app, req).await;
            assert_eq!(mine.len(), 2);

            let req = test::TestRequest::get()
                .uri("/sortedTips")
                .insert_header(("sort-order", "old"))
                .to_request();
            let oldest_first: Vec<Value> = test::call_and_read_body_json(&app, req).await;
            let dates: Vec<String> = oldest_first
                .iter()
                .map(|t| t["createdAt"].as_str().unwrap().to_string())
                .collect();
            assert!(dates.windows(2).all(|w| w[0] <= w[1]));

            let req = test::TestRequest::get().uri("/sortedTips").to_request();
            let newest_first: Vec<Value> = test::call_and_read_body_json(&app, req).await;
            let dates: Vec<String> = newest_first
                .iter()
                .map(|t| t["createdAt"].as_str().unwrap().to_string())
                .collect();
            assert!(dates.windows(2).all(|w| w[0] >= w[1]));

            db.database().drop().await.unwrap();
        }

        #[actix_web::test]
        #[ignore] // Requires MongoDB (MONGODB_TEST_URI)
        async fn test_author_listing_without_email_matches_anonymous_tips() {
            let db = seeded_db("gardenNestTipsAnonymous").await;
            db.tips()
                .insert_many(vec![
                    doc! { "title": "Unsigned", "likedBy": ["x"] },
                    doc! { "title": "Signed", "email": "sage@garden.io" },
                ])
                .await
                .unwrap();

            let app = test::init_service(
                App::new()
                    .app_data(web::Data::new(db.clone()))
                    .configure(api::configure),
            )
            .await;

            let req = test::TestRequest::post().uri("/myTips").set_json(json!({})).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let anonymous: Vec<Value> = test::read_body_json(resp).await;
            assert_eq!(anonymous.len(), 1);
            assert_eq!(anonymous[0]["title"], "Unsigned");

            let req = test::TestRequest::post()
                .uri("/myMostLikedTip")
                .set_json(json!({}))
                .to_request();
            let best: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(best["title"], "Unsigned");

            db.database().drop().await.unwrap();
        }

        #[actix_web::test]
        #[ignore] // Requires MongoDB (MONGODB_TEST_URI)
        async fn test_update_and_delete() {
            let db = seeded_db("gardenNestTipsWrite").await;
            let inserted = db
                .tips()
                .insert_one(doc! { "title": "Old title", "level": "Beginner" })
                .await
                .unwrap();
            let id = inserted.inserted_id.as_object_id().unwrap().to_hex();

            let app = test::init_service(
                App::new()
                    .app_data(web::Data::new(db.clone()))
                    .configure(api::configure),
            )
            .await;

            let req = test::TestRequest::put()
                .uri(&format!("/tips/{}", id))
                .set_json(json!({ "_id": id, "title": "New title" }))
                .to_request();
            let ack: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(ack["modifiedCount"], 1);

            let req = test::TestRequest::get()
                .uri(&format!("/browseTips/{}", id))
                .to_request();
            let tip: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(tip["title"], "New title");
            assert_eq!(tip["level"], "Beginner");

            let req = test::TestRequest::delete()
                .uri(&format!("/tips/{}", id))
                .to_request();
            let ack: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(ack["deletedCount"], 1);

            let req = test::TestRequest::get()
                .uri(&format!("/browseTips/{}", id))
                .to_request();
            let gone: Value = test::call_and_read_body_json(&app, req).await;
            assert!(gone.is_null());

            db.database().drop().await.unwrap();
        }
    }
}
