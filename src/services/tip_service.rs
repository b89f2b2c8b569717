use crate::{
    database::MongoDB,
    models::{
        author_filter, like_update, most_liked_pipeline, public_filter, public_level_filter,
        trending_pipeline, DeleteSummary, InsertSummary, SortOrder, UpdateSummary,
    },
    services::user_service::parse_object_id,
    utils::{json, AppError},
};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use serde_json::Value;

async fn find_tips(db: &MongoDB, filter: Document) -> Result<Vec<Document>, AppError> {
    let tips = db.tips().find(filter).await?.try_collect().await?;
    Ok(tips)
}

pub async fn create_tip(db: &MongoDB, body: &Value) -> Result<InsertSummary, AppError> {
    let tip = json::json_to_document(body)?;
    let result = db.tips().insert_one(tip).await?;
    Ok(InsertSummary::from(result))
}

pub async fn list_tips(db: &MongoDB) -> Result<Value, AppError> {
    Ok(json::documents_to_json(find_tips(db, doc! {}).await?))
}

pub async fn list_public_tips(db: &MongoDB) -> Result<Value, AppError> {
    Ok(json::documents_to_json(find_tips(db, public_filter()).await?))
}

pub async fn list_public_tips_by_level(db: &MongoDB, level: &str) -> Result<Value, AppError> {
    Ok(json::documents_to_json(find_tips(db, public_level_filter(level)).await?))
}

pub async fn list_tips_by_author(db: &MongoDB, email: Option<&str>) -> Result<Value, AppError> {
    Ok(json::documents_to_json(find_tips(db, author_filter(email)).await?))
}

/// Returns `null` when no tip has this id.
pub async fn get_tip(db: &MongoDB, id: &str) -> Result<Value, AppError> {
    let oid = parse_object_id(id)?;
    let tip = db.tips().find_one(doc! { "_id": oid }).await?;
    Ok(tip.map(json::document_to_json).unwrap_or(Value::Null))
}

/// `$set`s the body's fields onto the tip; fields absent from the body are left as they are.
pub async fn update_tip(db: &MongoDB, id: &str, body: &Value) -> Result<UpdateSummary, AppError> {
    let oid = parse_object_id(id)?;
    let fields = json::json_to_update_fields(body)?;

    // an empty $set is rejected by the server
    if fields.is_empty() {
        return Err(AppError::InvalidRequest("no fields to update".to_string()));
    }

    let result = db
        .tips()
        .update_one(doc! { "_id": oid }, doc! { "$set": fields })
        .await?;
    Ok(UpdateSummary::from(result))
}

pub async fn delete_tip(db: &MongoDB, id: &str) -> Result<DeleteSummary, AppError> {
    let oid = parse_object_id(id)?;
    let result = db.tips().delete_one(doc! { "_id": oid }).await?;
    Ok(DeleteSummary::from(result))
}

pub async fn like_tip(db: &MongoDB, id: &str, email: &str) -> Result<UpdateSummary, AppError> {
    let oid = parse_object_id(id)?;
    let result = db
        .tips()
        .update_one(doc! { "_id": oid }, like_update(email))
        .await?;
    Ok(UpdateSummary::from(result))
}

pub async fn trending_tips(db: &MongoDB) -> Result<Value, AppError> {
    let tips: Vec<Document> = db
        .tips()
        .aggregate(trending_pipeline())
        .await?
        .try_collect()
        .await?;
    Ok(json::documents_to_json(tips))
}

/// The author's tip with the most likes, or `null` if they have none.
pub async fn most_liked_tip(db: &MongoDB, email: Option<&str>) -> Result<Value, AppError> {
    let tips: Vec<Document> = db
        .tips()
        .aggregate(most_liked_pipeline(email))
        .await?
        .try_collect()
        .await?;
    Ok(tips
        .into_iter()
        .next()
        .map(json::document_to_json)
        .unwrap_or(Value::Null))
}

pub async fn sorted_tips(db: &MongoDB, order: SortOrder) -> Result<Value, AppError> {
    let tips: Vec<Document> = db
        .tips()
        .find(public_filter())
        .sort(order.sort_doc())
        .await?
        .try_collect()
        .await?;
    Ok(json::documents_to_json(tips))
}
