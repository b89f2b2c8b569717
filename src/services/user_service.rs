use crate::{
    database::MongoDB,
    models::{active_users_filter, ACTIVE_USERS_LIMIT},
    utils::{json, AppError},
};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde_json::Value;

pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))
}

pub async fn list_users(db: &MongoDB) -> Result<Value, AppError> {
    let users: Vec<Document> = db.users().find(doc! {}).await?.try_collect().await?;
    log::debug!("👤 Loaded {} users", users.len());
    Ok(json::documents_to_json(users))
}

/// Returns `null` when no user has this id.
pub async fn get_user(db: &MongoDB, id: &str) -> Result<Value, AppError> {
    let oid = parse_object_id(id)?;
    let user = db.users().find_one(doc! { "_id": oid }).await?;
    Ok(user.map(json::document_to_json).unwrap_or(Value::Null))
}

pub async fn list_active_users(db: &MongoDB) -> Result<Value, AppError> {
    let users: Vec<Document> = db
        .users()
        .find(active_users_filter())
        .limit(ACTIVE_USERS_LIMIT)
        .await?
        .try_collect()
        .await?;
    Ok(json::documents_to_json(users))
}
