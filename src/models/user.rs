use mongodb::bson::{doc, Document};

/// Users live in a schemaless collection; only `status` is interpreted.
pub const USERS_COLLECTION: &str = "activeUsers";
pub const ACTIVE_STATUS: &str = "Active";
pub const ACTIVE_USERS_LIMIT: i64 = 6;

pub fn active_users_filter() -> Document {
    doc! { "status": ACTIVE_STATUS }
}
