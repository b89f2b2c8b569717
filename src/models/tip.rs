use mongodb::bson::{doc, Document};
use serde::Deserialize;

/// Tips are stored as free-form documents. The fields below are the only ones
/// the service reads: `email` (author), `status`, `level`, `likedBy`, `createdAt`.
pub const TIPS_COLLECTION: &str = "shareTips";
pub const PUBLIC_STATUS: &str = "Public";
pub const TRENDING_LIMIT: i64 = 6;

/// Header consulted by `/sortedTips`.
pub const SORT_ORDER_HEADER: &str = "sort-order";

/// Body of the like action.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct EmailRequest {
    pub email: String,
}

/// Body of the author-scoped listings. A missing email is queried as `null`,
/// which matches tips that carry no `email` field.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct AuthorRequest {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    OldestFirst,
    NewestFirst,
}

impl SortOrder {
    /// `old` sorts ascending; any other value, or no header at all, sorts newest first.
    pub fn from_header(value: Option<&str>) -> Self {
        match value {
            Some("old") => SortOrder::OldestFirst,
            _ => SortOrder::NewestFirst,
        }
    }

    pub fn direction(self) -> i32 {
        match self {
            SortOrder::OldestFirst => 1,
            SortOrder::NewestFirst => -1,
        }
    }

    pub fn sort_doc(self) -> Document {
        doc! { "createdAt": self.direction() }
    }
}

pub fn public_filter() -> Document {
    doc! { "status": PUBLIC_STATUS }
}

pub fn public_level_filter(level: &str) -> Document {
    doc! { "status": PUBLIC_STATUS, "level": level }
}

pub fn author_filter(email: Option<&str>) -> Document {
    doc! { "email": email }
}

/// `$addToSet` keeps likedBy free of duplicates when the same user likes twice.
pub fn like_update(email: &str) -> Document {
    doc! { "$addToSet": { "likedBy": email } }
}

/// Stage computing `likesCount` from the length of `likedBy`; a missing array counts as zero.
fn likes_count_stage() -> Document {
    doc! {
        "$addFields": {
            "likesCount": { "$size": { "$ifNull": ["$likedBy", []] } }
        }
    }
}

/// Public tips ranked by like count. Ties keep whatever order the server yields.
pub fn trending_pipeline() -> Vec<Document> {
    vec![
        doc! { "$match": public_filter() },
        likes_count_stage(),
        doc! { "$sort": { "likesCount": -1 } },
        doc! { "$limit": TRENDING_LIMIT },
    ]
}

pub fn most_liked_pipeline(email: Option<&str>) -> Vec<Document> {
    vec![
        doc! { "$match": author_filter(email) },
        likes_count_stage(),
        doc! { "$sort": { "likesCount": -1 } },
        doc! { "$limit": 1_i64 },
    ]
}
