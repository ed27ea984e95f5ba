use mongodb::bson::{oid::ObjectId, Document};
use serde::Deserialize;

/// Body of `PATCH /classes/{id}/change`
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ClassStatusChange {
    pub status: Option<String>,
    pub reason: Option<String>,
}

impl ClassStatusChange {
    /// `$set` payload with only the fields the caller sent.
    pub fn to_set_document(&self) -> Option<Document> {
        let mut set = Document::new();
        if let Some(status) = &self.status {
            set.insert("status", status.as_str());
        }
        if let Some(reason) = &self.reason {
            set.insert("reason", reason.as_str());
        }
        (!set.is_empty()).then_some(set)
    }
}

/// What the trailing segment of `GET /classes/{key}` refers to.
#[derive(Debug, PartialEq, Eq)]
pub enum ClassKey {
    Id(ObjectId),
    Status(String),
}

impl ClassKey {
    pub fn parse(key: &str) -> Self {
        match ObjectId::parse_str(key) {
            Ok(id) => ClassKey::Id(id),
            Err(_) => ClassKey::Status(key.to_string()),
        }
    }
}
