use crate::database::bson_to_json;
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde::Serialize;

/// Write acknowledgments in the shape the frontend already consumes.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    #[schema(value_type = String)]
    pub inserted_id: serde_json::Value,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    #[schema(value_type = Option<String>)]
    pub upserted_id: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<InsertOneResult> for InsertAck {
    fn from(result: InsertOneResult) -> Self {
        Self {
            acknowledged: true,
            inserted_id: bson_to_json(result.inserted_id),
        }
    }
}

impl From<UpdateResult> for UpdateAck {
    fn from(result: UpdateResult) -> Self {
        Self {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.map(bson_to_json),
        }
    }
}

impl From<DeleteResult> for DeleteAck {
    fn from(result: DeleteResult) -> Self {
        Self {
            acknowledged: true,
            deleted_count: result.deleted_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_acks_serialize_in_camel_case() {
        let insert = InsertAck {
            acknowledged: true,
            inserted_id: json!("65a1f0c2e4b0a1b2c3d4e5f6"),
        };
        assert_eq!(
            serde_json::to_value(insert).unwrap(),
            json!({ "acknowledged": true, "insertedId": "65a1f0c2e4b0a1b2c3d4e5f6" })
        );

        let update = UpdateAck {
            acknowledged: true,
            matched_count: 1,
            modified_count: 0,
            upserted_id: None,
        };
        assert_eq!(
            serde_json::to_value(update).unwrap(),
            json!({ "acknowledged": true, "matchedCount": 1, "modifiedCount": 0, "upsertedId": null })
        );

        let delete = DeleteAck {
            acknowledged: true,
            deleted_count: 1,
        };
        assert_eq!(
            serde_json::to_value(delete).unwrap(),
            json!({ "acknowledged": true, "deletedCount": 1 })
        );
    }
}
