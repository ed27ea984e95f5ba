use crate::database::{collect_json, json_to_document, MongoDB, CLASSES, USERS};
use crate::models::{ClassKey, ClassStatusChange, DeleteAck, InsertAck, UpdateAck};
use crate::services::crud;
use crate::utils::AppError;
use mongodb::bson::{doc, Document};
use serde_json::Value;

pub const POPULAR_CLASSES_LIMIT: i64 = 10;
pub const POPULAR_INSTRUCTORS_LIMIT: i64 = 5;

/// Enrollment leaderboard: total `totalEnrolled` per instructor email,
/// joined with the instructor's user document, highest first.
pub fn popular_instructors_pipeline(limit: i64) -> Vec<Document> {
    vec![
        doc! {
            "$group": {
                "_id": "$instructorEmail",
                "totalEnrolled": { "$sum": "$totalEnrolled" }
            }
        },
        doc! {
            "$lookup": {
                "from": USERS,
                "localField": "_id",
                "foreignField": "email",
                "as": "instructor"
            }
        },
        doc! {
            "$project": {
                "_id": 0,
                "instructor": { "$arrayElemAt": ["$instructor", 0] },
                "totalEnrolled": 1
            }
        },
        doc! { "$sort": { "totalEnrolled": -1 } },
        doc! { "$limit": limit },
    ]
}

pub async fn create_class(db: &MongoDB, class: Value) -> Result<InsertAck, AppError> {
    crud::insert(db, CLASSES, class).await
}

pub async fn list_classes(db: &MongoDB) -> Result<Vec<Value>, AppError> {
    crud::find_all(db, CLASSES).await
}

pub async fn popular_classes(db: &MongoDB) -> Result<Vec<Value>, AppError> {
    let cursor = db
        .documents(CLASSES)
        .find(doc! {})
        .sort(doc! { "totalEnrolled": -1 })
        .limit(POPULAR_CLASSES_LIMIT)
        .await?;
    collect_json(cursor).await
}

pub async fn popular_instructors(db: &MongoDB) -> Result<Vec<Value>, AppError> {
    let cursor = db
        .documents(CLASSES)
        .aggregate(popular_instructors_pipeline(POPULAR_INSTRUCTORS_LIMIT))
        .await?;
    collect_json(cursor).await
}

/// One class document for an id key, every matching class for a status key.
pub async fn find_by_key(db: &MongoDB, key: &str) -> Result<Value, AppError> {
    match ClassKey::parse(key) {
        ClassKey::Id(id) => crud::find_by_object_id(db, CLASSES, id).await,
        ClassKey::Status(status) => {
            let classes = crud::find_where(db, CLASSES, doc! { "status": status }).await?;
            Ok(Value::Array(classes))
        }
    }
}

pub async fn change_status(
    db: &MongoDB,
    id: &str,
    change: &ClassStatusChange,
) -> Result<UpdateAck, AppError> {
    let set = change
        .to_set_document()
        .ok_or_else(|| AppError::InvalidRequest("Provide a status and/or a reason".to_string()))?;
    crud::upsert_fields(db, CLASSES, id, set).await
}

pub async fn update_class(db: &MongoDB, id: &str, class: Value) -> Result<UpdateAck, AppError> {
    let mut set = json_to_document(class)?;
    // `_id` is immutable; the path already names the document.
    set.remove("_id");
    if set.is_empty() {
        return Err(AppError::InvalidRequest("Nothing to update".to_string()));
    }
    crud::upsert_fields(db, CLASSES, id, set).await
}

pub async fn delete_class(db: &MongoDB, id: &str) -> Result<DeleteAck, AppError> {
    crud::delete_by_id(db, CLASSES, id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_name(stage: &Document) -> &str {
        stage.keys().next().map(String::as_str).unwrap_or_default()
    }

    #[test]
    fn test_pipeline_stage_order() {
        let pipeline = popular_instructors_pipeline(POPULAR_INSTRUCTORS_LIMIT);
        let stages: Vec<&str> = pipeline.iter().map(stage_name).collect();
        assert_eq!(
            stages,
            vec!["$group", "$lookup", "$project", "$sort", "$limit"]
        );
    }

    #[test]
    fn test_pipeline_groups_by_instructor_email() {
        let pipeline = popular_instructors_pipeline(5);
        let group = pipeline[0].get_document("$group").unwrap();
        assert_eq!(group.get_str("_id").unwrap(), "$instructorEmail");
        assert_eq!(
            group
                .get_document("totalEnrolled")
                .unwrap()
                .get_str("$sum")
                .unwrap(),
            "$totalEnrolled"
        );

        let lookup = pipeline[1].get_document("$lookup").unwrap();
        assert_eq!(lookup.get_str("from").unwrap(), "users");
        assert_eq!(lookup.get_str("foreignField").unwrap(), "email");
    }

    #[test]
    fn test_pipeline_sorts_descending_and_caps_at_five() {
        let pipeline = popular_instructors_pipeline(POPULAR_INSTRUCTORS_LIMIT);
        let sort = pipeline[3].get_document("$sort").unwrap();
        assert_eq!(sort.get_i32("totalEnrolled").unwrap(), -1);
        assert_eq!(pipeline[4].get_i64("$limit").unwrap(), 5);
    }

    #[test]
    fn test_projection_drops_group_key() {
        let pipeline = popular_instructors_pipeline(5);
        let project = pipeline[2].get_document("$project").unwrap();
        assert_eq!(project.get_i32("_id").unwrap(), 0);
        assert_eq!(project.get_i32("totalEnrolled").unwrap(), 1);
        assert!(project.contains_key("instructor"));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_leaderboard_is_top_five_by_total_enrollment() {
        use crate::database::testing::{drop_scratch_db, scratch_db};
        use crate::services::user_service;
        use serde_json::json;

        let db = scratch_db("leaderboard").await;

        // Seven instructors; "a" teaches two classes and ends up on top.
        let classes = [
            ("a@example.com", 30),
            ("a@example.com", 25),
            ("b@example.com", 50),
            ("c@example.com", 40),
            ("d@example.com", 10),
            ("e@example.com", 20),
            ("f@example.com", 5),
            ("g@example.com", 1),
        ];
        for (email, enrolled) in classes {
            create_class(
                &db,
                json!({ "instructorEmail": email, "totalEnrolled": enrolled }),
            )
            .await
            .unwrap();
        }
        user_service::create_user(
            &db,
            json!({ "email": "a@example.com", "name": "Ana", "role": "instructor" }),
        )
        .await
        .unwrap();

        let leaderboard = popular_instructors(&db).await.unwrap();
        assert_eq!(leaderboard.len(), 5);

        let totals: Vec<i64> = leaderboard
            .iter()
            .map(|entry| entry["totalEnrolled"].as_i64().unwrap())
            .collect();
        assert!(
            totals.windows(2).all(|pair| pair[0] >= pair[1]),
            "totals: {:?}",
            totals
        );
        assert_eq!(totals, vec![55, 50, 40, 20, 10]);

        assert_eq!(leaderboard[0]["instructor"]["name"], "Ana");
        assert!(leaderboard[0].get("_id").is_none());

        drop_scratch_db(db).await;
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_popular_classes_sorted_and_capped_at_ten() {
        use crate::database::testing::{drop_scratch_db, scratch_db};
        use serde_json::json;

        let db = scratch_db("popular_classes").await;
        for enrolled in 0..12 {
            create_class(
                &db,
                json!({ "name": format!("class {}", enrolled), "totalEnrolled": enrolled }),
            )
            .await
            .unwrap();
        }

        let popular = popular_classes(&db).await.unwrap();
        assert_eq!(popular.len(), 10);
        assert_eq!(popular[0]["totalEnrolled"], 11);
        assert_eq!(popular[9]["totalEnrolled"], 2);

        drop_scratch_db(db).await;
    }
}
