use crate::database::{store::ShopStore, MongoDB, MEDICINES, USERS};
use crate::models::{DeleteSummary, UpdateSummary};
use crate::utils::AppError;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::error::{ErrorKind, WriteFailure};

const DUPLICATE_KEY: i32 = 11000;

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

fn inserted_object_id(inserted_id: Bson) -> Result<ObjectId, AppError> {
    match inserted_id {
        Bson::ObjectId(oid) => Ok(oid),
        other => Err(AppError::DatabaseError(format!(
            "Unexpected inserted id: {}",
            other
        ))),
    }
}

#[async_trait]
impl ShopStore for MongoDB {
    async fn ping(&self) -> Result<(), AppError> {
        MongoDB::ping(self).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<Document>, AppError> {
        let users = self.collection::<Document>(USERS);
        Ok(users.find_one(doc! { "email": email }).await?)
    }

    async fn insert_user(&self, user: Document) -> Result<ObjectId, AppError> {
        let users = self.collection::<Document>(USERS);
        match users.insert_one(user).await {
            Ok(result) => inserted_object_id(result.inserted_id),
            Err(e) if is_duplicate_key(&e) => {
                Err(AppError::Duplicate("User already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn insert_medicine(&self, medicine: Document) -> Result<ObjectId, AppError> {
        let medicines = self.collection::<Document>(MEDICINES);
        let result = medicines.insert_one(medicine).await?;
        inserted_object_id(result.inserted_id)
    }

    async fn find_medicines(&self, created_by: Option<&str>) -> Result<Vec<Document>, AppError> {
        let medicines = self.collection::<Document>(MEDICINES);
        let filter = match created_by {
            Some(email) => doc! { "created_by": email },
            None => doc! {},
        };

        let cursor = medicines.find(filter).await?;
        let found: Vec<Document> = cursor.try_collect().await?;
        Ok(found)
    }

    async fn find_medicine(&self, id: ObjectId) -> Result<Option<Document>, AppError> {
        let medicines = self.collection::<Document>(MEDICINES);
        Ok(medicines.find_one(doc! { "_id": id }).await?)
    }

    async fn update_medicine(&self, id: ObjectId, set: Document) -> Result<UpdateSummary, AppError> {
        let medicines = self.collection::<Document>(MEDICINES);
        let result = medicines
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .await?;

        Ok(UpdateSummary {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_medicine(&self, id: ObjectId) -> Result<DeleteSummary, AppError> {
        let medicines = self.collection::<Document>(MEDICINES);
        let result = medicines.delete_one(doc! { "_id": id }).await?;

        Ok(DeleteSummary {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }
}
