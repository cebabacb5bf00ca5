use crate::models::{DeleteSummary, UpdateSummary};
use crate::utils::AppError;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

/// Storage operations behind the HTTP routes.
///
/// Each method is one single-document (or single-query) call against the
/// store. Handlers receive the store as `web::Data<dyn ShopStore>`, so the
/// MongoDB-backed implementation and [`super::MemoryStore`] are interchangeable.
#[async_trait]
pub trait ShopStore: Send + Sync {
    /// Round-trip to the backing store.
    async fn ping(&self) -> Result<(), AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<Document>, AppError>;

    /// Fails with [`AppError::Duplicate`] when the email is already registered.
    async fn insert_user(&self, user: Document) -> Result<ObjectId, AppError>;

    async fn insert_medicine(&self, medicine: Document) -> Result<ObjectId, AppError>;

    /// All medicines, or only those whose `created_by` equals `created_by`.
    async fn find_medicines(&self, created_by: Option<&str>) -> Result<Vec<Document>, AppError>;

    async fn find_medicine(&self, id: ObjectId) -> Result<Option<Document>, AppError>;

    /// Applies `set` as a `$set`; never upserts.
    async fn update_medicine(&self, id: ObjectId, set: Document) -> Result<UpdateSummary, AppError>;

    async fn delete_medicine(&self, id: ObjectId) -> Result<DeleteSummary, AppError>;
}
