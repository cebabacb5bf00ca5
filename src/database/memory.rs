use crate::database::store::ShopStore;
use crate::models::{DeleteSummary, UpdateSummary};
use crate::utils::AppError;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-process store used with `STORAGE_BACKEND=memory` and by the route tests.
///
/// Collections keep insertion order. `$set` keys are applied literally, so
/// dotted paths are not expanded into nested documents the way MongoDB does.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<Document>>,
    medicines: RwLock<Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a medicine exactly as given, `_id` included.
    #[cfg(test)]
    pub(crate) fn seed_medicine(&self, medicine: Document) {
        if let Ok(mut medicines) = Self::write(&self.medicines) {
            medicines.push(medicine);
        }
    }

    fn read(collection: &RwLock<Vec<Document>>) -> Result<RwLockReadGuard<'_, Vec<Document>>, AppError> {
        collection
            .read()
            .map_err(|_| AppError::DatabaseError("In-memory store lock poisoned".to_string()))
    }

    fn write(collection: &RwLock<Vec<Document>>) -> Result<RwLockWriteGuard<'_, Vec<Document>>, AppError> {
        collection
            .write()
            .map_err(|_| AppError::DatabaseError("In-memory store lock poisoned".to_string()))
    }

    fn insert(collection: &RwLock<Vec<Document>>, mut document: Document) -> Result<ObjectId, AppError> {
        let id = ObjectId::new();
        document.insert("_id", id);
        Self::write(collection)?.push(document);
        Ok(id)
    }
}

fn has_id(document: &Document, id: &ObjectId) -> bool {
    matches!(document.get("_id"), Some(Bson::ObjectId(oid)) if oid == id)
}

fn has_str(document: &Document, key: &str, expected: &str) -> bool {
    matches!(document.get(key), Some(Bson::String(value)) if value == expected)
}

#[async_trait]
impl ShopStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Self::read(&self.users).map(|_| ())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<Document>, AppError> {
        let users = Self::read(&self.users)?;
        Ok(users.iter().find(|user| has_str(user, "email", email)).cloned())
    }

    async fn insert_user(&self, mut user: Document) -> Result<ObjectId, AppError> {
        // Check and insert under one write lock, like the unique index on users(email)
        let mut users = Self::write(&self.users)?;
        if let Ok(email) = user.get_str("email") {
            if users.iter().any(|existing| has_str(existing, "email", email)) {
                return Err(AppError::Duplicate("User already exists".to_string()));
            }
        }

        let id = ObjectId::new();
        user.insert("_id", id);
        users.push(user);
        Ok(id)
    }

    async fn insert_medicine(&self, medicine: Document) -> Result<ObjectId, AppError> {
        Self::insert(&self.medicines, medicine)
    }

    async fn find_medicines(&self, created_by: Option<&str>) -> Result<Vec<Document>, AppError> {
        let medicines = Self::read(&self.medicines)?;
        Ok(medicines
            .iter()
            .filter(|medicine| created_by.map_or(true, |email| has_str(medicine, "created_by", email)))
            .cloned()
            .collect())
    }

    async fn find_medicine(&self, id: ObjectId) -> Result<Option<Document>, AppError> {
        let medicines = Self::read(&self.medicines)?;
        Ok(medicines.iter().find(|medicine| has_id(medicine, &id)).cloned())
    }

    async fn update_medicine(&self, id: ObjectId, set: Document) -> Result<UpdateSummary, AppError> {
        let mut medicines = Self::write(&self.medicines)?;
        let Some(medicine) = medicines.iter_mut().find(|medicine| has_id(medicine, &id)) else {
            return Ok(UpdateSummary {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
            });
        };

        let mut modified = false;
        for (key, value) in set {
            if medicine.get(&key) != Some(&value) {
                medicine.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateSummary {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn delete_medicine(&self, id: ObjectId) -> Result<DeleteSummary, AppError> {
        let mut medicines = Self::write(&self.medicines)?;
        let before = medicines.len();
        medicines.retain(|medicine| !has_id(medicine, &id));

        Ok(DeleteSummary {
            acknowledged: true,
            deleted_count: (before - medicines.len()) as u64,
        })
    }
}
