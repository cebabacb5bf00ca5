// ==================== MEDICINES ====================
// CRUD sobre a coleção `medicines`; cada função faz uma única chamada ao store

use crate::{
    database::ShopStore,
    models::{
        DeleteSummary, InsertSummary, Medicine, MedicineListQuery, MedicinePatch, NewMedicine,
        UpdateSummary,
    },
    utils::AppError,
};
use mongodb::bson::oid::ObjectId;

pub const NOT_FOUND_MESSAGE: &str = "Medicine not found";

pub fn parse_medicine_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(format!("Invalid medicine id '{}'", id)))
}

pub async fn create_medicine(store: &dyn ShopStore, medicine: NewMedicine) -> Result<InsertSummary, AppError> {
    medicine.validate()?;
    let owner = medicine.created_by().unwrap_or("-").to_string();

    let id = store.insert_medicine(medicine.into_document()?).await?;
    log::info!("💊 Medicine {} added by {}", id, owner);

    Ok(InsertSummary {
        acknowledged: true,
        inserted_id: id.to_hex(),
    })
}

pub async fn list_medicines(store: &dyn ShopStore, query: &MedicineListQuery) -> Result<Vec<Medicine>, AppError> {
    let documents = store.find_medicines(query.owner()).await?;
    Ok(documents.into_iter().map(Medicine::from).collect())
}

pub async fn get_medicine(store: &dyn ShopStore, id: &str) -> Result<Medicine, AppError> {
    let object_id = parse_medicine_id(id)?;

    match store.find_medicine(object_id).await? {
        Some(document) => Ok(Medicine::from(document)),
        None => Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string())),
    }
}

pub async fn update_medicine(
    store: &dyn ShopStore,
    id: &str,
    patch: MedicinePatch,
) -> Result<UpdateSummary, AppError> {
    let object_id = parse_medicine_id(id)?;
    patch.validate()?;

    let result = store.update_medicine(object_id, patch.into_set_document()?).await?;
    if result.matched_count == 0 {
        return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }

    log::info!("✏️  Medicine {} updated (modified: {})", id, result.modified_count);
    Ok(result)
}

pub async fn delete_medicine(store: &dyn ShopStore, id: &str) -> Result<DeleteSummary, AppError> {
    let object_id = parse_medicine_id(id)?;

    let result = store.delete_medicine(object_id).await?;
    if result.deleted_count == 0 {
        return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }

    log::info!("🗑️  Medicine {} deleted", id);
    Ok(result)
}
