use crate::{
    database::ShopStore,
    models::{
        DeleteEnvelope, InsertEnvelope, Medicine, MedicineListQuery, MedicinePatch, NewMedicine,
        UpdateEnvelope,
    },
    services::medicine_service,
    utils::AppError,
};
use actix_web::{web, HttpResponse};

/// POST /medicines - Cadastra medicamento
#[utoipa::path(
    post,
    path = "/medicines",
    tag = "Medicines",
    request_body = NewMedicine,
    responses(
        (status = 201, description = "Medicine added", body = InsertEnvelope),
        (status = 400, description = "Body is not a JSON object, or sets `_id`/`$` fields"),
        (status = 500, description = "Database error")
    )
)]
pub async fn create_medicine(
    store: web::Data<dyn ShopStore>,
    request: web::Json<NewMedicine>,
) -> Result<HttpResponse, AppError> {
    log::info!("💊 POST /medicines - created_by: {}", request.created_by().unwrap_or("-"));

    let result = medicine_service::create_medicine(store.get_ref(), request.into_inner())
        .await
        .inspect_err(|e| log::error!("❌ Error adding medicine: {}", e))?;

    Ok(HttpResponse::Created().json(InsertEnvelope {
        success: true,
        message: "Medicine added".to_string(),
        result,
    }))
}

/// GET /medicines - Lista medicamentos (todos, ou só os do `?email=`)
#[utoipa::path(
    get,
    path = "/medicines",
    tag = "Medicines",
    params(MedicineListQuery),
    responses(
        (status = 200, description = "Medicines", body = [Medicine]),
        (status = 500, description = "Database error")
    )
)]
pub async fn list_medicines(
    store: web::Data<dyn ShopStore>,
    query: web::Query<MedicineListQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /medicines - email: {}", query.owner().unwrap_or("*"));

    let medicines = medicine_service::list_medicines(store.get_ref(), &query)
        .await
        .inspect_err(|e| log::error!("❌ Error listing medicines: {}", e))?;

    log::info!("✅ Listed {} medicines", medicines.len());
    Ok(HttpResponse::Ok().json(medicines))
}

/// GET /medicines/{id}
#[utoipa::path(
    get,
    path = "/medicines/{id}",
    tag = "Medicines",
    params(("id" = String, Path, description = "Medicine ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "Medicine", body = Medicine),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Medicine not found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn get_medicine(
    store: web::Data<dyn ShopStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let medicine = medicine_service::get_medicine(store.get_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(medicine))
}

/// PATCH /medicines/{id} - Atualiza só os campos enviados
#[utoipa::path(
    patch,
    path = "/medicines/{id}",
    tag = "Medicines",
    params(("id" = String, Path, description = "Medicine ObjectId (24 hex chars)")),
    request_body = MedicinePatch,
    responses(
        (status = 200, description = "Medicine updated", body = UpdateEnvelope),
        (status = 400, description = "Malformed id or empty/invalid patch"),
        (status = 404, description = "Medicine not found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn update_medicine(
    store: web::Data<dyn ShopStore>,
    id: web::Path<String>,
    request: web::Json<MedicinePatch>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔧 PATCH /medicines/{}", id);

    let result = medicine_service::update_medicine(store.get_ref(), &id, request.into_inner())
        .await
        .inspect_err(|e| log::warn!("⚠️ Failed to update medicine {}: {}", id, e))?;

    Ok(HttpResponse::Ok().json(UpdateEnvelope {
        success: true,
        message: "Medicine updated".to_string(),
        result,
    }))
}

/// DELETE /medicines/{id}
#[utoipa::path(
    delete,
    path = "/medicines/{id}",
    tag = "Medicines",
    params(("id" = String, Path, description = "Medicine ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "Medicine deleted", body = DeleteEnvelope),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Medicine not found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn delete_medicine(
    store: web::Data<dyn ShopStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /medicines/{}", id);

    let result = medicine_service::delete_medicine(store.get_ref(), &id)
        .await
        .inspect_err(|e| log::warn!("⚠️ Failed to delete medicine {}: {}", id, e))?;

    Ok(HttpResponse::Ok().json(DeleteEnvelope {
        success: true,
        message: "Medicine deleted".to_string(),
        result,
    }))
}
