use crate::{
    database::ShopStore,
    models::{NewUser, Registration},
    services::user_service,
    utils::AppError,
};
use actix_web::{web, HttpResponse};

/// POST /users - Cadastra usuário (no-op se o email já existe)
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = NewUser,
    responses(
        (status = 200, description = "User created, or already registered (`inserted: false`)", body = Registration),
        (status = 400, description = "Missing or non-string `email`, or `_id`/`$` fields"),
        (status = 500, description = "Database error")
    )
)]
pub async fn register_user(
    store: web::Data<dyn ShopStore>,
    request: web::Json<NewUser>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /users - email: {}", request.email);

    let registration = user_service::register_user(store.get_ref(), request.into_inner())
        .await
        .inspect_err(|e| log::warn!("❌ Registration failed: {}", e))?;

    Ok(HttpResponse::Ok().json(registration))
}
