pub mod health;
pub mod medicines;
pub mod metrics;
pub mod swagger;
pub mod users;

use actix_web::{error, web, HttpResponse};

/// Route table, shared by `main` and the route tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(metrics::get_metrics))
        .route("/users", web::post().to(users::register_user))
        .service(
            web::scope("/medicines")
                .route("", web::get().to(medicines::list_medicines))
                .route("", web::post().to(medicines::create_medicine))
                .route("/{id}", web::get().to(medicines::get_medicine))
                .route("/{id}", web::patch().to(medicines::update_medicine))
                .route("/{id}", web::delete().to(medicines::delete_medicine)),
        );
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "success": false,
        "error": message
    }))
}

/// Malformed bodies get the same `{success, error}` envelope as every other failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::warn!("⚠️  {} {} - invalid JSON body: {}", req.method(), req.path(), err);
        let response = bad_request(err.to_string());
        error::InternalError::from_response(err, response).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        log::warn!("⚠️  {} {} - invalid query: {}", req.method(), req.path(), err);
        let response = bad_request(err.to_string());
        error::InternalError::from_response(err, response).into()
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::{call_json, test_app};
    use crate::database::MemoryStore;
    use actix_web::{http::StatusCode, test};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_malformed_json_is_a_structured_400() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app!(store).await;

        let req = test::TestRequest::post()
            .uri("/medicines")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\": ")
            .to_request();
        let (status, body) = call_json(&app, req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_unknown_route() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app!(store).await;

        let req = test::TestRequest::get().uri("/pharmacies").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
