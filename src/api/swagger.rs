use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Medical Shop API",
        version = "1.0.0",
        description = "Inventory backend for a medical shop.\n\n**Features:**\n- User registration (one account per email)\n- Medicine CRUD with owner filter (`?email=`)\n- Health monitoring and metrics"
    ),
    paths(
        // Health & Metrics
        crate::api::health::root,
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Users
        crate::api::users::register_user,

        // Medicines
        crate::api::medicines::create_medicine,
        crate::api::medicines::list_medicines,
        crate::api::medicines::get_medicine,
        crate::api::medicines::update_medicine,
        crate::api::medicines::delete_medicine,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::NewUser,
            crate::models::Registration,
            crate::models::Medicine,
            crate::models::NewMedicine,
            crate::models::MedicinePatch,
            crate::models::InsertSummary,
            crate::models::UpdateSummary,
            crate::models::DeleteSummary,
            crate::models::InsertEnvelope,
            crate::models::UpdateEnvelope,
            crate::models::DeleteEnvelope,
        )
    ),
    tags(
        (name = "Health", description = "Banner, health check and metrics endpoints."),
        (name = "Users", description = "User registration. Registering an existing email is a no-op."),
        (name = "Medicines", description = "Medicine inventory CRUD. Documents are schemaless; `created_by` holds the owner's email."),
    )
)]
pub struct ApiDoc;
