use serde::Serialize;

// Write results, shaped like the driver's InsertOne/UpdateOne/DeleteOne results

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct InsertSummary {
    pub acknowledged: bool,
    #[serde(rename = "insertedId")]
    pub inserted_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct UpdateSummary {
    pub acknowledged: bool,
    #[serde(rename = "matchedCount")]
    pub matched_count: u64,
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct DeleteSummary {
    pub acknowledged: bool,
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

/// `POST /medicines` response
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct InsertEnvelope {
    pub success: bool,
    pub message: String,
    pub result: InsertSummary,
}

/// `PATCH /medicines/{id}` response
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct UpdateEnvelope {
    pub success: bool,
    pub message: String,
    pub result: UpdateSummary,
}

/// `DELETE /medicines/{id}` response
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct DeleteEnvelope {
    pub success: bool,
    pub message: String,
    pub result: DeleteSummary,
}
