use crate::models::document::{check_field_names, map_to_document};
use crate::utils::AppError;
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request de cadastro de usuário (`POST /users`)
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct NewUser {
    /// Chave única do usuário (precisa ser string)
    pub email: String,
    /// Demais campos do perfil enviados pelo cliente (name, photo, role, ...)
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub profile: Map<String, Value>,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), AppError> {
        check_field_names(&self.profile)
    }

    pub fn into_document(self) -> Result<Document, AppError> {
        let mut doc = map_to_document(&self.profile)?;
        doc.insert("email", self.email);
        Ok(doc)
    }
}

/// Resultado do cadastro
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct Registration {
    pub success: bool,
    pub message: String,
    pub inserted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledged: Option<bool>,
    #[serde(rename = "insertedId", skip_serializing_if = "Option::is_none")]
    pub inserted_id: Option<String>,
}

impl Registration {
    pub fn created(inserted_id: String) -> Self {
        Registration {
            success: true,
            message: "User created".to_string(),
            inserted: true,
            acknowledged: Some(true),
            inserted_id: Some(inserted_id),
        }
    }

    pub fn already_exists() -> Self {
        Registration {
            success: true,
            message: "User already exists".to_string(),
            inserted: false,
            acknowledged: None,
            inserted_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_user_document() {
        let user: NewUser =
            serde_json::from_value(json!({ "email": "a@x.com", "name": "Ana", "role": "seller" })).unwrap();
        assert!(user.validate().is_ok());

        let doc = user.into_document().unwrap();
        assert_eq!(doc.get_str("email").unwrap(), "a@x.com");
        assert_eq!(doc.get_str("name").unwrap(), "Ana");
        assert_eq!(doc.get_str("role").unwrap(), "seller");
    }

    #[test]
    fn test_new_user_validation() {
        let plain: NewUser = serde_json::from_value(json!({ "email": "ana" })).unwrap();
        assert!(plain.validate().is_ok());

        let with_id: NewUser = serde_json::from_value(json!({ "email": "ana", "_id": "x" })).unwrap();
        assert!(with_id.validate().is_err());

        let missing: Result<NewUser, _> = serde_json::from_value(json!({ "name": "Ana" }));
        assert!(missing.is_err());

        let not_a_string: Result<NewUser, _> = serde_json::from_value(json!({ "email": 42 }));
        assert!(not_a_string.is_err());
    }

    #[test]
    fn test_registration_bodies() {
        assert_eq!(
            serde_json::to_value(Registration::already_exists()).unwrap(),
            json!({ "success": true, "message": "User already exists", "inserted": false })
        );
        assert_eq!(
            serde_json::to_value(Registration::created("abc".into())).unwrap(),
            json!({
                "success": true,
                "message": "User created",
                "inserted": true,
                "acknowledged": true,
                "insertedId": "abc"
            })
        );
    }
}
