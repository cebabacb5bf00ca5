use crate::models::document::{bson_to_json, check_field_names, document_to_map, map_to_document};
use crate::utils::AppError;
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Medicamento como está na coleção `medicines`
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Medicine {
    /// ObjectId em hex; documentos antigos podem ter outro tipo de `_id`
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: Value,

    /// Campos gravados pelo cliente (name, created_by, price, stock, ...)
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,
}

impl From<Document> for Medicine {
    fn from(mut doc: Document) -> Self {
        let id = doc.remove("_id").map(bson_to_json).unwrap_or(Value::Null);

        Medicine {
            id,
            fields: document_to_map(doc),
        }
    }
}

/// Request para cadastrar medicamento (qualquer formato de objeto)
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct NewMedicine {
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,
}

impl NewMedicine {
    /// Email do dono, quando enviado como string
    pub fn created_by(&self) -> Option<&str> {
        self.fields.get("created_by").and_then(Value::as_str)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        check_field_names(&self.fields)
    }

    pub fn into_document(self) -> Result<Document, AppError> {
        map_to_document(&self.fields)
    }
}

/// Request para atualizar medicamento (somente os campos enviados são alterados, `null` inclusive)
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct MedicinePatch {
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,
}

impl MedicinePatch {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.fields.is_empty() {
            return Err(AppError::InvalidRequest("No fields to update".to_string()));
        }
        check_field_names(&self.fields)
    }

    /// Monta o documento do `$set`
    pub fn into_set_document(self) -> Result<Document, AppError> {
        map_to_document(&self.fields)
    }
}

/// Query de listagem (`?email=`)
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MedicineListQuery {
    /// Só os medicamentos cujo `created_by` é este email
    pub email: Option<String>,
}

impl MedicineListQuery {
    /// `email` vazio = sem filtro
    pub fn owner(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId, Bson};
    use serde_json::json;

    #[test]
    fn test_new_medicine_keeps_every_field() {
        let body = json!({ "name": "Paracetamol", "price": 5, "created_by": "a@x.com", "stock": 40 });
        let medicine: NewMedicine = serde_json::from_value(body).unwrap();
        assert!(medicine.validate().is_ok());
        assert_eq!(medicine.created_by(), Some("a@x.com"));

        let doc = medicine.into_document().unwrap();
        assert_eq!(doc.get_str("name").unwrap(), "Paracetamol");
        assert_eq!(doc.get_str("created_by").unwrap(), "a@x.com");
        assert_eq!(doc.get_i32("price").unwrap(), 5);
        assert_eq!(doc.get_i32("stock").unwrap(), 40);
        assert!(!doc.contains_key("_id"));
    }

    #[test]
    fn test_new_medicine_accepts_any_shape() {
        for body in [
            json!({ "price": 5, "created_by": "a@x.com" }),
            json!({ "name": "Ibuprofen" }),
            json!({ "name": 42, "created_by": null }),
            json!({}),
        ] {
            let medicine: NewMedicine = serde_json::from_value(body.clone()).unwrap();
            assert!(medicine.validate().is_ok(), "rejected {}", body);
        }

        let numeric: NewMedicine = serde_json::from_value(json!({ "name": 42 })).unwrap();
        assert_eq!(numeric.created_by(), None);
        assert_eq!(numeric.into_document().unwrap().get("name"), Some(&Bson::Int32(42)));
    }

    #[test]
    fn test_new_medicine_cannot_set_id_or_operators() {
        let with_id: NewMedicine =
            serde_json::from_value(json!({ "name": "Ibuprofen", "_id": "abc" })).unwrap();
        assert!(with_id.validate().is_err());

        let operator: NewMedicine = serde_json::from_value(json!({ "$where": "1" })).unwrap();
        assert!(operator.validate().is_err());
    }

    #[test]
    fn test_patch_validation() {
        assert!(MedicinePatch::default().validate().is_err());

        let patch: MedicinePatch = serde_json::from_value(json!({ "price": 7.5 })).unwrap();
        assert!(patch.validate().is_ok());
        assert_eq!(patch.into_set_document().unwrap(), doc! { "price": 7.5 });

        let operator: MedicinePatch = serde_json::from_value(json!({ "$inc": { "stock": 1 } })).unwrap();
        assert!(operator.validate().is_err());
    }

    #[test]
    fn test_patch_keeps_explicit_nulls() {
        let patch: MedicinePatch = serde_json::from_value(json!({ "name": null, "price": 2 })).unwrap();
        assert!(patch.validate().is_ok());
        assert_eq!(
            patch.into_set_document().unwrap(),
            doc! { "name": Bson::Null, "price": 2 }
        );

        let only_null: MedicinePatch = serde_json::from_value(json!({ "created_by": null })).unwrap();
        assert!(only_null.validate().is_ok());
        assert_eq!(only_null.into_set_document().unwrap(), doc! { "created_by": Bson::Null });
    }

    #[test]
    fn test_medicine_from_document() {
        let oid = ObjectId::new();
        let medicine = Medicine::from(doc! {
            "_id": oid,
            "name": "Paracetamol",
            "price": 5,
            "created_by": "a@x.com"
        });

        assert_eq!(medicine.id, json!(oid.to_hex()));
        assert_eq!(medicine.fields.get("name"), Some(&json!("Paracetamol")));
        assert_eq!(medicine.fields.get("created_by"), Some(&json!("a@x.com")));

        let rendered = serde_json::to_value(&medicine).unwrap();
        assert_eq!(
            rendered,
            json!({ "_id": oid.to_hex(), "name": "Paracetamol", "price": 5, "created_by": "a@x.com" })
        );
    }

    #[test]
    fn test_medicine_with_legacy_id_still_renders() {
        let legacy = Medicine::from(doc! { "_id": "legacy-1", "name": "x" });
        assert_eq!(
            serde_json::to_value(&legacy).unwrap(),
            json!({ "_id": "legacy-1", "name": "x" })
        );

        let numeric = Medicine::from(doc! { "_id": 7, "name": "y" });
        assert_eq!(numeric.id, json!(7));
    }

    #[test]
    fn test_list_query_owner() {
        assert_eq!(MedicineListQuery { email: None }.owner(), None);
        assert_eq!(MedicineListQuery { email: Some(String::new()) }.owner(), None);
        assert_eq!(
            MedicineListQuery { email: Some("a@x.com".into()) }.owner(),
            Some("a@x.com")
        );
    }
}
