use crate::{
    database::ShopStore,
    models::{NewUser, Registration},
    utils::AppError,
};

/// Registers a user once per email.
///
/// An existing email is a successful no-op: the stored document is not touched.
/// A duplicate-key failure from a concurrent registration is reported the same way.
pub async fn register_user(store: &dyn ShopStore, user: NewUser) -> Result<Registration, AppError> {
    user.validate()?;
    let email = user.email.clone();

    if store.find_user_by_email(&email).await?.is_some() {
        log::info!("👤 User {} already registered", email);
        return Ok(Registration::already_exists());
    }

    match store.insert_user(user.into_document()?).await {
        Ok(id) => {
            log::info!("✅ User {} registered ({})", email, id);
            Ok(Registration::created(id.to_hex()))
        }
        Err(AppError::Duplicate(_)) => {
            log::info!("👤 User {} registered concurrently", email);
            Ok(Registration::already_exists())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use serde_json::json;

    fn new_user(body: serde_json::Value) -> NewUser {
        serde_json::from_value(body).unwrap()
    }

    #[tokio::test]
    async fn test_register_once_per_email() {
        let store = MemoryStore::new();

        let first = register_user(&store, new_user(json!({ "email": "a@x.com", "name": "Ana" })))
            .await
            .unwrap();
        assert!(first.inserted);
        assert!(first.inserted_id.is_some());

        let second = register_user(&store, new_user(json!({ "email": "a@x.com", "name": "Changed" })))
            .await
            .unwrap();
        assert_eq!(second, Registration::already_exists());

        let stored = store.find_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(stored.get_str("name").unwrap(), "Ana");
    }

    #[tokio::test]
    async fn test_any_string_email_is_registered() {
        let store = MemoryStore::new();
        let registration = register_user(&store, new_user(json!({ "email": "ana" }))).await.unwrap();

        assert!(registration.inserted);
        assert!(store.find_user_by_email("ana").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_id_in_body_is_rejected() {
        let store = MemoryStore::new();
        let result = register_user(&store, new_user(json!({ "email": "a@x.com", "_id": "x" }))).await;

        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        assert!(store.find_user_by_email("a@x.com").await.unwrap().is_none());
    }
}
