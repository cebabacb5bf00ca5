pub mod memory;
pub mod mongo_store;
pub mod store;

pub use memory::MemoryStore;
pub use store::ShopStore;

use crate::utils::AppError;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;

pub const USERS: &str = "users";
pub const MEDICINES: &str = "medicines";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    /// Builds the pooled client. The driver connects lazily, so a reachable server
    /// is only confirmed by [`MongoDB::ping`].
    pub async fn new(uri: &str, database_name: &str) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        // Timeouts
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        client_options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
        if client_options.app_name.is_none() {
            client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        }

        let client = Client::with_options(client_options)?;
        let db = client.database(database_name);

        Ok(Self { db })
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.database().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Creates the indexes the routes rely on. Every index is attempted; the
    /// first failure is returned after all of them have been tried.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        log::info!("🔧 Creating database indexes...");

        let indexes = [
            // users(email) unique - one user per email even under concurrent registration
            (
                USERS,
                "users(email) unique",
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            ),
            // medicines(created_by) - for GET /medicines?email=
            (
                MEDICINES,
                "medicines(created_by)",
                IndexModel::builder().keys(doc! { "created_by": 1 }).build(),
            ),
        ];

        let mut first_error = None;
        for (collection, label, index) in indexes {
            let collection = self.collection::<mongodb::bson::Document>(collection);
            match collection.create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created: {}", label),
                Err(e) => {
                    log::error!("   ❌ Failed to create {} index: {}", label, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => {
                log::info!("✅ Database indexes ready");
                Ok(())
            }
        }
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
