pub mod documents;

use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;

pub use documents::*;

pub const USERS: &str = "users";
pub const CLASSES: &str = "classes";
pub const CARTS: &str = "carts";
pub const PAYMENTS: &str = "payments";
// Declared for the enrollment flow; no route touches them yet.
pub const ENROLLED: &str = "enrolled";
pub const APPLIED: &str = "applied";

pub const ALL_COLLECTIONS: [&str; 6] = [USERS, CLASSES, CARTS, PAYMENTS, ENROLLED, APPLIED];

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = ClientOptions::parse(uri).await?;

        // Connection pool shared by every actix worker
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        client_options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        log::info!("🏓 Pinged deployment, MongoDB is reachable");

        log::info!("📚 Collections: {}", ALL_COLLECTIONS.join(", "));

        let mongodb = Self { client, db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Creates the indexes backing the email, status and cart lookups.
    /// Failures are logged and otherwise ignored.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let indexes = [
            (USERS, doc! { "email": 1 }),
            (CLASSES, doc! { "instructorEmail": 1 }),
            (CLASSES, doc! { "status": 1 }),
            (CARTS, doc! { "userMail": 1 }),
        ];

        for (collection, keys) in indexes {
            let label = format!(
                "{}({})",
                collection,
                keys.keys().cloned().collect::<Vec<_>>().join(", ")
            );
            let model = IndexModel::builder().keys(keys).build();

            match self.documents(collection).create_index(model).await {
                Ok(_) => log::info!("   ✅ Index created: {}", label),
                Err(e) => log::warn!("   ⚠️  Index {} not created: {}", label, e),
            }
        }

        log::info!("✅ Database indexes ready");
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    /// Untyped handle; every collection here stores opaque documents.
    pub fn documents(&self, name: &str) -> Collection<Document> {
        self.collection::<Document>(name)
    }

    /// Closes pooled connections. Called once the HTTP server has stopped.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        log::info!("🔌 MongoDB connection closed");
    }
}
