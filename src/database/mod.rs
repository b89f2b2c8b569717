use crate::models::{TIPS_COLLECTION, USERS_COLLECTION};
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;
use std::time::Duration;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, Box<dyn Error>> {
        let mongodb = Self::connect_lazy(uri, db_name).await?;

        // Test connection
        mongodb.db.list_collection_names().await?;

        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Builds the client without contacting the server; the driver connects on first use.
    pub async fn connect_lazy(uri: &str, db_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = ClientOptions::parse(uri).await?;
        tune_client_options(&mut client_options);

        let client = Client::with_options(client_options)?;

        Ok(Self {
            db: client.database(db_name),
        })
    }

    /// Creates the indexes backing the listing filters and sorts.
    /// Failures are logged and ignored; the queries still work without them.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let tip_indexes = [
            doc! { "status": 1 },
            doc! { "email": 1 },
            doc! { "status": 1, "level": 1 },
            doc! { "createdAt": 1 },
        ];

        for keys in tip_indexes {
            let label = keys.keys().cloned().collect::<Vec<_>>().join(", ");
            let index = IndexModel::builder().keys(keys).build();
            match self.tips().create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created: {}({})", TIPS_COLLECTION, label),
                Err(e) => log::debug!("   ℹ️  Index not created on {}({}): {}", TIPS_COLLECTION, label, e),
            }
        }

        let status_index = IndexModel::builder().keys(doc! { "status": 1 }).build();
        match self.users().create_index(status_index).await {
            Ok(_) => log::info!("   ✅ Index created: {}(status)", USERS_COLLECTION),
            Err(e) => log::debug!("   ℹ️  Index not created on {}(status): {}", USERS_COLLECTION, e),
        }

        log::info!("✅ Database indexes ready");
    }

    /// Round-trips to the server; used by the health endpoint.
    pub async fn ping(&self) -> bool {
        self.database().run_command(doc! { "ping": 1 }).await.is_ok()
    }

    pub fn users(&self) -> Collection<Document> {
        self.db.collection(USERS_COLLECTION)
    }

    pub fn tips(&self) -> Collection<Document> {
        self.db.collection(TIPS_COLLECTION)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

/// Pool sizing, timeouts, and the Stable API v1 pin (strict, with deprecation errors),
/// so commands outside the stable surface are refused by the server.
fn tune_client_options(client_options: &mut ClientOptions) {
    client_options.max_pool_size = Some(20);
    client_options.min_pool_size = Some(2);
    client_options.max_idle_time = Some(Duration::from_secs(300));
    client_options.connect_timeout = Some(Duration::from_secs(5));
    client_options.server_selection_timeout = Some(Duration::from_secs(5));
    client_options.server_api = Some(
        ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build(),
    );
}
