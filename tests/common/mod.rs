use recipebook::config::SecurityConfig;
use recipebook::crypto::Argon2Hasher;
use recipebook::db::Store;
use std::sync::Arc;

pub const PASTA: &str = "Boil water for 10 minutes, then add pasta and stir occasionally.";
pub const SOUP: &str = "Chop the vegetables, simmer them in stock for forty minutes.";

/// Store backed by a fresh SQLite file, with cheap Argon2 params.
pub async fn test_store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("recipebook-test-{}.db", uuid::Uuid::new_v4()));

    let hasher = Argon2Hasher::new(&SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    })
    .expect("valid argon2 params");

    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open test store")
        .with_hasher(Arc::new(hasher))
}
