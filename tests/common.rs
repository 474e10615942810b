// tests/common.rs
use std::sync::Once;

static INIT: Once = Once::new();

// Loads .env and installs the test tracing subscriber once across all tests.
pub fn setup() {
    INIT.call_once(|| {
        let _ = dotenv::from_path(".env").or_else(|_| dotenv::from_path("../.env"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[allow(dead_code)]
pub fn get_env_var(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{} environment variable not set", name))
}
