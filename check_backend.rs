use std::process::ExitCode;

use mkite_leads::backend::storage::{
    redact, resolve_remote_credentials, PostgresStorage, RestStorage, StorageResult, TABLES,
};
use mkite_leads::shared::StorageConfig;

fn report(table: &str, result: StorageResult<()>) -> bool {
    match result {
        Ok(()) => {
            println!("✅ {} exists", table);
            true
        }
        Err(e) if e.is_schema_missing() => {
            println!("⚠️  {} does not exist", table);
            false
        }
        Err(e) => {
            println!("❌ {} could not be checked: {}", table, e);
            false
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    println!("🔍 CHECKING STORAGE BACKEND");
    println!("===========================");

    let config = match StorageConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("❌ Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Remote URL:   {}", config.remote_url.as_deref().map(redact).unwrap_or_else(|| "<unset>".into()));
    println!("Remote key:   {}", config.remote_key.as_deref().map(redact).unwrap_or_else(|| "<unset>".into()));
    println!("DATABASE_URL: {}", if config.database_url.is_some() { "<set>" } else { "<unset>" });

    let credentials =
        resolve_remote_credentials(config.remote_url.as_deref(), config.remote_key.as_deref());

    let mut all_ok = true;

    if let Some(credentials) = credentials {
        println!("\n🌐 Tier: remote REST ({})", redact(&credentials.url));
        if config.remote_url.as_deref() != Some(credentials.url.as_str()) {
            println!("⚠️  URL and key were swapped; they will be used the other way round");
        }

        let storage = match RestStorage::new(credentials, config.request_timeout) {
            Ok(storage) => storage,
            Err(e) => {
                println!("❌ {}", e);
                return ExitCode::FAILURE;
            }
        };
        for table in TABLES {
            all_ok &= report(table, storage.probe_table(table).await);
        }
        if !all_ok {
            println!("\nMissing tables must be created from the service console;");
            println!("until then the server falls back to in-memory storage.");
        }
    } else if let Some(database_url) = config.database_url.as_deref() {
        println!("\n🐘 Tier: PostgreSQL");
        let storage = match PostgresStorage::connect_lazy(database_url, config.request_timeout) {
            Ok(storage) => storage,
            Err(e) => {
                println!("❌ {}", e);
                return ExitCode::FAILURE;
            }
        };
        for table in TABLES {
            all_ok &= report(table, storage.probe_table(table).await);
        }
        if !all_ok {
            println!("\nThe server creates missing tables at startup.");
        }
    } else {
        println!("\n💾 Tier: in-memory (no database configured, data is lost on restart)");
    }

    if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
