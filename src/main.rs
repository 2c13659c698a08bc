use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use mane_portal::auth::SupabaseAuth;
use mane_portal::config::Config;
use mane_portal::dashboard::AdminDashboard;
use mane_portal::export::EncoderSet;
use mane_portal::gateway::SupabaseStore;
use mane_portal::i18n::LanguageService;
use mane_portal::session::SessionService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mane_portal=info".parse()?),
        )
        .init();

    info!("Starting MANÉ portal snapshot");

    // Load configuration from environment
    let config = Config::from_env()?;

    // Construct the services once and pass them down by handle
    let language = LanguageService::new(&config.language_file);
    info!("Active language: {}", language.current().code());

    let store = Arc::new(SupabaseStore::new(
        &config.supabase_url,
        &config.supabase_anon_key,
    ));
    let auth = Arc::new(SupabaseAuth::new(
        &config.supabase_url,
        &config.supabase_anon_key,
    ));

    // Step 1: Check for an existing session
    info!("Checking for an existing session");
    let session = SessionService::new(auth);
    session.initialize().await;
    match session.current_user() {
        Some(user) => info!("Signed in as {}", user.email),
        None => info!("No active session"),
    }

    // Step 2: Fetch the admin collections
    info!("Fetching collections from the hosted store");
    let mut dashboard = AdminDashboard::new(
        store,
        EncoderSet::new(),
        PathBuf::from(&config.export_dir),
    );
    dashboard.refresh_all().await;

    // Step 3: Log the summary snapshot
    let summary = dashboard.summary();
    info!(
        "{} registrations, {} messages, {} users",
        summary.registration_count, summary.message_count, summary.user_count
    );
    if let Some(latest) = summary.latest_registration {
        info!("Latest registration: {} ({})", latest.full_name, latest.service);
    }
    if let Some(latest) = summary.latest_message {
        info!("Latest message: {}", latest.subject);
    }

    session.shutdown();
    info!("Snapshot complete");
    Ok(())
}
