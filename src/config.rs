use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Hosted backend
    pub supabase_url: String,
    pub supabase_anon_key: String,

    // Local state
    pub language_file: String,
    pub export_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Hosted backend (REST + auth endpoints share the base URL)
            supabase_url: std::env::var("SUPABASE_URL")
                .context("SUPABASE_URL not set")?,
            supabase_anon_key: std::env::var("SUPABASE_ANON_KEY")
                .context("SUPABASE_ANON_KEY not set")?,

            // Local state
            language_file: std::env::var("LANGUAGE_FILE")
                .unwrap_or_else(|_| ".language".to_string()),
            export_dir: std::env::var("EXPORT_DIR")
                .unwrap_or_else(|_| ".".to_string()),
        })
    }
}
