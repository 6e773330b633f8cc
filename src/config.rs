use serde::Deserialize;

impl Config {

    pub fn init() -> Result<Self, config::ConfigError> {
        // get config toml dir from env, with default
        let config_path =
            std::env::var("MOVIEDATA_CONFIG_PATH").unwrap_or_else(|_| String::from("./config.toml"));

        let mut builder = config::Config::builder();
        // The conventional TMDB variable is the lowest-priority source for the key
        if let Ok(api_key) = std::env::var("TMDB_API_KEY") {
            builder = builder.set_default("tmdb.api_key", api_key)?;
        }

        let config = builder
            // Add in config toml
            .add_source(config::File::with_name(&config_path).required(false))
            // Add in settings from the environment (with a prefix of MOVIEDATA)
            .add_source(config::Environment::with_prefix("MOVIEDATA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

// ================================================================================================
// Models
// ================================================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[allow(unused)]
pub struct Config {
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub cleaning: CleaningConfig,
    #[serde(default)]
    pub enrich: EnrichConfig,
}

// ===============================================================================
// Logs
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String { "info".to_string() }

// ===============================================================================
// TMDB
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct TmdbConfig {
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    /// Bearer token (API Read Access Token). Falls back to TMDB_API_KEY.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Per-request timeout. 0 disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_tmdb_base_url(),
            api_key: String::new(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_tmdb_base_url() -> String { "https://api.themoviedb.org/3".to_string() }
fn default_language() -> String { "en-US".to_string() }
fn default_timeout_secs() -> u64 { 30 }

// ===============================================================================
// Data
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct DataConfig {
    /// Directory receiving the cleaned and enriched CSV files.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// IMDb-style ratings CSV (averagerating, numvotes, primary_name).
    #[serde(default)]
    pub ratings: Option<String>,
    /// TMDB-style metadata CSV.
    #[serde(default)]
    pub metadata: Option<String>,
    /// Box-office budgets CSV.
    #[serde(default)]
    pub financials: Option<String>,
    /// Merged table to fill with genres and franchise info.
    #[serde(default)]
    pub enrich_target: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            ratings: None,
            metadata: None,
            financials: None,
            enrich_target: None,
        }
    }
}

fn default_output_dir() -> String { "./out".to_string() }

// ===============================================================================
// Cleaning
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct CleaningConfig {
    #[serde(default = "default_min_votes")]
    pub min_votes: i64,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self { min_votes: default_min_votes() }
    }
}

fn default_min_votes() -> i64 { crate::core::cleaning::DEFAULT_MIN_VOTES }

// ===============================================================================
// Enrichment
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct EnrichConfig {
    /// Maximum lookups in flight. 1 keeps requests strictly sequential.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Skip rows whose franchise flag is already filled.
    #[serde(default)]
    pub skip_existing: bool,
    /// Write "not found" / false for failed lookups. When false, failed rows
    /// stay empty so the next run retries them.
    #[serde(default = "default_true")]
    pub record_failures: bool,
    #[serde(default = "default_true")]
    pub fill_genres: bool,
    #[serde(default = "default_true")]
    pub fill_franchise: bool,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            skip_existing: false,
            record_failures: true,
            fill_genres: true,
            fill_franchise: true,
        }
    }
}

fn default_concurrency() -> usize { 1 }
fn default_true() -> bool { true }
