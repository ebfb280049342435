use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_non_empty(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub vision: VisionConfig,
    pub database: Option<DatabaseConfig>,
    pub scan_defaults: ScanDefaults,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_keys: Vec<String>,
    pub max_upload_bytes: usize,
}

/// Google Cloud Vision client settings.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Cap on label and object annotations requested per image.
    pub max_results: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    /// Hosted Postgres reached through the PostgREST API.
    Supabase,
    /// Local SQLite file or remote libSQL/Turso database.
    LibSql,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub kind: DatabaseKind,
    pub url: String,
    /// Supabase service key or libSQL auth token.
    pub auth_token: Option<String>,
    pub local_path: Option<String>,
    pub timeout_secs: u64,
    /// Only applied to libSQL connections.
    pub pragmas: SqlitePragmas,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlitePragmas {
    pub busy_timeout_ms: u64,
    pub journal_mode: String,
    pub synchronous: String,
}

impl Default for SqlitePragmas {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5000,
            journal_mode: "WAL".to_string(),
            synchronous: "NORMAL".to_string(),
        }
    }
}

impl SqlitePragmas {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            busy_timeout_ms: parse_env_or("DATABASE_BUSY_TIMEOUT_MS", defaults.busy_timeout_ms),
            journal_mode: env_non_empty("DATABASE_JOURNAL_MODE")
                .map(|v| normalize_journal_mode(&v).to_string())
                .unwrap_or(defaults.journal_mode),
            synchronous: env_non_empty("DATABASE_SYNCHRONOUS")
                .map(|v| normalize_synchronous(&v).to_string())
                .unwrap_or(defaults.synchronous),
        }
    }
}

fn normalize_journal_mode(value: &str) -> &'static str {
    match value.trim().to_uppercase().as_str() {
        "DELETE" => "DELETE",
        "TRUNCATE" => "TRUNCATE",
        "PERSIST" => "PERSIST",
        "MEMORY" => "MEMORY",
        "OFF" => "OFF",
        "WAL" => "WAL",
        other => {
            tracing::warn!("Unknown journal mode '{}', using WAL", other);
            "WAL"
        }
    }
}

fn normalize_synchronous(value: &str) -> &'static str {
    match value.trim().to_uppercase().as_str() {
        "OFF" => "OFF",
        "FULL" => "FULL",
        "EXTRA" => "EXTRA",
        "NORMAL" => "NORMAL",
        other => {
            tracing::warn!("Unknown synchronous mode '{}', using NORMAL", other);
            "NORMAL"
        }
    }
}

/// Identity stamped on scans when the upload form omits it.
#[derive(Debug, Clone, Default)]
pub struct ScanDefaults {
    pub user_id: Option<String>,
    pub organization_id: Option<String>,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://vision.googleapis.com/v1".to_string(),
            timeout_secs: 30,
            max_retries: 3,
            max_results: 10,
        }
    }
}

fn database_from_env() -> Option<DatabaseConfig> {
    let timeout_secs = parse_env_or("DATABASE_TIMEOUT", 15);

    if let (Some(url), Some(key)) = (env_non_empty("SUPABASE_URL"), env_non_empty("SUPABASE_KEY"))
    {
        return Some(DatabaseConfig {
            kind: DatabaseKind::Supabase,
            url,
            auth_token: Some(key),
            local_path: None,
            timeout_secs,
            pragmas: SqlitePragmas::default(),
        });
    }

    env_non_empty("DATABASE_URL").map(|url| DatabaseConfig {
        kind: DatabaseKind::LibSql,
        url,
        auth_token: env_non_empty("DATABASE_AUTH_TOKEN"),
        local_path: env_non_empty("DATABASE_LOCAL_PATH"),
        timeout_secs,
        pragmas: SqlitePragmas::from_env(),
    })
}

impl Default for Config {
    fn default() -> Self {
        let vision_defaults = VisionConfig::default();

        Self {
            server: ServerConfig {
                host: env::var("ELIO_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("PORT", 8080),
                api_keys: env::var("ELIO_API_KEYS")
                    .map(|keys| {
                        keys.split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect()
                    })
                    .unwrap_or_default(),
                max_upload_bytes: parse_env_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024),
            },
            vision: VisionConfig {
                api_key: env_non_empty("GOOGLE_VISION_API_KEY"),
                base_url: env::var("VISION_BASE_URL").unwrap_or(vision_defaults.base_url),
                timeout_secs: parse_env_or("VISION_TIMEOUT", vision_defaults.timeout_secs),
                max_retries: parse_env_or("VISION_MAX_RETRIES", vision_defaults.max_retries),
                max_results: parse_env_or("VISION_MAX_RESULTS", vision_defaults.max_results),
            },
            database: database_from_env(),
            scan_defaults: ScanDefaults {
                user_id: env_non_empty("DEFAULT_USER_ID"),
                organization_id: env_non_empty("DEFAULT_ORGANIZATION_ID"),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const DB_VARS: &[&str] = &[
        "SUPABASE_URL",
        "SUPABASE_KEY",
        "DATABASE_URL",
        "DATABASE_AUTH_TOKEN",
        "DATABASE_LOCAL_PATH",
        "DATABASE_BUSY_TIMEOUT_MS",
        "DATABASE_JOURNAL_MODE",
        "DATABASE_SYNCHRONOUS",
    ];

    fn clear_db_vars() {
        for var in DB_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_vision_config_defaults() {
        std::env::remove_var("GOOGLE_VISION_API_KEY");
        std::env::remove_var("VISION_BASE_URL");
        std::env::remove_var("VISION_TIMEOUT");

        let config = Config::default();
        assert!(config.vision.api_key.is_none());
        assert_eq!(config.vision.base_url, "https://vision.googleapis.com/v1");
        assert_eq!(config.vision.timeout_secs, 30);
        assert_eq!(config.vision.max_results, 10);
    }

    #[test]
    #[serial]
    fn test_database_disabled_without_env() {
        clear_db_vars();
        let config = Config::default();
        assert!(config.database.is_none());
    }

    #[test]
    #[serial]
    fn test_supabase_takes_precedence() {
        clear_db_vars();
        std::env::set_var("SUPABASE_URL", "https://abc.supabase.co");
        std::env::set_var("SUPABASE_KEY", "service-key");
        std::env::set_var("DATABASE_URL", "file:elio.db");

        let db = Config::default().database.unwrap();
        assert_eq!(db.kind, DatabaseKind::Supabase);
        assert_eq!(db.url, "https://abc.supabase.co");
        assert_eq!(db.auth_token.as_deref(), Some("service-key"));

        clear_db_vars();
    }

    #[test]
    #[serial]
    fn test_supabase_requires_key() {
        clear_db_vars();
        std::env::set_var("SUPABASE_URL", "https://abc.supabase.co");

        let config = Config::default();
        assert!(config.database.is_none());

        clear_db_vars();
    }

    #[test]
    #[serial]
    fn test_libsql_from_database_url() {
        clear_db_vars();
        std::env::set_var("DATABASE_URL", "file:elio.db");

        let db = Config::default().database.unwrap();
        assert_eq!(db.kind, DatabaseKind::LibSql);
        assert!(db.auth_token.is_none());
        assert_eq!(db.pragmas, SqlitePragmas::default());

        clear_db_vars();
    }

    #[test]
    #[serial]
    fn test_sqlite_pragmas_from_env() {
        clear_db_vars();
        std::env::set_var("DATABASE_URL", "file:elio.db");
        std::env::set_var("DATABASE_BUSY_TIMEOUT_MS", "250");
        std::env::set_var("DATABASE_JOURNAL_MODE", " delete ");
        std::env::set_var("DATABASE_SYNCHRONOUS", "bogus");

        let pragmas = Config::default().database.unwrap().pragmas;
        assert_eq!(pragmas.busy_timeout_ms, 250);
        assert_eq!(pragmas.journal_mode, "DELETE");
        assert_eq!(pragmas.synchronous, "NORMAL");

        clear_db_vars();
    }

    #[test]
    fn test_pragma_normalization() {
        assert_eq!(normalize_journal_mode("truncate"), "TRUNCATE");
        assert_eq!(normalize_journal_mode("bogus"), "WAL");
        assert_eq!(normalize_synchronous("full"), "FULL");
        assert_eq!(normalize_synchronous(""), "NORMAL");
    }

    #[test]
    #[serial]
    fn test_api_keys_skip_blank_entries() {
        std::env::set_var("ELIO_API_KEYS", "one, ,two,");
        let config = Config::default();
        assert_eq!(config.server.api_keys, vec!["one", "two"]);
        std::env::remove_var("ELIO_API_KEYS");
    }

    #[test]
    #[serial]
    fn test_parse_env_or_invalid_falls_back() {
        std::env::set_var("__TEST_ELIO_PORT", "not-a-port");
        let result: u16 = parse_env_or("__TEST_ELIO_PORT", 8080);
        assert_eq!(result, 8080);
        std::env::remove_var("__TEST_ELIO_PORT");
    }

    #[test]
    #[serial]
    fn test_parse_env_or_valid_value() {
        std::env::set_var("__TEST_ELIO_PORT", "9000");
        let result: u16 = parse_env_or("__TEST_ELIO_PORT", 8080);
        assert_eq!(result, 9000);
        std::env::remove_var("__TEST_ELIO_PORT");
    }
}
