use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Which record store backs the entity services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local store, lost on restart. Default for development and tests.
    Memory,
    /// Supabase PostgREST tables.
    Supabase,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" | "in_memory" => Ok(StorageBackend::Memory),
            "supabase" | "postgrest" => Ok(StorageBackend::Supabase),
            other => Err(format!("Unknown storage backend: {}", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::Supabase => write!(f, "supabase"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_service_token: Option<String>,
    pub server_host: String,
    pub server_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::Memory,
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            supabase_service_token: None,
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            storage_backend: env::var("STORAGE_BACKEND")
                .ok()
                .and_then(|raw| {
                    raw.parse()
                        .map_err(|e: String| warn!("{}, falling back to memory", e))
                        .ok()
                })
                .unwrap_or(defaults.storage_backend),
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            supabase_service_token: env::var("SUPABASE_SERVICE_TOKEN")
                .ok()
                .filter(|token| !token.is_empty()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or(defaults.server_host),
            server_port: match env::var("SERVER_PORT") {
                Ok(raw) => raw.parse().unwrap_or_else(|_| {
                    warn!("SERVER_PORT '{}' is not a valid port, using default", raw);
                    defaults.server_port
                }),
                Err(_) => defaults.server_port,
            },
        };

        if config.storage_backend == StorageBackend::Supabase && !config.is_configured() {
            warn!("Supabase storage selected but SUPABASE_URL / SUPABASE_ANON_PUBLIC_KEY are missing");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_anon_key.is_empty()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
