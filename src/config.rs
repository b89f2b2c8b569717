use crate::utils::AppError;
use std::env;

pub const DEFAULT_DATABASE: &str = "gardenNestDB";
pub const DEFAULT_CLUSTER: &str = "cluster0.bmuc12j.mongodb.net";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't have to touch process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        // `port` (lowercase) is what the hosting platform used to inject
        let port = match lookup("PORT").or_else(|| lookup("port")) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::ConfigError(format!("invalid port '{}'", raw)))?,
            None => DEFAULT_PORT,
        };

        let mongodb_uri = match lookup("MONGODB_URI") {
            Some(uri) => uri,
            None => {
                let user = lookup("MONGODB_USER")
                    .ok_or_else(|| AppError::ConfigError("MONGODB_USER must be set".into()))?;
                let password = lookup("MONGODB_PASSWORD")
                    .ok_or_else(|| AppError::ConfigError("MONGODB_PASSWORD must be set".into()))?;
                let cluster = lookup("MONGODB_CLUSTER").unwrap_or_else(|| DEFAULT_CLUSTER.to_string());
                build_mongo_uri(&user, &password, &cluster)
            }
        };

        let database_name =
            lookup("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        Ok(Self {
            host,
            port,
            mongodb_uri,
            database_name,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Atlas SRV connection string. Credentials are percent-encoded since passwords
/// routinely contain `@`, `:` or `/`.
pub fn build_mongo_uri(user: &str, password: &str, cluster: &str) -> String {
    format!(
        "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority&appName=Cluster0",
        urlencoding::encode(user),
        urlencoding::encode(password),
        cluster
    )
}

/// Strips the credentials out of a connection string for logging.
pub fn redact_uri(uri: &str) -> String {
    match (uri.find("://"), uri.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &uri[..scheme_end], &uri[at + 1..])
        }
        _ => uri.to_string(),
    }
}
