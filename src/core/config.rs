use anyhow::Context;

/// Process configuration, loaded once at startup from the environment
/// (dotenv-aware). The admin identity is configuration-supplied; nothing is
/// hardcoded in the binary.
#[derive(Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database_url: String,
    pub admin: AdminConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// The single shared internal-admin identity the console authenticates.
#[derive(Clone)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://desk:@localhost:5432/deskconsole".to_string());

        let admin = AdminConfig {
            email: std::env::var("ADMIN_EMAIL").context("ADMIN_EMAIL is not set")?,
            password: std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD is not set")?,
            name: std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Support Admin".to_string()),
        };

        Ok(Self {
            server: ServerConfig { host, port },
            database_url,
            admin,
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("server", &self.server)
            .field("database_url", &"[REDACTED]")
            .field("admin_email", &self.admin.email)
            .finish()
    }
}
