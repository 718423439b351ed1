use std::env;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration, read once at startup. `DATABASE_URL` is required;
/// the listen address falls back to 127.0.0.1:8080.
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .map(|raw| raw.parse().expect("SERVER_PORT must be a number"))
                .unwrap_or(DEFAULT_PORT),
        }
    }

    /// Human-readable address for startup logging.
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env mutations never race across test threads.
    #[test]
    fn test_defaults_and_overrides() {
        env::set_var("DATABASE_URL", "postgres://localhost/todoserve_test");
        env::remove_var("SERVER_HOST");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.database_url, "postgres://localhost/todoserve_test");
        assert_eq!(config.server_host, DEFAULT_HOST);
        assert_eq!(config.server_port, DEFAULT_PORT);
        assert_eq!(config.server_url(), "http://127.0.0.1:8080");

        env::set_var("SERVER_HOST", "0.0.0.0");
        env::set_var("SERVER_PORT", "3000");

        let config = Config::from_env();
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_url(), "http://0.0.0.0:3000");

        env::remove_var("SERVER_HOST");
        env::remove_var("SERVER_PORT");
    }
}
