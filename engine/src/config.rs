#[derive(Clone, Debug)]
pub struct Config {
    pub db_url: String,
    pub host: String,
    pub port: u32,
    pub allowed_origin: String,
    /// Contests created without an explicit cap fall back to this when the
    /// deployment wants one; `None` (the default) leaves attempts
    /// unlimited, per the Open Question resolved in SPEC_FULL.md §9.1.
    pub default_max_attempts: Option<i32>,
}

impl Config {
    pub fn from_env() -> Config {
        Config {
            db_url: std::env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file"),
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT is not a number"),
            allowed_origin: std::env::var("ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "*".to_string()),
            default_max_attempts: std::env::var("DEFAULT_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    pub fn get_server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
