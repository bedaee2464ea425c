use std::env;

/// The single base-URL value the admin console needs to reach the API.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let base_url =
            env::var("AULA_API_URL").unwrap_or_else(|_| "http://localhost:8000/api".to_string());
        Self { base_url }
    }
}
