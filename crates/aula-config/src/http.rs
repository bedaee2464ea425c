use std::env;

#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub bind_addr: String,
}

impl HttpConfig {
    pub fn from_env() -> Self {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        Self { bind_addr }
    }
}
