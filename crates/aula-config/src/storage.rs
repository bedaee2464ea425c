use std::env;
use std::path::PathBuf;

/// Where uploaded crest images land and the URL they are served back under.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub public_base_url: String,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("storage/uploads"));
        let public_base_url = env::var("FILES_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000/files".to_string());
        Self {
            upload_dir,
            public_base_url,
        }
    }
}
