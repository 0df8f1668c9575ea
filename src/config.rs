use std::path::Path;

use serde::Deserialize;
use tokio::{fs::File, io::AsyncReadExt};

use crate::error::ConfigError;
use crate::sync::GistItem;

/// A loaded gist config: an ordered list of items to download
///
/// Read-only after loading. Item shape is not validated here; an item
/// missing a field is skipped with a warning when it is processed.
#[derive(Debug)]
pub struct Config {
    pub items: Vec<GistItem>,
}

impl Config {
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut file = File::open(path).await?;

        let mut dest = Vec::new();
        file.read_to_end(&mut dest).await?;

        let config_file: ConfigFile = serde_json::from_slice(&dest)?;
        let items = config_file.items.ok_or(ConfigError::MissingItems)?;

        Ok(Config { items })
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    items: Option<Vec<GistItem>>,
}
