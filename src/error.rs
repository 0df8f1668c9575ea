use std::{error::Error, fmt, io, path::PathBuf};

use reqwest::StatusCode;

/// A config file that could not be loaded
///
/// Fatal to batch mode: no item is processed when the config fails to load.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
    /// The document parsed, but has no `items` key
    MissingItems,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "read config file: {err}"),
            Self::Parse(err) => write!(f, "config file is not valid JSON: {err}"),
            Self::MissingItems => write!(f, "config file must contain an \"items\" array"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::MissingItems => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// A failure while syncing a single item
///
/// Caught at the item boundary: one failed item never aborts the rest of
/// the batch.
#[derive(Debug)]
pub enum SyncError {
    /// A non-2xx response or transport failure on either HTTP call
    Fetch {
        url: String,
        status: Option<StatusCode>,
        source: Option<reqwest::Error>,
    },

    /// The requested file is absent from the gist metadata
    NotFound { gist_id: String, file_name: String },

    /// Creating the output directory or writing the file failed
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch {
                url,
                status: Some(status),
                ..
            } => write!(f, "GET {url} returned {status}"),

            Self::Fetch {
                url,
                source: Some(source),
                ..
            } => write!(f, "GET {url} failed: {source}"),

            Self::Fetch { url, .. } => write!(f, "GET {url} failed"),

            Self::NotFound { gist_id, file_name } => {
                write!(f, "gist {gist_id} has no file named {file_name}")
            }

            Self::Io { path, source } => write!(f, "write {}: {source}", path.display()),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Fetch { source, .. } => source.as_ref().map(|err| err as _),
            Self::NotFound { .. } => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_gist_and_file() {
        let err = SyncError::NotFound {
            gist_id: "abc123".to_string(),
            file_name: "a.txt".to_string(),
        };

        assert_eq!(err.to_string(), "gist abc123 has no file named a.txt");
    }

    #[test]
    fn fetch_includes_status() {
        let err = SyncError::Fetch {
            url: "https://api.github.com/gists/abc123".to_string(),
            status: Some(StatusCode::NOT_FOUND),
            source: None,
        };

        assert_eq!(
            err.to_string(),
            "GET https://api.github.com/gists/abc123 returned 404 Not Found"
        );
    }

    #[test]
    fn missing_items_message() {
        assert_eq!(
            ConfigError::MissingItems.to_string(),
            "config file must contain an \"items\" array"
        );
    }
}
