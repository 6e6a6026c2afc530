use std::fs;
use std::path::{Path, PathBuf};

/// Build the file-server URL for a content identifier.
pub fn file_url(base_url: &str, id: &str) -> String {
    format!("{}/api/files/{}", base_url.trim_end_matches('/'), id)
}

/// Directory downloads land in when none is configured.
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// GET the file behind a content identifier and write it to `dir`,
/// named by the identifier. Returns the written path.
pub async fn fetch_file(base_url: &str, id: &str, dir: &Path) -> Result<PathBuf, String> {
    let url = file_url(base_url, id);

    let response = reqwest::get(&url)
        .await
        .map_err(|e| format!("Request failed: {e}"))?
        .error_for_status()
        .map_err(|e| format!("File server error: {e}"))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("Failed to read response body: {e}"))?;

    fs::create_dir_all(dir).map_err(|e| format!("Failed to create download dir: {e}"))?;
    let path = dir.join(id);
    fs::write(&path, &bytes).map_err(|e| format!("Failed to write file: {e}"))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_url() {
        assert_eq!(
            file_url("http://localhost:3001", "Qmabc123"),
            "http://localhost:3001/api/files/Qmabc123"
        );
    }

    #[test]
    fn test_file_url_trailing_slash() {
        assert_eq!(
            file_url("http://localhost:3001/", "Qmabc123"),
            "http://localhost:3001/api/files/Qmabc123"
        );
    }
}
