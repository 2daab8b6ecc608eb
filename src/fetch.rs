//! Byte sources for UCD files: local files, remote URLs and an on-disk
//! cache in front of remote URLs.

use crate::config::UCD_ROOT;
use crate::reader::{Result, UcdError};
use std::fs::{self, File};
use std::io::{self, Cursor, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// A readable byte stream from any of the fetch functions.
pub type Source = Box<dyn Read + Send>;

/// URL of a file under the latest published UCD directory.
///
/// ```
/// assert_eq!(
///     ucd_lines::fetch::ucd_url("Scripts.txt"),
///     "https://www.unicode.org/Public/UCD/latest/ucd/Scripts.txt"
/// );
/// ```
pub fn ucd_url(file_name: &str) -> String {
    format!("{}{}", UCD_ROOT, file_name.trim_start_matches('/'))
}

/// Whether `location` names a remote resource.
#[inline]
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http:") || location.starts_with("https:")
}

/// Fetch a file from a remote location.
pub fn fetch_url(url: &str) -> Result<Source> {
    debug!(url, "GET");
    let response = reqwest::blocking::get(url)?;
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(UcdError::Download {
            url: url.to_string(),
            status: status.to_string(),
        });
    }
    Ok(Box::new(response))
}

/// Open a local file.
pub fn fetch_file<P: AsRef<Path>>(path: P) -> Result<Source> {
    let file = File::open(path)?;
    Ok(Box::new(file))
}

/// Open a URL or a local file, depending on the location prefix.
pub fn fetch(location: &str) -> Result<Source> {
    if is_remote(location) {
        fetch_url(location)
    } else {
        fetch_file(location)
    }
}

/// Obtain content from a local cache file or, if that is unavailable,
/// from `url`.
///
/// With `force_remote` the cache is ignored and always refreshed.
/// Fetched content is written to `cache_file` (creating parent
/// directories) before it is returned.
pub fn fetch_cached<P: AsRef<Path>>(
    url: &str,
    cache_file: P,
    force_remote: bool,
) -> Result<Source> {
    let cache_file = cache_file.as_ref();
    if !force_remote {
        if let Ok(file) = File::open(cache_file) {
            debug!(path = %cache_file.display(), "cache hit");
            return Ok(Box::new(file));
        }
    }

    let mut bytes = Vec::new();
    fetch(url)?.read_to_end(&mut bytes)?;
    info!(url, bytes = bytes.len(), path = %cache_file.display(), "caching");
    persist(cache_file, &bytes)?;

    Ok(Box::new(Cursor::new(bytes)))
}

/// Atomically replace `path` with `bytes`.
fn persist(path: &Path, bytes: &[u8]) -> Result<()> {
    let persist_err = |source: io::Error| UcdError::Persist {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(persist_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(persist_err)?;
    tmp.write_all(bytes).map_err(persist_err)?;
    tmp.persist(path).map_err(|e| persist_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(mut source: Source) -> String {
        let mut s = String::new();
        source.read_to_string(&mut s).unwrap();
        s
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://www.unicode.org/x.txt"));
        assert!(is_remote("http://localhost/x.txt"));
        assert!(!is_remote("data/UnicodeData.txt"));
        assert!(!is_remote("/abs/http:/odd"));
    }

    #[test]
    fn test_ucd_url() {
        assert_eq!(
            ucd_url("/emoji/emoji-data.txt"),
            "https://www.unicode.org/Public/UCD/latest/ucd/emoji/emoji-data.txt"
        );
    }

    #[test]
    fn test_fetch_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Blocks.txt");
        fs::write(&path, "0000..007F; Basic Latin\n").unwrap();

        let source = fetch(path.to_str().unwrap()).unwrap();
        assert_eq!(read_all(source), "0000..007F; Basic Latin\n");
    }

    #[test]
    fn test_fetch_missing_file() {
        let err = fetch_file("/nonexistent/ucd/Blocks.txt").err().unwrap();
        assert!(matches!(err, UcdError::Io(_)));
    }
}
