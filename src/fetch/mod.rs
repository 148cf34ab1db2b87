//! Resource fetcher
//!
//! Downloads installers and the registry. Local paths pass through
//! untouched; remote resources are streamed into `<dest>.download` and
//! renamed into place once complete.

pub mod content_types;
mod http;

pub use http::{
    CONNECTION_PHASE_TIMEOUT, HEADER_PHASE_TIMEOUT, HttpOptions, MAX_REDIRECTS, REQUEST_TIMEOUT,
};

use crate::error::{JustInstallError, Result};
use crate::ui;
use crate::ui::progress::{ProgressBar, ProgressWriter};
use regex::Regex;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

const DOWNLOAD_SUFFIX: &str = ".download";

static CONTENT_DISPOSITION_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"filename="?([\w.\-]+)"?"#).expect("static regex is valid")
});

#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// File path, or an existing directory to download into.
    pub destination: Option<PathBuf>,
    /// Download again even when the destination already exists.
    pub force: bool,
    /// Draw a progress bar while downloading.
    pub progress: bool,
    pub http: HttpOptions,
}

#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub http: HttpOptions,
    /// Acceptable `Content-Type` values. Empty accepts anything.
    pub expected_content_types: Vec<String>,
    /// Time allowed until the response headers arrive.
    pub timeout: Duration,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            http: HttpOptions::default(),
            expected_content_types: Vec::new(),
            timeout: HEADER_PHASE_TIMEOUT,
        }
    }
}

enum Resource {
    Local(PathBuf),
    Remote(Url),
}

fn classify(resource: &str) -> Result<Resource> {
    let path = Path::new(resource);
    if path.exists() {
        return Ok(Resource::Local(path.to_path_buf()));
    }

    let url = Url::parse(resource).map_err(|e| JustInstallError::InvalidUrl {
        url: resource.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(Resource::Remote(url)),
        "file" => url
            .to_file_path()
            .map(Resource::Local)
            .map_err(|_| JustInstallError::InvalidUrl {
                url: resource.to_string(),
                reason: "not a valid file URL".to_string(),
            }),
        other => Err(JustInstallError::UnsupportedScheme(other.to_string())),
    }
}

/// Fetch `resource` and return the local path holding it.
pub fn fetch(resource: &str, options: &FetchOptions) -> Result<PathBuf> {
    let url = match classify(resource)? {
        Resource::Local(path) => return Ok(path),
        Resource::Remote(url) => url,
    };

    let destination = options.destination.as_deref().ok_or_else(|| {
        JustInstallError::RemoteFetchError(
            "destination must be either a file or directory path".to_string(),
        )
    })?;

    let into_dir = destination.is_dir();
    if !into_dir && !options.force && destination.is_file() {
        ui::verbose(&format!("{} already downloaded", destination.display()));
        return Ok(destination.to_path_buf());
    }

    let client = http::build_client(&options.http, &url)?;
    let mut response = client.get(url.clone()).send()?;

    if response.status() != StatusCode::OK {
        return Err(JustInstallError::HttpStatus {
            expected: StatusCode::OK.as_u16(),
            received: response.status().as_u16(),
            resource: resource.to_string(),
        });
    }

    let dest = if into_dir {
        let content_disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok());
        destination.join(destination_file_name(content_disposition, response.url(), &url)?)
    } else {
        destination.to_path_buf()
    };

    if !options.force && dest.is_file() {
        ui::verbose(&format!("{} already downloaded", dest.display()));
        return Ok(dest);
    }

    let total = response.content_length();
    if options.progress {
        ui::info(&format!("Fetching {} to {}", resource, dest.display()));
    }
    stream_to_file(&mut response, total, &dest, options.progress)?;

    Ok(dest)
}

/// Validate that `resource` is reachable and served with an acceptable
/// content type. The body is never read.
pub fn check(resource: &str, options: &CheckOptions) -> Result<()> {
    if Path::new(resource).exists() {
        return Ok(());
    }

    let url = match classify(resource)? {
        Resource::Remote(url) => url,
        Resource::Local(_) => {
            return Err(JustInstallError::RemoteFetchError(
                "cannot check local files".to_string(),
            ));
        }
    };

    let client = http::build_client(&options.http, &url)?;
    let response = client.get(url).timeout(options.timeout).send()?;

    if response.status() != StatusCode::OK {
        return Err(JustInstallError::HttpStatus {
            expected: StatusCode::OK.as_u16(),
            received: response.status().as_u16(),
            resource: resource.to_string(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !options.expected_content_types.is_empty()
        && !content_types::is_allowed(resource, content_type, &options.expected_content_types)
    {
        return Err(JustInstallError::ContentType {
            received: content_type.to_string(),
            resource: resource.to_string(),
        });
    }

    Ok(())
}

/// File name for a download into a directory: `Content-Disposition` first,
/// then the last path segment of the final URL, then of the requested URL.
pub fn destination_file_name(
    content_disposition: Option<&str>,
    final_url: &Url,
    requested_url: &Url,
) -> Result<String> {
    let from_header = content_disposition
        .and_then(|value| CONTENT_DISPOSITION_FILENAME.captures(value))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| is_plain_file_name(name));

    from_header
        .or_else(|| last_path_segment(final_url))
        .or_else(|| last_path_segment(requested_url))
        .map(str::to_string)
        .ok_or_else(|| {
            JustInstallError::RemoteFetchError(format!(
                "could not derive a file name for {}",
                requested_url
            ))
        })
}

fn last_path_segment(url: &Url) -> Option<&str> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| is_plain_file_name(name))
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".."
}

/// `<dest>.download`
pub fn download_path(dest: &Path) -> PathBuf {
    let mut name: OsString = dest.as_os_str().to_owned();
    name.push(DOWNLOAD_SUFFIX);
    PathBuf::from(name)
}

/// Copy `reader` into `dest` through its `.download` sibling. `dest` only
/// appears once every byte is on disk.
pub fn stream_to_file<R: Read>(
    reader: &mut R,
    total: Option<u64>,
    dest: &Path,
    progress: bool,
) -> Result<()> {
    let tmp = download_path(dest);
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: io::Error| JustInstallError::IoError { path, source }
    };

    let file = File::create(&tmp).map_err(io_err(&tmp))?;

    let file = if progress {
        let label = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut writer = ProgressWriter::new(file, ProgressBar::new(total, &label));
        copy_body(reader, &mut writer, &tmp)?;
        writer.finish()
    } else {
        let mut file = file;
        copy_body(reader, &mut file, &tmp)?;
        file
    };

    let mut file = file;
    file.flush().map_err(io_err(&tmp))?;
    file.sync_all().map_err(io_err(&tmp))?;
    drop(file);

    fs::rename(&tmp, dest).map_err(io_err(dest))?;
    Ok(())
}

// Read failures come from the connection, write failures from the disk.
fn copy_body<R: Read, W: Write>(reader: &mut R, writer: &mut W, tmp: &Path) -> Result<()> {
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(JustInstallError::RemoteFetchError(format!(
                    "download interrupted: {}",
                    e
                )))
            }
        };
        writer
            .write_all(&buf[..n])
            .map_err(|source| JustInstallError::IoError {
                path: tmp.to_path_buf(),
                source,
            })?;
    }
}
