use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JustInstallError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    KdlError(#[from] kdl::KdlError),

    #[error("Unable to parse the registry file '{path}': {source}")]
    RegistryParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Unsupported registry version {found} (expected {expected}). Please update to a new version of just-install by running: msiexec.exe /i https://just-install.github.io/stable/just-install.msi"
    )]
    RegistryVersion { expected: u32, found: u32 },

    #[error("Unknown package: {0}")]
    UnknownPackage(String),

    #[error("Unknown architecture: {0}")]
    UnknownArchitecture(String),

    #[error("Unknown installer type: {0}")]
    UnknownInstallerKind(String),

    #[error("Only \"zip\" containers are supported (got \"{0}\")")]
    UnsupportedContainer(String),

    #[error("Invalid package entry: {0}")]
    InvalidPackage(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to fetch remote resource: {0}")]
    RemoteFetchError(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("expected status code {expected} but received {received} instead ({resource})")]
    HttpStatus {
        expected: u16,
        received: u16,
        resource: String,
    },

    #[error("unexpected Content-Type {received:?} ({resource})")]
    ContentType { received: String, resource: String },

    #[error("Template error in '{template}': {reason}")]
    TemplateError { template: String, reason: String },

    #[error("Archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    #[error("Could not create shortcut '{path}': {reason}")]
    ShortcutError { path: PathBuf, reason: String },

    /// Path resolution or validation error
    #[error("Path error: {0}")]
    PathError(String),

    #[error("{0}")]
    Other(String),
}

impl JustInstallError {
    /// Whether the failure is transient: a server-side status or a transport
    /// problem. Client-side statuses and content mismatches are final.
    pub fn is_retryable(&self) -> bool {
        match self {
            JustInstallError::HttpStatus { received, .. } => (500..600).contains(received),
            JustInstallError::Http(e) => e.status().is_none_or(|s| s.is_server_error()),
            _ => false,
        }
    }

    /// Whether the local filesystem refused an operation. Such failures stop
    /// the whole run instead of moving on to the next package.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            JustInstallError::IoError { .. } | JustInstallError::StdIoError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, JustInstallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filesystem_errors_are_fatal() {
        let err = JustInstallError::IoError {
            path: PathBuf::from("C:\\Tools\\app.exe"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.is_fatal());
        assert!(JustInstallError::from(std::io::Error::other("disk full")).is_fatal());
    }

    #[test]
    fn per_package_errors_are_not_fatal() {
        assert!(!JustInstallError::UnknownPackage("nope".to_string()).is_fatal());
        assert!(!JustInstallError::UnsupportedContainer("rar".to_string()).is_fatal());
        assert!(
            !JustInstallError::HttpStatus {
                expected: 200,
                received: 404,
                resource: "https://example.com/a.exe".to_string(),
            }
            .is_fatal()
        );
    }

    #[test]
    fn server_errors_are_retryable() {
        let err = JustInstallError::HttpStatus {
            expected: 200,
            received: 503,
            resource: "https://example.com/a.exe".to_string(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn client_errors_are_final() {
        let err = JustInstallError::HttpStatus {
            expected: 200,
            received: 404,
            resource: "https://example.com/a.exe".to_string(),
        };
        assert!(!err.is_retryable());

        let err = JustInstallError::ContentType {
            received: "text/html".to_string(),
            resource: "https://example.com/a.exe".to_string(),
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn status_error_message_names_codes_and_resource() {
        let err = JustInstallError::HttpStatus {
            expected: 200,
            received: 404,
            resource: "https://example.com/a.exe".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("200"));
        assert!(msg.contains("404"));
        assert!(msg.contains("https://example.com/a.exe"));
    }
}
