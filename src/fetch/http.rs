use crate::error::{JustInstallError, Result};
use crate::project_identity;
use reqwest::blocking::Client;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Url;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

/// Connect, TLS and idle timeout.
pub const CONNECTION_PHASE_TIMEOUT: Duration = Duration::from_secs(10);

/// Whole-request timeout; long enough for large installers.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30 * 60);

pub const MAX_REDIRECTS: usize = 10;

/// Bound for a request whose body is never read: one connection phase to
/// connect, one to receive the response headers.
pub const HEADER_PHASE_TIMEOUT: Duration = Duration::from_secs(2 * 10);

/// Per-request HTTP knobs.
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    /// Cookie URL -> (cookie name, cookie value)
    pub cookies: HashMap<String, (String, String)>,
    /// Header name -> value
    pub headers: HashMap<String, String>,
}

pub(super) fn build_client(http: &HttpOptions, target: &Url) -> Result<Client> {
    let mut builder = Client::builder()
        .connect_timeout(CONNECTION_PHASE_TIMEOUT)
        .pool_idle_timeout(CONNECTION_PHASE_TIMEOUT)
        .pool_max_idle_per_host(0)
        .timeout(REQUEST_TIMEOUT)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .user_agent(project_identity::user_agent())
        .default_headers(header_map(&http.headers)?);

    if !http.cookies.is_empty() {
        builder = builder.cookie_provider(Arc::new(cookie_jar(&http.cookies)?));
    }

    // Local mirrors are reached directly even when a system proxy is set.
    if is_loopback(target) {
        builder = builder.no_proxy();
    }

    Ok(builder.build()?)
}

fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| JustInstallError::ConfigError(format!("invalid header name '{}': {}", name, e)))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            JustInstallError::ConfigError(format!("invalid value for header '{}': {}", name, e))
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

fn cookie_jar(cookies: &HashMap<String, (String, String)>) -> Result<Jar> {
    let jar = Jar::default();
    for (cookie_url, (name, value)) in cookies {
        let url = Url::parse(cookie_url).map_err(|e| JustInstallError::InvalidUrl {
            url: cookie_url.clone(),
            reason: format!("could not parse cookie URL: {}", e),
        })?;
        jar.add_cookie_str(&format!("{}={}", name, value), &url);
    }
    Ok(jar)
}

fn is_loopback(url: &Url) -> bool {
    match url.host_str() {
        Some(host) if host.eq_ignore_ascii_case("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false),
        None => false,
    }
}
