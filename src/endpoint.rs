use crate::error::{Error, Result};

use std::net::IpAddr;
use url::{Host, Url};

/// Validate and normalize the API base URL.
///
/// Returns the endpoint with any trailing `/` removed, or an error for:
///   - Malformed URLs or URLs without a host
///   - Schemes other than `http`/`https`
///   - Embedded credentials
///   - A query string or fragment (API paths are appended to the base)
///
/// Plain HTTP is accepted, since Parcelvoy is often self-hosted on an
/// internal network, but a warning is logged unless the host is loopback.
pub fn validate_endpoint(endpoint: &str) -> Result<String> {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidEndpoint("'endpoint' is required".to_string()));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| Error::InvalidEndpoint(format!("{trimmed}: {e}")))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(Error::InvalidEndpoint(format!(
            "unsupported scheme '{}', expected http or https",
            url.scheme()
        )));
    }

    let Some(host) = url.host() else {
        return Err(Error::InvalidEndpoint(format!("missing host: {trimmed}")));
    };

    if !url.username().is_empty() || url.password().is_some() {
        return Err(Error::InvalidEndpoint(
            "endpoint URL must not contain credentials".to_string(),
        ));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::InvalidEndpoint(
            "endpoint URL must not contain a query or fragment".to_string(),
        ));
    }

    if url.scheme() == "http" && !is_loopback(&host) {
        log::warn!("Parcelvoy endpoint uses plain HTTP; the API key is sent unencrypted");
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

fn is_loopback(host: &Host<&str>) -> bool {
    match host {
        Host::Domain(name) => name.eq_ignore_ascii_case("localhost"),
        Host::Ipv4(v4) => IpAddr::V4(*v4).is_loopback(),
        Host::Ipv6(v6) => IpAddr::V6(*v6).is_loopback(),
    }
}
