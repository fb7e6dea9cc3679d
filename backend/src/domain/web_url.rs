//! Shared check for the image URLs stored on cards and user avatars.
//!
//! Accepts `http`, `https` and `ftp` URLs. The scheme may be omitted, in
//! which case `http` is assumed for parsing only; the value is stored as
//! given. Hosts must be an IP address or a domain with an alphabetic
//! top-level label, so `http://localhost` is rejected.

use url::{Host, Url};

const SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// Whether `value` is a web URL that cards and avatars may point at.
///
/// # Examples
/// ```
/// use backend::domain::is_web_url;
///
/// assert!(is_web_url("https://x.test/a.png"));
/// assert!(is_web_url("x.test/a.png"));
/// assert!(is_web_url("ftp://x.test/a.png"));
/// assert!(!is_web_url("http://localhost/a.png"));
/// assert!(!is_web_url("file:///etc/passwd"));
/// ```
pub fn is_web_url(value: &str) -> bool {
    if value.is_empty()
        || value.chars().any(char::is_whitespace)
        || value.starts_with("//")
        || value.to_ascii_lowercase().starts_with("mailto:")
    {
        return false;
    }
    let has_scheme = value
        .split_once("://")
        .is_some_and(|(scheme, _)| !scheme.contains(['/', '?', '#']));
    let parsed = if has_scheme {
        Url::parse(value)
    } else {
        Url::parse(&format!("http://{value}"))
    };
    let Ok(url) = parsed else {
        return false;
    };
    SCHEMES.contains(&url.scheme()) && url.host().is_some_and(|host| is_public_host(&host))
}

fn is_public_host(host: &Host<&str>) -> bool {
    match host {
        Host::Ipv4(_) | Host::Ipv6(_) => true,
        Host::Domain(domain) => is_qualified_domain(domain),
    }
}

fn is_qualified_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };
    !rest.is_empty() && labels.iter().all(|label| is_label(label)) && is_tld(tld)
}

fn is_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

// Punycode TLDs arrive as `xn--...` after IDNA mapping.
fn is_tld(label: &str) -> bool {
    label.starts_with("xn--") || (label.len() >= 2 && label.chars().all(|c| c.is_ascii_alphabetic()))
}
