//! Network-location extraction for scoring and deduplication.

use url::Url;

/// Return the network location of `raw`.
///
/// The location is `[user[:password]@]host[:port]`, the same string that
/// appears between `//` and the path. The host is lower-cased by URL
/// parsing; userinfo keeps its case. Inputs that do not parse as an
/// absolute URL, or that have no host, yield an empty string, so they
/// all share one dedup key.
///
/// # Examples
///
/// ```
/// use research_search::ranking::domain::domain_of;
///
/// assert_eq!(domain_of("https://En.Wikipedia.org/wiki/Paris"), "en.wikipedia.org");
/// assert_eq!(domain_of("http://localhost:8080/x"), "localhost:8080");
/// assert_eq!(domain_of("not a url"), "");
/// ```
pub fn domain_of(raw: &str) -> String {
    let Ok(parsed) = Url::parse(raw) else {
        return String::new();
    };
    let Some(host) = parsed.host_str() else {
        return String::new();
    };

    let mut location = String::new();
    if !parsed.username().is_empty() {
        location.push_str(parsed.username());
        if let Some(password) = parsed.password() {
            location.push(':');
            location.push_str(password);
        }
        location.push('@');
    }
    location.push_str(host);
    if let Some(port) = parsed.port() {
        location.push(':');
        location.push_str(&port.to_string());
    }
    location
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_is_lowercased() {
        assert_eq!(domain_of("HTTPS://WWW.BBC.COM/news"), "www.bbc.com");
    }

    #[test]
    fn subdomains_are_distinct() {
        assert_ne!(domain_of("https://a.example.com"), domain_of("https://b.example.com"));
    }

    #[test]
    fn path_query_and_fragment_ignored() {
        assert_eq!(
            domain_of("https://example.org/a/b?c=d#e"),
            domain_of("https://example.org/other")
        );
    }

    #[test]
    fn explicit_port_kept() {
        assert_eq!(domain_of("http://example.com:8080/x"), "example.com:8080");
    }

    #[test]
    fn userinfo_kept() {
        assert_eq!(domain_of("ftp://user:pw@Files.example.com/"), "user:pw@files.example.com");
    }

    #[test]
    fn userinfo_case_is_preserved() {
        assert_eq!(domain_of("https://Alice@Example.COM/"), "Alice@example.com");
        assert_ne!(domain_of("https://Alice@example.com/"), domain_of("https://alice@example.com/"));
    }

    #[test]
    fn relative_or_empty_input_has_empty_domain() {
        assert_eq!(domain_of(""), "");
        assert_eq!(domain_of("example.com/page"), "");
        assert_eq!(domain_of("mailto:someone@example.com"), "");
    }
}
