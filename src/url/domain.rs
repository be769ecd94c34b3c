use url::{Host, Url};

/// Returns the registrable domain of a URL's host
///
/// Uses the public suffix list, so `sub.example.co.uk` maps to
/// `example.co.uk`. Hosts that have no registrable domain (IP literals,
/// `localhost`, bare public suffixes) map to the full host so two URLs on the
/// same such host still compare equal.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_gleaner::url::registrable_domain;
///
/// let url = Url::parse("https://news.bbc.co.uk/sport").unwrap();
/// assert_eq!(registrable_domain(&url), Some("bbc.co.uk".to_string()));
/// ```
pub fn registrable_domain(url: &Url) -> Option<String> {
    match url.host()? {
        Host::Domain(domain) => {
            let domain = domain.trim_end_matches('.').to_lowercase();
            let registrable = psl::domain_str(&domain)
                .map(str::to_string)
                .unwrap_or_else(|| domain.clone());
            Some(registrable)
        }
        Host::Ipv4(addr) => Some(addr.to_string()),
        Host::Ipv6(addr) => Some(addr.to_string()),
    }
}

/// Returns true if both URLs share a registrable domain
pub fn same_site(a: &Url, b: &Url) -> bool {
    match (registrable_domain(a), registrable_domain(b)) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_registrable_simple_domain() {
        let url = parse("https://example.com/");
        assert_eq!(registrable_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_registrable_strips_subdomains() {
        let url = parse("https://api.v2.example.com/endpoint");
        assert_eq!(registrable_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_registrable_multi_label_suffix() {
        let url = parse("https://sub.example.co.uk/page");
        assert_eq!(registrable_domain(&url), Some("example.co.uk".to_string()));
    }

    #[test]
    fn test_registrable_ignores_port_and_case() {
        let url = parse("https://WWW.Example.COM:8443/");
        assert_eq!(registrable_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_registrable_ip_host() {
        let url = parse("http://127.0.0.1:8080/page");
        assert_eq!(registrable_domain(&url), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_registrable_localhost() {
        let url = parse("http://localhost:3000/");
        assert_eq!(registrable_domain(&url), Some("localhost".to_string()));
    }

    #[test]
    fn test_same_site() {
        assert!(same_site(
            &parse("https://a.example.com/x"),
            &parse("https://b.example.com/y")
        ));
        assert!(!same_site(
            &parse("https://example.com/"),
            &parse("https://other.com/")
        ));
        assert!(!same_site(
            &parse("https://example.co.uk/"),
            &parse("https://other.co.uk/")
        ));
    }
}
