//! URL helper functions

/// Join the site base URL and a root-relative path by plain concatenation
///
/// # Examples
/// ```ignore
/// absolute_url("https://blog.example.dev", "/img/x.png") // -> "https://blog.example.dev/img/x.png"
/// ```
pub fn absolute_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//") {
        return path.to_string();
    }
    format!("{}/{}", base, path.trim_start_matches('/'))
}

/// Whether a link points off-site
pub fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url() {
        let base = "https://blog.example.dev";
        assert_eq!(absolute_url(base, "/t.jpg"), "https://blog.example.dev/t.jpg");
        assert_eq!(absolute_url(base, "t.jpg"), "https://blog.example.dev/t.jpg");
        assert_eq!(absolute_url("https://blog.example.dev/", "/a/"), "https://blog.example.dev/a/");
        assert_eq!(absolute_url(base, ""), "https://blog.example.dev");
    }

    #[test]
    fn test_absolute_url_keeps_full_urls() {
        assert_eq!(
            absolute_url("https://blog.example.dev", "https://cdn.example.com/x.png"),
            "https://cdn.example.com/x.png"
        );
    }

    #[test]
    fn test_is_external() {
        assert!(is_external("https://shreyaspatil.dev"));
        assert!(!is_external("/about/"));
    }
}
