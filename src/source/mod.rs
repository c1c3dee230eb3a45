// src/source/mod.rs
pub mod client;

/// Substring that identifies a profile page address.
pub const PROFILE_URL_MARKER: &str = "linkedin.com/in/";

/// A rendered page plus the address it came from.
#[derive(Debug, Clone)]
pub struct PageDocument {
    pub url: String,
    pub html: String,
}

impl PageDocument {
    /// Whether this page's address identifies a profile page.
    pub fn is_profile_page(&self) -> bool {
        self.url.contains(PROFILE_URL_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_page_detection() {
        let profile = PageDocument {
            url: "https://www.linkedin.com/in/janedoe/".to_string(),
            html: String::new(),
        };
        assert!(profile.is_profile_page());

        let feed = PageDocument {
            url: "https://www.linkedin.com/feed/".to_string(),
            html: String::new(),
        };
        assert!(!feed.is_profile_page());
    }
}
