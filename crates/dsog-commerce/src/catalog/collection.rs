//! Collections and page detection.

/// Collections the storefront has pages for.
pub const KNOWN_COLLECTIONS: [&str; 5] = ["mens", "womens", "kids", "accessories", "gifts"];

/// Cache key under which a collection's products are stored.
pub fn cache_key(collection: &str) -> String {
    format!("products-{}", collection)
}

/// Upper-case the first character ("mens" -> "Mens").
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The storefront page a path points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Landing page.
    Home,
    /// A collection page.
    Collection(String),
}

impl Page {
    /// Detect the page from a URL path such as `/shop/womens.html`.
    pub fn from_path(path: &str) -> Self {
        let path = path.to_ascii_lowercase();
        // "womens" contains "mens"; check the longer name first.
        for name in ["womens", "mens", "kids", "accessories", "gifts"] {
            if path.contains(name) {
                return Page::Collection(name.to_string());
            }
        }
        Page::Home
    }

    /// Key used for page-keyed configuration ("home" or the collection name).
    pub fn key(&self) -> &str {
        match self {
            Page::Home => "home",
            Page::Collection(name) => name,
        }
    }

    /// The collection shown on this page, if any.
    pub fn collection(&self) -> Option<&str> {
        match self {
            Page::Home => None,
            Page::Collection(name) => Some(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key("mens"), "products-mens");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("general"), "General");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_page_from_path() {
        assert_eq!(Page::from_path("/mens.html"), Page::Collection("mens".into()));
        assert_eq!(Page::from_path("/womens.html"), Page::Collection("womens".into()));
        assert_eq!(Page::from_path("/gifts"), Page::Collection("gifts".into()));
        assert_eq!(Page::from_path("/index.html"), Page::Home);
        assert_eq!(Page::from_path("/"), Page::Home);
    }

    #[test]
    fn test_page_key() {
        assert_eq!(Page::Home.key(), "home");
        assert_eq!(Page::Collection("kids".into()).key(), "kids");
        assert_eq!(Page::Home.collection(), None);
    }
}
