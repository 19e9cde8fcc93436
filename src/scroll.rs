pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Element id named by an in-page link, if any.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scroll position that leaves the target just below the fixed header.
pub fn scroll_target(offset_top: f64, header_offset: f64) -> f64 {
    offset_top - header_offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_fragment_ids() {
        assert_eq!(fragment_id("#about"), Some("about"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id(""), None);
        assert_eq!(fragment_id("/projects#top"), None);
    }

    #[test]
    fn target_sits_below_the_header() {
        assert_eq!(scroll_target(1_200.0, 80.0), 1_120.0);
        assert_eq!(scroll_target(40.0, 80.0), -40.0);
    }
}
