//! Link normalization.
//!
//! Homepages link to their articles in three shapes: fully-qualified URLs
//! (`https://site.com/2025/story`), root-relative paths (`/2025/story`) and
//! bare relative paths (`2025/story`). [`resolve`] turns any of them into an
//! absolute URL by plain string concatenation with the site host.
//!
//! Resolution is intentionally literal: the host is not validated, nothing
//! is URL-encoded and duplicate slashes are kept. A bare `/` is not a
//! root-relative link (the pattern needs at least one character after the
//! slash), so it resolves to `host + "//"`.

use once_cell::sync::Lazy;
use regex::Regex;

static WELL_FORMED_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://.+/.+$").expect("valid absolute link pattern"));

static ROOT_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/.+$").expect("valid root path pattern"));

/// The shape of a link as found on a homepage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkForm {
    /// `scheme://host/path`
    Absolute,
    /// `/path`
    RootRelative,
    /// anything else, e.g. `path`
    BareRelative,
}

impl LinkForm {
    /// Classify a link. Rules are checked in order and the first match wins.
    pub fn of(link: &str) -> Self {
        if WELL_FORMED_LINK.is_match(link) {
            LinkForm::Absolute
        } else if ROOT_PATH.is_match(link) {
            LinkForm::RootRelative
        } else {
            LinkForm::BareRelative
        }
    }
}

/// Resolve `link` against `host` into an absolute URL.
///
/// `host` is expected without a trailing slash.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(resolve("http://x.com", "https://y.com/a"), "https://y.com/a");
/// assert_eq!(resolve("http://x.com", "/a"), "http://x.com/a");
/// assert_eq!(resolve("http://x.com", "a"), "http://x.com/a");
/// ```
pub fn resolve(host: &str, link: &str) -> String {
    match LinkForm::of(link) {
        LinkForm::Absolute => link.to_string(),
        LinkForm::RootRelative => format!("{host}{link}"),
        LinkForm::BareRelative => format!("{host}/{link}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "http://x.com";

    #[test]
    fn test_absolute_links_are_unchanged() {
        for link in [
            "http://other.com/news/1",
            "https://x.com/2025/05/06/story",
            "https://cdn.x.com/a/b?c=d",
        ] {
            assert_eq!(resolve(HOST, link), link);
            assert_eq!(LinkForm::of(link), LinkForm::Absolute);
        }
    }

    #[test]
    fn test_root_relative_links_are_appended_to_host() {
        assert_eq!(resolve(HOST, "/news/1"), "http://x.com/news/1");
        assert_eq!(resolve(HOST, "/a"), "http://x.com/a");
        assert_eq!(LinkForm::of("/a"), LinkForm::RootRelative);
    }

    #[test]
    fn test_bare_links_get_a_separating_slash() {
        assert_eq!(resolve(HOST, "news/1"), "http://x.com/news/1");
        assert_eq!(resolve(HOST, "story.html"), "http://x.com/story.html");
        assert_eq!(LinkForm::of("story.html"), LinkForm::BareRelative);
    }

    #[test]
    fn test_lone_slash_is_not_root_relative() {
        // `^/.+$` needs a character after the slash, so "/" falls to the bare rule.
        assert_eq!(LinkForm::of("/"), LinkForm::BareRelative);
        assert_eq!(resolve(HOST, "/"), "http://x.com//");
    }

    #[test]
    fn test_scheme_without_path_is_not_absolute() {
        // No path segment after the host: the absolute pattern does not match.
        assert_eq!(LinkForm::of("https://y.com"), LinkForm::BareRelative);
        assert_eq!(resolve(HOST, "https://y.com"), "http://x.com/https://y.com");
    }

    #[test]
    fn test_no_slash_deduplication() {
        assert_eq!(resolve(HOST, "//cdn.x.com/a"), "http://x.com//cdn.x.com/a");
        assert_eq!(resolve("http://x.com/", "/a"), "http://x.com//a");
    }
}
