//! Static pages served by the demo server
//!
//! Each page is a single HTML document that talks to the JSON API with
//! `fetch()`. Every page carries a banner marking its figures as demo data.

pub const INDEX: &str = include_str!("../assets/index.html");
pub const ADMIN: &str = include_str!("../assets/admin.html");
pub const SCRATCH: &str = include_str!("../assets/scratch.html");
pub const CRASH: &str = include_str!("../assets/crash.html");
pub const LIVE: &str = include_str!("../assets/live.html");
pub const DASHBOARD: &str = include_str!("../assets/dashboard.html");
pub const STYLESHEET: &str = include_str!("../assets/style.css");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_page_is_marked_as_demo() {
        for page in [INDEX, ADMIN, SCRATCH, CRASH, LIVE, DASHBOARD] {
            assert!(page.contains("demo-banner"));
            assert!(page.contains("/static/style.css"));
        }
    }

    #[test]
    fn test_pages_only_call_local_api() {
        for page in [INDEX, ADMIN, SCRATCH, CRASH, LIVE, DASHBOARD] {
            assert!(page.contains("fetch('/api/") || page.contains("fetch(`/api/"));
            assert!(!page.contains("fetch('http"));
        }
    }
}
