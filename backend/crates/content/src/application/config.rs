//! Application Configuration

/// Content application configuration
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Posts per page on the public listing when the client asks for
    /// nothing specific
    pub default_page_size: u32,
    /// Upper bound for client-requested page sizes
    pub max_page_size: u32,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            default_page_size: 3,
            max_page_size: 100,
        }
    }
}
