use std::path::PathBuf;

/// Feed origin used by [`ClientConfig::default`].
pub const DEFAULT_BASE_URL: &str = "https://api.bestchange.ru";

/// Options for [`BestChange`](crate::BestChange), fixed at construction time.
///
/// The defaults match the production feed; tests point `base_url` at a mock
/// server and `cache_dir` at a scratch directory.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin the archive is downloaded from (`<base_url>/info.zip`).
    pub base_url: String,
    /// Run the first load inside [`BestChange::new`](crate::BestChange::new).
    pub load_immediately: bool,
    /// Consult the cached archive before going to the network. Downloads are
    /// persisted to the cache path either way.
    pub use_cache: bool,
    /// Freshness window for the cached archive, in seconds. The feed itself
    /// regenerates roughly every 15 seconds.
    pub cache_seconds: u64,
    /// Directory holding the cached archive; `None` resolves the platform
    /// cache directory.
    pub cache_dir: Option<PathBuf>,
    /// Cross-reference rates onto exchangers to fill in their review counts.
    pub exchanger_reviews: bool,
    /// Parse review fields into split positive/negative counts instead of
    /// keeping the raw feed string.
    pub split_reviews: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            load_immediately: true,
            use_cache: true,
            cache_seconds: 15,
            cache_dir: None,
            exchanger_reviews: false,
            split_reviews: false,
        }
    }
}
