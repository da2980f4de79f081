use std::sync::LazyLock;
use std::time::Duration;

/// Shared HTTP client used by the scraper and the enrichment API.
///
/// Initialized lazily on first access and reused across the application:
/// connection pooling, DNS caching, and a single rustls stack. Timeouts are
/// bounded so a slow remote host cannot stall a scrape call indefinitely.
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(15))
        .connect_timeout(Duration::from_secs(5))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // Enable compression (gzip, deflate, brotli, zstd)
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        // Security
        .https_only(false)
        .use_rustls_tls()
        .user_agent(concat!("linkrepo/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to build HTTP client")
});
