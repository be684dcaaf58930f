//! The facade over the fetch, cache, and parse pipeline.

use anyhow::Result;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::archive::{
    ENTRY_CITIES, ENTRY_CURRENCIES, ENTRY_EXCHANGERS, ENTRY_RATES, ENTRY_TOP, FeedArchive,
};
use crate::cache::ArchiveCache;
use crate::config::ClientConfig;
use crate::fetch;
use crate::records::{Cities, Currencies, Exchangers, Rates, Top};

/// Client for the aggregator's periodic feed.
///
/// One [`load`](Self::load) runs the whole pipeline sequentially: reuse or
/// download the archive, persist it, decode the five tables, parse them, and
/// optionally enrich exchangers with review counts. A failure anywhere is
/// stored as one error message; the accessors then return `None` until a
/// later load succeeds.
pub struct BestChange {
    config: ClientConfig,
    currencies: Option<Currencies>,
    exchangers: Option<Exchangers>,
    cities: Option<Cities>,
    rates: Option<Rates>,
    top: Option<Top>,
    error: Option<String>,
}

impl BestChange {
    /// Builds a client and, unless `load_immediately` is off, runs the first
    /// load. Construction itself never fails; check [`is_error`](Self::is_error).
    pub async fn new(config: ClientConfig) -> Self {
        let mut client = BestChange {
            config,
            currencies: None,
            exchangers: None,
            cities: None,
            rates: None,
            top: None,
            error: None,
        };
        if client.config.load_immediately {
            client.load().await;
        }
        client
    }

    /// Fetches and parses the feed, replacing all previously held collections
    /// wholesale. Collections are cleared up front, so a failed load never
    /// leaves stale data behind.
    pub async fn load(&mut self) {
        self.currencies = None;
        self.exchangers = None;
        self.cities = None;
        self.rates = None;
        self.top = None;
        self.error = None;

        if let Err(e) = self.try_load().await {
            warn!("Feed load failed: {e:#}");
            self.error = Some(format!("{e:#}"));
        }
    }

    async fn try_load(&mut self) -> Result<()> {
        let bytes = self.obtain_archive().await?;
        let mut archive = FeedArchive::open(bytes)?;

        let rates = Rates::parse(
            &archive.read_entry(ENTRY_RATES)?,
            self.config.split_reviews,
        );
        let currencies = Currencies::parse(&archive.read_entry(ENTRY_CURRENCIES)?);
        let mut exchangers = Exchangers::parse(&archive.read_entry(ENTRY_EXCHANGERS)?);
        let cities = Cities::parse(&archive.read_entry(ENTRY_CITIES)?);
        let top = Top::parse(&archive.read_entry(ENTRY_TOP)?);

        if self.config.exchanger_reviews {
            exchangers.attach_reviews(&rates);
        }

        self.rates = Some(rates);
        self.currencies = Some(currencies);
        self.exchangers = Some(exchangers);
        self.cities = Some(cities);
        self.top = Some(top);
        Ok(())
    }

    /// The archive bytes, from the cache when it is fresh and enabled,
    /// downloaded and persisted otherwise.
    async fn obtain_archive(&self) -> Result<Bytes> {
        let cache = ArchiveCache::new(self.config.cache_dir.as_deref(), self.config.cache_seconds)?;

        if self.config.use_cache {
            if let Some(bytes) = cache.fresh() {
                return Ok(bytes);
            }
        } else {
            debug!("Cache reads disabled, downloading");
        }

        let bytes = fetch::download(&self.config.base_url).await?;
        cache.store(&bytes)?;
        Ok(bytes)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn currencies(&self) -> Option<&Currencies> {
        self.currencies.as_ref()
    }

    pub fn exchangers(&self) -> Option<&Exchangers> {
        self.exchangers.as_ref()
    }

    pub fn cities(&self) -> Option<&Cities> {
        self.cities.as_ref()
    }

    pub fn rates(&self) -> Option<&Rates> {
        self.rates.as_ref()
    }

    pub fn top(&self) -> Option<&Top> {
        self.top.as_ref()
    }

    /// Whether the most recent load failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Message of the most recent failed load, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
