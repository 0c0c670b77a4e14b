//! Feed download and local file cache.
//!
//! Each published sheet is downloaded as TSV and kept under
//! `<cache_dir>/feeds/`. A cached copy younger than the revalidate window is
//! served without touching the network; older copies are re-downloaded.

use crate::config::{FeedKind, FeedUrls};
use crate::error::{PackdeskError, Result};
use reqwest::blocking::Client;
use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Downloads and caches the spreadsheet feeds.
///
/// Cloning is cheap; clones share nothing but configuration, so each clone
/// can fetch on its own thread.
#[derive(Debug, Clone)]
pub struct FeedCache {
    /// Directory where cached files are stored.
    pub cache_dir: PathBuf,
    /// If true, never download (use cached files only, whatever their age).
    pub offline: bool,
    timeout: Duration,
    revalidate: Duration,
    urls: FeedUrls,
    client: OnceCell<Client>,
}

impl FeedCache {
    /// Create a new feed cache.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the feed directory if it does not exist.
    pub fn new(
        cache_dir: Option<PathBuf>,
        offline: bool,
        timeout: Duration,
        revalidate: Duration,
        urls: FeedUrls,
    ) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(crate::config::default_cache_dir);
        fs::create_dir_all(dir.join("feeds"))?;
        Ok(Self {
            cache_dir: dir,
            offline,
            timeout,
            revalidate,
            urls,
            client: OnceCell::new(),
        })
    }

    /// Lazy HTTP client, created on first download.
    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(self.client.get_or_init(|| client))
    }

    /// Local path of the cached copy of a feed (which may not exist yet).
    pub fn feed_path(&self, kind: FeedKind) -> PathBuf {
        self.cache_dir.join("feeds").join(kind.file_name())
    }

    pub fn urls(&self) -> &FeedUrls {
        &self.urls
    }

    fn is_fresh(&self, path: &Path) -> bool {
        fs::metadata(path)
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|modified| modified.elapsed().ok())
            .is_some_and(|age| age < self.revalidate)
    }

    /// Return the text of a feed, downloading it unless a fresh copy is cached.
    pub fn fetch(&self, kind: FeedKind) -> Result<String> {
        let local_path = self.feed_path(kind);

        if self.offline {
            if local_path.exists() {
                return Ok(fs::read_to_string(&local_path)?);
            }
            return Err(PackdeskError::NotFound(format!(
                "{} feed not cached and offline mode is enabled",
                kind
            )));
        }

        if self.is_fresh(&local_path) {
            tracing::debug!(feed = %kind, path = %local_path.display(), "serving cached feed");
            return Ok(fs::read_to_string(&local_path)?);
        }

        let url = self.urls.get(kind).ok_or_else(|| {
            PackdeskError::NotFound(format!("no URL configured for the {} feed", kind))
        })?;
        self.download(url, &local_path)
    }

    /// Download a feed and store it in the cache.
    ///
    /// Writes to a temp file first and renames on success, so an interrupted
    /// download never replaces a good cached copy.
    fn download(&self, url: &str, dest: &Path) -> Result<String> {
        tracing::info!(url, "downloading feed");

        let tmp_dest = dest.with_extension("tsv.tmp");
        let client = self.client()?;

        let result = (|| -> Result<String> {
            let resp = client.get(url).send()?.error_for_status()?;
            let text = resp.text()?;
            fs::write(&tmp_dest, &text)?;
            fs::rename(&tmp_dest, dest)?;
            Ok(text)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp_dest);
        }

        result
    }

    /// Store feed text obtained elsewhere (e.g. a manual sheet export) as the
    /// cached copy of `kind`.
    pub fn import(&self, kind: FeedKind, text: &str) -> Result<()> {
        let dest = self.feed_path(kind);
        let tmp_dest = dest.with_extension("tsv.tmp");
        fs::write(&tmp_dest, text)?;
        fs::rename(&tmp_dest, &dest)?;
        Ok(())
    }

    /// Remove all cached feeds.
    pub fn clear(&self) -> Result<()> {
        let feeds = self.cache_dir.join("feeds");
        if feeds.exists() {
            fs::remove_dir_all(&feeds)?;
        }
        fs::create_dir_all(&feeds)?;
        Ok(())
    }
}
