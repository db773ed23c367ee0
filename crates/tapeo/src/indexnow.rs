//! IndexNow submission.
//!
//! Admin mutations enqueue the public URLs they touched; a background
//! worker batches them out to the IndexNow endpoint. Submission is
//! strictly best-effort: a full queue or a failed request is logged
//! and dropped, never surfaced to the caller.

use tokio::sync::mpsc;

use crate::config::Config;

const INDEXNOW_ENDPOINT: &str = "https://api.indexnow.org/indexnow";

/// Queue capacity. Batches beyond this are dropped with a warning.
const QUEUE_SIZE: usize = 32;

/// Handle for enqueueing URL batches to the IndexNow worker.
///
/// Cheap to clone; all clones feed the same worker. A sink built
/// without credentials accepts batches and discards them.
#[derive(Clone)]
pub struct IndexNowSink {
    tx: Option<mpsc::Sender<Vec<String>>>,
}

impl IndexNowSink {
    /// Spawns the submission worker if the host, key and key location
    /// are all configured. Otherwise returns a disabled sink.
    pub fn spawn(config: &Config) -> Self {
        let (Some(host), Some(key)) = (&config.indexnow_host, &config.indexnow_key) else {
            tracing::debug!("IndexNow disabled: host or key not configured");
            return Self::disabled();
        };

        let submitter = Submitter {
            client: reqwest::Client::new(),
            host: host.clone(),
            key: key.clone(),
            key_location: config
                .indexnow_key_location
                .clone()
                .unwrap_or_else(|| format!("https://{host}/{key}.txt")),
            dry_run: config.indexnow_dry_run,
        };

        let (tx, mut rx) = mpsc::channel::<Vec<String>>(QUEUE_SIZE);
        tokio::spawn(async move {
            while let Some(urls) = rx.recv().await {
                submitter.push(urls).await;
            }
        });

        tracing::info!(host = %host, "IndexNow submission enabled");
        Self { tx: Some(tx) }
    }

    /// A sink that accepts and discards every batch.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    /// Enqueues a batch of absolute URLs. Returns how many were queued;
    /// zero when the batch is empty, the sink is disabled or the queue
    /// is full.
    pub fn submit(&self, urls: Vec<String>) -> usize {
        if urls.is_empty() {
            return 0;
        }
        let Some(tx) = &self.tx else {
            tracing::trace!(urls = urls.len(), "IndexNow disabled, dropping batch");
            return 0;
        };

        let count = urls.len();
        match tx.try_send(urls) {
            Ok(()) => count,
            Err(_) => {
                tracing::warn!(urls = count, "IndexNow queue full, dropping batch");
                0
            }
        }
    }
}

struct Submitter {
    client: reqwest::Client,
    host: String,
    key: String,
    key_location: String,
    dry_run: bool,
}

impl Submitter {
    async fn push(&self, urls: Vec<String>) {
        let count = urls.len();
        let payload = serde_json::json!({
            "host": self.host,
            "key": self.key,
            "keyLocation": self.key_location,
            "urlList": urls,
        });

        if self.dry_run {
            tracing::info!(urls = count, payload = %payload, "IndexNow dry run, not submitting");
            return;
        }

        match self.client.post(INDEXNOW_ENDPOINT).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(urls = count, status = %response.status(), "IndexNow batch submitted");
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "IndexNow rejected the batch");
            }
            Err(err) => {
                tracing::warn!(error = %err, "IndexNow submission failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_credentials(dry_run: bool) -> Config {
        Config {
            base_url: "https://tapeo.example".to_string(),
            cms_base_url: "http://localhost:3333".to_string(),
            cms_dataset: "production".to_string(),
            cms_token: None,
            database_url: "sqlite::memory:".to_string(),
            indexnow_host: Some("tapeo.example".to_string()),
            indexnow_key: Some("abc123".to_string()),
            indexnow_key_location: None,
            indexnow_dry_run: dry_run,
            cache_ttl_seconds: 300,
            cache_max_entries: 10_000,
        }
    }

    #[tokio::test]
    async fn disabled_sink_swallows_batches() {
        let sink = IndexNowSink::disabled();

        assert!(!sink.is_enabled());
        assert_eq!(sink.submit(vec!["https://tapeo.example/sevilla".to_string()]), 0);
    }

    #[tokio::test]
    async fn missing_credentials_disable_the_sink() {
        let mut config = config_with_credentials(false);
        config.indexnow_key = None;

        assert!(!IndexNowSink::spawn(&config).is_enabled());
    }

    #[tokio::test]
    async fn empty_batches_are_not_queued() {
        let sink = IndexNowSink::spawn(&config_with_credentials(true));

        assert!(sink.is_enabled());
        assert_eq!(sink.submit(Vec::new()), 0);
    }

    #[tokio::test]
    async fn dry_run_counts_queued_urls() {
        let sink = IndexNowSink::spawn(&config_with_credentials(true));

        let queued = sink.submit(vec![
            "https://tapeo.example/sevilla".to_string(),
            "https://tapeo.example/sevilla/casa-paco".to_string(),
        ]);
        assert_eq!(queued, 2);
    }
}
