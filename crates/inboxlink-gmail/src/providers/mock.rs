//! Mock Gmail provider for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::credentials::Credentials;
use crate::errors::GmailError;
use crate::providers::{GmailApi, GmailMessage, WatchResponse};

/// Recorded `send_raw` call
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub bearer_token: String,
    pub message: String,
    pub thread_id: Option<String>,
}

/// Mock Gmail provider for testing
#[derive(Debug, Clone)]
pub struct MockGmailApi {
    /// Counters for tracking calls
    pub watch_count: Arc<AtomicUsize>,
    pub send_count: Arc<AtomicUsize>,
    pub sent: Arc<Mutex<Vec<SentMessage>>>,

    /// Configurable responses
    pub should_fail_watch: bool,
    pub should_fail_send: bool,
    pub watch_response: WatchResponse,
}

impl Default for MockGmailApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGmailApi {
    pub fn new() -> Self {
        Self {
            watch_count: Arc::new(AtomicUsize::new(0)),
            send_count: Arc::new(AtomicUsize::new(0)),
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail_watch: false,
            should_fail_send: false,
            watch_response: WatchResponse {
                history_id: "1000".to_string(),
                expiration: inboxlink_core::from_epoch_millis(1_700_000_000_000),
            },
        }
    }

    pub fn with_watch_failure(mut self) -> Self {
        self.should_fail_watch = true;
        self
    }

    pub fn with_send_failure(mut self) -> Self {
        self.should_fail_send = true;
        self
    }

    pub fn with_watch_response(mut self, response: WatchResponse) -> Self {
        self.watch_response = response;
        self
    }

    pub fn watch_call_count(&self) -> usize {
        self.watch_count.load(Ordering::SeqCst)
    }

    pub fn send_call_count(&self) -> usize {
        self.send_count.load(Ordering::SeqCst)
    }

    pub fn sent_messages(&self) -> Vec<SentMessage> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl GmailApi for MockGmailApi {
    async fn watch(
        &self,
        _account_id: &str,
        _credentials: &Credentials,
    ) -> Result<WatchResponse, GmailError> {
        self.watch_count.fetch_add(1, Ordering::SeqCst);

        if self.should_fail_watch {
            return Err(GmailError::Api {
                status: 403,
                body: "Mock watch failure".to_string(),
            });
        }

        Ok(self.watch_response.clone())
    }

    async fn send_raw(
        &self,
        credentials: &Credentials,
        message: &str,
        thread_id: Option<&str>,
    ) -> Result<GmailMessage, GmailError> {
        self.send_count.fetch_add(1, Ordering::SeqCst);

        if self.should_fail_send {
            return Err(GmailError::Http("Mock send failure".to_string()));
        }

        if let Ok(mut sent) = self.sent.lock() {
            sent.push(SentMessage {
                bearer_token: credentials.bearer_token().to_string(),
                message: message.to_string(),
                thread_id: thread_id.map(str::to_string),
            });
        }

        Ok(GmailMessage {
            id: Some(format!("mock-message-{}", self.send_call_count())),
            thread_id: Some(thread_id.unwrap_or("mock-thread").to_string()),
            label_ids: vec!["SENT".to_string()],
        })
    }
}
