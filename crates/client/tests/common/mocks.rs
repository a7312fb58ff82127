//! In-memory transport and settings doubles.

use async_trait::async_trait;
use bytes::Bytes;
use disco_core::{Settings, SettingsProvider};
use disco_transport::header::{HeaderMap, HeaderValue, LOCATION};
use disco_transport::{RemoteResponse, Transport, TransportError, TransportResult};
use std::collections::HashMap;
use std::sync::Mutex;

/// Canned reply for one URL.
#[derive(Clone, Debug)]
pub enum MockReply {
    Body(Bytes),
    Redirect(String),
    Status(u16),
}

/// Transport answering from a URL table and recording every request.
#[derive(Default)]
pub struct MockTransport {
    replies: HashMap<String, MockReply>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: impl Into<Bytes>) -> Self {
        self.replies
            .insert(url.to_string(), MockReply::Body(body.into()));
        self
    }

    pub fn with_redirect(mut self, url: &str, location: &str) -> Self {
        self.replies
            .insert(url.to_string(), MockReply::Redirect(location.to_string()));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.replies
            .insert(url.to_string(), MockReply::Status(status));
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn reply(&self, url: &str) -> TransportResult<MockReply> {
        self.requests.lock().unwrap().push(url.to_string());
        self.replies
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn download(&self, url: &str, follow_redirects: bool) -> TransportResult<Bytes> {
        match self.reply(url)? {
            MockReply::Body(body) => Ok(body),
            MockReply::Redirect(location) if follow_redirects => {
                self.download(&location, true).await
            }
            MockReply::Redirect(_) => Err(TransportError::Status {
                url: url.to_string(),
                status: 302,
            }),
            MockReply::Status(status) => Err(TransportError::Status {
                url: url.to_string(),
                status,
            }),
        }
    }

    async fn open_remote(&self, url: &str, expect: u16) -> TransportResult<RemoteResponse> {
        let (status, headers, body) = match self.reply(url)? {
            MockReply::Body(body) => (200, HeaderMap::new(), body),
            MockReply::Redirect(location) => {
                let mut headers = HeaderMap::new();
                headers.insert(LOCATION, HeaderValue::from_str(&location).unwrap());
                (302, headers, Bytes::new())
            }
            MockReply::Status(status) => (status, HeaderMap::new(), Bytes::new()),
        };
        if status != expect {
            return Err(TransportError::UnexpectedStatus {
                url: url.to_string(),
                expected: expect,
                actual: status,
            });
        }
        Ok(RemoteResponse {
            url: url.to_string(),
            status,
            headers,
            body,
        })
    }
}

/// Settings provider whose snapshot can be swapped between operations.
pub struct SwitchableSettings {
    current: Mutex<Settings>,
    loads: Mutex<usize>,
}

impl SwitchableSettings {
    pub fn new(settings: Settings) -> Self {
        Self {
            current: Mutex::new(settings),
            loads: Mutex::new(0),
        }
    }

    pub fn set(&self, settings: Settings) {
        *self.current.lock().unwrap() = settings;
    }

    pub fn loads(&self) -> usize {
        *self.loads.lock().unwrap()
    }
}

impl SettingsProvider for SwitchableSettings {
    fn load(&self) -> disco_core::Result<Settings> {
        *self.loads.lock().unwrap() += 1;
        Ok(self.current.lock().unwrap().clone())
    }
}
