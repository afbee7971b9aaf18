//! Mock settings endpoint for testing
#![allow(dead_code)] // Test utilities may not all be used in every test

use std::cell::RefCell;

use async_trait::async_trait;
use settings_form_core::{FetchError, RawResponse, SettingsTransport};

/// Canned reply of the mock endpoint
#[derive(Debug, Clone)]
pub enum Reply {
    Response(RawResponse),
    NetworkDown,
}

/// Serves one fixed reply for every GET and records requested paths
pub struct MockEndpoint {
    reply: Reply,
    requests: RefCell<Vec<String>>,
}

impl MockEndpoint {
    pub fn json(body: &str) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            reply: Reply::Response(RawResponse::new(status, body)),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn network_down() -> Self {
        Self {
            reply: Reply::NetworkDown,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl SettingsTransport for MockEndpoint {
    async fn get(&self, path: &str) -> Result<RawResponse, FetchError> {
        self.requests.borrow_mut().push(path.to_string());
        match &self.reply {
            Reply::Response(response) => Ok(response.clone()),
            Reply::NetworkDown => Err(FetchError::Transport("connection refused".into())),
        }
    }
}
