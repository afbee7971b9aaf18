//! Transport abstraction for the settings request

use async_trait::async_trait;

use crate::error::FetchError;
use crate::payload::SettingsPayload;

/// Status and body of a finished HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Issues the single GET for the settings document
///
/// Browser handles are `!Send`, so futures are not required to be either.
#[async_trait(?Send)]
pub trait SettingsTransport {
    /// GET `path` with no body, headers or query. Network failures map to
    /// `FetchError::Transport`; any HTTP status is returned as a response.
    async fn get(&self, path: &str) -> Result<RawResponse, FetchError>;
}

/// Turn a response into a payload: non-2xx statuses and non-object bodies fail
pub fn decode_response(response: &RawResponse) -> Result<SettingsPayload, FetchError> {
    if !response.is_success() {
        return Err(FetchError::Status(response.status));
    }
    SettingsPayload::from_slice(&response.body)
}
