//! Transport seam for tutorial downloads.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;
use url::Url;

use crate::error::{TutorialError, TutorialResult};

/// Failure to fetch a single remote file.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or its body could not be read.
    #[error("{source}")]
    Transport {
        /// Underlying reqwest error.
        source: reqwest::Error,
    },
    /// The origin answered with a non-success status.
    #[error("http status {status}")]
    Status {
        /// Status code returned by the origin.
        status: u16,
    },
    /// Any other failure, for alternative transports.
    #[error("{reason}")]
    Other {
        /// Human-readable cause.
        reason: String,
    },
}

/// Retrieves the full body of a URL.
pub trait Fetcher {
    /// Fetch `url`, returning the complete body only on success.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failures or non-success responses.
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP fetcher backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher; `None` keeps the client's default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TutorialError::Client`] if the TLS backend cannot be initialised.
    pub fn new(timeout: Option<Duration>) -> TutorialResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|source| TutorialError::Client { source })?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| FetchError::Transport { source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        let body = response
            .bytes()
            .map_err(|source| FetchError::Transport { source })?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn http_fetcher_returns_body_on_success() -> anyhow::Result<()> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/cavity/0/p");
            then.status(200).body("internalField uniform 0;");
        });

        let fetcher = HttpFetcher::new(None)?;
        let url = Url::parse(&server.url("/cavity/0/p"))?;
        let body = fetcher.fetch(&url)?;

        mock.assert();
        assert_eq!(body, b"internalField uniform 0;");
        Ok(())
    }

    #[test]
    fn http_fetcher_maps_error_status() -> anyhow::Result<()> {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/cavity/0/U");
            then.status(404).body("not found");
        });

        let fetcher = HttpFetcher::new(Some(Duration::from_secs(5)))?;
        let url = Url::parse(&server.url("/cavity/0/U"))?;
        let err = fetcher.fetch(&url).err();

        assert!(matches!(err, Some(FetchError::Status { status: 404 })));
        assert_eq!(
            err.map(|err| err.to_string()).as_deref(),
            Some("http status 404")
        );
        Ok(())
    }
}
