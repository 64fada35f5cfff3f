//! HTTP feed client backed by `reqwest`.
//!
//! One GET per run: the response body is a gzip-compressed stream of
//! newline-delimited JSON records, exposed as an async buffered reader. A
//! non-200 status aborts before any byte of the body is consumed. No retry,
//! no backoff — a failed run is simply reported.

use std::env;
use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use async_compression::tokio::bufread::GzipDecoder;
use bytes::Bytes;
use futures::stream::Stream;
use futures::TryStreamExt;
use tokio::io::BufReader;
use tokio_util::io::StreamReader;

use feedstream_core::{FeedError, FeedKind};

/// Base URL of the feed service.
pub const DEFAULT_BASE_URL: &str = "https://feeds.spur.us/v2/";

/// Request header carrying the API token.
pub const TOKEN_HEADER: &str = "TOKEN";

/// Environment variable holding the API token.
pub const TOKEN_ENV_VAR: &str = "API_TOKEN";

/// Byte stream of the raw response body. A newtype rather than a bare trait
/// object so `FeedReader` can implement `Debug`.
pub struct BodyStream(Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send>>);

impl fmt::Debug for BodyStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BodyStream")
    }
}

impl Stream for BodyStream {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().0.as_mut().poll_next(cx)
    }
}

/// The decompressed feed body as an async buffered reader, ready for
/// `feedstream_core::LineSource`.
pub type FeedReader = BufReader<GzipDecoder<StreamReader<BodyStream, Bytes>>>;

/// Configuration for `FeedClient`.
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// Base URL the feed paths are resolved under. Must end with `/`.
    pub base_url: String,
    /// API token sent in the `TOKEN` header.
    pub token: String,
    /// Connection timeout. There is deliberately no overall request timeout:
    /// a feed download runs as long as the body keeps flowing.
    pub connect_timeout: Duration,
}

impl FeedClientConfig {
    /// Config for the production feed service with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            connect_timeout: Duration::from_secs(30),
        }
    }

    /// Override the base URL (used by tests and private deployments).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// HTTP client for opening feed downloads.
pub struct FeedClient {
    config: FeedClientConfig,
    http: reqwest::Client,
}

impl FeedClient {
    /// Create a new client. Fails only if the underlying HTTP client cannot
    /// be constructed (for example, no TLS backend available).
    pub fn new(config: FeedClientConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| FeedError::Http(e.to_string()))?;
        Ok(Self { config, http })
    }

    /// Open a streaming download of the given feed.
    ///
    /// Sends the GET with the token header, verifies the status is 200, and
    /// returns a reader over the decompressed body. Decompression handles
    /// multi-member gzip, which large feed exports are composed of.
    pub async fn open(&self, feed: FeedKind) -> Result<FeedReader, FeedError> {
        let url = format!("{}{}", self.config.base_url, feed.path());

        let response = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, &self.config.token)
            .send()
            .await
            .map_err(|e| FeedError::Http(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FeedError::Transport {
                status: status.as_u16(),
            });
        }
        tracing::info!(feed = %feed, %url, "feed stream opened");

        let body = BodyStream(Box::pin(response.bytes_stream().map_err(io::Error::other)));
        let mut decoder = GzipDecoder::new(StreamReader::new(body));
        decoder.multiple_members(true);
        Ok(BufReader::new(decoder))
    }
}

/// Read the API token from the environment. Missing or empty aborts the run
/// before any network call.
pub fn token_from_env() -> Result<String, FeedError> {
    token_from(TOKEN_ENV_VAR)
}

fn token_from(var: &str) -> Result<String, FeedError> {
    match env::var(var) {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(FeedError::MissingToken {
            var: var.to_string(),
        }),
    }
}
