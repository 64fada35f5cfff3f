//! feedstream-http — the transport collaborator for feedstream.
//!
//! Opens a feed endpoint over HTTP, authenticates with a token header, and
//! exposes the gzip-compressed newline-delimited body as an async buffered
//! reader for `feedstream-core` to consume. Transport only: no retries, no
//! rate limiting, no resumability.

pub mod client;

pub use client::{token_from_env, FeedClient, FeedClientConfig, FeedReader, DEFAULT_BASE_URL, TOKEN_ENV_VAR, TOKEN_HEADER};
