//! Integration tests for `FeedClient` against a local mock feed server.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use flate2::write::GzEncoder;
use flate2::Compression;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use feedstream_core::{
    FeedError, FeedKind, FeedPipeline, LineSource, NoopProcessor, PipelineBuilder, ProcessingMode,
};
use feedstream_http::{FeedClient, FeedClientConfig};

/// Serve exactly one HTTP response, returning the base URL and a channel
/// that yields the raw request head once a client has connected.
async fn serve_once(status: &'static str, body: Vec<u8>) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = sock.read(&mut buf).await.unwrap();
            request.extend_from_slice(&buf[..n]);
            if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let _ = tx.send(String::from_utf8_lossy(&request).into_owned());

        let head = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        sock.write_all(head.as_bytes()).await.unwrap();
        sock.write_all(&body).await.unwrap();
        sock.shutdown().await.ok();
    });

    (format!("http://{addr}/"), rx)
}

fn gzip(text: &str) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(text.as_bytes()).unwrap();
    enc.finish().unwrap()
}

fn client_for(base_url: String) -> FeedClient {
    FeedClient::new(FeedClientConfig::new("secret").with_base_url(base_url)).unwrap()
}

#[tokio::test]
async fn open_streams_decompressed_lines() {
    let body = gzip("{\"a\":1}\n{\"a\":2}\n{\"a\":3}\n");
    let (base_url, request) = serve_once("200 OK", body).await;

    let reader = client_for(base_url).open(FeedKind::Anonymous).await.unwrap();
    let mut source = LineSource::new(reader);
    let mut lines = Vec::new();
    while let Some(line) = source.next_line().await.unwrap() {
        lines.push(line);
    }
    assert_eq!(lines, vec!["{\"a\":1}", "{\"a\":2}", "{\"a\":3}"]);

    let head = request.await.unwrap().to_lowercase();
    assert!(head.starts_with("get /anonymous/latest.json.gz http/1.1"));
    assert!(head.contains("token: secret"));
}

#[tokio::test]
async fn residential_feed_hits_its_own_path() {
    let body = gzip("{\"a\":1}\n");
    let (base_url, request) = serve_once("200 OK", body).await;

    client_for(base_url)
        .open(FeedKind::AnonymousResidential)
        .await
        .unwrap();

    let head = request.await.unwrap();
    assert!(head.starts_with("GET /anonymous-residential/latest.json.gz"));
}

#[tokio::test]
async fn multi_member_gzip_is_read_to_the_end() {
    // Large feed exports are concatenated gzip members; all of them count.
    let mut body = gzip("{\"a\":1}\n{\"a\":2}\n");
    body.extend(gzip("{\"a\":3}\n"));
    let (base_url, _request) = serve_once("200 OK", body).await;

    let reader = client_for(base_url).open(FeedKind::Anonymous).await.unwrap();
    let mut source = LineSource::new(reader);
    let mut count = 0;
    while source.next_line().await.unwrap().is_some() {
        count += 1;
    }
    assert_eq!(count, 3);
}

#[tokio::test]
async fn corrupt_body_surfaces_a_decode_error() {
    let (base_url, _request) = serve_once("200 OK", b"this is not gzip".to_vec()).await;

    let reader = client_for(base_url).open(FeedKind::Anonymous).await.unwrap();
    let mut source = LineSource::new(reader);
    let err = source.next_line().await.unwrap_err();
    assert!(matches!(err, FeedError::Decode(_)), "got {err}");
}

#[tokio::test]
async fn non_200_status_aborts_with_the_status_code() {
    let (base_url, _request) = serve_once("503 Service Unavailable", Vec::new()).await;

    let err = client_for(base_url)
        .open(FeedKind::Anonymous)
        .await
        .unwrap_err();
    match err {
        FeedError::Transport { status } => assert_eq!(status, 503),
        other => panic!("expected transport error, got {other}"),
    }
}

#[tokio::test]
async fn pipeline_end_to_end_over_http() {
    let body = gzip("{\"a\":1}\n{\"a\":2}\n{\"a\":3}\n{\"a\":4}\n{\"a\":5}\n");
    let (base_url, _request) = serve_once("200 OK", body).await;

    let reader = client_for(base_url).open(FeedKind::Anonymous).await.unwrap();
    let config = PipelineBuilder::new()
        .mode(ProcessingMode::Parallel)
        .batch_size(2)
        .max_workers(2)
        .build_config();
    let report = FeedPipeline::new(config, Arc::new(NoopProcessor))
        .run(reader)
        .await
        .unwrap();

    assert_eq!(report.lines_processed, 5);
    assert!(report.elapsed < Duration::from_secs(30));
}
