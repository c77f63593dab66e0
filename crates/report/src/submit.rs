//! Fire-and-forget score submission.
//!
//! Bridges the synchronous game loop with an async HTTP client: the reporter
//! owns a tokio runtime and every [`ScoreReporter::submit`] call spawns one
//! POST onto it. Failures are logged and dropped; nothing is retried and
//! nothing reaches the player.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request, StatusCode, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tokio::runtime::{self, Runtime};
use tokio::task::JoinHandle;

/// Request body sent to the collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    #[serde(rename = "playerId")]
    pub player_id: String,
    pub score: u32,
}

impl ScoreReport {
    pub fn new(player_id: impl Into<String>, score: u32) -> Self {
        Self {
            player_id: player_id.into(),
            score,
        }
    }
}

#[derive(Debug)]
pub enum SubmitError {
    InvalidUrl(hyper::http::uri::InvalidUri),
    Runtime(std::io::Error),
    Encode(serde_json::Error),
    Build(hyper::http::Error),
    Request(hyper_util::client::legacy::Error),
    Body(hyper::Error),
    /// Collector answered with a non-success status.
    Status(StatusCode),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::InvalidUrl(e) => write!(f, "invalid score url: {e}"),
            SubmitError::Runtime(e) => write!(f, "could not start reporter runtime: {e}"),
            SubmitError::Encode(e) => write!(f, "could not encode score: {e}"),
            SubmitError::Build(e) => write!(f, "could not build request: {e}"),
            SubmitError::Request(e) => write!(f, "request failed: {e}"),
            SubmitError::Body(e) => write!(f, "reading response failed: {e}"),
            SubmitError::Status(s) => write!(f, "collector returned {s}"),
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<serde_json::Error> for SubmitError {
    fn from(err: serde_json::Error) -> Self {
        SubmitError::Encode(err)
    }
}

impl From<hyper::http::Error> for SubmitError {
    fn from(err: hyper::http::Error) -> Self {
        SubmitError::Build(err)
    }
}

impl From<hyper_util::client::legacy::Error> for SubmitError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        SubmitError::Request(err)
    }
}

impl From<hyper::Error> for SubmitError {
    fn from(err: hyper::Error) -> Self {
        SubmitError::Body(err)
    }
}

type HttpClient = Client<HttpConnector, Full<Bytes>>;

/// Running reporter instance.
pub struct ScoreReporter {
    rt: Runtime,
    client: HttpClient,
    uri: Uri,
    pending: Vec<JoinHandle<()>>,
}

impl ScoreReporter {
    /// Validate `url` and start the background runtime.
    pub fn start(url: &str) -> Result<Self, SubmitError> {
        let uri: Uri = url.parse().map_err(SubmitError::InvalidUrl)?;
        let rt = runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("dropstack-report")
            .enable_all()
            .build()
            .map_err(SubmitError::Runtime)?;
        let client = Client::builder(TokioExecutor::new()).build_http();
        Ok(Self {
            rt,
            client,
            uri,
            pending: Vec::new(),
        })
    }

    /// Queue one POST and return immediately.
    pub fn submit(&mut self, report: ScoreReport) {
        self.pending.retain(|h| !h.is_finished());
        let client = self.client.clone();
        let uri = self.uri.clone();
        let handle = self.rt.spawn(async move {
            match post(&client, uri, &report).await {
                Ok(()) => info!(
                    "Submitted score {} for {}",
                    report.score, report.player_id
                ),
                Err(e) => warn!("Score submission dropped: {e}"),
            }
        });
        self.pending.push(handle);
    }

    /// Requests spawned and not yet finished.
    pub fn in_flight(&self) -> usize {
        self.pending.iter().filter(|h| !h.is_finished()).count()
    }

    /// Wait up to `grace` for in-flight requests. Called on quit so the
    /// last score is not cancelled with the runtime.
    pub fn flush(&mut self, grace: Duration) {
        let pending: Vec<_> = self.pending.drain(..).collect();
        if pending.is_empty() {
            return;
        }
        self.rt.block_on(async move {
            let all = async {
                for handle in pending {
                    let _ = handle.await;
                }
            };
            if tokio::time::timeout(grace, all).await.is_err() {
                warn!("Gave up waiting for score submissions after {grace:?}");
            }
        });
    }
}

async fn post(client: &HttpClient, uri: Uri, report: &ScoreReport) -> Result<(), SubmitError> {
    let body = serde_json::to_vec(report)?;
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body)))?;

    let response = client.request(request).await?;
    let status = response.status();
    // Drain so the connection can go back to the pool.
    response.into_body().collect().await?;

    if status.is_success() {
        Ok(())
    } else {
        Err(SubmitError::Status(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    /// Accept one request, answer 200, and hand back (request line, body).
    fn one_shot_server() -> (String, mpsc::Receiver<(String, String)>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone"));

            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("request line");

            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("header");
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().expect("length");
                    }
                }
            }

            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).expect("body");

            let mut stream = stream;
            stream
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                .expect("respond");

            let _ = tx.send((
                request_line.trim_end().to_string(),
                String::from_utf8(body).expect("utf8"),
            ));
        });

        (format!("http://{addr}/score"), rx)
    }

    #[test]
    fn report_serializes_with_camel_case_id() {
        let json = serde_json::to_string(&ScoreReport::new("player-x-1", 900)).unwrap();
        assert_eq!(json, r#"{"playerId":"player-x-1","score":900}"#);
    }

    #[test]
    fn start_rejects_garbage_url() {
        assert!(matches!(
            ScoreReporter::start("not a url"),
            Err(SubmitError::InvalidUrl(_))
        ));
    }

    #[test]
    fn submit_posts_json_to_collector() {
        let (url, rx) = one_shot_server();
        let mut reporter = ScoreReporter::start(&url).expect("start");

        reporter.submit(ScoreReport::new("player-abc-00000000", 1200));

        let (request_line, body) = rx.recv_timeout(Duration::from_secs(5)).expect("request");
        assert_eq!(request_line, "POST /score HTTP/1.1");
        let report: ScoreReport = serde_json::from_str(&body).expect("json");
        assert_eq!(report, ScoreReport::new("player-abc-00000000", 1200));
    }

    #[test]
    fn submit_to_dead_endpoint_does_not_panic() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let mut reporter = ScoreReporter::start(&format!("http://{addr}/score")).expect("start");
        reporter.submit(ScoreReport::new("p", 1));
        reporter.flush(Duration::from_secs(5));
        assert_eq!(reporter.in_flight(), 0);
    }
}
