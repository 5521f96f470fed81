use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{LookupError, Release, ReleaseSource, parse_releases};

/// HTTP client of an endoflife.date compatible API.
///
/// Release lists are fetched from `{base_url}/{product}.json`.
pub struct EndOfLifeApi {
    client: reqwest::Client,
    base_url: String,
}

impl EndOfLifeApi {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("eolaudit/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn product_url(&self, product: &str) -> String {
        format!("{}/{product}.json", self.base_url)
    }
}

#[async_trait]
impl ReleaseSource for EndOfLifeApi {
    async fn releases(&self, product: &str) -> Result<Vec<Release>, LookupError> {
        let url = self.product_url(product);
        debug!("GET {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_releases(&body)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::EolField;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves a single HTTP response and reports the request head it received.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (head_tx, head_rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let mut read = 0;
            while read < buf.len() {
                let n = socket.read(&mut buf[read..]).await.unwrap();
                read += n;
                if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let _ = head_tx.send(String::from_utf8_lossy(&buf[..read]).into_owned());

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        (format!("http://{addr}/api/"), head_rx)
    }

    #[tokio::test]
    async fn fetches_product_release_list() {
        let (base, head) = serve_once(
            "HTTP/1.1 200 OK",
            r#"[{"cycle":"7","eol":"2024-06-30"},{"cycle":"8","eol":"2021-12-31"}]"#,
        )
        .await;
        let api = EndOfLifeApi::new(&base, Duration::from_secs(2)).unwrap();

        let releases = api.releases("centos").await.unwrap();
        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].eol, Some(EolField::Date("2024-06-30".into())));

        let head = head.await.unwrap();
        assert!(head.starts_with("GET /api/centos.json "), "unexpected request: {head}");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (base, _head) = serve_once("HTTP/1.1 404 Not Found", r#"{"error":"not found"}"#).await;
        let api = EndOfLifeApi::new(&base, Duration::from_secs(2)).unwrap();

        assert!(matches!(
            api.releases("nope").await,
            Err(LookupError::Status(404))
        ));
    }

    #[tokio::test]
    async fn garbage_payload_is_malformed() {
        let (base, _head) = serve_once("HTTP/1.1 200 OK", "<html>maintenance</html>").await;
        let api = EndOfLifeApi::new(&base, Duration::from_secs(2)).unwrap();

        assert!(matches!(
            api.releases("centos").await,
            Err(LookupError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn unexpected_entry_types_are_skipped() {
        let (base, _head) = serve_once(
            "HTTP/1.1 200 OK",
            r#"[{"cycle":"8","eol":1640908800},{"cycle":"7","eol":"2024-06-30"}]"#,
        )
        .await;
        let api = EndOfLifeApi::new(&base, Duration::from_secs(2)).unwrap();

        let releases = api.releases("centos").await.unwrap();
        assert_eq!(releases, vec![Release::new("7", Some(EolField::Date("2024-06-30".into())))]);
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let api = EndOfLifeApi::new(&format!("http://{addr}"), Duration::from_millis(200)).unwrap();
        assert!(matches!(
            api.releases("centos").await,
            Err(LookupError::Transport(_))
        ));
    }
}
