// src/job_extraction/mod.rs
//! Job post extraction: fetch, locate main content, segment, classify URLs, clean.

pub mod classifier;
pub mod cleaner;
pub mod error;
pub mod fetcher;
pub mod job_scraper;
pub mod rules;
pub mod segmenter;
pub mod structure;
pub mod types;

pub use error::{ClassificationError, FetchError, ScrapeError};
pub use job_scraper::{extract_job_post, JobScraper};
pub use rules::ExtractionRules;
pub use types::{FailureKind, JobFailure, JobPost, JobRecord, TITLE_NOT_FOUND};

#[cfg(test)]
pub(crate) mod test_server {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn reason(status: u16) -> &'static str {
        match status {
            200 => "OK",
            404 => "Not Found",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            503 => "Service Unavailable",
            _ => "Status",
        }
    }

    async fn read_request(stream: &mut TcpStream) {
        let mut buf = [0u8; 4096];
        let mut request = Vec::new();
        loop {
            match stream.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    request.extend_from_slice(&buf[..n]);
                    if request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
            }
        }
    }

    /// Serve canned `(status, body)` responses, one per connection; the last repeats.
    pub async fn serve(responses: Vec<(u16, String)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let (status, body) = responses
                    .get(n)
                    .or_else(|| responses.last())
                    .cloned()
                    .unwrap();
                tokio::spawn(async move {
                    read_request(&mut stream).await;
                    let response = format!(
                        "HTTP/1.1 {} {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        reason(status),
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        (format!("http://{}", addr), hits)
    }

    /// Accept connections and never answer them.
    pub async fn serve_silently() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                open.push(stream);
            }
        });

        format!("http://{}", addr)
    }
}
