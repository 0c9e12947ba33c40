//! Minimal HTTP/1.1 server for integration tests: HEAD plus ranged GET over one static body.
//!
//! One request per connection; the connection is closed after each response.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RangeServerOptions {
    /// If false, HEAD returns 405.
    pub head_allowed: bool,
    /// If false, HEAD omits Content-Length.
    pub send_length: bool,
    /// If false, GET ignores Range and answers 200 with the whole body.
    pub support_ranges: bool,
    /// The first N GETs send their headers and half the body, then hang up.
    pub cut_first_gets: usize,
}

impl Default for RangeServerOptions {
    fn default() -> Self {
        Self {
            head_allowed: true,
            send_length: true,
            support_ranges: true,
            cut_first_gets: 0,
        }
    }
}

/// Handle to a running server. The listener thread lives until the process exits.
pub struct RangeServer {
    pub url: String,
    gets: Arc<AtomicUsize>,
}

impl RangeServer {
    /// GET requests received so far.
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

pub fn start(body: Vec<u8>) -> RangeServer {
    start_with_options(body, RangeServerOptions::default())
}

pub fn start_with_options(body: Vec<u8>, opts: RangeServerOptions) -> RangeServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let gets = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&gets);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let counter = Arc::clone(&counter);
            thread::spawn(move || handle(stream, &body, opts, &counter));
        }
    });
    RangeServer {
        url: format!("http://127.0.0.1:{}/files/data.bin", port),
        gets,
    }
}

fn handle(mut stream: TcpStream, body: &[u8], opts: RangeServerOptions, gets: &AtomicUsize) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let (method, range) = parse_request(request);
    let total = body.len() as u64;

    if method.eq_ignore_ascii_case("HEAD") {
        if !opts.head_allowed {
            let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
            return;
        }
        let length = if opts.send_length {
            format!("Content-Length: {}\r\n", total)
        } else {
            String::new()
        };
        let response = format!("HTTP/1.1 200 OK\r\n{}Accept-Ranges: bytes\r\n\r\n", length);
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }

    let nth = gets.fetch_add(1, Ordering::SeqCst);
    let (status, slice, content_range) = match range.filter(|_| opts.support_ranges) {
        Some((first, last)) if first < total => {
            let last = last.min(total - 1);
            let slice = &body[first as usize..=last as usize];
            (
                "206 Partial Content",
                slice,
                format!("Content-Range: bytes {}-{}/{}\r\n", first, last, total),
            )
        }
        Some(_) => (
            "416 Range Not Satisfiable",
            &body[0..0],
            format!("Content-Range: bytes */{}\r\n", total),
        ),
        None => ("200 OK", body, String::new()),
    };

    let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        status,
        slice.len(),
        content_range
    );
    let _ = stream.write_all(head.as_bytes());
    if nth < opts.cut_first_gets {
        let _ = stream.write_all(&slice[..slice.len() / 2]);
        let _ = stream.flush();
        return;
    }
    let _ = stream.write_all(slice);
}

/// Returns (method, `Range: bytes=first-last` if present).
fn parse_request(request: &str) -> (&str, Option<(u64, u64)>) {
    let mut lines = request.lines();
    let method = lines
        .next()
        .and_then(|l| l.split_whitespace().next())
        .unwrap_or("");
    let range = lines
        .take_while(|l| !l.trim().is_empty())
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("range"))
        .and_then(|(_, value)| value.trim().strip_prefix("bytes="))
        .and_then(|spec| spec.split_once('-'))
        .and_then(|(a, b)| {
            let first = a.trim().parse().ok()?;
            let last = match b.trim() {
                "" => u64::MAX,
                end => end.parse().ok()?,
            };
            Some((first, last))
        });
    (method, range)
}
