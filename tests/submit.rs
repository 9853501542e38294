// tests/submit.rs
//
// Request builder against a local one-shot HTTP server.
//
use std::fs;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use fetch_mlst::config::options::{NetOptions, ProxySetting, RunOptions, Source};
use fetch_mlst::core::net::{submit, SubmissionRequest};
use fetch_mlst::{runner, MlstError};

/// Accept one connection, capture the request, answer with `status` and `body`.
fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream.set_read_timeout(Some(Duration::from_secs(10))).unwrap();
        let request = read_request(&mut stream);
        let resp = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(resp.as_bytes());
        request
    });
    (format!("http://{addr}/bigsdb"), handle)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let n = match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
        if request_complete(&buf) {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&buf[..head_end]).to_ascii_lowercase();
    let body_len = buf.len() - (head_end + 4);
    if let Some(len) = head.lines().find_map(|l| l.strip_prefix("content-length:")) {
        return body_len >= len.trim().parse::<usize>().unwrap_or(0);
    }
    if head.contains("transfer-encoding: chunked") {
        return buf.ends_with(b"0\r\n\r\n");
    }
    true
}

fn direct(endpoint: &str) -> NetOptions {
    NetOptions {
        endpoint: endpoint.to_string(),
        proxy: ProxySetting::Disabled,
        timeout: Duration::from_secs(20),
    }
}

fn write_fasta(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("genome.fasta");
    fs::write(&path, ">contig_1\nACGTACGTTTGA\n").unwrap();
    path
}

#[test]
fn posts_multipart_form_with_fixed_fields() {
    let dir = tempfile::tempdir().unwrap();
    let fasta = write_fasta(dir.path());
    let (url, server) = serve_once("200 OK", "<html><body>ok</body></html>".into());

    let body = submit(&SubmissionRequest::new(&fasta, "cdifficile"), &direct(&url)).unwrap();
    assert_eq!(body, "<html><body>ok</body></html>");

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /bigsdb HTTP/1.1\r\n"), "{request}");
    assert!(request.to_ascii_lowercase().contains("content-type: multipart/form-data; boundary="));
    for (name, value) in [
        ("db", "pubmlst_cdifficile_seqdef"),
        ("page", "sequenceQuery"),
        ("locus", "SCHEME_1"),
        ("order", "locus"),
        ("submit", "submit"),
    ] {
        let field = format!("name=\"{name}\"\r\n\r\n{value}\r\n");
        assert!(request.contains(&field), "missing field {name}: {request}");
    }
    assert!(request.contains("name=\"fasta_upload\"; filename=\"genome.fasta\""));
    assert!(request.contains(">contig_1\nACGTACGTTTGA\n"));
}

#[test]
fn non_2xx_is_transport_error() {
    let dir = tempfile::tempdir().unwrap();
    let fasta = write_fasta(dir.path());
    let (url, server) = serve_once("500 Internal Server Error", "boom".into());

    let err = submit(&SubmissionRequest::new(&fasta, "mlst"), &direct(&url)).unwrap_err();
    assert!(matches!(err, MlstError::Transport { .. }), "{err:?}");
    server.join().unwrap();
}

#[test]
fn refused_connection_is_transport_error() {
    let dir = tempfile::tempdir().unwrap();
    let fasta = write_fasta(dir.path());
    // Bind then drop to get a port nobody listens on.
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let url = format!("http://127.0.0.1:{port}/bigsdb");

    let err = submit(&SubmissionRequest::new(&fasta, "mlst"), &direct(&url)).unwrap_err();
    assert!(matches!(err, MlstError::Transport { .. }), "{err:?}");
}

#[test]
fn configured_proxy_receives_the_request() {
    let dir = tempfile::tempdir().unwrap();
    let fasta = write_fasta(dir.path());
    let (proxy_url, server) = serve_once("200 OK", "proxied".into());
    let proxy_hostport = proxy_url.trim_start_matches("http://").trim_end_matches("/bigsdb");

    let net = NetOptions {
        endpoint: "http://pubmlst.invalid/bigsdb".to_string(),
        proxy: ProxySetting::from_arg(proxy_hostport),
        timeout: Duration::from_secs(20),
    };
    let body = submit(&SubmissionRequest::new(&fasta, "mlst"), &net).unwrap();
    assert_eq!(body, "proxied");

    let request = server.join().unwrap();
    assert!(request.starts_with("POST http://pubmlst.invalid/bigsdb HTTP/1.1\r\n"), "{request}");
}

#[test]
fn end_to_end_upload_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let fasta = write_fasta(dir.path());
    let page = fs::read_to_string(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cdifficile_st.html"),
    )
    .unwrap();
    let (url, server) = serve_once("200 OK", page);

    let out = dir.path().join("report.tsv");
    let mut opts = RunOptions::new(Source::Upload(fasta), &out, "cdifficile");
    opts.net = direct(&url);
    let summary = runner::run(&opts).unwrap();
    server.join().unwrap();

    assert_eq!(summary.type_rows, Some(3));
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("Locus\tAllele\tLength\tContig\nadk\t1\t501\tcontig_12\n"));
    assert!(text.contains("\nMLST\n\nST\t2\n"));
}

#[test]
fn failed_upload_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let fasta = write_fasta(dir.path());
    let (url, server) = serve_once("404 Not Found", "gone".into());

    let out = dir.path().join("report.tsv");
    let mut opts = RunOptions::new(Source::Upload(fasta), &out, "cdifficile");
    opts.net = direct(&url);
    assert!(matches!(runner::run(&opts), Err(MlstError::Transport { .. })));
    server.join().unwrap();
    assert!(!out.exists());
}
