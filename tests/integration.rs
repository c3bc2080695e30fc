use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tempfile::TempDir;

use rook_file_server::Server;
use rook_file_server::config::ServerConfig;

const LOGIN: &str = "alice";
const PASSWORD: &str = "alice123";

fn test_config(root: &TempDir) -> ServerConfig {
    ServerConfig {
        bind_address: "127.0.0.1".to_string(),
        port: 0,
        root_dir: root.path().to_string_lossy().to_string(),
        login: LOGIN.to_string(),
        password: PASSWORD.to_string(),
        max_upload_mb: 8,
    }
}

// Runs the server on an ephemeral port in a background thread and returns
// the bound address once the listener is up.
fn start_test_server(config: ServerConfig) -> SocketAddr {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("runtime");
        runtime.block_on(async move {
            let server = Server::new(config).await;
            tx.send(server.local_addr().expect("local addr")).unwrap();
            server.start().await;
        });
    });

    rx.recv_timeout(Duration::from_secs(5)).expect("server start")
}

// Sends raw request bytes and reads the full response; the server closes
// the connection after each response.
fn send_request(addr: SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream.write_all(raw).expect("write request");
    stream.flush().expect("flush");

    let mut response = Vec::new();
    stream.read_to_end(&mut response).expect("read response");
    String::from_utf8_lossy(&response).to_string()
}

fn auth_header() -> String {
    format!(
        "Authorization: Basic {}",
        STANDARD.encode(format!("{}:{}", LOGIN, PASSWORD))
    )
}

fn get(addr: SocketAddr, path: &str) -> String {
    let raw = format!(
        "GET {} HTTP/1.1\r\nHost: localhost\r\n{}\r\n\r\n",
        path,
        auth_header()
    );
    send_request(addr, raw.as_bytes())
}

fn upload(addr: SocketAddr, path: &str, filename: &str, content: &[u8]) -> String {
    let boundary = "XBOUNDARY";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    let mut raw = format!(
        "POST {} HTTP/1.1\r\nHost: localhost\r\n{}\r\n\
         Content-Type: multipart/form-data; boundary={}\r\n\
         Content-Length: {}\r\n\r\n",
        path,
        auth_header(),
        boundary,
        body.len()
    )
    .into_bytes();
    raw.extend_from_slice(&body);
    send_request(addr, &raw)
}

#[test]
fn test_upload_then_list() {
    let root = TempDir::new().unwrap();
    let addr = start_test_server(test_config(&root));

    let response = upload(addr, "/files/upload-file/a/b", "x.txt", b"hi");
    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains("Success"));
    assert_eq!(std::fs::read(root.path().join("a/b/x.txt")).unwrap(), b"hi");

    let response = get(addr, "/files/get-file/a/b/");
    assert!(response.starts_with("HTTP/1.1 200 OK"));
    let parent = response.find(">..</a>").expect("parent entry");
    let file = response.find(">x.txt</a>").expect("file entry");
    assert!(parent < file, "parent entry must come first");
}

#[test]
fn test_upload_replaces_existing_file() {
    let root = TempDir::new().unwrap();
    let addr = start_test_server(test_config(&root));

    upload(addr, "/files/upload-file/docs", "note.txt", b"old");
    let response = upload(addr, "/files/upload-file/docs", "note.txt", b"new");
    assert!(response.contains("Success"));
    assert_eq!(
        std::fs::read(root.path().join("docs/note.txt")).unwrap(),
        b"new"
    );
}

#[test]
fn test_upload_traversal_rejected() {
    let root = TempDir::new().unwrap();
    let addr = start_test_server(test_config(&root));

    let response = upload(addr, "/files/upload-file/../../etc", "x.txt", b"hi");
    assert!(response.starts_with("HTTP/1.1 400"));
    assert!(response.contains("Failed: wrong filepath"));
    assert!(!root.path().join("../etc/x.txt").exists());
}

#[test]
fn test_listing_traversal_renders_error_page() {
    let root = TempDir::new().unwrap();
    let addr = start_test_server(test_config(&root));

    let response = get(addr, "/files/get-file/../../etc");
    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains("Wrong directory path"));
    assert!(!response.contains("<li>"));
}

#[test]
fn test_listing_empty_path_renders_error_page() {
    let root = TempDir::new().unwrap();
    let addr = start_test_server(test_config(&root));

    let response = get(addr, "/files/get-file/");
    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains("No directory set"));
}

#[test]
fn test_markup_document_served_raw() {
    let root = TempDir::new().unwrap();
    std::fs::write(root.path().join("page.html"), "<h1>raw document</h1>").unwrap();
    let addr = start_test_server(test_config(&root));

    let response = get(addr, "/files/get-file/page.html");
    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains("<h1>raw document</h1>"));
    assert!(!response.contains("Index of"));
}

#[test]
fn test_missing_credentials_challenged() {
    let root = TempDir::new().unwrap();
    let addr = start_test_server(test_config(&root));

    let response = send_request(
        addr,
        b"GET /files/get-file/ HTTP/1.1\r\nHost: localhost\r\n\r\n",
    );
    assert!(response.starts_with("HTTP/1.1 401"));
    assert!(response.contains("WWW-Authenticate: Basic"));
}

#[test]
fn test_wrong_credentials_challenged() {
    let root = TempDir::new().unwrap();
    let addr = start_test_server(test_config(&root));

    let raw = format!(
        "GET /files/get-file/ HTTP/1.1\r\nHost: localhost\r\nAuthorization: Basic {}\r\n\r\n",
        STANDARD.encode("alice:wrong")
    );
    let response = send_request(addr, raw.as_bytes());
    assert!(response.starts_with("HTTP/1.1 401"));
    assert!(response.contains("Incorrect username or password"));
}

#[test]
fn test_docs_require_credentials() {
    let root = TempDir::new().unwrap();
    let addr = start_test_server(test_config(&root));

    let response = send_request(addr, b"GET /openapi.json HTTP/1.1\r\nHost: localhost\r\n\r\n");
    assert!(response.starts_with("HTTP/1.1 401"));

    let response = get(addr, "/openapi.json");
    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains("/files/upload-file/{file_path}"));
}

#[test]
fn test_unknown_route_is_not_found() {
    let root = TempDir::new().unwrap();
    let addr = start_test_server(test_config(&root));

    let response = get(addr, "/nope");
    assert!(response.starts_with("HTTP/1.1 404"));
}

#[test]
fn test_malformed_request_line_rejected() {
    let root = TempDir::new().unwrap();
    let addr = start_test_server(test_config(&root));

    let response = send_request(addr, b"NONSENSE\r\n\r\n");
    assert!(response.starts_with("HTTP/1.1 400"));
}
