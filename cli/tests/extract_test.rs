//! End-to-end tests for the `cfptext` binary.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::process::Command;
use std::thread;

use serde_json::{json, Value};

/// Answer one extraction request with a fixed pairs payload.
fn spawn_service(pairs: &'static str) -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap().to_string();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut writer = stream;

        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let request: Value = serde_json::from_str(&line).unwrap();

        let mut answer = json!({ "id": request["id"], "data": pairs }).to_string();
        answer.push('\n');
        writer.write_all(answer.as_bytes()).unwrap();
    });

    (address, handle)
}

#[test]
fn test_extract_stdout_is_json_only() {
    let (address, service) = spawn_service(r#"[["deadlineName","Papers"],["deadline","Jan 1"]]"#);

    let mut page = tempfile::Builder::new().suffix(".html").tempfile().unwrap();
    write!(page, "<html><body><ul><li>Deadline</li></ul></body></html>").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_cfptext"))
        .arg("extract")
        .arg(page.path())
        .args(["--addr", &address, "--compact"])
        .env("NO_COLOR", "1")
        .output()
        .unwrap();
    service.join().unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let groups: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(groups, json!({ "deadline": [{ "name": "Papers", "date": "Jan 1" }] }));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("1 records in 1 date-types"));
}
