use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "gbnsim-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn count_kind(events: &[Value], kind: &str) -> usize {
    events
        .iter()
        .filter(|e| e["kind"]["kind"] == kind)
        .count()
}

#[test]
fn lossy_transfer_completes_and_writes_trace_json() {
    let dir = unique_temp_dir("lossy-transfer");
    let out_json = dir.join("trace.json");

    let output = Command::new(env!("CARGO_BIN_EXE_lossy_transfer"))
        .args([
            "--frames",
            "6",
            "--window-size",
            "4",
            "--drop",
            "2",
            "--timeout-us",
            "500",
            "--trace-json",
            out_json.to_str().expect("utf-8 path"),
        ])
        .output()
        .expect("run lossy_transfer");

    assert!(
        output.status.success(),
        "lossy_transfer failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("delivered=6/6"),
        "unexpected stdout: {stdout}"
    );
    assert!(stdout.contains("in_order=true"), "unexpected stdout: {stdout}");
    assert!(stdout.contains("finished=true"), "unexpected stdout: {stdout}");

    let json = fs::read_to_string(&out_json).expect("read trace json");
    let events: Vec<Value> = serde_json::from_str(&json).expect("parse trace json");

    assert!(!events.is_empty());
    assert_eq!(events[0]["kind"]["kind"], "meta");
    assert_eq!(events[0]["kind"]["window_size"], 4);

    // One delivery per payload, and the dropped frame forced at least
    // one timeout-driven retransmission.
    assert_eq!(count_kind(&events, "deliver"), 6);
    assert_eq!(count_kind(&events, "channel_drop"), 1);
    assert!(count_kind(&events, "timeout") >= 1);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn lossy_transfer_clean_channel_needs_no_retransmits() {
    let dir = unique_temp_dir("clean-transfer");
    let out_json = dir.join("trace.json");

    let output = Command::new(env!("CARGO_BIN_EXE_lossy_transfer"))
        .args([
            "--frames",
            "8",
            "--window-size",
            "4",
            "--trace-json",
            out_json.to_str().expect("utf-8 path"),
        ])
        .output()
        .expect("run lossy_transfer");

    assert!(
        output.status.success(),
        "lossy_transfer failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("delivered=8/8"), "unexpected stdout: {stdout}");

    let json = fs::read_to_string(&out_json).expect("read trace json");
    let events: Vec<Value> = serde_json::from_str(&json).expect("parse trace json");

    assert_eq!(count_kind(&events, "deliver"), 8);
    assert_eq!(count_kind(&events, "timeout"), 0);

    fs::remove_dir_all(&dir).ok();
}
