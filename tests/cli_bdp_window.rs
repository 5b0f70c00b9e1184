use std::process::Command;

#[test]
fn bdp_window_prints_recommendation() {
    let output = Command::new(env!("CARGO_BIN_EXE_bdp_window"))
        .args([
            "--bandwidth-bps",
            "1000000",
            "--delay-us",
            "100000",
            "--frame-bits",
            "8192",
        ])
        .output()
        .expect("run bdp_window");

    assert!(
        output.status.success(),
        "bdp_window failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("recommended window_size = 27 (max_seq = 26)"),
        "unexpected stdout: {stdout}"
    );
}
