//! Runs the binary and checks how failures are reported.

use {
    serde_json::json,
    std::{io::Write, path::Path, process::Output},
    tempfile::NamedTempFile,
};

fn artifact(name: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let json = json!({ "contractName": name, "abi": [], "bytecode": "0x6080604052" });
    write!(file, "{json}").unwrap();
    file
}

fn bootstrap(node_url: &str, token: &Path, pbm: &Path) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_pbm-bootstrap"))
        .env_clear()
        .arg("--node-url")
        .arg(node_url)
        .arg("--token-artifact")
        .arg(token)
        .arg("--pbm-artifact")
        .arg(pbm)
        .output()
        .unwrap()
}

fn assert_failed(output: &Output) -> (String, String) {
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    assert_eq!(output.status.code(), Some(1), "stderr: {stderr}");
    assert!(stderr.contains("bootstrap failed"), "stderr: {stderr}");
    assert!(!stdout.contains("bootstrap failed"), "stdout: {stdout}");
    (stdout, stderr)
}

#[test]
fn missing_artifact_exits_with_error() {
    let pbm = artifact("PBM");

    let output = bootstrap(
        "http://127.0.0.1:1",
        Path::new("/nonexistent/Token.json"),
        pbm.path(),
    );

    let (_, stderr) = assert_failed(&output);
    assert!(stderr.contains("failed to load contract artifacts"));
}

#[test]
fn unreachable_node_exits_with_error() {
    let token = artifact("Token");
    let pbm = artifact("PBM");

    let output = bootstrap("http://127.0.0.1:1", token.path(), pbm.path());

    let (stdout, stderr) = assert_failed(&output);
    assert!(stderr.contains("step `fetch_accounts` failed"));
    assert!(stderr.contains("kind=Node"));
    assert!(stdout.contains("loaded contract artifacts"));
    assert!(stdout.contains("Token"));
}
