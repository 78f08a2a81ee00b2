//! End-to-end tests of the `enigma` binary.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn conf(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("conf").join(name)
}

fn run_with_stdin(args: &[PathBuf], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_enigma"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn converts_input_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_enigma"))
        .arg(conf("default.conf"))
        .arg(conf("hiawatha.in"))
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "QVPQS OKOIL PUBKJ ZPISF XDW\n\
         BHCNS CXNUO AATZX SRCFY DGU\n\
         FLPNX GXIXT YJUJR CAUGE UNCFM KUF\n"
    );
}

#[test]
fn reads_standard_input() {
    let output = run_with_stdin(
        &[conf("default.conf")],
        "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)\nQVPQS OKOIL PUBKJ ZPISF XDW\n",
    );
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "FROMH ISSHO ULDER HIAWA THA\n"
    );
}

#[test]
fn message_before_setup_fails() {
    let output = run_with_stdin(&[conf("default.conf")], "HELLO\n");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("Error:"), "{}", stderr);
    assert!(stderr.contains("not set up"), "{}", stderr);
}

#[test]
fn missing_configuration_fails() {
    let output = run_with_stdin(&[conf("no-such.conf")], "");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("could not open"), "{}", stderr);
}
