use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

/// Run the binary with an isolated HOME and `stdin` piped in.
fn run_patchgen(home: &Path, args: &[&str], stdin: &[u8]) -> Output {
    run_patchgen_with_env(home, args, stdin, &[])
}

/// Like [`run_patchgen`], with extra environment variables set on the child.
fn run_patchgen_with_env(
    home: &Path,
    args: &[&str],
    stdin: &[u8],
    envs: &[(&str, &str)],
) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_patchgen"))
        .args(args)
        .env("HOME", home)
        .env_remove("PATCHGEN_TOPIC")
        .env_remove("PATCHGEN_PIPELINE")
        .env_remove("RUST_LOG")
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|err| panic!("failed to execute patchgen binary: {err}"));

    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(stdin)
        .expect("write stdin");

    child.wait_with_output().expect("wait for patchgen")
}

fn stdout_json(output: &Output) -> Value {
    if !output.status.success() {
        panic!(
            "patchgen failed (status={}):\nstderr:\n{}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    serde_json::from_slice(&output.stdout).unwrap_or_else(|err| {
        panic!(
            "stdout is not valid JSON: {err}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn synthesizes_from_stdin_with_default_topic() {
    let home = tempfile::tempdir().expect("tempdir");
    let output = run_patchgen(home.path(), &["generate"], b"  notes from the lab  ");

    assert!(output.stdout.ends_with(b"}\n"));
    let json = stdout_json(&output);
    let patch = &json["patches"][0];
    assert_eq!(patch["patch/topic"], "untitled-topic");
    assert_eq!(patch["patch/facts"][0]["claim/text"], "notes from the lab");
    assert!(
        patch["db/id"]
            .as_str()
            .unwrap()
            .starts_with("untitled-topic-")
    );
}

#[test]
fn physics_transcript_file_to_out_file() {
    let home = tempfile::tempdir().expect("tempdir");
    let transcript = home.path().join("lecture.txt");
    let out = home.path().join("patches.json");
    std::fs::write(&transcript, "  gravity pulls objects together  ").expect("write transcript");

    let output = run_patchgen(
        home.path(),
        &[
            "generate",
            "--topic",
            "physics-101",
            "--transcript",
            transcript.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ],
        b"",
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());

    let json: Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
    let patches = json["patches"].as_array().unwrap();
    assert_eq!(patches.len(), 1);

    let patch = &patches[0];
    assert_eq!(patch["patch/topic"], "physics-101");
    assert_eq!(patch["patch/focus-question"], "What did physics-101 learn?");
    assert_eq!(patch["patch/confidence"], 0.35);
    assert_eq!(patch["patch/facts"][0]["claim/text"], "gravity pulls objects together");
    assert_eq!(patch["patch/edges"][0]["edge/from"], "physics-101-claim-a");
    assert_eq!(patch["patch/edges"][0]["edge/to"], "physics-101");
    assert_eq!(patch["patch/edges"][0]["edge/relation"], "patch/asserts");
}

#[cfg(unix)]
#[test]
fn pipeline_output_is_passed_through() {
    let home = tempfile::tempdir().expect("tempdir");
    let output = run_patchgen(
        home.path(),
        &["generate", "--topic", "chem", "--pipeline", "cat"],
        b"titration",
    );

    let json = stdout_json(&output);
    assert_eq!(json["topic"], "chem");
    assert_eq!(json["transcript"], "titration");
    assert!(json["id"].as_str().unwrap().starts_with("chem-"));
    assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[cfg(unix)]
#[test]
fn failing_pipeline_exits_nonzero_without_output() {
    let home = tempfile::tempdir().expect("tempdir");
    let output = run_patchgen(home.path(), &["generate", "--pipeline", "false"], b"x");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("pipeline execution failed"));
}

#[test]
fn missing_transcript_file_exits_nonzero() {
    let home = tempfile::tempdir().expect("tempdir");
    let missing = home.path().join("absent.txt");
    let output = run_patchgen(
        home.path(),
        &["generate", "--transcript", missing.to_str().unwrap()],
        b"",
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read transcript"));
}

#[cfg(unix)]
#[test]
fn config_file_supplies_topic_and_pipeline() {
    let home = tempfile::tempdir().expect("tempdir");
    let config = home.path().join("custom.toml");
    std::fs::write(
        &config,
        "[defaults]\ntopic = \"from-config\"\n\n[pipeline]\ncommand = \"cat\"\n",
    )
    .expect("write config");

    let output = run_patchgen(
        home.path(),
        &["--config", config.to_str().unwrap(), "generate"],
        b"hello",
    );
    let json = stdout_json(&output);
    assert_eq!(json["topic"], "from-config");
    assert_eq!(json["transcript"], "hello");

    // An explicit empty pipeline overrides the config and synthesizes locally.
    let output = run_patchgen(
        home.path(),
        &["--config", config.to_str().unwrap(), "generate", "--pipeline", ""],
        b"hello",
    );
    let json = stdout_json(&output);
    assert_eq!(json["patches"][0]["patch/topic"], "from-config");
}

#[test]
fn config_init_then_show() {
    let home = tempfile::tempdir().expect("tempdir");

    let output = run_patchgen(home.path(), &["config", "init"], b"");
    assert!(output.status.success());
    assert!(home.path().join(".patchgen/patchgen.toml").exists());

    let output = run_patchgen(home.path(), &["config", "show"], b"");
    assert!(output.status.success());
    let shown = String::from_utf8_lossy(&output.stdout);
    assert!(shown.contains("untitled-topic"));
}

#[test]
fn config_init_honors_explicit_path() {
    let home = tempfile::tempdir().expect("tempdir");
    let custom = home.path().join("custom.toml");
    let custom_arg = custom.to_str().unwrap();

    let output = run_patchgen(home.path(), &["--config", custom_arg, "config", "init"], b"");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(custom.exists());
    assert!(!home.path().join(".patchgen/patchgen.toml").exists());

    let output = run_patchgen(home.path(), &["--config", custom_arg, "config", "show"], b"");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("untitled-topic"));
}

#[test]
fn env_topic_sits_between_flag_and_config() {
    let home = tempfile::tempdir().expect("tempdir");
    let config = home.path().join("custom.toml");
    std::fs::write(&config, "[defaults]\ntopic = \"from-config\"\n").expect("write config");
    let config_arg = config.to_str().unwrap();
    let env = [("PATCHGEN_TOPIC", "from-env")];

    let output =
        run_patchgen_with_env(home.path(), &["--config", config_arg, "generate"], b"x", &env);
    let json = stdout_json(&output);
    assert_eq!(json["patches"][0]["patch/topic"], "from-env");

    let output = run_patchgen_with_env(
        home.path(),
        &["--config", config_arg, "generate", "--topic", "from-flag"],
        b"x",
        &env,
    );
    let json = stdout_json(&output);
    assert_eq!(json["patches"][0]["patch/topic"], "from-flag");
}

#[cfg(unix)]
#[test]
fn env_pipeline_overrides_config_and_yields_to_flag() {
    let home = tempfile::tempdir().expect("tempdir");
    let config = home.path().join("custom.toml");
    std::fs::write(&config, "[pipeline]\ncommand = \"false\"\n").expect("write config");
    let config_arg = config.to_str().unwrap();
    let env = [("PATCHGEN_PIPELINE", "cat")];

    let output = run_patchgen_with_env(
        home.path(),
        &["--config", config_arg, "generate", "--topic", "chem"],
        b"titration",
        &env,
    );
    let json = stdout_json(&output);
    assert_eq!(json["topic"], "chem");
    assert_eq!(json["transcript"], "titration");

    // An explicit empty flag beats the env command and synthesizes locally.
    let output = run_patchgen_with_env(
        home.path(),
        &["--config", config_arg, "generate", "--topic", "chem", "--pipeline", ""],
        b"titration",
        &env,
    );
    let json = stdout_json(&output);
    assert_eq!(json["patches"][0]["patch/topic"], "chem");
}
