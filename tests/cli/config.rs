use anyhow::Result;

use crate::{CliTest, USER_PB_GO, run, stderr};

#[test]
fn test_config_file_drives_run() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".injecttagrc.json",
        r#"{
            "dirs": ["api"],
            "ignores": ["**/legacy/**"],
            "xxxSkip": ["XXX_sizecache"],
            "withClean": true
        }"#,
    )?;
    test.write_file("api/user.pb.go", USER_PB_GO)?;
    test.write_file("api/legacy/user.pb.go", USER_PB_GO)?;

    let output = run(&mut test.command())?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let user = test.read_file("api/user.pb.go")?;
    assert!(!user.contains("@inject_tag"));
    assert!(user.contains("XXX_sizecache int32 `json:\"-\" XXX_sizecache:\"-\"`"));

    assert_eq!(test.read_file("api/legacy/user.pb.go")?, USER_PB_GO);
    Ok(())
}

#[test]
fn test_cli_flags_override_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".injecttagrc.json",
        r#"{ "dirs": ["api"], "xxxSkip": ["XXX_sizecache"] }"#,
    )?;
    test.write_file("api/user.pb.go", USER_PB_GO)?;
    test.write_file("other/user.pb.go", USER_PB_GO)?;

    let mut cmd = test.command();
    cmd.args(["--input", "other/user.pb.go", "--XXX_skip", "XXX_unrecognized"]);
    let output = run(&mut cmd)?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let other = test.read_file("other/user.pb.go")?;
    assert!(other.contains("XXX_sizecache int32 `json:\"-\" XXX_unrecognized:\"-\"`"));
    assert_eq!(test.read_file("api/user.pb.go")?, USER_PB_GO);
    Ok(())
}

#[test]
fn test_explicit_config_path() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("conf/inject.json", r#"{ "dirs": ["api"], "withClean": true }"#)?;
    test.write_file("api/user.pb.go", USER_PB_GO)?;

    let mut cmd = test.command();
    cmd.args(["--config", "conf/inject.json"]);
    let output = run(&mut cmd)?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert!(!test.read_file("api/user.pb.go")?.contains("@inject_tag"));
    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".injecttagrc.json", r#"{ "ignores": ["[oops"] }"#)?;
    test.write_file("api/user.pb.go", USER_PB_GO)?;

    let mut cmd = test.command();
    cmd.args(["--input", "api/user.pb.go"]);
    let output = run(&mut cmd)?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid glob pattern in 'ignores'"));
    assert_eq!(test.read_file("api/user.pb.go")?, USER_PB_GO);
    Ok(())
}
