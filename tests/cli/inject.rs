use anyhow::Result;
use insta::assert_snapshot;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, USER_PB_GO, run, stderr, stdout};

#[test]
fn test_input_file() -> Result<()> {
    let test = CliTest::with_file("api/user.pb.go", USER_PB_GO)?;

    let mut cmd = test.command();
    cmd.args(["--input", "api/user.pb.go"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    ");

    assert_snapshot!(test.read_file("api/user.pb.go")?, @r#"
package api

type User struct {
	state protoimpl.MessageState

	// @inject_tag: validate:"required"
	Name string `protobuf:"bytes,1,opt,name=name,proto3" json:"name,omitempty" validate:"required"`
	// Email address.
	// @inject_tag: db:"email" json:"mail"
	Email string `protobuf:"bytes,2,opt,name=email,proto3" json:"mail" db:"email"`
	XXX_unrecognized []byte `json:"-"`
	XXX_sizecache int32 `json:"-"`
}
"#);
    Ok(())
}

#[test]
fn test_input_file_with_clean_and_skip() -> Result<()> {
    let test = CliTest::with_file("api/user.pb.go", USER_PB_GO)?;

    let mut cmd = test.command();
    cmd.args([
        "--input",
        "api/user.pb.go",
        "--XXX_skip",
        "XXX_unrecognized,XXX_sizecache",
        "--with_clean",
    ]);
    let output = run(&mut cmd)?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_snapshot!(test.read_file("api/user.pb.go")?, @r#"
package api

type User struct {
	state protoimpl.MessageState

	Name string `protobuf:"bytes,1,opt,name=name,proto3" json:"name,omitempty" validate:"required"`
	// Email address.
	Email string `protobuf:"bytes,2,opt,name=email,proto3" json:"mail" db:"email"`
	XXX_unrecognized []byte `json:"-" XXX_unrecognized:"-" XXX_sizecache:"-"`
	XXX_sizecache int32 `json:"-" XXX_unrecognized:"-" XXX_sizecache:"-"`
}
"#);
    Ok(())
}

#[test]
fn test_second_run_is_a_no_op() -> Result<()> {
    let test = CliTest::with_file("api/user.pb.go", USER_PB_GO)?;

    let mut first = test.command();
    first.args(["--input", "api/user.pb.go", "--with_clean"]);
    assert!(run(&mut first)?.status.success());
    let after_first = test.read_file("api/user.pb.go")?;

    let mut second = test.command();
    second.args(["--input", "api/user.pb.go", "--with_clean"]);
    assert!(run(&mut second)?.status.success());

    assert_eq!(test.read_file("api/user.pb.go")?, after_first);
    Ok(())
}

#[test]
fn test_dirs_recursive() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("api/v1/user.pb.go", USER_PB_GO)?;
    test.write_file("internal/pb/order.pb.go", ORDER_PB_GO)?;
    // Not a generated file: must stay untouched.
    test.write_file("internal/pb/order.go", ORDER_PB_GO)?;
    test.write_file("other/skipped.pb.go", ORDER_PB_GO)?;

    let mut cmd = test.command();
    cmd.args(["--dirs", "api ~ internal", "--with_clean"]);
    let output = run(&mut cmd)?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let user = test.read_file("api/v1/user.pb.go")?;
    assert!(user.contains(r#"json:"name,omitempty" validate:"required"`"#));

    let order = test.read_file("internal/pb/order.pb.go")?;
    assert!(order.contains("Id int64 `json:\"id,omitempty\" gorm:\"primaryKey\"`"));
    assert!(!order.contains("@inject_tag"));

    assert_eq!(test.read_file("internal/pb/order.go")?, ORDER_PB_GO);
    assert_eq!(test.read_file("other/skipped.pb.go")?, ORDER_PB_GO);
    Ok(())
}

#[test]
fn test_dirs_absolute_path() -> Result<()> {
    let test = CliTest::with_file("pb/order.pb.go", ORDER_PB_GO)?;

    let mut cmd = test.command();
    cmd.arg("--dirs").arg(test.root().join("pb"));
    assert!(run(&mut cmd)?.status.success());

    assert!(test.read_file("pb/order.pb.go")?.contains("gorm:\"primaryKey\""));
    Ok(())
}

#[test]
fn test_missing_dir_is_not_fatal() -> Result<()> {
    let test = CliTest::with_file("pb/order.pb.go", ORDER_PB_GO)?;

    let mut cmd = test.command();
    cmd.args(["--dirs", "missing~pb", "-v"]);
    let output = run(&mut cmd)?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("warning: Cannot read directory: missing"));
    assert!(stdout(&output).contains("skipped 1 unreadable path(s)"));
    assert!(test.read_file("pb/order.pb.go")?.contains("gorm:\"primaryKey\""));
    Ok(())
}

#[test]
fn test_parse_error_aborts_run() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("pb/a_broken.pb.go", "package pb\n\ntype A struct {\n")?;
    test.write_file("pb/b_order.pb.go", ORDER_PB_GO)?;

    let mut cmd = test.command();
    cmd.args(["--dirs", "pb"]);
    let output = run(&mut cmd)?;

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.starts_with("Error: failed to parse Go source"), "{}", err);
    assert!(err.contains("a_broken.pb.go"));
    // Files after the failing one are never attempted.
    assert_eq!(test.read_file("pb/b_order.pb.go")?, ORDER_PB_GO);
    Ok(())
}

#[test]
fn test_missing_input_file() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.args(["--input", "nope.pb.go"]);
    let output = run(&mut cmd)?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to read file: nope.pb.go"));
    Ok(())
}

#[test]
fn test_no_arguments() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(&mut test.command())?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("input file is mandatory"));
    Ok(())
}

#[test]
fn test_dry_run() -> Result<()> {
    let test = CliTest::with_file("pb/order.pb.go", ORDER_PB_GO)?;

    let mut cmd = test.command();
    cmd.args(["--input", "pb/order.pb.go", "--dry-run", "--with_clean"]);
    let output = run(&mut cmd)?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("--> pb/order.pb.go:5:2"), "{}", out);
    assert!(out.contains("after: `json:\"id,omitempty\" gorm:\"primaryKey\"`"));
    assert!(out.contains("Would inject 1 tag(s) in 1 file(s)."));
    assert!(out.contains("would remove 1 @inject_tag comment(s)"));
    assert_eq!(test.read_file("pb/order.pb.go")?, ORDER_PB_GO);
    Ok(())
}

#[test]
fn test_dry_run_up_to_date() -> Result<()> {
    let test = CliTest::with_file("pb/plain.pb.go", "package pb\n\ntype A struct {\n\tX int\n}\n")?;

    let mut cmd = test.command();
    cmd.args(["--input", "pb/plain.pb.go", "--dry-run"]);
    let output = run(&mut cmd)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Checked 1 file(s) - all tags up to date"));
    Ok(())
}

#[test]
fn test_verbose_logging() -> Result<()> {
    let test = CliTest::with_file("pb/order.pb.go", ORDER_PB_GO)?;

    let mut cmd = test.command();
    cmd.args(["--dirs", "pb", "--verbose"]);
    let output = run(&mut cmd)?;

    assert!(output.status.success());
    let err = stderr(&output);
    assert!(err.contains("1 .pb.go files to process:"), "{}", err);
    assert!(err.contains("number of fields to inject custom tags: 1"));
    assert!(err.contains("processed 1 .pb.go file(s)"));
    assert!(stdout(&output).contains("Injected 1 tag(s) in 1 of 1 file(s)"));
    Ok(())
}

const ORDER_PB_GO: &str = r#"package pb

type Order struct {
	// @inject_tag: gorm:"primaryKey"
	Id int64 `json:"id,omitempty"`
}
"#;
