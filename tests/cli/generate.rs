use anyhow::Result;

use crate::CliTest;

const OUTPUT: &str = "src/types/messages.d.ts";

#[test]
fn test_writes_typescript_declarations() -> Result<()> {
    let test = CliTest::with_messages()?;

    let output = test.run(&["generate"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Generated"));
    assert!(output.stdout.contains("4 keys, typescript"));

    let content = test.read_file(OUTPUT)?;
    assert!(content.starts_with("// Generated by intlkeys from the 'es' messages"));
    assert!(content.contains("export interface Messages"));
    assert!(content.contains("\"common.close\""));
    assert!(content.contains("\"home.title\""));

    Ok(())
}

#[test]
fn test_second_run_is_unchanged() -> Result<()> {
    let test = CliTest::with_messages()?;

    assert_eq!(test.run(&["generate"])?.code, Some(0));
    let output = test.run(&["generate"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("is up to date (4 keys)"));

    Ok(())
}

#[test]
fn test_check_mode() -> Result<()> {
    let test = CliTest::with_messages()?;

    let missing = test.run(&["generate", "--check"])?;
    assert_eq!(missing.code, Some(1));
    assert!(missing.stdout.contains("does not exist"));
    assert!(!test.root().join(OUTPUT).exists());

    test.write_file(OUTPUT, "// old\n")?;
    let stale = test.run(&["generate", "--check"])?;
    assert_eq!(stale.code, Some(1));
    assert!(stale.stdout.contains("is out of date"));
    assert_eq!(test.read_file(OUTPUT)?, "// old\n");

    assert_eq!(test.run(&["generate"])?.code, Some(0));
    let fresh = test.run(&["generate", "--check"])?;
    assert_eq!(fresh.code, Some(0));

    Ok(())
}

#[test]
fn test_rust_target_and_output_override() -> Result<()> {
    let test = CliTest::with_messages()?;

    let output = test.run(&["generate", "--target", "rust", "-o", "src/keys.rs"])?;
    assert_eq!(output.code, Some(0));
    let content = test.read_file("src/keys.rs")?;
    assert!(content.starts_with("// Generated by intlkeys"));
    assert!(!test.root().join(OUTPUT).exists());

    Ok(())
}

#[test]
fn test_errors_abort_generation() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file("messages/en.json", r#"{"common": {"close": "Close"}}"#)?;

    let output = test.run(&["generate"])?;
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("missing-key"));
    assert!(output.stdout.contains("Not writing"));
    assert!(!test.root().join(OUTPUT).exists());

    Ok(())
}
