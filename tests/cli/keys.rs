use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_lists_schema_keys() -> Result<()> {
    let test = CliTest::with_messages()?;

    let output = test.run(&["keys"])?;
    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout,
        "common.close\ncommon.greeting\ncommon.ok\nhome.title\n"
    );

    Ok(())
}

#[test]
fn test_lists_namespace_keys() -> Result<()> {
    let test = CliTest::with_messages()?;

    let output = test.run(&["keys", "-n", "home"])?;
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "home.title\n");

    Ok(())
}

#[test]
fn test_unknown_namespace() -> Result<()> {
    let test = CliTest::with_messages()?;

    let output = test.run(&["keys", "-n", "settings"])?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("unknown namespace 'settings'"));

    Ok(())
}

#[test]
fn test_lists_locale_keys() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file("messages/en.json", r#"{"common": {"close": "Close", "extra": "Extra"}}"#)?;

    let output = test.run(&["keys", "--locale", "en"])?;
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "common.close\ncommon.extra\n");

    let unknown = test.run(&["keys", "--locale", "de"])?;
    assert_eq!(unknown.code, Some(2));
    assert!(unknown.stderr.contains("Locale 'de' not found (available: en, es)"));

    Ok(())
}
