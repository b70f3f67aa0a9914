use proptest::{
    prelude::*,
    string::string_regex,
    test_runner::{Config, TestRunner},
};

use super::Identifier;

#[test]
fn identifier_parse_accepts_valid() {
    let mut runner = TestRunner::new(Config {
        cases: 32,
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&string_regex("[a-z_][a-z0-9_-]{0,20}").unwrap(), |s| {
            let id = Identifier::parse(&s, '-').expect("should parse");
            prop_assert_eq!(id.as_str(), s);
            Ok(())
        })
        .unwrap();
}

#[test]
fn identifier_parse_rejects_leading_digit() {
    let mut runner = TestRunner::new(Config {
        cases: 32,
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&string_regex("[0-9][a-z0-9-]{0,10}").unwrap(), |s| {
            prop_assert!(Identifier::parse(&s, '-').is_none());
            Ok(())
        })
        .unwrap();
}

#[test]
fn identifier_parse_rejects_foreign_characters() {
    for bad in ["", "环境", "Upper", "with space", "dot.ted", "a-b"] {
        let sep = if bad == "a-b" { '_' } else { '-' };
        assert!(Identifier::parse(bad, sep).is_none(), "{bad:?} should be rejected");
    }
}
