//! Integration tests for declarative matcher configuration.

use pretty_assertions::assert_eq;

use blockline_core::{BlockEnd, BlockState, ExpectedValues, MatcherSet, StrategyConfig};

#[test]
fn test_parse_builds_each_strategy_kind() {
    let set = MatcherSet::parse(
        r#"
[[matcher]]
opening = ['begin']
closing = 'end'
[matcher.strategy]
kind = "capture"
target = 'value: (\d+)'

[[matcher]]
[matcher.strategy]
kind = "find-all"
target = '\d+'

[[matcher]]
[matcher.strategy]
kind = "multi-locate"
target = 'x(\d)x'

[[matcher]]
opening = ['settings = \{']
closing = '\s+\};'
[matcher.strategy]
kind = "key-value"
target = '\s+KEY\s+=\s+"(.+)";'
indent = '(\s+).+;'
key = "KEY"
value = "c"
expected = ["a", "b"]
"#,
    )
    .unwrap();

    assert_eq!(set.matchers.len(), 4);
    let matchers = set.build().unwrap();
    assert_eq!(matchers.len(), 4);
    assert_eq!(matchers[0].state(), BlockState::Opening);
    // the opening-free ones start inside their block
    assert!(matchers[1].allow_next());
    assert!(matchers[2].allow_next());
    assert_eq!(matchers[1].state(), BlockState::Inside);
}

#[test]
fn test_built_key_value_matcher_rewrites_lines() {
    let set = MatcherSet::parse(
        r#"
[[matcher]]
opening = ['settings = \{']
closing = '\s+\};'
[matcher.strategy]
kind = "key-value"
target = '\s+ARCHS\s+=\s+"(.+)";'
indent = '(\s+).+;'
key = "ARCHS"
value = "x86_64"
expected = ["arm64", "armv7"]
"#,
    )
    .unwrap();
    let mut matcher = set.build().unwrap().remove(0);

    assert!(matcher.wants_line("settings = {\n"));
    let outcome = matcher.process_line("    ARCHS = \"arm64 armv7\";\n");
    assert!(outcome.matched);
    assert_eq!(outcome.line, "    ARCHS = \"arm64 armv7 x86_64\";\n");
    matcher.process_line("    };\n");
    assert_eq!(
        matcher.check_finished("    };\n"),
        BlockEnd::Closed { synthesized: None }
    );
}

#[test]
fn test_expected_values_accept_a_single_value() {
    let set = MatcherSet::parse(
        r#"
[[matcher]]
[matcher.strategy]
kind = "key-value"
target = 'KEY = "(.+)";'
indent = '(\s+).+'
key = "KEY"
value = "x"
expected = "solo"
"#,
    )
    .unwrap();

    match &set.matchers[0].strategy {
        StrategyConfig::KeyValue { expected, .. } => {
            assert_eq!(expected, &ExpectedValues::Single("solo".into()));
            assert_eq!(expected.as_slice(), ["solo"]);
        }
        other => panic!("parsed wrong strategy: {other:?}"),
    }
}

#[test]
fn test_empty_opening_strings_are_dropped() {
    let set = MatcherSet::parse(
        r#"
[[matcher]]
opening = ['', 'begin', '']
[matcher.strategy]
kind = "capture"
target = 'hit'
"#,
    )
    .unwrap();
    let mut matcher = set.build().unwrap().remove(0);

    assert_eq!(matcher.state(), BlockState::Opening);
    assert!(matcher.wants_line("begin\n"));
    // one real opener, so one match lands us inside
    assert_eq!(matcher.state(), BlockState::Inside);
}

#[test]
fn test_empty_closing_string_means_no_closing_pattern() {
    let set = MatcherSet::parse(
        r#"
[[matcher]]
closing = ''
[matcher.strategy]
kind = "capture"
target = 'hit'
"#,
    )
    .unwrap();
    let mut matcher = set.build().unwrap().remove(0);

    matcher.process_line("hit\n");
    // with no closing pattern the match itself ends the block
    assert_eq!(
        matcher.check_finished("hit\n"),
        BlockEnd::Closed { synthesized: None }
    );
}

#[test]
fn test_case_insensitive_covers_every_pattern() {
    let set = MatcherSet::parse(
        r#"
[[matcher]]
opening = ['BEGIN']
closing = 'END'
case_insensitive = true
[matcher.strategy]
kind = "capture"
target = 'THIS IS A .* LINE'
"#,
    )
    .unwrap();
    let mut matcher = set.build().unwrap().remove(0);

    assert!(matcher.wants_line("begin\n"));
    let outcome = matcher.process_line("this is a test line\n");
    assert!(outcome.matched);
    assert_eq!(
        matcher.check_finished("end\n"),
        BlockEnd::Closed { synthesized: None }
    );
}

#[test]
fn test_invalid_pattern_reports_its_source_text() {
    let set = MatcherSet::parse(
        r#"
[[matcher]]
[matcher.strategy]
kind = "capture"
target = '(unclosed'
"#,
    )
    .unwrap();
    let err = set.build().unwrap_err();
    assert!(err.to_string().contains("(unclosed"));
}

#[test]
fn test_unknown_strategy_kind_is_rejected() {
    let err = MatcherSet::parse(
        r#"
[[matcher]]
[matcher.strategy]
kind = "bogus"
target = 'x'
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("bogus") || err.to_string().contains("unknown"));
}

#[test]
fn test_empty_document_is_an_empty_set() {
    let set = MatcherSet::parse("").unwrap();
    assert!(set.matchers.is_empty());
    assert!(set.build().unwrap().is_empty());
}
