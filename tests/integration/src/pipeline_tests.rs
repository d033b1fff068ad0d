//! End-to-end pipeline tests: source through matchers to sink.

use std::fs;

use pretty_assertions::assert_eq;

use blockline_core::{BlockMatcher, CaptureStrategy, LinePattern, MatcherSet};
use blockline_io::{FileSink, FileSource, MemorySource, VecSink};
use blockline_stream::{HandlerOutcome, StreamOrchestrator};
use blockline_test_utils::fixtures::{fixture_path, fixture_text};
use blockline_test_utils::matchers::build_profile_matcher;

/// The build settings fixture after a full repair pass: the Debug list gains
/// x86_64 and the Release profile gains a synthesized ARCHS line.
fn repaired_settings(text: &str) -> String {
    text.replace(
        "            ARCHS = \"arm64 armv7\";\n",
        "            ARCHS = \"arm64 armv7 x86_64\";\n",
    )
    .replace(
        "            ONLY_ACTIVE_ARCH = NO;\n        };\n",
        "            ONLY_ACTIVE_ARCH = NO;\n        ARCHS = \"arm64 armv7 x86_64\";\n        };\n",
    )
}

#[test]
fn test_single_line_matches_pass_through_unchanged() {
    let text = fixture_text("plain.txt");
    let mut orchestrator = StreamOrchestrator::new();
    orchestrator.register(BlockMatcher::new(
        Vec::new(),
        CaptureStrategy::new(LinePattern::case_insensitive(r"this\sis\sa.*line").unwrap()),
        None,
    ));

    let mut source = MemorySource::new(&text);
    let mut sink = VecSink::new();
    let mut matched = Vec::new();
    orchestrator
        .run(&mut source, Some(&mut sink), |event| {
            if event.matched {
                matched.push(event.line_index);
            }
            HandlerOutcome::Continue
        })
        .unwrap();

    assert_eq!(sink.text(), text);
    assert_eq!(matched, [0, 2]);
}

#[test]
fn test_value_list_repair_across_both_profiles() {
    let text = fixture_text("build_settings.txt");
    let mut orchestrator = StreamOrchestrator::new();
    orchestrator.register(build_profile_matcher());

    let mut source = MemorySource::new(&text);
    let mut sink = VecSink::new();
    orchestrator.run_to_end(&mut source, &mut sink).unwrap();

    assert_eq!(sink.text(), repaired_settings(&text));
}

#[test]
fn test_file_to_file_repair() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("build_settings.out");

    let mut orchestrator = StreamOrchestrator::new();
    orchestrator.register(build_profile_matcher());

    let mut source = FileSource::open(fixture_path("build_settings.txt")).unwrap();
    let mut sink = FileSink::create(&out_path).unwrap();
    let report = orchestrator.run_to_end(&mut source, &mut sink).unwrap();

    let written = fs::read_to_string(&out_path).unwrap();
    assert_eq!(written, repaired_settings(&fixture_text("build_settings.txt")));
    assert_eq!(report.lines_read, 18);
    assert_eq!(report.lines_written, 19);
}

#[test]
fn test_toml_configured_matcher_set_drives_a_run() {
    let config = r#"
[[matcher]]
opening = [
    '\s+target \w+ /\* \w+ \*/ = \{',
    '\s+isa = BuildProfile;',
    '\s+settings = \{',
]
closing = '\s+\};'

[matcher.strategy]
kind = "key-value"
target = '\s+ARCHS = "(.+)";'
indent = '(\s+).+;'
key = "ARCHS"
value = "x86_64"
expected = ["arm64", "armv7"]
"#;

    let set = MatcherSet::parse(config).unwrap();
    let mut orchestrator = StreamOrchestrator::new();
    for matcher in set.build().unwrap() {
        orchestrator.register(matcher);
    }

    let text = fixture_text("build_settings.txt");
    let mut source = MemorySource::new(&text);
    let mut sink = VecSink::new();
    orchestrator.run_to_end(&mut source, &mut sink).unwrap();

    assert_eq!(sink.text(), repaired_settings(&text));
}
