//! Ready-made matchers for the shared stream fixtures.

use blockline_core::{
    BlockMatcher, CaptureStrategy, ExpectedValues, KeyValueStrategy, LinePattern,
};

/// Matcher for the `settings = {` blocks in `build_settings.txt`.
///
/// Walks the target/isa/settings opening sequence, keeps the `ARCHS` value
/// list carrying `x86_64`, and synthesizes the whole line for profiles that
/// lack one.
pub fn build_profile_matcher() -> BlockMatcher {
    let opening = vec![
        pattern(r"\s+target \w+ /\* \w+ \*/ = \{"),
        pattern(r"\s+isa = BuildProfile;"),
        pattern(r"\s+settings = \{"),
    ];
    let strategy = KeyValueStrategy::new(
        pattern(r#"\s+ARCHS = "(.+)";"#),
        pattern(r"(\s+).+;"),
        "ARCHS",
        "x86_64",
        ExpectedValues::List(vec!["arm64".into(), "armv7".into()]),
    );
    BlockMatcher::new(opening, strategy, Some(pattern(r"\s+\};")))
}

/// Matcher for the inline data layer in `storefront.html`.
///
/// Walks a three-line opening sequence down to the script tag, then captures
/// the JSON payload assigned to `window.shop.dataLayer`.
pub fn data_layer_matcher() -> BlockMatcher {
    let opening = vec![
        pattern(r#"\s+<li><a href="/support/contact"#),
        pattern(r"\s+</ul>"),
        pattern(r"\s+<script>"),
    ];
    let strategy = CaptureStrategy::new(pattern(
        r".*;window\.shop\.dataLayer = (\{.*\});window\.shop\.viewReady = window",
    ));
    BlockMatcher::new(opening, strategy, Some(pattern(r"\s+\(function\(\)\{")))
}

fn pattern(source: &str) -> LinePattern {
    LinePattern::new(source).unwrap()
}
