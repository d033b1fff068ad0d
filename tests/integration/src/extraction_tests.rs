//! Read-only extraction flows: early stop and windowed re-parsing.

use pretty_assertions::assert_eq;
use serde_json::Value;

use blockline_core::{BlockMatcher, CaptureStrategy, LinePattern};
use blockline_io::MemorySource;
use blockline_stream::{HandlerOutcome, StreamOrchestrator};
use blockline_test_utils::fixtures::fixture_text;
use blockline_test_utils::matchers::data_layer_matcher;

#[test]
fn test_data_layer_extraction_stops_the_stream_early() {
    let text = fixture_text("storefront.html");
    let mut orchestrator = StreamOrchestrator::new();
    orchestrator.register(data_layer_matcher());

    let mut source = MemorySource::new(&text);
    let mut payload = None;
    let report = orchestrator
        .run(&mut source, None, |event| {
            if event.matched {
                payload = Some(event.matcher.strategy().captured()[0].text.clone());
                return HandlerOutcome::Stop;
            }
            HandlerOutcome::Continue
        })
        .unwrap();

    let payload = payload.expect("the data layer line is in the fixture");
    let value: Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(value["page"], "home");
    assert_eq!(value["currency"], "USD");
    assert_eq!(value["items"][2], 3);

    // the script body after the payload was never read
    assert!(report.stopped_early);
    assert_eq!(report.lines_read, 12);
}

#[test]
fn test_located_script_region_reparses_from_the_replay_buffer() {
    let text = fixture_text("storefront.html");

    let mut locate = StreamOrchestrator::new();
    locate.register(BlockMatcher::new(
        Vec::new(),
        CaptureStrategy::new(LinePattern::new(r"\s+<script>").unwrap()),
        None,
    ));
    locate.register(BlockMatcher::new(
        Vec::new(),
        CaptureStrategy::new(LinePattern::new(r"\s+</script>").unwrap()),
        None,
    ));
    locate.attach_replay();

    let mut source = MemorySource::new(&text);
    let mut bounds = (None, None);
    locate
        .run(&mut source, None, |event| {
            if event.matched {
                match event.index {
                    0 => bounds.0 = Some(event.line_index),
                    _ => bounds.1 = Some(event.line_index),
                }
            }
            HandlerOutcome::Continue
        })
        .unwrap();

    let (start, end) = (bounds.0.unwrap(), bounds.1.unwrap());
    assert_eq!((start, end), (10, 15));

    let replay = locate.replay().unwrap();
    let mut window = replay.window(start..=end);
    let mut second = StreamOrchestrator::new();
    second.register(BlockMatcher::new(
        vec![LinePattern::new(r"\s+<script>").unwrap()],
        CaptureStrategy::new(LinePattern::new(r#"\s+console\.log\("(\w+)"\);"#).unwrap()),
        Some(LinePattern::new(r"\s+</script>").unwrap()),
    ));

    let mut logged = None;
    let report = second
        .run(&mut window, None, |event| {
            if event.matched {
                logged = Some(event.matcher.strategy().captured()[0].text.clone());
            }
            HandlerOutcome::Continue
        })
        .unwrap();

    assert_eq!(report.lines_read, 6);
    assert_eq!(logged.as_deref(), Some("boot"));
}
