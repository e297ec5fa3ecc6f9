//! Property-based tests for the console buffer bound and generation gating

use livepreview::config::PreviewConfig;
use livepreview::console::{ConsoleBridge, Delivery};
use livepreview::files::ProjectFileSet;
use livepreview::sandbox::MemoryBackend;
use livepreview::{Generation, RefreshController};
use proptest::prelude::*;
use serde_json::json;

fn payload(i: usize) -> serde_json::Value {
    json!({ "type": "CONSOLE_LOG", "data": format!("m{i}"), "timestamp": "2024-05-01T12:00:00Z" })
}

/// Test that the ring never exceeds its capacity and keeps the newest entries
#[test]
fn test_ring_bound_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(0usize..200), |count| {
            let mut bridge = ConsoleBridge::new(50);
            bridge.begin_generation(Generation::ZERO);
            for i in 0..count {
                assert_eq!(bridge.receive(Generation::ZERO, &payload(i)), Delivery::Accepted);
                assert!(bridge.ring().len() <= 50);
            }
            let events = bridge.events();
            assert_eq!(events.len(), count.min(50));
            if let Some(last) = events.last() {
                assert_eq!(last.message, format!("m{}", count - 1));
            }
            Ok(())
        })
        .unwrap();
}

/// Test that any burst of refreshes settles on one live context whose events are
/// the only ones buffered, whatever order late deliveries arrive in
#[test]
fn test_refresh_burst_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(1usize..6, prop::collection::vec((0usize..6, 0usize..10), 0..30)),
            |(refreshes, deliveries)| {
                let mut controller =
                    RefreshController::new(MemoryBackend::new(), &PreviewConfig::default());
                let files = ProjectFileSet::from_files([("/script.js", "console.log(1)")]).unwrap();
                for _ in 0..refreshes {
                    controller.files_changed(files.clone()).unwrap();
                }
                let live = controller.live_generation().unwrap();
                assert_eq!(live, Generation::new(refreshes as u64 - 1));
                assert_eq!(controller.backend().alive(), vec![live]);

                let mut expected = 0;
                for (origin, i) in deliveries {
                    let origin = Generation::new((origin % refreshes) as u64);
                    if origin == live {
                        expected += 1;
                    }
                    let port = controller.backend().port(origin).unwrap().clone();
                    port.post(payload(i));
                    port.signal_loaded();
                }
                controller.pump();

                let events = controller.console_events();
                assert_eq!(events.len(), expected.min(50));
                assert!(events.iter().all(|event| event.generation == live));
                Ok(())
            },
        )
        .unwrap();
}
