//! Refresh controller lifecycle and generation gating

use super::test_utils::{console_payload, project, COMPONENT};
use livepreview::channel::InboundEvent;
use livepreview::config::PreviewConfig;
use livepreview::console::ConsoleLevel;
use livepreview::sandbox::{IframeBackend, MemoryBackend, NetworkPolicy};
use livepreview::synthesis::{encode_entry_source, DocumentKind};
use livepreview::{Generation, PreviewState, RefreshController};
use serde_json::json;

fn controller() -> RefreshController<MemoryBackend> {
    RefreshController::new(MemoryBackend::new(), &PreviewConfig::default())
}

#[test]
fn test_component_project_reaches_ready() {
    let mut controller = controller();
    controller.files_changed(project(&[("/App.js", COMPONENT)])).unwrap();
    assert_eq!(
        controller.state(),
        &PreviewState::Loading {
            generation: Generation::ZERO
        }
    );

    let context = controller.backend().context(Generation::ZERO).unwrap();
    assert!(context.document.contains(&encode_entry_source(COMPONENT)));
    assert!(matches!(
        context.capabilities.network_policy(),
        NetworkPolicy::AllowList(_)
    ));
    context.signal_loaded();
    controller.pump();
    assert_eq!(
        controller.state(),
        &PreviewState::Ready {
            generation: Generation::ZERO
        }
    );
}

#[test]
fn test_console_log_after_mount_is_tagged_with_current_generation() {
    let mut controller = controller();
    controller.files_changed(project(&[("/script.js", "console.log(\"hi\")")])).unwrap();
    let live = controller.live_generation().unwrap();
    let context = controller.backend().context(live).unwrap();
    context.signal_loaded();
    context.post(console_payload("CONSOLE_LOG", "hi"));
    controller.pump();

    let events = controller.console_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, ConsoleLevel::Log);
    assert_eq!(events[0].message, "hi");
    assert_eq!(events[0].generation, live);
}

#[test]
fn test_rapid_double_refresh_leaves_one_context_and_no_stale_events() {
    let mut controller = controller();
    let files = project(&[("/App.js", COMPONENT)]);
    controller.files_changed(files.clone()).unwrap();
    let first = controller.live_generation().unwrap();
    controller.files_changed(files).unwrap();
    let second = controller.live_generation().unwrap();
    assert!(second > first);

    // The superseded context finishes late and keeps talking.
    let stale = controller.backend().port(first).unwrap().clone();
    stale.post(console_payload("CONSOLE_WARN", "from the past"));
    stale.signal_loaded();
    controller.pump();

    assert_eq!(controller.backend().alive(), vec![second]);
    assert_eq!(controller.state(), &PreviewState::Loading { generation: second });
    assert!(controller.console_events().is_empty());
    assert_eq!(controller.bridge().stale_count(), 1);

    controller.backend().context(second).unwrap().signal_loaded();
    controller
        .backend()
        .context(second)
        .unwrap()
        .post(console_payload("CONSOLE_INFO", "fresh"));
    controller.pump();
    assert_eq!(controller.state(), &PreviewState::Ready { generation: second });
    assert!(controller
        .console_events()
        .iter()
        .all(|event| event.generation == second));
}

#[test]
fn test_malformed_messages_are_dropped_silently() {
    let mut controller = controller();
    controller.files_changed(project(&[("/script.js", "1")])).unwrap();
    let live = controller.live_generation().unwrap();
    for payload in [
        json!(null),
        json!("CONSOLE_LOG"),
        json!({ "type": "CONSOLE_TRACE", "data": "x", "timestamp": "2024-05-01T12:00:00Z" }),
        json!({ "type": "CONSOLE_LOG", "data": 42, "timestamp": "2024-05-01T12:00:00Z" }),
        json!({ "type": "CONSOLE_LOG", "data": "x", "timestamp": "yesterday" }),
    ] {
        controller.handle(InboundEvent::Message {
            origin: live,
            payload,
        });
    }
    assert!(controller.console_events().is_empty());
    assert_eq!(controller.bridge().dropped_count(), 5);
}

#[test]
fn test_ring_buffer_keeps_the_latest_fifty() {
    let mut controller = controller();
    controller.files_changed(project(&[("/script.js", "1")])).unwrap();
    let context = controller
        .backend()
        .context(controller.live_generation().unwrap())
        .unwrap()
        .clone();
    for i in 0..51 {
        context.post(console_payload("CONSOLE_LOG", &format!("line {i}")));
    }
    controller.pump();

    let events = controller.console_events();
    assert_eq!(events.len(), 50);
    assert_eq!(events[0].message, "line 1");
    assert_eq!(events[49].message, "line 50");
}

#[test]
fn test_error_display_is_cleared_by_the_next_trigger() {
    let mut controller = controller();
    controller
        .files_changed(project(&[("/App.js", "import React from './react'\nfunction App(){}")]))
        .unwrap();
    assert!(controller.state().is_error());
    assert_eq!(controller.document().kind(), DocumentKind::Diagnostic);
    assert_eq!(
        controller.diagnostic().unwrap().message,
        "Syntax Error: Invalid import statement for React"
    );

    controller.files_changed(project(&[("/App.js", COMPONENT)])).unwrap();
    assert!(!controller.state().is_error());
    assert!(controller.diagnostic().is_none());
    // The failed refresh never created a context.
    assert_eq!(controller.live_generation(), Some(Generation::ZERO));
}

#[test]
fn test_unsaved_edit_previews_without_committing() {
    let mut controller = controller();
    let saved = project(&[("/script.js", "console.log('saved')")]);
    controller
        .run_with(saved, "/script.js", "console.log('draft')")
        .unwrap();
    assert!(controller.document().as_str().contains("console.log('draft')"));

    controller.run().unwrap();
    assert!(controller.document().as_str().contains("console.log('saved')"));
    assert_eq!(controller.live_generation(), Some(Generation::new(1)));
}

#[test]
fn test_iframe_backend_hosts_only_the_live_frame() {
    let mut controller = RefreshController::new(IframeBackend::new(), &PreviewConfig::default());
    controller.files_changed(project(&[("/App.js", COMPONENT)])).unwrap();
    controller.run().unwrap();

    let markup = controller.backend().markup().unwrap();
    assert!(markup.contains("id=\"preview-g1\""));
    assert!(markup.contains("https://unpkg.com/@babel/standalone/babel.min.js"));
    assert!(controller.backend().port(Generation::ZERO).is_none());

    let port = controller.backend().port(Generation::new(1)).unwrap().clone();
    port.signal_loaded();
    controller.pump();
    assert_eq!(
        controller.status().state,
        "ready (g1)"
    );
}
