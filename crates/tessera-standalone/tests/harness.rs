//! Harness tests driving real `Editor`s with a display-free backend.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tessera_core::{
    Backend, Editor, EditorError, EditorLifecycle, HostStub, HostWindowHandle, ParameterHost,
    RenderSession, RuntimeLease, SharedRuntime,
};
use tessera_standalone::{Harness, HarnessEvent};

/// Render loop that waits for cancellation.
#[derive(Default)]
struct IdleBackend {
    runtime: SharedRuntime<()>,
}

impl Backend for IdleBackend {
    type Runtime = ();

    fn shared_runtime(&self) -> &SharedRuntime<()> {
        &self.runtime
    }

    fn init_runtime(&self) -> Result<(), EditorError> {
        Ok(())
    }

    fn run(&self, _runtime: RuntimeLease<()>, session: RenderSession) -> Result<(), EditorError> {
        while session.is_running() {
            thread::sleep(Duration::from_millis(1));
        }
        Ok(())
    }
}

fn harness(host: &Arc<HostStub>, backend: &Arc<IdleBackend>) -> Harness {
    let host = Arc::clone(host) as Arc<dyn ParameterHost>;
    let backend = Arc::clone(backend);
    Harness::new(move || {
        Box::new(Editor::new(Arc::clone(&host), Arc::clone(&backend))) as Box<dyn EditorLifecycle>
    })
}

#[test]
fn editors_follow_their_host_windows() {
    let host = Arc::new(HostStub::new());
    let backend = Arc::new(IdleBackend::default());
    let mut harness = harness(&host, &backend);

    for id in 0..2 {
        let rect = harness.create_editor(id).unwrap();
        assert_eq!((rect.width(), rect.height()), (800, 400));
    }

    let (events, event_rx) = crossbeam_channel::unbounded();
    let mut acks = Vec::new();
    for id in 0..2 {
        events
            .send(HarnessEvent::Opened {
                id,
                handle: HostWindowHandle::from_raw(0x100 + id),
            })
            .unwrap();
    }
    for id in 0..2 {
        let (ack, acked) = crossbeam_channel::bounded(1);
        events.send(HarnessEvent::Closed { id, ack }).unwrap();
        acks.push(acked);
    }

    let start = Instant::now();
    harness.run(event_rx, Duration::from_millis(5));

    assert!(harness.is_done());
    assert!(start.elapsed() < Duration::from_secs(2));
    for acked in acks {
        assert!(acked.try_recv().is_ok());
    }
    assert_eq!(backend.runtime.live_count(), 0);
}

#[test]
fn closing_one_window_keeps_the_other_editor() {
    let host = Arc::new(HostStub::new());
    let backend = Arc::new(IdleBackend::default());
    let mut harness = harness(&host, &backend);
    harness.create_editor(0);
    harness.create_editor(1);

    for id in 0..2 {
        harness.handle_event(HarnessEvent::Opened {
            id,
            handle: HostWindowHandle::from_raw(0x200 + id),
        });
    }
    let (ack, _acked) = crossbeam_channel::bounded(1);
    harness.handle_event(HarnessEvent::Closed { id: 0, ack });

    assert_eq!(harness.editor_count(), 1);
    assert!(!harness.is_done());

    harness.close_all();
    assert!(harness.is_done());
}

#[test]
fn failed_window_drops_its_editor() {
    let host = Arc::new(HostStub::new());
    let backend = Arc::new(IdleBackend::default());
    let mut harness = harness(&host, &backend);
    harness.create_editor(0);

    harness.handle_event(HarnessEvent::Failed {
        id: 0,
        error: EditorError::UnsupportedHandle("AppKit".into()),
    });
    assert!(harness.is_done());
}

#[test]
fn run_returns_when_all_windows_disconnect() {
    let host = Arc::new(HostStub::new());
    let backend = Arc::new(IdleBackend::default());
    let mut harness = harness(&host, &backend);
    harness.create_editor(0);

    let (events, event_rx) = crossbeam_channel::unbounded::<HarnessEvent>();
    drop(events);

    harness.run(event_rx, Duration::from_millis(5));
    assert!(harness.is_done());
}

#[test]
fn late_close_after_run_is_not_awaited() {
    let host = Arc::new(HostStub::new());
    let backend = Arc::new(IdleBackend::default());
    let mut harness = harness(&host, &backend);
    harness.create_editor(0);
    harness.create_editor(1);

    let (events, event_rx) = crossbeam_channel::unbounded();
    events
        .send(HarnessEvent::Failed {
            id: 0,
            error: EditorError::UnsupportedHandle("AppKit".into()),
        })
        .unwrap();
    events
        .send(HarnessEvent::Failed {
            id: 1,
            error: EditorError::UnsupportedHandle("AppKit".into()),
        })
        .unwrap();
    harness.run(event_rx, Duration::from_millis(5));
    assert!(harness.is_done());

    // Host windows are still up; closing one now must not block.
    let (ack, _acked) = crossbeam_channel::bounded(1);
    assert!(events.send(HarnessEvent::Closed { id: 0, ack }).is_err());
}

#[test]
fn idle_ticks_do_not_write_to_host() {
    let host = Arc::new(HostStub::new());
    let backend = Arc::new(IdleBackend::default());
    let mut harness = harness(&host, &backend);
    harness.create_editor(0);
    harness.handle_event(HarnessEvent::Opened {
        id: 0,
        handle: HostWindowHandle::from_raw(0x300),
    });

    host.set_parameter_automated(7, 0.9);
    harness.idle_all();
    assert_eq!(host.get_parameter(7), 0.9);

    harness.close_all();
    assert_eq!(backend.runtime.live_count(), 0);
}
