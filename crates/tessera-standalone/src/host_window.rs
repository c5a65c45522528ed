//! Native top-level windows standing in for a plugin host's editor frames.
//!
//! Each host window runs its own baseview event loop on a dedicated thread
//! and reports to the harness: `Opened` once its native handle is known,
//! `Closed` when the user closes it. On close the window blocks until the
//! harness acknowledges, so the embedded editor goes away first.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use baseview::{
    Event, EventStatus, Size, Window, WindowEvent, WindowHandler, WindowOpenOptions,
    WindowScalePolicy,
};
use crossbeam_channel::Sender;
use raw_window_handle::HasRawWindowHandle;
use tessera_core::Rect;

use crate::harness::{HarnessEvent, WindowId};

/// Longest a closing host window waits for its editor to shut down.
const CLOSE_ACK_TIMEOUT: Duration = Duration::from_secs(5);

/// Size and look of one host window.
#[derive(Debug, Clone)]
pub struct HostWindowConfig {
    /// Harness id.
    pub id: WindowId,
    /// Window title.
    pub title: String,
    /// Client area, taken from the editor's rect.
    pub rect: Rect,
    /// Scale factor shared with the editor.
    pub scale: f64,
}

/// Open a host window on its own thread.
pub fn spawn(
    host: HostWindowConfig,
    events: Sender<HarnessEvent>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("tessera-host-{}", host.id))
        .spawn(move || run(host, events))
}

fn run(host: HostWindowConfig, events: Sender<HarnessEvent>) {
    let id = host.id;
    let options = WindowOpenOptions {
        title: host.title,
        size: Size::new(f64::from(host.rect.width()), f64::from(host.rect.height())),
        scale: WindowScalePolicy::ScaleFactor(host.scale),
        gl_config: None,
    };

    Window::open_blocking(options, move |window: &mut Window<'_>| {
        let event = match tessera_gui::host_handle(window.raw_window_handle()) {
            Ok(handle) => {
                tracing::info!(id, window = %handle, "host window opened");
                HarnessEvent::Opened { id, handle }
            }
            Err(error) => HarnessEvent::Failed { id, error },
        };
        let _ = events.send(event);
        HostWindow {
            id,
            events,
            closed: false,
        }
    });

    tracing::debug!(id, "host window thread finished");
}

struct HostWindow {
    id: WindowId,
    events: Sender<HarnessEvent>,
    closed: bool,
}

impl HostWindow {
    /// Tell the harness this window is going away and wait for its editor.
    fn notify_closed(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        let (ack, acked) = crossbeam_channel::bounded(1);
        if self
            .events
            .send(HarnessEvent::Closed { id: self.id, ack })
            .is_err()
        {
            return;
        }
        // A dropped sender also ends the wait.
        if acked.recv_timeout(CLOSE_ACK_TIMEOUT).is_err() {
            tracing::debug!(id = self.id, "close not acknowledged; continuing");
        }
    }
}

impl WindowHandler for HostWindow {
    fn on_frame(&mut self, _window: &mut Window<'_>) {}

    fn on_event(&mut self, _window: &mut Window<'_>, event: Event) -> EventStatus {
        if let Event::Window(WindowEvent::WillClose) = event {
            tracing::info!(id = self.id, "host window closing");
            self.notify_closed();
            return EventStatus::Captured;
        }
        EventStatus::Ignored
    }
}

impl Drop for HostWindow {
    fn drop(&mut self) {
        self.notify_closed();
    }
}
