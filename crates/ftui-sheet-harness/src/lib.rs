#![forbid(unsafe_code)]

//! Scenario harness for `ftui-sheet`.
//!
//! [`SheetScenario`] wires a [`Sheet`] to in-memory fakes and plays the
//! platform's part: it can finish pending transitions, drag the sheet, and
//! run layout passes, so integration tests read like the sequence of events
//! a host would see.
//!
//! ```ignore
//! let mut s = SheetScenario::new(config).with_content(600.0);
//! assert_eq!(s.present_settled(0), Ok(()));
//! assert_events!(s, ["onPresent"]);
//! ```

use futures::FutureExt;

use ftui_sheet::testing::{FakeHost, FakeSurface, RecordingEmitter, SurfaceCall};
use ftui_sheet::{
    Completion, Container, Phase, Sheet, SheetConfig, SheetError, SheetEvent, SurfaceEvent,
    ViewId,
};

pub use ftui_sheet::testing;

/// Container id every scenario attaches.
pub const CONTAINER: ViewId = ViewId::new(100);
/// Content view id.
pub const CONTENT: ViewId = ViewId::new(101);
/// Footer view id.
pub const FOOTER: ViewId = ViewId::new(102);

/// A sheet plus handles on everything it talks to.
#[derive(Debug)]
pub struct SheetScenario {
    pub sheet: Sheet,
    pub host: FakeHost,
    pub surface: FakeSurface,
    pub events: RecordingEmitter,
}

impl SheetScenario {
    /// A hidden sheet with nothing attached.
    pub fn new(config: SheetConfig) -> Self {
        Self::with_fakes(config, FakeHost::new(), FakeSurface::new())
    }

    /// Use pre-configured fakes (available height, inset, live-style support).
    pub fn with_fakes(config: SheetConfig, host: FakeHost, surface: FakeSurface) -> Self {
        let events = RecordingEmitter::new();
        let sheet = Sheet::new(
            Box::new(host.clone()),
            Box::new(surface.clone()),
            Box::new(events.clone()),
            config,
        );
        tracing::debug!("sheet scenario ready");
        Self {
            sheet,
            host,
            surface,
            events,
        }
    }

    /// Attach [`CONTAINER`] with [`CONTENT`] measuring `height`.
    pub fn with_content(mut self, height: f64) -> Self {
        self.sheet
            .attach(Container::new(CONTAINER).content(CONTENT).footer(FOOTER));
        self.sheet.set_content_height(height);
        self
    }

    /// Finish whichever transition the surface is in.
    pub fn finish_transition(&mut self) {
        match self.sheet.phase() {
            Phase::Presenting => self.sheet.handle_surface_event(SurfaceEvent::PresentFinished),
            Phase::Dismissing => self.sheet.handle_surface_event(SurfaceEvent::DismissFinished),
            Phase::Hidden | Phase::Shown => {}
        }
    }

    /// Finish transitions until the sheet rests in `Hidden` or `Shown`.
    pub fn settle(&mut self) {
        // A deferred operation chains at most one more transition.
        for _ in 0..4 {
            if !self.sheet.phase().is_transient() {
                return;
            }
            self.finish_transition();
        }
    }

    /// `present(index)`, let the platform finish, and return the outcome.
    pub fn present_settled(&mut self, index: usize) -> Result<(), SheetError> {
        let done = self.sheet.present(index);
        self.settle();
        outcome(done)
    }

    /// `dismiss()`, let the platform finish, and return the outcome.
    pub fn dismiss_settled(&mut self) -> Result<(), SheetError> {
        let done = self.sheet.dismiss();
        self.settle();
        outcome(done)
    }

    /// The user swipes the sheet away.
    pub fn swipe_away(&mut self) {
        self.sheet.handle_surface_event(SurfaceEvent::WillDismiss);
        self.sheet.handle_surface_event(SurfaceEvent::DismissFinished);
    }

    /// The user drags the sheet to detent `index`.
    pub fn drag_to(&mut self, index: usize) {
        self.sheet
            .handle_surface_event(SurfaceEvent::DetentChanged(index));
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.events().iter().map(SheetEvent::name).collect()
    }

    pub fn present_calls(&self) -> usize {
        self.surface
            .count(|c| matches!(c, SurfaceCall::Present { .. }))
    }

    pub fn dismiss_calls(&self) -> usize {
        self.surface.count(|c| matches!(c, SurfaceCall::Dismiss))
    }
}

/// Outcome of a completion that must already be settled.
///
/// A completion still waiting on the platform yields
/// [`SheetError::Abandoned`] so that assertions fail loudly.
pub fn outcome(done: Completion) -> Result<(), SheetError> {
    done.now_or_never().unwrap_or(Err(SheetError::Abandoned))
}

/// Assert the recorded event names, in order.
#[macro_export]
macro_rules! assert_events {
    ($scenario:expr, [$($name:expr),* $(,)?]) => {{
        let expected: ::std::vec::Vec<&'static str> = ::std::vec![$($name),*];
        assert_eq!($scenario.event_names(), expected, "recorded sheet events");
    }};
}
