#![forbid(unsafe_code)]

//! In-memory fakes for the host, the modal surface, and the event sink.
//!
//! Each fake is a cheap handle over shared state: keep one clone for
//! assertions and box another into the [`Sheet`](crate::Sheet).
//!
//! Available with the `test-helpers` feature.

use std::cell::RefCell;
use std::rc::Rc;

use crate::event::{EventEmitter, SheetEvent};
use crate::host::{HostSurface, LayoutPlan, Size, ViewId};
use crate::style::StyleConfig;
use crate::surface::{ModalSurface, PresentRequest, StyleKnob, Unsupported};

/// A call the sheet made on the modal surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Present { detents: Vec<f64>, selected: usize },
    Dismiss,
    Reconfigure { detents: Vec<f64>, selected: usize },
    SelectDetent { index: usize, height: f64 },
    SetDismissible(bool),
    PatchStyle(StyleKnob),
}

#[derive(Debug, Default)]
struct SurfaceState {
    calls: Vec<SurfaceCall>,
    last_style: Option<StyleConfig>,
    reject_live_style: bool,
}

/// Recording [`ModalSurface`].
#[derive(Debug, Clone, Default)]
pub struct FakeSurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`ModalSurface::patch_style`] succeeds.
    pub fn with_live_style(self, supported: bool) -> Self {
        self.state.borrow_mut().reject_live_style = !supported;
        self
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.state.borrow().calls.clone()
    }

    /// Drain the recorded calls.
    pub fn take_calls(&self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.state.borrow_mut().calls)
    }

    /// Style carried by the most recent present or reconfigure.
    pub fn last_style(&self) -> Option<StyleConfig> {
        self.state.borrow().last_style.clone()
    }

    pub fn count(&self, matches: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| matches(*c)).count()
    }

    fn record(&self, call: SurfaceCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl ModalSurface for FakeSurface {
    fn present(&mut self, request: PresentRequest<'_>) {
        self.state.borrow_mut().last_style = Some(request.style.clone());
        self.record(SurfaceCall::Present {
            detents: request.detents.to_vec(),
            selected: request.selected,
        });
    }

    fn dismiss(&mut self) {
        self.record(SurfaceCall::Dismiss);
    }

    fn reconfigure(&mut self, request: PresentRequest<'_>) {
        self.state.borrow_mut().last_style = Some(request.style.clone());
        self.record(SurfaceCall::Reconfigure {
            detents: request.detents.to_vec(),
            selected: request.selected,
        });
    }

    fn select_detent(&mut self, index: usize, height: f64) {
        self.record(SurfaceCall::SelectDetent { index, height });
    }

    fn set_dismissible(&mut self, dismissible: bool) {
        self.record(SurfaceCall::SetDismissible(dismissible));
    }

    fn patch_style(&mut self, knob: StyleKnob) -> Result<(), Unsupported> {
        if self.state.borrow().reject_live_style {
            return Err(Unsupported { knob: knob.name() });
        }
        self.record(SurfaceCall::PatchStyle(knob));
        Ok(())
    }
}

#[derive(Debug)]
struct HostState {
    can_present: bool,
    available_height: f64,
    bottom_inset: f64,
    inserted: Vec<ViewId>,
    removed: Vec<ViewId>,
    touch_target: Option<ViewId>,
    sizes: Vec<(ViewId, Size)>,
    layouts: Vec<LayoutPlan>,
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            can_present: true,
            available_height: 800.0,
            bottom_inset: 0.0,
            inserted: Vec::new(),
            removed: Vec::new(),
            touch_target: None,
            sizes: Vec::new(),
            layouts: Vec::new(),
        }
    }
}

/// Recording [`HostSurface`] with adjustable geometry.
///
/// Defaults: presentable, 800pt available, no bottom inset.
#[derive(Debug, Clone, Default)]
pub struct FakeHost {
    state: Rc<RefCell<HostState>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_available_height(self, height: f64) -> Self {
        self.state.borrow_mut().available_height = height;
        self
    }

    pub fn with_bottom_inset(self, inset: f64) -> Self {
        self.state.borrow_mut().bottom_inset = inset;
        self
    }

    pub fn set_can_present(&self, can_present: bool) {
        self.state.borrow_mut().can_present = can_present;
    }

    pub fn set_available_height(&self, height: f64) {
        self.state.borrow_mut().available_height = height;
    }

    pub fn inserted(&self) -> Vec<ViewId> {
        self.state.borrow().inserted.clone()
    }

    pub fn removed(&self) -> Vec<ViewId> {
        self.state.borrow().removed.clone()
    }

    pub fn touch_target(&self) -> Option<ViewId> {
        self.state.borrow().touch_target
    }

    /// Last size pushed to `view`.
    pub fn size_of(&self, view: ViewId) -> Option<Size> {
        self.state
            .borrow()
            .sizes
            .iter()
            .rev()
            .find(|(v, _)| *v == view)
            .map(|(_, size)| *size)
    }

    pub fn layouts(&self) -> Vec<LayoutPlan> {
        self.state.borrow().layouts.clone()
    }

    pub fn last_layout(&self) -> Option<LayoutPlan> {
        self.state.borrow().layouts.last().cloned()
    }
}

impl HostSurface for FakeHost {
    fn can_present(&self) -> bool {
        self.state.borrow().can_present
    }

    fn available_height(&self) -> f64 {
        self.state.borrow().available_height
    }

    fn bottom_safe_inset(&self) -> f64 {
        self.state.borrow().bottom_inset
    }

    fn insert_container(&mut self, container: ViewId) {
        self.state.borrow_mut().inserted.push(container);
    }

    fn remove_container(&mut self, container: ViewId) {
        self.state.borrow_mut().removed.push(container);
    }

    fn forward_touches(&mut self, target: Option<ViewId>) {
        self.state.borrow_mut().touch_target = target;
    }

    fn set_view_size(&mut self, view: ViewId, size: Size) {
        self.state.borrow_mut().sizes.push((view, size));
    }

    fn apply_layout(&mut self, plan: &LayoutPlan) {
        self.state.borrow_mut().layouts.push(plan.clone());
    }
}

/// [`EventEmitter`] that records every event.
#[derive(Debug, Clone, Default)]
pub struct RecordingEmitter {
    events: Rc<RefCell<Vec<SheetEvent>>>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SheetEvent> {
        self.events.borrow().clone()
    }

    /// Number of events with the given bridge name.
    pub fn count(&self, name: &str) -> usize {
        self.events.borrow().iter().filter(|e| e.name() == name).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl EventEmitter for RecordingEmitter {
    fn emit(&mut self, event: SheetEvent) {
        self.events.borrow_mut().push(event);
    }
}
