#![forbid(unsafe_code)]

//! Sheet coordinator: the public face of a sheet.
//!
//! [`Sheet`] owns the content graph and the presentation state, drives a
//! [`PresentationController`], and turns controller notices into
//! [`SheetEvent`]s and resolved [`Completion`]s.
//!
//! # Invariants
//!
//! 1. `active_index` is `Some` iff `is_presented`.
//! 2. `Present` is emitted once per new presentation, `Dismiss` once per
//!    presented sheet reaching `Hidden`, and `SizeChange` only for value
//!    changes while presented.
//! 3. Validation failures (`NoHost`, `InvalidIndex`) leave every piece of
//!    state untouched.
//! 4. Overlapping operations never start a second platform transition:
//!    - `present` while presenting joins the in-flight completion;
//!    - `dismiss` while dismissing joins the in-flight completion;
//!    - `dismiss` while presenting waits until the sheet is shown;
//!    - `present` while dismissing waits until the sheet is hidden.
//!
//!    The latest call wins: a `present` issued after a deferred `dismiss`
//!    abandons that dismiss, and vice versa.
//!
//! # Failure Modes
//!
//! | Call | Condition | Behavior |
//! |------|-----------|----------|
//! | `present` | host cannot present | rejects with `NoHost` |
//! | `present` | index out of bounds | rejects with `InvalidIndex` |
//! | `dismiss` | not presented | resolves immediately, no event |
//! | `attach` | container already attached | logged, ignored |
//! | `detach` | not the attached container | logged, ignored |
//! | any | `Sheet` dropped mid-flight | pending completions reject with `Abandoned` |

use core::fmt;

use crate::completion::{Completion, Waiters};
use crate::content::{Container, ContentGraph, FooterState};
use crate::controller::{ControllerNotice, Phase, PresentationController};
use crate::error::{IntegrationMisuse, SheetError};
use crate::event::{EventEmitter, SheetEvent};
use crate::host::{HostSurface, Size, ViewId};
use crate::size::{SizeInfo, SizeSpec};
use crate::style::{BlurTint, SheetConfig};
use crate::surface::{ModalSurface, SurfaceEvent};

/// Presentation state as seen by the owning component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresentationState {
    pub is_presented: bool,
    pub active_index: Option<usize>,
}

impl PresentationState {
    fn presented(index: usize) -> Self {
        Self {
            is_presented: true,
            active_index: Some(index),
        }
    }
}

/// A size-adaptive sheet.
pub struct Sheet {
    host: Box<dyn HostSurface>,
    emitter: Box<dyn EventEmitter>,
    controller: PresentationController,
    graph: ContentGraph,
    scrollable: Option<ViewId>,
    state: PresentationState,
    width: Option<f64>,
    needs_layout: bool,
    present_waiters: Waiters,
    dismiss_waiters: Waiters,
    /// Index a `present` issued while presenting asked for.
    reselect: Option<usize>,
    /// `dismiss` issued while presenting.
    deferred_dismiss: bool,
    /// Index a `present` issued while dismissing asked for.
    deferred_present: Option<usize>,
}

impl fmt::Debug for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sheet")
            .field("controller", &self.controller)
            .field("graph", &self.graph)
            .field("scrollable", &self.scrollable)
            .field("state", &self.state)
            .field("width", &self.width)
            .field("needs_layout", &self.needs_layout)
            .finish_non_exhaustive()
    }
}

impl Sheet {
    /// Create a hidden sheet.
    pub fn new(
        host: Box<dyn HostSurface>,
        surface: Box<dyn ModalSurface>,
        emitter: Box<dyn EventEmitter>,
        config: SheetConfig,
    ) -> Self {
        Self {
            host,
            emitter,
            controller: PresentationController::new(surface, config),
            graph: ContentGraph::default(),
            scrollable: None,
            state: PresentationState::default(),
            width: None,
            needs_layout: false,
            present_waiters: Waiters::default(),
            dismiss_waiters: Waiters::default(),
            reselect: None,
            deferred_dismiss: false,
            deferred_present: None,
        }
    }

    // --- State Queries ---

    #[inline]
    pub fn is_presented(&self) -> bool {
        self.state.is_presented
    }

    #[inline]
    pub fn active_index(&self) -> Option<usize> {
        self.state.active_index
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn controller(&self) -> &PresentationController {
        &self.controller
    }

    /// Snap point currently in effect on the surface.
    pub fn current_size(&self) -> Option<SizeInfo> {
        self.controller.current()
    }

    pub fn container(&self) -> Option<ViewId> {
        self.graph.container()
    }

    pub fn content(&self) -> Option<ViewId> {
        self.graph.content()
    }

    pub fn footer(&self) -> FooterState {
        self.graph.footer()
    }

    pub fn scrollable(&self) -> Option<ViewId> {
        self.scrollable
    }

    // --- Content Graph ---

    /// Attach the sheet's container. Ignored (and logged) when a container
    /// is already attached.
    pub fn attach(&mut self, container: Container) {
        if let Err(misuse) = self.graph.attach(container) {
            misuse.report();
            return;
        }
        self.host.insert_container(container.id);
        self.host.forward_touches(Some(container.id));
        self.needs_layout = true;
        tracing::debug!(container = %container.id, "sheet container attached");
    }

    /// Detach the attached container. Ignored (and logged) for any other view.
    pub fn detach(&mut self, container: ViewId) {
        if let Err(misuse) = self.graph.detach(container) {
            misuse.report();
            return;
        }
        self.host.remove_container(container);
        self.host.forward_touches(None);
        self.needs_layout = false;
        tracing::debug!(container = %container, "sheet container detached");
    }

    /// Content-driven height: content + footer content − bottom safe inset,
    /// never negative. Zero without content.
    pub fn measure_content_height(&self) -> f64 {
        self.graph.measure(self.host.bottom_safe_inset())
    }

    /// Record the content view's measured height.
    pub fn set_content_height(&mut self, height: f64) {
        let Some(height) = checked_height("content height", height) else {
            return;
        };
        if self.graph.set_content_height(height) && self.controller.has_content_driven_size() {
            self.reconfigure();
        }
    }

    /// Record the footer's inner content height; `None` marks it empty.
    pub fn set_footer_height(&mut self, height: Option<f64>) {
        let height = match height {
            Some(h) => match checked_height("footer height", h) {
                Some(h) => Some(h),
                None => return,
            },
            None => None,
        };
        match self.graph.set_footer_height(height) {
            Ok(true) => {
                self.invalidate_layout();
                self.reconfigure();
                self.propagate_size();
            }
            Ok(false) => {}
            Err(misuse) => misuse.report(),
        }
    }

    /// Register (or clear) the internally scrollable region.
    pub fn set_scrollable(&mut self, scrollable: Option<ViewId>) {
        if self.scrollable == scrollable {
            return;
        }
        self.scrollable = scrollable;
        self.invalidate_layout();
    }

    // --- Style Properties ---

    pub fn set_sizes(&mut self, sizes: impl IntoIterator<Item = SizeSpec>) {
        if self.controller.set_sizes(sizes.into_iter().collect()) {
            self.reconfigure();
        }
    }

    pub fn set_max_height(&mut self, max_height: Option<f64>) {
        let max_height = match max_height {
            Some(h) => match checked_height("max height", h) {
                Some(h) => Some(h),
                None => return,
            },
            None => None,
        };
        if self.controller.set_max_height(max_height) {
            self.reconfigure();
        }
    }

    pub fn set_dismissible(&mut self, dismissible: bool) {
        self.controller.set_dismissible(dismissible);
    }

    pub fn set_corner_radius(&mut self, radius: Option<f64>) {
        self.controller.set_corner_radius(radius);
    }

    pub fn set_grabber_visible(&mut self, visible: bool) {
        self.controller.set_grabber_visible(visible);
    }

    pub fn set_blur_tint(&mut self, tint: Option<BlurTint>) {
        self.controller.set_blur_tint(tint);
    }

    // --- Operations ---

    /// Present the sheet at snap `index`, or move a presented sheet there.
    pub fn present(&mut self, index: usize) -> Completion {
        #[cfg(feature = "trace-spans")]
        let _span = tracing::debug_span!("sheet_present", index).entered();

        if let Err(err) = self.validate(index) {
            tracing::debug!(index, error = %err, "present rejected");
            return Completion::rejected(err);
        }

        match self.controller.phase() {
            Phase::Hidden => match self.start_present(index) {
                Ok(()) => self.present_waiters.push(),
                Err(err) => Completion::rejected(err),
            },
            Phase::Presenting => {
                let pending = self.controller.current().map(|c| c.index);
                self.reselect = (pending != Some(index)).then_some(index);
                if std::mem::take(&mut self.deferred_dismiss) {
                    self.dismiss_waiters.resolve_all(Err(SheetError::Abandoned));
                }
                self.present_waiters.push()
            }
            Phase::Shown => {
                let content = self.measure_content_height();
                let available = self.host.available_height();
                match self.controller.select(index, content, available) {
                    Ok(notice) => {
                        self.dispatch(notice);
                        Completion::ready(Ok(()))
                    }
                    Err(err) => Completion::rejected(err),
                }
            }
            Phase::Dismissing => {
                self.deferred_present = Some(index);
                self.present_waiters.push()
            }
        }
    }

    /// Dismiss the sheet. Resolves immediately when it is not presented.
    pub fn dismiss(&mut self) -> Completion {
        #[cfg(feature = "trace-spans")]
        let _span = tracing::debug_span!("sheet_dismiss").entered();

        match self.controller.phase() {
            Phase::Hidden => Completion::ready(Ok(())),
            Phase::Presenting => {
                self.deferred_dismiss = true;
                self.dismiss_waiters.push()
            }
            Phase::Shown => {
                self.controller.begin_dismiss();
                self.dismiss_waiters.push()
            }
            Phase::Dismissing => {
                if self.deferred_present.take().is_some() {
                    self.present_waiters.resolve_all(Err(SheetError::Abandoned));
                }
                self.dismiss_waiters.push()
            }
        }
    }

    /// Feed a platform notification into the sheet.
    pub fn handle_surface_event(&mut self, event: SurfaceEvent) {
        if let Some(notice) = self.controller.on_surface_event(event) {
            self.dispatch(notice);
        }
    }

    // --- Internals ---

    fn validate(&self, index: usize) -> Result<(), SheetError> {
        if !self.host.can_present() {
            return Err(SheetError::NoHost);
        }
        let len = self.controller.sizes().len();
        if index >= len {
            return Err(SheetError::InvalidIndex { index, len });
        }
        Ok(())
    }

    fn start_present(&mut self, index: usize) -> Result<(), SheetError> {
        let content = self.measure_content_height();
        let available = self.host.available_height();
        self.controller
            .begin_present(index, content, available)
            .map(|_| ())
    }

    fn dispatch(&mut self, notice: ControllerNotice) {
        match notice {
            ControllerNotice::Presented(info) => self.on_presented(info),
            ControllerNotice::Dismissed => self.on_dismissed(),
            ControllerNotice::Resized { info, changed } => {
                self.state = PresentationState::presented(info.index);
                if changed {
                    self.emitter.emit(SheetEvent::SizeChange(info));
                }
                self.propagate_size();
            }
            ControllerNotice::WidthChanged(width) => {
                self.width = Some(width);
                self.reconfigure();
                self.propagate_size();
            }
            ControllerNotice::LayoutPass => self.apply_layout(),
        }
    }

    fn on_presented(&mut self, info: SizeInfo) {
        self.state = PresentationState::presented(info.index);
        self.emitter.emit(SheetEvent::Present(info));
        self.present_waiters.resolve_all(Ok(()));
        self.apply_layout();
        self.propagate_size();

        if let Some(index) = self.reselect.take() {
            let content = self.measure_content_height();
            let available = self.host.available_height();
            if let Ok(notice) = self.controller.select(index, content, available) {
                self.dispatch(notice);
            }
        }
        if std::mem::take(&mut self.deferred_dismiss) {
            self.controller.begin_dismiss();
        }
    }

    fn on_dismissed(&mut self) {
        let was_presented = self.state.is_presented;
        self.state = PresentationState::default();
        self.reselect = None;
        self.deferred_dismiss = false;
        if was_presented {
            self.emitter.emit(SheetEvent::Dismiss);
        }
        self.dismiss_waiters.resolve_all(Ok(()));

        match self.deferred_present.take() {
            Some(index) => {
                let started = self
                    .validate(index)
                    .and_then(|()| self.start_present(index));
                if let Err(err) = started {
                    self.present_waiters.resolve_all(Err(err));
                }
            }
            // Platform dropped an in-flight presentation.
            None if !self.present_waiters.is_empty() => {
                self.present_waiters.resolve_all(Err(SheetError::Abandoned));
            }
            None => {}
        }
    }

    fn reconfigure(&mut self) {
        let content = self.measure_content_height();
        let available = self.host.available_height();
        if let Some(notice) = self.controller.reconfigure(content, available) {
            self.dispatch(notice);
        }
    }

    fn invalidate_layout(&mut self) {
        self.needs_layout = true;
        if self.controller.phase().is_visible() {
            self.apply_layout();
        }
    }

    fn apply_layout(&mut self) {
        if !self.needs_layout {
            return;
        }
        if let Some(plan) = self.graph.layout_plan(self.scrollable) {
            self.host.apply_layout(&plan);
            self.needs_layout = false;
        }
    }

    /// Push the current width and resolved height to the container and the
    /// footer.
    fn propagate_size(&mut self) {
        let (Some(width), Some(container), Some(current)) =
            (self.width, self.graph.container(), self.controller.current())
        else {
            return;
        };
        self.host
            .set_view_size(container, Size::new(width, current.value));
        if let FooterState::Active { view, height } = self.graph.footer() {
            self.host.set_view_size(view, Size::new(width, height));
        }
    }
}

fn checked_height(field: &'static str, value: f64) -> Option<f64> {
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        IntegrationMisuse::InvalidHeight { field, value }.report();
        None
    }
}
