#![forbid(unsafe_code)]

//! Presentation controller: snap points, style, and the presentation phase
//! machine driving the [`ModalSurface`].
//!
//! # State machine
//!
//! ```text
//!            present                PresentFinished
//!   Hidden ───────────▶ Presenting ─────────────────▶ Shown
//!     ▲                                                │
//!     │ DismissFinished             dismiss / WillDismiss
//!     └──────────────── Dismissing ◀───────────────────┘
//! ```
//!
//! The controller never calls back into its owner. Every transition that the
//! owner must react to is returned as a [`ControllerNotice`].
//!
//! # Invariants
//!
//! 1. `detents.len() == sizes.len()` after every present or reconfigure.
//! 2. `current` is `Some` in every phase except `Hidden`.
//! 3. Style changes while `Hidden` never touch the surface.
//! 4. A style knob the surface rejects is queued and flushed by the next full
//!    reconfigure, which always carries the complete [`StyleConfig`].

use core::fmt;

use crate::error::{IntegrationMisuse, SheetError};
use crate::size::{SizeContext, SizeInfo, SizeSpec, normalize_sizes};
use crate::style::{BlurTint, SheetConfig, StyleConfig};
use crate::surface::{ModalSurface, PresentRequest, StyleKnob, SurfaceEvent};

/// Presentation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Not on screen.
    #[default]
    Hidden,
    /// Present requested, waiting for the platform to finish.
    Presenting,
    /// On screen and settled.
    Shown,
    /// Dismiss in progress, waiting for the platform to finish.
    Dismissing,
}

impl Phase {
    /// Whether the sheet is on screen or on its way there or back.
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Whether the platform owes a completion callback.
    #[inline]
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Presenting | Self::Dismissing)
    }
}

/// Notification from the controller to the sheet that owns it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerNotice {
    /// A new presentation settled at this size.
    Presented(SizeInfo),
    /// The sheet reached `Hidden`.
    Dismissed,
    /// The active snap point was switched or re-resolved. `changed` is set
    /// when the resolved height differs from the previous one.
    Resized { info: SizeInfo, changed: bool },
    /// The presentation container changed width.
    WidthChanged(f64),
    /// The platform laid out the sheet's views.
    LayoutPass,
}

/// Owns the snap points, the style, and the modal surface.
pub struct PresentationController {
    surface: Box<dyn ModalSurface>,
    sizes: Vec<SizeSpec>,
    style: StyleConfig,
    phase: Phase,
    current: Option<SizeInfo>,
    detents: Vec<f64>,
    queued: Vec<StyleKnob>,
}

impl fmt::Debug for PresentationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationController")
            .field("sizes", &self.sizes)
            .field("style", &self.style)
            .field("phase", &self.phase)
            .field("current", &self.current)
            .field("detents", &self.detents)
            .field("queued", &self.queued)
            .finish_non_exhaustive()
    }
}

impl PresentationController {
    pub fn new(surface: Box<dyn ModalSurface>, config: SheetConfig) -> Self {
        Self {
            surface,
            sizes: normalize_sizes(config.sizes),
            style: config.style,
            phase: Phase::Hidden,
            current: None,
            detents: Vec::new(),
            queued: Vec::new(),
        }
    }

    // --- State Queries ---

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sizes(&self) -> &[SizeSpec] {
        &self.sizes
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Snap point the surface is showing, or about to show while presenting.
    pub fn current(&self) -> Option<SizeInfo> {
        self.current
    }

    /// Resolved heights last handed to the surface.
    pub fn detents(&self) -> &[f64] {
        &self.detents
    }

    /// Whether any snap point follows the measured content.
    pub fn has_content_driven_size(&self) -> bool {
        self.sizes.iter().any(|spec| spec.is_content_driven())
    }

    /// Style knobs the surface could not patch live.
    pub fn queued_style(&self) -> &[StyleKnob] {
        &self.queued
    }

    // --- Size Resolution ---

    fn context(&self, content_height: f64, available_height: f64) -> SizeContext {
        SizeContext {
            content_height,
            available_height,
            max_height: self.style.max_height,
        }
    }

    /// Resolve snap `index` against a freshly measured content height.
    pub fn resolve(
        &self,
        index: usize,
        content_height: f64,
        available_height: f64,
    ) -> Result<SizeInfo, SheetError> {
        let spec = self.sizes.get(index).ok_or(SheetError::InvalidIndex {
            index,
            len: self.sizes.len(),
        })?;
        let value = spec.resolve(&self.context(content_height, available_height));
        Ok(SizeInfo::new(index, value))
    }

    fn resolve_all(&self, content_height: f64, available_height: f64) -> Vec<f64> {
        let ctx = self.context(content_height, available_height);
        self.sizes.iter().map(|spec| spec.resolve(&ctx)).collect()
    }

    // --- Transitions ---

    /// `Hidden → Presenting`. Resolves every detent and asks the surface to
    /// show the sheet at `index`.
    pub fn begin_present(
        &mut self,
        index: usize,
        content_height: f64,
        available_height: f64,
    ) -> Result<SizeInfo, SheetError> {
        let info = self.resolve(index, content_height, available_height)?;
        debug_assert_eq!(self.phase, Phase::Hidden, "present must start from Hidden");

        self.detents = self.resolve_all(content_height, available_height);
        self.current = Some(info);
        self.phase = Phase::Presenting;
        self.queued.clear();
        tracing::debug!(index, height = info.value, "sheet presenting");

        self.surface.present(PresentRequest {
            detents: &self.detents,
            selected: index,
            style: &self.style,
        });
        Ok(info)
    }

    /// Switch a shown sheet to `index` without re-presenting it.
    pub fn select(
        &mut self,
        index: usize,
        content_height: f64,
        available_height: f64,
    ) -> Result<ControllerNotice, SheetError> {
        let info = self.resolve(index, content_height, available_height)?;
        let detents = self.resolve_all(content_height, available_height);
        let changed = self.current.is_none_or(|current| current.value_differs(&info));
        self.current = Some(info);

        if detents == self.detents {
            self.surface.select_detent(index, info.value);
        } else {
            self.detents = detents;
            self.queued.clear();
            self.surface.reconfigure(PresentRequest {
                detents: &self.detents,
                selected: index,
                style: &self.style,
            });
        }
        tracing::debug!(index, height = info.value, changed, "sheet detent selected");
        Ok(ControllerNotice::Resized { info, changed })
    }

    /// Full reconfiguration pass: re-resolve every detent and the active
    /// snap point, and hand them to the surface along with the whole style.
    ///
    /// Returns a notice when a settled sheet was affected.
    pub fn reconfigure(
        &mut self,
        content_height: f64,
        available_height: f64,
    ) -> Option<ControllerNotice> {
        if !matches!(self.phase, Phase::Presenting | Phase::Shown) {
            return None;
        }
        let previous = self.current?;

        self.detents = self.resolve_all(content_height, available_height);
        let index = previous.index.min(self.detents.len().saturating_sub(1));
        let info = SizeInfo::new(index, self.detents.get(index).copied().unwrap_or(0.0));
        self.current = Some(info);
        self.queued.clear();
        self.surface.reconfigure(PresentRequest {
            detents: &self.detents,
            selected: index,
            style: &self.style,
        });

        if self.phase == Phase::Presenting {
            return None;
        }
        let changed = previous.value_differs(&info);
        tracing::debug!(index, height = info.value, changed, "sheet reconfigured");
        Some(ControllerNotice::Resized { info, changed })
    }

    /// `Shown → Dismissing`. Returns `false` from any other phase.
    pub fn begin_dismiss(&mut self) -> bool {
        if self.phase != Phase::Shown {
            return false;
        }
        self.phase = Phase::Dismissing;
        tracing::debug!("sheet dismissing");
        self.surface.dismiss();
        true
    }

    /// Feed a platform notification through the phase machine.
    pub fn on_surface_event(&mut self, event: SurfaceEvent) -> Option<ControllerNotice> {
        match event {
            SurfaceEvent::PresentFinished => {
                if self.phase != Phase::Presenting {
                    tracing::debug!(phase = ?self.phase, "stray present completion ignored");
                    return None;
                }
                self.phase = Phase::Shown;
                self.current.map(ControllerNotice::Presented)
            }
            SurfaceEvent::WillDismiss => {
                if self.phase == Phase::Shown {
                    self.phase = Phase::Dismissing;
                    tracing::debug!("sheet dismissing by user gesture");
                }
                None
            }
            SurfaceEvent::DismissFinished => {
                if self.phase == Phase::Hidden {
                    tracing::debug!("stray dismiss completion ignored");
                    return None;
                }
                self.phase = Phase::Hidden;
                self.current = None;
                tracing::debug!("sheet hidden");
                Some(ControllerNotice::Dismissed)
            }
            SurfaceEvent::DetentChanged(index) => {
                if self.phase != Phase::Shown {
                    return None;
                }
                let value = *self.detents.get(index)?;
                let info = SizeInfo::new(index, value);
                let changed = self.current.is_none_or(|current| current.value_differs(&info));
                self.current = Some(info);
                Some(ControllerNotice::Resized { info, changed })
            }
            SurfaceEvent::WidthChanged(width) => Some(ControllerNotice::WidthChanged(width)),
            SurfaceEvent::LayoutPass => Some(ControllerNotice::LayoutPass),
        }
    }

    // --- Style Mutation ---

    /// Replace the snap points. Returns `true` when a full reconfigure is
    /// needed because the sheet is on screen.
    pub fn set_sizes(&mut self, sizes: Vec<SizeSpec>) -> bool {
        let sizes = normalize_sizes(sizes);
        if sizes == self.sizes {
            return false;
        }
        self.sizes = sizes;
        self.needs_reconfigure()
    }

    /// Replace the height cap. Returns `true` when a full reconfigure is
    /// needed because the sheet is on screen.
    pub fn set_max_height(&mut self, max_height: Option<f64>) -> bool {
        if max_height == self.style.max_height {
            return false;
        }
        self.style.max_height = max_height;
        self.needs_reconfigure()
    }

    pub fn set_dismissible(&mut self, dismissible: bool) {
        if dismissible == self.style.dismissible {
            return;
        }
        self.style.dismissible = dismissible;
        if self.phase.is_visible() {
            self.surface.set_dismissible(dismissible);
        }
    }

    pub fn set_corner_radius(&mut self, radius: Option<f64>) {
        if radius == self.style.corner_radius {
            return;
        }
        self.style.corner_radius = radius;
        self.patch(StyleKnob::CornerRadius(radius));
    }

    pub fn set_grabber_visible(&mut self, visible: bool) {
        if visible == self.style.grabber_visible {
            return;
        }
        self.style.grabber_visible = visible;
        self.patch(StyleKnob::Grabber(visible));
    }

    pub fn set_blur_tint(&mut self, tint: Option<BlurTint>) {
        if tint == self.style.blur_tint {
            return;
        }
        self.style.blur_tint = tint;
        self.patch(StyleKnob::BlurTint(tint));
    }

    fn needs_reconfigure(&self) -> bool {
        matches!(self.phase, Phase::Presenting | Phase::Shown)
    }

    fn patch(&mut self, knob: StyleKnob) {
        if !matches!(self.phase, Phase::Presenting | Phase::Shown) {
            return;
        }
        if let Err(unsupported) = self.surface.patch_style(knob) {
            IntegrationMisuse::UnsupportedStyle {
                knob: unsupported.knob,
            }
            .report();
            self.queued.retain(|queued| !queued.same_knob(&knob));
            self.queued.push(knob);
        }
    }
}
