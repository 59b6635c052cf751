#![forbid(unsafe_code)]

//! The OS-level modal primitive, seen from the sheet.
//!
//! A [`ModalSurface`] shows and hides a panel at a set of detent heights.
//! Show/hide are asynchronous on every platform: the surface starts the
//! transition and the host later reports the outcome by feeding a
//! [`SurfaceEvent`] into [`Sheet::handle_surface_event`](crate::Sheet::handle_surface_event).
//!
//! # Invariants
//!
//! - The sheet calls [`ModalSurface::present`] at most once per transition
//!   out of `Hidden`, and [`ModalSurface::dismiss`] at most once per
//!   transition out of `Shown`.
//! - [`PresentRequest::detents`] always has one entry per configured size and
//!   `selected` is a valid index into it.

use thiserror::Error;

use crate::style::{BlurTint, StyleConfig};

/// Everything the surface needs to show (or reshape) the sheet.
#[derive(Debug, Clone, Copy)]
pub struct PresentRequest<'a> {
    /// Resolved height of every configured snap point, in index order.
    pub detents: &'a [f64],
    /// Detent the sheet should rest at.
    pub selected: usize,
    pub style: &'a StyleConfig,
}

/// A single style knob that can be patched on a live sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleKnob {
    CornerRadius(Option<f64>),
    Grabber(bool),
    BlurTint(Option<BlurTint>),
}

impl StyleKnob {
    /// Knob name for diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CornerRadius(_) => "corner radius",
            Self::Grabber(_) => "grabber",
            Self::BlurTint(_) => "blur tint",
        }
    }

    /// Whether both knobs control the same setting.
    pub fn same_knob(&self, other: &Self) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }
}

/// The platform cannot patch this knob incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{knob} cannot be patched on a live sheet")]
pub struct Unsupported {
    pub knob: &'static str,
}

/// Notifications from the platform, fed back into the sheet by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    /// The present animation finished.
    PresentFinished,
    /// The user started a dismiss gesture the platform accepted.
    WillDismiss,
    /// The sheet is gone, whoever initiated it.
    DismissFinished,
    /// The user dragged the sheet to another detent.
    DetentChanged(usize),
    /// The presentation container changed width (rotation, split view).
    WidthChanged(f64),
    /// The platform ran a layout pass over the sheet's view tree.
    LayoutPass,
}

/// OS-level modal presentation primitive.
pub trait ModalSurface {
    /// Begin showing the sheet. Completion arrives as
    /// [`SurfaceEvent::PresentFinished`].
    fn present(&mut self, request: PresentRequest<'_>);

    /// Begin hiding the sheet. Completion arrives as
    /// [`SurfaceEvent::DismissFinished`].
    fn dismiss(&mut self);

    /// Replace the detents and full style of a visible sheet.
    fn reconfigure(&mut self, request: PresentRequest<'_>);

    /// Move a visible sheet to another detent.
    fn select_detent(&mut self, index: usize, height: f64);

    /// Allow or forbid platform dismiss gestures.
    fn set_dismissible(&mut self, dismissible: bool);

    /// Patch one style knob on a visible sheet, if the platform can.
    fn patch_style(&mut self, knob: StyleKnob) -> Result<(), Unsupported>;
}
