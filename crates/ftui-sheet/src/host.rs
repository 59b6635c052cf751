#![forbid(unsafe_code)]

//! Host UI tree capability and the layout vocabulary the sheet speaks to it.
//!
//! The sheet never walks a view hierarchy. It talks to the host through the
//! narrow [`HostSurface`] trait, injected at construction, and describes the
//! layout it wants as a [`LayoutPlan`] the host applies with its own layout
//! engine.

use core::fmt;

use bitflags::bitflags;

/// Opaque identifier for a host view.
///
/// Identifiers are minted by the host; the sheet only compares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    /// Wrap a host-provided identifier.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Width and height in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

bitflags! {
    /// Edges a view is pinned to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Edges: u8 {
        const TOP    = 0b0001;
        const BOTTOM = 0b0010;
        const LEFT   = 0b0100;
        const RIGHT  = 0b1000;
        const ALL    = Self::TOP.bits() | Self::BOTTOM.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

/// Constraint pinning `view` to the given edges of its parent container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub view: ViewId,
    pub edges: Edges,
}

impl Pin {
    pub const fn new(view: ViewId, edges: Edges) -> Self {
        Self { view, edges }
    }
}

/// How the footer takes part in layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FooterLayout {
    /// The container declares no footer.
    Absent,
    /// Footer with content: pinned to the presentation surface, brought to
    /// the front, sized to its own height.
    Pinned {
        view: ViewId,
        edges: Edges,
        height: f64,
    },
    /// Footer without content: sent to the back with every positioning
    /// constraint removed.
    Stashed { view: ViewId },
}

/// Complete set of constraints for the attached container's children.
///
/// Applying a plan replaces whatever the previous plan installed.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub container: ViewId,
    pub pins: Vec<Pin>,
    pub footer: FooterLayout,
}

impl LayoutPlan {
    /// Edges `view` is pinned to, if it is part of the plan.
    pub fn edges_of(&self, view: ViewId) -> Option<Edges> {
        self.pins.iter().find(|pin| pin.view == view).map(|pin| pin.edges)
    }
}

/// Narrow capability the host UI tree provides to a [`Sheet`](crate::Sheet).
pub trait HostSurface {
    /// Whether there is an eligible surface to present onto right now.
    fn can_present(&self) -> bool;

    /// Height available to the sheet's container, in points.
    fn available_height(&self) -> f64;

    /// Bottom safe-area inset of the hosting window.
    fn bottom_safe_inset(&self) -> f64;

    /// Insert the container into the presentation surface.
    fn insert_container(&mut self, container: ViewId);

    /// Remove the container from the presentation surface.
    fn remove_container(&mut self, container: ViewId);

    /// Route touch input to `target`, or stop forwarding with `None`.
    fn forward_touches(&mut self, target: Option<ViewId>);

    /// Push a resolved size to a peer view.
    fn set_view_size(&mut self, view: ViewId, size: Size);

    /// Install the constraints described by `plan`.
    fn apply_layout(&mut self, plan: &LayoutPlan);
}
