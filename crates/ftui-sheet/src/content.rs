#![forbid(unsafe_code)]

//! Content graph: the single attached container, its content view, and its
//! footer.
//!
//! # Invariants
//!
//! 1. At most one container is attached. A second [`ContentGraph::attach`]
//!    is rejected and leaves the first one intact.
//! 2. [`ContentGraph::detach`] only accepts the attached container, and
//!    clears container, content and footer together.
//! 3. The footer is always in exactly one [`FooterState`]; its measured
//!    height only counts while it is [`FooterState::Active`].
//! 4. [`ContentGraph::measure`] is never negative.

use crate::error::IntegrationMisuse;
use crate::host::{Edges, FooterLayout, LayoutPlan, Pin, ViewId};

/// A container as handed over by the host.
///
/// The content and footer views are named explicitly rather than found by
/// child position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    pub id: ViewId,
    pub content: Option<ViewId>,
    pub footer: Option<ViewId>,
}

impl Container {
    pub const fn new(id: ViewId) -> Self {
        Self {
            id,
            content: None,
            footer: None,
        }
    }

    pub const fn content(mut self, content: ViewId) -> Self {
        self.content = Some(content);
        self
    }

    pub const fn footer(mut self, footer: ViewId) -> Self {
        self.footer = Some(footer);
        self
    }
}

/// Footer participation in sizing and layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FooterState {
    /// The container declares no footer.
    #[default]
    Absent,
    /// A footer view exists but has no inner content.
    Empty(ViewId),
    /// A footer with inner content of the given height.
    Active { view: ViewId, height: f64 },
}

impl FooterState {
    /// Height the footer adds to the content-driven size.
    pub fn height(&self) -> f64 {
        match self {
            Self::Active { height, .. } => *height,
            Self::Absent | Self::Empty(_) => 0.0,
        }
    }

    pub fn view(&self) -> Option<ViewId> {
        match self {
            Self::Absent => None,
            Self::Empty(view) | Self::Active { view, .. } => Some(*view),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Attached {
    container: ViewId,
    content: Option<ViewId>,
    content_height: f64,
    footer: FooterState,
}

/// The sheet's view of the host content it presents.
#[derive(Debug, Clone, Default)]
pub(crate) struct ContentGraph {
    attached: Option<Attached>,
}

impl ContentGraph {
    pub(crate) fn container(&self) -> Option<ViewId> {
        self.attached.map(|a| a.container)
    }

    pub(crate) fn content(&self) -> Option<ViewId> {
        self.attached.and_then(|a| a.content)
    }

    pub(crate) fn footer(&self) -> FooterState {
        self.attached.map(|a| a.footer).unwrap_or_default()
    }

    pub(crate) fn attach(&mut self, container: Container) -> Result<(), IntegrationMisuse> {
        if let Some(current) = &self.attached {
            return Err(IntegrationMisuse::DoubleAttach {
                attached: current.container,
                rejected: container.id,
            });
        }
        self.attached = Some(Attached {
            container: container.id,
            content: container.content,
            content_height: 0.0,
            footer: container.footer.map_or(FooterState::Absent, FooterState::Empty),
        });
        Ok(())
    }

    pub(crate) fn detach(&mut self, container: ViewId) -> Result<(), IntegrationMisuse> {
        match self.attached {
            Some(current) if current.container == container => {
                self.attached = None;
                Ok(())
            }
            other => Err(IntegrationMisuse::ForeignDetach {
                attached: other.map(|a| a.container),
                requested: container,
            }),
        }
    }

    /// Record the content view's measured height. Returns whether it changed.
    pub(crate) fn set_content_height(&mut self, height: f64) -> bool {
        let Some(attached) = self.attached.as_mut() else {
            return false;
        };
        if attached.content_height == height {
            return false;
        }
        attached.content_height = height;
        true
    }

    /// Record the footer's inner content height; `None` or zero marks the
    /// footer empty. Returns whether the footer state changed.
    pub(crate) fn set_footer_height(
        &mut self,
        height: Option<f64>,
    ) -> Result<bool, IntegrationMisuse> {
        let Some(attached) = self.attached.as_mut() else {
            return Ok(false);
        };
        let Some(view) = attached.footer.view() else {
            return Err(IntegrationMisuse::FooterWithoutView);
        };
        let next = match height {
            Some(height) if height > 0.0 => FooterState::Active { view, height },
            _ => FooterState::Empty(view),
        };
        let changed = attached.footer != next;
        attached.footer = next;
        Ok(changed)
    }

    /// Content-driven height: content + active footer − bottom safe inset,
    /// never below zero. Zero without content.
    pub(crate) fn measure(&self, bottom_inset: f64) -> f64 {
        let Some(attached) = &self.attached else {
            return 0.0;
        };
        if attached.content.is_none() {
            return 0.0;
        }
        (attached.content_height + attached.footer.height() - bottom_inset).max(0.0)
    }

    /// Constraints for the attached children, given the optional scrollable
    /// region registered on the sheet.
    pub(crate) fn layout_plan(&self, scrollable: Option<ViewId>) -> Option<LayoutPlan> {
        let attached = self.attached?;
        let mut pins = Vec::with_capacity(2);
        if let Some(content) = attached.content {
            match scrollable {
                Some(scroll) => {
                    pins.push(Pin::new(content, Edges::ALL));
                    pins.push(Pin::new(scroll, Edges::ALL));
                }
                None => pins.push(Pin::new(content, Edges::TOP | Edges::LEFT | Edges::RIGHT)),
            }
        }
        let footer = match attached.footer {
            FooterState::Absent => FooterLayout::Absent,
            FooterState::Empty(view) => FooterLayout::Stashed { view },
            FooterState::Active { view, height } => FooterLayout::Pinned {
                view,
                edges: Edges::BOTTOM | Edges::LEFT | Edges::RIGHT,
                height,
            },
        };
        Some(LayoutPlan {
            container: attached.container,
            pins,
            footer,
        })
    }
}
