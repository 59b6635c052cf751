#![forbid(unsafe_code)]

//! Size-adaptive sheet overlay for FrankenTUI hosts.
//!
//! A sheet is a panel presented over a host screen at one of up to three
//! snap points ([`SizeSpec`]). This crate owns the parts that are easy to get
//! wrong: the presentation state machine, resolving a snap index into a
//! concrete height, keeping that height in sync with measured content, and
//! the promise-like completion contract of `present`/`dismiss`.
//!
//! Everything platform-specific stays behind two traits:
//!
//! - [`ModalSurface`]: the OS-level modal primitive (show/hide at detents,
//!   corner radius, grabber, blur tint). It reports back through
//!   [`SurfaceEvent`]s that the host feeds into [`Sheet::handle_surface_event`].
//! - [`HostSurface`]: the host UI tree (eligibility, available height, safe
//!   inset, container insertion, peer sizing and layout).
//!
//! Outgoing lifecycle events go to an [`EventEmitter`].
//!
//! # Architecture
//!
//! ```text
//!   owning component ──props──▶ Sheet ──config──▶ PresentationController ──▶ ModalSurface
//!          ▲                     │  ▲                        │
//!          └──── SheetEvent ─────┘  └──── ControllerNotice ──┘◀── SurfaceEvent
//! ```
//!
//! # Example
//!
//! ```ignore
//! use ftui_sheet::{Sheet, SheetConfig, SizeSpec};
//!
//! let config = SheetConfig::new()
//!     .sizes([SizeSpec::Auto, SizeSpec::Percent(50.0), SizeSpec::Fixed(400.0)])
//!     .max_height(500.0);
//! let mut sheet = Sheet::new(host, surface, emitter, config);
//!
//! let done = sheet.present(0);
//! // ... the platform finishes its animation ...
//! sheet.handle_surface_event(SurfaceEvent::PresentFinished);
//! assert!(sheet.is_presented());
//! ```

pub mod completion;
pub mod content;
pub mod controller;
pub mod coordinator;
pub mod error;
pub mod event;
pub mod host;
pub mod props;
pub mod size;
pub mod style;
pub mod surface;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use completion::Completion;
pub use content::{Container, FooterState};
pub use controller::{ControllerNotice, Phase, PresentationController};
pub use coordinator::{PresentationState, Sheet};
pub use error::{IntegrationMisuse, SheetError, SizeSpecError};
pub use event::{EventEmitter, SheetEvent};
pub use host::{Edges, FooterLayout, HostSurface, LayoutPlan, Pin, Size, ViewId};
pub use props::SheetProps;
pub use size::{MAX_SIZES, SizeInfo, SizeSpec, SizeValue};
pub use style::{BlurTint, SheetConfig, StyleConfig};
pub use surface::{ModalSurface, PresentRequest, StyleKnob, SurfaceEvent, Unsupported};
