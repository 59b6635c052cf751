#![forbid(unsafe_code)]

//! Lifecycle events reported to the owning component.
//!
//! Events serialize to the flat shape the bridge forwards:
//!
//! ```text
//! {"type":"onPresent","index":0,"value":500.0}
//! {"type":"onDismiss"}
//! {"type":"onSizeChange","index":1,"value":400.0}
//! ```

use serde::Serialize;

use crate::size::SizeInfo;

/// An event for the owning component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum SheetEvent {
    /// Fired once per successful new presentation.
    #[serde(rename = "onPresent")]
    Present(SizeInfo),
    /// Fired once when a presented sheet reaches `Hidden`.
    #[serde(rename = "onDismiss")]
    Dismiss,
    /// The resolved height changed while presented. Never fired for the
    /// initial presentation.
    #[serde(rename = "onSizeChange")]
    SizeChange(SizeInfo),
}

impl SheetEvent {
    /// Bridge name of this event.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Present(_) => "onPresent",
            Self::Dismiss => "onDismiss",
            Self::SizeChange(_) => "onSizeChange",
        }
    }

    /// Size payload, if the event carries one.
    pub const fn size(&self) -> Option<SizeInfo> {
        match self {
            Self::Present(info) | Self::SizeChange(info) => Some(*info),
            Self::Dismiss => None,
        }
    }
}

/// Sink for [`SheetEvent`]s.
pub trait EventEmitter {
    fn emit(&mut self, event: SheetEvent);
}

impl<F: FnMut(SheetEvent)> EventEmitter for F {
    fn emit(&mut self, event: SheetEvent) {
        self(event);
    }
}
