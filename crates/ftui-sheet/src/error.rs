#![forbid(unsafe_code)]

//! Error taxonomy.
//!
//! # Failure Modes
//!
//! | Kind | Cause | Behavior |
//! |------|-------|----------|
//! | [`SheetError::InvalidIndex`] | `present(i)` past the configured sizes | Completion rejects, state unchanged |
//! | [`SheetError::NoHost`] | Host has nowhere to present | Completion rejects, state unchanged |
//! | [`SheetError::Abandoned`] | Sheet dropped, or a deferred present superseded by `dismiss` | Completion rejects |
//! | [`IntegrationMisuse`] | Double attach, foreign detach, unsupported style patch, bad props | Logged via `tracing`, never propagated |

use core::fmt;

use thiserror::Error;

use crate::host::ViewId;

/// Errors surfaced through a rejected [`Completion`](crate::Completion).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// The requested snap index is not configured.
    #[error("size index {index} is out of bounds ({len} sizes configured)")]
    InvalidIndex { index: usize, len: usize },
    /// There is no eligible host surface to present onto.
    #[error("no host surface is available to present the sheet")]
    NoHost,
    /// The operation can no longer complete.
    #[error("sheet operation was abandoned before it completed")]
    Abandoned,
}

/// A size value from the property surface could not be understood.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizeSpecError {
    #[error("size `{0}` is not a number, a percentage, a preset, or `auto`")]
    Unrecognized(String),
    #[error("size {0} must be finite and non-negative")]
    OutOfRange(f64),
}

/// Integration misuse: wrong but survivable calls from the host.
///
/// These never fail an operation. [`report`](Self::report) logs them at
/// `warn` level and the caller carries on with state untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrationMisuse {
    /// A container was attached while another one is attached.
    DoubleAttach { attached: ViewId, rejected: ViewId },
    /// Detach was requested for a view that is not the attached container.
    ForeignDetach {
        attached: Option<ViewId>,
        requested: ViewId,
    },
    /// The modal surface cannot patch a style knob while presented.
    UnsupportedStyle { knob: &'static str },
    /// More snap points were configured than the sheet keeps.
    SizesTruncated { requested: usize },
    /// An empty snap point list was configured.
    EmptySizes,
    /// A blur tint name the platform does not know.
    UnknownBlurTint(String),
    /// A size value that could not be parsed; it is skipped.
    InvalidSize(SizeSpecError),
    /// A negative or non-finite height where a height was expected.
    InvalidHeight { field: &'static str, value: f64 },
    /// A footer height was reported but the container declares no footer.
    FooterWithoutView,
}

impl IntegrationMisuse {
    /// Log this misuse. Never panics, never propagates.
    pub fn report(&self) {
        tracing::warn!(misuse = %self, "sheet integration misuse");
    }
}

impl fmt::Display for IntegrationMisuse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DoubleAttach { attached, rejected } => write!(
                f,
                "container {rejected} rejected: {attached} is already attached"
            ),
            Self::ForeignDetach {
                attached: Some(attached),
                requested,
            } => write!(
                f,
                "detach of {requested} ignored: attached container is {attached}"
            ),
            Self::ForeignDetach {
                attached: None,
                requested,
            } => write!(f, "detach of {requested} ignored: nothing is attached"),
            Self::UnsupportedStyle { knob } => {
                write!(f, "{knob} cannot be updated live; queued for next reconfigure")
            }
            Self::SizesTruncated { requested } => write!(
                f,
                "{requested} sizes configured, keeping the first {}",
                crate::size::MAX_SIZES
            ),
            Self::EmptySizes => f.write_str("empty size list, using default sizes"),
            Self::UnknownBlurTint(name) => write!(f, "unknown blur tint `{name}` ignored"),
            Self::InvalidSize(err) => write!(f, "size skipped: {err}"),
            Self::InvalidHeight { field, value } => {
                write!(f, "{field} {value} ignored: must be finite and non-negative")
            }
            Self::FooterWithoutView => {
                f.write_str("footer height reported but the container has no footer view")
            }
        }
    }
}
