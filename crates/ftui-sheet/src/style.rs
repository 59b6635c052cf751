#![forbid(unsafe_code)]

//! Sheet styling knobs and the construction-time configuration builder.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::size::{SizeSpec, default_sizes, normalize_sizes};

/// Platform blur material behind the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlurTint {
    Light,
    ExtraLight,
    Dark,
    Regular,
    Prominent,
    SystemUltraThinMaterial,
    SystemThinMaterial,
    SystemMaterial,
    SystemThickMaterial,
    SystemChromeMaterial,
}

impl BlurTint {
    /// Every tint, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Light,
        Self::ExtraLight,
        Self::Dark,
        Self::Regular,
        Self::Prominent,
        Self::SystemUltraThinMaterial,
        Self::SystemThinMaterial,
        Self::SystemMaterial,
        Self::SystemThickMaterial,
        Self::SystemChromeMaterial,
    ];

    /// Property-surface name of this tint.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::ExtraLight => "extraLight",
            Self::Dark => "dark",
            Self::Regular => "regular",
            Self::Prominent => "prominent",
            Self::SystemUltraThinMaterial => "systemUltraThinMaterial",
            Self::SystemThinMaterial => "systemThinMaterial",
            Self::SystemMaterial => "systemMaterial",
            Self::SystemThickMaterial => "systemThickMaterial",
            Self::SystemChromeMaterial => "systemChromeMaterial",
        }
    }
}

impl fmt::Display for BlurTint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a tint name is not one of [`BlurTint::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBlurTint(pub String);

impl FromStr for BlurTint {
    type Err = UnknownBlurTint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tint| tint.as_str() == s)
            .ok_or_else(|| UnknownBlurTint(s.to_owned()))
    }
}

/// Styling state. Every field is independently settable at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    /// Whether the user may dismiss the sheet with platform gestures.
    pub dismissible: bool,
    /// Cap applied to every resolved snap height.
    pub max_height: Option<f64>,
    pub corner_radius: Option<f64>,
    pub grabber_visible: bool,
    pub blur_tint: Option<BlurTint>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            dismissible: true,
            max_height: None,
            corner_radius: None,
            grabber_visible: true,
            blur_tint: None,
        }
    }
}

/// Construction-time configuration for a [`Sheet`](crate::Sheet).
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    pub sizes: Vec<SizeSpec>,
    pub style: StyleConfig,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            style: StyleConfig::default(),
        }
    }
}

impl SheetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the snap points. Lists longer than [`MAX_SIZES`](crate::MAX_SIZES)
    /// are truncated; an empty list falls back to the defaults.
    pub fn sizes(mut self, sizes: impl IntoIterator<Item = SizeSpec>) -> Self {
        self.sizes = normalize_sizes(sizes.into_iter().collect());
        self
    }

    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.style.dismissible = dismissible;
        self
    }

    pub fn max_height(mut self, max_height: f64) -> Self {
        self.style.max_height = Some(max_height);
        self
    }

    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.style.corner_radius = Some(radius);
        self
    }

    pub fn grabber_visible(mut self, visible: bool) -> Self {
        self.style.grabber_visible = visible;
        self
    }

    pub fn blur_tint(mut self, tint: BlurTint) -> Self {
        self.style.blur_tint = Some(tint);
        self
    }
}
