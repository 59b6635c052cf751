#![forbid(unsafe_code)]

//! Snap point specifications and the size resolution algorithm.
//!
//! A [`SizeSpec`] describes one snap point. Resolving it against a
//! [`SizeContext`] yields a concrete height:
//!
//! | Spec | Resolved height |
//! |------|-----------------|
//! | `Fixed(v)` | `v` |
//! | `Percent(p)` | `p / 100 × available` |
//! | `Small` / `Medium` / `Large` | 25% / 50% / 100% of available |
//! | `Auto` | measured content height |
//!
//! The result is then clamped to `[0, max_height]` when a cap is configured,
//! otherwise to `[0, available]`.
//!
//! # Invariants
//!
//! 1. A resolved height is always finite and `>= 0`.
//! 2. At most [`MAX_SIZES`] specs survive [`normalize_sizes`]; order is kept.
//! 3. [`normalize_sizes`] never returns an empty list.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{IntegrationMisuse, SizeSpecError};

/// Maximum number of snap points a sheet keeps.
pub const MAX_SIZES: usize = 3;

/// One configured snap point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SizeValue", into = "SizeValue")]
pub enum SizeSpec {
    /// Height follows the measured content.
    Auto,
    /// Literal height in points.
    Fixed(f64),
    /// Percentage (`0..=100`) of the available container height.
    Percent(f64),
    /// Quarter of the available height.
    Small,
    /// Half of the available height.
    Medium,
    /// Full available height.
    Large,
}

impl SizeSpec {
    /// Resolve this spec to a clamped height.
    pub fn resolve(self, ctx: &SizeContext) -> f64 {
        let available = finite_or_zero(ctx.available_height).max(0.0);
        let raw = match self {
            Self::Auto => finite_or_zero(ctx.content_height),
            Self::Fixed(value) => value,
            Self::Percent(pct) => pct / 100.0 * available,
            Self::Small => 0.25 * available,
            Self::Medium => 0.5 * available,
            Self::Large => available,
        };
        let ceiling = match ctx.max_height {
            Some(max) => finite_or_zero(max).max(0.0),
            None => available,
        };
        finite_or_zero(raw.clamp(0.0, ceiling))
    }

    /// Whether the resolved height depends on measured content.
    #[inline]
    pub fn is_content_driven(self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Fixed(value) => write!(f, "{value}"),
            Self::Percent(pct) => write!(f, "{pct}%"),
            Self::Small => f.write_str("small"),
            Self::Medium => f.write_str("medium"),
            Self::Large => f.write_str("large"),
        }
    }
}

impl FromStr for SizeSpec {
    type Err = SizeSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "auto" => return Ok(Self::Auto),
            "small" => return Ok(Self::Small),
            "medium" => return Ok(Self::Medium),
            "large" => return Ok(Self::Large),
            _ => {}
        }

        let unrecognized = || SizeSpecError::Unrecognized(s.to_owned());
        if let Some(pct) = trimmed.strip_suffix('%') {
            let pct: f64 = pct.trim().parse().map_err(|_| unrecognized())?;
            return Ok(Self::Percent(checked(pct)?));
        }
        let value: f64 = trimmed.parse().map_err(|_| unrecognized())?;
        Ok(Self::Fixed(checked(value)?))
    }
}

/// Untyped size value as it arrives from the owning component.
///
/// Numbers map to [`SizeSpec::Fixed`]; strings go through [`SizeSpec::from_str`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeValue {
    Points(f64),
    Text(String),
}

impl TryFrom<SizeValue> for SizeSpec {
    type Error = SizeSpecError;

    fn try_from(value: SizeValue) -> Result<Self, Self::Error> {
        match value {
            SizeValue::Points(points) => Ok(Self::Fixed(checked(points)?)),
            SizeValue::Text(text) => text.parse(),
        }
    }
}

impl From<SizeSpec> for SizeValue {
    fn from(spec: SizeSpec) -> Self {
        match spec {
            SizeSpec::Fixed(points) => Self::Points(points),
            other => Self::Text(other.to_string()),
        }
    }
}

fn checked(value: f64) -> Result<f64, SizeSpecError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SizeSpecError::OutOfRange(value))
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Inputs needed to turn a [`SizeSpec`] into a height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeContext {
    /// Content-driven height, already adjusted for footer and safe inset.
    pub content_height: f64,
    /// Height of the container the sheet is presented in.
    pub available_height: f64,
    /// Optional cap applied after resolution.
    pub max_height: Option<f64>,
}

/// The height currently in effect and the snap index it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeInfo {
    pub index: usize,
    pub value: f64,
}

impl SizeInfo {
    pub const fn new(index: usize, value: f64) -> Self {
        Self { index, value }
    }

    /// Whether `other` differs in resolved height (the index is ignored).
    #[inline]
    pub fn value_differs(&self, other: &Self) -> bool {
        self.value != other.value
    }
}

/// Default snap points when none are configured.
pub fn default_sizes() -> Vec<SizeSpec> {
    vec![SizeSpec::Medium, SizeSpec::Large]
}

/// Enforce the snap point cap: truncate past [`MAX_SIZES`] and fall back to
/// [`default_sizes`] for an empty list. Both cases are reported as misuse.
pub fn normalize_sizes(mut sizes: Vec<SizeSpec>) -> Vec<SizeSpec> {
    if sizes.is_empty() {
        IntegrationMisuse::EmptySizes.report();
        return default_sizes();
    }
    if sizes.len() > MAX_SIZES {
        IntegrationMisuse::SizesTruncated {
            requested: sizes.len(),
        }
        .report();
        sizes.truncate(MAX_SIZES);
    }
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx(content: f64, available: f64, max: Option<f64>) -> SizeContext {
        SizeContext {
            content_height: content,
            available_height: available,
            max_height: max,
        }
    }

    #[test]
    fn auto_clamped_to_max_height() {
        let c = ctx(600.0, 800.0, Some(500.0));
        assert_eq!(SizeSpec::Auto.resolve(&c), 500.0);
    }

    #[test]
    fn percent_of_available_then_capped() {
        let c = ctx(600.0, 800.0, Some(500.0));
        assert_eq!(SizeSpec::Percent(50.0).resolve(&c), 400.0);
        assert_eq!(SizeSpec::Percent(100.0).resolve(&c), 500.0);
    }

    #[test]
    fn fixed_is_literal_under_cap() {
        let c = ctx(600.0, 800.0, Some(500.0));
        assert_eq!(SizeSpec::Fixed(400.0).resolve(&c), 400.0);
    }

    #[test]
    fn without_cap_clamps_to_available() {
        let c = ctx(1200.0, 800.0, None);
        assert_eq!(SizeSpec::Auto.resolve(&c), 800.0);
        assert_eq!(SizeSpec::Fixed(900.0).resolve(&c), 800.0);
    }

    #[test]
    fn presets_resolve_as_percentages() {
        let c = ctx(0.0, 800.0, None);
        assert_eq!(SizeSpec::Small.resolve(&c), 200.0);
        assert_eq!(SizeSpec::Medium.resolve(&c), 400.0);
        assert_eq!(SizeSpec::Large.resolve(&c), 800.0);
    }

    #[test]
    fn non_finite_inputs_resolve_to_zero() {
        let c = ctx(f64::NAN, 800.0, None);
        assert_eq!(SizeSpec::Auto.resolve(&c), 0.0);
        let c = ctx(100.0, f64::INFINITY, None);
        assert_eq!(SizeSpec::Auto.resolve(&c), 0.0);
    }

    #[test]
    fn infinite_fixed_saturates_at_ceiling() {
        let capped = ctx(0.0, 800.0, Some(500.0));
        assert_eq!(SizeSpec::Fixed(f64::INFINITY).resolve(&capped), 500.0);
        let uncapped = ctx(0.0, 800.0, None);
        assert_eq!(SizeSpec::Fixed(f64::INFINITY).resolve(&uncapped), 800.0);
        assert_eq!(SizeSpec::Fixed(f64::NAN).resolve(&uncapped), 0.0);
    }

    #[test]
    fn parse_property_strings() {
        assert_eq!("auto".parse::<SizeSpec>(), Ok(SizeSpec::Auto));
        assert_eq!(" 50% ".parse::<SizeSpec>(), Ok(SizeSpec::Percent(50.0)));
        assert_eq!("400".parse::<SizeSpec>(), Ok(SizeSpec::Fixed(400.0)));
        assert_eq!("Large".parse::<SizeSpec>(), Ok(SizeSpec::Large));
    }

    #[test]
    fn parse_rejects_garbage_and_negatives() {
        assert!(matches!(
            "tall".parse::<SizeSpec>(),
            Err(SizeSpecError::Unrecognized(_))
        ));
        assert!(matches!(
            "-5%".parse::<SizeSpec>(),
            Err(SizeSpecError::OutOfRange(_))
        ));
        assert!(SizeSpec::try_from(SizeValue::Points(f64::NAN)).is_err());
    }

    #[test]
    fn serde_accepts_mixed_list() {
        let sizes: Vec<SizeSpec> = serde_json::from_str(r#"["auto", "50%", 400]"#).unwrap();
        assert_eq!(
            sizes,
            vec![SizeSpec::Auto, SizeSpec::Percent(50.0), SizeSpec::Fixed(400.0)]
        );
        let back = serde_json::to_string(&sizes).unwrap();
        assert_eq!(back, r#"["auto","50%",400.0]"#);
    }

    #[test]
    fn normalize_truncates_to_three() {
        let sizes = vec![SizeSpec::Fixed(1.0); 5];
        assert_eq!(normalize_sizes(sizes).len(), MAX_SIZES);
    }

    #[test]
    fn normalize_empty_falls_back_to_defaults() {
        assert_eq!(normalize_sizes(Vec::new()), default_sizes());
    }

    fn any_spec() -> impl Strategy<Value = SizeSpec> {
        prop_oneof![
            Just(SizeSpec::Auto),
            Just(SizeSpec::Small),
            Just(SizeSpec::Medium),
            Just(SizeSpec::Large),
            (0.0f64..5000.0).prop_map(SizeSpec::Fixed),
            (0.0f64..200.0).prop_map(SizeSpec::Percent),
        ]
    }

    proptest! {
        #[test]
        fn resolved_height_within_bounds(
            spec in any_spec(),
            content in -1000.0f64..5000.0,
            available in 0.0f64..3000.0,
            max in proptest::option::of(0.0f64..3000.0),
        ) {
            let c = ctx(content, available, max);
            let h = spec.resolve(&c);
            prop_assert!(h >= 0.0);
            prop_assert!(h <= max.unwrap_or(available));
        }

        #[test]
        fn normalize_keeps_prefix(specs in proptest::collection::vec(any_spec(), 1..8)) {
            let kept = normalize_sizes(specs.clone());
            prop_assert!(kept.len() <= MAX_SIZES);
            prop_assert_eq!(&kept[..], &specs[..kept.len()]);
        }
    }
}
