#![forbid(unsafe_code)]

//! Declarative property patch from the owning component.
//!
//! The owning component describes the sheet as a bag of camelCase
//! properties. Every property is optional: an absent key leaves the current
//! value alone, while an explicit `null` clears a nullable property.
//!
//! Bad values are integration misuse, not errors. They are logged and
//! skipped, and the rest of the patch still applies.
//!
//! ```
//! use ftui_sheet::SheetProps;
//!
//! let props: SheetProps = serde_json::from_str(
//!     r#"{ "sizes": ["auto", "50%", 400], "maxHeight": 500, "grabber": false }"#,
//! ).unwrap();
//! assert_eq!(props.max_height, Some(Some(500.0)));
//! ```

use serde::{Deserialize, Deserializer};

use crate::coordinator::Sheet;
use crate::error::IntegrationMisuse;
use crate::size::{SizeSpec, SizeValue};
use crate::style::{BlurTint, SheetConfig, UnknownBlurTint};

/// A partial update of the sheet's properties.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SheetProps {
    pub sizes: Option<Vec<SizeValue>>,
    #[serde(deserialize_with = "nullable")]
    pub max_height: Option<Option<f64>>,
    pub dismissible: Option<bool>,
    #[serde(deserialize_with = "nullable")]
    pub corner_radius: Option<Option<f64>>,
    pub grabber: Option<bool>,
    #[serde(deserialize_with = "nullable")]
    pub blur_tint: Option<Option<String>>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key
/// (`None`, via `#[serde(default)]`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl SheetProps {
    /// Apply every present property to `sheet`.
    pub fn apply(self, sheet: &mut Sheet) {
        if let Some(sizes) = self.sizes {
            sheet.set_sizes(parse_sizes(sizes));
        }
        if let Some(max_height) = self.max_height {
            sheet.set_max_height(max_height);
        }
        if let Some(dismissible) = self.dismissible {
            sheet.set_dismissible(dismissible);
        }
        if let Some(radius) = self.corner_radius {
            sheet.set_corner_radius(radius);
        }
        if let Some(grabber) = self.grabber {
            sheet.set_grabber_visible(grabber);
        }
        if let Some(tint) = self.blur_tint {
            sheet.set_blur_tint(tint.as_deref().and_then(parse_tint));
        }
    }

    /// Build a construction-time configuration, starting from the defaults.
    pub fn into_config(self) -> SheetConfig {
        let mut config = SheetConfig::default();
        if let Some(sizes) = self.sizes {
            config = config.sizes(parse_sizes(sizes));
        }
        let style = &mut config.style;
        if let Some(max_height) = self.max_height {
            style.max_height = max_height.filter(|&value| {
                let valid = value.is_finite() && value >= 0.0;
                if !valid {
                    IntegrationMisuse::InvalidHeight {
                        field: "max height",
                        value,
                    }
                    .report();
                }
                valid
            });
        }
        if let Some(dismissible) = self.dismissible {
            style.dismissible = dismissible;
        }
        if let Some(radius) = self.corner_radius {
            style.corner_radius = radius;
        }
        if let Some(grabber) = self.grabber {
            style.grabber_visible = grabber;
        }
        if let Some(tint) = self.blur_tint {
            style.blur_tint = tint.as_deref().and_then(parse_tint);
        }
        config
    }
}

fn parse_sizes(values: Vec<SizeValue>) -> Vec<SizeSpec> {
    values
        .into_iter()
        .filter_map(|value| match SizeSpec::try_from(value) {
            Ok(spec) => Some(spec),
            Err(err) => {
                IntegrationMisuse::InvalidSize(err).report();
                None
            }
        })
        .collect()
}

fn parse_tint(name: &str) -> Option<BlurTint> {
    match name.parse() {
        Ok(tint) => Some(tint),
        Err(UnknownBlurTint(name)) => {
            IntegrationMisuse::UnknownBlurTint(name).report();
            None
        }
    }
}
