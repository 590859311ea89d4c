//! Connector capability profiles for vidmode.
//!
//! A [`ConnectorProfile`] is the capability context a mode option is parsed
//! against. The parser only needs the connector type (the `D` flag depends on
//! whether the output is digital); the capability lint also consults the
//! interlace and doublescan flags.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when loading or validating a connector profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// JSON deserialization failed.
    #[error("invalid profile JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field value failed structural validation.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The name of the field that failed validation.
        field: String,
        /// A human-readable explanation of why the field value is invalid.
        reason: String,
    },

    /// A connector type name did not match any known connector.
    #[error("unknown connector type '{0}'")]
    UnknownConnectorType(String),
}

/// DRM connector type.
///
/// Serialized with the kebab-case names used in profile files and on the
/// command line (`hdmi-a`, `9pin-din`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConnectorType {
    /// Connector type not known.
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
    /// Analog VGA.
    #[serde(rename = "vga")]
    Vga,
    /// DVI carrying both analog and digital signals.
    #[serde(rename = "dvi-i")]
    DviI,
    /// Digital-only DVI.
    #[serde(rename = "dvi-d")]
    DviD,
    /// Analog-only DVI.
    #[serde(rename = "dvi-a")]
    DviA,
    /// Composite video.
    #[serde(rename = "composite")]
    Composite,
    /// S-Video.
    #[serde(rename = "svideo")]
    SVideo,
    /// LVDS panel link.
    #[serde(rename = "lvds")]
    Lvds,
    /// Component video.
    #[serde(rename = "component")]
    Component,
    /// 9-pin DIN TV output.
    #[serde(rename = "9pin-din")]
    NinePinDin,
    /// DisplayPort.
    #[serde(rename = "displayport")]
    DisplayPort,
    /// HDMI type A.
    #[serde(rename = "hdmi-a")]
    HdmiA,
    /// HDMI type B (dual link).
    #[serde(rename = "hdmi-b")]
    HdmiB,
    /// Generic TV output.
    #[serde(rename = "tv")]
    Tv,
    /// Embedded DisplayPort.
    #[serde(rename = "edp")]
    Edp,
    /// Virtual connector.
    #[serde(rename = "virtual")]
    Virtual,
    /// MIPI DSI.
    #[serde(rename = "dsi")]
    Dsi,
    /// Parallel display interface.
    #[serde(rename = "dpi")]
    Dpi,
    /// Writeback connector.
    #[serde(rename = "writeback")]
    Writeback,
    /// SPI panel.
    #[serde(rename = "spi")]
    Spi,
    /// USB display.
    #[serde(rename = "usb")]
    Usb,
}

impl ConnectorType {
    /// Every connector type, in DRM enumeration order.
    pub const ALL: [ConnectorType; 21] = [
        ConnectorType::Unknown,
        ConnectorType::Vga,
        ConnectorType::DviI,
        ConnectorType::DviD,
        ConnectorType::DviA,
        ConnectorType::Composite,
        ConnectorType::SVideo,
        ConnectorType::Lvds,
        ConnectorType::Component,
        ConnectorType::NinePinDin,
        ConnectorType::DisplayPort,
        ConnectorType::HdmiA,
        ConnectorType::HdmiB,
        ConnectorType::Tv,
        ConnectorType::Edp,
        ConnectorType::Virtual,
        ConnectorType::Dsi,
        ConnectorType::Dpi,
        ConnectorType::Writeback,
        ConnectorType::Spi,
        ConnectorType::Usb,
    ];

    /// Name as written in profile files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ConnectorType::Unknown => "unknown",
            ConnectorType::Vga => "vga",
            ConnectorType::DviI => "dvi-i",
            ConnectorType::DviD => "dvi-d",
            ConnectorType::DviA => "dvi-a",
            ConnectorType::Composite => "composite",
            ConnectorType::SVideo => "svideo",
            ConnectorType::Lvds => "lvds",
            ConnectorType::Component => "component",
            ConnectorType::NinePinDin => "9pin-din",
            ConnectorType::DisplayPort => "displayport",
            ConnectorType::HdmiA => "hdmi-a",
            ConnectorType::HdmiB => "hdmi-b",
            ConnectorType::Tv => "tv",
            ConnectorType::Edp => "edp",
            ConnectorType::Virtual => "virtual",
            ConnectorType::Dsi => "dsi",
            ConnectorType::Dpi => "dpi",
            ConnectorType::Writeback => "writeback",
            ConnectorType::Spi => "spi",
            ConnectorType::Usb => "usb",
        }
    }

    /// Connectors on which the `D` flag selects digital output.
    pub fn is_digital(self) -> bool {
        matches!(
            self,
            ConnectorType::DviI | ConnectorType::DviD | ConnectorType::HdmiA | ConnectorType::HdmiB
        )
    }

    /// Analog TV outputs, the only connectors where `tv_mode` has an effect.
    pub fn is_tv(self) -> bool {
        matches!(
            self,
            ConnectorType::Composite
                | ConnectorType::SVideo
                | ConnectorType::Component
                | ConnectorType::NinePinDin
                | ConnectorType::Tv
        )
    }
}

impl FromStr for ConnectorType {
    type Err = ProfileError;

    /// Case-insensitive match against [`ConnectorType::name`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ProfileError::UnknownConnectorType(s.to_string()))
    }
}

impl std::fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability context for one display output.
///
/// Capability flags use `Option<bool>` for three-state semantics:
/// - `Some(true)`: the connector supports it
/// - `Some(false)`: the connector definitely does not
/// - `None`: unknown, the capability lint skips the check
///
/// # Example
/// ```
/// use vidmode_profile::{ConnectorProfile, ConnectorType};
///
/// let profile = ConnectorProfile {
///     interlace_allowed: Some(false),
///     ..ConnectorProfile::for_connector(ConnectorType::Edp)
/// };
/// assert!(!profile.connector_type.is_digital());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectorProfile {
    /// Unique profile identifier (e.g., `"laptop-edp"`).
    pub id: String,
    /// Profile schema version for forward compatibility (e.g., `"1.0.0"`).
    pub schema_version: String,
    /// Connector the profile describes.
    pub connector_type: ConnectorType,
    /// Whether the connector can drive interlaced modes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interlace_allowed: Option<bool>,
    /// Whether the connector can drive doublescan modes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doublescan_allowed: Option<bool>,
}

/// Schema version written by [`ConnectorProfile::for_connector`].
pub const PROFILE_SCHEMA_VERSION: &str = "1.0.0";

impl ConnectorProfile {
    /// A profile for `connector_type` with unknown capabilities.
    pub fn for_connector(connector_type: ConnectorType) -> Self {
        Self {
            id: connector_type.name().to_string(),
            schema_version: PROFILE_SCHEMA_VERSION.to_string(),
            connector_type,
            interlace_allowed: None,
            doublescan_allowed: None,
        }
    }
}

impl Default for ConnectorProfile {
    fn default() -> Self {
        Self::for_connector(ConnectorType::Unknown)
    }
}

/// Load and validate a [`ConnectorProfile`] from a JSON or JSONC string.
///
/// Comments and trailing commas are stripped before deserialization. The
/// `id`, `schema_version` and `connector_type` fields are required.
///
/// Structural validation after deserialization:
/// - `id` and `schema_version` must be non-empty
/// - `schema_version` must start with a numeric major version
pub fn load_profile_from_str(s: &str) -> Result<ConnectorProfile, ProfileError> {
    let profile: ConnectorProfile = serde_json::from_str(&vidmode_jsonc_strip::strip_jsonc(s))?;

    if profile.id.trim().is_empty() {
        return Err(ProfileError::InvalidField {
            field: "id".into(),
            reason: "must not be empty".into(),
        });
    }
    if profile.schema_version.trim().is_empty() {
        return Err(ProfileError::InvalidField {
            field: "schema_version".into(),
            reason: "must not be empty".into(),
        });
    }
    let major = profile.schema_version.split('.').next().unwrap_or_default();
    if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProfileError::InvalidField {
            field: "schema_version".into(),
            reason: format!(
                "'{}' does not start with a numeric major version",
                profile.schema_version
            ),
        });
    }

    Ok(profile)
}
