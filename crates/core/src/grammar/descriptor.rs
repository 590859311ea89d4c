//! The mode descriptor produced by a successful parse.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use vidmode_tables::{NamedMode, TvNorm, named_mode};

/// Forced connection state requested by the `e`, `d` or `D` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Force {
    /// No force flag given; connection state comes from detection.
    #[default]
    Unspecified,
    /// `e`: treat the output as connected.
    On,
    /// `d`: treat the output as disconnected.
    Off,
    /// `D` on a digital connector: connected, digital signal.
    OnDigital,
}

impl Force {
    /// The flag letter that requests this state, if any.
    pub fn flag(self) -> Option<char> {
        match self {
            Force::Unspecified => None,
            Force::On => Some('e'),
            Force::Off => Some('d'),
            Force::OnDigital => Some('D'),
        }
    }
}

bitflags! {
    /// Plane rotation and reflection, using the DRM rotation property bits.
    ///
    /// Exactly one `ROTATE_*` bit is set; the reflection bits are independent.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct RotationReflection: u32 {
        /// No rotation.
        const ROTATE_0 = 0x01;
        /// 90 degrees counter clockwise.
        const ROTATE_90 = 0x02;
        /// 180 degrees.
        const ROTATE_180 = 0x04;
        /// 270 degrees counter clockwise.
        const ROTATE_270 = 0x08;
        /// Mirror along the X axis.
        const REFLECT_X = 0x10;
        /// Mirror along the Y axis.
        const REFLECT_Y = 0x20;
    }
}

impl RotationReflection {
    /// All rotation bits.
    pub const ROTATE_MASK: Self = Self::ROTATE_0
        .union(Self::ROTATE_90)
        .union(Self::ROTATE_180)
        .union(Self::ROTATE_270);

    /// Rotation bit for a whole number of degrees, if it is a right angle.
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Self::ROTATE_0),
            90 => Some(Self::ROTATE_90),
            180 => Some(Self::ROTATE_180),
            270 => Some(Self::ROTATE_270),
            _ => None,
        }
    }

    /// Rotation in degrees. Defaults to 0 if no rotation bit is set.
    pub fn degrees(self) -> u32 {
        if self.contains(Self::ROTATE_270) {
            270
        } else if self.contains(Self::ROTATE_180) {
            180
        } else if self.contains(Self::ROTATE_90) {
            90
        } else {
            0
        }
    }

    /// Replace the rotation bit, keeping reflections.
    pub fn with_rotation(self, rotation: Self) -> Self {
        (self - Self::ROTATE_MASK) | (rotation & Self::ROTATE_MASK)
    }
}

impl Default for RotationReflection {
    fn default() -> Self {
        Self::ROTATE_0
    }
}

/// Overscan margins in pixels, set by the `margin_*` options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TvMargins {
    /// Left margin.
    pub left: u32,
    /// Right margin.
    pub right: u32,
    /// Top margin.
    pub top: u32,
    /// Bottom margin.
    pub bottom: u32,
}

impl TvMargins {
    /// `true` when every margin is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Physical mounting of a fixed panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelOrientation {
    /// Mounted upright.
    Normal,
    /// Mounted upside down.
    UpsideDown,
    /// Left side of the panel points up.
    LeftUp,
    /// Right side of the panel points up.
    RightUp,
}

impl PanelOrientation {
    /// Every orientation.
    pub const ALL: [PanelOrientation; 4] = [
        PanelOrientation::Normal,
        PanelOrientation::UpsideDown,
        PanelOrientation::LeftUp,
        PanelOrientation::RightUp,
    ];

    /// Canonical option value.
    pub fn name(self) -> &'static str {
        match self {
            PanelOrientation::Normal => "normal",
            PanelOrientation::UpsideDown => "upside_down",
            PanelOrientation::LeftUp => "left_up",
            PanelOrientation::RightUp => "right_up",
        }
    }

    /// Lookup by option value, accepting `left_side_up` and `right_side_up`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left_side_up" => Some(PanelOrientation::LeftUp),
            "right_side_up" => Some(PanelOrientation::RightUp),
            _ => Self::ALL.into_iter().find(|o| o.name() == name),
        }
    }
}

/// Structured form of a mode option string.
///
/// Created zeroed and filled in by a single parse. `xres`/`yres` are only
/// meaningful when a resolution clause was given; a named mode sets `name`
/// instead and leaves them at 0.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModeDescriptor {
    /// A resolution or named mode was given.
    pub specified: bool,
    /// Horizontal resolution.
    pub xres: u32,
    /// Vertical resolution.
    pub yres: u32,
    /// An `@refresh` suffix was given.
    pub refresh_specified: bool,
    /// Refresh rate in Hz.
    pub refresh: u32,
    /// A `-bpp` suffix was given.
    pub bpp_specified: bool,
    /// Color depth in bits per pixel.
    pub bpp: u32,
    /// `R`: reduced blanking.
    pub reduced_blanking: bool,
    /// `M`: CVT timing.
    pub cvt: bool,
    /// `i`: interlaced scan.
    pub interlace: bool,
    /// `m`: add margins.
    pub margins: bool,
    /// Forced connection state.
    pub force: Force,
    /// Canonical named mode, e.g. `"PAL"`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    /// Rotation and reflection.
    pub rotation_reflection: RotationReflection,
    /// Overscan margins.
    pub tv_margins: TvMargins,
    /// Analog TV norm.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tv_mode: Option<TvNorm>,
    /// Panel orientation override.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub panel_orientation: Option<PanelOrientation>,
}

impl ModeDescriptor {
    /// Registry entry of the named mode, if one was given.
    pub fn named_mode(&self) -> Option<&'static NamedMode> {
        self.name.as_deref().and_then(named_mode)
    }

    /// Whether the resulting mode scans interlaced, either through the `i`
    /// flag or because the named mode is interlaced.
    pub fn is_interlaced(&self) -> bool {
        self.interlace || self.named_mode().is_some_and(|m| m.timing.interlace)
    }
}
