//! Static registries used by the mode option parser.
//!
//! Two closed tables live here:
//!
//! - [`NAMED_MODES`]: legacy analog broadcast modes (`NTSC`, `PAL`, ...) that
//!   may stand in place of a `WxH` resolution, each with its fixed timing.
//! - [`TvNorm`]: the analog TV encoding standards accepted by `tv_mode=`.
//!
//! Both are immutable data. Lookups are exact and case-sensitive.

use serde::{Deserialize, Serialize};

// ─── TV norms ───────────────────────────────────────────────────────────────

/// Analog TV encoding standard selected through the `tv_mode=` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TvNorm {
    /// NTSC with a 4.43 MHz color subcarrier.
    #[serde(rename = "NTSC-443")]
    Ntsc443,
    /// NTSC as broadcast in Japan.
    #[serde(rename = "NTSC-J")]
    NtscJ,
    /// NTSC-M, the North American standard.
    #[serde(rename = "NTSC-M")]
    NtscM,
    /// PAL color at 60 Hz.
    #[serde(rename = "PAL-60")]
    Pal60,
    /// PAL-B.
    #[serde(rename = "PAL-B")]
    PalB,
    /// PAL-D.
    #[serde(rename = "PAL-D")]
    PalD,
    /// PAL-G.
    #[serde(rename = "PAL-G")]
    PalG,
    /// PAL-H.
    #[serde(rename = "PAL-H")]
    PalH,
    /// PAL-I.
    #[serde(rename = "PAL-I")]
    PalI,
    /// PAL-M, 525 lines as used in Brazil.
    #[serde(rename = "PAL-M")]
    PalM,
    /// PAL-N.
    #[serde(rename = "PAL-N")]
    PalN,
    /// PAL-N combination, as used in Argentina.
    #[serde(rename = "PAL-NC")]
    PalNc,
    /// SECAM color at 60 Hz.
    #[serde(rename = "SECAM-60")]
    Secam60,
    /// SECAM-B.
    #[serde(rename = "SECAM-B")]
    SecamB,
    /// SECAM-D.
    #[serde(rename = "SECAM-D")]
    SecamD,
    /// SECAM-G.
    #[serde(rename = "SECAM-G")]
    SecamG,
    /// SECAM-K.
    #[serde(rename = "SECAM-K")]
    SecamK,
    /// SECAM-K1.
    #[serde(rename = "SECAM-K1")]
    SecamK1,
    /// SECAM-L.
    #[serde(rename = "SECAM-L")]
    SecamL,
    /// 480-line interlaced component video.
    #[serde(rename = "HD480I")]
    Hd480I,
    /// 480-line progressive component video.
    #[serde(rename = "HD480P")]
    Hd480P,
    /// 576-line interlaced component video.
    #[serde(rename = "HD576I")]
    Hd576I,
    /// 576-line progressive component video.
    #[serde(rename = "HD576P")]
    Hd576P,
    /// 720-line progressive component video.
    #[serde(rename = "HD720P")]
    Hd720P,
    /// 1080-line interlaced component video.
    #[serde(rename = "HD1080I")]
    Hd1080I,
}

impl TvNorm {
    /// Every norm, in registry order.
    pub const ALL: [TvNorm; 25] = [
        TvNorm::Ntsc443,
        TvNorm::NtscJ,
        TvNorm::NtscM,
        TvNorm::Pal60,
        TvNorm::PalB,
        TvNorm::PalD,
        TvNorm::PalG,
        TvNorm::PalH,
        TvNorm::PalI,
        TvNorm::PalM,
        TvNorm::PalN,
        TvNorm::PalNc,
        TvNorm::Secam60,
        TvNorm::SecamB,
        TvNorm::SecamD,
        TvNorm::SecamG,
        TvNorm::SecamK,
        TvNorm::SecamK1,
        TvNorm::SecamL,
        TvNorm::Hd480I,
        TvNorm::Hd480P,
        TvNorm::Hd576I,
        TvNorm::Hd576P,
        TvNorm::Hd720P,
        TvNorm::Hd1080I,
    ];

    /// Canonical option spelling, e.g. `"NTSC-M"`.
    pub fn name(self) -> &'static str {
        match self {
            TvNorm::Ntsc443 => "NTSC-443",
            TvNorm::NtscJ => "NTSC-J",
            TvNorm::NtscM => "NTSC-M",
            TvNorm::Pal60 => "PAL-60",
            TvNorm::PalB => "PAL-B",
            TvNorm::PalD => "PAL-D",
            TvNorm::PalG => "PAL-G",
            TvNorm::PalH => "PAL-H",
            TvNorm::PalI => "PAL-I",
            TvNorm::PalM => "PAL-M",
            TvNorm::PalN => "PAL-N",
            TvNorm::PalNc => "PAL-NC",
            TvNorm::Secam60 => "SECAM-60",
            TvNorm::SecamB => "SECAM-B",
            TvNorm::SecamD => "SECAM-D",
            TvNorm::SecamG => "SECAM-G",
            TvNorm::SecamK => "SECAM-K",
            TvNorm::SecamK1 => "SECAM-K1",
            TvNorm::SecamL => "SECAM-L",
            TvNorm::Hd480I => "HD480I",
            TvNorm::Hd480P => "HD480P",
            TvNorm::Hd576I => "HD576I",
            TvNorm::Hd576P => "HD576P",
            TvNorm::Hd720P => "HD720P",
            TvNorm::Hd1080I => "HD1080I",
        }
    }

    /// Exact, case-sensitive lookup by canonical spelling.
    pub fn from_name(name: &str) -> Option<TvNorm> {
        Self::ALL.into_iter().find(|norm| norm.name() == name)
    }
}

impl std::fmt::Display for TvNorm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Named modes ────────────────────────────────────────────────────────────

/// Fixed CRTC timing of a named mode.
///
/// Horizontal values are in pixels, vertical values in lines, the pixel clock
/// in kHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTiming {
    /// Pixel clock in kHz.
    pub clock_khz: u32,
    /// Visible width.
    pub hdisplay: u32,
    /// Start of horizontal sync.
    pub hsync_start: u32,
    /// End of horizontal sync.
    pub hsync_end: u32,
    /// Total line length including blanking.
    pub htotal: u32,
    /// Visible height.
    pub vdisplay: u32,
    /// Start of vertical sync.
    pub vsync_start: u32,
    /// End of vertical sync.
    pub vsync_end: u32,
    /// Total frame height including blanking.
    pub vtotal: u32,
    /// Interlaced scan.
    pub interlace: bool,
}

impl DisplayTiming {
    /// Nominal refresh rate in Hz, rounded to the nearest integer.
    ///
    /// Interlaced timings report the field rate, twice the frame rate.
    pub fn refresh_hz(&self) -> u32 {
        let pixels = u64::from(self.htotal) * u64::from(self.vtotal);
        if pixels == 0 {
            return 0;
        }
        let fields = if self.interlace { 2 } else { 1 };
        let num = u64::from(self.clock_khz) * 1000 * fields;
        ((num + pixels / 2) / pixels) as u32
    }
}

/// A named mode usable in place of a `WxH` resolution clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NamedMode {
    /// Canonical, case-sensitive name as written in the mode option.
    pub name: &'static str,
    /// TV norm the mode is broadcast with.
    pub tv_norm: TvNorm,
    /// Fixed timing.
    pub timing: DisplayTiming,
}

const TIMING_480I: DisplayTiming = DisplayTiming {
    clock_khz: 13500,
    hdisplay: 720,
    hsync_start: 736,
    hsync_end: 800,
    htotal: 858,
    vdisplay: 480,
    vsync_start: 486,
    vsync_end: 492,
    vtotal: 525,
    interlace: true,
};

const TIMING_576I: DisplayTiming = DisplayTiming {
    clock_khz: 13500,
    hdisplay: 720,
    hsync_start: 732,
    hsync_end: 795,
    htotal: 864,
    vdisplay: 576,
    vsync_start: 580,
    vsync_end: 586,
    vtotal: 625,
    interlace: true,
};

/// The named-mode registry.
pub static NAMED_MODES: &[NamedMode] = &[
    NamedMode {
        name: "NTSC",
        tv_norm: TvNorm::NtscM,
        timing: TIMING_480I,
    },
    NamedMode {
        name: "NTSC_J",
        tv_norm: TvNorm::NtscJ,
        timing: TIMING_480I,
    },
    NamedMode {
        name: "PAL",
        tv_norm: TvNorm::PalB,
        timing: TIMING_576I,
    },
    NamedMode {
        name: "PAL_M",
        tv_norm: TvNorm::PalM,
        timing: TIMING_480I,
    },
];

/// Exact, case-sensitive lookup in [`NAMED_MODES`].
pub fn named_mode(name: &str) -> Option<&'static NamedMode> {
    NAMED_MODES.iter().find(|mode| mode.name == name)
}
