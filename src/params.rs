//! Design parameters: raw inputs, mode presets and the normalized snapshot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::extrude::DEFAULT_THICKNESS;
use crate::outline::{self, Outline, REFERENCE_SWEEP_DEG};
use crate::profile::DEFAULT_SEGMENTS;

/// Airframe configuration. Drives the fin style and which fields are locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "NASA")]
    Nasa,
    #[serde(rename = "Von-Karman Nose")]
    VonKarmanNose,
    #[serde(rename = "Missile Shape 1")]
    MissileShape1,
    #[serde(rename = "Missile Shape 2")]
    MissileShape2,
    #[serde(rename = "Missile Shape 3")]
    MissileShape3,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Nasa,
        Mode::VonKarmanNose,
        Mode::MissileShape1,
        Mode::MissileShape2,
        Mode::MissileShape3,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Nasa => "NASA",
            Mode::VonKarmanNose => "Von-Karman Nose",
            Mode::MissileShape1 => "Missile Shape 1",
            Mode::MissileShape2 => "Missile Shape 2",
            Mode::MissileShape3 => "Missile Shape 3",
        }
    }

    pub fn preset(&self) -> &'static ModePreset {
        &PRESETS[*self as usize]
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        Mode::ALL
            .into_iter()
            .find(|m| m.name() == s.trim())
            .ok_or_else(|| GeometryError::invalid("mode", s))
    }
}

/// Fin outline algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinStyle {
    /// Swept relative to [`REFERENCE_SWEEP_DEG`].
    StyleA,
    /// Plain trapezoid; sweep has no effect.
    StyleB,
}

type FinOutlineFn = fn(f64, f64, f64, f64) -> Result<Outline>;

impl FinStyle {
    pub fn outline(&self, root_chord: f64, tip_chord: f64, span: f64, sweep_deg: f64) -> Result<Outline> {
        let build: FinOutlineFn = match self {
            FinStyle::StyleA => outline::fin_outline_style_a,
            FinStyle::StyleB => outline::fin_outline_style_b,
        };
        build(root_chord, tip_chord, span, sweep_deg)
    }
}

/// Per-mode fixed values. `None` fields are user-editable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModePreset {
    pub fin_style: FinStyle,
    pub nose_length: Option<f64>,
    pub sweep_angle_deg: Option<f64>,
}

impl ModePreset {
    pub fn is_locked(&self) -> bool {
        self.nose_length.is_some() || self.sweep_angle_deg.is_some()
    }
}

const LOCKED_NOSE_LENGTH: f64 = 19.32;

const fn locked(sweep: f64) -> ModePreset {
    ModePreset {
        fin_style: FinStyle::StyleB,
        nose_length: Some(LOCKED_NOSE_LENGTH),
        sweep_angle_deg: Some(sweep),
    }
}

// Indexed by `Mode as usize`.
static PRESETS: [ModePreset; 5] = [
    ModePreset {
        fin_style: FinStyle::StyleA,
        nose_length: None,
        sweep_angle_deg: None,
    },
    locked(REFERENCE_SWEEP_DEG),
    locked(4.11),
    locked(19.73),
    locked(10.45),
];

/// Raw scalar group for a ring of wings or fins, in design units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSurface {
    pub root_chord: f64,
    pub tip_chord: f64,
    pub span: f64,
    /// Distance from the nose tip to the root leading edge.
    pub offset: f64,
}

/// Values as entered by the user. Non-numeric text is carried as NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    pub mode: String,
    pub length: f64,
    pub diameter: f64,
    pub nose_length: f64,
    pub sweep_angle_deg: f64,
    #[serde(default)]
    pub mach: f64,
    #[serde(default)]
    pub aoa: f64,
    pub wing: RawSurface,
    pub fin: RawSurface,
}

/// Parse a numeric field the lenient way form inputs do: surrounding
/// whitespace and a trailing `px` unit are ignored; anything else is NaN.
pub fn parse_field(text: &str) -> f64 {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    trimmed.parse().unwrap_or(f64::NAN)
}

impl RawInputs {
    /// Switch to `mode`, forcing its locked values and clearing the flight condition.
    pub fn select_mode(&mut self, mode: Mode) {
        self.mode = mode.name().to_owned();
        let preset = mode.preset();
        if preset.is_locked() {
            self.mach = 0.0;
            self.aoa = 0.0;
        }
        if let Some(ln) = preset.nose_length {
            self.nose_length = ln;
        }
        if let Some(sweep) = preset.sweep_angle_deg {
            self.sweep_angle_deg = sweep;
        }
    }
}

impl Default for RawInputs {
    fn default() -> Self {
        Self {
            mode: Mode::Nasa.name().to_owned(),
            length: 40.0,
            diameter: 2.0,
            nose_length: 8.0,
            sweep_angle_deg: REFERENCE_SWEEP_DEG,
            mach: 0.0,
            aoa: 0.0,
            wing: RawSurface {
                root_chord: 3.0,
                tip_chord: 1.5,
                span: 2.0,
                offset: 12.0,
            },
            fin: RawSurface {
                root_chord: 4.0,
                tip_chord: 2.0,
                span: 3.0,
                offset: 36.0,
            },
        }
    }
}

/// Four-fold surface group in design units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGroup {
    pub root_chord: f64,
    pub tip_chord: f64,
    pub span: f64,
    pub offset: f64,
}

impl SurfaceGroup {
    pub const COUNT: usize = 4;

    fn scaled(&self, k: f64) -> Self {
        Self {
            root_chord: self.root_chord * k,
            tip_chord: self.tip_chord * k,
            span: self.span * k,
            offset: self.offset * k,
        }
    }
}

/// Immutable snapshot used for one regeneration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignParameters {
    pub mode: Mode,
    pub fin_style: FinStyle,
    pub length: f64,
    pub diameter: f64,
    pub nose_length: f64,
    /// Always `length - nose_length`.
    pub body_length: f64,
    pub sweep_angle_deg: f64,
    pub wing: SurfaceGroup,
    pub fin: SurfaceGroup,
}

fn finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::invalid(name, value))
    }
}

fn surface(prefix: [&'static str; 4], raw: &RawSurface) -> Result<SurfaceGroup> {
    Ok(SurfaceGroup {
        root_chord: finite(prefix[0], raw.root_chord)?,
        tip_chord: finite(prefix[1], raw.tip_chord)?,
        span: finite(prefix[2], raw.span)?,
        offset: finite(prefix[3], raw.offset)?,
    })
}

impl DesignParameters {
    /// Normalize raw inputs: parse the mode, apply its locked values, reject
    /// non-numeric fields and derive the body length.
    ///
    /// The body length is not range-checked here; see [`Self::validate`].
    pub fn from_raw(raw: &RawInputs) -> Result<Self> {
        let mode: Mode = raw.mode.parse()?;
        let preset = mode.preset();

        let length = finite("length", raw.length)?;
        let diameter = finite("diameter", raw.diameter)?;
        let nose_length = finite("nose_length", preset.nose_length.unwrap_or(raw.nose_length))?;
        let sweep_angle_deg = finite(
            "sweep_angle_deg",
            preset.sweep_angle_deg.unwrap_or(raw.sweep_angle_deg),
        )?;

        Ok(Self {
            mode,
            fin_style: preset.fin_style,
            length,
            diameter,
            nose_length,
            body_length: length - nose_length,
            sweep_angle_deg,
            wing: surface(
                ["wing.root_chord", "wing.tip_chord", "wing.span", "wing.offset"],
                &raw.wing,
            )?,
            fin: surface(
                ["fin.root_chord", "fin.tip_chord", "fin.span", "fin.offset"],
                &raw.fin,
            )?,
        })
    }

    /// Check the ranges geometry construction relies on.
    pub fn validate(&self) -> Result<()> {
        if self.body_length < 0.0 {
            return Err(GeometryError::InvalidGeometry {
                body_length: self.body_length,
            });
        }
        if self.diameter <= 0.0 {
            return Err(GeometryError::invalid("diameter", self.diameter));
        }
        if self.nose_length < 0.0 {
            return Err(GeometryError::invalid("nose_length", self.nose_length));
        }
        Ok(())
    }

    /// All linear dimensions multiplied by `k`. Angles are unchanged.
    pub fn scaled(&self, k: f64) -> Self {
        Self {
            length: self.length * k,
            diameter: self.diameter * k,
            nose_length: self.nose_length * k,
            body_length: self.body_length * k,
            wing: self.wing.scaled(k),
            fin: self.fin.scaled(k),
            ..*self
        }
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }
}

/// Mesh quality and presentation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Display scale applied to every linear dimension.
    pub scale: f64,
    /// Profile spans along the nose.
    pub nose_segments: usize,
    /// Segments around the body and the nose. One count for both so the
    /// body's forward ring and the nose base ring share their vertices.
    pub radial_segments: u32,
    pub plate_thickness: f64,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            scale: 10.0,
            nose_segments: DEFAULT_SEGMENTS,
            radial_segments: 64,
            plate_thickness: DEFAULT_THICKNESS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(mode.name().parse::<Mode>().unwrap(), mode);
        }
        assert!(matches!(
            "Saturn V".parse::<Mode>(),
            Err(GeometryError::InvalidParameter { name: "mode", .. })
        ));
    }

    #[test]
    fn test_presets() {
        assert_eq!(Mode::Nasa.preset().fin_style, FinStyle::StyleA);
        assert!(!Mode::Nasa.preset().is_locked());
        assert_eq!(Mode::MissileShape1.preset().sweep_angle_deg, Some(4.11));
        assert_eq!(Mode::MissileShape2.preset().sweep_angle_deg, Some(19.73));
        assert_eq!(Mode::MissileShape3.preset().sweep_angle_deg, Some(10.45));
        for mode in &Mode::ALL[1..] {
            assert_eq!(mode.preset().fin_style, FinStyle::StyleB);
            assert_eq!(mode.preset().nose_length, Some(19.32));
        }
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field(" 30 "), 30.0);
        assert_eq!(parse_field("2.5px"), 2.5);
        assert!(parse_field("abc").is_nan());
        assert!(parse_field("").is_nan());
    }

    #[test]
    fn test_body_length_is_derived() {
        let raw = RawInputs {
            length: 30.0,
            nose_length: 5.0,
            ..RawInputs::default()
        };
        let params = DesignParameters::from_raw(&raw).unwrap();
        assert_eq!(params.body_length, 25.0);
        assert!(params.validate().is_ok());

        let scaled = params.scaled(10.0);
        assert_eq!(scaled.body_length, 250.0);
        assert_eq!(scaled.radius(), 10.0);
        assert_eq!(scaled.nose_length, 50.0);
        assert_eq!(scaled.sweep_angle_deg, params.sweep_angle_deg);
    }

    #[test]
    fn test_locked_mode_overrides_inputs() {
        let mut raw = RawInputs {
            nose_length: 3.0,
            sweep_angle_deg: 45.0,
            mode: "Missile Shape 2".into(),
            ..RawInputs::default()
        };
        let params = DesignParameters::from_raw(&raw).unwrap();
        assert_eq!(params.nose_length, 19.32);
        assert_eq!(params.sweep_angle_deg, 19.73);
        assert_eq!(params.fin_style, FinStyle::StyleB);

        // NaN in a locked field does not matter
        raw.nose_length = f64::NAN;
        assert!(DesignParameters::from_raw(&raw).is_ok());
    }

    #[test]
    fn test_select_mode_resets_flight_condition() {
        let mut raw = RawInputs {
            mach: 0.8,
            aoa: 4.0,
            ..RawInputs::default()
        };
        raw.select_mode(Mode::MissileShape1);
        assert_eq!(raw.mode, "Missile Shape 1");
        assert_eq!((raw.mach, raw.aoa), (0.0, 0.0));
        assert_eq!(raw.nose_length, 19.32);
        assert_eq!(raw.sweep_angle_deg, 4.11);

        raw.mach = 0.5;
        raw.select_mode(Mode::Nasa);
        assert_eq!(raw.mach, 0.5);
        assert_eq!(raw.sweep_angle_deg, 4.11);
    }

    #[test]
    fn test_nan_is_invalid_parameter() {
        let raw = RawInputs {
            diameter: f64::NAN,
            ..RawInputs::default()
        };
        assert!(matches!(
            DesignParameters::from_raw(&raw),
            Err(GeometryError::InvalidParameter { name: "diameter", .. })
        ));

        let mut raw = RawInputs::default();
        raw.fin.span = f64::NAN;
        assert!(matches!(
            DesignParameters::from_raw(&raw),
            Err(GeometryError::InvalidParameter { name: "fin.span", .. })
        ));
    }

    #[test]
    fn test_negative_body_length_fails_validation() {
        let raw = RawInputs {
            length: 5.0,
            nose_length: 8.0,
            ..RawInputs::default()
        };
        let params = DesignParameters::from_raw(&raw).unwrap();
        assert_eq!(params.body_length, -3.0);
        assert!(matches!(
            params.validate(),
            Err(GeometryError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_fin_style_dispatch() {
        let a = FinStyle::StyleA.outline(4.0, 2.0, 3.0, 30.0).unwrap();
        let b = FinStyle::StyleB.outline(4.0, 2.0, 3.0, 30.0).unwrap();
        assert_ne!(a, b);
        assert_eq!(b, outline::wing_outline(4.0, 2.0, 3.0).unwrap());
    }
}
