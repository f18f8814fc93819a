//! Payloads for the aerodynamic coefficient prediction service.
//!
//! Only the message shapes live here. Transport is the caller's business and
//! plugs in through [`PredictionService`]; geometry never waits on it.

use serde::{Deserialize, Serialize};

use crate::error::PredictionError;
use crate::params::DesignParameters;

/// Request body: `{mode, mach, aoa, ln, swept, lln}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub mode: String,
    pub mach: f64,
    pub aoa: f64,
    /// Nose length.
    pub ln: f64,
    /// Fin sweep angle in degrees.
    pub swept: f64,
    /// Body length, rounded to two decimals.
    pub lln: f64,
}

impl PredictionRequest {
    /// Build a request from normalized (unscaled) parameters and the flight condition.
    pub fn new(params: &DesignParameters, mach: f64, aoa: f64) -> Result<Self, PredictionError> {
        let lln = (params.body_length * 100.0).round() / 100.0;
        let fields = [
            ("mach", mach),
            ("aoa", aoa),
            ("ln", params.nose_length),
            ("swept", params.sweep_angle_deg),
            ("lln", lln),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(PredictionError::InvalidInput(*name));
        }
        Ok(Self {
            mode: params.mode.name().to_owned(),
            mach,
            aoa,
            ln: params.nose_length,
            swept: params.sweep_angle_deg,
            lln,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Response body. A successful answer carries `cl` and `cd`; a failure carries `error`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub cl: Option<f64>,
    #[serde(default)]
    pub cd: Option<f64>,
    #[serde(default)]
    pub warning: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Predicted lift and drag coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficients {
    pub cl: f64,
    pub cd: f64,
    /// Accuracy caveat from the service, if any.
    pub warning: Option<String>,
}

impl PredictionResponse {
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// Interpret the response. `status_ok` is the transport's success flag.
    pub fn into_outcome(self, status_ok: bool) -> Result<Coefficients, PredictionError> {
        if let Some(message) = self.error {
            return Err(PredictionError::Service(message));
        }
        if !status_ok {
            return Err(PredictionError::Service("unknown server error".into()));
        }
        Ok(Coefficients {
            cl: self.cl.ok_or(PredictionError::MissingField("cl"))?,
            cd: self.cd.ok_or(PredictionError::MissingField("cd"))?,
            warning: self.warning.filter(|w| !w.is_empty()),
        })
    }
}

/// A prediction backend.
pub trait PredictionService {
    fn predict(&self, request: &PredictionRequest) -> Result<Coefficients, PredictionError>;
}
