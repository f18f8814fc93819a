//! Regeneration controller: the single entry point for parameter edits.
//!
//! Every accepted edit replaces the whole assembly. A rejected edit leaves
//! the last good assembly in place so the viewer keeps showing it.

use crate::assembler::{assemble, Assembly};
use crate::error::Result;
use crate::params::{BuildSettings, DesignParameters, Mode, RawInputs};

/// Receiver for rebuilt assemblies (the renderer side).
pub trait SceneSink {
    /// Drop every displayed part and show `assembly` instead.
    fn replace_parts(&mut self, assembly: &Assembly);
}

/// Owns the current assembly and rebuilds it from raw inputs.
#[derive(Debug, Clone)]
pub struct RegenerationController {
    settings: BuildSettings,
    current: Assembly,
    params: Option<DesignParameters>,
    body_length: Option<f64>,
}

impl RegenerationController {
    pub fn new(settings: BuildSettings) -> Self {
        Self {
            settings,
            current: Assembly::empty(),
            params: None,
            body_length: None,
        }
    }

    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// The last successfully built assembly (empty before the first one).
    pub fn current(&self) -> &Assembly {
        &self.current
    }

    /// Parameters of the current assembly.
    pub fn params(&self) -> Option<&DesignParameters> {
        self.params.as_ref()
    }

    /// Normalize `raw`, rebuild, and swap in the new assembly.
    ///
    /// # Errors
    ///
    /// Any normalization or geometry error. The current assembly is unchanged.
    pub fn on_parameter_change(&mut self, raw: &RawInputs) -> Result<&Assembly> {
        // The derived field tracks the inputs even when the rebuild fails.
        let nose_length = raw
            .mode
            .parse::<Mode>()
            .ok()
            .and_then(|mode| mode.preset().nose_length)
            .unwrap_or(raw.nose_length);
        self.body_length = if raw.length.is_finite() && nose_length.is_finite() {
            Some(raw.length - nose_length)
        } else {
            None
        };

        let built = DesignParameters::from_raw(raw).and_then(|params| {
            self.body_length = Some(params.body_length);
            assemble(&params, &self.settings).map(|assembly| (params, assembly))
        });

        match built {
            Ok((params, assembly)) => {
                log::info!(
                    "RegenerationController.on_parameter_change | mode='{}' body_length={:.2} parts={}",
                    params.mode,
                    params.body_length,
                    assembly.len()
                );
                self.params = Some(params);
                self.current = assembly;
                Ok(&self.current)
            }
            Err(err) => {
                log::warn!(
                    "RegenerationController.on_parameter_change | rejected, keeping previous assembly: {}",
                    err
                );
                Err(err)
            }
        }
    }

    /// Like [`Self::on_parameter_change`], then hand the result to `sink`.
    /// The sink is not touched when the rebuild fails.
    pub fn on_parameter_change_into(
        &mut self,
        raw: &RawInputs,
        sink: &mut dyn SceneSink,
    ) -> Result<()> {
        let assembly = self.on_parameter_change(raw)?;
        sink.replace_parts(assembly);
        Ok(())
    }

    /// Body length of the last inputs, two decimals. Shows `"0.00"` when the
    /// length or nose length was not a number, and never goes negative.
    pub fn body_length_field(&self) -> String {
        match self.body_length {
            Some(length) if length > 0.0 => format!("{:.2}", length),
            _ => "0.00".to_owned(),
        }
    }
}

impl Default for RegenerationController {
    fn default() -> Self {
        Self::new(BuildSettings::default())
    }
}
