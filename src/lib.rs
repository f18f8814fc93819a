//! Parametric rocket airframe mesh generator.
//!
//! Turns a handful of design scalars (length, diameter, nose length, sweep and
//! wing/fin planforms) into a positioned set of closed triangle meshes: a
//! cylindrical body, an ogive nose, four wings and four fins.
//!
//! ```
//! use airframe_gen::params::RawInputs;
//! use airframe_gen::regenerate::RegenerationController;
//!
//! let mut controller = RegenerationController::default();
//! let assembly = controller.on_parameter_change(&RawInputs::default()).unwrap();
//! assert_eq!(assembly.len(), 10);
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod export;
pub mod extrude;
pub mod math;
pub mod mesh;
pub mod outline;
pub mod params;
pub mod placement;
pub mod prediction;
pub mod profile;
pub mod regenerate;

pub use assembler::{assemble, Assembly, Part, PartKind};
pub use error::{GeometryError, Result};
pub use params::{BuildSettings, DesignParameters, Mode, RawInputs};
pub use regenerate::RegenerationController;
