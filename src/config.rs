//! Observer parameters, their documented defaults, and run options.

use crate::offset::TimezoneSetting;
use crate::time_standard::{Clock, DeltaTSetting};

pub const DEFAULT_ELEVATION: f64 = 0.0;
pub const DEFAULT_PRESSURE: f64 = 1013.25;
pub const DEFAULT_TEMPERATURE: f64 = 20.0;
pub const DEFAULT_SLOPE: f64 = 0.0;
pub const DEFAULT_REFRACTION: f64 = 0.567;

/// Atmosphere and surface parameters that fall back to a default when omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub elevation: f64,
    pub pressure: f64,
    pub temperature: f64,
    pub slope: f64,
    pub refraction: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            elevation: DEFAULT_ELEVATION,
            pressure: DEFAULT_PRESSURE,
            temperature: DEFAULT_TEMPERATURE,
            slope: DEFAULT_SLOPE,
            refraction: DEFAULT_REFRACTION,
        }
    }
}

/// Everything known about the observer once the command line is parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverParameters {
    /// Direction the installation faces, degrees from north, clockwise.
    pub facing_bearing: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub environment: Environment,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputOptions {
    pub incidence: bool,
    pub show_inputs: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub observer: ObserverParameters,
    pub delta_t: DeltaTSetting,
    pub timezone: TimezoneSetting,
    pub clock: Clock,
    pub output: OutputOptions,
}
