//! Solar position engine: request assembly and the SPA adapter.
//!
//! The ephemeris itself comes from `solar_positioning::spa`. This module keeps
//! the engine's calling contract: inputs are range-checked up front and every
//! failure is reported as a numeric code, refraction uses the caller's
//! horizon refraction, and the surface incidence angle is available as an
//! extra output.

use crate::azimuth::facing_to_rotation;
use crate::config::Parameters;
use crate::time_standard::CalendarFields;
use chrono::{FixedOffset, NaiveDateTime, TimeZone};
use solar_positioning::spa;
use std::fmt;

/// Apparent solar radius in degrees.
const SUN_RADIUS: f64 = 0.26667;

/// Code for failures the SPA input checks have no number for.
pub const COMPUTATION_FAILED: i32 = 20;

/// Which outputs the engine should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaFunction {
    ZenithAzimuth,
    ZenithAzimuthIncidence,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolarPositionRequest {
    pub calendar: CalendarFields,
    /// TT - UT in seconds.
    pub delta_t: f64,
    /// Hours east of UTC.
    pub timezone_offset_hours: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub pressure: f64,
    pub temperature: f64,
    pub slope: f64,
    /// Surface rotation from south, whole degrees in `[0, 360)`.
    pub azimuth_rotation: i32,
    pub atmospheric_refraction: f64,
    pub function: SpaFunction,
}

impl SolarPositionRequest {
    pub fn assemble(params: &Parameters, wall_clock: NaiveDateTime) -> Self {
        let calendar = CalendarFields::from_wall_clock(&wall_clock);
        let observer = &params.observer;
        let environment = &observer.environment;

        Self {
            calendar,
            delta_t: params.delta_t.resolve(&calendar),
            timezone_offset_hours: params.timezone.resolve(wall_clock),
            latitude: observer.latitude,
            longitude: observer.longitude,
            elevation: environment.elevation,
            pressure: environment.pressure,
            temperature: environment.temperature,
            slope: environment.slope,
            azimuth_rotation: facing_to_rotation(observer.facing_bearing),
            atmospheric_refraction: environment.refraction,
            function: if params.output.incidence {
                SpaFunction::ZenithAzimuthIncidence
            } else {
                SpaFunction::ZenithAzimuth
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaOutput {
    /// Topocentric zenith angle in degrees, refraction applied.
    pub zenith: f64,
    /// Topocentric azimuth in degrees, from north, clockwise.
    pub azimuth: f64,
    pub incidence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineFailure {
    pub code: i32,
    pub reason: String,
}

impl EngineFailure {
    fn new(code: i32, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for EngineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.reason)
    }
}

impl From<solar_positioning::Error> for EngineFailure {
    fn from(err: solar_positioning::Error) -> Self {
        use solar_positioning::Error;

        let code = match &err {
            Error::InvalidDateTime { .. } => 1,
            Error::InvalidLongitude { .. } => 9,
            Error::InvalidLatitude { .. } => 10,
            Error::InvalidPressure { .. } => 12,
            Error::InvalidTemperature { .. } => 13,
            _ => COMPUTATION_FAILED,
        };
        Self::new(code, err.to_string())
    }
}

pub trait SolarEngine {
    fn calculate(&self, request: &SolarPositionRequest) -> Result<SpaOutput, EngineFailure>;
}

/// NREL SPA via `solar_positioning`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaEngine;

impl SolarEngine for SpaEngine {
    fn calculate(&self, request: &SolarPositionRequest) -> Result<SpaOutput, EngineFailure> {
        validate(request)?;

        let datetime = local_datetime(request)?;
        let geometric = spa::solar_position(
            datetime,
            request.latitude,
            request.longitude,
            request.elevation,
            request.delta_t,
            None,
        )?;

        let elevation_angle = 90.0 - geometric.zenith_angle();
        let zenith = 90.0
            - (elevation_angle
                + refraction_correction(
                    request.pressure,
                    request.temperature,
                    request.atmospheric_refraction,
                    elevation_angle,
                ));
        let azimuth = geometric.azimuth();

        let incidence = match request.function {
            SpaFunction::ZenithAzimuth => None,
            SpaFunction::ZenithAzimuthIncidence => Some(surface_incidence(
                zenith,
                azimuth,
                f64::from(request.azimuth_rotation),
                request.slope,
            )),
        };

        Ok(SpaOutput {
            zenith,
            azimuth,
            incidence,
        })
    }
}

fn validate(request: &SolarPositionRequest) -> Result<(), EngineFailure> {
    let cal = &request.calendar;

    if !(-2000..=6000).contains(&cal.year) {
        return Err(EngineFailure::new(1, "year out of range"));
    }
    if !(1..=12).contains(&cal.month) {
        return Err(EngineFailure::new(2, "month out of range"));
    }
    if !(1..=31).contains(&cal.day) {
        return Err(EngineFailure::new(3, "day out of range"));
    }
    if cal.hour > 24 {
        return Err(EngineFailure::new(4, "hour out of range"));
    }
    if cal.minute > 59 || (cal.hour == 24 && cal.minute > 0) {
        return Err(EngineFailure::new(5, "minute out of range"));
    }
    if cal.second > 59 || (cal.hour == 24 && cal.second > 0) {
        return Err(EngineFailure::new(6, "second out of range"));
    }
    if !(0.0..=5000.0).contains(&request.pressure) {
        return Err(EngineFailure::new(12, "pressure out of range"));
    }
    if request.temperature <= -273.0 || request.temperature > 6000.0 {
        return Err(EngineFailure::new(13, "temperature out of range"));
    }
    if request.delta_t.abs() > 8000.0 {
        return Err(EngineFailure::new(7, "delta T out of range"));
    }
    if request.timezone_offset_hours.abs() > 18.0 {
        return Err(EngineFailure::new(8, "timezone out of range"));
    }
    if request.longitude.abs() > 180.0 {
        return Err(EngineFailure::new(9, "longitude out of range"));
    }
    if request.latitude.abs() > 90.0 {
        return Err(EngineFailure::new(10, "latitude out of range"));
    }
    if request.atmospheric_refraction.abs() > 5.0 {
        return Err(EngineFailure::new(16, "atmospheric refraction out of range"));
    }
    if request.elevation < -6_500_000.0 {
        return Err(EngineFailure::new(11, "elevation out of range"));
    }

    if request.function == SpaFunction::ZenithAzimuthIncidence {
        if request.slope.abs() > 360.0 {
            return Err(EngineFailure::new(14, "slope out of range"));
        }
        if request.azimuth_rotation.abs() > 360 {
            return Err(EngineFailure::new(15, "azimuth rotation out of range"));
        }
    }

    Ok(())
}

fn local_datetime(
    request: &SolarPositionRequest,
) -> Result<chrono::DateTime<FixedOffset>, EngineFailure> {
    let offset_seconds = (request.timezone_offset_hours * 3600.0).round() as i32;
    let offset = FixedOffset::east_opt(offset_seconds)
        .ok_or_else(|| EngineFailure::new(8, "timezone out of range"))?;
    let naive = request
        .calendar
        .to_naive()
        .ok_or_else(|| EngineFailure::new(3, "day out of range for month"))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| EngineFailure::new(COMPUTATION_FAILED, "unresolvable local time"))
}

/// Refraction lift in degrees, applied only while the sun's upper limb is no
/// lower than `atmos_refract` below the horizon.
fn refraction_correction(
    pressure: f64,
    temperature: f64,
    atmos_refract: f64,
    elevation_angle: f64,
) -> f64 {
    if elevation_angle >= -(SUN_RADIUS + atmos_refract) {
        (pressure / 1010.0) * (283.0 / (273.0 + temperature)) * 1.02
            / (60.0
                * (elevation_angle + 10.3 / (elevation_angle + 5.11))
                    .to_radians()
                    .tan())
    } else {
        0.0
    }
}

fn surface_incidence(zenith: f64, azimuth: f64, azimuth_rotation: f64, slope: f64) -> f64 {
    let azimuth_astro = (azimuth - 180.0).rem_euclid(360.0);
    let zenith = zenith.to_radians();
    let slope = slope.to_radians();
    let cos_incidence = zenith.cos() * slope.cos()
        + slope.sin() * zenith.sin() * (azimuth_astro - azimuth_rotation).to_radians().cos();
    cos_incidence.clamp(-1.0, 1.0).acos().to_degrees()
}
