//! Runs the engine once and prints the outcome.

use crate::engine::{SolarEngine, SolarPositionRequest};
use std::io::{self, Write};

/// A failed computation still ends the process successfully: the exit status
/// says the program ran, the stderr line says whether the sun was found.
pub const ENGINE_FAILURE_EXIT: i32 = 0;

pub fn run<E, W, V>(
    request: &SolarPositionRequest,
    engine: &E,
    show_inputs: bool,
    out: &mut W,
    err: &mut V,
) -> io::Result<i32>
where
    E: SolarEngine,
    W: Write,
    V: Write,
{
    let cal = &request.calendar;
    writeln!(
        out,
        "Timezone: {} (local {:02}:{:02}:{:02})",
        format_utc_offset(request.timezone_offset_hours),
        cal.hour,
        cal.minute,
        cal.second
    )?;

    if show_inputs {
        write_inputs(request, out)?;
    }

    match engine.calculate(request) {
        Ok(output) => {
            writeln!(out, "Zenith: {:.6}", output.zenith)?;
            writeln!(out, "Azimuth: {:.6}", output.azimuth)?;
            if let Some(incidence) = output.incidence {
                writeln!(out, "Incidence: {:.6}", incidence)?;
            }
            Ok(0)
        }
        Err(failure) => {
            writeln!(err, "SPA Failed: {}", failure)?;
            Ok(ENGINE_FAILURE_EXIT)
        }
    }
}

fn write_inputs<W: Write>(request: &SolarPositionRequest, out: &mut W) -> io::Result<()> {
    let cal = &request.calendar;
    writeln!(
        out,
        "Date/time: {:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        cal.year, cal.month, cal.day, cal.hour, cal.minute, cal.second
    )?;
    writeln!(out, "Latitude: {:.6}°", request.latitude)?;
    writeln!(out, "Longitude: {:.6}°", request.longitude)?;
    writeln!(out, "Elevation: {:.3} m", request.elevation)?;
    writeln!(out, "Pressure: {:.3} mb", request.pressure)?;
    writeln!(out, "Temperature: {:.3} °C", request.temperature)?;
    writeln!(out, "Slope: {:.3}°", request.slope)?;
    writeln!(out, "Azimuth rotation: {}°", request.azimuth_rotation)?;
    writeln!(
        out,
        "Atmospheric refraction: {:.4}°",
        request.atmospheric_refraction
    )?;
    writeln!(out, "Delta T: {:.3} s", request.delta_t)
}

fn format_utc_offset(hours: f64) -> String {
    let minutes = (hours * 60.0).round() as i64;
    let sign = if minutes < 0 { '-' } else { '+' };
    let (h, m) = (minutes.abs() / 60, minutes.abs() % 60);
    if m == 0 {
        format!("UTC{}{:02}", sign, h)
    } else {
        format!("UTC{}{:02}:{:02}", sign, h, m)
    }
}
