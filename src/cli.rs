//! Command-line parsing: short options, some with optional values.

use crate::config::{
    DEFAULT_ELEVATION, DEFAULT_PRESSURE, DEFAULT_REFRACTION, DEFAULT_SLOPE, DEFAULT_TEMPERATURE,
    Environment, ObserverParameters, OutputOptions, Parameters,
};
use crate::error::CliError;
use crate::offset::{self, TimezoneSetting};
use crate::time_standard::{self, Clock, DeltaTSetting};

type CliResult<T> = Result<T, CliError>;

/// A parameter label and the exit code used when its value is malformed.
#[derive(Clone, Copy)]
struct ParamSpec {
    label: &'static str,
    code: i32,
}

const BEARING: ParamSpec = ParamSpec {
    label: "Azimuth Rotation",
    code: 1,
};
const LATITUDE: ParamSpec = ParamSpec {
    label: "Latitude",
    code: 2,
};
const LONGITUDE: ParamSpec = ParamSpec {
    label: "Longitude",
    code: 3,
};
const ELEVATION: ParamSpec = ParamSpec {
    label: "Elevation",
    code: 4,
};
const PRESSURE: ParamSpec = ParamSpec {
    label: "Pressure",
    code: 5,
};
const TEMPERATURE: ParamSpec = ParamSpec {
    label: "Temperature",
    code: 6,
};
const SLOPE: ParamSpec = ParamSpec {
    label: "Slope",
    code: 7,
};
const REFRACTION: ParamSpec = ParamSpec {
    label: "Atmospheric Refraction",
    code: 8,
};
const DELTA_T: ParamSpec = ParamSpec {
    label: "Delta T",
    code: 10,
};
const TIMEZONE: ParamSpec = ParamSpec {
    label: "Timezone",
    code: 11,
};
const WALL_CLOCK: ParamSpec = ParamSpec {
    label: "Wall Clock",
    code: 12,
};

/// Values collected while scanning; required parameters stay `None` until seen.
#[derive(Default)]
struct ParseState {
    bearing: Option<f64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    environment: Environment,
    delta_t: Option<DeltaTSetting>,
    timezone: Option<TimezoneSetting>,
    clock: Option<Clock>,
    output: OutputOptions,
}

type ApplyFn = fn(Option<&str>, &mut ParseState) -> CliResult<()>;

enum OptKind {
    /// The value must be present.
    Value(ApplyFn),
    /// The value may be omitted; the handler picks the fallback.
    OptionalValue(ApplyFn),
    Flag(ApplyFn),
}

struct OptionSpec {
    flag: char,
    kind: OptKind,
}

const OPTION_SPECS: &[OptionSpec] = &[
    OptionSpec {
        flag: 'a',
        kind: OptKind::Value(|value, state| {
            state.bearing = Some(parse_f64(BEARING, value)?);
            Ok(())
        }),
    },
    OptionSpec {
        flag: 'u',
        kind: OptKind::Value(|value, state| {
            state.latitude = Some(parse_f64(LATITUDE, value)?);
            Ok(())
        }),
    },
    OptionSpec {
        flag: 'g',
        kind: OptKind::Value(|value, state| {
            state.longitude = Some(parse_f64(LONGITUDE, value)?);
            Ok(())
        }),
    },
    OptionSpec {
        flag: 'e',
        kind: OptKind::OptionalValue(|value, state| {
            state.environment.elevation = parse_or_default(ELEVATION, value, DEFAULT_ELEVATION)?;
            Ok(())
        }),
    },
    OptionSpec {
        flag: 'p',
        kind: OptKind::OptionalValue(|value, state| {
            state.environment.pressure = parse_or_default(PRESSURE, value, DEFAULT_PRESSURE)?;
            Ok(())
        }),
    },
    OptionSpec {
        flag: 't',
        kind: OptKind::OptionalValue(|value, state| {
            state.environment.temperature =
                parse_or_default(TEMPERATURE, value, DEFAULT_TEMPERATURE)?;
            Ok(())
        }),
    },
    OptionSpec {
        flag: 's',
        kind: OptKind::OptionalValue(|value, state| {
            state.environment.slope = parse_or_default(SLOPE, value, DEFAULT_SLOPE)?;
            Ok(())
        }),
    },
    OptionSpec {
        flag: 'r',
        kind: OptKind::OptionalValue(|value, state| {
            state.environment.refraction =
                parse_or_default(REFRACTION, value, DEFAULT_REFRACTION)?;
            Ok(())
        }),
    },
    OptionSpec {
        flag: 'd',
        kind: OptKind::OptionalValue(|value, state| {
            state.delta_t = Some(match value {
                Some(_) => DeltaTSetting::Fixed(parse_f64(DELTA_T, value)?),
                None => DeltaTSetting::Estimated,
            });
            Ok(())
        }),
    },
    OptionSpec {
        flag: 'z',
        kind: OptKind::Value(|value, state| {
            let v = value.unwrap_or_default();
            state.timezone = Some(offset::parse_timezone(v).ok_or_else(|| invalid(TIMEZONE, v))?);
            Ok(())
        }),
    },
    OptionSpec {
        flag: 'w',
        kind: OptKind::Value(|value, state| {
            let v = value.unwrap_or_default();
            let wall_clock =
                time_standard::parse_wall_clock(v).ok_or_else(|| invalid(WALL_CLOCK, v))?;
            state.clock = Some(Clock::Fixed(wall_clock));
            Ok(())
        }),
    },
    OptionSpec {
        flag: 'i',
        kind: OptKind::Flag(|_, state| {
            state.output.incidence = true;
            Ok(())
        }),
    },
    OptionSpec {
        flag: 'v',
        kind: OptKind::Flag(|_, state| {
            state.output.show_inputs = true;
            Ok(())
        }),
    },
];

pub fn parse_cli(args: Vec<String>) -> CliResult<Parameters> {
    let program = args.first().map(String::as_str).unwrap_or("sunface");

    // Help wins wherever it appears, before any value is examined.
    if args.iter().skip(1).any(|arg| arg == "-h" || arg == "--help") {
        return Err(CliError::Help(get_help_text(program)));
    }

    let mut state = ParseState::default();
    let mut remaining = args.iter().skip(1).peekable();

    while let Some(arg) = remaining.next() {
        let Some(flag) = short_flag(arg) else {
            return Err(usage_error(program, format!("Unexpected argument: {}", arg)));
        };
        let Some(spec) = OPTION_SPECS.iter().find(|s| s.flag == flag) else {
            return Err(usage_error(program, format!("Unknown option: -{}", flag)));
        };

        let attached = Some(&arg[2..]).filter(|rest| !rest.is_empty());
        match spec.kind {
            OptKind::Value(handler) => {
                let value = match attached {
                    Some(v) => v,
                    None => next_value(&mut remaining).ok_or(CliError::MissingValue(flag))?,
                };
                handler(Some(value), &mut state)?;
            }
            OptKind::OptionalValue(handler) => {
                let value = attached.or_else(|| next_value(&mut remaining));
                handler(value, &mut state)?;
            }
            OptKind::Flag(handler) => {
                if attached.is_some() {
                    return Err(usage_error(
                        program,
                        format!("Option -{} does not take a value", flag),
                    ));
                }
                handler(None, &mut state)?;
            }
        }
    }

    finish(state)
}

fn finish(state: ParseState) -> CliResult<Parameters> {
    let facing_bearing = state
        .bearing
        .ok_or(CliError::MissingRequired(BEARING.label))?;
    let latitude = state
        .latitude
        .ok_or(CliError::MissingRequired(LATITUDE.label))?;
    let longitude = state
        .longitude
        .ok_or(CliError::MissingRequired(LONGITUDE.label))?;

    Ok(Parameters {
        observer: ObserverParameters {
            facing_bearing,
            latitude,
            longitude,
            environment: state.environment,
        },
        delta_t: state.delta_t.unwrap_or(DeltaTSetting::Compiled),
        timezone: state.timezone.unwrap_or(TimezoneSetting::Detect),
        clock: state.clock.unwrap_or(Clock::System),
        output: state.output,
    })
}

/// `-x` or `-xVALUE` yields `x`; anything else, including any token that
/// reads as a number (`-105.0`, `-inf`), is not an option.
fn short_flag(arg: &str) -> Option<char> {
    if arg.parse::<f64>().is_ok() {
        return None;
    }
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some('-'), Some(c)) if c.is_ascii_alphabetic() => Some(c),
        _ => None,
    }
}

/// Takes the next argument as a value unless it is itself an option.
/// Negative numbers such as `-105.0` count as values.
fn next_value<'a, I>(remaining: &mut std::iter::Peekable<I>) -> Option<&'a str>
where
    I: Iterator<Item = &'a String>,
{
    if remaining.peek().is_some_and(|next| short_flag(next).is_none()) {
        remaining.next().map(String::as_str)
    } else {
        None
    }
}

fn invalid(param: ParamSpec, value: &str) -> CliError {
    CliError::InvalidValue {
        parameter: param.label,
        value: value.to_string(),
        code: param.code,
    }
}

fn parse_f64(param: ParamSpec, value: Option<&str>) -> CliResult<f64> {
    let v = value.unwrap_or_default();
    v.trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or_else(|| invalid(param, v))
}

fn parse_or_default(param: ParamSpec, value: Option<&str>, default: f64) -> CliResult<f64> {
    match value {
        Some(_) => parse_f64(param, value),
        None => Ok(default),
    }
}

fn usage_error(program: &str, message: String) -> CliError {
    CliError::Usage {
        message,
        usage: get_usage_text(program),
    }
}

fn get_usage_text(program: &str) -> String {
    format!(
        "Usage: {} -a <rotation from north> -u <latitude> -g <longitude> [-e <elevation>]\n    \
         [-p <pressure>] [-t <temperature>] [-s <slope>] [-r <refraction>]\n    \
         [-d [<seconds>]] [-z <timezone>] [-w <datetime>] [-i] [-v] [-h]",
        program
    )
}

fn get_help_text(program: &str) -> String {
    let defaults = Environment::default();
    format!(
        r#"sunface {} ({}, {}, built {})
Calculates the sun's zenith and azimuth angles for the current local time.

{}

Options:
  -a <rotation>     Direction facing. North is 0 degrees, positive is east.
  -u <latitude>     Latitude of observer in degrees.
  -g <longitude>    Longitude of observer in degrees.
  -e [<elevation>]  Elevation of observer in meters. Default: {}
  -p [<pressure>]   Atmospheric pressure in millibars. Default: {}
  -t [<celsius>]    Temperature in Celsius. Default: {}
  -s [<slope>]      Slope of the surface in degrees. Default: {}
  -r [<degrees>]    Atmospheric refraction at sunrise/sunset. Default: {}
                    Omitting the value of -e, -p, -t, -s or -r applies the default.
  -d [<seconds>]    Delta T (TT - UT). Default: {} (TT-TAI + TAI-UTC).
                    Without a value, estimate it from the date.
  -z <timezone>     UTC offset in hours (-7, 5.5), as +05:30, or a zone
                    name (Europe/Berlin). Default: detected in whole hours.
  -w <datetime>     Use this local time instead of the clock
                    (2024-06-21T12:00:00).
  -i                Also print the incidence angle on the sloped surface.
  -v                Print the resolved inputs before the result.
  -h                Prints this message.

Exit status:
  0   success, including a failed solar position computation
  1-8 malformed value for -a, -u, -g, -e, -p, -t, -s, -r
  9   missing value or missing required option
  10-12 malformed value for -d, -z, -w
  15  unknown option
"#,
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TARGET"),
        env!("BUILD_DATE"),
        get_usage_text(program),
        defaults.elevation,
        defaults.pressure,
        defaults.temperature,
        defaults.slope,
        defaults.refraction,
        time_standard::DELTA_T,
    )
}
