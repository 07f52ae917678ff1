use predicates::prelude::*;

mod common;
use common::{SunfaceTest, fixed_observation};

#[test]
fn test_help_exits_zero_on_stderr() {
    SunfaceTest::new()
        .args(["-h"])
        .assert_exit_without_result(0)
        .stderr(predicate::str::contains("Usage:"))
        .stderr(predicate::str::contains("-a <rotation>"));
}

#[test]
fn test_help_wins_over_bad_values() {
    SunfaceTest::new()
        .args(["-a", "abc", "-u", "1", "-h"])
        .assert_exit_without_result(0)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_bad_bearing_exits_one_without_computing() {
    SunfaceTest::new()
        .args(["-a", "abc", "-u", "51.5", "-g", "-0.12"])
        .assert_exit_without_result(1)
        .stderr(predicate::str::contains("Azimuth Rotation"));
}

#[test]
fn test_parameter_specific_exit_codes() {
    let cases = [
        ("-u", 2, "Latitude"),
        ("-g", 3, "Longitude"),
        ("-e", 4, "Elevation"),
        ("-p", 5, "Pressure"),
        ("-t", 6, "Temperature"),
        ("-s", 7, "Slope"),
        ("-r", 8, "Atmospheric Refraction"),
        ("-d", 10, "Delta T"),
        ("-z", 11, "Timezone"),
        ("-w", 12, "Wall Clock"),
    ];

    for (flag, code, label) in cases {
        SunfaceTest::new()
            .args(["-a", "0", "-u", "51.5", "-g", "-0.12", flag, "oops"])
            .assert_exit_without_result(code)
            .stderr(predicate::str::contains(label));
    }
}

#[test]
fn test_required_flag_followed_by_flag() {
    SunfaceTest::new()
        .args(["-a", "0", "-u", "-g", "-0.12"])
        .assert_exit_without_result(9)
        .stderr(predicate::str::contains("-u requires operand"));
}

#[test]
fn test_required_option_absent() {
    SunfaceTest::new()
        .args(["-a", "0", "-u", "51.5"])
        .assert_exit_without_result(9)
        .stderr(predicate::str::contains("Longitude"));
}

#[test]
fn test_optional_flag_followed_by_flag_uses_default() {
    fixed_observation(&["-a", "0", "-u", "51.5", "-e", "-g", "-0.12", "-v"])
        .assert_success_contains_all(&["Elevation: 0.000 m", "Zenith: "]);
}

#[test]
fn test_unknown_option() {
    SunfaceTest::new()
        .args(["-a", "0", "-u", "51.5", "-g", "-0.12", "-x"])
        .assert_exit_without_result(15)
        .stderr(predicate::str::contains("Unknown option: -x"))
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_stray_argument() {
    SunfaceTest::new()
        .args(["-a", "0", "-u", "51.5", "-g", "-0.12", "now"])
        .assert_exit_without_result(15);
}

#[test]
fn test_defaults_reach_the_request() {
    fixed_observation(&["-u", "40.0", "-g", "-105.0", "-a", "180", "-e", "1600", "-v"])
        .assert_success_contains_all(&[
            "Elevation: 1600.000 m",
            "Pressure: 1013.250 mb",
            "Temperature: 20.000 °C",
            "Slope: 0.000°",
            "Atmospheric refraction: 0.5670°",
            "Azimuth rotation: 0°",
            "Delta T: 69.184 s",
        ]);
}

#[test]
fn test_negative_values_are_not_flags() {
    fixed_observation(&["-a", "-90", "-u", "-33.9", "-g", "-70.6", "-t", "-5", "-v"])
        .assert_success_contains_all(&[
            "Latitude: -33.900000°",
            "Longitude: -70.600000°",
            "Temperature: -5.000 °C",
            "Azimuth rotation: 90°",
        ]);
}

#[test]
fn test_huge_bearings_are_wrapped() {
    for bearing in ["1e300", "-1e300", "1.7976931348623157e308"] {
        fixed_observation(&["-a", bearing, "-u", "51.5", "-g", "0", "-v"])
            .assert_success()
            .stdout(predicate::str::contains("Azimuth rotation: "))
            .stdout(predicate::str::contains("Zenith: "));
    }
}

#[test]
fn test_non_finite_negative_values() {
    SunfaceTest::new()
        .args(["-a", "-inf", "-u", "1", "-g", "2"])
        .assert_exit_without_result(1)
        .stderr(predicate::str::contains("Azimuth Rotation: invalid number '-inf'"));
    SunfaceTest::new()
        .args(["-a", "0", "-u", "1", "-g", "-nan"])
        .assert_exit_without_result(3);
}

#[test]
fn test_unsupported_timezone_hours() {
    for zone in ["+0530", "19", "-24"] {
        SunfaceTest::new()
            .args(["-a", "0", "-u", "1", "-g", "2", "-z", zone])
            .assert_exit_without_result(11);
    }
}
