#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Test helper for running sunface with less boilerplate
pub struct SunfaceTest {
    cmd: Command,
}

pub fn sunface_command() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sunface"));
    cmd.env("TZ", "UTC");
    cmd
}

impl SunfaceTest {
    pub fn new() -> Self {
        Self {
            cmd: sunface_command(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn assert_success(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert().success()
    }

    pub fn assert_success_contains_all(mut self, texts: &[&str]) -> assert_cmd::assert::Assert {
        let mut assertion = self.cmd.assert().success();
        for text in texts {
            assertion = assertion.stdout(predicate::str::contains(*text));
        }
        assertion
    }

    /// Assert the exit status and that nothing reached stdout
    pub fn assert_exit_without_result(mut self, code: i32) -> assert_cmd::assert::Assert {
        self.cmd.assert().code(code).stdout(predicate::str::is_empty())
    }

    pub fn stdout(mut self) -> String {
        let output = self.cmd.assert().success().get_output().stdout.clone();
        String::from_utf8(output).unwrap()
    }
}

/// Fixed clock and timezone so results are reproducible
pub fn fixed_observation(extra: &[&str]) -> SunfaceTest {
    SunfaceTest::new()
        .args(["-w", "2024-06-21T12:00:00", "-z", "0"])
        .args(extra)
}

/// Reads the number printed after `<label>: `, ignoring any unit
pub fn reported_value(stdout: &str, label: &str) -> f64 {
    let prefix = format!("{}: ", label);
    stdout
        .lines()
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .unwrap_or_else(|| panic!("no {} line in output:\n{}", label, stdout))
        .split_whitespace()
        .next()
        .and_then(|value| value.trim_end_matches('°').parse().ok())
        .unwrap_or_else(|| panic!("{} is not a number in output:\n{}", label, stdout))
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {} +/- {}, got {}",
        expected,
        tolerance,
        actual
    );
}
