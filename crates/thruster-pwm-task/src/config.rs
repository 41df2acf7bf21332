//! Task configuration.
//!
//! Read once at configure time, either from YAML:
//!
//! ```yaml
//! no_actuation_pwm_command: 1500
//! cmd_in_mode: effort
//! command_to_pwm_table_file_path: t200_16v.csv
//! dead_zone:
//!   min: -0.05
//!   max: 0.05
//! invalid_mode_policy: report
//! ```
//!
//! or with [`TaskConfig::builder`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thruster_pwm_table::DeadZone;
use tracing::debug;

use crate::error::{TaskError, TaskResult};
use crate::joints::JointMode;

/// What the task does after a cycle fails mode validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidModePolicy {
    /// Return the error and keep running.
    #[default]
    Report,
    /// Return the error and enter the error state.
    Escalate,
}

impl fmt::Display for InvalidModePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Report => f.write_str("report"),
            Self::Escalate => f.write_str("escalate"),
        }
    }
}

/// Configuration of a [`ThrusterTask`](crate::ThrusterTask).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    /// Width emitted for zero (and dead-zone) commands.
    pub no_actuation_pwm_command: u32,
    /// Mode every incoming command element must carry.
    #[serde(default)]
    pub cmd_in_mode: JointMode,
    /// Path of the `<command>,<duty_cycle_width>` table.
    pub command_to_pwm_table_file_path: PathBuf,
    /// Optional effort interval mapped to the no-actuation width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dead_zone: Option<DeadZone>,
    /// Reaction to a mode mismatch.
    #[serde(default)]
    pub invalid_mode_policy: InvalidModePolicy,
}

impl TaskConfig {
    /// Start building a configuration for the table at `table_path`.
    pub fn builder(table_path: impl Into<PathBuf>) -> TaskConfigBuilder {
        TaskConfigBuilder {
            config: Self {
                no_actuation_pwm_command: 0,
                cmd_in_mode: JointMode::default(),
                command_to_pwm_table_file_path: table_path.into(),
                dead_zone: None,
                invalid_mode_policy: InvalidModePolicy::default(),
            },
        }
    }

    /// Validate the configuration.
    ///
    /// Dead zone bounds are already checked when the [`DeadZone`] is built.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Config`] if the table path is empty.
    pub fn validate(&self) -> TaskResult<()> {
        if self.command_to_pwm_table_file_path.as_os_str().is_empty() {
            return Err(TaskError::config(
                "command_to_pwm_table_file_path must not be empty",
            ));
        }
        Ok(())
    }

    /// Parse and validate a YAML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::ConfigParse`] for invalid YAML, unknown fields or
    /// an invalid dead zone, and [`TaskError::Config`] if validation fails.
    pub fn from_yaml_str(yaml: &str) -> TaskResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML configuration file.
    ///
    /// A relative table path is resolved against the directory holding the
    /// configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::ConfigIo`] if the file cannot be read, otherwise
    /// the same errors as [`TaskConfig::from_yaml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> TaskResult<Self> {
        let path = path.as_ref();
        debug!(path = ?path, "Reading task configuration");

        let yaml = fs::read_to_string(path).map_err(|source| TaskError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml_str(&yaml)?;

        if config.command_to_pwm_table_file_path.is_relative()
            && let Some(dir) = path.parent()
        {
            config.command_to_pwm_table_file_path =
                dir.join(&config.command_to_pwm_table_file_path);
        }

        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::ConfigSerialize`] if serialization fails, for
    /// example when the table path is not valid UTF-8.
    pub fn to_yaml(&self) -> TaskResult<String> {
        serde_yaml::to_string(self).map_err(TaskError::ConfigSerialize)
    }
}

/// Builder for [`TaskConfig`].
#[derive(Debug, Clone)]
pub struct TaskConfigBuilder {
    config: TaskConfig,
}

impl TaskConfigBuilder {
    /// Set the no-actuation width.
    #[must_use]
    pub fn no_actuation_pwm_command(mut self, width: u32) -> Self {
        self.config.no_actuation_pwm_command = width;
        self
    }

    /// Set the expected input mode.
    #[must_use]
    pub fn cmd_in_mode(mut self, mode: JointMode) -> Self {
        self.config.cmd_in_mode = mode;
        self
    }

    /// Set the dead zone.
    #[must_use]
    pub fn dead_zone(mut self, dead_zone: DeadZone) -> Self {
        self.config.dead_zone = Some(dead_zone);
        self
    }

    /// Set the invalid-mode policy.
    #[must_use]
    pub fn invalid_mode_policy(mut self, policy: InvalidModePolicy) -> Self {
        self.config.invalid_mode_policy = policy;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> TaskResult<TaskConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thruster_pwm_test_helpers::{must, must_err, must_some};

    #[test]
    fn test_from_yaml_minimal_uses_defaults() {
        let config = must(TaskConfig::from_yaml_str(
            "no_actuation_pwm_command: 1500\ncommand_to_pwm_table_file_path: table.csv\n",
        ));
        assert_eq!(config.no_actuation_pwm_command, 1500);
        assert_eq!(config.cmd_in_mode, JointMode::Effort);
        assert_eq!(config.command_to_pwm_table_file_path, PathBuf::from("table.csv"));
        assert_eq!(config.dead_zone, None);
        assert_eq!(config.invalid_mode_policy, InvalidModePolicy::Report);
    }

    #[test]
    fn test_from_yaml_full() {
        let yaml = "\
no_actuation_pwm_command: 42
cmd_in_mode: raw
command_to_pwm_table_file_path: /opt/thrusters/t500.csv
dead_zone:
  min: -0.3
  max: 0.3
invalid_mode_policy: escalate
";
        let config = must(TaskConfig::from_yaml_str(yaml));
        assert_eq!(config.cmd_in_mode, JointMode::Raw);
        assert_eq!(config.invalid_mode_policy, InvalidModePolicy::Escalate);
        let zone = must_some(config.dead_zone, "dead zone configured");
        assert_eq!((zone.min(), zone.max()), (-0.3, 0.3));
    }

    #[test]
    fn test_from_yaml_rejects_bad_input() {
        let missing_path = "no_actuation_pwm_command: 1500\n";
        assert!(matches!(
            TaskConfig::from_yaml_str(missing_path),
            Err(TaskError::ConfigParse(_))
        ));

        let unknown_field =
            "no_actuation_pwm_command: 1500\ncommand_to_pwm_table_file_path: t.csv\nspeed: 3\n";
        assert!(matches!(
            TaskConfig::from_yaml_str(unknown_field),
            Err(TaskError::ConfigParse(_))
        ));

        let inverted_zone = "\
no_actuation_pwm_command: 1500
command_to_pwm_table_file_path: t.csv
dead_zone: { min: 0.2, max: -0.2 }
";
        assert!(matches!(
            TaskConfig::from_yaml_str(inverted_zone),
            Err(TaskError::ConfigParse(_))
        ));

        let bad_mode =
            "no_actuation_pwm_command: 1500\ncommand_to_pwm_table_file_path: t.csv\ncmd_in_mode: torque\n";
        assert!(TaskConfig::from_yaml_str(bad_mode).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_path() {
        let err = must_err(TaskConfig::builder("").no_actuation_pwm_command(1500).build());
        assert!(matches!(err, TaskError::Config(_)));
    }

    #[test]
    fn test_builder() {
        let config = must(
            TaskConfig::builder("thrusters.csv")
                .no_actuation_pwm_command(1500)
                .cmd_in_mode(JointMode::Raw)
                .dead_zone(must(DeadZone::symmetric(0.1)))
                .invalid_mode_policy(InvalidModePolicy::Escalate)
                .build(),
        );
        assert_eq!(config.no_actuation_pwm_command, 1500);
        assert_eq!(config.cmd_in_mode, JointMode::Raw);
        assert!(config.dead_zone.is_some());
        assert_eq!(config.invalid_mode_policy.to_string(), "escalate");
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = must(
            TaskConfig::builder("thrusters.csv")
                .no_actuation_pwm_command(1500)
                .dead_zone(must(DeadZone::new(-0.1, 0.2)))
                .build(),
        );
        let yaml = must(config.to_yaml());
        assert_eq!(must(TaskConfig::from_yaml_str(&yaml)), config);
    }

    #[test]
    fn test_from_path_resolves_relative_table() {
        let dir = must(tempfile::tempdir());
        let config_path = dir.path().join("task.yml");
        must(fs::write(
            &config_path,
            "no_actuation_pwm_command: 1500\ncommand_to_pwm_table_file_path: tables/t200.csv\n",
        ));

        let config = must(TaskConfig::from_path(&config_path));
        assert_eq!(
            config.command_to_pwm_table_file_path,
            dir.path().join("tables/t200.csv")
        );
    }

    #[test]
    fn test_from_path_keeps_absolute_table() {
        let dir = must(tempfile::tempdir());
        let config_path = dir.path().join("task.yml");
        let table = dir.path().join("absolute.csv");
        let yaml = format!(
            "no_actuation_pwm_command: 1500\ncommand_to_pwm_table_file_path: {}\n",
            table.display()
        );
        must(fs::write(&config_path, yaml));

        let config = must(TaskConfig::from_path(&config_path));
        assert_eq!(config.command_to_pwm_table_file_path, table);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = must_err(TaskConfig::from_path("/nonexistent/task.yml"));
        assert!(matches!(err, TaskError::ConfigIo { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_to_yaml_reports_serialization_failure() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/opt/thrusters/t\xff.csv"));
        let config = must(TaskConfig::builder(path).build());
        let err = must_err(config.to_yaml());
        assert!(matches!(err, TaskError::ConfigSerialize(_)));
        assert!(err.to_string().contains("serialize"));
    }
}
