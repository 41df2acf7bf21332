//! Per-cycle translation of joint commands into a PWM command.

use chrono::{DateTime, Utc};
use thruster_pwm_table::{DutyCycleMapper, PwmTable};
use tracing::debug;

use crate::config::TaskConfig;
use crate::error::{TaskError, TaskResult};
use crate::joints::{JointMode, Joints};
use crate::pwm::PwmCommand;

/// Mode check plus duty-cycle mapping for one sample.
///
/// Immutable after construction and keeps no state between cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct Translator {
    mapper: DutyCycleMapper,
    expected_mode: JointMode,
}

impl Translator {
    /// Create a translator accepting elements tagged `expected_mode`.
    pub fn new(mapper: DutyCycleMapper, expected_mode: JointMode) -> Self {
        Self {
            mapper,
            expected_mode,
        }
    }

    /// Load the configured table and build a translator from it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Config`] for an invalid configuration and
    /// [`TaskError::Table`] if the table cannot be loaded.
    pub fn from_config(config: &TaskConfig) -> TaskResult<Self> {
        config.validate()?;
        let table = PwmTable::load(&config.command_to_pwm_table_file_path)?;
        debug!(
            path = ?config.command_to_pwm_table_file_path,
            rows = table.len(),
            no_actuation = config.no_actuation_pwm_command,
            mode = %config.cmd_in_mode,
            "Built translator"
        );

        let mapper = DutyCycleMapper::new(table, config.no_actuation_pwm_command)
            .with_optional_dead_zone(config.dead_zone);
        Ok(Self::new(mapper, config.cmd_in_mode))
    }

    /// Mode every element must carry.
    pub fn expected_mode(&self) -> JointMode {
        self.expected_mode
    }

    /// The duty-cycle mapper.
    pub fn mapper(&self) -> &DutyCycleMapper {
        &self.mapper
    }

    /// Check every element's mode.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidCommandMode`] for the first element whose
    /// mode differs from the expected one.
    pub fn validate(&self, joints: &Joints) -> TaskResult<()> {
        let mismatch = joints
            .elements
            .iter()
            .enumerate()
            .find(|(_, element)| element.mode != self.expected_mode);

        match mismatch {
            Some((index, element)) => Err(TaskError::InvalidCommandMode {
                index,
                expected: self.expected_mode,
                actual: element.mode,
            }),
            None => Ok(()),
        }
    }

    /// Translate a sample, stamping the result with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidCommandMode`] if any element has the wrong
    /// mode; no widths are computed in that case.
    pub fn translate(&self, joints: &Joints) -> TaskResult<PwmCommand> {
        self.translate_at(joints, Utc::now())
    }

    /// Translate a sample with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Same as [`Translator::translate`].
    pub fn translate_at(
        &self,
        joints: &Joints,
        timestamp: DateTime<Utc>,
    ) -> TaskResult<PwmCommand> {
        self.validate(joints)?;

        let mut duty_cycles = Vec::with_capacity(joints.len());
        self.mapper.effort_duty_cycles_into(
            joints.elements.iter().map(|element| element.value),
            &mut duty_cycles,
        );
        Ok(PwmCommand::new(timestamp, duty_cycles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joints::JointCommand;
    use thruster_pwm_table::loader;
    use thruster_pwm_test_helpers::{must, must_err};

    fn translator() -> Translator {
        let table = must(loader::parse_str("-1.0,1100\n0.0,1500\n1.0,1900\n"));
        Translator::new(DutyCycleMapper::new(table, 1490), JointMode::Effort)
    }

    #[test]
    fn test_translate_keeps_order() {
        let joints = Joints::efforts([1.0, -1.0, 0.0, 0.5, -0.25]);
        let command = must(translator().translate(&joints));
        assert_eq!(command.duty_cycles, vec![1900, 1100, 1490, 1700, 1400]);
    }

    #[test]
    fn test_dead_zone_bounds_hold_for_single_precision_efforts() {
        let table = must(loader::parse_str("-1.0,1100\n0.0,1500\n1.0,1900\n"));
        let mapper = DutyCycleMapper::new(table, 42)
            .with_dead_zone(must(thruster_pwm_table::DeadZone::new(-0.3, 0.3)));
        let translator = Translator::new(mapper, JointMode::Effort);

        let command = must(translator.translate(&Joints::efforts([0.3, -0.3, 0.1, 0.5])));
        assert_eq!(command.duty_cycles, vec![42, 42, 42, 1700]);
    }

    #[test]
    fn test_translate_at_uses_timestamp() {
        let at = Utc::now();
        let command = must(translator().translate_at(&Joints::efforts([0.5]), at));
        assert_eq!(command.timestamp, at);
    }

    #[test]
    fn test_first_mismatch_is_reported() {
        let joints = Joints::new(vec![
            JointCommand::effort(0.1),
            JointCommand::raw(0.2),
            JointCommand::new(JointMode::Speed, 0.3),
        ]);
        let err = must_err(translator().translate(&joints));
        assert!(matches!(
            err,
            TaskError::InvalidCommandMode {
                index: 1,
                expected: JointMode::Effort,
                actual: JointMode::Raw
            }
        ));
    }

    #[test]
    fn test_empty_sample_gives_empty_command() {
        let command = must(translator().translate(&Joints::new(Vec::new())));
        assert!(command.is_empty());
    }

    #[test]
    fn test_translator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Translator>();
    }
}
