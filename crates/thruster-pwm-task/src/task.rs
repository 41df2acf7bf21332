//! The thruster translation task and its lifecycle.

use serde::{Deserialize, Serialize};
use tracing::{info, trace, warn};

use crate::config::{InvalidModePolicy, TaskConfig};
use crate::error::{TaskError, TaskResult};
use crate::ports::{CommandSource, PwmSink, ReadStatus};
use crate::state::TaskState;
use crate::translate::Translator;

/// Result of one successful [`ThrusterTask::update`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No new sample was available; nothing was written.
    NoData,
    /// A PWM command with these widths was written to the sink.
    Emitted {
        /// Widths in input order.
        duty_cycles: Vec<u32>,
    },
}

/// Cycle counters, kept across stop/start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    /// Calls to `update` while running.
    pub cycles: u64,
    /// PWM commands written to the sink.
    pub emitted: u64,
    /// Cycles without new data.
    pub no_data: u64,
    /// Cycles rejected for a mode mismatch.
    pub mode_errors: u64,
    /// Commands the sink refused.
    pub sink_errors: u64,
}

/// Cycle-driven effort to PWM translation task.
///
/// The host calls [`configure`](Self::configure) once, then
/// [`start`](Self::start), then [`update`](Self::update) once per control
/// cycle.
///
/// # Example
///
/// ```no_run
/// use std::collections::VecDeque;
/// use thruster_pwm_task::{Joints, PwmCommand, TaskConfig, ThrusterTask};
///
/// let config = TaskConfig::builder("thrusters.csv")
///     .no_actuation_pwm_command(1500)
///     .build()?;
///
/// let mut task = ThrusterTask::new();
/// task.configure(config)?;
/// task.start()?;
///
/// let mut input = VecDeque::from([Joints::efforts([0.4, -0.2])]);
/// let mut output: Vec<PwmCommand> = Vec::new();
/// task.update(&mut input, &mut output)?;
/// # Ok::<(), thruster_pwm_task::TaskError>(())
/// ```
#[derive(Debug, Default)]
pub struct ThrusterTask {
    state: TaskState,
    config: Option<TaskConfig>,
    translator: Option<Translator>,
    stats: TaskStats,
}

impl ThrusterTask {
    /// Create an unconfigured task.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Cycle counters.
    pub fn stats(&self) -> &TaskStats {
        &self.stats
    }

    /// Active configuration, if configured.
    pub fn config(&self) -> Option<&TaskConfig> {
        self.config.as_ref()
    }

    /// Active translator, if configured.
    pub fn translator(&self) -> Option<&Translator> {
        self.translator.as_ref()
    }

    /// Validate `config` and load its table.
    ///
    /// Allowed from `Unconfigured` and `Cleaned`. On failure the state is
    /// left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidTransition`] from any other state, or the
    /// configuration/table error that prevented configuring.
    pub fn configure(&mut self, config: TaskConfig) -> TaskResult<()> {
        self.require("configure", &[TaskState::Unconfigured, TaskState::Cleaned])?;

        let translator = Translator::from_config(&config).inspect_err(|e| {
            warn!(
                path = ?config.command_to_pwm_table_file_path,
                error = %e,
                "Failed to configure thruster task"
            );
        })?;

        info!(
            path = ?config.command_to_pwm_table_file_path,
            rows = translator.mapper().table().len(),
            mode = %config.cmd_in_mode,
            "Thruster task configured"
        );
        self.translator = Some(translator);
        self.config = Some(config);
        self.transition(TaskState::Configured);
        Ok(())
    }

    /// Begin cycling.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidTransition`] unless `Configured` or
    /// `Stopped`.
    pub fn start(&mut self) -> TaskResult<()> {
        self.require("start", &[TaskState::Configured, TaskState::Stopped])?;
        self.transition(TaskState::Running);
        Ok(())
    }

    /// Run one cycle: read a sample, translate it and write the result.
    ///
    /// A cycle without new data is a no-op.
    ///
    /// # Errors
    ///
    /// - [`TaskError::InvalidTransition`] unless `Running`
    /// - [`TaskError::InvalidCommandMode`] if an element has the wrong mode;
    ///   nothing is written and, under [`InvalidModePolicy::Escalate`], the
    ///   task enters `Error`
    /// - any error returned by the sink
    pub fn update<S, K>(&mut self, source: &mut S, sink: &mut K) -> TaskResult<CycleOutcome>
    where
        S: CommandSource + ?Sized,
        K: PwmSink + ?Sized,
    {
        self.require("update", &[TaskState::Running])?;
        let Some(translator) = self.translator.as_ref() else {
            return Err(TaskError::invalid_transition("update", self.state));
        };

        self.stats.cycles = self.stats.cycles.saturating_add(1);

        let joints = match source.read() {
            ReadStatus::NewData(joints) => joints,
            ReadStatus::OldData | ReadStatus::NoData => {
                self.stats.no_data = self.stats.no_data.saturating_add(1);
                trace!(cycle = self.stats.cycles, "No new joint command");
                return Ok(CycleOutcome::NoData);
            }
        };

        let command = match translator.translate(&joints) {
            Ok(command) => command,
            Err(e) => {
                self.stats.mode_errors = self.stats.mode_errors.saturating_add(1);
                warn!(cycle = self.stats.cycles, error = %e, "Rejected joint command");
                if self.invalid_mode_policy() == InvalidModePolicy::Escalate {
                    self.transition(TaskState::Error);
                }
                return Err(e);
            }
        };

        let duty_cycles = command.duty_cycles.clone();
        if let Err(e) = sink.write(command) {
            self.stats.sink_errors = self.stats.sink_errors.saturating_add(1);
            warn!(cycle = self.stats.cycles, error = %e, "Failed to write PWM command");
            return Err(e);
        }

        self.stats.emitted = self.stats.emitted.saturating_add(1);
        trace!(cycle = self.stats.cycles, duty_cycles = ?duty_cycles, "Emitted PWM command");
        Ok(CycleOutcome::Emitted { duty_cycles })
    }

    /// Stop cycling.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidTransition`] unless `Running` or `Error`.
    pub fn stop(&mut self) -> TaskResult<()> {
        self.require("stop", &[TaskState::Running, TaskState::Error])?;
        self.transition(TaskState::Stopped);
        Ok(())
    }

    /// Resume cycling after an escalated failure.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidTransition`] unless `Error`.
    pub fn recover(&mut self) -> TaskResult<()> {
        self.require("recover", &[TaskState::Error])?;
        self.transition(TaskState::Running);
        Ok(())
    }

    /// Drop the table and configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidTransition`] unless `Configured`, `Stopped`
    /// or `Error`.
    pub fn cleanup(&mut self) -> TaskResult<()> {
        self.require(
            "cleanup",
            &[TaskState::Configured, TaskState::Stopped, TaskState::Error],
        )?;
        self.translator = None;
        self.config = None;
        self.transition(TaskState::Cleaned);
        Ok(())
    }

    fn invalid_mode_policy(&self) -> InvalidModePolicy {
        self.config
            .as_ref()
            .map_or(InvalidModePolicy::default(), |c| c.invalid_mode_policy)
    }

    fn require(&self, operation: &'static str, allowed: &[TaskState]) -> TaskResult<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(TaskError::invalid_transition(operation, self.state))
        }
    }

    fn transition(&mut self, to: TaskState) {
        info!(from = %self.state, to = %to, "Thruster task state change");
        self.state = to;
    }
}
