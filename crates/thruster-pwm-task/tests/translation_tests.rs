//! End-to-end translation scenarios over a calibration file on disk.

use crossbeam::channel;
use thruster_pwm_task::prelude::*;
use thruster_pwm_test_helpers::prelude::*;

type HarnessResult<T> = Result<T, Box<dyn std::error::Error>>;

struct Harness {
    _table: TableFileFixture,
    task: ThrusterTask,
    input: channel::Sender<Joints>,
    source: channel::Receiver<Joints>,
    sink: channel::Sender<PwmCommand>,
    output: channel::Receiver<PwmCommand>,
}

impl Harness {
    fn running() -> HarnessResult<Self> {
        let table = TableFileFixture::thruster()?;
        let config = TaskConfig::builder(table.path())
            .no_actuation_pwm_command(NO_ACTUATION_PWM)
            .cmd_in_mode(JointMode::Effort)
            .dead_zone(DeadZone::new(-0.3, 0.3)?)
            .build()?;

        let mut task = ThrusterTask::new();
        task.configure(config)?;
        task.start()?;

        let (input, source) = channel::unbounded();
        let (sink, output) = channel::unbounded();
        Ok(Self {
            _table: table,
            task,
            input,
            source,
            sink,
            output,
        })
    }

    fn send(&self, joints: Joints) -> HarnessResult<()> {
        self.input
            .send(joints)
            .map_err(|e| format!("joint input channel closed: {e}"))?;
        Ok(())
    }

    fn update(&mut self) -> TaskResult<CycleOutcome> {
        self.task.update(&mut self.source, &mut self.sink)
    }

    fn cycle(&mut self, joints: Joints) -> HarnessResult<CycleOutcome> {
        self.send(joints)?;
        Ok(self.update()?)
    }

    fn efforts(&mut self, cases: &[InterpolationCase]) -> HarnessResult<Vec<u32>> {
        let joints = Joints::efforts(cases.iter().map(|c| c.effort));
        self.cycle(joints)?;
        let command = self
            .output
            .try_recv()
            .map_err(|e| format!("no PWM command was written: {e}"))?;
        Ok(command.duty_cycles)
    }
}

fn expected(cases: &[InterpolationCase]) -> Vec<u32> {
    cases.iter().map(|c| c.expected).collect()
}

#[test]
fn saturates_outside_the_table() -> TestResult {
    let mut harness = Harness::running()?;
    let cases = saturation_cases();
    assert_eq!(harness.efforts(&cases)?, expected(&cases));
    Ok(())
}

#[test]
fn dead_zone_outputs_no_actuation() -> TestResult {
    let mut harness = Harness::running()?;
    let cases = dead_zone_cases();
    assert_eq!(harness.efforts(&cases)?, expected(&cases));
    Ok(())
}

#[test]
fn interpolates_between_calibration_points() -> TestResult {
    let mut harness = Harness::running()?;
    let cases = interpolation_cases();
    assert_eq!(harness.efforts(&cases)?, expected(&cases));
    Ok(())
}

#[test]
fn mixed_batch_keeps_input_order() -> TestResult {
    let mut harness = Harness::running()?;
    let mut cases = interpolation_cases();
    cases.extend(dead_zone_cases());
    cases.extend(saturation_cases());
    cases.reverse();

    let widths = harness.efforts(&cases)?;
    assert_eq!(widths.len(), cases.len());
    assert_eq!(widths, expected(&cases));
    Ok(())
}

#[test]
fn mixed_modes_are_rejected_without_output() -> TestResult {
    let mut harness = Harness::running()?;
    let joints = Joints::new(vec![
        JointCommand::effort(0.2),
        JointCommand::raw(0.2),
        JointCommand::effort(0.2),
    ]);

    harness.send(joints)?;
    let err = must_err(harness.update());
    assert!(matches!(
        err,
        TaskError::InvalidCommandMode {
            index: 1,
            expected: JointMode::Effort,
            actual: JointMode::Raw,
        }
    ));
    assert!(err.is_cycle_scoped());
    assert!(harness.output.try_recv().is_err());
    assert_eq!(harness.task.state(), TaskState::Running);

    let cases = interpolation_cases();
    assert_eq!(harness.efforts(&cases)?, expected(&cases));
    Ok(())
}

#[test]
fn cycles_without_data_write_nothing() -> TestResult {
    let mut harness = Harness::running()?;

    for _ in 0..3 {
        assert_eq!(
            harness.task.update(&mut harness.source, &mut harness.sink)?,
            CycleOutcome::NoData
        );
    }
    assert!(harness.output.try_recv().is_err());
    assert_eq!(harness.task.stats().no_data, 3);
    Ok(())
}

#[test]
fn latest_value_slot_is_translated_once() -> TestResult {
    let mut harness = Harness::running()?;
    let mut slot = SampleSlot::new();
    let mut written: Vec<PwmCommand> = Vec::new();

    slot.write(Joints::efforts([2.21]));
    let first = harness.task.update(&mut slot, &mut written)?;
    let second = harness.task.update(&mut slot, &mut written)?;

    assert_eq!(first, CycleOutcome::Emitted { duty_cycles: vec![1608] });
    assert_eq!(second, CycleOutcome::NoData);
    assert_eq!(written.len(), 1);
    Ok(())
}

#[test]
fn timestamps_are_not_older_than_the_sample() -> TestResult {
    let mut harness = Harness::running()?;
    let joints = Joints::efforts([1.0]);
    let sampled_at = joints.time;

    harness.cycle(joints)?;
    let command = must_some(harness.output.try_recv().ok(), "command emitted");
    assert!(command.timestamp >= sampled_at);
    Ok(())
}

#[test]
fn harness_failures_are_not_reported_as_task_errors() -> TestResult {
    let mut harness = Harness::running()?;
    let joints = Joints::new(vec![JointCommand::effort(1.0), JointCommand::raw(1.0)]);
    let err = must_err(harness.cycle(joints));
    assert!(matches!(
        err.downcast_ref::<TaskError>(),
        Some(TaskError::InvalidCommandMode { index: 1, .. })
    ));

    let (_closed_input, closed_source) = channel::unbounded::<Joints>();
    harness.source = closed_source;
    let err = must_err(harness.cycle(Joints::efforts([1.0])));
    assert!(err.downcast_ref::<TaskError>().is_none());
    assert!(err.to_string().contains("joint input channel closed"));
    Ok(())
}
