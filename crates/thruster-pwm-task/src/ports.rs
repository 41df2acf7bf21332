//! Port traits for the upstream command source and downstream PWM sink.
//!
//! The task only talks to its collaborators through these traits, so the
//! transport can be a channel, an in-memory queue or a test double.

use std::collections::VecDeque;

use crossbeam::channel::{Receiver, SendError, Sender, TryRecvError};

use crate::error::{TaskError, TaskResult};
use crate::joints::Joints;
use crate::pwm::PwmCommand;

/// Outcome of a non-blocking read.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadStatus<T> {
    /// A sample that has not been read before.
    NewData(T),
    /// The source is connected but has nothing newer than the last read.
    OldData,
    /// The source has never produced a sample, or is disconnected.
    NoData,
}

impl<T> ReadStatus<T> {
    /// Return the sample if it is new.
    pub fn into_new_data(self) -> Option<T> {
        match self {
            Self::NewData(sample) => Some(sample),
            Self::OldData | Self::NoData => None,
        }
    }

    /// Check whether the read produced a new sample.
    pub fn is_new_data(&self) -> bool {
        matches!(self, Self::NewData(_))
    }
}

/// Upstream collaborator producing joint command samples.
///
/// `read` must not block; it is called once per cycle.
pub trait CommandSource {
    /// Read the next sample, if any.
    fn read(&mut self) -> ReadStatus<Joints>;
}

/// Downstream collaborator consuming PWM commands.
pub trait PwmSink {
    /// Deliver one command.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::SinkDisconnected`] if the consumer is gone.
    fn write(&mut self, command: PwmCommand) -> TaskResult<()>;
}

impl<S: CommandSource + ?Sized> CommandSource for &mut S {
    fn read(&mut self) -> ReadStatus<Joints> {
        (**self).read()
    }
}

impl<S: PwmSink + ?Sized> PwmSink for &mut S {
    fn write(&mut self, command: PwmCommand) -> TaskResult<()> {
        (**self).write(command)
    }
}

impl CommandSource for Receiver<Joints> {
    fn read(&mut self) -> ReadStatus<Joints> {
        match self.try_recv() {
            Ok(sample) => ReadStatus::NewData(sample),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => ReadStatus::NoData,
        }
    }
}

impl CommandSource for VecDeque<Joints> {
    fn read(&mut self) -> ReadStatus<Joints> {
        self.pop_front().map_or(ReadStatus::NoData, ReadStatus::NewData)
    }
}

impl PwmSink for Sender<PwmCommand> {
    fn write(&mut self, command: PwmCommand) -> TaskResult<()> {
        self.send(command).map_err(|SendError(_)| TaskError::SinkDisconnected)
    }
}

impl PwmSink for Vec<PwmCommand> {
    fn write(&mut self, command: PwmCommand) -> TaskResult<()> {
        self.push(command);
        Ok(())
    }
}

/// Latest-value slot, reporting each sample as new exactly once.
///
/// Reads after the first one return [`ReadStatus::OldData`] until a newer
/// sample is written.
#[derive(Debug, Clone, Default)]
pub struct SampleSlot {
    sample: Option<Joints>,
    fresh: bool,
}

impl SampleSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored sample.
    pub fn write(&mut self, sample: Joints) {
        self.sample = Some(sample);
        self.fresh = true;
    }

    /// The last written sample.
    pub fn last(&self) -> Option<&Joints> {
        self.sample.as_ref()
    }
}

impl CommandSource for SampleSlot {
    fn read(&mut self) -> ReadStatus<Joints> {
        match &self.sample {
            None => ReadStatus::NoData,
            Some(_) if !self.fresh => ReadStatus::OldData,
            Some(sample) => {
                self.fresh = false;
                ReadStatus::NewData(sample.clone())
            }
        }
    }
}
