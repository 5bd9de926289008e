//! Bounded command queue driving one profile.

use heapless::Deque;

use crate::config::units::Seconds;
use crate::config::SequenceConfig;
use crate::error::{Result, SequenceError};
use crate::motion::MotionProfile;

use super::command::Command;

/// FIFO of commands fed to a profile as each one completes.
///
/// After a command completes the sequencer waits out the dwell time before
/// dispatching the next one. The profile is borrowed per tick, so the host
/// keeps full access to it between ticks.
#[derive(Debug, Clone)]
pub struct Sequencer<const N: usize> {
    queue: Deque<Command, N>,
    dwell: Seconds,
    dwell_remaining: f32,
    active: Option<Command>,
    missed_deadlines: u32,
}

impl<const N: usize> Default for Sequencer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Sequencer<N> {
    /// Create an empty sequencer with no dwell.
    pub const fn new() -> Self {
        Self {
            queue: Deque::new(),
            dwell: Seconds(0.0),
            dwell_remaining: 0.0,
            active: None,
            missed_deadlines: 0,
        }
    }

    /// Set the pause between a completed command and the next dispatch.
    pub fn with_dwell(mut self, dwell: Seconds) -> Self {
        self.dwell = dwell;
        self
    }

    /// Create a sequencer loaded with a configured sequence.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::QueueFull` if the sequence is longer than `N`.
    pub fn from_config(config: &SequenceConfig) -> Result<Self> {
        let mut sequencer = Self::new().with_dwell(Seconds::from_millis(config.dwell_ms as f32));
        for command in config.commands.iter() {
            sequencer.push(*command)?;
        }
        Ok(sequencer)
    }

    /// Queue a command behind those already waiting.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::QueueFull` when `N` commands are waiting.
    pub fn push(&mut self, command: Command) -> Result<()> {
        self.queue
            .push_back(command)
            .map_err(|_| SequenceError::QueueFull.into())
    }

    /// Drop all waiting commands and any pending dwell.
    ///
    /// The profile keeps its current target.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.active = None;
        self.dwell_remaining = 0.0;
    }

    /// Dispatch the next command if due, then advance `profile` by `dt`
    /// seconds. Returns the scaled position.
    pub fn tick(&mut self, profile: &mut MotionProfile, dt: f32) -> f32 {
        if let Some(active) = self.active {
            if active.is_done(profile) {
                self.active = None;
                self.dwell_remaining = self.dwell.value();
            }
        }

        if self.active.is_none() {
            if self.dwell_remaining > 0.0 {
                if dt.is_finite() && dt > 0.0 {
                    self.dwell_remaining -= dt;
                }
            } else if let Some(command) = self.queue.pop_front() {
                trace!("dispatch {}", command);
                if !command.apply(profile) {
                    self.missed_deadlines += 1;
                }
                self.active = Some(command);
            }
        }

        profile.update(dt)
    }

    /// Check if nothing is queued and the profile has settled.
    pub fn is_idle(&self, profile: &MotionProfile) -> bool {
        self.queue.is_empty() && profile.ready()
    }

    /// Command currently being executed, if any.
    #[inline]
    pub fn active(&self) -> Option<&Command> {
        self.active.as_ref()
    }

    /// Number of commands waiting.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if no commands are waiting.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Timed moves dispatched so far whose deadline could not be met.
    #[inline]
    pub fn missed_deadlines(&self) -> u32 {
        self.missed_deadlines
    }
}
