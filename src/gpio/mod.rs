//! GPIO driver capability.
//!
//! The LED and button modules never touch pin registers themselves; they go
//! through an implementation of [`GpioDriver`] chosen at composition time:
//! [`hardware::RppalGpio`] on a Raspberry Pi, [`mock::MockGpio`] on a
//! development host.

pub mod hardware;
pub mod mock;

use std::time::Duration;

use thiserror::Error;

/// Digital level of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// Signal transition a blocking wait triggers on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
}

/// Direction and pull configuration of a claimed pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Output,
    InputPullUp,
}

#[derive(Debug, Error)]
pub enum GpioError {
    /// Fault reported by the underlying hardware driver.
    #[error("GPIO driver fault: {0}")]
    Driver(#[from] rppal::gpio::Error),
    /// A pin was used before being configured for that use.
    #[error("pin {pin} used before initialization")]
    NotConfigured { pin: u8 },
    /// A blocking wait was cut short by process termination.
    #[error("blocking wait interrupted")]
    Interrupted,
}

/// Capability consumed by the LED and button modules.
///
/// `configure` is idempotent: claiming a pin that already holds the same mode
/// is a no-op. Every other operation requires a prior `configure` of that pin
/// and fails with [`GpioError::NotConfigured`] otherwise.
pub trait GpioDriver {
    fn configure(&mut self, pin: u8, mode: PinMode) -> Result<(), GpioError>;

    fn read(&mut self, pin: u8) -> Result<Level, GpioError>;

    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError>;

    /// Block until `edge` occurs on `pin`, or until `timeout` elapses when
    /// one is given. Returns `Ok(true)` when the edge fired, `Ok(false)` on
    /// timeout. Each call consumes at most one event, so back-to-back waits
    /// need one distinct edge each.
    fn wait_for_edge(
        &mut self,
        pin: u8,
        edge: Edge,
        timeout: Option<Duration>,
    ) -> Result<bool, GpioError>;

    /// Release every claimed pin. Safe to call repeatedly; a no-op when
    /// nothing is claimed.
    fn cleanup(&mut self);
}
