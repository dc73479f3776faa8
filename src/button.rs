//! Push-button input.
//!
//! The button pin is pulled up, so the switch reads low while held down.
//! Press and release waits are edge-triggered through the driver; the thread
//! is suspended until the kernel reports the transition.

use std::time::Duration;

use crate::gpio::{Edge, GpioDriver, GpioError, Level, PinMode};
use crate::pins::PinRole;

/// Claim the button pin as a pulled-up input. Idempotent; must run before
/// any read or wait.
pub fn init<D: GpioDriver>(gpio: &mut D) -> Result<(), GpioError> {
    gpio.configure(PinRole::Button.bcm(), PinMode::InputPullUp)
}

/// Instantaneous state, no debounce applied.
pub fn is_pressed<D: GpioDriver>(gpio: &mut D) -> Result<bool, GpioError> {
    Ok(gpio.read(PinRole::Button.bcm())? == Level::Low)
}

/// Block until the button is pressed (falling edge).
pub fn wait_for_press<D: GpioDriver>(gpio: &mut D) -> Result<(), GpioError> {
    gpio.wait_for_edge(PinRole::Button.bcm(), Edge::Falling, None)
        .map(|_| ())
}

/// Block until the button is released (rising edge).
pub fn wait_for_release<D: GpioDriver>(gpio: &mut D) -> Result<(), GpioError> {
    gpio.wait_for_edge(PinRole::Button.bcm(), Edge::Rising, None)
        .map(|_| ())
}

/// Bounded wait for a press, so loops can recheck the shutdown flag between
/// polls. Returns `Ok(false)` when `timeout` elapses without a press.
pub fn poll_press<D: GpioDriver>(gpio: &mut D, timeout: Duration) -> Result<bool, GpioError> {
    gpio.wait_for_edge(PinRole::Button.bcm(), Edge::Falling, Some(timeout))
}
