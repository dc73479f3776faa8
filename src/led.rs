//! LED control.
//!
//! Red and green are wired with opposite drive polarity: red lights when its
//! pin is low, green when its pin is high. Orange is not a third LED; it is
//! both pins driven low at once.

use crate::gpio::{GpioDriver, GpioError, Level, PinMode};
use crate::pins::PinRole;

/// Individually addressable LED colors. Orange is a composite state, see
/// [`set_orange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedColor {
    Red,
    Green,
}

/// Claim both LED pins as outputs. Idempotent; must run before any set call.
pub fn init<D: GpioDriver>(gpio: &mut D) -> Result<(), GpioError> {
    gpio.configure(PinRole::RedLed.bcm(), PinMode::Output)?;
    gpio.configure(PinRole::GreenLed.bcm(), PinMode::Output)
}

/// Drive one LED to the requested logical state.
pub fn set<D: GpioDriver>(gpio: &mut D, color: LedColor, on: bool) -> Result<(), GpioError> {
    let (pin, level) = match color {
        // Red is wired active-low
        LedColor::Red => (
            PinRole::RedLed.bcm(),
            if on { Level::Low } else { Level::High },
        ),
        LedColor::Green => (
            PinRole::GreenLed.bcm(),
            if on { Level::High } else { Level::Low },
        ),
    };
    gpio.write(pin, level)
}

/// Light or clear the composite orange state.
///
/// Writes both pins directly instead of going through [`set`]: on the orange
/// signal path both LEDs light at low, so the per-color polarity mapping
/// does not apply.
pub fn set_orange<D: GpioDriver>(gpio: &mut D, on: bool) -> Result<(), GpioError> {
    let level = if on { Level::Low } else { Level::High };
    gpio.write(PinRole::GreenLed.bcm(), level)?;
    gpio.write(PinRole::RedLed.bcm(), level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::mock::MockGpio;

    fn leds() -> MockGpio {
        let mut mock = MockGpio::new();
        init(&mut mock).unwrap();
        mock
    }

    #[test]
    fn red_on_is_physical_low() {
        let mut mock = leds();
        set(&mut mock, LedColor::Red, true).unwrap();
        assert_eq!(mock.level(PinRole::RedLed.bcm()), Some(Level::Low));
        set(&mut mock, LedColor::Red, false).unwrap();
        assert_eq!(mock.level(PinRole::RedLed.bcm()), Some(Level::High));
    }

    #[test]
    fn green_on_is_physical_high() {
        let mut mock = leds();
        set(&mut mock, LedColor::Green, true).unwrap();
        assert_eq!(mock.level(PinRole::GreenLed.bcm()), Some(Level::High));
        set(&mut mock, LedColor::Green, false).unwrap();
        assert_eq!(mock.level(PinRole::GreenLed.bcm()), Some(Level::Low));
    }

    #[test]
    fn orange_drives_both_pins_low() {
        let mut mock = leds();
        set_orange(&mut mock, true).unwrap();
        assert_eq!(mock.level(PinRole::RedLed.bcm()), Some(Level::Low));
        assert_eq!(mock.level(PinRole::GreenLed.bcm()), Some(Level::Low));
        set_orange(&mut mock, false).unwrap();
        assert_eq!(mock.level(PinRole::RedLed.bcm()), Some(Level::High));
        assert_eq!(mock.level(PinRole::GreenLed.bcm()), Some(Level::High));
    }

    #[test]
    fn polarity_holds_across_mixed_sequences() {
        let mut mock = leds();
        set(&mut mock, LedColor::Red, true).unwrap();
        set_orange(&mut mock, false).unwrap();
        set(&mut mock, LedColor::Green, true).unwrap();
        set(&mut mock, LedColor::Red, true).unwrap();
        assert_eq!(mock.level(PinRole::RedLed.bcm()), Some(Level::Low));
        assert_eq!(mock.level(PinRole::GreenLed.bcm()), Some(Level::High));
    }

    #[test]
    fn init_twice_keeps_the_same_configuration() {
        let mut mock = MockGpio::new();
        init(&mut mock).unwrap();
        init(&mut mock).unwrap();
        assert_eq!(mock.mode(PinRole::RedLed.bcm()), Some(PinMode::Output));
        assert_eq!(mock.mode(PinRole::GreenLed.bcm()), Some(PinMode::Output));
    }

    #[test]
    fn set_without_init_is_an_error() {
        let mut mock = MockGpio::new();
        assert!(matches!(
            set(&mut mock, LedColor::Red, true),
            Err(GpioError::NotConfigured { .. })
        ));
    }

    #[test]
    fn driver_fault_propagates() {
        let mut mock = leds();
        mock.fail_next_write = true;
        assert!(set(&mut mock, LedColor::Green, true).is_err());
    }
}
