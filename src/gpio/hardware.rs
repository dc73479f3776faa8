//! rppal-backed driver for real Raspberry Pi hardware.

use std::collections::HashMap;
use std::io;
use std::time::Duration;

use rppal::gpio::{Gpio, InputPin, OutputPin, Trigger};

use super::{Edge, GpioDriver, GpioError, Level, PinMode};

enum ClaimedPin {
    Output(OutputPin),
    Input { pin: InputPin, armed: Option<Edge> },
}

impl ClaimedPin {
    fn mode(&self) -> PinMode {
        match self {
            ClaimedPin::Output(_) => PinMode::Output,
            ClaimedPin::Input { .. } => PinMode::InputPullUp,
        }
    }
}

/// Claims pins lazily through [`rppal::gpio::Gpio`], BCM numbering.
///
/// Construction fails off-Pi (no GPIO peripheral), so host-side tests use
/// the mock instead.
pub struct RppalGpio {
    gpio: Gpio,
    pins: HashMap<u8, ClaimedPin>,
}

impl RppalGpio {
    pub fn new() -> Result<Self, GpioError> {
        Ok(Self {
            gpio: Gpio::new()?,
            pins: HashMap::new(),
        })
    }
}

impl GpioDriver for RppalGpio {
    fn configure(&mut self, pin: u8, mode: PinMode) -> Result<(), GpioError> {
        if let Some(claimed) = self.pins.get(&pin) {
            if claimed.mode() == mode {
                return Ok(());
            }
            // Release before reclaiming with the new mode; rppal refuses a
            // second get() while the pin is held.
            self.pins.remove(&pin);
        }
        let claimed = match mode {
            PinMode::Output => ClaimedPin::Output(self.gpio.get(pin)?.into_output()),
            PinMode::InputPullUp => ClaimedPin::Input {
                pin: self.gpio.get(pin)?.into_input_pullup(),
                armed: None,
            },
        };
        self.pins.insert(pin, claimed);
        Ok(())
    }

    fn read(&mut self, pin: u8) -> Result<Level, GpioError> {
        match self.pins.get(&pin) {
            Some(ClaimedPin::Input { pin: input, .. }) => Ok(match input.read() {
                rppal::gpio::Level::Low => Level::Low,
                rppal::gpio::Level::High => Level::High,
            }),
            Some(ClaimedPin::Output(output)) => Ok(if output.is_set_low() {
                Level::Low
            } else {
                Level::High
            }),
            None => Err(GpioError::NotConfigured { pin }),
        }
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError> {
        match self.pins.get_mut(&pin) {
            Some(ClaimedPin::Output(output)) => {
                output.write(match level {
                    Level::Low => rppal::gpio::Level::Low,
                    Level::High => rppal::gpio::Level::High,
                });
                Ok(())
            }
            _ => Err(GpioError::NotConfigured { pin }),
        }
    }

    fn wait_for_edge(
        &mut self,
        pin: u8,
        edge: Edge,
        timeout: Option<Duration>,
    ) -> Result<bool, GpioError> {
        let Some(ClaimedPin::Input { pin: input, armed }) = self.pins.get_mut(&pin) else {
            return Err(GpioError::NotConfigured { pin });
        };
        if *armed != Some(edge) {
            let trigger = match edge {
                Edge::Rising => Trigger::RisingEdge,
                Edge::Falling => Trigger::FallingEdge,
            };
            input.set_interrupt(trigger, None)?;
            *armed = Some(edge);
        }
        match input.poll_interrupt(true, timeout) {
            Ok(Some(_)) => Ok(true),
            Ok(None) => Ok(false),
            Err(rppal::gpio::Error::Io(e)) if e.kind() == io::ErrorKind::Interrupted => {
                Err(GpioError::Interrupted)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn cleanup(&mut self) {
        // Dropping the rppal pins resets them and returns them to the pool.
        for (_, claimed) in self.pins.drain() {
            if let ClaimedPin::Input {
                pin: mut input,
                armed: Some(_),
            } = claimed
            {
                let _ = input.clear_interrupt();
            }
        }
    }
}
