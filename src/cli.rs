//! Command-line surface: flag definitions and fixed-order dispatch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use log::debug;

use crate::gpio::{GpioDriver, GpioError};
use crate::led::{self, LedColor};
use crate::{button, toggle};

const WAIT_POLL: Duration = Duration::from_millis(100);

/// Exercise the status LEDs and the push button over GPIO.
///
/// All flags are independent booleans and freely combinable; every requested
/// action runs in a fixed order (see [`dispatch`]).
#[derive(Debug, Default, Parser)]
#[command(name = "device-io", version)]
pub struct Args {
    /// Toggle the LEDs with each button press until interrupted
    #[arg(short = 't', long)]
    pub test: bool,

    /// Turn the green LED on
    #[arg(short = 'G', long)]
    pub green_on: bool,

    /// Turn the green LED off
    #[arg(short = 'g', long)]
    pub green_off: bool,

    /// Turn the orange LED (both LEDs) on
    #[arg(short = 'O', long)]
    pub orange_on: bool,

    /// Turn the orange LED (both LEDs) off
    #[arg(short = 'o', long)]
    pub orange_off: bool,

    /// Turn the red LED on
    #[arg(short = 'R', long)]
    pub red_on: bool,

    /// Turn the red LED off
    #[arg(short = 'r', long)]
    pub red_off: bool,

    /// Block until the button is pressed
    #[arg(short = 'w', long)]
    pub wait: bool,

    /// Log debug messages to stderr
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Run every requested action in declaration order: test, green off, green
/// on, orange off, orange on, red off, red on, wait.
///
/// Flag combinations are never rejected; a contradictory same-color pair
/// resolves to whichever action dispatches later, so `--red-on --red-off`
/// ends with red on. Each action re-runs its own initialization, which is
/// idempotent and therefore harmless.
pub fn dispatch<D: GpioDriver>(
    args: &Args,
    gpio: &mut D,
    running: &AtomicBool,
) -> Result<(), GpioError> {
    if args.test {
        led::init(gpio)?;
        button::init(gpio)?;
        toggle::run(gpio, running, toggle::DEBOUNCE)?;
    }
    if args.green_off {
        debug!("Turn green LED off");
        led::init(gpio)?;
        led::set(gpio, LedColor::Green, false)?;
    }
    if args.green_on {
        debug!("Turn green LED on");
        led::init(gpio)?;
        led::set(gpio, LedColor::Green, true)?;
    }
    if args.orange_off {
        debug!("Turn orange LED off");
        led::init(gpio)?;
        led::set_orange(gpio, false)?;
    }
    if args.orange_on {
        debug!("Turn orange LED on");
        led::init(gpio)?;
        led::set_orange(gpio, true)?;
    }
    if args.red_off {
        debug!("Turn red LED off");
        led::init(gpio)?;
        led::set(gpio, LedColor::Red, false)?;
    }
    if args.red_on {
        debug!("Turn red LED on");
        led::init(gpio)?;
        led::set(gpio, LedColor::Red, true)?;
    }
    if args.wait {
        debug!("Waiting for button press; press ^C to abort");
        button::init(gpio)?;
        wait_until_pressed(gpio, running)?;
    }
    Ok(())
}

/// Bounded-poll wait that honors the shutdown flag. An interrupted wait is
/// the expected abort path and ends the wait normally.
fn wait_until_pressed<D: GpioDriver>(
    gpio: &mut D,
    running: &AtomicBool,
) -> Result<(), GpioError> {
    while running.load(Ordering::SeqCst) {
        match button::poll_press(gpio, WAIT_POLL) {
            Ok(true) => {
                debug!("Button pressed");
                return Ok(());
            }
            Ok(false) => continue,
            Err(GpioError::Interrupted) => break,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
