//! Interactive toggle-test loop: each button press flips the LEDs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::button;
use crate::gpio::{GpioDriver, GpioError};
use crate::led::{self, LedColor};

/// Contact-bounce suppression applied after each detected press.
pub const DEBOUNCE: Duration = Duration::from_millis(200);

/// How long one bounded press-poll lasts before the shutdown flag is
/// rechecked.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the toggle loop until `running` is cleared or the wait is cut short
/// by a termination signal. Both endings are normal; driver faults
/// propagate.
///
/// The loop starts in the LED-on state and flips it once per completed
/// press-and-debounce cycle.
pub fn run<D: GpioDriver>(
    gpio: &mut D,
    running: &AtomicBool,
    debounce: Duration,
) -> Result<(), GpioError> {
    let mut led_on = true;
    println!("Press the button to toggle the LED.");
    println!("To terminate, press ^C.");
    while running.load(Ordering::SeqCst) {
        match button::poll_press(gpio, POLL_INTERVAL) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(GpioError::Interrupted) => break,
            Err(e) => return Err(e),
        }
        led::set(gpio, LedColor::Red, led_on)?;
        led::set_orange(gpio, !led_on)?;
        led::set(gpio, LedColor::Green, led_on)?;
        println!("{}: Button pressed", unix_timestamp());
        // Debounce
        thread::sleep(debounce);
        led_on = !led_on;
    }
    Ok(())
}

fn unix_timestamp() -> String {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(t) => format!("{}.{:03}", t.as_secs(), t.subsec_millis()),
        Err(_) => String::from("0.000"),
    }
}
