//! Scriptable in-memory driver for host-side tests.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::time::Duration;

use super::{Edge, GpioDriver, GpioError, Level, PinMode};

/// In-memory stand-in for the hardware driver.
///
/// Output levels are tracked per pin, input levels are set by the test, and
/// edge events are scripted through [`MockGpio::push_edge`]. A wait that the
/// script cannot satisfy behaves like a wait cut short by process
/// termination and reports [`GpioError::Interrupted`], which keeps loops
/// under test finite.
#[derive(Default)]
pub struct MockGpio {
    modes: HashMap<u8, PinMode>,
    levels: HashMap<u8, Level>,
    edges: VecDeque<(u8, Edge)>,
    /// Every write in call order, for asserting drive sequences.
    pub writes: Vec<(u8, Level)>,
    pub configure_calls: usize,
    pub cleanup_calls: usize,
    pub fail_next_write: bool,
}

impl MockGpio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw level a configured input pin will read.
    pub fn set_input_level(&mut self, pin: u8, level: Level) {
        self.levels.insert(pin, level);
    }

    /// Script one edge event to be consumed by a later wait.
    pub fn push_edge(&mut self, pin: u8, edge: Edge) {
        self.edges.push_back((pin, edge));
    }

    pub fn level(&self, pin: u8) -> Option<Level> {
        self.levels.get(&pin).copied()
    }

    pub fn mode(&self, pin: u8) -> Option<PinMode> {
        self.modes.get(&pin).copied()
    }

    pub fn pending_edges(&self) -> usize {
        self.edges.len()
    }
}

impl GpioDriver for MockGpio {
    fn configure(&mut self, pin: u8, mode: PinMode) -> Result<(), GpioError> {
        self.configure_calls += 1;
        self.modes.insert(pin, mode);
        Ok(())
    }

    fn read(&mut self, pin: u8) -> Result<Level, GpioError> {
        if !self.modes.contains_key(&pin) {
            return Err(GpioError::NotConfigured { pin });
        }
        // Unset inputs rest high, as a pulled-up pin would.
        Ok(self.levels.get(&pin).copied().unwrap_or(Level::High))
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError> {
        if !matches!(self.modes.get(&pin), Some(PinMode::Output)) {
            return Err(GpioError::NotConfigured { pin });
        }
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(GpioError::Driver(rppal::gpio::Error::Io(io::Error::other(
                "injected write fault",
            ))));
        }
        self.levels.insert(pin, level);
        self.writes.push((pin, level));
        Ok(())
    }

    fn wait_for_edge(
        &mut self,
        pin: u8,
        edge: Edge,
        _timeout: Option<Duration>,
    ) -> Result<bool, GpioError> {
        if !matches!(self.modes.get(&pin), Some(PinMode::InputPullUp)) {
            return Err(GpioError::NotConfigured { pin });
        }
        match self.edges.front().copied() {
            Some((p, e)) if p == pin && e == edge => {
                self.edges.pop_front();
                Ok(true)
            }
            _ => Err(GpioError::Interrupted),
        }
    }

    fn cleanup(&mut self) {
        self.cleanup_calls += 1;
        self.modes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_updates_level_and_log() {
        let mut mock = MockGpio::new();
        mock.configure(5, PinMode::Output).unwrap();
        mock.write(5, Level::Low).unwrap();
        assert_eq!(mock.level(5), Some(Level::Low));
        assert_eq!(mock.writes, vec![(5, Level::Low)]);
    }

    #[test]
    fn write_without_configure_fails() {
        let mut mock = MockGpio::new();
        assert!(matches!(
            mock.write(5, Level::Low),
            Err(GpioError::NotConfigured { pin: 5 })
        ));
    }

    #[test]
    fn exhausted_script_reports_interrupted() {
        let mut mock = MockGpio::new();
        mock.configure(5, PinMode::InputPullUp).unwrap();
        mock.push_edge(5, Edge::Falling);
        assert!(mock.wait_for_edge(5, Edge::Falling, None).unwrap());
        assert!(matches!(
            mock.wait_for_edge(5, Edge::Falling, None),
            Err(GpioError::Interrupted)
        ));
    }

    #[test]
    fn injected_fault_propagates_once() {
        let mut mock = MockGpio::new();
        mock.configure(5, PinMode::Output).unwrap();
        mock.fail_next_write = true;
        assert!(matches!(
            mock.write(5, Level::High),
            Err(GpioError::Driver(_))
        ));
        mock.write(5, Level::High).unwrap();
    }

    #[test]
    fn cleanup_is_a_noop_without_configuration() {
        let mut mock = MockGpio::new();
        mock.cleanup();
        mock.cleanup();
        assert_eq!(mock.cleanup_calls, 2);
        assert_eq!(mock.mode(5), None);
    }
}
