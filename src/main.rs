use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use device_io::cli::{self, Args};
use device_io::gpio::GpioDriver;
use device_io::gpio::hardware::RppalGpio;
use log::LevelFilter;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(&args);

    // Ctrl+C clears the flag; waiting loops notice and fall through to cleanup
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    let mut gpio = RppalGpio::new()?;
    let result = cli::dispatch(&args, &mut gpio, &running);
    gpio.cleanup();
    result?;
    Ok(())
}

fn init_logging(args: &Args) {
    let level = if args.debug || args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(level).init();
}
