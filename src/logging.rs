//! Logger setup for the command line front end

use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::Dispatch;
use log::LevelFilter;

/// Map `-v` occurrences to a level: none is `warn`, then `info`, `debug`, `trace`
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install a colored stderr logger at the level selected by `verbose`
pub fn init(verbose: u8) -> Result<(), fern::InitError> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::White)
        .trace(Color::BrightBlack);

    Dispatch::new()
        .level(level_for_verbosity(verbose))
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} |{:5}| [{}] {}",
                Local::now().format("%H:%M:%S%.3f"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}
