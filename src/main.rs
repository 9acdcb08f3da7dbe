pub mod illumina;
pub mod convert;
pub mod distrib;
pub mod config;
pub mod paths;
pub mod ext;
pub mod command;

mod err;
#[cfg(test)]
mod test_util;
pub use err::Error;

fn init_logger() {
    use fern::{
        Dispatch,
        colors::{Color, ColoredLevelConfig},
    };
    let colors = ColoredLevelConfig::default()
        .info(Color::Green)
        .debug(Color::Cyan);
    let res = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {:>5}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                colors.color(record.level()),
                message
            ))
        })
        .level(log::LevelFilter::Trace)
        .chain(std::io::stderr())
        .apply();
    if let Err(e) = res {
        eprintln!("Could not initialize logger: {}", e);
    }
    // Debug messages are enabled with -v/--verbose.
    log::set_max_level(log::LevelFilter::Info);
}

fn main() {
    init_logger();
    let args: Vec<_> = std::env::args().collect();
    let code = match command::run(&args) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e.display());
            e.exit_code()
        }
    };
    std::process::exit(code);
}
