mod run;
mod scan;

use std::fmt::Display;
use colored::{Colorize, ColoredString};
use crate::err::{Error, exit};

const PROGRAM: &'static str = env!("CARGO_PKG_NAME");

/// Print tool version and authors.
fn print_version() {
    println!("{} {}", PROGRAM.underline(), format!("v{}", env!("CARGO_PKG_VERSION")).green());
    let authors: Vec<_> = env!("CARGO_PKG_AUTHORS").split(':').collect();
    let n = authors.len();
    if n == 0 {
        return;
    }
    print!("Created by ");
    for (i, author) in authors.iter().enumerate() {
        if i == 0 {
            print!("{}", author.bright_blue());
        } else if i < n - 1 {
            print!(", {}", author.bright_blue());
        } else {
            print!(" and {}", author.bright_blue());
        }
    }
    println!();
}

/// Format default value.
fn fmt_def(val: impl Display) -> ColoredString {
    val.to_string().cyan()
}

/// Empty value column for flags.
fn flag() -> ColoredString {
    "".normal()
}

fn print_help() {
    print_version();
    println!("\n{} {} command [arguments]",
        "Usage:".bold(), PROGRAM);

    println!("\n{}", "[ Placing reads ]".bold());
    println!("    {:<7}  Convert run (NextSeq) and distribute reads into sample directories.", "run".red());
    println!("    {:<7}  List read files of each sample without copying anything.", "scan".red());

    println!("\n{}", "[ General help ]".bold());
    println!("    {:<7}  Show this help message.", "help".red());
    println!("    {:<7}  Show version.", "version".red());
}

/// Runs the command and returns process exit code.
pub fn run(argv: &[String]) -> Result<i32, Error> {
    if argv.len() <= 1 {
        print_help();
        return Ok(exit::CONFIG);
    }
    match &argv[1] as &str {
        "run" => run::run(&argv[2..]),
        "scan" => scan::run(&argv[2..]).map(|()| exit::SUCCESS),
        "help" | "h" | "--help" | "-h" => {
            print_help();
            Ok(exit::SUCCESS)
        }
        "version" | "--version" | "-V" => {
            print_version();
            Ok(exit::SUCCESS)
        }
        cmd => Err(Error::InvalidInput(format!("Unknown command {} (see {} help)", cmd, PROGRAM))),
    }
}
