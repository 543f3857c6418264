use clap::{value_parser, Arg, ArgAction, Command as ClapCommand};
use std::process;
use log::{error, LevelFilter};

use scancrop::errors::CropError;
use scancrop::utils::logger::Logger;
use scancrop::commands::{CommandFactory, ScancropCommandFactory};

const GLOBAL_LOG_FILE: &str = "scancrop-global.log";

fn cli() -> ClapCommand {
    ClapCommand::new("scancrop")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Crop the photographs out of flatbed scans")
        .arg(
            Arg::new("input")
                .help("Scan file or directory of scans to crop")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("regions")
                .long("regions")
                .help("Number of regions to scan in each input image")
                .value_name("N")
                .value_parser(value_parser!(u32))
                .default_value("2"),
        )
        .arg(
            Arg::new("minl")
                .long("minl")
                .help("Lightness threshold, as a fraction of white")
                .value_name("FRACTION")
                .value_parser(value_parser!(f64))
                .default_value("0.95"),
        )
        .arg(
            Arg::new("no-resize")
                .long("no-resize")
                .help("Keep crops at scanner resolution instead of scaling them down")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("sdpi")
                .long("sdpi")
                .help("Scanner DPI")
                .value_name("DPI")
                .value_parser(value_parser!(u32))
                .default_value("600"),
        )
        .arg(
            Arg::new("ppi")
                .long("ppi")
                .help("Preferred picture PPI")
                .value_name("PPI")
                .value_parser(value_parser!(u32))
                .default_value("300"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML file with scan settings; flags given on the command line override it")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output directory (default: <input>_cropped)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .help("Process scan lines in parallel")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("detect")
                .short('d')
                .long("detect")
                .help("Only report detected pictures, do not write files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Operation log file")
                .value_name("FILE")
                .default_value("scancrop.log"),
        )
}

fn main() {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { LevelFilter::Info };

    let log_file = matches.get_one::<String>("log-file").map(String::as_str).unwrap_or("scancrop.log");
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger(GLOBAL_LOG_FILE, level) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = ScancropCommandFactory::new();

    let result = factory.create_command(&matches, &logger)
        .and_then(|command| command.execute());

    if let Err(e) = result {
        error!("{}", e);
        match &e {
            CropError::OutputExists(_) => {
                eprintln!("INFO: It seems that this folder has already been cropped:");
                eprintln!("{}", e);
            }
            CropError::InputNotFound(_) => eprintln!("ERROR: The path entered does not exist."),
            _ => eprintln!("Error: {}", e),
        }
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn defaults_match_scan_workflow() {
        let matches = cli().try_get_matches_from(["scancrop", "scans"]).unwrap();
        assert_eq!(matches.get_one::<u32>("regions"), Some(&2));
        assert_eq!(matches.get_one::<f64>("minl"), Some(&0.95));
        assert!(!matches.get_flag("no-resize"));
        assert!(!matches.get_flag("detect"));
    }
}
