use super::{DEFAULT_IMAGES_DIR, DEFAULT_TIMINGS_CSV, VERSION};
use clap::{App, Arg};
use std::ffi::OsString;
use std::path::PathBuf;

/// Takes the CLI arguments that control the plotting of the timings.
/// Without arguments the fixed paths are used.
pub fn parse_cli() -> (PathBuf, PathBuf, bool) {
    parse_args(std::env::args_os())
}

/// Parses the given arguments, the first one being the program name.
pub fn parse_args<I, T>(args: I) -> (PathBuf, PathBuf, bool)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let arg_csvin = Arg::with_name("input_csvfile")
        .help("csv file with the timings")
        .short("f")
        .long("csvfile")
        .takes_value(true)
        .default_value(DEFAULT_TIMINGS_CSV);
    let arg_outdir = Arg::with_name("output_dir")
        .help("directory for the png charts, created if missing")
        .short("o")
        .long("outdir")
        .takes_value(true)
        .default_value(DEFAULT_IMAGES_DIR);
    let arg_verbose = Arg::with_name("verbose")
        .help("print debug information")
        .short("v")
        .long("verbose")
        .takes_value(false);
    let cli_args = App::new("sort_plot")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to plot the sorting timings on a linear and a log scale")
        .arg(arg_csvin)
        .arg(arg_outdir)
        .arg(arg_verbose)
        .get_matches_from(args);
    let csvin = PathBuf::from(cli_args.value_of("input_csvfile").unwrap_or_default());
    let outdir = PathBuf::from(cli_args.value_of("output_dir").unwrap_or_default());
    (csvin, outdir, cli_args.is_present("verbose"))
}
