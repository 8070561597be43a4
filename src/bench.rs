use super::passenger::{load_passengers, save_passengers, Passenger};
use super::sort::{insertion_sort, quick_sort, selection_sort, std_sort};
use super::{Result, TimingsError, TIMINGS_HEADER, VERSION};
use super::{DEFAULT_PASSENGERS_CSV, DEFAULT_SORTED_DIR, DEFAULT_TIMINGS_CSV};
use clap::{App, Arg};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

pub const DEFAULT_SIZES: [usize; 11] = [
    100, 1000, 3000, 5000, 7000, 10000, 20000, 30000, 50000, 70000, 100000,
];

/// Settings of one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub passengers: PathBuf,
    pub timings: PathBuf,
    pub sorted_dir: PathBuf,
    pub sizes: Vec<usize>,
}

/// Takes the CLI arguments of the benchmark.
pub fn parse_cli() -> (BenchConfig, bool) {
    parse_args(std::env::args_os())
}

/// Parses the given arguments, the first one being the program name.
/// Without flags the fixed paths next to the plotter's are used.
pub fn parse_args<I, T>(args: I) -> (BenchConfig, bool)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let default_sizes = DEFAULT_SIZES
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<String>>()
        .join(",");
    let arg_csvin = Arg::with_name("input_csvfile")
        .help("csv file with the passengers to sort")
        .short("f")
        .long("csvfile")
        .takes_value(true)
        .default_value(DEFAULT_PASSENGERS_CSV);
    let arg_timings = Arg::with_name("timings")
        .help("output csv file for the timings")
        .short("o")
        .long("timings")
        .takes_value(true)
        .default_value(DEFAULT_TIMINGS_CSV);
    let arg_sorted = Arg::with_name("sorted_dir")
        .help("directory for the sorted passenger lists")
        .short("d")
        .long("sorted")
        .takes_value(true)
        .default_value(DEFAULT_SORTED_DIR);
    let arg_sizes = Arg::with_name("sizes")
        .help("comma separated number of passengers to sort in each round")
        .short("s")
        .long("sizes")
        .takes_value(true)
        .use_delimiter(true)
        .default_value(&default_sizes)
        .validator(|s| {
            s.parse::<usize>()
                .map(|_| ())
                .map_err(|_| format!("{} is not a valid size", s))
        });
    let arg_verbose = Arg::with_name("verbose")
        .help("print debug information")
        .short("v")
        .long("verbose")
        .takes_value(false);
    let cli_args = App::new("sort_bench")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to time the sorting algorithms on growing passenger lists")
        .arg(arg_csvin)
        .arg(arg_timings)
        .arg(arg_sorted)
        .arg(arg_sizes)
        .arg(arg_verbose)
        .get_matches_from(args);
    let value = |name: &str| PathBuf::from(cli_args.value_of(name).unwrap_or_default());
    // the validator already accepted every size
    let sizes = cli_args
        .values_of("sizes")
        .map(|v| v.filter_map(|s| s.parse::<usize>().ok()).collect())
        .unwrap_or_else(|| DEFAULT_SIZES.to_vec());
    let config = BenchConfig {
        passengers: value("input_csvfile"),
        timings: value("timings"),
        sorted_dir: value("sorted_dir"),
        sizes,
    };
    (config, cli_args.is_present("verbose"))
}

/// One line of the timings file, durations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingRow {
    pub size: usize,
    pub selection_sort: f64,
    pub insertion_sort: f64,
    pub quick_sort: f64,
    pub std_sort: f64,
}

impl TimingRow {
    fn record(&self) -> [String; 5] {
        [
            self.size.to_string(),
            self.selection_sort.to_string(),
            self.insertion_sort.to_string(),
            self.quick_sort.to_string(),
            self.std_sort.to_string(),
        ]
    }
}

/// Sorts a copy of `data` and returns it with the elapsed milliseconds.
pub fn time_sort<T: Clone>(data: &[T], sort: fn(&mut [T])) -> (Vec<T>, f64) {
    let mut v = data.to_vec();
    let start = Instant::now();
    sort(&mut v);
    let elapsed = start.elapsed().as_secs_f64() * 1000.;
    (v, elapsed)
}

/// Times the four sorts on the first `size` passengers.
/// Returns the row and the lists of selection, insertion and quick sort.
pub fn bench_size(passengers: &[Passenger], size: usize) -> (TimingRow, [Vec<Passenger>; 3]) {
    let data = &passengers[..size];
    let (selection, selection_ms) = time_sort(data, selection_sort);
    let (insertion, insertion_ms) = time_sort(data, insertion_sort);
    let (quick, quick_ms) = time_sort(data, quick_sort);
    let (_, std_ms) = time_sort(data, std_sort);
    let row = TimingRow {
        size,
        selection_sort: selection_ms,
        insertion_sort: insertion_ms,
        quick_sort: quick_ms,
        std_sort: std_ms,
    };
    (row, [selection, insertion, quick])
}

/// Runs the whole benchmark: every feasible size gets a line in the timings file
/// and three sorted lists in the sorted directory.
/// The timings file is flushed after each line so that a long run can be followed.
pub fn run(config: &BenchConfig) -> Result<Vec<TimingRow>> {
    let passengers = load_passengers(&config.passengers)?;
    fs::create_dir_all(&config.sorted_dir).map_err(|e| TimingsError::io(&config.sorted_dir, e))?;
    let file = File::create(&config.timings).map_err(|e| TimingsError::io(&config.timings, e))?;
    let mut wtr = csv::Writer::from_writer(BufWriter::new(file));
    wtr.write_record(TIMINGS_HEADER)?;
    wtr.flush().map_err(|e| TimingsError::io(&config.timings, e))?;

    let mut rows = Vec::with_capacity(config.sizes.len());
    for &size in config.sizes.iter() {
        if size > passengers.len() {
            warn!(
                "size {} skipped, only {} passengers available",
                size,
                passengers.len()
            );
            continue;
        }
        let (row, [selection, insertion, quick]) = bench_size(&passengers, size);
        info!(
            "size {}: selection {:.3} ms, insertion {:.3} ms, quick {:.3} ms, std {:.3} ms",
            size, row.selection_sort, row.insertion_sort, row.quick_sort, row.std_sort
        );
        wtr.write_record(row.record())?;
        wtr.flush().map_err(|e| TimingsError::io(&config.timings, e))?;
        save_sorted(&config.sorted_dir, "ss", size, &selection)?;
        save_sorted(&config.sorted_dir, "is", size, &insertion)?;
        save_sorted(&config.sorted_dir, "qs", size, &quick)?;
        rows.push(row);
    }
    Ok(rows)
}

fn save_sorted(dir: &Path, prefix: &str, size: usize, passengers: &[Passenger]) -> Result<()> {
    save_passengers(dir.join(format!("{}_{}.csv", prefix, size)), passengers)
}
