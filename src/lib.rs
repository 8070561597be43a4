use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub mod bench;
pub mod chart;
pub mod error;
pub mod logging;
pub mod passenger;
pub mod plot;
pub mod sort;

pub use chart::AxisScale;
pub use error::{Result, TimingsError};

pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

pub const DEFAULT_PASSENGERS_CSV: &str = "../data/passengers.csv";
pub const DEFAULT_TIMINGS_CSV: &str = "../data/timings.csv";
pub const DEFAULT_SORTED_DIR: &str = "../sorted";
pub const DEFAULT_IMAGES_DIR: &str = "../images";

pub const COL_SIZE: &str = "Size";
pub const COL_SELECTION: &str = "SelectionSort";
pub const COL_INSERTION: &str = "InsertionSort";
pub const COL_QUICK: &str = "QuickSort";
pub const COL_STD: &str = "StdSort";

/// Header of the timings file, in column order.
pub const TIMINGS_HEADER: [&str; 5] = [COL_SIZE, COL_SELECTION, COL_INSERTION, COL_QUICK, COL_STD];

/// The benchmark timings loaded from csv, stored column by column.
/// Headers are trimmed on load, cell values are kept as parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingTable {
    headers: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl TimingTable {
    pub fn new(headers: Vec<String>) -> TimingTable {
        let columns = vec![Vec::new(); headers.len()];
        TimingTable { headers, columns }
    }

    /// Init a TimingTable from csv.
    /// Leading and trailing whitespace is trimmed from the headers only.
    /// Cells that do not parse as numbers are set to NAN, missing cells too.
    /// Columns are not checked here, a wrong name only fails when it is looked up.
    pub fn from_csv<P: AsRef<Path>>(fin: P) -> Result<TimingTable> {
        let fin = fin.as_ref();
        let file = File::open(fin).map_err(|e| TimingsError::io(fin, e))?;
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(BufReader::new(file));
        let headers: Vec<String> = rdr.headers()?.iter().map(String::from).collect();
        debug!("read headers {:?} from {}", headers, fin.display());
        let mut table = TimingTable::new(headers);
        for record in rdr.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let row: Vec<f64> = record
                .iter()
                .take(table.headers.len())
                .map(|cell| match cell.trim() {
                    "" => f64::NAN,
                    cell => cell.parse::<f64>().unwrap_or_else(|_| {
                        warn!("invalid value {:?} on line {}, set to NAN", cell, line);
                        f64::NAN
                    }),
                })
                .collect();
            table.push_row(&row);
        }
        info!(
            "loaded {} rows and {} columns from {}",
            table.len(),
            table.headers.len(),
            fin.display()
        );
        Ok(table)
    }

    /// Appends one row; missing trailing values are filled with NAN.
    pub fn push_row(&mut self, row: &[f64]) {
        for (i, column) in self.columns.iter_mut().enumerate() {
            column.push(row.get(i).copied().unwrap_or(f64::NAN));
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Looks up a column by its exact (trimmed) name.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.headers
            .iter()
            .position(|h| h == name)
            .map(|i| &self.columns[i][..])
            .ok_or_else(|| TimingsError::MissingColumn(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for TimingTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.headers.join(","))?;
        for r in 0..self.len() {
            let row: Vec<String> = self.columns.iter().map(|c| c[r].to_string()).collect();
            writeln!(f, "{}", row.join(","))?;
        }
        Ok(())
    }
}

/// Min and max of the finite values, None if there are none.
pub fn min_and_max<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

/// Makes sure `outdir` exists, loads the timings from `csvin`
/// and saves the linear and the log chart in `outdir`.
/// Returns the paths of the written images.
pub fn plot_timings<P: AsRef<Path>, Q: AsRef<Path>>(csvin: P, outdir: Q) -> Result<Vec<PathBuf>> {
    let outdir = outdir.as_ref();
    fs::create_dir_all(outdir).map_err(|e| TimingsError::io(outdir, e))?;
    let table = TimingTable::from_csv(csvin)?;
    let mut written = Vec::with_capacity(2);
    for scale in [AxisScale::Linear, AxisScale::Log] {
        let fout = outdir.join(scale.file_name());
        chart::plot_chart(&table, &fout, scale)?;
        info!("saved {} chart to {}", scale, fout.display());
        written.push(fout);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("timings.csv");
        let mut f = File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[rstest]
    #[case::plain("Size,SelectionSort,InsertionSort,QuickSort,StdSort")]
    #[case::padded(" Size , SelectionSort,InsertionSort ,\tQuickSort,  StdSort  ")]
    fn headers_are_trimmed(#[case] header: &str) {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, &format!("{}\n100,1,2,3,4\n1000,10,20,30,40\n", header));
        let table = TimingTable::from_csv(&path).unwrap();
        assert_eq!(table.headers(), &TIMINGS_HEADER);
        assert_eq!(table.column("Size").unwrap(), &[100., 1000.]);
        assert_eq!(table.column("StdSort").unwrap(), &[4., 40.]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn unparsable_and_missing_cells_become_nan() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "Size,A,B\n1,x,3\n2,4\n");
        let table = TimingTable::from_csv(&path).unwrap();
        let a = table.column("A").unwrap();
        assert!(a[0].is_nan());
        assert_eq!(a[1], 4.);
        let b = table.column("B").unwrap();
        assert_eq!(b[0], 3.);
        assert!(b[1].is_nan());
    }

    #[test]
    fn missing_column_is_reported_on_lookup() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "Size,SelectionSort\n1,2\n");
        let table = TimingTable::from_csv(&path).unwrap();
        match table.column("QuickSort") {
            Err(TimingsError::MissingColumn(name)) => assert_eq!(name, "QuickSort"),
            other => panic!("expected a missing column, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = TimingTable::from_csv(dir.path().join("nope.csv")).unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }

    #[test]
    fn display_writes_csv() {
        let mut table = TimingTable::new(vec!["Size".into(), "QuickSort".into()]);
        table.push_row(&[10., 0.5]);
        table.push_row(&[20.]);
        assert_eq!(table.to_string(), "Size,QuickSort\n10,0.5\n20,NaN\n");
    }

    #[test]
    fn min_and_max_skips_non_finite() {
        assert_eq!(min_and_max(vec![3., f64::NAN, -1., 7.]), Some((-1., 7.)));
        assert_eq!(min_and_max(vec![f64::NAN]), None);
        assert_eq!(min_and_max(Vec::new()), None);
    }
}
