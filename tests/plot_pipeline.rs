use sort_timings::{plot_timings, AxisScale, TimingsError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TIMINGS: &str = "\
Size,SelectionSort,InsertionSort,QuickSort,StdSort
100,0.21,0.12,0.03,0.01
1000,19.8,11.2,0.41,0.18
3000,178.5,101.3,1.32,0.61
10000,1990.4,1120.7,4.9,2.2
";

fn write_timings(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("timings.csv");
    fs::write(&path, content).unwrap();
    path
}

fn images(outdir: &Path) -> [PathBuf; 2] {
    [
        outdir.join(AxisScale::Linear.file_name()),
        outdir.join(AxisScale::Log.file_name()),
    ]
}

#[test]
fn writes_both_charts_and_creates_the_directory() {
    let dir = TempDir::new().unwrap();
    let csvin = write_timings(dir.path(), TIMINGS);
    let outdir = dir.path().join("images").join("nested");
    let written = plot_timings(&csvin, &outdir).unwrap();
    assert_eq!(written, images(&outdir));
    for fout in written {
        assert!(fs::metadata(&fout).unwrap().len() > 0, "{} is empty", fout.display());
    }
}

#[test]
fn padded_headers_plot_like_plain_ones() {
    let dir = TempDir::new().unwrap();
    let padded = TIMINGS.replacen(
        "Size,SelectionSort,InsertionSort,QuickSort,StdSort",
        " Size , SelectionSort , InsertionSort , QuickSort , StdSort ",
        1,
    );
    let csvin = write_timings(dir.path(), &padded);
    let outdir = dir.path().join("images");
    plot_timings(&csvin, &outdir).unwrap();
    for fout in images(&outdir).iter() {
        assert!(fout.exists());
    }
}

#[test]
fn rerun_overwrites_the_images() {
    let dir = TempDir::new().unwrap();
    let csvin = write_timings(dir.path(), TIMINGS);
    let outdir = dir.path().join("images");
    let first = plot_timings(&csvin, &outdir).unwrap();
    let second = plot_timings(&csvin, &outdir).unwrap();
    assert_eq!(first, second);
    let mut entries: Vec<_> = fs::read_dir(&outdir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();
    assert_eq!(entries, ["sort_plot_linear.png", "sort_plot_log.png"]);
}

#[test]
fn missing_data_file_fails_before_plotting() {
    let dir = TempDir::new().unwrap();
    let outdir = dir.path().join("images");
    let err = plot_timings(dir.path().join("timings.csv"), &outdir).unwrap_err();
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    assert!(outdir.is_dir());
    assert_eq!(fs::read_dir(&outdir).unwrap().count(), 0);
}

#[test]
fn missing_algorithm_column_fails_while_plotting() {
    let dir = TempDir::new().unwrap();
    let csvin = write_timings(
        dir.path(),
        "Size,SelectionSort,InsertionSort,QuickSort\n100,1,1,1\n",
    );
    let outdir = dir.path().join("images");
    match plot_timings(&csvin, &outdir) {
        Err(TimingsError::MissingColumn(column)) => assert_eq!(column, "StdSort"),
        other => panic!("expected a missing column, got {:?}", other),
    }
    assert!(outdir.is_dir());
    for fout in images(&outdir).iter() {
        assert!(!fout.exists());
    }
}

#[test]
fn zero_timings_still_produce_the_log_chart() {
    let dir = TempDir::new().unwrap();
    let csvin = write_timings(
        dir.path(),
        "Size,SelectionSort,InsertionSort,QuickSort,StdSort\n100,0,0,0,0\n1000,12,7,0,0\n",
    );
    let outdir = dir.path().join("images");
    plot_timings(&csvin, &outdir).unwrap();
    assert!(outdir.join(AxisScale::Log.file_name()).exists());
}

#[test]
fn images_are_3000_by_1800_at_300_dpi() {
    let dir = TempDir::new().unwrap();
    let csvin = write_timings(dir.path(), TIMINGS);
    let outdir = dir.path().join("images");
    for fout in plot_timings(&csvin, &outdir).unwrap() {
        let file = fs::File::open(&fout).unwrap();
        let reader = png::Decoder::new(std::io::BufReader::new(file))
            .read_info()
            .unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (3000, 1800));
        let dims = info.pixel_dims.unwrap();
        assert_eq!((dims.xppu, dims.yppu), (11811, 11811));
        assert_eq!(dims.unit, png::Unit::Meter);
    }
}
