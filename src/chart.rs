use super::{min_and_max, Result, TimingTable, TimingsError};
use super::{COL_INSERTION, COL_QUICK, COL_SELECTION, COL_SIZE, COL_STD};
use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{debug, warn};

/// 10 x 6 inches at 300 dpi.
pub const IMAGE_SIZE: (u32, u32) = (3000, 1800);

/// 300 dpi as stored in the png `pHYs` chunk.
pub const PIXELS_PER_METER: u32 = 11811;

pub const X_DESC: &str = "Размер массива";
pub const Y_DESC: &str = "Время (мс)";

const FONT: &str = "sans-serif";
const LINE_WIDTH: u32 = 6;
/// length of the line sample in the legend, the legend area leaves a gap after it
const LEGEND_SAMPLE: i32 = 60;
const LEGEND_AREA: u32 = 80;

/// Column, legend label and color (tab10 cycle) of each plotted algorithm.
const ALGORITHMS: [(&str, &str, RGBColor); 4] = [
    (COL_SELECTION, "Selection Sort", RGBColor(31, 119, 180)),
    (COL_INSERTION, "Insertion Sort", RGBColor(255, 127, 14)),
    (COL_QUICK, "Quick Sort", RGBColor(44, 160, 44)),
    (COL_STD, "std::sort", RGBColor(214, 39, 40)),
];

/// Scaling of the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    Log,
}

impl AxisScale {
    pub fn title(self) -> &'static str {
        match self {
            AxisScale::Linear => "Сортировка — обычный масштаб",
            AxisScale::Log => "Сортировка — логарифмическая шкала",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            AxisScale::Linear => "sort_plot_linear.png",
            AxisScale::Log => "sort_plot_log.png",
        }
    }

    /// whether the value can be placed on this axis
    fn accepts(self, v: f64) -> bool {
        match self {
            AxisScale::Linear => v.is_finite(),
            AxisScale::Log => v.is_finite() && v > 0.,
        }
    }
}

impl std::fmt::Display for AxisScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisScale::Linear => write!(f, "linear"),
            AxisScale::Log => write!(f, "log"),
        }
    }
}

/// One algorithm ready to be drawn: the line is split in segments
/// wherever a point cannot be drawn on the chosen scale.
#[derive(Debug, Clone)]
pub struct Series {
    pub label: &'static str,
    pub color: RGBColor,
    pub segments: Vec<Vec<(f64, f64)>>,
    /// finite values dropped because the scale cannot show them
    pub skipped: usize,
}

impl Series {
    pub fn new(
        label: &'static str,
        color: RGBColor,
        column: &str,
        sizes: &[f64],
        values: &[f64],
        scale: AxisScale,
    ) -> Series {
        let mut segments = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();
        let mut skipped = 0;
        for (&x, &y) in sizes.iter().zip(values.iter()) {
            if x.is_finite() && scale.accepts(y) {
                current.push((x, y));
                continue;
            }
            if y.is_finite() && x.is_finite() {
                warn!(
                    "{} value {} of {} at size {} cannot be drawn, skipped",
                    scale, y, column, x
                );
                skipped += 1;
            }
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        Series {
            label,
            color,
            segments,
            skipped,
        }
    }

    fn points(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.segments.iter().flatten()
    }
}

/// Resolves `Size` and the four algorithm columns of the table.
/// Fails on the first column that is not there.
pub fn collect_series(table: &TimingTable, scale: AxisScale) -> Result<Vec<Series>> {
    let sizes = table.column(COL_SIZE)?;
    let mut series = Vec::with_capacity(ALGORITHMS.len());
    for &(column, label, color) in ALGORITHMS.iter() {
        let values = table.column(column)?;
        series.push(Series::new(label, color, column, sizes, values, scale));
    }
    Ok(series)
}

/// x range with a 5% margin on each side
pub fn linear_range(minmax: Option<(f64, f64)>) -> (f64, f64) {
    match minmax {
        None => (0., 1.),
        Some((min, max)) if min == max => (min - 0.5, max + 0.5),
        Some((min, max)) => {
            let margin = (max - min) / 20.;
            (min - margin, max + margin)
        }
    }
}

/// like `linear_range`, but the margin is taken in decades
pub fn log_range(minmax: Option<(f64, f64)>) -> (f64, f64) {
    match minmax {
        None => (1., 10.),
        Some((min, max)) => {
            let (lmin, lmax) = (min.log10(), max.log10());
            let margin = if lmin == lmax {
                0.5
            } else {
                (lmax - lmin) / 20.
            };
            (10f64.powf(lmin - margin), 10f64.powf(lmax + margin))
        }
    }
}

/// Plots the timings of the four algorithms against the size to png.
/// All the columns are looked up before the image is created,
/// so a missing column leaves no file behind.
pub fn plot_chart(table: &TimingTable, fout: &Path, scale: AxisScale) -> Result<()> {
    let series = collect_series(table, scale)?;
    let skipped: usize = series.iter().map(|s| s.skipped).sum();
    if skipped > 0 {
        warn!("{} value(s) left out of the {} chart", skipped, scale);
    }
    let (xmin, xmax) = linear_range(min_and_max(
        series.iter().flat_map(|s| s.points()).map(|p| p.0),
    ));
    let ys = min_and_max(series.iter().flat_map(|s| s.points()).map(|p| p.1));
    debug!(
        "{} chart of {} rows, x in {}..{}, y in {:?}",
        scale,
        table.len(),
        xmin,
        xmax,
        ys
    );

    let (width, height) = IMAGE_SIZE;
    let mut rgb = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut rgb, IMAGE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let mut builder = ChartBuilder::on(&root);
        builder
            .caption(scale.title(), (FONT, 60))
            .margin(40)
            .x_label_area_size(140)
            .y_label_area_size(220);
        match scale {
            AxisScale::Linear => {
                let (ymin, ymax) = linear_range(ys);
                let mut chart = builder.build_cartesian_2d(xmin..xmax, ymin..ymax)?;
                draw_timings(&mut chart, scale, &series)?;
            }
            AxisScale::Log => {
                let (ymin, ymax) = log_range(ys);
                let mut chart =
                    builder.build_cartesian_2d(xmin..xmax, (ymin..ymax).log_scale())?;
                draw_timings(&mut chart, scale, &series)?;
            }
        }
        root.present()?;
    }
    save_png(fout, &rgb, IMAGE_SIZE)
}

/// Encodes an rgb buffer as png, tagged with the 300 dpi resolution.
pub fn save_png(fout: &Path, rgb: &[u8], (width, height): (u32, u32)) -> Result<()> {
    let file = File::create(fout).map_err(|e| TimingsError::io(fout, e))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: PIXELS_PER_METER,
        yppu: PIXELS_PER_METER,
        unit: png::Unit::Meter,
    }));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgb)?;
    writer.finish()?;
    Ok(())
}

fn draw_timings<'a, DB, X, Y>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<X, Y>>,
    scale: AxisScale,
    series: &[Series],
) -> Result<()>
where
    DB: DrawingBackend + 'a,
    X: Ranged<ValueType = f64> + ValueFormatter<f64>,
    Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    // the log chart also gets the minor grid
    let light_line = match scale {
        AxisScale::Linear => TRANSPARENT,
        AxisScale::Log => BLACK.mix(0.1),
    };
    chart
        .configure_mesh()
        .light_line_style(light_line)
        .bold_line_style(BLACK.mix(0.25).stroke_width(2))
        .set_all_tick_mark_size(8)
        .label_style((FONT, 40))
        .axis_desc_style((FONT, 44))
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .draw()?;

    for s in series {
        let style = s.color.stroke_width(LINE_WIDTH);
        let mut segments = s.segments.iter();
        let first = segments.next().cloned().unwrap_or_default();
        let color = s.color;
        chart
            .draw_series(LineSeries::new(first, style))?
            .label(s.label)
            .legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + LEGEND_SAMPLE, y)],
                    color.stroke_width(LINE_WIDTH),
                )
            });
        for segment in segments {
            chart.draw_series(LineSeries::new(segment.iter().copied(), style))?;
        }
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .label_font((FONT, 40))
        .legend_area_size(LEGEND_AREA)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;
    Ok(())
}
