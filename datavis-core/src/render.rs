//! PNG chart rendering
//!
//! [`ChartRenderer`] is the single entry point: it validates a [`ChartSpec`]
//! against the table, lays out the figure grid and draws each panel with
//! plotters' bitmap backend.

use crate::chart::{ChartKind, ChartSpec, MarkerShape, Panel, Series};
use crate::config::RenderConfig;
use crate::format;
use crate::palette::ColorScale;
use crate::stats;
use crate::types::{DataError, Result, Table};
use chrono::{DateTime, Local};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;
use std::fs;
use std::path::{Path, PathBuf};

const FONT: &str = "sans-serif";

/// Bar and gap slots reserved per category in a grouped bar chart
const SLOTS_PER_GROUP: usize = 4;

fn render_err<E: std::fmt::Display>(err: E) -> DataError {
    DataError::Render(err.to_string())
}

/// Renders chart specs into timestamped PNG files
pub struct ChartRenderer {
    config: RenderConfig,
}

impl ChartRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// `{output_dir}/{stem}_{timestamp}.png`
    pub fn output_path(&self, kind: ChartKind, at: &DateTime<Local>) -> PathBuf {
        let timestamp = at.format(&self.config.timestamp_format);
        self.config
            .output_dir
            .join(format!("{}_{}.png", kind.file_stem(), timestamp))
    }

    /// Render one of the stock charts
    pub fn render_kind(&self, table: &Table, kind: ChartKind) -> Result<PathBuf> {
        self.render(table, &ChartSpec::for_kind(kind))
    }

    /// Validate, draw and write a chart. Returns the written path.
    pub fn render(&self, table: &Table, spec: &ChartSpec) -> Result<PathBuf> {
        spec.validate(table)?;

        fs::create_dir_all(&self.config.output_dir)?;
        let path = self.output_path(spec.kind, &Local::now());

        log::debug!("Rendering {} into {:?}", spec.kind, path);
        draw_figure(&path, table, spec)?;
        log::info!("{} written: {:?}", spec.kind, path);

        Ok(path)
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

fn draw_figure(path: &Path, table: &Table, spec: &ChartSpec) -> Result<()> {
    let root = BitMapBackend::new(path, spec.size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let body = root
        .titled(&spec.title, (FONT, 30).into_font().style(FontStyle::Bold))
        .map_err(render_err)?;
    let areas = body.split_evenly(spec.layout);

    for (panel, area) in spec.panels.iter().zip(areas.iter()) {
        draw_panel(area, table, panel)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    table: &Table,
    panel: &Panel,
) -> Result<()> {
    match panel {
        Panel::Trend {
            title,
            category,
            series,
            y_label,
            marker,
        } => draw_trend(area, table, title, category, series, y_label, *marker),
        Panel::GroupedBars {
            title,
            category,
            series,
            x_label,
            y_label,
        } => draw_grouped_bars(area, table, title, category, series, x_label, y_label),
        Panel::Scatter {
            title,
            x,
            y,
            color_by,
            scale,
            x_label,
            y_label,
        } => draw_scatter(
            area,
            table,
            title,
            (x.as_str(), y.as_str(), color_by.as_str()),
            *scale,
            x_label,
            y_label,
        ),
        Panel::Distribution {
            title,
            series,
            bins,
            x_label,
        } => draw_distribution(area, table, title, series, *bins, x_label),
        Panel::Correlation { scale } => draw_correlation(area, table, *scale),
    }
}

/// Value range padded by 10% on both sides, optionally forced to include 0
fn padded_range(values: &[f64], include_zero: bool) -> (f64, f64) {
    let mut lo = stats::min(values).unwrap_or(0.0);
    let mut hi = stats::max(values).unwrap_or(1.0);
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    let span = if hi > lo { hi - lo } else { 1.0 };
    let pad = span * 0.1;
    let lo = if include_zero && lo == 0.0 { 0.0 } else { lo - pad };
    (lo, hi + pad)
}

fn caption_font() -> FontDesc<'static> {
    (FONT, 20).into_font().style(FontStyle::Bold)
}

fn category_label(labels: &[String], value: &SegmentValue<usize>) -> String {
    match value {
        SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

fn draw_trend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    table: &Table,
    title: &str,
    category: &str,
    series: &Series,
    y_label: &str,
    marker: MarkerShape,
) -> Result<()> {
    let labels = table.labels(category)?;
    let values = table.numeric(&series.column)?;
    let (y_min, y_max) = padded_range(values, false);
    let last = labels.len().saturating_sub(1);

    let mut chart = ChartBuilder::on(area)
        .caption(title, caption_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d((0..last).into_segmented(), y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|v| category_label(&labels, v))
        .y_label_formatter(&|y| format::thousands(*y, 0))
        .y_desc(y_label)
        .draw()
        .map_err(render_err)?;

    let color = series.color;
    let points: Vec<(SegmentValue<usize>, f64)> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .map(|(i, v)| (SegmentValue::CenterOf(i), *v))
        .collect();

    chart
        .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
        .map_err(render_err)?;

    match marker {
        MarkerShape::Circle => {
            chart
                .draw_series(points.iter().map(|p| Circle::new(p.clone(), 5, color.filled())))
                .map_err(render_err)?;
        }
        MarkerShape::Square => {
            chart
                .draw_series(points.iter().map(|p| {
                    EmptyElement::at(p.clone())
                        + Rectangle::new([(-5, -5), (5, 5)], color.filled())
                }))
                .map_err(render_err)?;
        }
        MarkerShape::Triangle => {
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|p| TriangleMarker::new(p.clone(), 6, color.filled())),
                )
                .map_err(render_err)?;
        }
        MarkerShape::Cross => {
            chart
                .draw_series(points.iter().map(|p| Cross::new(p.clone(), 5, color.stroke_width(2))))
                .map_err(render_err)?;
        }
    }
    Ok(())
}

fn draw_grouped_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    table: &Table,
    title: &str,
    category: &str,
    series: &[Series],
    x_label: &str,
    y_label: &str,
) -> Result<()> {
    let labels = table.labels(category)?;
    let columns: Vec<&[f64]> = series
        .iter()
        .map(|s| table.numeric(&s.column))
        .collect::<Result<_>>()?;

    let all_values: Vec<f64> = columns.iter().flat_map(|c| c.iter().copied()).collect();
    let (y_min, y_max) = padded_range(&all_values, true);

    // One slot per bar plus a gap slot, label centred under the middle bar
    let slots = SLOTS_PER_GROUP.max(series.len() + 1);
    let label_slot = series.len() / 2;
    let last_slot = (labels.len() * slots).saturating_sub(1);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90);
    if !title.is_empty() {
        builder.caption(title, caption_font());
    }
    let mut chart = builder
        .build_cartesian_2d((0..last_slot).into_segmented(), y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(last_slot + 1)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(slot) if slot % slots == label_slot => {
                labels.get(slot / slots).cloned().unwrap_or_default()
            }
            _ => String::new(),
        })
        .y_label_formatter(&|y| format::thousands(*y, 0))
        .x_desc(x_label)
        .y_desc(y_label)
        .draw()
        .map_err(render_err)?;

    let value_style = TextStyle::from((FONT, 11).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
    let label_offset = (y_max - y_min) * 0.01;

    for (offset, (entry, values)) in series.iter().zip(&columns).enumerate() {
        let color = entry.color;
        let bars: Vec<(usize, f64)> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .map(|(row, v)| (row * slots + offset, *v))
            .collect();

        chart
            .draw_series(bars.iter().map(|&(slot, value)| {
                Rectangle::new(
                    [
                        (SegmentValue::Exact(slot), 0.0),
                        (SegmentValue::Exact(slot + 1), value),
                    ],
                    color.mix(0.8).filled(),
                )
            }))
            .map_err(render_err)?
            .label(entry.column.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));

        chart
            .draw_series(bars.iter().map(|&(slot, value)| {
                Text::new(
                    format!("${}", format::thousands(value, 0)),
                    (SegmentValue::CenterOf(slot), value.max(0.0) + label_offset),
                    value_style.clone(),
                )
            }))
            .map_err(render_err)?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;
    Ok(())
}

fn draw_scatter<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    table: &Table,
    title: &str,
    (x_col, y_col, color_col): (&str, &str, &str),
    scale: ColorScale,
    x_label: &str,
    y_label: &str,
) -> Result<()> {
    let xs = table.numeric(x_col)?;
    let ys = table.numeric(y_col)?;
    let shades = table.numeric(color_col)?;

    let (x_min, x_max) = padded_range(xs, false);
    let (y_min, y_max) = padded_range(ys, false);
    let shade_min = stats::min(shades).unwrap_or(0.0);
    let shade_max = stats::max(shades).unwrap_or(0.0);

    let mut chart = ChartBuilder::on(area)
        .caption(title, caption_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|x| format::thousands(*x, 0))
        .y_label_formatter(&|y| format::thousands(*y, 0))
        .x_desc(x_label)
        .y_desc(y_label)
        .draw()
        .map_err(render_err)?;

    let points = xs
        .iter()
        .zip(ys)
        .zip(shades)
        .filter(|((x, y), _)| !x.is_nan() && !y.is_nan())
        .map(|((x, y), shade)| {
            let color = scale.normalized(*shade, shade_min, shade_max);
            Circle::new((*x, *y), 7, color.mix(0.7).filled())
        });
    chart.draw_series(points).map_err(render_err)?;

    if let Some(fit) = stats::linear_fit(xs, ys) {
        let lo = stats::min(xs).unwrap_or(x_min);
        let hi = stats::max(xs).unwrap_or(x_max);
        chart
            .draw_series(LineSeries::new(
                vec![(lo, fit.at(lo)), (hi, fit.at(hi))],
                RED.mix(0.8).stroke_width(2),
            ))
            .map_err(render_err)?;
    } else {
        log::debug!("No trend line for {} vs {}", y_col, x_col);
    }
    Ok(())
}

fn draw_distribution<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    table: &Table,
    title: &str,
    series: &Series,
    bins: usize,
    x_label: &str,
) -> Result<()> {
    let values = table.numeric(&series.column)?;
    let histogram = stats::histogram(values, bins);
    let (x_min, x_max) = match (histogram.first(), histogram.last()) {
        (Some(first), Some(last)) => (first.lower, last.upper),
        _ => (0.0, 1.0),
    };
    let top = histogram.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption(title, caption_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..top)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|x| format::thousands(*x, 0))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .x_desc(x_label)
        .y_desc("Frequency")
        .draw()
        .map_err(render_err)?;

    let color = series.color;
    chart
        .draw_series(histogram.iter().map(|bin| {
            Rectangle::new(
                [(bin.lower, 0.0), (bin.upper, bin.count as f64)],
                color.mix(0.7).filled(),
            )
        }))
        .map_err(render_err)?;
    chart
        .draw_series(histogram.iter().map(|bin| {
            Rectangle::new(
                [(bin.lower, 0.0), (bin.upper, bin.count as f64)],
                BLACK.stroke_width(1),
            )
        }))
        .map_err(render_err)?;
    Ok(())
}

fn draw_correlation<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    table: &Table,
    scale: ColorScale,
) -> Result<()> {
    let columns = table.numeric_columns();
    let names: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();
    let series: Vec<&[f64]> = columns.iter().filter_map(|c| c.values()).collect();
    let matrix = stats::correlation_matrix(&series);
    let n = names.len();
    let last = n.saturating_sub(1);

    let mut chart = ChartBuilder::on(area)
        .margin(30)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d((0..last).into_segmented(), (0..last).into_segmented())
        .map_err(render_err)?;

    // Row 0 of the matrix is drawn at the top
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&|v| category_label(&names, v))
        .y_label_formatter(&|v| match v {
            SegmentValue::CenterOf(r) if *r < n => names[last - r].clone(),
            _ => String::new(),
        })
        .draw()
        .map_err(render_err)?;

    let cells: Vec<(usize, usize, f64)> = matrix
        .iter()
        .enumerate()
        .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, v)| (last - i, j, *v)))
        .collect();

    chart
        .draw_series(cells.iter().map(|&(row, col, value)| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(col), SegmentValue::Exact(row)),
                    (SegmentValue::Exact(col + 1), SegmentValue::Exact(row + 1)),
                ],
                scale.normalized(value, -1.0, 1.0).filled(),
            )
        }))
        .map_err(render_err)?;

    let annotation = TextStyle::from((FONT, 18).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
    chart
        .draw_series(cells.iter().map(|&(row, col, value)| {
            let style = if value.abs() > 0.6 {
                annotation.color(&WHITE)
            } else {
                annotation.color(&BLACK)
            };
            let text = if value.is_nan() {
                "nan".to_string()
            } else {
                format!("{:.2}", value)
            };
            Text::new(
                text,
                (SegmentValue::CenterOf(col), SegmentValue::CenterOf(row)),
                style,
            )
        }))
        .map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadOptions;
    use crate::loader::from_reader;
    use chrono::TimeZone;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
Month,Sales,Profit,Customers,Expenses
Jan,15000,3000,120,12000
Feb,18000,4200,135,13800
Mar,22000,5500,150,16500
Apr,19000,3800,142,15200
";

    fn sample_table() -> Table {
        from_reader(SAMPLE.as_bytes(), &LoadOptions::new()).unwrap()
    }

    fn assert_file_name(path: &Path, stem: &str) {
        let name = path.file_name().unwrap().to_str().unwrap();
        let timestamp = name
            .strip_prefix(&format!("{}_", stem))
            .and_then(|rest| rest.strip_suffix(".png"))
            .unwrap_or_else(|| panic!("unexpected file name: {}", name));
        assert_eq!(timestamp.len(), 15);
        assert_eq!(&timestamp[8..9], "_");
        assert!(timestamp.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_output_path_pattern() {
        let renderer = ChartRenderer::new(RenderConfig::new().with_output_dir("plots"));
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let path = renderer.output_path(ChartKind::Heatmap, &at);
        assert_eq!(path, PathBuf::from("plots/heatmap_20240309_140507.png"));
    }

    #[test]
    fn test_each_kind_writes_one_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("plots");
        let renderer = ChartRenderer::new(RenderConfig::new().with_output_dir(&out));
        let table = sample_table();

        for kind in ChartKind::ALL {
            let path = renderer.render_kind(&table, kind).unwrap();
            assert!(path.exists());
            assert_eq!(path.parent().unwrap(), out.as_path());
            assert_file_name(&path, kind.file_stem());
        }

        let written = fs::read_dir(&out).unwrap().count();
        assert_eq!(written, ChartKind::ALL.len());
    }

    #[test]
    fn test_invalid_table_writes_nothing() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("plots");
        let renderer = ChartRenderer::new(RenderConfig::new().with_output_dir(&out));
        let table = from_reader("Month,Sales\nJan,1\n".as_bytes(), &LoadOptions::new()).unwrap();

        let result = renderer.render_kind(&table, ChartKind::Line);
        assert!(matches!(result, Err(DataError::MissingColumn(_))));
        assert!(!out.exists());
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range(&[0.0, 10.0], true), (0.0, 11.0));
        let (lo, hi) = padded_range(&[5.0, 5.0], false);
        assert!(lo < 5.0 && hi > 5.0);
        let (lo, _) = padded_range(&[-10.0, 10.0], true);
        assert_eq!(lo, -12.0);
    }
}
