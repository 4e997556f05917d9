//! Chart construction and SVG rendering.
//!
//! [`build_charts`] turns a finished [`InferenceReport`] into chart descriptions
//! without touching the filesystem. [`SvgChartRenderer`] writes them out.

use std::path::{Path, PathBuf};

use inference_core::{ChartRenderer, InferenceError, Result};
use inference_metrics::{Histogram, HistogramBin, MetricAggregator};
use svg::node::element::{Group, Line, Rectangle, Text};
use svg::Document;

use crate::pipeline::InferenceReport;
use crate::report::percent_label;

pub const POPULATION_CHART: &str = "population_totale.svg";
pub const SAMPLE_CHART: &str = "echantillon.svg";
pub const INTERVAL_CHART: &str = "intervalle_confiance.svg";
pub const COMPARISON_CHART: &str = "comparaison_distributions.svg";

const WIDTH: u32 = 1200;
const WIDE_WIDTH: u32 = 1400;
const HEIGHT: u32 = 800;

const MARGIN_LEFT: f64 = 100.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_TOP: f64 = 70.0;
const MARGIN_BOTTOM: f64 = 80.0;
const X_TICKS: usize = 8;
const Y_TICKS: usize = 6;
const FONT: &str = "DejaVu Sans, Arial, sans-serif";

// ===== Chart Model =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Bar height is the bin count.
    Frequency,
    /// Bar height is the bin density.
    Density,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramLayer {
    pub label: Option<String>,
    pub histogram: Histogram,
    pub color: &'static str,
    pub opacity: f64,
}

/// Vertical marker drawn across the whole plot area.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub value: f64,
    pub label: String,
    pub color: &'static str,
    pub style: LineStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub file_name: &'static str,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub scale: Scale,
    pub width: u32,
    pub height: u32,
    pub layers: Vec<HistogramLayer>,
    pub lines: Vec<ReferenceLine>,
}

impl ChartSpec {
    fn bar_height(&self, bin: &HistogramBin) -> f64 {
        match self.scale {
            Scale::Frequency => bin.count as f64,
            Scale::Density => bin.density,
        }
    }

    /// Horizontal extent covering every bar and marker, padded by 5% per side.
    pub fn x_domain(&self) -> Option<(f64, f64)> {
        let bounds = self
            .layers
            .iter()
            .filter_map(|layer| layer.histogram.range())
            .flat_map(|(lo, hi)| [lo, hi])
            .chain(self.lines.iter().map(|line| line.value))
            .filter(|v| v.is_finite());

        let (min, max) = bounds.fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

        let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
        Some((min - pad, max + pad))
    }

    pub fn y_max(&self) -> f64 {
        let highest = self
            .layers
            .iter()
            .map(|layer| match self.scale {
                Scale::Frequency => layer.histogram.max_count() as f64,
                Scale::Density => layer.histogram.max_density(),
            })
            .fold(0.0, f64::max);

        if highest > 0.0 {
            highest * 1.05
        } else {
            1.0
        }
    }
}

// ===== Chart Construction =====

/// The four charts of a run, in output order.
pub fn build_charts(report: &InferenceReport) -> Vec<ChartSpec> {
    let config = &report.config;
    let interval = &report.confidence_interval;
    let level = percent_label(interval.confidence_level);

    let population_histogram =
        MetricAggregator::histogram(report.population.values(), config.population_bins);
    let sample_histogram = MetricAggregator::histogram(report.sample.values(), config.sample_bins);

    let true_mean = ReferenceLine {
        value: report.population_stats.mean,
        label: format!("Moyenne réelle: {:.2}", report.population_stats.mean),
        color: "red",
        style: LineStyle::Dashed,
    };
    let sample_mean = ReferenceLine {
        value: report.sample_stats.mean,
        label: format!("Moyenne échantillon: {:.2}", report.sample_stats.mean),
        color: "blue",
        style: LineStyle::Dashed,
    };
    let tested_value = ReferenceLine {
        value: report.hypothesis_test.tested_value,
        label: format!("Valeur testée: {:.2}", report.hypothesis_test.tested_value),
        color: "green",
        style: LineStyle::Solid,
    };
    let lower_bound = ReferenceLine {
        value: interval.lower,
        label: format!("IC {}% min: {:.2}", level, interval.lower),
        color: "purple",
        style: LineStyle::Solid,
    };
    let upper_bound = ReferenceLine {
        value: interval.upper,
        label: format!("IC {}% max: {:.2}", level, interval.upper),
        color: "purple",
        style: LineStyle::Solid,
    };

    vec![
        ChartSpec {
            file_name: POPULATION_CHART,
            title: format!(
                "Distribution de la population totale (N={})",
                group_thousands(report.population.len())
            ),
            x_label: "Valeur",
            y_label: "Fréquence",
            scale: Scale::Frequency,
            width: WIDTH,
            height: HEIGHT,
            layers: vec![HistogramLayer {
                label: None,
                histogram: population_histogram.clone(),
                color: "skyblue",
                opacity: 0.7,
            }],
            lines: vec![true_mean.clone(), tested_value.clone()],
        },
        ChartSpec {
            file_name: SAMPLE_CHART,
            title: format!(
                "Distribution de l'échantillon (n={})",
                group_thousands(report.sample.len())
            ),
            x_label: "Valeur",
            y_label: "Fréquence",
            scale: Scale::Frequency,
            width: WIDTH,
            height: HEIGHT,
            layers: vec![HistogramLayer {
                label: None,
                histogram: sample_histogram.clone(),
                color: "lightgreen",
                opacity: 0.7,
            }],
            lines: vec![sample_mean.clone(), tested_value.clone()],
        },
        ChartSpec {
            file_name: INTERVAL_CHART,
            title: format!("Échantillon avec intervalle de confiance à {}%", level),
            x_label: "Valeur",
            y_label: "Fréquence",
            scale: Scale::Frequency,
            width: WIDTH,
            height: HEIGHT,
            layers: vec![HistogramLayer {
                label: None,
                histogram: sample_histogram.clone(),
                color: "lightgreen",
                opacity: 0.5,
            }],
            lines: vec![
                sample_mean.clone(),
                lower_bound,
                upper_bound,
                tested_value.clone(),
            ],
        },
        ChartSpec {
            file_name: COMPARISON_CHART,
            title: "Comparaison des distributions (population vs échantillon)".to_string(),
            x_label: "Valeur",
            y_label: "Densité",
            scale: Scale::Density,
            width: WIDE_WIDTH,
            height: HEIGHT,
            layers: vec![
                HistogramLayer {
                    label: Some("Population".to_string()),
                    histogram: population_histogram,
                    color: "skyblue",
                    opacity: 0.5,
                },
                HistogramLayer {
                    label: Some("Échantillon".to_string()),
                    histogram: sample_histogram,
                    color: "lightgreen",
                    opacity: 0.5,
                },
            ],
            lines: vec![true_mean, sample_mean, tested_value],
        },
    ]
}

/// Render every chart of `report` into `output_dir`.
pub fn render_all<R>(report: &InferenceReport, renderer: &R, output_dir: &Path) -> Result<Vec<PathBuf>>
where
    R: ChartRenderer<Chart = ChartSpec>,
{
    build_charts(report)
        .iter()
        .map(|chart| renderer.render(chart, output_dir))
        .collect()
}

/// `10000` -> `"10 000"`.
pub fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}

// ===== SVG Rendering =====

/// Maps data coordinates onto the plot area of a chart.
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x_min: f64,
    x_max: f64,
    y_max: f64,
}

impl Frame {
    fn new(chart: &ChartSpec, (x_min, x_max): (f64, f64)) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: chart.width as f64 - MARGIN_LEFT - MARGIN_RIGHT,
            height: chart.height as f64 - MARGIN_TOP - MARGIN_BOTTOM,
            x_min,
            x_max,
            y_max: chart.y_max(),
        }
    }

    fn x(&self, value: f64) -> f64 {
        self.left + (value - self.x_min) / (self.x_max - self.x_min) * self.width
    }

    fn y(&self, value: f64) -> f64 {
        self.top + self.height - value / self.y_max * self.height
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SvgChartRenderer;

impl SvgChartRenderer {
    /// Build the SVG document for `chart`.
    pub fn document(&self, chart: &ChartSpec) -> Result<Document> {
        let domain = chart.x_domain().ok_or_else(|| {
            InferenceError::Render(format!("chart '{}' has nothing to plot", chart.title))
        })?;
        let frame = Frame::new(chart, domain);

        let mut document = Document::new()
            .set("width", chart.width)
            .set("height", chart.height)
            .set("viewBox", format!("0 0 {} {}", chart.width, chart.height))
            .set("font-family", FONT)
            .add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", "white"),
            )
            .add(grid_and_axes(chart, &frame));

        for layer in &chart.layers {
            document = document.add(bars(chart, layer, &frame));
        }
        for line in &chart.lines {
            document = document.add(reference_line(line, &frame));
        }

        Ok(document
            .add(
                text(chart.width as f64 / 2.0, MARGIN_TOP / 2.0, &chart.title)
                    .set("font-size", 20)
                    .set("text-anchor", "middle"),
            )
            .add(legend(chart, &frame)))
    }
}

impl ChartRenderer for SvgChartRenderer {
    type Chart = ChartSpec;

    fn render(&self, chart: &ChartSpec, output_dir: &Path) -> Result<PathBuf> {
        let document = self.document(chart)?;
        let path = output_dir.join(chart.file_name);
        svg::save(&path, &document)?;

        tracing::info!(path = %path.display(), "Chart saved");
        Ok(path)
    }
}

fn text(x: f64, y: f64, content: &str) -> Text {
    Text::new(content).set("x", x).set("y", y)
}

fn grid_and_axes(chart: &ChartSpec, frame: &Frame) -> Group {
    let mut group = Group::new().set("font-size", 12);

    let x_step = nice_step(frame.x_max - frame.x_min, X_TICKS);
    for tick in nice_ticks(frame.x_min, frame.x_max, X_TICKS) {
        let x = frame.x(tick);
        group = group
            .add(
                Line::new()
                    .set("x1", x)
                    .set("y1", frame.top)
                    .set("x2", x)
                    .set("y2", frame.bottom())
                    .set("stroke", "#e5e5e5"),
            )
            .add(
                text(x, frame.bottom() + 20.0, &tick_label(tick, x_step))
                    .set("text-anchor", "middle"),
            );
    }

    let y_step = nice_step(frame.y_max, Y_TICKS);
    for tick in nice_ticks(0.0, frame.y_max, Y_TICKS) {
        let y = frame.y(tick);
        group = group
            .add(
                Line::new()
                    .set("x1", frame.left)
                    .set("y1", y)
                    .set("x2", frame.right())
                    .set("y2", y)
                    .set("stroke", "#e5e5e5"),
            )
            .add(
                text(frame.left - 8.0, y + 4.0, &tick_label(tick, y_step))
                    .set("text-anchor", "end"),
            );
    }

    let axis_label_y = frame.top + frame.height / 2.0;
    group
        .add(
            Rectangle::new()
                .set("x", frame.left)
                .set("y", frame.top)
                .set("width", frame.width)
                .set("height", frame.height)
                .set("fill", "none")
                .set("stroke", "#333333"),
        )
        .add(
            text(frame.left + frame.width / 2.0, frame.bottom() + 55.0, chart.x_label)
                .set("font-size", 14)
                .set("text-anchor", "middle"),
        )
        .add(
            text(30.0, axis_label_y, chart.y_label)
                .set("font-size", 14)
                .set("text-anchor", "middle")
                .set("transform", format!("rotate(-90 30 {})", axis_label_y)),
        )
}

fn bars(chart: &ChartSpec, layer: &HistogramLayer, frame: &Frame) -> Group {
    layer
        .histogram
        .bins
        .iter()
        .fold(Group::new(), |group, bin| {
            let x = frame.x(bin.lower_bound);
            let top = frame.y(chart.bar_height(bin));
            group.add(
                Rectangle::new()
                    .set("x", x)
                    .set("y", top)
                    .set("width", frame.x(bin.upper_bound) - x)
                    .set("height", frame.bottom() - top)
                    .set("fill", layer.color)
                    .set("fill-opacity", layer.opacity)
                    .set("stroke", "black")
                    .set("stroke-width", 0.8),
            )
        })
}

fn reference_line(line: &ReferenceLine, frame: &Frame) -> Line {
    let x = frame.x(line.value);
    stroke_style(
        Line::new()
            .set("x1", x)
            .set("y1", frame.top)
            .set("x2", x)
            .set("y2", frame.bottom())
            .set("stroke", line.color)
            .set("stroke-width", 2),
        line.style,
    )
}

fn stroke_style(line: Line, style: LineStyle) -> Line {
    match style {
        LineStyle::Solid => line,
        LineStyle::Dashed => line.set("stroke-dasharray", "8,5"),
    }
}

fn legend(chart: &ChartSpec, frame: &Frame) -> Group {
    const ROW: f64 = 24.0;
    const SWATCH: f64 = 28.0;

    let labels: Vec<&str> = chart
        .layers
        .iter()
        .filter_map(|layer| layer.label.as_deref())
        .chain(chart.lines.iter().map(|line| line.label.as_str()))
        .collect();
    let longest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f64;

    let box_width = SWATCH + 24.0 + longest * 7.5;
    let box_height = labels.len() as f64 * ROW + 12.0;
    let left = frame.right() - box_width - 10.0;
    let top = frame.top + 10.0;

    let mut group = Group::new().set("font-size", 13).add(
        Rectangle::new()
            .set("x", left)
            .set("y", top)
            .set("width", box_width)
            .set("height", box_height)
            .set("rx", 4)
            .set("fill", "white")
            .set("fill-opacity", 0.85)
            .set("stroke", "#cccccc"),
    );

    let mut row_y = top + ROW / 2.0 + 6.0;
    for layer in &chart.layers {
        let Some(label) = layer.label.as_deref() else {
            continue;
        };
        group = group
            .add(
                Rectangle::new()
                    .set("x", left + 8.0)
                    .set("y", row_y - 7.0)
                    .set("width", SWATCH)
                    .set("height", 14)
                    .set("fill", layer.color)
                    .set("fill-opacity", layer.opacity)
                    .set("stroke", "black")
                    .set("stroke-width", 0.8),
            )
            .add(text(left + SWATCH + 16.0, row_y + 4.0, label));
        row_y += ROW;
    }
    for line in &chart.lines {
        group = group
            .add(stroke_style(
                Line::new()
                    .set("x1", left + 8.0)
                    .set("y1", row_y)
                    .set("x2", left + 8.0 + SWATCH)
                    .set("y2", row_y)
                    .set("stroke", line.color)
                    .set("stroke-width", 2),
                line.style,
            ))
            .add(text(left + SWATCH + 16.0, row_y + 4.0, &line.label));
        row_y += ROW;
    }

    group
}

/// Round tick positions covering `[min, max]` with roughly `target` steps.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if target == 0 || min.is_nan() || max.is_nan() || max <= min {
        return vec![min];
    }

    let step = nice_step(max - min, target);
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn tick_label(value: f64, step: f64) -> String {
    if step >= 1.0 {
        format!("{:.0}", value)
    } else {
        let decimals = (-step.log10().floor()) as usize;
        format!("{:.*}", decimals, value)
    }
}
