//! SVG rendering of chart frames

use plotters::prelude::*;
use plotters::style::FontTransform;
use std::sync::RwLock;

use super::{ChartFrame, ChartSurface, RenderError, Series};

const FALLBACK_COLOR: RGBColor = RGBColor(128, 128, 128);
const GRID_COLOR: RGBColor = RGBColor(238, 238, 238);
const TEXT_COLOR: RGBColor = RGBColor(51, 51, 51);
const LEGEND_BORDER: RGBColor = RGBColor(204, 204, 204);
const POINT_RADIUS: i32 = 3;

type Point = (SegmentValue<i32>, f64);

/// Surface that keeps the latest frame as an SVG document.
pub struct SvgSurface {
    width: u32,
    height: u32,
    document: RwLock<Option<String>>,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            document: RwLock::new(None),
        }
    }

    /// Latest SVG document, if anything has been drawn yet
    pub fn document(&self) -> Option<String> {
        self.document
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ChartSurface for SvgSurface {
    fn draw(&self, frame: &ChartFrame) -> Result<(), RenderError> {
        let svg = render_svg(frame, self.width, self.height)?;
        *self
            .document
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(svg);
        Ok(())
    }
}

/// A data point in pixel space with its hover text.
struct Hotspot {
    x: i32,
    y: i32,
    text: String,
}

/// Render a frame as a standalone SVG document.
///
/// Response time is plotted against the primary (left) axis and throughput
/// against the secondary (right) one. Only the primary axis draws grid
/// lines. Every point gets a `<title>` tooltip with its value to two decimals.
pub fn render_svg(frame: &ChartFrame, width: u32, height: u32) -> Result<String, RenderError> {
    let mut svg = String::new();
    let hotspots = {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        let hotspots = plot(&root, frame)?;
        root.present().map_err(draw_error)?;
        hotspots
    };
    Ok(with_tooltips(svg, &hotspots))
}

fn plot(
    root: &DrawingArea<SVGBackend<'_>, plotters::coord::Shift>,
    frame: &ChartFrame,
) -> Result<Vec<Hotspot>, RenderError> {
    root.fill(&WHITE).map_err(draw_error)?;

    // An empty frame still gets one slot so both axes can be laid out
    let slots = i32::try_from(frame.len().max(1)).unwrap_or(i32::MAX);
    let x_range = || (0..slots).into_segmented();

    let mut chart = ChartBuilder::on(root)
        .margin(12)
        .x_label_area_size(120)
        .y_label_area_size(64)
        .right_y_label_area_size(64)
        .build_cartesian_2d(x_range(), frame.left_axis.min..frame.left_axis.max)
        .map_err(draw_error)?
        .set_secondary_coord(x_range(), frame.right_axis.min..frame.right_axis.max);

    let labels = &frame.labels;
    let x_label = |value: &SegmentValue<i32>| match value {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| labels.get(i))
            .cloned()
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    };

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .bold_line_style(&GRID_COLOR)
        .light_line_style(&TRANSPARENT)
        .x_labels(frame.len().max(1))
        .x_label_formatter(&x_label)
        .x_label_style(
            ("sans-serif", 11)
                .into_font()
                .transform(FontTransform::Rotate90)
                .color(&TEXT_COLOR),
        )
        .y_labels(frame.left_axis.ticks.len())
        .y_desc(frame.left_axis.title.as_str())
        .axis_desc_style(("sans-serif", 12).into_font().color(&TEXT_COLOR))
        .label_style(("sans-serif", 11).into_font().color(&TEXT_COLOR));
    if !frame.left_axis.grid {
        mesh.disable_y_mesh();
    }
    mesh.draw().map_err(draw_error)?;

    chart
        .configure_secondary_axes()
        .y_labels(frame.right_axis.ticks.len())
        .y_desc(frame.right_axis.title.as_str())
        .draw()
        .map_err(draw_error)?;

    let response = points(&frame.response_time);
    let response_color = series_color(&frame.response_time);
    chart
        .draw_series(LineSeries::new(
            response.iter().cloned(),
            response_color.stroke_width(2),
        ))
        .map_err(draw_error)?
        .label(frame.response_time.label.as_str())
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], response_color.stroke_width(2))
        });
    chart
        .draw_series(
            response
                .iter()
                .map(|p| Circle::new(p.clone(), POINT_RADIUS, response_color.filled())),
        )
        .map_err(draw_error)?;

    let throughput = points(&frame.throughput);
    let throughput_color = series_color(&frame.throughput);
    chart
        .draw_secondary_series(LineSeries::new(
            throughput.iter().cloned(),
            throughput_color.stroke_width(2),
        ))
        .map_err(draw_error)?
        .label(frame.throughput.label.as_str())
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], throughput_color.stroke_width(2))
        });
    chart
        .draw_secondary_series(
            throughput
                .iter()
                .map(|p| Circle::new(p.clone(), POINT_RADIUS, throughput_color.filled())),
        )
        .map_err(draw_error)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&LEGEND_BORDER)
        .label_font(("sans-serif", 11).into_font().color(&TEXT_COLOR))
        .draw()
        .map_err(draw_error)?;

    let mut hotspots = Vec::with_capacity(response.len() + throughput.len());
    for ((point, label), value) in response.iter().zip(labels).zip(&frame.response_time.values) {
        let (x, y) = chart.backend_coord(point);
        hotspots.push(Hotspot {
            x,
            y,
            text: format!("{}: {}: {:.2}", label, frame.response_time.label, value),
        });
    }
    let secondary = chart.borrow_secondary();
    for ((point, label), value) in throughput.iter().zip(labels).zip(&frame.throughput.values) {
        let (x, y) = secondary.backend_coord(point);
        hotspots.push(Hotspot {
            x,
            y,
            text: format!("{}: {}: {:.2}", label, frame.throughput.label, value),
        });
    }
    Ok(hotspots)
}

fn points(series: &Series) -> Vec<Point> {
    series
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| (SegmentValue::CenterOf(i32::try_from(i).unwrap_or(i32::MAX)), *v))
        .collect()
}

/// Parse the `rgba(r, g, b, a)` color the browser uses for a series.
fn series_color(series: &Series) -> RGBColor {
    let channels: Vec<u8> = series
        .color
        .trim()
        .trim_start_matches("rgba(")
        .trim_start_matches("rgb(")
        .trim_end_matches(')')
        .split(',')
        .take(3)
        .filter_map(|c| c.trim().parse().ok())
        .collect();
    match channels[..] {
        [r, g, b] => RGBColor(r, g, b),
        _ => FALLBACK_COLOR,
    }
}

/// Overlay an invisible hover target with a `<title>` on every data point.
///
/// Labels are variant names and clock times and series names are fixed, so
/// the text needs no XML escaping.
fn with_tooltips(svg: String, hotspots: &[Hotspot]) -> String {
    let Some(end) = svg.rfind("</svg>") else {
        return svg;
    };
    let overlay: String = hotspots
        .iter()
        .map(|h| {
            format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"transparent\"><title>{}</title></circle>\n",
                h.x,
                h.y,
                POINT_RADIUS * 2,
                h.text
            )
        })
        .collect();
    format!("{}{}{}", &svg[..end], overlay, &svg[end..])
}

fn draw_error(err: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(err.to_string())
}
