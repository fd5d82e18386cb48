//! Terminal visualization using braille graphics
//!
//! Cost curves are drawn on a drawille canvas; yields get a plain
//! block-character bar.

use drawille::Canvas;

use crate::core::CostCurvePoint;

/// Default canvas size for the cost curve chart (in braille dots)
pub const CHART_WIDTH: u32 = 120;
pub const CHART_HEIGHT: u32 = 48;

/// Default width of a percentage bar, in characters
pub const BAR_WIDTH: usize = 40;

/// Which series to plot from a cost curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Cost,
    Yield,
}

impl Series {
    fn value(self, point: &CostCurvePoint) -> f64 {
        match self {
            Series::Cost => point.cost_per_good_die,
            Series::Yield => point.yield_pct,
        }
    }
}

/// Plot one series of a cost curve
///
/// The x axis spans the swept defect densities, the y axis runs from 0 to
/// the series maximum. Consecutive samples are joined by straight segments.
///
/// # Example Output
/// ```text
/// Cost per good die ($), max 214.60
/// ⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⢀⠔⠁
/// ⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⣀⠤⠒⠉⠀⠀⠀⠀⠀
/// ⣀⣀⣀⡠⠤⠤⠤⠒⠒⠊⠉⠉⠁⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀
/// D0 0.10 .. 1.90 /cm²
/// ```
pub fn render_series(points: &[CostCurvePoint], series: Series, width: u32, height: u32) -> String {
    if points.is_empty() {
        return "  (no points)".to_string();
    }

    let mut canvas = Canvas::new(width, height);

    let x_min = points[0].defect_density;
    let x_max = points[points.len() - 1].defect_density;
    let x_span = (x_max - x_min).max(f64::EPSILON);

    let y_max = points
        .iter()
        .map(|p| series.value(p))
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON);

    let max_x = (width - 1) as f64;
    let max_y = (height - 1) as f64;
    let to_canvas = |p: &CostCurvePoint| -> (f64, f64) {
        let px = if points.len() == 1 {
            0.0
        } else {
            (p.defect_density - x_min) / x_span * max_x
        };
        // Canvas y grows downward
        let py = max_y - (series.value(p) / y_max).clamp(0.0, 1.0) * max_y;
        (px, py)
    };

    let mut previous: Option<(f64, f64)> = None;
    for point in points {
        let (px, py) = to_canvas(point);
        match previous {
            Some((x0, y0)) => {
                let steps = ((px - x0).abs().max((py - y0).abs()).ceil() as u32).max(1);
                for s in 0..=steps {
                    let t = s as f64 / steps as f64;
                    let x = x0 + (px - x0) * t;
                    let y = y0 + (py - y0) * t;
                    canvas.set(x.round() as u32, y.round() as u32);
                }
            }
            None => canvas.set(px.round() as u32, py.round() as u32),
        }
        previous = Some((px, py));
    }

    let title = match series {
        Series::Cost => format!("Cost per good die ($), max {:.2}", y_max),
        Series::Yield => format!("Yield (%), max {:.1}", y_max),
    };

    let mut output = String::new();
    output.push_str(&title);
    output.push('\n');
    output.push_str(&canvas.frame());
    output.push_str(&format!("\nD0 {:.2} .. {:.2} /cm²", x_min, x_max));
    output
}

/// Render cost and yield charts for a sweep, one below the other
pub fn render_cost_curve(points: &[CostCurvePoint]) -> String {
    format!(
        "{}\n\n{}",
        render_series(points, Series::Cost, CHART_WIDTH, CHART_HEIGHT),
        render_series(points, Series::Yield, CHART_WIDTH, CHART_HEIGHT / 2)
    )
}

/// Render a fraction in [0, 1] as a horizontal bar
///
/// ```text
/// [████████████████████████████░░░░░░░░░░░░] 66.9%
/// ```
pub fn render_percent_bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!(
        "[{}{}] {:.1}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        fraction * 100.0
    )
}
