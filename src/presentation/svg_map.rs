// SVG rendering of the radar map and snapshot export
use crate::application::plot::PlotSnapshot;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const BACKGROUND: &str = "#f0f0f0";
const POINT_FILL: &str = "red";
const ORIGIN_FILL: &str = "#1976d2";

/// Render the frozen draw state as a standalone SVG document: the canvas
/// background, a vehicle marker at the origin, and one circle per live
/// point.
pub fn render(snapshot: &PlotSnapshot) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        snapshot.canvas_width, snapshot.canvas_height
    );
    let _ = writeln!(
        svg,
        r#"  <rect width="100%" height="100%" fill="{BACKGROUND}"/>"#
    );
    let _ = writeln!(
        svg,
        r#"  <circle cx="{}" cy="{}" r="{}" fill="{ORIGIN_FILL}"/>"#,
        snapshot.origin.x,
        snapshot.origin.y,
        snapshot.point_radius + 2.0
    );
    for point in &snapshot.points {
        let _ = writeln!(
            svg,
            r#"  <circle cx="{}" cy="{}" r="{}" fill="{POINT_FILL}"/>"#,
            point.x, point.y, snapshot.point_radius
        );
    }
    svg.push_str("</svg>\n");
    svg
}

/// Freeze the current render into a timestamped file under `dir` and return
/// its path.
pub fn write_snapshot(snapshot: &PlotSnapshot, dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let name = format!("map-{}.svg", chrono::Local::now().format("%Y%m%d-%H%M%S"));
    let path = dir.join(name);
    std::fs::write(&path, render(snapshot))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::plot::{PlotSettings, PolarPlot};
    use crate::domain::mapping::PolarSample;

    fn rendered() -> String {
        let mut plot = PolarPlot::new(PlotSettings::default());
        plot.enqueue([PolarSample::new(500.0, 90.0), PolarSample::new(500.0, 0.0)]);
        plot.flush();
        render(&plot.snapshot())
    }

    #[test]
    fn test_render_contains_one_circle_per_point() {
        let svg = rendered();
        // Two points plus the origin marker.
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains(r#"cx="250" cy="125""#));
        assert!(svg.contains(r#"cx="375" cy="250""#));
    }

    #[test]
    fn test_render_declares_canvas_size() {
        let svg = rendered();
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="500" height="500">"#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_empty_map_still_renders_origin() {
        let plot = PolarPlot::new(PlotSettings::default());
        let svg = render(&plot.snapshot());
        assert_eq!(svg.matches("<circle").count(), 1);
    }
}
