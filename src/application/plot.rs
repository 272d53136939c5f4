// Polar plot model - accumulates mapping samples into a live radar view
use crate::domain::mapping::{polar_to_cartesian, scale_factor, CanvasPoint, PolarSample};
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct PlotSettings {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Largest distance the canvas can show, in the sample's unit (mm).
    pub max_range: f64,
    /// Live points expire this long after their last update.
    pub point_lifetime: Duration,
    pub point_radius: f64,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            canvas_width: 500.0,
            canvas_height: 500.0,
            max_range: 1000.0,
            point_lifetime: Duration::from_millis(5000),
            point_radius: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PlottedPoint {
    position: CanvasPoint,
    expires_at: Instant,
}

/// Immutable view of the current draw state, consumed by the SVG renderer.
#[derive(Debug, Clone)]
pub struct PlotSnapshot {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub origin: CanvasPoint,
    pub point_radius: f64,
    pub points: Vec<CanvasPoint>,
}

/// Keyed by whole-degree angle: one live point per bearing. Two returns at
/// the same bearing but different ranges overwrite each other; that matches
/// the upstream display and is a known modeling limitation, not a point
/// cloud.
pub struct PolarPlot {
    settings: PlotSettings,
    origin: CanvasPoint,
    scale: f64,
    pending: VecDeque<PolarSample>,
    points: HashMap<i64, PlottedPoint>,
    paused: bool,
}

impl PolarPlot {
    pub fn new(settings: PlotSettings) -> Self {
        let origin = CanvasPoint {
            x: settings.canvas_width / 2.0,
            y: settings.canvas_height / 2.0,
        };
        let scale = scale_factor(settings.canvas_width, settings.max_range);
        Self {
            settings,
            origin,
            scale,
            pending: VecDeque::new(),
            points: HashMap::new(),
            paused: false,
        }
    }

    /// Queue samples for the next flush. Never blocks. While paused,
    /// incoming samples are dropped so the queue stays bounded.
    pub fn enqueue<I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = PolarSample>,
    {
        if self.paused {
            return;
        }
        self.pending.extend(samples);
    }

    /// Drain the queue into live points and sweep expired ones. Returns the
    /// number of points created or moved. No-op while paused.
    pub fn flush(&mut self) -> usize {
        self.flush_at(Instant::now())
    }

    fn flush_at(&mut self, now: Instant) -> usize {
        if self.paused {
            return 0;
        }
        self.points.retain(|_, point| point.expires_at > now);

        let mut touched = 0;
        while let Some(sample) = self.pending.pop_front() {
            let position = polar_to_cartesian(sample, self.origin, self.scale);
            // 360 and 0 (and -90 and 270) are the same bearing.
            let key = (sample.angle.round() as i64).rem_euclid(360);
            self.points.insert(
                key,
                PlottedPoint {
                    position,
                    expires_at: now + self.settings.point_lifetime,
                },
            );
            touched += 1;
        }
        touched
    }

    /// Remove all live points and anything still queued.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.points.clear();
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Freeze the current draw state. Points are ordered by angle key so the
    /// output is stable for a given state.
    pub fn snapshot(&self) -> PlotSnapshot {
        let mut keyed: Vec<(i64, CanvasPoint)> = self
            .points
            .iter()
            .map(|(&key, point)| (key, point.position))
            .collect();
        keyed.sort_by_key(|&(key, _)| key);
        PlotSnapshot {
            canvas_width: self.settings.canvas_width,
            canvas_height: self.settings.canvas_height,
            origin: self.origin,
            point_radius: self.settings.point_radius,
            points: keyed.into_iter().map(|(_, position)| position).collect(),
        }
    }

    #[cfg(test)]
    fn point_at(&self, angle_key: i64) -> Option<CanvasPoint> {
        self.points.get(&angle_key).map(|p| p.position)
    }
}
