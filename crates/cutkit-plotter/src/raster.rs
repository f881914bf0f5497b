//! Raster scan planning.
//!
//! A [`RasterPlan`] is derived once from an image, its placement in the
//! scene and the scan parameters. It precomputes which scan lines hold any
//! power, then streams weighted lattice points line by line.
//!
//! Pixel `(i, j)` covers the scene square starting at
//! `origin + (i, j) * step`, where `origin` is the image translation rounded
//! to the lattice. Each scan line is entered from a lead-in point `overscan`
//! units before the first lit pixel and left through a lead-out point
//! `overscan` units past the last one, so the head is at speed while it
//! burns.

use std::collections::VecDeque;

use cutkit_core::{BoxedIterator, PlotPoint, RasterResult};
use kurbo::{Affine, Point, Rect};
use tracing::debug;

use crate::raster_image::{ColorMode, IntensityMap, RasterImage};
use crate::zingl::lattice;

/// Axis a scan line runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAxis {
    /// Horizontal scan lines, one per pixel row
    X,
    /// Vertical scan lines, one per pixel column
    Y,
}

/// Order in which scan lines are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    #[default]
    TopToBottom,
    BottomToTop,
    RightToLeft,
    LeftToRight,
}

impl ScanOrder {
    pub fn axis(self) -> ScanAxis {
        match self {
            Self::TopToBottom | Self::BottomToTop => ScanAxis::X,
            Self::RightToLeft | Self::LeftToRight => ScanAxis::Y,
        }
    }

    /// True when lines are visited from the highest index down.
    fn descending(self) -> bool {
        matches!(self, Self::BottomToTop | Self::RightToLeft)
    }
}

/// Scan order plus whether every line runs the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Traversal {
    pub order: ScanOrder,
    /// Every line runs forward, with an unlit return between lines.
    /// Otherwise consecutive lines alternate direction.
    pub unidirectional: bool,
}

impl Traversal {
    pub fn new(order: ScanOrder, unidirectional: bool) -> Self {
        Self {
            order,
            unidirectional,
        }
    }

    pub fn axis(&self) -> ScanAxis {
        self.order.axis()
    }

    /// Direction of the `n`th non-blank line. Forward is `+x` for horizontal
    /// lines and `+y` for vertical ones.
    fn forward(&self, n: usize) -> bool {
        self.unidirectional || n % 2 == 0
    }
}

/// Orientation of the first scan move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialDirection {
    pub x_axis: bool,
    pub y_axis: bool,
    /// Head initially travels towards increasing x
    pub right: bool,
    /// Head initially travels towards increasing y
    pub bottom: bool,
}

/// A scan line holding at least one lit pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLine {
    /// Row for horizontal lines, column for vertical lines
    pub index: u32,
    /// First lit pixel along the line
    pub lower: u32,
    /// Last lit pixel along the line
    pub upper: u32,
}

/// Immutable plan for engraving one image.
#[derive(Debug, Clone)]
pub struct RasterPlan {
    intensity: IntensityMap,
    width: u32,
    height: u32,
    step: i64,
    overscan: i64,
    traversal: Traversal,
    origin: (i64, i64),
    lines: Vec<ScanLine>,
}

impl RasterPlan {
    /// Plan the engraving of `image` placed by `transform`.
    ///
    /// Only the translation of `transform` is used. A `step` below 1 is
    /// raised to 1 and a negative `overscan` is treated as 0.
    pub fn new(
        image: RasterImage,
        transform: Affine,
        step: i64,
        traversal: Traversal,
        overscan: i64,
    ) -> RasterResult<Self> {
        let intensity = IntensityMap::new(image)?;
        let (width, height) = intensity.dimensions();
        let translation = transform.translation();
        let mut plan = Self {
            intensity,
            width,
            height,
            step: step.max(1),
            overscan: overscan.max(0),
            traversal,
            origin: lattice(Point::new(translation.x, translation.y)),
            lines: Vec::new(),
        };
        plan.lines = plan.find_scan_lines();

        debug!(
            width,
            height,
            mode = %plan.intensity.mode(),
            step = plan.step,
            overscan = plan.overscan,
            order = ?plan.traversal.order,
            unidirectional = plan.traversal.unidirectional,
            scan_lines = plan.lines.len(),
            "Raster plan created"
        );
        Ok(plan)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mode(&self) -> ColorMode {
        self.intensity.mode()
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    pub fn overscan(&self) -> i64 {
        self.overscan
    }

    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    /// Rounded scene position of the image's top-left corner.
    pub fn origin(&self) -> (i64, i64) {
        self.origin
    }

    /// Number of scan lines that hold at least one lit pixel.
    pub fn scan_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[ScanLine] {
        &self.lines
    }

    /// Laser power weight of pixel `(x, y)`, `None` outside the image.
    pub fn weight_at(&self, x: u32, y: u32) -> Option<f64> {
        (x < self.width && y < self.height).then(|| self.intensity.weight(x, y))
    }

    /// Scene rectangle covered by the image.
    pub fn bounds(&self) -> Rect {
        let (ox, oy) = self.origin;
        Rect::new(
            ox as f64,
            oy as f64,
            (ox + self.width as i64 * self.step) as f64,
            (oy + self.height as i64 * self.step) as f64,
        )
    }

    /// First point of the plot: the lead-in of the first scan line.
    pub fn initial_position(&self) -> (i64, i64) {
        match self.lines.first() {
            Some(line) => {
                let (entry, _) = self.extent(line, self.traversal.forward(0));
                self.scene(line, entry, -self.sign(0) * self.overscan)
            }
            None => self.origin,
        }
    }

    /// Last point of the plot: the lead-out of the last scan line.
    pub fn final_position(&self) -> (i64, i64) {
        match self.lines.last() {
            Some(line) => {
                let n = self.lines.len() - 1;
                let (_, exit) = self.extent(line, self.traversal.forward(n));
                self.scene(line, exit, self.sign(n) * self.overscan)
            }
            None => self.origin,
        }
    }

    pub fn initial_direction(&self) -> InitialDirection {
        match self.traversal.order {
            order @ (ScanOrder::TopToBottom | ScanOrder::BottomToTop) => InitialDirection {
                x_axis: true,
                y_axis: false,
                right: true,
                bottom: order == ScanOrder::TopToBottom,
            },
            order @ (ScanOrder::RightToLeft | ScanOrder::LeftToRight) => InitialDirection {
                x_axis: false,
                y_axis: true,
                right: order == ScanOrder::LeftToRight,
                bottom: true,
            },
        }
    }

    /// Lazily stream the weighted points of the whole plan.
    pub fn plot(&self) -> RasterPlot<'_> {
        RasterPlot {
            plan: self,
            line: 0,
            pending: VecDeque::new(),
        }
    }

    fn find_scan_lines(&self) -> Vec<ScanLine> {
        let (count, length) = match self.traversal.axis() {
            ScanAxis::X => (self.height, self.width),
            ScanAxis::Y => (self.width, self.height),
        };
        let indices: BoxedIterator<'_, u32> = if self.traversal.order.descending() {
            Box::new((0..count).rev())
        } else {
            Box::new(0..count)
        };
        indices
            .filter_map(|index| {
                let lower = (0..length).find(|&k| self.lit(index, k))?;
                let upper = (0..length).rev().find(|&k| self.lit(index, k))?;
                Some(ScanLine {
                    index,
                    lower,
                    upper,
                })
            })
            .collect()
    }

    /// Weight of pixel `k` along scan line `index`.
    fn weight_along(&self, index: u32, k: u32) -> f64 {
        match self.traversal.axis() {
            ScanAxis::X => self.intensity.weight(k, index),
            ScanAxis::Y => self.intensity.weight(index, k),
        }
    }

    fn lit(&self, index: u32, k: u32) -> bool {
        self.weight_along(index, k) != 0.0
    }

    fn sign(&self, n: usize) -> i64 {
        if self.traversal.forward(n) {
            1
        } else {
            -1
        }
    }

    /// Entry and exit edges of `line`, in pixel units along the line.
    fn extent(&self, line: &ScanLine, forward: bool) -> (i64, i64) {
        let (lower, upper) = (line.lower as i64, line.upper as i64 + 1);
        if forward {
            (lower, upper)
        } else {
            (upper, lower)
        }
    }

    /// Scene position of pixel edge `edge` on `line`, moved `offset` scene
    /// units along the line.
    fn scene(&self, line: &ScanLine, edge: i64, offset: i64) -> (i64, i64) {
        let (ox, oy) = self.origin;
        let across = line.index as i64 * self.step;
        let along = edge * self.step + offset;
        match self.traversal.axis() {
            ScanAxis::X => (ox + along, oy + across),
            ScanAxis::Y => (ox + across, oy + along),
        }
    }

    /// Runs of equal weight along `line`, as `(far edge, weight)` pairs.
    fn runs(&self, line: &ScanLine, forward: bool) -> Vec<(i64, f64)> {
        let pixels: BoxedIterator<'_, u32> = if forward {
            Box::new(line.lower..=line.upper)
        } else {
            Box::new((line.lower..=line.upper).rev())
        };
        let mut runs: Vec<(i64, f64)> = Vec::new();
        for k in pixels {
            let weight = self.weight_along(line.index, k);
            let edge = if forward { k as i64 + 1 } else { k as i64 };
            match runs.last_mut() {
                Some((far, w)) if *w == weight => *far = edge,
                _ => runs.push((edge, weight)),
            }
        }
        runs
    }

    /// Weighted points for the `n`th non-blank scan line.
    fn line_points(&self, n: usize) -> VecDeque<PlotPoint> {
        let line = &self.lines[n];
        let forward = self.traversal.forward(n);
        let sign = self.sign(n);
        let (entry, exit) = self.extent(line, forward);
        let point = |edge: i64, offset: i64, weight: f64| {
            let (x, y) = self.scene(line, edge, offset);
            PlotPoint::weighted(x, y, weight)
        };

        let mut points = VecDeque::new();
        points.push_back(point(entry, -sign * self.overscan, 0.0));
        if self.overscan > 0 {
            points.push_back(point(entry, 0, 0.0));
        }
        for (edge, weight) in self.runs(line, forward) {
            points.push_back(point(edge, 0, weight));
        }
        if self.overscan > 0 {
            points.push_back(point(exit, sign * self.overscan, 0.0));
        }
        points
    }
}

/// Lazy weighted point stream of a [`RasterPlan`], produced one scan line
/// at a time.
#[derive(Debug, Clone)]
pub struct RasterPlot<'a> {
    plan: &'a RasterPlan,
    line: usize,
    pending: VecDeque<PlotPoint>,
}

impl Iterator for RasterPlot<'_> {
    type Item = PlotPoint;

    fn next(&mut self) -> Option<PlotPoint> {
        while self.pending.is_empty() {
            if self.line >= self.plan.lines.len() {
                return None;
            }
            self.pending = self.plan.line_points(self.line);
            self.line += 1;
        }
        self.pending.pop_front()
    }
}
