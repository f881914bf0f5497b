//! Cut objects.
//!
//! A cut object is one laser path primitive. Every kind answers the same
//! questions: where it starts and ends, which way it runs, and which lattice
//! points the head visits along it. [`CutObject`] closes the set of kinds so
//! each operation is an exhaustive match.

use cutkit_core::{BoxedIterator, PlotPoint};
use cutkit_plotter::zingl::{arc_point, lattice};
use cutkit_plotter::{plot_arc, plot_cubic_bezier, plot_line, plot_quad_bezier};
use cutkit_settings::{LaserSettings, SharedSettings};
use kurbo::{Arc, BezPath, Point, Shape, SvgArc, Vec2};

use crate::drawable::Drawable;
use crate::raster_cut::RasterCut;

/// Flattening tolerance for arc previews.
const PREVIEW_TOLERANCE: f64 = 0.1;

pub(crate) fn resolve_settings(settings: Option<SharedSettings>) -> SharedSettings {
    settings.unwrap_or_else(|| LaserSettings::default().into_shared())
}

/// `1` when the travel is closer to the y axis by the cheap
/// `(dx) - (dy) < 0` test on start minus end, `0` otherwise.
fn major_axis(start: Point, end: Point) -> u8 {
    u8::from((start.x - end.x) - (start.y - end.y) < 0.0)
}

fn x_dir(start: Point, end: Point) -> u8 {
    u8::from(start.x < end.x)
}

fn y_dir(start: Point, end: Point) -> u8 {
    u8::from(start.y < end.y)
}

/// Straight cut between two points.
#[derive(Debug, Clone)]
pub struct LineCut {
    pub start: Point,
    pub end: Point,
    pub settings: SharedSettings,
}

impl LineCut {
    pub fn new(start: Point, end: Point, settings: Option<SharedSettings>) -> Self {
        Self {
            start,
            end,
            settings: resolve_settings(settings),
        }
    }

    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }

    pub fn generator(&self) -> BoxedIterator<'static, PlotPoint> {
        let (x0, y0) = lattice(self.start);
        let (x1, y1) = lattice(self.end);
        Box::new(plot_line(x0, y0, x1, y1))
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path
    }
}

/// Quadratic Bezier cut.
#[derive(Debug, Clone)]
pub struct QuadCut {
    pub start: Point,
    pub control: Point,
    pub end: Point,
    pub settings: SharedSettings,
}

impl QuadCut {
    pub fn new(
        start: Point,
        control: Point,
        end: Point,
        settings: Option<SharedSettings>,
    ) -> Self {
        Self {
            start,
            control,
            end,
            settings: resolve_settings(settings),
        }
    }

    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }

    pub fn generator(&self) -> BoxedIterator<'static, PlotPoint> {
        Box::new(plot_quad_bezier(self.start, self.control, self.end).into_iter())
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.quad_to(self.control, self.end);
        path
    }
}

/// Cubic Bezier cut.
#[derive(Debug, Clone)]
pub struct CubicCut {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
    pub settings: SharedSettings,
}

impl CubicCut {
    pub fn new(
        start: Point,
        control1: Point,
        control2: Point,
        end: Point,
        settings: Option<SharedSettings>,
    ) -> Self {
        Self {
            start,
            control1,
            control2,
            end,
            settings: resolve_settings(settings),
        }
    }

    /// Swap the endpoints and the two control points.
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
        std::mem::swap(&mut self.control1, &mut self.control2);
    }

    pub fn generator(&self) -> BoxedIterator<'static, PlotPoint> {
        Box::new(
            plot_cubic_bezier(self.start, self.control1, self.control2, self.end).into_iter(),
        )
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.curve_to(self.control1, self.control2, self.end);
        path
    }
}

/// Circular or elliptical arc cut.
///
/// The arc runs from `start_angle` to `end_angle` on its ellipse; reversing
/// swaps the two angles.
#[derive(Debug, Clone)]
pub struct ArcCut {
    center: Point,
    radii: Vec2,
    x_rotation: f64,
    start_angle: f64,
    end_angle: f64,
    settings: SharedSettings,
}

impl ArcCut {
    pub fn new(arc: Arc, settings: Option<SharedSettings>) -> Self {
        Self {
            center: arc.center,
            radii: arc.radii,
            x_rotation: arc.x_rotation,
            start_angle: arc.start_angle,
            end_angle: arc.start_angle + arc.sweep_angle,
            settings: resolve_settings(settings),
        }
    }

    /// Circular arc around `center`.
    pub fn circular(
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
        settings: Option<SharedSettings>,
    ) -> Self {
        Self::new(
            Arc {
                center,
                radii: Vec2::new(radius, radius),
                start_angle,
                sweep_angle,
                x_rotation: 0.0,
            },
            settings,
        )
    }

    /// Arc from SVG endpoint parameters, `None` when they describe a
    /// straight line.
    pub fn from_svg_arc(arc: &SvgArc, settings: Option<SharedSettings>) -> Option<Self> {
        Arc::from_svg_arc(arc).map(|arc| Self::new(arc, settings))
    }

    /// The arc in its current direction.
    pub fn arc(&self) -> Arc {
        Arc {
            center: self.center,
            radii: self.radii,
            start_angle: self.start_angle,
            sweep_angle: self.end_angle - self.start_angle,
            x_rotation: self.x_rotation,
        }
    }

    pub fn start(&self) -> Point {
        arc_point(&self.arc(), self.start_angle)
    }

    pub fn end(&self) -> Point {
        arc_point(&self.arc(), self.end_angle)
    }

    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.start_angle, &mut self.end_angle);
    }

    pub fn generator(&self) -> BoxedIterator<'static, PlotPoint> {
        Box::new(plot_arc(&self.arc()).into_iter())
    }

    pub fn to_path(&self) -> BezPath {
        self.arc().to_path(PREVIEW_TOLERANCE)
    }
}

/// One laser path primitive.
#[derive(Debug, Clone)]
pub enum CutObject {
    Line(LineCut),
    Quad(QuadCut),
    Cubic(CubicCut),
    Arc(ArcCut),
    Raster(RasterCut),
}

impl CutObject {
    pub fn start(&self) -> Point {
        match self {
            Self::Line(cut) => cut.start,
            Self::Quad(cut) => cut.start,
            Self::Cubic(cut) => cut.start,
            Self::Arc(cut) => cut.start(),
            Self::Raster(cut) => cut.start(),
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Self::Line(cut) => cut.end,
            Self::Quad(cut) => cut.end,
            Self::Cubic(cut) => cut.end,
            Self::Arc(cut) => cut.end(),
            Self::Raster(cut) => cut.end(),
        }
    }

    /// Cheap axis classifier for ordering heuristics: `0` or `1`.
    ///
    /// Vector cuts compare their endpoints; raster cuts report the axis of
    /// their first scan line (`0` for horizontal lines).
    pub fn major_axis(&self) -> u8 {
        match self {
            Self::Raster(cut) => u8::from(!cut.initial_direction().x_axis),
            _ => major_axis(self.start(), self.end()),
        }
    }

    /// `1` when the cut heads towards increasing x.
    pub fn x_dir(&self) -> u8 {
        match self {
            Self::Raster(cut) => u8::from(cut.initial_direction().right),
            _ => x_dir(self.start(), self.end()),
        }
    }

    /// `1` when the cut heads towards increasing y.
    pub fn y_dir(&self) -> u8 {
        match self {
            Self::Raster(cut) => u8::from(cut.initial_direction().bottom),
            _ => y_dir(self.start(), self.end()),
        }
    }

    /// Flip the direction of travel in place.
    pub fn reverse(&mut self) {
        match self {
            Self::Line(cut) => cut.reverse(),
            Self::Quad(cut) => cut.reverse(),
            Self::Cubic(cut) => cut.reverse(),
            Self::Arc(cut) => cut.reverse(),
            Self::Raster(cut) => cut.reverse(),
        }
    }

    /// Lattice points along the cut in its current direction.
    ///
    /// Each call starts a fresh stream. Raster points carry a power weight.
    pub fn generator(&self) -> BoxedIterator<'_, PlotPoint> {
        match self {
            Self::Line(cut) => cut.generator(),
            Self::Quad(cut) => cut.generator(),
            Self::Cubic(cut) => cut.generator(),
            Self::Arc(cut) => cut.generator(),
            Self::Raster(cut) => cut.generator(),
        }
    }

    pub fn settings(&self) -> &SharedSettings {
        match self {
            Self::Line(cut) => &cut.settings,
            Self::Quad(cut) => &cut.settings,
            Self::Cubic(cut) => &cut.settings,
            Self::Arc(cut) => cut.settings(),
            Self::Raster(cut) => cut.settings(),
        }
    }

    /// Preview representation of the cut.
    pub fn to_drawable(&self) -> Drawable {
        match self {
            Self::Line(cut) => Drawable::path(&cut.to_path()),
            Self::Quad(cut) => Drawable::path(&cut.to_path()),
            Self::Cubic(cut) => Drawable::path(&cut.to_path()),
            Self::Arc(cut) => Drawable::path(&cut.to_path()),
            Self::Raster(cut) => Drawable::image(cut.bounds()),
        }
    }
}

impl From<LineCut> for CutObject {
    fn from(cut: LineCut) -> Self {
        Self::Line(cut)
    }
}

impl From<QuadCut> for CutObject {
    fn from(cut: QuadCut) -> Self {
        Self::Quad(cut)
    }
}

impl From<CubicCut> for CutObject {
    fn from(cut: CubicCut) -> Self {
        Self::Cubic(cut)
    }
}

impl From<ArcCut> for CutObject {
    fn from(cut: ArcCut) -> Self {
        Self::Arc(cut)
    }
}

impl From<RasterCut> for CutObject {
    fn from(cut: RasterCut) -> Self {
        Self::Raster(cut)
    }
}
