//! Raster engraving cut.

use cutkit_core::{BoxedIterator, PlotPoint, RasterResult};
use cutkit_plotter::{InitialDirection, RasterImage, RasterPlan, ScanOrder, Traversal};
use cutkit_settings::{LaserSettings, RasterDirection, SharedSettings};
use kurbo::{Affine, Point, Rect};
use tracing::trace;

use crate::cut::resolve_settings;

/// Scan order for a configured raster direction. Crosshatch scans its
/// first pass like top-to-bottom.
fn scan_order(direction: RasterDirection) -> ScanOrder {
    match direction {
        RasterDirection::TopToBottom | RasterDirection::Crosshatch => ScanOrder::TopToBottom,
        RasterDirection::BottomToTop => ScanOrder::BottomToTop,
        RasterDirection::RightToLeft => ScanOrder::RightToLeft,
        RasterDirection::LeftToRight => ScanOrder::LeftToRight,
    }
}

/// Traversal described by `settings`; `raster_swing` means every line runs
/// the same way.
pub fn traversal(settings: &LaserSettings) -> Traversal {
    Traversal::new(scan_order(settings.raster_direction), settings.raster_swing)
}

/// An image engraved line by line.
///
/// The scan plan is derived once at construction. Start and end are the
/// plan's first and last scene positions.
#[derive(Debug, Clone)]
pub struct RasterCut {
    plan: RasterPlan,
    transform: Affine,
    settings: SharedSettings,
}

impl RasterCut {
    /// Plan `image` placed by `transform` with the raster parameters of
    /// `settings`.
    ///
    /// Fails when the image has no intensity rule even after conversion.
    pub fn new(
        image: RasterImage,
        transform: Affine,
        settings: Option<SharedSettings>,
    ) -> RasterResult<Self> {
        let settings = resolve_settings(settings);
        let plan = RasterPlan::new(
            image,
            transform,
            i64::from(settings.raster_step),
            traversal(&settings),
            settings.implicit_overscan(),
        )?;
        Ok(Self {
            plan,
            transform,
            settings,
        })
    }

    pub fn plan(&self) -> &RasterPlan {
        &self.plan
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }

    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    pub fn start(&self) -> Point {
        let (x, y) = self.plan.initial_position();
        Point::new(x as f64, y as f64)
    }

    pub fn end(&self) -> Point {
        let (x, y) = self.plan.final_position();
        Point::new(x as f64, y as f64)
    }

    pub fn initial_direction(&self) -> InitialDirection {
        self.plan.initial_direction()
    }

    /// Scene rectangle covered by the image.
    pub fn bounds(&self) -> Rect {
        self.plan.bounds()
    }

    /// Raster scan order is fixed by the settings; reversing leaves it as is.
    pub fn reverse(&mut self) {
        trace!("Raster cut keeps its scan order on reverse");
    }

    pub fn generator(&self) -> BoxedIterator<'_, PlotPoint> {
        Box::new(self.plan.plot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::CutObject;
    use image::{DynamicImage, GrayImage, Luma};

    fn black_square() -> RasterImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([0]))).into()
    }

    #[test]
    fn test_black_square_defaults() {
        let settings = LaserSettings::builder()
            .raster_step(1)
            .raster_direction(RasterDirection::TopToBottom)
            .raster_swing(false)
            .overscan(Some(20.0))
            .build_shared();
        let cut = RasterCut::new(black_square(), Affine::IDENTITY, Some(settings)).unwrap();

        assert_eq!(cut.plan().overscan(), 20);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(cut.plan().weight_at(x, y), Some(1.0));
            }
        }

        let cut = CutObject::from(cut);
        assert_eq!(cut.major_axis(), 0);
        assert_eq!(cut.x_dir(), 1);
        assert_eq!(cut.y_dir(), 1);
        assert_eq!(cut.start(), Point::new(-20.0, 0.0));
        assert_eq!(cut.end(), Point::new(-20.0, 3.0));
    }

    #[test]
    fn test_settings_map_to_traversal() {
        let settings = LaserSettings::builder()
            .raster_direction(RasterDirection::RightToLeft)
            .raster_swing(true)
            .build();
        let right = traversal(&settings);
        assert_eq!(right.order, ScanOrder::RightToLeft);
        assert!(right.unidirectional);

        let crosshatch = LaserSettings::builder()
            .raster_direction(RasterDirection::Crosshatch)
            .build();
        assert_eq!(traversal(&crosshatch).order, ScanOrder::TopToBottom);
    }

    #[test]
    fn test_zero_step_and_missing_overscan() {
        let settings = LaserSettings::builder()
            .raster_step(0)
            .overscan(None)
            .build_shared();
        let cut = RasterCut::new(black_square(), Affine::IDENTITY, Some(settings)).unwrap();
        assert_eq!(cut.plan().step(), 1);
        assert_eq!(cut.plan().overscan(), 20);
    }

    #[test]
    fn test_reverse_keeps_plan() {
        let mut cut = RasterCut::new(black_square(), Affine::translate((5.0, 5.0)), None).unwrap();
        let before: Vec<_> = cut.generator().collect();
        cut.reverse();
        let after: Vec<_> = cut.generator().collect();
        assert_eq!(before, after);
        assert_eq!(cut.bounds(), Rect::new(5.0, 5.0, 9.0, 9.0));
    }
}
