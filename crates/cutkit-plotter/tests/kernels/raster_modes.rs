use cutkit_plotter::{ColorMode, RasterImage, RasterPlan, ScanAxis, Traversal};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use kurbo::Affine;

fn plan(image: RasterImage) -> RasterPlan {
    RasterPlan::new(image, Affine::IDENTITY, 1, Traversal::default(), 20).unwrap()
}

#[test]
fn test_black_gray_square_is_fully_lit() {
    let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([0])));
    let plan = plan(image.into());

    assert_eq!(plan.mode(), ColorMode::Gray);
    assert_eq!(plan.traversal().axis(), ScanAxis::X);
    assert!(plan.initial_direction().x_axis);
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(plan.weight_at(x, y), Some(1.0));
        }
    }
}

#[test]
fn test_bilevel_filter() {
    let image = RasterImage::bilevel(2, 1, vec![0, 255]).unwrap();
    let plan = plan(image);

    assert_eq!(plan.mode(), ColorMode::Bilevel);
    assert_eq!(plan.weight_at(0, 0), Some(1.0));
    assert_eq!(plan.weight_at(1, 0), Some(0.0));
}

#[test]
fn test_transparent_rgba_never_burns() {
    let mut buffer = RgbaImage::from_pixel(3, 1, Rgba([0, 0, 0, 0]));
    buffer.put_pixel(1, 0, Rgba([0, 0, 0, 255]));
    let plan = plan(DynamicImage::ImageRgba8(buffer).into());

    assert_eq!(plan.weight_at(0, 0), Some(0.0));
    assert_eq!(plan.weight_at(1, 0), Some(1.0));
    assert_eq!(plan.weight_at(2, 0), Some(0.0));
    assert_eq!(plan.lines().len(), 1);
    assert_eq!((plan.lines()[0].lower, plan.lines()[0].upper), (1, 1));
}

#[test]
fn test_rgb_weight_is_mean_darkness() {
    let image = RgbImage::from_pixel(1, 1, Rgb([255, 0, 0]));
    let plan = plan(DynamicImage::ImageRgb8(image).into());

    let weight = plan.weight_at(0, 0).unwrap();
    assert!((weight - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_sixteen_bit_gray_is_converted() {
    let image = DynamicImage::new_luma16(2, 2);
    let plan = plan(image.into());

    assert_eq!(plan.mode(), ColorMode::Rgba);
    assert_eq!(plan.weight_at(0, 0), Some(1.0));
}

#[test]
fn test_palette_image_plans() {
    let image = RasterImage::palette(2, 2, vec![1, 1, 0, 1], vec![[255, 255, 255], [0, 0, 0]])
        .unwrap();
    let plan = plan(image);

    assert_eq!(plan.mode(), ColorMode::Palette);
    assert_eq!(plan.scan_lines(), 2);
    assert_eq!(plan.weight_at(0, 1), Some(0.0));
}
