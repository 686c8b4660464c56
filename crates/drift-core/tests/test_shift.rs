use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

use drift_core::align::{cyclic_shift, shift_image};
use drift_core::frame::ShiftVector;

fn gradient_rgb(w: u32, h: u32) -> RgbImage {
    RgbImage::from_fn(w, h, |x, y| Rgb([(x * 20) as u8, (y * 30) as u8, (x + y) as u8]))
}

#[test]
fn test_zero_shift_is_identity() {
    let img = gradient_rgb(7, 5);
    assert_eq!(cyclic_shift(&img, ShiftVector::new(0, 0)), img);
}

#[test]
fn test_shift_moves_content_left_and_up() {
    let img = gradient_rgb(7, 5);
    let shifted = cyclic_shift(&img, ShiftVector::new(2, 1));
    // out(x, y) = in(x + 2, y + 1), wrapping at the edges
    assert_eq!(shifted.get_pixel(0, 0), img.get_pixel(2, 1));
    assert_eq!(shifted.get_pixel(5, 4), img.get_pixel(0, 0));
    assert_eq!(shifted.get_pixel(6, 3), img.get_pixel(1, 4));
}

#[test]
fn test_shifts_compose_modulo_size() {
    let img = gradient_rgb(7, 5);
    let a = ShiftVector::new(3, 4);
    let b = ShiftVector::new(6, -2);

    let twice = cyclic_shift(&cyclic_shift(&img, a), b);
    let once = cyclic_shift(&img, a.compose(b, 7, 5));
    assert_eq!(twice, once);
    assert_eq!(a.compose(b, 7, 5), ShiftVector::new(2, 2));
}

#[test]
fn test_full_period_shift_is_identity() {
    let img = gradient_rgb(7, 5);
    assert_eq!(cyclic_shift(&img, ShiftVector::new(7, -5)), img);
}

#[test]
fn test_shift_image_preserves_gray_and_rgb() {
    let gray = GrayImage::from_fn(4, 3, |x, y| Luma([(x * 10 + y) as u8]));
    let out = shift_image(&DynamicImage::ImageLuma8(gray.clone()), ShiftVector::new(1, 0));
    match out {
        DynamicImage::ImageLuma8(buf) => {
            assert_eq!(buf.get_pixel(0, 0), gray.get_pixel(1, 0));
            assert_eq!(buf.get_pixel(3, 2), gray.get_pixel(0, 2));
        }
        other => panic!("expected Luma8, got {:?}", other.color()),
    }

    let rgb = gradient_rgb(4, 3);
    let out = shift_image(&DynamicImage::ImageRgb8(rgb.clone()), ShiftVector::new(0, 1));
    assert_eq!(out.as_rgb8().unwrap(), &cyclic_shift(&rgb, ShiftVector::new(0, 1)));
}

#[test]
fn test_shift_image_converts_other_types_to_rgb() {
    let rgba = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 128]));
    let out = shift_image(&DynamicImage::ImageRgba8(rgba), ShiftVector::new(1, 1));
    let rgb = out.as_rgb8().expect("rgb output");
    assert_eq!(rgb.get_pixel(0, 0), &Rgb([10, 20, 30]));
}

#[test]
fn test_signed_representation() {
    let v = ShiftVector::new(15, 1);
    assert_eq!(v.signed(16, 12), ShiftVector::new(-1, 1));
    assert_eq!(ShiftVector::new(8, 6).signed(16, 12), ShiftVector::new(8, 6));
    assert_eq!(ShiftVector::new(9, 7).signed(16, 12), ShiftVector::new(-7, -5));
}
