#[allow(dead_code)]
mod common;

use std::fs;

use image::{DynamicImage, Rgb, RgbImage};
use ndarray::Array2;
use num_complex::Complex;

use drift_core::align::{render_surface, CorrelationSurface};
use drift_core::error::DriftError;
use drift_core::io::discover::{candidate_suffix, list_candidates};
use drift_core::io::image_io::{load_image, load_luminance, luminance, save_jpeg};
use drift_core::io::ReferenceSet;

use common::{block_pattern, write_gray_jpeg, write_references};

#[test]
fn test_luminance_uses_bt601_weights() {
    let mut img = RgbImage::new(4, 1);
    img.put_pixel(0, 0, Rgb([255, 255, 255]));
    img.put_pixel(1, 0, Rgb([255, 0, 0]));
    img.put_pixel(2, 0, Rgb([0, 255, 0]));
    img.put_pixel(3, 0, Rgb([0, 0, 255]));

    let frame = luminance(&DynamicImage::ImageRgb8(img));
    assert_eq!(frame.height(), 1);
    assert_eq!(frame.width(), 4);
    assert_eq!(frame.data.row(0).to_vec(), vec![255.0, 76.0, 150.0, 29.0]);
}

#[test]
fn test_gray_jpeg_loads_as_luminance() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gray.jpg");
    let data = block_pattern(32, 32);
    write_gray_jpeg(&path, &data);

    let frame = load_luminance(&path).unwrap();
    assert_eq!(frame.data.dim(), (32, 32));
    assert!((frame.data[[10, 10]] - 230.0).abs() < 4.0);
    assert!((frame.data[[0, 0]] - 20.0).abs() < 4.0);
}

#[test]
fn test_save_jpeg_roundtrip_keeps_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.jpg");
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(9, 6, Rgb([40, 120, 200])));

    save_jpeg(&img, &path, 90).unwrap();
    let loaded = load_image(&path).unwrap();
    assert_eq!((loaded.width(), loaded.height()), (9, 6));
}

#[test]
fn test_save_jpeg_rejects_bad_quality() {
    let dir = tempfile::tempdir().unwrap();
    let img = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
    let result = save_jpeg(&img, &dir.path().join("bad.jpg"), 0);
    assert!(matches!(result, Err(DriftError::Config(_))));
}

#[test]
fn test_list_candidates_filters_and_sorts() {
    let dir = tempfile::tempdir().unwrap();
    for name in [
        "cam_b_070000.jpg",
        "cam_a_070000.jpg",
        "cam_c_170000.jpg",
        ".cam_hidden_070000.jpg",
        "cam_d_070000.png",
        "cam_e_070001.jpg",
    ] {
        fs::write(dir.path().join(name), b"").unwrap();
    }
    fs::create_dir(dir.path().join("folder_070000.jpg")).unwrap();

    let found = list_candidates(dir.path(), 7).unwrap();
    let names: Vec<_> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["cam_a_070000.jpg", "cam_b_070000.jpg"]);
    assert_eq!(found[0], dir.path().join("cam_a_070000.jpg"));

    let late = list_candidates(dir.path(), 17).unwrap();
    assert_eq!(late.len(), 1);
    assert_eq!(candidate_suffix(3), "030000.jpg");
}

#[cfg(unix)]
#[test]
fn test_list_candidates_skips_non_utf8_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cam_a_070000.jpg"), b"").unwrap();
    let invalid = OsStr::from_bytes(b"cam_\xff_070000.jpg");
    fs::write(dir.path().join(invalid), b"").unwrap();

    let found = list_candidates(dir.path(), 7).unwrap();
    assert_eq!(found, vec![dir.path().join("cam_a_070000.jpg")]);
}

#[test]
fn test_reference_set_indexes_by_sorted_position() {
    let dir = tempfile::tempdir().unwrap();
    write_references(dir.path(), 3, &block_pattern(32, 32));
    fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

    let set = ReferenceSet::load(dir.path()).unwrap();
    assert_eq!(set.len(), 3);
    assert_eq!(set.get(2).unwrap().size(), (32, 32));
    assert_eq!(set.source(0), Some(dir.path().join("std_00.jpg").as_path()));

    match set.get(3) {
        Err(DriftError::MissingReference { hour, available }) => {
            assert_eq!(hour, 3);
            assert_eq!(available, 3);
        }
        other => panic!("expected MissingReference, got {other:?}"),
    }
}

#[test]
fn test_reference_set_ignores_files_past_last_hour() {
    let dir = tempfile::tempdir().unwrap();
    write_references(dir.path(), 25, &Array2::from_elem((2, 2), 128.0));

    let set = ReferenceSet::load(dir.path()).unwrap();
    assert_eq!(set.len(), 23);
    assert_eq!(set.source(22), Some(dir.path().join("std_22.jpg").as_path()));
}

#[test]
fn test_render_surface_linear_and_log() {
    let mut data = Array2::<Complex<f64>>::zeros((2, 3));
    data[[0, 1]] = Complex::new(100.0, 5.0);
    data[[1, 2]] = Complex::new(10.0, 0.0);
    data[[1, 0]] = Complex::new(1.0, 0.0);
    let surface = CorrelationSurface::new(data);

    let linear = render_surface(&surface, false);
    assert_eq!(linear.dimensions(), (3, 2));
    assert_eq!(linear.get_pixel(1, 0).0[0], 255);
    assert_eq!(linear.get_pixel(2, 1).0[0], 25);
    assert_eq!(linear.get_pixel(0, 0).0[0], 0);

    let log = render_surface(&surface, true);
    assert_eq!(log.get_pixel(1, 0).0[0], 255);
    assert_eq!(log.get_pixel(2, 1).0[0], 127);
    assert_eq!(log.get_pixel(0, 1).0[0], 0);
}

#[test]
fn test_render_surface_without_positive_peak_is_black() {
    let surface = CorrelationSurface::new(Array2::from_elem((2, 2), Complex::new(-3.0, 0.0)));
    let img = render_surface(&surface, false);
    assert!(img.pixels().all(|p| p.0[0] == 0));
}
