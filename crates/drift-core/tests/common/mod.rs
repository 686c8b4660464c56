use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GrayImage, Luma};
use ndarray::Array2;

use drift_core::frame::LuminanceFrame;

/// Deterministic pseudo-random samples in 0..=255 (LCG), free of the
/// symmetries that would make the autocorrelation peak ambiguous.
pub fn noise_matrix(height: usize, width: usize, seed: u64) -> Array2<f64> {
    let mut state = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    Array2::from_shape_fn((height, width), |_| {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((state >> 33) % 256) as f64
    })
}

/// Cyclic roll: `out[r, c] = data[(r - dy) mod h, (c - dx) mod w]`, i.e. the
/// content moves right by `dx` and down by `dy`.
pub fn roll(data: &Array2<f64>, dx: i64, dy: i64) -> Array2<f64> {
    let (h, w) = data.dim();
    Array2::from_shape_fn((h, w), |(r, c)| {
        let sr = (r as i64 - dy).rem_euclid(h as i64) as usize;
        let sc = (c as i64 - dx).rem_euclid(w as i64) as usize;
        data[[sr, sc]]
    })
}

pub fn frame(data: Array2<f64>) -> LuminanceFrame {
    LuminanceFrame::new(data)
}

/// Dark background with two bright blocks of different size, so the
/// pattern has a single strong correlation peak.
pub fn block_pattern(height: usize, width: usize) -> Array2<f64> {
    let mut data = Array2::<f64>::from_elem((height, width), 20.0);
    for r in 6..14 {
        for c in 6..14 {
            data[[r, c]] = 230.0;
        }
    }
    for r in 20..24 {
        for c in 18..26 {
            data[[r, c]] = 160.0;
        }
    }
    data
}

pub fn to_gray_image(data: &Array2<f64>) -> GrayImage {
    let (h, w) = data.dim();
    GrayImage::from_fn(w as u32, h as u32, |x, y| {
        Luma([data[[y as usize, x as usize]].clamp(0.0, 255.0) as u8])
    })
}

/// Write `data` as a maximum-quality grayscale JPEG.
pub fn write_gray_jpeg(path: &Path, data: &Array2<f64>) {
    let writer = BufWriter::new(File::create(path).expect("create jpeg"));
    let encoder = JpegEncoder::new_with_quality(writer, 100);
    DynamicImage::ImageLuma8(to_gray_image(data))
        .write_with_encoder(encoder)
        .expect("encode jpeg");
}

/// Write `count` references (`std_00.jpg`, `std_01.jpg`, ...) of `data`.
pub fn write_references(dir: &Path, count: usize, data: &Array2<f64>) {
    for i in 0..count {
        write_gray_jpeg(&dir.join(format!("std_{i:02}.jpg")), data);
    }
}

/// Candidate file name for a day and hour, e.g. `cam_20240301_070000.jpg`.
pub fn candidate_name(day: u32, hour: u8) -> String {
    format!("cam_202403{day:02}_{hour:02}0000.jpg")
}
