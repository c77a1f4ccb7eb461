//! Contract tests shared by every scaler
//!
//! These run through the public API the way a driver would: build a
//! registry, ask it for scalers, and check the results.

use image::Rgb;
use scalecmp::channels::ChannelImage;
use scalecmp::color::{BLACK, WHITE};
use scalecmp::raster::Image;
use scalecmp::registry::ScalerRegistry;
use scalecmp::scalers::{
    scale_linear, DdtScaler, Doubler, EdgeMap, EepScaler, ScaleError, ScalerKind, SelfSimScaler,
};
use sha2::{Digest, Sha256};

// ============================================================================
// Test Utilities
// ============================================================================

/// Calculate SHA256 hash of image pixels for deterministic verification.
fn hash_image(image: &Image) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image.to_rgb_image().as_raw());
    format!("{:x}", hasher.finalize())
}

/// Image with smooth gradients, a hard diagonal and some noise-like texture.
fn create_test_image(w: u32, h: u32) -> Image {
    let mut img = Image::new(w, h);
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let r = ((x * 255) / w.max(2) as i32) as u8;
            let g = if x > y { 200 } else { 40 };
            let b = ((x * 53 + y * 97) % 256) as u8;
            img.set_pixel(x, y, Rgb([r, g, b]));
        }
    }
    img
}

// ============================================================================
// Contract
// ============================================================================

#[test]
fn test_identity_for_every_scaler() {
    let registry = ScalerRegistry::new();
    for (w, h) in [(1, 1), (2, 2), (5, 3)] {
        let img = create_test_image(w, h);
        for &kind in registry.kinds() {
            let out = registry.new_scaler(kind).scale(&img, w, h).unwrap();
            assert_eq!(out, img, "{} identity at {}x{}", registry.name(kind), w, h);
        }
    }
}

#[test]
fn test_dimension_contract_for_every_scaler() {
    let registry = ScalerRegistry::new();
    let sources = [(2, 2), (3, 5), (7, 4), (9, 9)];
    let targets = [(1, 1), (5, 3), (9, 13), (2, 2), (17, 8), (32, 32)];

    for &(sw, sh) in &sources {
        let img = create_test_image(sw, sh);
        for &(tw, th) in &targets {
            for &kind in registry.kinds() {
                let out = registry
                    .new_scaler(kind)
                    .scale(&img, tw, th)
                    .unwrap_or_else(|e| panic!("{:?} {}x{} -> {}x{}: {}", kind, sw, sh, tw, th, e));
                assert_eq!(out.dimensions(), (tw, th), "{:?} {}x{} -> {}x{}", kind, sw, sh, tw, th);
            }
        }
    }
}

#[test]
fn test_zero_dimensions_are_bad_arguments() {
    let registry = ScalerRegistry::new();
    let img = create_test_image(4, 4);
    for &kind in registry.kinds() {
        let scaler = registry.new_scaler(kind);
        for (w, h) in [(0, 4), (4, 0), (0, 0)] {
            let err = scaler.scale(&img, w, h).unwrap_err();
            assert!(err.is_bad_argument());
            assert!(matches!(err, ScaleError::InvalidDimensions { .. }));
        }
        assert!(scaler.scale(&Image::new(0, 0), 2, 2).is_err());
    }
}

#[test]
fn test_minimum_source_sizes() {
    let registry = ScalerRegistry::new();
    let thin = create_test_image(1, 6);

    for kind in [ScalerKind::Ddt, ScalerKind::SelfSim] {
        let err = registry.new_scaler(kind).scale(&thin, 4, 12).unwrap_err();
        assert!(matches!(err, ScaleError::SourceTooSmall { .. }), "{:?}", kind);
    }
    for kind in [ScalerKind::Linear, ScalerKind::Eep, ScalerKind::Nearest, ScalerKind::Lanczos] {
        assert!(registry.new_scaler(kind).scale(&thin, 4, 12).is_ok(), "{:?}", kind);
    }
}

// ============================================================================
// Image model
// ============================================================================

#[test]
fn test_border_clamp() {
    let img = create_test_image(4, 3);
    assert_eq!(img.get_pixel(-5, -5), img.get_pixel(0, 0));
    assert_eq!(img.get_pixel(10, 1), img.get_pixel(3, 1));
    assert_eq!(img.get_pixel(2, -1), img.get_pixel(2, 0));
    assert_eq!(img.get_pixel(9, 9), img.get_pixel(3, 2));
}

#[test]
fn test_channel_round_trip() {
    let img = create_test_image(13, 7);
    assert_eq!(ChannelImage::from(&img).to_image(), img);
}

// ============================================================================
// Doubling
// ============================================================================

#[test]
fn test_eep_three_doublings_then_shrink() {
    let img = create_test_image(3, 3);
    let via_scaler = ScalerRegistry::new().new_scaler(ScalerKind::Eep).scale(&img, 20, 20).unwrap();

    let mut manual = img.clone();
    for _ in 0..3 {
        manual = EepScaler.double(&manual).unwrap();
    }
    assert_eq!(manual.dimensions(), (24, 24));
    assert_eq!(via_scaler, scale_linear(&manual, 20, 20).unwrap());
}

#[test]
fn test_selfsim_doubling_matches_template() {
    let img = create_test_image(6, 5);
    let via_scaler =
        ScalerRegistry::new().new_scaler(ScalerKind::SelfSim).scale(&img, 15, 9).unwrap();

    let once = SelfSimScaler.double(&img).unwrap();
    let twice = SelfSimScaler.double(&once).unwrap();
    assert_eq!(via_scaler, scale_linear(&twice, 15, 9).unwrap());
}

// ============================================================================
// DDT
// ============================================================================

#[test]
fn test_ddt_checkerboard_scenario() {
    let mut img = Image::new(2, 2);
    img.set_pixel(0, 0, BLACK);
    img.set_pixel(1, 0, WHITE);
    img.set_pixel(0, 1, WHITE);
    img.set_pixel(1, 1, BLACK);

    let edges = EdgeMap::classify(&img);
    assert!(edges.is_slash(0, 0));

    let out = ScalerRegistry::new().new_scaler(ScalerKind::Ddt).scale(&img, 8, 8).unwrap();
    assert_eq!(out.get_pixel(0, 0), BLACK);
    assert_eq!(out.get_pixel(7, 0), WHITE);
    assert_eq!(out.get_pixel(0, 7), WHITE);
    assert_eq!(out.get_pixel(7, 7), BLACK);
}

#[test]
fn test_ddt_smoothing_option_reaches_scaler() {
    let img = create_test_image(8, 8);
    let smoothed = ScalerRegistry::new().new_scaler(ScalerKind::Ddt).scale(&img, 16, 16).unwrap();
    let raw = ScalerRegistry::new()
        .with_ddt(DdtScaler::new(false))
        .new_scaler(ScalerKind::Ddt)
        .scale(&img, 16, 16)
        .unwrap();

    assert_eq!(smoothed, DdtScaler::new(true).scale(&img, 16, 16).unwrap());
    assert_eq!(raw, DdtScaler::new(false).scale(&img, 16, 16).unwrap());
}

// ============================================================================
// SelfSim
// ============================================================================

#[test]
fn test_selfsim_margin_is_plain_canvas() {
    let img = create_test_image(12, 9);
    let out = SelfSimScaler.double(&img).unwrap();
    let canvas = scale_linear(&img, 24, 18).unwrap();

    for y in 0..18 {
        for x in 0..24 {
            if x >= 21 || y >= 15 {
                assert_eq!(out.get_pixel(x, y), canvas.get_pixel(x, y), "({}, {})", x, y);
            }
        }
    }
}

#[test]
fn test_selfsim_adds_detail_inside() {
    let img = create_test_image(12, 9);
    let out = SelfSimScaler.double(&img).unwrap();
    let canvas = scale_linear(&img, 24, 18).unwrap();
    assert_ne!(out, canvas);
}

#[test]
fn test_bands_reconstruct_source() {
    let img = create_test_image(11, 6);
    let (low, high) = SelfSimScaler::split_bands(&img).unwrap();
    assert_eq!(ChannelImage::add(&low, &high).to_image(), img);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_outputs_are_deterministic() {
    let img = create_test_image(10, 10);
    let registry = ScalerRegistry::new();
    for &kind in registry.kinds() {
        let a = hash_image(&registry.new_scaler(kind).scale(&img, 23, 17).unwrap());
        let b = hash_image(&ScalerRegistry::new().new_scaler(kind).scale(&img, 23, 17).unwrap());
        assert_eq!(a, b, "{:?}", kind);
    }
}

#[test]
fn test_concurrent_calls_match_sequential() {
    let registry = ScalerRegistry::new();
    let images: Vec<Image> = (4..8).map(|s| create_test_image(s, s + 1)).collect();
    let sequential: Vec<String> = images
        .iter()
        .map(|img| hash_image(&registry.new_scaler(ScalerKind::SelfSim).scale(img, 20, 20).unwrap()))
        .collect();

    let scaler = registry.new_scaler(ScalerKind::SelfSim);
    let concurrent: Vec<String> = std::thread::scope(|s| {
        let handles: Vec<_> = images
            .iter()
            .map(|img| s.spawn(move || hash_image(&scaler.scale(img, 20, 20).unwrap())))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, concurrent);
}
