// Property tests for the per-pixel transforms
use image::Rgba;
use pixel_tint::editor::color::{hsv_to_rgb, rgb_to_hsv};
use pixel_tint::editor::hue::remap_hue;
use pixel_tint::editor::tone::{adjust_brightness, adjust_contrast};
use pixel_tint::editor::{Hue, WorkingImage};
use proptest::prelude::*;

const EPS: f32 = 1e-4;

fn unit() -> impl Strategy<Value = f32> {
    0.0f32..=1.0
}

fn pixel() -> impl Strategy<Value = [f32; 4]> {
    (unit(), unit(), unit(), unit()).prop_map(|(r, g, b, a)| [r, g, b, a])
}

fn small_image() -> impl Strategy<Value = WorkingImage> {
    (1u32..6, 1u32..6).prop_flat_map(|(w, h)| {
        proptest::collection::vec(pixel(), (w * h) as usize).prop_map(move |pixels| {
            WorkingImage::from_fn(w, h, |x, y| Rgba(pixels[(y * w + x) as usize]))
        })
    })
}

proptest! {
    #[test]
    fn rgb_hsv_round_trip(r in unit(), g in unit(), b in unit()) {
        let (h, s, v) = rgb_to_hsv(r, g, b);
        let (r2, g2, b2) = hsv_to_rgb(h, s, v);

        prop_assert!((0.0..1.0).contains(&h));
        prop_assert!((r - r2).abs() < EPS && (g - g2).abs() < EPS && (b - b2).abs() < EPS,
            "({}, {}, {}) -> ({}, {}, {}) -> ({}, {}, {})", r, g, b, h, s, v, r2, g2, b2);
    }

    #[test]
    fn remap_preserves_saturation_value_alpha(image in small_image(), target in 0.0f32..1.0) {
        let hue = Hue::new(target).expect("strategy yields [0, 1)");
        let out = remap_hue(&image, hue);

        prop_assert_eq!(out.dimensions(), image.dimensions());
        for (src, dst) in image.pixels().zip(out.pixels()) {
            let [r, g, b, a] = src.0;
            let [r2, g2, b2, a2] = dst.0;
            if a == 0.0 {
                prop_assert_eq!(dst.0, [0.0; 4]);
                continue;
            }

            let (_, s, v) = rgb_to_hsv(r, g, b);
            let (h2, s2, v2) = rgb_to_hsv(r2, g2, b2);
            prop_assert_eq!(a2, a);
            prop_assert!((s - s2).abs() < EPS, "saturation {} -> {}", s, s2);
            prop_assert!((v - v2).abs() < EPS, "value {} -> {}", v, v2);

            // 色相只对有色像素有意义
            if s > 1e-2 && v > 1e-2 {
                let diff = (h2 - target).abs();
                prop_assert!(diff.min(1.0 - diff) < 1e-3, "hue {} vs target {}", h2, target);
            }
        }
    }

    #[test]
    fn unit_tone_factors_are_identity(image in small_image()) {
        prop_assert_eq!(adjust_brightness(&image, 1.0), image.clone());
        prop_assert_eq!(adjust_contrast(&image, 1.0), image);
    }

    #[test]
    fn zero_tone_factors_flatten_rgb(image in small_image()) {
        let black = adjust_brightness(&image, 0.0);
        let gray = adjust_contrast(&image, 0.0);

        for ((src, b), g) in image.pixels().zip(black.pixels()).zip(gray.pixels()) {
            prop_assert_eq!(b.0, [0.0, 0.0, 0.0, src.0[3]]);
            prop_assert_eq!(g.0, [0.5, 0.5, 0.5, src.0[3]]);
        }
    }

    #[test]
    fn tone_output_stays_in_range(image in small_image(), factor in 0.0f32..4.0) {
        for out in [adjust_brightness(&image, factor), adjust_contrast(&image, factor)] {
            prop_assert!(out.pixels().all(|p| p.0.iter().all(|c| (0.0..=1.0).contains(c))));
        }
    }
}
