//! # 色相重映射
//!
//! 把每个非全透明像素的色相替换为目标色相，保留饱和度、明度与 alpha。
//! 全透明像素输出为 `(0, 0, 0, 0)`，其 RGB 不可见。

use image::Rgba;

use super::color::{hsv_to_rgb, rgb_to_hsv, Hue};
use super::source::WorkingImage;

/// 返回色相被替换后的新图像，输入保持不变。
pub fn remap_hue(image: &WorkingImage, target: Hue) -> WorkingImage {
    let mut out = WorkingImage::new(image.width(), image.height());

    for (src, dst) in image.pixels().zip(out.pixels_mut()) {
        let Rgba([r, g, b, a]) = *src;
        if a > 0.0 {
            let (_, s, v) = rgb_to_hsv(r, g, b);
            let (r, g, b) = hsv_to_rgb(target.value(), s, v);
            *dst = Rgba([r, g, b, a]);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red_becomes_blue_and_keeps_alpha() {
        let image = WorkingImage::from_pixel(1, 1, Rgba([1.0, 0.0, 0.0, 0.5]));
        let blue = Hue::new(2.0 / 3.0).expect("valid hue");

        let Rgba([r, g, b, a]) = *remap_hue(&image, blue).get_pixel(0, 0);

        assert!(r.abs() < 1e-5 && g.abs() < 1e-5);
        assert!((b - 1.0).abs() < 1e-5);
        assert_eq!(a, 0.5);
    }

    #[test]
    fn transparent_pixels_are_zeroed() {
        let image = WorkingImage::from_pixel(2, 1, Rgba([0.3, 0.6, 0.9, 0.0]));
        let out = remap_hue(&image, Hue::new(0.1).expect("valid hue"));

        assert!(out.pixels().all(|p| p.0 == [0.0; 4]));
    }

    #[test]
    fn gray_pixels_stay_gray() {
        let image = WorkingImage::from_pixel(1, 1, Rgba([0.4, 0.4, 0.4, 1.0]));
        let out = remap_hue(&image, Hue::new(0.5).expect("valid hue"));

        assert_eq!(out.get_pixel(0, 0).0, [0.4, 0.4, 0.4, 1.0]);
    }

    #[test]
    fn input_is_untouched() {
        let image = WorkingImage::from_pixel(3, 3, Rgba([0.2, 0.8, 0.1, 1.0]));
        let before = image.clone();
        let _ = remap_hue(&image, Hue::new(0.9).expect("valid hue"));

        assert_eq!(image, before);
    }
}
