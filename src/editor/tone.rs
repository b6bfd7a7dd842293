//! # 亮度与对比度
//!
//! 两个操作都只作用于 RGB，alpha 原样保留，结果截断到 `[0, 1]`。
//! - 亮度：`out = in * factor`
//! - 对比度：`out = 0.5 + (in - 0.5) * factor`
//!
//! 对比度按 `in * factor + 0.5 * (1 - factor)` 展开计算，保证 `factor = 1.0` 时逐位恒等。

use image::Rgba;

use super::source::WorkingImage;

const MID_GRAY: f32 = 0.5;

/// 亮度调整。`factor = 1.0` 为恒等，`0.0` 得到纯黑。
pub fn adjust_brightness(image: &WorkingImage, factor: f32) -> WorkingImage {
    map_rgb(image, |c| c * factor)
}

/// 对比度调整。`factor = 1.0` 为恒等，`0.0` 得到中灰。
pub fn adjust_contrast(image: &WorkingImage, factor: f32) -> WorkingImage {
    let offset = MID_GRAY * (1.0 - factor);
    map_rgb(image, |c| c * factor + offset)
}

fn map_rgb<F>(image: &WorkingImage, f: F) -> WorkingImage
where
    F: Fn(f32) -> f32,
{
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let Rgba([r, g, b, a]) = *pixel;
        *pixel = Rgba([
            f(r).clamp(0.0, 1.0),
            f(g).clamp(0.0, 1.0),
            f(b).clamp(0.0, 1.0),
            a,
        ]);
    }
    out
}
