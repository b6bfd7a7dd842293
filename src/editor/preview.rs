//! # 预览缩放模块
//!
//! ## 设计思路
//!
//! 预览只用于显示，从不保存。两种策略：
//! - 任一边小于预览框：按整数倍最近邻放大，保留像素画的硬边缘。
//!   倍数取 `max(框宽 / 宽, 框高 / 高)`（整数除法，至少为 1）。
//!   细长图放大后可能远超预览框，目标像素数超过 `max_pixels` 时拒绝。
//! - 否则：卷积滤镜直接缩放到预览框的精确尺寸。
//!
//! ## 实现思路
//!
//! 缩小优先走 `fast_image_resize`，失败时回退 `image::imageops::resize`。

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{ImageBuffer, Rgba, RgbaImage};

use super::source::{to_rgba8, PreviewBitmap, PreviewScale, WorkingImage};
use super::EditorError;

/// 将派生图缩放为预览位图。
///
/// `max_pixels` 限制放大后的预览像素数，通常取 `EditorConfig::max_decoded_pixels`。
pub fn scale_for_preview(
    image: &WorkingImage,
    box_width: u32,
    box_height: u32,
    filter: FilterType,
    max_pixels: u64,
) -> Result<PreviewBitmap, EditorError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(EditorError::Preview(format!("图像尺寸为 0：{}x{}", width, height)));
    }
    if box_width == 0 || box_height == 0 {
        return Err(EditorError::Preview(format!(
            "预览框尺寸为 0：{}x{}",
            box_width, box_height
        )));
    }

    let rgba = to_rgba8(image);

    if width < box_width || height < box_height {
        let factor = (box_width / width).max(box_height / height).max(1);
        let upscaled = upscale_nearest(&rgba, factor, max_pixels)?;
        return Ok(PreviewBitmap::from_rgba8(upscaled, PreviewScale::Upscale(factor)));
    }

    let resized = match resize_with_fast_image_resize(&rgba, box_width, box_height, filter) {
        Ok(resized) => resized,
        Err(err) => {
            log::warn!("⚠️ fast_image_resize 缩放失败，回退 image::imageops::resize：{}", err);
            image::imageops::resize(&rgba, box_width, box_height, filter)
        }
    };

    Ok(PreviewBitmap::from_rgba8(resized, PreviewScale::Downscale))
}

/// 整数倍最近邻放大：每个源像素复制为 `factor × factor` 的方块。
fn upscale_nearest(image: &RgbaImage, factor: u32, max_pixels: u64) -> Result<RgbaImage, EditorError> {
    let (width, height) = image.dimensions();
    let target_width = width
        .checked_mul(factor)
        .ok_or_else(|| EditorError::ResourceLimit("预览放大宽度溢出".to_string()))?;
    let target_height = height
        .checked_mul(factor)
        .ok_or_else(|| EditorError::ResourceLimit("预览放大高度溢出".to_string()))?;

    let pixels = target_width as u64 * target_height as u64;
    if pixels > max_pixels {
        return Err(EditorError::ResourceLimit(format!(
            "预览放大后像素过多：{}x{}（限制：{} 像素）",
            target_width, target_height, max_pixels
        )));
    }

    Ok(ImageBuffer::from_fn(target_width, target_height, |x, y| {
        *image.get_pixel(x / factor, y / factor)
    }))
}

fn resize_with_fast_image_resize(
    image: &RgbaImage,
    target_width: u32,
    target_height: u32,
    filter: FilterType,
) -> Result<RgbaImage, EditorError> {
    let (src_width, src_height) = image.dimensions();

    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        image.as_raw().clone(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| EditorError::Preview(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(to_fast_filter(filter)));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| EditorError::Preview(format!("fast_image_resize 执行失败：{}", e)))?;

    ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| EditorError::Preview("fast_image_resize 输出缓冲长度异常".to_string()))
}

fn to_fast_filter(filter: FilterType) -> fr::FilterType {
    match filter {
        FilterType::Nearest => fr::FilterType::Box,
        FilterType::Triangle => fr::FilterType::Bilinear,
        FilterType::CatmullRom => fr::FilterType::CatmullRom,
        FilterType::Gaussian => fr::FilterType::Mitchell,
        FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    }
}
