//! # 导出模块
//!
//! ## 设计思路
//!
//! 导出的是派生图本身（未缩放），格式由目标扩展名决定：
//! - `png`：保留 alpha
//! - `jpg` / `jpeg`：JPEG 没有 alpha，先按配置底色（默认白色）合成，再编码
//!
//! 其它扩展名或缺失扩展名一律拒绝，不做猜测。
//!
//! 先在内存中完成编码，成功后才写入目标路径；编码失败时已有文件保持原样。

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, ImageFormat, Rgb, RgbImage, Rgba};

use super::source::{to_rgba8, WorkingImage};
use super::{EditorConfig, EditorError};

/// 导出格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    /// 根据路径扩展名（不区分大小写）选择格式。
    pub fn from_path(path: &Path) -> Result<Self, EditorError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| {
                EditorError::InvalidFormat(format!("保存路径缺少扩展名：{}", path.display()))
            })?;

        match extension.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            other => Err(EditorError::InvalidFormat(format!(
                "不支持的保存格式：{}（可选：png / jpg / jpeg）",
                other
            ))),
        }
    }
}

/// 将派生图写入目标路径。
pub fn save_image(
    image: &WorkingImage,
    path: &Path,
    config: &EditorConfig,
) -> Result<ExportFormat, EditorError> {
    let format = ExportFormat::from_path(path)?;
    let bytes = encode_image(image, format, config)?;

    std::fs::write(path, &bytes)
        .map_err(|e| EditorError::FileSystem(format!("写入文件失败：{}", e)))?;

    log::info!(
        "💾 图片已保存 - 路径: {} 格式: {:?} 尺寸: {}x{}",
        path.display(),
        format,
        image.width(),
        image.height()
    );

    Ok(format)
}

/// 按导出格式编码为内存字节。
fn encode_image(
    image: &WorkingImage,
    format: ExportFormat,
    config: &EditorConfig,
) -> Result<Vec<u8>, EditorError> {
    let mut cursor = Cursor::new(Vec::new());

    match format {
        ExportFormat::Png => {
            to_rgba8(image)
                .write_to(&mut cursor, ImageFormat::Png)
                .map_err(map_image_error)?;
        }
        ExportFormat::Jpeg => {
            let flattened = flatten_alpha(image, config.jpeg_background);
            JpegEncoder::new_with_quality(&mut cursor, config.jpeg_quality)
                .encode_image(&flattened)
                .map_err(map_image_error)?;
        }
    }

    Ok(cursor.into_inner())
}

/// 将 RGBA 合成到纯色底上，得到不透明 RGB。
pub fn flatten_alpha(image: &WorkingImage, background: [u8; 3]) -> RgbImage {
    let background = background.map(|c| c as f32 / 255.0);

    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let Rgba([r, g, b, a]) = *image.get_pixel(x, y);
        let a = a.clamp(0.0, 1.0);
        let blend = |c: f32, bg: f32| {
            let mixed = c.clamp(0.0, 1.0) * a + bg * (1.0 - a);
            (mixed * 255.0).round() as u8
        };
        Rgb([
            blend(r, background[0]),
            blend(g, background[1]),
            blend(b, background[2]),
        ])
    })
}

fn map_image_error(error: image::ImageError) -> EditorError {
    match error {
        image::ImageError::IoError(e) => EditorError::Encode(format!("写入编码缓冲失败：{}", e)),
        other => EditorError::Encode(format!("图片编码失败：{}", other)),
    }
}
