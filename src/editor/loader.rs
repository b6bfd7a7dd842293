//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 在“尽可能早”的阶段执行输入校验，尽快失败，减少不必要的内存与 CPU 消耗。
//! 加载失败不会触碰流水线状态：这里只产出新图像，由调用方决定是否替换原图。
//!
//! ## 实现思路
//!
//! 1. 存在性 + metadata 体积限制 + 读取
//! 2. 文件签名必须是图片（`infer`），且格式只接受 PNG / JPEG
//! 3. 读取 header 尺寸，按像素与内存上限快速拒绝
//! 4. 完整解码，统一提升为 RGBA 工作格式（RGB 源补 alpha = 1.0）

use std::io::Cursor;
use std::path::Path;

use image::{GenericImageView, ImageFormat, ImageReader};

use super::source::{to_working, RawImageData, WorkingImage};
use super::{EditorConfig, EditorError};

/// 工作格式每像素字节数（四通道 `f32`）。
const WORKING_BYTES_PER_PIXEL: u64 = 16;

/// 从本地文件加载并解码为工作图像。
pub fn load_image(path: &Path, config: &EditorConfig) -> Result<WorkingImage, EditorError> {
    let raw = read_file(path, config)?;
    decode_to_working(raw, config)
}

fn read_file(path: &Path, config: &EditorConfig) -> Result<RawImageData, EditorError> {
    log::info!("📁 开始读取本地图片 - 路径: {}", path.display());

    if !path.exists() {
        return Err(EditorError::FileSystem(format!("文件不存在：{}", path.display())));
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| EditorError::FileSystem(format!("无法读取文件信息：{}", e)))?;

    if !metadata.is_file() {
        return Err(EditorError::FileSystem(format!("不是普通文件：{}", path.display())));
    }

    if metadata.len() > config.max_file_size {
        return Err(EditorError::ResourceLimit(format!(
            "文件过大：{:.2} MB（限制：{:.2} MB）",
            metadata.len() as f64 / 1024.0 / 1024.0,
            config.max_file_size as f64 / 1024.0 / 1024.0
        )));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| EditorError::FileSystem(format!("无法读取图片文件：{}", e)))?;
    validate_image_signature(&bytes)?;

    Ok(RawImageData {
        bytes,
        source_hint: path.display().to_string(),
    })
}

fn decode_to_working(raw: RawImageData, config: &EditorConfig) -> Result<WorkingImage, EditorError> {
    let format = image::guess_format(&raw.bytes)
        .map_err(|e| EditorError::InvalidFormat(format!("不支持的图片格式：{}", e)))?;
    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
        return Err(EditorError::InvalidFormat(format!(
            "仅支持 PNG / JPEG：{:?}",
            format
        )));
    }

    let (header_width, header_height) = inspect_dimensions_from_memory(&raw.bytes)?;
    validate_limits(config, header_width, header_height)?;

    let decoded = image::load_from_memory_with_format(&raw.bytes, format)
        .map_err(|e| EditorError::Decode(format!("图片解码失败：{}", e)))?;

    let (width, height) = decoded.dimensions();
    validate_limits(config, width, height)?;

    let working = to_working(&decoded.to_rgba8());

    log::info!(
        "✅ 图片解码成功 - 来源: {} 格式: {:?} 色彩: {:?} 尺寸: {}x{}",
        raw.source_hint,
        format,
        decoded.color(),
        width,
        height
    );

    Ok(working)
}

fn validate_image_signature(bytes: &[u8]) -> Result<(), EditorError> {
    if bytes.is_empty() {
        return Err(EditorError::InvalidFormat("图片内容为空".to_string()));
    }

    let kind = infer::get(bytes)
        .ok_or_else(|| EditorError::InvalidFormat("无法识别图片类型".to_string()))?;

    if kind.matcher_type() != infer::MatcherType::Image {
        return Err(EditorError::InvalidFormat(format!(
            "文件签名不是图片类型：{}",
            kind.mime_type()
        )));
    }

    Ok(())
}

/// 仅通过图片头信息读取宽高。
///
/// 签名已确认是 PNG / JPEG，头信息读不出来视为文件损坏（`Decode`，属于加载失败）。
fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), EditorError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| EditorError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

    reader
        .into_dimensions()
        .map_err(|e| EditorError::Decode(format!("无法读取图片尺寸：{}", e)))
}

/// 校验像素数量与工作格式内存是否超过配置上限。
fn validate_limits(config: &EditorConfig, width: u32, height: u32) -> Result<(), EditorError> {
    if width == 0 || height == 0 {
        return Err(EditorError::Decode(format!("图片尺寸为 0：{}x{}", width, height)));
    }

    let pixels = (width as u64)
        .checked_mul(height as u64)
        .ok_or_else(|| EditorError::ResourceLimit("图片像素数溢出".to_string()))?;

    if pixels > config.max_decoded_pixels {
        return Err(EditorError::ResourceLimit(format!(
            "图片像素过大：{} 像素（限制：{} 像素）",
            pixels, config.max_decoded_pixels
        )));
    }

    let estimated = pixels
        .checked_mul(WORKING_BYTES_PER_PIXEL)
        .ok_or_else(|| EditorError::ResourceLimit("图片解码内存估算溢出".to_string()))?;

    if estimated > config.max_decoded_bytes {
        return Err(EditorError::ResourceLimit(format!(
            "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
            estimated as f64 / 1024.0 / 1024.0,
            config.max_decoded_bytes as f64 / 1024.0 / 1024.0
        )));
    }

    Ok(())
}
