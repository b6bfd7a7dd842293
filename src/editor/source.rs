//! # 数据模型
//!
//! ## 设计思路
//!
//! 将“外部输入”和“流水线中间结果”解耦：
//! - `RawImageData` 表示已读取但未解码的字节
//! - `WorkingImage` 是内部统一工作格式（RGBA，`f32` 归一化通道）
//! - `PreviewBitmap` 是交给界面显示的 8 位 RGBA 数据，只用于显示，从不保存

use image::{ImageBuffer, Rgba, Rgba32FImage, RgbaImage};

/// 内部工作图像：RGBA、四通道、每通道 `[0, 1]`。
pub type WorkingImage = Rgba32FImage;

/// 加载阶段输出：原始字节与来源路径。
pub(crate) struct RawImageData {
    /// 原始图片字节。
    pub(crate) bytes: Vec<u8>,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: String,
}

/// 预览所用的缩放方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewScale {
    /// 最近邻整数倍放大。
    Upscale(u32),
    /// 卷积滤镜缩放到预览框尺寸。
    Downscale,
}

/// 预览位图：可直接交给界面显示的 RGBA 数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewBitmap {
    /// 图像宽度（像素）。
    pub width: u32,
    /// 图像高度（像素）。
    pub height: u32,
    /// RGBA 字节数组（`width * height * 4`）。
    pub rgba: Vec<u8>,
    /// 生成该位图所用的缩放方式。
    pub scale: PreviewScale,
}

impl PreviewBitmap {
    pub(crate) fn from_rgba8(image: RgbaImage, scale: PreviewScale) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            rgba: image.into_raw(),
            scale,
        }
    }

    /// 读取指定坐标的像素，越界返回 `None`。
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// 8 位 → 归一化浮点。
pub fn to_working(image: &RgbaImage) -> WorkingImage {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let Rgba(px) = *image.get_pixel(x, y);
        Rgba(px.map(|c| c as f32 / 255.0))
    })
}

/// 归一化浮点 → 8 位，四舍五入并截断到 `[0, 255]`。
pub fn to_rgba8(image: &WorkingImage) -> RgbaImage {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let Rgba(px) = *image.get_pixel(x, y);
        Rgba(px.map(quantize))
    })
}

fn quantize(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}
