//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `EditorConfig`，保证运行时行为可观测、可调整、可测试。
//! 预览档位（quality / balanced / speed）作为高层语义，映射到底层缩小滤镜。
//!
//! ## 实现思路
//!
//! - `Default` 提供与原版界面一致的配置（380×380 预览框、白色 JPEG 底色）。
//! - `PreviewProfile` 负责档位字符串解析与反向输出。
//! - `validate` 在上下文构造时执行一次，拒绝明显不合理的组合。

use image::imageops::FilterType;

use super::EditorError;

/// 滑块下限（原版界面的亮度/对比度滑块范围）。
pub const SLIDER_MIN: f32 = 0.0;
/// 滑块上限。
pub const SLIDER_MAX: f32 = 2.0;
/// 滑块步长。
pub const SLIDER_STEP: f32 = 0.1;

/// 编辑器配置。
///
/// 字段覆盖了加载限制、预览缩放与导出编码三个阶段。
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// 读取原始字节时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA `f32` 工作格式估算，字节）。
    pub max_decoded_bytes: u64,
    /// 预览框宽度。
    pub preview_width: u32,
    /// 预览框高度。
    pub preview_height: u32,
    /// 预览缩小滤镜。放大固定使用最近邻，不受此项影响。
    pub preview_filter: FilterType,
    /// JPEG 导出质量（1~100）。
    pub jpeg_quality: u8,
    /// JPEG 导出时透明区域合成的底色。
    pub jpeg_background: [u8; 3],
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 640 * 1024 * 1024,
            preview_width: 380,
            preview_height: 380,
            preview_filter: FilterType::Lanczos3,
            jpeg_quality: 75,
            jpeg_background: [255, 255, 255],
        }
    }
}

/// 预览档位。
///
/// - `Quality`：Lanczos3，边缘最锐利
/// - `Balanced`：CatmullRom
/// - `Speed`：Triangle（双线性）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewProfile {
    Quality,
    Balanced,
    Speed,
}

impl PreviewProfile {
    /// 从外部字符串解析档位。
    ///
    /// # 示例
    /// ```rust
    /// use pixel_tint::editor::PreviewProfile;
    ///
    /// let p = PreviewProfile::from_str("Balanced")?;
    /// assert_eq!(p.as_str(), "balanced");
    /// # Ok::<(), pixel_tint::editor::EditorError>(())
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(profile: &str) -> Result<Self, EditorError> {
        match profile.trim().to_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            "speed" => Ok(Self::Speed),
            other => Err(EditorError::InvalidParameter(format!(
                "未知预览档位：{}（可选：quality / balanced / speed）",
                other
            ))),
        }
    }

    /// 将档位输出为稳定字符串，供界面展示。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }

    fn filter(self) -> FilterType {
        match self {
            Self::Quality => FilterType::Lanczos3,
            Self::Balanced => FilterType::CatmullRom,
            Self::Speed => FilterType::Triangle,
        }
    }
}

impl EditorConfig {
    /// 应用指定预览档位。
    pub fn apply_preview_profile(&mut self, profile: PreviewProfile) {
        self.preview_filter = profile.filter();
    }

    /// 基于当前滤镜反推档位。
    pub fn preview_profile(&self) -> PreviewProfile {
        match self.preview_filter {
            FilterType::Lanczos3 => PreviewProfile::Quality,
            FilterType::CatmullRom | FilterType::Gaussian => PreviewProfile::Balanced,
            FilterType::Triangle | FilterType::Nearest => PreviewProfile::Speed,
        }
    }

    /// 校验配置。
    pub fn validate(&self) -> Result<(), EditorError> {
        if self.preview_width == 0 || self.preview_height == 0 {
            return Err(EditorError::InvalidParameter(format!(
                "预览框尺寸不能为 0：{}x{}",
                self.preview_width, self.preview_height
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(EditorError::InvalidParameter(format!(
                "jpeg_quality 必须在 1~100 之间：{}",
                self.jpeg_quality
            )));
        }
        if self.max_file_size == 0 || self.max_decoded_pixels == 0 || self.max_decoded_bytes == 0 {
            return Err(EditorError::InvalidParameter("加载限制不能为 0".to_string()));
        }
        Ok(())
    }
}
