//! # 图片编辑模块（editor）
//!
//! ## 设计思路
//!
//! 该模块将“加载校验 → 色相重映射 → 亮度/对比度 → 预览缩放 → 导出”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `color`：RGB ↔ HSV 纯函数与 `Hue` 类型
//! - `hue` / `tone`：逐像素变换，全部返回新图像
//! - `params`：参数集合（显式的“从未触碰”状态）
//! - `pipeline`：从原图按固定顺序重算派生图
//! - `preview`：预览缩放（最近邻放大 / 卷积缩小）
//! - `loader` / `exporter`：文件读写与格式转换
//! - `config/error/source`：配置、错误、数据模型
//!
//! ## 调用链
//!
//! ```text
//! 界面（取色器 / 滑块 / 文件对话框）
//!    ↓
//! app::EditorContext（应用上下文）
//!    ├─ loader.rs（读取 + 校验 + 提升为 RGBA）
//!    ├─ pipeline.rs（hue → brightness → contrast，均从原图重算）
//!    ├─ preview.rs（缩放为预览位图，仅显示）
//!    └─ exporter.rs（PNG 保留 alpha / JPEG 先合成底色）
//!    ↓
//! 返回预览位图或 AppError 给界面
//! ```

pub mod color;
mod config;
mod error;
pub mod exporter;
pub mod hue;
pub mod loader;
mod params;
mod pipeline;
pub mod preview;
mod source;
pub mod tone;

pub use color::Hue;
pub use config::{EditorConfig, PreviewProfile, SLIDER_MAX, SLIDER_MIN, SLIDER_STEP};
pub use error::EditorError;
pub use exporter::ExportFormat;
pub use params::{Parameter, ParameterSet};
pub use pipeline::{apply_parameters, AdjustmentPipeline};
pub use source::{to_rgba8, to_working, PreviewBitmap, PreviewScale, WorkingImage};
