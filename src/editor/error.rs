//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载编辑链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! “尚未加载图片”不是错误：相关操作返回 `Ok(None)`，界面不应对此弹窗。

/// 编辑器统一错误类型。
///
/// 该类型会在上下文层被上转为 `AppError`，最终透传给界面。
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("参数错误：{0}")]
    InvalidParameter(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("预览错误：{0}")]
    Preview(String),
}

impl EditorError {
    /// 稳定的机器可读错误码。
    pub fn code(&self) -> &'static str {
        match self {
            Self::FileSystem(_) => "file_system",
            Self::InvalidFormat(_) => "invalid_format",
            Self::Decode(_) => "decode",
            Self::ResourceLimit(_) => "resource_limit",
            Self::InvalidParameter(_) => "invalid_parameter",
            Self::Encode(_) => "encode",
            Self::Preview(_) => "preview",
        }
    }

    /// 是否属于加载失败（不可读、损坏、格式不支持、超限）。
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::FileSystem(_) | Self::InvalidFormat(_) | Self::Decode(_) | Self::ResourceLimit(_)
        )
    }
}
