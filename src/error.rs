//! 统一错误类型模块
//!
//! # 设计思路
//!
//! `EditorError` 描述“出了什么错”，`AppError` 再按触发的用户操作归类：
//! 加载失败、保存失败、参数调整失败、配置无效。界面只需按分支决定提示文案，
//! 失败后编辑状态保持不变。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 实现 `Serialize` 将错误序列化为字符串，满足界面桥接层要求。
//! - `CommandError` 提供结构化的 `code / stage / message` 三元组。

use serde::Serialize;

use crate::editor::EditorError;

/// 应用级统一错误类型。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 打开图片失败（不可读、损坏、格式不支持、超限）
    #[error("打开图片失败: {0}")]
    Load(#[source] EditorError),

    /// 保存图片失败（路径无效、权限、编码）
    #[error("保存图片失败: {0}")]
    Save(#[source] EditorError),

    /// 参数不合法
    #[error("调整参数无效: {0}")]
    Adjust(#[source] EditorError),

    /// 配置不合法
    #[error("配置无效: {0}")]
    Config(#[source] EditorError),
}

impl AppError {
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Load(_) => "load",
            Self::Save(_) => "save",
            Self::Adjust(_) => "adjust",
            Self::Config(_) => "config",
        }
    }

    pub fn editor_error(&self) -> &EditorError {
        match self {
            Self::Load(e) | Self::Save(e) | Self::Adjust(e) | Self::Config(e) => e,
        }
    }
}

/// 界面桥接要求返回值实现 `Serialize`。
/// 将错误序列化为人类可读的字符串。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// 结构化错误，供界面按错误码分支处理。
#[derive(Debug, Clone, Serialize)]
pub struct CommandError {
    pub code: &'static str,
    pub stage: &'static str,
    pub message: String,
}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        Self {
            code: error.editor_error().code(),
            stage: error.stage(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_serializes_as_message() {
        let error = AppError::Load(EditorError::Decode("bad header".to_string()));

        let json = serde_json::to_value(&error).expect("serialize error");

        assert_eq!(json, serde_json::json!("打开图片失败: 解码错误：bad header"));
    }

    #[test]
    fn command_error_uses_call_site_stage() {
        let error = AppError::Save(EditorError::FileSystem("denied".to_string()));

        let command: CommandError = error.into();

        assert_eq!(command.code, "file_system");
        assert_eq!(command.stage, "save");
        assert!(command.message.contains("denied"));
    }
}
