//! # 参数集合
//!
//! 每个参数都是 `Option`：`None` 表示界面从未触碰过该控件，对应阶段整段跳过；
//! 触碰过之后即使回到恒等值也照常应用（恒等值本就无副作用）。

use super::color::Hue;
use super::EditorError;

/// 单次参数变更，由界面一次只改一个字段。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parameter {
    Hue(Hue),
    Brightness(f32),
    Contrast(f32),
}

impl Parameter {
    /// 亮度/对比度系数必须是有限的非负数。
    pub(crate) fn validate(self) -> Result<Self, EditorError> {
        match self {
            Self::Hue(_) => Ok(self),
            Self::Brightness(factor) | Self::Contrast(factor) => {
                if factor.is_finite() && factor >= 0.0 {
                    Ok(self)
                } else {
                    Err(EditorError::InvalidParameter(format!(
                        "{} 系数必须为有限非负数：{}",
                        self.name(),
                        factor
                    )))
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Hue(_) => "hue",
            Self::Brightness(_) => "brightness",
            Self::Contrast(_) => "contrast",
        }
    }
}

/// 当前参数快照（无历史）。
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct ParameterSet {
    pub hue: Option<Hue>,
    pub brightness: Option<f32>,
    pub contrast: Option<f32>,
}

impl ParameterSet {
    pub(crate) fn apply(&mut self, parameter: Parameter) {
        match parameter {
            Parameter::Hue(hue) => self.hue = Some(hue),
            Parameter::Brightness(factor) => self.brightness = Some(factor),
            Parameter::Contrast(factor) => self.contrast = Some(factor),
        }
    }

    /// 是否所有参数都未被触碰。
    pub fn is_untouched(&self) -> bool {
        self.hue.is_none() && self.brightness.is_none() && self.contrast.is_none()
    }
}
