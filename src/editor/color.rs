//! # 颜色空间转换模块
//!
//! ## 设计思路
//!
//! 所有通道均为 `[0, 1]` 归一化浮点，色相 `h` 在 1.0 处回绕（对应 360°）。
//! `rgb_to_hsv` 与 `hsv_to_rgb` 互为精确逆运算（浮点误差内）。
//!
//! 灰色或纯黑像素（`s == 0` 或 `v == 0`）的色相没有视觉意义，正向转换约定返回 `h = 0`，
//! 反向转换对任意 `h` 都得到同一灰度，因此色相覆盖对这类像素是安全的。

use super::EditorError;

/// RGB → HSV。
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let v = max;

    if max == min {
        return (0.0, 0.0, v);
    }

    let delta = max - min;
    let s = delta / max;

    let rc = (max - r) / delta;
    let gc = (max - g) / delta;
    let bc = (max - b) / delta;

    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    ((h / 6.0).rem_euclid(1.0), s, v)
}

/// HSV → RGB。
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    if s == 0.0 {
        return (v, v, v);
    }

    let scaled = h.rem_euclid(1.0) * 6.0;
    let sector = scaled.floor();
    let f = scaled - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as u8 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// 目标色相，取值范围 `[0, 1)`。
///
/// 构造时即完成校验，流水线内部无需再处理越界值。
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Hue(f32);

impl Hue {
    /// 从归一化色相构造。
    ///
    /// # 示例
    /// ```rust
    /// use pixel_tint::editor::Hue;
    ///
    /// let blue = Hue::new(240.0 / 360.0)?;
    /// assert!((blue.value() - 0.6666667).abs() < 1e-6);
    /// assert!(Hue::new(1.0).is_err());
    /// # Ok::<(), pixel_tint::editor::EditorError>(())
    /// ```
    pub fn new(value: f32) -> Result<Self, EditorError> {
        if !value.is_finite() || !(0.0..1.0).contains(&value) {
            return Err(EditorError::InvalidParameter(format!(
                "色相必须位于 [0, 1) 区间：{}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// 从角度构造，角度会先回绕到 `[0, 360)`。
    pub fn from_degrees(degrees: f32) -> Result<Self, EditorError> {
        if !degrees.is_finite() {
            return Err(EditorError::InvalidParameter(format!(
                "色相角度无效：{}",
                degrees
            )));
        }
        // 0.99999994 * 360 这类值回绕后可能恰好等于 1.0
        let normalized = degrees.rem_euclid(360.0) / 360.0;
        Self::new(if normalized >= 1.0 { 0.0 } else { normalized })
    }

    /// 取色器给出 8 位 RGB，提取其色相。
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        let [r, g, b] = rgb.map(|c| c as f32 / 255.0);
        let (h, _, _) = rgb_to_hsv(r, g, b);
        Self(if h >= 1.0 { 0.0 } else { h })
    }

    pub fn value(self) -> f32 {
        self.0
    }
}
