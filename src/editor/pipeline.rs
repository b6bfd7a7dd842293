//! # 调整流水线
//!
//! ## 设计思路
//!
//! 原图加载后只读；每次参数变化都从原图完整重算派生图，
//! 从不在上一次结果上叠加，避免舍入误差累积。
//!
//! 固定顺序（三者互不交换）：
//! 1. 色相重映射（`hue` 已设置时）
//! 2. 亮度（`brightness` 已设置时）
//! 3. 对比度（`contrast` 已设置时）
//!
//! ## 实现思路
//!
//! - 未加载图片时所有参数操作都是静默空操作，返回 `Ok(None)`。
//! - 参数校验失败时状态保持不变。
//! - 重算是原图与参数的纯函数，相同输入逐位相同。

use std::time::Instant;

use super::color::Hue;
use super::hue::remap_hue;
use super::params::{Parameter, ParameterSet};
use super::source::WorkingImage;
use super::tone::{adjust_brightness, adjust_contrast};
use super::EditorError;

struct Loaded {
    original: WorkingImage,
    derived: WorkingImage,
}

/// 非破坏式调整流水线。
#[derive(Default)]
pub struct AdjustmentPipeline {
    loaded: Option<Loaded>,
    params: ParameterSet,
}

impl AdjustmentPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// 替换原图，参数回到“从未触碰”，派生图等于原图。
    pub fn load(&mut self, original: WorkingImage) {
        log::info!(
            "🖼️ 流水线载入新原图 - 尺寸: {}x{}",
            original.width(),
            original.height()
        );
        self.params = ParameterSet::default();
        self.loaded = Some(Loaded {
            derived: original.clone(),
            original,
        });
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn original(&self) -> Option<&WorkingImage> {
        self.loaded.as_ref().map(|l| &l.original)
    }

    pub fn derived(&self) -> Option<&WorkingImage> {
        self.loaded.as_ref().map(|l| &l.derived)
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// 更新一个参数并从原图重算。
    ///
    /// # 示例
    /// ```rust
    /// use image::Rgba;
    /// use pixel_tint::editor::{AdjustmentPipeline, Parameter, WorkingImage};
    ///
    /// let mut pipeline = AdjustmentPipeline::new();
    /// assert!(pipeline.set_parameter(Parameter::Brightness(0.5))?.is_none());
    ///
    /// pipeline.load(WorkingImage::from_pixel(1, 1, Rgba([1.0, 1.0, 1.0, 1.0])));
    /// let derived = pipeline.set_parameter(Parameter::Brightness(0.5))?.expect("loaded");
    /// assert_eq!(derived.get_pixel(0, 0).0, [0.5, 0.5, 0.5, 1.0]);
    /// # Ok::<(), pixel_tint::editor::EditorError>(())
    /// ```
    pub fn set_parameter(
        &mut self,
        parameter: Parameter,
    ) -> Result<Option<&WorkingImage>, EditorError> {
        if self.loaded.is_none() {
            log::debug!("未加载图片，忽略参数变更：{}", parameter.name());
            return Ok(None);
        }

        let parameter = parameter.validate()?;
        self.params.apply(parameter);
        Ok(self.recompute())
    }

    pub fn set_hue(&mut self, hue: Hue) -> Result<Option<&WorkingImage>, EditorError> {
        self.set_parameter(Parameter::Hue(hue))
    }

    pub fn set_brightness(&mut self, factor: f32) -> Result<Option<&WorkingImage>, EditorError> {
        self.set_parameter(Parameter::Brightness(factor))
    }

    pub fn set_contrast(&mut self, factor: f32) -> Result<Option<&WorkingImage>, EditorError> {
        self.set_parameter(Parameter::Contrast(factor))
    }

    /// 参数回到“从未触碰”，派生图恢复为原图。
    pub fn reset_parameters(&mut self) -> Option<&WorkingImage> {
        self.loaded.as_ref()?;
        self.params = ParameterSet::default();
        self.recompute()
    }

    /// 整体换回一份参数快照并重算，用于上层撤销刚提交但后续失败的变更。
    pub fn restore_parameters(&mut self, params: ParameterSet) -> Option<&WorkingImage> {
        self.loaded.as_ref()?;
        self.params = params;
        self.recompute()
    }

    /// 按当前参数从原图完整重算派生图。
    pub fn recompute(&mut self) -> Option<&WorkingImage> {
        let loaded = self.loaded.as_mut()?;
        let start = Instant::now();

        loaded.derived = apply_parameters(&loaded.original, &self.params);

        log::info!(
            "🎨 派生图重算完成 - hue={:?} brightness={:?} contrast={:?} elapsed={}ms",
            self.params.hue.map(Hue::value),
            self.params.brightness,
            self.params.contrast,
            start.elapsed().as_millis()
        );

        Some(&loaded.derived)
    }
}

/// 纯函数：原图 + 参数 → 派生图。
pub fn apply_parameters(original: &WorkingImage, params: &ParameterSet) -> WorkingImage {
    if params.is_untouched() {
        return original.clone();
    }

    let mut image = match params.hue {
        Some(hue) => remap_hue(original, hue),
        None => original.clone(),
    };

    if let Some(factor) = params.brightness {
        image = adjust_brightness(&image, factor);
    }

    if let Some(factor) = params.contrast {
        image = adjust_contrast(&image, factor);
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn red_square() -> WorkingImage {
        WorkingImage::from_pixel(2, 2, Rgba([0.8, 0.2, 0.2, 1.0]))
    }

    #[test]
    fn untouched_pipeline_derives_original() {
        let mut pipeline = AdjustmentPipeline::new();
        pipeline.load(red_square());

        assert_eq!(pipeline.derived(), pipeline.original());
        assert!(pipeline.params().is_untouched());
    }

    #[test]
    fn parameters_without_image_are_noops() {
        let mut pipeline = AdjustmentPipeline::new();

        assert!(pipeline.set_brightness(0.3).expect("no-op").is_none());
        assert!(pipeline.set_contrast(-5.0).expect("no-op even when invalid").is_none());
        assert!(pipeline.reset_parameters().is_none());
        assert!(pipeline.params().is_untouched());
        assert!(!pipeline.is_loaded());
    }

    #[test]
    fn invalid_factor_leaves_state_unchanged() {
        let mut pipeline = AdjustmentPipeline::new();
        pipeline.load(red_square());
        pipeline.set_brightness(0.5).expect("valid");
        let before = pipeline.derived().cloned();

        assert!(matches!(
            pipeline.set_brightness(-1.0),
            Err(EditorError::InvalidParameter(_))
        ));
        assert_eq!(pipeline.params().brightness, Some(0.5));
        assert_eq!(pipeline.derived().cloned(), before);
    }

    #[test]
    fn brightness_does_not_compound() {
        let mut pipeline = AdjustmentPipeline::new();
        pipeline.load(red_square());

        pipeline.set_brightness(0.5).expect("valid");
        let once = pipeline.derived().cloned();
        pipeline.set_brightness(0.5).expect("valid");

        assert_eq!(pipeline.derived().cloned(), once);
        assert!((pipeline.derived().expect("loaded").get_pixel(0, 0).0[0] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn order_is_hue_then_brightness_then_contrast() {
        let mut pipeline = AdjustmentPipeline::new();
        pipeline.load(red_square());

        let hue = Hue::new(0.5).expect("valid hue");
        pipeline.set_contrast(1.5).expect("valid");
        pipeline.set_brightness(1.2).expect("valid");
        pipeline.set_hue(hue).expect("valid");

        let expected = adjust_contrast(&adjust_brightness(&remap_hue(&red_square(), hue), 1.2), 1.5);
        assert_eq!(pipeline.derived(), Some(&expected));
    }

    #[test]
    fn load_resets_parameters() {
        let mut pipeline = AdjustmentPipeline::new();
        pipeline.load(red_square());
        pipeline.set_contrast(0.0).expect("valid");

        let replacement = WorkingImage::from_pixel(1, 3, Rgba([0.1, 0.2, 0.3, 0.4]));
        pipeline.load(replacement.clone());

        assert!(pipeline.params().is_untouched());
        assert_eq!(pipeline.derived(), Some(&replacement));
    }

    #[test]
    fn reset_restores_original() {
        let mut pipeline = AdjustmentPipeline::new();
        pipeline.load(red_square());
        pipeline.set_hue(Hue::new(0.3).expect("valid hue")).expect("valid");

        pipeline.reset_parameters();

        assert_eq!(pipeline.derived(), pipeline.original());
    }

    #[test]
    fn restore_brings_back_previous_snapshot() {
        let mut pipeline = AdjustmentPipeline::new();
        pipeline.load(red_square());
        pipeline.set_brightness(0.5).expect("valid");
        let snapshot = *pipeline.params();
        let before = pipeline.derived().cloned();

        pipeline.set_contrast(0.0).expect("valid");
        pipeline.restore_parameters(snapshot);

        assert_eq!(pipeline.params(), &snapshot);
        assert_eq!(pipeline.derived().cloned(), before);
    }

    #[test]
    fn recompute_is_bit_identical() {
        let mut pipeline = AdjustmentPipeline::new();
        pipeline.load(red_square());
        pipeline.set_hue(Hue::new(0.71).expect("valid hue")).expect("valid");
        pipeline.set_contrast(1.3).expect("valid");

        let first = pipeline.derived().cloned();
        pipeline.recompute();

        assert_eq!(pipeline.derived().cloned(), first);
    }
}
