//! # 应用上下文
//!
//! ## 设计思路
//!
//! `EditorContext` 替代全局窗口状态：界面宿主在启动时构造一次，退出时丢弃，
//! 所有操作都通过它同步完成。界面只持有最近一次返回的预览位图，不直接修改图像。
//!
//! ## 实现思路
//!
//! - “尚未加载图片”时，调整与保存都返回 `Ok(None)`，不视为错误。
//! - 任何失败都会在当前调用中同步返回，编辑状态保持不变。
//! - 每次成功调整都会重新生成预览。

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::editor::{
    exporter, loader, preview, AdjustmentPipeline, EditorConfig, EditorError, ExportFormat, Hue,
    ParameterSet, PreviewBitmap, PreviewProfile, WorkingImage,
};
use crate::error::AppError;

const ABOUT_TEXT: &str =
    "Pixel Tint: a simple image editor with hue retinting, brightness and contrast adjustment.";

/// 编辑器应用上下文。
pub struct EditorContext {
    config: EditorConfig,
    pipeline: AdjustmentPipeline,
    image_path: Option<PathBuf>,
    save_path: Option<PathBuf>,
    preview: Option<PreviewBitmap>,
}

impl EditorContext {
    /// 使用默认配置创建上下文。
    ///
    /// # 示例
    /// ```rust
    /// use pixel_tint::app::EditorContext;
    ///
    /// let mut context = EditorContext::new()?;
    /// assert!(context.set_brightness(1.5)?.is_none());
    /// # Ok::<(), pixel_tint::error::AppError>(())
    /// ```
    pub fn new() -> Result<Self, AppError> {
        Self::with_config(EditorConfig::default())
    }

    /// 使用自定义配置创建上下文。
    pub fn with_config(config: EditorConfig) -> Result<Self, AppError> {
        config.validate().map_err(AppError::Config)?;
        Ok(Self {
            config,
            pipeline: AdjustmentPipeline::new(),
            image_path: None,
            save_path: None,
            preview: None,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn params(&self) -> &ParameterSet {
        self.pipeline.params()
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }

    /// 当前派生图（未缩放），即导出内容。
    pub fn derived(&self) -> Option<&WorkingImage> {
        self.pipeline.derived()
    }

    /// 最近一次生成的预览。
    pub fn preview(&self) -> Option<&PreviewBitmap> {
        self.preview.as_ref()
    }

    pub fn about(&self) -> &'static str {
        ABOUT_TEXT
    }

    /// 打开图片。失败时保留之前的图片与参数。
    pub fn open_image(&mut self, path: impl AsRef<Path>) -> Result<&PreviewBitmap, AppError> {
        let path = path.as_ref();
        let start = Instant::now();

        let original = loader::load_image(path, &self.config).map_err(|e| {
            log::error!("打开图片失败 - 路径: {} 错误: {}", path.display(), e);
            AppError::Load(e)
        })?;
        let bitmap = self.render_preview(&original).map_err(AppError::Load)?;

        self.pipeline.load(original);
        self.image_path = Some(path.to_path_buf());
        self.save_path = None;

        log::info!(
            "✅ 图片已打开 - 路径: {} 耗时: {}ms",
            path.display(),
            start.elapsed().as_millis()
        );

        Ok(&*self.preview.insert(bitmap))
    }

    /// 取色器选中颜色后，以其色相作为目标色相。
    pub fn pick_color(&mut self, rgb: [u8; 3]) -> Result<Option<&PreviewBitmap>, AppError> {
        let hue = Hue::from_rgb8(rgb);
        log::info!("🎯 取色器颜色: {:?} -> 色相 {:.4}", rgb, hue.value());
        self.adjust(|pipeline| pipeline.set_hue(hue).map(|d| d.is_some()))
    }

    /// 直接以归一化色相设置目标色相。
    pub fn set_hue(&mut self, hue: f32) -> Result<Option<&PreviewBitmap>, AppError> {
        let hue = Hue::new(hue).map_err(AppError::Adjust)?;
        self.adjust(|pipeline| pipeline.set_hue(hue).map(|d| d.is_some()))
    }

    pub fn set_brightness(&mut self, factor: f32) -> Result<Option<&PreviewBitmap>, AppError> {
        self.adjust(|pipeline| pipeline.set_brightness(factor).map(|d| d.is_some()))
    }

    pub fn set_contrast(&mut self, factor: f32) -> Result<Option<&PreviewBitmap>, AppError> {
        self.adjust(|pipeline| pipeline.set_contrast(factor).map(|d| d.is_some()))
    }

    /// 所有参数回到“从未触碰”。
    pub fn reset_adjustments(&mut self) -> Result<Option<&PreviewBitmap>, AppError> {
        self.adjust(|pipeline| Ok(pipeline.reset_parameters().is_some()))
    }

    /// 切换预览档位并刷新预览。
    pub fn set_preview_profile(&mut self, profile: &str) -> Result<Option<&PreviewBitmap>, AppError> {
        let profile = PreviewProfile::from_str(profile).map_err(AppError::Config)?;
        let previous = self.config.preview_filter;
        self.config.apply_preview_profile(profile);
        log::info!("⚙️ 已切换预览档位：{}", profile.as_str());

        let Some(derived) = self.pipeline.derived() else {
            return Ok(None);
        };
        let bitmap = match self.render_preview(derived) {
            Ok(bitmap) => bitmap,
            Err(e) => {
                self.config.preview_filter = previous;
                return Err(AppError::Adjust(e));
            }
        };
        Ok(Some(&*self.preview.insert(bitmap)))
    }

    /// 另存为：导出当前派生图并记住路径。
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<Option<ExportFormat>, AppError> {
        let path = path.as_ref();
        let Some(derived) = self.pipeline.derived() else {
            log::debug!("未加载图片，忽略保存请求");
            return Ok(None);
        };

        let format = exporter::save_image(derived, path, &self.config).map_err(|e| {
            log::error!("保存图片失败 - 路径: {} 错误: {}", path.display(), e);
            AppError::Save(e)
        })?;
        self.save_path = Some(path.to_path_buf());
        Ok(Some(format))
    }

    /// 保存到上一次“另存为”的路径。
    pub fn save(&mut self) -> Result<Option<ExportFormat>, AppError> {
        if !self.pipeline.is_loaded() {
            log::debug!("未加载图片，忽略保存请求");
            return Ok(None);
        }
        let path = self.save_path.clone().ok_or_else(|| {
            AppError::Save(EditorError::InvalidFormat("尚未选择保存路径".to_string()))
        })?;
        self.save_as(path)
    }

    fn adjust<F>(&mut self, apply: F) -> Result<Option<&PreviewBitmap>, AppError>
    where
        F: FnOnce(&mut AdjustmentPipeline) -> Result<bool, EditorError>,
    {
        let snapshot = *self.pipeline.params();
        if !apply(&mut self.pipeline).map_err(AppError::Adjust)? {
            return Ok(None);
        }

        let Some(derived) = self.pipeline.derived() else {
            return Ok(None);
        };
        let bitmap = match self.render_preview(derived) {
            Ok(bitmap) => bitmap,
            Err(e) => {
                log::error!("预览生成失败，参数回滚：{}", e);
                self.pipeline.restore_parameters(snapshot);
                return Err(AppError::Adjust(e));
            }
        };
        Ok(Some(&*self.preview.insert(bitmap)))
    }

    fn render_preview(&self, image: &WorkingImage) -> Result<PreviewBitmap, EditorError> {
        preview::scale_for_preview(
            image,
            self.config.preview_width,
            self.config.preview_height,
            self.config.preview_filter,
            self.config.max_decoded_pixels,
        )
    }
}
