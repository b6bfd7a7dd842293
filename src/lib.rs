//! # 像素重着色工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │            界面宿主（窗口 / 菜单 / 对话框 / 滑块）          │
//! │   打开路径 · 保存路径 · 取色 RGB · 亮度 · 对比度           │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ 同步调用 (Result<T, AppError>) / 预览位图
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            核心 (Rust)                           │
//! │                                                          │
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  │                                                       │
//! │  ├─ app ──────── EditorContext (应用上下文)               │
//! │  │                                                       │
//! │  └─ editor                                               │
//! │      ├─ color     RGB ↔ HSV                              │
//! │      ├─ hue       色相重映射（alpha 感知）                 │
//! │      ├─ tone      亮度 / 对比度                           │
//! │      ├─ pipeline  从原图按固定顺序重算                     │
//! │      ├─ preview   预览缩放                                │
//! │      └─ loader / exporter  PNG · JPEG 读写                │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，按用户操作归类 |
//! | [`app`] | 应用上下文，界面唯一入口 |
//! | [`editor`] | 颜色变换、参数流水线、预览、文件读写 |

pub mod app;
pub mod editor;
pub mod error;
