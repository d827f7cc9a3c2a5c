//! Host-agnostic bootstrap for the landing page.
//!
//! Provides `PageBuilder` (element discovery), `Page` (event → message →
//! update loop) and `Runtime` (drives effects with virtual time and a
//! `FormRelay`, for native hosts and tests).
//!
//! 架构：
//!     event.rs        宿主事件 → PageMessage
//!     message/        消息定义
//!     update/         状态更新，返回 Effect
//!     page.rs         Page 与订阅列表
//!     builder.rs      元素发现与绑定
//!     runtime.rs      Effect 执行（虚拟时间）

pub mod builder;
pub mod event;
pub mod message;
pub mod page;
pub mod runtime;
pub mod update;

pub use builder::PageBuilder;
pub use event::{EventKind, EventSource, PageEvent, Subscription, handle_event};
pub use message::PageMessage;
pub use page::{ModalBinding, Page};
pub use runtime::Runtime;
