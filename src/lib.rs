//! scribe - 单文档编辑器的文件命令层
//!
//! 模块结构：
//! - kernel: 当前文件状态、命令、控制器
//! - kernel::services::ports: 外部协作者的 trait（文件系统、文档、项目、对话框）
//! - kernel::services::adapters: 本地实现（tokio fs、内存文档、终端对话框）

pub mod kernel;
