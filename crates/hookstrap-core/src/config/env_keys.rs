//! 环境变量 key 常量
//!
//! 所有变量统一使用 `HOOKSTRAP_*` 前缀。

/// Bootstrap 目标与解释器
pub mod bootstrap {
    /// 目标项目目录，默认当前目录
    pub const HOOKSTRAP_PROJECT_DIR: &str = "HOOKSTRAP_PROJECT_DIR";

    /// 创建 venv 使用的 Python 解释器（路径或命令名）
    pub const HOOKSTRAP_PYTHON: &str = "HOOKSTRAP_PYTHON";
}

/// 可观测性与日志
pub mod observability {
    pub const HOOKSTRAP_QUIET: &str = "HOOKSTRAP_QUIET";

    pub const HOOKSTRAP_LOG_LEVEL: &str = "HOOKSTRAP_LOG_LEVEL";

    pub const HOOKSTRAP_LOG_JSON: &str = "HOOKSTRAP_LOG_JSON";

    pub const HOOKSTRAP_AUDIT_LOG: &str = "HOOKSTRAP_AUDIT_LOG";
}
