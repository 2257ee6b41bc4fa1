//! hookstrap 统一配置层
//!
//! 所有环境变量读取集中在此模块，业务代码通过结构化配置访问，避免直接 `std::env::var`。
//!
//! - `loader`：env_or、env_optional、env_bool 等辅助函数，以及 `.env` 加载
//! - `schema`：BootstrapConfig、ObservabilityConfig
//! - `env_keys`：key 常量

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_optional, env_or, load_dotenv_from_dir, process_env};
pub use schema::{BootstrapConfig, ObservabilityConfig, ENV_DIR_NAME, HOOK_PACKAGE};
