//! 按领域分组的配置结构体
//!
//! 从环境变量加载，统一 fallback 逻辑。CLI 参数优先于环境变量。

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use super::env_keys::{bootstrap as boot_keys, observability as obv_keys};
use super::loader::{env_bool, env_optional, env_or, process_env};

/// 隔离环境目录名，固定位于项目目录下
pub const ENV_DIR_NAME: &str = ".venv";

/// 安装到隔离环境中的 hook 管理工具包名
pub const HOOK_PACKAGE: &str = "pre-commit";

/// Bootstrap 配置：目标项目目录与创建 venv 的解释器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    /// 绝对路径，已校验为存在的目录
    pub project_dir: PathBuf,
    /// 显式指定的解释器；None 时在 PATH 中查找
    pub python: Option<String>,
}

impl BootstrapConfig {
    /// 解析项目目录：CLI > `HOOKSTRAP_PROJECT_DIR` > `cwd`，相对路径基于 `cwd`。
    pub fn resolve_project_dir<L>(
        lookup: &L,
        cwd: &Path,
        cli_override: Option<PathBuf>,
    ) -> Result<PathBuf>
    where
        L: Fn(&str) -> Option<String>,
    {
        let raw = cli_override
            .or_else(|| env_optional(lookup, boot_keys::HOOKSTRAP_PROJECT_DIR).map(PathBuf::from))
            .unwrap_or_else(|| cwd.to_path_buf());
        let dir = if raw.is_absolute() { raw } else { cwd.join(raw) };
        if !dir.exists() {
            bail!("project directory {} does not exist", dir.display());
        }
        if !dir.is_dir() {
            bail!("project directory {} is not a directory", dir.display());
        }
        Ok(dir)
    }

    /// 在已解析的项目目录上补全其余字段（CLI `--python` 优先）
    pub fn from_lookup<L>(lookup: &L, project_dir: PathBuf, python_override: Option<String>) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        let python = python_override
            .filter(|p| !p.trim().is_empty())
            .or_else(|| env_optional(lookup, boot_keys::HOOKSTRAP_PYTHON));
        Self {
            project_dir,
            python,
        }
    }

    /// 隔离环境根目录：`<project_dir>/.venv`
    pub fn env_root(&self) -> PathBuf {
        self.project_dir.join(ENV_DIR_NAME)
    }
}

/// 可观测性配置：quiet、log_level、log_json、audit_log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
    pub audit_log: Option<PathBuf>,
}

impl ObservabilityConfig {
    pub fn from_lookup<L>(lookup: &L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        Self {
            quiet: env_bool(lookup, obv_keys::HOOKSTRAP_QUIET, false),
            log_level: env_or(lookup, obv_keys::HOOKSTRAP_LOG_LEVEL, || {
                "hookstrap=warn".to_string()
            }),
            log_json: env_bool(lookup, obv_keys::HOOKSTRAP_LOG_JSON, false),
            audit_log: env_optional(lookup, obv_keys::HOOKSTRAP_AUDIT_LOG).map(PathBuf::from),
        }
    }

    /// 进程级缓存：首次调用时读取，之后不再变化（须在 `.env` 加载之后首次调用）
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| Self::from_lookup(&process_env))
    }

    /// 实际生效的 EnvFilter 指令
    pub fn filter_directive(&self) -> String {
        if self.quiet {
            "hookstrap=error".to_string()
        } else {
            self.log_level.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_project_dir_defaults_to_cwd() {
        let cwd = tempfile::tempdir().unwrap();
        let dir = BootstrapConfig::resolve_project_dir(&lookup_from(&[]), cwd.path(), None).unwrap();
        assert_eq!(dir, cwd.path());
    }

    #[test]
    fn test_project_dir_precedence_and_relative() {
        let cwd = tempfile::tempdir().unwrap();
        std::fs::create_dir(cwd.path().join("from_env")).unwrap();
        std::fs::create_dir(cwd.path().join("from_cli")).unwrap();
        let lookup = lookup_from(&[("HOOKSTRAP_PROJECT_DIR", "from_env")]);

        let dir = BootstrapConfig::resolve_project_dir(&lookup, cwd.path(), None).unwrap();
        assert_eq!(dir, cwd.path().join("from_env"));

        let dir = BootstrapConfig::resolve_project_dir(
            &lookup,
            cwd.path(),
            Some(PathBuf::from("from_cli")),
        )
        .unwrap();
        assert_eq!(dir, cwd.path().join("from_cli"));
    }

    #[test]
    fn test_project_dir_must_be_directory() {
        let cwd = tempfile::tempdir().unwrap();
        std::fs::write(cwd.path().join("file"), "x").unwrap();
        let lookup = lookup_from(&[]);

        let err = BootstrapConfig::resolve_project_dir(&lookup, cwd.path(), Some("missing".into()))
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));

        let err = BootstrapConfig::resolve_project_dir(&lookup, cwd.path(), Some("file".into()))
            .unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn test_python_override_and_env_root() {
        let lookup = lookup_from(&[("HOOKSTRAP_PYTHON", "python3.11")]);
        let cfg = BootstrapConfig::from_lookup(&lookup, PathBuf::from("/repo"), None);
        assert_eq!(cfg.python.as_deref(), Some("python3.11"));
        assert_eq!(cfg.env_root(), PathBuf::from("/repo").join(".venv"));

        let cfg = BootstrapConfig::from_lookup(&lookup, PathBuf::from("/repo"), Some("py".into()));
        assert_eq!(cfg.python.as_deref(), Some("py"));
    }

    #[test]
    fn test_observability_defaults() {
        let cfg = ObservabilityConfig::from_lookup(&lookup_from(&[]));
        assert!(!cfg.quiet);
        assert!(!cfg.log_json);
        assert_eq!(cfg.audit_log, None);
        assert_eq!(cfg.filter_directive(), "hookstrap=warn");
    }

    #[test]
    fn test_observability_quiet_overrides_level() {
        let cfg = ObservabilityConfig::from_lookup(&lookup_from(&[
            ("HOOKSTRAP_QUIET", "1"),
            ("HOOKSTRAP_LOG_LEVEL", "hookstrap=debug"),
            ("HOOKSTRAP_AUDIT_LOG", "/tmp/audit.jsonl"),
        ]));
        assert_eq!(cfg.filter_directive(), "hookstrap=error");
        assert_eq!(cfg.audit_log, Some(PathBuf::from("/tmp/audit.jsonl")));
    }
}
