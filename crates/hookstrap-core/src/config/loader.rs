//! 统一环境变量加载逻辑
//!
//! 读取函数统一接收 `lookup` 闭包：进程内用 [`process_env`]，测试传入 HashMap，
//! 无需修改进程环境变量。

use std::env;
use std::path::Path;

use anyhow::{Context, Result};

/// 从进程环境变量读取（非 UTF-8 视为未设置）
pub fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// 解析 `.env` 内容为 (key, value) 列表
///
/// 支持 `#` 注释行、行尾注释（不在引号内）以及成对的单/双引号。
pub fn parse_dotenv(content: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some(eq_pos) = line.find('=') else {
            continue;
        };
        let key = line[..eq_pos].trim();
        let mut value = line[eq_pos + 1..].trim();
        if let Some(hash_pos) = value.find('#') {
            let before_hash = value[..hash_pos].trim_end();
            if !before_hash.contains('"') && !before_hash.contains('\'') {
                value = before_hash;
            }
        }
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            value = &value[1..value.len() - 1];
        }
        if !key.is_empty() {
            pairs.push((key.to_string(), value.to_string()));
        }
    }
    pairs
}

/// 加载 `dir/.env` 到环境变量（不覆盖已存在的变量），返回新设置的变量数。
///
/// 文件不存在时返回 `Ok(0)`。须在任何线程启动前调用。
pub fn load_dotenv_from_dir(dir: &Path) -> Result<usize> {
    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(0);
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Read {}", path.display()))?;
    let mut applied = 0;
    for (key, value) in parse_dotenv(&content) {
        if env::var_os(&key).is_none() {
            env::set_var(&key, &value);
            applied += 1;
        }
    }
    Ok(applied)
}

/// 读取变量，空值视为未设置，失败时使用默认值
pub fn env_or<L, F>(lookup: &L, key: &str, default: F) -> String
where
    L: Fn(&str) -> Option<String>,
    F: FnOnce() -> String,
{
    env_optional(lookup, key).unwrap_or_else(default)
}

/// 读取变量，返回 Option（trim 后为空视为未设置）
pub fn env_optional<L>(lookup: &L, key: &str) -> Option<String>
where
    L: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|s| {
        let s = s.trim().to_string();
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    })
}

/// 解析布尔型变量：0/false/no/off 为 false，其它非空值为 true
pub fn env_bool<L>(lookup: &L, key: &str, default: bool) -> bool
where
    L: Fn(&str) -> Option<String>,
{
    match env_optional(lookup, key) {
        Some(s) => !matches!(
            s.to_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        ),
        None => default,
    }
}
