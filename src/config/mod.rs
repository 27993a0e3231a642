use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub task: TaskConfig,
    pub schema: SchemaConfig,
}

/// 日志配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub dir: String,
    pub file: String,
    pub max_file_size: u64,
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "logs".to_string(),
            file: "graphschema".to_string(),
            max_file_size: 100 * 1024 * 1024, // 100MB
            max_files: 5,
        }
    }
}

/// 后台任务配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct TaskConfig {
    /// 同步创建索引时等待重建任务完成的最长时间（秒）
    pub wait_timeout_secs: u64,
    /// 任务运行时的工作线程数
    pub worker_threads: usize,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            wait_timeout_secs: 10,
            worker_threads: num_cpus::get(),
        }
    }
}

impl TaskConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

/// Schema 命名规则
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SchemaConfig {
    /// 整体匹配即视为非法的名称模式
    pub illegal_name_regex: String,
    /// 名称的最大字节数（不含）
    pub max_name_length: usize,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            illegal_name_regex: r".*\s+$|~.*".to_string(),
            max_name_length: 256,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
