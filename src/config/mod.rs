use crate::convert::ParseOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // 输入输出
    pub input: String,
    pub output: String,

    // 规则提供者
    pub ruleset_dir: String,
    pub provider_interval: u64,

    // url-test 组
    pub default_test_interval: i64,

    // 日志配置
    pub log_level: String,

    // 输出校验
    pub verify_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        let options = ParseOptions::default();
        Self {
            input: "myClash.ini".to_string(),
            output: "myclash.yml".to_string(),
            ruleset_dir: options.ruleset_dir,
            provider_interval: options.provider_interval,
            default_test_interval: options.default_test_interval,
            log_level: "info".to_string(),
            verify_output: false,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 解析器参数
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            ruleset_dir: self.ruleset_dir.clone(),
            provider_interval: self.provider_interval,
            default_test_interval: self.default_test_interval,
            verify_output: self.verify_output,
        }
    }
}
