//! subconverter INI 规则到 Clash 配置片段的转换工具

pub mod config;
pub mod convert;
pub mod ui;

pub use config::Config;
pub use convert::{ConvertError, ConvertResult, ParseOptions, convert_file, convert_str};
