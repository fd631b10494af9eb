use crate::config::Config;
use crate::convert::ConversionStats;

fn on_off(enabled: bool) -> &'static str {
    if enabled { "✅ 启用" } else { "❌ 禁用" }
}

/// 打印当前生效的设置
pub fn print_settings(config: &Config, config_path: &str) {
    println!("\n⚙️  当前配置:");
    println!("  配置文件: {}", config_path);
    println!("  输入文件: {}", config.input);
    println!("  输出文件: {}", config.output);
    println!("  规则集目录: {}", config.ruleset_dir);
    println!("  规则集更新间隔: {}s", config.provider_interval);
    println!("  默认测速间隔: {}s", config.default_test_interval);
    println!("  输出校验: {}", on_off(config.verify_output));
}

/// 打印转换摘要
pub fn print_summary(stats: &ConversionStats) {
    println!("\n转换摘要:");
    println!("{:=<80}", "");
    println!("代理组: {}", stats.proxy_groups);
    println!("规则提供者: {}", stats.rule_providers);
    println!("规则: {}", stats.rules);
}
