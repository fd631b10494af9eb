use anyhow::{Context, Result};
use clap::Parser;
use ini2clash::config::Config;
use ini2clash::convert;
use ini2clash::ui::report;
use log::debug;
use std::fs;
use std::path::Path;

/// subconverter INI 规则转换为 Clash 配置片段
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 配置文件路径
    #[arg(short = 'f', long, default_value = "config/config.yaml")]
    config: String,

    /// 输入 INI 文件
    #[arg(short = 'i', long)]
    input: Option<String>,

    /// 输出 YAML 文件
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// 规则集本地缓存目录
    #[arg(long)]
    ruleset_dir: Option<String>,

    /// 规则集更新间隔（秒）
    #[arg(long)]
    provider_interval: Option<u64>,

    /// 日志级别
    #[arg(long)]
    log_level: Option<String>,

    /// 写出前用 YAML 解析器校验输出
    #[arg(long)]
    verify: bool,

    /// 输出到标准输出而不是文件
    #[arg(long)]
    stdout: bool,

    /// 详细输出
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: &str, quiet: bool) -> Config {
    if !Path::new(path).exists() {
        if !quiet {
            println!("📝 使用默认配置 (配置文件不存在: {})", path);
        }
        return Config::default();
    }

    match Config::load_from_file(path) {
        Ok(config) => {
            if !quiet {
                println!("📁 从配置文件加载设置: {}", path);
            }
            config
        }
        Err(e) => {
            eprintln!("⚠️  配置文件加载失败: {}，使用默认配置", e);
            Config::default()
        }
    }
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(input) = &args.input {
        config.input = input.clone();
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if let Some(dir) = &args.ruleset_dir {
        config.ruleset_dir = dir.clone();
    }
    if let Some(interval) = args.provider_interval {
        config.provider_interval = interval;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    if args.verify {
        config.verify_output = true;
    }
}

fn init_logger(config: &Config, verbose: bool) {
    let level = if verbose { "debug" } else { config.log_level.as_str() };
    env_logger::Builder::new()
        .parse_filters(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    // --stdout 时标准输出只留给文档
    let quiet = args.stdout;

    if !quiet {
        println!("🚀 INI 规则转换工具 v{}", env!("CARGO_PKG_VERSION"));
        println!("{:=<80}", "");
    }

    let mut config = load_config(&args.config, quiet);
    apply_overrides(&mut config, &args);
    init_logger(&config, args.verbose);

    if !quiet {
        report::print_settings(&config, &args.config);
    }

    if args.stdout {
        let content = fs::read_to_string(&config.input)
            .with_context(|| format!("读取输入文件失败: {}", config.input))?;
        let text = convert::convert_str(&content, config.parse_options())
            .with_context(|| format!("转换失败: {}", config.input))?;
        print!("{}", text);
        return Ok(());
    }

    let stats = convert::convert_file(&config.input, &config.output, config.parse_options())
        .with_context(|| format!("转换失败: {} -> {}", config.input, config.output))?;
    debug!("转换完成: {:?}", stats);

    report::print_summary(&stats);

    println!("\n🎉 转换完成: {}", config.output);

    Ok(())
}
