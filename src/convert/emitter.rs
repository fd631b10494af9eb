//! Clash YAML 片段输出
//! 按固定结构逐行写出，不做转义或加引号

use super::error::{ConvertError, ConvertResult};
use super::types::{ClashDocument, ProxyGroup, RuleProvider};
use std::fmt;

impl fmt::Display for ClashDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "proxy-groups:")?;
        for group in &self.proxy_groups {
            write_group(f, group)?;
        }
        writeln!(f)?;

        writeln!(f, "rule-providers:")?;
        for (name, provider) in &self.rule_providers {
            write_provider(f, name, provider)?;
        }
        writeln!(f)?;

        writeln!(f, "rules:")?;
        for rule in &self.rules {
            writeln!(f, "  - {}", rule)?;
        }

        Ok(())
    }
}

/// 渲染完整文档
pub fn render(document: &ClashDocument) -> String {
    document.to_string()
}

fn write_group(f: &mut fmt::Formatter<'_>, group: &ProxyGroup) -> fmt::Result {
    writeln!(f, "  - name: {}", group.name)?;
    writeln!(f, "    type: {}", group.group_type)?;

    if let Some(include_all) = group.include_all {
        writeln!(f, "    include-all: {}", include_all)?;
    }
    if let Some(filter) = &group.filter {
        writeln!(f, "    filter: {}", filter)?;
    }
    if let Some(url) = &group.url {
        writeln!(f, "    url: {}", url)?;
    }
    if let Some(interval) = group.interval {
        writeln!(f, "    interval: {}", interval)?;
    }
    if let Some(tolerance) = group.tolerance {
        writeln!(f, "    tolerance: {}", tolerance)?;
    }
    if let Some(proxies) = &group.proxies {
        writeln!(f, "    proxies:")?;
        for proxy in proxies {
            writeln!(f, "      - {}", proxy)?;
        }
    }
    Ok(())
}

fn write_provider(f: &mut fmt::Formatter<'_>, name: &str, provider: &RuleProvider) -> fmt::Result {
    writeln!(f, "  {}:", name)?;
    writeln!(f, "    url: {}", provider.url)?;
    writeln!(f, "    path: {}", provider.path)?;
    writeln!(f, "    behavior: {}", provider.behavior)?;
    writeln!(f, "    interval: {}", provider.interval)?;
    writeln!(f, "    format: {}", provider.format)?;
    writeln!(f, "    type: {}", provider.provider_type)
}

/// 用 serde_yaml 重新解析输出，确认三个顶层段落都存在
pub fn verify_document(text: &str) -> ConvertResult<()> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| ConvertError::Verify(e.to_string()))?;

    for key in ["proxy-groups", "rule-providers", "rules"] {
        if yaml.get(key).is_none() {
            return Err(ConvertError::Verify(format!("缺少顶层字段 {}", key)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::types::{GroupType, Rule};

    fn sample_document() -> ClashDocument {
        let mut select = ProxyGroup::new("Proxy".to_string(), GroupType::Select);
        select.proxies = Some(vec!["Auto".to_string(), "DIRECT".to_string()]);

        let mut auto = ProxyGroup::new("Auto".to_string(), GroupType::UrlTest);
        auto.include_all = Some(true);
        auto.filter = Some("(HK)".to_string());
        auto.url = Some("http://www.gstatic.com/generate_204".to_string());
        auto.interval = Some(300);
        auto.tolerance = Some(50);

        let mut document = ClashDocument::default();
        document.proxy_groups = vec![select, auto];
        document.rule_providers.insert(
            "Google".to_string(),
            RuleProvider::new(
                "https://example.com/Google.list".to_string(),
                "./ruleset/Google.list".to_string(),
                86400,
            ),
        );
        document.rules = vec![
            Rule::RuleSet {
                provider: "Google".to_string(),
                group: "Proxy".to_string(),
            },
            Rule::Match {
                target: "Proxy".to_string(),
            },
        ];
        document
    }

    #[test]
    fn test_render_layout() {
        let expected = "\
proxy-groups:
  - name: Proxy
    type: select
    proxies:
      - Auto
      - DIRECT
  - name: Auto
    type: url-test
    include-all: true
    filter: (HK)
    url: http://www.gstatic.com/generate_204
    interval: 300
    tolerance: 50

rule-providers:
  Google:
    url: https://example.com/Google.list
    path: ./ruleset/Google.list
    behavior: classical
    interval: 86400
    format: text
    type: http

rules:
  - RULE-SET,Google,Proxy
  - MATCH,Proxy
";
        assert_eq!(render(&sample_document()), expected);
    }

    #[test]
    fn test_render_negative_numbers() {
        let mut group = ProxyGroup::new("Auto".to_string(), GroupType::UrlTest);
        group.interval = Some(-5);
        group.tolerance = Some(-50);
        let mut document = ClashDocument::default();
        document.proxy_groups.push(group);

        let text = render(&document);
        assert!(text.contains("    interval: -5\n    tolerance: -50\n"));
    }

    #[test]
    fn test_render_empty_document() {
        assert_eq!(
            render(&ClashDocument::default()),
            "proxy-groups:\n\nrule-providers:\n\nrules:\n"
        );
    }

    #[test]
    fn test_verify_rendered_document() {
        assert!(verify_document(&render(&sample_document())).is_ok());
        assert!(verify_document(&render(&ClashDocument::default())).is_ok());
    }

    #[test]
    fn test_verify_rejects_missing_section() {
        let err = verify_document("proxy-groups:\nrules:\n").unwrap_err();
        assert!(matches!(err, ConvertError::Verify(_)));
    }

    #[test]
    fn test_provider_order_follows_insertion() {
        let mut document = ClashDocument::default();
        for name in ["zeta", "alpha", "mid"] {
            document.rule_providers.insert(
                name.to_string(),
                RuleProvider::new(
                    format!("https://x/{}.list", name),
                    format!("./ruleset/{}.list", name),
                    86400,
                ),
            );
        }
        let text = render(&document);
        let zeta = text.find("  zeta:").unwrap();
        let alpha = text.find("  alpha:").unwrap();
        let mid = text.find("  mid:").unwrap();
        assert!(zeta < alpha && alpha < mid);
    }
}
