//! # Agent Detail View
//!
//! File: cli/src/common/ui/detail.rs
//!
//! ## Overview
//!
//! Renders one agent through the configured `agent_detail` template. The
//! template sees these slots:
//!
//! | Slot                | Content                                     |
//! |---------------------|---------------------------------------------|
//! | `uuid`              | full identifier                             |
//! | `expires`           | expiry as text                              |
//! | `default_addr`      | default address                             |
//! | `local_time`        | agent clock (RFC 3339), empty if unknown    |
//! | `fact_summary`      | fact names on one line                      |
//! | `collector_summary` | collector names on one line                 |
//! | `pp_facts`          | one `name=value` line per fact              |
//! | `facts`             | the fact map itself                         |
//! | `collectors`        | the collector map itself                    |
//!
//! A template naming any other slot fails with a template error. The result
//! always ends with exactly one newline.
//!
use crate::core::error::Result;
use crate::core::templating::{TemplateSet, AGENT_DETAIL};
use crate::resource::AgentAdvert;
use anyhow::Context;
use std::collections::BTreeMap;

/// Renders `agent` with the detail template.
pub fn render_agent_detail(templates: &TemplateSet, agent: &AgentAdvert) -> Result<String> {
    let context = agent_context(agent);
    let rendered = templates
        .render(AGENT_DETAIL, &context)
        .with_context(|| format!("Failed to render detail view for agent '{}'", agent.uuid))?;

    let mut text = rendered.trim_end_matches('\n').to_string();
    text.push('\n');
    Ok(text)
}

fn agent_context(agent: &AgentAdvert) -> tera::Context {
    let facts: BTreeMap<&str, String> = agent
        .facts
        .iter()
        .map(|(name, value)| (name.as_str(), value.to_string()))
        .collect();

    let mut context = tera::Context::new();
    context.insert("uuid", &agent.uuid);
    context.insert("expires", &agent.expires.to_string());
    context.insert("default_addr", &agent.default_addr);
    context.insert(
        "local_time",
        &agent
            .local_time
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
    );
    context.insert("fact_summary", &agent.fact_summary());
    context.insert("collector_summary", &agent.collector_summary());
    context.insert("pp_facts", &agent.pp_facts());
    context.insert("facts", &facts);
    context.insert("collectors", &agent.collectors);
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TemplatesConfig;
    use crate::core::error::ToddError;
    use crate::resource::agent::{Expiry, FactValue};

    fn default_templates() -> TemplateSet {
        TemplateSet::from_config(&TemplatesConfig::default()).unwrap()
    }

    fn sample_agent() -> AgentAdvert {
        let mut agent = AgentAdvert {
            uuid: "abc123".into(),
            expires: Expiry::Text("60s".into()),
            ..Default::default()
        };
        agent
            .facts
            .insert("os".into(), FactValue::One("linux".into()));
        agent
    }

    #[test]
    fn test_default_template_output() {
        let text = render_agent_detail(&default_templates(), &sample_agent()).unwrap();
        assert_eq!(
            text,
            "Agent UUID:  abc123\nExpires:  60s\nCollector Summary: none\nFacts:\nos=linux\n"
        );
    }

    #[test]
    fn test_multiple_facts_one_per_line() {
        let mut agent = sample_agent();
        agent.facts.insert(
            "addresses".into(),
            FactValue::Many(vec!["10.0.0.1".into(), "10.0.0.2".into()]),
        );
        agent.collectors.insert("ping".into(), "9f3c".into());
        agent.collectors.insert("iperf".into(), "1a2b".into());

        let text = render_agent_detail(&default_templates(), &agent).unwrap();
        assert!(text.contains("Collector Summary: iperf,ping\n"));
        assert!(text.ends_with("Facts:\naddresses=10.0.0.1,10.0.0.2\nos=linux\n"));
    }

    #[test]
    fn test_exactly_one_trailing_newline() {
        let templates = TemplateSet::from_config(&TemplatesConfig {
            agent_detail: "{{ uuid }}\n\n\n".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            render_agent_detail(&templates, &sample_agent()).unwrap(),
            "abc123\n"
        );

        let templates = TemplateSet::from_config(&TemplatesConfig {
            agent_detail: "{{ uuid }}".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            render_agent_detail(&templates, &sample_agent()).unwrap(),
            "abc123\n"
        );
    }

    #[test]
    fn test_custom_template_can_walk_maps() {
        let templates = TemplateSet::from_config(&TemplatesConfig {
            agent_detail: "{% for name, value in facts %}[{{ name }}:{{ value }}]{% endfor %}"
                .into(),
            ..Default::default()
        })
        .unwrap();
        let mut agent = sample_agent();
        agent
            .facts
            .insert("arch".into(), FactValue::One("arm64".into()));
        assert_eq!(
            render_agent_detail(&templates, &agent).unwrap(),
            "[arch:arm64][os:linux]\n"
        );
    }

    #[test]
    fn test_unknown_slot_fails_instead_of_blank() {
        let templates = TemplateSet::from_config(&TemplatesConfig {
            agent_detail: "Agent UUID: {{ uuid }}\nRegion: {{ region }}\n".into(),
            ..Default::default()
        })
        .unwrap();
        let err = render_agent_detail(&templates, &sample_agent()).unwrap_err();
        assert!(err.to_string().contains("abc123"));
        assert!(matches!(
            err.downcast_ref::<ToddError>(),
            Some(ToddError::Template { .. })
        ));
    }

    #[test]
    fn test_rendering_twice_is_identical() {
        let templates = default_templates();
        let agent = sample_agent();
        assert_eq!(
            render_agent_detail(&templates, &agent).unwrap(),
            render_agent_detail(&templates, &agent).unwrap()
        );
    }
}
