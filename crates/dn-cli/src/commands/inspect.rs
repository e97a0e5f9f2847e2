//! Inspect command
//!
//! Load an XML documentation file and list its documented entities.

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use dn_core::comment::DocFile;
use dn_core::config::{Config, InspectConfig};
use dn_core::model::{Documentable, Entity, ModelIndex};
use dn_core::types::MemberKind;

/// Arguments for the inspect command
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// XML documentation file to read
    pub file: PathBuf,

    /// Output JSON
    #[arg(long)]
    pub json: bool,

    /// Only show entities of this kind (namespace, type, method, property, field, event)
    #[arg(long, short, value_parser = parse_kind)]
    pub kind: Option<MemberKind>,

    /// Only show the entity with this id
    #[arg(long)]
    pub id: Option<String>,

    /// Show remarks in the listing
    #[arg(long)]
    pub remarks: bool,
}

#[derive(Serialize)]
struct InspectOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    assembly: Option<&'a str>,
    entities: Vec<&'a Entity>,
}

fn parse_kind(s: &str) -> std::result::Result<MemberKind, String> {
    MemberKind::from_name(s).ok_or_else(|| format!("unknown entity kind: {}", s))
}

/// Execute the inspect command
pub fn execute(args: InspectArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::discover(config_path).context("Failed to load configuration")?;

    let doc = DocFile::load(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let index: ModelIndex = doc.into_entities(&config.model).into_iter().collect();
    info!(
        "Built {} entities from {} member comments",
        index.len(),
        doc.members.len()
    );

    let selected: Vec<&Entity> = index
        .iter()
        .filter(|e| args.kind.map_or(true, |k| e.kind() == k))
        .filter(|e| args.id.as_deref().map_or(true, |id| e.id() == Some(id)))
        .collect();

    if let Some(id) = &args.id {
        if selected.is_empty() {
            bail!("No entity with id '{}'", id);
        }
    }

    let output = if args.json || config.inspect.json {
        let data = InspectOutput {
            assembly: doc.assembly.as_deref(),
            entities: selected,
        };
        let mut json = if config.inspect.pretty_json {
            serde_json::to_string_pretty(&data)?
        } else {
            serde_json::to_string(&data)?
        };
        json.push('\n');
        json
    } else {
        let show_remarks = args.remarks || config.inspect.show_remarks;
        render_listing(doc.assembly.as_deref(), &selected, &index, &config.inspect, show_remarks)
    };

    std::io::stdout()
        .write_all(output.as_bytes())
        .context("Failed to write to stdout")?;

    Ok(())
}

fn render_listing(
    assembly: Option<&str>,
    entities: &[&Entity],
    index: &ModelIndex,
    config: &InspectConfig,
    show_remarks: bool,
) -> String {
    use colored::Colorize;

    let mut out = String::new();
    out.push_str(&format!(
        "{} ({} entities)\n\n",
        assembly.unwrap_or("<unknown assembly>").bold(),
        entities.len()
    ));

    for entity in entities {
        let base = entity.base();
        out.push_str(&format!(
            "{:<9} {}\n",
            entity.kind().to_string().cyan(),
            base.id.as_deref().unwrap_or("<no id>")
        ));

        match &base.description {
            Some(text) => out.push_str(&format!(
                "          {}\n",
                truncate(text, config.max_description_len)
            )),
            None => out.push_str(&format!("          {}\n", "(no description)".dimmed())),
        }

        if show_remarks {
            if let Some(remarks) = &base.remarks {
                out.push_str(&format!(
                    "          Remarks: {}\n",
                    truncate(remarks, config.max_description_len)
                ));
            }
        }

        if let Entity::Method(method) = entity {
            for param in &method.params {
                out.push_str(&format!(
                    "          param {}: {}\n",
                    param.name.yellow(),
                    truncate(&param.description, config.max_description_len)
                ));
            }
            if let Some(returns) = &method.returns {
                out.push_str(&format!(
                    "          returns: {}\n",
                    truncate(returns, config.max_description_len)
                ));
            }
        }

        for link in &base.see_alsos {
            let marker = if link.target.is_some() && index.resolve_see_also(link).is_none() {
                " (unresolved)".red().to_string()
            } else {
                String::new()
            };
            out.push_str(&format!(
                "          see also: {}{}\n",
                link.display_text(),
                marker
            ));
        }
    }

    out
}

/// Collapse whitespace and cut to `max` characters (0 = no limit)
fn truncate(text: &str, max: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if max == 0 || collapsed.chars().count() <= max {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dn_core::model::EntityBuilder;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("method"), Ok(MemberKind::Method));
        assert!(parse_kind("widget").is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 80), "short");
        assert_eq!(truncate("  spread\n   over\tlines ", 0), "spread over lines");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
    }

    #[test]
    fn test_render_listing_marks_unresolved() {
        colored::control::set_override(false);

        let entity = EntityBuilder::new()
            .id("T:Ns.A")
            .see_also(dn_core::model::SeeAlso::to_entity("T:Ns.Missing"))
            .build_entity(MemberKind::Type);
        let index: ModelIndex = vec![entity.clone()].into_iter().collect();

        let out = render_listing(Some("Ns"), &[&entity], &index, &InspectConfig::default(), false);
        assert!(out.contains("Ns (1 entities)"));
        assert!(out.contains("T:Ns.A"));
        assert!(out.contains("(no description)"));
        assert!(out.contains("see also: T:Ns.Missing (unresolved)"));
    }
}
