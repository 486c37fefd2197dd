//! Localisable message templates for user-visible labels.
//!
//! A catalog is a flat dictionary of `key → template`. Templates use
//! positional placeholders (`{0}`, `{1}`, ...). Catalogs can be loaded from
//! YAML, JSON or TOML; keys missing from a file keep their built-in English
//! default.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GeneMeshError, Result};

/// Template keys used by the description formatters.
pub mod keys {
    pub const COMMENT_LABEL: &str = "network_detail.comment_label";
    pub const SOURCE_LABEL: &str = "network_detail.source_label";
    /// `{0}` processing description, `{1}` interaction count, `{2}` source link.
    pub const SOURCE_DESCRIPTION: &str = "network_detail.source_description";
    pub const TAGS_LABEL: &str = "network_detail.tags_label";
    pub const MORE_AT_LABEL: &str = "network_detail.more_at_label";
    /// `{0}` group description, `{1}` publication link.
    pub const ATTRIBUTE_DESCRIPTION: &str = "network_detail.attribute_description";

    pub const REPORT_METHOD: &str = "report.method";
    pub const REPORT_AUTHORS: &str = "report.authors";
    pub const REPORT_PUBMED: &str = "report.pubmed";
    pub const REPORT_INTERACTIONS: &str = "report.interactions";
    pub const REPORT_SOURCE: &str = "report.source";
    pub const REPORT_TAGS: &str = "report.tags";

    /// `{0}` gene description, `{1}` linkouts (empty).
    pub const GENE_DESCRIPTION: &str = "gene_detail.description";
    /// `{0}` gene description, `{1}` linkouts.
    pub const GENE_DESCRIPTION_WITH_LINKS: &str = "gene_detail.description_with_links";
}

const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    (keys::COMMENT_LABEL,               "Comment:"),
    (keys::SOURCE_LABEL,                "Source:"),
    (keys::SOURCE_DESCRIPTION,          "{0}, {1} interactions from {2}"),
    (keys::TAGS_LABEL,                  "Tags:"),
    (keys::MORE_AT_LABEL,               "More at:"),
    (keys::ATTRIBUTE_DESCRIPTION,       "{0} from {1}"),
    (keys::REPORT_METHOD,               "{0}"),
    (keys::REPORT_AUTHORS,              "Authors: {0}"),
    (keys::REPORT_PUBMED,               "PubMed:{0}"),
    (keys::REPORT_INTERACTIONS,         "{0} interactions"),
    (keys::REPORT_SOURCE,               "{0}"),
    (keys::REPORT_TAGS,                 "Tags: "),
    (keys::GENE_DESCRIPTION,            "{0}"),
    (keys::GENE_DESCRIPTION_WITH_LINKS, "{0}<br/>Links: {1}"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let templates = DEFAULT_TEMPLATES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { templates }
    }
}

impl MessageCatalog {
    /// An empty catalog, without the built-in defaults.
    pub fn empty() -> Self {
        Self { templates: HashMap::new() }
    }

    pub fn get(&self, key: &str) -> Result<&str> {
        self.templates
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| GeneMeshError::MissingTemplate(key.to_string()))
    }

    pub fn set(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(key.into(), template.into());
    }

    /// Look up `key` and substitute its positional placeholders.
    pub fn format(&self, key: &str, args: &[&str]) -> Result<String> {
        Ok(format_template(self.get(key)?, args))
    }

    /// Overlay `other` on top of this catalog; keys in `other` win.
    pub fn merged(mut self, other: MessageCatalog) -> Self {
        self.templates.extend(other.templates);
        self
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Parse YAML overrides and merge them onto the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let overrides: MessageCatalog = serde_yaml::from_str(content)?;
        Ok(Self::default().merged(overrides))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let overrides: MessageCatalog = serde_json::from_str(content)?;
        Ok(Self::default().merged(overrides))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let overrides: MessageCatalog = toml::from_str(content)?;
        Ok(Self::default().merged(overrides))
    }

    /// Load from YAML file
    pub fn from_yaml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml_str(&content)?)
    }

    /// Load from JSON file
    pub fn from_json(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&content)?)
    }

    /// Load from TOML file
    pub fn from_toml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Load by file extension (`.yaml`/`.yml`, `.json`, `.toml`).
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let lower = path.to_ascii_lowercase();
        let catalog = if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            Self::from_yaml(path)?
        } else if lower.ends_with(".json") {
            Self::from_json(path)?
        } else if lower.ends_with(".toml") {
            Self::from_toml(path)?
        } else {
            return Err(GeneMeshError::Config(format!("unsupported message catalog format: {path}")).into());
        };
        tracing::debug!(path, templates = catalog.len(), "Loaded message catalog");
        Ok(catalog)
    }

    /// Save to YAML file
    pub fn to_yaml(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Replace `{n}` with `args[n]`. Placeholders without a matching argument
/// are left as written.
pub fn format_template(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            let arg = args.get(index)?;
            Some((arg, close))
        });
        match substituted {
            Some((arg, close)) => {
                out.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
