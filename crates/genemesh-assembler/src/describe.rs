//! Human-readable and HTML descriptions of networks and genes.
//!
//! Output strings are consumed verbatim by the host's detail panels and
//! report exporter, so separators, punctuation and escaping are fixed.

use genemesh_common::entities::{
    Attribute, AttributeGroup, Gene, InteractionNetwork, NetworkMetadata, Node, Tag,
};
use genemesh_common::messages::keys;
use genemesh_common::{MessageCatalog, Result};

use crate::mediator::LinkoutGenerator;
use crate::scoring::preferred_gene;

/// Anything that can be shown in the network detail panel.
#[derive(Debug, Clone, Copy)]
pub enum DescribedNetwork<'a> {
    Interaction(&'a InteractionNetwork),
    AttributeGroup(&'a AttributeGroup),
    Attribute { attribute: &'a Attribute, group: &'a AttributeGroup },
}

/// Escapes `&` and `<` only.
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;")
}

/// Escaped title, wrapped in an anchor when a url is present. The url itself
/// is not escaped.
pub fn format_link(title: &str, url: Option<&str>) -> String {
    match url {
        Some(url) if !url.is_empty() => format!("<a href=\"{url}\">{}</a>", html_escape(title)),
        _ => html_escape(title),
    }
}

/// First author only, with ", et al" when the comma-separated list is longer.
pub fn format_authors(authors: &str) -> String {
    let mut parts: Vec<&str> = authors.split(',').collect();
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    match parts.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [first, ..] => format!("{first}, et al"),
    }
}

/// The gene's symbol, or `"PREFERRED (SYMBOL)"` when the node prefers a
/// different symbol.
pub fn gene_label(node: &Node, gene: &Gene) -> String {
    match preferred_gene(node) {
        Some(preferred) if preferred.id != gene.id => format!("{} ({})", preferred.symbol, gene.symbol),
        _ => gene.symbol.clone(),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn join_tags(tags: &[Tag], separator: &str, lower: bool) -> String {
    tags.iter()
        .map(|t| if lower { t.name.to_lowercase() } else { t.name.clone() })
        .collect::<Vec<_>>()
        .join(separator)
}

pub struct DescriptionFormatter<'a> {
    messages: &'a MessageCatalog,
}

impl<'a> DescriptionFormatter<'a> {
    pub fn new(messages: &'a MessageCatalog) -> Self {
        Self { messages }
    }

    pub fn build_description_html(&self, network: DescribedNetwork<'_>) -> Result<String> {
        match network {
            DescribedNetwork::Interaction(network) => self.interaction_network_html(network),
            DescribedNetwork::AttributeGroup(group) => self.attribute_group_html(group),
            DescribedNetwork::Attribute { attribute, group } => self.attribute_html(attribute, group),
        }
    }

    fn attribute_description(&self, group: &AttributeGroup) -> Result<String> {
        let publication = format_link(
            group.publication_name.as_deref().unwrap_or_default(),
            group.publication_url.as_deref(),
        );
        self.messages.format(keys::ATTRIBUTE_DESCRIPTION, &[group.description.as_str(), publication.as_str()])
    }

    fn attribute_group_html(&self, group: &AttributeGroup) -> Result<String> {
        Ok(format!("<div>{}</div>", self.attribute_description(group)?))
    }

    fn attribute_html(&self, attribute: &Attribute, group: &AttributeGroup) -> Result<String> {
        let mut html = String::new();
        html.push_str("<div>");
        html.push_str(&attribute.description);
        html.push_str("</div>");

        html.push_str(&format!("<div><strong>{}</strong> ", self.messages.get(keys::SOURCE_LABEL)?));
        html.push_str(&self.attribute_description(group)?);
        html.push_str("</div>");

        html.push_str(&format!("<div><strong>{}</strong> ", self.messages.get(keys::MORE_AT_LABEL)?));
        html.push_str(&format_link(
            group.linkout_label.as_deref().unwrap_or_default(),
            group.linkout_url.as_deref(),
        ));
        html.push_str("</div>");
        Ok(html)
    }

    fn interaction_network_html(&self, network: &InteractionNetwork) -> Result<String> {
        let Some(data) = &network.metadata else {
            return Ok(network.description.clone());
        };
        let mut html = String::new();

        if let Some(title) = non_empty(&data.title) {
            html.push_str("<div>");
            html.push_str(&format_link(title, data.url.as_deref()));
            html.push_str(". ");

            if let Some(authors) = non_empty(&data.authors) {
                html.push_str(&html_escape(&format_authors(authors)));
                html.push_str(". ");
            }
            if let Some(year) = non_empty(&data.year_published) {
                html.push('(');
                html.push_str(&html_escape(year));
                html.push_str("). ");
            }
            if let Some(publication) = non_empty(&data.publication_name) {
                html.push_str(&html_escape(publication));
                html.push('.');
            }
            html.push_str("</div>");
        }

        if let Some(other) = non_empty(&data.other) {
            html.push_str("<div>");
            html.push_str(&html_escape(other));
            html.push_str("</div>");
        }

        if let Some(comment) = non_empty(&data.comment) {
            html.push_str(&format!("<div><strong>{}</strong> ", self.messages.get(keys::COMMENT_LABEL)?));
            html.push_str(&html_escape(comment));
            html.push_str("</div>");
        }

        html.push_str(&format!("<div><strong>{}</strong> ", self.messages.get(keys::SOURCE_LABEL)?));
        html.push_str(&self.source_description(data)?);
        html.push_str("</div>");

        if !network.tags.is_empty() {
            html.push_str("<div>");
            html.push_str(&format!("<strong>{}</strong> ", self.messages.get(keys::TAGS_LABEL)?));
            html.push_str(&join_tags(&network.tags, ", ", true));
            html.push_str("</div>");
        }

        Ok(html)
    }

    fn source_description(&self, data: &NetworkMetadata) -> Result<String> {
        let processing = data.processing_description.as_deref().unwrap_or_default();
        let count = data.interaction_count.to_string();
        let source = format_link(data.source.as_deref().unwrap_or_default(), data.source_url.as_deref());
        self.messages.format(keys::SOURCE_DESCRIPTION, &[processing, count.as_str(), source.as_str()])
    }

    /// Plain-text, `|`-separated summary used in exported reports.
    pub fn build_description_report(&self, network: &InteractionNetwork) -> Result<String> {
        let Some(data) = &network.metadata else {
            return Ok(network.description.clone());
        };

        let mut report = self.messages.format(
            keys::REPORT_METHOD,
            &[data.processing_description.as_deref().unwrap_or_default()],
        )?;
        let field = |report: &mut String, text: &str| {
            if !report.is_empty() {
                report.push('|');
            }
            report.push_str(text);
        };

        if let Some(comment) = non_empty(&data.comment) {
            field(&mut report, comment);
        }
        if let Some(authors) = non_empty(&data.authors) {
            field(&mut report, &self.messages.format(keys::REPORT_AUTHORS, &[authors])?);
        }
        if let Some(pubmed) = non_empty(&data.pubmed_id) {
            field(&mut report, &self.messages.format(keys::REPORT_PUBMED, &[pubmed])?);
        }
        let count = data.interaction_count.to_string();
        field(&mut report, &self.messages.format(keys::REPORT_INTERACTIONS, &[count.as_str()])?);
        if let Some(source) = non_empty(&data.source) {
            field(&mut report, &self.messages.format(keys::REPORT_SOURCE, &[source])?);
        }
        if !network.tags.is_empty() {
            let tags = format!("{}{}", self.messages.get(keys::REPORT_TAGS)?, join_tags(&network.tags, ",", false));
            field(&mut report, &tags);
        }

        Ok(report)
    }

    /// Gene description followed by its external links.
    pub fn build_gene_description(
        &self,
        gene: &Gene,
        node: &Node,
        linkouts: &dyn LinkoutGenerator,
    ) -> Result<String> {
        let links = linkouts
            .linkouts(gene.organism_id, node)
            .iter()
            .map(|(label, url)| format!("<a href=\"{}\">{label}</a>", html_escape(url)))
            .collect::<Vec<_>>()
            .join(", ");
        let description = html_escape(node.gene_data.as_ref().map(|d| d.description.as_str()).unwrap_or_default());

        let key = if links.is_empty() { keys::GENE_DESCRIPTION } else { keys::GENE_DESCRIPTION_WITH_LINKS };
        self.messages.format(key, &[description.as_str(), links.as_str()])
    }
}
