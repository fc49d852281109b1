//! Named resource registry.
//!
//! # Design
//! The registry keeps the raw templates and base URL it was built from next
//! to the resolved map. Placeholder updates always start again from the raw
//! templates, never from already-substituted URLs, so two updates with the
//! same map give the same result as one.

use std::collections::BTreeMap;

use crate::placeholders::{is_url, replace_placeholders, PlaceholderMap};

/// Resource name → fully resolved URL.
pub type ResolvedResources = BTreeMap<String, String>;

/// Resolve every template against `base_url`, substituting placeholders when
/// a map is supplied.
///
/// Absolute templates are kept as-is. Relative ones are appended to the base
/// URL verbatim, so templates must carry their own leading slash.
pub fn prepare_resources(
    templates: &BTreeMap<String, String>,
    base_url: Option<&str>,
    placeholders: Option<&PlaceholderMap>,
) -> ResolvedResources {
    templates
        .iter()
        .map(|(name, raw)| {
            let mut url = if is_url(raw) {
                raw.clone()
            } else {
                format!("{}{raw}", base_url.unwrap_or_default())
            };
            if placeholders.is_some() {
                url = replace_placeholders(Some(&url), placeholders);
            }
            (name.clone(), url)
        })
        .collect()
}

/// Raw resource templates plus the URLs currently resolved from them.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    base_url: Option<String>,
    templates: BTreeMap<String, String>,
    resolved: ResolvedResources,
}

impl ResourceRegistry {
    pub fn new(
        base_url: Option<String>,
        templates: BTreeMap<String, String>,
        placeholders: Option<&PlaceholderMap>,
    ) -> Self {
        let resolved = prepare_resources(&templates, base_url.as_deref(), placeholders);
        Self {
            base_url,
            templates,
            resolved,
        }
    }

    /// Recompute the resolved URLs from the original templates.
    pub fn update_placeholders(&mut self, placeholders: &PlaceholderMap) {
        self.resolved = prepare_resources(&self.templates, self.base_url.as_deref(), Some(placeholders));
    }

    pub fn resolved(&self) -> &ResolvedResources {
        &self.resolved
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.resolved.get(name).map(String::as_str)
    }
}
