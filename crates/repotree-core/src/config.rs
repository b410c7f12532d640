//! Listing configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for listing a directory node's children.
///
/// Deserialization goes through [`ListingConfigBuilder`], so missing fields
/// take the builder defaults and invalid ignore names are rejected.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(
    setter(into),
    build_fn(validate = "Self::validate"),
    derive(Deserialize)
)]
#[serde(try_from = "ListingConfigBuilder")]
pub struct ListingConfig {
    /// List child directories before child files.
    #[builder(default = "true")]
    pub dirs_first: bool,

    /// Include hidden entries (starting with .).
    #[builder(default = "true")]
    pub include_hidden: bool,

    /// Exact entry names to leave out.
    #[builder(default)]
    pub ignore_names: Vec<String>,

    /// List in descending name order.
    #[builder(default = "false")]
    pub reverse: bool,
}

impl ListingConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref names) = self.ignore_names {
            for name in names {
                if name.is_empty() {
                    return Err("Ignored names cannot be empty".to_string());
                }
                if name.contains('/') {
                    return Err(format!("Ignored name cannot contain a slash: {name}"));
                }
            }
        }
        Ok(())
    }
}

impl TryFrom<ListingConfigBuilder> for ListingConfig {
    type Error = ListingConfigBuilderError;

    fn try_from(builder: ListingConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl ListingConfig {
    /// Create a new listing config builder.
    pub fn builder() -> ListingConfigBuilder {
        ListingConfigBuilder::default()
    }

    /// Check if an entry should be left out of a listing.
    pub fn should_skip(&self, name: &str) -> bool {
        (!self.include_hidden && name.starts_with('.'))
            || self.ignore_names.iter().any(|ignored| ignored == name)
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            dirs_first: true,
            include_hidden: true,
            ignore_names: Vec::new(),
            reverse: false,
        }
    }
}
