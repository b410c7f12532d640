//! Deterministic child listings for display.

use std::cmp::Ordering;

use crate::config::ListingConfig;
use crate::node::Node;

impl Node {
    /// Children of this node in display order.
    ///
    /// Siblings are ordered by name; `config` decides grouping, direction and
    /// which entries are left out. Files have no children and list nothing.
    pub fn listing(&self, config: &ListingConfig) -> Vec<&Node> {
        if self.is_file() {
            return Vec::new();
        }

        let mut entries: Vec<&Node> = self
            .children_dirs
            .iter()
            .chain(&self.children_files)
            .filter(|child| !config.should_skip(child.name()))
            .collect();

        entries.sort_by(|a, b| {
            let group = if config.dirs_first {
                b.is_dir().cmp(&a.is_dir())
            } else {
                Ordering::Equal
            };
            let by_name = if config.reverse {
                b.cmp_by_name(a)
            } else {
                a.cmp_by_name(b)
            };
            group.then(by_name)
        });

        entries
    }
}
