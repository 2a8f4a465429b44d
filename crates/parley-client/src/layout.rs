//! What the UI is currently showing.
//!
//! The router renders a template into the layout root, optionally filling
//! named regions (e.g. `center`) with child templates.  The UI layer reads
//! the resulting [`LayoutState`] and draws it.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// A template rendered with its regions.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RenderedLayout {
    pub template: String,
    pub regions: BTreeMap<String, String>,
}

impl RenderedLayout {
    pub fn region(&self, name: &str) -> Option<&str> {
        self.regions.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LayoutState {
    root: String,
    current: Option<RenderedLayout>,
    main_content_classes: BTreeSet<String>,
}

impl LayoutState {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            current: None,
            main_content_classes: BTreeSet::new(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Replace whatever is rendered with `template`.
    pub fn render<'a>(
        &mut self,
        template: &str,
        regions: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) {
        self.current = Some(RenderedLayout {
            template: template.to_string(),
            regions: regions
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
    }

    pub fn current(&self) -> Option<&RenderedLayout> {
        self.current.as_ref()
    }

    pub fn add_main_content_class(&mut self, class: &str) {
        self.main_content_classes.insert(class.to_string());
    }

    pub fn has_main_content_class(&self, class: &str) -> bool {
        self.main_content_classes.contains(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_previous_layout() {
        let mut layout = LayoutState::new("body");
        assert!(layout.current().is_none());

        layout.render("main", [("center", "home")]);
        layout.render("cmsPage", std::iter::empty());

        let current = layout.current().unwrap();
        assert_eq!(current.template, "cmsPage");
        assert!(current.regions.is_empty());
        assert_eq!(layout.root(), "body");
    }

    #[test]
    fn main_content_classes_accumulate() {
        let mut layout = LayoutState::new("body");
        layout.add_main_content_class("rc-old");
        layout.add_main_content_class("rc-old");
        assert!(layout.has_main_content_class("rc-old"));
        assert!(!layout.has_main_content_class("other"));
    }
}
