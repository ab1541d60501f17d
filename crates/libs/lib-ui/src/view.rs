//! Minimal rendered-output tree.
//!
//! Components return a [`View`]; hosts translate it into their own node
//! types. Tests compare views structurally or by [`View::text_content`].

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum View {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<View>,
    },
    Text {
        text: String,
    },
}

impl View {
    pub fn element(tag: impl Into<String>) -> Self {
        View::Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        View::Text { text: text.into() }
    }

    /// Add an attribute. No-op on text nodes.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let View::Element { attrs, .. } = &mut self {
            attrs.push((name.into(), value.into()));
        }
        self
    }

    /// Append a child. No-op on text nodes.
    pub fn child(mut self, child: View) -> Self {
        if let View::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        match self {
            View::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            View::Text { .. } => None,
        }
    }

    /// Concatenated text of this node and its descendants, depth first.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            View::Text { text } => out.push_str(text),
            View::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// First node (pre-order) with the given tag.
    pub fn find(&self, tag_name: &str) -> Option<&View> {
        match self {
            View::Element { tag, children, .. } => {
                if tag == tag_name {
                    return Some(self);
                }
                children.iter().find_map(|c| c.find(tag_name))
            }
            View::Text { .. } => None,
        }
    }
}
