//! DOM snapshot abstraction.
//!
//! A snapshot carries the geometric and lexical facts the heuristics
//! need, nothing more. The host bridge is responsible for producing it
//! (or for running the equivalent injected script); detached nodes and
//! cross-origin frames simply never appear in a snapshot.

/// Index of a node within its snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Visible page area in CSS pixels.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Computed CSS position of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CssPosition {
    #[default]
    Static,
    Relative,
    Fixed,
    Absolute,
    Sticky,
}

impl CssPosition {
    /// Positions that can layer an element above page content.
    pub fn is_overlay_capable(self) -> bool {
        matches!(self, Self::Fixed | Self::Absolute | Self::Sticky)
    }
}

/// Bounding client rect, viewport-relative like the DOM API.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// One candidate element.
///
/// `inner_text` holds the element's lowercased textual content; tag and
/// class names are lowercase as well.
#[derive(Debug, Clone, Default)]
pub struct DomNode {
    pub tag: String,
    pub inner_text: String,
    pub classes: Vec<String>,
    pub id: Option<String>,
    pub attrs: Vec<(String, String)>,
    pub position: CssPosition,
    pub opacity: f32,
    pub z_index: i32,
    pub rect: Rect,
    /// Element already carries the overlay hide marker.
    pub overlay_marker: bool,
    /// Element already handled by the cookie suppressor.
    pub cookie_marker: bool,
}

impl DomNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_lowercase(),
            opacity: 1.0,
            ..Self::default()
        }
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == name)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// The page as seen by one scan.
#[derive(Debug, Clone)]
pub struct DomSnapshot {
    pub viewport: Viewport,
    pub nodes: Vec<DomNode>,
}

impl DomSnapshot {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: DomNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> &DomNode {
        &self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
    }

    #[test]
    fn test_overlay_capable_positions() {
        assert!(CssPosition::Fixed.is_overlay_capable());
        assert!(CssPosition::Absolute.is_overlay_capable());
        assert!(CssPosition::Sticky.is_overlay_capable());
        assert!(!CssPosition::Static.is_overlay_capable());
        assert!(!CssPosition::Relative.is_overlay_capable());
    }

    #[test]
    fn test_attr_lookup() {
        let mut node = DomNode::new("DIV");
        node.attrs.push(("data-gdpr".into(), "1".into()));

        assert_eq!(node.tag, "div");
        assert!(node.has_attr("data-gdpr"));
        assert_eq!(node.attr("data-gdpr"), Some("1"));
        assert!(!node.has_attr("data-other"));
    }
}
