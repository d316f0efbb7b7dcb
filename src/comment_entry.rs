use super::*;

/// A comment flattened into the visible list: index-linked to its parent
/// and children so collapse state can be resolved without re-walking the
/// tree.
pub(crate) struct CommentEntry {
  pub(crate) body: String,
  pub(crate) children: Vec<usize>,
  pub(crate) depth: usize,
  pub(crate) expanded: bool,
  pub(crate) id: String,
  pub(crate) image_urls: Vec<String>,
  pub(crate) links: Vec<(String, String)>,
  pub(crate) parent: Option<usize>,
}

impl CommentEntry {
  pub(crate) fn body(&self) -> &str {
    self.body.as_str()
  }

  /// The best URL to open for this comment: its first extracted image, then
  /// its first extracted link.
  pub(crate) fn first_link(&self) -> Option<&str> {
    self
      .image_urls
      .first()
      .map(String::as_str)
      .or_else(|| self.links.first().map(|(_, url)| url.as_str()))
  }

  pub(crate) fn has_children(&self) -> bool {
    !self.children.is_empty()
  }
}
