use super::*;

/// A tab's accumulated post listing plus the continuation cursor for the
/// next page. Selection and scroll offset are clamped to the entries.
#[derive(Default)]
pub(crate) struct PostList {
  after: Option<String>,
  entries: Vec<PostEntry>,
  offset: usize,
  selected: usize,
}

impl PostList {
  pub(crate) fn after(&self) -> Option<&str> {
    self.after.as_deref()
  }

  pub(crate) fn entries(&self) -> &[PostEntry] {
    &self.entries
  }

  /// Appends one page of results and replaces the cursor with the page's
  /// continuation. A `None` cursor marks the end of the listing.
  pub(crate) fn extend_page(&mut self, entries: Vec<PostEntry>, after: Option<String>) {
    self.entries.extend(entries);
    self.after = after;
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub(crate) fn len(&self) -> usize {
    self.entries.len()
  }

  pub(crate) fn new(entries: Vec<PostEntry>, after: Option<String>) -> Self {
    Self {
      after,
      entries,
      offset: 0,
      selected: 0,
    }
  }

  pub(crate) fn offset(&self) -> usize {
    let selected = self.selected_index().unwrap_or(0);

    if self.entries.is_empty() {
      0
    } else {
      self.offset.min(selected)
    }
  }

  pub(crate) fn selected_entry(&self) -> Option<&PostEntry> {
    self
      .selected_index()
      .and_then(|index| self.entries.get(index))
  }

  pub(crate) fn selected_index(&self) -> Option<usize> {
    if self.entries.is_empty() {
      None
    } else {
      Some(self.selected.min(self.entries.len().saturating_sub(1)))
    }
  }

  pub(crate) fn selected_raw(&self) -> usize {
    self.selected
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    if self.entries.is_empty() {
      self.offset = 0;
    } else {
      let max_offset = self.entries.len().saturating_sub(1);
      self.offset = offset.min(max_offset);
    }
  }

  pub(crate) fn set_selected(&mut self, index: usize) {
    if self.entries.is_empty() {
      self.selected = 0;
    } else {
      self.selected = index.min(self.entries.len().saturating_sub(1));
    }
  }
}
