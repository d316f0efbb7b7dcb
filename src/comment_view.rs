use super::*;

/// The comment browser for one post. Keeps the original comment forest for
/// prompt building alongside the flattened entries the list renders.
pub(crate) struct CommentView {
  pub(crate) entries: Vec<CommentEntry>,
  pub(crate) offset: usize,
  pub(crate) permalink: String,
  pub(crate) roots: Vec<Comment>,
  pub(crate) selected: Option<usize>,
  pub(crate) title: String,
}

impl CommentView {
  pub(crate) fn collapse_selected(&mut self) {
    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if entry.expanded && !entry.children.is_empty() {
        entry.expanded = false;
      } else if let Some(parent) = entry.parent {
        self.selected = Some(parent);
      }
    }

    self.ensure_selection_visible();
  }

  pub(crate) fn ensure_selection_visible(&mut self) {
    let mut current = self.selected;

    while let Some(idx) = current {
      if self.is_visible(idx) {
        self.selected = Some(idx);
        return;
      }

      current = self.entries.get(idx).and_then(|entry| entry.parent);
    }

    self.selected = self.visible_indexes().first().copied();
  }

  pub(crate) fn expand_selected(&mut self) {
    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if entry.children.is_empty() {
        return;
      }

      if entry.expanded {
        if let Some(child) = entry.children.first().copied() {
          self.selected = Some(child);
        }
      } else {
        entry.expanded = true;
      }
    }

    self.ensure_selection_visible();
  }

  pub(crate) fn is_visible(&self, idx: usize) -> bool {
    let mut current = Some(idx);

    while let Some(i) = current {
      if let Some(parent) = self.entries.get(i).and_then(|entry| entry.parent) {
        if let Some(parent_entry) = self.entries.get(parent)
          && !parent_entry.expanded
        {
          return false;
        }

        current = Some(parent);
      } else {
        break;
      }
    }

    true
  }

  pub(crate) fn move_by(&mut self, delta: isize) {
    let (visible, selected_pos) = self.visible_with_selection();

    if visible.is_empty() {
      self.selected = None;
      return;
    }

    let current = selected_pos.unwrap_or(0);
    let max_index = visible.len().saturating_sub(1);

    let target = if delta >= 0 {
      let delta_usize = usize::try_from(delta).unwrap_or(usize::MAX);
      current.saturating_add(delta_usize).min(max_index)
    } else {
      let magnitude = delta
        .checked_abs()
        .and_then(|value| usize::try_from(value).ok())
        .unwrap_or(usize::MAX);

      current.saturating_sub(magnitude)
    };

    self.selected = Some(visible[target]);
  }

  pub(crate) fn new(thread: CommentThread) -> Self {
    let CommentThread {
      permalink,
      roots,
      title,
    } = thread;

    let mut entries = Vec::new();

    for comment in &roots {
      Self::push_comment(&mut entries, comment, None, 0);
    }

    let selected = if entries.is_empty() { None } else { Some(0) };

    Self {
      entries,
      offset: 0,
      permalink,
      roots,
      selected,
      title,
    }
  }

  pub(crate) fn page_down(&mut self, amount: usize) {
    let step = amount.saturating_sub(1).max(1);
    let delta = isize::try_from(step).unwrap_or(isize::MAX);
    self.move_by(delta);
  }

  pub(crate) fn page_up(&mut self, amount: usize) {
    let step = amount.saturating_sub(1).max(1);
    let delta = isize::try_from(step).unwrap_or(isize::MAX);
    self.move_by(-delta);
  }

  fn push_comment(
    entries: &mut Vec<CommentEntry>,
    comment: &Comment,
    parent: Option<usize>,
    depth: usize,
  ) -> usize {
    let idx = entries.len();

    entries.push(CommentEntry {
      body: comment.processed_text.clone(),
      children: Vec::new(),
      depth,
      expanded: true,
      id: comment.id.clone(),
      image_urls: comment.image_urls.clone(),
      links: comment.links.clone(),
      parent,
    });

    let mut child_indices = Vec::new();

    for child in &comment.children {
      let child_idx =
        Self::push_comment(entries, child, Some(idx), depth.saturating_add(1));

      child_indices.push(child_idx);
    }

    if let Some(entry) = entries.get_mut(idx) {
      entry.children = child_indices;
    }

    idx
  }

  pub(crate) fn select_index_at(&mut self, pos: usize) {
    let (visible, _) = self.visible_with_selection();

    if visible.is_empty() {
      self.selected = None;
      return;
    }

    let index = pos.min(visible.len().saturating_sub(1));

    self.selected = Some(visible[index]);
  }

  pub(crate) fn select_next(&mut self) {
    self.move_by(1);
  }

  pub(crate) fn select_previous(&mut self) {
    self.move_by(-1);
  }

  pub(crate) fn selected_entry(&self) -> Option<&CommentEntry> {
    self.selected.and_then(|idx| self.entries.get(idx))
  }

  /// The first image URL extracted from the selected comment's body.
  pub(crate) fn selected_image(&self) -> Option<&str> {
    self
      .selected_entry()
      .and_then(|entry| entry.image_urls.first())
      .map(String::as_str)
  }

  /// The selected comment's first extracted URL, falling back to its own
  /// permalink within the thread.
  pub(crate) fn selected_link(&self) -> Option<String> {
    let entry = self.selected_entry()?;

    Some(entry.first_link().map_or_else(
      || format!("{}{}", self.thread_url(), entry.id),
      str::to_string,
    ))
  }

  pub(crate) fn thread_url(&self) -> String {
    format!("https://www.reddit.com{}", self.permalink)
  }

  pub(crate) fn toggle_selected(&mut self) {
    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if entry.children.is_empty() {
        return;
      }

      entry.expanded = !entry.expanded;
    }

    self.ensure_selection_visible();
  }

  pub(crate) fn visible_indexes(&self) -> Vec<usize> {
    let mut visible = Vec::new();

    for idx in 0..self.entries.len() {
      if self.is_visible(idx) {
        visible.push(idx);
      }
    }

    visible
  }

  pub(crate) fn visible_with_selection(&self) -> (Vec<usize>, Option<usize>) {
    let visible = self.visible_indexes();

    let selected_pos = self
      .selected
      .and_then(|selected| visible.iter().position(|&idx| idx == selected));

    (visible, selected_pos)
  }
}
