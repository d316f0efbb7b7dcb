use super::*;

/// A completed model response shown as a scrollable overlay.
pub(crate) struct SummaryView {
  pub(crate) content: String,
  pub(crate) scroll: u16,
  pub(crate) title: &'static str,
}

impl SummaryView {
  pub(crate) fn new(kind: SummaryKind, content: String) -> Self {
    Self {
      content,
      scroll: 0,
      title: kind.title(),
    }
  }

  pub(crate) fn scroll_down(&mut self) {
    self.scroll = self.scroll.saturating_add(1);
  }

  pub(crate) fn scroll_up(&mut self) {
    self.scroll = self.scroll.saturating_sub(1);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scrolling_saturates_at_zero() {
    let mut view = SummaryView::new(SummaryKind::Thread, "text".to_string());

    assert_eq!(view.title, "Thread summary");

    view.scroll_up();
    assert_eq!(view.scroll, 0);

    view.scroll_down();
    view.scroll_down();
    view.scroll_up();
    assert_eq!(view.scroll, 1);
  }
}
