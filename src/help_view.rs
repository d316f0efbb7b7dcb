use super::*;

pub(crate) struct HelpView {
  message_backup: Option<String>,
  visible: bool,
}

impl HelpView {
  /// Width and height of the help box: the longest help line plus the
  /// border, capped so a one-cell margin survives on small terminals.
  fn content_size(area: Rect) -> (u16, u16) {
    let widest = HELP_TEXT
      .lines()
      .map(|line| line.chars().count())
      .max()
      .unwrap_or(0);

    let width =
      u16::try_from(widest.saturating_add(2)).unwrap_or(u16::MAX);

    let height =
      u16::try_from(HELP_TEXT.lines().count().saturating_add(2)).unwrap_or(u16::MAX);

    (
      width.min(area.width.saturating_sub(2)).max(1),
      height.min(area.height.saturating_sub(2)).max(1),
    )
  }

  pub(crate) fn draw(&self, frame: &mut Frame) {
    if !self.visible {
      return;
    }

    let (width, height) = Self::content_size(frame.area());

    let area = centered_rect(frame.area(), width, height);

    frame.render_widget(Clear, area);

    let help = Paragraph::new(HELP_TEXT)
      .block(Block::default().title(HELP_TITLE).borders(Borders::ALL))
      .wrap(Wrap { trim: true });

    frame.render_widget(help, area);
  }

  pub(crate) fn handle_key(key: KeyEvent) -> Command {
    match key.code {
      KeyCode::Char('?') | KeyCode::Esc => Command::HideHelp,
      KeyCode::Char('q' | 'Q') => Command::Quit,
      _ => Command::None,
    }
  }

  pub(crate) fn hide(&mut self, message: &mut String) {
    if !self.visible {
      return;
    }

    *message = self
      .message_backup
      .take()
      .unwrap_or_else(|| LIST_STATUS.into());

    self.visible = false;
  }

  pub(crate) fn is_visible(&self) -> bool {
    self.visible
  }

  pub(crate) fn new() -> Self {
    Self {
      message_backup: None,
      visible: false,
    }
  }

  pub(crate) fn show(&mut self, message: &mut String) {
    if self.visible {
      return;
    }

    self.message_backup = Some(message.clone());

    *message = HELP_STATUS.into();

    self.visible = true;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn content_size_fits_the_longest_help_line() {
    let (width, height) = HelpView::content_size(Rect::new(0, 0, 200, 100));

    let widest = HELP_TEXT
      .lines()
      .map(|line| line.chars().count())
      .max()
      .unwrap_or(0);

    assert_eq!(usize::from(width), widest + 2);
    assert_eq!(usize::from(height), HELP_TEXT.lines().count() + 2);
  }

  #[test]
  fn content_size_leaves_a_margin_on_small_terminals() {
    let (width, height) = HelpView::content_size(Rect::new(0, 0, 20, 8));

    assert_eq!(width, 18);
    assert_eq!(height, 6);
  }

  #[test]
  fn show_and_hide_swap_the_status_message() {
    let mut view = HelpView::new();

    let mut message = "previous status".to_string();

    view.show(&mut message);

    assert_eq!(message, HELP_STATUS);
    assert!(view.is_visible());

    view.hide(&mut message);

    assert_eq!(message, "previous status");
    assert!(!view.is_visible());
  }
}
