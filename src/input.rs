#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InputPurpose {
  Question,
  Subreddit,
}

/// A one-line text entry session on the status line. The previous status
/// message is restored when the session ends.
pub(crate) struct Input {
  pub(crate) buffer: String,
  pub(crate) message_backup: String,
  pub(crate) purpose: InputPurpose,
}

impl Input {
  pub(crate) fn new(purpose: InputPurpose, message_backup: String) -> Self {
    Self {
      buffer: String::new(),
      message_backup,
      purpose,
    }
  }

  pub(crate) fn prompt(&self) -> String {
    match self.purpose {
      InputPurpose::Question => format!("Ask: {}", self.buffer),
      InputPurpose::Subreddit => format!("Subreddit: {}", self.buffer),
    }
  }
}
