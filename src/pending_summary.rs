#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SummaryKind {
  Answer,
  Overall,
  Thread,
}

impl SummaryKind {
  pub(crate) fn title(self) -> &'static str {
    match self {
      SummaryKind::Answer => "Answer",
      SummaryKind::Overall => "Subreddit summary",
      SummaryKind::Thread => "Thread summary",
    }
  }
}

pub(crate) struct PendingSummary {
  pub(crate) kind: SummaryKind,
  pub(crate) request_id: u64,
}
