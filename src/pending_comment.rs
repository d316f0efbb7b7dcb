pub(crate) struct PendingComment {
  pub(crate) request_id: u64,
  pub(crate) title: String,
}
