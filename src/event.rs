use super::*;

pub(crate) enum Event {
  Comments {
    request_id: u64,
    result: Result<CommentThread, Error>,
  },
  Posts {
    request_id: u64,
    result: Result<(Vec<PostEntry>, Option<String>), Error>,
    tab_index: usize,
  },
  Summary {
    request_id: u64,
    result: Result<String, Error>,
  },
}
