use super::*;

#[derive(Clone)]
pub(crate) enum Effect {
  FetchComments {
    permalink: String,
    request_id: u64,
    title: String,
  },
  FetchPosts {
    after: Option<String>,
    request_id: u64,
    sort: Sort,
    subreddit: String,
    tab_index: usize,
  },
  OpenUrl {
    url: String,
  },
  Summarize {
    prompt: String,
    request_id: u64,
  },
  SummarizeSubreddit {
    limit: usize,
    request_id: u64,
    sort: Sort,
    subreddit: String,
  },
}
