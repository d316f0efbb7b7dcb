use super::*;

#[derive(Clone, Debug)]
pub(crate) struct CommentThread {
  pub(crate) permalink: String,
  pub(crate) roots: Vec<Comment>,
  pub(crate) title: String,
}
