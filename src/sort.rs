/// One of the subreddit listing sort orders, each rendered as a tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Sort {
  pub(crate) label: &'static str,
  pub(crate) path: &'static str,
}

impl Sort {
  pub(crate) fn all() -> &'static [Sort] {
    &[
      Sort {
        label: "new",
        path: "new",
      },
      Sort {
        label: "hot",
        path: "hot",
      },
      Sort {
        label: "top",
        path: "top",
      },
    ]
  }
}
