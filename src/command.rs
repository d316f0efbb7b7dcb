#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
  AskQuestion,
  CancelInput,
  ChangeSubreddit,
  CloseComments,
  CloseSummary,
  ExportComments,
  HideHelp,
  None,
  OpenCommentLink,
  OpenComments,
  OpenCurrentInBrowser,
  OpenImage,
  PageDown,
  PageUp,
  Quit,
  SelectFirst,
  SelectNext,
  SelectPrevious,
  ShowHelp,
  SubmitInput,
  SummarizeSubreddit,
  SummarizeThread,
  SwitchTabLeft,
  SwitchTabRight,
}
