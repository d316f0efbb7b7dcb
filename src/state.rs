use super::*;

pub(crate) struct State {
  active_tab: usize,
  help: HelpView,
  input: Option<Input>,
  list_height: usize,
  message: String,
  mode: Mode,
  next_request_id: u64,
  pending_comment: Option<PendingComment>,
  pending_effects: Vec<Effect>,
  pending_selections: Vec<Option<usize>>,
  pending_summary: Option<PendingSummary>,
  post_limit: usize,
  subreddit: String,
  summary: Option<SummaryView>,
  tab_loading: Vec<bool>,
  tab_requests: Vec<u64>,
  tab_views: Vec<Option<PostList>>,
  transient_message: Option<TransientMessage>,
}

impl State {
  fn allocate_request_id(&mut self) -> u64 {
    let request_id = self.next_request_id;

    self.next_request_id = self.next_request_id.wrapping_add(1);

    request_id
  }

  fn ask_question(&mut self) {
    let Mode::Comments(view) = &self.mode else {
      return;
    };

    if self.pending_summary.is_some() {
      self.set_transient_message("A summary is already in progress".to_string());
      return;
    }

    if view.roots.is_empty() {
      self.set_transient_message("No comments to ask about".to_string());
      return;
    }

    self.start_input(InputPurpose::Question);
  }

  fn cancel_input(&mut self) {
    if let Some(input) = self.input.take() {
      self.message = input.message_backup;
    }
  }

  /// Switches every tab to a new subreddit: all cached listings are
  /// discarded and each tab reloads its first page.
  fn change_subreddit(&mut self, subreddit: String) {
    self.subreddit = subreddit;

    self.mode = Mode::List(PostList::default());

    for tab_index in 0..self.tab_views.len() {
      if let Some(slot) = self.tab_views.get_mut(tab_index) {
        *slot = None;
      }

      if let Some(slot) = self.pending_selections.get_mut(tab_index) {
        *slot = None;
      }

      if let Some(flag) = self.tab_loading.get_mut(tab_index) {
        *flag = true;
      }

      let Some(sort) = Sort::all().get(tab_index).copied() else {
        continue;
      };

      let request_id = self.allocate_request_id();

      if let Some(slot) = self.tab_requests.get_mut(tab_index) {
        *slot = request_id;
      }

      self.pending_effects.push(Effect::FetchPosts {
        after: None,
        request_id,
        sort,
        subreddit: self.subreddit.clone(),
        tab_index,
      });
    }

    if !self.help.is_visible() {
      self.message = format!("Loading r/{}...", self.subreddit);
    }
  }

  pub(crate) fn clear_pending_effects(&mut self) {
    self.pending_effects.clear();
  }

  fn close_comments(&mut self) {
    self.restore_active_list_view();

    if !self.help.is_visible() {
      self.message = LIST_STATUS.into();
    }
  }

  fn close_summary(&mut self) {
    if self.summary.take().is_none() {
      return;
    }

    if !self.help.is_visible() {
      self.message = match self.mode {
        Mode::Comments(_) => COMMENTS_STATUS.into(),
        Mode::List(_) => LIST_STATUS.into(),
      };
    }
  }

  fn current_entry(&self) -> Option<&PostEntry> {
    self
      .list_view(self.active_tab)
      .and_then(PostList::selected_entry)
  }

  pub(crate) fn dispatch_command(
    &mut self,
    command: Command,
  ) -> Result<CommandDispatch> {
    debug_assert!(
      self.pending_effects.is_empty(),
      "command dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match command {
      Command::Quit => {
        should_exit = true;
      }
      Command::ShowHelp => self.help.show(&mut self.message),
      Command::HideHelp => self.help.hide(&mut self.message),
      Command::AskQuestion => self.ask_question(),
      Command::ChangeSubreddit => self.start_input(InputPurpose::Subreddit),
      Command::CancelInput => self.cancel_input(),
      Command::SubmitInput => self.submit_input(),
      Command::SwitchTabLeft => self.switch_tab_left(),
      Command::SwitchTabRight => self.switch_tab_right(),
      Command::SelectNext => self.select_next(),
      Command::SelectPrevious => self.select_previous(),
      Command::PageDown => self.page_down(),
      Command::PageUp => self.page_up(),
      Command::SelectFirst => self.select_index(0),
      Command::OpenComments => self.open_comments(),
      Command::OpenCurrentInBrowser => self.open_current_in_browser(),
      Command::OpenCommentLink => self.open_comment_link(),
      Command::OpenImage => self.open_image(),
      Command::CloseComments => self.close_comments(),
      Command::CloseSummary => self.close_summary(),
      Command::SummarizeThread => self.summarize_thread(),
      Command::SummarizeSubreddit => self.summarize_subreddit(),
      Command::ExportComments => self.export_comments()?,
      Command::None => {}
    }

    Ok(CommandDispatch {
      effects: std::mem::take(&mut self.pending_effects),
      should_exit,
    })
  }

  /// Requests another listing page when the target index runs past the
  /// entries already loaded and a continuation cursor remains.
  fn ensure_item(&mut self, tab_index: usize, target_index: usize) {
    let current_len = self.list_view(tab_index).map_or(0, PostList::len);

    if target_index < current_len {
      return;
    }

    if self
      .list_view(tab_index)
      .and_then(PostList::after)
      .is_none()
    {
      return;
    }

    if let Some(slot) = self.pending_selections.get_mut(tab_index) {
      *slot = Some(target_index);
    }

    let is_loading = self.tab_loading.get(tab_index).copied().unwrap_or(false);

    if !is_loading {
      self.start_load_for_tab(tab_index);
    }
  }

  fn export_comments(&mut self) -> Result {
    let Mode::Comments(view) = &self.mode else {
      return Ok(());
    };

    if view.roots.is_empty() {
      self.set_transient_message("No comments to export".to_string());
      return Ok(());
    }

    let path = env::temp_dir().join("rdt-comments.txt");

    fs::write(&path, export_text(&view.roots))?;

    info!(path = %path.display(), "exported comments");

    self.set_transient_message(format!(
      "Exported comments to {}",
      path.display()
    ));

    Ok(())
  }

  pub(crate) fn handle_event(&mut self, event: Event) {
    match event {
      Event::Posts {
        request_id,
        result,
        tab_index,
      } => {
        if self.tab_requests.get(tab_index) != Some(&request_id) {
          return;
        }

        if let Some(flag) = self.tab_loading.get_mut(tab_index) {
          *flag = false;
        }

        let target = self
          .pending_selections
          .get_mut(tab_index)
          .and_then(Option::take);

        match result {
          Ok((entries, after)) => {
            if let Some(list) = self.list_view_mut(tab_index) {
              list.extend_page(entries, after);
            } else if let Some(slot) = self.tab_views.get_mut(tab_index) {
              *slot = Some(PostList::new(entries, after));
            }

            if let Some(target) = target
              && let Some(list) = self.list_view_mut(tab_index)
              && !list.is_empty()
            {
              list.set_selected(target.min(list.len().saturating_sub(1)));
            }

            if !self.help.is_visible()
              && self.input.is_none()
              && matches!(self.mode, Mode::List(_))
            {
              self.message = LIST_STATUS.into();
            }
          }
          Err(error) => {
            if !self.help.is_visible() {
              self
                .set_transient_message(format!("Could not load posts: {error}"));
            }
          }
        }
      }
      Event::Comments { request_id, result } => {
        let Some(pending) = self.pending_comment.as_ref() else {
          return;
        };

        if pending.request_id != request_id {
          return;
        }

        let Some(pending) = self.pending_comment.take() else {
          return;
        };

        match result {
          Ok(thread) => {
            self.store_active_list_view();

            self.mode = Mode::Comments(CommentView::new(thread));

            if !self.help.is_visible() {
              self.message = COMMENTS_STATUS.into();
            }
          }
          Err(error) => {
            if !self.help.is_visible() {
              self.set_transient_message(format!(
                "Could not load comments for \"{}\": {error}",
                truncate(&pending.title, 40)
              ));
            }
          }
        }
      }
      Event::Summary { request_id, result } => {
        let Some(pending) = self.pending_summary.as_ref() else {
          return;
        };

        if pending.request_id != request_id {
          return;
        }

        let Some(pending) = self.pending_summary.take() else {
          return;
        };

        match result {
          Ok(text) => {
            self.summary = Some(SummaryView::new(pending.kind, text));

            if !self.help.is_visible() {
              self.message = SUMMARY_STATUS.into();
            }
          }
          Err(error) => {
            if !self.help.is_visible() {
              self.set_transient_message(format!("Could not summarize: {error}"));
            }
          }
        }
      }
    }
  }

  fn handle_input_key(&mut self, key: KeyEvent) -> Command {
    match key.code {
      KeyCode::Esc => Command::CancelInput,
      KeyCode::Enter => Command::SubmitInput,
      KeyCode::Backspace => {
        if let Some(input) = self.input.as_mut() {
          input.buffer.pop();
        }

        self.update_input_message();

        Command::None
      }
      KeyCode::Char(ch) => {
        let modifiers = key.modifiers;

        if modifiers.contains(KeyModifiers::CONTROL)
          || modifiers.contains(KeyModifiers::ALT)
          || modifiers.contains(KeyModifiers::SUPER)
        {
          return Command::None;
        }

        if let Some(input) = self.input.as_mut() {
          input.buffer.push(ch);
        }

        self.update_input_message();

        Command::None
      }
      _ => Command::None,
    }
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn help_is_visible(&self) -> bool {
    self.help.is_visible()
  }

  pub(crate) fn input_command(&mut self, key: KeyEvent) -> Option<Command> {
    if self.input.is_some() {
      Some(self.handle_input_key(key))
    } else {
      None
    }
  }

  pub(crate) fn list_height(&self) -> usize {
    self.list_height
  }

  fn list_view(&self, index: usize) -> Option<&PostList> {
    if let Mode::List(view) = &self.mode
      && index == self.active_tab
    {
      return Some(view);
    }

    self.tab_views.get(index).and_then(|slot| slot.as_ref())
  }

  fn list_view_mut(&mut self, index: usize) -> Option<&mut PostList> {
    match &mut self.mode {
      Mode::List(view) if index == self.active_tab => Some(view),
      _ => self.tab_views.get_mut(index).and_then(|slot| slot.as_mut()),
    }
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  pub(crate) fn mode_mut(&mut self) -> &mut Mode {
    &mut self.mode
  }

  pub(crate) fn new(settings: &Settings, tabs: Vec<PostList>) -> Self {
    let mut tab_views: Vec<Option<PostList>> =
      tabs.into_iter().map(Some).collect();

    let initial_view = tab_views
      .get_mut(0)
      .and_then(Option::take)
      .unwrap_or_default();

    let tab_count = tab_views.len();

    Self {
      active_tab: 0,
      help: HelpView::new(),
      input: None,
      list_height: 0,
      message: LIST_STATUS.into(),
      mode: Mode::List(initial_view),
      next_request_id: 0,
      pending_comment: None,
      pending_effects: Vec::new(),
      pending_selections: vec![None; tab_count],
      pending_summary: None,
      post_limit: settings.post_limit,
      subreddit: settings.subreddit.clone(),
      summary: None,
      tab_loading: vec![false; tab_count],
      tab_requests: vec![0; tab_count],
      tab_views,
      transient_message: None,
    }
  }

  fn open_comment_link(&mut self) {
    if let Mode::Comments(view) = &self.mode {
      let url = view
        .selected_link()
        .unwrap_or_else(|| view.thread_url());

      self.pending_effects.push(Effect::OpenUrl { url });
    }
  }

  fn open_comments(&mut self) {
    let Some(entry) = self.current_entry() else {
      return;
    };

    let (permalink, title) = (entry.permalink.clone(), entry.title.clone());

    if !self.help.is_visible() {
      self.message = LOADING_COMMENTS_STATUS.into();
    }

    let request_id = self.allocate_request_id();

    self.pending_comment = Some(PendingComment {
      request_id,
      title: title.clone(),
    });

    self.pending_effects.push(Effect::FetchComments {
      permalink,
      request_id,
      title,
    });
  }

  fn open_current_in_browser(&mut self) {
    if let Some(entry) = self.current_entry() {
      self.pending_effects.push(Effect::OpenUrl {
        url: entry.resolved_url(),
      });
    }
  }

  fn open_image(&mut self) {
    match &self.mode {
      Mode::List(_) => {
        let image_url = self
          .current_entry()
          .and_then(|entry| entry.image_url.clone());

        if let Some(url) = image_url {
          self.pending_effects.push(Effect::OpenUrl { url });
        } else {
          self.set_transient_message("No image for this post".to_string());
        }
      }
      Mode::Comments(view) => {
        if let Some(url) = view.selected_image().map(str::to_string) {
          self.pending_effects.push(Effect::OpenUrl { url });
        } else {
          self.set_transient_message("No image in this comment".to_string());
        }
      }
    }
  }

  fn page_down(&mut self) {
    let current = self
      .list_view(self.active_tab)
      .map_or(0, PostList::selected_raw);

    let jump = self.page_jump();

    self.select_index(current.saturating_add(jump));
  }

  fn page_jump(&self) -> usize {
    self.list_height.saturating_sub(1).max(1)
  }

  fn page_up(&mut self) {
    let current = self
      .list_view(self.active_tab)
      .map_or(0, PostList::selected_raw);

    let jump = self.page_jump();

    self.select_index(current.saturating_sub(jump));
  }

  pub(crate) fn resolved_active_tab(&self) -> usize {
    self
      .active_tab
      .min(self.tab_views.len().saturating_sub(1))
  }

  fn restore_active_list_view(&mut self) {
    if let Some(slot) = self.tab_views.get_mut(self.active_tab) {
      if let Some(view) = slot.take() {
        self.mode = Mode::List(view);
      } else if !matches!(self.mode, Mode::List(_)) {
        self.mode = Mode::List(PostList::default());
      }
    } else if !matches!(self.mode, Mode::List(_)) {
      self.mode = Mode::List(PostList::default());
    }
  }

  fn select_index(&mut self, target: usize) {
    let tab_index = self.active_tab;

    self.ensure_item(tab_index, target);

    if let Some(list) = self.list_view_mut(tab_index) {
      if target >= list.len() {
        return;
      }

      list.set_selected(target);
    }
  }

  fn select_next(&mut self) {
    let current = self
      .list_view(self.active_tab)
      .map_or(0, PostList::selected_raw);

    self.select_index(current.saturating_add(1));
  }

  fn select_previous(&mut self) {
    let current = self
      .list_view(self.active_tab)
      .map_or(0, PostList::selected_raw);

    self.select_index(current.saturating_sub(1));
  }

  pub(crate) fn set_list_height(&mut self, height: usize) {
    self.list_height = height;
  }

  pub(crate) fn set_transient_message(&mut self, message: String) {
    let original = self.transient_message.as_ref().map_or_else(
      || self.message.clone(),
      |transient| transient.original().to_string(),
    );

    self.transient_message =
      Some(TransientMessage::new(message.clone(), original));

    self.message = message;
  }

  fn start_input(&mut self, purpose: InputPurpose) {
    if self.input.is_some() {
      return;
    }

    let backup = self.message.clone();

    self.input = Some(Input::new(purpose, backup));

    self.update_input_message();
  }

  fn start_load_for_tab(&mut self, tab_index: usize) {
    let Some(after) = self
      .list_view(tab_index)
      .and_then(PostList::after)
      .map(str::to_string)
    else {
      return;
    };

    let Some(sort) = Sort::all().get(tab_index).copied() else {
      return;
    };

    if let Some(flag) = self.tab_loading.get_mut(tab_index) {
      if *flag {
        return;
      }

      *flag = true;
    } else {
      return;
    }

    if !self.help.is_visible() {
      self.message = LOADING_POSTS_STATUS.into();
    }

    let request_id = self.allocate_request_id();

    if let Some(slot) = self.tab_requests.get_mut(tab_index) {
      *slot = request_id;
    }

    self.pending_effects.push(Effect::FetchPosts {
      after: Some(after),
      request_id,
      sort,
      subreddit: self.subreddit.clone(),
      tab_index,
    });
  }

  fn start_summary(&mut self, kind: SummaryKind, prompt: String) {
    let request_id = self.allocate_request_id();

    self.pending_summary = Some(PendingSummary { kind, request_id });

    if !self.help.is_visible() {
      self.message = SUMMARIZING_STATUS.into();
    }

    self.pending_effects.push(Effect::Summarize { prompt, request_id });
  }

  fn store_active_list_view(&mut self) {
    if let Mode::List(view) = &mut self.mode
      && let Some(slot) = self.tab_views.get_mut(self.active_tab)
    {
      *slot = Some(std::mem::take(view));
    }
  }

  fn submit_input(&mut self) {
    let Some(input) = self.input.take() else {
      return;
    };

    let text = input.buffer.trim().to_string();

    if text.is_empty() {
      self.message = input.message_backup;
      return;
    }

    match input.purpose {
      InputPurpose::Question => {
        let Mode::Comments(view) = &self.mode else {
          self.message = input.message_backup;
          return;
        };

        if self.pending_summary.is_some() {
          self.message = input.message_backup;
          self
            .set_transient_message("A summary is already in progress".to_string());
          return;
        }

        let prompt = question_prompt(&view.roots, &text);

        self.start_summary(SummaryKind::Answer, prompt);
      }
      InputPurpose::Subreddit => {
        let subreddit = text.trim_start_matches("r/").to_string();

        if subreddit.is_empty() {
          self.message = input.message_backup;
          return;
        }

        self.change_subreddit(subreddit);
      }
    }
  }

  pub(crate) fn subreddit(&self) -> &str {
    &self.subreddit
  }

  fn summarize_subreddit(&mut self) {
    if !matches!(self.mode, Mode::List(_)) {
      return;
    }

    if self.pending_summary.is_some() {
      self.set_transient_message("A summary is already in progress".to_string());
      return;
    }

    let Some(sort) = Sort::all().get(self.active_tab).copied() else {
      return;
    };

    let request_id = self.allocate_request_id();

    self.pending_summary = Some(PendingSummary {
      kind: SummaryKind::Overall,
      request_id,
    });

    if !self.help.is_visible() {
      self.message = format!("Summarizing r/{}...", self.subreddit);
    }

    self.pending_effects.push(Effect::SummarizeSubreddit {
      limit: self.post_limit,
      request_id,
      sort,
      subreddit: self.subreddit.clone(),
    });
  }

  fn summarize_thread(&mut self) {
    let Mode::Comments(view) = &self.mode else {
      return;
    };

    if self.pending_summary.is_some() {
      self.set_transient_message("A summary is already in progress".to_string());
      return;
    }

    if view.roots.is_empty() {
      self.set_transient_message("No comments to summarize".to_string());
      return;
    }

    let prompt = summary_prompt(&view.roots);

    self.start_summary(SummaryKind::Thread, prompt);
  }

  pub(crate) fn summary(&self) -> Option<&SummaryView> {
    self.summary.as_ref()
  }

  pub(crate) fn summary_command(&mut self, key: KeyEvent) -> Option<Command> {
    let view = self.summary.as_mut()?;

    Some(match key.code {
      KeyCode::Esc => Command::CloseSummary,
      KeyCode::Char('q' | 'Q') => Command::Quit,
      KeyCode::Char('?') => Command::ShowHelp,
      KeyCode::Down | KeyCode::Char('j') => {
        view.scroll_down();
        Command::None
      }
      KeyCode::Up | KeyCode::Char('k') => {
        view.scroll_up();
        Command::None
      }
      _ => Command::None,
    })
  }

  fn switch_tab_left(&mut self) {
    let tab_count = self.tab_views.len();

    if tab_count != 0 && matches!(self.mode, Mode::List(_)) {
      self.store_active_list_view();
      self.active_tab = (self.active_tab + tab_count - 1) % tab_count;
      self.restore_active_list_view();
    }
  }

  fn switch_tab_right(&mut self) {
    let tab_count = self.tab_views.len();

    if tab_count != 0 && matches!(self.mode, Mode::List(_)) {
      self.store_active_list_view();
      self.active_tab = (self.active_tab + 1) % tab_count;
      self.restore_active_list_view();
    }
  }

  pub(crate) fn tab_loading(&self) -> &[bool] {
    &self.tab_loading
  }

  fn update_input_message(&mut self) {
    if let Some(input) = &self.input {
      let prompt = input.prompt();
      self.message = truncate(&prompt, 80);
    }
  }

  pub(crate) fn update_transient_message(&mut self) {
    if let Some(transient) = self.transient_message.clone() {
      if self.message != transient.current() {
        self.transient_message = None;
      } else if transient.is_expired() {
        self.message = transient.original().to_string();
        self.transient_message = None;
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(id: &str) -> PostEntry {
    PostEntry {
      comment_count: 2,
      id: id.to_string(),
      image_count: 0,
      image_url: None,
      permalink: format!("/r/rust/comments/{id}/post/"),
      snippet: None,
      title: format!("Post {id}"),
      upvotes: 10,
    }
  }

  fn comment(body: &str) -> Comment {
    Comment {
      children: Vec::new(),
      id: "c1".to_string(),
      image_urls: Vec::new(),
      links: Vec::new(),
      processed_text: body.to_string(),
      raw_text: body.to_string(),
    }
  }

  fn sample_state(after: Option<&str>) -> State {
    let tabs = Sort::all()
      .iter()
      .enumerate()
      .map(|(index, _)| {
        PostList::new(
          vec![entry(&format!("post{index}"))],
          after.map(str::to_string),
        )
      })
      .collect();

    State::new(&Settings::default(), tabs)
  }

  fn press(state: &mut State, ch: char) {
    let key = KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE);

    let command = state.input_command(key).expect("input is active");

    assert_eq!(command, Command::None);
  }

  #[test]
  fn open_comments_emits_a_fetch_effect_for_the_selection() {
    let mut state = sample_state(None);

    let dispatch = state
      .dispatch_command(Command::OpenComments)
      .expect("dispatch succeeds");

    assert!(!dispatch.should_exit);
    assert_eq!(dispatch.effects.len(), 1);

    match &dispatch.effects[0] {
      Effect::FetchComments { permalink, .. } => {
        assert_eq!(permalink, "/r/rust/comments/post0/post/");
      }
      _ => panic!("unexpected effect variant"),
    }

    assert_eq!(state.message, LOADING_COMMENTS_STATUS);
  }

  #[test]
  fn selecting_past_the_end_requests_the_next_page() {
    let mut state = sample_state(Some("t3_cursor"));

    let dispatch = state
      .dispatch_command(Command::SelectNext)
      .expect("dispatch succeeds");

    assert_eq!(dispatch.effects.len(), 1);

    match &dispatch.effects[0] {
      Effect::FetchPosts {
        after, tab_index, ..
      } => {
        assert_eq!(after.as_deref(), Some("t3_cursor"));
        assert_eq!(*tab_index, 0);
      }
      _ => panic!("unexpected effect variant"),
    }

    assert_eq!(state.pending_selections[0], Some(1));
    assert!(state.tab_loading[0]);
  }

  #[test]
  fn stale_post_events_are_discarded() {
    let mut state = sample_state(Some("t3_cursor"));

    let _ = state
      .dispatch_command(Command::SelectNext)
      .expect("dispatch succeeds");

    state.handle_event(Event::Posts {
      request_id: 99,
      result: Ok((vec![entry("late")], None)),
      tab_index: 0,
    });

    assert_eq!(state.list_view(0).map(PostList::len), Some(1));
  }

  #[test]
  fn post_events_extend_the_list_and_apply_the_pending_selection() {
    let mut state = sample_state(Some("t3_cursor"));

    let dispatch = state
      .dispatch_command(Command::SelectNext)
      .expect("dispatch succeeds");

    let request_id = match &dispatch.effects[0] {
      Effect::FetchPosts { request_id, .. } => *request_id,
      _ => panic!("unexpected effect variant"),
    };

    state.handle_event(Event::Posts {
      request_id,
      result: Ok((vec![entry("next")], None)),
      tab_index: 0,
    });

    let list = state.list_view(0).expect("list exists");

    assert_eq!(list.len(), 2);
    assert_eq!(list.selected_index(), Some(1));
    assert!(!state.tab_loading[0]);
  }

  #[test]
  fn changing_the_subreddit_reloads_every_tab() {
    let mut state = sample_state(None);

    let dispatch = state
      .dispatch_command(Command::ChangeSubreddit)
      .expect("dispatch succeeds");

    assert!(dispatch.effects.is_empty());
    assert_eq!(state.message, "Subreddit: ");

    for ch in "r/programming".chars() {
      press(&mut state, ch);
    }

    let dispatch = state
      .dispatch_command(Command::SubmitInput)
      .expect("dispatch succeeds");

    assert_eq!(dispatch.effects.len(), Sort::all().len());

    for effect in &dispatch.effects {
      match effect {
        Effect::FetchPosts {
          after, subreddit, ..
        } => {
          assert_eq!(after, &None);
          assert_eq!(subreddit, "programming");
        }
        _ => panic!("unexpected effect variant"),
      }
    }

    assert_eq!(state.subreddit(), "programming");
    assert_eq!(state.list_view(0).map(PostList::len), Some(0));
  }

  #[test]
  fn summarize_subreddit_is_rejected_while_a_summary_is_pending() {
    let mut state = sample_state(None);

    let dispatch = state
      .dispatch_command(Command::SummarizeSubreddit)
      .expect("dispatch succeeds");

    assert_eq!(dispatch.effects.len(), 1);

    match &dispatch.effects[0] {
      Effect::SummarizeSubreddit {
        limit, subreddit, ..
      } => {
        assert_eq!(*limit, 50);
        assert_eq!(subreddit, "rust");
      }
      _ => panic!("unexpected effect variant"),
    }

    let dispatch = state
      .dispatch_command(Command::SummarizeSubreddit)
      .expect("dispatch succeeds");

    assert!(dispatch.effects.is_empty());
    assert_eq!(state.message, "A summary is already in progress");
  }

  #[test]
  fn summary_events_open_the_overlay() {
    let mut state = sample_state(None);

    state.mode = Mode::Comments(CommentView::new(CommentThread {
      permalink: "/r/rust/comments/abc/post/".to_string(),
      roots: vec![comment("hello")],
      title: "A post".to_string(),
    }));

    let dispatch = state
      .dispatch_command(Command::SummarizeThread)
      .expect("dispatch succeeds");

    let request_id = match &dispatch.effects[0] {
      Effect::Summarize { request_id, .. } => *request_id,
      _ => panic!("unexpected effect variant"),
    };

    state.handle_event(Event::Summary {
      request_id,
      result: Ok("a fine summary".to_string()),
    });

    let summary = state.summary().expect("summary is open");

    assert_eq!(summary.content, "a fine summary");
    assert_eq!(summary.title, "Thread summary");
    assert_eq!(state.message, SUMMARY_STATUS);
  }

  #[test]
  fn export_comments_writes_the_flattened_thread() {
    let mut state = sample_state(None);

    state.mode = Mode::Comments(CommentView::new(CommentThread {
      permalink: "/r/rust/comments/abc/post/".to_string(),
      roots: vec![comment("first"), comment("second")],
      title: "A post".to_string(),
    }));

    let _ = state
      .dispatch_command(Command::ExportComments)
      .expect("dispatch succeeds");

    let exported = fs::read_to_string(env::temp_dir().join("rdt-comments.txt"))
      .expect("export file exists");

    assert!(exported.starts_with(EXPORT_PREAMBLE));
    assert!(exported.contains("- first"));
    assert!(exported.contains("- second"));
  }

  #[test]
  fn asking_a_question_embeds_it_in_the_prompt() {
    let mut state = sample_state(None);

    state.mode = Mode::Comments(CommentView::new(CommentThread {
      permalink: "/r/rust/comments/abc/post/".to_string(),
      roots: vec![comment("hello")],
      title: "A post".to_string(),
    }));

    let _ = state
      .dispatch_command(Command::AskQuestion)
      .expect("dispatch succeeds");

    assert_eq!(state.message, "Ask: ");

    for ch in "why?".chars() {
      press(&mut state, ch);
    }

    let dispatch = state
      .dispatch_command(Command::SubmitInput)
      .expect("dispatch succeeds");

    match &dispatch.effects[0] {
      Effect::Summarize { prompt, .. } => {
        assert!(prompt.contains("- hello"));
        assert!(prompt.ends_with("Now, answer the question: why?"));
      }
      _ => panic!("unexpected effect variant"),
    }
  }
}
