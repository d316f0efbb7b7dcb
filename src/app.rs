use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  gemini: Gemini,
  handle: Handle,
  state: State,
}

impl App {
  fn comment_list_item(entry: &CommentEntry, available_width: u16) -> ListItem {
    let depth_indent = "  ".repeat(entry.depth);
    let indent = format!("{BASE_INDENT}{depth_indent}");

    let toggle = entry.has_children().then_some(if entry.expanded {
      "[-]"
    } else {
      "[+]"
    });

    let prefix_width = indent.chars().count();
    let wrap_width = (available_width as usize).saturating_sub(prefix_width).max(1);

    let mut lines = Vec::new();

    if !entry.body().is_empty() {
      for (index, line) in wrap_text(entry.body(), wrap_width).into_iter().enumerate() {
        let mut spans = vec![Span::raw(indent.clone())];

        if index == 0 {
          if let Some(symbol) = toggle {
            spans.push(Span::raw(symbol));
            spans.push(Span::raw(" "));
          }

          spans.push(Span::styled(line, Style::default().fg(Color::White)));
        } else {
          spans.push(Span::styled(line, Style::default().fg(Color::Gray)));
        }

        lines.push(Line::from(spans));
      }
    } else if let Some(symbol) = toggle {
      lines.push(Line::from(vec![
        Span::raw(indent.clone()),
        Span::raw(symbol),
      ]));
    }

    for url in &entry.image_urls {
      lines.push(Line::from(vec![
        Span::raw(indent.clone()),
        Span::styled(
          format!("image: {}", truncate(url, wrap_width.saturating_sub(7))),
          Style::default().fg(Color::Blue),
        ),
      ]));
    }

    for (label, url) in &entry.links {
      lines.push(Line::from(vec![
        Span::raw(indent.clone()),
        Span::styled(
          truncate(&format!("{label}: {url}"), wrap_width),
          Style::default().fg(Color::Blue),
        ),
      ]));
    }

    lines.push(Line::from(Span::raw(indent)));

    ListItem::new(lines)
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(frame.area());

    self.state.set_list_height(layout[1].height as usize);

    let active_tab = self.state.resolved_active_tab();

    let tab_titles: Vec<Line> = Sort::all()
      .iter()
      .map(|sort| Line::from(sort.label.to_uppercase()))
      .collect();

    let tabs_widget = Tabs::new(tab_titles)
      .select(active_tab)
      .block(
        Block::default().title(format!("r/{}", self.state.subreddit())),
      )
      .style(Style::default().fg(Color::DarkGray))
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .divider(Span::raw(" "));

    frame.render_widget(tabs_widget, layout[0]);

    let is_loading = self
      .state
      .tab_loading()
      .get(active_tab)
      .copied()
      .unwrap_or(false);

    let (list_items, selected_index, offset) = match self.state.mode_mut() {
      Mode::List(view) => {
        let selected_index = view.selected_index();
        let offset = view.offset();

        let list_items: Vec<ListItem> = if view.is_empty() {
          let text = if is_loading {
            LOADING_POSTS_STATUS
          } else {
            "Nothing to show. Try another tab or subreddit."
          };

          vec![ListItem::new(Line::from(vec![
            Span::raw(BASE_INDENT),
            Span::raw(text),
          ]))]
        } else {
          view
            .entries()
            .iter()
            .map(|entry| {
              let mut lines = vec![Line::from(vec![
                Span::raw(BASE_INDENT),
                Span::styled(
                  entry.title.clone(),
                  Style::default().fg(Color::White),
                ),
              ])];

              lines.push(Line::from(vec![
                Span::raw(BASE_INDENT),
                Span::styled(entry.detail(), Style::default().fg(Color::DarkGray)),
              ]));

              if let Some(snippet) = &entry.snippet {
                lines.push(Line::from(vec![
                  Span::raw(BASE_INDENT),
                  Span::styled(
                    snippet.clone(),
                    Style::default().fg(Color::Gray),
                  ),
                ]));
              }

              lines.push(Line::from(Span::raw(BASE_INDENT)));

              ListItem::new(lines)
            })
            .collect()
        };

        (list_items, selected_index, offset)
      }
      Mode::Comments(view) => {
        let (visible, selected_pos) = view.visible_with_selection();

        let list_items: Vec<ListItem> = if visible.is_empty() {
          vec![ListItem::new(Line::from(vec![
            Span::raw(BASE_INDENT),
            Span::raw("No comments yet."),
          ]))]
        } else {
          visible
            .iter()
            .map(|&idx| {
              Self::comment_list_item(&view.entries[idx], layout[1].width)
            })
            .collect()
        };

        let offset = view.offset.min(selected_pos.unwrap_or(0));

        (list_items, selected_pos, offset)
      }
    };

    let mut list_state = ListState::default()
      .with_selected(selected_index)
      .with_offset(offset);

    let list = List::new(list_items)
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("");

    frame.render_stateful_widget(list, layout[1], &mut list_state);

    self.state.mode_mut().set_offset(list_state.offset());

    let status = Paragraph::new(self.state.message().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[2]);

    if let Some(summary) = self.state.summary() {
      Self::draw_summary(frame, summary);
    }

    self.state.help().draw(frame);
  }

  fn draw_summary(frame: &mut Frame, summary: &SummaryView) {
    let area = frame.area();

    let overlay = centered_rect(
      area,
      (area.width.saturating_mul(4) / 5).max(1),
      (area.height.saturating_mul(4) / 5).max(1),
    );

    frame.render_widget(Clear, overlay);

    let paragraph = Paragraph::new(summary.content.clone())
      .block(
        Block::default()
          .title(summary.title)
          .borders(Borders::ALL),
      )
      .wrap(Wrap { trim: false })
      .scroll((summary.scroll, 0));

    frame.render_widget(paragraph, overlay);
  }

  fn execute_effect(&mut self, effect: Effect) {
    match effect {
      Effect::FetchComments {
        permalink,
        request_id,
        title,
      } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        let handle = self.handle.clone();

        handle.spawn(async move {
          let _ = sender.send(Event::Comments {
            request_id,
            result: client.fetch_comment_thread(&permalink, &title).await,
          });
        });
      }
      Effect::FetchPosts {
        after,
        request_id,
        sort,
        subreddit,
        tab_index,
      } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        let handle = self.handle.clone();

        handle.spawn(async move {
          let result = client
            .fetch_posts(&subreddit, sort, after.as_deref())
            .await
            .map(|(posts, after)| {
              let entries =
                posts.into_iter().map(PostEntry::from).collect::<Vec<_>>();

              (entries, after)
            });

          let _ = sender.send(Event::Posts {
            request_id,
            result,
            tab_index,
          });
        });
      }
      Effect::OpenUrl { url } => match webbrowser::open(&url) {
        Ok(()) => {
          self.state.set_transient_message(format!(
            "Opened in browser: {}",
            truncate(&url, 80)
          ));
        }
        Err(error) => {
          self
            .state
            .set_transient_message(format!("Could not open link: {error}"));
        }
      },
      Effect::Summarize { prompt, request_id } => {
        let (gemini, sender) = (self.gemini.clone(), self.event_tx.clone());

        let handle = self.handle.clone();

        handle.spawn(async move {
          let _ = sender.send(Event::Summary {
            request_id,
            result: gemini.complete(&prompt).await,
          });
        });
      }
      Effect::SummarizeSubreddit {
        limit,
        request_id,
        sort,
        subreddit,
      } => {
        let (client, gemini, sender) = (
          self.client.clone(),
          self.gemini.clone(),
          self.event_tx.clone(),
        );

        let handle = self.handle.clone();

        handle.spawn(async move {
          let result = Self::summarize_subreddit(
            &client, &gemini, &subreddit, sort, limit,
          )
          .await;

          let _ = sender.send(Event::Summary { request_id, result });
        });
      }
    }
  }

  pub(crate) fn new(
    client: Client,
    gemini: Gemini,
    settings: &Settings,
    tabs: Vec<PostList>,
  ) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let state = State::new(settings, tabs);

    Self {
      client,
      event_rx,
      event_tx,
      gemini,
      handle: Handle::current(),
      state,
    }
  }

  fn process_pending_events(&mut self) {
    self.state.update_transient_message();

    while let Ok(event) = self.event_rx.try_recv() {
      self.state.handle_event(event);
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        self.process_pending_events();
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        self.process_pending_events();
        continue;
      };

      if key.kind != KeyEventKind::Press {
        self.process_pending_events();
        continue;
      }

      let command = if self.state.help_is_visible() {
        HelpView::handle_key(key)
      } else if let Some(command) = self.state.input_command(key) {
        command
      } else if let Some(command) = self.state.summary_command(key) {
        command
      } else {
        let page = self.state.list_height().max(1);
        self.state.mode_mut().handle_key(key, page)
      };

      match self.state.dispatch_command(command) {
        Ok(dispatch) => {
          for effect in dispatch.effects {
            self.execute_effect(effect);
          }

          if dispatch.should_exit {
            break;
          }

          self.process_pending_events();
        }
        Err(error) => {
          self.state.clear_pending_effects();
          self.state.set_transient_message(format!("error: {error}"));
          self.process_pending_events();
        }
      }
    }

    Ok(())
  }

  /// The whole subreddit pipeline run off the UI thread: gather posts up
  /// to the configured limit, fetch every comment tree, then summarize the
  /// combined flattened text.
  async fn summarize_subreddit(
    client: &Client,
    gemini: &Gemini,
    subreddit: &str,
    sort: Sort,
    limit: usize,
  ) -> Result<String, Error> {
    let posts = client.fetch_posts_up_to(subreddit, sort, limit).await?;

    let comments = client.fetch_all_comments(&posts).await?;

    if comments.is_empty() {
      return Err(Error::Parse("no comments were found to summarize"));
    }

    info!(
      posts = posts.len(),
      comments = comments.len(),
      "summarizing subreddit"
    );

    gemini.complete(&overall_prompt(&comments)).await
  }
}
