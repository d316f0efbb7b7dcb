use {
  anyhow::Context,
  app::App,
  auth_response::AuthResponse,
  client::Client,
  command::Command,
  command_dispatch::CommandDispatch,
  comment::{Comment, flatten_comments, parse_comments},
  comment_entry::CommentEntry,
  comment_thread::CommentThread,
  comment_view::CommentView,
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  effect::Effect,
  error::Error,
  event::Event,
  futures::future::join_all,
  gemini::Gemini,
  help_view::HelpView,
  input::{Input, InputPurpose},
  listing::ListingResponse,
  markdown::{extract_image_urls, extract_links, strip_image_urls},
  media::{GalleryData, MediaMetadata, Preview},
  mode::Mode,
  pending_comment::PendingComment,
  pending_summary::{PendingSummary, SummaryKind},
  post::Post,
  post_entry::PostEntry,
  post_list::PostList,
  prompt::{
    EXPORT_PREAMBLE, export_text, overall_prompt, question_prompt,
    summary_prompt,
  },
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap,
    },
  },
  serde::{Deserialize, Serialize},
  serde_json::Value,
  settings::Settings,
  sort::Sort,
  state::State,
  std::{
    backtrace::BacktraceStatus,
    collections::HashMap,
    env,
    ffi::OsStr,
    fs,
    io::{self, IsTerminal, Stdout},
    path::{Path, PathBuf},
    process,
    sync::OnceLock,
    time::{Duration, Instant},
  },
  summary_view::SummaryView,
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  tracing::{debug, info},
  tracing_appender::non_blocking::WorkerGuard,
  tracing_subscriber::EnvFilter,
  transient_message::TransientMessage,
  utils::{centered_rect, clean_url, format_upvotes, truncate, wrap_text},
};

mod app;
mod auth_response;
mod client;
mod command;
mod command_dispatch;
mod comment;
mod comment_entry;
mod comment_thread;
mod comment_view;
mod effect;
mod error;
mod event;
mod gemini;
mod help_view;
mod input;
mod listing;
mod markdown;
mod media;
mod mode;
mod pending_comment;
mod pending_summary;
mod post;
mod post_entry;
mod post_list;
mod prompt;
mod settings;
mod sort;
mod state;
mod summary_view;
mod transient_message;
mod utils;

const LIST_STATUS: &str = "↑/k up • ↓/j down • enter comments • s summarize • / subreddit • o open • i image • q quit • ? help";

const COMMENTS_STATUS: &str = "↑/k ↓/j move • ←/h →/l fold • s summarize • a ask • y export • o open • i image • esc back";

const SUMMARY_STATUS: &str = "↑/k ↓/j scroll • esc close";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help";

const LOADING_POSTS_STATUS: &str = "Loading more posts...";
const LOADING_COMMENTS_STATUS: &str = "Loading comments...";
const SUMMARIZING_STATUS: &str = "Summarizing...";

const BASE_INDENT: &str = " ";

const HELP_TEXT: &str = "\
Navigation:
  ← / h   previous tab
  → / l   next tab
  ↑ / k   move selection up
  ↓ / j   move selection down
  pg↓     page down
  pg↑     page up
  ctrl+d  page down
  ctrl+u  page up
  home    jump to first item
  end     jump to last item

Posts:
  enter   view comments for the selected post
  o       open the selected post in your browser
  i       open the selected post's image
  s       summarize comments across the subreddit
  /       switch subreddit (type to edit, enter to submit)
  scroll  keep going past the end to load more posts

Comments:
  ← / h   collapse or go to parent
  → / l   expand or go to first child
  enter   toggle collapse or expand
  o       open the selected comment's link
  i       open the selected comment's image
  s       summarize this thread
  a       ask a question about this thread
  y       export the thread to a text file
  esc     return to the post list

Summary:
  ↑ / k   scroll up
  ↓ / j   scroll down
  esc     close the summary

Everywhere:
  q       quit rdt
  ?       toggle this help
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn initialize_logging() -> Result {
  let path = Settings::log_path()?;

  let directory = path.parent().unwrap_or(Path::new("."));

  fs::create_dir_all(directory)?;

  let file_name = path
    .file_name()
    .unwrap_or_else(|| OsStr::new("rdt.log"))
    .to_owned();

  let appender = tracing_appender::rolling::never(directory, file_name);

  let (writer, guard) = tracing_appender::non_blocking(appender);

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    )
    .with_writer(writer)
    .with_ansi(false)
    .init();

  let _ = LOG_GUARD.set(guard);

  Ok(())
}

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  let settings = Settings::load().context("could not load settings")?;

  initialize_logging()?;

  let mut client = Client::new(&settings);

  client
    .authenticate(&settings)
    .await
    .context("could not authenticate with reddit")?;

  let gemini = Gemini::new(
    settings.gemini_api_key.clone(),
    settings.gemini_model.clone(),
  );

  let tabs = client
    .load_tabs(&settings.subreddit)
    .await
    .with_context(|| format!("could not load r/{}", settings.subreddit))?;

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(client, gemini, &settings, tabs);

  app.run(&mut terminal)?;

  restore_terminal(&mut terminal)
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
