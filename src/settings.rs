use super::*;

/// Everything `rdt` reads from its config file: Gemini credentials, Reddit
/// script-app credentials, and the browsing defaults. Loaded once at
/// startup; written only by an explicit save.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub(crate) struct Settings {
  pub(crate) gemini_api_key: String,
  pub(crate) gemini_model: String,
  pub(crate) post_limit: usize,
  pub(crate) reddit_client_id: String,
  pub(crate) reddit_client_secret: String,
  pub(crate) reddit_password: String,
  pub(crate) reddit_username: String,
  pub(crate) subreddit: String,
  pub(crate) user_agent: String,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      gemini_api_key: String::new(),
      gemini_model: "gemini-1.5-flash-latest".to_string(),
      post_limit: 50,
      reddit_client_id: String::new(),
      reddit_client_secret: String::new(),
      reddit_password: String::new(),
      reddit_username: String::new(),
      subreddit: "rust".to_string(),
      user_agent: "rdt (terminal subreddit summarizer)".to_string(),
    }
  }
}

impl Settings {
  fn ensure_parent_dir(path: &Path) -> Result {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }

    Ok(())
  }

  /// Reads the settings file, creating it with defaults on first run so
  /// there is a template to fill in.
  pub(crate) fn load() -> Result<Self> {
    let path = Self::settings_path()?;

    if !path.exists() {
      let settings = Self::default();
      settings.save()?;
      return Ok(settings);
    }

    let data = fs::read(&path)?;

    if data.is_empty() {
      return Ok(Self::default());
    }

    Ok(serde_json::from_slice(&data)?)
  }

  pub(crate) fn log_path() -> Result<PathBuf> {
    let settings_path = Self::settings_path()?;

    let directory = settings_path
      .parent()
      .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    Ok(directory.join("rdt.log"))
  }

  pub(crate) fn save(&self) -> Result {
    let path = Self::settings_path()?;

    Self::ensure_parent_dir(&path)?;

    let serialized = serde_json::to_vec_pretty(self)?;

    fs::write(&path, serialized)?;

    Ok(())
  }

  fn settings_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("RDT_CONFIG_FILE") {
      return Ok(PathBuf::from(path));
    }

    let base_dir = if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
      PathBuf::from(dir)
    } else if let Ok(home) = env::var("HOME") {
      PathBuf::from(home).join(".config")
    } else {
      env::current_dir()?.join(".config")
    };

    Ok(base_dir.join("rdt").join("config.json"))
  }
}
