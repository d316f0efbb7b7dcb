use super::*;

/// Reddit API client. Listings go through the OAuth host with the bearer
/// token from `authenticate`; comment fetches use the public `.json`
/// endpoints and need no token.
#[derive(Clone)]
pub(crate) struct Client {
  api_base: String,
  client: reqwest::Client,
  oauth_base: String,
  token: Option<String>,
  user_agent: String,
}

impl Client {
  const API_BASE_URL: &str = "https://www.reddit.com";

  const COMMENT_FETCH_DELAY: Duration = Duration::from_millis(500);

  const OAUTH_BASE_URL: &str = "https://oauth.reddit.com";

  const PAGE_SIZE: usize = 25;

  /// OAuth2 password grant. Fails with a configuration error before any
  /// network call when the script-app credentials are absent.
  pub(crate) async fn authenticate(&mut self, settings: &Settings) -> Result<(), Error> {
    if settings.reddit_client_id.is_empty() || settings.reddit_username.is_empty() {
      return Err(Error::Config("reddit credentials are not configured"));
    }

    let response = self
      .client
      .post(format!("{}/api/v1/access_token", self.api_base))
      .basic_auth(
        &settings.reddit_client_id,
        Some(&settings.reddit_client_secret),
      )
      .header(reqwest::header::USER_AGENT, &self.user_agent)
      .form(&[
        ("grant_type", "password"),
        ("username", settings.reddit_username.as_str()),
        ("password", settings.reddit_password.as_str()),
      ])
      .send()
      .await?;

    let status = response.status();

    if !status.is_success() {
      return Err(Error::Api {
        message: "authentication was rejected".to_string(),
        status: status.as_u16(),
      });
    }

    let auth = response
      .json::<AuthResponse>()
      .await
      .map_err(|_| Error::Parse("auth response is missing an access token"))?;

    self.token = Some(auth.access_token);

    info!("authenticated with reddit");

    Ok(())
  }

  /// Fetches every post's comment tree in order, pausing 500 ms between
  /// posts as an informal rate limit. Strictly sequential by design.
  pub(crate) async fn fetch_all_comments(
    &self,
    posts: &[Post],
  ) -> Result<Vec<Comment>, Error> {
    let mut combined = Vec::new();

    for (index, post) in posts.iter().enumerate() {
      debug!(post = index + 1, total = posts.len(), "fetching comment tree");

      let thread = self.fetch_comment_thread(&post.permalink, &post.title).await?;

      combined.extend(thread.roots);

      if index + 1 < posts.len() {
        tokio::time::sleep(Self::COMMENT_FETCH_DELAY).await;
      }
    }

    Ok(combined)
  }

  pub(crate) async fn fetch_comment_thread(
    &self,
    permalink: &str,
    title: &str,
  ) -> Result<CommentThread, Error> {
    let response = self
      .client
      .get(format!("{}{permalink}.json", self.api_base))
      .header(reqwest::header::USER_AGENT, &self.user_agent)
      .send()
      .await?;

    let status = response.status();

    if !status.is_success() {
      return Err(Error::Api {
        message: "could not fetch comments".to_string(),
        status: status.as_u16(),
      });
    }

    let value = response
      .json::<Value>()
      .await
      .map_err(|_| Error::Parse("comment response is not valid json"))?;

    // The endpoint returns [post listing, comment listing]; anything that
    // does not match that shape degrades to an empty tree.
    let roots = value
      .get(1)
      .and_then(|listing| listing.get("data"))
      .and_then(|data| data.get("children"))
      .and_then(Value::as_array)
      .map(|children| parse_comments(children))
      .unwrap_or_default();

    Ok(CommentThread {
      permalink: permalink.to_string(),
      roots,
      title: title.to_string(),
    })
  }

  /// One listing page: up to 25 posts after the given cursor, stickied
  /// entries filtered out, plus the continuation cursor for the next page.
  pub(crate) async fn fetch_posts(
    &self,
    subreddit: &str,
    sort: Sort,
    after: Option<&str>,
  ) -> Result<(Vec<Post>, Option<String>), Error> {
    let token = self
      .token
      .as_deref()
      .ok_or(Error::Config("reddit access token is not available"))?;

    let mut request = self
      .client
      .get(format!("{}/r/{subreddit}/{}", self.oauth_base, sort.path))
      .query(&[("limit", Self::PAGE_SIZE.to_string())])
      .bearer_auth(token)
      .header(reqwest::header::USER_AGENT, &self.user_agent);

    if let Some(after) = after {
      request = request.query(&[("after", after)]);
    }

    let response = request.send().await?;

    let status = response.status();

    if !status.is_success() {
      return Err(Error::Api {
        message: format!("could not fetch r/{subreddit}/{}", sort.path),
        status: status.as_u16(),
      });
    }

    let listing = response
      .json::<ListingResponse>()
      .await
      .map_err(|_| Error::Parse("listing response did not match the expected shape"))?;

    let posts = listing
      .data
      .children
      .into_iter()
      .map(|wrapper| wrapper.data)
      .filter(|post| post.stickied != Some(true))
      .collect();

    let after = listing.data.after.filter(|cursor| !cursor.is_empty());

    Ok((posts, after))
  }

  /// Follows the cursor chain one page at a time until `limit` posts have
  /// accumulated or the listing ends, then truncates to exactly `limit`.
  /// A cursor identical to the previous one ends the chain instead of
  /// being followed again.
  pub(crate) async fn fetch_posts_up_to(
    &self,
    subreddit: &str,
    sort: Sort,
    limit: usize,
  ) -> Result<Vec<Post>, Error> {
    let mut fetched = Vec::new();

    let mut cursor: Option<String> = None;

    while fetched.len() < limit {
      let (page, after) = self.fetch_posts(subreddit, sort, cursor.as_deref()).await?;

      let page_was_empty = page.is_empty();

      fetched.extend(page);

      if let Some(next) = after
        && !page_was_empty
        && cursor.as_deref() != Some(next.as_str())
      {
        cursor = Some(next);
      } else {
        break;
      }
    }

    fetched.truncate(limit);

    Ok(fetched)
  }

  /// Loads the first page for every sort tab concurrently.
  pub(crate) async fn load_tabs(&self, subreddit: &str) -> Result<Vec<PostList>, Error> {
    let tasks = Sort::all().iter().map(|sort| {
      let client = self.clone();

      let sort = *sort;

      let subreddit = subreddit.to_string();

      async move {
        let (posts, after) = client.fetch_posts(&subreddit, sort, None).await?;

        let entries = posts.into_iter().map(PostEntry::from).collect();

        Ok::<_, Error>(PostList::new(entries, after))
      }
    });

    join_all(tasks).await.into_iter().collect()
  }

  pub(crate) fn new(settings: &Settings) -> Self {
    Self {
      api_base: Self::API_BASE_URL.to_string(),
      client: reqwest::Client::new(),
      oauth_base: Self::OAUTH_BASE_URL.to_string(),
      token: None,
      user_agent: settings.user_agent.clone(),
    }
  }

  #[cfg(test)]
  pub(crate) fn with_bases(api_base: String, oauth_base: String, token: Option<String>) -> Self {
    Self {
      api_base,
      client: reqwest::Client::new(),
      oauth_base,
      token,
      user_agent: "rdt tests".to_string(),
    }
  }
}
