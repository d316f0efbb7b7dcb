use super::*;

/// One row of the post list: the display fields a listing entry reduces to.
#[derive(Clone, Debug)]
pub(crate) struct PostEntry {
  pub(crate) comment_count: u64,
  pub(crate) id: String,
  pub(crate) image_count: usize,
  pub(crate) image_url: Option<String>,
  pub(crate) permalink: String,
  pub(crate) snippet: Option<String>,
  pub(crate) title: String,
  pub(crate) upvotes: u64,
}

impl From<Post> for PostEntry {
  fn from(post: Post) -> Self {
    let image_count = post.all_image_urls().len();

    let image_url = post.best_image_url();

    let snippet = {
      let collapsed = post.selftext.split_whitespace().collect::<Vec<_>>().join(" ");

      if collapsed.is_empty() {
        None
      } else {
        Some(truncate(&collapsed, 120))
      }
    };

    Self {
      comment_count: post.num_comments,
      id: post.id,
      image_count,
      image_url,
      permalink: post.permalink,
      snippet,
      title: post.title,
      upvotes: post.ups,
    }
  }
}

impl PostEntry {
  pub(crate) fn detail(&self) -> String {
    let mut detail = format!(
      "{} • {} comments",
      format_upvotes(self.upvotes),
      self.comment_count
    );

    match self.image_count {
      0 => {}
      1 => detail.push_str(" • image"),
      count => {
        detail.push_str(&format!(" • {count} images"));
      }
    }

    detail
  }

  pub(crate) fn resolved_url(&self) -> String {
    format!("https://www.reddit.com{}", self.permalink)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_post() -> Post {
    serde_json::from_value(serde_json::json!({
      "id": "abc",
      "title": "A post",
      "selftext": "  some\n  body   text  ",
      "ups": 1,
      "num_comments": 4,
      "permalink": "/r/rust/comments/abc/a_post/",
      "thumbnail": "https://t/x.jpg",
    }))
    .expect("post fixture decodes")
  }

  #[test]
  fn from_post_collapses_the_selftext_snippet() {
    let entry = PostEntry::from(sample_post());

    assert_eq!(entry.snippet.as_deref(), Some("some body text"));
  }

  #[test]
  fn detail_reports_counts_and_image_presence() {
    let entry = PostEntry::from(sample_post());

    assert_eq!(entry.detail(), "1 upvote • 4 comments • image");
  }

  #[test]
  fn detail_counts_gallery_images() {
    let post: Post = serde_json::from_value(serde_json::json!({
      "id": "abc",
      "title": "A gallery",
      "ups": 2,
      "num_comments": 0,
      "permalink": "/r/pics/comments/abc/a_gallery/",
      "gallery_data": { "items": [{ "media_id": "m1" }, { "media_id": "m2" }] },
      "media_metadata": {
        "m1": { "status": "valid", "s": { "u": "https://g/1.jpg" } },
        "m2": { "status": "valid", "s": { "u": "https://g/2.jpg" } },
      },
    }))
    .expect("post fixture decodes");

    let entry = PostEntry::from(post);

    assert_eq!(entry.detail(), "2 upvotes • 0 comments • 2 images");
    assert_eq!(entry.image_url.as_deref(), Some("https://g/1.jpg"));
  }

  #[test]
  fn resolved_url_points_at_the_canonical_permalink() {
    let entry = PostEntry::from(sample_post());

    assert_eq!(
      entry.resolved_url(),
      "https://www.reddit.com/r/rust/comments/abc/a_post/"
    );
  }
}
