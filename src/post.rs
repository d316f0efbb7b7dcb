use super::*;

/// One listing entry as Reddit returns it. Field names track the wire
/// format; anything the API may omit is optional or defaulted.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Post {
  pub(crate) gallery_data: Option<GalleryData>,
  pub(crate) id: String,
  pub(crate) media_metadata: Option<HashMap<String, MediaMetadata>>,
  #[serde(default)]
  pub(crate) num_comments: u64,
  pub(crate) permalink: String,
  pub(crate) preview: Option<Preview>,
  #[serde(default)]
  pub(crate) selftext: String,
  pub(crate) stickied: Option<bool>,
  pub(crate) thumbnail: Option<String>,
  pub(crate) title: String,
  #[serde(default)]
  pub(crate) ups: u64,
  pub(crate) url: Option<String>,
}

impl Post {
  const DIRECT_IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

  const THUMBNAIL_SENTINELS: [&str; 3] = ["self", "default", "nsfw"];

  /// Every image URL the post carries, for carousel-style display: the
  /// preview source, all valid gallery items, and the direct URL, with the
  /// thumbnail used only when nothing else matched.
  pub(crate) fn all_image_urls(&self) -> Vec<String> {
    let mut urls = Vec::new();

    if let Some(url) = self.preview_image_url() {
      urls.push(url);
    }

    urls.extend(self.gallery_image_urls());

    if let Some(url) = self.direct_image_url() {
      urls.push(url);
    }

    if urls.is_empty()
      && let Some(url) = self.thumbnail_url()
    {
      urls.push(url);
    }

    urls
  }

  /// A single representative image, resolved through a fallback chain:
  /// preview source, first valid gallery item, direct image URL, then the
  /// thumbnail unless it is a sentinel value.
  pub(crate) fn best_image_url(&self) -> Option<String> {
    self
      .preview_image_url()
      .or_else(|| self.gallery_image_urls().into_iter().next())
      .or_else(|| self.direct_image_url())
      .or_else(|| self.thumbnail_url())
  }

  fn direct_image_url(&self) -> Option<String> {
    let lowered = self.url.as_deref()?.to_lowercase();

    Self::DIRECT_IMAGE_EXTENSIONS
      .iter()
      .any(|extension| lowered.ends_with(extension))
      .then(|| clean_url(&lowered))
  }

  fn gallery_image_urls(&self) -> Vec<String> {
    let (Some(gallery), Some(media)) = (&self.gallery_data, &self.media_metadata)
    else {
      return Vec::new();
    };

    gallery
      .items
      .iter()
      .filter_map(|item| {
        let metadata = media.get(&item.media_id)?;

        if metadata.status != "valid" {
          return None;
        }

        metadata
          .s
          .as_ref()
          .and_then(|image| image.u.as_deref())
          .map(clean_url)
      })
      .collect()
  }

  fn preview_image_url(&self) -> Option<String> {
    let image = self.preview.as_ref()?.images.first()?;

    let url = clean_url(&image.source.url);

    (!url.is_empty()).then_some(url)
  }

  fn thumbnail_url(&self) -> Option<String> {
    let thumbnail = self.thumbnail.as_deref()?;

    if thumbnail.is_empty() || Self::THUMBNAIL_SENTINELS.contains(&thumbnail) {
      return None;
    }

    Some(thumbnail.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn post_from(value: Value) -> Post {
    serde_json::from_value(value).expect("post fixture decodes")
  }

  fn base() -> Value {
    serde_json::json!({
      "id": "abc",
      "title": "A post",
      "selftext": "",
      "ups": 10,
      "num_comments": 3,
      "permalink": "/r/rust/comments/abc/a_post/",
    })
  }

  #[test]
  fn best_image_prefers_the_preview_source() {
    let mut value = base();
    value["preview"] = serde_json::json!({
      "images": [{ "source": { "url": "https://p/x.jpg?a=1&amp;b=2" } }]
    });
    value["thumbnail"] = serde_json::json!("https://t/x.jpg");

    assert_eq!(
      post_from(value).best_image_url(),
      Some("https://p/x.jpg?a=1&b=2".to_string())
    );
  }

  #[test]
  fn best_image_falls_back_to_the_first_valid_gallery_item() {
    let mut value = base();
    value["gallery_data"] =
      serde_json::json!({ "items": [{ "media_id": "m1" }, { "media_id": "m2" }] });
    value["media_metadata"] = serde_json::json!({
      "m1": { "status": "failed" },
      "m2": { "status": "valid", "s": { "u": "https://g/2.jpg" } },
    });

    assert_eq!(
      post_from(value).best_image_url(),
      Some("https://g/2.jpg".to_string())
    );
  }

  #[test]
  fn best_image_accepts_a_direct_image_url() {
    let mut value = base();
    value["url"] = serde_json::json!("https://i.redd.it/Photo.PNG");

    assert_eq!(
      post_from(value).best_image_url(),
      Some("https://i.redd.it/photo.png".to_string())
    );
  }

  #[test]
  fn best_image_ignores_non_image_direct_urls() {
    let mut value = base();
    value["url"] = serde_json::json!("https://example.com/article");

    assert_eq!(post_from(value).best_image_url(), None);
  }

  #[test]
  fn best_image_skips_sentinel_thumbnails() {
    for sentinel in ["self", "default", "nsfw", ""] {
      let mut value = base();
      value["thumbnail"] = serde_json::json!(sentinel);

      assert_eq!(post_from(value).best_image_url(), None, "{sentinel:?}");
    }

    let mut value = base();
    value["thumbnail"] = serde_json::json!("https://t/x.jpg");

    assert_eq!(
      post_from(value).best_image_url(),
      Some("https://t/x.jpg".to_string())
    );
  }

  #[test]
  fn all_image_urls_accumulates_every_source() {
    let mut value = base();
    value["preview"] = serde_json::json!({
      "images": [{ "source": { "url": "https://p/x.jpg" } }]
    });
    value["gallery_data"] = serde_json::json!({ "items": [{ "media_id": "m1" }] });
    value["media_metadata"] = serde_json::json!({
      "m1": { "status": "valid", "s": { "u": "https://g/1.jpg" } },
    });
    value["url"] = serde_json::json!("https://i.redd.it/direct.gif");
    value["thumbnail"] = serde_json::json!("https://t/x.jpg");

    assert_eq!(
      post_from(value).all_image_urls(),
      vec![
        "https://p/x.jpg".to_string(),
        "https://g/1.jpg".to_string(),
        "https://i.redd.it/direct.gif".to_string(),
      ]
    );
  }

  #[test]
  fn all_image_urls_uses_the_thumbnail_only_as_a_last_resort() {
    let mut value = base();
    value["thumbnail"] = serde_json::json!("https://t/x.jpg");

    assert_eq!(
      post_from(value).all_image_urls(),
      vec!["https://t/x.jpg".to_string()]
    );
  }
}
