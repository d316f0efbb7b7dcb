use {once_cell::sync::Lazy, regex::Regex};

const IMAGE_EXTENSIONS: [&str; 7] =
  ["jpg", "jpeg", "gif", "png", "webp", "bmp", "tiff"];

static IMAGE_URL: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"(?i)(?:!\[[^\]]*\]\()?(https?://[^\s)]+?\.(?:jpg|jpeg|gif|png|webp|bmp|tiff)(?:\?[^\s)]+)?)\)?",
  )
  .expect("image url pattern is valid")
});

static LINK: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid"));

static MALFORMED_LINK: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\]\s*\(").expect("malformed link pattern is valid"));

/// Returns every image URL embedded in a comment body, in order of
/// appearance, with `&amp;` decoded back to `&`. Matches both bare URLs and
/// Markdown image syntax.
pub(crate) fn extract_image_urls(body: &str) -> Vec<String> {
  IMAGE_URL
    .captures_iter(body)
    .filter_map(|captures| captures.get(1))
    .map(|url| url.as_str().replace("&amp;", "&"))
    .collect()
}

/// Returns `[text](url)` pairs in order of appearance. Links whose path
/// extension is an image extension are images, not links, and are skipped.
pub(crate) fn extract_links(body: &str) -> Vec<(String, String)> {
  LINK
    .captures_iter(body)
    .filter_map(|captures| {
      let text = captures.get(1)?.as_str().to_string();
      let url = captures.get(2)?.as_str().to_string();

      if is_image_url(&url) {
        None
      } else {
        Some((text, url))
      }
    })
    .collect()
}

fn is_image_url(url: &str) -> bool {
  path_extension(url)
    .is_some_and(|extension| IMAGE_EXTENSIONS.contains(&extension.as_str()))
}

fn path_extension(url: &str) -> Option<String> {
  let path = url.split(['?', '#']).next().unwrap_or(url);
  let segment = path.rsplit('/').next().unwrap_or(path);
  let (_, extension) = segment.rsplit_once('.')?;

  if extension.is_empty() {
    None
  } else {
    Some(extension.to_lowercase())
  }
}

/// Removes each discovered image URL from the body: its Markdown-image form,
/// its bare form, and its entity-encoded form. Markdown link syntax broken
/// by the removal (`] (`) is repaired and the result is trimmed.
pub(crate) fn strip_image_urls(body: &str, urls: &[String]) -> String {
  let mut text = body.to_string();

  for url in urls {
    let image_pattern = format!(r"!\[[^\]]*\]\({}\)", regex::escape(url));

    if let Ok(image) = Regex::new(&image_pattern) {
      text = image.replace_all(&text, "").into_owned();
    }

    text = text.replace(url.as_str(), "");
    text = text.replace(&url.replace('&', "&amp;"), "");
  }

  MALFORMED_LINK.replace_all(&text, "](").trim().to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extract_image_urls_finds_markdown_images() {
    let body = "look at this ![alt](https://x/y.png) picture";

    assert_eq!(extract_image_urls(body), vec!["https://x/y.png".to_string()]);
  }

  #[test]
  fn extract_image_urls_finds_bare_urls_with_queries() {
    let body = "https://i.redd.it/abc.jpeg?width=640&amp;s=ok trailing";

    assert_eq!(
      extract_image_urls(body),
      vec!["https://i.redd.it/abc.jpeg?width=640&s=ok".to_string()]
    );
  }

  #[test]
  fn extract_image_urls_preserves_order_of_appearance() {
    let body = "![a](https://x/1.gif) then https://x/2.webp done";

    assert_eq!(
      extract_image_urls(body),
      vec!["https://x/1.gif".to_string(), "https://x/2.webp".to_string()]
    );
  }

  #[test]
  fn extract_image_urls_returns_empty_without_matches() {
    assert!(extract_image_urls("no images here").is_empty());
  }

  #[test]
  fn extract_links_finds_markdown_links() {
    let body = "see [the docs](https://example.com/docs) for details";

    assert_eq!(
      extract_links(body),
      vec![("the docs".to_string(), "https://example.com/docs".to_string())]
    );
  }

  #[test]
  fn extract_links_excludes_image_links() {
    let body = "[a photo](https://x/y.png) and [a page](https://x/y.html)";

    assert_eq!(
      extract_links(body),
      vec![("a page".to_string(), "https://x/y.html".to_string())]
    );
  }

  #[test]
  fn extract_links_ignores_query_strings_when_checking_extensions() {
    let body = "[img](https://x/y.jpg?width=3) [page](https://x/y.php?ext=.jpg)";

    assert_eq!(
      extract_links(body),
      vec![("page".to_string(), "https://x/y.php?ext=.jpg".to_string())]
    );
  }

  #[test]
  fn strip_image_urls_removes_markdown_image_occurrences() {
    let body = "before ![alt](https://x/y.png) after";
    let urls = extract_image_urls(body);

    assert_eq!(strip_image_urls(body, &urls), "before  after");
  }

  #[test]
  fn strip_image_urls_removes_bare_and_encoded_occurrences() {
    let body = "a https://x/y.jpg?s=1&t=2 b https://x/y.jpg?s=1&amp;t=2 c";
    let urls = vec!["https://x/y.jpg?s=1&t=2".to_string()];

    assert_eq!(strip_image_urls(body, &urls), "a  b  c");
  }

  #[test]
  fn strip_image_urls_repairs_broken_link_syntax() {
    let body = "a [text] (https://example.com) b";

    assert_eq!(
      strip_image_urls(body, &[]),
      "a [text](https://example.com) b"
    );
  }

  #[test]
  fn strip_image_urls_trims_and_returns_input_unchanged_without_urls() {
    assert_eq!(strip_image_urls("  plain text  ", &[]), "plain text");
  }
}
