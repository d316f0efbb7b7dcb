use super::*;

/// One comment in a post's reply tree. Built once per fetch and never
/// mutated; children own their subtrees exclusively.
#[derive(Clone, Debug)]
pub(crate) struct Comment {
  pub(crate) children: Vec<Comment>,
  pub(crate) id: String,
  pub(crate) image_urls: Vec<String>,
  pub(crate) links: Vec<(String, String)>,
  pub(crate) processed_text: String,
  pub(crate) raw_text: String,
}

/// Depth-first rendering of a comment forest, one line per comment,
/// indented four spaces per level. Uses the raw body so image URLs stay
/// visible in prompts and exports.
pub(crate) fn flatten_comments(comments: &[Comment], depth: usize) -> Vec<String> {
  let indent = "    ".repeat(depth);

  let mut lines = Vec::new();

  for comment in comments {
    lines.push(format!("{indent}- {}", comment.raw_text));
    lines.extend(flatten_comments(&comment.children, depth + 1));
  }

  lines
}

fn parse_comment(wrapper: &Value) -> Option<Comment> {
  // Only `t1` wrappers are comments; "load more" placeholders and other
  // kinds are skipped, as are partial records missing an id or body.
  if wrapper.get("kind").and_then(Value::as_str) != Some("t1") {
    return None;
  }

  let data = wrapper.get("data")?;

  let id = data.get("id").and_then(Value::as_str)?.to_string();

  let body = data.get("body").and_then(Value::as_str)?.to_string();

  let children = data
    .get("replies")
    .and_then(|replies| replies.get("data"))
    .and_then(|data| data.get("children"))
    .and_then(Value::as_array)
    .map(|children| parse_comments(children))
    .unwrap_or_default();

  let image_urls = extract_image_urls(&body);
  let links = extract_links(&body);
  let processed_text = strip_image_urls(&body, &image_urls);

  Some(Comment {
    children,
    id,
    image_urls,
    links,
    processed_text,
    raw_text: body,
  })
}

/// Parses a wrapper array into a comment forest, preserving sibling order
/// at every level. Wrappers that are not comments are dropped silently.
pub(crate) fn parse_comments(children: &[Value]) -> Vec<Comment> {
  children.iter().filter_map(parse_comment).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn wrapper(kind: &str, id: &str, body: &str, replies: Value) -> Value {
    let mut data = serde_json::json!({ "id": id, "body": body });

    if !replies.is_null() {
      data["replies"] = serde_json::json!({ "data": { "children": replies } });
    }

    serde_json::json!({ "kind": kind, "data": data })
  }

  #[test]
  fn parse_comments_skips_non_comment_wrappers() {
    let children = vec![
      wrapper("t1", "a", "first", Value::Null),
      serde_json::json!({ "kind": "more", "data": { "count": 12 } }),
      wrapper("t1", "b", "second", Value::Null),
    ];

    let comments = parse_comments(&children);

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].id, "a");
    assert_eq!(comments[1].id, "b");
  }

  #[test]
  fn parse_comments_drops_wrappers_missing_a_body() {
    let children = vec![
      serde_json::json!({ "kind": "t1", "data": { "id": "a" } }),
      wrapper("t1", "b", "kept", Value::Null),
    ];

    let comments = parse_comments(&children);

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].id, "b");
  }

  #[test]
  fn parse_comments_recurses_into_replies_in_source_order() {
    let replies = serde_json::json!([
      wrapper("t1", "child1", "one", Value::Null),
      wrapper("t1", "child2", "two", Value::Null),
    ]);

    let children = vec![wrapper("t1", "root", "top", replies)];

    let comments = parse_comments(&children);

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].children.len(), 2);
    assert_eq!(comments[0].children[0].id, "child1");
    assert_eq!(comments[0].children[1].id, "child2");
  }

  #[test]
  fn parse_comments_extracts_images_and_links_per_node() {
    let body = "see ![pic](https://x/y.png) and [docs](https://x/d.html)";
    let children = vec![wrapper("t1", "a", body, Value::Null)];

    let comments = parse_comments(&children);

    assert_eq!(comments[0].image_urls, vec!["https://x/y.png".to_string()]);

    assert_eq!(
      comments[0].links,
      vec![("docs".to_string(), "https://x/d.html".to_string())]
    );

    assert_eq!(comments[0].raw_text, body);
    assert_eq!(comments[0].processed_text, "see  and [docs](https://x/d.html)");
  }

  #[test]
  fn flatten_comments_indents_by_depth() {
    let leaf = Comment {
      children: Vec::new(),
      id: "c".to_string(),
      image_urls: Vec::new(),
      links: Vec::new(),
      processed_text: "C".to_string(),
      raw_text: "C".to_string(),
    };

    let middle = Comment {
      children: vec![leaf],
      id: "b".to_string(),
      image_urls: Vec::new(),
      links: Vec::new(),
      processed_text: "B".to_string(),
      raw_text: "B".to_string(),
    };

    let root = Comment {
      children: vec![middle],
      id: "a".to_string(),
      image_urls: Vec::new(),
      links: Vec::new(),
      processed_text: "A".to_string(),
      raw_text: "A".to_string(),
    };

    assert_eq!(
      flatten_comments(&[root], 0),
      vec![
        "- A".to_string(),
        "    - B".to_string(),
        "        - C".to_string(),
      ]
    );
  }
}
