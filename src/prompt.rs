use super::*;

// The second line keeps its eight-space indent; the export text has always
// shipped that way.
pub(crate) const EXPORT_PREAMBLE: &str = "You are the best content writer in the world! These are a Reddit post's comments.\n        Summarise the key themes and main points. Identify the top points or themes discussed in the comments, with examples for each. Include a brief overview of any major differing viewpoints if present.";

pub(crate) fn export_text(comments: &[Comment]) -> String {
  format!("{EXPORT_PREAMBLE}\n\n{}", flattened(comments))
}

/// The flattened comment forest as one text blob, entries separated by a
/// blank line. This is the payload every prompt below embeds.
pub(crate) fn flattened(comments: &[Comment]) -> String {
  flatten_comments(comments, 0).join("\n\n")
}

pub(crate) fn overall_prompt(comments: &[Comment]) -> String {
  format!(
    "Provide a detailed summary of the following Reddit comments from multiple posts within this subreddit. Identify and explain the primary topics and discussions being addressed. Highlight key themes, recurring viewpoints, and any significant patterns or trends present in the conversations. Ensure the summary is clear, well-structured:\n\n{}",
    flattened(comments)
  )
}

pub(crate) fn question_prompt(comments: &[Comment], question: &str) -> String {
  format!(
    "Let's consider these Reddit comments:\n\n{}\n\nNow, answer the question: {question}",
    flattened(comments)
  )
}

pub(crate) fn summary_prompt(comments: &[Comment]) -> String {
  format!(
    "Summarize the following Reddit comments, summarizing key themes and main points, with examples. Provide a final summary of overall comments:\n{}",
    flattened(comments)
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  fn comment(raw: &str, children: Vec<Comment>) -> Comment {
    Comment {
      children,
      id: "x".to_string(),
      image_urls: Vec::new(),
      links: Vec::new(),
      processed_text: raw.to_string(),
      raw_text: raw.to_string(),
    }
  }

  #[test]
  fn flattened_joins_entries_with_blank_lines() {
    let comments = vec![comment("A", vec![comment("B", Vec::new())])];

    assert_eq!(flattened(&comments), "- A\n\n    - B");
  }

  #[test]
  fn question_prompt_appends_the_question() {
    let comments = vec![comment("A", Vec::new())];

    let prompt = question_prompt(&comments, "what is going on?");

    assert!(prompt.contains("- A"));
    assert!(prompt.ends_with("Now, answer the question: what is going on?"));
  }

  #[test]
  fn export_text_prepends_the_preamble() {
    let comments = vec![comment("A", Vec::new())];

    let text = export_text(&comments);

    assert!(text.starts_with(EXPORT_PREAMBLE));
    assert!(text.ends_with("- A"));
  }

  #[test]
  fn export_preamble_indents_its_second_line() {
    let second = EXPORT_PREAMBLE.lines().nth(1).expect("two lines");

    assert!(second.starts_with("        Summarise"));
  }
}
