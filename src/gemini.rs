use super::*;

/// Thin client for the generative-language API. One prompt in, one plain
/// text completion out; no retries, no streaming.
#[derive(Clone)]
pub(crate) struct Gemini {
  api_base: String,
  api_key: String,
  client: reqwest::Client,
  model: String,
}

impl Gemini {
  const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

  pub(crate) async fn complete(&self, prompt: &str) -> Result<String, Error> {
    if self.api_key.is_empty() {
      return Err(Error::Config("gemini api key is not configured"));
    }

    let url = format!(
      "{}/models/{}:generateContent?key={}",
      self.api_base, self.model, self.api_key
    );

    let body = serde_json::json!({
      "contents": [{ "parts": [{ "text": prompt }] }]
    });

    debug!(model = %self.model, prompt_chars = prompt.len(), "requesting completion");

    let response = self.client.post(url).json(&body).send().await?;

    let status = response.status();

    if !status.is_success() {
      let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|value| value["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| "server returned an error".to_string());

      return Err(Error::Api {
        message,
        status: status.as_u16(),
      });
    }

    let value = response
      .json::<Value>()
      .await
      .map_err(|_| Error::Parse("completion response is not valid json"))?;

    value["candidates"][0]["content"]["parts"][0]["text"]
      .as_str()
      .map(str::to_string)
      .ok_or(Error::Parse("no text candidate in completion response"))
  }

  pub(crate) fn new(api_key: String, model: String) -> Self {
    Self {
      api_base: Self::API_BASE_URL.to_string(),
      api_key,
      client: reqwest::Client::new(),
      model,
    }
  }

  #[cfg(test)]
  pub(crate) fn with_api_base(api_base: String, api_key: String, model: String) -> Self {
    Self {
      api_base,
      api_key,
      client: reqwest::Client::new(),
      model,
    }
  }
}
