use super::*;

#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
  pub(crate) access_token: String,
}
