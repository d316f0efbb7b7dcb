use super::*;

#[derive(Debug, Deserialize)]
pub(crate) struct ListingData {
  pub(crate) after: Option<String>,
  pub(crate) children: Vec<PostWrapper>,
}

/// The `{data: {children: [...], after}}` envelope every listing endpoint
/// returns.
#[derive(Debug, Deserialize)]
pub(crate) struct ListingResponse {
  pub(crate) data: ListingData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostWrapper {
  pub(crate) data: Post,
}
