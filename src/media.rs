use super::*;

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct GalleryData {
  pub(crate) items: Vec<GalleryItem>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct GalleryItem {
  pub(crate) media_id: String,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct MediaImage {
  pub(crate) u: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct MediaMetadata {
  pub(crate) s: Option<MediaImage>,
  pub(crate) status: String,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Preview {
  pub(crate) images: Vec<PreviewImage>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct PreviewImage {
  pub(crate) source: PreviewSource,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct PreviewSource {
  pub(crate) url: String,
}
