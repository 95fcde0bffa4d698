//! Asset location configuration for the selector components.
//!
//! The original components hardcoded their asset hosts; here the bases are
//! explicit configuration, since where images live is the embedding
//! application's concern.

/// Base locations for selector image assets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorAssets {
    flags_base_uri: String,
}

impl SelectorAssets {
    /// `flags_base_uri` should point at a directory of lowercase
    /// `<code>.png` flag images; a trailing slash is tolerated.
    pub fn new(flags_base_uri: impl Into<String>) -> Self {
        let mut base = flags_base_uri.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { flags_base_uri: base }
    }

    /// Flag image URI for an ISO 3166-1 alpha-2 code.
    pub fn flag_uri(&self, country_code: &str) -> String {
        format!("{}/{}.png", self.flags_base_uri, country_code.to_lowercase())
    }
}
