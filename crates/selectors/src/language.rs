//! Language catalog and switcher component.
//!
//! Two document shapes feed the catalog: a native-languages document
//! (endonyms with an explicit flag country) and a localized document
//! (locale tags translated into the viewer's language). Localized entries
//! normalize their tag and derive the flag country from it; entries without
//! a derivable region are dropped.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use typeahead_engine::{ItemFetcher, PipelineHandle, SearchPipeline};
use typeahead_types::{ConfigError, PipelineConfig};
use typeahead_util::{is_blank, is_country_iso, normalize_locale, strip_accents};

use crate::assets::SelectorAssets;

/// A selectable language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Normalized locale tag, e.g. `pt-BR`.
    pub locale: String,
    /// Endonym, present for native catalogs.
    pub native_name: Option<String>,
    /// Name translated into the viewer's language, present for localized
    /// catalogs.
    pub localized_name: Option<String>,
    /// ISO 3166-1 alpha-2 region used for the flag.
    pub country_code: String,
    /// URI of the flag image asset.
    pub flag_uri: String,
}

/// One entry of a native-languages document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeLanguageRecord {
    /// Locale tag.
    pub language: String,
    /// Endonym, e.g. `Português`.
    pub native_name: String,
    /// Region whose flag represents the language.
    pub country_code: String,
}

/// One entry of a localized-locales document.
#[derive(Debug, Deserialize)]
pub struct LocalizedLanguageRecord {
    /// Raw locale tag, possibly underscore-separated.
    pub code: String,
    /// Locale name translated into the viewer's language.
    pub locale: String,
}

/// Which document shape a catalog was built from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LanguageVariant {
    /// Endonyms from a native-languages document.
    #[default]
    Native,
    /// Translated names from a localized document.
    Localized,
}

/// Options governing catalog construction.
pub struct LanguageOptions {
    /// Asset bases for flag URIs.
    pub assets: SelectorAssets,
    /// When provided, only these locales are kept.
    pub supported_locales: Option<Vec<String>>,
}

impl LanguageOptions {
    /// Options with defaults: every locale in the document is kept.
    pub fn new(assets: SelectorAssets) -> Self {
        Self {
            assets,
            supported_locales: None,
        }
    }

    /// Restricts the catalog to the given locales.
    pub fn supported_locales(mut self, locales: Vec<String>) -> Self {
        self.supported_locales = Some(locales);
        self
    }
}

/// In-memory language catalog; doubles as the pipeline's item fetcher.
#[derive(Clone)]
pub struct LanguageCatalog {
    languages: Arc<[Language]>,
    variant: LanguageVariant,
}

impl LanguageCatalog {
    /// Parses a native-languages document (a JSON array of
    /// `{ "language": "pt", "nativeName": "Português", "countryCode": "BR" }`
    /// entries).
    pub fn from_native_json(document: &str, options: &LanguageOptions) -> Result<Self> {
        let records: Vec<NativeLanguageRecord> = serde_json::from_str(document)?;
        Ok(Self::from_native_records(records, options))
    }

    /// Parses a localized document (a JSON array of
    /// `{ "code": "pt_BR", "locale": "Portuguese (Brazil)" }` entries).
    pub fn from_localized_json(document: &str, options: &LanguageOptions) -> Result<Self> {
        let records: Vec<LocalizedLanguageRecord> = serde_json::from_str(document)?;
        Ok(Self::from_localized_records(records, options))
    }

    /// Builds a native catalog from already-parsed records.
    pub fn from_native_records(
        records: Vec<NativeLanguageRecord>,
        options: &LanguageOptions,
    ) -> Self {
        let languages: Vec<Language> = records
            .into_iter()
            .map(|record| Language {
                flag_uri: options.assets.flag_uri(&record.country_code),
                locale: record.language,
                native_name: Some(record.native_name),
                localized_name: None,
                country_code: record.country_code,
            })
            .collect();
        Self::build(languages, LanguageVariant::Native, options)
    }

    /// Builds a localized catalog from already-parsed records. Entries whose
    /// tag yields no valid ISO region are dropped, since they have no flag.
    pub fn from_localized_records(
        records: Vec<LocalizedLanguageRecord>,
        options: &LanguageOptions,
    ) -> Self {
        let languages: Vec<Language> = records
            .into_iter()
            .filter_map(|record| {
                let locale = normalize_locale(&record.code);
                let country_code = locale.split('-').nth(1)?.to_string();
                if !is_country_iso(&country_code) {
                    return None;
                }
                Some(Language {
                    flag_uri: options.assets.flag_uri(&country_code),
                    locale,
                    native_name: None,
                    localized_name: Some(record.locale),
                    country_code,
                })
            })
            .collect();
        Self::build(languages, LanguageVariant::Localized, options)
    }

    fn build(languages: Vec<Language>, variant: LanguageVariant, options: &LanguageOptions) -> Self {
        let languages: Vec<Language> = match &options.supported_locales {
            Some(supported) => languages
                .into_iter()
                .filter(|language| supported.iter().any(|locale| locale == &language.locale))
                .collect(),
            None => languages,
        };
        debug!(count = languages.len(), ?variant, "language catalog built");
        Self {
            languages: languages.into(),
            variant,
        }
    }

    /// Every language in the catalog.
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// The name a row should render for `language` under this catalog's
    /// variant.
    pub fn display_name<'a>(&self, language: &'a Language) -> &'a str {
        let name = match self.variant {
            LanguageVariant::Native => language.native_name.as_deref(),
            LanguageVariant::Localized => language.localized_name.as_deref(),
        };
        name.unwrap_or(&language.locale)
    }
}

#[async_trait]
impl ItemFetcher<Language> for LanguageCatalog {
    async fn fetch_items(&self, filter: Option<&str>) -> Result<Vec<Language>> {
        let Some(filter) = filter.filter(|value| !is_blank(value)) else {
            return Ok(self.languages.to_vec());
        };
        let needle = filter.trim().to_lowercase();
        let matches = match self.variant {
            LanguageVariant::Native => self
                .languages
                .iter()
                .filter(|language| {
                    language
                        .native_name
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase().contains(&needle))
                })
                .cloned()
                .collect(),
            LanguageVariant::Localized => {
                let needle = strip_accents(&needle);
                self.languages
                    .iter()
                    .filter(|language| {
                        language.localized_name.as_deref().is_some_and(|name| {
                            strip_accents(&name.to_lowercase()).contains(&needle)
                        })
                    })
                    .cloned()
                    .collect()
            }
        };
        Ok(matches)
    }
}

/// Language switcher component: a search pipeline over a language catalog.
pub struct LanguageSwitcher;

impl LanguageSwitcher {
    /// Spawns a pipeline over `catalog`, forwarding selections as plain
    /// [`Language`] values.
    pub fn spawn(
        catalog: LanguageCatalog,
        config: PipelineConfig,
        mut on_selected: impl FnMut(Language) + Send + 'static,
    ) -> Result<PipelineHandle<Language>, ConfigError> {
        SearchPipeline::builder(catalog, move |selected| on_selected(selected.item))
            .config(config)
            .spawn()
    }
}
