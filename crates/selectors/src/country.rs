//! Country catalog and selector component.
//!
//! A [`CountryCatalog`] is built from a caller-supplied translations
//! document (loading it is the application's concern), optionally restricted
//! to an allow-list of ISO codes, and serves the pipeline as its item
//! fetcher: a blank filter returns every country, anything else matches the
//! display name accent- and case-insensitively.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use typeahead_engine::{ItemFetcher, PipelineHandle, SearchPipeline};
use typeahead_types::{ConfigError, PipelineConfig};
use typeahead_util::{is_blank, strip_accents};

use crate::assets::SelectorAssets;

/// A selectable country.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code.
    pub code: String,
    /// Display name in the catalog's locale.
    pub name: String,
    /// International calling code, without the leading `+`.
    pub calling_code: Option<String>,
    /// URI of the flag image asset.
    pub flag_uri: String,
}

/// One entry of a country translations document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    /// ISO 3166-1 alpha-2 code.
    pub alpha2_code: String,
    /// Translated country name.
    pub country: String,
}

/// Which label a country row carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CountryVariant {
    /// Plain country names.
    #[default]
    Countries,
    /// Names prefixed with the calling code, e.g. `(+1) United States`.
    CallingCodes,
}

/// Resolves the calling code for an alpha-2 country code.
///
/// Phone-number libraries stay outside this crate; applications plug in
/// whichever source they use.
pub type CallingCodeLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Options governing catalog construction.
pub struct CountryOptions {
    /// Asset bases for flag URIs.
    pub assets: SelectorAssets,
    /// Row label variant.
    pub variant: CountryVariant,
    /// When provided, only countries with these ISO codes are kept.
    pub allowed_codes: Option<Vec<String>>,
    /// Calling-code resolution, required only for the calling-codes variant
    /// to be useful.
    pub calling_codes: Option<CallingCodeLookup>,
}

impl CountryOptions {
    /// Options with defaults: all countries, plain names, no calling codes.
    pub fn new(assets: SelectorAssets) -> Self {
        Self {
            assets,
            variant: CountryVariant::default(),
            allowed_codes: None,
            calling_codes: None,
        }
    }

    /// Sets the row label variant.
    pub fn variant(mut self, variant: CountryVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Restricts the catalog to the given ISO codes.
    pub fn allowed_codes(mut self, codes: Vec<String>) -> Self {
        self.allowed_codes = Some(codes);
        self
    }

    /// Installs a calling-code lookup.
    pub fn calling_codes(mut self, lookup: CallingCodeLookup) -> Self {
        self.calling_codes = Some(lookup);
        self
    }
}

/// In-memory country catalog; doubles as the pipeline's item fetcher.
#[derive(Clone)]
pub struct CountryCatalog {
    countries: Arc<[Country]>,
    variant: CountryVariant,
}

impl CountryCatalog {
    /// Parses a translations document (a JSON array of
    /// `{ "alpha2Code": "US", "country": "United States" }` entries).
    pub fn from_json(document: &str, options: &CountryOptions) -> Result<Self> {
        let records: Vec<CountryRecord> = serde_json::from_str(document)?;
        Ok(Self::from_records(records, options))
    }

    /// Builds the catalog from already-parsed records.
    pub fn from_records(records: Vec<CountryRecord>, options: &CountryOptions) -> Self {
        let countries: Vec<Country> = records
            .into_iter()
            .filter(|record| {
                options
                    .allowed_codes
                    .as_ref()
                    .is_none_or(|codes| codes.iter().any(|code| code == &record.alpha2_code))
            })
            .map(|record| Country {
                calling_code: options
                    .calling_codes
                    .as_ref()
                    .and_then(|lookup| lookup(&record.alpha2_code)),
                flag_uri: options.assets.flag_uri(&record.alpha2_code),
                code: record.alpha2_code,
                name: record.country,
            })
            .collect();
        debug!(count = countries.len(), "country catalog built");
        Self {
            countries: countries.into(),
            variant: options.variant,
        }
    }

    /// Every country in the catalog.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// The label a row should render for `country` under this catalog's
    /// variant.
    pub fn display_label(&self, country: &Country) -> String {
        match (self.variant, &country.calling_code) {
            (CountryVariant::CallingCodes, Some(calling_code)) => {
                format!("(+{calling_code}) {}", country.name)
            }
            _ => country.name.clone(),
        }
    }
}

#[async_trait]
impl ItemFetcher<Country> for CountryCatalog {
    async fn fetch_items(&self, filter: Option<&str>) -> Result<Vec<Country>> {
        let Some(filter) = filter.filter(|value| !is_blank(value)) else {
            return Ok(self.countries.to_vec());
        };
        let needle = strip_accents(&filter.trim().to_lowercase());
        Ok(self
            .countries
            .iter()
            .filter(|country| strip_accents(&country.name.to_lowercase()).contains(&needle))
            .cloned()
            .collect())
    }
}

/// Country selector component: a search pipeline over a country catalog.
pub struct CountrySelector;

impl CountrySelector {
    /// Spawns a pipeline over `catalog`, forwarding selections as plain
    /// [`Country`] values.
    pub fn spawn(
        catalog: CountryCatalog,
        config: PipelineConfig,
        mut on_selected: impl FnMut(Country) + Send + 'static,
    ) -> Result<PipelineHandle<Country>, ConfigError> {
        SearchPipeline::builder(catalog, move |selected| on_selected(selected.item))
            .config(config)
            .spawn()
    }
}
