//! # Typeahead Selectors
//!
//! Ready-made selector components over the typeahead engine: a country
//! selector and a language switcher. Each component owns an in-memory
//! catalog built from a caller-supplied document, serves the pipeline as
//! its item fetcher, and forwards selections as plain typed values.
//!
//! Loading the documents (and the flag images the catalogs point at) stays
//! with the embedding application; the catalogs only parse, restrict, and
//! match.

mod assets;
mod country;
mod language;

pub use assets::SelectorAssets;
pub use country::{
    CallingCodeLookup, Country, CountryCatalog, CountryOptions, CountryRecord, CountrySelector,
    CountryVariant,
};
pub use language::{
    Language, LanguageCatalog, LanguageOptions, LanguageSwitcher, LanguageVariant,
    LocalizedLanguageRecord, NativeLanguageRecord,
};
