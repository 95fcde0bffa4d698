//! Text helpers used throughout the pipeline and selectors.
//!
//! Blank checks mirror the semantics the engine relies on: a string is blank
//! when it is empty or all-whitespace, and a blank filter means "show the
//! baseline". Accent folding backs the accent-insensitive catalog matching.

/// Returns `true` when the string is empty or all-whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns `true` when the string has at least one non-whitespace character.
pub fn is_not_blank(value: &str) -> bool {
    !is_blank(value)
}

/// Returns `true` when every string in the slice is blank.
pub fn all_blank<S: AsRef<str>>(values: &[S]) -> bool {
    values.iter().all(|value| is_blank(value.as_ref()))
}

/// Returns `true` when at least one string in the slice is blank.
pub fn any_blank<S: AsRef<str>>(values: &[S]) -> bool {
    values.iter().any(|value| is_blank(value.as_ref()))
}

/// Folds Latin diacritics so that `"São Tomé"` matches `"sao tome"`.
///
/// Covers the Latin-1 Supplement and Latin Extended-A letters that occur in
/// country and language names. Characters outside the fold table pass
/// through unchanged.
pub fn strip_accents(input: &str) -> String {
    input.chars().map(fold_accent).collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' | 'Ā' | 'Ă' | 'Ą' => 'A',
        'ç' | 'ć' | 'ĉ' | 'č' => 'c',
        'Ç' | 'Ć' | 'Ĉ' | 'Č' => 'C',
        'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => 'E',
        'ğ' | 'ĝ' | 'ġ' | 'ģ' => 'g',
        'Ğ' | 'Ĝ' | 'Ġ' | 'Ģ' => 'G',
        'í' | 'ì' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => 'I',
        'ĺ' | 'ļ' | 'ľ' | 'ł' => 'l',
        'Ĺ' | 'Ļ' | 'Ľ' | 'Ł' => 'L',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' => 'N',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' | 'Ø' | 'Ō' | 'Ŏ' | 'Ő' => 'O',
        'ŕ' | 'ř' => 'r',
        'Ŕ' | 'Ř' => 'R',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'Ś' | 'Ŝ' | 'Ş' | 'Š' => 'S',
        'ţ' | 'ť' => 't',
        'Ţ' | 'Ť' => 'T',
        'ú' | 'ù' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' | 'Ÿ' => 'Y',
        'ź' | 'ż' | 'ž' => 'z',
        'Ź' | 'Ż' | 'Ž' => 'Z',
        other => other,
    }
}

/// Normalizes a locale tag to `language-REGION` form.
///
/// Underscore separators are accepted (`pt_br` becomes `pt-BR`). When the
/// region part is missing or is not a two-character subtag, only the
/// language part is returned.
pub fn normalize_locale(locale: &str) -> String {
    let normalized = locale.replace('_', "-");
    let mut parts = normalized.splitn(2, '-');
    let language = parts.next().unwrap_or_default().to_string();
    match parts.next() {
        Some(region)
            if region.chars().count() == 2
                && region.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) =>
        {
            format!("{language}-{}", region.to_ascii_uppercase())
        }
        _ => language,
    }
}

/// Returns `true` for a plausible ISO 3166-1 alpha-2 region code.
pub fn is_country_iso(country_code: &str) -> bool {
    country_code.chars().count() == 2
        && country_code.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}
