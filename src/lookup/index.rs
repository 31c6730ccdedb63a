//! In-memory postal-code → NUTS-code index.
//!
//! The Eurostat correspondence tables are semicolon-separated CSV with two
//! columns: the NUTS level-3 code first, the postal code second. Values (and
//! sometimes headers) are wrapped in single quotes. The index normalizes
//! every postal code the same way on load and on query, so matching is
//! insensitive to case and embedded whitespace.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use super::NutsLevel;
use crate::error::NutsError;

/// Normalize a postal code: strip all whitespace (embedded included) and
/// uppercase. Applied uniformly to stored and queried codes; idempotent.
pub fn normalize_postal_code(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Scrub a raw table field: the published files quote values with `'`.
fn clean_field(raw: &str) -> String {
    raw.trim().replace('\'', "")
}

/// Read-only mapping from normalized postal code to its NUTS level-3 code.
///
/// Built once from a correspondence table; coarser levels are computed on
/// demand by truncation, never stored. The type only exists after a
/// successful [`load`](PostalNutsIndex::load), so queries can never observe
/// an unloaded index.
#[derive(Debug)]
pub struct PostalNutsIndex {
    codes: HashMap<String, String>,
}

impl PostalNutsIndex {
    /// Parse a correspondence table into an index.
    ///
    /// The record shape is validated once, up front: the first column header
    /// must start with `NUTS` and the second must be `CODE`. Rows with an
    /// empty postal code or NUTS code are skipped with a warning. When two
    /// rows normalize to the same postal code, the later record wins.
    pub fn load(path: &Path) -> Result<Self, NutsError> {
        info!("reading NUTS data from {}", path.display());

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_path(path)
            .map_err(|err| parse_error(path, err.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|err| parse_error(path, err.to_string()))?
            .clone();
        let nuts_header = headers.get(0).map(clean_field).unwrap_or_default();
        let code_header = headers.get(1).map(clean_field).unwrap_or_default();
        if !nuts_header.to_ascii_uppercase().starts_with("NUTS")
            || !code_header.eq_ignore_ascii_case("CODE")
        {
            return Err(parse_error(
                path,
                format!(
                    "expected a 'NUTS…;CODE' header, found '{}'",
                    headers.iter().collect::<Vec<_>>().join(";")
                ),
            ));
        }

        let mut codes = HashMap::new();
        for record in reader.records() {
            let record = record.map_err(|err| parse_error(path, err.to_string()))?;
            let nuts = normalize_postal_code(&clean_field(record.get(0).unwrap_or("")));
            let postal = normalize_postal_code(&clean_field(record.get(1).unwrap_or("")));
            if nuts.is_empty() || postal.is_empty() {
                warn!(
                    "skipping incomplete row {:?} in {}",
                    record,
                    path.display()
                );
                continue;
            }
            if let Some(previous) = codes.insert(postal.clone(), nuts) {
                debug!("duplicate postal code {postal}: replacing {previous}");
            }
        }

        if codes.is_empty() {
            return Err(parse_error(path, "no usable rows".to_string()));
        }

        debug!("indexed {} postal codes", codes.len());
        Ok(Self { codes })
    }

    /// Number of distinct normalized postal codes in the index.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Look up a single postal code at the requested level.
    ///
    /// A miss returns `None` rather than an error; callers decide whether
    /// absence is fatal.
    pub fn lookup_one(&self, postal_code: &str, level: NutsLevel) -> Option<String> {
        let key = normalize_postal_code(postal_code);
        match self.codes.get(&key) {
            Some(code) => Some(level.truncate(code).to_string()),
            None => {
                warn!("could not find NUTS code for postal code {key}");
                None
            }
        }
    }

    /// Look up many postal codes, preserving input order.
    ///
    /// Each result pairs the normalized input code with its NUTS code, or
    /// `None` for a miss. Inputs are not deduplicated and a partial miss
    /// never fails the call.
    pub fn lookup_many<I, S>(&self, postal_codes: I, level: NutsLevel) -> Vec<(String, Option<String>)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        postal_codes
            .into_iter()
            .map(|raw| {
                let raw = raw.as_ref();
                (normalize_postal_code(raw), self.lookup_one(raw, level))
            })
            .collect()
    }
}

fn parse_error(path: &Path, reason: String) -> NutsError {
    NutsError::Parse {
        path: path.to_path_buf(),
        reason,
    }
}
