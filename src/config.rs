//! Static description of the Eurostat NUTS datasets: which countries and
//! publication years exist, where each archive lives remotely, and the
//! run-time configuration assembled from CLI input.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::NutsError;

/// Country used when none is given on the command line.
pub const DEFAULT_COUNTRY: &str = "NL";

/// Publication year used when none is given on the command line.
pub const DEFAULT_YEAR: &str = "2021";

/// Countries covered by the Eurostat postal-code/NUTS correspondence tables
/// (EU members plus EFTA and candidate countries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum Country {
    AT, BE, BG, CH, CY, CZ, DE, DK, EE, EL, ES, FI, FR, HR, HU, IE, IS,
    IT, LI, LT, LU, LV, MK, NL, NO, PT, PL, RO, RS, SE, SI, SK, TR, UK,
}

impl Country {
    /// All supported countries, in ISO-2 order.
    pub const ALL: &'static [Country] = &[
        Country::AT, Country::BE, Country::BG, Country::CH, Country::CY,
        Country::CZ, Country::DE, Country::DK, Country::EE, Country::EL,
        Country::ES, Country::FI, Country::FR, Country::HR, Country::HU,
        Country::IE, Country::IS, Country::IT, Country::LI, Country::LT,
        Country::LU, Country::LV, Country::MK, Country::NL, Country::NO,
        Country::PT, Country::PL, Country::RO, Country::RS, Country::SE,
        Country::SI, Country::SK, Country::TR, Country::UK,
    ];

    /// The two-letter country code as it appears in NUTS codes and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Country::AT => "AT",
            Country::BE => "BE",
            Country::BG => "BG",
            Country::CH => "CH",
            Country::CY => "CY",
            Country::CZ => "CZ",
            Country::DE => "DE",
            Country::DK => "DK",
            Country::EE => "EE",
            Country::EL => "EL",
            Country::ES => "ES",
            Country::FI => "FI",
            Country::FR => "FR",
            Country::HR => "HR",
            Country::HU => "HU",
            Country::IE => "IE",
            Country::IS => "IS",
            Country::IT => "IT",
            Country::LI => "LI",
            Country::LT => "LT",
            Country::LU => "LU",
            Country::LV => "LV",
            Country::MK => "MK",
            Country::NL => "NL",
            Country::NO => "NO",
            Country::PT => "PT",
            Country::PL => "PL",
            Country::RO => "RO",
            Country::RS => "RS",
            Country::SE => "SE",
            Country::SI => "SI",
            Country::SK => "SK",
            Country::TR => "TR",
            Country::UK => "UK",
        }
    }
}

impl FromStr for Country {
    type Err = NutsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Country::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == code)
            .ok_or_else(|| {
                NutsError::Configuration(format!(
                    "country '{s}' is not covered by the NUTS tables; pick one of the EU/EFTA codes"
                ))
            })
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publication years of the correspondence tables. Eurostat revises the NUTS
/// classification every few years; only 2021 is published in this format so
/// far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NutsYear {
    Y2021,
}

impl NutsYear {
    pub fn as_str(&self) -> &'static str {
        match self {
            NutsYear::Y2021 => "2021",
        }
    }

    /// Base URL under which the year's archives are published.
    pub fn base_url(&self) -> &'static str {
        match self {
            NutsYear::Y2021 => "https://gisco-services.ec.europa.eu/tercet/NUTS-2021",
        }
    }
}

impl FromStr for NutsYear {
    type Err = NutsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2021" => Ok(NutsYear::Y2021),
            _ => Err(NutsError::Configuration(format!(
                "year '{s}' is not available; only 2021 is published"
            ))),
        }
    }
}

impl fmt::Display for NutsYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where one (country, year) dataset lives remotely. Resolved once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetDescriptor {
    pub country: Country,
    pub year: NutsYear,
}

impl DatasetDescriptor {
    pub fn new(country: Country, year: NutsYear) -> Self {
        Self { country, year }
    }

    /// Name of the published archive. Revisions differ per country, so the
    /// full names are tabulated rather than derived.
    pub fn archive_file_name(&self) -> &'static str {
        match (self.year, self.country) {
            (NutsYear::Y2021, Country::AT) => "pc2020_AT_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::BE) => "pc2020_BE_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::BG) => "pc2020_BG_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::CH) => "pc2020_CH_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::CY) => "pc2020_CY_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::CZ) => "pc2020_CZ_NUTS-2021_v2.0.zip",
            (NutsYear::Y2021, Country::DE) => "pc2020_DE_NUTS-2021_v4.0.zip",
            (NutsYear::Y2021, Country::DK) => "pc2020_DK_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::EE) => "pc2020_EE_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::EL) => "pc2020_EL_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::ES) => "pc2020_ES_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::FI) => "pc2020_FI_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::FR) => "pc2020_FR_NUTS-2021_v2.0.zip",
            (NutsYear::Y2021, Country::HR) => "pc2020_HR_NUTS-2021_v2.0.zip",
            (NutsYear::Y2021, Country::HU) => "pc2020_HU_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::IE) => "pc2020_IE_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::IS) => "pc2020_IS_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::IT) => "pc2020_IT_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::LI) => "pc2020_LI_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::LT) => "pc2020_LT_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::LU) => "pc2020_LU_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::LV) => "pc2020_LV_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::MK) => "pc2020_MK_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::NL) => "pc2020_NL_NUTS-2021_v2.0.zip",
            (NutsYear::Y2021, Country::NO) => "pc2020_NO_NUTS-2021_v2.0.zip",
            (NutsYear::Y2021, Country::PT) => "pc2020_PT_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::PL) => "pc2020_PL_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::RO) => "pc2020_RO_NUTS-2021_v2.0.zip",
            (NutsYear::Y2021, Country::RS) => "pc2020_RS_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::SE) => "pc2020_SE_NUTS-2021_v2.0.zip",
            (NutsYear::Y2021, Country::SI) => "pc2020_SI_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::SK) => "pc2020_SK_NUTS-2021_v2.0.zip",
            (NutsYear::Y2021, Country::TR) => "pc2020_TR_NUTS-2021_v1.0.zip",
            (NutsYear::Y2021, Country::UK) => "pc2020_UK_NUTS-2021_v3.0.zip",
        }
    }

    /// Full download URL of the archive.
    pub fn url(&self) -> String {
        format!("{}/{}", self.year.base_url(), self.archive_file_name())
    }
}

/// Run-time configuration for the data acquisition pipeline. Constructed once
/// at startup from CLI input and passed by reference; nothing mutates it.
#[derive(Debug, Clone)]
pub struct NutsConfig {
    pub country: Country,
    pub year: NutsYear,
    /// Root directory under which per-(country, year) cache entries live.
    pub cache_dir: PathBuf,
    /// Re-download the archive even when a cached copy exists.
    pub force_download: bool,
}

impl NutsConfig {
    pub fn descriptor(&self) -> DatasetDescriptor {
        DatasetDescriptor::new(self.country, self.year)
    }
}

/// Default cache root: the OS cache directory joined with the crate name.
pub fn default_cache_dir() -> Result<PathBuf, NutsError> {
    dirs::cache_dir()
        .map(|dir| dir.join("postal2nuts"))
        .ok_or_else(|| {
            NutsError::Configuration(
                "cannot determine the OS cache directory; pass --directory".to_string(),
            )
        })
}
