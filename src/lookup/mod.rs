mod index;
mod level;

pub use index::{PostalNutsIndex, normalize_postal_code};
pub use level::NutsLevel;
