//! New York State Human Rights Law - Housing
//!
//! N.Y. Exec. Law § 296(5) adds creed and lawful source of income to the
//! protected classes for housing advertisements.

use crate::jurisdiction::{JurisdictionConfig, State};
use crate::terms::TermDef;
use shared_types::{Category, Severity};

pub const NY_HUMAN_RIGHTS_LAW: &str = "N.Y. Exec. Law § 296(5)";

pub const STATE_TERMS: &[TermDef] = &[
    TermDef::phrase(
        "like-minded community",
        Category::Creed,
        Severity::Soft,
        "Can signal a preference based on creed.",
        NY_HUMAN_RIGHTS_LAW,
        "friendly community",
    ),
    TermDef::phrase(
        "no public assistance",
        Category::EconomicExclusion,
        Severity::Hard,
        "Lawful source of income is protected.",
        NY_HUMAN_RIGHTS_LAW,
        "all lawful income sources considered",
    ),
    TermDef::phrase(
        "must be employed",
        Category::EconomicExclusion,
        Severity::Hard,
        "Lawful source of income is protected.",
        NY_HUMAN_RIGHTS_LAW,
        "all qualified applicants welcome",
    ),
];

pub fn config() -> JurisdictionConfig {
    JurisdictionConfig::assemble(
        State::NY,
        "OneKey MLS",
        STATE_TERMS,
        &["New York State Fair Housing Notice"],
        1200,
        &["fair-housing/new-york.txt"],
    )
}
