//! Florida Fair Housing Act
//!
//! Fla. Stat. § 760.23 mirrors the federal classes and spells out that
//! familial status covers pregnancy.

use crate::jurisdiction::{JurisdictionConfig, State};
use crate::terms::TermDef;
use shared_types::{Category, Severity};

pub const FLORIDA_FAIR_HOUSING_ACT: &str = "Fla. Stat. § 760.23";

pub const STATE_TERMS: &[TermDef] = &[
    TermDef::phrase(
        "childless couples",
        Category::FamilialStatus,
        Severity::Hard,
        "Indicates a preference against households with children.",
        FLORIDA_FAIR_HOUSING_ACT,
        "all households",
    ),
    TermDef::phrase(
        "no pregnant",
        Category::FamilialStatus,
        Severity::Hard,
        "Familial status includes pregnancy under Florida law.",
        FLORIDA_FAIR_HOUSING_ACT,
        "all are welcome",
    ),
];

pub fn config() -> JurisdictionConfig {
    JurisdictionConfig::assemble(
        State::FL,
        "Stellar MLS",
        STATE_TERMS,
        &["Licensed Real Estate Broker"],
        1500,
        &["fair-housing/florida.txt"],
    )
}
