//! California Fair Employment and Housing Act (FEHA)
//!
//! Cal. Gov. Code § 12955 covers source of income (including housing
//! vouchers) and sexual orientation on top of the federal classes.

use crate::jurisdiction::{JurisdictionConfig, State};
use crate::terms::TermDef;
use shared_types::{Category, Severity};

pub const FEHA_HOUSING: &str = "Cal. Gov. Code § 12955 (FEHA)";

pub const STATE_TERMS: &[TermDef] = &[
    TermDef::phrase(
        "no section 8",
        Category::EconomicExclusion,
        Severity::Hard,
        "Source-of-income discrimination; vouchers are lawful income.",
        FEHA_HOUSING,
        "all qualified applicants welcome",
    ),
    TermDef::phrase(
        "no vouchers",
        Category::EconomicExclusion,
        Severity::Hard,
        "Source-of-income discrimination; vouchers are lawful income.",
        FEHA_HOUSING,
        "all qualified applicants welcome",
    ),
    TermDef::phrase(
        "straight couples only",
        Category::SexGender,
        Severity::Hard,
        "Excludes buyers by sexual orientation.",
        FEHA_HOUSING,
        "all are welcome",
    ),
];

pub fn config() -> JurisdictionConfig {
    JurisdictionConfig::assemble(
        State::CA,
        "California Regional MLS",
        STATE_TERMS,
        &["DRE license number"],
        2000,
        &["fair-housing/california.txt"],
    )
}
