//! Montana Human Rights Act - Housing
//!
//! Mont. Code Ann. § 49-2-305 adds age, marital status and creed to the
//! federal protected classes for real estate transactions, including
//! advertising.

use crate::jurisdiction::{JurisdictionConfig, State};
use crate::terms::TermDef;
use shared_types::{Category, Severity};

pub const MONTANA_HUMAN_RIGHTS_ACT: &str = "Mont. Code Ann. § 49-2-305";

pub const STATE_TERMS: &[TermDef] = &[
    TermDef::phrase(
        "married couples only",
        Category::MaritalStatus,
        Severity::Hard,
        "Excludes buyers by marital status.",
        MONTANA_HUMAN_RIGHTS_ACT,
        "all are welcome",
    ),
    TermDef::phrase(
        "mature adults",
        Category::Age,
        Severity::Hard,
        "Indicates an age preference.",
        MONTANA_HUMAN_RIGHTS_ACT,
        "residents of all ages",
    ),
    TermDef::phrase(
        "young professionals",
        Category::Age,
        Severity::Soft,
        "Describes the buyer's age rather than the property.",
        MONTANA_HUMAN_RIGHTS_ACT,
        "professionals",
    ),
    TermDef::phrase(
        "god-fearing",
        Category::Creed,
        Severity::Hard,
        "Indicates a preference based on creed.",
        MONTANA_HUMAN_RIGHTS_ACT,
        "friendly",
    ),
];

pub fn config() -> JurisdictionConfig {
    JurisdictionConfig::assemble(
        State::MT,
        "Montana Regional MLS",
        STATE_TERMS,
        &["Licensed in the State of Montana"],
        1000,
        &["fair-housing/montana.txt"],
    )
}
