//! Ohio Civil Rights Law - Unlawful discriminatory practices in housing
//!
//! ORC § 4112.02(H) prohibits advertising that expresses a preference based
//! on military status (and ancestry) in addition to the federal classes.

use crate::jurisdiction::{JurisdictionConfig, State};
use crate::terms::TermDef;
use shared_types::{Category, Severity};

pub const OHIO_CIVIL_RIGHTS_LAW: &str = "ORC § 4112.02(H)";

pub const STATE_TERMS: &[TermDef] = &[
    TermDef::phrase(
        "no military",
        Category::MilitaryStatus,
        Severity::Hard,
        "Excludes buyers by military status.",
        OHIO_CIVIL_RIGHTS_LAW,
        "all are welcome",
    ),
    TermDef::phrase(
        "civilians only",
        Category::MilitaryStatus,
        Severity::Hard,
        "Excludes buyers by military status.",
        OHIO_CIVIL_RIGHTS_LAW,
        "all are welcome",
    ),
    TermDef::phrase(
        "no active duty",
        Category::MilitaryStatus,
        Severity::Hard,
        "Excludes service members.",
        OHIO_CIVIL_RIGHTS_LAW,
        "all are welcome",
    ),
];

pub fn config() -> JurisdictionConfig {
    JurisdictionConfig::assemble(
        State::OH,
        "Columbus REALTORS MLS",
        STATE_TERMS,
        &["Ohio Civil Rights Commission fair housing notice"],
        1500,
        &["fair-housing/ohio.txt"],
    )
}
