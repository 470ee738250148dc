//! Federal Layer - Baseline advertising prohibitions
//!
//! Applies to ALL residential listings nationwide.
//!
//! Per 42 U.S.C. § 3604(c) (Fair Housing Act), it is unlawful to publish any
//! advertisement that indicates a preference, limitation, or discrimination
//! based on race, color, religion, sex, handicap, familial status, or
//! national origin. HUD's advertising guidance (24 CFR 100.75) lists the
//! words and phrases below as indicators.

use crate::terms::TermDef;
use shared_types::{Category, Severity};

pub const FAIR_HOUSING_ACT: &str = "42 U.S.C. § 3604(c)";
pub const HUD_ADVERTISING_RULE: &str = "24 CFR 100.75";

pub const FEDERAL_TERMS: &[TermDef] = &[
    // ------------------------------------------------------------------
    // Steering
    // ------------------------------------------------------------------
    TermDef::phrase(
        "exclusive neighborhood",
        Category::Steering,
        Severity::Hard,
        "Implies the neighborhood excludes certain groups of buyers.",
        FAIR_HOUSING_ACT,
        "desirable location",
    ),
    TermDef::phrase(
        "exclusive community",
        Category::Steering,
        Severity::Hard,
        "Implies the community excludes certain groups of buyers.",
        FAIR_HOUSING_ACT,
        "sought-after community",
    ),
    TermDef::phrase(
        "restricted",
        Category::Steering,
        Severity::Hard,
        "Historically used to signal racially restricted covenants.",
        FAIR_HOUSING_ACT,
        "well-maintained",
    ),
    TermDef::phrase(
        "traditional neighborhood",
        Category::Steering,
        Severity::Soft,
        "Can be read as coded language about who belongs in the area.",
        HUD_ADVERTISING_RULE,
        "established neighborhood",
    ),
    // ------------------------------------------------------------------
    // Familial status
    // ------------------------------------------------------------------
    TermDef::phrase(
        "family-friendly",
        Category::FamilialStatus,
        Severity::Hard,
        "Indicates a preference for households with children.",
        FAIR_HOUSING_ACT,
        "welcoming",
    ),
    TermDef::phrase(
        "no children",
        Category::FamilialStatus,
        Severity::Hard,
        "Excludes households with children.",
        FAIR_HOUSING_ACT,
        "all are welcome",
    ),
    TermDef::phrase(
        "no kids",
        Category::FamilialStatus,
        Severity::Hard,
        "Excludes households with children.",
        FAIR_HOUSING_ACT,
        "all are welcome",
    ),
    TermDef::phrase(
        "adults only",
        Category::FamilialStatus,
        Severity::Hard,
        "Excludes households with children.",
        FAIR_HOUSING_ACT,
        "all are welcome",
    ),
    TermDef::phrase(
        "perfect for families",
        Category::FamilialStatus,
        Severity::Soft,
        "Describes the buyer rather than the property.",
        HUD_ADVERTISING_RULE,
        "spacious layout",
    ),
    TermDef::phrase(
        "empty nesters",
        Category::FamilialStatus,
        Severity::Soft,
        "Describes the buyer's household rather than the property.",
        HUD_ADVERTISING_RULE,
        "low-maintenance living",
    ),
    // ------------------------------------------------------------------
    // Disability
    // ------------------------------------------------------------------
    TermDef::phrase(
        "no wheelchairs",
        Category::Disability,
        Severity::Hard,
        "Excludes buyers with mobility impairments.",
        FAIR_HOUSING_ACT,
        "accessibility details available on request",
    ),
    TermDef::phrase(
        "able-bodied",
        Category::Disability,
        Severity::Hard,
        "Indicates a preference against buyers with disabilities.",
        FAIR_HOUSING_ACT,
        "all buyers",
    ),
    TermDef::phrase(
        "handicapped",
        Category::Disability,
        Severity::Soft,
        "Outdated term; describe the accessibility feature instead.",
        HUD_ADVERTISING_RULE,
        "accessible",
    ),
    TermDef::phrase(
        "walking distance",
        Category::Disability,
        Severity::Soft,
        "Describes the buyer's ability rather than the property's location.",
        HUD_ADVERTISING_RULE,
        "a short distance",
    ),
    // ------------------------------------------------------------------
    // Race, color, national origin
    // ------------------------------------------------------------------
    TermDef::phrase(
        "ethnic neighborhood",
        Category::RaceColorNationalOrigin,
        Severity::Hard,
        "Describes residents by national origin.",
        FAIR_HOUSING_ACT,
        "vibrant neighborhood",
    ),
    TermDef::phrase(
        "english speaking only",
        Category::RaceColorNationalOrigin,
        Severity::Hard,
        "Excludes buyers by national origin.",
        FAIR_HOUSING_ACT,
        "all are welcome",
    ),
    TermDef::phrase(
        "whites only",
        Category::RaceColorNationalOrigin,
        Severity::Hard,
        "Excludes buyers by race.",
        FAIR_HOUSING_ACT,
        "all are welcome",
    ),
    // ------------------------------------------------------------------
    // Religion
    // ------------------------------------------------------------------
    TermDef::phrase(
        "christian community",
        Category::Religion,
        Severity::Hard,
        "Indicates a religious preference.",
        FAIR_HOUSING_ACT,
        "welcoming community",
    ),
    TermDef::phrase(
        "christian only",
        Category::Religion,
        Severity::Hard,
        "Excludes buyers by religion.",
        FAIR_HOUSING_ACT,
        "all are welcome",
    ),
    // ------------------------------------------------------------------
    // Sex / gender
    // ------------------------------------------------------------------
    TermDef::phrase(
        "bachelor pad",
        Category::SexGender,
        Severity::Hard,
        "Indicates a preference for single men.",
        FAIR_HOUSING_ACT,
        "studio retreat",
    ),
    TermDef::phrase(
        "female only",
        Category::SexGender,
        Severity::Hard,
        "Excludes buyers by sex.",
        FAIR_HOUSING_ACT,
        "all are welcome",
    ),
    TermDef::phrase(
        "man cave",
        Category::SexGender,
        Severity::Soft,
        "Genders the use of a room.",
        HUD_ADVERTISING_RULE,
        "bonus room",
    ),
];
