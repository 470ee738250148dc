//! Industry Layer - REALTOR® and MLS advertising rules
//!
//! Not statute, but enforced by associations and listing services:
//! - NAR Code of Ethics, Article 12 (truthful advertising)
//! - MLS fair housing style guidance on outdated terminology

use crate::terms::TermDef;
use shared_types::{Category, Severity};

pub const NAR_ARTICLE_12: &str = "NAR Code of Ethics, Article 12";
pub const MLS_STYLE_GUIDANCE: &str = "MLS Fair Housing Advertising Guidance";

pub const INDUSTRY_TERMS: &[TermDef] = &[
    TermDef::phrase(
        "master",
        Category::RaceColorNationalOrigin,
        Severity::Soft,
        "Listing services have retired this term; use neutral wording.",
        MLS_STYLE_GUIDANCE,
        "primary",
    ),
    TermDef::phrase(
        "guaranteed appreciation",
        Category::MisleadingClaims,
        Severity::Hard,
        "Future value cannot be guaranteed.",
        NAR_ARTICLE_12,
        "strong market history",
    ),
    TermDef::phrase(
        "risk-free investment",
        Category::MisleadingClaims,
        Severity::Hard,
        "No real estate purchase is free of risk.",
        NAR_ARTICLE_12,
        "solid opportunity",
    ),
];
