//! Layer Cake term tables
//!
//! A jurisdiction's registry is assembled bottom to top:
//! 1. Federal - Fair Housing Act advertising prohibitions (apply everywhere)
//! 2. Industry - NAR Code of Ethics and MLS advertising guidance
//! 3. State - protected classes added by state fair housing statutes
//!
//! Layer 3 lives in [`crate::states`].

pub mod federal;
pub mod industry;

pub use federal::FEDERAL_TERMS;
pub use industry::INDUSTRY_TERMS;
