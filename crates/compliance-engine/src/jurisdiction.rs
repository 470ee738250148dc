//! Jurisdiction types and the term registry
//!
//! Implements the "Layer Cake" architecture for advertising copy:
//! - Federal (baseline): Fair Housing Act advertising prohibitions
//! - Industry: NAR Code of Ethics and MLS style guidance
//! - State: protected classes added by state fair housing statutes
//!
//! One [`JurisdictionConfig`] per supported state; the [`Registry`] is built
//! once at startup and passed by reference to everything that scans.

use crate::layers::{FEDERAL_TERMS, INDUSTRY_TERMS};
use crate::quality::QualityRules;
use crate::states;
use crate::terms::{compile_terms, Term, TermDef};
use serde::{Deserialize, Serialize};
use shared_types::Category;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// US state codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum State {
    AL,
    AK,
    AZ,
    AR,
    CA,
    CO,
    CT,
    DE,
    FL,
    GA,
    HI,
    ID,
    IL,
    IN,
    IA,
    KS,
    KY,
    LA,
    ME,
    MD,
    MA,
    MI,
    MN,
    MS,
    MO,
    MT,
    NE,
    NV,
    NH,
    NJ,
    NM,
    NY,
    NC,
    ND,
    OH,
    OK,
    OR,
    PA,
    RI,
    SC,
    SD,
    TN,
    TX,
    UT,
    VT,
    VA,
    WA,
    WV,
    WI,
    WY,
    DC,
}

impl State {
    pub const ALL: [State; 51] = [State::AL, State::AK, State::AZ, State::AR, State::CA, State::CO, State::CT, State::DE, State::FL, State::GA, State::HI, State::ID, State::IL, State::IN, State::IA, State::KS, State::KY, State::LA, State::ME, State::MD, State::MA, State::MI, State::MN, State::MS, State::MO, State::MT, State::NE, State::NV, State::NH, State::NJ, State::NM, State::NY, State::NC, State::ND, State::OH, State::OK, State::OR, State::PA, State::RI, State::SC, State::SD, State::TN, State::TX, State::UT, State::VT, State::VA, State::WA, State::WV, State::WI, State::WY, State::DC];

    /// Get the full state name
    pub fn name(&self) -> &'static str {
        match self {
            State::AL => "Alabama",
            State::AK => "Alaska",
            State::AZ => "Arizona",
            State::AR => "Arkansas",
            State::CA => "California",
            State::CO => "Colorado",
            State::CT => "Connecticut",
            State::DE => "Delaware",
            State::FL => "Florida",
            State::GA => "Georgia",
            State::HI => "Hawaii",
            State::ID => "Idaho",
            State::IL => "Illinois",
            State::IN => "Indiana",
            State::IA => "Iowa",
            State::KS => "Kansas",
            State::KY => "Kentucky",
            State::LA => "Louisiana",
            State::ME => "Maine",
            State::MD => "Maryland",
            State::MA => "Massachusetts",
            State::MI => "Michigan",
            State::MN => "Minnesota",
            State::MS => "Mississippi",
            State::MO => "Missouri",
            State::MT => "Montana",
            State::NE => "Nebraska",
            State::NV => "Nevada",
            State::NH => "New Hampshire",
            State::NJ => "New Jersey",
            State::NM => "New Mexico",
            State::NY => "New York",
            State::NC => "North Carolina",
            State::ND => "North Dakota",
            State::OH => "Ohio",
            State::OK => "Oklahoma",
            State::OR => "Oregon",
            State::PA => "Pennsylvania",
            State::RI => "Rhode Island",
            State::SC => "South Carolina",
            State::SD => "South Dakota",
            State::TN => "Tennessee",
            State::TX => "Texas",
            State::UT => "Utah",
            State::VT => "Vermont",
            State::VA => "Virginia",
            State::WA => "Washington",
            State::WV => "West Virginia",
            State::WI => "Wisconsin",
            State::WY => "Wyoming",
            State::DC => "District of Columbia",
        }
    }

    /// Primary fair housing statute for implemented states
    pub fn fair_housing_statute(&self) -> Option<&'static str> {
        match self {
            State::MT => Some("Mont. Code Ann. § 49-2-305"),
            State::OH => Some("ORC § 4112.02(H)"),
            State::CA => Some("Cal. Gov. Code § 12955"),
            State::NY => Some("N.Y. Exec. Law § 296(5)"),
            State::FL => Some("Fla. Stat. § 760.23"),
            _ => None,
        }
    }

    /// Regex sources identifying this state's statutes inside a citation
    pub fn citation_markers(&self) -> &'static [&'static str] {
        match self {
            State::MT => &[r"Mont\.?\s+Code\s+Ann", r"\bMCA\b"],
            State::OH => &[r"\bORC\b", r"\bO\.R\.C\.", r"Ohio\s+Rev(\.|ised)\s+Code"],
            State::CA => &[r"Cal\.?\s+Gov(\.|ernment)?\s+Code", r"\bFEHA\b"],
            State::NY => &[r"N\.?Y\.?\s+Exec(\.|utive)?\s+Law", r"\bNYSHRL\b"],
            State::FL => &[r"Fla\.?\s+Stat", r"Florida\s+Fair\s+Housing\s+Act"],
            _ => &[],
        }
    }

    /// Check if state has a built-in configuration
    pub fn is_implemented(&self) -> bool {
        matches!(self, State::MT | State::OH | State::CA | State::NY | State::FL)
    }

    /// Get all implemented states
    pub fn implemented_states() -> Vec<Self> {
        vec![State::MT, State::OH, State::CA, State::NY, State::FL]
    }

    /// Parse from state code or name (case-insensitive)
    pub fn parse_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "AL" | "ALABAMA" => Some(State::AL),
            "AK" | "ALASKA" => Some(State::AK),
            "AZ" | "ARIZONA" => Some(State::AZ),
            "AR" | "ARKANSAS" => Some(State::AR),
            "CA" | "CALIFORNIA" => Some(State::CA),
            "CO" | "COLORADO" => Some(State::CO),
            "CT" | "CONNECTICUT" => Some(State::CT),
            "DE" | "DELAWARE" => Some(State::DE),
            "FL" | "FLORIDA" => Some(State::FL),
            "GA" | "GEORGIA" => Some(State::GA),
            "HI" | "HAWAII" => Some(State::HI),
            "ID" | "IDAHO" => Some(State::ID),
            "IL" | "ILLINOIS" => Some(State::IL),
            "IN" | "INDIANA" => Some(State::IN),
            "IA" | "IOWA" => Some(State::IA),
            "KS" | "KANSAS" => Some(State::KS),
            "KY" | "KENTUCKY" => Some(State::KY),
            "LA" | "LOUISIANA" => Some(State::LA),
            "ME" | "MAINE" => Some(State::ME),
            "MD" | "MARYLAND" => Some(State::MD),
            "MA" | "MASSACHUSETTS" => Some(State::MA),
            "MI" | "MICHIGAN" => Some(State::MI),
            "MN" | "MINNESOTA" => Some(State::MN),
            "MS" | "MISSISSIPPI" => Some(State::MS),
            "MO" | "MISSOURI" => Some(State::MO),
            "MT" | "MONTANA" => Some(State::MT),
            "NE" | "NEBRASKA" => Some(State::NE),
            "NV" | "NEVADA" => Some(State::NV),
            "NH" | "NEW HAMPSHIRE" => Some(State::NH),
            "NJ" | "NEW JERSEY" => Some(State::NJ),
            "NM" | "NEW MEXICO" => Some(State::NM),
            "NY" | "NEW YORK" => Some(State::NY),
            "NC" | "NORTH CAROLINA" => Some(State::NC),
            "ND" | "NORTH DAKOTA" => Some(State::ND),
            "OH" | "OHIO" => Some(State::OH),
            "OK" | "OKLAHOMA" => Some(State::OK),
            "OR" | "OREGON" => Some(State::OR),
            "PA" | "PENNSYLVANIA" => Some(State::PA),
            "RI" | "RHODE ISLAND" => Some(State::RI),
            "SC" | "SOUTH CAROLINA" => Some(State::SC),
            "SD" | "SOUTH DAKOTA" => Some(State::SD),
            "TN" | "TENNESSEE" => Some(State::TN),
            "TX" | "TEXAS" => Some(State::TX),
            "UT" | "UTAH" => Some(State::UT),
            "VT" | "VERMONT" => Some(State::VT),
            "VA" | "VIRGINIA" => Some(State::VA),
            "WA" | "WASHINGTON" => Some(State::WA),
            "WV" | "WEST VIRGINIA" => Some(State::WV),
            "WI" | "WISCONSIN" => Some(State::WI),
            "WY" | "WYOMING" => Some(State::WY),
            "DC" | "DISTRICT OF COLUMBIA" => Some(State::DC),
            _ => None,
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Everything needed to check copy for one state
#[derive(Debug, Clone)]
pub struct JurisdictionConfig {
    pub state: State,
    pub mls_name: String,
    /// Federal + industry + state terms, in that order
    pub terms: Vec<Term>,
    pub required_disclosures: Vec<String>,
    /// Maximum MLS public remarks length, in characters
    pub max_length: usize,
    /// Reference documents, relative to the docs root
    pub reference_docs: Vec<PathBuf>,
}

/// Disclosure every jurisdiction requires
pub const EQUAL_HOUSING_OPPORTUNITY: &str = "Equal Housing Opportunity";

impl JurisdictionConfig {
    /// Stack the federal and industry layers under a state's own terms
    pub fn assemble(
        state: State,
        mls_name: &str,
        state_terms: &[TermDef],
        disclosures: &[&str],
        max_length: usize,
        reference_docs: &[&str],
    ) -> Self {
        let mut required_disclosures = vec![EQUAL_HOUSING_OPPORTUNITY.to_string()];
        required_disclosures.extend(disclosures.iter().map(|d| d.to_string()));

        let mut docs = vec![PathBuf::from("fair-housing/federal.txt")];
        docs.extend(reference_docs.iter().map(PathBuf::from));

        Self {
            state,
            mls_name: mls_name.to_string(),
            terms: compile_terms(&[FEDERAL_TERMS, INDUSTRY_TERMS, state_terms]),
            required_disclosures,
            max_length,
            reference_docs: docs,
        }
    }

    /// Categories this jurisdiction defines terms for
    pub fn categories(&self) -> BTreeSet<Category> {
        self.terms.iter().map(|t| t.category).collect()
    }

    /// Look up a term by its canonical text (case-insensitive)
    pub fn term(&self, term: &str) -> Option<&Term> {
        self.terms.iter().find(|t| t.term.eq_ignore_ascii_case(term))
    }
}

/// All jurisdiction configs plus the quality rules
#[derive(Debug, Clone)]
pub struct Registry {
    configs: BTreeMap<State, JurisdictionConfig>,
    quality: QualityRules,
}

impl Registry {
    /// Registry with every built-in jurisdiction
    pub fn builtin() -> Self {
        let configs = states::builtin_configs()
            .into_iter()
            .map(|config| (config.state, config))
            .collect();
        Self {
            configs,
            quality: QualityRules::builtin(),
        }
    }

    /// Add or replace a jurisdiction
    pub fn with_config(mut self, config: JurisdictionConfig) -> Self {
        self.configs.insert(config.state, config);
        self
    }

    /// Look up by state code or name; `None` if unknown or unsupported
    pub fn get(&self, code: &str) -> Option<&JurisdictionConfig> {
        State::parse_code(code).and_then(|state| self.config(state))
    }

    pub fn config(&self, state: State) -> Option<&JurisdictionConfig> {
        self.configs.get(&state)
    }

    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        self.configs.keys().copied()
    }

    pub fn quality(&self) -> &QualityRules {
        &self.quality
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
