//! Legal-layer classification from citation strings
//!
//! Every term carries a citation; which body of law it names decides the
//! layer. State statutes are recognised by each state's citation markers,
//! industry rules by the name of the body that issues them. Anything else is
//! federal: federal protections apply everywhere, so an unrecognised
//! citation can never produce a cross-jurisdiction leak.

use compliance_engine::State;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which body of law a rule comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegalLayer {
    Federal,
    State,
    Industry,
}

impl fmt::Display for LegalLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LegalLayer::Federal => "federal",
            LegalLayer::State => "state",
            LegalLayer::Industry => "industry",
        })
    }
}

lazy_static! {
    static ref STATE_MARKERS: Vec<(State, Regex)> = State::ALL
        .iter()
        .flat_map(|state| {
            state
                .citation_markers()
                .iter()
                .map(move |marker| (*state, Regex::new(marker).unwrap()))
        })
        .collect();
    static ref INDUSTRY_MARKERS: Vec<Regex> = [
        r"\bNAR\b",
        r"(?i)code\s+of\s+ethics",
        r"\bMLS\b",
        r"(?i)\bREALTORS?\b",
    ]
    .iter()
    .map(|m| Regex::new(m).unwrap())
    .collect();
}

/// The state whose statute a citation names, if any
pub fn citing_state(citation: &str) -> Option<State> {
    STATE_MARKERS
        .iter()
        .find(|(_, marker)| marker.is_match(citation))
        .map(|(state, _)| *state)
}

/// Classify a citation; state markers win over industry markers
pub fn classify_legal_layer(citation: &str) -> LegalLayer {
    if citing_state(citation).is_some() {
        LegalLayer::State
    } else if INDUSTRY_MARKERS.iter().any(|m| m.is_match(citation)) {
        LegalLayer::Industry
    } else {
        LegalLayer::Federal
    }
}
