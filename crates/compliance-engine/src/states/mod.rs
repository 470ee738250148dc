//! State-specific term tables
//!
//! Each state module adds the protected classes its fair housing statute
//! covers beyond the federal baseline, and assembles the full
//! [`JurisdictionConfig`] for that state.
//!
//! State tables deliberately do not overlap: a term belongs to the one
//! statute that introduces it, so cross-jurisdiction isolation checks stay
//! meaningful.

pub mod california;
pub mod florida;
pub mod montana;
pub mod new_york;
pub mod ohio;

use crate::jurisdiction::{JurisdictionConfig, State};
use crate::terms::TermDef;

/// Configs for every implemented state
pub fn builtin_configs() -> Vec<JurisdictionConfig> {
    vec![
        montana::config(),
        ohio::config(),
        california::config(),
        new_york::config(),
        florida::config(),
    ]
}

/// The state's own layer, without federal and industry terms
pub fn state_terms(state: State) -> &'static [TermDef] {
    match state {
        State::MT => montana::STATE_TERMS,
        State::OH => ohio::STATE_TERMS,
        State::CA => california::STATE_TERMS,
        State::NY => new_york::STATE_TERMS,
        State::FL => florida::STATE_TERMS,
        _ => &[],
    }
}

/// Check if state has a built-in term table
pub fn has_implementation(state: State) -> bool {
    !state_terms(state).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_every_implemented_state_has_terms() {
        for state in State::implemented_states() {
            assert!(has_implementation(state), "{} has no terms", state);
        }
        assert!(!has_implementation(State::TX));
    }

    #[test]
    fn test_state_terms_cite_their_own_statute() {
        for state in State::implemented_states() {
            let markers: Vec<regex::Regex> = state
                .citation_markers()
                .iter()
                .map(|m| regex::Regex::new(m).unwrap())
                .collect();
            for def in state_terms(state) {
                assert!(
                    markers.iter().any(|m| m.is_match(def.legal_citation)),
                    "{} term '{}' does not cite {} law",
                    state,
                    def.term,
                    state
                );
            }
        }
    }

    #[test]
    fn test_state_tables_do_not_overlap() {
        let mut owners: HashMap<String, State> = HashMap::new();
        for state in State::implemented_states() {
            for def in state_terms(state) {
                if let Some(previous) = owners.insert(def.term.to_lowercase(), state) {
                    panic!("'{}' defined by both {} and {}", def.term, previous, state);
                }
            }
        }
    }
}
