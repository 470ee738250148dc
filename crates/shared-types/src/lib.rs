pub mod campaign;
pub mod path;
pub mod types;

pub use campaign::{
    Campaign, ExtractedText, MagazineAd, MagazineSet, MetaAd, Platform, Postcard, PostcardFront,
    PostcardSet, SearchAd, TextLeaves, ToneSet, STRATEGY_KEYS,
};
pub use path::{FieldPath, PathError, PathSegment};
pub use types::{
    Category, Finding, FindingSource, Fix, MatchedSpan, Priority, Severity, Verdict,
};
