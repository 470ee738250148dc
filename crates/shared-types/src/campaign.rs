//! Multi-platform campaign document
//!
//! Every text leaf is reachable by a [`FieldPath`]. Extraction walks the
//! fixed schema order (platform by platform, tone by tone, array index
//! order); writes go through [`Campaign::with_text`] and friends, which clone
//! the document and never mutate the caller's copy.

use crate::path::{FieldPath, PathSegment};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A `(path, text)` pair produced by extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub path: FieldPath,
    pub text: String,
}

/// Tree nodes that contain addressable text leaves
pub trait TextLeaves {
    /// Append every leaf below this node, prefixing paths with `prefix`
    fn collect_leaves(&self, prefix: &mut FieldPath, out: &mut Vec<ExtractedText>);

    /// Resolve `segments` (relative to this node) to a leaf
    fn leaf(&self, segments: &[PathSegment]) -> Option<&str>;

    /// Mutable counterpart of [`TextLeaves::leaf`]
    fn leaf_mut(&mut self, segments: &[PathSegment]) -> Option<&mut String>;
}

impl TextLeaves for String {
    fn collect_leaves(&self, prefix: &mut FieldPath, out: &mut Vec<ExtractedText>) {
        out.push(ExtractedText {
            path: prefix.clone(),
            text: self.clone(),
        });
    }

    fn leaf(&self, segments: &[PathSegment]) -> Option<&str> {
        segments.is_empty().then_some(self.as_str())
    }

    fn leaf_mut(&mut self, segments: &[PathSegment]) -> Option<&mut String> {
        if segments.is_empty() {
            Some(self)
        } else {
            None
        }
    }
}

impl<T: TextLeaves> TextLeaves for Option<T> {
    fn collect_leaves(&self, prefix: &mut FieldPath, out: &mut Vec<ExtractedText>) {
        if let Some(inner) = self {
            inner.collect_leaves(prefix, out);
        }
    }

    fn leaf(&self, segments: &[PathSegment]) -> Option<&str> {
        self.as_ref()?.leaf(segments)
    }

    fn leaf_mut(&mut self, segments: &[PathSegment]) -> Option<&mut String> {
        self.as_mut()?.leaf_mut(segments)
    }
}

impl<T: TextLeaves> TextLeaves for Vec<T> {
    fn collect_leaves(&self, prefix: &mut FieldPath, out: &mut Vec<ExtractedText>) {
        for (i, item) in self.iter().enumerate() {
            prefix.push(PathSegment::Index(i));
            item.collect_leaves(prefix, out);
            prefix.pop();
        }
    }

    fn leaf(&self, segments: &[PathSegment]) -> Option<&str> {
        match segments.split_first() {
            Some((PathSegment::Index(i), rest)) => self.get(*i)?.leaf(rest),
            _ => None,
        }
    }

    fn leaf_mut(&mut self, segments: &[PathSegment]) -> Option<&mut String> {
        match segments.split_first() {
            Some((PathSegment::Index(i), rest)) => self.get_mut(*i)?.leaf_mut(rest),
            _ => None,
        }
    }
}

fn collect_field<T: TextLeaves>(
    prefix: &mut FieldPath,
    key: &str,
    value: &T,
    out: &mut Vec<ExtractedText>,
) {
    prefix.push(PathSegment::Field(key.to_string()));
    value.collect_leaves(prefix, out);
    prefix.pop();
}

/// Implements [`TextLeaves`] for a struct whose fields are visited in the
/// listed order under the listed keys.
macro_rules! text_leaves {
    ($ty:ty { $($field:ident => $key:literal),+ $(,)? }) => {
        impl TextLeaves for $ty {
            fn collect_leaves(&self, prefix: &mut FieldPath, out: &mut Vec<ExtractedText>) {
                $( collect_field(prefix, $key, &self.$field, out); )+
            }

            fn leaf(&self, segments: &[PathSegment]) -> Option<&str> {
                match segments.split_first() {
                    $( Some((PathSegment::Field(name), rest)) if name == $key => self.$field.leaf(rest), )+
                    _ => None,
                }
            }

            fn leaf_mut(&mut self, segments: &[PathSegment]) -> Option<&mut String> {
                match segments.split_first() {
                    $( Some((PathSegment::Field(name), rest)) if name == $key => self.$field.leaf_mut(rest), )+
                    _ => None,
                }
            }
        }
    };
}

/// Social copy written in three tones
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub casual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub luxury: Option<String>,
}

text_leaves!(ToneSet {
    professional => "professional",
    casual => "casual",
    luxury => "luxury",
});

/// Responsive search ad
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAd {
    pub headline: String,
    pub description: String,
}

text_leaves!(SearchAd {
    headline => "headline",
    description => "description",
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaAd {
    pub primary_text: String,
    pub headline: String,
    pub description: String,
}

text_leaves!(MetaAd {
    primary_text => "primaryText",
    headline => "headline",
    description => "description",
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostcardFront {
    pub headline: String,
    pub body: String,
    pub cta: String,
}

text_leaves!(PostcardFront {
    headline => "headline",
    body => "body",
    cta => "cta",
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Postcard {
    pub front: PostcardFront,
    pub back: String,
}

text_leaves!(Postcard {
    front => "front",
    back => "back",
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostcardSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional: Option<Postcard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub casual: Option<Postcard>,
}

text_leaves!(PostcardSet {
    professional => "professional",
    casual => "casual",
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagazineAd {
    pub headline: String,
    pub body: String,
    pub cta: String,
}

text_leaves!(MagazineAd {
    headline => "headline",
    body => "body",
    cta => "cta",
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagazineSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional: Option<MagazineAd>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub luxury: Option<MagazineAd>,
}

text_leaves!(MagazineSet {
    professional => "professional",
    luxury => "luxury",
});

/// Platforms a campaign can be generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    Instagram,
    Facebook,
    Twitter,
    Linkedin,
    GoogleAds,
    MetaAd,
    Zillow,
    RealtorCom,
    HomesTrulia,
    MlsDescription,
    Postcard,
    MagazineFullPage,
    MagazineHalfPage,
}

impl Platform {
    pub const ALL: [Platform; 13] = [
        Platform::Instagram,
        Platform::Facebook,
        Platform::Twitter,
        Platform::Linkedin,
        Platform::GoogleAds,
        Platform::MetaAd,
        Platform::Zillow,
        Platform::RealtorCom,
        Platform::HomesTrulia,
        Platform::MlsDescription,
        Platform::Postcard,
        Platform::MagazineFullPage,
        Platform::MagazineHalfPage,
    ];

    /// Top-level document key
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::GoogleAds => "googleAds",
            Platform::MetaAd => "metaAd",
            Platform::Zillow => "zillow",
            Platform::RealtorCom => "realtorCom",
            Platform::HomesTrulia => "homesTrulia",
            Platform::MlsDescription => "mlsDescription",
            Platform::Postcard => "postcard",
            Platform::MagazineFullPage => "magazineFullPage",
            Platform::MagazineHalfPage => "magazineHalfPage",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Platform::ALL.iter().copied().find(|p| p.key() == key)
    }
}

/// Campaign strategy keys: metadata, not public-facing ad copy
pub const STRATEGY_KEYS: [&str; 4] = [
    "hashtags",
    "callsToAction",
    "targetingNotes",
    "sellingPoints",
];

/// Generated marketing campaign for one listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Campaign {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<ToneSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<ToneSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_ads: Option<Vec<SearchAd>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_ad: Option<MetaAd>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zillow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realtor_com: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homes_trulia: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mls_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcard: Option<PostcardSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magazine_full_page: Option<MagazineSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magazine_half_page: Option<MagazineSet>,

    // Strategy
    pub hashtags: Vec<String>,
    pub calls_to_action: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targeting_notes: Option<String>,
    pub selling_points: Vec<String>,
}

impl Campaign {
    /// Build a campaign from generation output, keeping only requested platforms
    ///
    /// Unsolicited platform keys are dropped (and logged) before the JSON is
    /// deserialized. Strategy keys are always kept.
    pub fn from_generated(
        mut value: serde_json::Value,
        requested: &[Platform],
    ) -> Result<Self, serde_json::Error> {
        if let Some(object) = value.as_object_mut() {
            object.retain(|key, _| {
                if STRATEGY_KEYS.contains(&key.as_str()) {
                    return true;
                }
                match Platform::from_key(key) {
                    Some(platform) if requested.contains(&platform) => true,
                    Some(_) => {
                        warn!(key = %key, "Dropping unrequested platform from generated campaign");
                        false
                    }
                    None => {
                        warn!(key = %key, "Dropping unknown key from generated campaign");
                        false
                    }
                }
            });
        }
        serde_json::from_value(value)
    }

    /// Every text leaf, including strategy fields
    pub fn extract(&self) -> Vec<ExtractedText> {
        let mut out = Vec::new();
        let mut prefix = FieldPath::default();
        self.collect_ad_copy(&mut prefix, &mut out);
        self.collect_strategy(&mut prefix, &mut out);
        out
    }

    /// Public-facing ad copy only (no hashtags, CTAs, targeting, selling points)
    pub fn extract_ad_copy(&self) -> Vec<ExtractedText> {
        let mut out = Vec::new();
        let mut prefix = FieldPath::default();
        self.collect_ad_copy(&mut prefix, &mut out);
        out
    }

    pub fn text_at(&self, path: &FieldPath) -> Option<&str> {
        self.leaf(path.segments())
    }

    /// Copy of this campaign with the leaf at `path` replaced
    ///
    /// Unknown paths leave the copy unchanged and log a warning.
    pub fn with_text(&self, path: &FieldPath, text: &str) -> Self {
        let mut next = self.clone();
        if !next.replace_leaf(path, text) {
            warn!(path = %path, "Ignoring write to unknown campaign path");
        }
        next
    }

    /// Like [`Campaign::with_text`], taking the boundary string form of the path
    pub fn with_text_at(&self, path: &str, text: &str) -> Self {
        match path.parse::<FieldPath>() {
            Ok(parsed) => self.with_text(&parsed, text),
            Err(e) => {
                warn!(path = %path, error = %e, "Ignoring write to malformed campaign path");
                self.clone()
            }
        }
    }

    /// Apply several leaf replacements to one copy
    ///
    /// Returns the new campaign and the paths that did not resolve.
    pub fn with_texts<I>(&self, updates: I) -> (Self, Vec<FieldPath>)
    where
        I: IntoIterator<Item = (FieldPath, String)>,
    {
        let mut next = self.clone();
        let mut skipped = Vec::new();
        for (path, text) in updates {
            if !next.replace_leaf(&path, &text) {
                warn!(path = %path, "Ignoring write to unknown campaign path");
                skipped.push(path);
            }
        }
        (next, skipped)
    }

    fn replace_leaf(&mut self, path: &FieldPath, text: &str) -> bool {
        match self.leaf_mut(path.segments()) {
            Some(leaf) => {
                *leaf = text.to_string();
                true
            }
            None => false,
        }
    }

    fn collect_ad_copy(&self, prefix: &mut FieldPath, out: &mut Vec<ExtractedText>) {
        collect_field(prefix, "instagram", &self.instagram, out);
        collect_field(prefix, "facebook", &self.facebook, out);
        collect_field(prefix, "twitter", &self.twitter, out);
        collect_field(prefix, "linkedin", &self.linkedin, out);
        collect_field(prefix, "googleAds", &self.google_ads, out);
        collect_field(prefix, "metaAd", &self.meta_ad, out);
        collect_field(prefix, "zillow", &self.zillow, out);
        collect_field(prefix, "realtorCom", &self.realtor_com, out);
        collect_field(prefix, "homesTrulia", &self.homes_trulia, out);
        collect_field(prefix, "mlsDescription", &self.mls_description, out);
        collect_field(prefix, "postcard", &self.postcard, out);
        collect_field(prefix, "magazineFullPage", &self.magazine_full_page, out);
        collect_field(prefix, "magazineHalfPage", &self.magazine_half_page, out);
    }

    fn collect_strategy(&self, prefix: &mut FieldPath, out: &mut Vec<ExtractedText>) {
        collect_field(prefix, "hashtags", &self.hashtags, out);
        collect_field(prefix, "callsToAction", &self.calls_to_action, out);
        collect_field(prefix, "targetingNotes", &self.targeting_notes, out);
        collect_field(prefix, "sellingPoints", &self.selling_points, out);
    }
}

impl TextLeaves for Campaign {
    fn collect_leaves(&self, prefix: &mut FieldPath, out: &mut Vec<ExtractedText>) {
        self.collect_ad_copy(prefix, out);
        self.collect_strategy(prefix, out);
    }

    fn leaf(&self, segments: &[PathSegment]) -> Option<&str> {
        let (PathSegment::Field(name), rest) = segments.split_first()? else {
            return None;
        };
        match name.as_str() {
            "instagram" => self.instagram.leaf(rest),
            "facebook" => self.facebook.leaf(rest),
            "twitter" => self.twitter.leaf(rest),
            "linkedin" => self.linkedin.leaf(rest),
            "googleAds" => self.google_ads.leaf(rest),
            "metaAd" => self.meta_ad.leaf(rest),
            "zillow" => self.zillow.leaf(rest),
            "realtorCom" => self.realtor_com.leaf(rest),
            "homesTrulia" => self.homes_trulia.leaf(rest),
            "mlsDescription" => self.mls_description.leaf(rest),
            "postcard" => self.postcard.leaf(rest),
            "magazineFullPage" => self.magazine_full_page.leaf(rest),
            "magazineHalfPage" => self.magazine_half_page.leaf(rest),
            "hashtags" => self.hashtags.leaf(rest),
            "callsToAction" => self.calls_to_action.leaf(rest),
            "targetingNotes" => self.targeting_notes.leaf(rest),
            "sellingPoints" => self.selling_points.leaf(rest),
            _ => None,
        }
    }

    fn leaf_mut(&mut self, segments: &[PathSegment]) -> Option<&mut String> {
        let (PathSegment::Field(name), rest) = segments.split_first()? else {
            return None;
        };
        match name.as_str() {
            "instagram" => self.instagram.leaf_mut(rest),
            "facebook" => self.facebook.leaf_mut(rest),
            "twitter" => self.twitter.leaf_mut(rest),
            "linkedin" => self.linkedin.leaf_mut(rest),
            "googleAds" => self.google_ads.leaf_mut(rest),
            "metaAd" => self.meta_ad.leaf_mut(rest),
            "zillow" => self.zillow.leaf_mut(rest),
            "realtorCom" => self.realtor_com.leaf_mut(rest),
            "homesTrulia" => self.homes_trulia.leaf_mut(rest),
            "mlsDescription" => self.mls_description.leaf_mut(rest),
            "postcard" => self.postcard.leaf_mut(rest),
            "magazineFullPage" => self.magazine_full_page.leaf_mut(rest),
            "magazineHalfPage" => self.magazine_half_page.leaf_mut(rest),
            "hashtags" => self.hashtags.leaf_mut(rest),
            "callsToAction" => self.calls_to_action.leaf_mut(rest),
            "targetingNotes" => self.targeting_notes.leaf_mut(rest),
            "sellingPoints" => self.selling_points.leaf_mut(rest),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> Campaign {
        Campaign {
            facebook: Some(ToneSet {
                professional: Some("Move-in ready ranch home.".to_string()),
                casual: Some("Come see this sweet spot!".to_string()),
                luxury: None,
            }),
            twitter: Some("Just listed in Bozeman".to_string()),
            google_ads: Some(vec![
                SearchAd {
                    headline: "3BR Ranch in Bozeman".to_string(),
                    description: "Updated kitchen, big yard.".to_string(),
                },
                SearchAd {
                    headline: "Open House Saturday".to_string(),
                    description: "Tour this home 1-3pm.".to_string(),
                },
            ]),
            postcard: Some(PostcardSet {
                professional: Some(Postcard {
                    front: PostcardFront {
                        headline: "Just Listed".to_string(),
                        body: "A classic ranch on a quiet street.".to_string(),
                        cta: "Call to tour".to_string(),
                    },
                    back: "Listing details inside.".to_string(),
                }),
                casual: None,
            }),
            hashtags: vec!["#justlisted".to_string(), "#bozeman".to_string()],
            targeting_notes: Some("First-time buyers".to_string()),
            ..Default::default()
        }
    }

    fn paths(texts: &[ExtractedText]) -> Vec<String> {
        texts.iter().map(|t| t.path.to_string()).collect()
    }

    #[test]
    fn test_extract_follows_schema_order() {
        assert_eq!(
            paths(&sample().extract()),
            vec![
                "facebook.professional",
                "facebook.casual",
                "twitter",
                "googleAds[0].headline",
                "googleAds[0].description",
                "googleAds[1].headline",
                "googleAds[1].description",
                "postcard.professional.front.headline",
                "postcard.professional.front.body",
                "postcard.professional.front.cta",
                "postcard.professional.back",
                "hashtags[0]",
                "hashtags[1]",
                "targetingNotes",
            ]
        );
    }

    #[test]
    fn test_ad_copy_excludes_strategy_fields() {
        let ad_copy = paths(&sample().extract_ad_copy());
        assert!(ad_copy.iter().all(|p| !p.starts_with("hashtags")));
        assert!(!ad_copy.contains(&"targetingNotes".to_string()));
        assert_eq!(ad_copy.len(), 11);
    }

    #[test]
    fn test_with_text_replaces_only_addressed_leaf() {
        let original = sample();
        let path: FieldPath = "googleAds[1].headline".parse().unwrap();
        let updated = original.with_text(&path, "Open House Sunday");

        assert_eq!(updated.text_at(&path), Some("Open House Sunday"));
        assert_eq!(original.text_at(&path), Some("Open House Saturday"));

        let before = original.extract();
        let after = updated.extract();
        for (b, a) in before.iter().zip(after.iter()) {
            assert_eq!(b.path, a.path);
            if b.path != path {
                assert_eq!(b.text, a.text);
            }
        }
    }

    #[test]
    fn test_unknown_or_malformed_paths_are_noops() {
        let original = sample();
        assert_eq!(original.with_text_at("facebook.luxury", "x"), original);
        assert_eq!(original.with_text_at("googleAds[7].headline", "x"), original);
        assert_eq!(original.with_text_at("googleAds.headline", "x"), original);
        assert_eq!(original.with_text_at("pinterest", "x"), original);
        assert_eq!(original.with_text_at("facebook..casual", "x"), original);
        assert_eq!(original.with_text_at("facebook", "x"), original);
    }

    #[test]
    fn test_with_texts_reports_skipped_paths() {
        let original = sample();
        let (updated, skipped) = original.with_texts(vec![
            ("twitter".parse().unwrap(), "New tweet".to_string()),
            ("linkedin".parse().unwrap(), "Not present".to_string()),
        ]);
        assert_eq!(updated.twitter.as_deref(), Some("New tweet"));
        assert_eq!(updated.linkedin, None);
        assert_eq!(skipped, vec!["linkedin".parse::<FieldPath>().unwrap()]);
    }

    #[test]
    fn test_from_generated_drops_unrequested_platforms() {
        let generated = json!({
            "twitter": "Just listed!",
            "facebook": { "casual": "Hey neighbors" },
            "tiktok": "Unsupported",
            "hashtags": ["#home"],
        });
        let campaign = Campaign::from_generated(generated, &[Platform::Twitter]).unwrap();
        assert_eq!(campaign.twitter.as_deref(), Some("Just listed!"));
        assert_eq!(campaign.facebook, None);
        assert_eq!(campaign.hashtags, vec!["#home".to_string()]);
    }

    #[test]
    fn test_json_keys_match_path_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("googleAds").is_some());
        assert!(value.get("targetingNotes").is_some());
        assert_eq!(
            value["postcard"]["professional"]["front"]["headline"],
            json!("Just Listed")
        );
    }
}
