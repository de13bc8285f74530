//! Named insertion points in the bundler's `index.html`.
//!
//! Every slot is located once against the untouched document. Rendering walks the
//! slots in document order and copies the text between them verbatim, so fills never
//! see each other's output and their order does not matter.

use regex::Regex;
use thiserror::Error;

/// A replaceable region of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    HtmlLang,
    Title,
    MetaDescription,
    MetaKeywords,
    Canonical,
    AlternateEn,
    OgTitle,
    OgDescription,
    OgUrl,
    OgLocale,
    OgLocaleAlternate,
    OgSiteName,
    TwitterTitle,
    TwitterDescription,
    WebsiteJsonLd,
    /// Zero-width point just before `</head>`
    HeadEnd,
    LogoAlt,
    SearchPlaceholder,
    SearchClearAria,
    LangToggleAria,
    LangToggleText,
    HeroTitle,
    /// Subtitle text before the profile link
    HeroSubtitleLead,
    /// Subtitle text after the profile link
    HeroSubtitleTail,
    TabTools,
    TabExperiences,
    TabProjects,
    SortTitle,
    SortLabel,
    ContentGrid,
    EmptyHeading,
    EmptyDescription,
    ClearAllLabel,
    FooterText,
}

struct Anchor {
    pattern: &'static str,
    /// Capture group name -> slot
    groups: &'static [(&'static str, Slot)],
    required: bool,
}

const fn anchor(pattern: &'static str, slot: &'static [(&'static str, Slot)], required: bool) -> Anchor {
    Anchor {
        pattern,
        groups: slot,
        required,
    }
}

const ANCHORS: &[Anchor] = &[
    anchor(r#"<html lang="(?P<v>[^"]*)""#, &[("v", Slot::HtmlLang)], true),
    anchor(r#"<title>(?P<v>[^<]*)</title>"#, &[("v", Slot::Title)], true),
    anchor(r#"<meta name="description" content="(?P<v>[^"]*)""#, &[("v", Slot::MetaDescription)], true),
    anchor(r#"<meta name="keywords" content="(?P<v>[^"]*)""#, &[("v", Slot::MetaKeywords)], false),
    anchor(r#"<link rel="canonical" href="(?P<v>[^"]*)""#, &[("v", Slot::Canonical)], false),
    anchor(r#"<link rel="alternate" hreflang="en" href="(?P<v>[^"]*)""#, &[("v", Slot::AlternateEn)], false),
    anchor(r#"<meta property="og:title" content="(?P<v>[^"]*)""#, &[("v", Slot::OgTitle)], false),
    anchor(r#"<meta property="og:description" content="(?P<v>[^"]*)""#, &[("v", Slot::OgDescription)], false),
    anchor(r#"<meta property="og:url" content="(?P<v>[^"]*)""#, &[("v", Slot::OgUrl)], false),
    anchor(r#"<meta property="og:locale" content="(?P<v>[^"]*)""#, &[("v", Slot::OgLocale)], false),
    anchor(r#"<meta property="og:locale:alternate" content="(?P<v>[^"]*)""#, &[("v", Slot::OgLocaleAlternate)], false),
    anchor(r#"<meta property="og:site_name" content="(?P<v>[^"]*)""#, &[("v", Slot::OgSiteName)], false),
    anchor(r#"<meta name="twitter:title" content="(?P<v>[^"]*)""#, &[("v", Slot::TwitterTitle)], false),
    anchor(r#"<meta name="twitter:description" content="(?P<v>[^"]*)""#, &[("v", Slot::TwitterDescription)], false),
    anchor(
        r#"(?P<v><script type="application/ld\+json">\s*\{[^}]*"@type":\s*"WebSite"[\s\S]*?\}\s*</script>)"#,
        &[("v", Slot::WebsiteJsonLd)],
        false,
    ),
    anchor(r#"(?P<v>)</head>"#, &[("v", Slot::HeadEnd)], true),
    anchor(r#"<img src="/logo-32\.png" alt="(?P<v>[^"]*)""#, &[("v", Slot::LogoAlt)], false),
    anchor(r#"id="search-input"[\s\S]*?placeholder="(?P<v>[^"]*)""#, &[("v", Slot::SearchPlaceholder)], false),
    anchor(r#"id="search-clear"[\s\S]*?aria-label="(?P<v>[^"]*)""#, &[("v", Slot::SearchClearAria)], false),
    anchor(
        r#"id="lang-toggle"[^>]*?aria-label="(?P<aria>[^"]*)"[^>]*>(?P<text>[^<]*)</button>"#,
        &[("aria", Slot::LangToggleAria), ("text", Slot::LangToggleText)],
        false,
    ),
    anchor(r#"<h1 class="font-heading[^"]*">(?P<v>[^<]*)</h1>"#, &[("v", Slot::HeroTitle)], true),
    anchor(
        r#"<p class="text-muted text-base sm:text-lg">(?P<lead>[\s\S]*?)<a href="https://x\.com/ZQInTheShell"[\s\S]*?</a>(?P<tail>[\s\S]*?)</p>"#,
        &[("lead", Slot::HeroSubtitleLead), ("tail", Slot::HeroSubtitleTail)],
        false,
    ),
    anchor(
        r#"id="tab-tools"[\s\S]*?<i data-lucide="wrench"[^>]*></i>(?P<v>\s*[^<]*)"#,
        &[("v", Slot::TabTools)],
        false,
    ),
    anchor(
        r#"id="tab-experiences"[\s\S]*?<i data-lucide="lightbulb"[^>]*></i>(?P<v>\s*[^<]*)"#,
        &[("v", Slot::TabExperiences)],
        false,
    ),
    anchor(
        r#"id="tab-projects"[\s\S]*?<i data-lucide="users"[^>]*></i>(?P<v>\s*[^<]*)"#,
        &[("v", Slot::TabProjects)],
        false,
    ),
    anchor(r#"id="sort-btn"[\s\S]*?title="(?P<v>[^"]*)""#, &[("v", Slot::SortTitle)], false),
    anchor(r#"<span id="sort-label">(?P<v>[^<]*)</span>"#, &[("v", Slot::SortLabel)], false),
    anchor(r#"<div id="content-grid"[^>]*>(?P<v>[\s\S]*?)</div>"#, &[("v", Slot::ContentGrid)], true),
    anchor(r#"id="empty-state"[\s\S]*?<h3[^>]*>(?P<v>[^<]*)</h3>"#, &[("v", Slot::EmptyHeading)], false),
    anchor(
        r#"id="empty-state"[\s\S]*?<p class="text-muted text-sm[^"]*">(?P<v>[^<]*)</p>"#,
        &[("v", Slot::EmptyDescription)],
        false,
    ),
    anchor(r#"id="clear-all-btn"[^>]*>(?P<v>[^<]*)</button>"#, &[("v", Slot::ClearAllLabel)], false),
    anchor(
        r#"<footer[^>]*>[\s\S]*?<div class="max-w-5xl mx-auto text-center text-muted text-sm">(?P<v>[^<]*)</div>"#,
        &[("v", Slot::FooterText)],
        false,
    ),
];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("required marker for {0:?} not found in the page template")]
    MissingAnchor(Slot),
    #[error("template regions {0:?} and {1:?} overlap")]
    Overlap(Slot, Slot),
    #[error("invalid template marker pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Clone, Copy)]
struct Span {
    slot: Slot,
    start: usize,
    end: usize,
}

/// Parsed page template: the source text plus the byte ranges of every slot found
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    spans: Vec<Span>,
    missing: Vec<Slot>,
}

impl Template {
    pub fn parse(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        let mut spans = Vec::new();
        let mut missing = Vec::new();

        for anchor in ANCHORS {
            let re = Regex::new(anchor.pattern)?;
            match re.captures(&source) {
                Some(caps) => {
                    for (group, slot) in anchor.groups {
                        if let Some(m) = caps.name(group) {
                            spans.push(Span {
                                slot: *slot,
                                start: m.start(),
                                end: m.end(),
                            });
                        }
                    }
                }
                None if anchor.required => {
                    return Err(TemplateError::MissingAnchor(anchor.groups[0].1));
                }
                None => {
                    for (_, slot) in anchor.groups {
                        log::warn!("Page template has no marker for {:?}, leaving it as is", slot);
                        missing.push(*slot);
                    }
                }
            }
        }

        spans.sort_by_key(|s| (s.start, s.end));
        for pair in spans.windows(2) {
            if pair[0].end > pair[1].start {
                return Err(TemplateError::Overlap(pair[0].slot, pair[1].slot));
            }
        }

        Ok(Self {
            source,
            spans,
            missing,
        })
    }

    /// Slots whose optional marker was absent
    pub fn missing(&self) -> &[Slot] {
        &self.missing
    }

    /// Current text of a slot in the source document
    #[cfg(test)]
    pub fn original(&self, slot: Slot) -> Option<&str> {
        self.spans
            .iter()
            .find(|s| s.slot == slot)
            .map(|s| &self.source[s.start..s.end])
    }

    /// Produce a new document with each slot's region replaced by `fill(slot)`
    pub fn render<F>(&self, mut fill: F) -> String
    where
        F: FnMut(Slot) -> String,
    {
        let mut out = String::with_capacity(self.source.len() * 2);
        let mut cursor = 0;
        for span in &self.spans {
            out.push_str(&self.source[cursor..span.start]);
            out.push_str(&fill(span.slot));
            cursor = span.end;
        }
        out.push_str(&self.source[cursor..]);
        out
    }
}
