//! Card markup shared by the prerendered pages and the live view.
//!
//! Both call the same functions, so a page rendered at build time and the first
//! client render produce the same structure and classes.

use regex::RegexBuilder;
use reqwest::Url;

use crate::catalog::Catalog;
use crate::strings::Strings;
use crate::types::{Experience, Project, Tool};

/// Experience text longer than this (in chars) is clamped with an expand toggle
pub const EXPAND_THRESHOLD: usize = 150;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape `text`, wrapping case-insensitive occurrences of `query` in `<mark>`
pub fn highlight(text: &str, query: &str) -> String {
    if query.is_empty() {
        return html_escape(text);
    }
    let re = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(_) => return html_escape(text),
    };

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in re.find_iter(text) {
        out.push_str(&html_escape(&text[last..m.start()]));
        out.push_str("<mark>");
        out.push_str(&html_escape(m.as_str()));
        out.push_str("</mark>");
        last = m.end();
    }
    out.push_str(&html_escape(&text[last..]));
    out
}

/// Host name without a leading "www.", or the input when it is not a URL
pub fn extract_domain(url: &str) -> String {
    match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) {
        Some(host) => host.strip_prefix("www.").map(str::to_string).unwrap_or(host),
        None => url.to_string(),
    }
}

/// What a card render depends on besides the item itself
#[derive(Debug, Clone, Copy)]
pub struct CardContext<'a> {
    pub strings: &'static Strings,
    pub catalog: &'a Catalog,
    /// Trimmed search text, highlighted in the output
    pub query: &'a str,
    pub selected_person: Option<&'a str>,
}

impl<'a> CardContext<'a> {
    /// Default view: no search text, nobody selected
    pub fn unfiltered(strings: &'static Strings, catalog: &'a Catalog) -> Self {
        Self {
            strings,
            catalog,
            query: "",
            selected_person: None,
        }
    }

    fn is_selected(&self, person: &str) -> bool {
        self.selected_person == Some(person)
    }
}

#[derive(Debug, Clone, Copy)]
enum ChipStyle {
    Tool,
    Experience,
    Project,
}

impl ChipStyle {
    fn classes(self, selected: bool) -> &'static str {
        match (self, selected) {
            (ChipStyle::Tool | ChipStyle::Experience, true) => "bg-cta text-white",
            (ChipStyle::Project, true) => "bg-purple-600 text-white",
            (ChipStyle::Tool, false) => "bg-blue-50 text-cta hover:bg-blue-100",
            (ChipStyle::Experience, false) => "bg-green-50 text-green-700 hover:bg-green-100",
            (ChipStyle::Project, false) => "bg-purple-50 text-purple-700 hover:bg-purple-100",
        }
    }
}

fn person_chip(ctx: &CardContext, person: &str, style: ChipStyle) -> String {
    format!(
        r#"<button data-person="{}" class="inline-person-chip px-2 py-0.5 rounded-full text-xs font-medium cursor-pointer transition-colors {}">{}</button>"#,
        html_escape(person),
        style.classes(ctx.is_selected(person)),
        highlight(person, ctx.query)
    )
}

fn link_chip(url: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="inline-flex items-center gap-1 text-xs text-cta hover:underline min-h-[28px]"><i data-lucide="external-link" class="w-3 h-3"></i>{}</a>"#,
        html_escape(url),
        html_escape(&extract_domain(url))
    )
}

fn perk_block(perk: &str, query: &str) -> String {
    format!(
        r#"<div class="flex items-center gap-2 bg-amber-50 border border-amber-200 rounded-lg px-3 py-2 mt-3"><i data-lucide="gift" class="w-4 h-4 text-amber-600 flex-shrink-0"></i><span class="text-xs text-amber-800">{}</span></div>"#,
        highlight(perk, query)
    )
}

fn link_row(links: &str) -> String {
    if links.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="flex flex-wrap gap-3">{}</div>"#, links)
    }
}

pub fn tool_card(ctx: &CardContext, tool: &Tool) -> String {
    let recommenders: String = tool
        .recommenders
        .iter()
        .map(|r| person_chip(ctx, r, ChipStyle::Tool))
        .collect();
    let urls = tool
        .urls
        .iter()
        .map(|u| link_chip(u))
        .collect::<Vec<_>>()
        .join(" ");

    let member = ctx.catalog.member_project_for(tool);
    let badge = if member.is_some() {
        format!(
            r#"<span class="text-xs font-medium bg-purple-100 text-purple-700 px-1.5 py-0.5 rounded-full whitespace-nowrap">{}</span>"#,
            html_escape(ctx.strings.member_badge)
        )
    } else {
        String::new()
    };
    let perk = member
        .and_then(|mp| mp.perk.as_deref())
        .map(|p| perk_block(p, ctx.query))
        .unwrap_or_default();

    format!(
        r#"<article class="bg-white border border-border rounded-xl p-5 hover:shadow-md transition-shadow relative">
      <div class="flex items-start justify-between gap-2 mb-2">
        <h3 class="font-heading text-sm font-semibold leading-snug">{}</h3>
        <div class="flex items-center gap-2 flex-shrink-0">{}<span class="text-xs text-muted whitespace-nowrap">{}</span></div>
      </div>
      <div class="flex flex-wrap gap-1.5 mb-3">{}</div>
      <p class="text-sm text-muted leading-relaxed mb-3">{}</p>
      {}
      {}
    </article>"#,
        highlight(&tool.name, ctx.query),
        badge,
        html_escape(&tool.date),
        recommenders,
        highlight(&tool.description, ctx.query),
        link_row(&urls),
        perk
    )
}

pub fn experience_card(ctx: &CardContext, exp: &Experience) -> String {
    let is_long = exp.content.chars().count() > EXPAND_THRESHOLD;
    let sharers: String = exp
        .sharers
        .iter()
        .map(|s| person_chip(ctx, s, ChipStyle::Experience))
        .collect();
    let expand_button = if is_long {
        format!(
            r#"<button data-action="expand" class="expand-btn text-xs text-cta font-medium mt-2 cursor-pointer hover:underline min-h-[28px]">{}</button>"#,
            html_escape(ctx.strings.expand_text)
        )
    } else {
        String::new()
    };

    format!(
        r#"<article class="bg-white border border-border rounded-xl p-5 hover:shadow-md transition-shadow">
      <div class="flex items-start justify-between gap-2 mb-2">
        <h3 class="font-heading text-sm font-semibold leading-snug">{}</h3>
        <span class="text-xs text-muted whitespace-nowrap flex-shrink-0">{}</span>
      </div>
      <div class="flex flex-wrap gap-1.5 mb-3">{}</div>
      <div class="exp-content-wrapper">
        <p class="exp-content text-sm text-muted leading-relaxed {}">{}</p>
        {}
      </div>
    </article>"#,
        highlight(&exp.name, ctx.query),
        html_escape(&exp.date),
        sharers,
        if is_long { "line-clamp-3" } else { "" },
        highlight(&exp.content, ctx.query),
        expand_button
    )
}

pub fn project_card(ctx: &CardContext, project: &Project) -> String {
    let url = project.url.as_deref().map(link_chip).unwrap_or_default();
    let perk = project
        .perk
        .as_deref()
        .map(|p| perk_block(p, ctx.query))
        .unwrap_or_default();

    format!(
        r#"<article class="bg-white border border-border rounded-xl p-5 hover:shadow-md transition-shadow">
      <div class="flex items-start justify-between gap-2 mb-2">
        <h3 class="font-heading text-sm font-semibold leading-snug">{}</h3>
        <span class="text-xs font-medium bg-purple-100 text-purple-700 px-1.5 py-0.5 rounded-full whitespace-nowrap flex-shrink-0">{}</span>
      </div>
      <div class="flex flex-wrap gap-1.5 mb-3">{}</div>
      <p class="text-sm text-muted leading-relaxed mb-3">{}</p>
      {}
      {}
    </article>"#,
        highlight(&project.tool_name, ctx.query),
        html_escape(ctx.strings.member_badge),
        person_chip(ctx, &project.author, ChipStyle::Project),
        highlight(&project.description, ctx.query),
        link_row(&url),
        perk
    )
}

/// Card grid content: one card per line
pub fn join_cards<I: IntoIterator<Item = String>>(cards: I) -> String {
    cards.into_iter().collect::<Vec<_>>().join("\n")
}

/// Inline message shown in place of the cards when a dataset load failed
pub fn load_error_markup(strings: &Strings) -> String {
    format!(
        r#"<p class="text-muted text-sm col-span-2 text-center py-8">{}</p>"#,
        html_escape(strings.load_error)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::strings;
    use crate::types::{Dataset, Lang, MemberProject};

    fn catalog_with(tools: Vec<Tool>, members: Vec<MemberProject>) -> Catalog {
        Catalog::build(
            Lang::Zh,
            Dataset {
                tools,
                experiences: vec![],
            },
            members,
        )
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn test_highlight() {
        assert_eq!(highlight("Cursor and cursor", "CURSOR"), "<mark>Cursor</mark> and <mark>cursor</mark>");
        assert_eq!(highlight("a<b", ""), "a&lt;b");
        assert_eq!(highlight("Q&A tips", "&"), "Q<mark>&amp;</mark>A tips");
        assert_eq!(highlight("price (1+1)", "(1+1)"), "price <mark>(1+1)</mark>");
    }

    #[test]
    fn test_extract_domain() {
        assert_eq!(extract_domain("https://www.cursor.com/pricing"), "cursor.com");
        assert_eq!(extract_domain("https://claude.ai"), "claude.ai");
        assert_eq!(extract_domain("not a url"), "not a url");
    }

    #[test]
    fn test_tool_card_with_member_perk() {
        let tool = Tool {
            name: "Widget".to_string(),
            description: "Makes <things>".to_string(),
            date: "2月3日".to_string(),
            recommenders: vec!["alice".to_string()],
            urls: vec!["https://www.widget.dev".to_string()],
            ..Default::default()
        };
        let catalog = catalog_with(
            vec![tool.clone()],
            vec![MemberProject {
                tool_name: "Widget".to_string(),
                author: "alice".to_string(),
                perk: Some("20% off".to_string()),
                ..Default::default()
            }],
        );
        let ctx = CardContext::unfiltered(strings(Lang::Zh), &catalog);
        let html = tool_card(&ctx, &tool);
        assert!(html.contains("群友作品"));
        assert!(html.contains("20% off"));
        assert!(html.contains("Makes &lt;things&gt;"));
        assert!(html.contains(">widget.dev</a>"));
        assert!(html.contains(r#"data-person="alice""#));
        assert!(html.contains("bg-blue-50 text-cta"));
    }

    #[test]
    fn test_tool_card_without_extras() {
        let tool = Tool {
            name: "Plain".to_string(),
            ..Default::default()
        };
        let catalog = catalog_with(vec![tool.clone()], vec![]);
        let ctx = CardContext::unfiltered(strings(Lang::En), &catalog);
        let html = tool_card(&ctx, &tool);
        assert!(!html.contains("Group Member Project"));
        assert!(!html.contains("flex flex-wrap gap-3"));
        assert!(!html.contains("bg-amber-50"));
    }

    #[test]
    fn test_selected_chip_and_highlight() {
        let tool = Tool {
            name: "Cursor".to_string(),
            recommenders: vec!["bob".to_string()],
            ..Default::default()
        };
        let catalog = catalog_with(vec![tool.clone()], vec![]);
        let ctx = CardContext {
            strings: strings(Lang::En),
            catalog: &catalog,
            query: "cur",
            selected_person: Some("bob"),
        };
        let html = tool_card(&ctx, &tool);
        assert!(html.contains("<mark>Cur</mark>sor"));
        assert!(html.contains("bg-cta text-white"));
    }

    #[test]
    fn test_experience_card_clamps_long_content() {
        let catalog = Catalog::default();
        let ctx = CardContext::unfiltered(strings(Lang::En), &catalog);
        let short = Experience {
            name: "short".to_string(),
            content: "x".repeat(EXPAND_THRESHOLD),
            ..Default::default()
        };
        let long = Experience {
            name: "long".to_string(),
            content: "经".repeat(EXPAND_THRESHOLD + 1),
            ..Default::default()
        };
        let short_html = experience_card(&ctx, &short);
        assert!(!short_html.contains("line-clamp-3"));
        assert!(!short_html.contains("expand-btn"));
        let long_html = experience_card(&ctx, &long);
        assert!(long_html.contains("line-clamp-3"));
        assert!(long_html.contains(r#"data-action="expand""#));
        assert!(long_html.contains("Show more"));
    }

    #[test]
    fn test_project_card() {
        let catalog = Catalog::default();
        let ctx = CardContext::unfiltered(strings(Lang::Zh), &catalog);
        let project = Project {
            tool_name: "Gadget".to_string(),
            author: "erin".to_string(),
            url: Some("https://gadget.io/x".to_string()),
            perk: None,
            description: String::new(),
        };
        let html = project_card(&ctx, &project);
        assert!(html.contains(r#"data-person="erin""#));
        assert!(html.contains("bg-purple-50 text-purple-700"));
        assert!(html.contains(">gadget.io</a>"));
        assert!(!html.contains("bg-amber-50"));
    }
}
