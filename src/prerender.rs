use anyhow::{anyhow, bail, Context, Result};
use scraper::{Html, Selector};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::cards::{html_escape, join_cards, tool_card, CardContext};
use crate::catalog::{sort_by_date, Catalog, SiteStats};
use crate::seo::{item_list_json_ld, website_json_ld, InlineData};
use crate::strings::{strings, Strings};
use crate::template::{Slot, Template};
use crate::types::{Dataset, Lang, MemberProject, SortOrder, Tool};

pub const DIST_DIR: &str = "dist";

/// Input and output locations below the bundler's output directory
#[derive(Debug, Clone)]
pub struct Paths {
    pub dist: PathBuf,
}

impl Paths {
    pub fn new(dist: impl Into<PathBuf>) -> Self {
        Self { dist: dist.into() }
    }

    pub fn template(&self) -> PathBuf {
        self.dist.join("index.html")
    }

    pub fn data(&self, lang: Lang) -> PathBuf {
        self.dist.join(lang.data_file())
    }

    pub fn projects(&self, lang: Lang) -> PathBuf {
        self.dist.join(lang.projects_file())
    }

    /// Chinese replaces the bundler's page; English goes to `en/`
    pub fn output(&self, lang: Lang) -> PathBuf {
        match lang {
            Lang::Zh => self.dist.join("index.html"),
            Lang::En => self.dist.join("en").join("index.html"),
        }
    }
}

/// One language's documents, both raw (for embedding) and typed
struct LangInput {
    raw_data: Value,
    raw_projects: Value,
    dataset: Dataset,
    members: Vec<MemberProject>,
}

fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Could not parse {}", path.display()))
}

fn typed<T: DeserializeOwned>(value: &Value, path: &Path) -> Result<T> {
    serde_json::from_value(value.clone())
        .with_context(|| format!("Unexpected document shape in {}", path.display()))
}

fn load_lang(paths: &Paths, lang: Lang) -> Result<LangInput> {
    let data_path = paths.data(lang);
    let projects_path = paths.projects(lang);
    let raw_data = read_json(&data_path)?;
    let raw_projects = read_json(&projects_path)?;
    let dataset = typed(&raw_data, &data_path)?;
    let members = typed(&raw_projects, &projects_path)?;
    Ok(LangInput {
        raw_data,
        raw_projects,
        dataset,
        members,
    })
}

/// All cards of the default view: every tool, newest first
pub fn default_tool_grid(catalog: &Catalog, strings: &'static Strings) -> (String, usize) {
    let mut tools: Vec<&Tool> = catalog.tools.iter().collect();
    sort_by_date(&mut tools, SortOrder::Desc);
    let ctx = CardContext::unfiltered(strings, catalog);
    let count = tools.len();
    (join_cards(tools.into_iter().map(|t| tool_card(&ctx, t))), count)
}

/// Everything one language page substitutes into the template
struct PageFill {
    strings: &'static Strings,
    stats: SiteStats,
    cards: String,
    website_ld: String,
    head_end: String,
}

impl PageFill {
    fn value(&self, slot: Slot) -> String {
        let s = self.strings;
        match slot {
            Slot::HtmlLang => s.html_lang.to_string(),
            Slot::Title => html_escape(s.title),
            Slot::MetaDescription => html_escape(&s.meta_description(&self.stats)),
            Slot::MetaKeywords => html_escape(s.keywords),
            Slot::Canonical | Slot::OgUrl => html_escape(&s.page_url()),
            Slot::AlternateEn => html_escape(&strings(Lang::En).page_url()),
            Slot::OgTitle => html_escape(s.og_title),
            Slot::OgDescription => html_escape(s.og_description),
            Slot::OgLocale => s.og_locale.to_string(),
            Slot::OgLocaleAlternate => s.og_locale_alternate.to_string(),
            Slot::OgSiteName => html_escape(s.site_name),
            Slot::TwitterTitle => html_escape(s.twitter_title),
            Slot::TwitterDescription => html_escape(s.twitter_description),
            Slot::WebsiteJsonLd => self.website_ld.clone(),
            Slot::HeadEnd => self.head_end.clone(),
            Slot::LogoAlt | Slot::HeroTitle => html_escape(s.site_name),
            Slot::SearchPlaceholder => html_escape(s.search_placeholder),
            Slot::SearchClearAria => html_escape(s.clear_search_aria),
            Slot::LangToggleAria => html_escape(s.lang_toggle_aria),
            Slot::LangToggleText => html_escape(s.lang_toggle_text),
            Slot::HeroSubtitleLead => html_escape(s.hero_subtitle),
            Slot::HeroSubtitleTail => html_escape(s.hero_subtitle_end),
            Slot::TabTools => format!("\n            {} ", html_escape(s.tab_tools)),
            Slot::TabExperiences => format!("\n            {} ", html_escape(s.tab_experiences)),
            Slot::TabProjects => format!("\n            {} ", html_escape(s.tab_projects)),
            Slot::SortTitle => html_escape(s.sort_title),
            Slot::SortLabel => html_escape(s.sort_desc_label),
            Slot::ContentGrid => format!("\n{}\n", self.cards),
            Slot::EmptyHeading => html_escape(s.empty_heading),
            Slot::EmptyDescription => html_escape(s.empty_desc),
            Slot::ClearAllLabel => html_escape(s.empty_clear_btn),
            Slot::FooterText => format!("\n      {}\n    ", html_escape(s.site_name)),
        }
    }
}

/// A rendered page waiting to be written
#[derive(Debug, Clone)]
pub struct Page {
    pub lang: Lang,
    pub path: PathBuf,
    pub html: String,
    pub card_count: usize,
}

fn build_page(
    template: &Template,
    lang: Lang,
    catalog: &Catalog,
    stats: SiteStats,
    inline_script: &str,
    output: PathBuf,
) -> Result<Page> {
    let strings = strings(lang);
    let (cards, card_count) = default_tool_grid(catalog, strings);
    let item_list = item_list_json_ld(&catalog.tools, strings)?;
    let fill = PageFill {
        strings,
        stats,
        cards,
        website_ld: website_json_ld(strings)?,
        head_end: format!("{}\n{}\n", inline_script, item_list),
    };
    let html = template.render(|slot| fill.value(slot));
    verify_page(&html, strings, card_count)
        .with_context(|| format!("Generated {} page failed verification", lang.as_str()))?;
    Ok(Page {
        lang,
        path: output,
        html,
        card_count,
    })
}

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {}: {:?}", css, e))
}

/// Re-parse the page and check the parts crawlers depend on
fn verify_page(html: &str, strings: &Strings, expected_cards: usize) -> Result<()> {
    let document = Html::parse_document(html);

    let lang = document.root_element().value().attr("lang").unwrap_or_default();
    if lang != strings.html_lang {
        bail!("html lang is {:?}, expected {:?}", lang, strings.html_lang);
    }

    let title: String = document
        .select(&selector("title")?)
        .next()
        .map(|t| t.text().collect())
        .unwrap_or_default();
    if title != strings.title {
        bail!("title is {:?}, expected {:?}", title, strings.title);
    }

    let cards = document.select(&selector("#content-grid > article")?).count();
    if cards != expected_cards {
        bail!("found {} cards in #content-grid, expected {}", cards, expected_cards);
    }
    Ok(())
}

/// Replace `path` in one step so readers never see a partial page
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).with_context(|| format!("Could not create {}", dir.display()))?;
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Could not create temporary file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path)
        .with_context(|| format!("Could not write {}", path.display()))?;
    Ok(())
}

/// What one run produced
#[derive(Debug, Clone)]
pub struct Summary {
    pub pages: Vec<(Lang, PathBuf, usize)>,
    pub member_projects: usize,
    pub stats: SiteStats,
}

impl Summary {
    pub fn print(&self) {
        for (lang, path, count) in &self.pages {
            println!(
                "[{}] Generated {} with {} pre-rendered tool cards",
                lang.as_str(),
                path.display(),
                count
            );
        }
        println!(
            "Injected inline data (zh/en) and {} member projects",
            self.member_projects
        );
        println!(
            "Stats: {} tools, {} experiences, {} people",
            self.stats.tools, self.stats.experiences, self.stats.people
        );
    }
}

/// Render both language pages from `paths`. Nothing is written unless every input
/// loads and both pages render and verify.
pub fn render_pages(paths: &Paths) -> Result<(Vec<Page>, Summary)> {
    let template_path = paths.template();
    let source = fs::read_to_string(&template_path).with_context(|| {
        format!(
            "Could not read {}. Did the bundler run first?",
            template_path.display()
        )
    })?;
    let template = Template::parse(source)
        .with_context(|| format!("Unusable page template {}", template_path.display()))?;
    if !template.missing().is_empty() {
        log::info!(
            "{} optional regions not found in {}, left as is",
            template.missing().len(),
            template_path.display()
        );
    }

    let zh = load_lang(paths, Lang::Zh)?;
    let en = load_lang(paths, Lang::En)?;
    log::debug!(
        "Loaded {} zh tools, {} en tools",
        zh.dataset.tools.len(),
        en.dataset.tools.len()
    );

    // Shared by both pages
    let stats = SiteStats::from_dataset(&zh.dataset);
    let inline = InlineData {
        data_zh: zh.raw_data,
        data_en: en.raw_data,
        projects_zh: zh.raw_projects,
        projects_en: en.raw_projects,
    };
    let inline_script = inline.script()?;

    let mut pages = Vec::new();
    let mut member_projects = 0;
    for (lang, dataset, members) in [
        (Lang::Zh, zh.dataset, zh.members),
        (Lang::En, en.dataset, en.members),
    ] {
        let catalog = Catalog::build(lang, dataset, members);
        member_projects += catalog.member_project_count();
        let page = build_page(
            &template,
            lang,
            &catalog,
            stats,
            &inline_script,
            paths.output(lang),
        )?;
        log::info!(
            "Rendered {} page with {} cards ({} bytes)",
            lang.as_str(),
            page.card_count,
            page.html.len()
        );
        pages.push(page);
    }

    let summary = Summary {
        pages: pages
            .iter()
            .map(|p| (p.lang, p.path.clone(), p.card_count))
            .collect(),
        member_projects,
        stats,
    };
    Ok((pages, summary))
}

pub fn run_in(paths: &Paths) -> Result<Summary> {
    let (pages, summary) = render_pages(paths)?;
    for page in &pages {
        write_atomic(&page.path, &page.html)?;
    }
    Ok(summary)
}

/// Entry point for `ainotes prerender`
pub fn run_prerender() -> Result<()> {
    let summary = run_in(&Paths::new(DIST_DIR))?;
    summary.print();
    Ok(())
}
