//! The view state engine.
//!
//! One [`Controller`] owns the UI state and the active language's catalog. Every
//! named transition ends in a single deterministic render that produces a complete
//! [`Frame`], which replaces whatever was shown before. Clicks are delegated: the
//! clicked element's attributes map to an [`Action`], so replaced markup never needs
//! wiring again.

use scraper::ElementRef;
use std::time::Instant;

use crate::cards::{
    experience_card, html_escape, join_cards, load_error_markup, project_card, tool_card,
    CardContext,
};
use crate::catalog::{sort_by_date, Catalog, Filter};
use crate::debounce::Debouncer;
use crate::source::{DataSource, LoadError};
use crate::strings::{strings, Strings};
use crate::types::{Lang, SortOrder, Tab};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub active_tab: Tab,
    /// Trimmed search text
    pub search_query: String,
    pub selected_person: Option<String>,
    pub sort_order: SortOrder,
    pub lang: Lang,
}

impl ViewState {
    pub fn new(lang: Lang) -> Self {
        Self {
            lang,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectTab(Tab),
    /// Raw search box contents after a keystroke
    SearchInput(String),
    ClearSearch,
    TogglePerson(String),
    ToggleSort,
    ClearAll,
    ToggleLanguage,
    /// Expand or collapse one experience card; handled by the card itself
    Expand,
}

impl Action {
    /// Resolve a clicked element from its attributes. Card-level data attributes take
    /// precedence over element ids.
    pub fn from_attributes<'a, I>(attrs: I) -> Option<Action>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut id = None;
        let mut action = None;
        for (name, value) in attrs {
            match name {
                "data-person" => return Some(Action::TogglePerson(value.to_string())),
                "data-action" => action = Some(value),
                "id" => id = Some(value),
                _ => {}
            }
        }

        if action == Some("expand") {
            return Some(Action::Expand);
        }
        match id? {
            "tab-tools" => Some(Action::SelectTab(Tab::Tools)),
            "tab-experiences" => Some(Action::SelectTab(Tab::Experiences)),
            "tab-projects" => Some(Action::SelectTab(Tab::Projects)),
            "sort-btn" => Some(Action::ToggleSort),
            "search-clear" => Some(Action::ClearSearch),
            "clear-all-btn" => Some(Action::ClearAll),
            "lang-toggle" => Some(Action::ToggleLanguage),
            _ => None,
        }
    }

    pub fn from_element(element: ElementRef) -> Option<Action> {
        Action::from_attributes(element.value().attrs())
    }
}

/// Card-local expand state of one long experience. Lost on every re-render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandToggle {
    pub expanded: bool,
}

impl ExpandToggle {
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn clamp_class(&self) -> &'static str {
        if self.expanded {
            ""
        } else {
            "line-clamp-3"
        }
    }

    pub fn label(&self, strings: &Strings) -> &'static str {
        if self.expanded {
            strings.collapse_text
        } else {
            strings.expand_text
        }
    }
}

/// An experience card after its expand button was clicked
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedCard {
    pub toggle: ExpandToggle,
    /// Class list of the content paragraph
    pub content_class: String,
    pub text: String,
    pub button_label: &'static str,
}

/// Toggle the card that owns an expand `button`. The current state is read back from
/// the paragraph's clamp class, so nothing is kept between renders.
pub fn expand_card(button: ElementRef, strings: &Strings) -> Option<ExpandedCard> {
    let wrapper = button
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().classes().any(|c| c == "exp-content-wrapper"))?;
    let content = wrapper
        .children()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().classes().any(|c| c == "exp-content"))?;

    let mut toggle = ExpandToggle {
        expanded: !content.value().classes().any(|c| c == "line-clamp-3"),
    };
    toggle.toggle();

    let mut classes: Vec<&str> = content
        .value()
        .classes()
        .filter(|c| *c != "line-clamp-3")
        .collect();
    if !toggle.clamp_class().is_empty() {
        classes.push(toggle.clamp_class());
    }
    Some(ExpandedCard {
        toggle,
        content_class: classes.join(" "),
        text: content.text().collect(),
        button_label: toggle.label(strings),
    })
}

const TAB_BASE_CLASS: &str = "tab-btn flex items-center gap-2 px-3 sm:px-4 py-3 text-sm font-medium cursor-pointer border-b-[3px] min-h-[44px]";

/// One tab button with the count of its filtered items
#[derive(Debug, Clone, PartialEq)]
pub struct TabChrome {
    pub tab: Tab,
    pub label: &'static str,
    pub count: usize,
    pub active: bool,
}

impl TabChrome {
    pub fn class(&self) -> String {
        let state = if self.active {
            "border-cta text-cta"
        } else {
            "border-transparent text-muted hover:text-text"
        };
        format!("{} {}", TAB_BASE_CLASS, state)
    }

    pub fn count_class(&self) -> &'static str {
        if self.active {
            "text-xs px-1.5 py-0.5 rounded-full bg-cta/10 text-cta"
        } else {
            "text-xs px-1.5 py-0.5 rounded-full bg-gray-100 text-muted"
        }
    }

    pub fn aria_selected(&self) -> &'static str {
        if self.active {
            "true"
        } else {
            "false"
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortChrome {
    pub label: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Cards { count: usize, html: String },
    /// Nothing matched; the grid is hidden and the empty state shown
    Empty,
    /// Dataset load failed; localized message in place of the cards
    Error(String),
}

/// Everything one render shows
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub state: ViewState,
    /// Static page text for the active language
    pub strings: &'static Strings,
    pub tabs: [TabChrome; 3],
    /// Hidden on the projects tab
    pub sort: Option<SortChrome>,
    pub search_clear_visible: bool,
    pub content: Content,
}

impl Frame {
    /// Markup for `#content-grid`
    pub fn grid_html(&self) -> &str {
        match &self.content {
            Content::Cards { html, .. } => html,
            Content::Error(html) => html,
            Content::Empty => "",
        }
    }

    pub fn card_count(&self) -> usize {
        match self.content {
            Content::Cards { count, .. } => count,
            _ => 0,
        }
    }

    /// The interactive part of the page as markup: header controls, hero, tab bar,
    /// sort button and either the grid or the empty state. Clicks resolve against it
    /// through [`Action::from_element`].
    pub fn page_html(&self) -> String {
        let s = self.strings;
        let search_clear = if self.search_clear_visible {
            format!(
                r#"<button id="search-clear" aria-label="{}">&times;</button>"#,
                html_escape(s.clear_search_aria)
            )
        } else {
            String::new()
        };
        let tabs: Vec<String> = self
            .tabs
            .iter()
            .map(|t| {
                format!(
                    r#"<button id="tab-{id}" role="tab" aria-selected="{selected}" class="{class}">{label} <span id="tab-{id}-count" class="{count_class}">{count}</span></button>"#,
                    id = t.tab.as_str(),
                    selected = t.aria_selected(),
                    class = t.class(),
                    label = html_escape(t.label),
                    count_class = t.count_class(),
                    count = t.count,
                )
            })
            .collect();
        let sort = match &self.sort {
            Some(sort) => format!(
                r#"<button id="sort-btn" title="{}"><span id="sort-label">{}</span></button>"#,
                html_escape(sort.title),
                html_escape(sort.label)
            ),
            None => String::new(),
        };
        let body = match self.content {
            Content::Empty => format!(
                r#"<div id="empty-state">
      <h3>{}</h3>
      <p>{}</p>
      <button id="clear-all-btn">{}</button>
    </div>"#,
                html_escape(s.empty_heading),
                html_escape(s.empty_desc),
                html_escape(s.empty_clear_btn)
            ),
            _ => format!(
                "<div id=\"content-grid\" data-count=\"{}\">\n{}\n</div>",
                self.card_count(),
                self.grid_html()
            ),
        };

        format!(
            r#"<html lang="{lang}">
<body>
  <header>
    <input id="search-input" type="search" placeholder="{placeholder}" value="{query}">
    {search_clear}
    <button id="lang-toggle" aria-label="{toggle_aria}">{toggle_text}</button>
  </header>
  <main>
    <section>
      <h1>{site_name}</h1>
      <p>{hero}</p>
    </section>
    <nav role="tablist">
      {tabs}
      {sort}
    </nav>
    {body}
  </main>
</body>
</html>"#,
            lang = s.html_lang,
            placeholder = html_escape(s.search_placeholder),
            query = html_escape(&self.state.search_query),
            search_clear = search_clear,
            toggle_aria = html_escape(s.lang_toggle_aria),
            toggle_text = html_escape(s.lang_toggle_text),
            site_name = html_escape(s.site_name),
            hero = s.hero_subtitle_html(),
            tabs = tabs.join("\n      "),
            sort = sort,
            body = body,
        )
    }
}

/// A pending dataset load. Only the most recently issued ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub lang: Lang,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// State unchanged or a card-local change; nothing to re-render
    None,
    Render(Frame),
    /// Language switched: static text applies now, content waits for the load
    Load {
        ticket: LoadTicket,
        strings: &'static Strings,
    },
}

enum Loaded {
    Pending,
    Ready(Catalog),
    Failed,
}

pub struct Controller<S> {
    source: S,
    state: ViewState,
    loaded: Loaded,
    generation: u64,
    search: Debouncer<String>,
}

impl<S: DataSource> Controller<S> {
    pub fn new(source: S, lang: Lang) -> Self {
        Self {
            source,
            state: ViewState::new(lang),
            loaded: Loaded::Pending,
            generation: 0,
            search: Debouncer::default(),
        }
    }

    /// Initial load for the starting language
    pub fn start(&mut self) -> Option<Frame> {
        let ticket = self.request_load();
        self.load(ticket)
    }

    /// Issue a ticket for the current language, superseding any outstanding one
    pub fn request_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            lang: self.state.lang,
            generation: self.generation,
        }
    }

    /// Fetch from the source and complete `ticket`
    pub fn load(&mut self, ticket: LoadTicket) -> Option<Frame> {
        let result = self.source.load(ticket.lang);
        self.finish_load(ticket, result)
    }

    /// Install a finished load. Results for superseded tickets are dropped and the
    /// current content stays as it is.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Catalog, LoadError>,
    ) -> Option<Frame> {
        if ticket.generation != self.generation {
            log::debug!(
                "Discarding superseded {} load (ticket {}, current {})",
                ticket.lang.as_str(),
                ticket.generation,
                self.generation
            );
            return None;
        }
        self.loaded = match result {
            Ok(catalog) => Loaded::Ready(catalog),
            Err(e) => {
                log::warn!("Failed to load {} data: {}", ticket.lang.as_str(), e);
                Loaded::Failed
            }
        };
        self.render()
    }

    pub fn dispatch(&mut self, action: Action, now: Instant) -> Update {
        match action {
            Action::SelectTab(tab) => {
                if self.state.active_tab == tab {
                    return Update::None;
                }
                self.state.active_tab = tab;
            }
            Action::SearchInput(text) => {
                self.search.push(text, now);
                return Update::None;
            }
            Action::ClearSearch => {
                self.search.cancel();
                self.state.search_query.clear();
            }
            Action::TogglePerson(person) => {
                self.state.selected_person = match self.state.selected_person.take() {
                    Some(current) if current == person => None,
                    _ => Some(person),
                };
            }
            Action::ToggleSort => {
                self.state.sort_order = self.state.sort_order.toggled();
            }
            Action::ClearAll => {
                self.search.cancel();
                self.state.search_query.clear();
                self.state.selected_person = None;
                self.state.sort_order = SortOrder::Desc;
            }
            // Static text follows the new language at once. Cards, badges and the sort
            // label keep the loaded catalog's language until the newest ticket completes.
            Action::ToggleLanguage => {
                self.state.lang = self.state.lang.other();
                let ticket = self.request_load();
                return Update::Load {
                    ticket,
                    strings: strings(self.state.lang),
                };
            }
            Action::Expand => return Update::None,
        }
        self.render().map(Update::Render).unwrap_or(Update::None)
    }

    /// Apply a settled search input, if its debounce window has passed
    pub fn tick(&mut self, now: Instant) -> Option<Frame> {
        let text = self.search.poll(now)?;
        self.state.search_query = text.trim().to_string();
        self.render()
    }

    /// When the pending search input becomes due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Full render of the current state. `None` until the first load completes.
    ///
    /// Frame strings and tab labels use the selected language. Card text and the sort
    /// chrome use the language of the catalog being shown, which lags behind while a
    /// language load is outstanding.
    pub fn render(&self) -> Option<Frame> {
        let chrome = strings(self.state.lang);
        let frame = |counts: [usize; 3], text: &'static Strings, content: Content| Frame {
            state: self.state.clone(),
            strings: chrome,
            tabs: Tab::ALL.map(|tab| TabChrome {
                tab,
                label: chrome.tab_label(tab),
                count: counts[tab_index(tab)],
                active: tab == self.state.active_tab,
            }),
            sort: self.state.active_tab.is_sortable().then(|| SortChrome {
                label: text.sort_label(self.state.sort_order),
                title: text.sort_state_title(self.state.sort_order),
            }),
            search_clear_visible: !self.state.search_query.is_empty(),
            content,
        };

        let catalog = match &self.loaded {
            Loaded::Pending => return None,
            Loaded::Failed => {
                return Some(frame([0; 3], chrome, Content::Error(load_error_markup(chrome))))
            }
            Loaded::Ready(catalog) => catalog,
        };
        let text = strings(catalog.lang);

        let filter = Filter::new(&self.state.search_query, self.state.selected_person.as_deref());
        let mut tools = filter.apply(&catalog.tools);
        let mut experiences = filter.apply(&catalog.experiences);
        let projects = filter.apply(&catalog.projects);
        let counts = [tools.len(), experiences.len(), projects.len()];

        let ctx = CardContext {
            strings: text,
            catalog,
            query: &self.state.search_query,
            selected_person: self.state.selected_person.as_deref(),
        };
        let order = self.state.sort_order;
        let (count, html) = match self.state.active_tab {
            Tab::Tools => {
                sort_by_date(&mut tools, order);
                (tools.len(), join_cards(tools.iter().map(|t| tool_card(&ctx, t))))
            }
            Tab::Experiences => {
                sort_by_date(&mut experiences, order);
                (
                    experiences.len(),
                    join_cards(experiences.iter().map(|e| experience_card(&ctx, e))),
                )
            }
            Tab::Projects => (
                projects.len(),
                join_cards(projects.iter().map(|p| project_card(&ctx, p))),
            ),
        };

        let content = if count == 0 {
            Content::Empty
        } else {
            Content::Cards { count, html }
        };
        Some(frame(counts, text, content))
    }
}

fn tab_index(tab: Tab) -> usize {
    match tab {
        Tab::Tools => 0,
        Tab::Experiences => 1,
        Tab::Projects => 2,
    }
}
