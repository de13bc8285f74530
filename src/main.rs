use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use scraper::Html;
use std::path::{Path, PathBuf};
use std::time::Instant;

mod cards;
mod catalog;
mod debounce;
mod prefs;
mod prerender;
mod seo;
mod source;
mod strings;
mod template;
mod types;
mod view;

#[cfg(test)]
mod fixtures;

use cards::html_escape;
use prefs::{initial_lang, Prefs, PREFS_FILE};
use source::{open_source, DataSource};
use types::Tab;
use view::{expand_card, Action, Controller, Frame, LoadTicket, Update};

#[derive(Parser)]
#[command(name = "ainotes")]
#[command(about = "Bilingual AI tools knowledge base: page prerenderer and view preview")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pre-render dist/index.html and dist/en/index.html from the bundler output (default)
    Prerender,
    /// Render the interactive view for a given state and print it
    Preview(PreviewArgs),
}

#[derive(Args)]
struct PreviewArgs {
    /// Site directory or http(s) base URL holding the dataset files
    #[arg(short, long, default_value = prerender::DIST_DIR)]
    source: String,
    /// Requested language; only "en" overrides the stored preference
    #[arg(short, long)]
    lang: Option<String>,
    /// Tab to show: tools, experiences or projects
    #[arg(short, long)]
    tab: Option<String>,
    /// Search text
    #[arg(short, long)]
    query: Option<String>,
    /// Only show items shared by this person (exact name)
    #[arg(short, long)]
    person: Option<String>,
    /// Oldest first
    #[arg(long)]
    asc: bool,
    /// Click the first element matching a CSS selector in the rendered page; repeatable
    #[arg(short, long = "click", value_name = "CSS")]
    click: Vec<String>,
    /// Switch language after applying the other flags and remember the choice
    #[arg(long)]
    switch_lang: bool,
    /// Preferences file
    #[arg(long, default_value = PREFS_FILE)]
    prefs: PathBuf,
}

type PreviewController = Controller<Box<dyn DataSource>>;

/// Keep the newest frame a transition produced
fn apply(current: &mut Option<Frame>, frame: Option<Frame>) {
    if frame.is_some() {
        *current = frame;
    }
}

/// Remember the new language, then fetch its data
fn switch_language(
    controller: &mut PreviewController,
    ticket: LoadTicket,
    prefs: &mut Prefs,
    prefs_path: &Path,
) -> Result<Option<Frame>> {
    prefs.set_lang(ticket.lang);
    prefs.save(prefs_path)?;
    Ok(controller.load(ticket))
}

/// Resolve `css` against the current page and run whatever the element is wired to
fn click(
    controller: &mut PreviewController,
    frame: &mut Option<Frame>,
    css: &str,
    prefs: &mut Prefs,
    prefs_path: &Path,
) -> Result<()> {
    let current = frame
        .as_ref()
        .ok_or_else(|| anyhow!("Cannot click {}: no data loaded", css))?;
    let html = current.page_html();
    let page = Html::parse_document(&html);
    let element = page
        .select(&prerender::selector(css)?)
        .next()
        .ok_or_else(|| anyhow!("Nothing on the page matches {}", css))?;
    let action =
        Action::from_element(element).ok_or_else(|| anyhow!("{} does not respond to clicks", css))?;
    log::debug!("Clicked {} -> {:?}", css, action);

    if action == Action::Expand {
        let card = expand_card(element, current.strings)
            .ok_or_else(|| anyhow!("{} is not inside an experience card", css))?;
        println!(
            "<p class=\"{}\">{}</p> [{}]",
            card.content_class,
            html_escape(&card.text),
            card.button_label
        );
        return Ok(());
    }

    match controller.dispatch(action, Instant::now()) {
        Update::Render(next) => *frame = Some(next),
        Update::Load { ticket, .. } => {
            let loaded = switch_language(controller, ticket, prefs, prefs_path)?;
            apply(frame, loaded);
        }
        Update::None => {}
    }
    Ok(())
}

fn run_preview(args: PreviewArgs) -> Result<()> {
    let mut prefs = Prefs::load(&args.prefs);
    let lang = initial_lang(args.lang.as_deref(), &prefs);
    let source = open_source(&args.source)
        .with_context(|| format!("Invalid data source {}", args.source))?;

    let mut controller: PreviewController = Controller::new(source, lang);
    let mut frame = controller.start();
    let now = Instant::now();

    let mut actions = Vec::new();
    if let Some(tab) = &args.tab {
        let tab = Tab::from_str(tab).ok_or_else(|| anyhow!("Unknown tab '{}'", tab))?;
        actions.push(Action::SelectTab(tab));
    }
    if let Some(person) = args.person {
        actions.push(Action::TogglePerson(person));
    }
    if args.asc {
        actions.push(Action::ToggleSort);
    }
    for action in actions {
        if let Update::Render(next) = controller.dispatch(action, now) {
            frame = Some(next);
        }
    }

    if let Some(query) = args.query {
        controller.dispatch(Action::SearchInput(query), now);
        if let Some(due) = controller.next_deadline() {
            apply(&mut frame, controller.tick(due));
        }
    }

    for css in &args.click {
        click(&mut controller, &mut frame, css, &mut prefs, &args.prefs)?;
    }

    if args.switch_lang {
        if let Update::Load { ticket, .. } = controller.dispatch(Action::ToggleLanguage, now) {
            let loaded = switch_language(&mut controller, ticket, &mut prefs, &args.prefs)?;
            apply(&mut frame, loaded);
        }
    }

    match frame {
        Some(frame) => print_frame(&frame),
        None => log::warn!("Nothing to show: no data loaded"),
    }
    Ok(())
}

fn print_frame(frame: &Frame) {
    let active = frame.tabs.iter().find(|t| t.active);
    println!(
        "[{}] {} | {} {}",
        frame.state.lang.as_str(),
        frame.strings.title,
        active.map(|t| t.label).unwrap_or_default(),
        frame.card_count()
    );
    println!("{}", frame.page_html());
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Prerender) {
        Commands::Prerender => prerender::run_prerender(),
        Commands::Preview(args) => run_preview(args),
    }
}
