use anyhow::{Context, Result};
use std::fs;
use std::time::Duration;
use threadviz_viewer::cli::{self, Command, RenderArgs, ThemeChoice, TrackAction};
use threadviz_viewer::net::Fetcher;
use threadviz_viewer::render::Theme;
use threadviz_viewer::util::{config, prefs, Preferences};
use threadviz_viewer::{ThreadViewState, ViewStatus};

// Slack on top of the http timeout before giving up on the channel.
const WAIT_SLACK: Duration = Duration::from_secs(5);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    match cli::parse_args()? {
        Command::Render(args) => render(args),
        Command::TrackSubreddit { action, name } => update_prefs(|p| match action {
            TrackAction::Add => {
                p.add_subreddit(&name)?;
                println!("tracking r/{}", name.trim());
                Ok(())
            }
            TrackAction::Remove => {
                report_removal(p.remove_subreddit(&name), &format!("r/{}", name.trim()));
                Ok(())
            }
        }),
        Command::TrackKeyword {
            action,
            text,
            subreddit,
        } => update_prefs(|p| match action {
            TrackAction::Add => {
                p.add_keyword(&text, &subreddit)?;
                println!("tracking keyword {:?}", text.trim());
                Ok(())
            }
            TrackAction::Remove => {
                let removed = p.remove_keyword(&text, &subreddit);
                let subreddit = match subreddit.trim() {
                    "" => prefs::ALL_SUBREDDITS,
                    s => s,
                };
                report_removal(removed, &format!("{:?} in r/{subreddit}", text.trim()));
                Ok(())
            }
        }),
        Command::Theme(choice) => update_prefs(|p| {
            let theme = match choice {
                ThemeChoice::Light => Theme::Light,
                ThemeChoice::Dark => Theme::Dark,
                ThemeChoice::Toggle => p.theme.toggle(),
            };
            p.theme = theme;
            println!("theme: {}", theme.as_str());
            Ok(())
        }),
        Command::Prefs => {
            print_prefs(&prefs::load_or_default());
            Ok(())
        }
    }
}

fn render(args: RenderArgs) -> Result<()> {
    let mut cfg = config::load_or_default();
    if let Some(api) = args.api {
        cfg.api_base_url = api;
    }
    if let Some(width) = args.width {
        cfg.container_width = width;
    }
    let out = args.out.unwrap_or_else(|| cfg.output_path.clone());
    let theme = prefs::load_or_default().theme;

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut fetcher = Fetcher::new(&cfg, tx)?;
    let mut view = ThreadViewState::new(cfg.container_width, theme);

    view.visualize(&args.post, &mut fetcher)?;
    view.wait(&rx, cfg.request_timeout() + WAIT_SLACK)?;
    match view.status() {
        ViewStatus::Ready => {}
        ViewStatus::Failed(message) => anyhow::bail!("{message}"),
        ViewStatus::Idle | ViewStatus::Loading(_) => anyhow::bail!("request did not complete"),
    }

    if let Some(id) = args.hover.as_deref() {
        if !view.hover_node(id) {
            tracing::warn!(node = id, "no such node to hover");
        }
    }
    for zoom in args.zooms {
        view.zoom(zoom);
    }

    let svg = view.svg().context("no thread to render")?;
    fs::write(&out, svg).with_context(|| format!("failed to write {}", out.display()))?;
    tracing::info!(path = %out.display(), "thread visualization written");

    if let Some(details) = view.details() {
        for line in details.lines() {
            println!("{line}");
        }
    }
    println!("\nwrote {}", out.display());
    Ok(())
}

fn update_prefs<F>(edit: F) -> Result<()>
where
    F: FnOnce(&mut Preferences) -> Result<()>,
{
    let mut p = prefs::load_or_default();
    edit(&mut p)?;
    prefs::save(&p)
}

fn report_removal(removed: bool, what: &str) {
    if removed {
        println!("stopped tracking {what}");
    } else {
        println!("{what} was not tracked");
    }
}

fn print_prefs(p: &Preferences) {
    println!("theme: {}", p.theme.as_str());
    println!("tracked subreddits:");
    if p.tracked_subreddits.is_empty() {
        println!("  (none)");
    }
    for name in &p.tracked_subreddits {
        println!("  r/{name}");
    }
    println!("tracked keywords:");
    if p.tracked_keywords.is_empty() {
        println!("  (none)");
    }
    for k in &p.tracked_keywords {
        println!("  {:?} in r/{}", k.text, k.subreddit);
    }
}
