use anyhow::Result;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::ui::interaction::ZoomCommand;

pub const USAGE: &str = "usage:
  threadviz render <post-url-or-id> [--out PATH] [--width PX] [--api URL] [--hover NODE_ID] [--zoom in|out|reset]...
  threadviz track subreddit add|remove <NAME>
  threadviz track keyword add|remove <TEXT> [--subreddit NAME]
  threadviz theme light|dark|toggle
  threadviz prefs";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderArgs {
    pub post: String,
    pub out: Option<PathBuf>,
    pub width: Option<f64>,
    pub api: Option<String>,
    pub hover: Option<String>,
    pub zooms: Vec<ZoomCommand>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackAction {
    Add,
    Remove,
}

impl TrackAction {
    pub fn parse(input: &str) -> Result<Self> {
        match input {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            _ => anyhow::bail!("invalid action: {input} (expected add|remove)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}

impl ThemeChoice {
    pub fn parse(input: &str) -> Result<Self> {
        match input {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "toggle" => Ok(Self::Toggle),
            _ => anyhow::bail!("invalid theme: {input} (expected light|dark|toggle)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Render(RenderArgs),
    TrackSubreddit {
        action: TrackAction,
        name: String,
    },
    TrackKeyword {
        action: TrackAction,
        text: String,
        subreddit: String,
    },
    Theme(ThemeChoice),
    Prefs,
}

pub fn parse_args() -> Result<Command> {
    parse_args_from(std::env::args_os().skip(1))
}

pub fn parse_args_from<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned());

    let Some(cmd) = args.next() else {
        anyhow::bail!("missing command\n{USAGE}");
    };
    match cmd.as_str() {
        "render" => parse_render(args),
        "track" => parse_track(args),
        "theme" => {
            let Some(choice) = args.next() else {
                anyhow::bail!("theme expects light|dark|toggle");
            };
            expect_end(args)?;
            Ok(Command::Theme(ThemeChoice::parse(&choice)?))
        }
        "prefs" => {
            expect_end(args)?;
            Ok(Command::Prefs)
        }
        _ => anyhow::bail!("unknown command: {cmd:?}\n{USAGE}"),
    }
}

fn parse_render(mut args: impl Iterator<Item = String>) -> Result<Command> {
    let mut render = RenderArgs {
        post: String::new(),
        out: None,
        width: None,
        api: None,
        hover: None,
        zooms: Vec::new(),
    };

    while let Some(arg) = args.next() {
        if arg == "--out" {
            let Some(path) = args.next() else {
                anyhow::bail!("--out expects a path");
            };
            render.out = Some(PathBuf::from(path));
        } else if arg == "--width" {
            let Some(value) = args.next() else {
                anyhow::bail!("--width expects a number of pixels");
            };
            let Ok(width) = value.parse::<f64>() else {
                anyhow::bail!("invalid width: {value}");
            };
            render.width = Some(width);
        } else if arg == "--api" {
            let Some(url) = args.next() else {
                anyhow::bail!("--api expects a base url");
            };
            render.api = Some(url);
        } else if arg == "--hover" {
            let Some(id) = args.next() else {
                anyhow::bail!("--hover expects a node id");
            };
            render.hover = Some(id);
        } else if arg == "--zoom" {
            let Some(value) = args.next() else {
                anyhow::bail!("--zoom expects in|out|reset");
            };
            render.zooms.push(ZoomCommand::parse(&value)?);
        } else if arg.starts_with("--") {
            anyhow::bail!("unknown argument: {arg:?}");
        } else if render.post.is_empty() {
            render.post = arg;
        } else {
            anyhow::bail!("unexpected argument: {arg:?}");
        }
    }

    if render.post.trim().is_empty() {
        anyhow::bail!("Please enter a post URL or ID");
    }
    Ok(Command::Render(render))
}

fn parse_track(mut args: impl Iterator<Item = String>) -> Result<Command> {
    let (Some(kind), Some(action), Some(value)) = (args.next(), args.next(), args.next()) else {
        anyhow::bail!("track expects subreddit|keyword add|remove <VALUE>");
    };
    let action = TrackAction::parse(&action)?;

    match kind.as_str() {
        "subreddit" => {
            expect_end(args)?;
            Ok(Command::TrackSubreddit {
                action,
                name: value,
            })
        }
        "keyword" => {
            let mut subreddit = String::new();
            while let Some(arg) = args.next() {
                if arg == "--subreddit" {
                    let Some(name) = args.next() else {
                        anyhow::bail!("--subreddit expects a name");
                    };
                    subreddit = name;
                } else {
                    anyhow::bail!("unknown argument: {arg:?}");
                }
            }
            Ok(Command::TrackKeyword {
                action,
                text: value,
                subreddit,
            })
        }
        _ => anyhow::bail!("invalid track kind: {kind} (expected subreddit|keyword)"),
    }
}

fn expect_end(mut args: impl Iterator<Item = String>) -> Result<()> {
    match args.next() {
        Some(extra) => anyhow::bail!("unexpected argument: {extra:?}"),
        None => Ok(()),
    }
}
