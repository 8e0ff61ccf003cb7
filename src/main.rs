//! Line-driven terminal front end.
//!
//! Reads one command per line from stdin, maps it to library [`Event`]s, executes
//! the resulting [`Action`]s and re-renders the active screen when something
//! changed. Both catalog screens stay alive for the whole session, each with its
//! own cart.
//!
//! # Commands
//!
//! Normal mode (and search mode while navigating results):
//! - `j` / `k`: Move down / up
//! - `/`: Open the search bar (or return to it)
//! - `search <term>`: Replace the search term
//! - `category <label>`: Pick a category (`All Specialties` / `All Categories` for all)
//! - `tag <name>`, `untag <name>`, `tags clear`: Insurance filter (doctors)
//! - `flag on|off`: Available today (doctors) / prescription only (medicines)
//! - `sort <key>`: `distance`, `rating`, `experience`, `price`
//! - `reset`: Clear every filter
//! - `add [id]`, `remove [id]`, `clear-cart`: Cart
//! - `book`, `video`: Book the selected doctor in person / by video
//! - `checkout`: Draft an order from the medicine cart (medicine screen only)
//! - `reload`: Reload the active catalog from disk
//! - `:doctors`, `:medicines`: Switch screen
//! - `esc`: Close the search bar
//! - `q`: Quit
//!
//! Search mode while typing:
//! - any text: Typed into the search term
//! - `<bs>`: Delete one character
//! - empty line: Move to the results
//! - `<esc>`: Close the search bar

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use healthconnect::app::modes::SearchFocus;
use healthconnect::storage::{CatalogSource, JsonCatalog};
use healthconnect::{handle_event, initialize, Action, AppState, CartState, Config, ConsultKind, Event, InputMode, ItemId, Variant};

#[derive(Parser)]
#[command(name = "healthconnect")]
#[command(about = "Browse the HealthConnect doctor and medicine catalogs")]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/healthconnect/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Screen to start on
    #[arg(long)]
    variant: Option<Variant>,

    /// Tracing filter, overrides the config file
    #[arg(long)]
    trace_level: Option<String>,
}

/// One catalog screen with its cart.
struct Screen {
    state: AppState,
    cart: CartState,
}

/// What a command line asks the shell to do.
#[derive(Debug, PartialEq)]
enum Command {
    Events(Vec<Event>),
    Switch(Variant),
    Reload,
    Unknown(String),
}

struct Shell {
    config: Config,
    source: JsonCatalog,
    active: Variant,
    doctors: Screen,
    medicines: Screen,
    running: bool,
}

impl Shell {
    fn new(config: Config, active: Variant) -> healthconnect::Result<Self> {
        let source = config.catalog_source();
        let screen = |variant| -> healthconnect::Result<Screen> {
            Ok(Screen {
                state: initialize(&config, &source, variant)?,
                cart: CartState::new(),
            })
        };
        let doctors = screen(Variant::Doctors)?;
        let medicines = screen(Variant::Medicines)?;

        Ok(Self {
            config,
            source,
            active,
            doctors,
            medicines,
            running: true,
        })
    }

    const fn screen(&self) -> &Screen {
        match self.active {
            Variant::Doctors => &self.doctors,
            Variant::Medicines => &self.medicines,
        }
    }

    fn screen_mut(&mut self) -> &mut Screen {
        match self.active {
            Variant::Doctors => &mut self.doctors,
            Variant::Medicines => &mut self.medicines,
        }
    }

    /// Runs one input line. Returns whether the screen should be redrawn.
    fn run_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let _span = tracing::debug_span!("run_line", variant = %self.active, line = %line).entered();

        let events = match parse_command(line, self.screen().state.input_mode) {
            Command::Events(events) => events,
            Command::Switch(variant) => {
                tracing::debug!(%variant, "switching screen");
                self.active = variant;
                return Ok(true);
            }
            Command::Reload => match self.source.load(self.active) {
                Ok(items) => vec![Event::CatalogReloaded { items }],
                Err(e) => {
                    tracing::warn!(error = %e, "catalog reload failed");
                    writeln!(out, "reload failed: {e}")?;
                    return Ok(false);
                }
            },
            Command::Unknown(text) => {
                writeln!(out, "unknown command: {text}")?;
                return Ok(false);
            }
        };

        let mut rerender = false;
        for event in events {
            let screen = self.screen_mut();
            match handle_event(&mut screen.state, &mut screen.cart, &event) {
                Ok((should_render, actions)) => {
                    tracing::debug!(action_count = actions.len(), should_render, "event handled");
                    rerender |= should_render;
                    for action in actions {
                        self.execute_action(&action, out)?;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "event rejected");
                    writeln!(out, "error: {e}")?;
                }
            }
        }
        Ok(rerender)
    }

    fn execute_action(&mut self, action: &Action, out: &mut impl Write) -> io::Result<()> {
        match action {
            Action::Close => {
                tracing::debug!("closing");
                self.running = false;
                Ok(())
            }
            Action::BookAppointment { .. } | Action::PlaceOrder(_) => {
                let json = serde_json::to_string(action).map_err(io::Error::other)?;
                writeln!(out, "{json}")
            }
        }
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let screen = self.screen();
        let viewmodel = screen.state.compute_viewmodel(&screen.cart, self.config.rows);
        healthconnect::ui::render(&viewmodel, out)
    }
}

/// Maps one input line to a command, honouring the current input mode.
fn parse_command(line: &str, mode: InputMode) -> Command {
    if mode == InputMode::Search(SearchFocus::Typing) {
        return Command::Events(match line {
            "" => vec![Event::FocusResults],
            "<esc>" => vec![Event::Escape],
            "<bs>" => vec![Event::Backspace],
            text => text.chars().map(Event::Char).collect(),
        });
    }

    let line = line.trim();
    let (word, rest) = line.split_once(' ').map_or((line, ""), |(w, r)| (w, r.trim()));
    let single = |event| Command::Events(vec![event]);

    match (word, rest) {
        ("", _) => Command::Events(vec![]),
        ("j" | "down", "") => single(Event::KeyDown),
        ("k" | "up", "") => single(Event::KeyUp),
        ("q" | "quit", "") => single(Event::Quit),
        ("esc", "") => single(Event::Escape),
        ("/", "") => single(if mode.is_search() {
            Event::FocusSearchBar
        } else {
            Event::SearchMode
        }),
        ("search", term) => single(Event::SetSearchTerm(term.to_string())),
        ("category", label) if !label.is_empty() => single(Event::SelectCategory(label.to_string())),
        ("tag", tag) if !tag.is_empty() => single(Event::SetTag {
            tag: tag.to_string(),
            selected: true,
        }),
        ("untag", tag) if !tag.is_empty() => single(Event::SetTag {
            tag: tag.to_string(),
            selected: false,
        }),
        ("tags", "clear") => single(Event::ClearTags),
        ("flag", "on") => single(Event::SetFlagRequired(true)),
        ("flag", "off") => single(Event::SetFlagRequired(false)),
        ("sort", key) if !key.is_empty() => single(Event::SetSortKey(key.to_string())),
        ("reset", "") => single(Event::ResetFilters),
        ("add", "") => single(Event::AddSelected),
        ("remove", "") => single(Event::RemoveSelected),
        ("add" | "remove", id) => match id.parse::<u64>() {
            Ok(id) if word == "add" => single(Event::AddToCart(ItemId(id))),
            Ok(id) => single(Event::RemoveFromCart(ItemId(id))),
            Err(_) => Command::Unknown(line.to_string()),
        },
        ("clear-cart", "") => single(Event::ClearCart),
        ("book", "") => single(Event::BookSelected {
            consult: ConsultKind::InPerson,
        }),
        ("video", "") => single(Event::BookSelected {
            consult: ConsultKind::Video,
        }),
        ("checkout", "") => single(Event::Checkout),
        ("reload", "") => Command::Reload,
        (":doctors", "") => Command::Switch(Variant::Doctors),
        (":medicines", "") => Command::Switch(Variant::Medicines),
        _ => Command::Unknown(line.to_string()),
    }
}

fn run(cli: Cli) -> healthconnect::Result<()> {
    let mut config = Config::discover(cli.config.as_deref())?;
    if let Some(level) = cli.trace_level {
        config.trace_level = level;
    }
    healthconnect::observability::init_tracing(&config);

    let active = cli.variant.unwrap_or(config.default_variant);
    tracing::debug!(%active, rows = config.rows, "starting");
    let mut shell = Shell::new(config, active)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    shell.render(&mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if shell.run_line(&line, &mut out)? {
            shell.render(&mut out)?;
        }
        if !shell.running {
            break;
        }
    }

    tracing::debug!("session ended");
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("healthconnect: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_mode_sends_characters() {
        let typing = InputMode::Search(SearchFocus::Typing);
        assert_eq!(
            parse_command("ca", typing),
            Command::Events(vec![Event::Char('c'), Event::Char('a')])
        );
        assert_eq!(parse_command("", typing), Command::Events(vec![Event::FocusResults]));
        assert_eq!(parse_command("q", typing), Command::Events(vec![Event::Char('q')]));
    }

    #[test]
    fn normal_mode_commands() {
        let normal = InputMode::Normal;
        assert_eq!(parse_command("q", normal), Command::Events(vec![Event::Quit]));
        assert_eq!(
            parse_command("category  All Specialties ", normal),
            Command::Events(vec![Event::SelectCategory("All Specialties".to_string())])
        );
        assert_eq!(
            parse_command("add 3", normal),
            Command::Events(vec![Event::AddToCart(ItemId(3))])
        );
        assert_eq!(
            parse_command("remove 3", normal),
            Command::Events(vec![Event::RemoveFromCart(ItemId(3))])
        );
        assert_eq!(parse_command(":medicines", normal), Command::Switch(Variant::Medicines));
        assert_eq!(parse_command("add three", normal), Command::Unknown("add three".to_string()));
        assert_eq!(parse_command("sort", normal), Command::Unknown("sort".to_string()));
    }

    #[test]
    fn slash_depends_on_mode() {
        assert_eq!(parse_command("/", InputMode::Normal), Command::Events(vec![Event::SearchMode]));
        assert_eq!(
            parse_command("/", InputMode::Search(SearchFocus::Navigating)),
            Command::Events(vec![Event::FocusSearchBar])
        );
    }
}
