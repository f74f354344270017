use std::env;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use folio_core::actions::UserAction;
use folio_core::catalog::Catalog;
use folio_core::navigation::Location;
use folio_core::persistence::FilePreferenceStore;
use folio_core::persistence::MemoryStore;
use folio_core::persistence::PreferenceStore;
use folio_core::theme::ThemePreference;
use folio_host::ColorSchemeMedia;
use folio_host::KeyListenerRegistry;
use folio_host::SiteRuntime;
use tracing::info;
use tracing::warn;

mod config;
mod listing;
mod logging;
mod ui;

use config::Config;
use logging::init_logging;
use logging::LogTarget;

const LOG_FILE: &str = "folio.log";

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Default)]
struct GlobalArgs {
    config: Option<PathBuf>,
    rest: Vec<String>,
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = split_global_args(env::args().skip(1).collect())?;
    let mut rest = args.rest.into_iter();
    let command = rest.next();

    match command.as_deref() {
        Some("--help" | "-h" | "help") => {
            print_help();
            Ok(())
        }
        Some("--version" | "-V" | "version") => {
            println!("folio {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None | Some("preview") => {
            let config = Config::discover(args.config.as_deref())?;
            let path = parse_flag(rest.collect(), "--path")?;
            run_preview(&config, path)
        }
        Some("projects") => {
            init_logging(LogTarget::Stderr);
            let filter = parse_flag(rest.collect(), "--filter")?;
            let catalog = Catalog::portfolio()?;
            info!(filter = filter.as_deref().unwrap_or(""), "listing projects");
            listing::write_listing(&mut io::stdout().lock(), &catalog, filter.as_deref())?;
            Ok(())
        }
        Some("theme") => {
            init_logging(LogTarget::Stderr);
            let config = Config::discover(args.config.as_deref())?;
            run_theme(&config, rest.collect(), &mut io::stdout().lock())
        }
        Some(other) => {
            print_help();
            Err(format!("unknown command: {other}").into())
        }
    }
}

fn split_global_args(args: Vec<String>) -> Result<GlobalArgs, Box<dyn std::error::Error>> {
    let mut global = GlobalArgs::default();
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--config" {
            let Some(value) = args.get(i + 1) else {
                return Err("--config requires a path".into());
            };
            global.config = Some(PathBuf::from(value));
            i += 2;
        } else {
            global.rest.push(args[i].clone());
            i += 1;
        }
    }
    Ok(global)
}

fn parse_flag(args: Vec<String>, flag: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let mut value = None;
    let mut i = 0;
    while i < args.len() {
        if args[i] == flag {
            let Some(next) = args.get(i + 1) else {
                return Err(format!("{flag} requires a value").into());
            };
            value = Some(next.clone());
            i += 2;
        } else {
            return Err(format!("unsupported argument: {}", args[i]).into());
        }
    }
    Ok(value)
}

fn run_preview(config: &Config, path: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let storage_dir = config.storage_dir();
    init_logging(preview_log_target(&storage_dir));

    let target = path.unwrap_or_else(|| config.site.start_path.clone());
    let Some(location) = Location::parse(&target) else {
        return Err(format!("no page at {target}").into());
    };

    let catalog = Catalog::portfolio()?;
    let store = open_store(&storage_dir);
    let media = ColorSchemeMedia::from_env();
    info!(path = %location.href(), "starting preview");
    let mut runtime = SiteRuntime::mount(store, &media, KeyListenerRegistry::new(), catalog, location);
    ui::run(&mut runtime, &config.site)
}

fn run_theme(
    config: &Config,
    args: Vec<String>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(&config.storage_dir());
    let media = ColorSchemeMedia::from_env();
    let mut runtime = SiteRuntime::mount(
        store,
        &media,
        KeyListenerRegistry::new(),
        Catalog::portfolio()?,
        Location::default(),
    );

    match args.as_slice() {
        [] => {}
        [value] => {
            let Some(preference) = ThemePreference::parse(value) else {
                return Err(format!("unknown theme: {value} (expected light, dark or system)").into());
            };
            runtime.dispatch(UserAction::SetThemePreference(preference).into());
        }
        _ => return Err("theme takes at most one value".into()),
    }
    listing::write_theme_status(out, &runtime.state().theme)?;
    Ok(())
}

/// Falls back to a session-only store when the storage dir is unusable.
fn open_store(dir: &Path) -> Box<dyn PreferenceStore> {
    match FilePreferenceStore::open(dir) {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!(
                dir = %dir.display(),
                error = %err,
                "preference storage unavailable, keeping preferences for this session only"
            );
            Box::new(MemoryStore::new())
        }
    }
}

/// The preview owns the terminal, so logs go to a file next to the preferences.
fn preview_log_target(storage_dir: &Path) -> LogTarget {
    let opened = std::fs::create_dir_all(storage_dir).and_then(|()| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(storage_dir.join(LOG_FILE))
    });
    match opened {
        Ok(file) => LogTarget::File(file),
        Err(err) => {
            eprintln!("warning: logging disabled: {err}");
            LogTarget::Discard
        }
    }
}

fn print_help() {
    println!("folio - terminal preview of the portfolio site");
    println!();
    println!("Usage:");
    println!("  folio [--config <file>] [preview] [--path </route?filter=Tag>]");
    println!("  folio projects [--filter <tag>]");
    println!("  folio [--config <file>] theme [light|dark|system]");
    println!("  folio --help");
    println!("  folio --version");
    println!();
    println!("Environment:");
    println!("  FOLIO_LOG           tracing filter (default: warn)");
    println!("  FOLIO_COLOR_SCHEME  dark or light, overrides COLORFGBG");
}
