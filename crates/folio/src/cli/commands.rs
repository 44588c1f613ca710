//! # Command Dispatch
//!
//! Everything between the parsed [`Cli`] and the printed output happens here:
//!
//! 1. Resolve the data directory and load `folio.toml` from it
//! 2. Install the stderr `tracing` subscriber (`FOLIO_LOG`, else the configured
//!    `log_level`)
//! 3. Open the API, warning if the stored snapshot had to be replaced by the seed
//! 4. Turn id prefixes into full ids and call the matching API method
//! 5. Hand results to `render.rs` and print them
//!
//! Errors bubble up to `main`, which prints them through [`report_error`] and
//! exits with status 1.

use super::render;
use super::setup::{Cli, Commands, ConfigCommands};
use clap::Parser;
use clapfig::{Clapfig, ConfigAction, SearchPath};
use folioapp::api::{CmdMessage, FolioApi};
use folioapp::commands::CmdResult;
use folioapp::config::FolioConfig;
use folioapp::error::{FolioError, Result};
use folioapp::init::{load_config, open_context, resolve_data_dir, FolioContext, CONFIG_FILE};
use folioapp::navigation::{ActiveView, Route};
use folioapp::store::fs_backend::FsBackend;
use folioapp::store::LoadOutcome;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter, e.g. `FOLIO_LOG=folioapp=debug`.
pub const LOG_ENV: &str = "FOLIO_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Config is loaded before the API so its log level applies to the load itself.
    let data_dir = resolve_data_dir(cli.data.clone())?;
    let config = load_config(&data_dir);
    init_logging(&config);

    let mut ctx = open_context(data_dir, config)?;
    if let LoadOutcome::Recovered { reason } = ctx.api.load_outcome() {
        eprint!(
            "{}",
            render::render_messages(&[CmdMessage::warning(format!(
                "Stored data could not be read ({}). Showing the starter documents; the next change overwrites it.",
                reason
            ))])
        );
    }

    let command = cli.command.unwrap_or(Commands::Tree);
    tracing::debug!(?command, "dispatch");
    dispatch(&mut ctx, command)
}

pub fn report_error(err: &FolioError) {
    eprint!(
        "{}",
        render::render_messages(&[CmdMessage::error(format!("Error: {}", err))])
    );
}

fn init_logging(config: &FolioConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn dispatch(ctx: &mut FolioContext, command: Commands) -> Result<()> {
    let api = &mut ctx.api;
    match command {
        Commands::Tree => {
            print!("{}", render::render_tree(&api.tree(), api.view().active_id()));
            Ok(())
        }
        Commands::Show { id } => handle_show(api, id.as_deref()),
        Commands::Create {
            title,
            parent,
            after,
        } => {
            let parent = parent.map(|p| api.resolve_live(&p)).transpose()?;
            let after = after.map(|a| api.resolve_live(&a)).transpose()?;
            let result =
                api.create_document(&title.join(" "), parent.as_deref(), after.as_deref())?;
            report(&result, None);
            if let Some(id) = result.first_id() {
                println!("{}", id);
            }
            Ok(())
        }
        Commands::Rename { id, title } => {
            let id = api.resolve_live(&id)?;
            let result = api.rename(&id, &title.join(" "))?;
            report(&result, Some("Renamed"));
            Ok(())
        }
        Commands::Icon { id, icon } => {
            let id = api.resolve_live(&id)?;
            let result = api.set_icon(&id, icon.as_deref().unwrap_or(""))?;
            report(&result, Some("Icon updated"));
            Ok(())
        }
        Commands::Star { id } => {
            let id = api.resolve_live(&id)?;
            let result = api.set_starred(&id, true)?;
            report(&result, Some("Starred"));
            Ok(())
        }
        Commands::Unstar { id } => {
            let id = api.resolve_live(&id)?;
            let result = api.set_starred(&id, false)?;
            report(&result, Some("Star removed"));
            Ok(())
        }
        Commands::Write { id, content } => {
            let id = api.resolve_live(&id)?;
            let content = if content == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                content
            };
            api.edit_content(&id, content, Instant::now());
            let result = api.flush_all()?;
            report(&result, Some("Content saved"));
            Ok(())
        }
        Commands::Move {
            source,
            position,
            target,
        } => {
            let source = api.resolve_live(&source)?;
            let target = api.resolve_live(&target)?;
            let result = api.move_document(&source, &target, position)?;
            report(&result, Some("Moved"));
            Ok(())
        }
        Commands::Archive { id } => {
            let id = api.resolve_live(&id)?;
            let result = api.archive_document(&id)?;
            report(&result, Some("Moved to the trash"));
            Ok(())
        }
        Commands::Restore { id } => {
            let id = api.resolve_trashed(&id)?;
            let result = api.restore_document(&id)?;
            report(&result, Some("Restored"));
            Ok(())
        }
        Commands::Purge { id } => {
            let id = api.resolve_trashed(&id)?;
            let result = api.purge_document(&id)?;
            report(&result, None);
            Ok(())
        }
        Commands::Trash => {
            print!("{}", render::render_trash(&api.trash()));
            Ok(())
        }
        Commands::Favorites => {
            print!("{}", render::render_favorites(&api.favorites()));
            Ok(())
        }
        Commands::Open { id } => {
            let id = api.resolve_live(&id)?;
            let result = api.navigate(Route::to(id))?;
            print!("{}", render::render_messages(&result.messages));
            handle_show(api, None)
        }
        Commands::Close => {
            api.navigate(Route::home())?;
            Ok(())
        }
        Commands::Expand { id } => {
            let id = api.resolve_live(&id)?;
            api.set_expanded(&id, true)?;
            Ok(())
        }
        Commands::Collapse { id } => {
            let id = api.resolve_live(&id)?;
            api.set_expanded(&id, false)?;
            Ok(())
        }
        Commands::Config { action } => {
            handle_config_command(action.as_ref(), &ctx.data_dir, &ctx.config)
        }
    }
}

/// Shows `id`, or the open document when no id is given.
fn handle_show(api: &FolioApi<FsBackend>, id: Option<&str>) -> Result<()> {
    if let Some(id) = id {
        let id = api.resolve_live(id)?;
        let doc = api
            .get(&id)
            .ok_or_else(|| FolioError::DocumentNotFound(id.clone()))?;
        print!("{}", render::render_document(doc, &api.breadcrumbs(&id)));
        return Ok(());
    }

    match api.active_view() {
        ActiveView::Nothing => print!("{}", render::render_no_active()),
        ActiveView::Found(doc) => {
            print!("{}", render::render_document(doc, &api.breadcrumbs(&doc.id)))
        }
        ActiveView::NotFound(id) => print!("{}", render::render_not_found(id)),
    }
    Ok(())
}

/// Prints the command's messages. A change without messages gets `fallback`;
/// a no-op says so.
fn report(result: &CmdResult, fallback: Option<&str>) {
    if !result.messages.is_empty() {
        print!("{}", render::render_messages(&result.messages));
    } else if result.is_noop() {
        print!(
            "{}",
            render::render_messages(&[CmdMessage::warning("Nothing changed")])
        );
    } else if let Some(text) = fallback {
        print!("{}", render::render_messages(&[CmdMessage::success(text)]));
    }
}

/// Handle the `folio config` subcommand using clapfig directly.
fn handle_config_command(
    action: Option<&ConfigCommands>,
    data_dir: &Path,
    config: &FolioConfig,
) -> Result<()> {
    let search_paths = vec![SearchPath::Path(data_dir.to_path_buf())];
    let action = match action {
        None => {
            // Bare `folio config`: show all resolved values
            let table = toml::Value::try_from(config).map_err(|e| FolioError::Api(e.to_string()))?;
            if let toml::Value::Table(t) = table {
                for (k, v) in &t {
                    println!("{} = {}", k, format_toml_value(v));
                }
            }
            return Ok(());
        }
        Some(ConfigCommands::Gen { output }) => ConfigAction::Gen {
            output: output.clone(),
        },
        Some(ConfigCommands::Get { key }) => ConfigAction::Get {
            key: key.clone(),
            scope: None,
        },
        Some(ConfigCommands::Set { key, value }) => ConfigAction::Set {
            key: key.clone(),
            value: value.clone(),
            scope: None,
        },
    };

    let result = Clapfig::builder::<FolioConfig>()
        .app_name("folio")
        .file_name(CONFIG_FILE)
        .search_paths(search_paths)
        .no_env()
        .strict(false)
        .handle(&action)
        .map_err(|e| FolioError::Api(e.to_string()))?;
    println!("{result}");
    Ok(())
}

/// Format a TOML value for display.
fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    }
}
