//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the Ctrl-C handler and
//! dispatches the subcommand.

use anyhow::{Context, Result, bail};
use clap::CommandFactory;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use safe_path_ops::cli::{Args, Command};
use safe_path_ops::config::ENV_CONFIG;
use safe_path_ops::fs_ops::{
    safe_check_create_directory, safe_copy_directory, safe_copy_file, safe_delete_directory,
    safe_delete_file, safe_directory_exists, safe_file_exists, safe_move_file,
};
use safe_path_ops::output as out;
use safe_path_ops::path::{
    combine_all, combine_virtual_all, get_absolute_path, get_relative_path, split_path,
};
use safe_path_ops::{Config, RetryError, RetryPolicy, default_config_path};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handled before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }
    let Some(command) = args.command.clone() else {
        Args::command().print_help()?;
        return Ok(());
    };
    if command == Command::InitConfig {
        return init_config();
    }

    let mut cfg = Config::load().context("load configuration")?;
    args.apply_overrides(&mut cfg);

    let guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;
    // Dropped on Ctrl-C or at the end of run() to flush the file appender.
    let guard_slot = Arc::new(Mutex::new(guard));

    debug!(?cfg, "effective configuration");

    let result = if command.uses_filesystem() {
        let cancel = CancellationToken::new();
        {
            let cancel = cancel.clone();
            let guard_slot = Arc::clone(&guard_slot);
            ctrlc::set_handler(move || {
                cancel.cancel();
                out::print_warn("Received interrupt; stopping after the current attempt...");
                if let Ok(mut g) = guard_slot.lock() {
                    let _ = g.take();
                }
            })
            .context("install Ctrl-C handler")?;
        }
        let policy = RetryPolicy::from_config(&cfg).with_cancellation(cancel);
        run_fs_command(&command, policy)
    } else {
        run_path_command(&command);
        Ok(())
    };

    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }
    result
}

fn print_config_location() {
    if let Ok(explicit) = std::env::var(ENV_CONFIG) {
        out::print_info(&format!("Using {ENV_CONFIG} (explicit):\n  {explicit}\n"));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run `init-config` to create a template.");
            }
        }
        None => out::print_error("Could not determine a default config path"),
    }
}

fn init_config() -> Result<()> {
    let Some(path) = default_config_path() else {
        bail!("could not determine a config path; set {ENV_CONFIG}");
    };
    safe_path_ops::config::create_template_config(&path)?;
    out::print_success(&format!("A template config was written to: {}", path.display()));
    Ok(())
}

fn run_path_command(command: &Command) {
    match command {
        Command::Relative { from, to } => out::print_user(&get_relative_path(from, to)),
        Command::Absolute { path, base } => out::print_user(&get_absolute_path(path, base)),
        Command::Combine {
            parts,
            virtual_path,
        } => {
            let joined = if *virtual_path {
                combine_virtual_all(parts)
            } else {
                combine_all(parts)
            };
            out::print_user(&joined);
        }
        Command::Split { path } => {
            let sp = split_path(path);
            out::print_field("drive", sp.drive());
            out::print_field("share", sp.share());
            out::print_field("directory", sp.directory());
            out::print_field("name", sp.name_without_extension());
            out::print_field("extension", sp.extension());
        }
        _ => {}
    }
}

fn run_fs_command(command: &Command, policy: RetryPolicy) -> Result<()> {
    match command {
        Command::Copy {
            src,
            dst,
            no_overwrite,
        } => {
            let policy = policy.with_label(format!("copy '{src}' -> '{dst}'"));
            if safe_directory_exists(src) {
                let files = safe_copy_directory(src, dst, &policy).map_err(report)?;
                out::print_success(&format!("Copied {files} file(s) '{src}' -> '{dst}'"));
            } else {
                safe_copy_file(src, dst, !no_overwrite, &policy).map_err(report)?;
                out::print_success(&format!("Copied '{src}' -> '{dst}'"));
            }
        }
        Command::Move { src, dst } => {
            let policy = policy.with_label(format!("move '{src}' -> '{dst}'"));
            safe_move_file(src, dst, &policy).map_err(report)?;
            out::print_success(&format!("Moved '{src}' -> '{dst}'"));
        }
        Command::Delete { path } => {
            if safe_directory_exists(path) {
                safe_delete_directory(path);
            } else {
                safe_delete_file(path);
            }
            if safe_file_exists(path) || safe_directory_exists(path) {
                bail!("could not delete '{path}'");
            }
            out::print_success(&format!("Deleted '{path}'"));
        }
        Command::Mkdir { path } => {
            safe_check_create_directory(path);
            if !safe_directory_exists(path) {
                bail!("could not create directory '{path}'");
            }
            info!(path = %path, "directory present");
        }
        _ => {}
    }
    Ok(())
}

/// Log a guarded failure with its kind, then hand it back for `?`.
fn report(e: RetryError) -> anyhow::Error {
    match &e {
        RetryError::TriedTooOften {
            attempts, source, ..
        } => error!(kind = "tried_too_often", attempts, cause = %source, "{e}"),
        RetryError::PassThrough(inner) => error!(kind = "pass_through", error = %inner, "operation failed"),
        RetryError::Cancelled => error!(kind = "cancelled", "operation cancelled by user"),
    }
    e.into()
}
