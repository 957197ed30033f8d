use super::interactive::{self, PipedInput, TermInput};
use super::render::{
    print_config, print_contact_list, print_full_contacts, print_messages, print_stats,
};
use super::setup::{Cli, Commands};
use clap::Parser;
use console::Term;
use contactbook::api::{ConfigAction, ContactApi};
use contactbook::config::BookConfig;
use contactbook::error::Result;
use contactbook::model::{ContactUpdate, NewContact};
use contactbook::store::fs::JsonFileBackend;
use contactbook::store::ContactStore;
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: ContactApi<JsonFileBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli);

    match cli.command {
        Some(Commands::Add {
            name,
            phone,
            email,
            address,
            notes,
        }) => handle_add(&mut ctx, name, phone, email, address, notes),
        Some(Commands::Show { phone }) => handle_show(&ctx, &phone),
        Some(Commands::Edit {
            phone,
            name,
            new_phone,
            email,
            address,
            notes,
        }) => {
            let update = ContactUpdate {
                name,
                phone: new_phone,
                email,
                address,
                notes,
            };
            handle_edit(&mut ctx, &phone, update)
        }
        Some(Commands::Delete { phone }) => handle_delete(&mut ctx, &phone),
        Some(Commands::Search { query, sort }) => handle_search(&ctx, &query.join(" "), sort),
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::Stats) => handle_stats(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Interactive) => handle_interactive(&mut ctx),
    }
}

fn init_context(cli: &Cli) -> AppContext {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let loaded = BookConfig::load(&cwd);
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => BookConfig::default(),
    };
    init_logging(&config, cli.verbose);
    if let Err(e) = loaded {
        warn!(error = %e, "ignoring unreadable config, using defaults");
    }

    let data_path = match &cli.file {
        Some(path) => resolve(&cwd, path),
        None => config.data_path(&cwd),
    };
    let store = ContactStore::open(JsonFileBackend::new(data_path));

    AppContext {
        api: ContactApi::new(store, cwd),
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Diagnostics go to stderr. `RUST_LOG` wins, then `--verbose`, then the
/// configured level.
fn init_logging(config: &BookConfig, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_add(
    ctx: &mut AppContext,
    name: String,
    phone: String,
    email: Option<String>,
    address: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let input = NewContact {
        name,
        phone,
        email,
        address,
        notes,
    };
    let result = ctx.api.add_contact(input)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, phone: &str) -> Result<()> {
    let result = ctx.api.show_contact(phone)?;
    print_full_contacts(&result.listed_contacts);
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, phone: &str, update: ContactUpdate) -> Result<()> {
    let result = ctx.api.edit_contact(phone, update)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, phone: &str) -> Result<()> {
    let result = ctx.api.delete_contact(phone)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, query: &str, sort: bool) -> Result<()> {
    let result = ctx.api.search_contacts(query, sort)?;
    print_contact_list(&result.listed_contacts);
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_contacts()?;
    print_contact_list(&result.listed_contacts);
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.stats()?;
    if let Some(stats) = &result.stats {
        print_stats(stats);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_interactive(ctx: &mut AppContext) -> Result<()> {
    let term = Term::stdout();
    let mut out = term.clone();
    if term.is_term() {
        let mut input = TermInput::new(term);
        interactive::run(&mut ctx.api, &mut input, &mut out)
    } else {
        let stdin = std::io::stdin();
        let mut input = PipedInput::new(stdin.lock());
        interactive::run(&mut ctx.api, &mut input, &mut out)
    }
}
