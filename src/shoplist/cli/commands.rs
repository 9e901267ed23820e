use super::print::{print_config, print_countdown, print_items, print_messages};
use super::setup::{init_logging, Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use shoplist::api::{CmdMessage, ConfigAction, Hydration, ShopPaths, ShoppingListApi};
use shoplist::config::ShopConfig;
use shoplist::error::{Result, ShopError};
use shoplist::order::parse_selectors;
use shoplist::store::fs::FileBackend;
use std::path::PathBuf;

const HOME_ENV: &str = "SHOPLIST_HOME";

struct AppContext {
    api: ShoppingListApi<FileBackend>,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = ShopPaths::new(data_dir()?);

    // Config does not need the list loaded
    if let Some(Commands::Config { key, value }) = cli.command {
        return handle_config(&paths, key, value);
    }

    let mut ctx = init_context(paths).await?;

    match cli.command {
        Some(Commands::Add { name }) => handle_add(&mut ctx, name.join(" ")).await,
        Some(Commands::List { active }) => handle_list(&ctx, !active),
        Some(Commands::Done { items }) => handle_done(&mut ctx, items).await,
        Some(Commands::Delete { items }) => handle_delete(&mut ctx, items).await,
        Some(Commands::Counter { done }) => handle_counter(&mut ctx, done).await,
        Some(Commands::Config { .. }) => Ok(()),
        None => handle_list(&ctx, true),
    }
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "shoplist", "shoplist")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ShopError::Store("Could not determine data directory".to_string()))
}

async fn init_context(paths: ShopPaths) -> Result<AppContext> {
    let config = ShopConfig::load(paths.config_dir()).unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable config: {}", e);
        ShopConfig::default()
    });
    let backend = FileBackend::new(paths.store_dir());
    let mut api = ShoppingListApi::new(backend, config);

    match api.hydrate().await? {
        Hydration::Recovered { backup_key } => {
            let where_to = backup_key.unwrap_or_else(|| "nowhere".to_string());
            print_messages(&[CmdMessage::warning(format!(
                "Saved list could not be read and was moved to '{}'; starting from defaults.",
                where_to
            ))]);
        }
        Hydration::Restored(count) => log::debug!("Loaded {} items", count),
        Hydration::FirstRun => log::debug!("No saved list, using defaults"),
    }

    Ok(AppContext { api })
}

async fn handle_add(ctx: &mut AppContext, name: String) -> Result<()> {
    let result = ctx.api.add(&name).await?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, show_completed: bool) -> Result<()> {
    let result = ctx.api.list(show_completed);
    print_items(&result.listed_items);
    print_messages(&result.messages);
    Ok(())
}

async fn handle_done(ctx: &mut AppContext, items: Vec<String>) -> Result<()> {
    let selectors = parse_selectors(&items);
    let result = ctx.api.toggle_items(&selectors).await?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_delete(ctx: &mut AppContext, items: Vec<String>) -> Result<()> {
    let selectors = parse_selectors(&items);
    let result = ctx.api.delete_items(&selectors).await?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_counter(ctx: &mut AppContext, done: bool) -> Result<()> {
    let result = if done {
        ctx.api.mark_countdown_done().await?
    } else {
        ctx.api.countdown_status()
    };
    if let Some(report) = &result.countdown {
        print_countdown(report);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(paths: &ShopPaths, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = shoplist::commands::config::run(paths, action)?;
    if let (Some(config), true) = (&result.config, result.messages.is_empty()) {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}
