use super::print::{
    print_count, print_folder_contents, print_folders, print_full_snippets, print_info,
    print_snippet_page, print_success,
};
use super::setup::{
    command_name, help_for_command, Cli, Commands, FolderCommands, MiscCommands, OrderArg,
    PageArgs, SnippetCommands, SortArg,
};
use clap::Parser;
use serde::Serialize;
use sqlsnips::api::{ListParams, SnippetsApi};
use sqlsnips::config::{SnippetsConfig, CONFIG_KEYS};
use sqlsnips::error::Result;
use sqlsnips::identity;
use sqlsnips::init::{config_dir, initialize};
use sqlsnips::store::fs::FsBackend;
use std::io::{IsTerminal, Read};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static LOGGING: Once = Once::new();

struct AppContext {
    api: SnippetsApi<FsBackend>,
    json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.help {
        print!("{}", help_for_command(cli.command.as_ref().map(command_name)));
        return Ok(());
    }

    // Commands that never touch the snippets root
    match &cli.command {
        Some(Commands::Misc(MiscCommands::Help { command })) => {
            print!("{}", help_for_command(command.as_deref()));
            return Ok(());
        }
        Some(Commands::Misc(MiscCommands::Id { parts })) => return handle_id(parts, cli.json),
        Some(Commands::Misc(MiscCommands::Config { key, value })) => {
            return handle_config(key.as_deref(), value.as_deref(), cli.json)
        }
        _ => {}
    }

    let ctx = AppContext {
        api: initialize(cli.root.clone())?.api,
        json: cli.json,
    };

    match cli.command {
        Some(Commands::Snippet(cmd)) => match cmd {
            SnippetCommands::List {
                search,
                folder,
                page,
            } => handle_list(&ctx, search, folder, &page),
            SnippetCommands::View { ids } => handle_view(&ctx, &ids),
            SnippetCommands::Create { name, folder, sql } => {
                handle_create(&ctx, &name, folder.as_deref(), sql)
            }
            SnippetCommands::Update {
                id,
                name,
                folder,
                root_folder,
                sql,
            } => {
                let folder = if root_folder {
                    Some(None)
                } else {
                    folder.as_deref().map(Some)
                };
                handle_update(&ctx, &id, name.as_deref(), folder, sql)
            }
            SnippetCommands::Put {
                id,
                name,
                folder,
                sql,
            } => handle_put(&ctx, &id, &name, folder.as_deref(), sql),
            SnippetCommands::Delete { ids } => handle_delete(&ctx, &ids),
            SnippetCommands::Count { search } => handle_count(&ctx, search.as_deref()),
            SnippetCommands::Path { ids } => handle_paths(&ctx, &ids),
        },
        Some(Commands::Folder(cmd)) => match cmd {
            FolderCommands::Folders { parent } => handle_folders(&ctx, parent.as_deref()),
            FolderCommands::Browse { folder, page } => {
                handle_browse(&ctx, folder.as_deref(), &page)
            }
            FolderCommands::Mkdir { name } => handle_mkdir(&ctx, &name),
            FolderCommands::Rmdir { ids } => handle_rmdir(&ctx, &ids),
        },
        // Handled above
        Some(Commands::Misc(_)) => Ok(()),
        None => handle_list(&ctx, None, None, &PageArgs::default()),
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug events with `-v`.
/// Logs go to stderr so `--json` output stays parseable.
fn init_logging(verbose: bool) {
    LOGGING.call_once(|| {
        let fallback = if verbose {
            "sqlsnips=debug"
        } else {
            "sqlsnips=warn"
        };
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
            )
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Piped stdin, if any. Empty input counts as none.
fn read_piped_sql() -> Result<Option<String>> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer)?;
    Ok((!buffer.is_empty()).then_some(buffer))
}

fn sql_or_stdin(sql: Option<String>) -> Result<Option<String>> {
    match sql {
        Some(sql) => Ok(Some(sql)),
        None => read_piped_sql(),
    }
}

fn list_params(search: Option<String>, folder: Option<String>, page: &PageArgs) -> ListParams {
    ListParams {
        search,
        limit: page.limit,
        cursor: page.cursor.clone(),
        sort: Some(
            match page.sort {
                SortArg::Name => "name",
                SortArg::Updated => "updated_at",
            }
            .to_string(),
        ),
        order: Some(
            match page.order {
                OrderArg::Asc => "asc",
                OrderArg::Desc => "desc",
            }
            .to_string(),
        ),
        folder,
    }
}

/// True when `ids` holds exactly one id, not a comma list.
fn is_single(ids: &[String]) -> bool {
    ids.len() == 1 && !ids[0].contains(',')
}

fn handle_list(
    ctx: &AppContext,
    search: Option<String>,
    folder: Option<String>,
    page: &PageArgs,
) -> Result<()> {
    let page = ctx.api.list_snippets(&list_params(search, folder, page))?;
    if ctx.json {
        return print_json(&page);
    }
    print_snippet_page(&page);
    Ok(())
}

fn handle_view(ctx: &AppContext, ids: &[String]) -> Result<()> {
    let snippets = ids
        .iter()
        .map(|id| ctx.api.get_snippet(id))
        .collect::<Result<Vec<_>>>()?;
    if ctx.json {
        return match snippets.as_slice() {
            [single] => print_json(single),
            many => print_json(many),
        };
    }
    print_full_snippets(&snippets);
    Ok(())
}

fn handle_create(
    ctx: &AppContext,
    name: &str,
    folder: Option<&str>,
    sql: Option<String>,
) -> Result<()> {
    let sql = sql_or_stdin(sql)?.unwrap_or_default();
    let snippet = ctx.api.create_snippet(name, &sql, folder)?;
    if ctx.json {
        return print_json(&snippet);
    }
    print_success(&format!("Snippet created: {} ({})", snippet.name, snippet.id));
    Ok(())
}

fn handle_update(
    ctx: &AppContext,
    id: &str,
    name: Option<&str>,
    folder: Option<Option<&str>>,
    sql: Option<String>,
) -> Result<()> {
    let sql = sql_or_stdin(sql)?;
    let snippet = ctx.api.update_snippet(id, name, folder, sql.as_deref())?;
    if ctx.json {
        return print_json(&snippet);
    }
    print_success(&format!("Snippet updated: {} ({})", snippet.name, snippet.id));
    Ok(())
}

fn handle_put(
    ctx: &AppContext,
    id: &str,
    name: &str,
    folder: Option<&str>,
    sql: Option<String>,
) -> Result<()> {
    let sql = sql_or_stdin(sql)?.unwrap_or_default();
    let snippet = ctx.api.put_snippet(id, name, &sql, folder)?;
    if ctx.json {
        return print_json(&snippet);
    }
    print_success(&format!("Snippet saved: {} ({})", snippet.name, snippet.id));
    Ok(())
}

fn handle_delete(ctx: &AppContext, ids: &[String]) -> Result<()> {
    if is_single(ids) {
        let removed = ctx.api.delete_snippet(&ids[0])?;
        if ctx.json {
            return print_json(&serde_json::json!({ "deleted": removed }));
        }
        if removed {
            print_success("Snippet deleted");
        } else {
            print_info("No such snippet; nothing to delete");
        }
        return Ok(());
    }

    let removed = ctx.api.delete_snippets(ids)?;
    if ctx.json {
        return print_json(&removed);
    }
    print_success(&format!("{} snippet(s) deleted", removed.len()));
    Ok(())
}

fn handle_count(ctx: &AppContext, search: Option<&str>) -> Result<()> {
    let count = ctx.api.count(search)?;
    if ctx.json {
        return print_json(&count);
    }
    print_count(&count);
    Ok(())
}

fn handle_paths(ctx: &AppContext, ids: &[String]) -> Result<()> {
    let paths = ctx.api.snippet_paths(ids)?;
    if ctx.json {
        return print_json(&paths);
    }
    for path in &paths {
        println!("{}", path.display());
    }
    Ok(())
}

fn handle_folders(ctx: &AppContext, parent: Option<&str>) -> Result<()> {
    let folders = ctx.api.list_folders(parent)?;
    if ctx.json {
        return print_json(&folders);
    }
    print_folders(&folders);
    Ok(())
}

fn handle_browse(ctx: &AppContext, folder: Option<&str>, page: &PageArgs) -> Result<()> {
    let contents = ctx
        .api
        .folder_contents(folder, &list_params(None, None, page))?;
    if ctx.json {
        return print_json(&contents);
    }
    print_folder_contents(&contents);
    Ok(())
}

fn handle_mkdir(ctx: &AppContext, name: &str) -> Result<()> {
    let folder = ctx.api.create_folder(name)?;
    if ctx.json {
        return print_json(&folder);
    }
    print_success(&format!("Folder created: {} ({})", folder.name, folder.id));
    Ok(())
}

fn handle_rmdir(ctx: &AppContext, ids: &[String]) -> Result<()> {
    if is_single(ids) {
        ctx.api.delete_folder(&ids[0])?;
        if ctx.json {
            return print_json(&serde_json::json!({ "deleted": true }));
        }
        print_success("Folder deleted with its snippets");
        return Ok(());
    }

    let removed = ctx.api.delete_folders(ids)?;
    if ctx.json {
        return print_json(&removed);
    }
    print_success(&format!("{} folder(s) deleted with their snippets", removed.len()));
    Ok(())
}

fn handle_id(parts: &[String], json: bool) -> Result<()> {
    let id = identity::identify(parts);
    if json {
        return print_json(&id);
    }
    println!("{}", id);
    Ok(())
}

fn handle_config(key: Option<&str>, value: Option<&str>, json: bool) -> Result<()> {
    let dir = config_dir()?;
    let mut config = SnippetsConfig::load(&dir)?;

    match (key, value) {
        (None, _) => {
            if json {
                return print_json(&config);
            }
            for key in CONFIG_KEYS {
                let value = config.get(key)?.unwrap_or_else(|| "(unset)".to_string());
                println!("{} = {}", key, value);
            }
        }
        (Some(key), None) => {
            let value = config.get(key)?;
            if json {
                return print_json(&value);
            }
            println!(
                "{} = {}",
                key,
                value.unwrap_or_else(|| "(unset)".to_string())
            );
        }
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save(&dir)?;
            if json {
                return print_json(&config);
            }
            print_success(&format!("Config updated: {}", key));
        }
    }
    Ok(())
}
