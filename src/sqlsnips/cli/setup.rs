use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sqlsnips",
    bin_name = "sqlsnips",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "SQL snippets kept as plain .sql files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Snippets root directory (overrides SNIPPETS_MANAGEMENT_FOLDER and config)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub root: Option<PathBuf>,

    /// Print JSON instead of formatted text
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Snippet,
    Folder,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Snippet => "Snippet Commands:",
            CommandGroup::Folder => "Folder Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "view" | "create" | "update" | "put" | "delete" | "count" | "path" => {
                Some(CommandGroup::Snippet)
            }
            "folders" | "browse" | "mkdir" | "rmdir" => Some(CommandGroup::Folder),
            "id" | "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[CommandGroup::Snippet, CommandGroup::Folder, CommandGroup::Misc]
    }
}

pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("sqlsnips {version}\n"));
    output.push_str("SQL snippets kept as plain .sql files\n");
    output.push('\n');
    output.push_str("Usage: sqlsnips [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --root <DIR>  Snippets root directory\n");
    output.push_str("      --json        Print JSON instead of formatted text\n");
    output.push_str("  -v, --verbose     Verbose output\n");
    output.push_str("  -h, --help        Print help\n");
    output.push_str("  -V, --version     Print version\n");

    output
}

/// Help for one subcommand, or the grouped overview when `name` is unknown.
pub fn help_for_command(name: Option<&str>) -> String {
    let Some(name) = name else {
        return get_grouped_help();
    };
    let mut cmd = Cli::command();
    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            return subcmd.render_help().to_string();
        }
    }
    format!("Unknown command: {}\n\n{}", name, get_grouped_help())
}

pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Snippet(c) => match c {
            SnippetCommands::List { .. } => "list",
            SnippetCommands::View { .. } => "view",
            SnippetCommands::Create { .. } => "create",
            SnippetCommands::Update { .. } => "update",
            SnippetCommands::Put { .. } => "put",
            SnippetCommands::Delete { .. } => "delete",
            SnippetCommands::Count { .. } => "count",
            SnippetCommands::Path { .. } => "path",
        },
        Commands::Folder(c) => match c {
            FolderCommands::Folders { .. } => "folders",
            FolderCommands::Browse { .. } => "browse",
            FolderCommands::Mkdir { .. } => "mkdir",
            FolderCommands::Rmdir { .. } => "rmdir",
        },
        Commands::Misc(c) => match c {
            MiscCommands::Id { .. } => "id",
            MiscCommands::Config { .. } => "config",
            MiscCommands::Help { .. } => "help",
        },
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Snippet(SnippetCommands),

    #[command(flatten)]
    Folder(FolderCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Name,
    #[default]
    Updated,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Asc,
    #[default]
    Desc,
}

/// Paging and ordering shared by `list` and `browse`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageArgs {
    /// Page size (0 = 100, at most 1000)
    #[arg(short, long, default_value_t = 0)]
    pub limit: usize,

    /// Continue after this snippet id
    #[arg(long)]
    pub cursor: Option<String>,

    /// Sort field
    #[arg(long, value_enum, default_value_t = SortArg::Updated)]
    pub sort: SortArg,

    /// Sort order
    #[arg(long, value_enum, default_value_t = OrderArg::Desc)]
    pub order: OrderArg,
}

#[derive(Subcommand, Debug)]
pub enum SnippetCommands {
    /// List snippets
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Case-insensitive name search across all folders
        #[arg(short, long)]
        search: Option<String>,

        /// Only snippets in this folder id (ignored when searching)
        #[arg(short, long)]
        folder: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// View one or more snippets
    #[command(alias = "v", display_order = 2)]
    View {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Create a snippet (SQL from --sql or piped stdin)
    #[command(alias = "n", display_order = 3)]
    Create {
        name: String,

        /// Folder id to create the snippet in
        #[arg(short, long)]
        folder: Option<String>,

        /// SQL text
        #[arg(long)]
        sql: Option<String>,
    },

    /// Rename, move or edit a snippet
    #[command(alias = "e", display_order = 4)]
    Update {
        id: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// Move into this folder id
        #[arg(short, long, conflicts_with = "root_folder")]
        folder: Option<String>,

        /// Move to the root
        #[arg(long)]
        root_folder: bool,

        /// New SQL text (or piped stdin)
        #[arg(long)]
        sql: Option<String>,
    },

    /// Replace a snippet, creating it if the id is unknown
    #[command(display_order = 5)]
    Put {
        id: String,

        name: String,

        /// Folder id
        #[arg(short, long)]
        folder: Option<String>,

        /// SQL text (or piped stdin)
        #[arg(long)]
        sql: Option<String>,
    },

    /// Delete snippets (ids may be comma-separated)
    #[command(alias = "rm", display_order = 6)]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Count snippets
    #[command(display_order = 7)]
    Count {
        /// Only count names containing this term
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Print the file path of one or more snippets
    #[command(display_order = 8)]
    Path {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FolderCommands {
    /// List folders
    #[command(display_order = 10)]
    Folders {
        /// Parent folder id (folders never nest, so this lists nothing)
        #[arg(long)]
        parent: Option<String>,
    },

    /// Show the root or one folder: subfolders plus its snippets
    #[command(display_order = 11)]
    Browse {
        folder: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Create a folder
    #[command(display_order = 12)]
    Mkdir { name: String },

    /// Delete folders and every snippet inside them
    #[command(display_order = 13)]
    Rmdir {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Print the id derived from path parts (e.g. `id reports weekly.sql`)
    #[command(display_order = 20)]
    Id {
        #[arg(num_args = 0..)]
        parts: Vec<String>,
    },

    /// Get or set configuration
    #[command(display_order = 21)]
    Config {
        /// Configuration key (e.g., root)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print help for sqlsnips or a subcommand
    #[command(display_order = 22)]
    Help {
        command: Option<String>,
    },
}
