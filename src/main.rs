use anyhow::Result;
use clap::{Parser, Subcommand};
use gitter::areas::repository::Repository;
use gitter::artifacts::core::PagerWriter;
use gitter::commands::porcelain::log::DEFAULT_LOG_LIMIT;
use is_terminal::IsTerminal;
use minus::Pager;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `GITTER_LOG=debug`)
const LOG_ENV_VAR: &str = "GITTER_LOG";

/// Set to any value to print `log` output directly instead of paging it
const NO_PAGER_ENV_VAR: &str = "NO_PAGER";

#[derive(Parser)]
#[command(
    name = "gitter",
    version = "0.1.0",
    about = "A simplified version control system",
    long_about = "Gitter keeps content-addressed snapshots of a directory. \
    It supports a staging area, a linear commit history per branch, \
    status and line diffs, but no merging or remotes.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Add file contents to the index",
        long_about = "Stage new, modified and deleted files matching the given pathspecs. \
        A pathspec is '.', a file, a directory or a glob using '*', '**' and '?'."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The pathspecs to stage")]
        pathspecs: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Record changes to the repository",
        long_about = "This command creates a new commit on the current branch with the staged changes."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
        #[arg(short, long, help = "Stage modified and deleted tracked files first")]
        all: bool,
    },
    #[command(
        name = "status",
        about = "Show the working tree status",
        long_about = "List staged changes, unstaged changes and untracked files."
    )]
    Status,
    #[command(
        name = "diff",
        about = "Show unstaged changes",
        long_about = "Show a line diff between the index and the working tree for every tracked file."
    )]
    Diff,
    #[command(
        name = "log",
        about = "Show the commit history",
        long_about = "List the commits of the current branch, newest first."
    )]
    Log {
        #[arg(short = 'n', long = "max-count", default_value_t = DEFAULT_LOG_LIMIT, help = "Limit the number of commits shown")]
        max_count: usize,
    },
    #[command(
        name = "reset",
        about = "Reset the branch to a commit or unstage files",
        long_about = "With no arguments or a revision such as HEAD~1, move the current branch and the index \
        to that commit, leaving the working tree untouched. Otherwise unstage the files matching the given pathspecs."
    )]
    Reset {
        #[arg(index = 1, help = "A revision (HEAD, HEAD~N) or pathspecs")]
        args: Vec<String>,
    },
    #[command(
        name = "checkout",
        about = "Switch branches",
        long_about = "Switch to an existing branch, or create one with -b. Both require a clean working tree."
    )]
    Checkout {
        #[arg(short = 'b', help = "Create the branch before switching to it")]
        create: bool,
        #[arg(index = 1)]
        branch: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the payload of an object in the repository. \
        It requires the hash of the object to be specified."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object hash to print")]
        sha: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database",
        long_about = "This command hashes a file as a blob and can write it to the object database."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let pwd = std::env::current_dir()?;

    match &cli.command {
        Commands::Init { path } => {
            let path = path.as_deref().map(Path::new).unwrap_or(&pwd);
            Repository::new(path, Box::new(std::io::stdout()))?.init()?
        }
        Commands::Log { max_count } => {
            if std::io::stdout().is_terminal() && std::env::var_os(NO_PAGER_ENV_VAR).is_none() {
                let pager = Pager::new();
                let writer = PagerWriter::new(pager.clone());
                Repository::discover(&pwd, Box::new(writer))?.log(*max_count)?;
                minus::page_all(pager)?;
            } else {
                open_repository(&pwd)?.log(*max_count)?
            }
        }
        Commands::Add { pathspecs } => open_repository(&pwd)?.add(pathspecs)?,
        Commands::Commit { message, all } => open_repository(&pwd)?.commit(message, *all)?,
        Commands::Status => open_repository(&pwd)?.show_status()?,
        Commands::Diff => open_repository(&pwd)?.diff()?,
        Commands::Reset { args } => open_repository(&pwd)?.reset(args)?,
        Commands::Checkout { create, branch } => {
            open_repository(&pwd)?.checkout(branch, *create)?
        }
        Commands::CatFile { sha } => open_repository(&pwd)?.cat_file(sha)?,
        Commands::HashObject { write, file } => open_repository(&pwd)?.hash_object(file, *write)?,
    }

    Ok(())
}

fn open_repository(pwd: &Path) -> Result<Repository> {
    Ok(Repository::discover(pwd, Box::new(std::io::stdout()))?)
}
