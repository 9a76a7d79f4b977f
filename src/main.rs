use clap::{Parser, Subcommand};
use grit::areas::repository::Repository;
use grit::errors::{RepoError, RepoResult};

#[derive(Parser)]
#[command(
    name = "grit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A miniature version-control system",
    long_about = "A miniature version-control system: a content-addressable object store, \
    a commit history graph, a staging area and a three-way merge with conflict detection, \
    operating on a single flat working tree.",
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
    #[command(name = "init", about = "Initialize a new repository in the current directory")]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(name = "rm", about = "Un-stage a file, or stage a tracked file for removal")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(name = "commit", about = "Commit the staged changes with the given message")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the first-parent history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit in the repository")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of all commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message to look for")]
        message: String,
    },
    #[command(name = "status", about = "Show branches and the staged change set")]
    Status,
    #[command(
        name = "checkout",
        about = "Check out a branch, a file from HEAD, or a file from a commit",
        long_about = "Three forms: `checkout <branch>` switches branches, \
        `checkout -- <file>` restores a file from HEAD, and \
        `checkout <commit-prefix> -- <file>` restores a file from a commit."
    )]
    Checkout {
        #[arg(num_args = 1..=3, required = true, value_name = "ARGS")]
        args: Vec<String>,
    },
    #[command(name = "branch", about = "Create a branch pointing at the current commit")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "reset", about = "Check out a commit and repoint the current branch at it")]
    Reset {
        #[arg(index = 1, help = "A commit id or an unambiguous prefix of one")]
        commit: String,
    },
    #[command(name = "merge", about = "Merge the given branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
    },
}

fn main() {
    // The `checkout` forms carry a literal "--" separator which clap would
    // swallow as its escape marker, so they are routed from the raw argument
    // list; everything else goes through clap.
    let raw_args = std::env::args().skip(1).collect::<Vec<_>>();
    let outcome = if raw_args.first().map(String::as_str) == Some("checkout") {
        open_repository().and_then(|repository| checkout(&repository, &raw_args[1..]))
    } else {
        let cli = Cli::parse();
        run(&cli.command)
    };

    if let Err(error) = outcome {
        // every failure is one line on stdout and a non-zero exit
        println!("{error}");
        std::process::exit(1);
    }
}

fn open_repository() -> RepoResult<Repository> {
    let pwd = std::env::current_dir()?;
    let repository = Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

    if !repository.is_initialized() {
        return Err(RepoError::precondition("Not in an initialized grit directory."));
    }

    Ok(repository)
}

fn run(command: &Commands) -> RepoResult<()> {
    if matches!(command, Commands::Init) {
        let pwd = std::env::current_dir()?;
        let repository = Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;
        return repository.init();
    }

    let repository = open_repository()?;

    match command {
        Commands::Init => unreachable!("handled above"),
        Commands::Add { file } => repository.add(file),
        Commands::Rm { file } => repository.rm(file),
        Commands::Commit { message } => repository.commit(message),
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => repository.find(message),
        Commands::Status => repository.status(),
        Commands::Checkout { args } => checkout(&repository, args),
        Commands::Branch { name } => repository.create_branch(name),
        Commands::RmBranch { name } => repository.remove_branch(name),
        Commands::Reset { commit } => {
            let commit_id = repository.resolve_commit_id(commit)?;
            repository.reset(&commit_id)
        }
        Commands::Merge { branch } => repository.merge(branch),
    }
}

fn checkout(repository: &Repository, args: &[String]) -> RepoResult<()> {
    match args {
        [branch] if branch != "--" => repository.checkout_branch(branch),
        [separator, file] if separator == "--" => repository.checkout_file_from_head(file),
        [commit_prefix, separator, file] if separator == "--" => {
            let commit_id = repository.resolve_commit_id(commit_prefix)?;
            repository.checkout_file_from_commit(file, &commit_id)
        }
        _ => Err(RepoError::precondition("Incorrect operands.")),
    }
}
