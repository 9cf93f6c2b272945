use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use depot::artifacts::merge::MergeBaseStrategy;
use depot::config::Config;
use depot::error::DepotError;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "depot",
    version = "0.1.0",
    about = "A file-based version control engine",
    long_about = "depot snapshots project trees into content-addressed storage, \
    records every operation as an immutable manifest and merges histories \
    with three-way conflict files.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(long, global = true, help = "Database root holding <user>/<project> trees")]
    root: Option<PathBuf>,
    #[arg(long, global = true, help = "User acting on the project")]
    user: Option<String>,
    #[arg(long, global = true, value_enum, help = "Merge-base strategy for merge-out")]
    merge_base: Option<MergeBaseStrategy>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "create", about = "Create a new project")]
    Create {
        #[arg(index = 1)]
        project: String,
    },
    #[command(
        name = "check-in",
        about = "Snapshot the project's working tree",
        long_about = "This command copies the working tree into the project's storage \
        and records a check-in manifest on top of the current head."
    )]
    CheckIn {
        #[arg(index = 1)]
        project: String,
    },
    #[command(
        name = "check-out",
        about = "Replay a manifest into the project's working tree",
        long_about = "This command restores a manifest, given by id or label, into the \
        project's working tree. The manifest may come from another user's project."
    )]
    CheckOut {
        #[arg(index = 1)]
        project: String,
        #[arg(index = 2, help = "Manifest id or label")]
        revision: String,
        #[arg(long, help = "Owner of the source project (defaults to --user)")]
        from_user: Option<String>,
        #[arg(long, help = "Name of the source project (defaults to the target's name)")]
        from_project: Option<String>,
    },
    #[command(name = "label", about = "Attach a label to a manifest")]
    Label {
        #[arg(index = 1)]
        project: String,
        #[arg(index = 2, help = "Manifest id or label")]
        revision: String,
        #[arg(index = 3)]
        label: String,
    },
    #[command(
        name = "merge-out",
        about = "Merge another user's manifest into the project",
        long_about = "This command merges a source manifest into a target manifest of the \
        project. Conflicting files are replaced by _mr, _mg and _mt variants that must be \
        resolved before merge-in."
    )]
    MergeOut {
        #[arg(index = 1)]
        project: String,
        #[arg(index = 2, help = "Source manifest id or label")]
        source_revision: String,
        #[arg(index = 3, help = "Target manifest id or label")]
        target_revision: String,
        #[arg(long, help = "Owner of the source project (defaults to --user)")]
        from_user: Option<String>,
    },
    #[command(name = "merge-in", about = "Complete a resolved merge-out")]
    MergeIn {
        #[arg(index = 1)]
        project: String,
    },
    #[command(name = "log", about = "Show the project's manifests")]
    Log {
        #[arg(index = 1)]
        project: String,
    },
    #[command(name = "remove", about = "Delete a project and its storage")]
    Remove {
        #[arg(index = 1)]
        project: String,
    },
}

fn stdout() -> Box<dyn std::io::Write> {
    Box::new(std::io::stdout())
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_from_env()
        .context("Failed to load configuration")?
        .with_overrides(cli.root, cli.user, cli.merge_base);

    match &cli.command {
        Commands::Create { project } => {
            config.project(project, stdout())?.create()?;
        }
        Commands::CheckIn { project } => {
            config
                .project(project, stdout())?
                .check_in()
                .with_context(|| format!("Failed to check in {}", project))?;
        }
        Commands::CheckOut {
            project,
            revision,
            from_user,
            from_project,
        } => {
            let target = config.project(project, stdout())?;
            let source = config.project_of(
                from_user.as_deref().unwrap_or(&config.user),
                from_project.as_deref().unwrap_or(project),
                Box::new(std::io::sink()),
            )?;
            target
                .check_out(&source, revision)
                .with_context(|| format!("Failed to check out {}", revision))?;
        }
        Commands::Label {
            project,
            revision,
            label,
        } => {
            config.project(project, stdout())?.label(revision, label)?;
        }
        Commands::MergeOut {
            project,
            source_revision,
            target_revision,
            from_user,
        } => {
            let target = config.project(project, stdout())?;
            let source = config.project_of(
                from_user.as_deref().unwrap_or(&config.user),
                project,
                Box::new(std::io::sink()),
            )?;
            target
                .merge_out(&source, source_revision, target_revision)
                .with_context(|| format!("Failed to merge {} into {}", source_revision, project))?;
        }
        Commands::MergeIn { project } => {
            config.project(project, stdout())?.merge_in()?;
        }
        Commands::Log { project } => {
            config.project(project, stdout())?.log()?;
        }
        Commands::Remove { project } => {
            config.project(project, stdout())?.remove()?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = depot::logging::init() {
        eprintln!("{} {}", "warning:".yellow().bold(), error);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let kind = error
                .chain()
                .find_map(|cause| cause.downcast_ref::<DepotError>())
                .map(|depot_error| depot_error.kind().to_string())
                .unwrap_or_else(|| "Error".to_string());

            eprintln!("{} {:#}", format!("error[{}]:", kind).red().bold(), error);
            ExitCode::FAILURE
        }
    }
}
