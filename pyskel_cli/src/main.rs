//! CLI tool for scaffolding CPython extension modules from skeletons.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pyskel::{CIdent, Config, Plan, RelPath, Scaffolder, SkeletonSet, VarMap};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let skeletons = skeleton_set(&cli.skeleton_dirs);
    match &cli.command {
        Commands::Project { module, render } => cmd_project(&skeletons, module, render),
        Commands::Class {
            class,
            module,
            render,
        } => cmd_class(&skeletons, module, class, render),
        Commands::List { json } => cmd_list(&skeletons, *json),
        Commands::Show { skeleton } => cmd_show(&skeletons, skeleton),
        Commands::Vars { skeleton, json } => cmd_vars(&skeletons, skeleton, *json),
    }
}

/// Arguments for the CLI tool
#[derive(Parser)]
#[command(name = "pyskel", author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Additional skeleton search directory, tried before the user
    /// directory (may be repeated)
    #[arg(long = "skeleton-dir", value_name = "DIR", global = true)]
    skeleton_dirs: Vec<PathBuf>,
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Silence all log output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a fresh extension module project
    Project {
        /// Name of the extension module
        module: CIdent,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Scaffold one extension type inside an existing project
    Class {
        /// Name of the extension type
        class: CIdent,
        /// Name of the extension module the type belongs to
        #[arg(short, long)]
        module: CIdent,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// List available skeletons
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the files and directories of a skeleton
    Show {
        /// Skeleton name
        skeleton: String,
    },
    /// Show the placeholder variables of a skeleton
    Vars {
        /// Skeleton name
        skeleton: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Destination directory [default: the module name for projects, the
    /// current directory for classes]
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Extra substitution variable (may be repeated)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    vars: Vec<String>,
    /// Print the plan without writing anything
    #[arg(long)]
    dry_run: bool,
    /// Scaffold into an existing destination, overwriting files
    #[arg(long)]
    force: bool,
    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

impl RenderArgs {
    fn config(&self) -> Config {
        Config::builder().overwrite(self.force).build()
    }

    fn var_map(&self) -> Result<VarMap> {
        Ok(VarMap::from_pairs(&self.vars)?)
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_filter = if quiet {
        "off"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Search roots from the command line, then `PYSKEL_SKELETON_PATH`, then
/// the per-user skeleton directory.
fn skeleton_set(dirs: &[PathBuf]) -> SkeletonSet {
    let mut roots = dirs.to_vec();
    if let Some(path) = std::env::var_os("PYSKEL_SKELETON_PATH") {
        roots.extend(std::env::split_paths(&path));
    }
    SkeletonSet::discover(roots)
}

/// Scaffold a fresh project under `<output>` (the module name by default)
fn cmd_project(skeletons: &SkeletonSet, module: &CIdent, render: &RenderArgs) -> Result<()> {
    let cfg = render.config();
    let skeleton = skeletons.find("project", &cfg)?;
    let plan = Scaffolder::new(cfg)
        .skeleton(skeleton)
        .var_derived("PROJECT_MODULE", module.as_str())
        .vars(&render.var_map()?)
        .render()?;
    let root = render
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(module.as_str()));
    // Only `class` renders into an existing tree.
    if !render.dry_run && !render.force && root.exists() {
        anyhow::bail!(
            "destination {} already exists (pass --force to scaffold into it)",
            root.display()
        );
    }
    finish(&plan, &root, render)
}

/// Scaffold one class into `<output>` (the current directory by default)
fn cmd_class(
    skeletons: &SkeletonSet,
    module: &CIdent,
    class: &CIdent,
    render: &RenderArgs,
) -> Result<()> {
    let cfg = render.config();
    let skeleton = skeletons.find("class", &cfg)?;
    let plan = Scaffolder::new(cfg)
        .skeleton(skeleton)
        .var_derived("PROJECT_MODULE", module.as_str())
        .var_derived("CLASS_NAME", class.as_str())
        .rename(RelPath::new("Class.c")?, RelPath::new(format!("{class}.c"))?)
        .rename(RelPath::new("Class.h")?, RelPath::new(format!("{class}.h"))?)
        .vars(&render.var_map()?)
        .render()?;
    let root = render.output.clone().unwrap_or_else(|| PathBuf::from("."));
    finish(&plan, &root, render)
}

/// Print the plan, then apply it unless this is a dry run.
fn finish(plan: &Plan, root: &Path, render: &RenderArgs) -> Result<()> {
    for key in plan.unresolved() {
        tracing::warn!("No value provided for ${{{key}}}");
    }

    if render.json {
        let summary = serde_json::json!({
            "root": root,
            "dry_run": render.dry_run,
            "plan": plan,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for entry in &plan.entries {
            println!(
                "{:4} {}",
                entry.action.verb(),
                root.join(entry.dest.to_path_buf()).display()
            );
        }
    }

    if render.dry_run {
        return Ok(());
    }
    let applied = plan
        .apply(root)
        .with_context(|| format!("Failed to scaffold into {}", root.display()))?;
    if !render.json {
        println!("Wrote {} files under {}", applied.len(), root.display());
    }
    Ok(())
}

fn cmd_list(skeletons: &SkeletonSet, json: bool) -> Result<()> {
    let infos = skeletons.list()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }
    println!("Available skeletons:");
    for info in &infos {
        match &info.path {
            Some(path) => println!("  {:10} {}", info.name, path.display()),
            None => println!("  {:10} built-in", info.name),
        }
    }
    Ok(())
}

fn cmd_show(skeletons: &SkeletonSet, name: &str) -> Result<()> {
    let skeleton = skeletons.find(name, &Config::default())?;
    println!("Skeleton: {name}");
    for dir in skeleton.dirs() {
        println!("  {dir}/");
    }
    for file in skeleton.files() {
        println!("  {}", file.rel_path);
    }
    Ok(())
}

fn cmd_vars(skeletons: &SkeletonSet, name: &str, json: bool) -> Result<()> {
    let skeleton = skeletons.find(name, &Config::default())?;
    let placeholders = skeleton.placeholders();
    if json {
        println!("{}", serde_json::to_string_pretty(&placeholders)?);
        return Ok(());
    }
    if placeholders.is_empty() {
        println!("Skeleton {name} uses no placeholders");
        return Ok(());
    }
    println!("Placeholders used by {name}:");
    for key in &placeholders {
        println!("  ${{{key}}}");
    }
    Ok(())
}
