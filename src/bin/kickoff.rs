use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use kickoff::{
    args::{Args, Commands, NewArgs},
    config::KickoffDirs,
    error, info,
    process,
    prompt::{Answers, InputCollector, InquirePrompter},
    provision::PythonVenv,
    secrets::EnvFileSecretStore,
    trace,
    vcs::{GhCli, GitCli, RemoteHostingClient, StepOutcome},
    warn, Registry, Scaffolder,
};

fn app(args: &Args) -> Result<()> {
    let dirs = KickoffDirs::default_paths()?;

    trace!("Config dir: {}", dirs.config_dir().display());

    match args.command {
        Commands::List { short } => {
            list_templates(&Registry::default(), short);
            Ok(())
        }
        Commands::Init { ref root } => {
            dirs.store_root(root)
                .with_context(|| format!("Failed to save {}", root.display()))?;
            info!("Projects will be created in {}", root.display());
            Ok(())
        }
        Commands::ShowConfig => {
            let settings = dirs.load_settings()?;
            println!("home:         {}", dirs.user_home().display());
            println!("config dir:   {}", dirs.config_dir().display());
            println!(
                "root:         {}",
                settings
                    .root
                    .as_ref()
                    .map_or_else(|| "<not set>".to_string(), |r| r.display().to_string())
            );
            println!(
                ".env template: {}",
                if settings.env_template.is_some() {
                    dirs.env_template_file().display().to_string()
                } else {
                    "<built-in>".to_string()
                }
            );
            Ok(())
        }
        Commands::New(ref new) => new_project(&dirs, new),
    }
}

fn list_templates(registry: &Registry, short: bool) {
    if short {
        println!("{}", registry.list_keys().join(" "));
        return;
    }

    println!("Available templates:");
    for (i, key) in registry.list_keys().iter().enumerate() {
        let launcher = registry
            .lookup(key)
            .ok()
            .and_then(|t| t.launcher_folder)
            .map(|l| format!("\t(launchers: {l})"))
            .unwrap_or_default();
        println!("  {}. {key}{launcher}", i + 1);
    }
}

fn new_project(dirs: &KickoffDirs, new: &NewArgs) -> Result<()> {
    info!("Starting project scaffolder");

    let registry = Registry::default();
    let mut collector = InputCollector::new(&registry, InquirePrompter);
    if new.yes {
        collector = collector.non_interactive();
    }

    let request = collector
        .collect(Answers {
            name: new.name.clone(),
            template: new.template.clone(),
            is_public: new.is_public(),
            use_env_setup: new.use_env_setup(),
            ask_credentials: new.credentials,
        })
        .context("Failed to collect project details")?;
    let root = collector.collect_root(dirs, new.root.clone())?;
    let env_template = dirs.load_env_template()?;

    let gh = GhCli;
    let remote: Option<&dyn RemoteHostingClient> = if new.no_git || new.no_remote {
        None
    } else if process::is_available(GhCli::PROGRAM) {
        Some(&gh)
    } else {
        warn!("`{}` not found on PATH, skipping remote repository", GhCli::PROGRAM);
        None
    };

    let python = PythonVenv::default();
    let mut scaffolder = Scaffolder::builder()
        .registry(&registry)
        .root(root)
        .env_template(env_template.as_deref())
        .secrets(&EnvFileSecretStore)
        .provisioner(&python);
    if !new.no_git {
        scaffolder = scaffolder.vcs(&GitCli);
    }
    if let Some(remote) = remote {
        scaffolder = scaffolder.remote(remote);
    }

    let report = scaffolder.build()?.run(&request)?;

    if let StepOutcome::Failed(ref reason) = report.repository.remote {
        trace!("Remote step failed: {reason}");
    }
    if let Some(launcher) = report.launcher_folder {
        trace!("Launcher folder: {launcher}");
    }

    info!("Done! Your project has been created at:");
    println!("{}", report.path.display());

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match app(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !args.no_errors() {
                error!("{e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
