use anyhow::{Context, Result};
use clap::Parser;

use runtime_locate::cli::CliArgs;
use runtime_locate::probe::{SystemRunner, probe};
use runtime_locate::{CandidateTable, ExecutableResolver, Settings, logging, settings};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("runtime-locate error: {err:#}");
        std::process::exit(1);
    }
}

async fn run_main() -> Result<()> {
    let args = CliArgs::parse();
    logging::init_logging(args.log_level);

    let table = match &args.table {
        Some(path) => CandidateTable::from_file(path)
            .with_context(|| format!("loading candidate table {}", path.display()))?,
        None => CandidateTable::builtin()?,
    };
    let runtime = table
        .runtime(&args.runtime)
        .cloned()
        .with_context(|| format!("unknown runtime `{}`", args.runtime))?;

    let (_settings_tx, settings_rx) = settings::channel(Settings {
        executable_path: args.path.clone(),
    });
    let mut resolver = ExecutableResolver::new(runtime, settings_rx);
    if let Some(platform) = args.platform {
        resolver = resolver.with_platform(platform);
    }

    let path = resolver.resolve().await?;
    println!("{}", path.display());

    if args.version_probe {
        let version = probe(&SystemRunner, &path, &resolver.runtime().version_args)
            .await
            .context("querying runtime version")?;
        println!("{version}");
    }

    Ok(())
}
