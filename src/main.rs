use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use combine_datasets::cli::{Cli, Command, InspectArgs, MergeArgs, TrainerConfigArgs};
use combine_datasets::logging::setup_logging;
use combine_datasets::orchestrator::{inspect, run};
use combine_datasets::trainer::{ExportOptions, TrainOptions, EXPORT_OPTIONS_FILE, TRAIN_OPTIONS_FILE};

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_dir.as_deref()).context("failed to set up logging")?;

    match cli.command.unwrap_or_else(|| Command::Merge(MergeArgs::default())) {
        Command::Merge(args) => merge(&args),
        Command::TrainerConfig(args) => trainer_config(&args),
        Command::Inspect(args) => inspect_dataset(&args),
    }
}

fn merge(args: &MergeArgs) -> Result<()> {
    let settings = args
        .resolve_settings()
        .context("failed to resolve merge settings")?;

    info!(
        "Merging datasets from {:?} into {:?}",
        settings.input_root, settings.output_root
    );
    let report = run(&settings).context("dataset merge failed")?;
    if report.is_empty() {
        warn!("No images or labels were merged");
    }
    info!(
        "Done: {} dataset(s), {} image(s), {} label file(s)",
        report.datasets, report.images_copied, report.labels_written
    );
    Ok(())
}

fn trainer_config(args: &TrainerConfigArgs) -> Result<()> {
    let train = TrainOptions {
        data: args.data.clone(),
        device: args.device.clone(),
        epochs: args.epochs,
        ..Default::default()
    };
    let export = ExportOptions {
        data: args.data.clone(),
        device: args.device.clone(),
        fraction: args.fraction,
        ..Default::default()
    };

    train
        .write_yaml(&args.out_dir.join(TRAIN_OPTIONS_FILE))
        .context("failed to write training options")?;
    export
        .write_yaml(&args.out_dir.join(EXPORT_OPTIONS_FILE))
        .context("failed to write export options")?;
    Ok(())
}

fn inspect_dataset(args: &InspectArgs) -> Result<()> {
    let (descriptor, summaries) = inspect(&args.root)
        .with_context(|| format!("failed to inspect {}", args.root.display()))?;

    info!(
        "nc: {}, names: {:?}, path: {}",
        descriptor.nc, descriptor.names, descriptor.path
    );
    for summary in summaries {
        info!(
            "{}: {} image(s), {} label file(s)",
            summary.split, summary.images, summary.labels
        );
    }
    Ok(())
}
