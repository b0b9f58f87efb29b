use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::MergeSettings;
use crate::core::merge::LabelCollision;
use crate::error::MergeResult;

/// Command line interface of the dataset merger.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "combine-datasets",
    author,
    version,
    about = "Merge YOLO datasets into one single-class dataset"
)]
pub struct Cli {
    /// Also write a timestamped log file into this directory.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Merge every dataset under the input root (default).
    Merge(MergeArgs),
    /// Write train.yaml and export.yaml for the external trainer.
    TrainerConfig(TrainerConfigArgs),
    /// Print the descriptor and file counts of a merged dataset.
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct MergeArgs {
    /// JSON settings file; flags below override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Folder whose subdirectories are the source datasets.
    #[arg(long)]
    pub input_root: Option<PathBuf>,
    /// Folder the merged dataset is written to.
    #[arg(long)]
    pub output_root: Option<PathBuf>,
    /// Name of the single class in data.yaml.
    #[arg(long)]
    pub class_name: Option<String>,
    /// How clashing label file names are handled.
    #[arg(long, value_enum)]
    pub label_collision: Option<LabelCollision>,
    /// Log the plan without writing anything.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
    /// Write the resulting settings to this JSON file for later runs.
    #[arg(long)]
    pub save_config: Option<PathBuf>,
}

impl MergeArgs {
    /// Settings for this run: the `--config` file (or the default settings
    /// file), then the flags on top. Saved to `--save-config` when given.
    pub fn resolve_settings(&self) -> MergeResult<MergeSettings> {
        let settings = match &self.config {
            Some(path) => MergeSettings::load_from(path)?,
            None => MergeSettings::load(),
        };
        let settings = self.apply(settings);

        if let Some(path) = &self.save_config {
            settings.save(path)?;
        }
        Ok(settings)
    }

    /// Apply flags given on the command line on top of `settings`.
    pub fn apply(&self, mut settings: MergeSettings) -> MergeSettings {
        if let Some(input_root) = &self.input_root {
            settings.input_root = input_root.clone();
        }
        if let Some(output_root) = &self.output_root {
            settings.output_root = output_root.clone();
        }
        if let Some(class_name) = &self.class_name {
            settings.class_name = class_name.clone();
        }
        if let Some(policy) = self.label_collision {
            settings.label_collision = policy;
        }
        if self.dry_run {
            settings.dry_run = true;
        }
        settings
    }
}

#[derive(Args, Debug, Clone)]
pub struct TrainerConfigArgs {
    /// Directory the option files are written to.
    #[arg(long, default_value = "combine_datasets/dataset")]
    pub out_dir: PathBuf,
    /// Dataset descriptor the trainer should read.
    #[arg(long, default_value = "dataset/data.yaml")]
    pub data: String,
    /// Device selector: GPU index or `cpu`.
    #[arg(long, default_value = "0")]
    pub device: String,
    /// Number of training epochs.
    #[arg(long, default_value_t = 200)]
    pub epochs: u32,
    /// Share of the dataset used for INT8 calibration on export.
    #[arg(long, default_value_t = 0.2)]
    pub fraction: f32,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Root of a merged dataset.
    #[arg(long, default_value = "combine_datasets/dataset")]
    pub root: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_merge() {
        let cli = Cli::try_parse_from(["combine-datasets"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_merge_flags_override_settings() {
        let cli = Cli::try_parse_from([
            "combine-datasets",
            "merge",
            "--input-root",
            "in",
            "--label-collision",
            "overwrite",
            "--dry-run",
        ])
        .unwrap();

        let Some(Command::Merge(args)) = cli.command else {
            panic!("expected merge subcommand");
        };
        let settings = args.apply(MergeSettings::default());
        assert_eq!(settings.input_root, PathBuf::from("in"));
        assert_eq!(settings.output_root, PathBuf::from("combine_datasets/dataset"));
        assert_eq!(settings.label_collision, LabelCollision::Overwrite);
        assert!(settings.dry_run);
    }

    #[test]
    fn test_global_log_dir() {
        let cli = Cli::try_parse_from(["combine-datasets", "inspect", "--log-dir", "logs"]).unwrap();
        assert_eq!(cli.log_dir, Some(PathBuf::from("logs")));
        assert!(matches!(cli.command, Some(Command::Inspect(_))));
    }

    #[test]
    fn test_save_config_round_trip() {
        let temp = tempfile::tempdir().unwrap();
        let base = temp.path().join("base.json");
        let saved = temp.path().join("saved").join("settings.json");
        MergeSettings {
            input_root: PathBuf::from("from_file"),
            ..Default::default()
        }
        .save(&base)
        .unwrap();

        let base_arg = base.to_string_lossy().into_owned();
        let saved_arg = saved.to_string_lossy().into_owned();
        let cli = Cli::try_parse_from([
            "combine-datasets",
            "merge",
            "--config",
            base_arg.as_str(),
            "--output-root",
            "merged",
            "--save-config",
            saved_arg.as_str(),
        ])
        .unwrap();
        let Some(Command::Merge(args)) = cli.command else {
            panic!("expected merge subcommand");
        };

        let settings = args.resolve_settings().unwrap();
        assert_eq!(settings.input_root, PathBuf::from("from_file"));
        assert_eq!(settings.output_root, PathBuf::from("merged"));

        let reloaded = MergeSettings::load_from(&saved).unwrap();
        assert_eq!(reloaded.input_root, PathBuf::from("from_file"));
        assert_eq!(reloaded.output_root, PathBuf::from("merged"));
    }
}
