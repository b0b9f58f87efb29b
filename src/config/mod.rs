mod settings;

pub use settings::MergeSettings;
