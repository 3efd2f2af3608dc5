use crate::app::present::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "simple-presenter")]
#[command(about = "Present JSON subjects through a declared presenter")]
pub struct CliConfig {
    #[arg(long, help = "TOML file declaring the presenters")]
    pub config: PathBuf,

    #[arg(long, help = "Name of the presenter to apply")]
    pub presenter: String,

    #[arg(
        long,
        num_args = 1..,
        help = "JSON file per subject role, in declaration order; `-` binds nothing"
    )]
    pub subjects: Vec<String>,

    #[arg(long, help = "Treat the first subject file as an array and present every item")]
    pub collection: bool,

    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}
