use clap::Parser;
use simple_presenter::app::present;
use simple_presenter::utils::{logger, validation::Validate};
use simple_presenter::{CliConfig, PresenterConfig, Result};

fn run(cli: &CliConfig) -> Result<String> {
    let config = PresenterConfig::from_file(&cli.config)?;
    config.validate()?;

    let subjects = present::load_subjects(&cli.subjects)?;
    let presenters = present::present(&config, &cli.presenter, subjects, cli.collection)?;
    present::render(&presenters, cli.format)
}

fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!("❌ Presenting failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}
