mod cli;
mod config;
mod service;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};
use config::AppConfig;
use service::Context;
use ui::Output;

fn main() {
    if let Err(e) = run() {
        Output::new().error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_with_scope(cli.scope.local, cli.scope.global)?;
    init_logging(&config.log_level);

    let ctx = Context::new(&cli.scope, &config);

    match cli.command {
        Commands::Init => service::init::initialize(&cli.scope),
        Commands::Create { name, fields } => service::create::create(&ctx, &name, &fields),
        Commands::List => service::list::list(&ctx),
        Commands::Show { name, json } => service::show::show(&ctx, &name, json),
        Commands::Add { name, values } => service::add::add(&ctx, &name, &values),
        Commands::Edit {
            name,
            record,
            values,
        } => service::edit::edit(&ctx, &name, record, &values),
        Commands::Remove {
            name,
            record,
            force,
        } => service::remove::remove(&ctx, &name, record, force),
        Commands::Drop { name, force } => service::delete::delete(&ctx, &name, force),
        Commands::Shell => service::shell::shell(&ctx),
    }
}

/// RUST_LOG 优先，其次配置文件中的 log_level
fn init_logging(level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
