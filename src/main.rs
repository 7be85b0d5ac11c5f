use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use topsync::{config, error, server, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the sync server (default)
    Serve(ServeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct ServeOptions {
    /// Port to listen on, overrides PORT
    #[clap(long)]
    pub port: Option<u16>,

    /// Open the login page in the default browser once the server is up
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env() {
        warning!("Cannot load .env file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve(ServeOptions::default())) {
        Command::Serve(opt) => {
            let mut config = match config::Config::from_env() {
                Ok(config) => config,
                Err(e) => error!("Cannot load configuration. Err: {}", e),
            };
            if let Some(port) = opt.port {
                config.port = port;
            }

            server::start_api_server(config, opt.open).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
