use carnavi::config;
use carnavi::gui::app::AppModel;
use carnavi::sys::runtime;
use carnavi::sys::server::SocketPath;
use clap::{Parser, Subcommand};
use navring::StateKind;
use relm4::prelude::*;
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "carnavi", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Start without the scripted demo route
    #[arg(long)]
    no_demo: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the indicator window
    Show,
    /// Hide the indicator window
    Hide,
    /// Set the route progress, between 0 and 1
    Progress { value: f64 },
    /// Switch the navigation state (search or nearby)
    State { kind: StateKind },
    /// Write the default config file if none exists and print its path
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = config::load_or_default();

    match cli.command {
        Some(Commands::Show) => send_command(&config.socket, "show"),
        Some(Commands::Hide) => send_command(&config.socket, "hide"),
        Some(Commands::Progress { value }) => {
            send_command(&config.socket, &format!("progress {}", value))
        }
        Some(Commands::State { kind }) => send_command(&config.socket, &format!("state {}", kind)),
        Some(Commands::InitConfig) => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
        None => {
            run_widget(config, !cli.no_demo);
            Ok(())
        }
    }
}

fn run_widget(config: config::Config, demo: bool) {
    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(tx, config.socket.clone());

    // clap already consumed the arguments
    let app = RelmApp::new("org.carnavi.carnavi").with_args(Vec::new());

    app.run::<AppModel>((config, demo, rx));
}

fn send_command(socket: &SocketPath, cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(socket.as_str()).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to carnavi at {}: {}. Is carnavi running?",
            socket,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
