mod commands;

use clap::{Parser, Subcommand};

use multy_core::config::Modifier;

#[derive(Parser)]
#[command(
    name = "multy",
    version,
    about = "Keeps multi-account game windows in front and in sync"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Start the background daemon
    Start,
    /// Stop the background daemon
    Stop,
    /// Show whether the daemon is running and what it is doing
    Status,
    /// List windows that have a title
    Windows,
    /// Bring the first window whose title contains KEYWORD to the front
    Focus { keyword: String },
    /// Force a window to the front whenever it asks for attention
    Monitor {
        #[command(subcommand)]
        command: MonitorCommands,
    },
    /// Replay middle-clicks as left-clicks in every matching window
    Click {
        #[command(subcommand)]
        command: ToggleCommands,
    },
    /// Global hotkeys that focus a window
    Hotkey {
        #[command(subcommand)]
        command: HotkeyCommands,
    },
    /// Run the monitor in this console until Ctrl+C
    Watch {
        /// Title keyword (defaults to `[monitor] keyword` from config)
        keyword: Option<String>,
    },
    /// Run the daemon (internal, not for direct use)
    #[command(hide = true)]
    Daemon,
}

#[derive(Subcommand)]
enum MonitorCommands {
    /// Start monitoring the first window whose title contains KEYWORD
    Start {
        /// Title keyword (defaults to `[monitor] keyword` from config)
        keyword: Option<String>,
    },
    /// Stop monitoring
    Stop,
}

#[derive(Subcommand)]
enum ToggleCommands {
    /// Start
    Start,
    /// Stop
    Stop,
}

#[derive(Subcommand)]
enum HotkeyCommands {
    /// Bind KEY to focusing the first window whose title contains WINDOW
    Register {
        /// Key name, e.g. F1, A, Numpad0
        key: String,
        /// Title keyword of the window to focus
        window: String,
        /// Modifier key (alt, shift, ctrl, win); repeatable
        #[arg(short, long = "modifier", value_parser = parse_modifier)]
        modifiers: Vec<Modifier>,
    },
    /// Remove every registered hotkey
    Unregister,
}

fn parse_modifier(value: &str) -> Result<Modifier, String> {
    value.parse()
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        command => run(command),
    }
}

#[cfg(windows)]
fn run(command: Commands) {
    use multy_core::Command;
    use multy_core::config::HotkeyBinding;

    match command {
        Commands::Init => commands::init::execute(),
        Commands::Start => commands::start::execute(),
        Commands::Stop => commands::stop::execute(),
        Commands::Status => commands::status::execute(),
        Commands::Daemon => commands::daemon::execute(),
        Commands::Windows => commands::windows::execute(),
        Commands::Focus { keyword } => commands::send::execute(&Command::Focus { keyword }),
        Commands::Monitor { command } => match command {
            MonitorCommands::Start { keyword } => commands::monitor::start(keyword),
            MonitorCommands::Stop => commands::send::execute(&Command::StopMonitoring),
        },
        Commands::Click { command } => match command {
            ToggleCommands::Start => commands::send::execute(&Command::StartClickForwarding),
            ToggleCommands::Stop => commands::send::execute(&Command::StopClickForwarding),
        },
        Commands::Hotkey { command } => match command {
            HotkeyCommands::Register {
                key,
                window,
                modifiers,
            } => commands::send::execute(&Command::RegisterHotkey {
                binding: HotkeyBinding::new(key, modifiers, window),
            }),
            HotkeyCommands::Unregister => commands::send::execute(&Command::UnregisterHotkeys),
        },
        Commands::Watch { keyword } => commands::watch::execute(keyword),
    }
}

#[cfg(not(windows))]
fn run(_command: Commands) {
    eprintln!("Error: this command needs Windows; only 'init' is available here.");
    std::process::exit(1);
}
