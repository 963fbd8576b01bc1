use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sarthi", version, about = "AMC Sarthi municipal information chat", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path (default: $SARTHI_CONFIG, then ~/.sarthi/sarthi.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the chat page and the /api/chat proxy (default)
    Serve,

    /// Chat from the terminal
    Chat {
        /// Send queries straight to the upstream backend instead of the local proxy
        #[arg(long)]
        direct: bool,
    },
}
