//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tgrelay")]
#[command(about = "Telegram bridge leg: relay a Telegram chat to stdout and stdin to the chat", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bridge (config from env; flags override BOT_TOKEN and TELEGRAM_CHAT_ID).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        chat_id: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_overrides() {
        let cli = Cli::try_parse_from(["tgrelay", "run", "--token", "abc", "--chat-id", "-100123"])
            .unwrap();
        match cli.command {
            Commands::Run { token, chat_id } => {
                assert_eq!(token.as_deref(), Some("abc"));
                assert_eq!(chat_id.as_deref(), Some("-100123"));
            }
        }
    }

    #[test]
    fn test_parse_run_without_overrides() {
        let cli = Cli::try_parse_from(["tgrelay", "run"]).unwrap();
        let Commands::Run { token, chat_id } = cli.command;
        assert!(token.is_none());
        assert!(chat_id.is_none());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["tgrelay"]).is_err());
    }
}
