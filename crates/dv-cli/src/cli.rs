use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "deltaview",
    about = "Deltaview — versioned key-value sync server",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the sync server
    Serve(ServeArgs),
    /// Validate a configuration file and list its accounts
    CheckConfig(CheckConfigArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Listen address, overrides the configuration file
    #[arg(long)]
    pub bind: Option<String>,

    /// Enable the test-only /inject endpoint
    #[arg(long)]
    pub enable_inject: bool,
}

#[derive(Args)]
pub struct CheckConfigArgs {
    /// Path to a TOML configuration file
    pub config: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["deltaview", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve(_)));
    }

    #[test]
    fn parse_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "deltaview",
            "serve",
            "--config",
            "dv.toml",
            "--bind",
            "0.0.0.0:7001",
            "--enable-inject",
        ])
        .unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.config, Some("dv.toml".into()));
            assert_eq!(args.bind, Some("0.0.0.0:7001".into()));
            assert!(args.enable_inject);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_check_config() {
        let cli = Cli::try_parse_from(["deltaview", "check-config", "dv.toml"]).unwrap();
        if let Command::CheckConfig(args) = cli.command {
            assert_eq!(args.config, "dv.toml");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["deltaview", "--verbose", "serve"]).unwrap();
        assert!(cli.verbose);
    }
}
