use colored::Colorize;

use dv_serve::{ServerConfig, SyncServer};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::CheckConfig(args) => cmd_check_config(args),
    }
}

fn load_config(path: Option<&str>) -> anyhow::Result<ServerConfig> {
    match path {
        Some(path) => Ok(ServerConfig::from_toml_file(path)?),
        None => Ok(ServerConfig::default()),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(bind) = &args.bind {
        config.bind_addr = bind.parse()?;
    }
    if args.enable_inject {
        config.enable_inject = true;
    }

    println!(
        "Deltaview sync server on {} ({} accounts{})",
        config.bind_addr.to_string().bold(),
        config.accounts.len(),
        if config.enable_inject {
            ", inject enabled".yellow().to_string()
        } else {
            String::new()
        }
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(SyncServer::new(config).serve())?;
    Ok(())
}

fn cmd_check_config(args: CheckConfigArgs) -> anyhow::Result<()> {
    let config = ServerConfig::from_toml_file(&args.config)?;
    println!("{} {}", "✓".green().bold(), args.config.bold());
    println!("  Bind: {}", config.bind_addr);
    println!("  Inject: {}", if config.enable_inject { "enabled".yellow().to_string() } else { "disabled".into() });
    println!("  Fetch timeout: {}s", config.fetch_timeout_secs);
    for account in &config.accounts {
        let url = account
            .client_view_url
            .as_deref()
            .unwrap_or("(no client view)");
        println!("  Account {} ({}) -> {}", account.id.yellow(), account.name, url.cyan());
    }
    Ok(())
}
