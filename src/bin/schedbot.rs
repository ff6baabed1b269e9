use anyhow::{Context, Result};
use schedbot::cli::{self, Command};
use schedbot::config::Config;
use schedbot::context::{AppContext, StandardContext};
use schedbot::controller::ScheduleController;
use schedbot::export::to_csv_string;
use schedbot::model::Clock;
use schedbot::storage::LocalStorage;
use schedbot::system::spawn_reminder_actor;
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::Duration;

fn init_logging(ctx: &dyn AppContext, config: &Config) -> Result<()> {
    let path = ctx.get_log_file_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;
    simplelog::WriteLogger::init(config.level_filter(), simplelog::Config::default(), file)?;
    Ok(())
}

fn prompt() {
    print!("You: ");
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() -> Result<()> {
    let binary_name = env::args().next().unwrap_or_else(|| "schedbot".to_string());
    let args = match cli::parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            cli::print_help(&binary_name);
            std::process::exit(2);
        }
    };

    if args.command == Command::Help {
        cli::print_help(&binary_name);
        return Ok(());
    }

    let ctx: Arc<dyn AppContext> = Arc::new(StandardContext::new(args.root));
    let config = Config::load_or_default(ctx.as_ref())?;
    if !ctx.get_config_file_path()?.exists()
        && let Err(e) = config.save(ctx.as_ref())
    {
        eprintln!("Could not write default config: {:#}", e);
    }

    match args.command {
        Command::Export => {
            let data = LocalStorage::load(ctx.as_ref())?;
            print!("{}", to_csv_string(&data.schedules));
            return Ok(());
        }
        Command::Health => {
            let controller = ScheduleController::new(ctx, config);
            println!("{}", serde_json::to_string_pretty(&controller.health())?);
            return Ok(());
        }
        Command::Repl | Command::Help => {}
    }

    if let Err(e) = init_logging(ctx.as_ref(), &config) {
        eprintln!("Logging disabled: {:#}", e);
    }
    log::info!("Starting schedbot v{}", env!("CARGO_PKG_VERSION"));
    if let Ok(path) = Config::get_path_string(ctx.as_ref()) {
        log::info!("Config file: {}", path);
    }

    let (ui_tx, mut ui_rx) = mpsc::channel(16);
    let refresh = spawn_reminder_actor(
        ctx.clone(),
        Duration::from_secs(u64::from(config.reminder_check_interval_mins.max(1)) * 60),
        config.notifications,
        Clock::System,
        Some(ui_tx),
    );

    let controller = ScheduleController::new(ctx, config);

    println!("🤖 Schedbot siap. Ketik \"bantuan\" untuk daftar perintah, \"exit\" untuk keluar.");
    prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim();
                if input.eq_ignore_ascii_case("exit") {
                    break;
                }
                if !input.is_empty() {
                    println!("Bot: {}", controller.handle(input));
                    // The list may have changed; let the actor look again.
                    let _ = refresh.try_send(());
                }
                prompt();
            }
            Some(msg) = ui_rx.recv() => {
                println!();
                println!("Bot: {}", msg.describe());
                prompt();
            }
        }
    }

    log::info!("Session ended");
    Ok(())
}
