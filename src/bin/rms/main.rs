use anyhow::Result;
use env_logger::{Builder, Env};

mod cli;
mod util;
mod cmd_customer;
mod cmd_menu;
mod cmd_order;
mod cmd_status;
mod cmd_check;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — warn.
    // Пример: RUST_LOG=debug rms order list
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    let cfg = util::config(cli.data);
    match cli.cmd {
        cli::Cmd::Customer { op } => cmd_customer::exec(&cfg, op),
        cli::Cmd::Menu { op } => cmd_menu::exec(&cfg, op),
        cli::Cmd::Order { op } => cmd_order::exec(&cfg, op),

        // Status supports --json flag
        cli::Cmd::Status { json } => cmd_status::exec(&cfg, json),

        cli::Cmd::Check => cmd_check::exec(&cfg),
    }
}
