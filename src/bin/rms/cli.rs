use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TrioBites restaurant records: customers, menu, orders.
#[derive(Parser, Debug)]
#[command(name = "rms", version, about = "Restaurant customers, menu and orders", arg_required_else_help = true)]
pub struct Cli {
    /// Snapshot file (overrides RMS_DATA_FILE, default ./rms_data.snap)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Customers: add/update/delete/list/show
    Customer {
        #[command(subcommand)]
        op: CustomerCmd,
    },
    /// Menu items: add/update/delete/list/show
    Menu {
        #[command(subcommand)]
        op: MenuCmd,
    },
    /// Orders: add/update/delete/list/show
    ///
    /// Lines are given as --item <menu_id>[:qty], repeatable:
    ///   rms order add --customer 1 --item 1:2 --item 3
    Order {
        #[command(subcommand)]
        op: OrderCmd,
    },
    /// Print snapshot file/header summary and record counts
    Status {
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Strict load of the snapshot file; exits non-zero if it is unreadable
    Check,
}

#[derive(Subcommand, Debug)]
pub enum CustomerCmd {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    /// Replace name and phone
    Update {
        #[arg(long)]
        id: u32,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    Delete {
        #[arg(long)]
        id: u32,
    },
    List {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    Show {
        #[arg(long)]
        id: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum MenuCmd {
    Add {
        #[arg(long)]
        name: String,
        /// Price as typed; must be a number
        #[arg(long, allow_hyphen_values = true)]
        price: String,
    },
    /// Replace name and price (existing orders keep their copies)
    Update {
        #[arg(long)]
        id: u32,
        #[arg(long)]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        price: String,
    },
    Delete {
        #[arg(long)]
        id: u32,
    },
    List {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    Show {
        #[arg(long)]
        id: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum OrderCmd {
    Add {
        /// Customer id
        #[arg(long)]
        customer: u32,
        /// <menu_id>[:qty], repeatable
        #[arg(long = "item")]
        items: Vec<String>,
    },
    /// Edit an order: drop lines, append lines, change customer
    ///
    /// Примеры:
    ///   rms order update --id 3 --remove-line 2 --item 4:1
    ///   rms order update --id 3 --replace --item 1:3
    Update {
        #[arg(long)]
        id: u32,
        /// New customer id (default: keep)
        #[arg(long)]
        customer: Option<u32>,
        /// 1-based line number to remove, repeatable
        #[arg(long = "remove-line")]
        remove_lines: Vec<usize>,
        /// Start from an empty line list instead of the current lines
        #[arg(long, default_value_t = false)]
        replace: bool,
        /// <menu_id>[:qty], repeatable
        #[arg(long = "item")]
        items: Vec<String>,
    },
    Delete {
        #[arg(long)]
        id: u32,
    },
    List {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    Show {
        #[arg(long)]
        id: u32,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Cli as Parser>::parse()
    }
}
