//! Command line interface.

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::error::Error;
use std::io::IsTerminal;
use std::path::PathBuf;
use subnet_divider::config::Settings;
use subnet_divider::import::import_file;
use subnet_divider::models::ColumnVisibility;
use subnet_divider::{open_session, render_export, write_export, ExportFormat, SubnetSession};

#[derive(Parser, Debug)]
#[command(name = "subnet-divider")]
#[command(about = "Divide an IPv4 network into subnets and share the result", long_about = None)]
pub struct Cli {
    /// Base network address (default from SUBNET_DIVIDER_NETWORK or 192.168.0.0)
    #[arg(short, long, global = true)]
    pub network: Option<String>,

    /// Base mask bits, 0-32 (default from SUBNET_DIVIDER_MASK or 16)
    #[arg(short, long, global = true)]
    pub mask: Option<String>,

    /// Encoded division, as found in a share link
    #[arg(short, long, global = true)]
    pub division: Option<String>,

    /// Columns to show: netmask,range,usable,hosts
    #[arg(short, long, global = true)]
    pub columns: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current subnets
    Show,
    /// Divide a subnet into two halves
    Divide {
        /// Subnet to divide, e.g. 192.168.0.0/17
        subnet: String,
    },
    /// Join a subnet with its sibling
    Join {
        /// Subnet whose parent is joined, e.g. 192.168.128.0/17
        subnet: String,
    },
    /// Remove all divisions
    Reset,
    /// Export the division as JSON or CSV
    Export {
        #[arg(short, long, value_enum, default_value_t = FormatArg::Json)]
        format: FormatArg,
        /// Output file, `-` for stdout (default subnetting-<network>-<mask>.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a division from an exported JSON or CSV file
    Import {
        file: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

/// Run one command and print the resulting division.
pub fn run(cli: Cli, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let mut session = open_session(
        settings,
        cli.network.as_deref(),
        cli.mask.as_deref(),
        cli.division.as_deref(),
    )?;
    if let Some(columns) = cli.columns.as_deref() {
        session.set_visible(ColumnVisibility::from_list(columns)?);
    }

    match cli.command {
        Commands::Show => {}
        Commands::Divide { subnet } => session.divide_subnet(&subnet)?,
        Commands::Join { subnet } => {
            let joined = session.join_subnet(&subnet)?;
            log::debug!("joined node {joined}");
        }
        Commands::Reset => session.reset(),
        Commands::Export { format, output } => {
            let format = ExportFormat::from(format);
            match output {
                Some(path) if path.as_os_str() == "-" => {
                    println!("{}", render_export(&session, format)?);
                }
                output => {
                    let path = write_export(&session, format, output.as_deref())?;
                    eprintln!("{} {}", "Exported".green(), path.display());
                }
            }
            return Ok(());
        }
        Commands::Import { file } => {
            session.apply_import(import_file(&file)?);
            eprintln!("{}", "Imported configuration applied".green());
        }
    }

    print_session(&session)
}

fn print_session(session: &SubnetSession) -> Result<(), Box<dyn Error>> {
    let color = std::io::stdout().is_terminal();
    println!("{}", session.render_table(color)?);
    let query = session.share_query().to_string();
    if color {
        println!("\n{} ?{}", "Share:".on_blue(), query);
    } else {
        println!("\n?{query}");
    }
    Ok(())
}
