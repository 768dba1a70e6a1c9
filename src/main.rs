use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use loblolly_yield::{
    config::Config,
    fia::{self, FiaClient, DEFAULT_STATE_CODE},
    models::{baldwin_merch_ratio, baldwin_section_ratio, StemModel},
    visualization::{print_estimate_table, print_measurement},
};

#[derive(Parser)]
#[command(
    name = "loblolly-yield",
    about = "Loblolly pine green-ton yield models and FIA EVALIDator queries",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate green tons for a single stem
    Estimate {
        /// Diameter at breast height, outside bark (inches)
        #[arg(long)]
        dbh: f64,

        /// Total tree height (feet)
        #[arg(long)]
        height: f64,

        /// Merchantable top diameter, outside bark (inches)
        #[arg(long)]
        top: Option<f64>,

        /// Stand age in years (Baldwin model)
        #[arg(long)]
        age: Option<u32>,

        /// Use the thinned merchantable ratio curve (Baldwin model)
        #[arg(long, conflicts_with = "unthinned")]
        thinned: bool,

        /// Use the unthinned merchantable ratio curve (Baldwin model)
        #[arg(long)]
        unthinned: bool,

        /// Model: lcp, ucp, baldwin, or all
        #[arg(short, long, default_value = "all")]
        model: String,
    },

    /// Baldwin merchantable ratio below a top diameter
    Ratio {
        /// Diameter at breast height, outside bark (inches)
        #[arg(long)]
        dbh: f64,

        /// Merchantable top diameter, outside bark (inches)
        #[arg(long)]
        top: Option<f64>,

        /// Use the thinned curve
        #[arg(long, conflicts_with = "unthinned")]
        thinned: bool,

        /// Use the unthinned curve
        #[arg(long)]
        unthinned: bool,
    },

    /// Baldwin proportion of the stem between two top diameters
    Section {
        /// Diameter at breast height, outside bark (inches)
        #[arg(long)]
        dbh: f64,

        /// Larger top diameter, e.g. a sawtimber top (inches)
        #[arg(long)]
        lower_top: f64,

        /// Smaller top diameter, e.g. a pulpwood top (inches)
        #[arg(long)]
        upper_top: f64,

        /// Use the thinned curve
        #[arg(long, conflicts_with = "unthinned")]
        thinned: bool,

        /// Use the unthinned curve
        #[arg(long)]
        unthinned: bool,
    },

    /// Query the FIA EVALIDator API
    Fia {
        #[command(subcommand)]
        query: FiaCommands,
    },
}

#[derive(Subcommand)]
enum FiaCommands {
    /// List the most recent evaluation groups for a state
    EvalGroups {
        /// FIPS state code
        #[arg(short, long, default_value_t = DEFAULT_STATE_CODE)]
        state: u32,
    },

    /// Select columns from a FIADB reference table
    RefTable {
        /// FIADB table name, e.g. COND
        #[arg(short, long)]
        table: String,

        /// Comma-separated column list
        #[arg(short, long)]
        cols: String,

        /// SQL where clause, e.g. "COUNTYCD=347 AND INVYR=2018"
        #[arg(short, long = "where")]
        where_clause: String,

        /// Print one record per line instead of the full response
        #[arg(long)]
        records: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(p) => Ok(Config::load(p)?),
        None => Ok(Config::default()),
    }
}

/// Stand flag given on the command line, if any. `None` leaves the choice to
/// the config default.
fn stand_override(thinned: bool, unthinned: bool) -> Option<bool> {
    if thinned {
        Some(true)
    } else if unthinned {
        Some(false)
    } else {
        None
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Estimate {
            dbh,
            height,
            top,
            age,
            thinned,
            unthinned,
            model,
        } => {
            let thinned = stand_override(thinned, unthinned);
            let tree = config.defaults.measurement(dbh, height, top, age, thinned);
            tree.validate()?;

            let models: Vec<StemModel> = if model.eq_ignore_ascii_case("all") {
                StemModel::ALL.to_vec()
            } else {
                vec![model.parse()?]
            };

            println!("\n{}", "Loblolly Pine Yield".bold().cyan());
            print_measurement(&tree);

            let estimates = models
                .into_iter()
                .map(|m| tree.estimate(m))
                .collect::<Result<Vec<_>, _>>()?;
            print_estimate_table(&estimates);
            println!();
        }

        Commands::Ratio {
            dbh,
            top,
            thinned,
            unthinned,
        } => {
            let top = top.unwrap_or(config.defaults.merch_top);
            let thinned = stand_override(thinned, unthinned).unwrap_or(config.defaults.thinned);
            let ratio = baldwin_merch_ratio(dbh, top, thinned)?;
            let stand = if thinned { "thinned" } else { "unthinned" };
            println!("Merchantable ratio ({stand}, {top}\" top): {ratio:.6}");
        }

        Commands::Section {
            dbh,
            lower_top,
            upper_top,
            thinned,
            unthinned,
        } => {
            let thinned = stand_override(thinned, unthinned).unwrap_or(config.defaults.thinned);
            let ratio = baldwin_section_ratio(dbh, lower_top, upper_top, thinned)?;
            println!("Section ratio ({lower_top}\" to {upper_top}\" top): {ratio:.6}");
        }

        Commands::Fia { query } => {
            let client = FiaClient::from_config(&config.fia)?;
            let (result, records_only) = match query {
                FiaCommands::EvalGroups { state } => (client.eval_group_request(state)?, false),
                FiaCommands::RefTable {
                    table,
                    cols,
                    where_clause,
                    records,
                } => (client.ref_table_request(&table, &cols, &where_clause)?, records),
            };

            let Some(value) = result else {
                eprintln!("{}: FIA returned no result", "Warning".yellow());
                anyhow::bail!("FIA request failed");
            };

            if records_only {
                for record in fia::response_records(&value) {
                    println!("{record}");
                }
            } else {
                fia::print_api_response(&value)?;
            }
        }
    }

    Ok(())
}
