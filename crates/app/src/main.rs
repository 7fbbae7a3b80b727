use std::path::{Path, PathBuf};

use api_types::expense::ExpenseFile;
use clap::{Parser, Subcommand};
use engine::{DebtMinimizer, Money, NetBalances, RoundingMode};

use crate::error::Result;

mod convert;
mod error;
mod settings;

#[derive(Parser, Debug)]
#[command(name = "splitledger")]
#[command(about = "Net balances and settlement plans for shared expenses")]
struct Cli {
    /// Settings file (TOML). Defaults to `settings.toml` when present.
    #[arg(long, env = "SPLITLEDGER_CONFIG")]
    config: Option<PathBuf>,

    /// Override the settled-balance tolerance (e.g. 0.01, at most two decimals).
    #[arg(long)]
    epsilon: Option<Money>,

    /// Override the rounding of settlement amounts.
    #[arg(long, value_parser = parse_rounding)]
    rounding: Option<RoundingMode>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print net balances and the transfers settling them.
    Settle { file: PathBuf },
    /// Print net balances only.
    Balances { file: PathBuf },
}

fn parse_rounding(raw: &str) -> std::result::Result<RoundingMode, String> {
    match raw {
        "half_away_from_zero" | "half-away-from-zero" => Ok(RoundingMode::HalfAwayFromZero),
        "half_even" | "half-even" => Ok(RoundingMode::HalfEven),
        other => Err(format!("unsupported rounding mode: {other}")),
    }
}

fn read_expense_file(path: &Path) -> Result<ExpenseFile> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = settings::Settings::new(cli.config.as_deref())?;
    if let Some(epsilon) = cli.epsilon {
        settings.settlement.epsilon = epsilon;
    }
    if let Some(rounding) = cli.rounding {
        settings.settlement.rounding = rounding;
    }

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "splitledger={level},engine={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let policy = settings.settlement.policy()?;
    let path = match &cli.command {
        Command::Settle { file } | Command::Balances { file } => file,
    };
    tracing::info!(path = %path.display(), "reading expenses");
    let file = read_expense_file(path)?;
    let records = convert::expense_records(&file)?;
    let net = NetBalances::aggregate_with_policy(&records, &policy);

    let output = match cli.command {
        Command::Settle { .. } => {
            let plan = DebtMinimizer::new(policy).plan(&net);
            tracing::info!(
                expenses = records.len(),
                transfers = plan.instructions.len(),
                unmatched = %plan.unmatched,
                "settlement plan ready"
            );
            serde_json::to_string_pretty(&convert::settlement_report(&net, &plan))?
        }
        Command::Balances { .. } => serde_json::to_string_pretty(&convert::balance_views(&net))?,
    };
    println!("{output}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::snake("half_even", RoundingMode::HalfEven)]
    #[case::kebab("half-away-from-zero", RoundingMode::HalfAwayFromZero)]
    fn parse_rounding_accepts_both_spellings(#[case] raw: &str, #[case] expected: RoundingMode) {
        assert_eq!(parse_rounding(raw), Ok(expected));
    }

    #[test]
    fn parse_rounding_rejects_unknown_modes() {
        assert!(parse_rounding("up").is_err());
    }

    #[test]
    fn cli_parses_overrides() {
        let cli = Cli::try_parse_from([
            "splitledger",
            "--epsilon",
            "0.05",
            "--rounding",
            "half_even",
            "settle",
            "expenses.json",
        ])
        .unwrap();
        assert_eq!(cli.epsilon, Some(Money::from_cents(5)));
        assert_eq!(cli.rounding, Some(RoundingMode::HalfEven));
        assert!(matches!(cli.command, Command::Settle { .. }));
    }

    #[rstest]
    #[case::sub_cent("0.001")]
    #[case::comma_sub_cent("0,005")]
    #[case::garbage("tiny")]
    fn cli_rejects_malformed_epsilon(#[case] raw: &str) {
        let parsed = Cli::try_parse_from(["splitledger", "--epsilon", raw, "balances", "x.json"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn cli_accepts_comma_epsilon() {
        let cli = Cli::try_parse_from(["splitledger", "--epsilon", "0,02", "balances", "x.json"])
            .unwrap();
        assert_eq!(cli.epsilon, Some(Money::from_cents(2)));
    }
}
