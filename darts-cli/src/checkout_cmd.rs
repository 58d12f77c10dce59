//! Checkout command - suggest a finishing route for an X01 score

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};

use darts_core::{suggest_checkout, OutRule, DARTS_PER_VISIT, MAX_CHECKOUT};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutArg {
    Single,
    Double,
}

impl From<OutArg> for OutRule {
    fn from(arg: OutArg) -> Self {
        match arg {
            OutArg::Single => OutRule::Single,
            OutArg::Double => OutRule::Double,
        }
    }
}

#[derive(Args)]
pub struct CheckoutArgs {
    /// Remaining score
    pub score: u32,

    /// Darts left in the visit
    #[arg(long, default_value = "3")]
    pub darts: usize,

    /// Finishing rule
    #[arg(long, value_enum, default_value = "double")]
    pub out: OutArg,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CheckoutArgs) -> Result<()> {
    if args.darts == 0 || args.darts > DARTS_PER_VISIT {
        bail!("--darts must be between 1 and {}", DARTS_PER_VISIT);
    }

    let out_rule = OutRule::from(args.out);
    let checkout = suggest_checkout(args.score, args.darts, out_rule);
    tracing::info!(
        "Checkout for {} with {} darts ({:?} out): {:?}",
        args.score,
        args.darts,
        out_rule,
        checkout.as_ref().map(|c| c.description.as_str())
    );

    if args.json {
        #[derive(serde::Serialize)]
        struct JsonOutput<'a> {
            score: u32,
            darts: usize,
            out_rule: OutRule,
            checkout: Option<&'a str>,
        }

        let output = JsonOutput {
            score: args.score,
            darts: args.darts,
            out_rule,
            checkout: checkout.as_ref().map(|c| c.description.as_str()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match checkout {
        Some(c) => println!("{}", c.description),
        None if args.score > MAX_CHECKOUT => println!("No checkout: {} is above {}", args.score, MAX_CHECKOUT),
        None => println!("No checkout for {} in {} darts", args.score, args.darts),
    }
    Ok(())
}
