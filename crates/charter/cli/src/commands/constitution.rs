//! Constitution and invariant registry listing

use charter_types::{Constitution, InvariantDefinition, CONSTITUTION, INVARIANT_REGISTRY};
use colored::*;
use serde::Serialize;
use tabled::Tabled;

use super::{Context, ExitCode, EXIT_OK};
use crate::error::CliResult;
use crate::output::{print_single, print_table, OutputFormat};

#[derive(Serialize)]
struct Charter {
    constitution: &'static Constitution,
    invariants: &'static [InvariantDefinition],
}

#[derive(Tabled)]
struct InvariantRow {
    #[tabled(rename = "ID")]
    id: &'static str,
    #[tabled(rename = "Title")]
    title: &'static str,
    #[tabled(rename = "Never optimize for")]
    never_optimize_for: String,
    #[tabled(rename = "Safe failure")]
    safe_failure: &'static str,
}

pub fn execute(ctx: &Context) -> CliResult<ExitCode> {
    if ctx.format != OutputFormat::Table {
        let charter = Charter {
            constitution: &CONSTITUTION,
            invariants: INVARIANT_REGISTRY,
        };
        print_single(&charter, ctx.format)?;
        return Ok(EXIT_OK);
    }

    println!("{}", "Purpose".bold());
    println!("  {}", CONSTITUTION.purpose);
    println!("\n{}", "Non-goals".bold());
    for goal in CONSTITUTION.non_goals {
        println!("  - {}", goal);
    }
    println!("\n{}", "Invariants".bold());
    let rows = INVARIANT_REGISTRY
        .iter()
        .map(|inv| InvariantRow {
            id: inv.id,
            title: inv.title,
            never_optimize_for: inv.never_optimize_for.join(", "),
            safe_failure: inv.safe_failure,
        })
        .collect();
    print_table::<InvariantRow>(rows);
    Ok(EXIT_OK)
}
