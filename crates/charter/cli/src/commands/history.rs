//! History ledger command

use std::path::Path;

use charter_history::{ClaimDraft, HistoryLedger, HistoryUsageDecision, HistoryUsageRequest};
use colored::*;
use serde::{Deserialize, Serialize};
use tabled::Tabled;
use tracing::info;

use super::{Context, ExitCode, EXIT_OK};
use crate::error::CliResult;
use crate::input::read_input;
use crate::output::{print_single, print_table, OutputFormat};

/// A claims file: either a bare array of drafts, or drafts plus usage
/// requests to gate against the resulting ledger.
#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryFile {
    Claims(Vec<serde_json::Value>),
    Batch {
        claims: Vec<serde_json::Value>,
        #[serde(default)]
        usage: Vec<HistoryUsageRequest>,
    },
}

impl HistoryFile {
    fn into_parts(self) -> (Vec<serde_json::Value>, Vec<HistoryUsageRequest>) {
        match self {
            HistoryFile::Batch { claims, usage } => (claims, usage),
            HistoryFile::Claims(claims) => (claims, Vec::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum AppendStatus {
    Accepted,
    Rejected,
}

/// What happened to one draft.
#[derive(Debug, Serialize)]
struct AppendOutcome {
    index: usize,
    status: AppendStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    claim_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    added_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct HistoryRun {
    outcomes: Vec<AppendOutcome>,
    usage: Vec<HistoryUsageDecision>,
    ledger: HistoryLedger,
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Claim")]
    claim: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

/// Append each draft, in order, to a fresh ledger.
fn append_all(drafts: Vec<serde_json::Value>, ledger: &mut HistoryLedger) -> Vec<AppendOutcome> {
    drafts
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let appended = serde_json::from_value::<ClaimDraft>(raw)
                .map_err(|e| format!("malformed claim: {}", e))
                .and_then(|draft| {
                    ledger
                        .append(draft)
                        .map(|claim| (claim.claim_id.clone(), claim.added_at.clone()))
                        .map_err(|e| e.to_string())
                });

            match appended {
                Ok((claim_id, added_at)) => AppendOutcome {
                    index,
                    status: AppendStatus::Accepted,
                    claim_id: Some(claim_id),
                    added_at: Some(added_at),
                    error: None,
                },
                Err(error) => AppendOutcome {
                    index,
                    status: AppendStatus::Rejected,
                    claim_id: None,
                    added_at: None,
                    error: Some(error),
                },
            }
        })
        .collect()
}

pub fn execute(path: &Path, ctx: &Context) -> CliResult<ExitCode> {
    let file: HistoryFile = read_input(path)?;
    let (drafts, requests) = file.into_parts();

    let mut ledger = HistoryLedger::new();
    let outcomes = append_all(drafts, &mut ledger);
    let usage = requests
        .iter()
        .map(|request| ledger.evaluate_usage(request))
        .collect::<Vec<_>>();

    info!(
        submitted = outcomes.len(),
        accepted = ledger.len(),
        usage_requests = usage.len(),
        "History batch processed"
    );

    let run = HistoryRun {
        outcomes,
        usage,
        ledger,
    };
    if ctx.format != OutputFormat::Table {
        print_single(&run, ctx.format)?;
        return Ok(EXIT_OK);
    }

    let rows = run
        .outcomes
        .iter()
        .map(|o| OutcomeRow {
            index: o.index,
            status: match o.status {
                AppendStatus::Accepted => "accepted".green().to_string(),
                AppendStatus::Rejected => "rejected".red().to_string(),
            },
            claim: o.claim_id.clone().unwrap_or_default(),
            detail: o
                .error
                .clone()
                .or_else(|| o.added_at.clone())
                .unwrap_or_default(),
        })
        .collect();
    print_table::<OutcomeRow>(rows);

    for (request, decision) in requests.iter().zip(&run.usage) {
        let verdict = if decision.allowed() {
            "allowed".green()
        } else {
            "denied".red()
        };
        println!("Usage ({}): {}", request.purpose.as_str(), verdict);
        for reason in decision.reasons() {
            println!("  - {}", reason);
        }
    }
    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_claim(text: &str) -> serde_json::Value {
        json!({
            "claim_text": text,
            "time_range": "1930-1939",
            "geography": "United States",
            "domain": "labor",
            "sources": [
                {"title": "Labor force survey", "publisher": "Bureau of Labor Statistics", "kind": "data"},
                {"title": "Hard Times", "publisher": "University Press", "kind": "secondary"}
            ],
            "evidence_grade": "A",
            "confidence_score": 0.9,
            "controversy_score": 0.1,
            "added_by": "system",
            "falsifiable_prompt": "Did unemployment exceed 20% in 1933?"
        })
    }

    #[test]
    fn test_append_all_records_each_outcome() {
        let mut ledger = HistoryLedger::new();
        let outcomes = append_all(
            vec![
                valid_claim("Unemployment peaked in 1933"),
                json!({"claim_text": "missing everything"}),
                valid_claim("Firms should cut hours"),
            ],
            &mut ledger,
        );

        assert_eq!(outcomes[0].status, AppendStatus::Accepted);
        assert_eq!(outcomes[0].added_at.as_deref(), Some("h1"));
        assert!(outcomes[1].error.as_deref().unwrap().starts_with("malformed claim"));
        assert_eq!(outcomes[2].status, AppendStatus::Rejected);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_history_file_shapes() {
        let bare: HistoryFile = serde_json::from_value(json!([valid_claim("x")])).unwrap();
        assert_eq!(bare.into_parts().0.len(), 1);

        let batch: HistoryFile = serde_json::from_value(json!({
            "claims": [],
            "usage": [{"intent": "brief", "purpose": "context"}]
        }))
        .unwrap();
        let (claims, usage) = batch.into_parts();
        assert!(claims.is_empty());
        assert_eq!(usage.len(), 1);
    }
}
