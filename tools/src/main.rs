//! risk-runner: headless host for the churn risk gauge.
//!
//! Usage:
//!   risk-runner --days 30 --spending 120 --frequency 3
//!   risk-runner --days-since-visit 30 --visit-frequency 5
//!   risk-runner --config gauge.json --no-pie --verbose
//!   risk-runner --ipc-mode < commands.jsonl

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use churn_risk_core::{
    command::{CommandOutcome, WidgetCommand},
    config::GaugeConfig,
    metrics::InputField,
    snapshot::WidgetSnapshot,
    widget::RiskWidget,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Serialize)]
struct UiState {
    rendered_at: DateTime<Utc>,
    #[serde(flatten)]
    snapshot: WidgetSnapshot,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = has_flag(&args, "--ipc-mode");
    let verbose = has_flag(&args, "--verbose");

    let mut config = match arg_value(&args, "--config")? {
        Some(path) => GaugeConfig::load(path)?,
        None => GaugeConfig::default(),
    };
    if has_flag(&args, "--no-pie") {
        config = config.without_chart();
    }

    let mut widget = RiskWidget::from_config(&config);
    log::info!("risk-runner: widget ready (pie_chart={})", widget.has_chart());

    if ipc_mode {
        let stdin = io::stdin();
        let stdout = io::stdout();
        run_ipc_loop(&mut widget, stdin.lock(), stdout.lock())?;
    } else {
        for (field, value) in field_args(&args)? {
            widget.on_change(field, value);
        }
        print_summary(&widget, verbose);
    }

    Ok(())
}

/// One JSON command per input line, one JSON reply per command.
/// Blank lines are skipped; `quit` ends the loop without a reply.
fn run_ipc_loop<R: BufRead, W: Write>(widget: &mut RiskWidget, mut input: R, mut out: W) -> Result<()> {
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = input.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: WidgetCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("risk-runner: rejected command: {e}");
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(out, "{}", err_json)?;
                out.flush()?;
                continue;
            }
        };

        if cmd.apply(widget) == CommandOutcome::Quit {
            break;
        }

        let state = UiState {
            rendered_at: Utc::now(),
            snapshot: widget.snapshot(),
        };
        writeln!(out, "{}", serde_json::to_string(&state)?)?;
        out.flush()?;
    }
    Ok(())
}

fn print_summary(widget: &RiskWidget, verbose: bool) {
    let snapshot = widget.snapshot();

    println!("=== CHURN RISK ===");
    for field in InputField::ALL {
        println!(
            "  {:<18} {:>10}  → {}",
            format!("{field}:"),
            format!("{:?}", snapshot.inputs.get(field)),
            snapshot.metrics.get(field),
        );
    }
    println!();

    if let Some(readout) = &snapshot.readout {
        println!("  probability:       {}", readout.probability_text);
        println!("  status:            {} [{} / text {}]", readout.label, readout.color, readout.text_color);
    }

    if verbose {
        let b = &snapshot.breakdown;
        println!();
        println!("=== BREAKDOWN ===");
        println!("  base:              {:+.2}", b.base);
        println!("  days factor:       {:+.2}", b.days_factor);
        println!("  frequency factor:  {:+.2}", b.frequency_factor);
        println!("  spending factor:   {:+.2}", b.spending_factor);
        println!("  raw:               {:.2}", b.raw);
    }

    println!();
    println!("=== PIE CHART ===");
    match &snapshot.pie {
        Some(pie) => {
            for slice in &pie.slices {
                println!("  {:<18} {:>4}  {}", slice.label, slice.percent_text, slice.color);
            }
        }
        None => println!("  (no chart attached)"),
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Value following `flag`. A flag given as the last argument is an error.
fn arg_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|a| a == flag) {
        None => Ok(None),
        Some(i) => match args.get(i + 1) {
            Some(value) => Ok(Some(value.as_str())),
            None => bail!("{flag} requires a value"),
        },
    }
}

/// `--<field> <text>` pairs, in command-line order. Field names accept
/// the input control ids as well (`--days-since-visit`).
fn field_args(args: &[String]) -> Result<Vec<(InputField, &str)>> {
    let mut changes = Vec::new();
    for (i, arg) in args.iter().enumerate().skip(1) {
        let Some(name) = arg.strip_prefix("--") else { continue };
        let Ok(field) = name.parse::<InputField>() else { continue };
        match args.get(i + 1) {
            Some(value) => changes.push((field, value.as_str())),
            None => bail!("{arg} requires a value"),
        }
    }
    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Helpers ──────────────────────────────────────────────────────────────

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("risk-runner")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    fn run_script(lines: &[&str]) -> Vec<serde_json::Value> {
        let mut widget = RiskWidget::from_config(&GaugeConfig::default());
        let script = lines.join("\n") + "\n";
        let mut out = Vec::new();

        run_ipc_loop(&mut widget, script.as_bytes(), &mut out).expect("ipc loop");

        String::from_utf8(out)
            .expect("utf-8 output")
            .lines()
            .map(|l| serde_json::from_str(l).expect("each reply is one JSON line"))
            .collect()
    }

    // ── Tests ────────────────────────────────────────────────────────────────

    /// One reply per command, errors for malformed lines, nothing for blank
    /// lines, and nothing read after quit.
    #[test]
    fn ipc_replies_once_per_command_until_quit() {
        let replies = run_script(&[
            r#"{"type":"input","field":"days","value":"30"}"#,
            "not json",
            "",
            r#"{"type":"set","frequency":"3"}"#,
            r#"{"type":"input","field":"colour","value":"1"}"#,
            r#"{"type":"reset"}"#,
            r#"{"type":"quit"}"#,
            r#"{"type":"get_state"}"#,
        ]);

        assert_eq!(replies.len(), 5, "replies: {replies:?}");

        let is_error: Vec<bool> = replies.iter().map(|r| r.get("error").is_some()).collect();
        assert_eq!(is_error, vec![false, true, false, true, false]);

        assert_eq!(replies[0]["readout"]["probability_text"], "76%");
        assert_eq!(replies[2]["readout"]["probability_text"], "66%");
        assert_eq!(replies[4]["readout"]["probability_text"], "36%");
        assert_eq!(replies[4]["inputs"]["days"], "0");
        assert!(replies[4]["rendered_at"].is_string());
    }

    #[test]
    fn ipc_get_state_does_not_change_inputs() {
        let replies = run_script(&[
            r#"{"type":"input","field":"spending","value":200}"#,
            r#"{"type":"get_state"}"#,
        ]);

        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["inputs"], replies[1]["inputs"]);
        assert_eq!(replies[1]["inputs"]["spending"], "200");
    }

    #[test]
    fn ipc_ends_cleanly_at_eof() {
        assert!(run_script(&[]).is_empty());
    }

    #[test]
    fn trailing_flag_without_value_is_an_error() {
        let err = arg_value(&args(&["--config"]), "--config").unwrap_err();
        assert!(err.to_string().contains("--config requires a value"));

        assert!(field_args(&args(&["--days"])).is_err());
    }

    #[test]
    fn field_flags_accept_names_and_control_ids() {
        let a = args(&["--days-since-visit", "30", "--no-pie", "--frequency", "-3", "--config", "x.json"]);
        let changes = field_args(&a).unwrap();

        assert_eq!(changes, vec![(InputField::Days, "30"), (InputField::Frequency, "-3")]);
        assert_eq!(arg_value(&a, "--config").unwrap(), Some("x.json"));
        assert_eq!(arg_value(&a, "--verbose").unwrap(), None);
    }
}
