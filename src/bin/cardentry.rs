//! CLI tool for exercising the card entry validators.
//!
//! # Usage
//!
//! ```bash
//! # Detect the brand of a (partial) number
//! cardentry detect 3782
//!
//! # Check a single field value
//! cardentry check expiry 12/30 --today 2024-01
//!
//! # Type a whole form, keystroke by keystroke
//! cardentry form --number 4111111111111111 --expiry 12/30 --cvv 123 --require-cvv --require-expiry
//!
//! # Same, with the form configuration loaded from JSON
//! cardentry form --config form.json --number 4111111111111111 --output json
//! ```
//!
//! Set `RUST_LOG=card_entry=debug` to trace the dispatcher.

use card_entry::clock::{Clock, FixedClock, SystemClock, YearMonth};
use card_entry::mask::{mask_all, mask_number};
use card_entry::{
    create_validator_with_clock, CardEntryForm, FieldKind, FieldState, FormConfig, Validator,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cardentry")]
#[command(author, version, about = "Card entry form validation tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the card brand from a (partial) number
    Detect {
        /// Card number or prefix
        card_number: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Check one field value
    Check {
        /// Field name: number, expiry, cvv, postal_code, cardholder_name
        field: FieldKind,

        /// Field text as typed
        text: String,

        /// Card number, used to size the CVV check
        #[arg(long)]
        card_number: Option<String>,

        /// Accept digits only in the postal code
        #[arg(long)]
        numeric_postal_code: bool,

        /// Current month as YYYY-MM (defaults to the system clock)
        #[arg(long, value_parser = parse_month)]
        today: Option<YearMonth>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Type a whole form and report per-field state and readiness
    Form {
        /// JSON file holding a form configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        require_expiry: bool,

        #[arg(long)]
        require_cvv: bool,

        #[arg(long)]
        require_postal_code: bool,

        #[arg(long)]
        require_cardholder_name: bool,

        /// Complete the form as soon as all fields are valid
        #[arg(long)]
        auto_accept: bool,

        #[arg(long)]
        number: Option<String>,

        #[arg(long)]
        expiry: Option<String>,

        #[arg(long)]
        cvv: Option<String>,

        #[arg(long)]
        postal_code: Option<String>,

        #[arg(long)]
        cardholder_name: Option<String>,

        /// Current month as YYYY-MM (defaults to the system clock)
        #[arg(long, value_parser = parse_month)]
        today: Option<YearMonth>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_month(s: &str) -> Result<YearMonth, String> {
    let (year, month) = s
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got {:?}", s))?;
    let year: u16 = year.parse().map_err(|_| format!("bad year in {:?}", s))?;
    let month: u8 = month.parse().map_err(|_| format!("bad month in {:?}", s))?;
    if !(1..=12).contains(&month) {
        return Err(format!("month out of range in {:?}", s));
    }
    Ok(YearMonth::new(year, month))
}

fn clock(today: Option<YearMonth>) -> Arc<dyn Clock> {
    match today {
        Some(ym) => Arc::new(FixedClock(ym)),
        None => Arc::new(SystemClock),
    }
}

/// Field value safe to print: number and CVV are masked.
fn printable(kind: FieldKind, value: &str) -> String {
    match kind {
        FieldKind::Number => mask_number(value),
        FieldKind::Cvv => mask_all(value),
        _ => value.to_string(),
    }
}

fn state_json(kind: FieldKind, state: &FieldState) -> serde_json::Value {
    json!({
        "field": kind,
        "value": printable(kind, state.value()),
        "valid": state.is_valid(),
        "full_length": state.has_full_length(),
        "feedback": state.feedback(),
    })
}

fn print_state(kind: FieldKind, state: &FieldState) {
    println!(
        "{:<16} {:<24} valid: {:<5} full: {}",
        kind.name(),
        printable(kind, state.value()),
        state.is_valid(),
        state.has_full_length()
    );
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect {
            card_number,
            output,
        } => cmd_detect(&card_number, output),
        Commands::Check {
            field,
            text,
            card_number,
            numeric_postal_code,
            today,
            output,
        } => cmd_check(
            field,
            &text,
            card_number.as_deref(),
            numeric_postal_code,
            today,
            output,
        ),
        Commands::Form {
            config,
            require_expiry,
            require_cvv,
            require_postal_code,
            require_cardholder_name,
            auto_accept,
            number,
            expiry,
            cvv,
            postal_code,
            cardholder_name,
            today,
            output,
        } => {
            let config = match config {
                Some(path) => load_config(&path),
                None => FormConfig::new()
                    .require_expiry(require_expiry)
                    .require_cvv(require_cvv)
                    .require_postal_code(require_postal_code)
                    .require_cardholder_name(require_cardholder_name)
                    .auto_accept(auto_accept),
            };
            let inputs = [
                (FieldKind::Number, number),
                (FieldKind::Expiry, expiry),
                (FieldKind::Cvv, cvv),
                (FieldKind::PostalCode, postal_code),
                (FieldKind::CardholderName, cardholder_name),
            ];
            cmd_form(config, &inputs, today, output);
        }
    }
}

fn load_config(path: &Path) -> FormConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", path.display(), e);
            std::process::exit(2);
        }
    };
    match serde_json::from_str(&text) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: invalid config {}: {}", path.display(), e);
            std::process::exit(2);
        }
    }
}

fn cmd_detect(card_number: &str, output: OutputFormat) {
    let brand = card_entry::detect::classify(card_number);
    match output {
        OutputFormat::Text => {
            println!("Detected Brand: {}", brand.name());
            println!("Number Length: {}", brand.number_length());
            println!("CVV Length: {}", brand.cvv_length());
        }
        OutputFormat::Json => {
            let out = json!({
                "brand": brand,
                "name": brand.name(),
                "number_length": brand.number_length(),
                "cvv_length": brand.cvv_length(),
            });
            println!("{:#}", out);
        }
    }
}

fn cmd_check(
    field: FieldKind,
    text: &str,
    card_number: Option<&str>,
    numeric_postal_code: bool,
    today: Option<YearMonth>,
    output: OutputFormat,
) {
    let mut config = FormConfig::all_fields().postal_code_numeric_only(numeric_postal_code);
    if let Some(number) = card_number {
        config = config.capture(card_entry::Capture::new(number, 0, 0));
    }

    let mut validator = create_validator_with_clock(field, &config, clock(today));
    validator.update(text);
    let state = validator.state();

    match output {
        OutputFormat::Text => print_state(field, &state),
        OutputFormat::Json => println!("{:#}", state_json(field, &state)),
    }

    if !state.is_valid() {
        std::process::exit(1);
    }
}

fn cmd_form(
    config: FormConfig,
    inputs: &[(FieldKind, Option<String>)],
    today: Option<YearMonth>,
    output: OutputFormat,
) {
    let mut form = CardEntryForm::with_clock(config, clock(today));
    let mut auto_completed = form.take_completed();

    for (kind, text) in inputs {
        let Some(text) = text else { continue };
        // Feed every prefix, as a keyboard would
        let mut typed = String::with_capacity(text.len());
        for c in text.chars() {
            typed.push(c);
            let update = form.on_field_changed(*kind, &typed);
            if update.completed.is_some() {
                auto_completed = update.completed;
            }
        }
    }

    let ready = form.is_form_ready();
    let result = match auto_completed {
        Some(result) => Ok(result),
        None => form.submit(),
    };

    match output {
        OutputFormat::Text => {
            println!("Brand: {}", form.brand().name());
            for kind in form.present_fields() {
                print_state(kind, &form.state(kind));
            }
            println!("Ready: {}", if ready { "yes" } else { "no" });
            match &result {
                Ok(r) => println!("Submitted: {:?}", r),
                Err(e) => println!("Error: {}", e),
            }
        }
        OutputFormat::Json => {
            let fields: Vec<_> = form
                .present_fields()
                .map(|kind| state_json(kind, &form.state(kind)))
                .collect();
            let out = json!({
                "brand": form.brand(),
                "fields": fields,
                "invalid": form.invalid_fields(),
                "ready": ready,
                "status": form.status(),
                "error": result.as_ref().err().map(|e| e.to_string()),
            });
            println!("{:#}", out);
        }
    }

    if result.is_err() {
        std::process::exit(1);
    }
}
