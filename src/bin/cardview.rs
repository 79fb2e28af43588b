//! CLI tool for the card view core.
//!
//! # Usage
//!
//! ```bash
//! # Classify a card number
//! cardview brand 4111111111111111
//!
//! # Normalize an expiry
//! cardview expiry 09/2018
//!
//! # Pad a partial number
//! cardview fill 411111 --filler 16:* --filler 19:*
//!
//! # Format a number with a pattern
//! cardview format "%d4 %d4" 12345678 --no-extra
//!
//! # Check card fields
//! cardview check --number 4111111111111111 --cvv 123 --expiry 12/30
//!
//! # Render card fields with a display configuration
//! cardview render --config display.json --number 411111 --expiry 0930
//! ```
//!
//! Set `RUST_LOG=debug` to see what the library does.

use std::path::PathBuf;
use std::process::ExitCode;

use cardview::display::{CardDisplay, DisplayConfig};
use cardview::{expiry, Brand, CreditCard, Filler, FillerList, NumberFormat};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "cardview")]
#[command(
    author,
    version,
    about = "Credit card field formatting and checks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a card number by brand
    Brand {
        /// Card number (digits only)
        card_number: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Normalize an expiry to MMYY
    Expiry {
        /// Expiry (MM/YY, MMYY, MM-YY, MMYYYY, MM/YYYY, MM-YYYY, YYYY/MM, YYYY-MM)
        date: String,
    },

    /// Pad a partial value with the first filler that fits
    Fill {
        /// Value to pad
        input: String,

        /// Filler as LENGTH or LENGTH:CHAR, repeatable
        #[arg(short, long = "filler", required = true)]
        fillers: Vec<Filler>,
    },

    /// Format a value with a %d/%s/%c/%r pattern
    Format {
        /// Pattern, e.g. "%d4 %d4" or "%s4"
        pattern: String,

        /// Value to format
        input: String,

        /// Drop digits left over after the last placeholder
        #[arg(long)]
        no_extra: bool,
    },

    /// Check card fields for validity
    Check {
        /// Card number
        #[arg(short, long, default_value = "")]
        number: String,

        /// CVV
        #[arg(short, long, default_value = "")]
        cvv: String,

        /// Expiry in any accepted shape
        #[arg(short, long, default_value = "")]
        expiry: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Render card fields the way the view shows them
    Render {
        /// JSON display configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Cardholder name
        #[arg(long, default_value = "")]
        holder: String,

        /// Card number
        #[arg(short, long, default_value = "")]
        number: String,

        /// CVV
        #[arg(short, long, default_value = "")]
        cvv: String,

        /// Expiry in any accepted shape
        #[arg(short, long, default_value = "")]
        expiry: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Brand {
            card_number,
            output,
        } => {
            cmd_brand(&card_number, output);
            Ok(())
        }
        Commands::Expiry { date } => cmd_expiry(&date),
        Commands::Fill { input, fillers } => {
            cmd_fill(&input, fillers);
            Ok(())
        }
        Commands::Format {
            pattern,
            input,
            no_extra,
        } => cmd_format(&pattern, &input, !no_extra),
        Commands::Check {
            number,
            cvv,
            expiry,
            output,
        } => cmd_check(&number, &cvv, &expiry, output),
        Commands::Render {
            config,
            holder,
            number,
            cvv,
            expiry,
        } => cmd_render(config, holder, number, cvv, &expiry),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn cmd_brand(card_number: &str, output: OutputFormat) {
    let brand = cardview::classify(card_number);

    match output {
        OutputFormat::Text => println!("Brand: {}", brand),
        OutputFormat::Json => println!("{{ \"brand\": \"{}\" }}", brand),
    }
}

fn cmd_expiry(date: &str) -> Result<(), String> {
    let canonical = expiry::normalize(date).map_err(|e| e.to_string())?;

    println!("Normalized: {}", canonical);
    println!(
        "Status: {}",
        if expiry::is_valid(&canonical) { "Valid" } else { "Expired or invalid" }
    );
    Ok(())
}

fn cmd_fill(input: &str, fillers: Vec<Filler>) {
    let list = FillerList::from(fillers);
    println!("{}", list.fill(input));
}

fn cmd_format(pattern: &str, input: &str, show_extra_digits: bool) -> Result<(), String> {
    let formatted = NumberFormat::new(pattern)
        .with_show_extra_digits(show_extra_digits)
        .format(input)
        .map_err(|e| e.to_string())?;

    println!("{}", formatted);
    Ok(())
}

/// Normalizes an expiry argument, keeping it as given when its shape is unknown
/// so the validity check reports it instead of the parser.
fn expiry_arg(raw: &str) -> String {
    expiry::normalize(raw).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "expiry kept as given");
        raw.to_string()
    })
}

fn cmd_check(number: &str, cvv: &str, raw_expiry: &str, output: OutputFormat) -> Result<(), String> {
    let card = CreditCard::new("", number, cvv, expiry_arg(raw_expiry));
    let brand: Brand = card.brand();
    let (number_ok, cvv_ok, expiry_ok) = (
        card.is_number_valid(),
        card.is_cvv_valid(),
        card.is_expiry_valid(),
    );

    match output {
        OutputFormat::Text => {
            println!("Brand: {}", brand);
            println!("Number: {}", yes_no(number_ok));
            println!("CVV: {}", yes_no(cvv_ok));
            println!("Expiry: {}", yes_no(expiry_ok));
        }
        OutputFormat::Json => {
            println!("{{");
            println!("  \"brand\": \"{}\",", brand);
            println!("  \"number_valid\": {},", number_ok);
            println!("  \"cvv_valid\": {},", cvv_ok);
            println!("  \"expiry_valid\": {}", expiry_ok);
            println!("}}");
        }
    }

    if number_ok && cvv_ok && expiry_ok {
        Ok(())
    } else {
        Err("card has invalid fields".to_string())
    }
}

fn cmd_render(
    config: Option<PathBuf>,
    holder: String,
    number: String,
    cvv: String,
    raw_expiry: &str,
) -> Result<(), String> {
    let config = match config {
        Some(path) => DisplayConfig::from_file(&path)
            .map_err(|e| format!("{}: {}", path.display(), e))?,
        None => DisplayConfig::default(),
    };

    let card = CreditCard::new(holder, number, cvv, expiry_arg(raw_expiry));
    let rendered = CardDisplay::new(&config)
        .render(&card)
        .map_err(|e| e.to_string())?;

    println!("Holder: {}", rendered.holder);
    println!("Number: {}", rendered.number);
    println!("Expiry: {}", rendered.expiry);
    println!("CVV: {}", rendered.cvv);
    println!("Brand: {}", rendered.brand);
    Ok(())
}

fn yes_no(ok: bool) -> &'static str {
    if ok {
        "yes"
    } else {
        "no"
    }
}
