//! # cardview
//!
//! The text processing behind a credit card entry view: everything the view
//! needs to turn what the user typed into what the user sees.
//!
//! ## Features
//!
//! - Card brand classification by IIN pattern (9 brands)
//! - Expiry normalization to `MMYY` and expiry validation
//! - Digit fillers that show how many digits are still missing
//! - A small pattern language for grouping and masking digits
//! - A `CreditCard` record with field validity checks
//! - Multiple interfaces: library, CLI, WASM
//!
//! ## Quick Start
//!
//! ```rust
//! use cardview::{classify, Brand, CreditCard};
//!
//! assert_eq!(classify("4111111111111111"), Brand::Visa);
//!
//! let card = CreditCard::new("Jane Doe", "378282246310005", "123", "1299");
//! assert_eq!(card.brand(), Brand::Amex);
//! assert!(card.is_number_valid());
//! assert!(card.is_cvv_valid());
//!
//! // Safe for logging - never exposes the full card number
//! println!("{}", card); // "Holder: Jane Doe, Number: ***********0005, ..."
//! ```
//!
//! ## Expiry Normalization
//!
//! ```rust
//! use cardview::expiry;
//!
//! assert_eq!(expiry::normalize("09/18").unwrap(), "0918");
//! assert_eq!(expiry::normalize("09/2018").unwrap(), "0918");
//! assert_eq!(expiry::normalize("2018-09").unwrap(), "0918");
//! assert!(expiry::normalize("Sept 2018").is_err());
//! ```
//!
//! ## Fillers
//!
//! ```rust
//! use cardview::{Filler, FillerList};
//!
//! let fillers: FillerList = vec![
//!     Filler::new(19, '*').unwrap(),
//!     Filler::new(16, '*').unwrap(),
//! ]
//! .into();
//!
//! assert_eq!(fillers.fill("411111"), "411111**********");
//! ```
//!
//! ## Number Formatting
//!
//! ```rust
//! use cardview::NumberFormat;
//!
//! assert_eq!(NumberFormat::new("%s4").format("4111111111111111").unwrap(), "4111 1111 1111 1111");
//! assert_eq!(NumberFormat::new("%d4 %d6 %d5").format("378282246310005").unwrap(), "3782 822463 10005");
//! assert_eq!(NumberFormat::new("**** %c12%r").format("4111111111111111").unwrap(), "**** 1111");
//! ```
//!
//! ## Rendering a Card
//!
//! ```rust
//! use cardview::display::{CardDisplay, DisplayConfig};
//! use cardview::{CreditCard, Filler};
//!
//! let display = CardDisplay::new(&DisplayConfig {
//!     number_format: Some("%s4".to_string()),
//!     number_fillers: vec![Filler::new(16, '*').unwrap()],
//!     ..DisplayConfig::default()
//! });
//!
//! let card = CreditCard::new("Jane Doe", "41111111", "", "0930");
//! let rendered = display.render(&card).unwrap();
//! assert_eq!(rendered.number, "4111 1111 **** ****");
//! assert_eq!(rendered.expiry, "09/30");
//! ```
//!
//! ## Supported Card Brands
//!
//! Brands are tried in this order; the first full match wins and
//! `Generic` is the fallback.
//!
//! | Brand | Prefix | Length |
//! |-------|--------|--------|
//! | American Express | 34, 37 | 15 |
//! | Diners Club | 300-305, 3095, 36, 38, 39 | 14-16 |
//! | Discover | 6011, 644-649, 65 | 16 |
//! | JCB | 2131, 1800 / 35 | 15 / 16 |
//! | Maestro | 50, 56-69 except 62 | 12-19 |
//! | Mastercard | 51-55, 2221-2720 | 16 |
//! | UnionPay | 62 | 16-19 |
//! | Visa | 4 | 13, 16, 19 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `fillers-json` | JSON filler and display configuration loaders |
//! | `fillers-csv` | CSV filler loader |
//! | `cli` | Command-line tool |
//! | `wasm` | WebAssembly support |
//!
//! ## Security
//!
//! - Card number, CVV and pin code are zeroed when a `CreditCard` is dropped
//! - `Debug` and `Display` show masked values only
//! - Card equality uses constant-time comparison for the number and CVV
//! - Log events carry lengths and brands, never card data
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod detect;
pub mod display;
pub mod error;
pub mod expiry;
pub mod filler;
pub mod format;
pub mod mask;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use card::{Brand, CreditCard, ParseBrandError};
pub use detect::classify;
pub use display::{CardDisplay, DisplayConfig, RenderedCard};
pub use error::{ConfigError, FormatError, RangeError};
pub use expiry::normalize;
pub use filler::{Filler, FillerList, FillerLoadError};
pub use format::NumberFormat;

// Re-export mask utilities
pub use mask::{constant_time_eq, constant_time_eq_str, mask_number};
