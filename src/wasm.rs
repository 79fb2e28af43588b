//! WebAssembly bindings for the card view core.
//!
//! This module provides JavaScript-friendly bindings for the cardview library.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { classify_brand, normalize_expiry, format_number, fill, check_card } from 'cardview';
//!
//! await init();
//!
//! classify_brand("4111111111111111");          // "Visa"
//! normalize_expiry("09/2018");                 // "0918"
//! format_number("%s4", "4111111111111111");    // "4111 1111 1111 1111"
//! fill("4111", ["16:*", "19:*"]);              // "4111************"
//!
//! const result = check_card("4111111111111111", "123", "1230");
//! console.log(result.brand, result.number_valid, result.expiry_valid);
//! ```

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::{Brand, CreditCard, Filler, FillerList, NumberFormat};

/// Result of a card check, returned to JavaScript.
#[wasm_bindgen]
pub struct CardCheckResult {
    brand: String,
    masked: String,
    number_valid: bool,
    cvv_valid: bool,
    expiry_valid: bool,
}

#[wasm_bindgen]
impl CardCheckResult {
    #[wasm_bindgen(getter)]
    pub fn brand(&self) -> String {
        self.brand.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn masked(&self) -> String {
        self.masked.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn number_valid(&self) -> bool {
        self.number_valid
    }

    #[wasm_bindgen(getter)]
    pub fn cvv_valid(&self) -> bool {
        self.cvv_valid
    }

    #[wasm_bindgen(getter)]
    pub fn expiry_valid(&self) -> bool {
        self.expiry_valid
    }
}

/// Returns the brand name of a card number.
///
/// # Example
/// ```javascript
/// classify_brand("378282246310005");  // "American Express"
/// classify_brand("1234");             // "Generic"
/// ```
#[wasm_bindgen]
pub fn classify_brand(card_number: &str) -> String {
    crate::classify(card_number).name().to_string()
}

/// Returns the brand names of several card numbers.
///
/// Entries that are not strings are classified as empty input.
#[wasm_bindgen]
pub fn classify_batch(card_numbers: js_sys::Array) -> js_sys::Array {
    card_numbers
        .iter()
        .map(|value| {
            let number = value.as_string().unwrap_or_default();
            JsValue::from_str(crate::classify(&number).name())
        })
        .collect()
}

/// Converts an expiry to `MMYY`. Throws on an unrecognized shape.
///
/// # Example
/// ```javascript
/// normalize_expiry("2018-09");  // "0918"
/// ```
#[wasm_bindgen]
pub fn normalize_expiry(expiry: &str) -> Result<String, JsValue> {
    crate::expiry::normalize(expiry).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Formats `input` with a `%d`/`%s`/`%c`/`%r` pattern.
///
/// Digits left over after the last placeholder are appended.
///
/// # Example
/// ```javascript
/// format_number("%d4 %d4", "12345678");  // "1234 5678"
/// ```
#[wasm_bindgen]
pub fn format_number(pattern: &str, input: &str) -> Result<String, JsValue> {
    format_number_with_options(pattern, input, true)
}

/// Formats `input`, choosing whether leftover digits are shown.
#[wasm_bindgen]
pub fn format_number_with_options(
    pattern: &str,
    input: &str,
    show_extra_digits: bool,
) -> Result<String, JsValue> {
    NumberFormat::new(pattern)
        .with_show_extra_digits(show_extra_digits)
        .format(input)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Pads `input` with the first filler that fits.
///
/// Fillers are given as `"length:fill"` strings or plain lengths.
///
/// # Example
/// ```javascript
/// fill("222233334444", ["20:*", "16:X"]);  // "222233334444XXXX"
/// fill("12", [4]);                         // "12**"
/// ```
#[wasm_bindgen]
pub fn fill(input: &str, fillers: js_sys::Array) -> Result<String, JsValue> {
    let list = fillers
        .iter()
        .map(|value| {
            let spec = match value.as_f64() {
                Some(length) => (length as usize).to_string(),
                None => value.as_string().unwrap_or_default(),
            };
            spec.parse::<Filler>()
                .map_err(|e| JsValue::from_str(&e.to_string()))
        })
        .collect::<Result<FillerList, JsValue>>()?;

    Ok(list.fill(input))
}

/// Builds a card from its fields and runs the validity checks.
///
/// # Example
/// ```javascript
/// const result = check_card("4111111111111111", "123", "1230");
/// console.log(result.brand);         // "Visa"
/// console.log(result.masked);        // "************1111"
/// console.log(result.cvv_valid);     // true
/// ```
#[wasm_bindgen]
pub fn check_card(card_number: &str, cvv: &str, expiry: &str) -> CardCheckResult {
    let card = CreditCard::new("", card_number, cvv, expiry);

    CardCheckResult {
        brand: card.brand().name().to_string(),
        masked: crate::mask_number(card.number()),
        number_valid: card.is_number_valid(),
        cvv_valid: card.is_cvv_valid(),
        expiry_valid: card.is_expiry_valid(),
    }
}

/// Returns the names of all brands in classification order.
#[wasm_bindgen]
pub fn brand_names() -> js_sys::Array {
    Brand::ALL
        .iter()
        .map(|brand| JsValue::from_str(brand.name()))
        .collect()
}
