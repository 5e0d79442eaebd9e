//! WebAssembly bindings for the card entry form.
//!
//! This module exposes a `CardEntry` class that wraps [`CardEntryForm`] so a
//! browser form can forward its input events and read back field states.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { CardEntry } from 'card_entry';
//!
//! await init();
//!
//! const entry = new CardEntry(true, true, false, false);
//! numberInput.addEventListener('input', (e) => {
//!     const update = entry.onFieldChanged("number", e.target.value);
//!     numberInput.classList.toggle("error", update.error);
//!     if (update.focus) {
//!         document.getElementById(update.focus).focus();
//!     }
//!     cvvInput.placeholder = entry.cvvPlaceholder ?? "";
//!     submitButton.disabled = !update.ready;
//! });
//! ```

use crate::{CardEntryForm, FieldKind, FormConfig, Validator};
use wasm_bindgen::prelude::*;

fn field_name(kind: FieldKind) -> String {
    match kind {
        FieldKind::Number => "number",
        FieldKind::Expiry => "expiry",
        FieldKind::Cvv => "cvv",
        FieldKind::PostalCode => "postal_code",
        FieldKind::CardholderName => "cardholder_name",
    }
    .to_string()
}

fn parse_field(name: &str) -> Result<FieldKind, JsValue> {
    name.parse().map_err(|e: crate::EntryError| JsValue::from_str(&e.to_string()))
}

/// State of one field after an input event, returned to JavaScript.
#[wasm_bindgen]
pub struct FieldResult {
    valid: bool,
    full_length: bool,
    error: bool,
    focus: Option<String>,
    cvv_length: Option<u8>,
    ready: bool,
    completed: bool,
}

#[wasm_bindgen]
impl FieldResult {
    #[wasm_bindgen(getter)]
    pub fn valid(&self) -> bool {
        self.valid
    }

    #[wasm_bindgen(getter, js_name = fullLength)]
    pub fn full_length(&self) -> bool {
        self.full_length
    }

    /// Whether the field should be shown in the error color.
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> bool {
        self.error
    }

    /// Name of the field to focus next, if focus should move.
    #[wasm_bindgen(getter)]
    pub fn focus(&self) -> Option<String> {
        self.focus.clone()
    }

    #[wasm_bindgen(getter, js_name = cvvLength)]
    pub fn cvv_length(&self) -> Option<u8> {
        self.cvv_length
    }

    #[wasm_bindgen(getter)]
    pub fn ready(&self) -> bool {
        self.ready
    }

    /// Whether this event auto-completed the form.
    #[wasm_bindgen(getter)]
    pub fn completed(&self) -> bool {
        self.completed
    }
}

/// Final values of a completed form.
#[wasm_bindgen]
pub struct EntryResult {
    card_number: String,
    expiry_month: Option<u8>,
    expiry_year: Option<u16>,
    cvv: String,
    postal_code: String,
    cardholder_name: String,
}

#[wasm_bindgen]
impl EntryResult {
    #[wasm_bindgen(getter, js_name = cardNumber)]
    pub fn card_number(&self) -> String {
        self.card_number.clone()
    }

    #[wasm_bindgen(getter, js_name = expiryMonth)]
    pub fn expiry_month(&self) -> Option<u8> {
        self.expiry_month
    }

    #[wasm_bindgen(getter, js_name = expiryYear)]
    pub fn expiry_year(&self) -> Option<u16> {
        self.expiry_year
    }

    #[wasm_bindgen(getter)]
    pub fn cvv(&self) -> String {
        self.cvv.clone()
    }

    #[wasm_bindgen(getter, js_name = postalCode)]
    pub fn postal_code(&self) -> String {
        self.postal_code.clone()
    }

    #[wasm_bindgen(getter, js_name = cardholderName)]
    pub fn cardholder_name(&self) -> String {
        self.cardholder_name.clone()
    }
}

impl From<&crate::CardEntryResult> for EntryResult {
    fn from(result: &crate::CardEntryResult) -> Self {
        Self {
            card_number: result.card_number.clone(),
            expiry_month: result.expiry_month,
            expiry_year: result.expiry_year,
            cvv: result.cvv.clone(),
            postal_code: result.postal_code.clone(),
            cardholder_name: result.cardholder_name.clone(),
        }
    }
}

impl Drop for EntryResult {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.card_number.zeroize();
        self.cvv.zeroize();
    }
}

/// A card entry form driven from JavaScript input events.
#[wasm_bindgen]
pub struct CardEntry {
    form: CardEntryForm,
    completed: Option<crate::CardEntryResult>,
}

#[wasm_bindgen]
impl CardEntry {
    /// Creates a form. The card number field is always shown.
    #[wasm_bindgen(constructor)]
    pub fn new(
        require_expiry: bool,
        require_cvv: bool,
        require_postal_code: bool,
        require_cardholder_name: bool,
    ) -> CardEntry {
        let config = FormConfig::new()
            .require_expiry(require_expiry)
            .require_cvv(require_cvv)
            .require_postal_code(require_postal_code)
            .require_cardholder_name(require_cardholder_name);
        CardEntry {
            form: CardEntryForm::new(config),
            completed: None,
        }
    }

    /// Forwards the current text of `field` after an input event.
    #[wasm_bindgen(js_name = onFieldChanged)]
    pub fn on_field_changed(&mut self, field: &str, text: &str) -> Result<FieldResult, JsValue> {
        let kind = parse_field(field)?;
        let update = self.form.on_field_changed(kind, text);
        let completed = update.completed.is_some();
        if update.completed.is_some() {
            self.completed = update.completed;
        }

        Ok(FieldResult {
            valid: update.state.is_valid(),
            full_length: update.state.has_full_length(),
            error: update.state.feedback() == crate::Feedback::Error,
            focus: update.focus.map(field_name),
            cvv_length: update.cvv_length.map(|n| n as u8),
            ready: update.ready,
            completed,
        })
    }

    /// Normalized value of `field`, e.g. for re-rendering the input.
    pub fn value(&self, field: &str) -> Result<String, JsValue> {
        Ok(self.form.value(parse_field(field)?).to_string())
    }

    /// Whether every field is valid.
    #[wasm_bindgen(getter)]
    pub fn ready(&self) -> bool {
        self.form.is_form_ready()
    }

    /// Names of the fields that are not valid yet.
    #[wasm_bindgen(js_name = invalidFields)]
    pub fn invalid_fields(&self) -> js_sys::Array {
        self.form
            .invalid_fields()
            .into_iter()
            .map(|k| JsValue::from_str(&field_name(k)))
            .collect()
    }

    /// Names of the fields that have an input, in focus order.
    #[wasm_bindgen(js_name = presentFields)]
    pub fn present_fields(&self) -> js_sys::Array {
        self.form
            .present_fields()
            .map(|k| JsValue::from_str(&field_name(k)))
            .collect()
    }

    /// Field to focus when the form is shown.
    #[wasm_bindgen(js_name = initialFocus)]
    pub fn initial_focus(&self) -> Option<String> {
        self.form.initial_focus().map(field_name)
    }

    /// Detected brand name, e.g. `"American Express"`.
    #[wasm_bindgen(getter)]
    pub fn brand(&self) -> String {
        self.form.brand().name().to_string()
    }

    /// Placeholder hint for the CVV input.
    #[wasm_bindgen(getter, js_name = cvvPlaceholder)]
    pub fn cvv_placeholder(&self) -> Option<String> {
        self.form.cvv_placeholder()
    }

    /// Completes the form, or throws naming the invalid fields.
    pub fn submit(&mut self) -> Result<EntryResult, JsValue> {
        if let Some(result) = &self.completed {
            return Ok(EntryResult::from(result));
        }
        self.form
            .submit()
            .map(|result| EntryResult::from(&result))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Dismisses the form.
    pub fn cancel(&mut self) {
        self.form.cancel();
    }

    /// `"editing"`, `"completed"` or `"cancelled"`.
    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        self.form.status().to_string()
    }
}

#[cfg(feature = "serde")]
#[wasm_bindgen]
impl CardEntry {
    /// Creates a form from a JSON-encoded `FormConfig`.
    ///
    /// A captured card that already completes an auto-accepting form is
    /// returned by the first `submit`.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<CardEntry, JsValue> {
        let config: FormConfig =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut form = CardEntryForm::new(config);
        let completed = form.take_completed();
        Ok(CardEntry { form, completed })
    }
}

/// Detects the card brand from a (partial) card number.
///
/// # Example
/// ```javascript
/// const brand = detect_brand("4111");  // "Visa"
/// ```
#[wasm_bindgen]
pub fn detect_brand(card_number: &str) -> String {
    crate::detect::classify(card_number).name().to_string()
}

/// Checks if a card number passes the Luhn algorithm.
#[wasm_bindgen]
pub fn passes_luhn(card_number: &str) -> bool {
    crate::luhn::passes(card_number)
}

/// Masks a card number, showing only the last 4 digits.
#[wasm_bindgen]
pub fn mask_card(card_number: &str) -> String {
    crate::mask::mask_number(card_number)
}

/// Checks a single field value without a form, e.g. for server-side checks.
#[wasm_bindgen(js_name = checkField)]
pub fn check_field(field: &str, text: &str) -> Result<bool, JsValue> {
    let kind = parse_field(field)?;
    let config = FormConfig::all_fields();
    let mut validator = crate::create_validator(kind, &config);
    validator.update(text);
    Ok(validator.is_valid())
}
