//! # card_entry
//!
//! Field validation engine for manual payment card entry forms.
//!
//! As the user types a card number, expiry, CVV, postal code and cardholder
//! name, each keystroke is checked incrementally. The engine reports per-field
//! validity, whether a field is complete, where focus should move next and
//! whether the whole form can be submitted. Rendering is left to the caller.
//!
//! ## Features
//!
//! - Card brand detection from the leading digits, longest prefix wins
//! - Luhn checksum on the card number
//! - Expiry validation against an injectable clock
//! - CVV length that follows the detected brand
//! - Auto-advance and optional auto-accept
//! - Card number and CVV zeroed on drop, masked in `Debug`
//!
//! ## Quick Start
//!
//! ```rust
//! use card_entry::{CardBrand, CardEntryForm, FieldKind, FormConfig};
//!
//! let mut form = CardEntryForm::new(FormConfig::new().require_cvv(true));
//!
//! let update = form.on_field_changed(FieldKind::Number, "3782 822463 10005");
//! assert!(update.state.is_valid());
//! assert_eq!(form.brand(), CardBrand::Amex);
//! assert_eq!(update.cvv_length, Some(4));
//! assert_eq!(update.focus, Some(FieldKind::Cvv));
//!
//! form.on_field_changed(FieldKind::Cvv, "123");
//! assert!(!form.is_form_ready());
//!
//! form.on_field_changed(FieldKind::Cvv, "1234");
//! assert!(form.is_form_ready());
//! ```
//!
//! ## Single Validators
//!
//! ```rust
//! use card_entry::number::CardNumberValidator;
//! use card_entry::Validator;
//!
//! let mut number = CardNumberValidator::new();
//! number.update("4111 1111 1111 111");
//! assert!(!number.has_full_length());
//!
//! number.update("4111 1111 1111 1111");
//! assert!(number.is_valid());
//! println!("{:?}", number); // digits are masked
//! ```
//!
//! ## Supported Card Brands
//!
//! | Brand | Prefix | Length | CVV |
//! |-------|--------|--------|-----|
//! | Visa | 4 | 16 | 3 |
//! | Mastercard | 51-55, 2221-2720 | 16 | 3 |
//! | American Express | 34, 37 | 15 | 4 |
//! | Discover | 6011, 622126-622925, 644-649, 65 | 16 | 3 |
//! | JCB | 3528-3589 | 16 | 3 |
//! | Diners Club | 300-305, 309, 36, 38-39 | 14 | 3 |
//! | Unknown | anything else | 19 | 3 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `Serialize`/`Deserialize` for configs and field snapshots |
//! | `cli` | `cardentry` command-line tool |
//! | `wasm` | WebAssembly bindings |
//!
//! ## Security
//!
//! - Card number and CVV buffers are zeroed when validators are dropped
//! - `Debug` shows masked values only
//! - Logging never includes field contents
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod clock;
pub mod cvv;
pub mod detect;
pub mod error;
pub mod expiry;
pub mod field;
pub mod form;
pub mod luhn;
pub mod mask;
pub mod number;
pub mod text;
pub mod validator;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use card::CardBrand;
pub use error::EntryError;
pub use field::{Feedback, FieldKind, FieldState};
pub use form::{
    create_validator, create_validator_with_clock, Capture, CardEntryForm, CardEntryResult,
    FieldUpdate, FormConfig, FormStatus,
};
pub use validator::{AlwaysValid, FieldValidator, Validator};
