//! The entry form: per-field validators, keystroke dispatch and readiness.
//!
//! A [`CardEntryForm`] owns one [`FieldValidator`] per [`FieldKind`]. Fields
//! the configuration does not ask for hold an [`AlwaysValid`] placeholder,
//! so readiness is always the plain conjunction of the five validators.
//!
//! Every keystroke goes through [`CardEntryForm::on_field_changed`], which
//! runs in a fixed order:
//!
//! 1. the edited field's validator is updated;
//! 2. for the number field, the CVV length is retargeted to the detected brand;
//! 3. focus advances if the field just became valid at full length;
//! 4. readiness is recomputed, and the form completes itself when
//!    auto-accept is on.
//!
//! # Example
//!
//! ```
//! use card_entry::clock::FixedClock;
//! use card_entry::{CardEntryForm, FieldKind, FormConfig};
//! use std::sync::Arc;
//!
//! let config = FormConfig::new().require_expiry(true).require_cvv(true);
//! let mut form = CardEntryForm::with_clock(config, Arc::new(FixedClock::new(2024, 1)));
//!
//! let update = form.on_field_changed(FieldKind::Number, "4111 1111 1111 1111");
//! assert!(update.state.is_valid());
//! assert_eq!(update.focus, Some(FieldKind::Expiry));
//!
//! form.on_field_changed(FieldKind::Expiry, "12/30");
//! let update = form.on_field_changed(FieldKind::Cvv, "123");
//! assert!(update.ready);
//!
//! let result = form.submit().unwrap();
//! assert_eq!(result.expiry_month, Some(12));
//! assert_eq!(result.expiry_year, Some(2030));
//! ```

use crate::clock::{Clock, SystemClock};
use crate::cvv::FixedLengthValidator;
use crate::error::EntryError;
use crate::expiry::ExpiryValidator;
use crate::field::{FieldKind, FieldState};
use crate::mask::{mask_all, mask_number};
use crate::number::CardNumberValidator;
use crate::text::MaxLengthValidator;
use crate::validator::{AlwaysValid, FieldValidator, Validator};
use crate::CardBrand;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use zeroize::Zeroize;

/// Card data captured before the form opened, e.g. by a camera scan.
///
/// The number is zeroed on drop and masked in `Debug`.
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capture {
    /// The captured card number.
    pub card_number: String,
    /// Captured expiry month (1-12), 0 if unknown.
    pub expiry_month: u8,
    /// Captured expiry year, 0 if unknown.
    pub expiry_year: u16,
}

impl Capture {
    /// Creates a capture holding a number and an expiry.
    pub fn new(card_number: impl Into<String>, expiry_month: u8, expiry_year: u16) -> Self {
        Self {
            card_number: card_number.into(),
            expiry_month,
            expiry_year,
        }
    }

    fn expiry(&self) -> Option<(u8, u16)> {
        (1..=12)
            .contains(&self.expiry_month)
            .then_some((self.expiry_month, self.expiry_year))
    }
}

impl fmt::Debug for Capture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capture")
            .field("card_number", &mask_number(&self.card_number))
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .finish()
    }
}

impl Drop for Capture {
    fn drop(&mut self) {
        self.card_number.zeroize();
    }
}

/// Which fields the form asks for and how it behaves.
///
/// The card number field is shown unless a [`Capture`] is supplied, in which
/// case the captured number is used as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormConfig {
    /// Show and require the expiry field.
    pub require_expiry: bool,
    /// Show and require the CVV field.
    pub require_cvv: bool,
    /// Show and require the postal code field.
    pub require_postal_code: bool,
    /// Show and require the cardholder name field.
    pub require_cardholder_name: bool,
    /// Accept digits only in the postal code.
    pub postal_code_numeric_only: bool,
    /// Complete the form as soon as every field is valid.
    pub auto_accept: bool,
    /// Pre-filled card data.
    pub capture: Option<Capture>,
}

impl FormConfig {
    /// A configuration asking for the card number only.
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration asking for every field.
    pub fn all_fields() -> Self {
        Self::new()
            .require_expiry(true)
            .require_cvv(true)
            .require_postal_code(true)
            .require_cardholder_name(true)
    }

    /// Sets whether the expiry field is required.
    pub fn require_expiry(mut self, on: bool) -> Self {
        self.require_expiry = on;
        self
    }

    /// Sets whether the CVV field is required.
    pub fn require_cvv(mut self, on: bool) -> Self {
        self.require_cvv = on;
        self
    }

    /// Sets whether the postal code field is required.
    pub fn require_postal_code(mut self, on: bool) -> Self {
        self.require_postal_code = on;
        self
    }

    /// Sets whether the cardholder name field is required.
    pub fn require_cardholder_name(mut self, on: bool) -> Self {
        self.require_cardholder_name = on;
        self
    }

    /// Sets whether the postal code accepts digits only.
    pub fn postal_code_numeric_only(mut self, on: bool) -> Self {
        self.postal_code_numeric_only = on;
        self
    }

    /// Sets whether the form completes itself once ready.
    pub fn auto_accept(mut self, on: bool) -> Self {
        self.auto_accept = on;
        self
    }

    /// Pre-fills the form with captured card data.
    pub fn capture(mut self, capture: Capture) -> Self {
        self.capture = Some(capture);
        self
    }

    /// Whether the form shows an input for `kind`.
    pub fn shows(&self, kind: FieldKind) -> bool {
        match kind {
            FieldKind::Number => self.capture.is_none(),
            FieldKind::Expiry => self.require_expiry,
            FieldKind::Cvv => self.require_cvv,
            FieldKind::PostalCode => self.require_postal_code,
            FieldKind::CardholderName => self.require_cardholder_name,
        }
    }
}

/// Creates the validator for one field, reading "today" from the system clock.
pub fn create_validator(kind: FieldKind, config: &FormConfig) -> FieldValidator {
    create_validator_with_clock(kind, config, Arc::new(SystemClock))
}

/// Creates the validator for one field.
///
/// Fields the configuration does not ask for get [`AlwaysValid`]. The
/// number validator exists even when a capture replaces the input, seeded
/// with the captured number.
pub fn create_validator_with_clock(
    kind: FieldKind,
    config: &FormConfig,
    clock: Arc<dyn Clock>,
) -> FieldValidator {
    let capture = config.capture.as_ref();
    match kind {
        FieldKind::Number => match capture {
            Some(c) => CardNumberValidator::with_number(&c.card_number).into(),
            None => CardNumberValidator::new().into(),
        },
        FieldKind::Expiry if config.require_expiry => {
            match capture.and_then(Capture::expiry) {
                Some((month, year)) => ExpiryValidator::seeded(month, year, clock).into(),
                None => ExpiryValidator::new(clock).into(),
            }
        }
        FieldKind::Cvv if config.require_cvv => {
            let brand = capture
                .map(|c| crate::detect::classify(&c.card_number))
                .unwrap_or_default();
            FixedLengthValidator::new(brand.cvv_length()).into()
        }
        FieldKind::PostalCode if config.require_postal_code => {
            MaxLengthValidator::postal_code(config.postal_code_numeric_only).into()
        }
        FieldKind::CardholderName if config.require_cardholder_name => {
            MaxLengthValidator::cardholder_name().into()
        }
        _ => AlwaysValid.into(),
    }
}

/// Lifecycle of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FormStatus {
    /// Accepting input.
    #[default]
    Editing,
    /// Submitted, explicitly or by auto-accept.
    Completed,
    /// Dismissed by the user.
    Cancelled,
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Editing => "editing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        })
    }
}

/// Final field values handed to the caller of the form.
///
/// Card number and CVV are zeroed on drop and masked in `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct CardEntryResult {
    /// The card number digits.
    pub card_number: String,
    /// Expiry month, if known.
    pub expiry_month: Option<u8>,
    /// Four-digit expiry year, if known.
    pub expiry_year: Option<u16>,
    /// CVV digits, empty if not asked for.
    pub cvv: String,
    /// Postal code, empty if not asked for.
    pub postal_code: String,
    /// Cardholder name, empty if not asked for.
    pub cardholder_name: String,
}

impl CardEntryResult {
    /// The brand of the entered number.
    pub fn brand(&self) -> CardBrand {
        crate::detect::classify(&self.card_number)
    }
}

impl fmt::Debug for CardEntryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardEntryResult")
            .field("card_number", &mask_number(&self.card_number))
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &mask_all(&self.cvv))
            .field("postal_code", &self.postal_code)
            .field("cardholder_name", &self.cardholder_name)
            .finish()
    }
}

impl Drop for CardEntryResult {
    fn drop(&mut self) {
        self.card_number.zeroize();
        self.cvv.zeroize();
    }
}

/// What the presentation layer needs after a keystroke.
#[derive(Debug, Clone)]
pub struct FieldUpdate {
    /// The field that changed.
    pub kind: FieldKind,
    /// Its state after the update.
    pub state: FieldState,
    /// Field to move focus to, if focus should move.
    pub focus: Option<FieldKind>,
    /// New CVV length, if the brand change retargeted it.
    pub cvv_length: Option<usize>,
    /// Whether every field is now valid.
    pub ready: bool,
    /// The result, if this keystroke auto-completed the form.
    pub completed: Option<CardEntryResult>,
}

/// The validation core of a manual card entry form.
#[derive(Debug, Clone)]
pub struct CardEntryForm {
    validators: [FieldValidator; 5],
    present: [bool; 5],
    auto_accept: bool,
    captured_expiry: Option<(u8, u16)>,
    focus: Option<FieldKind>,
    status: FormStatus,
    completed: Option<CardEntryResult>,
}

impl CardEntryForm {
    /// Builds the form's validators from `config`, using the system clock.
    pub fn new(config: FormConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Builds the form's validators from `config`.
    ///
    /// With `auto_accept`, a form whose fields are all valid from the start
    /// completes immediately; collect its result with
    /// [`take_completed`](Self::take_completed).
    pub fn with_clock(config: FormConfig, clock: Arc<dyn Clock>) -> Self {
        let validators = FieldKind::ALL
            .map(|kind| create_validator_with_clock(kind, &config, Arc::clone(&clock)));
        let present = FieldKind::ALL.map(|kind| config.shows(kind));

        let mut form = Self {
            validators,
            present,
            auto_accept: config.auto_accept,
            captured_expiry: config.capture.as_ref().and_then(Capture::expiry),
            focus: None,
            status: FormStatus::Editing,
            completed: None,
        };
        form.focus = form.initial_focus();

        // A capture can seed every shown field
        if form.auto_accept && form.is_form_ready() {
            info!("all fields valid at construction, auto-accepting card entry");
            form.status = FormStatus::Completed;
            form.completed = Some(form.result());
        }

        debug!(
            fields = ?form.present_fields().collect::<Vec<_>>(),
            auto_accept = form.auto_accept,
            captured = config.capture.is_some(),
            "card entry form created"
        );
        form
    }

    /// Handles a change of `kind`'s text.
    ///
    /// Changes to a field the form does not show are ignored.
    pub fn on_field_changed(&mut self, kind: FieldKind, raw: &str) -> FieldUpdate {
        if !self.is_present(kind) {
            debug!(field = %kind, "ignoring change to hidden field");
            return FieldUpdate {
                kind,
                state: self.state(kind),
                focus: None,
                cvv_length: None,
                ready: self.is_form_ready(),
                completed: None,
            };
        }

        self.validators[kind.index()].update(raw);
        let state = self.state(kind);
        debug!(
            field = %kind,
            len = state.value().chars().count(),
            valid = state.is_valid(),
            full = state.has_full_length(),
            "field updated"
        );

        let cvv_length = match kind {
            FieldKind::Number => self.retarget_cvv(),
            _ => None,
        };

        let focus = if state.is_valid() && state.has_full_length() {
            self.next_empty_after(kind)
        } else {
            None
        };
        match focus {
            Some(next) => {
                debug!(from = %kind, to = %next, "advancing focus");
                self.focus = Some(next);
            }
            None => self.focus = Some(kind),
        }

        let ready = self.is_form_ready();
        let completed = if ready && self.auto_accept && self.status == FormStatus::Editing {
            info!("all fields valid, auto-accepting card entry");
            self.status = FormStatus::Completed;
            Some(self.result())
        } else {
            None
        };

        FieldUpdate {
            kind,
            state,
            focus,
            cvv_length,
            ready,
            completed,
        }
    }

    /// Whether every field's validator reports valid.
    pub fn is_form_ready(&self) -> bool {
        self.validators.iter().all(|v| v.is_valid())
    }

    /// Fields that currently fail validation, in declared order.
    pub fn invalid_fields(&self) -> Vec<FieldKind> {
        FieldKind::ALL
            .into_iter()
            .filter(|k| !self.validators[k.index()].is_valid())
            .collect()
    }

    /// Packages the current field values.
    ///
    /// The expiry comes from the expiry field when present, otherwise from
    /// the capture.
    pub fn result(&self) -> CardEntryResult {
        let (expiry_month, expiry_year) = match self.validator(FieldKind::Expiry).as_expiry() {
            Some(v) => (v.month(), v.year()),
            None => (
                self.captured_expiry.map(|(m, _)| m),
                self.captured_expiry.map(|(_, y)| y),
            ),
        };

        CardEntryResult {
            card_number: self.value(FieldKind::Number).to_string(),
            expiry_month,
            expiry_year,
            cvv: self.value(FieldKind::Cvv).to_string(),
            postal_code: self.value(FieldKind::PostalCode).to_string(),
            cardholder_name: self.value(FieldKind::CardholderName).to_string(),
        }
    }

    /// Explicit "done": completes the form if every field is valid.
    pub fn submit(&mut self) -> Result<CardEntryResult, EntryError> {
        if self.status != FormStatus::Editing {
            return Err(EntryError::Closed(self.status));
        }

        let invalid = self.invalid_fields();
        if !invalid.is_empty() {
            debug!(invalid = ?invalid, "submission refused");
            return Err(EntryError::NotReady { invalid });
        }

        self.status = FormStatus::Completed;
        info!(brand = %self.brand(), "card entry completed");
        Ok(self.result())
    }

    /// Takes the result of an auto-accept that happened when the form was
    /// built. Keystroke auto-accepts are reported in [`FieldUpdate::completed`]
    /// instead.
    pub fn take_completed(&mut self) -> Option<CardEntryResult> {
        self.completed.take()
    }

    /// Dismisses the form. Has no effect once completed.
    pub fn cancel(&mut self) {
        if self.status == FormStatus::Editing {
            info!("card entry cancelled");
            self.status = FormStatus::Cancelled;
        }
    }

    /// Current lifecycle status.
    #[inline]
    pub const fn status(&self) -> FormStatus {
        self.status
    }

    /// The field that currently has focus, if any.
    ///
    /// This is the auto-advance target after a field fills, otherwise the
    /// field edited last.
    #[inline]
    pub const fn focus(&self) -> Option<FieldKind> {
        self.focus
    }

    /// Where focus goes when the form is shown.
    ///
    /// With a captured number and an expiry that still needs fixing, the
    /// expiry field; otherwise the first empty field.
    pub fn initial_focus(&self) -> Option<FieldKind> {
        if !self.is_present(FieldKind::Number)
            && self.is_present(FieldKind::Expiry)
            && !self.validator(FieldKind::Expiry).is_valid()
        {
            return Some(FieldKind::Expiry);
        }
        self.first_empty(&FieldKind::ALL)
    }

    /// Whether the form has an input for `kind`.
    #[inline]
    pub fn is_present(&self, kind: FieldKind) -> bool {
        self.present[kind.index()]
    }

    /// Fields with an input, in declared order.
    pub fn present_fields(&self) -> impl Iterator<Item = FieldKind> + '_ {
        FieldKind::ALL.into_iter().filter(|&k| self.is_present(k))
    }

    /// The validator behind `kind`.
    #[inline]
    pub fn validator(&self, kind: FieldKind) -> &FieldValidator {
        &self.validators[kind.index()]
    }

    /// Snapshot of `kind`.
    pub fn state(&self, kind: FieldKind) -> FieldState {
        self.validator(kind).state()
    }

    /// Normalized value of `kind`.
    pub fn value(&self, kind: FieldKind) -> &str {
        self.validator(kind).value()
    }

    /// Brand detected from the card number.
    pub fn brand(&self) -> CardBrand {
        self.validator(FieldKind::Number)
            .as_number()
            .map(CardNumberValidator::brand)
            .unwrap_or_default()
    }

    /// Digit count the CVV field currently requires, if it is present.
    pub fn cvv_length(&self) -> Option<usize> {
        self.validator(FieldKind::Cvv)
            .as_fixed_length()
            .map(FixedLengthValidator::required_length)
    }

    /// Placeholder hint for the CVV field, e.g. `"1234"` for Amex.
    pub fn cvv_placeholder(&self) -> Option<String> {
        self.validator(FieldKind::Cvv)
            .as_fixed_length()
            .map(FixedLengthValidator::placeholder)
    }

    fn retarget_cvv(&mut self) -> Option<usize> {
        let brand = self.brand();
        let length = brand.cvv_length();
        let cvv = self.validators[FieldKind::Cvv.index()].as_fixed_length_mut()?;
        if !cvv.set_required_length(length) {
            return None;
        }
        debug!(brand = %brand, cvv_length = length, "CVV length retargeted");
        Some(length)
    }

    fn next_empty_after(&self, kind: FieldKind) -> Option<FieldKind> {
        self.first_empty(kind.following())
    }

    fn first_empty(&self, candidates: &[FieldKind]) -> Option<FieldKind> {
        candidates
            .iter()
            .copied()
            .find(|&k| self.is_present(k) && self.value(k).is_empty())
    }
}
