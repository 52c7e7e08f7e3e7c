//! Signing domain: request validation, enumerations, and key derivation.
//!
//! The wire contract (field names, allowed literals, and user-facing
//! messages) is the legacy Italian one the frontend already speaks:
//! `tipologia` is `venduto` or `affittato`, `colore` comes from a
//! deployment-configured set, and every validation failure carries its own
//! fixed message.

use serde::Deserialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Category tag on `file` rows that marks property photos.
pub const PHOTO_CATEGORY: &str = "FOTO";

/// Slot name of the canonical "first photo" record.
pub const CANONICAL_SLOT: &str = "0";

/// Slot name given to a retired record when the retire mode is `Rename`.
/// Non-numeric, so it sorts after every live slot.
pub const SUPERSEDED_SLOT: &str = "old";

/// Audit-log action recorded once per successful signing.
pub const AUDIT_ACTION_CONCLUDED: &str = "Immobile concluso";

/// Fixed confirmation message returned on success.
pub const SUCCESS_MESSAGE: &str = "Firma avvenuta con successo";

/// File name of the composited output object.
pub const OUTPUT_FILE_NAME: &str = "done.png";

const MSG_ID_REQUIRED: &str = "Parametro idImmobile obbligatorio";
const MSG_ID_INVALID: &str =
    "Parametro idImmobile non corretto, deve essere un numero positivo";
const MSG_BODY_REQUIRED: &str = "Necessario avere il corpo della richiesta";
const MSG_FIELDS_REQUIRED: &str =
    "Il corpo della richiesta deve contenere i campi 'tipologia' e 'colore'";
const MSG_KIND_INVALID: &str =
    "Tipologia non corretta: può essere solo 'venduto' o 'affittato'";

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// The two transaction types a property can be signed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "venduto")]
    Sold,
    #[serde(rename = "affittato")]
    Rented,
}

impl TransactionKind {
    /// Wire literal, also used in watermark asset keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sold => "venduto",
            Self::Rented => "affittato",
        }
    }

    /// Parse a wire literal. Anything else is a validation failure.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "venduto" => Ok(Self::Sold),
            "affittato" => Ok(Self::Rented),
            _ => Err(CoreError::Validation(MSG_KIND_INVALID.to_string())),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the previous canonical record is retired inside the signing
/// transaction. The two observed deployments differ here, so it is
/// configuration rather than a code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetireMode {
    /// Delete the previous done record outright.
    #[default]
    Delete,
    /// Keep the row but move its slot to [`SUPERSEDED_SLOT`].
    Rename,
}

impl RetireMode {
    /// Parse a configuration value (`delete` | `rename`).
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "delete" => Ok(Self::Delete),
            "rename" => Ok(Self::Rename),
            other => Err(CoreError::Validation(format!(
                "Unknown retire mode '{other}'. Must be one of: delete, rename"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Request validation
// ---------------------------------------------------------------------------

/// Raw request body as received on the wire, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSigningBody {
    pub tipologia: Option<String>,
    pub colore: Option<String>,
}

/// A fully validated signing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    pub property_id: i64,
    pub kind: TransactionKind,
    pub color: String,
}

impl SigningRequest {
    /// Validate the raw request parts in order, short-circuiting on the
    /// first violation. Each check has its own fixed message.
    ///
    /// Order: id present -> id numeric and positive -> body present ->
    /// both fields present -> tipologia literal -> colore in the allowed
    /// set. Pure: nothing is touched besides the arguments.
    pub fn from_parts(
        raw_id: Option<&str>,
        body: Option<&RawSigningBody>,
        allowed_colors: &[String],
    ) -> Result<Self, CoreError> {
        let raw_id = match raw_id {
            Some(v) if !v.trim().is_empty() => v.trim(),
            _ => return Err(CoreError::Validation(MSG_ID_REQUIRED.to_string())),
        };

        let property_id: i64 = match raw_id.parse() {
            Ok(n) if n > 0 => n,
            _ => return Err(CoreError::Validation(MSG_ID_INVALID.to_string())),
        };

        let body = body.ok_or_else(|| CoreError::Validation(MSG_BODY_REQUIRED.to_string()))?;

        let (tipologia, colore) = match (&body.tipologia, &body.colore) {
            (Some(t), Some(c)) if !t.is_empty() && !c.is_empty() => (t.as_str(), c.as_str()),
            _ => return Err(CoreError::Validation(MSG_FIELDS_REQUIRED.to_string())),
        };

        let kind = TransactionKind::parse(tipologia)?;
        validate_color(colore, allowed_colors)?;

        Ok(Self {
            property_id,
            kind,
            color: colore.to_string(),
        })
    }
}

/// Validate that `color` is one of the deployment's allowed literals.
pub fn validate_color(color: &str, allowed: &[String]) -> Result<(), CoreError> {
    if allowed.iter().any(|c| c == color) {
        return Ok(());
    }
    let list = allowed
        .iter()
        .map(|c| format!("'{c}'"))
        .collect::<Vec<_>>()
        .join(" o ");
    Err(CoreError::Validation(format!(
        "Colore non corretto: può essere solo {list}"
    )))
}

// ---------------------------------------------------------------------------
// Key derivation
// ---------------------------------------------------------------------------

/// Object-store key of the watermark asset for a kind/color pair.
pub fn watermark_key(prefix: &str, kind: TransactionKind, color: &str) -> String {
    format!("{prefix}/{kind}-{color}.png")
}

/// The reference segment of a photo's storage key: the second `/`-separated
/// path component. Keys follow the `<area>/<ref>/<file>` upload convention.
pub fn reference_segment(storage_key: &str) -> Option<&str> {
    storage_key
        .split('/')
        .nth(1)
        .filter(|segment| !segment.is_empty())
}

/// Deterministic output key for the composited image.
pub fn output_key(prefix: &str, reference: &str) -> String {
    format!("{prefix}/{reference}/{OUTPUT_FILE_NAME}")
}

/// Sort key for photo slot names: numeric slots ascend, anything
/// non-numeric (superseded markers) sorts last.
pub fn slot_sort_key(slot_name: &str) -> i64 {
    slot_name.parse::<i64>().unwrap_or(i64::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
