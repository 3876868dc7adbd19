//! Spanish personal and corporate tax identifiers.
//!
//! Three formats are recognised, tried in this order:
//!
//! - DNI: eight digits and a control letter.
//! - NIE: `X`, `Y` or `Z`, seven digits and a control letter.
//! - CIF: an organisation letter, seven digits and a control digit or letter.
//!
//! Input is case-insensitive. [`IdentifierKind::classify`] parses the
//! canonical (uppercase) form once; [`validate_identifier`] then checks the
//! control character for the matching variant.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Control letters for DNI and NIE, indexed by `number mod 23`.
pub const CONTROL_LETTERS: &[u8; 23] = b"TRWAGMYFPDXBNJZSQVHLCKE";

/// CIF control letters, indexed by the computed end digit.
pub const CIF_CONTROL_LETTERS: &[u8; 10] = b"JABCDEFGHI";

/// CIF organisation letters whose control character must be a letter.
const CIF_LETTER_CONTROLLED: &[u8] = b"NPQRSW";

// `[0-9]` rather than `\d`: the regex crate treats `\d` as any Unicode digit.
const DNI_PATTERN: &str = "^([0-9]{8})([A-Z])$";
const NIE_PATTERN: &str = "^([XYZ])([0-9]{7})([A-Z])$";
const CIF_PATTERN: &str = "^([ABCDEFGHJKLMNPQRSUVW])([0-9]{7})([0-9A-J])$";

static DNI_RE: OnceLock<Regex> = OnceLock::new();
static NIE_RE: OnceLock<Regex> = OnceLock::new();
static CIF_RE: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &'static str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("identifier regex {pattern} failed to compile: {error}"))
    })
}

/// Identifier validation failures.
///
/// The `Display` output is the message shown to API clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// DNI whose control letter does not match its number.
    #[error("DNI incorrecto")]
    Dni,
    /// NIE whose control letter does not match its number.
    #[error("NIE incorrecto")]
    Nie,
    /// CIF whose control character does not match its digits.
    #[error("CIF incorrecto")]
    Cif,
    /// Input that matches none of the formats. Holds the uppercased input.
    #[error("Identificador {0} no válido")]
    Unrecognised(String),
    /// No identifier where one is mandatory.
    #[error("Identificador requerido")]
    Missing,
}

/// Classified identifier, parsed from its canonical uppercase form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierKind {
    /// National identity document.
    Dni { number: u32, control: u8 },
    /// Foreigner identity number.
    Nie { prefix: u8, number: u32, control: u8 },
    /// Corporate tax code.
    Cif {
        organisation: u8,
        digits: [u8; 7],
        control: u8,
    },
    /// None of the formats matched.
    Invalid,
}

impl IdentifierKind {
    /// Classify an already uppercased identifier.
    pub fn classify(canonical: &str) -> Self {
        if let Some(caps) = compiled(&DNI_RE, DNI_PATTERN).captures(canonical) {
            return match (caps[1].parse::<u32>(), caps[2].as_bytes()) {
                (Ok(number), [control]) => Self::Dni {
                    number,
                    control: *control,
                },
                _ => Self::Invalid,
            };
        }
        if let Some(caps) = compiled(&NIE_RE, NIE_PATTERN).captures(canonical) {
            return match (caps[1].as_bytes(), caps[2].parse::<u32>(), caps[3].as_bytes()) {
                ([prefix], Ok(number), [control]) => Self::Nie {
                    prefix: *prefix,
                    number,
                    control: *control,
                },
                _ => Self::Invalid,
            };
        }
        if let Some(caps) = compiled(&CIF_RE, CIF_PATTERN).captures(canonical) {
            let mut digits = [0_u8; 7];
            for (slot, byte) in digits.iter_mut().zip(caps[2].bytes()) {
                *slot = byte - b'0';
            }
            return match (caps[1].as_bytes(), caps[3].as_bytes()) {
                ([organisation], [control]) => Self::Cif {
                    organisation: *organisation,
                    digits,
                    control: *control,
                },
                _ => Self::Invalid,
            };
        }
        Self::Invalid
    }

    /// Verify the control character of the classified identifier.
    fn verify(&self, canonical: &str) -> Result<(), IdentifierError> {
        match self {
            Self::Dni { number, control } => {
                if dni_control_letter(*number) == *control {
                    Ok(())
                } else {
                    Err(IdentifierError::Dni)
                }
            }
            // The prefix letter does not take part in the check; the seven
            // trailing digits are used as parsed.
            Self::Nie {
                number, control, ..
            } => {
                if dni_control_letter(*number) == *control {
                    Ok(())
                } else {
                    Err(IdentifierError::Nie)
                }
            }
            Self::Cif {
                organisation,
                digits,
                control,
            } => verify_cif(*organisation, digits, *control),
            Self::Invalid => Err(IdentifierError::Unrecognised(canonical.to_owned())),
        }
    }
}

/// Expected DNI/NIE control letter for `number`.
///
/// # Examples
/// ```
/// use backend::domain::identifier::dni_control_letter;
///
/// assert_eq!(dni_control_letter(12_345_678), b'Z');
/// ```
pub fn dni_control_letter(number: u32) -> u8 {
    CONTROL_LETTERS[(number % 23) as usize]
}

/// CIF end digit computed from the seven central digits.
///
/// Digits at odd positions are summed as-is; digits at even positions are
/// doubled and the digits of the product summed.
pub fn cif_end_digit(digits: &[u8; 7]) -> u8 {
    let odd: u32 = digits.iter().skip(1).step_by(2).map(|d| u32::from(*d)).sum();
    let even: u32 = digits
        .iter()
        .step_by(2)
        .map(|d| {
            let doubled = u32::from(*d) * 2;
            doubled / 10 + doubled % 10
        })
        .sum();
    ((10 - (odd + even) % 10) % 10) as u8
}

fn verify_cif(organisation: u8, digits: &[u8; 7], control: u8) -> Result<(), IdentifierError> {
    let end = cif_end_digit(digits);
    let matches = if CIF_LETTER_CONTROLLED.contains(&organisation) {
        CIF_CONTROL_LETTERS[usize::from(end)] == control
    } else {
        control.is_ascii_digit() && control - b'0' == end
    };
    if matches {
        Ok(())
    } else {
        Err(IdentifierError::Cif)
    }
}

/// Validate a DNI, NIE or CIF.
///
/// An empty string means "not provided" and is accepted.
///
/// # Examples
/// ```
/// use backend::domain::{IdentifierError, validate_identifier};
///
/// assert!(validate_identifier("12345678Z").is_ok());
/// assert_eq!(validate_identifier("12345678A"), Err(IdentifierError::Dni));
/// assert!(validate_identifier("").is_ok());
/// ```
pub fn validate_identifier(raw: &str) -> Result<(), IdentifierError> {
    if raw.is_empty() {
        return Ok(());
    }
    let canonical = raw.to_uppercase();
    IdentifierKind::classify(&canonical).verify(&canonical)
}

/// Validated client identifier.
///
/// Stored lowercase (the repository key) and displayed uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientId(String);

impl ClientId {
    /// Validate and canonicalise a client identifier.
    ///
    /// Unlike [`validate_identifier`], an empty identifier is rejected.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, IdentifierError> {
        let raw = raw.as_ref();
        if raw.is_empty() {
            return Err(IdentifierError::Missing);
        }
        validate_identifier(raw)?;
        Ok(Self(raw.to_lowercase()))
    }

    /// Lowercase storage key.
    pub fn as_key(&self) -> &str {
        self.0.as_str()
    }

    /// Uppercase display form.
    pub fn display_form(&self) -> String {
        self.0.to_uppercase()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_form())
    }
}

impl From<ClientId> for String {
    fn from(value: ClientId) -> Self {
        value.display_form()
    }
}

impl TryFrom<String> for ClientId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
