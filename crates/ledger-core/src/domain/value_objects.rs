//! # Value Objects
//!
//! Immutable domain primitives for the token ledger. These types are
//! defined by their value, not identity, and are validated at
//! construction so the rest of the core can rely on well-formedness.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::LedgerError;

/// Maximum length of a symbol code, in characters.
pub const MAX_SYMBOL_LEN: usize = 7;

/// Maximum decimal precision of a symbol.
pub const MAX_PRECISION: u8 = 18;

/// Maximum length of an account name, in characters.
pub const MAX_ACCOUNT_LEN: usize = 12;

/// Largest representable amount magnitude: the signed 62-bit range
/// conventionally used for on-chain token quantities.
pub const MAX_AMOUNT: i64 = (1 << 62) - 1;

// =============================================================================
// SYMBOL CODE
// =============================================================================

/// A currency code: 1-7 uppercase ASCII letters.
///
/// Supply records are keyed by `SymbolCode` alone; the precision lives on
/// [`Symbol`] and is checked separately wherever exact-symbol equality is
/// required.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolCode(String);

impl SymbolCode {
    /// Creates a symbol code, rejecting anything outside `[A-Z]{1,7}`.
    pub fn new(code: &str) -> Result<Self, LedgerError> {
        if code.is_empty()
            || code.len() > MAX_SYMBOL_LEN
            || !code.bytes().all(|b| b.is_ascii_uppercase())
        {
            return Err(LedgerError::InvalidSymbol(code.to_string()));
        }
        Ok(Self(code.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolCode({})", self.0)
    }
}

impl FromStr for SymbolCode {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// =============================================================================
// SYMBOL
// =============================================================================

/// A token symbol: currency code plus decimal precision.
///
/// Two symbols are equal only if both code and precision match. A symbol
/// is immutable once a supply record exists for its code.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    code: SymbolCode,
    precision: u8,
}

impl Symbol {
    /// Creates a symbol. Precision is limited to [`MAX_PRECISION`] digits.
    pub fn new(code: SymbolCode, precision: u8) -> Result<Self, LedgerError> {
        if precision > MAX_PRECISION {
            return Err(LedgerError::InvalidSymbol(format!(
                "{precision},{code}"
            )));
        }
        Ok(Self { code, precision })
    }

    /// Convenience constructor from a string code.
    pub fn parse(code: &str, precision: u8) -> Result<Self, LedgerError> {
        Self::new(SymbolCode::new(code)?, precision)
    }

    #[must_use]
    pub fn code(&self) -> &SymbolCode {
        &self.code
    }

    #[must_use]
    pub fn precision(&self) -> u8 {
        self.precision
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({},{})", self.precision, self.code)
    }
}

// =============================================================================
// ACCOUNT NAME
// =============================================================================

/// A chain-style account identity: 1-12 characters from `a-z`, `1-5`, `.`.
///
/// Only the pass/fail outcome of authenticating a name is consumed by the
/// core; identity mechanics belong to the host.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountName(String);

impl AccountName {
    pub fn new(name: &str) -> Result<Self, LedgerError> {
        let valid_char = |b: u8| b.is_ascii_lowercase() || (b'1'..=b'5').contains(&b) || b == b'.';
        if name.is_empty() || name.len() > MAX_ACCOUNT_LEN || !name.bytes().all(valid_char) {
            return Err(LedgerError::InvalidAccountName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountName({})", self.0)
    }
}

impl FromStr for AccountName {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// =============================================================================
// AMOUNT
// =============================================================================

/// A signed fixed-point token quantity tagged with its [`Symbol`].
///
/// The raw `amount` is scaled by `10^precision`; `1.0000 TKN` is stored as
/// `10_000`. Arithmetic between two amounts requires identical symbols and
/// is always checked: overflow past the 62-bit range is an error, never a
/// silent wrap.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// Raw quantity in base units of `symbol.precision()`.
    pub amount: i64,
    /// The asset this quantity denominates.
    pub symbol: Symbol,
}

impl Amount {
    /// Creates an amount, rejecting magnitudes outside the 62-bit range.
    pub fn new(amount: i64, symbol: Symbol) -> Result<Self, LedgerError> {
        let value = Self { amount, symbol };
        value.validate()?;
        Ok(value)
    }

    /// A zero quantity of the given symbol.
    #[must_use]
    pub fn zero(symbol: Symbol) -> Self {
        Self { amount: 0, symbol }
    }

    /// Range check. Constructed amounts always pass; amounts arriving via
    /// deserialization are re-checked at the operation boundary.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.amount.unsigned_abs() > MAX_AMOUNT as u64 {
            return Err(LedgerError::AmountOverflow);
        }
        Ok(())
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    /// Fails unless `other` carries exactly this symbol (code and
    /// precision).
    pub fn require_same_symbol(&self, other: &Amount) -> Result<(), LedgerError> {
        if self.symbol != other.symbol {
            return Err(LedgerError::SymbolMismatch {
                expected: self.symbol.clone(),
                actual: other.symbol.clone(),
            });
        }
        Ok(())
    }

    /// Checked addition: same symbol required, result must stay in range.
    pub fn checked_add(&self, other: &Amount) -> Result<Amount, LedgerError> {
        self.require_same_symbol(other)?;
        let sum = self
            .amount
            .checked_add(other.amount)
            .ok_or(LedgerError::AmountOverflow)?;
        Amount::new(sum, self.symbol.clone())
    }

    /// Checked subtraction: same symbol required, result must stay in range.
    pub fn checked_sub(&self, other: &Amount) -> Result<Amount, LedgerError> {
        self.require_same_symbol(other)?;
        let diff = self
            .amount
            .checked_sub(other.amount)
            .ok_or(LedgerError::AmountOverflow)?;
        Amount::new(diff, self.symbol.clone())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.symbol.precision() as u32;
        let scale = 10_u64.pow(precision);
        let magnitude = self.amount.unsigned_abs();
        if self.amount < 0 {
            write!(f, "-")?;
        }
        if precision == 0 {
            write!(f, "{magnitude} {}", self.symbol.code())
        } else {
            write!(
                f,
                "{}.{:0width$} {}",
                magnitude / scale,
                magnitude % scale,
                self.symbol.code(),
                width = precision as usize
            )
        }
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({self})")
    }
}

impl FromStr for Amount {
    type Err = LedgerError;

    /// Parses the textual form `"100.0000 TKN"`. Precision is inferred
    /// from the number of fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidAmount(s.to_string());
        let mut parts = s.split_whitespace();
        let number = parts.next().ok_or_else(invalid)?;
        let code = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        let (negative, digits) = match number.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, number),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, frac)) => (i, frac),
            None => (digits, ""),
        };
        if int_part.is_empty()
            || !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
            || frac_part.len() > MAX_PRECISION as usize
        {
            return Err(invalid());
        }

        let symbol = Symbol::parse(code, frac_part.len() as u8)?;
        let mut value: i64 = 0;
        for b in int_part.bytes().chain(frac_part.bytes()) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(b - b'0')))
                .ok_or(LedgerError::AmountOverflow)?;
        }
        Amount::new(if negative { -value } else { value }, symbol)
    }
}
