//! Assets: a signed amount paired with a precision + symbol code.
//!
//! The 16-byte wire layout is fixed: 8-byte little-endian signed
//! amount, 1-byte decimal precision, 7-byte NUL-padded symbol text.
//! The textual form is `"<amount>.<precision-digits> <CODE>"` — the
//! precision is implied by the number of digits after the dot.

use std::fmt;
use std::str::FromStr;

use chainwire_codec::{CodecError, Decoder, Encoder, WireDecode, WireEncode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Width of the padded symbol-code field on the wire.
const SYMBOL_CODE_LEN: usize = 7;

/// Writes `s` left-justified into a `width`-byte field, NUL-padded.
pub(crate) fn push_padded(
    enc: &mut Encoder,
    s: &str,
    width: usize,
) -> Result<(), CodecError> {
    let bytes = s.as_bytes();
    if bytes.len() > width {
        return Err(CodecError::InvalidFormat(format!(
            "\"{s}\" does not fit in a {width}-byte field"
        )));
    }
    enc.push_raw(bytes);
    for _ in bytes.len()..width {
        enc.push_u8(0);
    }
    Ok(())
}

/// Reads a `width`-byte field and trims the trailing NUL padding.
pub(crate) fn read_padded(
    dec: &mut Decoder<'_>,
    width: usize,
) -> Result<String, CodecError> {
    let raw = dec.read_exact(width)?;
    let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8(raw[..end].to_vec()).map_err(CodecError::InvalidUtf8)
}

// ---------------------------------------------------------------------------
// Symbol
// ---------------------------------------------------------------------------

/// A currency symbol: decimal precision plus a short uppercase code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Symbol {
    /// Number of decimal places carried by amounts in this symbol.
    pub precision: u8,
    /// The symbol text, at most 7 characters.
    pub code: String,
}

impl Symbol {
    /// The chain's native 4-decimal `EOS` symbol.
    pub fn eos() -> Self {
        Symbol {
            precision: 4,
            code: "EOS".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// A quantity of some currency.
///
/// `amount` is the integral count of the smallest unit: `1000.0000 EOS`
/// is stored as `10_000_000` with precision 4.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Asset {
    /// Amount in smallest units.
    pub amount: i64,
    /// Precision and code of the currency.
    pub symbol: Symbol,
}

impl Asset {
    /// Builds an EOS asset from an amount in 1/10000ths.
    pub fn eos(amount: i64) -> Self {
        Asset {
            amount,
            symbol: Symbol::eos(),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let digits = self.amount.unsigned_abs().to_string();
        let precision = usize::from(self.symbol.precision);
        if precision == 0 {
            return write!(f, "{sign}{digits} {}", self.symbol.code);
        }
        // The dot is placed by splitting the digit string, not by
        // dividing: the precision byte comes off the wire unvalidated
        // and can exceed any power of ten a u64 holds.
        if digits.len() > precision {
            let (int, frac) = digits.split_at(digits.len() - precision);
            write!(f, "{sign}{int}.{frac} {}", self.symbol.code)
        } else {
            write!(
                f,
                "{sign}0.{digits:0>precision$} {}",
                self.symbol.code
            )
        }
    }
}

impl FromStr for Asset {
    type Err = CodecError;

    /// Parses `"1000.0000 EOS"` style strings: the digit count after
    /// the dot becomes the precision (`"42 TST"` has precision 0).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount_str, code) = s.split_once(' ').ok_or_else(|| {
            CodecError::InvalidFormat(format!(
                "invalid asset \"{s}\", expected an amount and a currency symbol"
            ))
        })?;
        if code.is_empty() || code.len() > SYMBOL_CODE_LEN {
            return Err(CodecError::InvalidFormat(format!(
                "currency symbol \"{code}\" must be 1..={SYMBOL_CODE_LEN} characters"
            )));
        }

        let precision = match amount_str.split_once('.') {
            Some((_, frac)) => u8::try_from(frac.len()).map_err(|_| {
                CodecError::InvalidFormat(format!(
                    "asset \"{s}\" has an absurd precision"
                ))
            })?,
            None => 0,
        };

        let digits = amount_str.replacen('.', "", 1);
        let amount = digits.parse::<i64>().map_err(|_| {
            CodecError::InvalidFormat(format!(
                "invalid asset amount \"{amount_str}\""
            ))
        })?;

        Ok(Asset {
            amount,
            symbol: Symbol {
                precision,
                code: code.to_string(),
            },
        })
    }
}

impl WireEncode for Asset {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.push_i64(self.amount);
        enc.push_u8(self.symbol.precision);
        push_padded(enc, &self.symbol.code, SYMBOL_CODE_LEN)
    }
}

impl WireDecode for Asset {
    const FIXED_SIZE: Option<usize> = Some(16);

    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let amount = dec.read_i64()?;
        let precision = dec.read_u8()?;
        let code = read_padded(dec, SYMBOL_CODE_LEN)?;
        Ok(Asset {
            amount,
            symbol: Symbol { precision, code },
        })
    }
}

// JSON carries assets in their textual form, not as a struct.
impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// CurrencyName
// ---------------------------------------------------------------------------

/// A bare currency code travelling as a fixed 7-byte padded field
/// (without the precision byte an [`Asset`] carries).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CurrencyName(pub String);

impl fmt::Display for CurrencyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl WireEncode for CurrencyName {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        push_padded(enc, &self.0, SYMBOL_CODE_LEN)
    }
}

impl WireDecode for CurrencyName {
    const FIXED_SIZE: Option<usize> = Some(SYMBOL_CODE_LEN);

    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(CurrencyName(read_padded(dec, SYMBOL_CODE_LEN)?))
    }
}
