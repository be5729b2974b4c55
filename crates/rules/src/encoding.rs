//! Value list encoding for `in:` / `not_in:` rules
//!
//! Values may themselves contain commas or quotes, so every value is wrapped
//! in double quotes with inner quotes doubled (RFC 4180 style) before the
//! list is joined with `,`.
//!
//! Enum-like values opt in through [`HasSymbolicName`] (unit enums) and
//! [`HasScalarValue`] (enums backed by a scalar). The encoder never inspects
//! types at runtime; it dispatches over the closed [`ListValue`] set.
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldrule::encoding::{encode, ListValue};
//!
//! let encoded = encode(["Life, the Universe and Everything", "this is a \"quote\""]);
//! assert_eq!(encoded, r#""Life, the Universe and Everything","this is a ""quote""""#);
//! ```

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// CAPABILITIES
// ============================================================================

/// An enum-like value identified by its variant name.
pub trait HasSymbolicName {
    /// The variant name, e.g. `"One"`.
    fn symbolic_name(&self) -> Cow<'_, str>;
}

/// An enum-like value backed by a scalar.
///
/// The scalar wins over the symbolic name when encoding.
pub trait HasScalarValue: HasSymbolicName {
    /// The backing scalar.
    fn scalar_value(&self) -> Scalar;
}

// ============================================================================
// VALUES
// ============================================================================

/// A primitive list element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Scalar {
    /// Boolean; renders `1` for true and an empty string for false.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer too large for `i64`.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Text.
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("1"),
            Self::Bool(false) => Ok(()),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// One element of an `in:` / `not_in:` list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListValue {
    /// A plain primitive.
    Scalar(Scalar),
    /// A scalar-backed enum variant; encodes as its value.
    Backed {
        /// Variant name, kept for diagnostics.
        name: String,
        /// Backing scalar.
        value: Scalar,
    },
    /// A unit enum variant; encodes as its name.
    Unit {
        /// Variant name.
        name: String,
    },
}

impl ListValue {
    /// Wraps a scalar-backed enum variant.
    pub fn backed<E: HasScalarValue + ?Sized>(value: &E) -> Self {
        Self::Backed {
            name: value.symbolic_name().into_owned(),
            value: value.scalar_value(),
        }
    }

    /// Wraps a unit enum variant.
    pub fn unit<E: HasSymbolicName + ?Sized>(value: &E) -> Self {
        Self::Unit {
            name: value.symbolic_name().into_owned(),
        }
    }

    /// The string this element contributes to the list, before quoting.
    #[must_use]
    pub fn resolve(&self) -> Cow<'_, str> {
        match self {
            Self::Scalar(Scalar::Str(s)) | Self::Backed { value: Scalar::Str(s), .. } => {
                Cow::Borrowed(s)
            }
            Self::Scalar(scalar) | Self::Backed { value: scalar, .. } => {
                Cow::Owned(scalar.to_string())
            }
            Self::Unit { name } => Cow::Borrowed(name),
        }
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident as $target:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }

            impl From<$ty> for ListValue {
                fn from(value: $ty) -> Self {
                    Self::Scalar(Scalar::from(value))
                }
            }
        )+
    };
}

scalar_from! {
    bool => Bool as bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => Int as i64,
    u16 => Int as i64,
    u32 => Int as i64,
    u64 => UInt as u64,
    f32 => Float as f64,
    f64 => Float as f64,
    String => Str as String,
    &str => Str as String,
    &String => Str as String,
    char => Str as String,
}

impl From<Scalar> for ListValue {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<&ListValue> for ListValue {
    fn from(value: &ListValue) -> Self {
        value.clone()
    }
}

// ============================================================================
// ENCODER
// ============================================================================

/// Quotes one value: wraps it in `"` and doubles every inner `"`.
#[must_use]
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Encodes values as a comma-joined list of quoted strings.
///
/// Order is preserved; nothing is sorted or de-duplicated.
pub fn encode<I>(values: I) -> String
where
    I: IntoIterator,
    I::Item: Into<ListValue>,
{
    values
        .into_iter()
        .map(|value| quote(&value.into().resolve()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Encodes a single value; the one-element form of [`encode`].
pub fn encode_one(value: impl Into<ListValue>) -> String {
    quote(&value.into().resolve())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    enum TestEnum {
        One,
        Two,
    }

    impl HasSymbolicName for TestEnum {
        fn symbolic_name(&self) -> Cow<'_, str> {
            match self {
                Self::One => Cow::Borrowed("One"),
                Self::Two => Cow::Borrowed("Two"),
            }
        }
    }

    impl HasScalarValue for TestEnum {
        fn scalar_value(&self) -> Scalar {
            match self {
                Self::One => Scalar::Int(1),
                Self::Two => Scalar::Int(2),
            }
        }
    }

    enum UnitEnum {
        #[allow(dead_code)]
        Zero,
        One,
    }

    impl HasSymbolicName for UnitEnum {
        fn symbolic_name(&self) -> Cow<'_, str> {
            match self {
                Self::Zero => Cow::Borrowed("zero"),
                Self::One => Cow::Borrowed("one"),
            }
        }
    }

    #[test]
    fn test_quotes_commas_and_quotes() {
        assert_eq!(
            encode(["Life, the Universe and Everything", "this is a \"quote\""]),
            r#""Life, the Universe and Everything","this is a ""quote""""#
        );
    }

    #[test]
    fn test_newlines_stay_inside_quotes() {
        assert_eq!(encode(["a,b\nc,d"]), "\"a,b\nc,d\"");
    }

    #[test]
    fn test_integers_are_stringified() {
        assert_eq!(encode([1, 2, 3, 4]), r#""1","2","3","4""#);
    }

    #[test]
    fn test_enum_like_values() {
        let values = vec![
            ListValue::backed(&TestEnum::One),
            ListValue::backed(&TestEnum::Two),
            ListValue::unit(&UnitEnum::One),
        ];
        assert_eq!(encode(values), r#""1","2","one""#);
    }

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(encode_one(true), r#""1""#);
        assert_eq!(encode_one(false), r#""""#);
        assert_eq!(encode_one(1.5), r#""1.5""#);
        assert_eq!(encode_one(u64::MAX), format!("\"{}\"", u64::MAX));
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        assert_eq!(encode(["b", "a", "b"]), r#""b","a","b""#);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(encode(Vec::<&str>::new()), "");
    }
}
