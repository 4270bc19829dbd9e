use crate::error::StreamError;

#[cfg(test)]
pub(crate) mod memory;

/// Wire type of a property value, taken from the single-character
/// signature carried inside its variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    /// `d`, IEEE-754 double.
    Double,
    /// `x`, signed 64-bit integer.
    Int64,
    /// `b`, boolean.
    Boolean,
    /// Any other signature, kept verbatim for diagnostics.
    Other(String),
}

impl ValueType {
    pub fn from_signature(signature: &str) -> Self {
        match signature {
            "d" => ValueType::Double,
            "x" => ValueType::Int64,
            "b" => ValueType::Boolean,
            other => ValueType::Other(other.to_string()),
        }
    }

    pub fn signature(&self) -> &str {
        match self {
            ValueType::Double => "d",
            ValueType::Int64 => "x",
            ValueType::Boolean => "b",
            ValueType::Other(sig) => sig,
        }
    }
}

/// Cursor over a `GetAll` reply, shaped `a{sv}`.
///
/// The calls mirror the walk over the message: open the outer array, then
/// for each entry read the name and exactly one of the value accessors (or
/// `skip_value`), then close the entry. The value accessors consume the
/// variant; `peek_value_type` does not.
pub trait PropertyStream {
    /// Enter the outer array. Fails if the reply is not an array of
    /// string/variant dictionary entries.
    fn open_properties(&mut self) -> Result<(), StreamError>;

    /// Enter the next dictionary entry. `Ok(false)` once the array is
    /// exhausted.
    fn next_entry(&mut self) -> Result<bool, StreamError>;

    fn read_name(&mut self) -> Result<String, StreamError>;

    fn peek_value_type(&mut self) -> Result<ValueType, StreamError>;

    fn read_f64(&mut self) -> Result<f64, StreamError>;

    fn read_i64(&mut self) -> Result<i64, StreamError>;

    fn read_bool(&mut self) -> Result<bool, StreamError>;

    /// Step over the current value without interpreting it.
    fn skip_value(&mut self) -> Result<(), StreamError>;

    /// Leave the current entry. Fails if the entry still holds unread data.
    fn close_entry(&mut self) -> Result<(), StreamError>;

    /// Leave the outer array. Always succeeds, whatever state the walk was
    /// abandoned in.
    fn close_properties(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_from_signature() {
        assert_eq!(ValueType::from_signature("d"), ValueType::Double);
        assert_eq!(ValueType::from_signature("x"), ValueType::Int64);
        assert_eq!(ValueType::from_signature("b"), ValueType::Boolean);
        assert_eq!(ValueType::from_signature("u"), ValueType::Other("u".into()));
        assert_eq!(ValueType::from_signature("as"), ValueType::Other("as".into()));
    }

    #[test]
    fn test_value_type_signature() {
        assert_eq!(ValueType::Double.signature(), "d");
        assert_eq!(ValueType::Int64.signature(), "x");
        assert_eq!(ValueType::Other("a{sv}".into()).signature(), "a{sv}");
    }
}
