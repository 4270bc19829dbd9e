use dbus::arg::{Arg, ArgType, Get, Iter};
use dbus::Message;

use crate::error::StreamError;
use crate::protocol::{PropertyStream, ValueType};

const PROPERTIES_SIGNATURE: &str = "a{sv}";

/// [`PropertyStream`] over the body of a `GetAll` reply message.
///
/// Borrows the message; whoever owns the reply releases it when it goes out
/// of scope.
pub struct DbusReply<'a> {
    root: Iter<'a>,
    array: Option<Iter<'a>>,
    entry: Option<Iter<'a>>,
}

impl<'a> DbusReply<'a> {
    pub fn new(msg: &'a Message) -> Self {
        Self {
            root: msg.iter_init(),
            array: None,
            entry: None,
        }
    }

    fn entry(&mut self) -> Result<&mut Iter<'a>, StreamError> {
        self.entry
            .as_mut()
            .ok_or_else(|| StreamError::new("not inside a dictionary entry"))
    }

    fn read_variant<T>(&mut self) -> Result<T, StreamError>
    where
        T: Arg + Get<'a>,
    {
        let entry = self.entry()?;
        let mut inner = entry
            .recurse(ArgType::Variant)
            .ok_or_else(|| StreamError::new("expected variant"))?;
        let value = inner
            .read::<T>()
            .map_err(|e| StreamError::new(e.to_string()))?;
        entry.next();
        Ok(value)
    }
}

impl<'a> PropertyStream for DbusReply<'a> {
    fn open_properties(&mut self) -> Result<(), StreamError> {
        let arg_type = self.root.arg_type();
        let signature = match arg_type {
            ArgType::Invalid => String::new(),
            _ => self.root.signature().to_string(),
        };
        if arg_type != ArgType::Array || signature != PROPERTIES_SIGNATURE {
            return Err(StreamError::new(format!(
                "expected {}, found '{}'",
                PROPERTIES_SIGNATURE, signature
            )));
        }
        self.array = self.root.recurse(ArgType::Array);
        self.array
            .as_ref()
            .map(|_| ())
            .ok_or_else(|| StreamError::new("cannot enter properties array"))
    }

    fn next_entry(&mut self) -> Result<bool, StreamError> {
        let array = self
            .array
            .as_mut()
            .ok_or_else(|| StreamError::new("properties array not open"))?;
        match array.arg_type() {
            ArgType::DictEntry => {
                let entry = array
                    .recurse(ArgType::DictEntry)
                    .ok_or_else(|| StreamError::new("cannot enter dictionary entry"))?;
                array.next();
                self.entry = Some(entry);
                Ok(true)
            }
            ArgType::Invalid => Ok(false),
            other => Err(StreamError::new(format!(
                "expected dictionary entry, found {:?}",
                other
            ))),
        }
    }

    fn read_name(&mut self) -> Result<String, StreamError> {
        let entry = self.entry()?;
        entry
            .read::<&str>()
            .map(str::to_string)
            .map_err(|e| StreamError::new(e.to_string()))
    }

    fn peek_value_type(&mut self) -> Result<ValueType, StreamError> {
        let entry = self.entry()?;
        let mut inner = entry
            .recurse(ArgType::Variant)
            .ok_or_else(|| StreamError::new("expected variant"))?;
        Ok(ValueType::from_signature(&inner.signature()))
    }

    fn read_f64(&mut self) -> Result<f64, StreamError> {
        self.read_variant::<f64>()
    }

    fn read_i64(&mut self) -> Result<i64, StreamError> {
        self.read_variant::<i64>()
    }

    fn read_bool(&mut self) -> Result<bool, StreamError> {
        self.read_variant::<bool>()
    }

    fn skip_value(&mut self) -> Result<(), StreamError> {
        let entry = self.entry()?;
        if entry.arg_type() != ArgType::Variant {
            return Err(StreamError::new("expected variant"));
        }
        entry.next();
        Ok(())
    }

    fn close_entry(&mut self) -> Result<(), StreamError> {
        let mut entry = self
            .entry
            .take()
            .ok_or_else(|| StreamError::new("not inside a dictionary entry"))?;
        if entry.arg_type() != ArgType::Invalid {
            return Err(StreamError::new("unread data in dictionary entry"));
        }
        Ok(())
    }

    fn close_properties(&mut self) {
        self.entry = None;
        self.array = None;
    }
}
