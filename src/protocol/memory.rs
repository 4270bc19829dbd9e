//! Scripted in-memory reply used to drive the decoder in tests.

use super::{PropertyStream, ValueType};
use crate::error::StreamError;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Double(f64),
    Int64(i64),
    Bool(bool),
    Uint32(u32),
    Str(String),
    Strings(Vec<String>),
}

impl Value {
    fn signature(&self) -> &'static str {
        match self {
            Value::Double(_) => "d",
            Value::Int64(_) => "x",
            Value::Bool(_) => "b",
            Value::Uint32(_) => "u",
            Value::Str(_) => "s",
            Value::Strings(_) => "as",
        }
    }
}

#[derive(Debug)]
struct Cursor {
    index: usize,
    name_read: bool,
    value_read: bool,
}

#[derive(Debug, Default)]
pub struct MemoryReply {
    entries: Vec<(String, Value)>,
    malformed: bool,
    trailing_data_at: Option<usize>,
    next: usize,
    open: bool,
    current: Option<Cursor>,
    pub close_count: usize,
}

impl MemoryReply {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            ..Default::default()
        }
    }

    /// A reply whose body is not `a{sv}`.
    pub fn malformed() -> Self {
        Self {
            malformed: true,
            ..Default::default()
        }
    }

    /// Make the entry at `index` report unread data when closed.
    pub fn with_trailing_data_at(mut self, index: usize) -> Self {
        self.trailing_data_at = Some(index);
        self
    }

    fn cursor(&mut self) -> Result<&mut Cursor, StreamError> {
        self.current
            .as_mut()
            .ok_or_else(|| StreamError::new("not inside a dictionary entry"))
    }

    fn take_value(&mut self) -> Result<Value, StreamError> {
        let cursor = self.cursor()?;
        if !cursor.name_read || cursor.value_read {
            return Err(StreamError::new("no variant at cursor"));
        }
        cursor.value_read = true;
        let index = cursor.index;
        Ok(self.entries[index].1.clone())
    }
}

impl PropertyStream for MemoryReply {
    fn open_properties(&mut self) -> Result<(), StreamError> {
        if self.malformed {
            return Err(StreamError::new("expected a{sv}, found s"));
        }
        self.open = true;
        Ok(())
    }

    fn next_entry(&mut self) -> Result<bool, StreamError> {
        if !self.open {
            return Err(StreamError::new("properties array not open"));
        }
        if self.next >= self.entries.len() {
            return Ok(false);
        }
        self.current = Some(Cursor {
            index: self.next,
            name_read: false,
            value_read: false,
        });
        self.next += 1;
        Ok(true)
    }

    fn read_name(&mut self) -> Result<String, StreamError> {
        let cursor = self.cursor()?;
        if cursor.name_read {
            return Err(StreamError::new("name already read"));
        }
        cursor.name_read = true;
        let index = cursor.index;
        Ok(self.entries[index].0.clone())
    }

    fn peek_value_type(&mut self) -> Result<ValueType, StreamError> {
        let cursor = self.cursor()?;
        if !cursor.name_read || cursor.value_read {
            return Err(StreamError::new("no variant at cursor"));
        }
        let index = cursor.index;
        Ok(ValueType::from_signature(self.entries[index].1.signature()))
    }

    fn read_f64(&mut self) -> Result<f64, StreamError> {
        match self.take_value()? {
            Value::Double(d) => Ok(d),
            other => Err(StreamError::new(format!("expected d, found {}", other.signature()))),
        }
    }

    fn read_i64(&mut self) -> Result<i64, StreamError> {
        match self.take_value()? {
            Value::Int64(x) => Ok(x),
            other => Err(StreamError::new(format!("expected x, found {}", other.signature()))),
        }
    }

    fn read_bool(&mut self) -> Result<bool, StreamError> {
        match self.take_value()? {
            Value::Bool(b) => Ok(b),
            other => Err(StreamError::new(format!("expected b, found {}", other.signature()))),
        }
    }

    fn skip_value(&mut self) -> Result<(), StreamError> {
        self.take_value().map(|_| ())
    }

    fn close_entry(&mut self) -> Result<(), StreamError> {
        let cursor = self
            .current
            .take()
            .ok_or_else(|| StreamError::new("not inside a dictionary entry"))?;
        if !cursor.value_read || self.trailing_data_at == Some(cursor.index) {
            return Err(StreamError::new("unread data in dictionary entry"));
        }
        Ok(())
    }

    fn close_properties(&mut self) {
        self.current = None;
        self.open = false;
        self.close_count += 1;
    }
}
