use dbus::blocking::Connection;
use dbus::strings::{BusName, Path};
use dbus::Message;
use log::{debug, info};
use std::time::Duration;

use crate::client::reply::DbusReply;
use crate::decoder;
use crate::error::{ConnectionError, QueryError};
use crate::models::{SensorDescriptor, SensorRecord};
use crate::query::SensorBus;

pub const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";
pub const GET_ALL_METHOD: &str = "GetAll";

/// Blocking connection to the system message bus.
pub struct SystemBus {
    conn: Connection,
    timeout: Duration,
}

impl SystemBus {
    pub fn connect(timeout: Duration) -> Result<Self, ConnectionError> {
        let conn = Connection::new_system()?;
        info!("Connected to system bus");
        Ok(Self { conn, timeout })
    }

    /// Issue `GetAll("")` against the sensor object and wait for the reply.
    pub fn get_all(&self, desc: &SensorDescriptor) -> Result<Message, QueryError> {
        let call = get_all_call(desc)?;
        debug!("GetAll {} on {}", desc.object, desc.service);
        self.conn
            .channel()
            .send_with_reply_and_block(call, self.timeout)
            .map_err(|source| QueryError::Call {
                object: desc.object.clone(),
                source,
            })
    }
}

impl SensorBus for SystemBus {
    fn read_sensor(&self, desc: &SensorDescriptor) -> Result<SensorRecord, QueryError> {
        let reply = self.get_all(desc)?;
        let mut stream = DbusReply::new(&reply);
        let record = decoder::decode(&mut stream, &desc.object)?;
        Ok(record)
    }
}

/// Build the method call for fetching every property of `desc`, with an
/// empty interface filter.
pub fn get_all_call(desc: &SensorDescriptor) -> Result<Message, QueryError> {
    let invalid = |reason: String| QueryError::InvalidDescriptor {
        object: desc.object.clone(),
        reason,
    };

    let service = BusName::new(desc.service.as_str()).map_err(invalid)?;
    let path = Path::new(desc.object.as_str()).map_err(invalid)?;
    let call = Message::new_method_call(service, path, PROPERTIES_INTERFACE, GET_ALL_METHOD)
        .map_err(invalid)?;

    Ok(call.append1(""))
}
