use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use derive_new::new;
use sha1::{Digest, Sha1};
use std::io::{BufRead, Cursor};

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

/// An object body as read from the database, loose or packed
#[derive(Debug, Clone, new)]
pub struct RawObject {
    pub object_type: ObjectType,
    pub data: Bytes,
}

impl RawObject {
    /// Hash the object the way git names it: `sha1("<type> <size>\0" + data)`
    pub fn object_id(&self) -> Result<ObjectId> {
        let mut hasher = Sha1::new();
        hasher.update(format!("{} {}\0", self.object_type.as_str(), self.data.len()));
        hasher.update(&self.data);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }

    pub fn reader(&self) -> impl BufRead + '_ {
        Cursor::new(self.data.as_ref())
    }

    pub fn unpack<T: Unpackable>(&self) -> Result<T> {
        T::deserialize(self.reader())
    }
}
