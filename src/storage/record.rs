//! Record file entry format
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, includes itself and the checksum)
//! +------------------+
//! | Document ID      | (length-prefixed string)
//! +------------------+
//! | Tombstone Flag   | (u8: 0 = live, 1 = deleted)
//! +------------------+
//! | Document Body    | (length-prefixed bytes, empty for tombstones)
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! ```
//!
//! The checksum covers every byte before it.

use std::io::{self, Read};

use super::checksum::compute_checksum;

/// Smallest possible record: length + empty id + flag + empty body + checksum
pub(crate) const MIN_RECORD_SIZE: usize = 4 + 4 + 1 + 4 + 4;

/// One entry of the record file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    /// Document primary key
    pub document_id: String,
    /// Whether this entry deletes the document
    pub is_tombstone: bool,
    /// Serialized document (empty for tombstones)
    pub document_body: Vec<u8>,
}

impl DocumentRecord {
    /// A live document write
    pub fn live(document_id: impl Into<String>, document_body: Vec<u8>) -> Self {
        Self {
            document_id: document_id.into(),
            is_tombstone: false,
            document_body,
        }
    }

    /// A delete marker
    pub fn tombstone(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            is_tombstone: true,
            document_body: Vec::new(),
        }
    }

    fn serialize_body(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(9 + self.document_id.len() + self.document_body.len());

        buf.extend_from_slice(&(self.document_id.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.document_id.as_bytes());

        buf.push(u8::from(self.is_tombstone));

        buf.extend_from_slice(&(self.document_body.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.document_body);

        buf
    }

    /// Serialize the complete record, length prefix and checksum included.
    pub fn serialize(&self) -> Vec<u8> {
        let body = self.serialize_body();
        let record_length = (4 + body.len() + 4) as u32;

        let mut record = Vec::with_capacity(record_length as usize);
        record.extend_from_slice(&record_length.to_le_bytes());
        record.extend_from_slice(&body);

        let checksum = compute_checksum(&record);
        record.extend_from_slice(&checksum.to_le_bytes());

        record
    }

    /// Deserialize a record from the front of `data`, verifying its checksum.
    ///
    /// Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Record too short",
            ));
        }

        let record_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if record_length < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid record length: {}", record_length),
            ));
        }

        if data.len() < record_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Record truncated: expected {} bytes, got {}",
                    record_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = record_length - 4;
        let stored_checksum = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);
        let computed_checksum = compute_checksum(&data[..checksum_offset]);

        if computed_checksum != stored_checksum {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Checksum mismatch: computed {:08x}, stored {:08x}",
                    computed_checksum, stored_checksum
                ),
            ));
        }

        let mut cursor = io::Cursor::new(&data[4..checksum_offset]);

        let id_bytes = read_prefixed(&mut cursor)?;
        let document_id = String::from_utf8(id_bytes).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {}", e))
        })?;

        let mut flag = [0u8; 1];
        cursor.read_exact(&mut flag)?;

        let document_body = read_prefixed(&mut cursor)?;

        Ok((
            Self {
                document_id,
                is_tombstone: flag[0] != 0,
                document_body,
            },
            record_length,
        ))
    }
}

fn read_prefixed<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as usize;

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}
