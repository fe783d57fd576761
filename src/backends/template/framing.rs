// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Export/import framing for compiled models.
//!
//! ```text
//! [u64 LE] L1    length of the structure block
//! [L1]           structure block
//! [u64 LE] L2    length of the constants block
//! [L2]           constants block
//! ```
//!
//! No magic, no version tag, no padding and no checksum.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

use crate::errors::{PluginError, PluginResult};
use crate::graph::SerializedModel;

/// Write both blocks, propagating sink failures unchanged.
pub fn write_blob<W: Write + ?Sized>(sink: &mut W, blob: &SerializedModel) -> PluginResult<()> {
    write_block(sink, &blob.structure)?;
    write_block(sink, &blob.constants)?;
    Ok(())
}

/// Read exactly one structure block and one constants block.
///
/// Bytes after the constants block are left unread.
pub fn read_blob<R: Read + ?Sized>(source: &mut R) -> PluginResult<SerializedModel> {
    let structure = read_block(source, "structure")?;
    let constants = read_block(source, "constants")?;
    Ok(SerializedModel {
        structure,
        constants,
    })
}

fn write_block<W: Write + ?Sized>(sink: &mut W, block: &[u8]) -> io::Result<()> {
    sink.write_u64::<LittleEndian>(block.len() as u64)?;
    sink.write_all(block)
}

fn read_block<R: Read + ?Sized>(source: &mut R, which: &str) -> PluginResult<Vec<u8>> {
    let declared = source.read_u64::<LittleEndian>().map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            PluginError::MalformedStream(format!("missing {} block length", which))
        } else {
            PluginError::Io(e)
        }
    })?;

    // The length is untrusted; let the reader grow the buffer as data arrives.
    let mut block = Vec::new();
    (&mut *source).take(declared).read_to_end(&mut block)?;

    if block.len() as u64 != declared {
        return Err(PluginError::MalformedStream(format!(
            "{} block declares {} bytes but only {} are present",
            which,
            declared,
            block.len()
        )));
    }
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn blob() -> SerializedModel {
        SerializedModel {
            structure: b"{\"nodes\":[]}".to_vec(),
            constants: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_layout_is_length_prefixed_little_endian() {
        let mut stream = Vec::new();
        write_blob(&mut stream, &blob()).unwrap();

        let structure_len = blob().structure.len();
        assert_eq!(&stream[..8], &(structure_len as u64).to_le_bytes());
        assert_eq!(&stream[8..8 + structure_len], blob().structure.as_slice());
        let rest = &stream[8 + structure_len..];
        assert_eq!(&rest[..8], &3u64.to_le_bytes());
        assert_eq!(&rest[8..], &[1, 2, 3]);
        assert_eq!(stream.len(), 8 + structure_len + 8 + 3);
    }

    #[test]
    fn test_read_returns_identical_blocks() {
        let mut stream = Vec::new();
        write_blob(&mut stream, &blob()).unwrap();

        let decoded = read_blob(&mut Cursor::new(stream)).unwrap();
        assert_eq!(decoded, blob());
    }

    #[test]
    fn test_empty_blocks() {
        let empty = SerializedModel::default();
        let mut stream = Vec::new();
        write_blob(&mut stream, &empty).unwrap();

        assert_eq!(stream, vec![0u8; 16]);
        assert_eq!(read_blob(&mut Cursor::new(stream)).unwrap(), empty);
    }

    #[test]
    fn test_trailing_bytes_left_unread() {
        let mut stream = Vec::new();
        write_blob(&mut stream, &blob()).unwrap();
        stream.extend_from_slice(b"next");

        let mut cursor = Cursor::new(stream);
        read_blob(&mut cursor).unwrap();

        let mut rest = Vec::new();
        cursor.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"next");
    }

    #[test]
    fn test_truncated_stream_is_malformed() {
        let mut stream = Vec::new();
        write_blob(&mut stream, &blob()).unwrap();
        stream.truncate(stream.len() - 1);

        let result = read_blob(&mut Cursor::new(stream));
        assert!(matches!(result, Err(PluginError::MalformedStream(_))));
    }

    #[test]
    fn test_huge_declared_length_does_not_preallocate() {
        let mut stream = u64::MAX.to_le_bytes().to_vec();
        stream.extend_from_slice(b"tiny");

        let result = read_blob(&mut Cursor::new(stream));
        assert!(matches!(result, Err(PluginError::MalformedStream(_))));
    }

    #[test]
    fn test_missing_constants_length() {
        let mut stream = Vec::new();
        write_block(&mut stream, b"abc").unwrap();

        let result = read_blob(&mut Cursor::new(stream));
        assert!(matches!(
            result,
            Err(PluginError::MalformedStream(msg)) if msg.contains("constants")
        ));
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_errors_propagate_unchanged() {
        let result = write_blob(&mut BrokenSink, &blob());
        assert!(matches!(result, Err(PluginError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe));
    }
}
