//! On-disk container written by the `huffpack` binary.
//!
//! The coder itself needs only the packed bits, their bit count and the tree.
//! This module fixes one layout for storing all three, little-endian:
//!
//! ```text
//! magic "HUF1" | u64 original_length | u64 bit_count
//! u64 tree_len | tree_data | u64 payload_len | payload
//! ```

use std::io::{self, Cursor, Read};

use crate::error::{HuffmanError, Result};

pub const MAGIC: &[u8; 4] = b"HUF1";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressedData {
    pub original_length: usize,
    pub bit_count: usize,
    /// Output of [`crate::HuffmanTree::serialize`]; empty for empty input.
    pub tree_data: Vec<u8>,
    pub compressed_bits: Vec<u8>,
}

impl CompressedData {
    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(36 + self.tree_data.len() + self.compressed_bits.len());
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&(self.original_length as u64).to_le_bytes());
        bytes.extend_from_slice(&(self.bit_count as u64).to_le_bytes());

        bytes.extend_from_slice(&(self.tree_data.len() as u64).to_le_bytes());
        bytes.extend_from_slice(&self.tree_data);

        bytes.extend_from_slice(&(self.compressed_bits.len() as u64).to_le_bytes());
        bytes.extend_from_slice(&self.compressed_bits);
        bytes
    }

    pub fn deserialize(data: &[u8]) -> Result<CompressedData> {
        let mut cursor = Cursor::new(data);

        let mut magic = [0u8; 4];
        read_exact(&mut cursor, &mut magic, "magic")?;
        if &magic != MAGIC {
            return Err(HuffmanError::InvalidContainer(format!(
                "bad magic {magic:02x?}"
            )));
        }

        let original_length = read_len(&mut cursor, "original length")?;
        let bit_count = read_len(&mut cursor, "bit count")?;
        let tree_data = read_block(&mut cursor, "tree data")?;
        let compressed_bits = read_block(&mut cursor, "payload")?;

        if cursor.position() as usize != data.len() {
            return Err(HuffmanError::InvalidContainer(
                "trailing bytes after payload".to_string(),
            ));
        }
        if compressed_bits.len() != bit_count.div_ceil(8) {
            return Err(HuffmanError::InvalidContainer(format!(
                "bit count {} needs {} payload bytes, found {}",
                bit_count,
                bit_count.div_ceil(8),
                compressed_bits.len()
            )));
        }
        if original_length > 0 && tree_data.is_empty() {
            return Err(HuffmanError::InvalidContainer(
                "non-empty stream without tree data".to_string(),
            ));
        }
        if original_length == 0 && (!tree_data.is_empty() || bit_count != 0) {
            return Err(HuffmanError::InvalidContainer(
                "empty stream carrying tree data or payload".to_string(),
            ));
        }

        Ok(CompressedData {
            original_length,
            bit_count,
            tree_data,
            compressed_bits,
        })
    }
}

fn read_exact(cursor: &mut Cursor<&[u8]>, buf: &mut [u8], what: &str) -> Result<()> {
    cursor.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => {
            HuffmanError::InvalidContainer(format!("truncated while reading {what}"))
        }
        _ => HuffmanError::Io(e),
    })
}

fn read_len(cursor: &mut Cursor<&[u8]>, what: &str) -> Result<usize> {
    let mut bytes = [0u8; 8];
    read_exact(cursor, &mut bytes, what)?;
    usize::try_from(u64::from_le_bytes(bytes))
        .map_err(|_| HuffmanError::InvalidContainer(format!("{what} does not fit in usize")))
}

fn read_block(cursor: &mut Cursor<&[u8]>, what: &str) -> Result<Vec<u8>> {
    let len = read_len(cursor, what)?;
    let remaining = cursor.get_ref().len() - cursor.position() as usize;
    if len > remaining {
        return Err(HuffmanError::InvalidContainer(format!(
            "{what} claims {len} bytes, {remaining} left"
        )));
    }
    let mut block = vec![0u8; len];
    read_exact(cursor, &mut block, what)?;
    Ok(block)
}
