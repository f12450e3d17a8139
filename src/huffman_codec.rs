use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::bit_vec::{BitReader, BitVec};
use crate::code_table::{generate_codes, CodeTable};
use crate::compressed_data::CompressedData;
use crate::error::{HuffmanError, Result};
use crate::hufftree::{HuffNode, HuffmanTree};

/// Packed code bits plus the number of bits that carry data. The padding in
/// the last byte is not data; `bit_count` must travel with `bytes`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedBits {
    pub bytes: Vec<u8>,
    pub bit_count: usize,
}

/// Concatenate the code of every byte in `data`, MSB-first, zero padded.
pub fn encode(data: &[u8], table: &CodeTable) -> Result<PackedBits> {
    let mut bit_vec = BitVec::new();
    for &byte in data {
        let code = table
            .get(byte)
            .ok_or(HuffmanError::MissingCodeForSymbol(byte))?;
        bit_vec.push_code(code);
    }
    debug!("encoded {} bytes into {} bits", data.len(), bit_vec.bit_count());

    let bit_count = bit_vec.bit_count();
    Ok(PackedBits {
        bytes: bit_vec.into_bytes(),
        bit_count,
    })
}

/// Walk `tree` over the first `bit_count` bits of `packed`.
pub fn decode(packed: &[u8], bit_count: usize, tree: &HuffmanTree) -> Result<Vec<u8>> {
    let reader = BitReader::new(packed, bit_count).ok_or(HuffmanError::TruncatedBitstream {
        bit_count,
        available: packed.len() * 8,
    })?;

    let result = match tree.root() {
        HuffNode::Leaf { byte, .. } => decode_single_leaf(reader, *byte)?,
        root => decode_walk(reader, root)?,
    };
    debug!("decoded {} bits into {} bytes", bit_count, result.len());
    Ok(result)
}

// every symbol is the one-bit code 0
fn decode_single_leaf(reader: BitReader<'_>, byte: u8) -> Result<Vec<u8>> {
    let mut result = Vec::with_capacity(reader.remaining());
    for (position, bit) in reader.enumerate() {
        if bit {
            return Err(HuffmanError::CorruptBitstream {
                position,
                reason: "1 bit in a single-symbol stream",
            });
        }
        result.push(byte);
    }
    Ok(result)
}

fn decode_walk(mut reader: BitReader<'_>, root: &HuffNode) -> Result<Vec<u8>> {
    let mut result = Vec::new();
    let mut current = root;

    while let Some(bit) = reader.next() {
        current = match current {
            HuffNode::Internal { left, right, .. } => {
                if bit {
                    &**right
                } else {
                    &**left
                }
            }
            // current is reset to the root on every emit
            HuffNode::Leaf { .. } => {
                return Err(HuffmanError::CorruptBitstream {
                    position: reader.position() - 1,
                    reason: "walk continued past a leaf",
                })
            }
        };

        if let HuffNode::Leaf { byte, .. } = current {
            result.push(*byte);
            current = root;
        }
    }

    if !std::ptr::eq(current, root) {
        return Err(HuffmanError::CorruptBitstream {
            position: reader.position(),
            reason: "stream ends in the middle of a code",
        });
    }
    Ok(result)
}

/// Size report for one compression run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionStats {
    pub original_bytes: usize,
    pub compressed_bytes: usize,
}

impl CompressionStats {
    /// Compressed size as a fraction of the original; zero for empty input.
    pub fn ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        self.compressed_bytes as f64 / self.original_bytes as f64
    }
}

/// A tree and the code table derived from it.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    tree: HuffmanTree,
    encode_table: CodeTable,
}

impl HuffmanCodec {
    pub fn new(tree: HuffmanTree) -> Self {
        let encode_table = generate_codes(&tree);
        HuffmanCodec { tree, encode_table }
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self::new(HuffmanTree::from_bytes(data)?))
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.encode_table
    }

    pub fn encode(&self, data: &[u8]) -> Result<PackedBits> {
        encode(data, &self.encode_table)
    }

    pub fn decode(&self, packed: &[u8], bit_count: usize) -> Result<Vec<u8>> {
        decode(packed, bit_count, &self.tree)
    }

    /// Build a codec for `data` and wrap the result in a container. Empty
    /// input yields an empty container.
    pub fn compress(data: &[u8]) -> Result<CompressedData> {
        if data.is_empty() {
            return Ok(CompressedData::default());
        }
        let codec = Self::from_bytes(data)?;
        codec.tree.print_structure();
        let packed = codec.encode(data)?;

        Ok(CompressedData {
            original_length: data.len(),
            bit_count: packed.bit_count,
            tree_data: codec.tree.serialize(),
            compressed_bits: packed.bytes,
        })
    }

    pub fn decompress(compressed: &CompressedData) -> Result<Vec<u8>> {
        if compressed.original_length == 0 {
            if !compressed.tree_data.is_empty() || compressed.bit_count != 0 {
                return Err(HuffmanError::InvalidContainer(
                    "empty stream carrying tree data or payload".to_string(),
                ));
            }
            return Ok(Vec::new());
        }
        let tree = HuffmanTree::deserialize(&compressed.tree_data)?;
        let result = decode(&compressed.compressed_bits, compressed.bit_count, &tree)?;

        if result.len() != compressed.original_length {
            return Err(HuffmanError::InvalidContainer(format!(
                "expected {} bytes, decoded {}",
                compressed.original_length,
                result.len()
            )));
        }
        Ok(result)
    }

    pub fn compress_file(input: &Path, output: &Path) -> Result<CompressionStats> {
        let data = fs::read(input)?;
        let container = Self::compress(&data)?.serialize();
        fs::write(output, &container)?;

        let stats = CompressionStats {
            original_bytes: data.len(),
            compressed_bytes: container.len(),
        };
        info!(
            "compressed {} ({} bytes) to {} ({} bytes, {:.1}%)",
            input.display(),
            stats.original_bytes,
            output.display(),
            stats.compressed_bytes,
            stats.ratio() * 100.0
        );
        Ok(stats)
    }

    /// Returns the number of bytes written.
    pub fn decompress_file(input: &Path, output: &Path) -> Result<usize> {
        let bytes = fs::read(input)?;
        let compressed = CompressedData::deserialize(&bytes)?;
        let data = Self::decompress(&compressed)?;
        fs::write(output, &data)?;

        info!(
            "decompressed {} to {} ({} bytes)",
            input.display(),
            output.display(),
            data.len()
        );
        Ok(data.len())
    }
}
