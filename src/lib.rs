//! # huffpack
//!
//! Huffman entropy coding over byte streams: frequency analysis, greedy tree
//! construction, code table generation and MSB-first bit packing.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffpack::{analyze_frequencies, build_tree, decode, encode, generate_codes};
//!
//! let data = b"abracadabra";
//! let freqs = analyze_frequencies(data);
//! let tree = build_tree(freqs.symbols(), freqs.frequencies())?;
//! let table = generate_codes(&tree);
//!
//! let packed = encode(data, &table)?;
//! let decoded = decode(&packed.bytes, packed.bit_count, &tree)?;
//! assert_eq!(decoded, data);
//! # Ok::<(), huffpack::HuffmanError>(())
//! ```
//!
//! The packed bits carry no length or tree; callers keep `bit_count` and the
//! tree alongside them. [`CompressedData`] is one such container, used by the
//! `huffpack` binary.

pub mod bit_vec;
pub mod code_table;
pub mod compressed_data;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod min_heap;

pub use code_table::{generate_codes, Code, CodeTable};
pub use compressed_data::CompressedData;
pub use error::{HuffmanError, Result};
pub use frequency::{analyze_frequencies, FrequencyTable};
pub use huffman_codec::{decode, encode, CompressionStats, HuffmanCodec, PackedBits};
pub use hufftree::{build_tree, HuffNode, HuffmanTree};
