//! Error type shared by the coder and the container layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuffmanError {
    /// Tree construction was handed zero symbols.
    #[error("cannot build a Huffman tree from empty input")]
    EmptyInput,

    /// Extraction from an empty heap. Tree construction never triggers this.
    #[error("extract_min called on an empty heap")]
    HeapUnderflow,

    #[error("byte {0:#04x} has no entry in the code table")]
    MissingCodeForSymbol(u8),

    /// The declared bit count asks for more bits than the packed buffer holds.
    #[error("bit count {bit_count} exceeds the {available} bits available")]
    TruncatedBitstream { bit_count: usize, available: usize },

    /// The tree walk did not land on a leaf exactly at the declared boundary,
    /// or followed a branch the tree does not have.
    #[error("corrupt bitstream at bit {position}: {reason}")]
    CorruptBitstream { position: usize, reason: &'static str },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid container: {0}")]
    InvalidContainer(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
