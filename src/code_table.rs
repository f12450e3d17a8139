use std::fmt;

use log::debug;

use crate::hufftree::{HuffNode, HuffmanTree};

/// Root-to-leaf path, one `bool` per edge (`false` = left, `true` = right).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Code { bits: Vec::new() }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }

    fn child(&self, bit: bool) -> Code {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Code { bits }
    }
}

impl From<&[bool]> for Code {
    fn from(bits: &[bool]) -> Self {
        Code {
            bits: bits.to_vec(),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping, one slot per byte value.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
}

impl CodeTable {
    /// Depth-first walk with an explicit stack, so code length has no
    /// fixed bound. A root that is itself a leaf gets the one-bit code `0`.
    pub fn generate(tree: &HuffmanTree) -> Self {
        let mut codes: [Option<Code>; 256] = std::array::from_fn(|_| None);

        if let HuffNode::Leaf { byte, .. } = tree.root() {
            codes[*byte as usize] = Some(Code::new().child(false));
        } else {
            let mut stack = vec![(tree.root(), Code::new())];
            while let Some((node, code)) = stack.pop() {
                match node {
                    HuffNode::Leaf { byte, .. } => codes[*byte as usize] = Some(code),
                    HuffNode::Internal { left, right, .. } => {
                        stack.push((&**right, code.child(true)));
                        stack.push((&**left, code.child(false)));
                    }
                }
            }
        }

        let table = CodeTable { codes };
        debug!(
            "generated {} codes, max length {}",
            table.len(),
            table.max_code_length()
        );
        table
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        (0..=255u8).filter_map(move |s| self.get(s).map(|code| (s, code)))
    }

    pub fn max_code_length(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }
}

/// Free-function form of [`CodeTable::generate`].
pub fn generate_codes(tree: &HuffmanTree) -> CodeTable {
    CodeTable::generate(tree)
}
