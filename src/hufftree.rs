use log::{debug, log_enabled, trace, Level};

use crate::error::{HuffmanError, Result};
use crate::frequency::{analyze_frequencies, FrequencyTable};
use crate::min_heap::{MinHeap, Weighted};

const LEAF_TAG: u8 = 1;
const INTERNAL_TAG: u8 = 0;
// a tree over 256 distinct bytes is at most 255 levels deep
const MAX_DEPTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    /// Greedy merge of the two lightest nodes until one remains.
    ///
    /// Leaves enter the heap in the order of `symbols`. The first node
    /// extracted in each round becomes the left child.
    pub fn build(symbols: &[u8], frequencies: &[u64]) -> Result<Self> {
        if symbols.len() != frequencies.len() {
            return Err(HuffmanError::InvalidInput(format!(
                "{} symbols but {} frequencies",
                symbols.len(),
                frequencies.len()
            )));
        }
        if symbols.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }
        let mut seen = [false; 256];
        for &s in symbols {
            if std::mem::replace(&mut seen[s as usize], true) {
                return Err(HuffmanError::InvalidInput(format!(
                    "symbol {s:#04x} listed twice"
                )));
            }
        }

        let leaves: Vec<HuffNode> = symbols
            .iter()
            .zip(frequencies)
            .map(|(&byte, &count)| HuffNode::new(byte, count))
            .collect();

        let tree = Self::build_from_heap(MinHeap::build(leaves))?;
        debug!(
            "built huffman tree: {} leaves, depth {}, weight {}",
            tree.leaf_count(),
            tree.depth(),
            tree.weight()
        );
        Ok(tree)
    }

    pub fn from_frequency_table(table: &FrequencyTable) -> Result<Self> {
        Self::build(table.symbols(), table.frequencies())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_frequency_table(&analyze_frequencies(bytes))
    }

    fn build_from_heap(mut heap: MinHeap<HuffNode>) -> Result<Self> {
        if heap.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }
        while !heap.is_singleton() {
            let x = heap.extract_min()?;
            let y = heap.extract_min()?;
            heap.insert(HuffNode::merge(x, y));
        }
        let root = heap.extract_min()?;
        Ok(HuffmanTree { root })
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// True for the degenerate tree whose root is its only leaf.
    pub fn is_single_leaf(&self) -> bool {
        self.root.is_leaf()
    }

    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes().filter(|n| n.is_leaf()).count()
    }

    pub fn internal_count(&self) -> usize {
        self.nodes().filter(|n| !n.is_leaf()).count()
    }

    /// Longest root-to-leaf path, counted in edges.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffNode::Leaf { .. } => deepest = deepest.max(depth),
                HuffNode::Internal { left, right, .. } => {
                    stack.push((&**right, depth + 1));
                    stack.push((&**left, depth + 1));
                }
            }
        }
        deepest
    }

    /// Symbol/frequency pairs in left-to-right leaf order.
    pub fn frequencies(&self) -> Vec<(u8, u64)> {
        self.nodes()
            .filter_map(|n| match n {
                HuffNode::Leaf { byte, weight } => Some((*byte, *weight)),
                HuffNode::Internal { .. } => None,
            })
            .collect()
    }

    // pre-order, left before right
    fn nodes(&self) -> impl Iterator<Item = &HuffNode> + '_ {
        let mut stack = vec![&self.root];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            if let HuffNode::Internal { left, right, .. } = node {
                stack.push(right);
                stack.push(left);
            }
            Some(node)
        })
    }

    /// Pre-order dump of the tree shape: `0` for an internal node, `1`
    /// followed by the byte and its little-endian u64 weight for a leaf.
    /// Internal weights are recomputed on load.
    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for node in self.nodes() {
            match node {
                HuffNode::Leaf { byte, weight } => {
                    bytes.push(LEAF_TAG);
                    bytes.push(*byte);
                    bytes.extend_from_slice(&weight.to_le_bytes());
                }
                HuffNode::Internal { .. } => bytes.push(INTERNAL_TAG),
            }
        }
        bytes
    }

    pub fn deserialize(data: &[u8]) -> Result<HuffmanTree> {
        let mut cursor = TreeCursor {
            data,
            pos: 0,
            seen: [false; 256],
        };
        let root = cursor.read_node(0)?;
        if cursor.pos != data.len() {
            return Err(HuffmanError::InvalidContainer(format!(
                "{} trailing bytes after tree data",
                data.len() - cursor.pos
            )));
        }
        Ok(HuffmanTree { root })
    }

    pub fn print_structure(&self) {
        if !log_enabled!(Level::Trace) {
            return;
        }
        trace!("Huffman Tree Structure:");
        Self::print_node(&self.root, 0, "root");
    }

    fn print_node(node: &HuffNode, depth: usize, label: &str) {
        let indent = "  ".repeat(depth);
        match node {
            HuffNode::Leaf { byte, weight } => {
                trace!(
                    "{}{}-> Leaf: {:?} ({}) [weight: {}]",
                    indent,
                    label,
                    *byte as char,
                    byte,
                    weight
                );
            }
            HuffNode::Internal {
                weight,
                left,
                right,
            } => {
                trace!("{}{}-> Internal [weight: {}]", indent, label, weight);
                Self::print_node(left, depth + 1, "L");
                Self::print_node(right, depth + 1, "R");
            }
        }
    }
}

struct TreeCursor<'a> {
    data: &'a [u8],
    pos: usize,
    seen: [bool; 256],
}

impl TreeCursor<'_> {
    fn take(&mut self, n: usize) -> Result<&[u8]> {
        let end = self.pos + n;
        let slice = self.data.get(self.pos..end).ok_or_else(|| {
            HuffmanError::InvalidContainer("tree data ends mid-node".to_string())
        })?;
        self.pos = end;
        Ok(slice)
    }

    fn read_node(&mut self, depth: usize) -> Result<HuffNode> {
        if depth > MAX_DEPTH {
            return Err(HuffmanError::InvalidContainer(
                "tree data nests deeper than 255 levels".to_string(),
            ));
        }
        match self.take(1)?[0] {
            LEAF_TAG => {
                let byte = self.take(1)?[0];
                if std::mem::replace(&mut self.seen[byte as usize], true) {
                    return Err(HuffmanError::InvalidContainer(format!(
                        "symbol {byte:#04x} appears in two leaves"
                    )));
                }
                let mut weight = [0u8; 8];
                weight.copy_from_slice(self.take(8)?);
                Ok(HuffNode::new(byte, u64::from_le_bytes(weight)))
            }
            INTERNAL_TAG => {
                let left = self.read_node(depth + 1)?;
                let right = self.read_node(depth + 1)?;
                Ok(HuffNode::merge(left, right))
            }
            tag => Err(HuffmanError::InvalidContainer(format!(
                "unknown tree node tag {tag}"
            ))),
        }
    }
}

/// Free-function form of [`HuffmanTree::build`].
pub fn build_tree(symbols: &[u8], frequencies: &[u64]) -> Result<HuffmanTree> {
    HuffmanTree::build(symbols, frequencies)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: u64,
        byte: u8,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn new(b: u8, f: u64) -> Self {
        HuffNode::Leaf { weight: f, byte: b }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    /// `a` becomes the left child, `b` the right.
    pub fn merge(a: Self, b: Self) -> Self {
        let weight = a.weight().saturating_add(b.weight());
        HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        }
    }
}

impl Weighted for HuffNode {
    fn weight(&self) -> u64 {
        HuffNode::weight(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_symbols() {
        let tree = HuffmanTree::from_bytes(b"aaabb").unwrap();
        assert_eq!(tree.weight(), 5);
        match tree.root() {
            HuffNode::Internal { left, right, .. } => {
                assert_eq!(**left, HuffNode::new(b'b', 2));
                assert_eq!(**right, HuffNode::new(b'a', 3));
            }
            HuffNode::Leaf { .. } => panic!("expected an internal root"),
        }
    }

    #[test]
    fn test_single_symbol_root_is_leaf() {
        let tree = HuffmanTree::from_bytes(&[b'a'; 100]).unwrap();
        assert!(tree.is_single_leaf());
        assert_eq!(tree.root, HuffNode::new(b'a', 100));
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.internal_count(), 0);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            HuffmanTree::from_bytes(b""),
            Err(HuffmanError::EmptyInput)
        ));
    }

    #[test]
    fn test_mismatched_lengths() {
        assert!(matches!(
            build_tree(b"ab", &[1]),
            Err(HuffmanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_duplicate_symbol() {
        assert!(matches!(
            build_tree(b"aa", &[1, 2]),
            Err(HuffmanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_node_counts() {
        let tree = HuffmanTree::from_bytes(b"abracadabra alakazam").unwrap();
        let distinct = analyze_frequencies(b"abracadabra alakazam").len();
        assert_eq!(tree.leaf_count(), distinct);
        assert_eq!(tree.internal_count(), distinct - 1);
        assert_eq!(tree.weight(), 20);

        let mut leaves = tree.frequencies();
        leaves.sort_unstable();
        let mut expected: Vec<(u8, u64)> =
            analyze_frequencies(b"abracadabra alakazam").iter().collect();
        expected.sort_unstable();
        assert_eq!(leaves, expected);
    }

    #[test]
    fn test_skewed_frequencies_make_deep_tree() {
        // fibonacci weights force a chain
        let symbols: Vec<u8> = (0..20).collect();
        let mut freqs = vec![1u64, 1];
        while freqs.len() < 20 {
            let n = freqs.len();
            freqs.push(freqs[n - 1] + freqs[n - 2]);
        }
        let tree = build_tree(&symbols, &freqs).unwrap();
        assert_eq!(tree.depth(), 19);
    }

    #[test]
    fn test_serialize_roundtrip() {
        let tree = HuffmanTree::from_bytes(b"the quick brown fox").unwrap();
        let restored = HuffmanTree::deserialize(&tree.serialize()).unwrap();
        assert_eq!(tree, restored);
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        assert!(HuffmanTree::deserialize(&[]).is_err());
        assert!(HuffmanTree::deserialize(&[INTERNAL_TAG, LEAF_TAG, b'a']).is_err());
        assert!(HuffmanTree::deserialize(&[7]).is_err());

        let mut twice = vec![INTERNAL_TAG];
        for _ in 0..2 {
            twice.push(LEAF_TAG);
            twice.push(b'a');
            twice.extend_from_slice(&1u64.to_le_bytes());
        }
        assert!(HuffmanTree::deserialize(&twice).is_err());

        let deep = vec![INTERNAL_TAG; 300];
        assert!(HuffmanTree::deserialize(&deep).is_err());
    }
}
