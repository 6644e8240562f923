//! Huffman tree construction and prefix-code generation.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Leaves come
//! first, in the order their symbols were supplied; internal nodes follow in
//! merge order. Dropping the tree drops the arena, so teardown does not
//! recurse however unbalanced the tree is.
//!
//! Codes are generated by an iterative walk with an explicit bit cursor and
//! parent links: a left edge is `0`, a right edge is `1`.

use crate::format::{EOF_SYMBOL, MAX_CODE_BITS, MAX_SYMBOLS};
use crate::heap::{MinHeap, Weighted};
use hcpak_core::error::{HcpakError, Result};
use std::fmt;

/// A symbol: a byte value, or [`EOF_SYMBOL`].
pub type Symbol = u16;

const CODE_BYTES: usize = MAX_CODE_BITS / 8;

/// Index of a node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A prefix code of up to 256 bits, stored MSB-first.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Code {
    bits: [u8; CODE_BYTES],
    len: usize,
}

impl Code {
    /// The zero-length code.
    pub const EMPTY: Code = Code {
        bits: [0; CODE_BYTES],
        len: 0,
    };

    /// Copy the first `len` bits of `bits`, clearing everything after them.
    fn from_prefix(bits: &[u8; CODE_BYTES], len: usize) -> Self {
        let mut code = Self::EMPTY;
        let used = len.div_ceil(8);
        code.bits[..used].copy_from_slice(&bits[..used]);
        if len % 8 != 0 {
            code.bits[used - 1] &= 0xFF << (8 - len % 8);
        }
        code.len = len;
        code
    }

    /// Code length in bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the code has no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The bytes holding the code, MSB-first, trailing bits zeroed.
    pub fn bits(&self) -> &[u8] {
        &self.bits[..self.len.div_ceil(8)]
    }

    /// The bit at `index` (0 is the first edge from the root).
    pub fn bit(&self, index: usize) -> bool {
        debug_assert!(index < self.len);
        self.bits[index / 8] & (0x80 >> (index % 8)) != 0
    }

    /// Iterate over the bits from the root downwards.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| self.bit(i))
    }

    /// The code as an integer, first bit most significant.
    ///
    /// Returns `None` for codes longer than 64 bits.
    pub fn value(&self) -> Option<u64> {
        if self.len > 64 {
            return None;
        }
        Some(self.iter().fold(0u64, |acc, bit| (acc << 1) | u64::from(bit)))
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({self})")
    }
}

/// A node of the Huffman tree.
#[derive(Debug, Clone)]
pub struct Node {
    weight: u64,
    symbol: Option<Symbol>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
    code: Code,
}

impl Node {
    fn leaf(symbol: Symbol, weight: u64) -> Self {
        Self {
            weight,
            symbol: Some(symbol),
            left: None,
            right: None,
            parent: None,
            code: Code::EMPTY,
        }
    }

    fn internal(weight: u64, left: NodeId, right: NodeId) -> Self {
        Self {
            weight,
            symbol: None,
            left: Some(left),
            right: Some(right),
            parent: None,
            code: Code::EMPTY,
        }
    }

    /// Weight (frequency) of the subtree.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Symbol carried by a leaf.
    pub fn symbol(&self) -> Option<Symbol> {
        self.symbol
    }

    /// Left child (edge bit `0`).
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Right child (edge bit `1`).
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Parent, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Prefix code; only meaningful on leaves.
    pub fn code(&self) -> &Code {
        &self.code
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Heap entry used while merging.
#[derive(Debug, Clone, Copy)]
struct Pending {
    weight: u64,
    id: NodeId,
}

impl Weighted for Pending {
    fn weight(&self) -> u64 {
        self.weight
    }
}

/// Bit cursor over a fixed 256-bit buffer, used while walking the tree.
struct CodeCursor {
    bits: [u8; CODE_BYTES],
    len: usize,
}

impl CodeCursor {
    fn new() -> Self {
        Self {
            bits: [0; CODE_BYTES],
            len: 0,
        }
    }

    fn push(&mut self, bit: bool) {
        debug_assert!(self.len < MAX_CODE_BITS, "code longer than 256 bits");
        let mask = 0x80 >> (self.len % 8);
        if bit {
            self.bits[self.len / 8] |= mask;
        } else {
            self.bits[self.len / 8] &= !mask;
        }
        self.len += 1;
    }

    fn retract(&mut self) {
        // The last step up to the root has nothing left to retract.
        self.len = self.len.saturating_sub(1);
    }

    fn snapshot(&self) -> Code {
        Code::from_prefix(&self.bits, self.len)
    }
}

/// A Huffman tree over weighted symbols, with codes assigned to its leaves.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
    leaf_count: usize,
}

impl HuffmanTree {
    /// Build the tree for `symbols`, given as `(symbol, weight)` pairs.
    ///
    /// The two lightest nodes are merged repeatedly; the first one taken from
    /// the heap becomes the left child. Codes are assigned before returning.
    pub fn build(symbols: &[(Symbol, u64)]) -> Result<Self> {
        let count = symbols.len();
        if count == 0 {
            return Err(HcpakError::EmptyInput);
        }
        debug_assert!(count <= MAX_SYMBOLS, "at most 257 symbols");

        let mut nodes = Vec::with_capacity(2 * count - 1);
        nodes.extend(
            symbols
                .iter()
                .map(|&(symbol, weight)| Node::leaf(symbol, weight)),
        );

        let mut heap = MinHeap::build(
            nodes
                .iter()
                .enumerate()
                .map(|(i, node)| Pending {
                    weight: node.weight,
                    id: NodeId(i),
                })
                .collect(),
        );

        for _ in 0..count - 1 {
            let x = heap.extract_min().ok_or(HcpakError::HeapUnderflow)?;
            let y = heap.extract_min().ok_or(HcpakError::HeapUnderflow)?;

            let z = NodeId(nodes.len());
            let weight = x.weight + y.weight;
            nodes.push(Node::internal(weight, x.id, y.id));
            nodes[x.id.0].parent = Some(z);
            nodes[y.id.0].parent = Some(z);

            heap.insert(Pending { weight, id: z });
        }

        let root = heap.extract_min().ok_or(HcpakError::HeapUnderflow)?.id;
        debug_assert!(heap.is_empty(), "heap not drained, a node was leaked");

        let mut tree = Self {
            nodes,
            root,
            leaf_count: count,
        };
        tree.assign_codes();

        log::trace!(
            "built Huffman tree: {} leaves, {} nodes, depth {}",
            tree.leaf_count,
            tree.nodes.len(),
            tree.depth()
        );

        Ok(tree)
    }

    /// Walk the tree without recursion and store each leaf's code.
    fn assign_codes(&mut self) {
        let mut cursor = CodeCursor::new();
        let mut n = self.root;

        if self.nodes[n.0].is_leaf() {
            self.nodes[n.0].code = Code::EMPTY;
            return;
        }

        loop {
            while let Some(left) = self.nodes[n.0].left {
                cursor.push(false);
                n = left;
            }

            self.nodes[n.0].code = cursor.snapshot();
            cursor.retract();

            loop {
                let Some(parent) = self.nodes[n.0].parent else {
                    return;
                };
                match self.nodes[parent.0].right {
                    Some(sibling) if sibling != n => {
                        cursor.push(true);
                        n = sibling;
                        break;
                    }
                    _ => {
                        cursor.retract();
                        n = parent;
                    }
                }
            }
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Access a node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Child reached from `id` by edge `bit` (`true` = right).
    #[inline]
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        let node = &self.nodes[id.0];
        if bit { node.right } else { node.left }
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Leaves in the order their symbols were supplied to [`build`](Self::build).
    pub fn leaves(&self) -> &[Node] {
        &self.nodes[..self.leaf_count]
    }

    /// Length of the longest code.
    pub fn depth(&self) -> usize {
        self.leaves().iter().map(|n| n.code.len()).max().unwrap_or(0)
    }

    /// Code assigned to `symbol`.
    pub fn code(&self, symbol: Symbol) -> Option<&Code> {
        self.leaves()
            .iter()
            .find(|n| n.symbol == Some(symbol))
            .map(Node::code)
    }

    /// Direct symbol-to-code lookup table.
    pub fn code_table(&self) -> CodeTable {
        let mut codes = vec![None; MAX_SYMBOLS];
        for leaf in self.leaves() {
            if let Some(symbol) = leaf.symbol {
                codes[usize::from(symbol)] = Some(leaf.code.clone());
            }
        }
        CodeTable { codes }
    }

    /// Sum over leaves of weight times code length.
    pub fn weighted_length(&self) -> u64 {
        self.leaves()
            .iter()
            .map(|n| n.weight * n.code.len() as u64)
            .sum()
    }
}

/// Lookup array from symbol value to its code.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Code of `symbol`, if it is part of the tree.
    #[inline]
    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(usize::from(symbol)).and_then(Option::as_ref)
    }

    /// Code of the end-of-stream symbol.
    pub fn eof(&self) -> Option<&Code> {
        self.get(EOF_SYMBOL)
    }
}
