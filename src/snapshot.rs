// src/snapshot.rs
//! Captured page state: every visible text node, where it sat on screen, and
//! (when the capturer knows it) which node encloses it.
//!
//! A `Snapshot` is plain owned data. Nothing here talks to a browser; the
//! extraction passes only ever see values captured at one instant.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-left corner on screen. Row is vertical, col is horizontal.
/// The derived ordering is reading order: top-to-bottom, then left-to-right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// One observed text node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element {
    pub text: String,
    #[serde(flatten)]
    pub position: Position,
}

impl Element {
    pub fn new(text: impl Into<String>, row: i32, col: i32) -> Self {
        Self { text: text.into(), position: Position::new(row, col) }
    }

    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

pub type NodeId = usize;

/// An element plus its enclosing node, if captured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(flatten)]
    pub element: Element,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn new(element: Element, parent: Option<NodeId>) -> Self {
        Self { element, parent }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self { element, parent: None }
    }
}

#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    source: Option<String>,
    nodes: Vec<Node>,
}

/// All text nodes visible at one instant. Node ids are indices into `nodes`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct Snapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    nodes: Vec<Node>,
    #[serde(skip)]
    children: Vec<Vec<NodeId>>,
}

impl TryFrom<RawSnapshot> for Snapshot {
    type Error = Error;

    fn try_from(raw: RawSnapshot) -> Result<Self> {
        let mut snap = Snapshot::new(raw.nodes)?;
        snap.source = raw.source;
        Ok(snap)
    }
}

impl From<Vec<Element>> for Snapshot {
    /// A flat capture: positions only, no enclosure information.
    fn from(elements: Vec<Element>) -> Self {
        let n = elements.len();
        Self {
            source: None,
            nodes: elements.into_iter().map(Node::from).collect(),
            children: vec![Vec::new(); n],
        }
    }
}

impl Snapshot {
    /// Build from nodes, rejecting dangling or cyclic parent links.
    pub fn new(nodes: Vec<Node>) -> Result<Self> {
        let n = nodes.len();
        let mut children = vec![Vec::new(); n];

        for (id, node) in nodes.iter().enumerate() {
            if let Some(p) = node.parent {
                if p >= n {
                    return Err(Error::Snapshot(format!("node {id}: parent {p} out of range (0..{n})")));
                }
                if p == id {
                    return Err(Error::Snapshot(format!("node {id} is its own parent")));
                }
                children[p].push(id);
            }
        }

        // Any chain longer than n must revisit a node.
        for id in 0..n {
            let mut steps = 0usize;
            let mut cur = nodes[id].parent;
            while let Some(p) = cur {
                steps += 1;
                if steps > n {
                    return Err(Error::Snapshot(format!("parent cycle through node {id}")));
                }
                cur = nodes[p].parent;
            }
        }

        Ok(Self { source: None, nodes, children })
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Where the capture came from (URL or file), if recorded.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn element(&self, id: NodeId) -> &Element {
        &self.nodes[id].element
    }

    pub fn elements(&self) -> impl Iterator<Item = (NodeId, &Element)> + '_ {
        self.nodes.iter().enumerate().map(|(id, n)| (id, &n.element))
    }

    /// The container `depth` levels above `id` (1 = direct parent).
    pub fn ancestor(&self, id: NodeId, depth: usize) -> Option<NodeId> {
        self.ancestors(id).nth(depth.checked_sub(1)?)
    }

    /// Enclosing containers, innermost first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors { snap: self, cur: self.nodes.get(id).and_then(|n| n.parent) }
    }

    /// Every node enclosed by `container`, excluding the container itself.
    pub fn descendants(&self, container: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.children.get(container) {
            Some(kids) => kids.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children[id].iter().rev().copied());
        }
        out
    }
}

pub struct Ancestors<'a> {
    snap: &'a Snapshot,
    cur: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.cur?;
        self.cur = self.snap.nodes[id].parent;
        Some(id)
    }
}
