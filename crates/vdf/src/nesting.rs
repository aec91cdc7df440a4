//! Parse stack shared by the text and binary decoders.
//!
//! The root mapping is owned directly; each open level is an owned frame that
//! is bound into its parent when it closes. No sibling can be inserted into a
//! parent while one of its children is open, so binding on close yields the
//! same order as binding on open.

use tracing::trace;

use crate::mapping::Mapping;
use crate::value::Value;

struct Frame<M> {
    key: String,
    map: M,
    /// Whether `map` was taken out of an existing entry of the parent.
    merged: bool,
    /// Line or byte offset where the level was opened.
    at: usize,
}

pub(crate) struct Nesting<M> {
    root: M,
    frames: Vec<Frame<M>>,
}

impl<M: Mapping> Nesting<M> {
    pub fn new() -> Self {
        Self {
            root: M::default(),
            frames: Vec::new(),
        }
    }

    /// Number of open levels below the root.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The mapping new entries go into.
    pub fn current(&mut self) -> &mut M {
        match self.frames.last_mut() {
            Some(frame) => &mut frame.map,
            None => &mut self.root,
        }
    }

    /// Opens a nested level bound under `key`.
    ///
    /// With `merge` set, an existing mapping under `key` is reopened instead
    /// of binding a fresh one. A scalar under `key` is never merged into.
    pub fn open(&mut self, key: String, merge: bool, at: usize) {
        let reused = if merge {
            match self.current().get_mut(&key) {
                Some(Value::Map(existing)) => Some(std::mem::take(existing)),
                _ => None,
            }
        } else {
            None
        };
        let merged = reused.is_some();
        trace!(depth = self.depth() + 1, key = %key, merged, "open level");
        self.frames.push(Frame {
            key,
            map: reused.unwrap_or_default(),
            merged,
            at,
        });
    }

    /// Closes the innermost level. Returns `false` when already at the root.
    pub fn close(&mut self) -> bool {
        let Some(frame) = self.frames.pop() else {
            return false;
        };
        trace!(depth = self.depth() + 1, key = %frame.key, "close level");
        let parent = self.current();
        if frame.merged {
            if let Some(Value::Map(slot)) = parent.get_mut(&frame.key) {
                *slot = frame.map;
                return true;
            }
        }
        parent.insert(frame.key, Value::Map(frame.map));
        true
    }

    /// Where the innermost open level started, if any.
    pub fn innermost(&self) -> Option<usize> {
        self.frames.last().map(|frame| frame.at)
    }

    /// Returns the root, or the start of the innermost unclosed level.
    pub fn finish(self) -> Result<M, usize> {
        match self.frames.last() {
            Some(frame) => Err(frame.at),
            None => Ok(self.root),
        }
    }
}
