//! Plain-text rendering of a resolved tree, for snapshot tests and debugging.

use std::fmt::Write;

use super::resolve::Resolution;
use super::tree::StackTree;

impl StackTree {
    /// One line per layer in depth-first order, indented two spaces per level.
    ///
    /// Allocating layers render as `label (kind) z=N`, inert ones as
    /// `label (inert)`. Lines are joined with `'\n'` without a trailing newline.
    pub fn dump(&self, resolution: &Resolution) -> String {
        let mut out = String::new();
        let mut stack: Vec<_> = self.roots().iter().rev().map(|&id| (id, 0usize)).collect();
        while let Some((id, depth)) = stack.pop() {
            let Some(data) = self.get(id) else {
                continue;
            };
            if !out.is_empty() {
                out.push('\n');
            }
            let _ = write!(out, "{:indent$}{} ({})", "", data.label, data.role, indent = depth * 2);
            if let Some(priority) = resolution.priority(id) {
                let _ = write!(out, " z={priority}");
            }
            stack.extend(self.children(id).iter().rev().map(|&child| (child, depth + 1)));
        }
        out
    }
}
