//! Nesting of a post's flat comment list into reply threads.

use std::{cmp::Reverse, collections::HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    errors::ApiError,
    models::{Comment, CommentView},
    store::Store,
};

/// Deepest reply level accepted when a comment is created; top-level
/// comments are level 1.
pub const MAX_THREAD_DEPTH: usize = 100;

/// Anything that can be placed in a reply thread.
pub trait Threaded {
    fn id(&self) -> i64;
    fn parent_id(&self) -> Option<i64>;
    fn created_at(&self) -> DateTime<Utc>;
}

impl Threaded for Comment {
    fn id(&self) -> i64 {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Threaded for CommentView {
    fn id(&self) -> i64 {
        self.comment.id
    }

    fn parent_id(&self) -> Option<i64> {
        self.comment.parent_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.comment.created_at
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentNode<T> {
    #[serde(flatten)]
    pub comment: T,
    pub children: Vec<CommentNode<T>>,
}

// Unlinks descendants one at a time so dropping a long chain does not recurse.
impl<T> Drop for CommentNode<T> {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

struct Slot<T> {
    item: Option<T>,
    children: Vec<usize>,
    node: Option<CommentNode<T>>,
}

/// Builds the reply forest for one post.
///
/// `comments` is expected in fetch order (oldest first); replies keep that
/// order. Roots come back newest first. A comment whose parent is not in the
/// set is an orphan and is dropped together with its own replies; it is never
/// promoted to a root.
pub fn build_comment_tree<T: Threaded>(comments: Vec<T>) -> Vec<CommentNode<T>> {
    let index: HashMap<i64, usize> = comments
        .iter()
        .enumerate()
        .map(|(slot, c)| (c.id(), slot))
        .collect();

    let mut arena: Vec<Slot<T>> = comments
        .into_iter()
        .map(|item| Slot {
            item: Some(item),
            children: Vec::new(),
            node: None,
        })
        .collect();

    let mut roots = Vec::new();
    for slot in 0..arena.len() {
        let parent = arena[slot].item.as_ref().and_then(|c| c.parent_id());
        match parent {
            None => roots.push(slot),
            Some(parent_id) => {
                if let Some(&parent) = index.get(&parent_id) {
                    arena[parent].children.push(slot);
                }
            }
        }
    }

    roots.sort_by_key(|&slot| {
        let item = arena[slot].item.as_ref().map(|c| (c.created_at(), c.id()));
        Reverse(item)
    });

    roots
        .into_iter()
        .filter_map(|slot| take_node(&mut arena, slot))
        .collect()
}

// Walks the subtree with an explicit stack, then assembles nodes bottom-up.
// Each slot is taken at most once, so a node is emitted only under its one
// parent. Cycles never hang off a root and are left behind.
fn take_node<T>(arena: &mut [Slot<T>], root: usize) -> Option<CommentNode<T>> {
    let mut order = Vec::new();
    let mut stack = vec![root];
    while let Some(slot) = stack.pop() {
        if arena[slot].item.is_none() {
            continue;
        }
        order.push(slot);
        stack.extend(arena[slot].children.iter().copied());
    }

    for &slot in order.iter().rev() {
        let Some(comment) = arena[slot].item.take() else {
            continue;
        };
        let child_slots = std::mem::take(&mut arena[slot].children);
        let children = child_slots
            .into_iter()
            .filter_map(|child| arena[child].node.take())
            .collect();
        arena[slot].node = Some(CommentNode { comment, children });
    }

    arena[root].node.take()
}

/// Level of `comment` in its thread, walking parents up to `MAX_THREAD_DEPTH`.
pub async fn thread_depth(store: &dyn Store, comment: &Comment) -> Result<usize, ApiError> {
    let mut depth = 1;
    let mut parent = comment.parent_id;
    while let Some(parent_id) = parent {
        if depth >= MAX_THREAD_DEPTH {
            break;
        }
        depth += 1;
        parent = store
            .find_comment(parent_id)
            .await?
            .and_then(|c| c.parent_id);
    }
    Ok(depth)
}
