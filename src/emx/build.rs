//! Subject tree expansion
//!
//! Turns the parsed [`SubjectTree`] into concrete [`Elem`] nodes, expanding
//! every repeat count into that many instances. The numbering context
//! `(num, sibling_count)` is threaded from the invocation that produced the
//! current repetition group into all of that group's descendants, so a
//! numbering directive nested inside the 3rd of 5 repeated rows resolves
//! against the enclosing repetition rather than its own node.

use crate::emx::elem::Elem;
use crate::emx::token::{GroupNode, NodeId, Subject, SubjectTree, TagNode};

/// Expand the whole tree, starting from the neutral numbering context.
pub fn build(tree: &SubjectTree) -> Vec<Elem> {
    build_nodes(tree, tree.roots(), 1, 1)
}

fn build_nodes(tree: &SubjectTree, ids: &[NodeId], num: usize, sibling_count: usize) -> Vec<Elem> {
    let mut elems = Vec::new();

    for &id in ids {
        match tree.node(id) {
            Subject::Group(group) => elems.extend(build_group(tree, group, num, sibling_count)),
            Subject::Tag(tag) => elems.extend(build_tag(tree, tag, num, sibling_count)),
        }
    }

    elems
}

fn build_group(tree: &SubjectTree, group: &GroupNode, num: usize, sibling_count: usize) -> Vec<Elem> {
    // A zero-repeat group expands to nothing; the ambient numbering context
    // must survive it untouched.
    if group.repeat == 0 {
        return Vec::new();
    }

    let mut elems = Vec::new();

    for i in 1..=group.repeat {
        let (num, sibling_count) = if group.repeat > 1 {
            (i, group.repeat)
        } else {
            (num, sibling_count)
        };

        elems.extend(build_nodes(tree, group.children(), num, sibling_count));
    }

    elems
}

fn build_tag(tree: &SubjectTree, tag: &TagNode, num: usize, sibling_count: usize) -> Vec<Elem> {
    let mut elems = Vec::with_capacity(tag.repeat);

    for i in 1..=tag.repeat {
        let (num, sibling_count) = if tag.repeat > 1 {
            (i, tag.repeat)
        } else {
            (num, sibling_count)
        };

        elems.push(Elem {
            name: tag.name.clone(),
            id: tag.id.clone(),
            classes: tag.classes.clone(),
            attributes: tag.attributes.clone(),
            text: tag.text.clone(),
            num,
            sibling_count,
            children: build_nodes(tree, tag.children(), num, sibling_count),
        });
    }

    elems
}
