//! Parse-tree representation for abbreviation subjects
//!
//! The parser produces a [`SubjectTree`]: an arena of [`Subject`] nodes
//! addressed by [`NodeId`] handles. Children are owned by their parent in
//! the arena sense (a parent holds the ids of its children); the parent link
//! on each node is a plain back-reference index, consulted only while the
//! directive machinery (`+`, `^`) navigates the tree under construction.
//! Keeping both directions as indices sidesteps the ownership cycle a
//! pointer-based tree would create.

use crate::emx::attr::{Attr, AttrValue, Text};

/// Handle to a node inside a [`SubjectTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// How the next subject attaches to the tree built so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `+`: sibling at the last subject's nesting level.
    Add,
    /// `>`: child of the last subject.
    Dive,
    /// `^` run: climb that many levels before attaching.
    Ascend(usize),
    /// `)`: terminate the enclosing group parse.
    CloseGroup,
}

/// A parsed abbreviation unit before repetition expansion.
#[derive(Debug, Clone, PartialEq)]
pub enum Subject {
    Tag(TagNode),
    Group(GroupNode),
}

impl Subject {
    pub fn repeat(&self) -> usize {
        match self {
            Subject::Tag(tag) => tag.repeat,
            Subject::Group(group) => group.repeat,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Subject::Tag(tag) => tag.parent,
            Subject::Group(group) => group.parent,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        match self {
            Subject::Tag(tag) => &tag.children,
            Subject::Group(group) => &group.children,
        }
    }

    fn set_parent(&mut self, parent: NodeId) {
        match self {
            Subject::Tag(tag) => tag.parent = Some(parent),
            Subject::Group(group) => group.parent = Some(parent),
        }
    }

    fn push_child(&mut self, child: NodeId) {
        match self {
            Subject::Tag(tag) => tag.children.push(child),
            Subject::Group(group) => group.children.push(child),
        }
    }
}

/// A tag subject: `name#id.class[attr]{text}` with a repeat count.
#[derive(Debug, Clone, PartialEq)]
pub struct TagNode {
    pub name: String,
    pub repeat: usize,
    pub id: Option<AttrValue>,
    pub classes: Vec<AttrValue>,
    pub attributes: Vec<Attr>,
    pub text: Option<Text>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl TagNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            repeat: 1,
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Append `attr` only when no attribute of that name exists yet. This is
    /// how the snippet tables inject scaffolding without clobbering anything
    /// the user wrote.
    pub fn fallback_attribute(&mut self, attr: Attr) {
        if self.attributes.iter().any(|a| a.name == attr.name) {
            return;
        }

        self.attributes.push(attr);
    }
}

/// A parenthesized group: a repeatable wrapper around a child sequence,
/// carrying no markup of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupNode {
    pub repeat: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl GroupNode {
    pub fn new(repeat: usize) -> Self {
        Self {
            repeat,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena of subjects plus the ordered list of top-level roots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectTree {
    nodes: Vec<Subject>,
    roots: Vec<NodeId>,
}

impl SubjectTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, subject: Subject) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(subject);
        id
    }

    pub fn node(&self, id: NodeId) -> &Subject {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Subject {
        &mut self.nodes[id.0]
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn set_roots(&mut self, roots: Vec<NodeId>) {
        self.roots = roots;
    }

    pub fn push_root(&mut self, id: NodeId) {
        self.roots.push(id);
    }

    /// Attach `child` under `parent`, wiring the back-reference.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].set_parent(parent);
        self.nodes[parent.0].push_child(child);
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent()
    }

    /// Mutable access to every node, in allocation order. Used by the
    /// snippet rewrite pass, which is position independent.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Subject> {
        self.nodes.iter_mut()
    }
}
