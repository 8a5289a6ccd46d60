//! Test fixtures: identity-compared nodes, a callback journal and a
//! container that counts its mutations.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::config::RepeaterConfig;
use crate::container::{ChildList, Container};
use crate::repeater::Repeater;

pub(crate) type Item = &'static str;

struct NodeState {
    label: Item,
    updates: Cell<usize>,
}

/// Node handle compared by pointer, like a DOM element handle.
#[derive(Clone)]
pub(crate) struct TestNode(Rc<NodeState>);

impl TestNode {
    pub fn new(label: Item) -> Self {
        Self(Rc::new(NodeState {
            label,
            updates: Cell::new(0),
        }))
    }

    pub fn label(&self) -> Item {
        self.0.label
    }

    pub fn updates(&self) -> usize {
        self.0.updates.get()
    }
}

impl PartialEq for TestNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for TestNode {}

impl Hash for TestNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for TestNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node({})", self.0.label)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Events {
    pub created: Vec<Item>,
    pub updated: Vec<Item>,
    /// (node label, item)
    pub removed: Vec<(Item, Item)>,
}

/// Shared record of callback invocations.
#[derive(Debug, Default, Clone)]
pub(crate) struct Journal(Rc<RefCell<Events>>);

impl Journal {
    pub fn created(&self) -> Vec<Item> {
        self.0.borrow().created.clone()
    }

    pub fn updated(&self) -> Vec<Item> {
        self.0.borrow().updated.clone()
    }

    pub fn removed(&self) -> Vec<(Item, Item)> {
        self.0.borrow().removed.clone()
    }

    pub fn clear(&self) {
        *self.0.borrow_mut() = Events::default();
    }
}

/// Container that counts structural operations.
#[derive(Debug, Default)]
pub(crate) struct RecordingContainer {
    pub children: ChildList<TestNode>,
    pub inserts: usize,
    pub removes: usize,
}

impl RecordingContainer {
    pub fn ops(&self) -> usize {
        self.inserts + self.removes
    }

    pub fn labels(&self) -> Vec<Item> {
        self.children.iter().map(TestNode::label).collect()
    }
}

impl Container for RecordingContainer {
    type Node = TestNode;

    fn len(&self) -> usize {
        self.children.len()
    }

    fn child_at(&self, index: usize) -> Option<&TestNode> {
        self.children.child_at(index)
    }

    fn insert_at(&mut self, index: usize, node: TestNode) {
        self.inserts += 1;
        self.children.insert_at(index, node);
    }

    fn remove_at(&mut self, index: usize) -> TestNode {
        self.removes += 1;
        self.children.remove_at(index)
    }
}

/// Repeater whose callbacks all write to `journal`.
pub(crate) fn recording_repeater(journal: &Journal) -> Repeater<Item, RecordingContainer> {
    let (created, updated, removed) = (journal.clone(), journal.clone(), journal.clone());
    Repeater::builder(RecordingContainer::default(), move |item: &Item| {
        created.0.borrow_mut().created.push(*item);
        TestNode::new(*item)
    })
    .on_update(move |node: &TestNode, item: &Item| {
        node.0.updates.set(node.0.updates.get() + 1);
        updated.0.borrow_mut().updated.push(*item);
    })
    .on_remove(move |node: &TestNode, item: &Item| {
        removed.0.borrow_mut().removed.push((node.label(), *item));
    })
    .config(RepeaterConfig::strict())
    .build()
    .expect("empty container")
}
