//! The decision-tree traversal state machine.
//!
//! One traversal instance drives one user through one tree, node by node,
//! remembering the path for backtracking and for the final audit record.
//! State is `{current node id, path}` where the path is a strict stack of
//! visited node ids: answering pushes, stepping back pops, and there is no
//! redo stack. Arrival at a result node is terminal and yields a completion
//! record at most once per instance.
//!
//! The traversal never mutates the tree, and there is no cycle detection: a
//! malformed graph whose answers point backward can be advanced forever, but
//! the stack discipline itself cannot loop.

use crate::error::CoreError;
use crate::tree::{find_node, Node, NodeId};

/// Outcome of an answer selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Moved to the answer's target node.
    Advanced(NodeId),
    /// The answer has no target; state is unchanged. Write-time validation
    /// rejects such answers, so this only occurs on legacy rows.
    DeadEnd,
}

/// Everything needed to persist a completed traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// The full visited sequence, terminal node included.
    pub path: Vec<NodeId>,
    pub result_node_id: NodeId,
}

/// A single in-flight traversal over a borrowed node graph.
#[derive(Debug)]
pub struct Traversal<'a> {
    nodes: &'a [Node],
    current: NodeId,
    path: Vec<NodeId>,
    completion_taken: bool,
}

impl<'a> Traversal<'a> {
    /// Begin a traversal at the tree's first stored node with an empty path.
    pub fn start(nodes: &'a [Node]) -> Result<Self, CoreError> {
        let first = nodes.first().ok_or_else(|| {
            CoreError::Validation("cannot traverse a tree with no nodes".into())
        })?;
        Ok(Traversal {
            nodes,
            current: first.id(),
            path: Vec::new(),
            completion_taken: false,
        })
    }

    pub fn current_node_id(&self) -> NodeId {
        self.current
    }

    /// Visited node ids, oldest first. Does not include the current node.
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Resolve the current node, or fail if the id dangles.
    ///
    /// A dangling current id means corrupt data; the caller must surface the
    /// error rather than attempt repair.
    pub fn current_node(&self) -> Result<&'a Node, CoreError> {
        find_node(self.nodes, self.current)
            .ok_or_else(|| CoreError::not_found("Node", self.current))
    }

    /// Select the answer at `answer_index` on the current node.
    ///
    /// Valid only on question and test nodes. On success the current node id
    /// is pushed onto the path and the target becomes current. An answer with
    /// no target is a no-op ([`Step::DeadEnd`]).
    pub fn select_answer(&mut self, answer_index: usize) -> Result<Step, CoreError> {
        let node = self.current_node()?;
        let answers = node.answers().ok_or_else(|| {
            CoreError::Validation(format!(
                "node {} is a result node and has no answers",
                node.id()
            ))
        })?;
        let answer = answers.get(answer_index).ok_or_else(|| {
            CoreError::Validation(format!(
                "node {} has no answer at index {answer_index}",
                node.id()
            ))
        })?;

        match answer.next {
            None => Ok(Step::DeadEnd),
            Some(next) => {
                self.path.push(self.current);
                self.current = next;
                Ok(Step::Advanced(next))
            }
        }
    }

    /// Pop the last visited node and make it current again.
    ///
    /// Returns `false` when the path is empty (already at the start).
    /// Forward history is discarded; there is no redo.
    pub fn step_back(&mut self) -> bool {
        match self.path.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Whether the traversal currently sits on a result node.
    pub fn at_result(&self) -> Result<bool, CoreError> {
        Ok(self.current_node()?.is_result())
    }

    /// Take the completion record if the traversal sits on a result node.
    ///
    /// Returns `Some` at most once per traversal instance, no matter how many
    /// times the result node is revisited or re-rendered. This is the
    /// at-most-one-save-per-traversal guarantee: the caller persists the
    /// diagnostic exactly when this returns `Some`.
    pub fn take_completion(&mut self) -> Result<Option<Completion>, CoreError> {
        if self.completion_taken || !self.at_result()? {
            return Ok(None);
        }
        self.completion_taken = true;
        let mut path = self.path.clone();
        path.push(self.current);
        Ok(Some(Completion {
            path,
            result_node_id: self.current,
        }))
    }

    /// Replay a recorded path against a node graph.
    ///
    /// Verifies that the path starts at the tree's first node, that every
    /// consecutive pair is connected by an answer edge, and that the final
    /// node is a result node. Returns the terminal result node.
    ///
    /// Used when persisting a diagnostic: a submitted path that cannot be
    /// walked, or that does not end on a result, is a validation failure.
    pub fn replay(nodes: &'a [Node], path: &[NodeId]) -> Result<&'a Node, CoreError> {
        let mut traversal = Traversal::start(nodes)?;

        let (&first, rest) = path.split_first().ok_or_else(|| {
            CoreError::Validation("diagnostic path must not be empty".into())
        })?;
        if first != traversal.current_node_id() {
            return Err(CoreError::Validation(format!(
                "path starts at node {first} but the tree starts at node {}",
                traversal.current_node_id()
            )));
        }

        for &target in rest {
            let node = traversal.current_node()?;
            let answers = node.answers().ok_or_else(|| {
                CoreError::Validation(format!(
                    "path continues past terminal node {}",
                    node.id()
                ))
            })?;
            let index = answers
                .iter()
                .position(|a| a.next == Some(target))
                .ok_or_else(|| {
                    CoreError::Validation(format!(
                        "no answer leads from node {} to node {target}",
                        node.id()
                    ))
                })?;
            traversal.select_answer(index)?;
        }

        let terminal = traversal.current_node()?;
        if !terminal.is_result() {
            return Err(CoreError::Validation(format!(
                "path ends at node {} which is not a result node",
                terminal.id()
            )));
        }
        Ok(terminal)
    }
}
