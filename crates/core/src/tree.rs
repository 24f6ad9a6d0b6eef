//! Decision-tree node model and write-time validation.
//!
//! A tree is a named, iconed graph of nodes stored as an embedded JSON array.
//! Nodes are a closed tagged union of three kinds: `question`, `test`, and
//! `result`. Answers carry an optional `next` node id; referential integrity
//! of those links is enforced when a tree is saved, not during traversal.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Node ids are assigned by the tree editor and are local to one tree.
pub type NodeId = i64;

/// Result severity. Maps to the three fixed report colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }

    /// Parse a stored severity string. The set is closed.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "success" => Ok(Severity::Success),
            "warning" => Ok(Severity::Warning),
            "danger" => Ok(Severity::Danger),
            other => Err(CoreError::Validation(format!(
                "unknown severity '{other}' (expected success, warning, or danger)"
            ))),
        }
    }
}

/// One selectable answer on a question or test node.
///
/// `next` is `None` while an editor has not yet wired the answer to a target
/// node. Saving a tree with unwired answers is rejected (see [`validate_nodes`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    #[serde(default)]
    pub next: Option<NodeId>,
}

/// A reference-test snapshot embedded in a test node.
///
/// Fields are copied from the canonical reference test at authoring time and
/// are never re-synced when the canonical record is edited later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedTest {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "videoUrl")]
    pub video_url: Option<String>,
}

/// One step in a decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// A branching question with one answer per outgoing edge.
    Question {
        id: NodeId,
        text: String,
        answers: Vec<Answer>,
    },
    /// Physical tests to perform, then a branching question about the outcome.
    Test {
        id: NodeId,
        text: String,
        #[serde(default)]
        tests: Vec<EmbeddedTest>,
        answers: Vec<Answer>,
    },
    /// A terminal diagnostic result.
    Result {
        id: NodeId,
        title: String,
        severity: Severity,
        #[serde(default)]
        description: String,
        #[serde(default)]
        recommendations: Vec<String>,
        #[serde(default, rename = "isRedFlag")]
        is_red_flag: bool,
    },
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::Question { id, .. } | Node::Test { id, .. } | Node::Result { id, .. } => *id,
        }
    }

    /// The outgoing answers, or `None` on a terminal result node.
    pub fn answers(&self) -> Option<&[Answer]> {
        match self {
            Node::Question { answers, .. } | Node::Test { answers, .. } => Some(answers),
            Node::Result { .. } => None,
        }
    }

    pub fn is_result(&self) -> bool {
        matches!(self, Node::Result { .. })
    }
}

/// Look up a node by id. Linear scan; trees are small.
pub fn find_node(nodes: &[Node], id: NodeId) -> Option<&Node> {
    nodes.iter().find(|n| n.id() == id)
}

/// Validate a node graph before it is saved.
///
/// Rejects:
/// - an empty tree (traversal starts at the first stored node, so there must
///   be one),
/// - duplicate node ids,
/// - answers whose `next` target was never assigned,
/// - answers whose `next` target resolves to no node in the tree (covers the
///   deleted-node case, since the whole graph is saved in one operation).
pub fn validate_nodes(nodes: &[Node]) -> Result<(), CoreError> {
    if nodes.is_empty() {
        return Err(CoreError::Validation(
            "a tree must contain at least one node".into(),
        ));
    }

    let mut seen = std::collections::HashSet::new();
    for node in nodes {
        if !seen.insert(node.id()) {
            return Err(CoreError::Validation(format!(
                "duplicate node id {}",
                node.id()
            )));
        }
    }

    for node in nodes {
        let Some(answers) = node.answers() else {
            continue;
        };
        for (idx, answer) in answers.iter().enumerate() {
            match answer.next {
                None => {
                    return Err(CoreError::Validation(format!(
                        "node {} answer {} ('{}') has no target node",
                        node.id(),
                        idx,
                        answer.text
                    )));
                }
                Some(target) if !seen.contains(&target) => {
                    return Err(CoreError::Validation(format!(
                        "node {} answer {} ('{}') targets unknown node {}",
                        node.id(),
                        idx,
                        answer.text,
                        target
                    )));
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: NodeId, targets: &[Option<NodeId>]) -> Node {
        Node::Question {
            id,
            text: format!("Question {id}"),
            answers: targets
                .iter()
                .map(|t| Answer {
                    text: "Oui".into(),
                    next: *t,
                })
                .collect(),
        }
    }

    fn result(id: NodeId) -> Node {
        Node::Result {
            id,
            title: format!("Result {id}"),
            severity: Severity::Success,
            description: String::new(),
            recommendations: vec![],
            is_red_flag: false,
        }
    }

    #[test]
    fn deserializes_the_wire_shape() {
        let json = serde_json::json!([
            {"id": 1, "type": "question", "text": "Douleur aiguë ?",
             "answers": [{"text": "Oui", "next": 2}, {"text": "Non", "next": 3}]},
            {"id": 2, "type": "result", "title": "Urgence", "severity": "danger",
             "recommendations": ["Consulter"]},
            {"id": 3, "type": "result", "title": "Bénin", "severity": "success",
             "recommendations": ["Repos"]}
        ]);
        let nodes: Vec<Node> = serde_json::from_value(json).unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].id(), 1);
        assert_eq!(nodes[0].answers().unwrap()[0].next, Some(2));
        assert!(nodes[1].is_result());
        match &nodes[1] {
            Node::Result {
                severity,
                recommendations,
                is_red_flag,
                ..
            } => {
                assert_eq!(*severity, Severity::Danger);
                assert_eq!(recommendations.as_slice(), vec!["Consulter".to_string()]);
                assert!(!*is_red_flag);
            }
            other => panic!("expected result node, got {other:?}"),
        }
        assert!(validate_nodes(&nodes).is_ok());
    }

    #[test]
    fn test_node_round_trips_embedded_snapshots() {
        let node = Node::Test {
            id: 4,
            text: "Test positif ?".into(),
            tests: vec![EmbeddedTest {
                id: Some(7),
                name: "Spurling".into(),
                description: "Compression axiale".into(),
                video_url: Some("https://example.com/v".into()),
            }],
            answers: vec![Answer {
                text: "Positif".into(),
                next: Some(5),
            }],
        };
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "test");
        assert_eq!(value["tests"][0]["videoUrl"], "https://example.com/v");
        let back: Node = serde_json::from_value(value).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn empty_tree_is_rejected() {
        assert!(validate_nodes(&[]).is_err());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let nodes = vec![result(1), result(1)];
        let err = validate_nodes(&nodes).unwrap_err();
        assert!(err.to_string().contains("duplicate node id 1"));
    }

    #[test]
    fn unwired_answer_is_rejected() {
        let nodes = vec![question(1, &[None]), result(2)];
        let err = validate_nodes(&nodes).unwrap_err();
        assert!(err.to_string().contains("has no target node"));
    }

    #[test]
    fn dangling_answer_target_is_rejected() {
        let nodes = vec![question(1, &[Some(99)]), result(2)];
        let err = validate_nodes(&nodes).unwrap_err();
        assert!(err.to_string().contains("unknown node 99"));
    }

    #[test]
    fn well_formed_tree_passes() {
        let nodes = vec![question(1, &[Some(2), Some(3)]), result(2), result(3)];
        assert!(validate_nodes(&nodes).is_ok());
    }

    #[test]
    fn severity_parse_is_closed() {
        assert_eq!(Severity::parse("danger").unwrap(), Severity::Danger);
        assert!(Severity::parse("critical").is_err());
        assert!(Severity::parse("Danger").is_err());
    }
}
