//! Type-safe wrappers for specialized node types
//!
//! Uses the Newtype Pattern to provide type safety while wrapping the underlying Node type.
//! This prevents accidentally mixing different semantic types that share the same structure.
//!
//! # Why Newtype Pattern?
//!
//! Before (Type Alias - unsafe):
//! ```ignore
//! pub type TypeEntity = Node;
//! pub type SignatureEntity = Node;
//!
//! fn process_type(t: TypeEntity) { ... }
//! let sig = SignatureEntity { ... };
//! process_type(sig);  // ❌ Compiles but semantically wrong!
//! ```
//!
//! After (Newtype Pattern - type-safe):
//! ```ignore
//! pub struct TypeEntity(Node);
//! pub struct SignatureEntity(Node);
//!
//! fn process_type(t: TypeEntity) { ... }
//! let sig = SignatureEntity(...);
//! process_type(sig);  // ✅ Compile error - types don't match!
//! ```

use super::Node;
use std::ops::{Deref, DerefMut};

/// Type entity wrapper
///
/// Represents a type definition in the codebase (classes, interfaces, type aliases, etc.)
///
/// # Example
/// ```text
/// use codegraph_ir::shared::models::{TypeEntity, Node, NodeKind, Span};
///
/// let node = Node {
///     id: "type:MyClass".to_string(),
///     kind: NodeKind::Class,
///     name: Some("MyClass".to_string()),
///     file_path: "src/main.py".to_string(),
///     span: Span::new(10, 0, 20, 0),
///     language: "python".to_string(),
///     ..Default::default()
/// };
///
/// let type_entity = TypeEntity::new(node);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TypeEntity(Node);

impl TypeEntity {
    /// Create new TypeEntity from Node
    pub fn new(node: Node) -> Self {
        Self(node)
    }

    /// Unwrap into inner Node
    pub fn into_inner(self) -> Node {
        self.0
    }

    /// Get reference to inner Node
    pub fn as_node(&self) -> &Node {
        &self.0
    }

    /// Get mutable reference to inner Node
    pub fn as_node_mut(&mut self) -> &mut Node {
        &mut self.0
    }
}

// Deref to allow direct access to Node fields
impl Deref for TypeEntity {
    type Target = Node;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for TypeEntity {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Node> for TypeEntity {
    fn from(node: Node) -> Self {
        Self(node)
    }
}

impl From<TypeEntity> for Node {
    fn from(entity: TypeEntity) -> Self {
        entity.0
    }
}

/// Signature entity wrapper
///
/// Represents a function/method signature with parameters and return type.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureEntity(Node);

impl SignatureEntity {
    pub fn new(node: Node) -> Self {
        Self(node)
    }

    pub fn into_inner(self) -> Node {
        self.0
    }

    pub fn as_node(&self) -> &Node {
        &self.0
    }

    pub fn as_node_mut(&mut self) -> &mut Node {
        &mut self.0
    }
}

impl Deref for SignatureEntity {
    type Target = Node;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SignatureEntity {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Node> for SignatureEntity {
    fn from(node: Node) -> Self {
        Self(node)
    }
}

impl From<SignatureEntity> for Node {
    fn from(entity: SignatureEntity) -> Self {
        entity.0
    }
}

/// Variable entity wrapper
///
/// Represents a variable declaration or assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableEntity(Node);

impl VariableEntity {
    pub fn new(node: Node) -> Self {
        Self(node)
    }

    pub fn into_inner(self) -> Node {
        self.0
    }

    pub fn as_node(&self) -> &Node {
        &self.0
    }

    pub fn as_node_mut(&mut self) -> &mut Node {
        &mut self.0
    }
}

impl Deref for VariableEntity {
    type Target = Node;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for VariableEntity {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Node> for VariableEntity {
    fn from(node: Node) -> Self {
        Self(node)
    }
}

impl From<VariableEntity> for Node {
    fn from(entity: VariableEntity) -> Self {
        entity.0
    }
}
