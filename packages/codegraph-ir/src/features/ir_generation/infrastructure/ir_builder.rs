/*
 * IR Builder - Converts AST to IR (Node + Edge)
 *
 * MATCHES: packages/codegraph-engine/.../generators/python_generator.py
 *
 * Responsibilities:
 * - Generate Node IDs (hash-based, stable)
 * - Build FQNs (Fully Qualified Names)
 * - Create Nodes with complete metadata
 * - Create Edges (CONTAINS, CALLS, READS, WRITES, INHERITS)
 * - Manage scope stack (module → class → function)
 *
 * PRODUCTION REQUIREMENTS:
 * - No fake data
 * - All fields validated
 * - Type safety enforced
 * - Error handling complete
 */

use crate::features::type_resolution::domain::type_entity::TypeEntity;
use crate::features::type_resolution::infrastructure::type_resolver::TypeResolver;
use crate::shared::models::{Edge, EdgeKind, EdgeMetadata, Node, NodeKind, Span};
use crate::shared::utils::identity;
use std::collections::HashMap;

/// Scope context for FQN building
#[derive(Debug, Clone)]
struct ScopeFrame {
    kind: ScopeKind,
    name: String,
    node_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeKind {
    Module,
    Class,
    Function,
}

/// IR Builder - Stateful builder for IR generation
pub struct IRBuilder {
    // Context
    repo_id: String,
    file_path: String,
    language: String,

    // Scope stack
    scope_stack: Vec<ScopeFrame>,

    // Type resolution
    type_resolver: TypeResolver,

    // Output
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    type_entities: Vec<TypeEntity>,

    // Counters for unique IDs
    edge_counter: usize,

    // Per (kind, source, target) occurrence counter feeding the edge-id hash
    edge_occurrences: HashMap<(EdgeKind, String, String), u32>,
}

impl IRBuilder {
    /// Create new IR builder
    ///
    /// # Arguments
    /// * `repo_id` - Repository ID
    /// * `file_path` - File path (relative to repo root)
    /// * `language` - Language (e.g., "python")
    /// * `module_path` - Module FQN (e.g., "myapp.services.user")
    pub fn new(repo_id: String, file_path: String, language: String, module_path: String) -> Self {
        let type_resolver = TypeResolver::new(repo_id.clone());

        let mut builder = Self {
            repo_id,
            file_path: file_path.clone(),
            language,
            scope_stack: Vec::new(),
            type_resolver,
            nodes: Vec::new(),
            edges: Vec::new(),
            type_entities: Vec::new(),
            edge_counter: 0,
            edge_occurrences: HashMap::new(),
        };

        // Initialize with module scope
        builder.push_scope(ScopeKind::Module, module_path.clone());

        builder
    }

    /// Push new scope
    fn push_scope(&mut self, kind: ScopeKind, name: String) {
        self.scope_stack.push(ScopeFrame {
            kind,
            name,
            node_id: None,
        });
    }

    /// Pop scope
    fn pop_scope(&mut self) {
        self.scope_stack.pop();
    }

    /// Set node ID for current scope
    fn set_current_scope_node_id(&mut self, node_id: String) {
        if let Some(frame) = self.scope_stack.last_mut() {
            frame.node_id = Some(node_id);
        }
    }

    /// Get current parent node ID
    fn current_parent_id(&self) -> Option<String> {
        self.scope_stack.last()?.node_id.clone()
    }

    /// Build FQN from scope stack
    fn build_fqn(&self, name: &str) -> String {
        let mut parts: Vec<&str> = self.scope_stack.iter().map(|f| f.name.as_str()).collect();
        parts.push(name);
        parts.join(".")
    }

    /// Get current module path
    fn module_path(&self) -> String {
        self.scope_stack
            .first()
            .map(|f| f.name.clone())
            .unwrap_or_default()
    }

    /// Generate Node ID (SHA-256, stable; §3/§4.2 identity scheme)
    fn generate_node_id(&self, kind: NodeKind, fqn: &str) -> String {
        identity::node_id(
            &self.repo_id,
            kind,
            &self.file_path,
            fqn,
            &self.language,
            "",
        )
    }

    /// Generate a salted Node ID, for cases where kind+fqn alone could
    /// collide (e.g. two anonymous lambdas in the same scope).
    fn generate_salted_node_id(&self, kind: NodeKind, fqn: &str, salt: &str) -> String {
        identity::node_id(&self.repo_id, kind, &self.file_path, fqn, &self.language, salt)
    }

    /// Next occurrence counter for a given (kind, source, target) triple.
    fn next_occurrence(&mut self, kind: EdgeKind, source_id: &str, target_id: &str) -> u32 {
        self.edge_counter += 1;
        let key = (kind, source_id.to_string(), target_id.to_string());
        let occ = self.edge_occurrences.entry(key).or_insert(0);
        let current = *occ;
        *occ += 1;
        current
    }

    /// Build an edge with a spec-compliant hashed id and occurrence slot.
    fn make_edge(
        &mut self,
        kind: EdgeKind,
        source_id: String,
        target_id: String,
        span: Span,
        metadata: Option<EdgeMetadata>,
    ) -> Edge {
        let occurrence = self.next_occurrence(kind, &source_id, &target_id);
        let id = identity::edge_id(kind, &source_id, &target_id, occurrence);
        Edge {
            id,
            kind,
            source_id,
            target_id,
            occurrence,
            span: Some(span),
            metadata,
            attrs: None,
        }
    }

    /// Generate content hash (SHA256)
    fn generate_content_hash(&self, content: &str) -> String {
        identity::content_hash(content.as_bytes())
    }

    /// Add CONTAINS edge
    pub fn add_contains_edge(&mut self, parent_id: String, child_id: String, span: Span) {
        let edge = self.make_edge(EdgeKind::Contains, parent_id, child_id, span, None);
        self.edges.push(edge);
    }

    /// Add CALLS edge
    pub fn add_calls_edge(&mut self, caller_id: String, callee_fqn: String, span: Span) {
        let edge = self.make_edge(EdgeKind::Calls, caller_id, callee_fqn, span, None);
        self.edges.push(edge);
    }

    /// Add READS edge
    pub fn add_reads_edge(&mut self, reader_id: String, variable_fqn: String, span: Span) {
        let edge = self.make_edge(EdgeKind::Reads, reader_id, variable_fqn, span, None);
        self.edges.push(edge);
    }

    /// Add WRITES edge
    pub fn add_writes_edge(&mut self, writer_id: String, variable_fqn: String, span: Span) {
        let edge = self.make_edge(EdgeKind::Writes, writer_id, variable_fqn, span, None);
        self.edges.push(edge);
    }

    /// Add INHERITS edge
    pub fn add_inherits_edge(&mut self, child_id: String, parent_fqn: String, span: Span) {
        let edge = self.make_edge(EdgeKind::Inherits, child_id, parent_fqn, span, None);
        self.edges.push(edge);
    }

    /// Add IMPORTS edge (RFC-062: SOTA cross-file resolution)
    ///
    /// Creates an edge from the importing context (module/function) to the imported symbol.
    /// This enables:
    /// - Cross-file dependency tracking
    /// - Import resolution in GlobalContext
    /// - File dependency graph construction
    ///
    /// # Arguments
    /// * `importer_id` - Node ID of the importing context (module or function)
    /// * `imported_fqn` - FQN of the imported symbol (e.g., "os.path.join")
    /// * `span` - Source location of the import statement
    /// * `alias` - Optional alias (e.g., "import numpy as np" → alias = "np")
    /// * `is_from_import` - True for "from x import y" style
    pub fn add_imports_edge(
        &mut self,
        importer_id: String,
        imported_fqn: String,
        span: Span,
        alias: Option<String>,
        is_from_import: bool,
    ) {
        let metadata = EdgeMetadata {
            alias,
            is_from_import,
        };
        let edge = self.make_edge(
            EdgeKind::Imports,
            importer_id,
            imported_fqn,
            span,
            Some(metadata),
        );
        self.edges.push(edge);
    }

    /// Create Import Node (RFC-062: SOTA import tracking)
    ///
    /// Creates a node representing an import statement.
    /// Used for:
    /// - Import occurrence tracking
    /// - Symbol resolution
    /// - Dependency analysis
    ///
    /// # Arguments
    /// * `module_name` - Imported module (e.g., "os.path")
    /// * `imported_names` - Specific names imported (e.g., ["join", "exists"])
    /// * `alias` - Module alias if any
    /// * `span` - Source location
    /// * `is_from_import` - True for "from x import y" style
    pub fn create_import_node(
        &mut self,
        module_name: String,
        imported_names: Vec<(String, Option<String>)>, // (name, alias)
        alias: Option<String>,
        span: Span,
        is_from_import: bool,
    ) -> Vec<String> {
        // For module-level imports, use module path as importer
        let parent_id = self
            .current_parent_id()
            .or_else(|| Some(self.module_path()));
        let mut created_ids = Vec::new();

        if is_from_import {
            // "from module import name1, name2 as alias2"
            for (name, name_alias) in imported_names {
                let fqn = format!("{}.{}", module_name, name);
                let node_id = self.generate_node_id(NodeKind::Import, &fqn);

                let node = Node::new(
                    node_id.clone(),
                    NodeKind::Import,
                    fqn.clone(),
                    self.file_path.clone(),
                    span,
                )
                .with_language(self.language.clone())
                .with_name(name_alias.clone().unwrap_or(name.clone()))
                .with_module_path(self.module_path());

                let mut node = node;
                node.parent_id = parent_id.clone();

                self.nodes.push(node);

                // Add IMPORTS edge
                if let Some(ref p_id) = parent_id {
                    self.add_imports_edge(p_id.clone(), fqn, span, name_alias, true);
                }

                created_ids.push(node_id);
            }
        } else {
            // "import module" or "import module as alias"
            let fqn = module_name.clone();
            let node_id = self.generate_node_id(NodeKind::Import, &fqn);

            let node = Node::new(
                node_id.clone(),
                NodeKind::Import,
                fqn.clone(),
                self.file_path.clone(),
                span,
            )
            .with_language(self.language.clone())
            .with_name(alias.clone().unwrap_or(module_name.clone()))
            .with_module_path(self.module_path());

            let mut node = node;
            node.parent_id = parent_id.clone();

            self.nodes.push(node);

            // Add IMPORTS edge
            if let Some(ref p_id) = parent_id {
                self.add_imports_edge(p_id.clone(), fqn, span, alias, false);
            }

            created_ids.push(node_id);
        }

        created_ids
    }

    /// Create Function/Method Node
    ///
    /// MATCHES: FunctionAnalyzer.process_function()
    pub fn create_function_node(
        &mut self,
        name: String,
        span: Span,
        body_span: Option<Span>,
        is_method: bool,
        docstring: Option<String>,
        source_text: &str,
        return_type_annotation: Option<String>,
    ) -> Result<String, String> {
        // Validate inputs
        if name.is_empty() {
            return Err("Function name cannot be empty".to_string());
        }

        // Build FQN
        let fqn = self.build_fqn(&name);

        // Determine kind
        let kind = if is_method {
            NodeKind::Method
        } else {
            NodeKind::Function
        };

        // Generate node ID
        let node_id = self.generate_node_id(kind, &fqn);

        // Generate content hash
        let content_hash = self.generate_content_hash(source_text);

        // Get parent ID
        let parent_id = self.current_parent_id();

        // Resolve return type for type tracking
        let return_type = return_type_annotation.clone();

        // Create node using builder pattern
        let mut node = Node::new(
            node_id.clone(),
            kind,
            fqn.clone(),
            self.file_path.clone(),
            span,
        )
        .with_language(self.language.clone())
        .with_name(name.clone())
        .with_module_path(self.module_path());

        node.content_hash = Some(content_hash);
        node.parent_id = parent_id.clone();
        node.body_span = body_span;
        node.docstring = docstring;
        node.return_type = return_type;

        self.nodes.push(node);

        // Add CONTAINS edge from parent
        if let Some(parent) = parent_id {
            self.add_contains_edge(parent, node_id.clone(), span);
        }

        // Push function scope
        self.push_scope(ScopeKind::Function, name);
        self.set_current_scope_node_id(node_id.clone());

        Ok(node_id)
    }

    /// Create Class Node
    ///
    /// MATCHES: ClassAnalyzer.process_class()
    pub fn create_class_node(
        &mut self,
        name: String,
        span: Span,
        body_span: Option<Span>,
        base_classes: Vec<String>,
        docstring: Option<String>,
        source_text: &str,
    ) -> Result<String, String> {
        // Validate inputs
        if name.is_empty() {
            return Err("Class name cannot be empty".to_string());
        }

        // Build FQN
        let fqn = self.build_fqn(&name);

        // Generate node ID
        let node_id = self.generate_node_id(NodeKind::Class, &fqn);

        // Generate content hash
        let content_hash = self.generate_content_hash(source_text);

        // Get parent ID
        let parent_id = self.current_parent_id();

        // Create node using builder pattern
        let mut node = Node::new(
            node_id.clone(),
            NodeKind::Class,
            fqn.clone(),
            self.file_path.clone(),
            span,
        )
        .with_language(self.language.clone())
        .with_name(name.clone())
        .with_module_path(self.module_path());

        node.content_hash = Some(content_hash);
        node.parent_id = parent_id.clone();
        node.body_span = body_span;
        node.docstring = docstring;
        node.base_classes = if base_classes.is_empty() {
            None
        } else {
            Some(base_classes.clone())
        };

        self.nodes.push(node);

        // Add CONTAINS edge from parent
        if let Some(parent) = parent_id {
            self.add_contains_edge(parent, node_id.clone(), span);
        }

        // Add INHERITS edges
        for base_class in base_classes {
            // Resolve base class FQN (simplified - full resolution needs type system)
            let base_fqn = if base_class.contains('.') {
                base_class
            } else {
                // Assume same module for simple names
                format!("{}.{}", self.module_path(), base_class)
            };

            self.add_inherits_edge(node_id.clone(), base_fqn, span);
        }

        // Push class scope
        self.push_scope(ScopeKind::Class, name);
        self.set_current_scope_node_id(node_id.clone());

        Ok(node_id)
    }

    /// Finish function/class processing (pop scope)
    pub fn finish_scope(&mut self) {
        self.pop_scope();
    }

    /// Get all nodes
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Get all edges
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Create Variable Node
    ///
    /// MATCHES: PythonVariableAnalyzer._process_assignment()
    pub fn create_variable_node(
        &mut self,
        name: String,
        span: Span,
        parent_id: String,
        type_annotation: Option<String>,
    ) -> Result<String, String> {
        // Validate
        if name.is_empty() {
            return Err("Variable name cannot be empty".to_string());
        }

        // Build FQN (parent.variable)
        let fqn = format!(
            "{}.{}",
            self.scope_stack
                .last()
                .map(|f| f.name.as_str())
                .unwrap_or(""),
            name
        );

        // Generate node ID
        let node_id = self.generate_node_id(NodeKind::Variable, &fqn);

        // Create node using builder pattern
        let mut node = Node::new(
            node_id.clone(),
            NodeKind::Variable,
            fqn,
            self.file_path.clone(),
            span,
        )
        .with_language(self.language.clone())
        .with_name(name)
        .with_module_path(self.module_path())
        .with_parent(parent_id.clone());

        node.type_annotation = type_annotation;

        self.nodes.push(node);

        // Add CONTAINS edge from parent
        self.add_contains_edge(parent_id, node_id.clone(), span);

        Ok(node_id)
    }

    /// Consume builder and return (nodes, edges)
    pub fn build(self) -> (Vec<Node>, Vec<Edge>, Vec<TypeEntity>) {
        (self.nodes, self.edges, self.type_entities)
    }

    /// Resolve type annotation and store TypeEntity
    pub fn resolve_type(&mut self, type_annotation: &str) -> Option<String> {
        if type_annotation.is_empty() {
            return None;
        }

        let type_entity = self.type_resolver.resolve_type(type_annotation);
        let type_id = type_entity.id.clone();
        self.type_entities.push(type_entity);
        Some(type_id)
    }

    /// Register local class for type resolution
    pub fn register_local_class(&mut self, name: String, node_id: String) {
        self.type_resolver.register_local_class(name, node_id);
    }
}
