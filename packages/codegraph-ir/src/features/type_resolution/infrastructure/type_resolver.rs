/*
 * Type Resolver - Local type inference
 *
 * MATCHES: TypeResolver in typing/resolver.py
 *
 * PRODUCTION GRADE:
 * - No Pyright dependency
 * - Local resolution only
 * - BUILTIN/LOCAL/MODULE/PROJECT/EXTERNAL
 * - Generic parameter parsing
 *
 * SOTA INTEGRATION:
 * - Hindley-Milner constraint-based inference via ConstraintSolver
 * - InferTypeResolver for advanced type inference
 * - Supports type variable propagation
 *
 * NO FAKE DATA!
 */

use crate::features::type_resolution::domain::{TypeEntity, TypeFlavor, TypeResolutionLevel};
use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

// SOTA: Import constraint solver for type inference
use super::constraint_solver::{
    Constraint, ConstraintSolver, InferType, SolverError, Substitution,
};
use crate::features::type_resolution::domain::type_system::Type;

lazy_static! {
    /// Python builtin types (matches Python BUILTIN_TYPES)
    static ref BUILTIN_TYPES: HashSet<&'static str> = {
        let mut set = HashSet::new();
        // Primitives
        set.insert("int");
        set.insert("str");
        set.insert("float");
        set.insert("bool");
        set.insert("bytes");
        set.insert("None");
        // Collections
        set.insert("list");
        set.insert("List");
        set.insert("dict");
        set.insert("Dict");
        set.insert("set");
        set.insert("Set");
        set.insert("tuple");
        set.insert("Tuple");
        // Typing
        set.insert("Any");
        set.insert("Optional");
        set.insert("Union");
        set.insert("Callable");
        set.insert("Type");
        set
    };

    /// Stdlib types (matches Python STDLIB_TYPES)
    static ref STDLIB_TYPES: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("Path");
        set.insert("datetime");
        set.insert("UUID");
        set.insert("Decimal");
        set.insert("Logger");
        set
    };
}

/// Type Resolver with SOTA Hindley-Milner Inference
///
/// Combines simple type resolution (builtin/local/module/project/external)
/// with SOTA constraint-based type inference for complex cases.
pub struct TypeResolver {
    repo_id: String,
    local_classes: HashMap<String, String>, // name → node_id
    module_types: HashMap<String, String>,  // name → node_id
    project_types: HashMap<String, String>, // fqn → node_id

    // SOTA: Constraint solver for Hindley-Milner inference
    constraint_solver: ConstraintSolver,
    infer_cache: HashMap<String, InferType>, // Cached inference results
}

impl TypeResolver {
    pub fn new(repo_id: String) -> Self {
        Self {
            repo_id,
            local_classes: HashMap::new(),
            module_types: HashMap::new(),
            project_types: HashMap::new(),
            constraint_solver: ConstraintSolver::new(),
            infer_cache: HashMap::new(),
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // SOTA: Hindley-Milner Type Inference API
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Create a fresh type variable for inference
    pub fn fresh_type_var(&mut self) -> InferType {
        let var_id = self.constraint_solver.fresh_var();
        InferType::Variable(var_id)
    }

    /// Add equality constraint: T1 = T2
    pub fn add_equality_constraint(&mut self, t1: InferType, t2: InferType) {
        self.constraint_solver
            .add_constraint(Constraint::Equality(t1, t2));
    }

    /// Add callable constraint: T is a function (params) -> return
    pub fn add_callable_constraint(
        &mut self,
        t: InferType,
        params: Vec<InferType>,
        ret: InferType,
    ) {
        self.constraint_solver
            .add_constraint(Constraint::Callable(t, params, ret));
    }

    /// Add generic constraint: T = Base[Params]
    pub fn add_generic_constraint(&mut self, t: InferType, base: String, params: Vec<InferType>) {
        self.constraint_solver
            .add_constraint(Constraint::Generic(t, base, params));
    }

    /// Solve all constraints and get substitution
    ///
    /// Returns the substitution map if successful.
    /// After solving, you can use `apply_substitution` to get concrete types.
    pub fn solve_constraints(&mut self) -> Result<Substitution, SolverError> {
        self.constraint_solver.solve()
    }

    /// Apply substitution to an inference type and get concrete type
    pub fn apply_substitution(&self, infer_type: &InferType, subst: &Substitution) -> Option<Type> {
        infer_type.to_concrete(subst)
    }

    /// Convert raw type string to InferType
    pub fn to_infer_type(&mut self, raw_type: &str) -> InferType {
        // Check cache first
        if let Some(cached) = self.infer_cache.get(raw_type) {
            return cached.clone();
        }

        let normalized = raw_type.trim();
        let infer_type = self.parse_to_infer_type(normalized);

        // Cache result
        self.infer_cache
            .insert(raw_type.to_string(), infer_type.clone());
        infer_type
    }

    /// Parse type string into InferType
    fn parse_to_infer_type(&mut self, type_str: &str) -> InferType {
        let normalized = type_str.trim();

        // Empty or whitespace → fresh variable
        if normalized.is_empty() {
            return self.fresh_type_var();
        }

        // Check for generics
        if let Some(open_bracket) = normalized.find('[') {
            if let Some(close_bracket) = normalized.rfind(']') {
                let base = normalized[..open_bracket].trim();
                let params_str = &normalized[open_bracket + 1..close_bracket];
                let param_strs = self.split_params(params_str);

                // Recursively parse parameters
                let params: Vec<InferType> = param_strs
                    .iter()
                    .map(|p| self.parse_to_infer_type(p))
                    .collect();

                // Check if base is Callable
                if base == "Callable" && params.len() >= 2 {
                    // Callable[[params], return]
                    let ret = params
                        .last()
                        .cloned()
                        .unwrap_or_else(|| self.fresh_type_var());
                    let fn_params = if params.len() > 1 {
                        params[..params.len() - 1].to_vec()
                    } else {
                        Vec::new()
                    };
                    return InferType::CallableInfer {
                        params: fn_params,
                        return_type: Box::new(ret),
                    };
                }

                // Check if base is Union
                if base == "Union" {
                    return InferType::UnionInfer(params);
                }

                // Generic type
                return InferType::GenericInfer {
                    base: base.to_string(),
                    params,
                };
            }
        }

        // Check for Union syntax (T | U)
        if normalized.contains(" | ") {
            let parts: Vec<&str> = normalized.split(" | ").collect();
            let union_types: Vec<InferType> = parts
                .iter()
                .map(|p| self.parse_to_infer_type(p.trim()))
                .collect();
            return InferType::UnionInfer(union_types);
        }

        // Simple type → concrete
        InferType::Concrete(Type::simple(normalized))
    }

    /// Reset constraint solver for new inference session
    pub fn reset_inference(&mut self) {
        self.constraint_solver = ConstraintSolver::new();
        self.infer_cache.clear();
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Original API (preserved for backward compatibility)
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn register_local_class(&mut self, name: String, node_id: String) {
        self.local_classes.insert(name, node_id);
    }

    pub fn register_module_type(&mut self, name: String, node_id: String) {
        self.module_types.insert(name, node_id);
    }

    pub fn register_project_type(&mut self, fqn: String, node_id: String) {
        self.project_types.insert(fqn.clone(), node_id.clone());

        // Also register by simple name
        if let Some(simple) = fqn.split('.').next_back() {
            self.project_types
                .entry(simple.to_string())
                .or_insert(node_id);
        }
    }

    /// Resolve type annotation
    ///
    /// PRODUCTION: No fake data, accurate classification
    pub fn resolve_type(&self, raw_type: &str) -> TypeEntity {
        let normalized = raw_type.trim();

        // Generate ID
        let type_id = self.generate_type_id(normalized);

        // Classify
        let (flavor, level, target) = self.classify_type(normalized);

        // Check nullable
        let is_nullable = self.is_nullable(normalized);

        // Parse generics
        let generic_params = self.extract_generic_params(normalized);

        TypeEntity {
            id: type_id,
            raw: normalized.to_string(),
            flavor,
            is_nullable,
            resolution_level: level,
            resolved_target: target,
            generic_param_ids: generic_params,
        }
    }

    fn generate_type_id(&self, type_str: &str) -> String {
        use sha2::{Digest, Sha256};

        let key = format!("type:{}:{}", self.repo_id, type_str);
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        format!("{:x}", hasher.finalize())[..32].to_string()
    }

    fn classify_type(&self, type_str: &str) -> (TypeFlavor, TypeResolutionLevel, Option<String>) {
        // Extract base type (before '[')
        let base_type = type_str.split('[').next().unwrap_or(type_str).trim();

        // 1. Builtin
        if BUILTIN_TYPES.contains(base_type) {
            return (TypeFlavor::Builtin, TypeResolutionLevel::Builtin, None);
        }

        // 2. Local
        if let Some(node_id) = self.local_classes.get(base_type) {
            return (
                TypeFlavor::User,
                TypeResolutionLevel::Local,
                Some(node_id.clone()),
            );
        }

        // 3. Module
        if let Some(node_id) = self.module_types.get(base_type) {
            return (
                TypeFlavor::User,
                TypeResolutionLevel::Module,
                Some(node_id.clone()),
            );
        }

        // 4. Project
        if let Some(node_id) = self.project_types.get(base_type) {
            return (
                TypeFlavor::User,
                TypeResolutionLevel::Project,
                Some(node_id.clone()),
            );
        }

        // 5. Stdlib
        if STDLIB_TYPES.contains(base_type) {
            return (TypeFlavor::External, TypeResolutionLevel::External, None);
        }

        // 6. Unresolved
        (TypeFlavor::External, TypeResolutionLevel::Raw, None)
    }

    fn is_nullable(&self, type_str: &str) -> bool {
        type_str.contains("Optional[") || type_str.contains("| None") || type_str.contains("None |")
    }

    fn extract_generic_params(&self, type_str: &str) -> Vec<String> {
        if !type_str.contains('[') {
            return Vec::new();
        }

        // Find content between '[' and ']'
        let start = match type_str.find('[') {
            Some(i) => i,
            None => return Vec::new(),
        };

        let end = match type_str.rfind(']') {
            Some(i) => i,
            None => return Vec::new(),
        };

        if start >= end {
            return Vec::new();
        }

        let params_str = &type_str[start + 1..end];

        // Split by comma (respecting nested brackets)
        let params = self.split_params(params_str);

        // Recursively resolve
        params.iter().map(|p| self.resolve_type(p).id).collect()
    }

    fn split_params(&self, params_str: &str) -> Vec<String> {
        let mut params = Vec::new();
        let mut current = String::new();
        let mut depth = 0;

        for ch in params_str.chars() {
            match ch {
                '[' => {
                    depth += 1;
                    current.push(ch);
                }
                ']' => {
                    depth -= 1;
                    current.push(ch);
                }
                ',' if depth == 0 => {
                    let param = current.trim().to_string();
                    if !param.is_empty() {
                        params.push(param);
                    }
                    current.clear();
                }
                _ => current.push(ch),
            }
        }

        let param = current.trim().to_string();
        if !param.is_empty() {
            params.push(param);
        }

        params
    }
}
