/*
 * FQN (Fully Qualified Name) Resolver
 *
 * Resolves function/class references to their fully qualified names.
 *
 * SOTA Implementation based on:
 * - Python IR Generator (codegraph-engine)
 * - PyCG (Python Call Graph) - ACM ISSTA 2021
 * - Pyan3 (Python static analyzer)
 * - Pyright/Pylance (Microsoft)
 *
 * Key Features:
 * - Built-in function resolution (builtins.input, builtins.eval, etc.)
 * - Standard library module tracking (os.system, subprocess.run, etc.)
 * - Import alias resolution (numpy as np → numpy)
 * - Attribute chain resolution (os.path.join → os.path.join)
 */

use std::collections::HashMap;

/// FQN Resolver for Python
///
/// Resolves simple names (like "input", "eval") to FQNs (like "builtins.input")
pub struct FqnResolver {
    /// Import aliases (e.g., np → numpy, pd → pandas)
    import_aliases: HashMap<String, String>,
}

impl FqnResolver {
    pub fn new() -> Self {
        Self {
            import_aliases: HashMap::new(),
        }
    }

    /// Register an import alias
    ///
    /// # Examples
    /// ```text
    /// resolver.register_alias("np", "numpy");
    /// resolver.register_alias("pd", "pandas");
    /// ```
    pub fn register_alias(&mut self, alias: String, module: String) {
        self.import_aliases.insert(alias, module);
    }

    /// Resolve a function/class name to its FQN
    ///
    /// # Arguments
    /// * `name` - Function or class name (e.g., "input", "os.system", "np.array")
    ///
    /// # Returns
    /// Fully qualified name (e.g., "builtins.input", "os.system", "numpy.array")
    ///
    /// # Examples
    /// ```text
    /// resolver.resolve("input")      → "builtins.input"
    /// resolver.resolve("eval")       → "builtins.eval"
    /// resolver.resolve("os.system")  → "os.system"
    /// resolver.resolve("np.array")   → "numpy.array" (if np is aliased)
    /// ```
    pub fn resolve(&self, name: &str) -> String {
        // Check if it has a dot (module.function)
        if name.contains('.') {
            // Split into parts
            let parts: Vec<&str> = name.split('.').collect();
            let first_part = parts[0];

            // Check if first part is an alias
            if let Some(real_module) = self.import_aliases.get(first_part) {
                // Replace alias with real module name
                let rest = &parts[1..].join(".");
                return format!("{}.{}", real_module, rest);
            }

            // Not an alias, return as-is
            return name.to_string();
        }

        // Simple name (no dot)
        // Check if it's a built-in
        if is_python_builtin(name) {
            format!("builtins.{}", name)
        } else {
            // Unknown simple name - mark as external
            format!("external.{}", name)
        }
    }
}

impl Default for FqnResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a name is a Python built-in
///
/// Based on:
/// - Python 3.12 built-ins: https://docs.python.org/3/library/functions.html
/// - codegraph-engine/python/call_analyzer.py:383-472
/// - Security-critical functions flagged for taint analysis
fn is_python_builtin(name: &str) -> bool {
    // SOTA: Comprehensive built-in list from Python IR Generator
    // Reference: packages/codegraph-engine/.../python/call_analyzer.py:383-472
    const PYTHON_BUILTINS: &[&str] = &[
        // ═══════════════════════════════════════════════════════════════
        // Types (15 items)
        // ═══════════════════════════════════════════════════════════════
        "dict",
        "list",
        "set",
        "tuple",
        "frozenset",
        "str",
        "int",
        "float",
        "bool",
        "bytes",
        "bytearray",
        "object",
        "type",
        "super",
        "complex",
        // ═══════════════════════════════════════════════════════════════
        // Functions (30 items)
        // ═══════════════════════════════════════════════════════════════
        "len",
        "range",
        "enumerate",
        "zip",
        "map",
        "filter",
        "sorted",
        "reversed",
        "min",
        "max",
        "sum",
        "abs",
        "all",
        "any",
        "iter",
        "next",
        "repr",
        "hash",
        "format",
        "round",
        "pow",
        "divmod",
        "chr",
        "ord",
        "bin",
        "hex",
        "oct",
        "slice",
        "memoryview",
        "Ellipsis",
        // ═══════════════════════════════════════════════════════════════
        // Security-Critical Functions (10 items)
        // ═══════════════════════════════════════════════════════════════
        // IMPORTANT: These are SOURCES and SINKS in taint analysis
        "print",      // Output sink
        "input",      // User input source (CRITICAL)
        "open",       // File I/O sink (CRITICAL)
        "eval",       // Code execution sink (CRITICAL)
        "exec",       // Code execution sink (CRITICAL)
        "compile",    // Code compilation sink (CRITICAL)
        "__import__", // Dynamic import (CRITICAL)
        "getattr",    // Attribute access (potential sink)
        "setattr",    // Attribute mutation (potential sink)
        "delattr",    // Attribute deletion
        // ═══════════════════════════════════════════════════════════════
        // Reflection & Introspection (10 items)
        // ═══════════════════════════════════════════════════════════════
        "hasattr",
        "isinstance",
        "issubclass",
        "callable",
        "id",
        "vars",
        "dir",
        "globals",
        "locals",
        "help",
        // ═══════════════════════════════════════════════════════════════
        // Decorators & Descriptors (3 items)
        // ═══════════════════════════════════════════════════════════════
        "staticmethod",
        "classmethod",
        "property",
        // ═══════════════════════════════════════════════════════════════
        // Exception Handling (25 items)
        // ═══════════════════════════════════════════════════════════════
        "Exception",
        "BaseException",
        "ValueError",
        "TypeError",
        "KeyError",
        "IndexError",
        "AttributeError",
        "RuntimeError",
        "StopIteration",
        "GeneratorExit",
        "AssertionError",
        "ImportError",
        "ModuleNotFoundError",
        "OSError",
        "IOError",
        "FileNotFoundError",
        "PermissionError",
        "TimeoutError",
        "NotImplementedError",
        "ZeroDivisionError",
        "OverflowError",
        "FloatingPointError",
        "MemoryError",
        "RecursionError",
        "SyntaxError",
    ];

    PYTHON_BUILTINS.contains(&name)
}

/// Get module path from FQN
///
/// # Examples
/// ```text
/// get_module_path("builtins.input")    → "builtins"
/// get_module_path("os.path.join")      → "os.path"
/// get_module_path("numpy.array")       → "numpy"
/// ```
pub fn get_module_path(fqn: &str) -> String {
    if let Some(last_dot) = fqn.rfind('.') {
        fqn[..last_dot].to_string()
    } else {
        // No dot, return as-is
        fqn.to_string()
    }
}

/// Check if an FQN is a security-critical function
///
/// Used for taint analysis priority filtering
pub fn is_security_critical(fqn: &str) -> bool {
    matches!(
        fqn,
        // Code execution
        "builtins.eval"
            | "builtins.exec"
            | "builtins.compile"
            | "builtins.__import__"
        // User input
            | "builtins.input"
        // File I/O
            | "builtins.open"
        // OS commands
            | "os.system"
            | "os.popen"
            | "os.execv"
            | "os.execve"
            | "os.execl"
            | "os.execle"
            | "os.execlp"
            | "os.execvp"
            | "os.execvpe"
            | "os.spawnl"
            | "os.spawnle"
            | "os.spawnlp"
            | "os.spawnv"
            | "os.spawnve"
            | "os.spawnvp"
            | "os.spawnvpe"
        // Subprocess
            | "subprocess.run"
            | "subprocess.Popen"
            | "subprocess.call"
            | "subprocess.check_call"
            | "subprocess.check_output"
            | "subprocess.getoutput"
            | "subprocess.getstatusoutput"
        // SQL
            | "sqlite3.execute"
            | "sqlite3.executemany"
            | "sqlite3.executescript"
        // Network
            | "socket.socket"
            | "urllib.request.urlopen"
            | "requests.get"
            | "requests.post"
        // Pickle (deserialization)
            | "pickle.load"
            | "pickle.loads"
            | "pickle.Unpickler"
        // YAML (deserialization)
            | "yaml.load"
            | "yaml.unsafe_load"
    )
}
