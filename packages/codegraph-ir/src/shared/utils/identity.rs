//! Content-addressed node/edge identity (§3, §4.2).
//!
//! Node id: `node:{repo}:{kind_lower}:{h}` where `h` is the first 24 hex
//! digits of SHA-256 over `{repo}|{Kind}|{file_path}|{fqn}|{language}|{salt}`.
//! Edge id: `edge:{kind_lower}:{h}` where `h` is the first 20 hex digits of
//! SHA-256 over `{kind}|{source_id}|{target_id}|{occurrence}`.
//!
//! Both functions are pure and stateless; callers own salting/occurrence
//! bookkeeping (see `IRBuilder` for node salts and edge occurrence
//! counters).

use sha2::{Digest, Sha256};

use crate::shared::models::{EdgeKind, NodeKind};

/// Number of hex digits retained from the node-id SHA-256 digest (96 bits).
pub const NODE_HASH_HEX_LEN: usize = 24;
/// Number of hex digits retained from the edge-id SHA-256 digest (80 bits).
pub const EDGE_HASH_HEX_LEN: usize = 20;

fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Compute a node id. `salt` resolves deterministic collisions (e.g. two
/// otherwise-identical anonymous lambdas in the same scope); pass `""`
/// when no salt is needed.
pub fn node_id(
    repo: &str,
    kind: NodeKind,
    file_path: &str,
    fqn: &str,
    language: &str,
    salt: &str,
) -> String {
    let key = format!(
        "{}|{}|{}|{}|{}|{}",
        repo,
        kind.as_str(),
        file_path,
        fqn,
        language,
        salt
    );
    let h = &sha256_hex(&key)[..NODE_HASH_HEX_LEN];
    format!("node:{}:{}:{}", repo, kind.as_str(), h)
}

/// Compute an edge id. `occurrence` disambiguates repeated edges of the
/// same kind between the same two nodes.
pub fn edge_id(kind: EdgeKind, source_id: &str, target_id: &str, occurrence: u32) -> String {
    let key = format!(
        "{}|{}|{}|{}",
        kind.as_str(),
        source_id,
        target_id,
        occurrence
    );
    let h = &sha256_hex(&key)[..EDGE_HASH_HEX_LEN];
    format!("edge:{}:{}", kind.as_str().to_lowercase(), h)
}

/// SHA-256 content hash (full 64 hex chars), used for `Node.content_hash`
/// and file-level change detection.
pub fn content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}
