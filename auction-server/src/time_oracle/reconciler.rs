use {
    sha2::{
        Digest,
        Sha256,
    },
    std::fmt::Debug,
    time::OffsetDateTime,
};

/// Picks one timestamp out of several candidates for a request.
///
/// Implementations must be pure: the same request id and the same ordered candidates
/// always give the same answer, so every peer re-executing a call agrees on it.
pub trait Reconciler: Debug + Send + Sync {
    fn select(&self, request_id: &str, candidates: &[OffsetDateTime]) -> Option<OffsetDateTime>;
}

/// Shuffles the candidates with a permutation derived from the SHA-256 digest of the
/// request id and takes the first one.
#[derive(Clone, Copy, Debug, Default)]
pub struct HashSeededReconciler;

impl HashSeededReconciler {
    /// Fisher-Yates shuffle of `0..len` driven by `sha256(seed || step)`.
    pub fn permutation(request_id: &str, len: usize) -> Vec<usize> {
        let seed = Sha256::digest(request_id.as_bytes());
        let mut order: Vec<usize> = (0..len).collect();
        for i in (1..len).rev() {
            let mut hasher = Sha256::new();
            hasher.update(seed);
            hasher.update((i as u64).to_be_bytes());
            let digest = hasher.finalize();
            let mut word = [0u8; 8];
            word.copy_from_slice(&digest[..8]);
            let j = (u64::from_be_bytes(word) % (i as u64 + 1)) as usize;
            order.swap(i, j);
        }
        order
    }
}

impl Reconciler for HashSeededReconciler {
    fn select(&self, request_id: &str, candidates: &[OffsetDateTime]) -> Option<OffsetDateTime> {
        Self::permutation(request_id, candidates.len())
            .first()
            .map(|index| candidates[*index])
    }
}
