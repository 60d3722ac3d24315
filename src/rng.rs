use std::marker::PhantomData;

use rand_core::{CryptoRng, OsRng, RngCore};

/// Pull-based random byte source backing a single operation.
///
/// Wraps the platform CSPRNG behind the `RngCore`/`CryptoRng` interface the
/// signing engine consumes. One instance is created per `combine` or
/// `create_request` invocation and dropped when the call returns; instances
/// are `!Send + !Sync` and must not be shared between threads or reused
/// across calls.
pub struct OperationRng {
    inner: OsRng,
    // Raw-pointer marker keeps the adapter out of Send/Sync.
    _single_op: PhantomData<*const ()>,
}

impl OperationRng {
    /// Acquires a fresh adapter for the current operation scope.
    pub fn new() -> Self {
        Self {
            inner: OsRng,
            _single_op: PhantomData,
        }
    }
}

impl Default for OperationRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for OperationRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand_core::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

impl CryptoRng for OperationRng {}
