use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::VideoFilterError;

/// Filter parameters shared between the streaming thread and event handlers.
///
/// Cloning the store yields another handle to the same parameters. Holding the
/// guard returned by [`ParamStore::lock`] for the whole frame guarantees the
/// frame is filtered with one consistent parameter set.
#[derive(Debug, Default)]
pub struct ParamStore<P> {
    inner: Arc<Mutex<P>>,
}

impl<P> Clone for ParamStore<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P> ParamStore<P> {
    /// Create a store holding `params`.
    pub fn new(params: P) -> Self {
        Self {
            inner: Arc::new(Mutex::new(params)),
        }
    }

    /// Lock the parameters.
    pub fn lock(&self) -> Result<MutexGuard<'_, P>, VideoFilterError> {
        self.inner
            .lock()
            .map_err(|_| VideoFilterError::MutexPoisonError)
    }

    /// Run `f` on the parameters under the lock.
    pub fn update<R>(&self, f: impl FnOnce(&mut P) -> R) -> Result<R, VideoFilterError> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }

    /// Copy of the current parameters.
    pub fn snapshot(&self) -> Result<P, VideoFilterError>
    where
        P: Clone,
    {
        Ok(self.lock()?.clone())
    }
}
