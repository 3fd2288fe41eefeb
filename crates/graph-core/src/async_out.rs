//! Async counterpart of the plain `Fn(&V) -> HashSet<V>` out-function used by
//! the in-memory model.
//!
//! A persistent backend's out-function needs to round-trip through a
//! database connection, so it cannot be a plain closure; [`AsyncOutFn`] gives
//! it a place to carry that connection (or transaction) across calls while
//! [`cycles::has_cycle_async`](crate::cycles::has_cycle_async) and
//! [`paths::enumerate_paths_async`](crate::paths::enumerate_paths_async) stay
//! generic over it.
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

/// A future, boxed so that recursive `async fn`s built on top of
/// [`AsyncOutFn`] have a concrete, non-infinite size.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// An out-function backed by asynchronous I/O.
///
/// Implementors typically wrap a database connection or transaction; `&mut
/// self` reflects that the underlying connection can only serve one request
/// at a time.
pub trait AsyncOutFn<V> {
    type Error;

    fn out<'a>(&'a mut self, v: &'a V) -> BoxFuture<'a, Result<HashSet<V>, Self::Error>>
    where
        V: 'a;
}
