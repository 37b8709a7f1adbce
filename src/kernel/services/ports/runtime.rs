use std::future::Future;
use std::pin::Pin;

/// Future returned by the async collaborator ports.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
