//! Ordered credential fallback
//!
//! Remote collaborators (Google Calendar, Slack) can be reached with more
//! than one credential. A [`FallbackChain`] tries them in order and moves on
//! only when the failure is one another credential could fix.

use std::fmt::Display;
use std::future::Future;

/// Errors that tell the chain whether the next credential is worth trying
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// Non-empty ordered list of credential configurations
#[derive(Debug, Clone)]
pub struct FallbackChain<C> {
    primary: C,
    fallbacks: Vec<C>,
}

impl<C> FallbackChain<C> {
    /// Build a chain, `None` when no configuration is given
    pub fn new(configs: Vec<C>) -> Option<Self> {
        let mut configs = configs.into_iter();
        let primary = configs.next()?;
        Some(Self {
            primary,
            fallbacks: configs.collect(),
        })
    }

    /// Run `attempt` against each configuration until one succeeds or fails
    /// with a non-retryable error. The last error is returned.
    pub async fn run<'a, T, E, F, Fut>(&'a self, mut attempt: F) -> Result<T, E>
    where
        F: FnMut(&'a C) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + Display,
    {
        let mut result = attempt(&self.primary).await;

        for (index, config) in self.fallbacks.iter().enumerate() {
            match &result {
                Err(err) if err.is_retryable() => {
                    tracing::warn!(
                        attempt = index + 2,
                        error = %err,
                        "Credential failed, trying next in chain"
                    );
                    result = attempt(config).await;
                }
                _ => break,
            }
        }

        result
    }
}
