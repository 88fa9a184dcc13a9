//! Lazily initialized, shareable collaborator handle

use std::fmt;
use std::sync::{Arc, OnceLock};

use super::Outcome;
use crate::error::ServiceError;

type Init<T> = Box<dyn Fn() -> Result<Arc<T>, ServiceError> + Send + Sync>;

/// Settled state of a [`ClientHandle`]
pub enum HandleState<T: ?Sized> {
    /// Client constructed and ready for calls
    Ready(Arc<T>),
    /// Initialization failed permanently; the reason is kept for summaries
    Unavailable(ServiceError),
}

impl<T: ?Sized> Clone for HandleState<T> {
    fn clone(&self) -> Self {
        match self {
            HandleState::Ready(client) => HandleState::Ready(Arc::clone(client)),
            HandleState::Unavailable(err) => HandleState::Unavailable(err.clone()),
        }
    }
}

/// Owns one collaborator client.
///
/// The client is built on first use and shared afterwards. A permanent
/// initialization failure is cached as [`HandleState::Unavailable`]; a
/// transient one is returned to the caller and retried on the next call.
/// Calls run on a cloned `Arc`, so nothing is locked while a request is in
/// flight.
pub struct ClientHandle<T: ?Sized> {
    service: &'static str,
    init: Option<Init<T>>,
    state: OnceLock<HandleState<T>>,
}

impl<T: ?Sized> ClientHandle<T> {
    /// Handle that builds its client with `init` on first use
    pub fn lazy<F>(service: &'static str, init: F) -> Self
    where
        F: Fn() -> Result<Arc<T>, ServiceError> + Send + Sync + 'static,
    {
        Self {
            service,
            init: Some(Box::new(init)),
            state: OnceLock::new(),
        }
    }

    /// Handle around an already constructed client
    pub fn ready(service: &'static str, client: Arc<T>) -> Self {
        Self::settled(service, HandleState::Ready(client))
    }

    /// Handle that is unavailable from the start
    pub fn unavailable(service: &'static str, reason: ServiceError) -> Self {
        Self::settled(service, HandleState::Unavailable(reason))
    }

    fn settled(service: &'static str, state: HandleState<T>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(state);
        Self {
            service,
            init: None,
            state: cell,
        }
    }

    /// Human-readable service name
    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Settled state, or `None` while the client has not been built yet
    pub fn state(&self) -> Option<&HandleState<T>> {
        self.state.get()
    }

    /// Whether the handle is known to be permanently unavailable
    pub fn is_unavailable(&self) -> bool {
        matches!(self.state.get(), Some(HandleState::Unavailable(_)))
    }

    /// Get the client, building it if necessary
    pub fn client(&self) -> Result<Arc<T>, ServiceError> {
        if let Some(state) = self.state.get() {
            return settled_client(state);
        }

        let Some(init) = &self.init else {
            return Err(ServiceError::NotConfigured(format!(
                "{} has no client",
                self.service
            )));
        };

        match init() {
            Ok(client) => {
                // A concurrent initializer may have won; use whichever landed
                let state = self.state.get_or_init(|| HandleState::Ready(client));
                settled_client(state)
            }
            Err(err) if err.is_permanent() => {
                tracing::warn!(service = self.service, error = %err, "collaborator unavailable");
                let state = self
                    .state
                    .get_or_init(|| HandleState::Unavailable(err));
                settled_client(state)
            }
            Err(err) => {
                tracing::debug!(service = self.service, error = %err, "collaborator init failed, will retry");
                Err(err)
            }
        }
    }

    /// Run `f` against the client and convert the result to an [`Outcome`]
    pub fn call<F>(&self, f: F) -> Outcome
    where
        F: FnOnce(&T) -> Result<String, ServiceError>,
    {
        let result = self.client().and_then(|client| f(&*client));
        if let Err(err) = &result {
            tracing::warn!(service = self.service, error = %err, "collaborator call failed");
        }
        result.into()
    }
}

fn settled_client<T: ?Sized>(state: &HandleState<T>) -> Result<Arc<T>, ServiceError> {
    match state {
        HandleState::Ready(client) => Ok(Arc::clone(client)),
        HandleState::Unavailable(err) => Err(err.clone()),
    }
}

impl<T: ?Sized> fmt::Debug for ClientHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state.get() {
            None => "uninitialized".to_string(),
            Some(HandleState::Ready(_)) => "ready".to_string(),
            Some(HandleState::Unavailable(err)) => format!("unavailable ({err})"),
        };
        f.debug_struct("ClientHandle")
            .field("service", &self.service)
            .field("state", &state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborator::GrammarChecker;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Echo;

    impl GrammarChecker for Echo {
        fn check_and_correct(&self, text: &str) -> Result<String, ServiceError> {
            Ok(format!("{text}!"))
        }
    }

    #[test]
    fn test_lazy_init_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle: ClientHandle<dyn GrammarChecker> = ClientHandle::lazy("echo", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(Echo) as Arc<dyn GrammarChecker>)
        });

        assert!(handle.state().is_none());
        for _ in 0..3 {
            let outcome = handle.call(|c| c.check_and_correct("hi"));
            assert_eq!(outcome, Outcome::Success("hi!".into()));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(handle.state(), Some(HandleState::Ready(_))));
    }

    #[test]
    fn test_permanent_failure_is_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle: ClientHandle<dyn GrammarChecker> = ClientHandle::lazy("gen", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(ServiceError::NotConfigured("missing token".into()))
        });

        for _ in 0..3 {
            assert!(!handle.call(|c| c.check_and_correct("hi")).is_success());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(handle.is_unavailable());
    }

    #[test]
    fn test_transient_failure_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle: ClientHandle<dyn GrammarChecker> = ClientHandle::lazy("flaky", move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ServiceError::Timeout)
            } else {
                Ok(Arc::new(Echo) as Arc<dyn GrammarChecker>)
            }
        });

        assert_eq!(
            handle.call(|c| c.check_and_correct("a")),
            Outcome::Failure(ServiceError::Timeout)
        );
        assert!(handle.state().is_none());
        assert!(handle.call(|c| c.check_and_correct("a")).is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_call_failure_keeps_client() {
        let handle: ClientHandle<dyn GrammarChecker> =
            ClientHandle::ready("echo", Arc::new(Echo));
        let outcome = handle.call(|_| Err(ServiceError::RateLimited));
        assert_eq!(outcome, Outcome::Failure(ServiceError::RateLimited));
        assert!(matches!(handle.state(), Some(HandleState::Ready(_))));
    }

    #[test]
    fn test_unavailable_handle() {
        let handle: ClientHandle<dyn GrammarChecker> =
            ClientHandle::unavailable("grammar", ServiceError::NotConfigured("offline".into()));
        assert!(handle.is_unavailable());
        assert_eq!(handle.service(), "grammar");
        assert_eq!(
            handle.client().err(),
            Some(ServiceError::NotConfigured("offline".into()))
        );
        assert!(format!("{handle:?}").contains("unavailable"));
    }

    #[test]
    fn test_shared_across_threads() {
        let handle: Arc<ClientHandle<dyn GrammarChecker>> =
            Arc::new(ClientHandle::lazy("echo", || {
                Ok(Arc::new(Echo) as Arc<dyn GrammarChecker>)
            }));
        let workers: Vec<_> = (0..4)
            .map(|i| {
                let handle = Arc::clone(&handle);
                std::thread::spawn(move || handle.call(|c| c.check_and_correct(&i.to_string())))
            })
            .collect();
        for (i, worker) in workers.into_iter().enumerate() {
            assert_eq!(worker.join().unwrap(), Outcome::Success(format!("{i}!")));
        }
    }
}
