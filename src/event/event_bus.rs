use std::sync::Arc;
use std::sync::RwLock;

use log::error;

use crate::subscriber::Subscriber;

/// Fans events of type `E` out to registered subscribers.
///
/// `publish` is fire-and-forget: subscriber callbacks run concurrently on a
/// spawned task and a failing subscriber never affects the others or the
/// publisher.
pub struct EventBus<E> {
    subscribers: RwLock<Vec<Arc<dyn Subscriber<E> + Send + Sync>>>,
}

impl<E> EventBus<E>
where
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    pub fn register_subscriber<S>(&self, subscriber: Arc<S>) -> &Self
    where
        S: Subscriber<E> + Send + Sync + 'static,
    {
        self.subscribers
            .write()
            .expect("EventBus subscriber lock poisoned")
            .push(subscriber);
        self
    }

    pub fn publish(&self, event: E) {
        let subscribers = self
            .subscribers
            .read()
            .expect("EventBus subscriber lock poisoned")
            .clone();

        tokio::spawn(async move {
            let callbacks = subscribers.iter().map(|sub| {
                let event = event.clone();
                async move {
                    if let Err(e) = sub.callback(event).await {
                        error!("Subscriber callback failed: {e}");
                    }
                }
            });
            futures::future::join_all(callbacks).await;
        });
    }
}

impl<E> Default for EventBus<E>
where
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
