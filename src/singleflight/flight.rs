use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use tokio::sync::watch;

/// Result slot of one in-flight call. `None` until the leader publishes.
type CallSlot<T> = watch::Receiver<Option<T>>;

/// Collapses concurrent calls for the same key into one execution.
///
/// The first caller for a key (the leader) runs the work; callers arriving
/// while it runs (followers) wait and receive a clone of the leader's output.
/// Once the leader publishes, the key is forgotten, so the next call runs the
/// work again.
pub struct SingleFlight<T> {
    calls: Mutex<HashMap<String, CallSlot<T>>>,
}

enum Role<T> {
    Leader(watch::Sender<Option<T>>),
    Follower(CallSlot<T>),
}

/// Unregisters the leader's call when the leader finishes or is dropped.
struct CallGuard<'a, T> {
    flight: &'a SingleFlight<T>,
    key: &'a str,
}

impl<T> Drop for CallGuard<'_, T> {
    fn drop(&mut self) {
        self.flight.calls.lock().remove(self.key);
    }
}

impl<T> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            calls: Mutex::new(HashMap::new()),
        }
    }
}

impl<T> SingleFlight<T>
where
    T: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `work` unless a call for `key` is already in flight, in which case
    /// waits for that call and returns its output.
    ///
    /// If the leader is dropped before publishing, one waiting follower takes
    /// over and runs its own `work`.
    pub async fn execute<F, Fut>(&self, key: &str, work: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        loop {
            let role = {
                let mut calls = self.calls.lock();
                match calls.get(key) {
                    Some(slot) => Role::Follower(slot.clone()),
                    None => {
                        let (tx, rx) = watch::channel(None);
                        calls.insert(key.to_string(), rx);
                        Role::Leader(tx)
                    }
                }
            };

            match role {
                Role::Leader(tx) => {
                    let _guard = CallGuard { flight: self, key };
                    let output = work().await;
                    tx.send_replace(Some(output.clone()));
                    return output;
                }
                Role::Follower(mut slot) => {
                    let published = slot
                        .wait_for(Option::is_some)
                        .await
                        .map(|output| output.clone());

                    if let Ok(Some(output)) = published {
                        return output;
                    }
                    tracing::debug!("Leader for key {} went away, retrying", key);
                }
            }
        }
    }

    /// Number of keys with a call currently in flight.
    pub fn in_flight(&self) -> usize {
        self.calls.lock().len()
    }
}
