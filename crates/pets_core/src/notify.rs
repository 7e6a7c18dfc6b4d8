//! Change notification contract and in-process observer registry.
//!
//! # Responsibility
//! - Define the signal the provider emits after a successful mutation.
//! - Route that signal to observers registered against related paths.
//!
//! # Invariants
//! - A change to path P reaches observers registered on P and on
//!   descendants of P, plus observers on ancestors of P that opted into
//!   descendant notifications.
//! - Each matching observer is called once per change.
//! - Observer callbacks run after the registry lock is released.

use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Receiver of "resource changed" signals.
pub trait ChangeNotifier {
    fn notify_change(&self, path: &str);
}

impl<T: ChangeNotifier + ?Sized> ChangeNotifier for Arc<T> {
    fn notify_change(&self, path: &str) {
        (**self).notify_change(path)
    }
}

impl<T: ChangeNotifier + ?Sized> ChangeNotifier for &T {
    fn notify_change(&self, path: &str) {
        (**self).notify_change(path)
    }
}

/// Notifier that drops every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl ChangeNotifier for NoopNotifier {
    fn notify_change(&self, _path: &str) {}
}

/// Handle returned by [`ObserverRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Arc<dyn Fn(&str) + Send + Sync>;

struct Registration {
    id: ObserverId,
    segments: Vec<String>,
    notify_for_descendants: bool,
    observer: Observer,
}

/// Thread-safe registry of path observers.
#[derive(Default)]
pub struct ObserverRegistry {
    next_id: AtomicU64,
    registrations: Mutex<Vec<Registration>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `observer` for changes on `path`.
    ///
    /// With `notify_for_descendants`, changes below `path` (for example one
    /// item of a watched collection) are delivered too.
    pub fn register(
        &self,
        path: &str,
        notify_for_descendants: bool,
        observer: impl Fn(&str) + Send + Sync + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let registration = Registration {
            id,
            segments: path_segments(path),
            notify_for_descendants,
            observer: Arc::new(observer),
        };
        self.lock().push(registration);
        id
    }

    /// Removes one observer. Returns whether it was registered.
    pub fn unregister(&self, id: ObserverId) -> bool {
        let mut registrations = self.lock();
        let before = registrations.len();
        registrations.retain(|registration| registration.id != id);
        registrations.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Registration>> {
        // Observers run outside the lock; a poisoned list is still consistent.
        self.registrations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ChangeNotifier for ObserverRegistry {
    fn notify_change(&self, path: &str) {
        let changed = path_segments(path);
        let targets: Vec<Observer> = self
            .lock()
            .iter()
            .filter(|registration| {
                if changed.starts_with(&registration.segments) {
                    registration.segments.len() == changed.len()
                        || registration.notify_for_descendants
                } else {
                    registration.segments.starts_with(&changed)
                }
            })
            .map(|registration| Arc::clone(&registration.observer))
            .collect();

        debug!(
            "event=change_notify module=notify status=ok observers={}",
            targets.len()
        );
        for observer in targets {
            observer(path);
        }
    }
}

fn path_segments(path: &str) -> Vec<String> {
    let path = path.strip_prefix(crate::resource::CONTENT_SCHEME).unwrap_or(path);
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::path_segments;

    #[test]
    fn path_segments_ignore_scheme_and_empty_parts() {
        assert_eq!(
            path_segments("content://auth/pets//3/"),
            vec!["auth", "pets", "3"]
        );
        assert_eq!(path_segments("auth/pets"), vec!["auth", "pets"]);
    }
}
