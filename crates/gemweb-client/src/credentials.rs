//! Session cookies and the shared cell that holds them.

use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// Long-lived account cookie name.
pub const STABLE_COOKIE: &str = "__Secure-1PSID";
/// Short-lived cookie name, renewed by rotation.
pub const ROTATING_COOKIE: &str = "__Secure-1PSIDTS";

/// The two web session cookie values. Opaque; only ever transported.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub stable_id: String,
    pub rotating_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("stable_id", &"[REDACTED]")
            .field("rotating_id", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    pub fn new(stable_id: impl Into<String>, rotating_id: impl Into<String>) -> Self {
        Self {
            stable_id: stable_id.into(),
            rotating_id: rotating_id.into(),
        }
    }

    /// `Cookie` header value, stable cookie first.
    pub fn cookie_header(&self) -> String {
        format!(
            "{STABLE_COOKIE}={}; {ROTATING_COOKIE}={}",
            self.stable_id, self.rotating_id
        )
    }

    /// Copy with the rotating cookie replaced.
    pub fn with_rotating_id(&self, rotating_id: impl Into<String>) -> Self {
        Self {
            stable_id: self.stable_id.clone(),
            rotating_id: rotating_id.into(),
        }
    }
}

/// Shared holder for the current cookie pair.
///
/// Readers take an immutable `Arc` snapshot; writers swap in a whole new
/// snapshot. The lock only guards the pointer, so it is never held across
/// network I/O and a request can never see half of an update.
pub struct CredentialCell {
    current: RwLock<Arc<Credentials>>,
}

impl CredentialCell {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            current: RwLock::new(Arc::new(credentials)),
        }
    }

    /// Current cookie pair.
    pub fn snapshot(&self) -> Arc<Credentials> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Replace the whole pair.
    pub fn store(&self, credentials: Credentials) {
        let next = Arc::new(credentials);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = next;
    }

    /// Swap in a renewed rotating cookie, keeping the stable one.
    /// Returns the new snapshot.
    pub fn rotate(&self, rotating_id: impl Into<String>) -> Arc<Credentials> {
        let rotating_id = rotating_id.into();
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        let next = Arc::new(guard.with_rotating_id(rotating_id));
        *guard = Arc::clone(&next);
        next
    }
}

impl fmt::Debug for CredentialCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialCell").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn cookie_header_orders_stable_then_rotating() {
        let creds = Credentials::new("sid-value", "ts-value");
        assert_eq!(
            creds.cookie_header(),
            "__Secure-1PSID=sid-value; __Secure-1PSIDTS=ts-value"
        );
    }

    #[test]
    fn debug_redacts_cookie_values() {
        let creds = Credentials::new("very-secret", "also-secret");
        let out = format!("{creds:?}");
        assert!(!out.contains("very-secret"));
        assert!(!out.contains("also-secret"));
        assert!(out.contains("[REDACTED]"));
    }

    #[test]
    fn rotate_keeps_stable_id() {
        let cell = CredentialCell::new(Credentials::new("sid", "ts-old"));
        let next = cell.rotate("ts-new");
        assert_eq!(next.stable_id, "sid");
        assert_eq!(next.rotating_id, "ts-new");
        assert_eq!(*cell.snapshot(), *next);
    }

    #[test]
    fn old_snapshot_survives_rotation() {
        let cell = CredentialCell::new(Credentials::new("sid", "ts-old"));
        let before = cell.snapshot();
        cell.rotate("ts-new");
        assert_eq!(before.rotating_id, "ts-old");
        assert_eq!(cell.snapshot().rotating_id, "ts-new");
    }

    #[test]
    fn interleaved_rotation_never_tears() {
        let cell = Arc::new(CredentialCell::new(Credentials::new("sid-0", "ts-0")));

        let writer = {
            let cell = Arc::clone(&cell);
            thread::spawn(move || {
                for n in 1..=500 {
                    if n % 2 == 0 {
                        cell.store(Credentials::new(format!("sid-{n}"), format!("ts-{n}")));
                    } else {
                        cell.rotate(format!("ts-{n}"));
                    }
                }
            })
        };

        let readers: Vec<_> = (0..2)
            .map(|_| {
                let cell = Arc::clone(&cell);
                thread::spawn(move || {
                    for _ in 0..250 {
                        let header = cell.snapshot().cookie_header();
                        let (stable, rotating) = header
                            .split_once("; ")
                            .expect("header has two cookies");
                        let stable = stable.trim_start_matches("__Secure-1PSID=");
                        let rotating = rotating.trim_start_matches("__Secure-1PSIDTS=");
                        let stable_gen: u32 = stable["sid-".len()..].parse().unwrap();
                        let rotating_gen: u32 = rotating["ts-".len()..].parse().unwrap();
                        // a stored pair is always matched, a rotation is at most one ahead
                        assert!(
                            rotating_gen == stable_gen || rotating_gen == stable_gen + 1,
                            "torn read: {header}"
                        );
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }

        let last = cell.snapshot();
        assert_eq!(last.stable_id, "sid-500");
        assert_eq!(last.rotating_id, "ts-500");
    }
}
