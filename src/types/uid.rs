// Copyright (c) 2024 Mike Tsao

//! Unique identifiers for workspace records, and the factory that mints them.

use core::sync::atomic::Ordering;
use core::{hash::Hash, marker::PhantomData, sync::atomic::AtomicUsize};
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use synonym::Synonym;

/// Something that can serve as a uid.
pub trait IsUid: Eq + Hash + Clone + From<usize> {
    /// Returns the raw uid.
    fn as_usize(&self) -> usize;
}

/// Identifies a file in a workspace.
#[derive(Synonym, Derivative, Serialize, Deserialize)]
#[derivative(Default)]
#[synonym(skip(Default))]
#[serde(rename_all = "kebab-case")]
pub struct FileUid(#[derivative(Default(value = "1"))] pub usize);
impl IsUid for FileUid {
    fn as_usize(&self) -> usize {
        self.0
    }
}

/// Generates unique uids of one kind.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UidFactory<U: IsUid> {
    next_uid_value: AtomicUsize,
    #[serde(skip)]
    _phantom: PhantomData<U>,
}
impl<U: IsUid> Default for UidFactory<U> {
    fn default() -> Self {
        Self::new(1)
    }
}
impl<U: IsUid> UidFactory<U> {
    /// Creates a new [UidFactory] whose first uid is `first_uid`.
    pub fn new(first_uid: usize) -> Self {
        Self {
            next_uid_value: AtomicUsize::new(first_uid),
            _phantom: Default::default(),
        }
    }

    /// Generates the next unique uid.
    pub fn mint_next(&self) -> U {
        U::from(self.next_uid_value.fetch_add(1, Ordering::Relaxed))
    }

    /// Tells the factory about a uid that it didn't mint, for example one that
    /// came back from a saved workspace, so that it never hands out a
    /// duplicate.
    pub fn notify_externally_minted_uid(&self, uid: &U) {
        self.next_uid_value
            .fetch_max(uid.as_usize() + 1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_uids_never_repeat() {
        let f = UidFactory::<FileUid>::default();
        let mut seen: std::collections::HashSet<FileUid> = Default::default();
        for _ in 0..64 {
            assert!(seen.insert(f.mint_next()), "minted uids should be unique");
        }
    }

    #[test]
    fn notify_skips_past_external_uids() {
        let f = UidFactory::<FileUid>::default();
        let first = f.mint_next();
        assert_eq!(first, FileUid(1));

        f.notify_externally_minted_uid(&FileUid(10));
        assert_eq!(f.mint_next(), FileUid(11), "factory should skip past 10");

        f.notify_externally_minted_uid(&FileUid(3));
        assert_eq!(
            f.mint_next(),
            FileUid(12),
            "notifying about a lower uid should change nothing"
        );
    }
}
