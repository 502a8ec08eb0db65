//! The `Freeze` seam: how an element is snapshotted on first access.

use crate::list::CowList;
use crate::map::CowMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A list shared between one writer and any number of snapshot readers.
pub type SharedList<T> = Arc<RwLock<Vec<T>>>;

/// A map shared between one writer and any number of snapshot readers.
pub type SharedMap<K, T> = Arc<RwLock<BTreeMap<K, T>>>;

/// Decides what a reader receives when a slot is read for the first time.
///
/// Immutable values freeze to themselves. A value holding a nested shared
/// collection freezes to a new [`CowList`]/[`CowMap`] over it, built at the
/// moment of that first access, which extends the snapshot guarantee one
/// level deeper.
pub trait Freeze {
    type Frozen: Clone;

    fn freeze(&self) -> Self::Frozen;
}

impl<T: Freeze> Freeze for SharedList<T> {
    type Frozen = Arc<CowList<T>>;

    fn freeze(&self) -> Self::Frozen {
        Arc::new(CowList::new(self.clone()))
    }
}

impl<K: Ord + Clone, T: Freeze> Freeze for SharedMap<K, T> {
    type Frozen = Arc<CowMap<K, T>>;

    fn freeze(&self) -> Self::Frozen {
        Arc::new(CowMap::new(self.clone()))
    }
}

macro_rules! freeze_by_clone {
    ($($t:ty),* $(,)?) => {
        $(
            impl Freeze for $t {
                type Frozen = $t;

                fn freeze(&self) -> $t {
                    self.clone()
                }
            }
        )*
    };
}

// Plain immutable values need no wrapping.
freeze_by_clone!(bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, char, String);

impl Freeze for &'static str {
    type Frozen = &'static str;

    fn freeze(&self) -> &'static str {
        *self
    }
}
