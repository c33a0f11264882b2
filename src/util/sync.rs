#[cfg(feature = "threadsafe")]
pub(crate) mod inner {
    use std::sync::{Mutex, MutexGuard, PoisonError};

    /// Marker to identify an implementing instance as thread-safe.
    pub trait SendAndSync: Send + Sync {}

    /// Reference-counted pointer; `Rc` when the `threadsafe` feature is disabled.
    pub type Shared<T> = std::sync::Arc<T>;

    pub(crate) struct Lock<T>(Mutex<T>);

    impl<T> Lock<T> {
        pub(crate) fn new(t: T) -> Self {
            Self(Mutex::new(t))
        }

        pub(crate) fn lock(&self) -> Result<MutexGuard<'_, T>, PoisonError<MutexGuard<'_, T>>> {
            self.0.lock()
        }
    }
}

#[cfg(not(feature = "threadsafe"))]
pub(crate) mod inner {
    use std::cell::{RefCell, RefMut};
    use std::sync::PoisonError;

    pub trait SendAndSync {}

    pub type Shared<T> = std::rc::Rc<T>;

    pub(crate) struct Lock<T>(RefCell<T>);

    impl<T> Lock<T> {
        pub(crate) fn new(t: T) -> Self {
            Self(RefCell::new(t))
        }

        pub(crate) fn lock(&self) -> Result<RefMut<'_, T>, PoisonError<RefMut<'_, T>>> {
            Ok(self.0.borrow_mut())
        }
    }
}

pub(crate) use inner::{Lock, SendAndSync, Shared};

impl<#[cfg(feature = "threadsafe")] A: Send + Sync, #[cfg(not(feature = "threadsafe"))] A>
    SendAndSync for A
{
}
