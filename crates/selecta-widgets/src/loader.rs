//! Initial options: supplied up front or loaded later.
//!
//! A deferred loader receives a [`LoadCompletion`] and resolves it at most
//! once, either with [`LoadCompletion::complete`] or [`LoadCompletion::fail`].
//! Both consume the handle. The select picks the result up on its next
//! [`poll_load`](crate::Select::poll_load).

use crate::option::OptionData;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Successful result of a deferred load.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<V> {
    /// Options only; the initial value comes from the select's configuration.
    List(Vec<OptionData<V>>),
    /// Options together with the value to start from.
    WithInitialValue {
        /// Value to select once loaded
        initial_value: V,
        /// Loaded options
        option_data_list: Vec<OptionData<V>>,
    },
}

impl<V> Loaded<V> {
    pub(crate) fn into_parts(self) -> (Option<V>, Vec<OptionData<V>>) {
        match self {
            Self::List(list) => (None, list),
            Self::WithInitialValue {
                initial_value,
                option_data_list,
            } => (Some(initial_value), option_data_list),
        }
    }
}

type Slot<V> = Rc<RefCell<Option<Result<Loaded<V>, String>>>>;

/// One-shot handle a deferred loader resolves.
pub struct LoadCompletion<V> {
    slot: Slot<V>,
}

impl<V> LoadCompletion<V> {
    /// Resolve the load with options.
    pub fn complete(self, loaded: Loaded<V>) {
        *self.slot.borrow_mut() = Some(Ok(loaded));
    }

    /// Resolve the load with an error message.
    pub fn fail(self, message: impl Into<String>) {
        *self.slot.borrow_mut() = Some(Err(message.into()));
    }
}

impl<V> fmt::Debug for LoadCompletion<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadCompletion").finish_non_exhaustive()
    }
}

/// Receiving end of a deferred load.
pub(crate) struct PendingLoad<V> {
    slot: Slot<V>,
}

impl<V> PendingLoad<V> {
    /// Take the result if the loader has resolved.
    pub(crate) fn take(&self) -> Option<Result<Loaded<V>, String>> {
        self.slot.borrow_mut().take()
    }
}

pub(crate) fn channel<V>() -> (LoadCompletion<V>, PendingLoad<V>) {
    let slot: Slot<V> = Rc::new(RefCell::new(None));
    (
        LoadCompletion {
            slot: Rc::clone(&slot),
        },
        PendingLoad { slot },
    )
}

/// Loader invoked once during construction.
pub type Loader<V> = Box<dyn FnOnce(LoadCompletion<V>)>;

/// Where the initial options come from.
pub enum InitialOptions<V> {
    /// Options known at construction.
    Immediate(Vec<OptionData<V>>),
    /// Options delivered later through a [`LoadCompletion`].
    Deferred(Loader<V>),
}

impl<V> InitialOptions<V> {
    /// Wrap a loader closure.
    pub fn deferred(loader: impl FnOnce(LoadCompletion<V>) + 'static) -> Self {
        Self::Deferred(Box::new(loader))
    }
}

impl<V> Default for InitialOptions<V> {
    fn default() -> Self {
        Self::Immediate(Vec::new())
    }
}

impl<V> From<Vec<OptionData<V>>> for InitialOptions<V> {
    fn from(list: Vec<OptionData<V>>) -> Self {
        Self::Immediate(list)
    }
}

impl<V: fmt::Debug> fmt::Debug for InitialOptions<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate(list) => f.debug_tuple("Immediate").field(list).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Progress of the initial options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Options are in place.
    #[default]
    Ready,
    /// Waiting on a deferred loader.
    Pending,
    /// The loader failed with this message.
    Failed(String),
}
