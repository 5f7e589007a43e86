//! Debounced, keyboard-navigable search-select.
//!
//! The widget keeps only display state. The caller owns the option list and
//! the selected id, feeds both in through [`SearchSelect::set_options`] and
//! [`SearchSelect::set_value`], and receives [`Event`]s back from
//! [`SearchSelect::handle`].

pub mod filter;
pub mod option;
mod widget;

pub use filter::filter_options;
pub use option::SelectOption;
pub use widget::{Event, Input, Key, Phase, Props, SearchSelect};
