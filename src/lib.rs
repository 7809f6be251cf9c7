//! An ordered map and set based on a red-black tree.
//!
//! [`TreeMap`](struct.TreeMap.html) keeps its entries sorted by a comparator (the keys' natural
//! order by default) and rebalances on every insertion and removal. On top of it sit live
//! key-range views ([`SubMap`](struct.SubMap.html)), projected views of keys, values or entries
//! ([`View`](struct.View.html)), and detached fail-fast cursors ([`Cursor`](struct.Cursor.html))
//! that can remove the entry they last yielded.
//!
//! The map is single-threaded. Share it across threads only behind a lock guarding every call.

#![warn(missing_docs)]

mod cursor;
mod error;
pub mod map;
mod node;
#[cfg(feature = "ordered_iter")]
mod ordered_iter;
#[cfg(feature = "quickcheck")]
mod quickcheck;
#[cfg(feature = "serde")]
mod serde;
pub mod set;
mod sub_map;
mod view;

pub use cursor::Cursor;
pub use error::{Error, Result};
pub use map::TreeMap;
pub use set::TreeSet;
pub use sub_map::SubMap;
pub use view::{Entries, Keys, Projection, Values, View, ViewIter};
