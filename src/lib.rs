//! Windowed resource management for virtually scrolled lists.
//!
//! A list can be far larger than what fits on screen; keeping every item's
//! resource resident wastes memory on things nobody is looking at. This
//! crate tracks only a *window* of items around the viewport: as the
//! scroll offset moves, items entering the window get asynchronous loads
//! issued for them and items leaving it are evicted and their resources
//! disposed. Memory stays proportional to the viewport, not the list.
//!
//! The core is [`manager::WindowedResourceManager`]: a synchronous state
//! machine that owns slot bookkeeping and delegates every side effect
//! (loading, disposal, retry timing, presentation) to collaborator traits
//! in [`manager::hooks`]. [`model`] holds the pure geometry, [`sim`] a
//! deterministic fake loader, and [`view`] plus the `lazyrow` binary wrap
//! it all in a ratatui demo gallery.
//!
//! Asynchrony is by inversion: the manager never blocks or spawns. The
//! environment calls `on_load_result` whenever a load finishes, and
//! request tokens make late or duplicate completions harmless.

pub mod config;
pub mod logging;
pub mod manager;
pub mod model;
pub mod sim;
pub mod view;

#[cfg(test)]
mod test_harness;
