// Scratch-off reveal surface.
// Dragging the pointer drops timestamped fade points; each one punches a soft
// radial hole in a coverage mask that lets a hidden picture show through the
// cover. A 1 ms recurring sweep evicts points older than the fade duration,
// and a staggered reset wipes the current points away one at a time.
// `surface::ScratchSurface` owns all of that state and is driven from a
// single frame loop: feed it pointer samples, call `advance(now)` to run due
// timers, then `render_mask` and `compose::compose` to get pixels.

pub mod background;
pub mod capture;
pub mod compose;
pub mod config;
pub mod decay;
pub mod draw;
pub mod error;
pub mod points;
pub mod reset;
pub mod reveal;
pub mod surface;
pub mod timer;
pub mod types;
