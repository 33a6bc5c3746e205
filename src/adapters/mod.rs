//! Port implementations.
//!
//! `live` talks to the Gemini and Imagen endpoints, `recording` wraps a live
//! adapter and appends every call to a cassette, and `replaying` serves
//! calls back from a cassette without touching the network.

pub mod live;
pub mod recording;
pub mod replaying;
