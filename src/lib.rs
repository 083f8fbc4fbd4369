//! # fitwidth
//!
//! Shrinks every image in a folder that is wider than a maximum width,
//! keeping its aspect ratio, and writes it back over the original file.
//!
//! ```text
//! photos/                      fitwidth photos --max-width 800
//! ├── a.png     1600x900   →   a.png changed: 1600x900 -> 800x450
//! ├── b.gif      400x300   →   b.gif unchanged (400x300)
//! └── notes.txt            →   (not an image, never opened)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists candidate files: case-insensitive `png`/`jpg`/`jpeg`/`bmp`/`gif`/`webp` |
//! | [`imaging`] | [`ImageBackend`](imaging::ImageBackend) capability trait, `image`-crate backend, width math |
//! | [`process`] | The sequential batch loop, failure policy and run report |
//! | [`config`] | `fitwidth.toml` loading, validation and command-line overrides |
//! | [`output`] | Status line and summary formatting |
//!
//! # Design Decisions
//!
//! ## Height Rounds Down
//!
//! The new height is `floor(max_width * height / width)`, computed in integer
//! arithmetic so the result is exact. A second run over the same folder finds
//! every resized image at exactly `max_width` and leaves it alone.
//!
//! ## Same Path, Same Format
//!
//! Output is encoded in the format implied by the file's extension and
//! written to the original path. No backups, no renames, no new files. The
//! encoded bytes are produced in memory first, so a file is only replaced
//! once a complete image exists to replace it with.
//!
//! ## Abort by Default
//!
//! A file that cannot be decoded or written stops the run unless
//! `on_error = "skip"` is configured. Files processed before the failure
//! stay resized.

pub mod config;
pub mod imaging;
pub mod output;
pub mod process;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
