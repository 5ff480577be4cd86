//! Stenotype stroke engine.
//!
//! Models one chord of simultaneously pressed keys on a stenotype-style
//! keyboard as a fixed-width bitmask, with a bidirectional codec between
//! that mask and steno notation, a canonical ordering, set algebra, and
//! lazy range enumeration.
//!
//! A [`StrokeSystem`] is derived once per layout and is immutable from
//! then on; [`Stroke`] values are plain bitmasks interpreted against it.
//!
//! ```
//! use steno_stroke::StrokeSystem;
//!
//! let system = StrokeSystem::english()?;
//! let stroke = system.parse("1207")?;
//! assert_eq!(stroke, system.parse("#STO-P")?);
//! assert!(system.is_number(stroke));
//! assert_eq!(system.format(stroke), "1207");
//! # Ok::<(), steno_stroke::StrokeError>(())
//! ```

pub mod bits;
mod definition;
mod error;
mod key;
mod range;
mod stroke;
mod system;

pub use definition::SystemDefinition;
pub use error::{ConfigError, EmptyError, ParseError, RangeError, StrokeError};
pub use key::{Key, Side};
pub use range::{StrokeRange, Suffixes};
pub use stroke::{Indices, Stroke};
pub use system::{StrokeInput, StrokeSystem, SystemBuilder};
