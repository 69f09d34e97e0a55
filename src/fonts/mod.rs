//! Composite font resolution.
//!
//! Reads a Type 0 font and its descendant CIDFont into widths, a glyph
//! selection strategy and a CID to glyph index mapping.

pub mod cff_program;
pub mod cid_system_info;
pub mod cid_to_gid;
pub mod glyph_selection;
pub mod program;
pub mod truetype_program;
pub mod type0;
pub mod widths;

pub use cff_program::CffProgram;
pub use cid_system_info::CidSystemInfo;
pub use cid_to_gid::CidToGidMap;
pub use glyph_selection::{decode_identity_h, CidFontKind, CidFontType};
pub use program::{DefaultProgramLoader, FontProgram, FontProgramLoader, ProgramFormat, ProgramSource};
pub use truetype_program::SfntProgram;
pub use type0::{CompositeFont, IDENTITY_H};
pub use widths::{WidthTable, DEFAULT_CID_WIDTH};
