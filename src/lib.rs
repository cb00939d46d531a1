//! Brace - Documentation Template Engine
//!
//! Templates are plain text with two kinds of markup. Directives are a pair
//! of tags with the same marker and property path, and act on the text
//! between them:
//!
//! - `{!path}...{!path}` keeps its body when the value is truthy.
//! - `{?path}...{?path}` keeps its body when the value is falsy.
//! - `{*path}...{*path}` repeats its body once per element of a sequence.
//!
//! Placeholders like `(path)` are replaced by the value they name, and may be
//! wrapped in braces as `{(path)}`. A leading `-` lower-cases the first
//! character of the value, and a leading `#` joins a sequence of text.
//! Any delimiter preceded by a backslash is literal text.
//!
//! ```
//! use brace::render;
//! use serde_json::json;
//!
//! let data = json!({"members": [{"name": "Parse"}, {"name": "Clear"}]});
//! let output = render(&data, "{*members}- {(-name)}\n{*members}");
//!
//! assert_eq!(output.unwrap(), "- parse\n- clear\n");
//! ```
mod compile;
mod document;
mod engine;
mod error;
mod log;
mod region;
mod render;
mod source;
mod store;

pub use compile::{
    compile, Context, Marker, Modifier, Node, Parser, Path, Placeholder, Scope, Template,
    DEFAULT_MAX_DEPTH,
};
pub use document::Document;
pub use engine::Engine;
pub use error::Error;
pub use log::{locate, Pointer, SyntaxError, Visual};
pub use region::Region;
pub use render::render;
pub use source::Sources;
pub use store::{Properties, Store};
