//! Content compilation for the build pipeline.
//!
//! - **markdown**: Markdown-to-HTML engines behind the `Converter` trait
//! - **cache**: mtime-checked on-disk memoization of conversions
//! - **meta**: `Document`, sidecar `Metadata`, template views
//! - **loader**: directory scan into documents
//! - **linker**: chronological order, neighbor links, slug cleanup
//! - **paginate**: blog listing pages
//! - **assets**: hard-linking `public/` into the output
//!
//! # Flow
//!
//! ```text
//! load_all() ──► link_chronologically() ──► paginate() / feeds
//!     │
//!     └── MarkdownCache ──► Converter
//! ```

pub mod assets;
pub mod cache;
pub mod linker;
pub mod loader;
pub mod markdown;
pub mod meta;
pub mod paginate;

pub use assets::link_static_files;
pub use cache::MarkdownCache;
pub use linker::link_chronologically;
pub use loader::load_all;
pub use meta::Document;
pub use paginate::paginate;
