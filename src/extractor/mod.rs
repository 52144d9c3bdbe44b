//! Main content extraction module.
//!
//! # Module Structure
//!
//! - `tags`: tag catalogs and phrasing/block helpers
//! - `state`: heuristic flags and the candidate score map
//! - `scoring`: pruning and scoring pass
//! - `builder`: top candidate selection and sibling assembly
//! - `cleaner`: ordered cleaning passes over the assembled article
//! - `pruning`: conditional cleaning decision
//! - `tables`: data/presentation table classification and flattening
//! - `post_process`: URI resolution, wrapper simplification, class cleanup
//! - `pipeline`: retry controller
//!
//! # Usage
//!
//! ```rust
//! use rs_readability::extractor::pipeline::grab_article;
//! use rs_readability::{dom, html_processing, Options};
//!
//! let doc = dom::parse("<html><body><p>Some text.</p></body></html>");
//! html_processing::prep_document(&doc);
//! let extraction = grab_article(&doc, "", &Options::default())?;
//! assert!(extraction.fallback);
//! # Ok::<(), rs_readability::Error>(())
//! ```

pub mod builder;
pub mod cleaner;
pub mod pipeline;
pub mod post_process;
pub mod pruning;
pub mod scoring;
pub mod state;
pub mod tables;
pub mod tags;

pub use pipeline::{grab_article, Extraction};
pub use state::{Candidates, Flags, NodeInfo};
pub use tables::TableKind;
