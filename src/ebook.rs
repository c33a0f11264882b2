//! Core [`Epub`](epub::Epub) loading and chapter processing.
//!
//! # Overview
//! This module loads EPUB containers and prepares chapter markup for display.
//!
//! ## Core Components
//! - [`epub`]: The loaded book, its metadata, manifest, spine and table of contents.
//! - [`chapter`]: Chapter markup with references rewritten to resource handles.
//! - [`errors`]: Ebook-related error types.
//!
//! ## Supporting Components
//! - [`resource`]: Resource handles and the per-chapter blob scope.

pub(super) mod archive;
pub mod chapter;
pub mod epub;
pub mod errors;
pub mod resource;
