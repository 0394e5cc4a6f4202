//! File system category source
//!
//! Provides [`FsCategorySource`], the [`CategorySourcePort`] adapter that
//! reads the producer's word file and section file from disk.
//!
//! [`CategorySourcePort`]: quotacap_application::CategorySourcePort

mod fs_source;

pub use fs_source::FsCategorySource;
