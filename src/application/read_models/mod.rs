//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of resolution results for formatters.

mod resolution_read_model;
mod resolution_read_model_builder;

pub use resolution_read_model::{
    DuplicateView, PackageView, PlatformView, ReportMetadataView, ResolutionReadModel,
};
pub use resolution_read_model_builder::ResolutionReadModelBuilder;
