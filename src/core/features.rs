//! Backend-facing features.

pub mod translator;
