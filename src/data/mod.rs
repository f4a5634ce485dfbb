//! Data layer: core types, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!   uploaded .csv bytes       built-in sample
//!        │                          │
//!        ▼                          ▼
//!   ┌──────────────────────────────────┐
//!   │  loader   ingest → Table          │  header = schema, per-column type inference
//!   └──────────────────────────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  keyword / range → new Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  year buckets, metric-over-time points
//!   └───────────┘
//! ```
//!
//! `document` is a plain byte passthrough for the research PDF.

pub mod aggregate;
pub mod document;
pub mod filter;
pub mod loader;
pub mod model;
