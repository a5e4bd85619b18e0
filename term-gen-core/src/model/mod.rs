//! Top-level module for the term generation system.
//!
//! The pipeline runs in three stages:
//! - Raw counts learned from training sequences (`RawModel`)
//! - A pure re-weighting transform (`Weighting`) producing a `WeightedModel`
//! - A high-level generation interface (`Generator`)

/// High-level interface: training plus single and batched generation.
pub mod generator;

/// Construction options of a generator (re-weighting exponent).
pub mod generator_config;

/// Category keys: fixed statistical categories and per-unit transitions.
pub mod category;

/// Insertion-ordered choice to weight mapping with cumulative picking.
pub mod frequency_map;

/// Raw observation counts built from training sequences.
pub mod raw_model;

/// Re-weighting transform from raw counts to sampling weights.
pub mod weighting;

/// Re-weighted model with per-category selection weights and sampling.
pub mod weighted_model;
