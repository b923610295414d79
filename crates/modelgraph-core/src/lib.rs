//! Modelgraph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the model graph
//! analyzer, assembler and layout engine. It includes:
//!
//! - **Identifiers**: Normalization and splitting of namespaced class identifiers ([`identifier`] module)
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Model**: The relationship graph data model ([`model`] module)

pub mod geometry;
pub mod identifier;
pub mod model;
