// src/specs/mod.rs
//! # Listing "specs" module
//!
//! This module hosts the **field extraction specifications** for vehicle listings.
//! Each extractor encodes *where a field usually lives in a hand-written post* and *how
//! to read it robustly* when it is mislabeled, reordered or buried in markup.
//!
//! ## What lives here
//! - **Patterns** (`patterns`): every regex the extractors use, compiled once.
//! - **Strategy lists** (`strategy`): ordered fallbacks; the first non-empty
//!   result wins.
//! - **Field extractors** (`vehicle`): one pure function per feed field.
//!
//! ## What does **not** live here
//! - **Record assembly** and dealer metadata (`assemble`).
//! - **Serialization** (`xml`) and **I/O** (`source`, `transfer`, `runner`).
//!
//! ## Conventions & invariants
//! - Extractors never fail: a miss is `""` or an empty list.
//! - Scalars read the plain-text rendering; images and options read raw markup.
//! - Label matching is **case-insensitive**.
//! - Strategy hits are logged at `trace` so a surprising value can be traced back
//!   to the rule that produced it.
//!
//! ## Testing notes
//! - Every extractor is tested offline on short literal posts next to its code.
pub mod patterns;
pub mod strategy;
pub mod vehicle;
