// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `atlas` build pipeline and CLI.
//!
//! Turns a DOT graph plus the SVG map drawn from it into the two artifacts a
//! map renderer loads: a node-id table and a binary adjacency stream.

pub mod cli;
pub mod config;
pub mod error;
pub mod inspect;
pub mod pipeline;
