// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the region-cn command-line interface.
//!
//! Four subcommands: `pack` to build an artifact from a JSON dataset,
//! `search` to resolve one code, `inspect` to examine an artifact's layout,
//! and `dump` to list every record it holds.

pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "region-cn",
    about = "Compact lookup tables for administrative region codes",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack a JSON dataset into a region artifact
    Pack {
        /// Dataset file: {"version": u32, "regions": [[code, name, year?], ...]}
        #[arg(short, long)]
        input: String,

        /// Output artifact path (replaced atomically)
        #[arg(short, long, default_value = "region.dat")]
        output: String,

        /// Build stamp written to the header
        ///
        /// Overrides the dataset's "version" key. Without either, the current
        /// Unix time in seconds is used.
        #[arg(long)]
        stamp: Option<u32>,
    },

    /// Resolve a 6-digit region code to its ancestor chain
    Search {
        /// Path to the artifact
        file: String,

        /// 6-digit region code
        code: String,

        /// Print the lookup as JSON
        #[arg(long)]
        json: bool,

        /// Load the whole artifact into an in-memory trie first
        #[arg(long)]
        trie: bool,
    },

    /// Inspect an artifact's structure
    Inspect {
        /// Path to the artifact
        file: String,
    },

    /// List every record of an artifact
    Dump {
        /// Path to the artifact
        file: String,

        /// Print records as JSON lines
        #[arg(long)]
        json: bool,
    },
}
