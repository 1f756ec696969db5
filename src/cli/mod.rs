// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the chunkweave command-line interface.
//!
//! Three subcommands: `merge` to interleave two JSON post lists, `plan` to
//! see how many secondary items a page needs, and `simulate` to play a whole
//! page render (store, injections, paging) from one JSON file.

pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "chunkweave",
    about = "Interleave sponsored items into a listing at fixed intervals",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge a secondary post list into a primary one
    Merge {
        /// JSON array of primary posts
        #[arg(short, long)]
        primary: String,

        /// JSON array of secondary posts
        #[arg(short, long)]
        secondary: String,

        /// Primary items per chunk
        #[arg(short, long, default_value = "1")]
        before_each: usize,

        /// Secondary items injected after each chunk
        #[arg(long, default_value = "1")]
        per_inject: usize,

        /// Print the merged list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how many secondary items a page of the given size needs
    Plan {
        /// Primary posts per page
        #[arg(long)]
        page_size: usize,

        /// Primary items per chunk
        #[arg(short, long, default_value = "1")]
        before_each: usize,

        /// Secondary items injected after each chunk
        #[arg(long, default_value = "1")]
        per_inject: usize,
    },

    /// Run a page render described by a JSON scenario file
    ///
    /// The file holds the store (`posts`), the primary post type, the
    /// injection sites and the paging of the listing.
    Simulate {
        /// Path to the scenario JSON file
        #[arg(short, long)]
        input: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
