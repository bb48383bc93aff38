//! Compact binary lookup tables for Chinese administrative region codes.
//!
//! A dataset of `(code, name[, discard_year])` rows is packed once into a
//! small artifact; any 6-digit code is then resolved to its ancestor name
//! chain with a handful of bounded reads.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ classify.rs │────▶│  build/      │────▶│  binary/     │
//! │ (suffix →   │     │ (pack,       │     │ (header,     │
//! │  type)      │     │  dataset)    │     │  records,    │
//! └─────────────┘     └──────────────┘     │  index)      │
//!        ▲                   │             └──────────────┘
//!        │                   ▼                    │
//! ┌─────────────┐     ┌──────────────┐            ▼
//! │   util/     │     │  char_table  │     ┌──────────────┐
//! │ (normalize) │     │ (12-bit      │────▶│  search.rs   │
//! └─────────────┘     │  symbols)    │     │  table.rs    │
//!                     └──────────────┘     │  trie.rs     │
//!                                          └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use region_cn::{pack, search, SourceRecord};
//!
//! let rows: Vec<SourceRecord> = vec![
//!     ("530000", "云南省").into(),
//!     ("530900", "临沧市").into(),
//!     ("530925", "双江拉祜族佤族布朗族傣族自治县").into(),
//! ];
//! pack("region.dat", &rows, 2024092911)?;
//!
//! let lookup = search("region.dat", "530925")?;
//! assert_eq!(lookup.chain, "云南省临沧市双江拉祜族佤族布朗族傣族自治县");
//! # Ok::<(), region_cn::RegionError>(())
//! ```

// Module declarations
pub mod binary;
pub mod build;
pub mod classify;
pub mod error;
pub mod search;
pub mod table;
pub mod trie;
pub mod types;
pub mod util;

// Re-exports for public API
pub use build::{encode_artifact, load_dataset, pack, Dataset, PackSummary};
pub use classify::{classify, RegionType};
pub use error::{RegionError, Result};
pub use search::{search, search_in};
pub use table::{decode_records, read_records, read_version, ArtifactLayout};
pub use trie::RegionTrie;
pub use types::{Lookup, RegionCode, RegionRecord, SourceRecord};
