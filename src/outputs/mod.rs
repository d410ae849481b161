//! Output generation.
//!
//! # Submodules
//!
//! - [`csv`]: writes scraped records to a dated CSV file
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── {site}_2025_05_06_articles.csv     # kind: articles
//! └── {site}_2025_05_06_ud_programs.csv  # kind: programs
//! ```

pub mod csv;
