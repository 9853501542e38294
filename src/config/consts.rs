// src/config/consts.rs

// Net config
pub const DEFAULT_ENDPOINT: &str = "https://pubmlst.org/bigsdb";
pub const CONNECT_TIMEOUT_SECS: u64 = 30;
pub const READ_TIMEOUT_SECS: u64 = 300; // sequence queries on whole genomes are slow
pub const USER_AGENT: &str = concat!("fetch_mlst/", env!("CARGO_PKG_VERSION"));

// Form fields
pub const FIELD_UPLOAD: &str = "fasta_upload";
pub const FIELD_DB: &str = "db";
pub const DB_PREFIX: &str = "pubmlst_";
pub const DB_SUFFIX: &str = "_seqdef";
pub const FIXED_FIELDS: [(&str, &str); 4] = [
    ("page", "sequenceQuery"),
    ("locus", "SCHEME_1"),
    ("order", "locus"),
    ("submit", "submit"),
];

// Report layout
pub const MAX_CELLS: usize = 4;
pub const SECTION_MARKER: &str = "MLST";
pub const NO_MATCH_MARKER: &str = "no_match_found";
pub const OUTPUT_SEP: char = '\t';

// Exit codes
pub const FAILURE_EXIT_CODE: u8 = 1;
pub const USAGE_EXIT_CODE: u8 = 2;
pub const NO_MATCH_EXIT_CODE: u8 = 0; // reported, not a crash
