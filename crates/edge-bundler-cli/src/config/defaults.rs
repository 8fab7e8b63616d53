use std::path::PathBuf;

pub fn default_source_dir() -> PathBuf {
    PathBuf::from("edge-handlers")
}

pub fn default_out_dir() -> PathBuf {
    PathBuf::from(edge_bundler::hook::DEFAULT_OUT_DIR)
}

pub fn default_persist() -> bool {
    true
}
