//! Pagewatch engine: fetching, extraction, snapshot storage, diffing and the page runner.
mod decode;
mod diff;
mod extract;
mod fetch;
mod filename;
mod persist;
mod runner;
mod store;
mod types;

pub use decode::{decode_body, DecodeError, DecodedBody};
pub use diff::{normal_diff, DiffEngine, DiffError};
pub use extract::{ExtractError, Extractor, SelectorExtractor};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::{diff_filename, snapshot_filename, timestamp_stem, DIFF_EXT, SNAPSHOT_EXT};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use runner::{system_clock, Clock, PageRunner};
pub use store::{SnapshotStore, StoreError};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
