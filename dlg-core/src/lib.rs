pub mod config;
pub mod dates;
pub mod diary;
pub mod entry;
pub mod grammar;
pub mod paths;
pub mod resolver;
pub mod scanner;
pub mod section;
pub mod store;

pub use config::Config;
pub use diary::{Diary, LoadError, RangeResult};
pub use entry::Entry;
pub use grammar::{Flag, RawMatch, match_line};
pub use resolver::{ResolveError, resolve};
pub use scanner::{LineError, ScanResult, scan_content};
pub use section::{ScanState, Section};
pub use store::{DiaryStore, StoreError, WriteMode};
