// src/store.rs
//! Flat CSV store of [`ReviewRecord`]s.
//!
//! One row per record, header
//! `game_id,outlet_name,reviewer_type,score,review_date`, meant to stay
//! readable and hand-editable. The store owns its path (no globals) and a
//! mutex, so one `Arc<Store>` can be shared between the GUI and its scrape
//! worker while upserts stay serialized.
//!
//! Writes go to a sibling `*.tmp` file that is renamed over the store, and
//! the in-memory copy is only swapped once that succeeded.

use std::{
    collections::HashMap,
    fs::{self, File},
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use parking_lot::Mutex;
use thiserror::Error;

use crate::model::{RecordKey, ReviewRecord, ValidationError};

pub const HEADERS: [&str; 5] = ["game_id", "outlet_name", "reviewer_type", "score", "review_date"];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot read store {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write store {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unexpected header in {}: expected `{expected}`, found `{found}`", .path.display())]
    Header {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("malformed store {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid record at line {line} of {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        line: u64,
        #[source]
        source: ValidationError,
    },

    #[error("refusing to store {game_id} / {outlet_name}: {source}")]
    Rejected {
        game_id: String,
        outlet_name: String,
        #[source]
        source: ValidationError,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpsertSummary {
    pub inserted: usize,
    pub updated: usize,
}

impl UpsertSummary {
    pub fn total(&self) -> usize { self.inserted + self.updated }
}

#[derive(Clone, Debug, Default)]
struct Inner {
    records: Vec<ReviewRecord>,
    index: HashMap<RecordKey, usize>,
}

impl Inner {
    /// Build the key index. A key seen twice (hand-edited file) keeps the
    /// later row's score and date in the earlier row's position.
    fn from_records(rows: Vec<ReviewRecord>) -> Self {
        let mut inner = Inner::default();
        for r in rows {
            if inner.apply(r) {
                loge!("Store: duplicate key collapsed while loading");
            }
        }
        inner
    }

    /// Insert or update. Returns true when an existing record was updated.
    fn apply(&mut self, r: ReviewRecord) -> bool {
        let key = r.key();
        match self.index.get(&key) {
            Some(&ix) => {
                let slot = &mut self.records[ix];
                slot.score = r.score;
                slot.review_date = r.review_date;
                true
            }
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(r);
                false
            }
        }
    }
}

pub struct Store {
    path: PathBuf,
    inner: Mutex<Inner>,
}

impl Store {
    /// Open the store at `path`. A missing file is an empty store; it is
    /// created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let rows = read_file(&path)?;
        logf!("Store: opened {} ({} records)", path.display(), rows.len());
        Ok(Self { inner: Mutex::new(Inner::from_records(rows)), path })
    }

    pub fn path(&self) -> &Path { &self.path }
    pub fn len(&self) -> usize { self.inner.lock().records.len() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// In-memory snapshot, no I/O.
    pub fn records(&self) -> Vec<ReviewRecord> {
        self.inner.lock().records.clone()
    }

    /// Re-read the backing file and return every record in file order.
    pub fn load_all(&self) -> Result<Vec<ReviewRecord>, StorageError> {
        let mut inner = self.inner.lock();
        let rows = read_file(&self.path)?;
        *inner = Inner::from_records(rows);
        logd!("Store: reloaded {} records", inner.records.len());
        Ok(inner.records.clone())
    }

    /// Merge `records` by (game, outlet, reviewer type) into the file as it
    /// is on disk and write the whole collection back, so rows added by hand
    /// since the last load survive. Nothing changes (on disk or in memory) if
    /// any input record is invalid, the file no longer parses, or the write
    /// fails.
    pub fn upsert(&self, records: &[ReviewRecord]) -> Result<UpsertSummary, StorageError> {
        for r in records {
            r.validate().map_err(|source| StorageError::Rejected {
                game_id: r.game_id.clone(),
                outlet_name: r.outlet_name.clone(),
                source,
            })?;
        }

        let mut inner = self.inner.lock();
        let mut next = Inner::from_records(read_file(&self.path)?);
        let mut summary = UpsertSummary::default();

        for r in records {
            if next.apply(r.clone()) {
                summary.updated += 1;
            } else {
                summary.inserted += 1;
            }
        }

        write_file(&self.path, &next.records)?;
        *inner = next;
        logd!(
            "Store: upsert inserted={} updated={}",
            summary.inserted,
            summary.updated
        );
        Ok(summary)
    }

    /// Rewrite the backing file from memory.
    pub fn flush(&self) -> Result<(), StorageError> {
        let inner = self.inner.lock();
        write_file(&self.path, &inner.records)
    }
}

fn read_file(path: &Path) -> Result<Vec<ReviewRecord>, StorageError> {
    match fs::read(path) {
        Ok(bytes) => parse_records(&bytes, path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(source) => Err(StorageError::Read { path: path.to_path_buf(), source }),
    }
}

/// Parse store bytes. `path` is only used for error messages.
pub fn parse_records(bytes: &[u8], path: &Path) -> Result<Vec<ReviewRecord>, StorageError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let malformed = |source| StorageError::Malformed { path: path.to_path_buf(), source };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = rdr.headers().map_err(malformed)?.clone();
    if !headers.iter().eq(HEADERS.iter().copied()) {
        return Err(StorageError::Header {
            path: path.to_path_buf(),
            expected: HEADERS.join(","),
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut out = Vec::new();
    let mut raw = csv::StringRecord::new();
    while rdr.read_record(&mut raw).map_err(malformed)? {
        let line = raw.position().map(|p| p.line()).unwrap_or(0);
        let rec: ReviewRecord = raw.deserialize(Some(&headers)).map_err(malformed)?;
        rec.validate().map_err(|source| StorageError::Invalid {
            path: path.to_path_buf(),
            line,
            source,
        })?;
        out.push(rec);
    }
    Ok(out)
}

fn write_file(path: &Path, records: &[ReviewRecord]) -> Result<(), StorageError> {
    let write_err = |source| StorageError::Write { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let tmp = tmp_path(path);
    {
        let file = File::create(&tmp).map_err(write_err)?;
        let mut w = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));
        w.write_record(HEADERS).map_err(|e| write_err(e.into()))?;
        for r in records {
            w.serialize(r).map_err(|e| write_err(e.into()))?;
        }
        w.flush().map_err(write_err)?;
    }
    fs::rename(&tmp, path).map_err(write_err)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|s| s.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
